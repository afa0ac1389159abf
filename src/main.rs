use abece::{
    audio::{AudioSink, NullAudio, TerminalBell},
    config::FileSettingsStore,
    game::Game,
    highscore::FileHighScoreStore,
    runtime::{CrosstermEventSource, FixedTicker, GameEvent, Runner},
    screen::ScreenState,
    ui::{hit, shake_area, slider_value, ScreenLayout},
};
use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::Rect,
    widgets::Clear,
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    thread,
    time::Duration,
};

const TICK_RATE_MS: u64 = 50;

/// terminal arcade game: type the alphabet position of the letter on screen
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Adivinhe o Número da Letra: a letter appears, you type its position in the alphabet (A=1…Z=26). Streaks pay bonuses, difficulty escalates, and your best score is kept between runs."
)]
pub struct Cli {
    /// tick interval in milliseconds
    #[clap(short = 't', long, default_value_t = TICK_RATE_MS)]
    tick_rate: u64,

    /// override the high score file location
    #[clap(long)]
    high_score_file: Option<PathBuf>,

    /// override the settings file location
    #[clap(long)]
    settings_file: Option<PathBuf>,

    /// disable all sound
    #[clap(long)]
    mute: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let high_score_store = match &cli.high_score_file {
        Some(path) => FileHighScoreStore::with_path(path),
        None => FileHighScoreStore::new(),
    };
    let settings_store = match &cli.settings_file {
        Some(path) => FileSettingsStore::with_path(path),
        None => FileSettingsStore::new(),
    };
    let audio: Box<dyn AudioSink> = if cli.mute {
        Box::new(NullAudio::default())
    } else {
        Box::new(TerminalBell::new(1.0))
    };

    let mut game = Game::new(
        Box::new(high_score_store),
        Box::new(settings_store),
        audio,
        StdRng::from_entropy(),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    game.on_resize(size.width, size.height);

    let result = start_tui(&mut terminal, &mut game, cli.tick_rate);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// Which settings slider a pointer drag is currently attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DragTarget {
    MusicVolume,
    SfxVolume,
}

fn start_tui<B: Backend>(
    terminal: &mut Terminal<B>,
    game: &mut Game,
    tick_rate: u64,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(tick_rate.max(1))),
    );
    let dt = tick_rate.max(1) as f64 / 1000.0;
    let mut drag: Option<DragTarget> = None;

    'outer: loop {
        match runner.step() {
            GameEvent::Tick => game.on_tick(dt),
            GameEvent::Resize(w, h) => game.on_resize(w, h),
            GameEvent::Mouse(mouse) => handle_mouse(game, mouse, &mut drag),
            GameEvent::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    break 'outer;
                }

                match game.screen {
                    ScreenState::Playing => match key.code {
                        KeyCode::Enter => game.submit_answer(),
                        KeyCode::Backspace => game.backspace(),
                        KeyCode::Esc => game.request_reset(),
                        KeyCode::Char(c) if c.is_ascii_digit() => game.append_digit(c),
                        _ => {}
                    },
                    ScreenState::Menu => match key.code {
                        KeyCode::Char(' ') => {
                            fade_out(terminal)?;
                            game.start();
                        }
                        KeyCode::Esc | KeyCode::Char('q') => break 'outer,
                        _ => {}
                    },
                    ScreenState::GameOver => {
                        if key.code == KeyCode::Char(' ') {
                            fade_out(terminal)?;
                            game.start();
                        }
                    }
                    ScreenState::ConfirmingDifficultyChange | ScreenState::ConfirmingReset => {
                        match key.code {
                            KeyCode::Char('s') | KeyCode::Char('S') => game.confirm(true),
                            KeyCode::Char('n') | KeyCode::Char('N') => game.confirm(false),
                            _ => {}
                        }
                    }
                    ScreenState::Settings => {
                        if key.code == KeyCode::Esc {
                            game.close_settings();
                        }
                    }
                }
            }
        }

        terminal.draw(|f| {
            let (dx, dy) = game.shake_offset();
            let area = shake_area(f.area(), dx, dy);
            f.render_widget(&*game, area);
        })?;
    }

    Ok(())
}

fn handle_mouse(game: &mut Game, mouse: MouseEvent, drag: &mut Option<DragTarget>) {
    let (w, h) = game.area;
    let layout = ScreenLayout::compute(Rect::new(0, 0, w as u16, h as u16));
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => match game.screen {
            ScreenState::Playing => {
                if hit(layout.reset_button, col, row) {
                    game.request_reset();
                } else if hit(layout.settings_button, col, row) {
                    game.open_settings();
                }
            }
            ScreenState::Menu => {
                if hit(layout.menu_settings_button, col, row) {
                    game.open_settings();
                }
            }
            ScreenState::Settings => {
                if hit(layout.close_button, col, row) {
                    game.close_settings();
                } else if hit(layout.music_slider, col, row) {
                    *drag = Some(DragTarget::MusicVolume);
                    game.set_music_volume(slider_value(layout.music_slider, col));
                } else if hit(layout.sfx_slider, col, row) {
                    *drag = Some(DragTarget::SfxVolume);
                    game.set_sfx_volume(slider_value(layout.sfx_slider, col));
                }
            }
            _ => {}
        },
        MouseEventKind::Drag(MouseButton::Left) => match drag {
            Some(DragTarget::MusicVolume) => {
                game.set_music_volume(slider_value(layout.music_slider, col));
            }
            Some(DragTarget::SfxVolume) => {
                game.set_sfx_volume(slider_value(layout.sfx_slider, col));
            }
            None => {}
        },
        MouseEventKind::Up(MouseButton::Left) => *drag = None,
        _ => {}
    }
}

/// Short synchronous fade to black between a menu/game-over screen and a
/// fresh session.
fn fade_out<B: Backend>(terminal: &mut Terminal<B>) -> Result<(), Box<dyn Error>> {
    for _ in 0..3 {
        terminal.draw(|f| f.render_widget(Clear, f.area()))?;
        thread::sleep(Duration::from_millis(40));
    }
    Ok(())
}

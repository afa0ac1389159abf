use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::game::Game;
use crate::screen::ScreenState;
use crate::session::FeedbackKind;

const PARTICLE_COLORS: [Color; 4] = [Color::Blue, Color::Green, Color::Yellow, Color::White];

/// Hit regions shared by the renderer and the mouse handler, derived from
/// the terminal area alone so both sides always agree.
#[derive(Debug, Clone, Copy)]
pub struct ScreenLayout {
    pub reset_button: Rect,
    pub settings_button: Rect,
    pub menu_settings_button: Rect,
    pub settings_panel: Rect,
    pub music_slider: Rect,
    pub sfx_slider: Rect,
    pub close_button: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let mid_y = area.y + area.height / 2;
        let reset_button = Rect {
            x: area.right().saturating_sub(6),
            y: mid_y,
            width: 5,
            height: 1,
        };
        let settings_button = Rect {
            x: area.x + 1,
            y: mid_y,
            width: 5,
            height: 1,
        };
        let menu_settings_button = Rect {
            x: area.x + 1,
            y: area.bottom().saturating_sub(2),
            width: 5,
            height: 1,
        };

        let panel_w = (area.width as u32 * 6 / 10) as u16;
        let panel_h = (area.height as u32 * 6 / 10) as u16;
        let settings_panel = Rect {
            x: area.x + (area.width.saturating_sub(panel_w)) / 2,
            y: area.y + (area.height.saturating_sub(panel_h)) / 2,
            width: panel_w.max(20),
            height: panel_h.max(8),
        };
        let slider_w = settings_panel.width.saturating_sub(10).max(4);
        let slider_x = settings_panel.x + (settings_panel.width - slider_w) / 2;
        let music_slider = Rect {
            x: slider_x,
            y: settings_panel.y + settings_panel.height * 2 / 5,
            width: slider_w,
            height: 1,
        };
        let sfx_slider = Rect {
            x: slider_x,
            y: settings_panel.y + settings_panel.height * 3 / 5 + 1,
            width: slider_w,
            height: 1,
        };
        let close_button = Rect {
            x: settings_panel.right().saturating_sub(6),
            y: settings_panel.y + 1,
            width: 5,
            height: 1,
        };

        Self {
            reset_button,
            settings_button,
            menu_settings_button,
            settings_panel,
            music_slider,
            sfx_slider,
            close_button,
        }
    }
}

pub fn hit(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Fraction of the slider a click at `column` selects, clamped to [0,1].
pub fn slider_value(slider: Rect, column: u16) -> f64 {
    if slider.width <= 1 {
        return 0.0;
    }
    let col = column.clamp(slider.x, slider.right().saturating_sub(1));
    (col - slider.x) as f64 / (slider.width - 1) as f64
}

fn slider_handle_column(slider: Rect, value: f64) -> u16 {
    slider.x + ((slider.width.saturating_sub(1)) as f64 * value.clamp(0.0, 1.0)).round() as u16
}

/// Shifts a rect by the shake offset, clamped to stay on screen.
pub fn shake_area(area: Rect, dx: i16, dy: i16) -> Rect {
    let x = (area.x as i32 + dx as i32).max(0) as u16;
    let y = (area.y as i32 + dy as i32).max(0) as u16;
    Rect {
        x,
        y,
        width: area.width.saturating_sub(x.saturating_sub(area.x)),
        height: area.height.saturating_sub(y.saturating_sub(area.y)),
    }
}

impl Widget for &Game {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            ScreenState::Menu => render_menu(self, area, buf),
            ScreenState::Playing => render_playing(self, area, buf),
            ScreenState::ConfirmingReset => {
                render_playing(self, area, buf);
                render_confirm_reset(area, buf);
            }
            ScreenState::ConfirmingDifficultyChange => {
                render_confirm_difficulty(self, area, buf);
            }
            ScreenState::Settings => render_settings(self, area, buf),
            ScreenState::GameOver => render_game_over(self, area, buf),
        }
        render_credits(area, buf);
        render_particles(self, area, buf);
    }
}

fn render_menu(game: &Game, area: Rect, buf: &mut Buffer) {
    for letter in &game.menu_letters.letters {
        let x = letter.x.round() as i64;
        let y = letter.y.round() as i64;
        if x >= area.x as i64 && x < area.right() as i64 && y >= area.y as i64 && y < area.bottom() as i64
        {
            let style = match letter.intensity() {
                i if i < 0.34 => Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
                i if i < 0.67 => Style::default().fg(Color::DarkGray),
                _ => Style::default().fg(Color::Gray),
            };
            buf.set_string(x as u16, y as u16, letter.letter.to_string(), style);
        }
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(1),
            Constraint::Percentage(15),
            Constraint::Length(1),
            Constraint::Percentage(15),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        "Adivinhe o Número da Letra",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("RECORDE: {}", game.high_score),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    Paragraph::new(Span::styled(
        "Pressione ESPAÇO para começar",
        Style::default().fg(Color::Blue),
    ))
    .alignment(Alignment::Center)
    .render(chunks[5], buf);

    Paragraph::new(Span::styled(
        "Digite o número da letra e pressione Enter.",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center)
    .render(chunks[6], buf);

    let layout = ScreenLayout::compute(area);
    render_button(layout.menu_settings_button, "[ * ]", Color::DarkGray, buf);
}

fn render_playing(game: &Game, area: Rect, buf: &mut Buffer) {
    let margin_y = area.height / 20;
    let top = Rect {
        x: area.x + 2,
        y: area.y + margin_y,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(top);

    Paragraph::new(Span::styled(
        format!("Pontuação: {}", game.session.score),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Left)
    .render(halves[0], buf);

    Paragraph::new(Span::styled(
        format!("Vidas: {}", "♥ ".repeat(game.session.lives as usize)),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Right)
    .render(halves[1], buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Length(1),
            Constraint::Percentage(10),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    if let Some(challenge) = game.challenge {
        Paragraph::new(Span::styled(
            challenge.letter.to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }

    let input_w = (area.width / 2).clamp(10, 45).min(area.width);
    let input_area = Rect {
        x: area.x + (area.width.saturating_sub(input_w)) / 2,
        y: chunks[3].y,
        width: input_w,
        height: 3,
    }
    .intersection(area);
    Paragraph::new(Span::styled(
        game.session.input.clone(),
        Style::default().fg(Color::White),
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Gray)))
    .render(input_area, buf);

    let feedback_style = match game.session.feedback_kind {
        FeedbackKind::Success => Style::default().fg(Color::Green),
        FeedbackKind::Error => Style::default().fg(Color::Red),
        FeedbackKind::Info => Style::default().fg(Color::Yellow),
    };
    Paragraph::new(Span::styled(game.session.feedback.clone(), feedback_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[5], buf);

    let layout = ScreenLayout::compute(area);
    render_button(layout.reset_button, "[ X ]", Color::Red, buf);
    render_button(layout.settings_button, "[ * ]", Color::DarkGray, buf);
}

fn render_confirm_reset(area: Rect, buf: &mut Buffer) {
    let panel = overlay_panel(area, buf, "Voltar ao Menu Principal?");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(panel);

    Paragraph::new(Span::styled(
        "Todo o progresso da partida será perdido.",
        Style::default().fg(Color::Gray),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "Pressione [S] para confirmar ou [N] para cancelar",
        Style::default().fg(Color::White),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

fn render_confirm_difficulty(game: &Game, area: Rect, buf: &mut Buffer) {
    let (name, description) = game.session.tier.announcement();
    let panel = overlay_panel(area, buf, "NOVO NÍVEL!");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(panel);

    Paragraph::new(Span::styled(
        format!("Dificuldade aumentada para {} ({})", name, description),
        Style::default().fg(Color::White),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "Pressione [S] para continuar ou [N] para voltar ao menu",
        Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);
}

fn render_settings(game: &Game, area: Rect, buf: &mut Buffer) {
    let layout = ScreenLayout::compute(area);
    let panel = layout.settings_panel.intersection(area);
    Clear.render(panel, buf);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title("Configurações de Áudio")
        .title_alignment(Alignment::Center)
        .render(panel, buf);

    let music = layout.music_slider.intersection(area);
    if music.width > 1 {
        render_slider("Música", music, game.settings.music_volume, buf);
    }
    let sfx = layout.sfx_slider.intersection(area);
    if sfx.width > 1 {
        render_slider("Efeitos Sonoros", sfx, game.settings.sfx_volume, buf);
    }
    render_button(layout.close_button.intersection(area), "[ X ]", Color::Red, buf);
}

fn render_slider(label: &str, slider: Rect, value: f64, buf: &mut Buffer) {
    let label_area = Rect {
        y: slider.y.saturating_sub(1),
        ..slider
    };
    Paragraph::new(Span::styled(label, Style::default().fg(Color::White)))
        .alignment(Alignment::Center)
        .render(label_area, buf);

    buf.set_string(
        slider.x,
        slider.y,
        "─".repeat(slider.width as usize),
        Style::default().fg(Color::DarkGray),
    );
    buf.set_string(
        slider_handle_column(slider, value),
        slider.y,
        "█",
        Style::default().fg(Color::Blue),
    );
}

fn render_game_over(game: &Game, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(1),
            Constraint::Percentage(20),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    if game.beat_high_score() {
        Paragraph::new(Span::styled(
            "NOVO RECORDE!",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    } else {
        Paragraph::new(Span::styled(
            "FIM DE JOGO",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);
    }

    Paragraph::new(Span::styled(
        format!("Pontuação Final: {}", game.session.score),
        Style::default().fg(Color::White),
    ))
    .alignment(Alignment::Center)
    .render(chunks[3], buf);

    if !game.session.miss_log.is_empty() {
        Paragraph::new(Span::styled(
            "Respostas corretas:",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

        let missed = game
            .session
            .miss_log
            .iter()
            .map(|(letter, number)| format!("{} = {}", letter, number))
            .join(", ");
        Paragraph::new(Span::styled(missed, Style::default().fg(Color::White)))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);
    }

    Paragraph::new(Span::styled(
        "Pressione ESPAÇO para jogar novamente",
        Style::default().fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[7], buf);
}

fn render_particles(game: &Game, area: Rect, buf: &mut Buffer) {
    for p in &game.burst.particles {
        let x = p.x.round() as i64;
        let y = p.y.round() as i64;
        if x >= area.x as i64 && x < area.right() as i64 && y >= area.y as i64 && y < area.bottom() as i64
        {
            let color = PARTICLE_COLORS[p.color_index % PARTICLE_COLORS.len()];
            buf.set_string(x as u16, y as u16, p.symbol.to_string(), Style::default().fg(color));
        }
    }
}

fn render_credits(area: Rect, buf: &mut Buffer) {
    if area.height < 2 {
        return;
    }
    let line = Rect {
        x: area.x,
        y: area.bottom() - 1,
        width: area.width.saturating_sub(2),
        height: 1,
    };
    Paragraph::new(Span::styled(
        "Por: Lucas N :)",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Right)
    .render(line, buf);
}

fn render_button(rect: Rect, label: &str, color: Color, buf: &mut Buffer) {
    Paragraph::new(Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .render(rect, buf);
}

fn overlay_panel(area: Rect, buf: &mut Buffer, title: &str) -> Rect {
    let panel = Rect {
        x: area.x + area.width / 6,
        y: area.y + area.height / 4,
        width: area.width - area.width / 3,
        height: (area.height / 2).max(7),
    }
    .intersection(area);
    Clear.render(panel, buf);
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .render(panel, buf);
    panel
}

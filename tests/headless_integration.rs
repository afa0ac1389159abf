// Drives full game sessions through the event runner without a terminal.

use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use abece::audio::NullAudio;
use abece::config::MemorySettingsStore;
use abece::game::Game;
use abece::highscore::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
use abece::runtime::{FixedTicker, GameEvent, GameEventSource, Runner, TestEventSource};
use abece::screen::ScreenState;
use abece::session::FeedbackKind;

const DT: f64 = 0.05;

fn key(code: KeyCode) -> GameEvent {
    GameEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn new_game(store: Box<dyn HighScoreStore>) -> Game {
    Game::new(
        store,
        Box::new(MemorySettingsStore::default()),
        Box::new(NullAudio::default()),
        StdRng::seed_from_u64(42),
    )
}

/// The per-screen key dispatch the binary performs, minus terminal concerns.
fn dispatch(game: &mut Game, event: GameEvent) {
    match event {
        GameEvent::Tick => game.on_tick(DT),
        GameEvent::Resize(w, h) => game.on_resize(w, h),
        GameEvent::Mouse(_) => {}
        GameEvent::Key(k) => match game.screen {
            ScreenState::Playing => match k.code {
                KeyCode::Enter => game.submit_answer(),
                KeyCode::Backspace => game.backspace(),
                KeyCode::Esc => game.request_reset(),
                KeyCode::Char(c) if c.is_ascii_digit() => game.append_digit(c),
                _ => {}
            },
            ScreenState::Menu | ScreenState::GameOver => {
                if k.code == KeyCode::Char(' ') {
                    game.start();
                }
            }
            ScreenState::ConfirmingDifficultyChange | ScreenState::ConfirmingReset => {
                match k.code {
                    KeyCode::Char('s') => game.confirm(true),
                    KeyCode::Char('n') => game.confirm(false),
                    _ => {}
                }
            }
            ScreenState::Settings => {
                if k.code == KeyCode::Esc {
                    game.close_settings();
                }
            }
        },
    }
}

/// Queues events, then steps the runner once per queued event plus a few
/// trailing ticks so time-driven transitions (difficulty prompts) fire.
fn run_script(game: &mut Game, events: Vec<GameEvent>) {
    let (tx, rx) = mpsc::channel();
    let count = events.len();
    for ev in events {
        tx.send(ev).unwrap();
    }
    let runner = Runner::new(
        TestEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(1)),
    );
    for _ in 0..count + 3 {
        let ev = runner.step();
        dispatch(game, ev);
    }
}

fn type_answer(answer: u32) -> Vec<GameEvent> {
    let mut events: Vec<GameEvent> = answer
        .to_string()
        .chars()
        .map(|c| key(KeyCode::Char(c)))
        .collect();
    events.push(key(KeyCode::Enter));
    events
}

#[test]
fn session_ends_after_three_wrong_answers() {
    let mut game = new_game(Box::new(MemoryHighScoreStore::default()));
    let mut script = vec![key(KeyCode::Char(' '))];
    for _ in 0..3 {
        script.extend(type_answer(999));
    }
    run_script(&mut game, script);

    assert_eq!(game.screen, ScreenState::GameOver);
    assert_eq!(game.session.lives, 0);
    assert_eq!(game.session.score, 0);
    assert_eq!(game.session.miss_log.len(), 3);
}

#[test]
fn correct_answers_accumulate_score_through_the_runner() {
    let mut game = new_game(Box::new(MemoryHighScoreStore::default()));
    run_script(&mut game, vec![key(KeyCode::Char(' '))]);
    assert_eq!(game.screen, ScreenState::Playing);

    for _ in 0..3 {
        let answer = game.challenge.expect("a challenge is on screen").answer;
        run_script(&mut game, type_answer(answer));
    }

    assert_eq!(game.session.score, 3);
    assert_eq!(game.session.streak, 3);
    assert_eq!(game.session.feedback_kind, FeedbackKind::Success);
}

#[test]
fn difficulty_prompt_interrupts_after_five_hits() {
    let mut game = new_game(Box::new(MemoryHighScoreStore::default()));
    run_script(&mut game, vec![key(KeyCode::Char(' '))]);

    for _ in 0..5 {
        let answer = game.challenge.expect("a challenge is on screen").answer;
        run_script(&mut game, type_answer(answer));
    }

    // The trailing ticks in run_script carry the streak check.
    assert_eq!(game.screen, ScreenState::ConfirmingDifficultyChange);
    run_script(&mut game, vec![key(KeyCode::Char('s'))]);
    assert_eq!(game.screen, ScreenState::Playing);
}

#[test]
fn backspace_edits_the_buffer_before_submission() {
    let mut game = new_game(Box::new(MemoryHighScoreStore::default()));
    run_script(&mut game, vec![key(KeyCode::Char(' '))]);
    run_script(
        &mut game,
        vec![
            key(KeyCode::Char('2')),
            key(KeyCode::Char('9')),
            key(KeyCode::Backspace),
        ],
    );
    assert_eq!(game.session.input, "2");
}

#[test]
fn escape_walks_through_reset_confirmation() {
    let mut game = new_game(Box::new(MemoryHighScoreStore::default()));
    run_script(&mut game, vec![key(KeyCode::Char(' '))]);
    run_script(&mut game, vec![key(KeyCode::Esc)]);
    assert_eq!(game.screen, ScreenState::ConfirmingReset);

    run_script(&mut game, vec![key(KeyCode::Char('n'))]);
    assert_eq!(game.screen, ScreenState::Playing);

    run_script(&mut game, vec![key(KeyCode::Esc), key(KeyCode::Char('s'))]);
    assert_eq!(game.screen, ScreenState::Menu);
}

#[test]
fn space_on_game_over_starts_a_fresh_session() {
    let mut game = new_game(Box::new(MemoryHighScoreStore::default()));
    let mut script = vec![key(KeyCode::Char(' '))];
    for _ in 0..3 {
        script.extend(type_answer(999));
    }
    run_script(&mut game, script);
    assert_eq!(game.screen, ScreenState::GameOver);

    run_script(&mut game, vec![key(KeyCode::Char(' '))]);
    assert_eq!(game.screen, ScreenState::Playing);
    assert_eq!(game.session.lives, 3);
    assert_eq!(game.session.score, 0);
    assert!(game.session.miss_log.is_empty());
}

#[test]
fn high_score_lands_on_disk_at_game_over() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recorde.txt");
    let mut game = new_game(Box::new(FileHighScoreStore::with_path(&path)));

    run_script(&mut game, vec![key(KeyCode::Char(' '))]);
    for _ in 0..2 {
        let answer = game.challenge.expect("a challenge is on screen").answer;
        run_script(&mut game, type_answer(answer));
    }
    let mut script = Vec::new();
    for _ in 0..3 {
        script.extend(type_answer(999));
    }
    run_script(&mut game, script);

    assert_eq!(game.screen, ScreenState::GameOver);
    assert!(game.beat_high_score());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "2");

    // The next session picks the record back up from disk.
    run_script(&mut game, vec![key(KeyCode::Char(' '))]);
    assert_eq!(game.high_score, 2);
}

#[test]
fn lower_score_leaves_existing_record_alone() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recorde.txt");
    std::fs::write(&path, "10").unwrap();
    let mut game = new_game(Box::new(FileHighScoreStore::with_path(&path)));

    let mut script = vec![key(KeyCode::Char(' '))];
    for _ in 0..3 {
        script.extend(type_answer(999));
    }
    run_script(&mut game, script);

    assert_eq!(game.screen, ScreenState::GameOver);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "10");
}

#[test]
fn test_event_source_preserves_ordering() {
    let (tx, rx) = mpsc::channel();
    tx.send(key(KeyCode::Char('1'))).unwrap();
    tx.send(GameEvent::Resize(100, 40)).unwrap();
    let source = TestEventSource::new(rx);

    match source.recv_timeout(Duration::from_millis(10)).unwrap() {
        GameEvent::Key(k) => assert_eq!(k.code, KeyCode::Char('1')),
        other => panic!("unexpected event: {other:?}"),
    }
    match source.recv_timeout(Duration::from_millis(10)).unwrap() {
        GameEvent::Resize(100, 40) => {}
        other => panic!("unexpected event: {other:?}"),
    }
}

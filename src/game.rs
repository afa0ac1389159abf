use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::AudioSink;
use crate::config::{Settings, SettingsStore};
use crate::effects::{Burst, MenuLetters, Shake};
use crate::highscore::HighScoreStore;
use crate::letters::{draw_letter, letter_value, Tier};
use crate::messages;
use crate::scoring::{bonus_for_streak, MissGrade};
use crate::screen::{transition, ScreenEvent, ScreenState};
use crate::session::{Challenge, FeedbackKind, Session};

/// The game session controller. Owns all mutable game state, consumes
/// discrete input events and deterministically derives the next state and
/// score delta. Rendering, audio and persistence are collaborators reached
/// through narrow side-effecting calls.
pub struct Game {
    pub session: Session,
    pub screen: ScreenState,
    pub challenge: Option<Challenge>,
    pub high_score: u32,
    pub settings: Settings,
    pub burst: Burst,
    pub shake: Shake,
    pub menu_letters: MenuLetters,
    /// Terminal size in cells, kept for effect placement.
    pub area: (f64, f64),
    new_record: bool,
    rng: StdRng,
    high_score_store: Box<dyn HighScoreStore>,
    settings_store: Box<dyn SettingsStore>,
    audio: Box<dyn AudioSink>,
}

impl Game {
    pub fn new(
        high_score_store: Box<dyn HighScoreStore>,
        settings_store: Box<dyn SettingsStore>,
        mut audio: Box<dyn AudioSink>,
        rng: StdRng,
    ) -> Self {
        let high_score = high_score_store.load();
        let settings = settings_store.load();
        audio.set_music_volume(settings.music_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.start_music();

        let mut game = Self {
            session: Session::new(),
            screen: ScreenState::Menu,
            challenge: None,
            high_score,
            settings,
            burst: Burst::default(),
            shake: Shake::default(),
            menu_letters: MenuLetters::default(),
            area: (80.0, 24.0),
            new_record: false,
            rng,
            high_score_store,
            settings_store,
            audio,
        };
        let (w, h) = game.area;
        game.menu_letters.populate(&mut game.rng, w, h);
        game
    }

    /// Space on the menu or game-over screen: begin a fresh session.
    pub fn start(&mut self) {
        if self.apply(ScreenEvent::Start) {
            self.reset_session();
        }
    }

    fn reset_session(&mut self) {
        self.session = Session::new();
        self.high_score = self.high_score_store.load();
        self.new_record = false;
        self.burst = Burst::default();
        self.shake = Shake::default();
        self.next_challenge();
    }

    fn next_challenge(&mut self) {
        let letter = draw_letter(&mut self.rng, self.session.tier, &mut self.session.history);
        self.challenge = Some(Challenge {
            letter,
            answer: letter_value(letter),
        });
    }

    pub fn append_digit(&mut self, c: char) {
        if self.screen == ScreenState::Playing {
            self.session.append_digit(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.screen == ScreenState::Playing {
            self.session.backspace();
        }
    }

    /// Parses and judges the input buffer. The buffer is cleared after
    /// every attempt, whatever the outcome.
    pub fn submit_answer(&mut self) {
        if self.screen != ScreenState::Playing {
            return;
        }
        let text = std::mem::take(&mut self.session.input);
        let Some(challenge) = self.challenge else {
            return;
        };

        match text.parse::<i64>() {
            Ok(answer) if answer == challenge.answer as i64 => self.record_hit(),
            Ok(answer) => self.record_miss(challenge, answer),
            // A digit string too long for i64 is still a numeric answer,
            // just a hopeless one.
            Err(_) if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) => {
                self.record_miss(challenge, i64::MAX);
            }
            Err(_) => {
                self.session
                    .set_feedback(messages::PARSE_FAILURE, FeedbackKind::Info);
            }
        }
    }

    fn record_hit(&mut self) {
        self.session.streak += 1;
        self.session.score += 1;

        let msg = messages::choose_distinct(
            &mut self.rng,
            &messages::SUCCESS,
            &self.session.last_feedback,
        );
        self.session.last_feedback = msg.to_string();

        let bonus = bonus_for_streak(self.session.streak);
        self.session.score += bonus;
        let feedback = match messages::milestone_banner(bonus) {
            Some(banner) => banner,
            None if bonus > 0 => format!("{} +{} BÔNUS!", msg, bonus),
            None => msg.to_string(),
        };
        self.session.set_feedback(feedback, FeedbackKind::Success);

        self.audio.play_success();
        let (w, h) = self.area;
        self.burst.emit(&mut self.rng, w / 2.0, h / 3.0);
        self.next_challenge();
    }

    fn record_miss(&mut self, challenge: Challenge, answer: i64) {
        self.session.lose_life();
        self.session.streak = 0;
        self.session.miss_log.push((challenge.letter, challenge.answer));
        self.shake.trigger();

        let grade = MissGrade::classify(answer, challenge.answer as i64);
        let msg = messages::choose_distinct(
            &mut self.rng,
            messages::miss_pool(grade),
            &self.session.last_feedback,
        );
        self.session.last_feedback = msg.to_string();
        self.session.set_feedback(msg, FeedbackKind::Error);

        self.audio.play_error();

        if self.session.lives == 0 {
            if self.apply(ScreenEvent::LivesExhausted) {
                self.persist_high_score();
            }
        } else {
            self.next_challenge();
        }
    }

    fn persist_high_score(&mut self) {
        if self.session.score > self.high_score {
            self.new_record = true;
            self.high_score = self.session.score;
            // Best-effort: an unwritable file costs the record, not the game.
            let _ = self.high_score_store.save(self.high_score);
        }
    }

    /// True when the session strictly beat the stored record, decided once at
    /// game over. A score that only ties the record is not a new record.
    pub fn beat_high_score(&self) -> bool {
        self.screen == ScreenState::GameOver && self.new_record
    }

    /// Runs once per tick. While Playing this is the difficulty check: the
    /// target tier is derived from the streak and a raise pauses the round
    /// for confirmation, preserving the in-flight challenge. Tier is
    /// monotone, so an already-confirmed tier can never re-prompt.
    pub fn on_tick(&mut self, dt: f64) {
        if self.screen == ScreenState::Playing {
            let target = Tier::for_streak(self.session.streak);
            if target > self.session.tier {
                self.session.tier = target;
                self.apply(ScreenEvent::TierRaised);
            }
        }

        let (w, h) = self.area;
        self.burst.update(dt, w, h);
        if self.screen == ScreenState::Menu {
            self.menu_letters.update(&mut self.rng, dt, w, h);
        }
    }

    /// Yes/no on either confirmation screen.
    pub fn confirm(&mut self, accept: bool) {
        self.apply(ScreenEvent::Confirm { accept });
    }

    pub fn request_reset(&mut self) {
        self.apply(ScreenEvent::ResetRequested);
    }

    pub fn open_settings(&mut self) {
        self.apply(ScreenEvent::OpenSettings);
    }

    pub fn close_settings(&mut self) {
        let in_progress = self.session.in_progress();
        if self.apply(ScreenEvent::CloseSettings {
            session_in_progress: in_progress,
        }) {
            let _ = self.settings_store.save(&self.settings);
        }
    }

    pub fn set_music_volume(&mut self, volume: f64) {
        self.settings.music_volume = volume.clamp(0.0, 1.0);
        self.audio.set_music_volume(self.settings.music_volume);
    }

    pub fn set_sfx_volume(&mut self, volume: f64) {
        self.settings.sfx_volume = volume.clamp(0.0, 1.0);
        self.audio.set_sfx_volume(self.settings.sfx_volume);
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.area = (width as f64, height as f64);
        let (w, h) = self.area;
        self.menu_letters.populate(&mut self.rng, w, h);
    }

    /// Render offset for the current frame while shaking.
    pub fn shake_offset(&mut self) -> (i16, i16) {
        self.shake.next_offset(&mut self.rng)
    }

    fn apply(&mut self, event: ScreenEvent) -> bool {
        match transition(self.screen, event) {
            Some(next) => {
                self.screen = next;
                true
            }
            None => false,
        }
    }
}

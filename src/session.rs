use crate::letters::Tier;

pub const STARTING_LIVES: u32 = 3;

/// One (letter, correct number) pair awaiting an answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub letter: char,
    pub answer: u32,
}

/// Tint of the feedback line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
    Info,
}

/// One live game: created on start/reset, mutated by each answered
/// challenge, replaced on the next reset.
#[derive(Clone, Debug)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    pub streak: u32,
    pub tier: Tier,
    /// Recently drawn letters, newest last, at most `letters::HISTORY_LEN`.
    pub history: Vec<char>,
    /// Missed (letter, correct number) pairs for the game-over screen.
    pub miss_log: Vec<(char, u32)>,
    /// Digits typed so far, awaiting submit.
    pub input: String,
    pub feedback: String,
    pub feedback_kind: FeedbackKind,
    pub last_feedback: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            streak: 0,
            tier: Tier::Easy,
            history: Vec::new(),
            miss_log: Vec::new(),
            input: String::new(),
            feedback: String::new(),
            feedback_kind: FeedbackKind::Info,
            last_feedback: String::new(),
        }
    }

    pub fn append_digit(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// True once any progress has been made; used to route the settings
    /// screen back to the game instead of the menu.
    pub fn in_progress(&self) -> bool {
        self.score > 0 || self.lives < STARTING_LIVES
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub fn set_feedback(&mut self, text: impl Into<String>, kind: FeedbackKind) {
        self.feedback = text.into();
        self.feedback_kind = kind;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

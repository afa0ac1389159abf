use rand::seq::SliceRandom;
use rand::Rng;

pub const ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S',
    'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// How many recently drawn letters are kept to avoid immediate repeats.
pub const HISTORY_LEN: usize = 5;

/// Difficulty tier. Monotone within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub fn for_streak(streak: u32) -> Self {
        if streak < 5 {
            Tier::Easy
        } else if streak < 10 {
            Tier::Medium
        } else {
            Tier::Hard
        }
    }

    /// The letters this tier draws from.
    pub fn pool(self) -> &'static [char] {
        match self {
            Tier::Easy => &ALPHABET[..10],
            Tier::Medium => &ALPHABET[..15],
            Tier::Hard => &ALPHABET[..],
        }
    }

    /// Display name and description shown in the tier-raise prompt.
    pub fn announcement(self) -> (&'static str, &'static str) {
        match self {
            Tier::Easy => ("Fácil", "Letras de A a J"),
            Tier::Medium => ("Médio", "Letras de A a O"),
            Tier::Hard => ("Difícil", "Todo o alfabeto"),
        }
    }
}

/// Alphabet position of a letter, A=1…Z=26.
pub fn letter_value(letter: char) -> u32 {
    (letter as u32) - ('A' as u32) + 1
}

/// Draws the next letter for the given tier, avoiding letters in `history`.
/// When every pool letter is in the history the exclusion is dropped for this
/// draw. The drawn letter is pushed onto `history`, trimmed to the most
/// recent `HISTORY_LEN`.
pub fn draw_letter<R: Rng>(rng: &mut R, tier: Tier, history: &mut Vec<char>) -> char {
    let pool = tier.pool();
    let fresh: Vec<char> = pool
        .iter()
        .copied()
        .filter(|c| !history.contains(c))
        .collect();

    let letter = if fresh.is_empty() {
        *pool.choose(rng).unwrap_or(&'A')
    } else {
        *fresh.choose(rng).unwrap_or(&'A')
    };

    history.push(letter);
    if history.len() > HISTORY_LEN {
        history.remove(0);
    }
    letter
}

use rand::seq::SliceRandom;
use rand::Rng;

/// Frames of screen shake after a wrong answer.
pub const SHAKE_FRAMES: u8 = 15;

/// Particles emitted by a success burst.
pub const BURST_SIZE: usize = 30;

/// Floating letters on the menu screen.
pub const MENU_LETTER_COUNT: usize = 15;

/// One celebratory particle. `update` reports whether the particle is still
/// alive; the owning burst drops expired ones.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
}

impl Particle {
    fn new<R: Rng>(rng: &mut R, x: f64, y: f64) -> Self {
        let speed = rng.gen_range(1.0..4.0);
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        Self {
            x,
            y,
            vel_x: angle.cos() * speed,
            vel_y: angle.sin() * speed * 0.5, // terminal cells are taller than wide
            symbol: *['*', '+', '•', '☆', '✦'].choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..4),
            age: 0.0,
            max_age: rng.gen_range(0.5..1.0),
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_x *= 0.95;
        self.vel_y *= 0.95;
        self.age += dt;
        self.age < self.max_age
    }
}

/// Success burst animation.
#[derive(Debug, Default)]
pub struct Burst {
    pub particles: Vec<Particle>,
}

impl Burst {
    pub fn emit<R: Rng>(&mut self, rng: &mut R, x: f64, y: f64) {
        for _ in 0..BURST_SIZE {
            self.particles.push(Particle::new(rng, x, y));
        }
    }

    pub fn update(&mut self, dt: f64, width: f64, height: f64) {
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            let on_screen =
                p.x >= -1.0 && p.x <= width + 1.0 && p.y >= -1.0 && p.y <= height + 1.0;
            alive && on_screen
        });
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }
}

/// Screen shake driven by a frame countdown.
#[derive(Debug, Default)]
pub struct Shake {
    frames_left: u8,
}

impl Shake {
    pub fn trigger(&mut self) {
        self.frames_left = SHAKE_FRAMES;
    }

    pub fn is_active(&self) -> bool {
        self.frames_left > 0
    }

    /// Advances one frame and returns the render offset for it.
    pub fn next_offset<R: Rng>(&mut self, rng: &mut R) -> (i16, i16) {
        if self.frames_left == 0 {
            return (0, 0);
        }
        self.frames_left -= 1;
        (rng.gen_range(-1..=1), rng.gen_range(-1..=1))
    }
}

/// Phase of a floating menu letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    FadingIn,
    Visible,
    FadingOut,
}

/// A dim background letter drifting up the menu screen. When its lifecycle
/// ends `update` returns false and the owning pool respawns a fresh one;
/// the letter never re-initializes itself.
#[derive(Debug, Clone)]
pub struct FloatingLetter {
    pub letter: char,
    pub x: f64,
    pub y: f64,
    vel_y: f64,
    phase: Phase,
    alpha: f64,
    max_alpha: f64,
    visible_for: f64,
    visible_age: f64,
}

impl FloatingLetter {
    pub fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            letter: *crate::letters::ALPHABET.choose(rng).unwrap_or(&'A'),
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(0.0..height.max(1.0)),
            vel_y: rng.gen_range(0.2..1.0),
            phase: Phase::FadingIn,
            alpha: 0.0,
            max_alpha: rng.gen_range(0.2..0.8),
            visible_for: rng.gen_range(2.0..5.0),
            visible_age: 0.0,
        }
    }

    /// Returns false once the letter has fully faded out.
    pub fn update(&mut self, dt: f64, width: f64, height: f64) -> bool {
        self.y -= self.vel_y * dt;
        if self.y < -1.0 {
            self.y = height + 1.0;
            self.x = self.x.min(width.max(1.0) - 1.0);
        }

        match self.phase {
            Phase::FadingIn => {
                self.alpha += 0.25 * dt;
                if self.alpha >= self.max_alpha {
                    self.alpha = self.max_alpha;
                    self.phase = Phase::Visible;
                }
            }
            Phase::Visible => {
                self.visible_age += dt;
                if self.visible_age >= self.visible_for {
                    self.phase = Phase::FadingOut;
                }
            }
            Phase::FadingOut => {
                self.alpha -= 0.25 * dt;
                if self.alpha <= 0.0 {
                    return false;
                }
            }
        }
        true
    }

    /// Brightness in [0,1] for rendering.
    pub fn intensity(&self) -> f64 {
        (self.alpha / self.max_alpha).clamp(0.0, 1.0)
    }
}

/// Pool of floating letters; owns the respawn of expired ones.
#[derive(Debug, Default)]
pub struct MenuLetters {
    pub letters: Vec<FloatingLetter>,
}

impl MenuLetters {
    pub fn populate<R: Rng>(&mut self, rng: &mut R, width: f64, height: f64) {
        self.letters.clear();
        for _ in 0..MENU_LETTER_COUNT {
            self.letters.push(FloatingLetter::spawn(rng, width, height));
        }
    }

    pub fn update<R: Rng>(&mut self, rng: &mut R, dt: f64, width: f64, height: f64) {
        for letter in self.letters.iter_mut() {
            if !letter.update(dt, width, height) {
                *letter = FloatingLetter::spawn(rng, width, height);
            }
        }
    }
}

/// All game entity types — pure data, no logic.
///
/// Positions are raster pixels with the origin at the top-left corner of the
/// canvas; y grows downward.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// How a finished game ended.  Derived from the state, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Signed vertical speed: negative travels up, positive travels down.
    pub speed: f32,
    pub owner: BulletOwner,
}

// ── Explosions ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Remaining life; starts at `max_life` and decays every tick.
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    /// Remaining life as a fraction in `[0, 1]`.
    pub fn alpha(&self) -> f32 {
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    /// Where the explosion originated (the destroyed enemy's centre).
    pub x: f32,
    pub y: f32,
    pub particles: Vec<Particle>,
}

// ── Background ────────────────────────────────────────────────────────────────

/// Decorative background star.  Lives outside `GameState` because restarting
/// a game leaves the starfield untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub opacity: f32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Enemy {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Inclusive point-in-rectangle test shared by both collision passes.
pub fn point_in_rect(px: f32, py: f32, x: f32, y: f32, w: f32, h: f32) -> bool {
    px >= x && px <= x + w && py >= y && py <= y + h
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire simulation state.  Cloneable so the pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub explosions: Vec<Explosion>,
    pub score: u32,
    pub status: GameStatus,
    /// +1 moves the formation right, -1 moves it left.
    pub direction: i32,
    /// Ticks since the formation last stepped.
    pub move_timer: u32,
    /// Ticks since an enemy last fired.
    pub shoot_timer: u32,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn enemies_remaining(&self) -> usize {
        self.enemies.len()
    }

    /// `None` while playing; at game over an empty formation means a win.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Playing => None,
            GameStatus::GameOver if self.enemies.is_empty() => Some(Outcome::Won),
            GameStatus::GameOver => Some(Outcome::Lost),
        }
    }
}

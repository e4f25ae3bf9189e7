/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (plus the `Tuning` table and, where needed, an RNG handle) and
/// returns a brand-new value.  Side effects are limited to the injected RNG.

use rand::Rng;

use crate::config::Tuning;
use crate::entities::{
    point_in_rect, Bullet, BulletOwner, Enemy, Explosion, GameState, GameStatus, Particle,
    Player, Star,
};

/// Held movement keys sampled for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// The enemy grid at its starting offsets, row-major.
pub fn spawn_formation(tuning: &Tuning) -> Vec<Enemy> {
    (0..tuning.enemy_rows)
        .flat_map(|row| (0..tuning.enemy_cols).map(move |col| (row, col)))
        .map(|(row, col)| Enemy {
            x: col as f32 * tuning.enemy_spacing + tuning.enemy_start_x,
            y: row as f32 * tuning.enemy_spacing + tuning.enemy_start_y,
            width: tuning.enemy_width,
            height: tuning.enemy_height,
        })
        .collect()
}

/// Build the initial game state.
pub fn init_state(tuning: &Tuning) -> GameState {
    GameState {
        player: Player {
            x: tuning.player_start_x(),
            y: tuning.player_y(),
            width: tuning.player_width,
            height: tuning.player_height,
        },
        enemies: spawn_formation(tuning),
        bullets: Vec::new(),
        explosions: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        direction: 1,
        move_timer: 0,
        shoot_timer: 0,
        frame: 0,
        width: tuning.canvas_width,
        height: tuning.canvas_height,
    }
}

/// `GameOver → Playing`.  Player, formation, bullets, explosions, timers,
/// direction and score all start over.  The starfield is not part of
/// `GameState` and keeps drifting.
pub fn restart(tuning: &Tuning) -> GameState {
    init_state(tuning)
}

pub fn init_stars(tuning: &Tuning, rng: &mut impl Rng) -> Vec<Star> {
    (0..tuning.star_count)
        .map(|_| Star {
            x: rng.gen::<f32>() * tuning.canvas_width,
            y: rng.gen::<f32>() * tuning.canvas_height,
            size: rng.gen::<f32>() * 2.0 + 0.5,
            speed: rng.gen::<f32>() * 0.5 + 0.2,
            opacity: rng.gen::<f32>() * 0.5 + 0.5,
        })
        .collect()
}

/// Drift every star down by its speed.  A star that falls past the bottom
/// edge reappears at the top at a fresh random column.
pub fn advance_stars(stars: &[Star], tuning: &Tuning, rng: &mut impl Rng) -> Vec<Star> {
    stars
        .iter()
        .map(|s| {
            let y = s.y + s.speed;
            if y > tuning.canvas_height {
                Star {
                    x: rng.gen::<f32>() * tuning.canvas_width,
                    y: 0.0,
                    ..s.clone()
                }
            } else {
                Star { y, ..s.clone() }
            }
        })
        .collect()
}

/// A burst of particles at `(x, y)`, each with a random velocity.
pub fn create_explosion(x: f32, y: f32, tuning: &Tuning, rng: &mut impl Rng) -> Explosion {
    let particles = (0..tuning.particles_per_explosion)
        .map(|_| Particle {
            x,
            y,
            vx: (rng.gen::<f32>() - 0.5) * tuning.particle_spread,
            vy: (rng.gen::<f32>() - 0.5) * tuning.particle_spread,
            life: 1.0,
            max_life: 1.0,
        })
        .collect();
    Explosion { x, y, particles }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

fn clamp_player_x(x: f32, state: &GameState) -> f32 {
    x.clamp(0.0, (state.width - state.player.width).max(0.0))
}

/// Player position after one tick of held movement.  Left is applied before
/// right, each step clamped to the canvas.
fn step_player(state: &GameState, input: TickInput, tuning: &Tuning) -> Player {
    let mut x = state.player.x;
    if input.left {
        x = clamp_player_x(x - tuning.player_speed, state);
    }
    if input.right {
        x = clamp_player_x(x + tuning.player_speed, state);
    }
    Player {
        x,
        ..state.player.clone()
    }
}

pub fn move_player_left(state: &GameState, tuning: &Tuning) -> GameState {
    let input = TickInput {
        left: true,
        right: false,
    };
    GameState {
        player: step_player(state, input, tuning),
        ..state.clone()
    }
}

pub fn move_player_right(state: &GameState, tuning: &Tuning) -> GameState {
    let input = TickInput {
        left: false,
        right: true,
    };
    GameState {
        player: step_player(state, input, tuning),
        ..state.clone()
    }
}

/// Fire one bullet upward from the nose of the ship.  Ignored once the game
/// is over.
pub fn player_shoot(state: &GameState, tuning: &Tuning) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet {
        x: state.player.x + state.player.width / 2.0,
        y: state.player.y,
        speed: -tuning.bullet_speed,
        owner: BulletOwner::Player,
    });
    GameState {
        bullets,
        ..state.clone()
    }
}

// ── Per-tick helpers ─────────────────────────────────────────────────────────

/// Move every particle and decay its life; expired particles and empty
/// explosions are dropped.
pub fn advance_explosions(explosions: &[Explosion], tuning: &Tuning) -> Vec<Explosion> {
    explosions
        .iter()
        .filter_map(|ex| {
            let particles: Vec<Particle> = ex
                .particles
                .iter()
                .map(|p| Particle {
                    x: p.x + p.vx,
                    y: p.y + p.vy,
                    life: p.life - tuning.particle_decay,
                    ..p.clone()
                })
                .filter(|p| p.life > 0.0)
                .collect();
            if particles.is_empty() {
                None
            } else {
                Some(Explosion {
                    particles,
                    ..ex.clone()
                })
            }
        })
        .collect()
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
/// A finished game is returned unchanged.
pub fn tick(
    state: &GameState,
    input: TickInput,
    tuning: &Tuning,
    rng: &mut impl Rng,
) -> GameState {
    if state.is_over() {
        return state.clone();
    }
    let frame = state.frame + 1;

    // ── 1. Player movement ───────────────────────────────────────────────────
    let player = step_player(state, input, tuning);

    // ── 2. Formation movement ────────────────────────────────────────────────
    let mut move_timer = state.move_timer + 1;
    let mut direction = state.direction;
    let mut enemies = state.enemies.clone();
    if move_timer >= tuning.formation_interval {
        move_timer = 0;
        let at_edge = enemies.iter().any(|e| {
            (e.x <= 0.0 && direction < 0) || (e.x + e.width >= state.width && direction > 0)
        });
        enemies = if at_edge {
            direction = -direction;
            enemies
                .iter()
                .map(|e| Enemy {
                    y: e.y + tuning.formation_drop,
                    ..e.clone()
                })
                .collect()
        } else {
            let dx = tuning.enemy_speed * direction as f32;
            enemies
                .iter()
                .map(|e| Enemy {
                    x: e.x + dx,
                    ..e.clone()
                })
                .collect()
        };
    }

    // ── 3. Enemy fire ────────────────────────────────────────────────────────
    let mut shoot_timer = state.shoot_timer + 1;
    let mut bullets = state.bullets.clone();
    if shoot_timer >= tuning.enemy_shoot_interval && !enemies.is_empty() {
        shoot_timer = 0;
        let shooter = &enemies[rng.gen_range(0..enemies.len())];
        bullets.push(Bullet {
            x: shooter.x + shooter.width / 2.0,
            y: shooter.y + shooter.height,
            speed: tuning.bullet_speed,
            owner: BulletOwner::Enemy,
        });
    }

    // ── 4. Advance bullets, discard those that left the canvas ──────────────
    let bullets: Vec<Bullet> = bullets
        .iter()
        .filter_map(|b| {
            let y = b.y + b.speed;
            if y > 0.0 && y < state.height {
                Some(Bullet { y, ..b.clone() })
            } else {
                None
            }
        })
        .collect();

    // ── 5. Collision: player bullets ↔ enemies ───────────────────────────────
    // Enemies are tested in formation order; a bullet takes out at most one.
    let mut explosions = state.explosions.clone();
    let mut score_gain = 0;
    let mut survivors = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        if bullet.owner == BulletOwner::Player {
            let hit = enemies
                .iter()
                .position(|e| point_in_rect(bullet.x, bullet.y, e.x, e.y, e.width, e.height));
            if let Some(index) = hit {
                let enemy = enemies.remove(index);
                let (cx, cy) = enemy.center();
                explosions.push(create_explosion(cx, cy, tuning, rng));
                score_gain += tuning.points_per_enemy;
                continue;
            }
        }
        survivors.push(bullet);
    }

    // ── 6. Explosions ────────────────────────────────────────────────────────
    let explosions = advance_explosions(&explosions, tuning);

    // ── 7. Collision: enemy bullets ↔ player ─────────────────────────────────
    let mut game_over = false;
    let bullets: Vec<Bullet> = survivors
        .into_iter()
        .filter(|b| {
            let hit = b.owner == BulletOwner::Enemy
                && point_in_rect(b.x, b.y, player.x, player.y, player.width, player.height);
            game_over |= hit;
            !hit
        })
        .collect();

    // ── 8. Formation reached the player ──────────────────────────────────────
    if enemies.iter().any(|e| e.y + e.height >= player.y) {
        game_over = true;
    }

    // ── 9. Formation wiped out ───────────────────────────────────────────────
    if enemies.is_empty() {
        game_over = true;
    }

    GameState {
        player,
        enemies,
        bullets,
        explosions,
        score: state.score + score_gain,
        status: if game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        },
        direction,
        move_timer,
        shoot_timer,
        frame,
        ..state.clone()
    }
}

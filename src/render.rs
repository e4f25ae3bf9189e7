/// Raster renderer.
///
/// Receives a framebuffer and an immutable view of the game state.  No game
/// logic is performed; this module only translates state into pixels.  The
/// score readout is text and is overlaid by the terminal presenter.

use crate::entities::{Bullet, Enemy, GameState, Particle, Player, Star};
use crate::raster::{Color, Framebuffer};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Color = Color::hex(0xff69b4);
pub const C_PLAYER: Color = Color::hex(0x00ff00);
pub const C_BULLET: Color = Color::hex(0xffffff);
const C_ALIEN_BODY: Color = Color::hex(0x2d5016);
const C_ALIEN_DARK: Color = Color::hex(0x1a3009);
const C_ALIEN_EYE: Color = Color::hex(0x000000);
const C_ALIEN_GLINT: Color = Color::hex(0xffffff);
const C_ALIEN_TIP: Color = Color::hex(0x8b0000);

pub const BULLET_WIDTH: f32 = 4.0;
pub const BULLET_HEIGHT: f32 = 10.0;

// ── Public entry point ────────────────────────────────────────────────────────

/// Draw one complete frame.
pub fn render(fb: &mut Framebuffer, state: &GameState, stars: &[Star]) {
    fb.clear(C_BACKGROUND);

    for star in stars {
        draw_star(fb, star);
    }
    for particle in state.explosions.iter().flat_map(|e| &e.particles) {
        draw_particle(fb, particle);
    }

    draw_player(fb, &state.player);

    for enemy in &state.enemies {
        draw_alien(fb, enemy);
    }
    for bullet in &state.bullets {
        draw_bullet(fb, bullet);
    }
}

// ── Background & effects ──────────────────────────────────────────────────────

fn draw_star(fb: &mut Framebuffer, star: &Star) {
    fb.fill_circle(star.x, star.y, star.size, Color::rgba(255, 255, 255, star.opacity));
}

/// Particles cool from yellow to red and shrink as they fade.
fn draw_particle(fb: &mut Framebuffer, particle: &Particle) {
    let alpha = particle.alpha();
    let green = (255.0 * (1.0 - alpha)).floor() as u8;
    fb.fill_circle(
        particle.x,
        particle.y,
        3.0 * alpha,
        Color::rgba(255, green, 0, alpha),
    );
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player(fb: &mut Framebuffer, p: &Player) {
    // Arrowhead: nose at top centre, swept wings, notched tail.
    let (x, y, w, h) = (p.x, p.y, p.width, p.height);
    fb.fill_polygon(
        &[
            (x + w / 2.0, y),
            (x, y + h),
            (x + w * 0.3, y + h * 0.7),
            (x + w * 0.7, y + h * 0.7),
            (x + w, y + h),
        ],
        C_PLAYER,
    );
}

fn draw_bullet(fb: &mut Framebuffer, b: &Bullet) {
    fb.fill_rect(
        b.x - BULLET_WIDTH / 2.0,
        b.y - BULLET_HEIGHT / 2.0,
        BULLET_WIDTH,
        BULLET_HEIGHT,
        C_BULLET,
    );
}

/// Mosquito-like alien.  Purely cosmetic; proportions are relative to the
/// enemy's bounding box.
fn draw_alien(fb: &mut Framebuffer, e: &Enemy) {
    let (x, y, w, h) = (e.x, e.y, e.width, e.height);
    let at = |fx: f32, fy: f32| (x + w * fx, y + h * fy);

    // Body and head
    fb.fill_ellipse(x + w / 2.0, y + h * 0.6, w * 0.35, h * 0.25, C_ALIEN_BODY);
    fb.fill_circle(x + w / 2.0, y + h * 0.25, w * 0.2, C_ALIEN_DARK);

    // Compound eyes with highlights
    for (ex, gx) in [(0.35, 0.37), (0.65, 0.67)] {
        let (cx, cy) = at(ex, 0.2);
        fb.fill_circle(cx, cy, w * 0.12, C_ALIEN_EYE);
        let (hx, hy) = at(gx, 0.18);
        fb.fill_circle(hx, hy, w * 0.03, C_ALIEN_GLINT);
    }

    // Proboscis
    fb.stroke_line(at(0.5, 0.35), at(0.5, 0.55), 2.0, C_ALIEN_DARK);
    let (tx, ty) = at(0.5, 0.55);
    fb.fill_circle(tx, ty, 2.0, C_ALIEN_TIP);

    // Antennae with feathered tips
    fb.stroke_line(at(0.3, 0.15), at(0.2, 0.05), 1.5, C_ALIEN_DARK);
    fb.stroke_line(at(0.7, 0.15), at(0.8, 0.05), 1.5, C_ALIEN_DARK);
    for (base, tips) in [(0.2, [0.15, 0.25]), (0.8, [0.75, 0.85])] {
        for tip in tips {
            fb.stroke_line(at(base, 0.05), at(tip, 0.02), 1.0, C_ALIEN_DARK);
        }
    }

    // Legs: front, middle, back pairs
    let legs = [
        ((0.25, 0.4), (0.15, 0.7)),
        ((0.75, 0.4), (0.85, 0.7)),
        ((0.4, 0.5), (0.35, 0.75)),
        ((0.6, 0.5), (0.65, 0.75)),
        ((0.5, 0.6), (0.45, 0.8)),
        ((0.5, 0.6), (0.55, 0.8)),
    ];
    for ((fx0, fy0), (fx1, fy1)) in legs {
        fb.stroke_line(at(fx0, fy0), at(fx1, fy1), 2.0, C_ALIEN_DARK);
    }
}

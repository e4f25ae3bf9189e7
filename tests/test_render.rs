use space_invaders::compute::init_state;
use space_invaders::config::Tuning;
use space_invaders::entities::*;
use space_invaders::raster::{Framebuffer, Pixel};
use space_invaders::render::*;

const PINK: Pixel = Pixel { r: 0xff, g: 0x69, b: 0xb4 };
const WHITE: Pixel = Pixel { r: 255, g: 255, b: 255 };
const GREEN: Pixel = Pixel { r: 0, g: 255, b: 0 };
const ALIEN_BODY: Pixel = Pixel { r: 0x2d, g: 0x50, b: 0x16 };

fn canvas() -> Framebuffer {
    Framebuffer::new(800, 600)
}

fn empty_field() -> GameState {
    let mut s = init_state(&Tuning::default());
    s.enemies.clear();
    s
}

#[test]
fn background_is_cleared_every_frame() {
    let mut fb = canvas();
    fb.fill_rect(0.0, 0.0, 800.0, 600.0, space_invaders::raster::Color::rgb(1, 2, 3));
    render(&mut fb, &empty_field(), &[]);
    assert_eq!(fb.pixel(0, 0), Some(PINK));
    assert_eq!(fb.pixel(799, 599), Some(PINK));
}

#[test]
fn player_ship_is_drawn_at_its_position() {
    let mut fb = canvas();
    let s = empty_field(); // ship spans (375..425, 550..580)
    render(&mut fb, &s, &[]);
    assert_eq!(fb.pixel(400, 560), Some(GREEN));
    // Tail notch between the wings stays background.
    assert_eq!(fb.pixel(400, 577), Some(PINK));
    assert_eq!(fb.pixel(400, 540), Some(PINK));
}

#[test]
fn bullets_are_small_white_rectangles() {
    let mut fb = canvas();
    let mut s = empty_field();
    s.bullets.push(Bullet { x: 100.0, y: 400.0, speed: -7.0, owner: BulletOwner::Player });
    render(&mut fb, &s, &[]);
    assert_eq!(fb.pixel(100, 400), Some(WHITE));
    assert_eq!(fb.pixel(98, 396), Some(WHITE));
    assert_eq!(fb.pixel(103, 400), Some(PINK));
    assert_eq!(fb.pixel(100, 406), Some(PINK));
}

#[test]
fn enemies_are_drawn_inside_their_box() {
    let mut fb = canvas();
    let mut s = empty_field();
    s.enemies.push(Enemy { x: 200.0, y: 200.0, width: 40.0, height: 30.0 });
    render(&mut fb, &s, &[]);

    let mut body = 0;
    for y in 200..230 {
        for x in 200..240 {
            if fb.pixel(x, y) == Some(ALIEN_BODY) {
                body += 1;
            }
        }
    }
    assert!(body > 0);
    assert_eq!(fb.pixel(199, 215), Some(PINK));
    assert_eq!(fb.pixel(220, 232), Some(PINK));
}

#[test]
fn fresh_particles_are_opaque_red() {
    let mut fb = canvas();
    let mut s = empty_field();
    s.explosions.push(Explosion {
        x: 700.0,
        y: 450.0,
        particles: vec![Particle { x: 700.0, y: 450.0, vx: 0.0, vy: 0.0, life: 1.0, max_life: 1.0 }],
    });
    render(&mut fb, &s, &[]);
    assert_eq!(fb.pixel(700, 450), Some(Pixel { r: 255, g: 0, b: 0 }));
}

#[test]
fn stars_are_drawn_with_their_opacity() {
    let mut fb = canvas();
    let stars = [
        Star { x: 700.0, y: 100.0, size: 2.0, speed: 0.5, opacity: 1.0 },
        Star { x: 600.0, y: 100.0, size: 2.0, speed: 0.5, opacity: 0.5 },
    ];
    render(&mut fb, &empty_field(), &stars);
    assert_eq!(fb.pixel(700, 100), Some(WHITE));
    let dim = fb.pixel(600, 100).unwrap();
    assert!(dim != WHITE && dim != PINK);
}

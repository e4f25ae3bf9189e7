use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::config::Tuning;
use space_invaders::entities::{GameStatus, Outcome};
use space_invaders::game_loop::*;
use space_invaders::input::Action;

fn space() -> KeyEvent {
    KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)
}

/// One enemy parked straight above the ship's nose.
fn lone_enemy_tuning() -> Tuning {
    Tuning {
        enemy_rows: 1,
        enemy_cols: 1,
        enemy_start_x: 380.0,
        ..Tuning::default()
    }
}

#[test]
fn frame_advances_simulation_and_renders() {
    let mut game = GameLoop::new(Tuning::default(), StdRng::seed_from_u64(7), false);
    assert_eq!(game.surface().width(), 800);
    assert_eq!(game.surface().height(), 600);
    assert_eq!(game.frame(), FrameResult::Continue);
    assert_eq!(game.state().frame, 1);
    assert_eq!(game.stars().len(), 100);
}

#[test]
fn fire_key_spawns_one_bullet() {
    let mut game = GameLoop::new(Tuning::default(), StdRng::seed_from_u64(7), false);
    assert_eq!(game.handle_key(space()), Some(Action::Fire));
    assert_eq!(game.handle_key(space()), None);
    assert_eq!(game.state().bullets.len(), 1);
}

#[test]
fn shooting_the_last_enemy_halts_until_restart() {
    let mut game = GameLoop::new(lone_enemy_tuning(), StdRng::seed_from_u64(7), false);
    game.handle_key(space());

    let mut result = FrameResult::Continue;
    for _ in 0..200 {
        result = game.frame();
        if result != FrameResult::Continue {
            break;
        }
    }
    assert_eq!(result, FrameResult::Halted(Outcome::Won));
    assert_eq!(game.state().score, 10);

    // No further simulation once halted.
    let frozen = game.state().clone();
    let stars = game.stars().to_vec();
    assert_eq!(game.frame(), FrameResult::Halted(Outcome::Won));
    assert_eq!(game.state(), &frozen);
    assert_eq!(game.stars(), stars.as_slice());

    // Fire is ignored, restart is offered.
    assert_eq!(game.handle_key(space()), None);
    let r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE);
    assert_eq!(game.handle_key(r), Some(Action::Restart));

    game.restart();
    assert_eq!(game.state().status, GameStatus::Playing);
    assert_eq!(game.state().score, 0);
    assert_eq!(game.state().enemies.len(), 1);
    assert_eq!(game.stars(), stars.as_slice());
    assert_eq!(game.frame(), FrameResult::Continue);
}

#[test]
fn single_press_keeps_moving_when_releases_are_reported() {
    let mut game = GameLoop::new(Tuning::default(), StdRng::seed_from_u64(7), true);
    game.handle_key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
    for _ in 0..30 {
        assert_eq!(game.frame(), FrameResult::Continue);
    }
    assert_eq!(game.state().player.x, 375.0 - 30.0 * 5.0);
}

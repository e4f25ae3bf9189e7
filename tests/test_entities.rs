use space_invaders::compute::init_state;
use space_invaders::config::Tuning;
use space_invaders::entities::*;

#[test]
fn outcome_is_derived_from_status_and_enemies() {
    let mut s = init_state(&Tuning::default());
    assert_eq!(s.outcome(), None);
    assert!(!s.is_over());

    s.status = GameStatus::GameOver;
    assert_eq!(s.outcome(), Some(Outcome::Lost));

    s.enemies.clear();
    assert_eq!(s.outcome(), Some(Outcome::Won));
    assert_eq!(s.enemies_remaining(), 0);
}

#[test]
fn point_in_rect_is_inclusive() {
    assert!(point_in_rect(10.0, 20.0, 10.0, 20.0, 5.0, 5.0));
    assert!(point_in_rect(15.0, 25.0, 10.0, 20.0, 5.0, 5.0));
    assert!(!point_in_rect(15.1, 25.0, 10.0, 20.0, 5.0, 5.0));
    assert!(!point_in_rect(9.9, 22.0, 10.0, 20.0, 5.0, 5.0));
}

#[test]
fn enemy_center() {
    let e = Enemy { x: 50.0, y: 50.0, width: 40.0, height: 30.0 };
    assert_eq!(e.center(), (70.0, 65.0));
}

#[test]
fn particle_alpha_is_life_fraction() {
    let mut p = Particle { x: 0.0, y: 0.0, vx: 0.0, vy: 0.0, life: 0.5, max_life: 1.0 };
    assert_eq!(p.alpha(), 0.5);
    p.life = -0.01;
    assert_eq!(p.alpha(), 0.0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(&Tuning::default());
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.enemies.clear();

    assert_eq!(original.player.x, 375.0);
    assert_eq!(original.score, 0);
    assert_eq!(original.enemies.len(), 50);
}

use space_invaders::compute::init_state;
use space_invaders::config::Tuning;
use space_invaders::display::*;
use space_invaders::entities::GameStatus;
use space_invaders::raster::Framebuffer;
use space_invaders::render::render;

fn present_to_string(state: &space_invaders::entities::GameState, view: &Viewport) -> String {
    let mut fb = Framebuffer::new(800, 600);
    render(&mut fb, state, &[]);
    let mut out: Vec<u8> = Vec::new();
    present(&mut out, &fb, state, view).unwrap();
    String::from_utf8(out).unwrap()
}

// ── Viewport ──────────────────────────────────────────────────────────────────

#[test]
fn too_small_terminal_has_no_viewport() {
    assert_eq!(Viewport::fit(30, 24, 800, 600), None);
    assert_eq!(Viewport::fit(80, 10, 800, 600), None);
}

#[test]
fn wide_terminal_fills_width() {
    let v = Viewport::fit(162, 64, 800, 600).unwrap();
    assert_eq!((v.left, v.top, v.cols, v.rows), (1, 2, 160, 60));
}

#[test]
fn short_terminal_is_letterboxed() {
    let v = Viewport::fit(100, 30, 800, 600).unwrap();
    assert_eq!(v.rows, 26);
    assert_eq!(v.cols, 69);
    assert_eq!(v.left, 15);
    assert_eq!(v.top, 2);
}

#[test]
fn viewport_stays_inside_border() {
    for (cols, rows) in [(40, 12), (80, 24), (120, 40), (200, 50)] {
        let v = Viewport::fit(cols, rows, 800, 600).unwrap();
        assert!(v.left >= 1 && v.left + v.cols < cols);
        assert!(v.top >= 2 && v.top + v.rows < rows - 1);
    }
}

// ── present ───────────────────────────────────────────────────────────────────

#[test]
fn hud_shows_score_and_enemies() {
    let view = Viewport::fit(80, 24, 800, 600).unwrap();
    let mut s = init_state(&Tuning::default());
    s.score = 30;
    let text = present_to_string(&s, &view);
    assert!(text.contains("Score: 30"));
    assert!(text.contains("Enemies:  50"));
    assert!(text.contains('▀'));
    assert!(!text.contains("GAME  OVER"));
}

#[test]
fn game_over_panel_reports_loss() {
    let view = Viewport::fit(80, 24, 800, 600).unwrap();
    let mut s = init_state(&Tuning::default());
    s.status = GameStatus::GameOver;
    let text = present_to_string(&s, &view);
    assert!(text.contains("GAME  OVER"));
    assert!(text.contains("R - Play Again  Q - Quit"));
}

#[test]
fn game_over_panel_reports_win() {
    let view = Viewport::fit(80, 24, 800, 600).unwrap();
    let mut s = init_state(&Tuning::default());
    s.enemies.clear();
    s.score = 500;
    s.status = GameStatus::GameOver;
    let text = present_to_string(&s, &view);
    assert!(text.contains("YOU  WIN!"));
    assert!(text.contains("Final Score:    500"));
}

#[test]
fn border_surrounds_field() {
    let view = Viewport::fit(80, 24, 800, 600).unwrap();
    let mut out: Vec<u8> = Vec::new();
    draw_border(&mut out, &view).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains('┌') && text.contains('┘'));
}

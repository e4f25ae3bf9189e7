use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use space_invaders::config::Tuning;
use space_invaders::display::{self, Viewport};
use space_invaders::error::GameError;
use space_invaders::game_loop::{FrameResult, GameLoop};
use space_invaders::input::{drain_events, Action};

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const CONFIG_ENV: &str = "INVADERS_CONFIG";

// ── Startup ───────────────────────────────────────────────────────────────────

/// Logs go to a file: anything on stderr would corrupt the alternate screen.
fn init_logging() {
    let path = std::env::temp_dir().join("space_invaders.log");
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Ok(file) = File::create(&path) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn load_tuning() -> Result<Tuning, GameError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());
    match path {
        Some(path) => Ok(Tuning::load(path)?),
        None => {
            log::info!("Using default tuning");
            Ok(Tuning::default())
        }
    }
}

/// Fail fast when there is nothing sensible to draw into.
fn fit_viewport(tuning: &Tuning) -> Result<Viewport, GameError> {
    let (cols, rows) = terminal::size()?;
    Viewport::fit(
        cols,
        rows,
        tuning.canvas_width.round() as usize,
        tuning.canvas_height.round() as usize,
    )
    .ok_or_else(|| {
        GameError::SurfaceUnavailable(format!(
            "terminal is {cols}×{rows}, need at least {}×{}",
            display::MIN_COLS,
            display::MIN_ROWS
        ))
    })
}

fn repaint_frame<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    display::draw_border(out, view)
}

// ── Game loop driver ──────────────────────────────────────────────────────────

/// Drive frames at a fixed cadence until the player quits.
///
/// While playing, pending events are drained without blocking and one frame
/// is run per tick.  Once the game halts, scheduling stops and the driver
/// blocks on the event channel until restart or quit.
fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
    mut view: Viewport,
    releases_reported: bool,
) -> Result<(), GameError> {
    let mut game = GameLoop::new(tuning, thread_rng(), releases_reported);
    repaint_frame(out, &view)?;
    log::info!(
        "Game started: {} enemies, viewport {}×{} cells",
        game.state().enemies_remaining(),
        view.cols,
        view.rows
    );

    let mut halted = false;
    loop {
        let frame_start = Instant::now();

        // ── Input ─────────────────────────────────────────────────────────────
        let pending: Vec<Event> = if halted {
            // Nothing animates on the game-over screen; wait for a key.
            match rx.recv() {
                Ok(ev) => vec![ev],
                Err(_) => return Ok(()),
            }
        } else {
            match drain_events(rx) {
                Some(events) => events,
                None => {
                    log::warn!("Input reader stopped");
                    return Ok(());
                }
            }
        };

        for ev in pending {
            match ev {
                Event::Key(key) => match game.handle_key(key) {
                    Some(Action::Quit) => {
                        log::info!("Quit requested");
                        return Ok(());
                    }
                    Some(Action::Restart) => {
                        game.restart();
                        halted = false;
                        repaint_frame(out, &view)?;
                    }
                    _ => {}
                },
                Event::Resize(cols, rows) => {
                    match Viewport::fit(
                        cols,
                        rows,
                        game.surface().width(),
                        game.surface().height(),
                    ) {
                        Some(fitted) => view = fitted,
                        None => log::warn!("Terminal {cols}×{rows} too small, keeping layout"),
                    }
                    repaint_frame(out, &view)?;
                    if halted {
                        display::present(out, game.surface(), game.state(), &view)?;
                    }
                }
                _ => {}
            }
        }
        if halted {
            continue;
        }

        // ── Simulate + draw ───────────────────────────────────────────────────
        if let FrameResult::Halted(_) = game.frame() {
            halted = true;
        }
        display::present(out, game.surface(), game.state(), &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    init_logging();

    let tuning = load_tuning()?;
    let view = fit_viewport(&tuning)?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    log::debug!("Keyboard enhancement: {keyboard_enhanced}");

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = run(&mut out, &rx, tuning, view, keyboard_enhanced);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("{err}");
    }
    result
}

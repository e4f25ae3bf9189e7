/// Frame-driven game loop.
///
/// `GameLoop` owns everything one running game needs and exposes a single
/// `frame()` step: sample input, tick the simulation, drift the starfield and
/// render.  Whatever drives it (a fixed-timestep sleep loop, a timer, a test)
/// decides when frames happen; the loop itself never looks at the clock.

use crossterm::event::KeyEvent;
use rand::Rng;

use crate::compute::{advance_stars, init_state, init_stars, player_shoot, restart, tick};
use crate::config::Tuning;
use crate::entities::{GameState, Outcome, Star};
use crate::input::{Action, InputState};
use crate::raster::Framebuffer;
use crate::render::render;

/// What the scheduler should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameResult {
    /// Schedule another frame.
    Continue,
    /// The game just ended; stop scheduling until a restart.
    Halted(Outcome),
}

pub struct GameLoop<R: Rng> {
    tuning: Tuning,
    state: GameState,
    stars: Vec<Star>,
    input: InputState,
    surface: Framebuffer,
    rng: R,
    frame: u64,
}

impl<R: Rng> GameLoop<R> {
    /// `releases_reported` tells input tracking whether the terminal sends
    /// key-release events.
    pub fn new(tuning: Tuning, mut rng: R, releases_reported: bool) -> Self {
        let state = init_state(&tuning);
        let stars = init_stars(&tuning, &mut rng);
        let surface = Framebuffer::new(
            tuning.canvas_width.round() as usize,
            tuning.canvas_height.round() as usize,
        );
        let mut game = Self {
            tuning,
            state,
            stars,
            input: InputState::new(releases_reported),
            surface,
            rng,
            frame: 0,
        };
        render(&mut game.surface, &game.state, &game.stars);
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn surface(&self) -> &Framebuffer {
        &self.surface
    }

    /// Feed one keyboard event.  Fire is applied immediately; quit and
    /// restart are handed back to the driver.
    pub fn handle_key(&mut self, event: KeyEvent) -> Option<Action> {
        let action = self.input.handle(event, self.frame, self.state.is_over());
        if action == Some(Action::Fire) {
            self.state = player_shoot(&self.state, &self.tuning);
        }
        action
    }

    /// Run one simulation + render pass.  Once the game is over this is a
    /// no-op that keeps reporting `Halted`.
    pub fn frame(&mut self) -> FrameResult {
        if let Some(outcome) = self.state.outcome() {
            return FrameResult::Halted(outcome);
        }
        self.frame += 1;

        let movement = self.input.movement(self.frame);
        self.state = tick(&self.state, movement, &self.tuning, &mut self.rng);
        self.stars = advance_stars(&self.stars, &self.tuning, &mut self.rng);
        render(&mut self.surface, &self.state, &self.stars);

        match self.state.outcome() {
            Some(outcome) => {
                log::info!(
                    "Game over ({:?}) after {} ticks, score {}",
                    outcome,
                    self.state.frame,
                    self.state.score
                );
                FrameResult::Halted(outcome)
            }
            None => FrameResult::Continue,
        }
    }

    /// Start a fresh game.  The starfield carries over.
    pub fn restart(&mut self) {
        self.state = restart(&self.tuning);
        self.input.clear();
        render(&mut self.surface, &self.state, &self.stars);
        log::info!("Game restarted");
    }
}

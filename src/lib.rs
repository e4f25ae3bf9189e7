//! Space Invaders in the terminal.
//!
//! - `entities`: plain data records and the master `GameState`
//! - `compute`: pure per-tick simulation (RNG injected)
//! - `config`: gameplay tuning, optionally loaded from TOML
//! - `input`: held-key tracking and edge-triggered actions
//! - `raster` / `render`: software framebuffer and the scene drawn into it
//! - `display`: half-block terminal presentation and HUD
//! - `game_loop`: one frame of input → simulation → render

pub mod compute;
pub mod config;
pub mod display;
pub mod entities;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod raster;
pub mod render;

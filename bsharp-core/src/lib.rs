//! # bsharp-core
//!
//! Backend library for the B# or Bb! note quiz. Provides the round engine,
//! the game coordinator, score persistence, and configuration — independent
//! of any UI framework.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bsharp_audio::ClipStore;
//! use bsharp_core::config::Config;
//! use bsharp_core::game::Game;
//! use bsharp_core::store::ScoreDb;
//!
//! let config = Config::load();
//! let clips = ClipStore::load(&config.clip_dir(), config.default_instrument())?;
//! let scores = if config.persist_scores() {
//!     ScoreDb::open(&bsharp_core::paths::scores_db_path())?
//! } else {
//!     ScoreDb::open_in_memory()?
//! };
//! let mut game = Game::new(clips, scores)?;
//!
//! // Each UI frame: pump playback feedback, then handle user intents.
//! for event in game.pump() { /* render */ }
//! let note = game.play()?;        // draw and sound the next note
//! let report = game.guess(note)?; // score a button press
//! ```
//!
//! ## Module Overview
//!
//! - [`engine`] — `RoundEngine`: round state plus seeded note selection,
//!   wrapping the pure transitions in `bsharp_types::round`
//! - [`game`] — `Game`: the coordinator that applies store and playback
//!   side effects; the single entry point for user intents
//! - [`store`] — `ScoreDb`: SQLite persistence for the high score and the
//!   lifetime per-note statistics
//! - [`config`] — TOML configuration (embedded default + user override)
//! - [`paths`] — user-data and asset locations

pub mod config;
pub mod engine;
pub mod game;
pub mod paths;
pub mod store;

pub use config::Config;
pub use engine::RoundEngine;
pub use game::Game;
pub use store::ScoreDb;

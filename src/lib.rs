//! Typing session engine: practice text generation, keystroke scoring,
//! session clocks and next-key finger hints. The terminal front-end lives
//! in the binary and only talks to the engine through `ViewModel` snapshots.

pub mod config;
pub mod engine;
pub mod error;
pub mod keyboard;
pub mod language;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod time_series;
pub mod typing_policy;
pub mod word_generator;

pub use error::{PixelTypeError, PtResult};

/// Load and validate the embedded corpora and keyboard layouts.
pub fn init() -> PtResult<()> {
    language::init()?;
    keyboard::init()?;
    Ok(())
}

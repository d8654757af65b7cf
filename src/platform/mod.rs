//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed-step accumulator, FPS)
//! - Input mapping (keys and pointer to commands)
//!
//! Storage lives in `persistence`.

pub mod clock;
pub mod input;

pub use clock::{FpsCounter, FrameClock};
pub use input::{Command, key_command, pointer_command};

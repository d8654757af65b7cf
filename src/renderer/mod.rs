//! Canvas 2D rendering module
//!
//! Draws the scene through the [`Canvas`] trait: the browser context on
//! wasm, a recorded [`DisplayList`] elsewhere.

pub mod canvas;
pub mod display_list;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web_canvas;

pub use canvas::{Canvas, Color, Font, Paint, TextAlign};
pub use display_list::{DisplayList, DrawCommand};
pub use scene::{FrameStats, render};
#[cfg(target_arch = "wasm32")]
pub use web_canvas::WebCanvas;

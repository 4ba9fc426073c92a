//! Browser platform glue
//!
//! Wraps the HTML canvas, requestAnimationFrame, and ResizeObserver behind
//! the crate's `Surface` and `FrameScheduler` seams. Only compiled for the
//! wasm target; native hosts bring their own implementations (or drive
//! frames through `ManualScheduler`).

#[cfg(target_arch = "wasm32")]
pub mod web;

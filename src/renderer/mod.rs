//! WebGPU rendering module
//!
//! Rasterizes the rectangle primitives of a [`crate::DrawList`] as colored
//! triangles. Text primitives are collected for the host to display (DOM
//! overlay in the browser build).

pub mod pipeline;
pub mod shapes;

pub use pipeline::RenderState;
pub use shapes::{FrameBuilder, Vertex};

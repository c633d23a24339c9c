//! Rendering front-end
//!
//! Turns a session into screen-space rectangles. Rasterizing them is left to
//! whatever backend the host uses.

pub mod shapes;
pub mod vertex;

pub use shapes::{background_tiles, draw_list, rect_vertices, visible};
pub use vertex::{DrawRect, Vertex, colors};

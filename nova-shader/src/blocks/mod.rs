//! Independent pieces of the fragment shader, in emission order.

mod header;
mod arith;
mod eval;
mod iter;
mod color;
mod entry;

pub use header::*;
pub use arith::*;
pub use eval::*;
pub use iter::*;
pub use color::*;
pub use entry::*;

mod params;
mod writer;
mod fractal;
mod gen;
mod uniforms;
mod scene;
pub mod blocks;

pub use params::*;
pub use writer::*;
pub use fractal::*;
pub use gen::*;
pub use uniforms::*;
pub use scene::*;

mod cpx;
mod poly;
mod parse;

pub use cpx::*;
pub use poly::*;
pub use parse::*;

pub mod log;
pub mod format;
pub mod macros;

mod err;
pub use err::*;

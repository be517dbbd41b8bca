mod app;
pub mod cmd;
pub mod utils;

pub use app::*;

mod newton;
mod interrupt;
mod solver;
mod root_set;

pub use newton::*;
pub use interrupt::*;
pub use solver::*;
pub use root_set::*;

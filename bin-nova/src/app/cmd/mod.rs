pub mod roots;
pub mod deriv;
pub mod shader;

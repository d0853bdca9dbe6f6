pub mod timestamp;
pub mod validation;

pub use timestamp::*;
pub use validation::*;

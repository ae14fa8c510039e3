pub mod clock;
pub mod coordinate;
pub mod detection;
pub mod expression;
pub mod utils;

pub mod driver;
pub mod pipeline;
pub mod snapshot;

// Core domain types: protocol constants and the decoded measurement

pub mod constants;
pub mod measurement;

pub use constants::*;
pub use measurement::Measurement;

#![forbid(unsafe_code)]

pub mod model;
pub mod ops;
pub mod time;

pub use time::Clock;

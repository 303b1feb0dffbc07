#![forbid(unsafe_code)]

pub mod model;
pub mod stats;
pub mod time;
pub mod window;

pub use time::Clock;

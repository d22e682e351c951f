//! Common data types

pub mod motion;
pub mod orientation;
pub mod sample;

pub use motion::*;
pub use orientation::*;
pub use sample::*;

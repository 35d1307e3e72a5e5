#![forbid(unsafe_code)]

pub mod highlight;
pub mod milestone;
pub mod model;
pub mod progress;

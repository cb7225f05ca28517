pub mod latest;

pub use latest::{Latest, RequestToken};

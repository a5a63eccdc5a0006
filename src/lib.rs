// Photomark: logo watermarking and batch export library

pub mod batch;
pub mod config;
pub mod error;
pub mod imaging;
pub mod logging;
pub mod metrics;
pub mod watermark;

pub use error::{Error, Result};

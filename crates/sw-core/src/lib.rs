//! Shared types for two-pass frequency-driven subword segmentation.

pub mod config;
pub mod error;
pub mod types;

pub use config::SegmenterConfig;
pub use error::{Result, SubwordError};
pub use types::{Marker, Proportion};

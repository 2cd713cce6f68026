// Module declarations in dependency order
pub mod utils;
pub mod core;
pub mod processing;
pub mod web;

// Public exports for external consumers
pub use crate::core::{AppConfig, ConversionRequest};
pub use crate::processing::convert;
pub use crate::utils::{ConvertError, ConvertResult, ImageFormat};

pub mod convert;
#[cfg(feature = "heif")]
pub mod heif;

pub use convert::convert;

pub mod error;
pub mod formats;
pub mod fs;
pub mod validation;

pub use error::{ConvertError, ConvertResult, PathError};
pub use formats::{format_from_path, ImageFormat};
pub use fs::{get_extension, sanitize_file_stem, unique_file_name, TempFileGuard};
pub use validation::{validate_input_path, validate_output_path};

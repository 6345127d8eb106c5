//! HCL generation
//!
//! - [`value`]: narrowing API JSON into HCL values and normalizing scalars
//! - [`render`]: the block builder that serializes resources

pub mod render;
pub mod value;

pub use render::{Block, Body};
pub use value::{Scalar, Value, escape_string, normalize, validate_identifier};

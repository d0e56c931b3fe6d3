//! CLI command implementations.

mod convert;
mod effect;
mod package;

pub use convert::convert;
pub use effect::apply_effect;
pub use package::{create_package, sync_package, validate_package};

//! Input and catalog validation.

mod validate;

pub use validate::*;

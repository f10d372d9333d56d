//! Conditional pricing rules embedded in catalog text.

mod conditional;

pub use conditional::{parse_decimal, ConditionalRule, Directive};

//! Generic validator and date validation rules.

mod validator;

pub use validator::{DateValidator, Validator};

//! Extension traits for JSON objects and TOML tables.

mod json_object;
mod toml_table;

pub use json_object::JsonObjectExt;
pub use toml_table::TomlTableExt;

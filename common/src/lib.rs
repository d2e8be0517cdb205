pub mod macros;
pub mod profile;

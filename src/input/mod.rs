//! Record input: JSON loading and synthetic demo logs.

pub mod loader;
pub mod synthetic;

pub use loader::load_records;
pub use synthetic::synthetic_records;

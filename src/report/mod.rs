//! Report rendering: the personal digest and full Markdown/JSON reports.

pub mod generator;
pub mod summary;

pub use generator::{generate_json_report, generate_markdown_report, generate_outcome_view};
pub use summary::personal_summary;

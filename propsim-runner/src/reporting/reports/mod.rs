//! Report generators.

mod markdown;
mod table;

pub use markdown::MarkdownReportGenerator;
pub use table::render_summary_table;

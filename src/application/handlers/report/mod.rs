//! Report query handlers.

mod generate_report;

pub use generate_report::{GenerateReportHandler, GenerateReportQuery};

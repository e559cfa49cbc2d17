pub mod error;
pub mod parser;
pub mod report;

pub use error::AbReportError;

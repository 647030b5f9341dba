pub mod aggregator;
pub mod engine;
pub mod report;

pub use crate::domain::model::{
    normalize_label, Category, FileTally, Severity, SeverityBreakdown, SeverityCounts,
    SeverityTotals,
};
pub use crate::domain::ports::{ConfigProvider, OutputFormat, Reporter, Storage};
pub use crate::utils::error::Result;

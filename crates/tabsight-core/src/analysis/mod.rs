//! Intent execution and result records.

pub mod executor;
pub mod models;

pub use executor::{ExecutorConfig, IntentExecutor};
pub use models::{humanize, AnalysisResult, ChartData, ChartKind, ChartSpec, Table};

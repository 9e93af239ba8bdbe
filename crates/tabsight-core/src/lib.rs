#![forbid(unsafe_code)]

//! # Tabsight Core
//!
//! Deterministic, rule-based question answering over an in-memory table.
//!
//! ## Pipeline
//!
//! - **Profiling**: every column gets one semantic type (numerical, datetime,
//!   binary, categorical, text)
//! - **Resolution**: free text is matched against column names, strict to loose
//! - **Value hunting**: literal category values mentioned in a question
//! - **Intent parsing**: an ordered keyword cascade picks exactly one intent
//! - **Execution**: the intent becomes a message plus an optional table or
//!   chart specification
//!
//! ```
//! use tabsight_core::{DataAssistant, Dataset, Value};
//!
//! let dataset = Dataset::from_columns(vec![(
//!     "sales_amount",
//!     vec![Value::from(10), Value::from(20), Value::from(30)],
//! )])
//! .unwrap();
//! let assistant = DataAssistant::new(dataset);
//! let answer = assistant.ask("what is the average sales amount");
//! assert_eq!(answer.message, "The average value in 'sales_amount' is 20.00");
//! ```

pub mod analysis;
pub mod assistant;
pub mod coerce;
pub mod dataset;
pub mod error;
pub mod hunter;
pub mod ingest;
pub mod nlq;
pub mod profiler;
pub mod resolver;
pub mod stats;

pub use analysis::{
    AnalysisResult, ChartData, ChartKind, ChartSpec, ExecutorConfig, IntentExecutor, Table,
};
pub use assistant::{DataAssistant, DatasetOverview};
pub use dataset::{derive_age_column, sanitize_headers, Column, Dataset, Value};
pub use error::{AnalysisError, IngestError, Result};
pub use hunter::{find_category_mention, CategoryMention};
pub use ingest::{load_csv_path, load_csv_reader, load_path};
pub use nlq::{ColumnChart, Comparator, IntentParser, ParsedIntent, StatOp};
pub use profiler::{ColumnProfile, ColumnProfiler, ProfilerConfig, SemanticType};
pub use resolver::resolve_column;

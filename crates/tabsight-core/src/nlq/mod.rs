//! Natural language question understanding.

pub mod intent;
pub mod models;
pub mod question;

pub use intent::{IntentParser, IntentRule, ParseContext};
pub use models::{ColumnChart, Comparator, ParsedIntent, StatOp};
pub use question::Question;

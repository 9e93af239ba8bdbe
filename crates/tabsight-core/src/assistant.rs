//! Question answering over one loaded dataset

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{AnalysisResult, ExecutorConfig, IntentExecutor};
use crate::dataset::{derive_age_column, Dataset};
use crate::nlq::{ColumnChart, IntentParser, ParsedIntent};
use crate::profiler::{ColumnProfile, ColumnProfiler, ProfilerConfig, SemanticType};

/// Shape of the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: usize,
    pub column_types: Vec<(String, SemanticType)>,
    pub type_counts: Vec<(SemanticType, usize)>,
}

/// Owns a dataset and its profile and answers questions about it.
///
/// Loading derives the `age` column (once) and profiles every column; the
/// dataset is read-only afterwards, so questions are independent of each
/// other.
pub struct DataAssistant {
    dataset: Dataset,
    profile: ColumnProfile,
    parser: IntentParser,
    executor: IntentExecutor,
}

impl DataAssistant {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, ProfilerConfig::default(), ExecutorConfig::default())
    }

    pub fn with_config(
        dataset: Dataset,
        profiler: ProfilerConfig,
        executor: ExecutorConfig,
    ) -> Self {
        Self::prepare(dataset, profiler, executor, Local::now().year())
    }

    /// Load with an explicit reference year for the derived `age` column
    pub fn prepare(
        mut dataset: Dataset,
        profiler: ProfilerConfig,
        executor: ExecutorConfig,
        current_year: i32,
    ) -> Self {
        let derived_age = derive_age_column(&mut dataset, current_year);
        let profile = ColumnProfiler::with_config(profiler).profile(&dataset);
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            derived_age,
            "dataset ready"
        );
        Self {
            dataset,
            profile,
            parser: IntentParser::new(),
            executor: IntentExecutor::with_config(executor),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn profile(&self) -> &ColumnProfile {
        &self.profile
    }

    /// Classify a question without running it
    pub fn interpret(&self, question: &str) -> ParsedIntent {
        self.parser.parse(question, &self.dataset, &self.profile)
    }

    /// Execute an already resolved intent
    pub fn run(&self, intent: &ParsedIntent) -> AnalysisResult {
        self.executor.execute(intent, &self.dataset)
    }

    /// Answer a free-text question
    pub fn ask(&self, question: &str) -> AnalysisResult {
        let intent = self.interpret(question);
        self.run(&intent)
    }

    pub fn summary(&self) -> AnalysisResult {
        self.run(&ParsedIntent::Summary)
    }

    /// Bar chart of the first categorical column, offered only when the
    /// dataset also has something numeric to look at
    pub fn quick_bar_chart(&self) -> Option<AnalysisResult> {
        self.profile.first_of(SemanticType::Numerical)?;
        let column = self.profile.first_of(SemanticType::Categorical)?;
        Some(self.run(&ParsedIntent::Chart {
            kind: ColumnChart::Bar,
            column: Some(column.to_string()),
        }))
    }

    pub fn overview(&self) -> DatasetOverview {
        DatasetOverview {
            rows: self.dataset.row_count(),
            columns: self.dataset.column_count(),
            column_types: self
                .profile
                .iter()
                .map(|(name, kind)| (name.to_string(), kind))
                .collect(),
            type_counts: self.profile.type_counts(),
        }
    }
}

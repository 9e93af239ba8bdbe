//! Ordered keyword cascade that turns a question into a [`ParsedIntent`].
//!
//! Rules are evaluated in a fixed order and the first one whose trigger set
//! matches wins; later rules are never consulted. A question that matches
//! nothing becomes [`ParsedIntent::Summary`].

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::dataset::Dataset;
use crate::hunter::find_category_mention;
use crate::nlq::models::{ColumnChart, Comparator, ParsedIntent, StatOp};
use crate::nlq::question::{strip_phrases, strip_words, Question};
use crate::profiler::{ColumnProfile, SemanticType};
use crate::resolver::resolve_column;

lazy_static! {
    static ref UNDER_THRESHOLD: Regex = Regex::new(r"under (\d+(?:\.\d+)?)").unwrap();
    static ref ABOVE_THRESHOLD: Regex = Regex::new(r"above (\d+(?:\.\d+)?)").unwrap();
}

const CHART_FILLERS: &[&str] = &["of", "the"];
const STATISTIC_FILLERS: &[&str] = &["the"];
const TIME_HINTS: &[&str] = &["date", "year", "month", "time"];

type Handler = Box<dyn Fn(&ParseContext<'_>, &str) -> ParsedIntent + Send + Sync>;

/// Everything a rule handler may consult
pub struct ParseContext<'a> {
    pub question: &'a Question,
    pub dataset: &'a Dataset,
    pub profile: &'a ColumnProfile,
}

impl<'a> ParseContext<'a> {
    fn all_columns(&self) -> Vec<&'a str> {
        self.dataset.column_names()
    }

    fn columns_of(&self, kind: SemanticType) -> Vec<&'a str> {
        self.profile.columns_of(&[kind])
    }

    fn first_of(&self, kind: SemanticType) -> Option<String> {
        self.profile.first_of(kind).map(str::to_string)
    }

    fn resolve(&self, search: &str, candidates: &[&str]) -> Option<String> {
        resolve_column(search, candidates).map(str::to_string)
    }
}

/// One entry of the cascade
pub struct IntentRule {
    name: &'static str,
    triggers: &'static [&'static str],
    strip: &'static [&'static str],
    fillers: &'static [&'static str],
    handler: Handler,
}

impl IntentRule {
    fn new<F>(name: &'static str, triggers: &'static [&'static str], handler: F) -> Self
    where
        F: Fn(&ParseContext<'_>, &str) -> ParsedIntent + Send + Sync + 'static,
    {
        Self {
            name,
            triggers,
            strip: triggers,
            fillers: &[],
            handler: Box::new(handler),
        }
    }

    /// Phrases removed from the question before column resolution
    fn stripping(mut self, phrases: &'static [&'static str]) -> Self {
        self.strip = phrases;
        self
    }

    /// Whole words removed after the phrases
    fn ignoring(mut self, words: &'static [&'static str]) -> Self {
        self.fillers = words;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn matches(&self, question: &Question) -> bool {
        question.contains_any(self.triggers)
    }

    fn apply(&self, ctx: &ParseContext<'_>) -> ParsedIntent {
        let remainder = strip_words(&strip_phrases(&ctx.question.text, self.strip), self.fillers);
        (self.handler)(ctx, remainder.trim())
    }
}

/// Rule-based question interpreter
pub struct IntentParser {
    rules: Vec<IntentRule>,
}

impl IntentParser {
    pub fn new() -> Self {
        Self {
            rules: Self::default_rules(),
        }
    }

    /// Rule names in evaluation order
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(IntentRule::name).collect()
    }

    /// Classify a question and resolve its arguments.
    ///
    /// Always yields exactly one intent; unresolved columns are `None`.
    pub fn parse(
        &self,
        question: &str,
        dataset: &Dataset,
        profile: &ColumnProfile,
    ) -> ParsedIntent {
        let question = Question::new(question);
        let ctx = ParseContext {
            question: &question,
            dataset,
            profile,
        };

        match self.rules.iter().find(|rule| rule.matches(&question)) {
            Some(rule) => {
                let intent = rule.apply(&ctx);
                debug!(rule = rule.name, action = intent.action(), ?intent, "question classified");
                intent
            }
            None => {
                debug!(question = %question.text, "no trigger matched, falling back to summary");
                ParsedIntent::Summary
            }
        }
    }

    fn default_rules() -> Vec<IntentRule> {
        vec![
            IntentRule::new("pie_chart", &["pie chart", "pie graph"], |ctx, rest| {
                category_chart(ctx, rest, ColumnChart::Pie)
            })
            .ignoring(CHART_FILLERS),
            IntentRule::new(
                "bar_chart",
                &["bar chart", "bar graph", "show bars"],
                |ctx, rest| category_chart(ctx, rest, ColumnChart::Bar),
            )
            .ignoring(CHART_FILLERS),
            IntentRule::new(
                "histogram",
                &["histogram", "distribution", "spread"],
                |ctx, rest| ParsedIntent::Chart {
                    kind: ColumnChart::Histogram,
                    column: ctx
                        .resolve(rest, &ctx.columns_of(SemanticType::Numerical))
                        .or_else(|| ctx.first_of(SemanticType::Numerical)),
                },
            )
            .ignoring(CHART_FILLERS),
            IntentRule::new("line_chart", &["line chart", "trend", "over time"], line_chart)
                .ignoring(CHART_FILLERS),
            IntentRule::new(
                "scatter_plot",
                &["scatter", "correlation plot", "relationship"],
                scatter_plot,
            )
            .stripping(&["scatter", "correlation plot", "relationship", "correlation", "plot"])
            .ignoring(CHART_FILLERS),
            IntentRule::new("mean", &["average", "mean"], |ctx, rest| {
                statistic(ctx, rest, StatOp::Mean)
            })
            .stripping(&["average", "mean", "what is"])
            .ignoring(STATISTIC_FILLERS),
            IntentRule::new("sum", &["total", "sum"], |ctx, rest| {
                statistic(ctx, rest, StatOp::Sum)
            })
            .stripping(&["total", "sum", "what is"])
            .ignoring(STATISTIC_FILLERS),
            IntentRule::new("max", &["maximum", "max", "highest"], |ctx, rest| {
                statistic(ctx, rest, StatOp::Max)
            })
            .stripping(&["maximum", "max", "highest", "what is"])
            .ignoring(STATISTIC_FILLERS),
            IntentRule::new("min", &["minimum", "min", "lowest"], |ctx, rest| {
                statistic(ctx, rest, StatOp::Min)
            })
            .stripping(&["minimum", "min", "lowest", "what is"])
            .ignoring(STATISTIC_FILLERS),
            IntentRule::new("median", &["median"], |ctx, rest| {
                statistic(ctx, rest, StatOp::Median)
            })
            .stripping(&["median", "what is"])
            .ignoring(STATISTIC_FILLERS),
            IntentRule::new("count", &["how many", "count"], |ctx, _| filter_count(ctx)),
            IntentRule::new(
                "group",
                &["compare", "group by", "breakdown", "by category"],
                |ctx, _| group_analyze(ctx),
            ),
            IntentRule::new(
                "summary",
                &["summary", "describe", "overview", "statistics"],
                |_, _| ParsedIntent::Summary,
            ),
        ]
    }
}

impl Default for IntentParser {
    fn default() -> Self {
        Self::new()
    }
}

fn category_chart(ctx: &ParseContext<'_>, rest: &str, kind: ColumnChart) -> ParsedIntent {
    ParsedIntent::Chart {
        kind,
        column: ctx
            .resolve(rest, &ctx.columns_of(SemanticType::Categorical))
            .or_else(|| ctx.first_of(SemanticType::Categorical)),
    }
}

/// The time axis comes from column names alone; the value axis is resolved
/// from the remaining text among the other numerical columns.
fn line_chart(ctx: &ParseContext<'_>, rest: &str) -> ParsedIntent {
    let time_column = ctx
        .all_columns()
        .into_iter()
        .find(|name| {
            let lowered = name.to_lowercase();
            TIME_HINTS.iter().any(|hint| lowered.contains(hint))
        })
        .map(str::to_string);

    let candidates: Vec<&str> = ctx
        .columns_of(SemanticType::Numerical)
        .into_iter()
        .filter(|name| Some(*name) != time_column.as_deref())
        .collect();

    ParsedIntent::LineChart {
        value_column: ctx.resolve(rest, &candidates),
        time_column,
    }
}

/// `a vs b` resolves each side; otherwise the first two numerical columns
fn scatter_plot(ctx: &ParseContext<'_>, rest: &str) -> ParsedIntent {
    let numerical = ctx.columns_of(SemanticType::Numerical);
    let sides: Vec<&str> = rest.split(" vs ").collect();
    if let [left, right] = sides.as_slice() {
        return ParsedIntent::ScatterPlot {
            column_a: ctx.resolve(left.trim(), &numerical),
            column_b: ctx.resolve(right.trim(), &numerical),
        };
    }
    ParsedIntent::ScatterPlot {
        column_a: numerical.first().map(|c| c.to_string()),
        column_b: numerical.get(1).map(|c| c.to_string()),
    }
}

fn statistic(ctx: &ParseContext<'_>, rest: &str, op: StatOp) -> ParsedIntent {
    ParsedIntent::Statistic {
        column: ctx
            .resolve(rest, &ctx.all_columns())
            .or_else(|| ctx.first_of(SemanticType::Numerical)),
        op,
    }
}

/// Threshold filters first (`under` before `above`), then a mentioned
/// category value, then a plain row count.
fn filter_count(ctx: &ParseContext<'_>) -> ParsedIntent {
    let text = ctx.question.text.as_str();
    let threshold = [
        (&*UNDER_THRESHOLD, Comparator::Below),
        (&*ABOVE_THRESHOLD, Comparator::Above),
    ]
    .into_iter()
    .find_map(|(pattern, comparator)| {
        pattern
            .captures(text)
            .and_then(|caps| caps[1].parse::<f64>().ok())
            .map(|value| (comparator, value))
    });

    if let Some((comparator, threshold)) = threshold {
        return ParsedIntent::FilterCount {
            column: ctx
                .resolve(text, &ctx.all_columns())
                .or_else(|| ctx.first_of(SemanticType::Numerical)),
            comparator,
            threshold,
        };
    }

    match find_category_mention(text, ctx.dataset, ctx.profile) {
        Some(hit) => ParsedIntent::FilterCountCategory {
            column: hit.column,
            value: hit.value,
        },
        None => ParsedIntent::CountAll,
    }
}

/// The group column goes through the resolver; the value column must be a
/// numerical column whose name appears verbatim in the question.
fn group_analyze(ctx: &ParseContext<'_>) -> ParsedIntent {
    let text = ctx.question.text.as_str();
    let value_column = ctx
        .columns_of(SemanticType::Numerical)
        .into_iter()
        .find(|name| text.contains(&name.to_lowercase()))
        .map(str::to_string);

    ParsedIntent::GroupAnalyze {
        group_column: ctx.resolve(text, &ctx.all_columns()),
        value_column,
    }
}

// Output formatting and styling

use colored::Colorize;
use serde::Serialize;
use tabsight_core::{AnalysisResult, ChartSpec, DatasetOverview, Table};

use crate::error::CliResult;

/// Output styling configuration
#[derive(Debug, Clone, Copy)]
pub struct OutputStyle {
    pub use_colors: bool,
}

impl Default for OutputStyle {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputStyle {
    /// Colors only when enabled and stdout is a terminal
    pub fn new(color: bool) -> Self {
        Self {
            use_colors: color && atty::is(atty::Stream::Stdout),
        }
    }

    pub fn plain() -> Self {
        Self { use_colors: false }
    }

    /// Format error message
    pub fn error(&self, msg: &str) -> String {
        if self.use_colors {
            format!("{} {}", "✗".red().bold(), msg)
        } else {
            format!("✗ {}", msg)
        }
    }

    /// Format prompt
    pub fn prompt(&self, prompt: &str) -> String {
        if self.use_colors {
            format!("{} ", prompt.magenta().bold())
        } else {
            format!("{} ", prompt)
        }
    }

    /// Format header
    pub fn header(&self, title: &str) -> String {
        if self.use_colors {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// Format a section header
    pub fn section(&self, title: &str) -> String {
        let rule = "─".repeat(title.chars().count());
        if self.use_colors {
            format!("\n{}\n{}", title.bold().underline(), rule)
        } else {
            format!("\n{}\n{}", title, rule)
        }
    }

    /// Format a key-value pair
    pub fn key_value(&self, key: &str, value: &str) -> String {
        if self.use_colors {
            format!("  {}: {}", key.bold(), value)
        } else {
            format!("  {}: {}", key, value)
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_colors {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

/// Message, then the table or chart summary when present
pub fn render_result(result: &AnalysisResult, style: &OutputStyle) -> String {
    let mut out = style.header(&result.message);
    if let Some(table) = &result.table {
        out.push('\n');
        out.push_str(&render_table(table));
    }
    if let Some(chart) = &result.chart {
        out.push('\n');
        out.push_str(&render_chart_summary(chart, style));
    }
    out
}

/// Left-aligned columns separated by two spaces, with a dashed rule under
/// the header
pub fn render_table(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|value| value.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
        for (index, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(index) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let mut lines = Vec::with_capacity(cells.len() + 2);
    lines.push(format_row(&table.columns, &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in &cells {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// One-line description of a chart plus its axes
pub fn render_chart_summary(chart: &ChartSpec, style: &OutputStyle) -> String {
    let marks = chart.data.len();
    let mut out = format!(
        "[{} chart] {} ({} {})",
        chart.kind,
        chart.title,
        marks,
        if marks == 1 { "point" } else { "points" }
    );
    let mut axes = Vec::new();
    if let Some(x) = &chart.x_title {
        axes.push(format!("x: {}", x));
    }
    if let Some(y) = &chart.y_title {
        axes.push(format!("y: {}", y));
    }
    if !axes.is_empty() {
        out.push('\n');
        out.push_str(&style.dim(&format!("  {}", axes.join(", "))));
    }
    out
}

/// Rows, columns, per-column types and the type distribution
pub fn render_overview(overview: &DatasetOverview, style: &OutputStyle) -> String {
    let mut lines = vec![
        style.key_value("Rows", &overview.rows.to_string()),
        style.key_value("Columns", &overview.columns.to_string()),
        style.section("Column types"),
    ];
    for (name, kind) in &overview.column_types {
        lines.push(style.key_value(name, kind.as_str()));
    }
    lines.push(style.section("Data types overview"));
    for (kind, count) in &overview.type_counts {
        lines.push(style.key_value(kind.as_str(), &count.to_string()));
    }
    lines.join("\n")
}

/// Pretty JSON for any serializable record
pub fn render_json<T: Serialize>(value: &T) -> CliResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Print an error to stderr
pub fn print_error(msg: &str) {
    let style = OutputStyle::default();
    eprintln!("{}", style.error(msg));
}

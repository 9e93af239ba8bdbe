// Show the first rows of a file

use std::io::Write;
use std::path::PathBuf;

use tabsight_config::OutputFormat;
use tabsight_core::load_path;

use super::{Command, Context};
use crate::error::CliResult;
use crate::output;

/// Print the leading rows with sanitized headers
pub struct PreviewCommand {
    file: PathBuf,
    rows: Option<usize>,
}

impl PreviewCommand {
    pub fn new(file: PathBuf, rows: Option<usize>) -> Self {
        Self { file, rows }
    }
}

impl Command for PreviewCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
        let rows = self.rows.unwrap_or(ctx.config.output.preview_rows);
        let table = load_path(&self.file)?.head(rows);
        let rendered = match ctx.format() {
            OutputFormat::Text => output::render_table(&table),
            OutputFormat::Json => output::render_json(&table)?,
        };
        writeln!(out, "{}", rendered)?;
        Ok(())
    }
}

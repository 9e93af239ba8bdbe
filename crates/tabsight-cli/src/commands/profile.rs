// Show how each column was typed

use std::io::Write;
use std::path::PathBuf;

use tabsight_config::OutputFormat;

use super::{Command, Context};
use crate::error::CliResult;
use crate::output;

/// Print rows, columns, per-column semantic types and the type distribution
pub struct ProfileCommand {
    file: PathBuf,
}

impl ProfileCommand {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }
}

impl Command for ProfileCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
        let overview = ctx.load_assistant(&self.file)?.overview();
        let rendered = match ctx.format() {
            OutputFormat::Text => output::render_overview(&overview, &ctx.style),
            OutputFormat::Json => output::render_json(&overview)?,
        };
        writeln!(out, "{}", rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, output_of, sales_csv};

    #[test]
    fn text_profile_lists_types() {
        let file = sales_csv();
        let command = ProfileCommand::new(file.path().to_path_buf());
        let rendered = output_of(&command, &context(OutputFormat::Text));
        assert!(rendered.contains("  Rows: 4"));
        assert!(rendered.contains("  sales_amount: numerical"));
        assert!(rendered.contains("  region: categorical"));
        assert!(rendered.contains("  numerical: 3"));
        assert!(rendered.contains("  categorical: 1"));
    }

    #[test]
    fn json_profile_is_structured() {
        let file = sales_csv();
        let command = ProfileCommand::new(file.path().to_path_buf());
        let rendered = output_of(&command, &context(OutputFormat::Json));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["rows"], 4);
        assert_eq!(parsed["column_types"][1][0], "region");
        assert_eq!(parsed["column_types"][1][1], "categorical");
    }
}

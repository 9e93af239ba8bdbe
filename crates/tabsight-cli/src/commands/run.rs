// Execute a JSON-encoded intent

use std::io::Write;
use std::path::PathBuf;

use tabsight_core::ParsedIntent;

use super::{Command, Context};
use crate::error::{CliError, CliResult};

/// Skip question parsing and run an intent given as JSON, e.g.
/// `{"action":"group_analyze","group_column":"region","value_column":null}`
pub struct RunCommand {
    file: PathBuf,
    intent: String,
}

impl RunCommand {
    pub fn new(file: PathBuf, intent: String) -> Self {
        Self { file, intent }
    }

    fn parse_intent(&self) -> CliResult<ParsedIntent> {
        serde_json::from_str(&self.intent)
            .map_err(|e| CliError::invalid_argument(format!("intent is not valid JSON: {}", e)))
    }
}

impl Command for RunCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
        let intent = self.parse_intent()?;
        let assistant = ctx.load_assistant(&self.file)?;
        writeln!(out, "{}", ctx.render(&assistant.run(&intent))?)?;
        Ok(())
    }
}

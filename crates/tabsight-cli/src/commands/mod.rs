// Command handlers for the tabsight CLI

pub mod ask;
pub mod preview;
pub mod profile;
pub mod repl;
pub mod run;

pub use ask::AskCommand;
pub use preview::PreviewCommand;
pub use profile::ProfileCommand;
pub use repl::ReplCommand;
pub use run::RunCommand;

use std::io::Write;
use std::path::Path;

use tabsight_config::{AppConfig, OutputFormat};
use tabsight_core::{load_path, AnalysisResult, DataAssistant};

use crate::error::CliResult;
use crate::output::{self, OutputStyle};

/// Settings shared by every command
pub struct Context {
    pub config: AppConfig,
    pub style: OutputStyle,
}

impl Context {
    pub fn new(config: AppConfig, style: OutputStyle) -> Self {
        Self { config, style }
    }

    pub fn format(&self) -> OutputFormat {
        self.config.output.format
    }

    /// Read a file and prepare an assistant with the configured thresholds
    pub fn load_assistant(&self, file: &Path) -> CliResult<DataAssistant> {
        let dataset = load_path(file)?;
        Ok(DataAssistant::with_config(
            dataset,
            self.config.profiler.clone(),
            self.config.analysis.clone(),
        ))
    }

    /// Render one result in the configured format
    pub fn render(&self, result: &AnalysisResult) -> CliResult<String> {
        match self.format() {
            OutputFormat::Text => Ok(output::render_result(result, &self.style)),
            OutputFormat::Json => output::render_json(result),
        }
    }
}

/// Trait for command handlers
pub trait Command {
    /// Execute the command, writing answers to `out`
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> CliResult<()>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::Write;

    use tabsight_config::{AppConfig, OutputFormat};
    use tempfile::NamedTempFile;

    use super::{Command, Context};
    use crate::output::OutputStyle;

    pub fn sales_csv() -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            file,
            "Sales Amount,Region,Age,Income\n\
             10,East,25,40000\n\
             20,West,35,52000\n\
             30,East,45,61000\n\
             20,North,55,58000\n"
        )
        .unwrap();
        file
    }

    pub fn context(format: OutputFormat) -> Context {
        let mut config = AppConfig::default();
        config.output.format = format;
        Context::new(config, OutputStyle::plain())
    }

    pub fn output_of(command: &dyn Command, ctx: &Context) -> String {
        let mut out = Vec::new();
        command.execute(ctx, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }
}

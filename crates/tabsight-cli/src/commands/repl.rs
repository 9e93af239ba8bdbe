// Interactive question loop

use std::io::{BufRead, Write};
use std::path::PathBuf;

use tabsight_config::OutputFormat;
use tracing::info;

use super::{Command, Context};
use crate::error::CliResult;

const PROMPT: &str = "tabsight>";

/// Answer questions read line by line until EOF, `exit` or `quit`
pub struct ReplCommand {
    file: PathBuf,
}

impl ReplCommand {
    pub fn new(file: PathBuf) -> Self {
        Self { file }
    }

    /// Run the loop over any line source
    pub fn run_session<R: BufRead>(
        &self,
        ctx: &Context,
        mut input: R,
        out: &mut dyn Write,
    ) -> CliResult<()> {
        let assistant = ctx.load_assistant(&self.file)?;
        let interactive = ctx.format() == OutputFormat::Text;
        if interactive {
            let dataset = assistant.dataset();
            writeln!(
                out,
                "{}",
                ctx.style.header(&format!(
                    "Loaded {} rows and {} columns. Ask a question, or type 'exit' to quit.",
                    dataset.row_count(),
                    dataset.column_count()
                ))
            )?;
        }

        let mut answered = 0usize;
        let mut line = String::new();
        loop {
            if interactive {
                write!(out, "{}", ctx.style.prompt(PROMPT))?;
                out.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }
            let result = assistant.ask(question);
            writeln!(out, "{}", ctx.render(&result)?)?;
            answered += 1;
        }
        if interactive {
            writeln!(out)?;
        }
        info!(answered, "session ended");
        Ok(())
    }
}

impl Command for ReplCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
        let stdin = std::io::stdin();
        self.run_session(ctx, stdin.lock(), out)
    }
}

// Answer a single question

use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::{Command, Context};
use crate::error::{CliError, CliResult};

/// Load a file and answer one question about it
pub struct AskCommand {
    file: PathBuf,
    question: String,
}

impl AskCommand {
    pub fn new(file: PathBuf, words: &[String]) -> Self {
        Self {
            file,
            question: words.join(" "),
        }
    }
}

impl Command for AskCommand {
    fn execute(&self, ctx: &Context, out: &mut dyn Write) -> CliResult<()> {
        if self.question.trim().is_empty() {
            return Err(CliError::invalid_argument("question is empty"));
        }
        let assistant = ctx.load_assistant(&self.file)?;
        let intent = assistant.interpret(&self.question);
        debug!(action = intent.action(), "question interpreted");
        let result = assistant.run(&intent);
        writeln!(out, "{}", ctx.render(&result)?)?;
        Ok(())
    }
}

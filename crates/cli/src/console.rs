//! Interactive console backed by rustyline.

use anyhow::Result;
use fib_core::{Console, FibError};
use rustyline::{DefaultEditor, error::ReadlineError};

pub struct EditorConsole {
    editor: DefaultEditor,
}

impl EditorConsole {
    pub fn new() -> Result<Self> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl Console for EditorConsole {
    fn say(&mut self, line: &str) -> Result<()> {
        println!("{line}");
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => {
                Err(FibError::Aborted("interrupted at the prompt".to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }
}

//! User interaction capability.
//!
//! The resolver and the package assembler never read stdin directly. They ask
//! a [`Prompt`], which is a terminal in the CLI, a fixed script in tests, or
//! [`AssumeDefaults`] when running non-interactively.

use std::{
    collections::VecDeque,
    io::{BufRead, Write},
};

use anyhow::{Result, bail};

pub trait Prompt {
    /// Whether a human answers the questions.
    ///
    /// Non-interactive prompts make the resolver report conflicts instead of
    /// choosing, and let the assembler overwrite without asking.
    fn interactive(&self) -> bool {
        true
    }

    /// Pick one of `choices`. Returns a 0-based index.
    fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize>;

    /// Ask for free text. A blank answer yields `default`.
    fn text(&mut self, message: &str, default: &str) -> Result<String>;

    /// Ask a yes/no question, defaulting to no.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Line-oriented terminal underneath a [`TerminalPrompt`].
pub trait Console {
    /// Show a full line of text.
    fn say(&mut self, line: &str) -> Result<()>;

    /// Show `prompt` and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// [`Console`] over any reader/writer pair.
pub struct StreamConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

/// Numbered-menu prompt on top of a [`Console`].
pub struct TerminalPrompt<C> {
    console: C,
}

impl<C: Console> TerminalPrompt<C> {
    pub fn new(console: C) -> Self {
        Self { console }
    }

    pub fn into_console(self) -> C {
        self.console
    }
}

impl<C: Console> Prompt for TerminalPrompt<C> {
    fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        if choices.is_empty() {
            bail!("nothing to choose from for '{message}'");
        }

        self.console.say(message)?;
        for (i, choice) in choices.iter().enumerate() {
            self.console.say(&format!("  {}) {choice}", i + 1))?;
        }

        loop {
            let Some(answer) = self.console.ask("Select a value [1]: ")? else {
                return Ok(0);
            };
            if answer.is_empty() {
                return Ok(0);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => self
                    .console
                    .say(&format!("Please enter a number from 1 to {}.", choices.len()))?,
            }
        }
    }

    fn text(&mut self, message: &str, default: &str) -> Result<String> {
        match self.console.ask(&format!("{message} [{default}]: "))? {
            Some(answer) if !answer.is_empty() => Ok(answer),
            _ => Ok(default.to_string()),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        let answer = self.console.ask(&format!("{message} [y/N]: "))?;
        Ok(matches!(answer.unwrap_or_default().to_ascii_lowercase().as_str(), "y" | "yes"))
    }
}

/// Never asks anything: first choice, default text, and yes to confirmations.
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeDefaults;

impl Prompt for AssumeDefaults {
    fn interactive(&self) -> bool {
        false
    }

    fn choose(&mut self, _message: &str, _choices: &[String]) -> Result<usize> {
        Ok(0)
    }

    fn text(&mut self, _message: &str, default: &str) -> Result<String> {
        Ok(default.to_string())
    }

    fn confirm(&mut self, _message: &str) -> Result<bool> {
        Ok(true)
    }
}

/// A scripted answer for [`ScriptedPrompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// 1-based selection, as typed at the terminal.
    Choice(usize),
    Text(String),
    Confirm(bool),
}

/// Answers questions from a fixed queue, for programmatic callers.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<Answer>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self { answers: answers.into_iter().collect(), asked: Vec::new() }
    }

    /// Messages of every question asked so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    fn next(&mut self, message: &str) -> Result<Answer> {
        self.asked.push(message.to_string());
        match self.answers.pop_front() {
            Some(answer) => Ok(answer),
            None => bail!("no scripted answer left for '{message}'"),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn choose(&mut self, message: &str, choices: &[String]) -> Result<usize> {
        match self.next(message)? {
            Answer::Choice(n) if (1..=choices.len()).contains(&n) => Ok(n - 1),
            other => bail!("invalid scripted answer {other:?} for '{message}'"),
        }
    }

    fn text(&mut self, message: &str, default: &str) -> Result<String> {
        match self.next(message)? {
            Answer::Text(text) if text.is_empty() => Ok(default.to_string()),
            Answer::Text(text) => Ok(text),
            other => bail!("invalid scripted answer {other:?} for '{message}'"),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        match self.next(message)? {
            Answer::Confirm(yes) => Ok(yes),
            other => bail!("invalid scripted answer {other:?} for '{message}'"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    type Scripted = TerminalPrompt<StreamConsole<Cursor<Vec<u8>>, Vec<u8>>>;

    fn terminal(input: &str) -> Scripted {
        TerminalPrompt::new(StreamConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new()))
    }

    fn transcript(prompt: Scripted) -> String {
        String::from_utf8(prompt.into_console().into_output()).unwrap()
    }

    fn choices() -> Vec<String> {
        vec!["Sample".to_string(), "Sample Pro".to_string()]
    }

    #[test]
    fn test_choose_lists_one_based_indices() {
        let mut prompt = terminal("2\n");
        assert_eq!(prompt.choose("Conflicting family name:", &choices()).unwrap(), 1);

        let output = transcript(prompt);
        assert!(output.contains("  1) Sample\n"));
        assert!(output.contains("  2) Sample Pro\n"));
    }

    #[test]
    fn test_choose_defaults_to_first() {
        assert_eq!(terminal("\n").choose("x", &choices()).unwrap(), 0);
        assert_eq!(terminal("").choose("x", &choices()).unwrap(), 0);
    }

    #[test]
    fn test_choose_reprompts_on_bad_input() {
        let mut prompt = terminal("7\nabc\n2\n");
        assert_eq!(prompt.choose("x", &choices()).unwrap(), 1);

        let output = transcript(prompt);
        assert_eq!(output.matches("Please enter a number from 1 to 2.").count(), 2);
    }

    #[test]
    fn test_text_blank_keeps_default() {
        assert_eq!(terminal("\n").text("Family name", "Sample").unwrap(), "Sample");
        assert_eq!(terminal("Other\n").text("Family name", "Sample").unwrap(), "Other");
    }

    #[test]
    fn test_confirm() {
        assert!(terminal("y\n").confirm("Overwrite?").unwrap());
        assert!(terminal("YES\n").confirm("Overwrite?").unwrap());
        assert!(!terminal("n\n").confirm("Overwrite?").unwrap());
        assert!(!terminal("").confirm("Overwrite?").unwrap());
    }

    #[test]
    fn test_scripted_prompt_tracks_questions() {
        let mut prompt = ScriptedPrompt::new([Answer::Choice(2), Answer::Text(String::new())]);
        assert_eq!(prompt.choose("pick", &choices()).unwrap(), 1);
        assert_eq!(prompt.text("name", "Sample").unwrap(), "Sample");
        assert!(prompt.confirm("again?").is_err());
        assert_eq!(prompt.asked(), ["pick", "name", "again?"]);
    }
}

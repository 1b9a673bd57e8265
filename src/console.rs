//! Interactive terminal used by the workflow commands.
use inquire::{Confirm, Editor, InquireError, Select};
use log::*;

#[cfg(test)]
use mockall::automock;

use crate::Result;

#[cfg_attr(test, automock)]
pub trait Console: Send + Sync {
    /// Ask a yes/no question. Cancelling answers no.
    fn confirm(&self, question: &str) -> Result<bool>;
    /// Index of the chosen option, or `None` when cancelled.
    fn choose(
        &self,
        message: &str,
        options: &[String],
        default: usize,
    ) -> Result<Option<usize>>;
    /// Let the user edit `initial` in their editor. Trailing whitespace is
    /// trimmed and cancelling returns an empty string.
    fn edit(&self, initial: &str) -> Result<String>;
    fn open_url(&self, url: &str) -> Result<()>;
    fn show(&self, text: &str);
}

pub struct TerminalConsole;

fn is_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

impl Console for TerminalConsole {
    fn confirm(&self, question: &str) -> Result<bool> {
        match Confirm::new(question).with_default(true).prompt() {
            Ok(answer) => Ok(answer),
            Err(err) if is_cancelled(&err) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    fn choose(
        &self,
        message: &str,
        options: &[String],
        default: usize,
    ) -> Result<Option<usize>> {
        match Select::new(message, options.to_vec())
            .with_starting_cursor(default)
            .raw_prompt()
        {
            Ok(selected) => Ok(Some(selected.index)),
            Err(err) if is_cancelled(&err) => {
                debug!("selection cancelled");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn edit(&self, initial: &str) -> Result<String> {
        let edited = Editor::new("Review the text, save and quit to continue")
            .with_predefined_text(initial)
            .with_file_extension(".md")
            .prompt();

        match edited {
            Ok(text) => Ok(text.trim_end().to_string()),
            Err(err) if is_cancelled(&err) => {
                debug!("edit cancelled");
                Ok(String::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn open_url(&self, url: &str) -> Result<()> {
        info!("opening {url}");
        open::that(url)?;
        Ok(())
    }

    fn show(&self, text: &str) {
        println!("{text}");
    }
}

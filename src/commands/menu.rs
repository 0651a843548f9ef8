//! The interactive, menu driven session.
//!
//! The menu only collects raw field text and hands it to the same command handlers the command line
//! uses. A rejected input or a failed operation is reported and the menu is shown again. The
//! session ends on `7` or at end of input.

use crate::args::{AddArgs, DeleteArgs, ExportArgs, SearchArgs, SummaryArgs};
use crate::commands::{add, delete, export, search, summary, view, Out};
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use std::io::{BufRead, Write};
use tracing::debug;

const MENU: &str = "\n=== Smart Expense Tracker ===
1. Add Expense
2. View All Expenses
3. Monthly Summary
4. Search
5. Delete Expense
6. Export CSV
7. Exit";

/// Runs the menu loop, reading answers from `input` and writing prompts and reports to `output`.
///
/// # Errors
///
/// - `ErrorType::Io` if reading from `input` or writing to `output` fails. Errors from the
///   operations themselves are printed and do not end the session.
pub fn menu<R, W>(config: &Config, input: R, output: W) -> Result<Out<()>>
where
    R: BufRead,
    W: Write,
{
    Shell {
        config,
        input,
        output,
    }
    .run()
}

struct Shell<'a, R, W> {
    config: &'a Config,
    input: R,
    output: W,
}

impl<R, W> Shell<'_, R, W>
where
    R: BufRead,
    W: Write,
{
    fn run(&mut self) -> Result<Out<()>> {
        loop {
            self.say(MENU)?;
            let Some(choice) = self.ask("Choose 1-7: ")? else {
                break;
            };
            let step = match choice.as_str() {
                "1" => self.add(),
                "2" => self.view(),
                "3" => self.summary(),
                "4" => self.search(),
                "5" => self.delete(),
                "6" => self.export(),
                "7" => break,
                _ => {
                    self.say("Invalid choice.")?;
                    continue;
                }
            };
            match step {
                Ok(Some(message)) => self.say(&message)?,
                // End of input in the middle of a form.
                Ok(None) => break,
                Err(e) if e.error_type() == ErrorType::Io => return Err(e),
                Err(e) => {
                    debug!("{e:?}");
                    match e.error_type() {
                        ErrorType::InvalidDate
                        | ErrorType::InvalidAmount
                        | ErrorType::InvalidId
                        | ErrorType::InvalidMonth => self.say(&format!("Invalid input: {e}"))?,
                        _ => self.say(&format!("Error: {e}"))?,
                    }
                }
            }
        }
        Ok("Goodbye!".into())
    }

    fn add(&mut self) -> Result<Option<String>> {
        self.say("\n--- Add Expense ---")?;
        let Some(date) = self.ask("Date (YYYY-MM-DD) [leave blank for today]: ")? else {
            return Ok(None);
        };
        let Some(title) = self.ask("Title: ")? else {
            return Ok(None);
        };
        let Some(category) = self.ask("Category: ")? else {
            return Ok(None);
        };
        let Some(amount) = self.ask("Amount: ")? else {
            return Ok(None);
        };
        let Some(note) = self.ask("Note (optional): ")? else {
            return Ok(None);
        };
        let args = AddArgs::new(Some(date), title, Some(category), amount, Some(note));
        Ok(Some(add(self.config, args)?.message().to_string()))
    }

    fn view(&mut self) -> Result<Option<String>> {
        self.say("\n--- All Expenses ---")?;
        Ok(Some(view(self.config)?.message().to_string()))
    }

    fn summary(&mut self) -> Result<Option<String>> {
        self.say("\n--- Monthly Summary ---")?;
        let Some(year) = self.ask("Year (YYYY): ")? else {
            return Ok(None);
        };
        let Some(month) = self.ask("Month (1-12): ")? else {
            return Ok(None);
        };
        let out = summary(self.config, SummaryArgs::new(Some(year), Some(month)))?;
        Ok(Some(out.message().to_string()))
    }

    fn search(&mut self) -> Result<Option<String>> {
        self.say("\n--- Search ---")?;
        let Some(query) = self.ask("Search text: ")? else {
            return Ok(None);
        };
        Ok(Some(
            search(self.config, SearchArgs::new(query))?
                .message()
                .to_string(),
        ))
    }

    fn delete(&mut self) -> Result<Option<String>> {
        self.say("\n--- Delete Expense ---")?;
        let Some(id) = self.ask("Enter ID: ")? else {
            return Ok(None);
        };
        Ok(Some(
            delete(self.config, DeleteArgs::new(id))?
                .message()
                .to_string(),
        ))
    }

    fn export(&mut self) -> Result<Option<String>> {
        self.say("\n--- Export CSV ---")?;
        Ok(Some(
            export(self.config, ExportArgs::default())?
                .message()
                .to_string(),
        ))
    }

    /// Writes `prompt` and reads one line. Returns `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").pub_result(ErrorType::Io)?;
        self.output.flush().pub_result(ErrorType::Io)?;
        let mut line = String::new();
        let read = self.input.read_line(&mut line).pub_result(ErrorType::Io)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").pub_result(ErrorType::Io)
    }
}

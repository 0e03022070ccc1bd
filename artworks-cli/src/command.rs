//! REPL command parsing.

use artworks_lib::model::ArtworkId;
use thiserror::Error;

/// A command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Redraw the current page.
    Show,
    /// Fetch the current page again.
    Refresh,
    Next,
    Prev,
    /// Jump to a 1-based page.
    Page(u32),
    /// Flip one record's checkbox.
    Toggle(ArtworkId),
    /// Replace the checked records on the current page.
    Check(Vec<ArtworkId>),
    /// Select this many more records, continuing into later pages.
    Select(usize),
    Clear,
    /// List every selected id.
    Selected,
    Help,
    Quit,
}

/// Error type for command parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("not a valid number: {0}")]
    InvalidNumber(String),

    #[error("page numbers start at 1")]
    PageZero,
}

pub const HELP: &str = "\
commands:
  n, next            next page
  p, prev            previous page
  page N             go to page N
  t, toggle ID       flip the checkbox of record ID
  check [ID...]      check exactly these records on this page
  select N           select N more records from this page onward
  clear              deselect everything
  selected           list selected ids
  show               redraw the table (also: empty line)
  r, refresh         fetch this page again
  help               this text
  q, quit            exit

Ctrl-C cancels a running page load or selection.";

impl Command {
    /// Parses one input line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Show);
        };

        match name.to_ascii_lowercase().as_str() {
            "show" | "s" => Ok(Self::Show),
            "refresh" | "r" => Ok(Self::Refresh),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" | "g" => {
                let page: u32 = number(words.next(), "page")?;
                if page == 0 {
                    return Err(CommandError::PageZero);
                }
                Ok(Self::Page(page))
            }
            "toggle" | "t" => Ok(Self::Toggle(number(words.next(), "toggle")?)),
            "check" | "c" => {
                let ids = words
                    .map(|word| number(Some(word), "check"))
                    .collect::<Result<_, _>>()?;
                Ok(Self::Check(ids))
            }
            "select" => Ok(Self::Select(number(words.next(), "select")?)),
            "clear" => Ok(Self::Clear),
            "selected" => Ok(Self::Selected),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn number<T: std::str::FromStr>(word: Option<&str>, command: &'static str) -> Result<T, CommandError> {
    let word = word.ok_or(CommandError::MissingArgument(command))?;
    word.parse()
        .map_err(|_| CommandError::InvalidNumber(word.to_string()))
}

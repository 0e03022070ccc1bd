//! Interactive prompt driving the browser.

use std::collections::HashSet;

use artworks_lib::error::FetchError;
use artworks_lib::error::SelectionError;
use artworks_lib::selection::BulkSelectOutcome;
use artworks_lib::ArtworksClient;
use artworks_lib::Browser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use thiserror::Error;
use tokio::runtime::Runtime;

use crate::command::Command;
use crate::command::HELP;
use crate::interrupt::Interrupts;
use crate::render::render_page;

/// Error type for the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("selection error: {0}")]
    Selection(#[from] SelectionError),

    #[error("prompt error: {0}")]
    Readline(#[from] ReadlineError),

    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Runs the prompt until `quit` or end of input.
pub fn run(mut browser: Browser<ArtworksClient>) -> Result<(), CliError> {
    let runtime = Runtime::new()?;
    let interrupts = Interrupts::install(&runtime);
    let mut editor = DefaultEditor::new()?;

    load_page(&runtime, &interrupts, &mut browser, 1);
    print_page(&browser);
    println!("Type `help` for commands.");

    loop {
        let line = match editor.readline("artworks> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            let _ = editor.add_history_entry(line.as_str());
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Show => print_page(&browser),
            Command::Refresh => {
                match interrupts.run(&runtime, browser.refresh()) {
                    Some(Ok(())) => {}
                    Some(Err(e)) => println!("Could not reload: {e}"),
                    None => println!("Reload cancelled."),
                }
                print_page(&browser);
            }
            Command::Next => {
                let page = browser.page().page_number();
                if browser.has_next_page() {
                    load_page(&runtime, &interrupts, &mut browser, page + 1);
                }
                print_page(&browser);
            }
            Command::Prev => {
                let page = browser.page().page_number();
                if page > 1 {
                    load_page(&runtime, &interrupts, &mut browser, page - 1);
                }
                print_page(&browser);
            }
            Command::Page(page) => {
                load_page(&runtime, &interrupts, &mut browser, page);
                print_page(&browser);
            }
            Command::Toggle(id) => {
                report_selection(browser.on_toggle(id).map(|_| ()));
                print_page(&browser);
            }
            Command::Check(ids) => {
                let selected: HashSet<_> = ids.into_iter().collect();
                report_selection(browser.on_selection_diff(&browser.visible_ids(), &selected));
                print_page(&browser);
            }
            Command::Select(k) => {
                bulk_select(&runtime, &interrupts, &browser, k);
                print_page(&browser);
            }
            Command::Clear => {
                report_selection(browser.controller().clear());
                print_page(&browser);
            }
            Command::Selected => {
                let ids = browser.controller().snapshot().to_sorted_vec();
                if ids.is_empty() {
                    println!("Nothing selected.");
                } else {
                    let ids: Vec<_> = ids.iter().map(ToString::to_string).collect();
                    println!("{} selected: {}", ids.len(), ids.join(", "));
                }
            }
        }
    }

    Ok(())
}

fn load_page(
    runtime: &Runtime,
    interrupts: &Interrupts,
    browser: &mut Browser<ArtworksClient>,
    page: u32,
) {
    let Some(result) = interrupts.run(runtime, browser.on_page_change(page)) else {
        println!("Loading page {page} cancelled.");
        return;
    };
    if let Err(e) = result {
        println!("Could not load page {page}: {e}");
        if e.is_transient() {
            println!("The service may be busy; `refresh` retries.");
        }
    }
}

fn print_page(browser: &Browser<ArtworksClient>) {
    println!("{}", render_page(&browser.view(), browser.controller().len()));
}

fn report_selection(result: Result<(), SelectionError>) {
    if let Err(e) = result {
        println!("{e}");
    }
}

/// Runs a bulk select; Ctrl-C cancels it.
fn bulk_select(
    runtime: &Runtime,
    interrupts: &Interrupts,
    browser: &Browser<ArtworksClient>,
    k: usize,
) {
    let cancel = interrupts.begin();
    println!("Selecting {k} records... (Ctrl-C to stop)");
    let result = runtime.block_on(browser.on_bulk_select_request(k, &cancel));

    match result {
        Ok(outcome) => println!("{}", describe(&outcome)),
        Err(e) => println!("{e}; {} records stay selected", e.added()),
    }
}

fn describe(outcome: &BulkSelectOutcome) -> String {
    if outcome.exhausted {
        format!(
            "Selected {} of {} records; no more records available.",
            outcome.added, outcome.requested
        )
    } else {
        format!("Selected {} records.", outcome.added)
    }
}

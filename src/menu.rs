//! Interactive menu loop.
//!
//! The loop is a small state machine over [`MenuState`]. Every flow returns to the
//! main menu when it finishes, including after an input mistake, which is reported
//! and otherwise ignored. File errors end the loop.

use crate::error::TrackerError;
use crate::listing::{build_listing, OutcomeMarker};
use crate::model::{Outcome, Record};
use crate::pipeline;
use crate::storage::TableStore;
use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    AddJob,
    EditOutcome,
    ViewApplications,
    Exit,
}

impl MenuState {
    /// Map a main-menu selection to the state it opens. Only the exact digits
    /// are accepted.
    pub fn from_choice(choice: &str) -> Result<Self, TrackerError> {
        match choice {
            "1" => Ok(MenuState::AddJob),
            "2" => Ok(MenuState::EditOutcome),
            "3" => Ok(MenuState::ViewApplications),
            "4" => Ok(MenuState::Exit),
            other => Err(TrackerError::InvalidMenuChoice(other.to_string())),
        }
    }
}

/// An interactive session over arbitrary input and output streams.
pub struct Session<R, W> {
    store: TableStore,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(store: TableStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> Result<()> {
        self.store.ensure_exists()?;

        let mut state = MenuState::MainMenu;
        loop {
            state = match state {
                MenuState::MainMenu => self.main_menu()?,
                MenuState::AddJob => {
                    let res = self.add_job();
                    self.settle(res)?;
                    MenuState::MainMenu
                }
                MenuState::EditOutcome => {
                    let res = self.edit_outcome();
                    self.settle(res)?;
                    MenuState::MainMenu
                }
                MenuState::ViewApplications => {
                    let res = self.view_applications();
                    self.settle(res)?;
                    MenuState::MainMenu
                }
                MenuState::Exit => {
                    writeln!(self.output, "👋 Exiting. Goodbye!")?;
                    self.output.flush()?;
                    return Ok(());
                }
            };
        }
    }

    fn main_menu(&mut self) -> Result<MenuState> {
        writeln!(self.output, "=== Job Application Manager ===")?;
        writeln!(self.output, "[1] Add Job Application")?;
        writeln!(self.output, "[2] Edit Application Outcome")?;
        writeln!(self.output, "[3] View Applications")?;
        writeln!(self.output, "[4] Exit")?;

        let Some(choice) = self.prompt("Select an option: ")? else {
            tracing::debug!("input closed at main menu");
            return Ok(MenuState::Exit);
        };
        match MenuState::from_choice(&choice) {
            Ok(next) => Ok(next),
            Err(err) => {
                self.settle(Err(err.into()))?;
                Ok(MenuState::MainMenu)
            }
        }
    }

    fn add_job(&mut self) -> Result<()> {
        let Some(position) = self.prompt("\nEnter position title: ")? else {
            return Ok(());
        };
        let Some(company) = self.prompt("Enter company name: ")? else {
            return Ok(());
        };
        let Some(city) = self.prompt("Enter city: ")? else {
            return Ok(());
        };
        let Some(link) = self.prompt("Enter application link: ")? else {
            return Ok(());
        };

        let record = Record::new_application(&position, &company, &city, &link);
        pipeline::add_application(&self.store, record)?;
        writeln!(self.output, "✅ Job application added.\n")?;
        Ok(())
    }

    fn edit_outcome(&mut self) -> Result<()> {
        let mut table = self.store.load()?;
        if table.is_empty() {
            writeln!(self.output, "⚠️ No job applications found.\n")?;
            return Ok(());
        }

        writeln!(self.output, "\n📋 Job Applications:")?;
        for line in build_listing(&table, OutcomeMarker::Bracketed).lines {
            writeln!(self.output, "{line}")?;
        }

        let Some(input) = self.prompt("Select job number to update: ")? else {
            return Ok(());
        };
        let selection = parse_selection(&input, table.len())?;

        writeln!(self.output, "\nNew outcome:")?;
        for (i, outcome) in Outcome::ALL.iter().enumerate() {
            writeln!(self.output, "[{}] {}", i + 1, outcome)?;
        }
        let Some(choice) = self.prompt("Choice: ")? else {
            return Ok(());
        };
        let outcome = Outcome::from_menu_choice(&choice)
            .ok_or_else(|| TrackerError::InvalidOutcome(choice.clone()))?;

        pipeline::update_outcome(&self.store, &mut table, selection, outcome)?;
        writeln!(self.output, "✅ Outcome updated.\n")?;
        Ok(())
    }

    fn view_applications(&mut self) -> Result<()> {
        let table = self.store.load()?;
        if table.is_empty() {
            writeln!(self.output, "\n📋 No job applications found.\n")?;
            return Ok(());
        }

        writeln!(self.output, "\n📋 Job Applications:")?;
        for line in build_listing(&table, OutcomeMarker::Plain).lines {
            writeln!(self.output, "{line}")?;
        }
        self.prompt("Press Enter to return to the main menu...\n")?;
        Ok(())
    }

    /// Report recoverable input errors and keep going; pass anything else up.
    fn settle(&mut self, res: Result<()>) -> Result<()> {
        let Err(err) = res else {
            return Ok(());
        };
        match err.downcast_ref::<TrackerError>() {
            Some(e) if e.is_recoverable() => {
                tracing::warn!(error = %e, "rejected input");
                writeln!(self.output, "❌ {e}\n")?;
                Ok(())
            }
            _ => Err(err),
        }
    }

    /// Print `text` and read one line; `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Parse a 1-based row number, rejecting anything outside `1..=max`.
fn parse_selection(input: &str, max: usize) -> Result<usize, TrackerError> {
    match input.trim().parse::<usize>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(TrackerError::InvalidSelection {
            input: input.trim().to_string(),
            max,
        }),
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names of the header row, in sheet order.
pub const COLUMNS: [&str; 5] = ["POSITION", "COMPANY", "CITY", "LINK", "OUTCOME"];

/// Zero-based index of the link column.
pub const LINK_COLUMN: usize = 3;
/// Zero-based index of the outcome column.
pub const OUTCOME_COLUMN: usize = 4;

/// Display text of every hyperlink cell.
pub const LINK_LABEL: &str = "Here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Waiting,
    Rejected,
    Accepted,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl Outcome {
    /// Menu order used by the edit flow.
    pub const ALL: [Outcome; 4] = [
        Outcome::Waiting,
        Outcome::Rejected,
        Outcome::Accepted,
        Outcome::InProgress,
    ];

    /// Label stored in the outcome cell.
    pub fn label(self) -> &'static str {
        match self {
            Outcome::Waiting => "Waiting",
            Outcome::Rejected => "Rejected",
            Outcome::Accepted => "Accepted",
            Outcome::InProgress => "In Progress",
        }
    }

    /// Resolve a 1-based menu choice ("1".."4") to an outcome. The input must
    /// match exactly; surrounding whitespace is not accepted.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(Outcome::Waiting),
            "2" => Some(Outcome::Rejected),
            "3" => Some(Outcome::Accepted),
            "4" => Some(Outcome::InProgress),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Outcome {
    type Err = ();

    /// Exact label match; anything else is not a known outcome.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Outcome::ALL.into_iter().find(|o| o.label() == s).ok_or(())
    }
}

/// One job application, i.e. one data row of the sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub position: String,
    pub company: String,
    pub city: String,
    /// Raw cell content, normally a `=HYPERLINK(..)` formula.
    pub link: String,
    /// Stored verbatim so values outside the known set survive a rewrite.
    pub outcome: String,
}

impl Record {
    /// Build a freshly submitted application: outcome starts as `Waiting`.
    pub fn new_application(position: &str, company: &str, city: &str, url: &str) -> Self {
        Self {
            position: position.to_string(),
            company: company.to_string(),
            city: city.to_string(),
            link: hyperlink_formula(url),
            outcome: Outcome::Waiting.label().to_string(),
        }
    }

    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome.label().to_string();
    }

    /// Cell values in column order.
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.position,
            &self.company,
            &self.city,
            &self.link,
            &self.outcome,
        ]
    }

    /// Rebuild a record from cell values in column order.
    pub fn from_cells(cells: [String; 5]) -> Self {
        let [position, company, city, link, outcome] = cells;
        Self {
            position,
            company,
            city,
            link,
            outcome,
        }
    }
}

/// The whole sheet below the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub records: Vec<Record>,
}

impl Table {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}

/// Wrap a URL in a spreadsheet hyperlink formula with the fixed display label.
pub fn hyperlink_formula(url: &str) -> String {
    // Formula string literals escape a quote by doubling it.
    let escaped = url.replace('"', "\"\"");
    format!("=HYPERLINK(\"{escaped}\", \"{LINK_LABEL}\")")
}

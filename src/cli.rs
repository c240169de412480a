use crate::menu::Session;
use crate::storage::{self, TableStore, DEFAULT_FILENAME};
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "job-manager",
    version,
    about = "Track job applications in a formatted Excel workbook"
)]
pub struct Cli {
    /// Workbook holding the applications
    #[arg(long, default_value = DEFAULT_FILENAME)]
    pub file: PathBuf,

    /// Print all applications as JSON and exit (no menu)
    #[arg(long)]
    pub json: bool,

    /// Export all applications as JSON to this path and exit (no menu)
    #[arg(long)]
    pub export_json: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Whether the run skips the interactive menu.
    pub fn is_non_interactive(&self) -> bool {
        self.json || self.export_json.is_some()
    }
}

pub fn run(args: Cli) -> Result<()> {
    let store = TableStore::new(&args.file);

    if args.is_non_interactive() {
        let stdout = std::io::stdout();
        return run_export(&args, &store, &mut stdout.lock());
    }

    tracing::info!(path = %store.path().display(), "starting interactive session");
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    Session::new(store, stdin.lock(), stdout.lock()).run()
}

/// Load the table once and emit it as JSON to stdout and/or a file.
fn run_export(args: &Cli, store: &TableStore, out: &mut impl Write) -> Result<()> {
    store
        .ensure_exists()
        .with_context(|| format!("prepare {}", store.path().display()))?;
    let table = store
        .load()
        .with_context(|| format!("load {}", store.path().display()))?;

    if let Some(p) = args.export_json.as_deref() {
        storage::export_json(p, &table)?;
    }
    if args.json {
        let json = serde_json::to_string_pretty(&table.records)?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::SheetLayout;
    use crate::model::{Record, Table};
    use std::ffi::OsStr;

    #[test]
    fn defaults_to_interactive_on_local_workbook() {
        let args = Cli::try_parse_from(["job-manager"]).unwrap();
        assert_eq!(args.file, PathBuf::from("JobApplications.xlsx"));
        assert_eq!(args.log_level, "warn");
        assert!(!args.is_non_interactive());
    }

    #[test]
    fn json_flags_skip_the_menu() {
        let args = Cli::try_parse_from(["job-manager", "--json"]).unwrap();
        assert!(args.is_non_interactive());
        let args = Cli::try_parse_from([
            "job-manager",
            "--export-json",
            "out.json",
            "--file",
            "a.xlsx",
        ])
        .unwrap();
        assert!(args.is_non_interactive());
        assert_eq!(args.file, PathBuf::from("a.xlsx"));
    }

    #[test]
    fn json_mode_prints_records() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("apps.xlsx");
        let store = TableStore::new(&file);
        let table = Table::new(vec![Record::new_application(
            "Engineer",
            "Acme",
            "NYC",
            "http://x.com",
        )]);
        store.save(&table, &SheetLayout::for_table(&table)).unwrap();

        let export = dir.path().join("apps.json");
        let argv: [&OsStr; 6] = [
            "job-manager".as_ref(),
            "--json".as_ref(),
            "--file".as_ref(),
            file.as_os_str(),
            "--export-json".as_ref(),
            export.as_os_str(),
        ];
        let args = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        run_export(&args, &store, &mut out).unwrap();

        let printed: Vec<Record> = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, table.records);
        let written: Vec<Record> =
            serde_json::from_str(&std::fs::read_to_string(export).unwrap()).unwrap();
        assert_eq!(written, table.records);
    }

    #[test]
    fn json_mode_creates_missing_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let store = TableStore::new(dir.path().join(DEFAULT_FILENAME));
        let args = Cli::try_parse_from(["job-manager", "--json"]).unwrap();

        let mut out = Vec::new();
        run_export(&args, &store, &mut out).unwrap();

        assert!(store.path().exists());
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}

//! Workbook persistence.
//!
//! The whole sheet is read on load and rewritten from scratch on save; no partial
//! updates are ever made to the file on disk.

use crate::error::TrackerError;
use crate::format::{CellStyle, Edge, SheetLayout};
use crate::model::{Record, Table};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use umya_spreadsheet::{Border, HorizontalAlignmentValues, VerticalAlignmentValues, Worksheet};

/// Default workbook name, resolved against the working directory.
pub const DEFAULT_FILENAME: &str = "JobApplications.xlsx";

const COLUMN_LETTERS: [&str; 5] = ["A", "B", "C", "D", "E"];
const HEADER_ROW: u32 = 1;
const FIRST_DATA_ROW: u32 = 2;

/// Backing workbook of the application table.
#[derive(Debug, Clone)]
pub struct TableStore {
    path: PathBuf,
}

impl TableStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the workbook with just the header row if it is missing.
    /// Returns whether a file was created.
    pub fn ensure_exists(&self) -> Result<bool, TrackerError> {
        if self.path.exists() {
            return Ok(false);
        }
        let empty = Table::default();
        self.save(&empty, &SheetLayout::for_table(&empty))?;
        tracing::info!(path = %self.path.display(), "created workbook");
        Ok(true)
    }

    /// Read every data row of the active worksheet.
    pub fn load(&self) -> Result<Table, TrackerError> {
        std::fs::metadata(&self.path).map_err(|e| self.io_error(e))?;

        let book = umya_spreadsheet::reader::xlsx::read(&self.path)
            .map_err(|e| self.format_error(e.to_string()))?;
        if book.get_sheet_count() == 0 {
            return Err(self.format_error("workbook has no worksheets".to_string()));
        }
        let sheet = book.get_active_sheet();

        let mut records = Vec::new();
        for row in FIRST_DATA_ROW..=sheet.get_highest_row() {
            let cells: [String; 5] = [1, 2, 3, 4, 5].map(|col| read_cell(sheet, col, row));
            // Rows holding only formatting carry no application.
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            records.push(Record::from_cells(cells));
        }

        tracing::debug!(path = %self.path.display(), rows = records.len(), "loaded table");
        Ok(Table::new(records))
    }

    /// Overwrite the workbook with `table`, styled by `layout`.
    pub fn save(&self, table: &Table, layout: &SheetLayout) -> Result<(), TrackerError> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_active_sheet_mut();

        for (idx, label) in layout.header_labels.iter().enumerate() {
            let col = idx as u32 + 1;
            write_value(sheet, col, HEADER_ROW, label);
            write_style(sheet, col, HEADER_ROW, &layout.header[idx]);
        }

        for (offset, record) in table.records.iter().enumerate() {
            let row = FIRST_DATA_ROW + offset as u32;
            let styles = layout.rows.get(offset);
            for (idx, value) in record.cells().into_iter().enumerate() {
                let col = idx as u32 + 1;
                write_value(sheet, col, row, value);
                if let Some(styles) = styles {
                    write_style(sheet, col, row, &styles[idx]);
                }
            }
        }

        for (letter, width) in COLUMN_LETTERS.iter().zip(layout.column_widths) {
            if width > 0.0 {
                sheet.get_column_dimension_mut(letter).set_width(width);
            }
        }

        umya_spreadsheet::writer::xlsx::write(&book, &self.path)
            .map_err(|e| self.io_error(std::io::Error::other(e.to_string())))?;
        tracing::debug!(path = %self.path.display(), rows = table.len(), "saved table");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> TrackerError {
        TrackerError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn format_error(&self, reason: String) -> TrackerError {
        TrackerError::FileFormat {
            path: self.path.clone(),
            reason,
        }
    }
}

/// Cell text, with formulas returned as `=` followed by the formula body.
fn read_cell(sheet: &Worksheet, col: u32, row: u32) -> String {
    match sheet.get_cell((col, row)) {
        Some(cell) => {
            let formula = cell.get_formula();
            if formula.is_empty() {
                cell.get_value().into_owned()
            } else {
                format!("={}", formula.trim_start_matches('='))
            }
        }
        None => String::new(),
    }
}

fn write_value(sheet: &mut Worksheet, col: u32, row: u32, value: &str) {
    if value.is_empty() {
        return;
    }
    let cell = sheet.get_cell_mut((col, row));
    match value.strip_prefix('=') {
        Some(formula) => {
            cell.set_formula(formula);
        }
        None => {
            cell.set_value_string(value);
        }
    }
}

fn write_style(sheet: &mut Worksheet, col: u32, row: u32, style: &CellStyle) {
    let target = sheet.get_style_mut((col, row));

    let font = target.get_font_mut();
    font.set_bold(style.bold);
    if let Some(color) = style.font_color {
        font.get_color_mut().set_argb(color);
    }
    if let Some(fill) = style.fill {
        target.set_background_color(fill);
    }

    let borders = target.get_borders_mut();
    write_edge(borders.get_left_mut(), style.borders.left);
    write_edge(borders.get_right_mut(), style.borders.right);
    write_edge(borders.get_top_mut(), style.borders.top);
    write_edge(borders.get_bottom_mut(), style.borders.bottom);

    if style.centered {
        let alignment = target.get_alignment_mut();
        alignment.set_horizontal(HorizontalAlignmentValues::Center);
        alignment.set_vertical(VerticalAlignmentValues::Center);
    }
}

fn write_edge(border: &mut Border, edge: Option<Edge>) {
    if let Some(edge) = edge {
        border.set_border_style(Border::BORDER_THIN);
        border.get_color_mut().set_argb(edge.color);
    }
}

/// Write all applications to `path` as a pretty JSON array.
pub fn export_json(path: &Path, table: &Table) -> Result<()> {
    let json = serde_json::to_string_pretty(&table.records).context("serialize applications")?;
    std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), rows = table.len(), "exported applications");
    Ok(())
}

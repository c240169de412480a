//! Sheet presentation: header style, outcome colors, borders and column widths.
//!
//! Formatting never touches cell values. It computes a [`SheetLayout`] from the
//! table and overwrites every style in it, so applying it twice is the same as
//! applying it once.

use crate::model::{Outcome, Table, COLUMNS, LINK_COLUMN, OUTCOME_COLUMN};

/// Width of the link column; its visible text is always the short link label.
pub const LINK_COLUMN_WIDTH: f64 = 12.0;

/// Extra characters added to every auto-sized column.
const WIDTH_PADDING: usize = 2;

const BLACK: &str = "FF000000";
const WHITE: &str = "FFFFFFFF";

/// Font and fill colors (ARGB) for one outcome label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeStyle {
    pub font: &'static str,
    pub fill: &'static str,
}

/// Color pair per known outcome.
pub const OUTCOME_STYLES: [(Outcome, OutcomeStyle); 4] = [
    (
        Outcome::Waiting,
        OutcomeStyle {
            font: "FF0000FF",
            fill: "FFDCE6F1",
        },
    ),
    (
        Outcome::Rejected,
        OutcomeStyle {
            font: "FFFF0000",
            fill: "FFFADBD8",
        },
    ),
    (
        Outcome::Accepted,
        OutcomeStyle {
            font: "FF00AA00",
            fill: "FFD5F5E3",
        },
    ),
    (
        Outcome::InProgress,
        OutcomeStyle {
            font: "FFB8860B",
            fill: "FFFFFACD",
        },
    ),
];

/// Colors for a stored outcome label; `None` for labels outside the known set.
pub fn style_for_label(label: &str) -> Option<OutcomeStyle> {
    OUTCOME_STYLES
        .iter()
        .find(|(outcome, _)| outcome.label() == label)
        .map(|(_, style)| *style)
}

/// A thin border edge of the given ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellBorders {
    pub left: Option<Edge>,
    pub right: Option<Edge>,
    pub top: Option<Edge>,
    pub bottom: Option<Edge>,
}

/// Presentation attributes of a single cell. `Default` is an unstyled cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStyle {
    pub bold: bool,
    pub font_color: Option<&'static str>,
    pub fill: Option<&'static str>,
    pub borders: CellBorders,
    pub centered: bool,
}

impl CellStyle {
    fn header() -> Self {
        Self {
            bold: true,
            font_color: Some(WHITE),
            fill: Some(BLACK),
            borders: CellBorders {
                left: Some(Edge { color: WHITE }),
                right: Some(Edge { color: WHITE }),
                top: Some(Edge { color: BLACK }),
                bottom: Some(Edge { color: BLACK }),
            },
            centered: true,
        }
    }

    fn data() -> Self {
        Self {
            borders: CellBorders {
                left: Some(Edge { color: BLACK }),
                right: Some(Edge { color: BLACK }),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Presentation of the whole sheet, written alongside the values on save.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetLayout {
    pub header_labels: [String; 5],
    pub header: [CellStyle; 5],
    pub rows: Vec<[CellStyle; 5]>,
    pub column_widths: [f64; 5],
}

impl SheetLayout {
    /// Layout of a freshly formatted table.
    pub fn for_table(table: &Table) -> Self {
        let mut layout = Self::default();
        apply_formatting(table, &mut layout);
        layout
    }
}

/// Overwrite every presentation attribute of `layout` to match `table`.
pub fn apply_formatting(table: &Table, layout: &mut SheetLayout) {
    layout.header_labels = COLUMNS.map(str::to_string);
    layout.header = [CellStyle::header(); 5];

    layout.rows = table
        .records
        .iter()
        .map(|record| {
            let mut styles = [CellStyle::data(); 5];
            styles[LINK_COLUMN].bold = true;
            if let Some(colors) = style_for_label(&record.outcome) {
                styles[OUTCOME_COLUMN].font_color = Some(colors.font);
                styles[OUTCOME_COLUMN].fill = Some(colors.fill);
            }
            styles
        })
        .collect();

    layout.column_widths = column_widths(table);
    tracing::debug!(rows = layout.rows.len(), "applied sheet formatting");
}

/// Width of each column: longest of header and values plus padding; the link
/// column is fixed.
pub fn column_widths(table: &Table) -> [f64; 5] {
    let mut widths = [0.0; 5];
    for (idx, header) in COLUMNS.iter().enumerate() {
        if idx == LINK_COLUMN {
            widths[idx] = LINK_COLUMN_WIDTH;
            continue;
        }
        let longest = table
            .records
            .iter()
            .map(|r| r.cells()[idx].chars().count())
            .fold(header.chars().count(), usize::max);
        widths[idx] = (longest + WIDTH_PADDING) as f64;
    }
    widths
}

//! Turns raw assistant text into structured display blocks.
//!
//! The input is treated as lines of loosely markdown-shaped text. Emphasis
//! markup is dropped, `` `code` `` becomes a code span, `- ` bullets get a
//! bullet glyph and runs of lines starting with `|` become tables. Nothing is
//! ever rendered as raw markup, so the output is safe to display as-is.

/// Markup removed from every line and every table cell.
const EMPHASIS_MARKERS: &[&str] = &[
    "**",
    "<strong>",
    "</strong>",
    "<b>",
    "</b>",
    "<em>",
    "</em>",
];

const BULLET_MARKER: &str = "- ";
const BULLET: &str = "• ";

/// Structured output of [`format`]. Blocks appear in input line order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormattedContent {
    pub blocks: Vec<Block>,
}

impl FormattedContent {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Table(Table),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    PlainText(String),
    CodeSpan(String),
}


/// Formats raw assistant text. Pure and deterministic.
pub fn format(raw: &str) -> FormattedContent {
    let mut formatter = LineFormatter::default();
    for line in raw.lines() {
        formatter.push_line(line);
    }
    formatter.finish()
}

enum LineKind<'a> {
    Blank,
    TableRow(Vec<String>),
    Text(&'a str),
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with('|') {
        LineKind::TableRow(table_cells(trimmed))
    } else {
        LineKind::Text(line)
    }
}

#[derive(Debug, Default)]
enum TableState {
    #[default]
    Outside,
    /// Inside a run of table rows. `None` until a row with at least one cell
    /// has been seen; that row becomes the header.
    InTable(Option<Table>),
}

#[derive(Debug, Default)]
struct LineFormatter {
    blocks: Vec<Block>,
    state: TableState,
}

impl LineFormatter {
    fn push_line(&mut self, line: &str) {
        match classify(line) {
            LineKind::TableRow(cells) => self.push_row(cells),
            LineKind::Blank => self.end_table(),
            LineKind::Text(text) => {
                self.end_table();
                let spans = format_inline(text);
                if !spans.is_empty() {
                    self.blocks.push(Block::Paragraph(spans));
                }
            }
        }
    }

    fn push_row(&mut self, cells: Vec<String>) {
        self.state = match std::mem::take(&mut self.state) {
            TableState::Outside | TableState::InTable(None) => {
                let table = (!cells.is_empty()).then(|| Table {
                    header: cells,
                    rows: Vec::new(),
                });
                TableState::InTable(table)
            }
            TableState::InTable(Some(mut table)) => {
                if !cells.is_empty() {
                    table.rows.push(cells);
                }
                TableState::InTable(Some(table))
            }
        };
    }

    fn end_table(&mut self) {
        if let TableState::InTable(Some(table)) = std::mem::take(&mut self.state) {
            self.blocks.push(Block::Table(table));
        }
    }

    fn finish(mut self) -> FormattedContent {
        self.end_table();
        FormattedContent {
            blocks: self.blocks,
        }
    }
}

/// Cells keep their backticks so code stays recognizable in plain text.
fn table_cells(line: &str) -> Vec<String> {
    line.split('|')
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| strip_emphasis(fragment.trim()).trim().to_string())
        .collect()
}

fn format_inline(line: &str) -> Vec<Inline> {
    let stripped = strip_emphasis(line);
    if stripped.trim().is_empty() {
        return Vec::new();
    }
    match stripped.strip_prefix(BULLET_MARKER) {
        Some(rest) => split_code_spans(&format!("{BULLET}{rest}")),
        None => split_code_spans(&stripped),
    }
}

fn strip_emphasis(text: &str) -> String {
    EMPHASIS_MARKERS
        .iter()
        .fold(text.to_string(), |acc, marker| {
            if acc.contains(marker) {
                acc.replace(marker, "")
            } else {
                acc
            }
        })
}

/// Splits text into plain and code spans. A code span is a non-empty run
/// without backticks enclosed in backticks; anything else stays literal.
fn split_code_spans(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(open) = rest.find('`') {
        let after = &rest[open + 1..];
        match after.find('`') {
            Some(0) => {
                plain.push_str(&rest[..=open]);
                rest = after;
            }
            Some(close) => {
                plain.push_str(&rest[..open]);
                if !plain.is_empty() {
                    spans.push(Inline::PlainText(std::mem::take(&mut plain)));
                }
                spans.push(Inline::CodeSpan(after[..close].to_string()));
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        spans.push(Inline::PlainText(plain));
    }
    spans
}

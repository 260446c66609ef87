use pretty_assertions::assert_eq;
use vidiwise_core::{format, Block, Inline, Table};

fn text(s: &str) -> Inline {
    Inline::PlainText(s.to_string())
}

fn code(s: &str) -> Inline {
    Inline::CodeSpan(s.to_string())
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn empty_input_has_no_blocks() {
    assert!(format("").is_empty());
    assert!(format("\n\n   \n").is_empty());
}

#[test]
fn bold_is_stripped_and_code_becomes_span() {
    let content = format("**bold** and `code`");
    assert_eq!(
        content.blocks,
        vec![Block::Paragraph(vec![text("bold and "), code("code")])]
    );
}

#[test]
fn strong_tags_are_stripped_too() {
    let content = format("<strong>Note:</strong> keep going");
    assert_eq!(
        content.blocks,
        vec![Block::Paragraph(vec![text("Note: keep going")])]
    );
}

#[test]
fn dash_lines_become_bullets() {
    let content = format("- item one\n- item two");
    assert_eq!(
        content.blocks,
        vec![
            Block::Paragraph(vec![text("• item one")]),
            Block::Paragraph(vec![text("• item two")]),
        ]
    );
}

#[test]
fn bullet_with_code_span() {
    let content = format("- run `cargo test` first");
    assert_eq!(
        content.blocks,
        vec![Block::Paragraph(vec![
            text("• run "),
            code("cargo test"),
            text(" first"),
        ])]
    );
}

#[test]
fn unmatched_and_empty_backticks_stay_literal() {
    assert_eq!(
        format("a ` b").blocks,
        vec![Block::Paragraph(vec![text("a ` b")])]
    );
    assert_eq!(
        format("``x`").blocks,
        vec![Block::Paragraph(vec![text("`"), code("x")])]
    );
}

#[test]
fn simple_table_has_header_and_body() {
    let content = format("| A | B |\n| 1 | 2 |");
    assert_eq!(
        content.blocks,
        vec![Block::Table(Table {
            header: row(&["A", "B"]),
            rows: vec![row(&["1", "2"])],
        })]
    );
}

#[test]
fn table_cells_drop_emphasis_but_keep_code() {
    let content = format("| **Name** | `id` |\n| <strong>x</strong> | y |");
    assert_eq!(
        content.blocks,
        vec![Block::Table(Table {
            header: row(&["Name", "`id`"]),
            rows: vec![row(&["x", "y"])],
        })]
    );
}

#[test]
fn blocks_keep_line_order() {
    let raw = "Intro line\n\n| H1 | H2 |\n| a | b |\n| c | d |\n\nOutro with `x`";
    let content = format(raw);
    assert_eq!(
        content.blocks,
        vec![
            Block::Paragraph(vec![text("Intro line")]),
            Block::Table(Table {
                header: row(&["H1", "H2"]),
                rows: vec![row(&["a", "b"]), row(&["c", "d"])],
            }),
            Block::Paragraph(vec![text("Outro with "), code("x")]),
        ]
    );
}

#[test]
fn blank_line_starts_a_new_table_with_its_own_header() {
    let content = format("| A |\n| 1 |\n\n| B |\n| 2 |");
    assert_eq!(
        content.blocks,
        vec![
            Block::Table(Table {
                header: row(&["A"]),
                rows: vec![row(&["1"])],
            }),
            Block::Table(Table {
                header: row(&["B"]),
                rows: vec![row(&["2"])],
            }),
        ]
    );
}

#[test]
fn prose_line_ends_a_table_run() {
    let content = format("| A |\nbetween\n| B |");
    assert_eq!(
        content.blocks,
        vec![
            Block::Table(Table {
                header: row(&["A"]),
                rows: vec![],
            }),
            Block::Paragraph(vec![text("between")]),
            Block::Table(Table {
                header: row(&["B"]),
                rows: vec![],
            }),
        ]
    );
}

#[test]
fn delimiter_rows_are_kept_as_body_rows() {
    let content = format("| A | B |\n|---|---|\n| 1 | 2 |");
    assert_eq!(
        content.blocks,
        vec![Block::Table(Table {
            header: row(&["A", "B"]),
            rows: vec![row(&["---", "---"]), row(&["1", "2"])],
        })]
    );
}

#[test]
fn pipe_led_prose_is_read_as_a_table_row() {
    let content = format("  | not really a table");
    assert_eq!(
        content.blocks,
        vec![Block::Table(Table {
            header: row(&["not really a table"]),
            rows: vec![],
        })]
    );
}

#[test]
fn pipe_only_rows_add_nothing() {
    let content = format("||\n| A |\n| 1 |");
    assert_eq!(
        content.blocks,
        vec![Block::Table(Table {
            header: row(&["A"]),
            rows: vec![row(&["1"])],
        })]
    );
}

#[test]
fn crlf_line_endings_are_handled() {
    let content = format("first\r\n\r\n- second\r\n");
    assert_eq!(
        content.blocks,
        vec![
            Block::Paragraph(vec![text("first")]),
            Block::Paragraph(vec![text("• second")]),
        ]
    );
}

#[test]
fn markup_only_line_produces_no_block() {
    assert!(format("**").is_empty());
}

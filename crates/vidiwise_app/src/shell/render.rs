use vidiwise_core::{AppViewModel, Block, ChatMessage, Inline, IngestionStatus, Table};

/// Turns view model snapshots into terminal lines. Only what changed since
/// the previous snapshot is emitted: a new status line and transcript
/// entries not yet printed.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    status_line: Option<String>,
    printed: usize,
}

impl TerminalRenderer {
    pub fn render(&mut self, view: &AppViewModel) -> Vec<String> {
        let mut lines = Vec::new();

        let status = status_line(view);
        if self.status_line.as_deref() != Some(status.as_str()) {
            lines.push(status.clone());
            self.status_line = Some(status);
        }

        // A fresh conversation has started.
        if view.transcript.len() < self.printed {
            self.printed = 0;
        }
        for entry in &view.transcript[self.printed..] {
            lines.extend(render_entry(entry));
        }
        self.printed = view.transcript.len();

        lines
    }
}

fn status_line(view: &AppViewModel) -> String {
    let video = view.video_id.as_deref().unwrap_or("?");
    match view.ingestion {
        IngestionStatus::Idle => match &view.error {
            Some(error) => format!("Error: {error}"),
            None => "Paste a video URL to begin.".to_string(),
        },
        IngestionStatus::Submitting => "Submitting video...".to_string(),
        IngestionStatus::Processing => format!("Processing video {video}..."),
        IngestionStatus::Ready => match (&view.error, &view.embed_url) {
            (Some(error), _) => format!("Error: {error}. Video {video} is still ready."),
            (None, Some(embed)) => format!("Video {video} is ready ({embed}). Ask a question."),
            (None, None) => format!("Video {video} is ready. Ask a question."),
        },
        IngestionStatus::Failed => format!(
            "Error: {}. Paste another URL to retry.",
            view.error.as_deref().unwrap_or("ingestion failed")
        ),
    }
}

fn render_entry(entry: &ChatMessage) -> Vec<String> {
    match entry {
        ChatMessage::User(text) => vec![format!("> {text}")],
        ChatMessage::Error(text) => vec![format!("! {text}")],
        ChatMessage::Assistant(content) if content.is_empty() => vec!["(empty answer)".to_string()],
        ChatMessage::Assistant(content) => content
            .blocks
            .iter()
            .flat_map(|block| match block {
                Block::Paragraph(inlines) => vec![render_inlines(inlines)],
                Block::Table(table) => render_table(table),
            })
            .collect(),
    }
}

fn render_inlines(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::PlainText(text) => text.clone(),
            Inline::CodeSpan(code) => format!("`{code}`"),
        })
        .collect()
}

fn render_table(table: &Table) -> Vec<String> {
    let columns = std::iter::once(&table.header)
        .chain(&table.rows)
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    let mut widths = vec![0; columns];
    for row in std::iter::once(&table.header).chain(&table.rows) {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = vec![render_row(&table.header, &widths)];
    lines.push(
        widths
            .iter()
            .map(|width| "-".repeat(*width))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    lines.extend(table.rows.iter().map(|row| render_row(row, &widths)));
    lines
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let cells: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(index, width)| {
            let cell = row.get(index).map(String::as_str).unwrap_or("");
            format!("{cell:<width$}")
        })
        .collect();
    cells.join(" | ").trim_end().to_string()
}

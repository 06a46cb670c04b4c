use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::severity::Severity;
use crate::store::history::PredictionRecord;
use crate::ui::theme::Theme;

const MAX_VISIBLE_ROWS: usize = 20;

/// Chronological prediction table, newest first. Result cells reuse the
/// shared severity classification for color and tier label.
pub struct HistoryTable<'a> {
    pub records: &'a [PredictionRecord],
    pub selected: usize,
    pub confirm_clear: bool,
    pub theme: &'a Theme,
}

impl<'a> HistoryTable<'a> {
    pub fn new(
        records: &'a [PredictionRecord],
        selected: usize,
        confirm_clear: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            records,
            selected,
            confirm_clear,
            theme,
        }
    }
}

impl Widget for HistoryTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Prediction History ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 {
            return;
        }

        if self.records.is_empty() {
            let empty = Paragraph::new(Line::from(Span::styled(
                " No prediction history yet. Make a prediction to see it here!",
                Style::default().fg(colors.text_dim()),
            )));
            empty.render(inner, buf);
            return;
        }

        let header = format!(
            " {:<12} {:>5} {:>5} {:>5}  {:>6}  {}",
            "Date", "Math", "Read", "Writ", "Result", "Tier"
        );
        buf.set_string(
            inner.x,
            inner.y,
            &header,
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        );

        let visible_rows = (inner.height as usize - 1).min(MAX_VISIBLE_ROWS);
        for (row, record) in self.records.iter().rev().take(visible_rows).enumerate() {
            let severity = Severity::classify(Some(record.result));
            let color = colors.severity(severity);
            let is_selected = row == self.selected;

            let text = format!(
                " {:<12} {:>5.0} {:>5.0} {:>5.0}  {:>6.1}  {} {}",
                record.timestamp.format("%Y-%m-%d"),
                record.input.math_score,
                record.input.reading_score,
                record.input.writing_score,
                record.result,
                severity.icon(),
                severity.label(),
            );

            let mut style = Style::default().fg(color);
            if is_selected {
                style = style.bg(colors.header_bg()).add_modifier(Modifier::BOLD);
            }
            buf.set_string(inner.x, inner.y + 1 + row as u16, &text, style);
        }

        if self.confirm_clear {
            let prompt = " Clear all history? [y/n] ";
            let y = inner.y + inner.height - 1;
            buf.set_string(
                inner.x,
                y,
                prompt,
                Style::default()
                    .fg(colors.error())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}

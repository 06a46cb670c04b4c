use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Widget};

use crate::engine::animator::DisplayState;
use crate::ui::theme::Theme;

/// Animated score gauge: a horizontal bar plus the current (interpolated)
/// value and its tier. Color comes from the displayed value's severity, so
/// it shifts tier by tier while the animation runs.
pub struct ScoreGauge<'a> {
    pub display: DisplayState,
    pub theme: &'a Theme,
}

impl<'a> ScoreGauge<'a> {
    pub fn new(display: DisplayState, theme: &'a Theme) -> Self {
        Self { display, theme }
    }
}

impl Widget for ScoreGauge<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let severity = self.display.severity;
        let color = colors.severity(severity);

        let block = Block::bordered()
            .title(" Predicted Score ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 10 || inner.height < 2 {
            return;
        }

        let ratio = self.display.value.map(|v| v.min(100) as f64 / 100.0);
        let filled_width = (ratio.unwrap_or(0.0) * inner.width as f64) as u16;
        for x in inner.x..inner.x + inner.width {
            let style = if x < inner.x + filled_width {
                Style::default().fg(colors.bg()).bg(color)
            } else {
                Style::default().bg(colors.bar_empty())
            };
            buf[(x, inner.y)].set_style(style);
        }

        let value_text = match self.display.value {
            Some(v) => format!("{v}"),
            None => "--".to_string(),
        };
        let line = Line::from(vec![
            Span::styled(
                value_text,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(severity.icon(), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(severity.label(), Style::default().fg(color)),
        ]);
        let label_width = line.width() as u16;
        let label_x = inner.x + inner.width.saturating_sub(label_width) / 2;
        buf.set_line(label_x, inner.y + 1, &line, label_width);
    }
}

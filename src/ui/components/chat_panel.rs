use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::advice::chat::{ChatSession, Role};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

/// Transcript plus the question input line. While a request is outstanding
/// the input is visually disabled and a waiting row is shown under the
/// transcript.
pub struct ChatPanel<'a> {
    pub chat: &'a ChatSession,
    pub input: &'a LineInput,
    pub focused: bool,
    pub theme: &'a Theme,
}

impl Widget for ChatPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let border = if self.focused {
            colors.border_focused()
        } else {
            colors.border()
        };
        let block = Block::bordered()
            .title(" Study Advisor ")
            .border_style(Style::default().fg(border));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 4 {
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(2), Constraint::Length(1)])
            .split(inner);

        let mut lines: Vec<Line> = Vec::new();
        for turn in self.chat.turns() {
            let (prefix, style) = match turn.role {
                Role::User => ("you: ", Style::default().fg(colors.accent())),
                Role::Assistant => ("advisor: ", Style::default().fg(colors.fg())),
            };
            lines.push(Line::from(vec![
                Span::styled(prefix, style.add_modifier(Modifier::BOLD)),
                Span::styled(turn.content.clone(), Style::default().fg(colors.fg())),
            ]));
        }
        if self.chat.is_busy() {
            lines.push(Line::from(Span::styled(
                "advisor is thinking...",
                Style::default().fg(colors.text_dim()),
            )));
        }
        if lines.is_empty() {
            lines.push(Line::from(Span::styled(
                "Ask how to improve your scores.",
                Style::default().fg(colors.text_dim()),
            )));
        }

        // Keep the tail of the transcript in view.
        let visible = layout[0].height as usize;
        let scroll = lines.len().saturating_sub(visible) as u16;
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(layout[0], buf);

        let prompt_style = if self.chat.is_busy() {
            Style::default().fg(colors.text_dim())
        } else {
            Style::default().fg(colors.fg())
        };
        let (before, cursor, after) = self.input.render_parts();
        let mut spans = vec![
            Span::styled("> ", Style::default().fg(colors.accent())),
            Span::styled(before.to_string(), prompt_style),
        ];
        if self.focused {
            spans.push(Span::styled(
                cursor.map(String::from).unwrap_or_else(|| " ".to_string()),
                Style::default().fg(colors.bg()).bg(colors.fg()),
            ));
        } else if let Some(ch) = cursor {
            spans.push(Span::styled(ch.to_string(), prompt_style));
        }
        spans.push(Span::styled(after.to_string(), prompt_style));
        Paragraph::new(Line::from(spans)).render(layout[1], buf);
    }
}

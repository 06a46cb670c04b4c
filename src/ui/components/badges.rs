use std::collections::BTreeSet;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::engine::metrics::BadgeId;
use crate::ui::theme::Theme;

/// One row per badge, earned ones highlighted. Badge state is recomputed
/// from the history by the caller, never stored.
pub struct BadgeRow<'a> {
    pub earned: &'a BTreeSet<BadgeId>,
    pub theme: &'a Theme,
}

impl<'a> BadgeRow<'a> {
    pub fn new(earned: &'a BTreeSet<BadgeId>, theme: &'a Theme) -> Self {
        Self { earned, theme }
    }
}

impl Widget for BadgeRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Badges ")
            .border_style(Style::default().fg(colors.border()));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = BadgeId::ALL
            .iter()
            .map(|badge| {
                let earned = self.earned.contains(badge);
                let marker = if earned { "✓" } else { "·" };
                let style = if earned {
                    Style::default()
                        .fg(colors.success())
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors.text_dim())
                };
                Line::from(Span::styled(
                    format!(" {marker} {}", badge.label()),
                    style,
                ))
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

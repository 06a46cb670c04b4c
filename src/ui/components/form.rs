use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::predict::form::{FieldId, PredictForm};
use crate::ui::theme::Theme;

/// The prediction input form. Categorical fields show `< value >` and cycle
/// with left/right; score fields take typed digits. Validation errors
/// render inline under the field they belong to.
pub struct FormView<'a> {
    pub form: &'a PredictForm,
    pub busy: bool,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" New Prediction ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut constraints: Vec<Constraint> =
            FieldId::ALL.iter().map(|_| Constraint::Length(2)).collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(1));
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, field) in FieldId::ALL.iter().enumerate() {
            let is_selected = i == self.form.selected;
            let indicator = if is_selected { " > " } else { "   " };
            let value = self.form.value(*field);

            let value_text = if field.is_score() {
                if value.is_empty() && is_selected {
                    "_".to_string()
                } else {
                    value.to_string()
                }
            } else if value.is_empty() {
                "< select >".to_string()
            } else {
                format!("< {value} >")
            };

            let label_style = Style::default()
                .fg(if is_selected { colors.accent() } else { colors.fg() })
                .add_modifier(if is_selected {
                    Modifier::BOLD
                } else {
                    Modifier::empty()
                });

            let mut spans = vec![
                Span::styled(format!("{indicator}{:<20}", field.label()), label_style),
                Span::styled(value_text, Style::default().fg(colors.fg())),
            ];
            if let Some(error) = self.form.error(*field) {
                spans.push(Span::styled(
                    format!("  {error}"),
                    Style::default().fg(colors.error()),
                ));
            }
            Paragraph::new(Line::from(spans)).render(layout[i], buf);
        }

        let status = if self.busy {
            Line::from(Span::styled(
                " Predicting...",
                Style::default().fg(colors.accent()),
            ))
        } else if let Some(error) = self.error {
            Line::from(Span::styled(
                format!(" {error}"),
                Style::default().fg(colors.error()),
            ))
        } else {
            Line::from(Span::styled(
                " [Enter] Submit  [←/→] Change  [↑/↓] Field  [r] Reset  [Esc] Back",
                Style::default().fg(colors.text_dim()),
            ))
        };
        Paragraph::new(status).render(layout[FieldId::ALL.len() + 1], buf);
    }
}

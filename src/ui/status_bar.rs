use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::QueueCounts;

pub struct StatusBar<'a> {
    pub hints: &'a [(String, &'static str)],
    pub message: Option<&'a str>,
    pub counts: QueueCounts,
}

impl<'a> Widget for StatusBar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let summary = format!("{} due  {} new ", self.counts.due, self.counts.new);
        let summary_width = (summary.chars().count() as u16).min(area.width);
        let summary_area = Rect::new(
            area.x + area.width - summary_width,
            area.y,
            summary_width,
            area.height.min(1),
        );

        if let Some(msg) = self.message {
            let line = Line::from(Span::styled(
                format!(" {} ", msg),
                Style::default().fg(Color::Yellow),
            ));
            line.render(area, buf);
        } else {
            let mut spans = vec![Span::raw(" ")];
            for (i, (key, action)) in self.hints.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled("  ", Style::default().fg(Color::DarkGray)));
                }
                spans.push(Span::styled(
                    format!("[{}]", key),
                    Style::default().fg(Color::Cyan),
                ));
                spans.push(Span::styled(
                    action.to_string(),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::DIM),
                ));
            }
            Line::from(spans).render(area, buf);
        }

        Line::styled(summary, Style::default().fg(Color::Gray)).render(summary_area, buf);
    }
}

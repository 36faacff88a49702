use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

pub struct Header<'a> {
    pub snapshot_name: &'a str,
    pub date: &'a str,
}

impl<'a> Widget for Header<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bg = Style::default().bg(Color::DarkGray);
        let title = Span::styled(
            " review-queue ",
            bg.fg(Color::White).add_modifier(Modifier::BOLD),
        );
        let snapshot = Span::styled(format!(" [{}] ", self.snapshot_name), bg.fg(Color::Cyan));
        let date = Span::styled(format!("{} ", self.date), bg.fg(Color::Gray));

        let used = title.width() + snapshot.width() + date.width();
        let spacer = Span::styled(
            " ".repeat((area.width as usize).saturating_sub(used)),
            bg,
        );

        Line::from(vec![title, snapshot, spacer, date]).render(area, buf);
    }
}

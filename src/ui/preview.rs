use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Paragraph, Widget, Wrap};

use crate::app::NotePreview;

pub struct Preview<'a> {
    pub note: Option<&'a NotePreview>,
}

impl<'a> Widget for Preview<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.note {
            Some(note) => format!(" {} ", note.path),
            None => " Note ".to_string(),
        };
        let block = WidgetBlock::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);

        let paragraph = match self.note {
            Some(note) => Paragraph::new(note.content.as_str()),
            None => Paragraph::new(Line::styled(
                "Select a note and press Enter to open it",
                Style::default().fg(Color::DarkGray),
            )),
        };
        paragraph
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf.cell(pos).unwrap().symbol().to_string())
            .collect()
    }

    #[test]
    fn shows_note_path_and_content() {
        let note = NotePreview {
            path: "notes/ohm.md".into(),
            content: "V = I * R".into(),
        };
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        Preview { note: Some(&note) }.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("notes/ohm.md"));
        assert!(text.contains("V = I * R"));
    }

    #[test]
    fn shows_placeholder_without_note() {
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        Preview { note: None }.render(area, &mut buf);
        assert!(buffer_text(&buf).contains("press Enter"));
    }
}

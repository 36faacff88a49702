pub mod header;
pub mod preview;
pub mod sidebar;
pub mod status_bar;

use chrono::Utc;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Clear};
use ratatui::Frame;

use crate::app::{AppState, ContextMenuState, MenuEntry};
use crate::error::ErrorPopup;

use header::Header;
use preview::Preview;
use sidebar::Sidebar;
use status_bar::StatusBar;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub sidebar: Rect,
    pub preview: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect, sidebar_width_percent: u8) -> AppLayout {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let pct = sidebar_width_percent.min(100) as u16;
    let [sidebar, preview] =
        Layout::horizontal([Constraint::Percentage(pct), Constraint::Percentage(100 - pct)])
            .areas(body);

    AppLayout {
        header,
        sidebar,
        preview,
        status,
    }
}

pub fn render(frame: &mut Frame, state: &AppState) {
    let areas = layout(frame.area(), state.sidebar_width_percent);

    let header = Header {
        snapshot_name: &state.snapshot_name,
        date: &state.date_display,
    };
    frame.render_widget(header, areas.header);

    let sidebar = Sidebar {
        rows: &state.rows,
        selected: state.selected,
        loading: state.loading,
    };
    frame.render_widget(sidebar, areas.sidebar);

    frame.render_widget(
        Preview {
            note: state.preview.as_ref(),
        },
        areas.preview,
    );

    if let Some(menu) = &state.context_menu {
        render_context_menu(frame, menu, frame.area());
    }

    if state.show_help {
        render_help_popup(frame, &state.help_lines, frame.area());
    }

    if let Some(err) = &state.error_popup {
        render_error_popup(frame, err, frame.area());
    }

    let status = StatusBar {
        hints: &state.hints,
        message: state.status_message.as_deref(),
        counts: state.queue_counts(Utc::now().timestamp_millis()),
    };
    frame.render_widget(status, areas.status);
}

/// Menu rectangle anchored at the menu position, pushed back inside `bounds`.
pub fn context_menu_area(menu: &ContextMenuState, bounds: Rect) -> Rect {
    let longest = MenuEntry::ALL
        .iter()
        .map(|e| e.label().len())
        .max()
        .unwrap_or(0);
    let width = ((longest + 4) as u16)
        .max(menu.item.name.chars().count().min(30) as u16 + 4)
        .min(bounds.width);
    let height = (MenuEntry::ALL.len() as u16 + 2).min(bounds.height);

    let max_x = bounds.x + bounds.width - width;
    let max_y = bounds.y + bounds.height - height;
    Rect::new(
        menu.at.x.clamp(bounds.x, max_x),
        menu.at.y.clamp(bounds.y, max_y),
        width,
        height,
    )
}

fn render_context_menu(frame: &mut Frame, menu: &ContextMenuState, area: Rect) {
    let popup_area = context_menu_area(menu, area);
    frame.render_widget(Clear, popup_area);

    let title: String = menu.item.name.chars().take(30).collect();
    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", title));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    for (i, entry) in MenuEntry::ALL.iter().enumerate() {
        if i as u16 >= inner.height {
            break;
        }
        let style = if i == menu.selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Gray)
        };
        let width = inner.width as usize;
        let label: String = entry.label().chars().take(width).collect();
        let padded = format!("{:<width$}", label, width = width);
        let line_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        frame.render_widget(Line::from(Span::styled(padded, style)), line_area);
    }
}

fn render_help_popup(frame: &mut Frame, lines: &[(String, &str)], area: Rect) {
    let popup_height = (lines.len() + 3).min(area.height as usize) as u16; // +2 borders +1 footer
    let popup_width = (area.width * 60 / 100).max(30).min(area.width);
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);
    frame.render_widget(Clear, popup_area);

    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Help ");

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    for (i, (key_str, action_name)) in lines.iter().enumerate() {
        if i as u16 >= inner.height.saturating_sub(1) {
            break;
        }
        let line = Line::from(vec![
            Span::styled(format!("{:>12}", key_str), Style::default().fg(Color::Yellow)),
            Span::raw("  "),
            Span::styled(*action_name, Style::default().fg(Color::White)),
        ]);
        let line_area = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
        frame.render_widget(line, line_area);
    }

    if inner.height > 0 {
        let footer = Line::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        );
        let footer_area = Rect::new(inner.x, inner.y + inner.height - 1, inner.width, 1);
        frame.render_widget(footer, footer_area);
    }
}

fn render_error_popup(frame: &mut Frame, popup: &ErrorPopup, area: Rect) {
    let popup_width = (area.width * 50 / 100).max(30).min(area.width);
    let inner_width = popup_width.saturating_sub(2) as usize;

    let msg_lines = wrap_text(&popup.message, inner_width);
    // blank, message, blank, hint, blank, footer
    let content_height = 1 + msg_lines.len() + 1 + 1 + 1 + 1;
    let popup_height = (content_height + 2).min(area.height as usize) as u16;

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(x, y, popup_width, popup_height);
    frame.render_widget(Clear, popup_area);

    let block = WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red))
        .title(format!(" ! {} ", popup.title));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let mut row: u16 = 1;
    for line_text in &msg_lines {
        if row >= inner.height.saturating_sub(1) {
            break;
        }
        let line = Line::styled(line_text.clone(), Style::default().fg(Color::White));
        frame.render_widget(line, Rect::new(inner.x, inner.y + row, inner.width, 1));
        row += 1;
    }

    row += 1;
    if row < inner.height.saturating_sub(1) {
        let hint = Line::styled(popup.hint.clone(), Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, Rect::new(inner.x, inner.y + row, inner.width, 1));
        row += 1;
    }

    row += 1;
    if row < inner.height {
        let footer = Line::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        );
        frame.render_widget(footer, Rect::new(inner.x, inner.y + row, inner.width, 1));
    }
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_helpers::*;
    use crate::deck::Item;
    use crate::error::ErrorInfo;
    use crate::queue::MenuPosition;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(state: &AppState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, state)).unwrap();
        let buf = terminal.backend().buffer().clone();
        (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn layout_splits_sidebar_by_percent() {
        let areas = layout(Rect::new(0, 0, 100, 20), 40);
        assert_eq!(areas.header, Rect::new(0, 0, 100, 1));
        assert_eq!(areas.status, Rect::new(0, 19, 100, 1));
        assert_eq!(areas.sidebar.width, 40);
        assert_eq!(areas.preview.x, 40);
        assert_eq!(areas.preview.width, 60);
        assert_eq!(areas.sidebar.height, 18);
    }

    #[test]
    fn render_shows_decks_and_header() {
        let state = test_state();
        let screen = draw(&state, 80, 12);
        assert!(screen.contains("review-queue"));
        assert!(screen.contains("▸ Default"));
        assert!(screen.contains("▸ Physics"));
    }

    #[test]
    fn render_shows_context_menu_entries() {
        let mut state = test_state();
        state.context_menu = Some(ContextMenuState::new(
            "Default",
            Item::from_path("notes/ohm.md"),
            MenuPosition { x: 3, y: 3 },
        ));
        let screen = draw(&state, 80, 12);
        assert!(screen.contains("Open"));
        assert!(screen.contains("Show path"));
        assert!(screen.contains("Close"));
    }

    #[test]
    fn render_shows_error_popup() {
        let mut state = test_state();
        state.error_popup = Some(ErrorPopup::from_error_info(&ErrorInfo::Snapshot(
            "queue.json: not found".into(),
        )));
        let screen = draw(&state, 80, 16);
        assert!(screen.contains("Queue Unavailable"));
        assert!(screen.contains("queue.json: not found"));
    }

    #[test]
    fn render_shows_help_lines() {
        let mut state = test_state();
        state.help_lines = vec![("r".into(), "reload")];
        state.show_help = true;
        let screen = draw(&state, 80, 12);
        assert!(screen.contains("reload"));
        assert!(screen.contains("Press any key to close"));
    }

    #[test]
    fn context_menu_stays_on_screen() {
        let menu = ContextMenuState::new(
            "Default",
            Item::from_path("notes/ohm.md"),
            MenuPosition { x: 78, y: 11 },
        );
        let bounds = Rect::new(0, 0, 80, 12);
        let area = context_menu_area(&menu, bounds);
        assert_eq!(area.height, 5);
        assert!(area.right() <= bounds.right());
        assert!(area.bottom() <= bounds.bottom());
    }

    #[test]
    fn wrap_text_breaks_on_words() {
        assert_eq!(
            wrap_text("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}

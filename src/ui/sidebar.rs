use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block as WidgetBlock, BorderType, Borders, Widget};

use crate::queue::MenuPosition;
use crate::tree::{BranchKind, RowTarget, TreeRow};

const INDENT: usize = 2;

/// Review queue tree, one line per visible row.
pub struct Sidebar<'a> {
    pub rows: &'a [TreeRow],
    pub selected: usize,
    pub loading: bool,
}

fn frame_block() -> WidgetBlock<'static> {
    WidgetBlock::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Review ")
}

/// Area inside the sidebar border where rows are drawn.
pub fn tree_area(sidebar: Rect) -> Rect {
    frame_block().inner(sidebar)
}

/// First row shown so that `selected` stays on screen.
pub fn scroll_offset(selected: usize, height: u16) -> usize {
    match height as usize {
        0 => 0,
        h => selected.saturating_sub(h - 1),
    }
}

/// Row index under a terminal cell, if any.
pub fn row_at(tree: Rect, selected: usize, row_count: usize, x: u16, y: u16) -> Option<usize> {
    if !tree.contains(Position { x, y }) {
        return None;
    }
    let index = scroll_offset(selected, tree.height) + (y - tree.y) as usize;
    (index < row_count).then_some(index)
}

/// Where a context menu for the selected row should appear: just below its text.
pub fn row_anchor(tree: Rect, selected: usize, depth: usize) -> MenuPosition {
    let line = selected - scroll_offset(selected, tree.height);
    let x = tree.x as usize + depth * INDENT + INDENT;
    let y = tree.y as usize + line + 1;
    MenuPosition {
        x: x.min(u16::MAX as usize) as u16,
        y: y.min(u16::MAX as usize) as u16,
    }
}

fn row_line(row: &TreeRow, width: usize, is_selected: bool) -> Line<'static> {
    let indent = " ".repeat(row.depth * INDENT);
    let (marker, style) = match &row.target {
        RowTarget::Branch {
            kind, collapsed, ..
        } => {
            let marker = if *collapsed { "▸ " } else { "▾ " };
            let style = match kind {
                BranchKind::Deck => Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
                BranchKind::New => Style::default().fg(Color::Yellow),
                BranchKind::Due { days_ahead, .. } if *days_ahead < 0 => {
                    Style::default().fg(Color::Red)
                }
                BranchKind::Due { .. } => Style::default().fg(Color::White),
            };
            (marker, style)
        }
        RowTarget::Leaf { active: true, .. } => (
            "● ",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        RowTarget::Leaf { .. } => ("  ", Style::default().fg(Color::Gray)),
    };

    let text = format!("{}{}{}", indent, marker, row.text());
    let display: String = text.chars().take(width).collect();
    let padding = width.saturating_sub(display.chars().count());
    let padded = format!("{}{}", display, " ".repeat(padding));

    let style = if is_selected {
        style.bg(Color::DarkGray)
    } else {
        style
    };
    Line::from(Span::styled(padded, style))
}

impl<'a> Widget for Sidebar<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = frame_block();
        let inner = block.inner(area);
        block.render(area, buf);

        if self.rows.is_empty() {
            let msg = if self.loading {
                "Loading..."
            } else {
                "Nothing to review"
            };
            let line = Line::styled(msg, Style::default().fg(Color::DarkGray));
            line.render(Rect::new(inner.x, inner.y, inner.width, 1.min(inner.height)), buf);
            return;
        }

        let offset = scroll_offset(self.selected, inner.height);
        for (i, row) in self
            .rows
            .iter()
            .skip(offset)
            .take(inner.height as usize)
            .enumerate()
        {
            let line = row_line(row, inner.width as usize, offset + i == self.selected);
            line.render(Rect::new(inner.x, inner.y + i as u16, inner.width, 1), buf);
        }
    }
}

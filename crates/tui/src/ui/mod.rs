use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::app::{App, EntryKind};
use crate::strings::{build_status_line, build_stick_label, INPUT_HINT, TITLE_INPUT, TITLE_LOG};
use crate::theme::THEME;

pub fn draw(f: &mut Frame, app: &mut App) {
    // Layout: game log on top, one status row, single-line input at the bottom
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());
    draw_log(f, chunks[0], app);
    draw_status(f, chunks[1], app);
    draw_input(f, chunks[2], app);
}

fn entry_style(kind: EntryKind) -> Style {
    match kind {
        EntryKind::Chat => Style::default().fg(THEME.chat_fg),
        EntryKind::Server => Style::default()
            .fg(THEME.server_fg)
            .add_modifier(Modifier::BOLD),
        EntryKind::Client => Style::default().fg(THEME.client_fg),
    }
}

fn draw_log(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .title(TITLE_LOG)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.log_border));

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    app.ensure_wrapped(inner_width);

    let viewport = (inner_height as usize).max(1);
    app.log_viewport = viewport as u16;
    let max_scroll = app.total_lines.saturating_sub(viewport);
    if app.stick_to_bottom {
        app.log_scroll = 0;
    }
    let scroll = (app.log_scroll as usize).min(max_scroll);
    app.log_scroll = scroll as u16;
    let start = max_scroll - scroll;

    let mut vis_lines: Vec<Line> = Vec::new();
    let mut skip = start;
    let mut remaining = viewport;
    'entries: for cached in &app.wrap_cache {
        let style = entry_style(cached.kind);
        for line in &cached.lines {
            if skip > 0 {
                skip -= 1;
                continue;
            }
            if remaining == 0 {
                break 'entries;
            }
            vis_lines.push(Line::from(Span::styled(line.clone(), style)));
            remaining -= 1;
        }
    }

    let para = Paragraph::new(vis_lines).block(block);
    f.render_widget(para, area);

    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if app.total_lines > viewport {
        let mut sb_state = ScrollbarState::new(app.total_lines).position(start);
        let sb = Scrollbar::default().orientation(ScrollbarOrientation::VerticalRight);
        f.render_stateful_widget(sb, inner, &mut sb_state);
    }
}

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
    let stick = build_stick_label(app.log_scroll);
    let status = build_status_line(
        &stick,
        app.character.as_deref(),
        app.chat.history().len(),
        area.width,
    );
    let para = Paragraph::new(Line::from(Span::styled(
        status,
        Style::default().fg(THEME.hint_fg),
    )));
    f.render_widget(para, area);
}

fn draw_input(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(TITLE_INPUT)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(THEME.input_border));
    let inner_width = area.width.saturating_sub(2);

    let graphemes: Vec<&str> = app.chat.text().graphemes(true).collect();
    let upto = app.chat.cursor().min(graphemes.len());
    let col = UnicodeWidthStr::width(graphemes[..upto].concat().as_str()) as u16;
    // keep the cursor visible: scroll the line horizontally once it overflows
    let offset_x = col.saturating_sub(inner_width.saturating_sub(1));

    let para = if app.chat.text().is_empty() {
        let hint = Line::from(Span::styled(
            INPUT_HINT,
            Style::default().fg(THEME.hint_fg),
        ));
        Paragraph::new(hint).block(block)
    } else {
        Paragraph::new(app.chat.text().to_string())
            .block(block)
            .scroll((0, offset_x))
    };
    f.render_widget(para, area);

    let cursor_x = area.x + 1 + (col - offset_x);
    let cursor_y = area.y + 1;
    f.set_cursor_position(Position::new(cursor_x, cursor_y));
}

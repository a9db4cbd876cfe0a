//! UI rendering with ratatui.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use ellipsize::{Notification, PresenterState, Segment, View};

use crate::app::App;
use crate::text::wrap_styled;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Title bar
        Constraint::Min(3),    // Ellipsis box
        Constraint::Length(9), // Pipeline details
        Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

    render_title_bar(frame, chunks[0], app);
    render_ellipsis(frame, chunks[1], app);
    render_details(frame, chunks[2], app);
    render_status_bar(frame, chunks[3], app);

    // Render input overlay if in input mode
    if app.is_input_mode() {
        render_input_overlay(frame, app);
    }

    // Render help modal on top if visible
    if app.show_help {
        render_help(frame);
    }
}

/// Render the title bar.
fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.ellipsis.config();
    let title = format!(
        " ellip - {} / {} row(s) / {} cols ",
        config.direction, config.rows, app.surface.columns
    );
    let title_bar = Paragraph::new(title).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(title_bar, area);
}

/// Build styled segments for a view: plain text and an underlined affix.
fn styled_segments<'a>(view: &View<'a>) -> Vec<(&'a str, Style)> {
    view.segments
        .iter()
        .map(|segment| match *segment {
            Segment::Text(text) => (text, Style::default()),
            Segment::Affix { label, .. } => (
                label,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
            ),
        })
        .collect()
}

/// Render the ellipsis inside a box exactly as wide as the surface.
fn render_ellipsis(frame: &mut Frame, area: Rect, app: &App) {
    let view = app.ellipsis.view();
    let columns = app.surface.columns;
    let lines = wrap_styled(&styled_segments(&view), columns);

    let (title, color) = match view.state {
        PresenterState::NotExceeded => (" Full ", Color::Green),
        PresenterState::Collapsed => (" Collapsed ", Color::Yellow),
        PresenterState::Expanded => (" Expanded ", Color::Magenta),
    };

    let box_area = ellipsis_area(area, columns, lines.len());

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(title),
    );
    frame.render_widget(paragraph, box_area);
}

/// Bordered box around `columns` × `rows` cells, clipped to `area`.
fn ellipsis_area(area: Rect, columns: usize, rows: usize) -> Rect {
    let fit = |cells: usize| u16::try_from(cells).unwrap_or(u16::MAX).saturating_add(2);
    let width = fit(columns).min(area.width);
    let height = fit(rows).min(area.height);
    Rect::new(area.x.saturating_add(1), area.y.saturating_add(1), width, height).intersection(area)
}

/// Render pipeline state and recent notifications.
fn render_details(frame: &mut Frame, area: Rect, app: &App) {
    let ellipsis = &app.ellipsis;
    let plan = ellipsis.plan();
    let display = ellipsis.display();
    let label = Style::default().bold();
    let dim = Style::default().fg(Color::DarkGray);

    let status = if app.is_busy() {
        Span::styled("measuring...", Style::default().fg(Color::Yellow))
    } else if app.surface.attached {
        Span::styled("settled", Style::default().fg(Color::Green))
    } else {
        Span::styled("detached", Style::default().fg(Color::Red))
    };

    let mut lines = vec![
        Line::from(vec![Span::styled("Cycle:      ", label), status]),
        Line::from(vec![
            Span::styled("Generation: ", label),
            Span::raw(ellipsis.generation().to_string()),
            Span::styled("  rounds ", dim),
            Span::raw(ellipsis.rounds().to_string()),
            Span::styled("  measurements ", dim),
            Span::raw(app.surface.measurements.to_string()),
        ]),
        Line::from(vec![
            Span::styled("State:      ", label),
            Span::raw(format!(
                "exceeded={} expanded={}",
                display.exceeded, display.expanded
            )),
        ]),
        Line::from(vec![
            Span::styled("Leading:    ", label),
            Span::raw(format!("{} chars", plan.leading.chars().count())),
            Span::styled("  tailing ", dim),
            Span::raw(format!("{} chars", plan.tailing.chars().count())),
        ]),
        Line::styled("─── Events ───", dim),
    ];

    let events: Vec<Span> = app
        .notifications
        .iter()
        .rev()
        .map(|notification| match notification {
            Notification::Click => Span::styled("click ", Style::default().fg(Color::Cyan)),
            Notification::Change(toggle) => {
                Span::styled(format!("{toggle} "), Style::default().fg(Color::Magenta))
            }
        })
        .collect();
    if events.is_empty() {
        lines.push(Line::styled("(none yet)", dim.italic()));
    } else {
        lines.push(Line::from(events));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::TOP).title(" Pipeline "));
    frame.render_widget(paragraph, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let toggle_hint = if app.has_affix() { "Enter: toggle  " } else { "" };
    let help = format!(
        " {toggle_hint}d: direction  j/k: rows  h/l: width  e: edit  c: click  q: quit  ?: help "
    );
    let status_bar =
        Paragraph::new(help).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(status_bar, area);
}

fn help_line(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(keys, Style::default().fg(Color::Yellow)),
        Span::raw(action),
    ])
}

/// Render the help modal.
fn render_help(frame: &mut Frame) {
    let area = centered_rect(frame.area(), 50, 80);

    // Clear the area first to avoid background bleed-through
    frame.render_widget(Clear, area);

    let help_lines = vec![
        Line::styled(
            "─── Keyboard Shortcuts ───",
            Style::default().fg(Color::Cyan).bold(),
        ),
        Line::raw(""),
        Line::styled("  Truncation", Style::default().bold()),
        help_line("  d / Tab    ", "Cycle direction (start, end, middle)"),
        help_line("  j / ↓      ", "One more row"),
        help_line("  k / ↑      ", "One row fewer"),
        help_line("  l / →      ", "Wider box"),
        help_line("  h / ←      ", "Narrower box"),
        help_line("  r          ", "Measure again"),
        help_line("  a          ", "Attach / detach the surface"),
        Line::raw(""),
        Line::styled("  Editing", Style::default().bold()),
        help_line("  e          ", "Edit content"),
        help_line("  s          ", "Edit symbol"),
        help_line("  x          ", "Edit expand label"),
        Line::raw(""),
        Line::styled("  General", Style::default().bold()),
        help_line("  Enter / ␣  ", "Expand / collapse"),
        help_line("  c          ", "Click the text"),
        help_line("  q / Esc    ", "Quit"),
        help_line("  ?          ", "Toggle this help"),
    ];

    let help_widget = Paragraph::new(help_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Help "),
    );

    frame.render_widget(help_widget, area);
}

/// Calculate a centered rectangle with given percentage of width and height.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Render the input overlay for text entry.
fn render_input_overlay(frame: &mut Frame, app: &App) {
    let Some(mode) = &app.input_mode else {
        return;
    };

    // Calculate centered area for input box
    let area = frame.area();
    let width = (area.width * 60 / 100).max(40).min(area.width.saturating_sub(4));
    let height = 3;
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let input_area = Rect::new(x, y, width, height);

    // Clear the area behind the input box
    frame.render_widget(Clear, input_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(mode.title())
        .title_style(Style::default().fg(Color::Cyan).bold());

    let inner_area = block.inner(input_area);
    frame.render_widget(block, input_area);

    // Render the input text
    let input_value = app.input.value();
    let display_text = if input_value.is_empty() {
        Span::styled(mode.placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(input_value)
    };

    // Calculate scroll for long input
    let scroll = app.input.visual_scroll(inner_area.width as usize);
    let input_paragraph = Paragraph::new(Line::from(display_text)).scroll((0, scroll as u16));
    frame.render_widget(input_paragraph, inner_area);

    let cursor_x = app.input.visual_cursor().saturating_sub(scroll);
    frame.set_cursor_position(Position::new(inner_area.x + cursor_x as u16, inner_area.y));
}

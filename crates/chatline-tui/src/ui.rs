use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
};
use chatline_core::display::{input_window, sanitize_line};
use chatline_core::{ChatRole, LineKind};
use crate::app::{App, FocusPane};

const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";
const SEND_WIDTH: u16 = 10;

fn role_color(role: ChatRole) -> Color {
    match role {
        ChatRole::User => Color::Cyan,
        ChatRole::Assistant => Color::Yellow,
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, transcript, input row, footer
    let [header_area, transcript_area, input_row, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_transcript(app, frame, transcript_area);
    render_input_row(app, frame, input_row);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" chatline ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(sanitize_line(&app.server_url), Style::default().fg(Color::Gray)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_transcript(app: &mut App, frame: &mut Frame, area: Rect) {
    app.transcript_area = Some(area);

    // Inner size minus borders
    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2);
    app.controller.transcript_mut().set_viewport(inner_width, inner_height);

    let border_color = if app.focus == FocusPane::Transcript {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(" Chat ");

    let transcript = app.controller.transcript();
    let text = if transcript.is_empty() {
        Text::from(Span::styled(GREETING, Style::default().fg(Color::DarkGray)))
    } else {
        // Rows are already wrapped to the pane width; text goes in as raw spans
        let lines: Vec<Line> = transcript
            .lines(inner_width)
            .into_iter()
            .map(|row| match row.kind {
                LineKind::Header => Line::from(Span::styled(
                    row.text,
                    Style::default().fg(role_color(row.role)).add_modifier(Modifier::BOLD),
                )),
                LineKind::Body => Line::from(Span::raw(row.text)),
                LineKind::Spacer => Line::default(),
            })
            .collect();
        Text::from(lines)
    };

    let chat = Paragraph::new(text)
        .block(block)
        .scroll((transcript.scroll(), 0));

    frame.render_widget(chat, area);
}

fn render_input_row(app: &mut App, frame: &mut Frame, area: Rect) {
    let [input_area, send_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(SEND_WIDTH),
    ])
    .areas(area);

    app.input_area = Some(input_area);
    app.send_area = Some(send_area);

    let input_focused = app.focus == FocusPane::Input;
    let input_border_color = if input_focused { Color::Yellow } else { Color::DarkGray };

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_border_color))
        .title(" Message ");

    // Scrolled by columns so wide chars and made-visible controls keep the
    // cursor inside the box
    let inner_width = input_area.width.saturating_sub(2) as usize;
    let field = app.controller.input();
    let (visible_text, cursor_x) = input_window(field.value(), field.cursor(), inner_width);

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);
    frame.render_widget(input, input_area);

    let send_style = if field.value().trim().is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Black).bg(Color::Green).bold()
    };
    let send = Paragraph::new("Send")
        .alignment(Alignment::Center)
        .style(send_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(send, send_area);

    if input_focused {
        frame.set_cursor_position((input_area.x + cursor_x + 1, input_area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_text, hints) = match app.focus {
        FocusPane::Input => (" INPUT ", " Enter send  Tab/Esc transcript  PgUp/PgDn scroll  Ctrl-C quit "),
        FocusPane::Transcript => (" CHAT ", " j/k scroll  g/G top/bottom  i input  q quit "),
    };
    let mode_style = match app.focus {
        FocusPane::Input => Style::default().bg(Color::Yellow).fg(Color::Black),
        FocusPane::Transcript => Style::default().bg(Color::Blue).fg(Color::White),
    };

    let mut spans = vec![
        Span::styled(mode_text, mode_style),
        Span::styled(hints, Style::default().fg(Color::DarkGray)),
    ];

    let in_flight = app.controller.in_flight();
    if in_flight > 0 {
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        let status = if in_flight > 1 {
            format!(" Thinking{} ({} pending)", dots, in_flight)
        } else {
            format!(" Thinking{}", dots)
        };
        spans.push(Span::styled(
            status,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

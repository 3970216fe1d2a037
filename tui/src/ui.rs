use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use crate::app::App;
use pipegeo_core::format_distance;

pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(1), // Header
                Constraint::Length(3), // Filter bar
                Constraint::Min(5),    // Table + measurement panel
                Constraint::Length(1), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_filter_bar(f, app, chunks[1]);

    if app.session.is_measuring() {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(40), Constraint::Length(42)].as_ref())
            .split(chunks[2]);
        draw_table(f, app, body[0]);
        draw_measurement(f, app, body[1]);
    } else {
        draw_table(f, app, chunks[2]);
    }

    let status = Paragraph::new(app.status.as_str())
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_widget(status, chunks[3]);
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let mode = if app.session.is_measuring() {
        Span::styled(
            " MEASURING ",
            Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::raw("")
    };
    let header = Line::from(vec![
        Span::styled("pipegeo", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            " | {} pipes from {} ",
            app.session.pipes().len(),
            app.source
        )),
        mode,
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn draw_filter_bar(f: &mut Frame, app: &App, area: Rect) {
    let active = app.session.active_tag();
    let mut spans = vec![tag_span("all", active.is_none())];
    for tag in app.session.distinct_tags() {
        spans.push(Span::raw(" "));
        let on = active == Some(tag.as_str());
        spans.push(tag_span(&tag, on));
    }

    let title = format!(
        "Filter (t/T cycle, a all) | {} shown",
        app.session.visible_pipes().len()
    );
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(bar, area);
}

fn tag_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    Span::styled(format!("[{}]", label), style)
}

fn draw_table(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .session
        .visible_pipes()
        .into_iter()
        .map(|pipe| {
            let marker = if app.session.is_selected(pipe.id) {
                "*"
            } else {
                " "
            };
            let swatch = parse_hex_color(&pipe.color)
                .map(|c| Style::default().fg(c))
                .unwrap_or_default();
            Row::new(vec![
                Cell::from(marker),
                Cell::from(pipe.name.clone()),
                Cell::from(pipe.start_point.to_string()),
                Cell::from(pipe.end_point.to_string()),
                Cell::from(Span::styled(format!("■ {}", pipe.color), swatch)),
                Cell::from(pipe.tags.join(", ")),
            ])
        })
        .collect();

    let header = Row::new(vec!["", "Name", "Start", "End", "Color", "Tags"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let widths = [
        Constraint::Length(1),
        Constraint::Min(18),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(10),
        Constraint::Min(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Pipes"))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_measurement(f: &mut Frame, app: &App, area: Rect) {
    let lines = measurement_lines(app);
    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Measurement"));
    f.render_widget(panel, area);
}

fn measurement_lines(app: &App) -> Vec<Line<'static>> {
    let report = app.session.measurement();
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(format!(
        "Selected: {} pipe{}",
        report.lengths.len(),
        if report.lengths.len() == 1 { "" } else { "s" }
    ))];

    if report.is_empty() {
        lines.push(Line::from(Span::styled(
            "Press Space on pipes to select them",
            Style::default().fg(Color::DarkGray),
        )));
        return lines;
    }

    lines.push(Line::from(""));
    for entry in &report.lengths {
        lines.push(Line::from(format!(
            "{}: {}",
            entry.name,
            format_distance(entry.length)
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Total length: ", bold),
        Span::raw(format_distance(report.total_length)),
    ]));

    if report.lengths.len() >= 2 {
        let route = &report.route;
        lines.push(Line::from(vec![
            Span::styled("Connected route: ", bold),
            Span::raw(format_distance(route.total_route)),
        ]));
        lines.push(Line::from(Span::styled(
            format!("(includes {} of gaps)", format_distance(route.gap_length)),
            Style::default().fg(Color::DarkGray),
        )));
        let order: Vec<String> = route
            .legs
            .iter()
            .map(|leg| {
                if leg.reversed {
                    format!("{}r", leg.id)
                } else {
                    leg.id.to_string()
                }
            })
            .collect();
        lines.push(Line::from(format!("Order: {}", order.join(" > "))));
    }

    lines
}

/// `#RRGGBB` to a terminal color.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

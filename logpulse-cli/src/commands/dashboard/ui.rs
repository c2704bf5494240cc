//! Dashboard rendering

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Paragraph, Row, Table, Wrap},
};

use logpulse_analyzer::{Analysis, ChartSeries};
use logpulse_core::types::HealthStatus;

use super::app::{DashboardApp, Focus};

/// Draw the login screen or the dashboard, depending on the session.
pub fn draw(frame: &mut Frame, app: &DashboardApp) {
    if app.session().is_authenticated() {
        draw_dashboard(frame, app);
    } else {
        draw_login(frame, app);
    }
}

fn draw_login(frame: &mut Frame, app: &DashboardApp) {
    let area = centered(frame.area(), 50, 10);
    let form = app.login_form();

    let field_style = |focus: Focus| {
        if form.focus == focus {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Username: ", field_style(Focus::Username)),
            Span::raw(form.username.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Password: ", field_style(Focus::Password)),
            Span::raw("*".repeat(form.password.chars().count())),
        ]),
        Line::from(""),
    ];
    if let Some(ref error) = form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab: switch field  Enter: submit  Esc: quit",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" logpulse Login ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_dashboard(frame: &mut Frame, app: &DashboardApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Length(6), // summary
            Constraint::Min(8),    // charts
            Constraint::Length(8), // recent errors
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.analysis() {
        Some(analysis) => {
            draw_summary(frame, analysis, chunks[1]);
            draw_charts(frame, analysis, chunks[2]);
            draw_recent_errors(frame, analysis, chunks[3]);
        }
        None => {
            let waiting = Paragraph::new("No data loaded. Press 'o' to open a log file.")
                .block(Block::default().borders(Borders::ALL).title(" Summary "));
            frame.render_widget(waiting, chunks[1]);
        }
    }
    draw_footer(frame, app, chunks[4]);
}

fn draw_header(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let filter = app.filter();
    let line = Line::from(vec![
        Span::raw(" User: "),
        Span::styled(
            app.session().user().unwrap_or("-"),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  Source: "),
        Span::raw(app.source_path().display().to_string()),
        Span::raw("  4xx: "),
        toggle_span(filter.include_4xx),
        Span::raw("  5xx: "),
        toggle_span(filter.include_5xx),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" logpulse Dashboard ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(header, area);
}

fn toggle_span(on: bool) -> Span<'static> {
    if on {
        Span::styled("on", Style::default().fg(Color::Green))
    } else {
        Span::styled("off", Style::default().fg(Color::DarkGray))
    }
}

fn draw_summary(frame: &mut Frame, analysis: &Analysis, area: Rect) {
    let stats = &analysis.stats;
    let lines = vec![
        Line::from(format!("  Total Requests : {}", stats.total_requests)),
        Line::from(format!(
            "  Total Errors   : {} ({} shown)",
            stats.total_errors, stats.filtered_errors
        )),
        Line::from(format!("  Invalid Lines  : {}", stats.invalid_lines)),
        Line::from(Span::styled(
            format!("  {}", analysis.health),
            Style::default()
                .fg(status_color(analysis.health.status))
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let summary = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Summary "));
    frame.render_widget(summary, area);
}

fn status_color(status: HealthStatus) -> Color {
    match status {
        HealthStatus::Healthy => Color::Green,
        HealthStatus::Warning => Color::Yellow,
        HealthStatus::Critical => Color::Red,
    }
}

fn draw_charts(frame: &mut Frame, analysis: &Analysis, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let stats = &analysis.stats;
    draw_bar_chart(frame, &ChartSeries::error_codes(stats), Color::Red, chunks[0]);
    draw_bar_chart(frame, &ChartSeries::top_ips(stats), Color::Magenta, chunks[1]);
    draw_bar_chart(frame, &ChartSeries::request_types(stats), Color::Blue, chunks[2]);
}

fn draw_bar_chart(frame: &mut Frame, series: &ChartSeries, color: Color, area: Rect) {
    let data: Vec<(&str, u64)> = series
        .bars
        .iter()
        .map(|bar| (bar.label.as_str(), bar.value))
        .collect();
    let label_width = series
        .bars
        .iter()
        .map(|bar| bar.label.chars().count())
        .max()
        .unwrap_or(3);
    let bar_width = u16::try_from(label_width.clamp(3, 15)).unwrap_or(3);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", series.title)),
        )
        .data(data.as_slice())
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(color))
        .value_style(Style::default().fg(Color::Black).bg(color));
    frame.render_widget(chart, area);
}

fn draw_recent_errors(frame: &mut Frame, analysis: &Analysis, area: Rect) {
    let rows: Vec<Row> = analysis
        .stats
        .recent_errors
        .iter()
        .map(|record| {
            Row::new(vec![
                record.timestamp.clone(),
                record.ip.clone(),
                record.request.clone(),
                record.error_code.to_string(),
            ])
            .style(Style::default().fg(if record.error_code >= 500 {
                Color::Red
            } else {
                Color::Yellow
            }))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(18),
            Constraint::Min(10),
            Constraint::Length(6),
        ],
    )
    .header(
        Row::new(vec!["Timestamp", "IP", "Request", "Code"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recent Error Events "),
    );
    frame.render_widget(table, area);
}

fn draw_footer(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let line = if let Some(input) = app.path_input() {
        Line::from(vec![
            Span::styled(" Open file: ", Style::default().fg(Color::Yellow)),
            Span::raw(input),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if let Some(status) = app.status() {
        Line::from(vec![
            Span::raw(format!(" {status}  ")),
            Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray)))
    };
    let footer = Paragraph::new(line)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

const KEY_HELP: &str = "4/5: toggle 4xx/5xx  o: open  r: reload  L: logout  q: quit";

/// A `width` x `height` rectangle in the middle of `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use logpulse_analyzer::{Analyzer, LogSource, StaticCredentials};

    use super::*;
    use crate::commands::dashboard::app::Action;

    const SAMPLE: &str = "timestamp,ip,request,error_code\n\
                          2024-01-01 10:00:00,1.1.1.1,GET,404\n\
                          2024-01-01 10:00:01,2.2.2.2,POST,500\n";

    fn app() -> DashboardApp {
        DashboardApp::new(
            Analyzer::default(),
            Box::new(StaticCredentials::new("admin", "admin123")),
            PathBuf::from("server_logs.csv"),
        )
    }

    fn type_text(app: &mut DashboardApp, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn render(app: &DashboardApp) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test terminal");
        terminal.draw(|f| draw(f, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_login_screen_masks_password() {
        let mut app = app();
        type_text(&mut app, "admin");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        type_text(&mut app, "secret");

        let screen = render(&app);
        assert!(screen.contains("logpulse Login"));
        assert!(screen.contains("Username: admin"));
        assert!(screen.contains("Password: ******"));
        assert!(!screen.contains("secret"));
    }

    #[test]
    fn test_login_error_is_shown() {
        let mut app = app();
        type_text(&mut app, "admin");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        type_text(&mut app, "wrong");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert!(render(&app).contains("invalid credentials"));
    }

    #[test]
    fn test_dashboard_shows_summary_and_tables() {
        let mut app = app();
        type_text(&mut app, "admin");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        type_text(&mut app, "admin123");
        let action = app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let Action::Load(path) = action else {
            panic!("expected load, got {action:?}");
        };
        app.apply_source(path, Ok(LogSource::from_text("server_logs.csv", SAMPLE)));

        let screen = render(&app);
        assert!(screen.contains("User: admin"));
        assert!(screen.contains("Total Requests : 2"));
        assert!(screen.contains("System Critical (Error Rate: 100.0%)"));
        assert!(screen.contains("Recent Error Events"));
        assert!(screen.contains("2024-01-01 10:00:01"));
        assert!(screen.contains("HTTP Error Code Distribution"));
    }

    #[test]
    fn test_dashboard_without_data() {
        let mut app = app();
        type_text(&mut app, "admin");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        type_text(&mut app, "admin123");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert!(render(&app).contains("No data loaded"));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        let rect = centered(area, 50, 10);
        assert_eq!(rect, area);
    }
}

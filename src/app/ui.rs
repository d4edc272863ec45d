// Handles the rendering of widgets to the terminal frame.

use super::config::Manifest;
use super::i18n::Translations;
use super::model::{PairStatus, ToggleAction};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// Main render function called every frame.
pub fn render(
    f: &mut Frame,
    status: PairStatus,
    switching: bool,
    show_description: bool,
    manifest: &Manifest,
    i18n: &Translations,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0], manifest, i18n);
    render_status(f, chunks[1], status, switching, i18n);
    render_footer(f, chunks[2]);

    if show_description {
        render_description(f, manifest, i18n);
    }
}

fn render_header(f: &mut Frame, area: Rect, manifest: &Manifest, i18n: &Translations) {
    let header = i18n
        .tr("header")
        .replace("{version}", &manifest.version)
        .replace("{author}", &manifest.author);

    let lines = vec![
        Line::from(Span::styled(
            i18n.tr("title").to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(header, Style::default().fg(Color::Gray))),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", manifest.name)),
    );

    f.render_widget(paragraph, area);
}

fn render_status(
    f: &mut Frame,
    area: Rect,
    status: PairStatus,
    switching: bool,
    i18n: &Translations,
) {
    let service_key = if status.service_running {
        "status_service_running"
    } else {
        "status_service_stopped"
    };
    let program_key = if status.program_running {
        "status_program_running"
    } else {
        "status_program_stopped"
    };

    let action_line = if switching {
        Line::from(Span::styled(
            i18n.tr("status_switching").to_string(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let label = match ToggleAction::for_status(status) {
            ToggleAction::Stop => i18n.tr("button_stop"),
            ToggleAction::Start => i18n.tr("button_start"),
        };
        Line::from(vec![
            Span::styled(
                "[Space] ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(label.to_string()),
        ])
    };

    let lines = vec![
        component_line(status.service_running, i18n.tr(service_key)),
        component_line(status.program_running, i18n.tr(program_key)),
        Line::default(),
        action_line,
    ];

    let paragraph = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn component_line(running: bool, label: &str) -> Line<'static> {
    let (status_symbol, color) = if running {
        ("●", Color::Green)
    } else {
        ("○", Color::DarkGray)
    };

    Line::from(vec![
        Span::styled(format!("{} ", status_symbol), Style::default().fg(color)),
        Span::raw(label.to_string()),
    ])
}

fn render_footer(f: &mut Frame, area: Rect) {
    let help_text = Line::from(vec![
        Span::raw("Toggle: "),
        Span::styled(
            "Space/Enter ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("| Info: "),
        Span::styled("d ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("| Quit: "),
        Span::styled("q", Style::default().fg(Color::Red)),
    ]);

    let paragraph =
        Paragraph::new(help_text).block(Block::default().borders(Borders::ALL).title(" Controls "));

    f.render_widget(paragraph, area);
}

fn render_description(f: &mut Frame, manifest: &Manifest, i18n: &Translations) {
    let area = centered_rect(60, 40, f.area());

    f.render_widget(Clear, area);

    let text = manifest.description.get(i18n.lang());
    let text = if text.is_empty() {
        i18n.tr("description_default")
    } else {
        text
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", manifest.name));

    let paragraph = Paragraph::new(text.to_string())
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

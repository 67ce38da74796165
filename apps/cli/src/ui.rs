use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use reel_playback::{CaptionLine, PlayerFrame, PlayerState};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let [header_area, body_area, url_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let player = app.engine.frame();

    render_header(frame, app, &player, header_area);
    render_body(frame, app, &player, body_area);
    render_url(frame, &player, url_area);
    render_hints(frame, hint_area);
}

fn render_header(frame: &mut Frame, app: &App, player: &PlayerFrame, area: Rect) {
    let position = match player.clip_index() {
        Some(index) => format!("clip {}/{}", index + 1, player.clip_count),
        None => "clip -/-".to_string(),
    };
    let status = if app.paused() {
        "⏸ PAUSED".to_string()
    } else {
        format!("▶ {}", player.state.label().to_uppercase())
    };
    let text = format!(
        " \"{}\" ({}) | {} | {} | {:>6}ms ",
        app.phrase, app.language, position, status, player.clock_ms
    );

    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_body(frame: &mut Frame, app: &App, player: &PlayerFrame, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));

    let lines = match player.state {
        PlayerState::Empty => vec![Line::raw("")],
        PlayerState::Loading => vec![dim("searching…")],
        PlayerState::Unavailable => {
            let mut lines = vec![Line::styled(
                "No clips available for this phrase",
                Style::default().fg(Color::Yellow),
            )];
            if let Some(error) = &app.error {
                lines.push(dim(error));
            }
            lines
        }
        PlayerState::Playing { .. } => match &player.caption {
            Some(caption) => vec![caption_line(caption)],
            None => vec![dim("(no subtitle)")],
        },
    };

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn render_url(frame: &mut Frame, player: &PlayerFrame, area: Rect) {
    let url = player.url.as_deref().unwrap_or("");
    frame.render_widget(
        Paragraph::new(format!(" {url} ")).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn render_hints(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(" [Space] pause/resume  [n] next  [e] simulate error  [q] quit ")
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn dim(text: &str) -> Line<'static> {
    Line::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

pub fn caption_line(caption: &CaptionLine) -> Line<'static> {
    let spans: Vec<Span> = caption
        .spans
        .iter()
        .map(|span| {
            if span.active {
                Span::styled(
                    span.text.clone(),
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(span.text.clone())
            }
        })
        .collect();
    Line::from(spans)
}

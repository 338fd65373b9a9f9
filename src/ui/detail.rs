use crate::app::{App, DetailsOverlay};
use crate::tmdb::{CastMember, ItemDetails, TmdbClient};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;

/// Details overlay: loading spinner, the full details view, or the generic
/// error state. Drawn centered over the browse page.
pub fn render(app: &App, frame: &mut Frame) {
    let overlay = match &app.overlay {
        Some(o) => o,
        None => return,
    };

    match overlay {
        DetailsOverlay::Loading => render_loading(frame),
        DetailsOverlay::Failed(msg) => render_failed(frame, msg),
        DetailsOverlay::Ready { details, cast, .. } => render_ready(frame, details, cast),
    }
}

fn render_loading(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);
    let loading = Paragraph::new("Loading details...")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(loading, area);
}

fn render_failed(frame: &mut Frame, msg: &str) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Error",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(msg.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let error = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(error, area);
}

fn render_ready(frame: &mut Frame, details: &ItemDetails, cast: &[CastMember]) {
    let area = centered_rect(80, 80, frame.area());
    frame.render_widget(Clear, area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", details.title))
        .title_bottom(
            Line::from(" o Open in browser  Esc Close ")
                .style(Style::default().fg(Color::DarkGray)),
        );
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    // Layout: header(4) + overview(min) + info(3) + cast(6)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(6),
        ])
        .split(inner);

    render_header(frame, chunks[0], details);
    render_overview(frame, chunks[1], details);
    render_info(frame, chunks[2], details);
    render_cast(frame, chunks[3], cast);
}

fn render_header(frame: &mut Frame, area: Rect, details: &ItemDetails) {
    let mut meta = vec![Span::styled(
        format!(" ★ {:.1} ", details.vote_average),
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    let year = details.year();
    if !year.is_empty() {
        meta.push(Span::styled(
            format!("  {year}"),
            Style::default().fg(Color::White),
        ));
    }
    if let Some(minutes) = details.runtime_minutes() {
        meta.push(Span::styled(
            format!("  •  {minutes} min"),
            Style::default().fg(Color::White),
        ));
    }
    if details.poster_path.is_none() {
        meta.push(Span::styled(
            "  [no poster]",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let genre_names: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    let mut lines = vec![Line::from(meta)];
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        lines.push(Line::from(Span::styled(
            format!(" “{tagline}”"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::from(Span::styled(
        format!(" {}", genre_names.join(" · ")),
        Style::default().fg(Color::Cyan),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_overview(frame: &mut Frame, area: Rect, details: &ItemDetails) {
    let overview = Paragraph::new(details.overview.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Overview "),
        );
    frame.render_widget(overview, area);
}

fn render_info(frame: &mut Frame, area: Rect, details: &ItemDetails) {
    let mut spans = Vec::new();
    if let Some(status) = details.status.as_deref() {
        spans.push(Span::styled(" Status: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(status.to_string(), Style::default().fg(Color::White)));
    }
    // Budget and revenue are shown only when upstream reports them non-zero.
    if let Some(budget) = details.budget.filter(|b| *b > 0) {
        spans.push(Span::styled("   Budget: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("${}", group_thousands(budget)),
            Style::default().fg(Color::White),
        ));
    }
    if let Some(revenue) = details.revenue.filter(|r| *r > 0) {
        spans.push(Span::styled("   Revenue: ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            format!("${}", group_thousands(revenue)),
            Style::default().fg(Color::White),
        ));
    }

    let info = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(info, area);
}

fn render_cast(frame: &mut Frame, area: Rect, cast: &[CastMember]) {
    let mut lines = Vec::new();
    for member in cast {
        let mut spans = vec![Span::styled(
            format!(" {}", member.name),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )];
        if let Some(character) = member.character.as_deref().filter(|c| !c.is_empty()) {
            spans.push(Span::styled(
                format!("  as {character}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(profile) = member.profile_path.as_deref() {
            spans.push(Span::styled(
                format!("  {}", TmdbClient::poster_url(profile, "w200")),
                Style::default().fg(Color::Blue),
            ));
        }
        lines.push(Line::from(spans));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            " No cast information",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let cast_block = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Cast "),
    );
    frame.render_widget(cast_block, area);
}

/// Format an amount with thousands separators, e.g. 63000000 -> "63,000,000".
fn group_thousands(amount: i64) -> String {
    let digits = amount.to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::group_thousands;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(63000000), "63,000,000");
    }
}

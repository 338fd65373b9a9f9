use crate::app::App;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
};

use super::truncate_str;

/// Transient results dropdown, drawn under the search bar on top of the page.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    // The search bar occupies rows 3..6; the dropdown hangs below it.
    let height = (app.search.results.len() as u16 + 2).min(area.height.saturating_sub(6));
    let dropdown = Rect {
        x: area.x + 1,
        y: area.y + 6,
        width: area.width.saturating_sub(2),
        height,
    };

    frame.render_widget(Clear, dropdown);

    let items: Vec<ListItem> = app
        .search
        .results
        .iter()
        .map(|item| {
            let year = item.year();
            let year_part = if year.is_empty() {
                String::new()
            } else {
                format!(" ({year})")
            };
            let line = Line::from(vec![
                Span::styled(
                    truncate_str(&item.title, (dropdown.width as usize).saturating_sub(20)),
                    Style::default().fg(Color::White),
                ),
                Span::styled(year_part, Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("  ★ {:.1}", item.vote_average),
                    Style::default().fg(Color::Yellow),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Results ")
                .title_bottom(
                    Line::from(" ↑↓ select  Enter open  Esc close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    state.select(Some(app.search.selected));
    frame.render_stateful_widget(list, dropdown, &mut state);
}

use crate::app::{App, Focus, InputMode, PagePhase};
use crate::tmdb::{CatalogItem, MediaType};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::truncate_str;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // Layout: nav(3) + search(3) + featured(5) + genres(3) + trending(min) + status(1)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    render_nav(app, frame, chunks[0]);
    render_search_bar(app, frame, chunks[1]);

    match &app.page().phase {
        PagePhase::InitialLoading => {
            let loading = Paragraph::new(format!(
                "Loading {}...",
                app.active.label().to_lowercase()
            ))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL));
            let body = chunks[2].union(chunks[4]);
            frame.render_widget(loading, body);
        }
        PagePhase::Failed(msg) => {
            render_error(app, frame, chunks[2].union(chunks[4]), msg);
        }
        PagePhase::Ready => {
            render_featured(app, frame, chunks[2]);
            render_genres(app, frame, chunks[3]);
            render_trending(app, frame, chunks[4]);
        }
    }

    render_status(app, frame, chunks[5]);
}

/// Navigation bar: app name plus the Movies / Series switch.
fn render_nav(app: &App, frame: &mut Frame, area: Rect) {
    let tab = |media: MediaType, key: &'static str| -> Vec<Span<'static>> {
        let style = if app.active == media {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        vec![
            Span::styled(format!("[{key}] "), Style::default().fg(Color::DarkGray)),
            Span::styled(media.label(), style),
        ]
    };

    let mut spans = vec![Span::styled(
        " Movie Explorer   ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.extend(tab(MediaType::Movie, "1"));
    spans.push(Span::raw("   "));
    spans.extend(tab(MediaType::Series, "2"));

    let nav = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(nav, area);
}

fn render_search_bar(app: &App, frame: &mut Frame, area: Rect) {
    let searching = app.input_mode == InputMode::Searching;
    let style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label = if searching {
        " 🔍 Search (Esc to cancel): "
    } else {
        " 🔍 Search (/): "
    };
    let bar = Paragraph::new(format!("{}{}", label, app.search.query))
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(style)
                .title(format!(" Search {} ", app.active.label())),
        );
    frame.render_widget(bar, area);

    if searching {
        let cursor_x = area.x + label.chars().count() as u16 + app.search.query.chars().count() as u16;
        frame.set_cursor_position((cursor_x, area.y + 1));
    }
}

/// Featured section: the first slice of the popular listing.
fn render_featured(app: &App, frame: &mut Frame, area: Rect) {
    let page = app.page();
    let focused = app.focus == Focus::Featured;

    let items: Vec<ListItem> = page
        .featured
        .iter()
        .map(|item| catalog_line(item, area.width))
        .collect();

    let list = List::new(items)
        .block(section_block(" Featured ", focused))
        .highlight_style(highlight_style(focused))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(page.featured_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

/// Genre row: one chip per genre, selected chip highlighted, cursor underlined.
fn render_genres(app: &App, frame: &mut Frame, area: Rect) {
    let page = app.page();
    let focused = app.focus == Focus::Genres;
    let selected_id = page.selected_genre.as_ref().map(|g| g.id);

    let mut spans = vec![Span::raw(" ")];
    for (i, genre) in page.genres.iter().enumerate() {
        let mut style = if Some(genre.id) == selected_id {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        if focused && i == page.genre_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} ", genre.name), style));
        spans.push(Span::raw(" "));
    }

    let row = Paragraph::new(Line::from(spans)).block(section_block(" Browse by Genre ", focused));
    frame.render_widget(row, area);
}

/// Trending section: the genre-filtered discover listing.
fn render_trending(app: &App, frame: &mut Frame, area: Rect) {
    let page = app.page();
    let focused = app.focus == Focus::Trending;

    let title = match &page.selected_genre {
        Some(genre) => format!(" Trending in {} ", genre.name),
        None => " Trending ".to_string(),
    };

    if page.trending_loading {
        let loading = Paragraph::new("Loading...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(section_block(&title, focused));
        frame.render_widget(loading, area);
        return;
    }

    let items: Vec<ListItem> = page
        .trending
        .iter()
        .map(|item| catalog_line(item, area.width))
        .collect();

    let count_info = format!(" {} items ", page.trending.len());
    let list = List::new(items)
        .block(
            section_block(&title, focused)
                .title_bottom(Line::from(count_info).alignment(Alignment::Right)),
        )
        .highlight_style(highlight_style(focused))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(page.trending_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_error(app: &App, frame: &mut Frame, area: Rect, msg: &str) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Oops!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(msg.to_string()),
    ];
    // The movies page offers a full reload; the series page does not.
    if app.active == MediaType::Movie {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press r to try again",
            Style::default().fg(Color::Cyan),
        )));
    }

    let error = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(error, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
    };
    let status_line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(" Navigate  "),
        key("Tab"),
        Span::raw(" Section  "),
        key("/"),
        Span::raw(" Search  "),
        key("Enter"),
        Span::raw(" Details  "),
        key("r"),
        Span::raw(" Reset genre  "),
        key("?"),
        Span::raw(" Help  "),
        key("q"),
        Span::raw(" Quit  "),
        Span::styled(&app.status_msg, Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status_line), area);
}

/// One catalog item as a list row: title, year, rating, overview snippet.
fn catalog_line(item: &CatalogItem, width: u16) -> ListItem<'static> {
    let year = item.year();
    let year_part = if year.is_empty() {
        String::new()
    } else {
        format!("({year}) ")
    };
    let overview = item.overview.lines().next().unwrap_or("").trim();
    let line = Line::from(vec![
        Span::styled(
            truncate_str(&item.title, 40),
            Style::default().fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(year_part, Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("★ {:.1} ", item.vote_average),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            truncate_str(overview, (width as usize).saturating_sub(60)),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    ListItem::new(line)
}

fn section_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

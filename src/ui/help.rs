use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered_rect;

pub fn render(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());

    // Clear the area behind the popup
    frame.render_widget(Clear, area);

    let section = |name: &'static str| {
        Line::from(Span::styled(
            format!("  {name}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    };
    let binding = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("    {keys:<10}"), Style::default().fg(Color::Yellow)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        Line::from(""),
        section("Global"),
        binding("?", "Toggle this help"),
        binding("q", "Quit application"),
        binding("Esc", "Back / cancel"),
        binding("1 / 2", "Switch to Movies / Series"),
        Line::from(""),
        section("Browse"),
        binding("Tab", "Cycle focus: Featured / Genres / Trending"),
        binding("↑/k ↓/j", "Navigate the focused list"),
        binding("←/h →/l", "Move the genre cursor"),
        binding("Enter", "Select genre, or open item details"),
        binding("r", "Reset to the default genre"),
        binding("o", "Open focused item in browser"),
        binding("/", "Start searching (type to search)"),
        Line::from(""),
        section("Search"),
        binding("↑/↓", "Move through results"),
        binding("Enter", "Open selected result"),
        binding("Esc", "Close dropdown and clear query"),
        Line::from(""),
        section("Details"),
        binding("o", "Open item in browser"),
        binding("Esc", "Close overlay"),
        Line::from(""),
    ];

    let help = Paragraph::new(help_text)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help — Keybindings ")
                .title_bottom(
                    Line::from(" Press ? or Esc to close ")
                        .style(Style::default().fg(Color::DarkGray)),
                ),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(help, area);
}

use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::github::{RepoSummary, UserProfile};
use crate::query::RequestState;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::home::HomeState;
use crate::ui::layout::{centered_rect, layout_regions, user_regions};
use crate::ui::theme::{
    GITHUB_BLUE, GLOBAL_BORDER, HEADER_TEXT, MUTED_TEXT, STATUS_ERROR, STATUS_OK, STATUS_PENDING,
};
use crate::ui::user::UserScreen;

/// What a panel shows for a given [`RequestState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Nothing issued yet.
    Idle,
    /// First request for these inputs is in flight.
    Loading,
    Failed,
    Ready,
    /// Showing data while a newer request is in flight.
    Refreshing,
}

pub fn presentation<T>(state: &RequestState<T>) -> Presentation {
    if state.is_idle() {
        return Presentation::Idle;
    }
    match (state.data.is_some(), state.fetching) {
        (true, true) => Presentation::Refreshing,
        (true, false) => Presentation::Ready,
        (false, true) => Presentation::Loading,
        (false, false) if state.is_error() => Presentation::Failed,
        (false, false) => Presentation::Idle,
    }
}

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);

    let fetching = app
        .user_screen()
        .map(|screen| screen.profile().fetching || screen.repos().fetching)
        .unwrap_or(false);
    frame.render_widget(Header::new().widget(app.route(), fetching), header);
    frame.render_widget(Clear, body);

    match app.user_screen() {
        Some(screen) => draw_user(frame, body, screen),
        None => draw_home(frame, body, app.home()),
    }

    frame.render_widget(Footer::new().widget(app.route(), footer), footer);
}

fn draw_home(frame: &mut Frame<'_>, body: Rect, home: &HomeState) {
    let prompt = centered_rect(60, 5, body);
    let length_color = if home.is_full() { STATUS_PENDING } else { MUTED_TEXT };
    let mut lines = vec![Line::from(vec![
        Span::styled("> ", Style::default().fg(GITHUB_BLUE)),
        Span::styled(home.input.clone(), Style::default().fg(HEADER_TEXT)),
        Span::styled(format!("  {}", home.length_hint()), Style::default().fg(length_color)),
    ])];
    match &home.error {
        Some(error) => lines.push(Line::styled(error.clone(), Style::default().fg(STATUS_ERROR))),
        None => lines.push(Line::styled(
            "Type a GitHub username and press Enter",
            Style::default().fg(MUTED_TEXT),
        )),
    }

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Find a user ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        ),
        prompt,
    );

    if prompt.width > 2 && prompt.height > 2 {
        let offset = 2 + home.input.chars().count() as u16;
        let x = prompt.x + 1 + offset.min(prompt.width.saturating_sub(3));
        frame.set_cursor_position(Position::new(x, prompt.y + 1));
    }
}

fn draw_user(frame: &mut Frame<'_>, body: Rect, screen: &UserScreen) {
    let (profile_area, repos_area) = user_regions(body);
    let profile = screen.profile();
    let repos = screen.repos();

    let block = |title: String| {
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GLOBAL_BORDER))
    };

    let profile_lines = match (presentation(&profile), &profile.data, &profile.error) {
        (Presentation::Ready | Presentation::Refreshing, Some(user), _) => profile_lines(user),
        (Presentation::Failed, _, Some(error)) => vec![error_line(error.to_string())],
        (Presentation::Loading, _, _) => vec![pending_line("Loading profile…")],
        _ => Vec::new(),
    };
    frame.render_widget(
        Paragraph::new(profile_lines)
            .wrap(Wrap { trim: true })
            .block(block(format!(" @{} ", screen.username()))),
        profile_area,
    );

    let title = match &repos.data {
        Some(list) => format!(" Repositories ({}) ", list.len()),
        None => " Repositories ".to_string(),
    };
    match (presentation(&repos), &repos.data, &repos.error) {
        (Presentation::Ready | Presentation::Refreshing, Some(list), _) => {
            let items: Vec<ListItem> = list.iter().map(repo_item).collect();
            frame.render_widget(List::new(items).block(block(title)), repos_area);
        }
        (Presentation::Failed, _, Some(error)) => frame.render_widget(
            Paragraph::new(error_line(error.to_string())).block(block(title)),
            repos_area,
        ),
        (Presentation::Loading, _, _) => frame.render_widget(
            Paragraph::new(pending_line("Loading repositories…")).block(block(title)),
            repos_area,
        ),
        _ => frame.render_widget(block(title), repos_area),
    }
}

fn profile_lines(user: &UserProfile) -> Vec<Line<'static>> {
    let label = Style::default().fg(MUTED_TEXT);
    let value = Style::default().fg(HEADER_TEXT);
    let mut lines = vec![Line::from(vec![
        Span::styled(
            user.display_name().to_string(),
            Style::default().fg(GITHUB_BLUE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", user.html_url), label),
    ])];
    if let Some(bio) = &user.bio {
        lines.push(Line::styled(bio.clone(), value));
    }
    for (name, field) in [
        ("Company", &user.company),
        ("Location", &user.location),
        ("Blog", &user.blog),
    ] {
        if let Some(text) = field.as_deref().filter(|t| !t.is_empty()) {
            lines.push(Line::from(vec![
                Span::styled(format!("{name}: "), label),
                Span::styled(text.to_string(), value),
            ]));
        }
    }
    lines.push(Line::from(vec![
        Span::styled(format!("{} ", user.followers), value),
        Span::styled("followers · ", label),
        Span::styled(format!("{} ", user.following), value),
        Span::styled("following · ", label),
        Span::styled(format!("{} ", user.public_repos), value),
        Span::styled("public repos", label),
    ]));
    lines
}

fn repo_item(repo: &RepoSummary) -> ListItem<'static> {
    let mut spans = vec![Span::styled(
        repo.name.clone(),
        Style::default().fg(GITHUB_BLUE).add_modifier(Modifier::BOLD),
    )];
    if repo.fork {
        spans.push(Span::styled(" (fork)", Style::default().fg(MUTED_TEXT)));
    }
    spans.push(Span::styled(
        format!("  ★ {}  ⑂ {}", repo.stargazers_count, repo.forks_count),
        Style::default().fg(STATUS_OK),
    ));
    if let Some(language) = &repo.language {
        spans.push(Span::styled(format!("  {}", language), Style::default().fg(MUTED_TEXT)));
    }
    let mut lines = vec![Line::from(spans)];
    if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(Line::styled(
            format!("  {}", description),
            Style::default().fg(HEADER_TEXT),
        ));
    }
    ListItem::new(lines)
}

fn error_line(message: String) -> Line<'static> {
    Line::styled(message, Style::default().fg(STATUS_ERROR))
}

fn pending_line(message: &'static str) -> Line<'static> {
    Line::styled(message, Style::default().fg(STATUS_PENDING))
}

//! GitHub stats dashboard rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Cell, Paragraph, Row, Table},
    Frame,
};

use super::palette::Palette;
use super::utils::{card_block, columns, render_error, render_idle, render_metric, render_skeleton, truncate_string};
use crate::model::{FetchStatus, GithubReport, ViewKind, ViewSnapshot, REPO_LIST_LIMIT};

const VIEW: ViewKind = ViewKind::Github;
const LANGUAGE_COLORS: [Color; 5] = [Color::Blue, Color::Green, Color::Yellow, Color::Red, Color::Magenta];

pub fn render(frame: &mut Frame, area: Rect, snapshot: &ViewSnapshot<GithubReport>, palette: &Palette) {
    let state = &snapshot.state;
    match (&state.status, state.data.as_ref()) {
        (FetchStatus::Ready, Some(report)) => render_report(frame, area, report, palette),
        (FetchStatus::Idle, _) | (FetchStatus::Ready, None) => {
            render_idle(frame, area, "Enter a GitHub username", palette, VIEW)
        }
        (FetchStatus::Loading, _) => render_skeleton(frame, area, 4, palette, VIEW),
        (FetchStatus::Error(diagnostic), _) => render_error(frame, area, &state.query, diagnostic, palette),
    }
}

fn render_report(frame: &mut Frame, area: Rect, report: &GithubReport, palette: &Palette) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),                          // Profile + metrics
            Constraint::Min(8),                             // Charts
            Constraint::Length(REPO_LIST_LIMIT as u16 + 3), // Recent repositories
        ])
        .split(area);

    render_profile(frame, rows[0], report, palette);
    render_recent(frame, rows[2], report, palette);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);
    render_languages(frame, charts[0], report, palette);
    render_repositories(frame, charts[1], report, palette);
}

fn render_profile(frame: &mut Frame, area: Rect, report: &GithubReport, palette: &Palette) {
    let profile = &report.profile;
    let title = Line::from(vec![
        Span::raw(format!(" {} ", profile.display_name())),
        Span::styled(format!("@{} ", profile.login), palette.muted()),
    ]);
    let block = card_block(title, palette, VIEW);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = columns(inner, 5);
    render_metric(frame, cells[0], profile.public_repos.to_string(), "Repositories", palette);
    render_metric(frame, cells[1], profile.followers.to_string(), "Followers", palette);
    render_metric(frame, cells[2], profile.following.to_string(), "Following", palette);
    render_metric(frame, cells[3], report.total_stars().to_string(), "Total Stars", palette);
    render_metric(frame, cells[4], report.total_forks().to_string(), "Total Forks", palette);
}

fn render_languages(frame: &mut Frame, area: Rect, report: &GithubReport, palette: &Palette) {
    let block = card_block(" Languages ", palette, VIEW);
    if report.language_stats.is_empty() {
        frame.render_widget(Paragraph::new("No language data").style(palette.muted()).block(block), area);
        return;
    }

    // Most used first
    let mut languages: Vec<(&String, &usize)> = report.language_stats.iter().collect();
    languages.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let bars: Vec<Bar> = languages
        .iter()
        .enumerate()
        .map(|(i, (name, count))| {
            let color = LANGUAGE_COLORS[i % LANGUAGE_COLORS.len()];
            Bar::default()
                .value(**count as u64)
                .label(Line::from(truncate_string(name, 12)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(palette.bg).bg(color).add_modifier(Modifier::BOLD))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

fn render_repositories(frame: &mut Frame, area: Rect, report: &GithubReport, palette: &Palette) {
    let top = report.top_repositories();
    let title = Line::from(vec![
        Span::raw(" Top Repositories "),
        Span::styled("stars", Style::default().fg(Color::Yellow)),
        Span::raw(" / "),
        Span::styled("forks ", Style::default().fg(Color::Cyan)),
    ]);
    let block = card_block(title, palette, VIEW);
    if top.is_empty() {
        frame.render_widget(Paragraph::new("No public repositories").style(palette.muted()).block(block), area);
        return;
    }

    let groups: Vec<BarGroup> = top
        .iter()
        .map(|repo| {
            BarGroup::default()
                .label(Line::from(truncate_string(&repo.name, 10)))
                .bars(&[
                    Bar::default()
                        .value(repo.stars as u64)
                        .style(Style::default().fg(Color::Yellow)),
                    Bar::default()
                        .value(repo.forks as u64)
                        .style(Style::default().fg(Color::Cyan)),
                ])
        })
        .collect();

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(3)
        .bar_gap(0)
        .group_gap(2);
    for group in groups {
        chart = chart.data(group);
    }
    frame.render_widget(chart, area);
}

fn render_recent(frame: &mut Frame, area: Rect, report: &GithubReport, palette: &Palette) {
    let block = card_block(" Recent Repositories ", palette, VIEW);
    let recent = report.recent_repositories();
    if recent.is_empty() {
        frame.render_widget(Paragraph::new("No public repositories").style(palette.muted()).block(block), area);
        return;
    }

    let rows: Vec<Row> = recent
        .iter()
        .map(|repo| {
            let description = match repo.description.as_deref() {
                Some(text) if !text.trim().is_empty() => Span::raw(text.to_string()),
                _ => Span::styled("No description", palette.muted()),
            };
            let updated = repo
                .updated_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            Row::new(vec![
                Cell::from(Span::styled(
                    truncate_string(&repo.name, 24),
                    Style::default().fg(palette.accent(VIEW)).add_modifier(Modifier::BOLD),
                )),
                Cell::from(description),
                Cell::from(repo.language.clone().unwrap_or_else(|| "-".to_string())),
                Cell::from(Span::styled(format!("★ {}", repo.stargazers_count), Style::default().fg(Color::Yellow))),
                Cell::from(Span::styled(format!("⑂ {}", repo.forks_count), Style::default().fg(Color::Cyan))),
                Cell::from(Span::styled(updated, palette.muted())),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(24),
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["Name", "Description", "Language", "Stars", "Forks", "Updated"]).style(palette.muted()))
    .block(block);
    frame.render_widget(table, area);
}

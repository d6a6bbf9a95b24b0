use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use finboard::money::format_brl;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.goals.is_empty() {
        render_empty(f, area);
        return;
    }

    let items: Vec<ListItem> = app
        .goals
        .iter()
        .enumerate()
        .skip(app.goal_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, goal)| {
            let progress = goal.progress_percent();
            let color = if goal.is_reached() {
                theme::GREEN
            } else {
                theme::ACCENT
            };

            let style = if i == app.goal_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<22}", truncate(&goal.name, 21)), style),
                Span::styled(
                    format!(
                        "{}/{} ",
                        format_brl(goal.saved_value),
                        format_brl(goal.value)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(progress, 20), Style::default().fg(color)),
                Span::styled(
                    format!(" {progress:.0}%"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    if goal.is_reached() {
                        "  reached".to_string()
                    } else {
                        format!("  {} to go", format_brl(goal.remaining()))
                    },
                    theme::dim_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Goals ({}) ", app.goals.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

fn render_empty(f: &mut Frame, area: Rect) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("No savings goals yet", theme::dim_style())),
        Line::from(""),
        Line::from(Span::styled(
            "Use :add-goal <name> <target> <saved> to start one",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Goals ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(msg, area);
}

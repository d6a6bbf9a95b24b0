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

/// Each card takes a title line, a usage line and a spacer.
pub(crate) const CARD_HEIGHT: usize = 3;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.cards.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No cards yet.",
                theme::dim_style().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add-card <name> <limit> <used>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    " Cards ",
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let visible = area.height.saturating_sub(2) as usize;
    let per_page = (visible / CARD_HEIGHT).max(1);

    let items: Vec<ListItem> = app
        .cards
        .iter()
        .enumerate()
        .skip(app.card_scroll)
        .take(per_page)
        .map(|(i, card)| {
            let usage = card.usage_percent();
            let remaining = card.remaining();
            let color = theme::usage_color(usage);
            let name_style = if i == app.card_index {
                theme::selected_style()
            } else {
                theme::normal_style().add_modifier(Modifier::BOLD)
            };

            let mut title = vec![Span::styled(format!(" {} ", truncate(&card.name, 30)), name_style)];
            if !card.logo_url.is_empty() {
                title.push(Span::styled(
                    format!("  {}", truncate(&card.logo_url, 40)),
                    theme::dim_style(),
                ));
            }

            ListItem::new(vec![
                Line::from(title),
                Line::from(vec![
                    Span::styled(
                        format!(
                            "   {} of {} used, ",
                            format_brl(card.used_amount()),
                            format_brl(card.limit())
                        ),
                        theme::normal_style(),
                    ),
                    Span::styled(
                        format!("{} free ", format_brl(remaining)),
                        theme::balance_style(remaining),
                    ),
                    Span::styled(progress_bar(usage, 20), Style::default().fg(color)),
                    Span::styled(
                        format!(" {usage:.0}%"),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Cards ({}) ", app.cards.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

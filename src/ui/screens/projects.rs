use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use finboard::money::format_brl;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.projects.is_empty() {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                " Projects (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No projects yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add-project <name> <value> <received>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["#", "Project", "Types", "Status", "Value", "Received", "Outstanding"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .projects
        .iter()
        .enumerate()
        .skip(app.project_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, project)| {
            let style = if i == app.project_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let outstanding = if project.is_paid_off() {
                Span::styled("paid off", theme::earned_style())
            } else {
                Span::styled(format_brl(project.outstanding()), theme::owed_style())
            };

            Row::new(vec![
                Cell::from(project.order.to_string()),
                Cell::from(truncate(&project.name, 28)),
                Cell::from(truncate(&project.types_label(), 24)),
                Cell::from(Span::styled(project.status.as_str(), theme::status_style(project.status))),
                Cell::from(format_brl(project.value)),
                Cell::from(format_brl(project.amount_paid)),
                Cell::from(outstanding),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(24),
        Constraint::Length(12),
        Constraint::Length(15),
        Constraint::Length(15),
        Constraint::Length(15),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Projects ({}) ", app.projects.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

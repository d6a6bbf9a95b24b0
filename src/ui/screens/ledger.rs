use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use finboard::aggregate::YearLedger;
use finboard::money::format_brl;

use crate::ui::app::{App, LedgerRow, SUMMARY_HEIGHT};
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(SUMMARY_HEIGHT as u16), // Summary cards
            Constraint::Min(5),                        // Month table
        ])
        .split(area);

    let ledger = app.year_ledger();
    render_summary_cards(f, chunks[0], app, &ledger);
    render_month_table(f, chunks[1], app, &ledger);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App, ledger: &YearLedger) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let totals = app.totals;
    render_card(f, cards[0], "Earned", totals.total_earned, theme::GREEN);
    render_card(f, cards[1], "Owed", totals.total_owed, theme::RED);
    let net_color = if totals.is_positive() {
        theme::GREEN
    } else {
        theme::RED
    };
    render_card(f, cards[2], "Net", totals.net_amount, net_color);

    let year_net = ledger.balance();
    render_card(
        f,
        cards[3],
        &format!("{} balance", ledger.year),
        year_net,
        theme::balance_color(year_net),
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_brl(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_month_table(f: &mut Frame, area: Rect, app: &App, ledger: &YearLedger) {
    let header_cells = ["Month / Type", "Earned", "Owed", "Balance", "Status"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let format = app.format();
    let rows: Vec<Row> = app
        .ledger_rows()
        .into_iter()
        .enumerate()
        .skip(app.ledger_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, row)| {
            let is_cursor = i == app.ledger_index;
            match row {
                LedgerRow::Month(month) => {
                    let Some(rollup) = ledger.month(month) else {
                        return Row::new(vec![Cell::from(month.as_str())]);
                    };
                    let marker = if rollup.is_empty() {
                        " "
                    } else if app.expanded.contains(&month) {
                        "▾"
                    } else {
                        "▸"
                    };
                    let balance = rollup.balance();
                    let count = rollup.entries.len();
                    let style = if is_cursor {
                        theme::selected_style()
                    } else if rollup.is_empty() {
                        theme::dim_style()
                    } else {
                        theme::normal_style().add_modifier(Modifier::BOLD)
                    };
                    Row::new(vec![
                        Cell::from(format!("{marker} {month}")),
                        Cell::from(format_brl(rollup.earned_sum)),
                        Cell::from(format_brl(rollup.owed_sum)),
                        Cell::from(Span::styled(format_brl(balance), theme::balance_style(balance))),
                        Cell::from(match count {
                            0 => String::new(),
                            1 => "1 entry".to_string(),
                            n => format!("{n} entries"),
                        }),
                    ])
                    .style(style)
                }
                LedgerRow::Entry(txn) => {
                    let earned = txn.earned_amount(format);
                    let owed = txn.owed_amount(format);
                    let balance = earned.saturating_sub(owed);
                    let style = if is_cursor {
                        theme::selected_style()
                    } else if i % 2 == 1 {
                        theme::alt_row_style()
                    } else {
                        theme::normal_style()
                    };
                    let status = if txn.paid {
                        Span::styled("paid", theme::earned_style())
                    } else {
                        Span::styled("open", theme::owed_style())
                    };
                    Row::new(vec![
                        Cell::from(format!("    {}", truncate(&txn.transaction_type, 24))),
                        Cell::from(format_brl(earned)),
                        Cell::from(format_brl(owed)),
                        Cell::from(Span::styled(format_brl(balance), theme::balance_style(balance))),
                        Cell::from(status),
                    ])
                    .style(style)
                }
            }
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(16),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " {} ({} entries) ",
                    ledger.year,
                    ledger.entry_count()
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

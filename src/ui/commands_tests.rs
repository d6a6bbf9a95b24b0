#![allow(clippy::unwrap_used)]

use std::path::Path;

use rust_decimal_macros::dec;

use finboard::config::Config;
use finboard::models::{Month, ProjectStatus};
use finboard::store::{SqliteStore, Store};

use super::app::{App, InputMode, LedgerRow, PendingAction, Screen};
use super::commands::{apply_pending, confirm_pending, handle_command, run_reporting};

fn setup() -> (App, SqliteStore) {
    let config = Config::from_lookup(Path::new("."), |_| None).unwrap();
    let mut app = App::new(&config);
    app.set_year(2024);
    (app, SqliteStore::open_in_memory().unwrap())
}

fn run(input: &str, app: &mut App, store: &mut SqliteStore) {
    handle_command(input, app, store).unwrap();
}

/// Put the cursor on the first entry of `month`, expanding it if needed.
fn select_entry(app: &mut App, month: Month) {
    app.expanded.insert(month);
    app.ledger_index = app
        .ledger_rows()
        .iter()
        .position(|r| matches!(r, LedgerRow::Entry(t) if t.month == month))
        .unwrap();
}

// ── Ledger entries ────────────────────────────────────────────

#[test]
fn test_add_saves_entry_and_updates_totals() {
    let (mut app, mut store) = setup();
    run("add março 1.500,00 200,00 Aluguel", &mut app, &mut store);

    let txns = store.get_transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].month, Month::March);
    assert_eq!(txns[0].earned, "1500.00");
    assert_eq!(txns[0].owed, "200.00");
    assert_eq!(txns[0].transaction_type, "Aluguel");

    assert_eq!(app.totals.total_earned, dec!(1500));
    assert_eq!(app.totals.total_owed, dec!(-200));
    assert_eq!(app.totals.net_amount, dec!(1300));
    assert!(app.expanded.contains(&Month::March));
    assert_eq!(app.status_message, "Added Aluguel for Março 2024");
}

#[test]
fn test_add_same_key_overwrites() {
    let (mut app, mut store) = setup();
    run("add 3 100 0 Aluguel", &mut app, &mut store);
    run("add março 250 0 Aluguel", &mut app, &mut store);

    let txns = store.get_transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].earned, "250.00");
    assert!(app.status_message.starts_with("Updated"));
}

#[test]
fn test_add_defaults_type() {
    let (mut app, mut store) = setup();
    run("add janeiro 100 0", &mut app, &mut store);
    let txns = store.get_transactions().unwrap();
    assert_eq!(txns[0].transaction_type, "Pagamento");
}

#[test]
fn test_add_tolerates_extra_spaces() {
    let (mut app, mut store) = setup();
    run("add março  100   20  Conta   de luz ", &mut app, &mut store);

    let txns = store.get_transactions().unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].earned, "100.00");
    assert_eq!(txns[0].owed, "20.00");
    assert_eq!(txns[0].transaction_type, "Conta de luz");
}

#[test]
fn test_add_rejects_huge_amount() {
    let (mut app, mut store) = setup();
    run("add março 5e28 0", &mut app, &mut store);
    assert!(store.get_transactions().unwrap().is_empty());
    assert_eq!(app.status_message, "amount is too large: '5e28'");
}

#[test]
fn test_add_unknown_month_is_reported() {
    let (mut app, mut store) = setup();
    run("add smarch 100 0", &mut app, &mut store);
    assert!(store.get_transactions().unwrap().is_empty());
    assert!(app.status_message.contains("smarch"));
}

#[test]
fn test_add_negative_amount_is_rejected() {
    let (mut app, mut store) = setup();
    run("add maio -50 0", &mut app, &mut store);
    assert!(store.get_transactions().unwrap().is_empty());
}

#[test]
fn test_add_without_amounts_shows_usage() {
    let (mut app, mut store) = setup();
    run("add maio", &mut app, &mut store);
    assert!(app.status_message.starts_with("Usage"));
}

#[test]
fn test_toggle_paid_flips_and_changes_totals() {
    let (mut app, mut store) = setup();
    run("add abril 1000 400 Cartão", &mut app, &mut store);
    select_entry(&mut app, Month::April);

    run("toggle-paid", &mut app, &mut store);
    assert!(store.get_transactions().unwrap()[0].paid);
    assert_eq!(app.totals.total_earned, dec!(600));
    assert_eq!(app.totals.total_owed, dec!(0));

    run("toggle-paid", &mut app, &mut store);
    assert!(!store.get_transactions().unwrap()[0].paid);
}

#[test]
fn test_toggle_paid_on_month_row_does_nothing() {
    let (mut app, mut store) = setup();
    run("add abril 1000 400", &mut app, &mut store);
    app.ledger_index = 0;
    run("toggle-paid", &mut app, &mut store);
    assert!(!store.get_transactions().unwrap()[0].paid);
}

#[test]
fn test_edit_keeps_paid_flag() {
    let (mut app, mut store) = setup();
    run("add junho 100 50 Luz", &mut app, &mut store);
    select_entry(&mut app, Month::June);
    run("toggle-paid", &mut app, &mut store);
    select_entry(&mut app, Month::June);

    run("edit 300 75", &mut app, &mut store);
    let txn = &store.get_transactions().unwrap()[0];
    assert_eq!(txn.earned, "300.00");
    assert_eq!(txn.owed, "75.00");
    assert!(txn.paid);
}

#[test]
fn test_delete_needs_confirmation() {
    let (mut app, mut store) = setup();
    run("add julho 100 0 Extra", &mut app, &mut store);
    select_entry(&mut app, Month::July);

    run("delete", &mut app, &mut store);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert_eq!(store.get_transactions().unwrap().len(), 1);

    let action = app.pending_action.take().unwrap();
    apply_pending(action, &mut app, &mut store).unwrap();
    assert!(store.get_transactions().unwrap().is_empty());
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn test_store_failure_is_reported_not_returned() {
    let (mut app, mut store) = setup();
    run("add agosto 100 0 Bônus", &mut app, &mut store);
    select_entry(&mut app, Month::August);
    let id = app.selected_transaction().unwrap().id.unwrap();
    store.delete_transaction(id).unwrap();

    run_reporting("toggle-paid", &mut app, &mut store);
    assert_eq!(
        app.status_message,
        format!("Error: transaction {id} not found")
    );
    assert!(app.running);
}

#[test]
fn test_failed_confirmation_closes_prompt() {
    let (mut app, mut store) = setup();
    app.confirm(
        "Delete 'Sumiu'?".into(),
        PendingAction::DeleteTransaction {
            id: 999,
            label: "Sumiu".into(),
        },
    );

    confirm_pending(&mut app, &mut store);
    assert_eq!(app.status_message, "Error: transaction 999 not found");
    assert_eq!(app.input_mode, InputMode::Normal);
    assert!(app.pending_action.is_none());
    assert!(app.confirm_message.is_empty());
}

// ── Navigation ────────────────────────────────────────────────

#[test]
fn test_year_commands() {
    let (mut app, mut store) = setup();
    run("year 2022", &mut app, &mut store);
    assert_eq!(app.selected_year, 2022);
    run("next-year", &mut app, &mut store);
    assert_eq!(app.selected_year, 2023);
    run("prev-year", &mut app, &mut store);
    run("prev-year", &mut app, &mut store);
    assert_eq!(app.selected_year, 2021);
}

#[test]
fn test_year_rejects_garbage() {
    let (mut app, mut store) = setup();
    run("year soon", &mut app, &mut store);
    assert_eq!(app.selected_year, 2024);
    assert_eq!(app.status_message, "Invalid year: soon");
}

#[test]
fn test_year_only_shows_its_entries() {
    let (mut app, mut store) = setup();
    run("add janeiro 100 0", &mut app, &mut store);
    run("next-year", &mut app, &mut store);
    assert_eq!(app.year_ledger().entry_count(), 0);
    // Totals span every year
    assert_eq!(app.totals.total_earned, dec!(100));
}

#[test]
fn test_screen_commands() {
    let (mut app, mut store) = setup();
    run("cards", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Cards);
    run("p", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Projects);
    run("ledger", &mut app, &mut store);
    assert_eq!(app.screen, Screen::Ledger);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut store) = setup();
    run("ledgr", &mut app, &mut store);
    assert_eq!(
        app.status_message,
        "Unknown command: :ledgr. Did you mean :ledger?"
    );
}

#[test]
fn test_quit() {
    let (mut app, mut store) = setup();
    run("q", &mut app, &mut store);
    assert!(!app.running);
}

// ── Cards, goals and projects ─────────────────────────────────

#[test]
fn test_add_card_with_spaced_name() {
    let (mut app, mut store) = setup();
    run("add-card Banco do Brasil 5.000,00 1.250,50", &mut app, &mut store);

    let cards = store.get_cards().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].name, "Banco do Brasil");
    assert_eq!(cards[0].remaining(), dec!(3749.50));
    assert_eq!(app.screen, Screen::Cards);
}

#[test]
fn test_edit_card_and_logo() {
    let (mut app, mut store) = setup();
    run("add-card Nubank 1000 100", &mut app, &mut store);
    run("edit-card 2000 500", &mut app, &mut store);
    run("image https://example.com/nu.png", &mut app, &mut store);

    let card = &store.get_cards().unwrap()[0];
    assert_eq!(card.limit(), dec!(2000));
    assert_eq!(card.used_amount(), dec!(500));
    assert_eq!(card.logo_url, "https://example.com/nu.png");
}

#[test]
fn test_goal_deposit_until_reached() {
    let (mut app, mut store) = setup();
    run("add-goal Viagem 1.000,00 250", &mut app, &mut store);
    run("deposit 250", &mut app, &mut store);
    assert_eq!(store.get_goals().unwrap()[0].saved_value, dec!(500));
    assert_eq!(app.status_message, "Viagem: 50% saved");

    run("deposit 500", &mut app, &mut store);
    assert!(store.get_goals().unwrap()[0].is_reached());
    assert_eq!(app.status_message, "Viagem reached!");
}

#[test]
fn test_project_lifecycle() {
    let (mut app, mut store) = setup();
    run("add-project Loja virtual 4.500,00 1.000,00", &mut app, &mut store);
    run("types Design, Frontend", &mut app, &mut store);
    run("status finalizado", &mut app, &mut store);
    run("received 4.500,00", &mut app, &mut store);

    let project = &store.get_projects().unwrap()[0];
    assert_eq!(project.name, "Loja virtual");
    assert_eq!(project.project_types, vec!["Design", "Frontend"]);
    assert_eq!(project.status, ProjectStatus::Finished);
    assert!(project.is_paid_off());
    assert_eq!(app.status_message, "Loja virtual is paid off");
}

#[test]
fn test_status_rejects_unknown() {
    let (mut app, mut store) = setup();
    run("add-project Site 100 0", &mut app, &mut store);
    run("status maybe", &mut app, &mut store);
    assert_eq!(store.get_projects().unwrap()[0].status, ProjectStatus::Working);
    assert!(app.status_message.starts_with("Usage: :status"));
}

#[test]
fn test_delete_card_through_confirmation() {
    let (mut app, mut store) = setup();
    run("add-card Inter 500 0", &mut app, &mut store);
    run("delete", &mut app, &mut store);
    let action = app.pending_action.take().unwrap();
    apply_pending(action, &mut app, &mut store).unwrap();
    assert!(store.get_cards().unwrap().is_empty());
    assert_eq!(app.status_message, "Deleted card: Inter");
}

#[test]
fn test_export_writes_selected_year() {
    let (mut app, mut store) = setup();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    run("add janeiro 100 0", &mut app, &mut store);
    run("next-year", &mut app, &mut store);
    run("add janeiro 200 0", &mut app, &mut store);

    run(&format!("export {}", path.display()), &mut app, &mut store);
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 2);
    assert!(written.contains("2025"));
}

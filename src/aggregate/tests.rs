#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn txn(year: i32, month: Month, earned: &str, owed: &str, paid: bool) -> Transaction {
    let mut t = Transaction::new(year, month, earned, owed, "Pagamento");
    t.paid = paid;
    t
}

fn sample() -> Vec<Transaction> {
    vec![
        txn(2024, Month::January, "1.000,00", "200,00", false),
        txn(2024, Month::January, "50,00", "10,00", true),
        txn(2024, Month::March, "300", "", false),
        txn(2023, Month::March, "999,99", "1,00", false),
        txn(2024, Month::December, "abc", "75,5", true),
    ]
}

// ── compute_totals ────────────────────────────────────────────

#[test]
fn test_totals_empty() {
    let totals = compute_totals(&[]);
    assert_eq!(totals, Totals::default());
    assert_eq!(totals.total_earned, Decimal::ZERO);
    assert_eq!(totals.total_owed, Decimal::ZERO);
    assert_eq!(totals.net_amount, Decimal::ZERO);
}

#[test]
fn test_totals_mixed_paid_and_unpaid() {
    let txns = vec![
        txn(2024, Month::January, "100,00", "20,00", false),
        txn(2024, Month::January, "50,00", "10,00", true),
    ];
    let totals = compute_totals(&txns);
    assert_eq!(totals.total_earned, dec!(140));
    assert_eq!(totals.total_owed, dec!(-20));
    assert_eq!(totals.net_amount, dec!(120));
    assert!(totals.is_positive());
}

#[test]
fn test_unpaid_transaction_moves_both_buckets() {
    let base = sample();
    let before = compute_totals(&base);

    let mut extended = base.clone();
    extended.push(txn(2025, Month::June, "40,25", "15,75", false));
    let after = compute_totals(&extended);

    assert_eq!(after.total_earned - before.total_earned, dec!(40.25));
    assert_eq!(after.total_owed - before.total_owed, dec!(-15.75));
}

#[test]
fn test_paid_transaction_nets_into_earned() {
    let base = sample();
    let before = compute_totals(&base);

    let mut extended = base.clone();
    extended.push(txn(2025, Month::June, "40,25", "15,75", true));
    let after = compute_totals(&extended);

    assert_eq!(after.total_earned - before.total_earned, dec!(24.50));
    assert_eq!(after.total_owed, before.total_owed);
}

#[test]
fn test_net_is_sum_of_buckets() {
    let totals = compute_totals(&sample());
    assert_eq!(totals.net_amount, totals.total_earned + totals.total_owed);
}

#[test]
fn test_totals_ignore_order() {
    let mut txns = sample();
    let forward = compute_totals(&txns);
    txns.reverse();
    assert_eq!(compute_totals(&txns), forward);
}

#[test]
fn test_malformed_amounts_count_as_zero() {
    let txns = vec![txn(2024, Month::May, "abc", "", false)];
    let totals = compute_totals(&txns);
    assert_eq!(totals, Totals::default());
}

#[test]
fn test_outstanding_debt_can_make_net_negative() {
    let txns = vec![txn(2024, Month::May, "10", "30", false)];
    let totals = compute_totals(&txns);
    assert_eq!(totals.net_amount, dec!(-20));
    assert!(!totals.is_positive());
}

#[test]
fn test_legacy_aggregator_uses_legacy_parse() {
    let txns = vec![txn(2024, Month::May, "R$ 1.234,56", "", false)];
    let legacy = Aggregator::new(AmountFormat::Legacy).compute_totals(&txns);
    let grouped = Aggregator::new(AmountFormat::Grouped).compute_totals(&txns);
    assert_eq!(legacy.total_earned, dec!(1.234));
    assert_eq!(grouped.total_earned, dec!(1234.56));
}

// ── group_by_period ───────────────────────────────────────────

#[test]
fn test_group_always_has_twelve_months() {
    let empty = group_by_period(&[], 2024);
    assert_eq!(empty.months.len(), 12);
    assert!(empty.iter().all(|(_, r)| r.is_empty() && r.earned_sum.is_zero()));

    let txns = sample();
    let ledger = group_by_period(&txns, 2024);
    assert_eq!(ledger.months.len(), 12);
    let order: Vec<Month> = ledger.iter().map(|(m, _)| m).collect();
    assert_eq!(order, Month::all().to_vec());
}

#[test]
fn test_group_sums_per_month() {
    let txns = sample();
    let ledger = group_by_period(&txns, 2024);

    let jan = ledger.month(Month::January).unwrap();
    assert_eq!(jan.entries.len(), 2);
    assert_eq!(jan.earned_sum, dec!(1050));
    assert_eq!(jan.owed_sum, dec!(210));

    let mar = ledger.month(Month::March).unwrap();
    assert_eq!(mar.entries.len(), 1);
    assert_eq!(mar.earned_sum, dec!(300));
    assert_eq!(mar.owed_sum, Decimal::ZERO);

    let dec_ = ledger.month(Month::December).unwrap();
    assert_eq!(dec_.earned_sum, Decimal::ZERO);
    assert_eq!(dec_.owed_sum, dec!(75.5));

    assert!(ledger.month(Month::February).unwrap().is_empty());
}

#[test]
fn test_group_sums_ignore_paid_flag() {
    let txns = vec![
        txn(2024, Month::April, "10", "4", true),
        txn(2024, Month::April, "5", "1", false),
    ];
    let ledger = group_by_period(&txns, 2024);
    let apr = ledger.month(Month::April).unwrap();
    assert_eq!(apr.earned_sum, dec!(15));
    assert_eq!(apr.owed_sum, dec!(5));
}

#[test]
fn test_group_partitions_the_year() {
    let txns = sample();
    for year in [2023, 2024, 2025] {
        let ledger = group_by_period(&txns, year);
        let in_year: Vec<&Transaction> = txns.iter().filter(|t| t.year == year).collect();

        let earned: Decimal = in_year.iter().map(|t| t.earned_amount(AmountFormat::Grouped)).sum();
        let owed: Decimal = in_year.iter().map(|t| t.owed_amount(AmountFormat::Grouped)).sum();

        assert_eq!(ledger.earned_total(), earned, "earned partition for {year}");
        assert_eq!(ledger.owed_total(), owed, "owed partition for {year}");
        assert_eq!(ledger.entry_count(), in_year.len());
    }
}

#[test]
fn test_group_keeps_input_order_within_month() {
    let mut first = txn(2024, Month::July, "1", "", false);
    first.transaction_type = "Primeiro".into();
    let mut second = txn(2024, Month::July, "2", "", false);
    second.transaction_type = "Segundo".into();
    let txns = vec![first, second];

    let ledger = group_by_period(&txns, 2024);
    let types: Vec<&str> = ledger
        .month(Month::July)
        .unwrap()
        .entries
        .iter()
        .map(|t| t.transaction_type.as_str())
        .collect();
    assert_eq!(types, vec!["Primeiro", "Segundo"]);
}

#[test]
fn test_group_other_year_is_empty() {
    let txns = sample();
    let ledger = group_by_period(&txns, 1999);
    assert_eq!(ledger.year, 1999);
    assert_eq!(ledger.entry_count(), 0);
    assert_eq!(ledger.earned_total(), Decimal::ZERO);
}

// ── huge amounts ──────────────────────────────────────────────

fn huge_pair(paid: bool) -> Vec<Transaction> {
    let mut first = txn(2024, Month::May, "5e28", "5e28", paid);
    first.transaction_type = "Primeiro".into();
    let mut second = txn(2024, Month::May, "5e28", "5e28", paid);
    second.transaction_type = "Segundo".into();
    vec![first, second]
}

#[test]
fn test_totals_saturate_instead_of_overflowing() {
    let totals = compute_totals(&huge_pair(false));
    assert_eq!(totals.total_earned, Decimal::MAX);
    assert_eq!(totals.total_owed, Decimal::MIN);
    assert_eq!(totals.net_amount, Decimal::ZERO);
}

#[test]
fn test_paid_totals_saturate() {
    let mut txns = huge_pair(true);
    for t in &mut txns {
        t.owed = String::new();
    }
    let totals = compute_totals(&txns);
    assert_eq!(totals.total_earned, Decimal::MAX);
    assert_eq!(totals.total_owed, Decimal::ZERO);
}

#[test]
fn test_group_saturates_instead_of_overflowing() {
    let txns = huge_pair(false);
    let ledger = group_by_period(&txns, 2024);
    let may = ledger.month(Month::May).unwrap();
    assert_eq!(may.earned_sum, Decimal::MAX);
    assert_eq!(may.owed_sum, Decimal::MAX);
    assert_eq!(may.balance(), Decimal::ZERO);
    assert_eq!(ledger.earned_total(), Decimal::MAX);
    assert_eq!(ledger.balance(), Decimal::ZERO);
    assert_eq!(ledger.entry_count(), 2);
}

#[test]
fn test_year_balance() {
    let txns = sample();
    let ledger = group_by_period(&txns, 2024);
    assert_eq!(ledger.balance(), ledger.earned_total() - ledger.owed_total());
    assert_eq!(
        ledger.month(Month::January).unwrap().balance(),
        dec!(1050) - dec!(210)
    );
}

#[test]
fn test_year_counts_ignore_other_years() {
    let txns = sample();
    let ledger = group_by_period(&txns, 2024);
    assert_eq!(ledger.entry_count(), 4);
    assert_eq!(ledger.open_count(), 2);

    let older = group_by_period(&txns, 2023);
    assert_eq!(older.entry_count(), 1);
    assert_eq!(older.open_count(), 1);

    assert_eq!(group_by_period(&txns, 2022).open_count(), 0);
}

// ── years_present ─────────────────────────────────────────────

#[test]
fn test_years_present() {
    assert_eq!(years_present(&sample()), vec![2023, 2024]);
    assert!(years_present(&[]).is_empty());
}

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::Error;
use crate::money::AmountFormat;

// ── Month ─────────────────────────────────────────────────────

#[test]
fn test_month_parse_portuguese() {
    assert_eq!(Month::parse("Janeiro").unwrap(), Month::January);
    assert_eq!(Month::parse("março").unwrap(), Month::March);
    assert_eq!(Month::parse("MARCO").unwrap(), Month::March);
    assert_eq!(Month::parse("dez").unwrap(), Month::December);
}

#[test]
fn test_month_parse_english_and_numbers() {
    assert_eq!(Month::parse("february").unwrap(), Month::February);
    assert_eq!(Month::parse("Aug").unwrap(), Month::August);
    assert_eq!(Month::parse("7").unwrap(), Month::July);
    assert_eq!(Month::parse(" 12 ").unwrap(), Month::December);
}

#[test]
fn test_month_parse_rejects_unknown() {
    assert_eq!(
        Month::parse("Smarch"),
        Err(Error::UnknownMonth("Smarch".into()))
    );
    assert!(Month::parse("0").is_err());
    assert!(Month::parse("13").is_err());
    assert!(Month::parse("").is_err());
}

#[test]
fn test_month_roundtrip() {
    for m in Month::all() {
        assert_eq!(Month::parse(m.as_str()).unwrap(), *m, "roundtrip failed for {m}");
        assert_eq!(Month::from_number(m.number()), Some(*m));
    }
}

#[test]
fn test_month_order_is_calendar_order() {
    let all = Month::all();
    assert_eq!(all.len(), 12);
    assert!(all.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(Month::January.number(), 1);
    assert_eq!(Month::December.number(), 12);
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_new_defaults() {
    let txn = Transaction::new(2024, Month::May, "10.00", "0.00", "Pagamento");
    assert!(txn.id.is_none());
    assert!(!txn.is_saved());
    assert!(!txn.paid);
}

#[test]
fn test_transaction_key_match() {
    let txn = Transaction::new(2024, Month::May, "10.00", "0.00", "Salário");
    assert!(txn.has_key(2024, Month::May, "Salário"));
    assert!(!txn.has_key(2023, Month::May, "Salário"));
    assert!(!txn.has_key(2024, Month::June, "Salário"));
    assert!(!txn.has_key(2024, Month::May, "Pagamento"));
}

#[test]
fn test_transaction_amounts_are_lenient() {
    let txn = Transaction::new(2024, Month::May, "R$ 1.000,50", "n/a", "Pagamento");
    assert_eq!(txn.earned_amount(AmountFormat::Grouped), dec!(1000.50));
    assert_eq!(txn.owed_amount(AmountFormat::Grouped), Decimal::ZERO);
}

#[test]
fn test_draft_validate_normalizes() {
    let draft = TransactionDraft {
        year: 2024,
        month: "Abril".into(),
        earned: "R$ 1.234,5".into(),
        owed: "".into(),
        transaction_type: "  ".into(),
    };
    let txn = draft.validate(AmountFormat::Grouped).unwrap();
    assert_eq!(txn.year, 2024);
    assert_eq!(txn.month, Month::April);
    assert_eq!(txn.earned, "1234.50");
    assert_eq!(txn.owed, "0.00");
    assert_eq!(txn.transaction_type, DEFAULT_TRANSACTION_TYPE);
    assert!(!txn.paid);
}

#[test]
fn test_draft_validate_rejects_bad_input() {
    let base = TransactionDraft {
        year: 2024,
        month: "Abril".into(),
        earned: "10".into(),
        owed: "5".into(),
        transaction_type: "Pagamento".into(),
    };

    let bad_month = TransactionDraft {
        month: "Foo".into(),
        ..base.clone()
    };
    assert!(matches!(
        bad_month.validate(AmountFormat::Grouped),
        Err(Error::UnknownMonth(_))
    ));

    let bad_amount = TransactionDraft {
        earned: "ten".into(),
        ..base.clone()
    };
    assert_eq!(
        bad_amount.validate(AmountFormat::Grouped),
        Err(Error::InvalidAmount("ten".into()))
    );

    let negative = TransactionDraft {
        owed: "-5,00".into(),
        ..base
    };
    assert_eq!(
        negative.validate(AmountFormat::Grouped),
        Err(Error::NegativeAmount("-5,00".into()))
    );
}

#[test]
fn test_draft_validate_rejects_huge_amounts() {
    let huge = TransactionDraft {
        year: 2024,
        month: "Maio".into(),
        earned: "5e28".into(),
        owed: "0".into(),
        transaction_type: String::new(),
    };
    assert_eq!(
        huge.validate(AmountFormat::Grouped),
        Err(Error::AmountTooLarge("5e28".into()))
    );

    let at_limit = TransactionDraft {
        earned: MAX_AMOUNT.to_string(),
        ..huge
    };
    assert!(at_limit.validate(AmountFormat::Grouped).is_ok());
}

// ── CreditCard ────────────────────────────────────────────────

#[test]
fn test_card_new_normalizes_amounts() {
    let card = CreditCard::new(" Nubank ", "R$ 5.000,00", "1250,5", "", AmountFormat::Grouped).unwrap();
    assert_eq!(card.name, "Nubank");
    assert_eq!(card.available, "5000.00");
    assert_eq!(card.used, "1250.50");
    assert_eq!(card.remaining(), dec!(3749.50));
    assert_eq!(card.usage_percent(), dec!(25.01));
}

#[test]
fn test_card_zero_limit_has_zero_usage() {
    let card = CreditCard::new("Empty", "", "100", "", AmountFormat::Grouped).unwrap();
    assert_eq!(card.usage_percent(), Decimal::ZERO);
    assert_eq!(card.remaining(), dec!(-100));
}

#[test]
fn test_card_requires_name() {
    assert_eq!(
        CreditCard::new("  ", "100", "0", "", AmountFormat::Grouped),
        Err(Error::EmptyName)
    );
}

// ── SavingsGoal ───────────────────────────────────────────────

#[test]
fn test_goal_progress() {
    let goal = SavingsGoal::new("Viagem", dec!(2000), dec!(500)).unwrap();
    assert_eq!(goal.progress_percent(), dec!(25));
    assert_eq!(goal.remaining(), dec!(1500));
    assert!(!goal.is_reached());
}

#[test]
fn test_goal_progress_is_capped() {
    let goal = SavingsGoal::new("Notebook", dec!(100), dec!(250)).unwrap();
    assert_eq!(goal.progress_percent(), dec!(100));
    assert_eq!(goal.remaining(), Decimal::ZERO);
    assert!(goal.is_reached());
}

#[test]
fn test_goal_without_target() {
    let goal = SavingsGoal::new("Someday", Decimal::ZERO, dec!(10)).unwrap();
    assert_eq!(goal.progress_percent(), Decimal::ZERO);
    assert!(!goal.is_reached());
}

#[test]
fn test_goal_validation() {
    assert_eq!(SavingsGoal::new("", dec!(1), dec!(0)), Err(Error::EmptyName));
    assert!(matches!(
        SavingsGoal::new("Car", dec!(-1), dec!(0)),
        Err(Error::NegativeAmount(_))
    ));
}

#[test]
fn test_goal_with_image() {
    let goal = SavingsGoal::new("Car", dec!(1), dec!(0))
        .unwrap()
        .with_image(" https://example.com/car.png ");
    assert_eq!(goal.image_url, "https://example.com/car.png");
}

// ── Project ───────────────────────────────────────────────────

#[test]
fn test_project_defaults() {
    let project = Project::new("Site", dec!(3000), dec!(1000)).unwrap();
    assert!(project.id.is_none());
    assert_eq!(project.status, ProjectStatus::Working);
    assert!(project.project_types.is_empty());
    assert_eq!(project.outstanding(), dec!(2000));
    assert!(!project.is_paid_off());
}

#[test]
fn test_project_types() {
    let project = Project::new("Loja", dec!(1), dec!(1))
        .unwrap()
        .with_types("Design, Front-end;;  Back-end ,");
    assert_eq!(project.project_types, vec!["Design", "Front-end", "Back-end"]);
    assert_eq!(project.types_label(), "Design, Front-end, Back-end");
    assert!(project.is_paid_off());
}

#[test]
fn test_project_status_parse() {
    assert_eq!(ProjectStatus::parse("Trabalhando").unwrap(), ProjectStatus::Working);
    assert_eq!(ProjectStatus::parse("paused").unwrap(), ProjectStatus::Paused);
    assert_eq!(ProjectStatus::parse("FINALIZADO").unwrap(), ProjectStatus::Finished);
    assert!(ProjectStatus::parse("abandoned").is_err());
    for status in ProjectStatus::all() {
        assert_eq!(ProjectStatus::parse(status.as_str()).unwrap(), *status);
    }
}

// ── huge stored values ────────────────────────────────────────

#[test]
fn test_card_usage_does_not_overflow() {
    let card = CreditCard {
        id: None,
        name: "Antigo".into(),
        logo_url: String::new(),
        available: "0.0001".into(),
        used: "5e28".into(),
    };
    assert_eq!(card.usage_percent(), Decimal::MAX);
    assert!(card.remaining() < Decimal::ZERO);
}

#[test]
fn test_goal_progress_does_not_overflow() {
    let goal = SavingsGoal {
        id: None,
        name: "Antiga".into(),
        value: dec!(0.0001),
        saved_value: Decimal::MAX,
        image_url: String::new(),
    };
    assert_eq!(goal.progress_percent(), dec!(100));
    assert!(goal.is_reached());
    assert_eq!(goal.remaining(), Decimal::ZERO);
}

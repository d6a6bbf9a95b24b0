use anyhow::{Context, Result};
use std::path::PathBuf;

use finboard::aggregate::{years_present, Aggregator};
use finboard::config::{expand_home, Config};
use finboard::models::TransactionDraft;
use finboard::money::format_brl;
use finboard::store::{Store, Upsert};

pub(crate) fn as_cli(args: &[String], store: &mut dyn Store, config: &Config) -> Result<()> {
    let aggregator = Aggregator::new(config.amount_format);
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], store, &aggregator, config),
        "ledger" | "l" => cli_ledger(&args[2..], store, &aggregator, config),
        "add" => cli_add(&args[2..], store, config),
        "pay" => cli_set_paid(&args[2..], store, true),
        "unpay" => cli_set_paid(&args[2..], store, false),
        "delete" => cli_delete(&args[2..], store),
        "cards" => cli_cards(store),
        "goals" => cli_goals(store),
        "projects" => cli_projects(store),
        "export" => cli_export(&args[2..], store, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("finboard {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("finboard: yearly income and debt ledger");
    println!();
    println!("Usage: finboard [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                  Launch interactive TUI");
    println!("  summary [YYYY]                          Print totals and the year's balance");
    println!("  ledger [YYYY]                           Print the twelve-month ledger");
    println!("  add <YYYY> <month> <earned> <owed> [type]");
    println!("                                          Add or overwrite an entry");
    println!("  pay <id>                                Mark an entry as paid");
    println!("  unpay <id>                              Mark an entry as open");
    println!("  delete <id>                             Delete an entry");
    println!("  cards                                   List credit cards");
    println!("  goals                                   List savings goals");
    println!("  projects                                List projects");
    println!("  export [path]                           Export entries to CSV");
    println!("    --year <YYYY>                         Only export one year");
    println!("  --help, -h                              Show this help");
    println!("  --version, -V                           Show version");
}

fn year_arg(args: &[String], config: &Config) -> Result<i32> {
    match args.first().filter(|a| !a.starts_with('-')) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid year: {raw}")),
        None => Ok(config.default_year),
    }
}

fn id_arg(args: &[String], usage: &str) -> Result<i64> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: {usage}");
    };
    raw.parse().with_context(|| format!("Invalid id: {raw}"))
}

// ── Ledger ───────────────────────────────────────────────────

fn cli_summary(
    args: &[String],
    store: &dyn Store,
    aggregator: &Aggregator,
    config: &Config,
) -> Result<()> {
    let year = year_arg(args, config)?;
    let txns = store.get_transactions()?;
    let totals = aggregator.compute_totals(&txns);
    let ledger = aggregator.group_by_period(&txns, year);

    println!("finboard: {year}");
    println!("{}", "─".repeat(40));
    println!("  Earned:       {}", format_brl(totals.total_earned));
    println!("  Owed:         {}", format_brl(totals.total_owed));
    println!("  Net:          {}", format_brl(totals.net_amount));
    println!(
        "  {year} balance: {}",
        format_brl(ledger.balance())
    );
    println!(
        "  {year} entries: {} ({} open)",
        ledger.entry_count(),
        ledger.open_count()
    );
    println!("  All entries:  {}", txns.len());

    let years = years_present(&txns);
    if !years.is_empty() {
        let list: Vec<String> = years.iter().map(|y| y.to_string()).collect();
        println!("  Years:        {}", list.join(", "));
    }
    Ok(())
}

fn cli_ledger(
    args: &[String],
    store: &dyn Store,
    aggregator: &Aggregator,
    config: &Config,
) -> Result<()> {
    let year = year_arg(args, config)?;
    let txns = store.get_transactions()?;
    let ledger = aggregator.group_by_period(&txns, year);
    let format = aggregator.format();

    println!(
        "{:<6} {:<24} {:>16} {:>16} {:>16}",
        "ID", "Month / Type", "Earned", "Owed", "Status"
    );
    println!("{}", "─".repeat(82));
    for (month, rollup) in ledger.iter() {
        println!(
            "{:<6} {:<24} {:>16} {:>16}",
            "",
            month.as_str(),
            format_brl(rollup.earned_sum),
            format_brl(rollup.owed_sum),
        );
        for txn in &rollup.entries {
            println!(
                "{:<6} {:<24} {:>16} {:>16} {:>16}",
                txn.id.map(|id| id.to_string()).unwrap_or_default(),
                format!("  {}", txn.transaction_type),
                format_brl(txn.earned_amount(format)),
                format_brl(txn.owed_amount(format)),
                if txn.paid { "paid" } else { "open" },
            );
        }
    }
    println!("{}", "─".repeat(82));
    println!(
        "{:<6} {:<24} {:>16} {:>16}",
        "",
        format!("{year} ({} entries)", ledger.entry_count()),
        format_brl(ledger.earned_total()),
        format_brl(ledger.owed_total()),
    );
    Ok(())
}

fn cli_add(args: &[String], store: &mut dyn Store, config: &Config) -> Result<()> {
    if args.len() < 4 {
        anyhow::bail!("Usage: finboard add <YYYY> <month> <earned> <owed> [type]");
    }
    let year: i32 = args[0]
        .parse()
        .with_context(|| format!("Invalid year: {}", args[0]))?;
    let draft = TransactionDraft {
        year,
        month: args[1].clone(),
        earned: args[2].clone(),
        owed: args[3].clone(),
        transaction_type: args[4..].join(" "),
    };
    let txn = draft.validate(config.amount_format)?;

    match store.upsert_transaction(&txn)? {
        Upsert::Inserted(id) => println!(
            "Added #{id}: {} {} {}",
            txn.month, txn.year, txn.transaction_type
        ),
        Upsert::Updated(id) => println!(
            "Updated #{id}: {} {} {}",
            txn.month, txn.year, txn.transaction_type
        ),
    }
    Ok(())
}

fn cli_set_paid(args: &[String], store: &mut dyn Store, paid: bool) -> Result<()> {
    let usage = if paid {
        "finboard pay <id>"
    } else {
        "finboard unpay <id>"
    };
    let id = id_arg(args, usage)?;
    store.set_transaction_paid(id, paid)?;
    println!("#{id} marked {}", if paid { "paid" } else { "open" });
    Ok(())
}

fn cli_delete(args: &[String], store: &mut dyn Store) -> Result<()> {
    let id = id_arg(args, "finboard delete <id>")?;
    let Some(txn) = store.get_transaction(id)? else {
        anyhow::bail!(finboard::Error::NotFound {
            kind: "transaction",
            id
        });
    };
    store.delete_transaction(id)?;
    println!(
        "Deleted #{id}: {} {} {}",
        txn.month, txn.year, txn.transaction_type
    );
    Ok(())
}

// ── Cards, goals and projects ────────────────────────────────

fn cli_cards(store: &dyn Store) -> Result<()> {
    let cards = store.get_cards()?;
    if cards.is_empty() {
        println!("No cards");
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:>15} {:>15} {:>15} {:>6}",
        "ID", "Name", "Limit", "Used", "Free", "Use"
    );
    println!("{}", "─".repeat(80));
    for card in &cards {
        println!(
            "{:<4} {:<20} {:>15} {:>15} {:>15} {:>5.0}%",
            card.id.unwrap_or(0),
            card.name,
            format_brl(card.limit()),
            format_brl(card.used_amount()),
            format_brl(card.remaining()),
            card.usage_percent(),
        );
    }
    Ok(())
}

fn cli_goals(store: &dyn Store) -> Result<()> {
    let goals = store.get_goals()?;
    if goals.is_empty() {
        println!("No goals");
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:>15} {:>15} {:>6}",
        "ID", "Name", "Saved", "Target", "Done"
    );
    println!("{}", "─".repeat(64));
    for goal in &goals {
        println!(
            "{:<4} {:<20} {:>15} {:>15} {:>5.0}%",
            goal.id.unwrap_or(0),
            goal.name,
            format_brl(goal.saved_value),
            format_brl(goal.value),
            goal.progress_percent(),
        );
    }
    Ok(())
}

fn cli_projects(store: &dyn Store) -> Result<()> {
    let projects = store.get_projects()?;
    if projects.is_empty() {
        println!("No projects");
        return Ok(());
    }

    println!(
        "{:<4} {:<20} {:<10} {:>15} {:>15}  Types",
        "#", "Name", "Status", "Value", "Outstanding"
    );
    println!("{}", "─".repeat(80));
    for project in &projects {
        println!(
            "{:<4} {:<20} {:<10} {:>15} {:>15}  {}",
            project.order,
            project.name,
            project.status.as_str(),
            format_brl(project.value),
            format_brl(project.outstanding()),
            project.types_label(),
        );
    }
    Ok(())
}

// ── Export ───────────────────────────────────────────────────

fn cli_export(args: &[String], store: &dyn Store, config: &Config) -> Result<()> {
    let year = match args.windows(2).find(|w| w[0] == "--year") {
        Some(w) => Some(
            w[1].parse::<i32>()
                .with_context(|| format!("Invalid year: {}", w[1]))?,
        ),
        None => None,
    };

    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(expand_home(a)))
        .unwrap_or_else(|| {
            let suffix = year.map(|y| format!("-{y}")).unwrap_or_default();
            config.data_dir.join(format!("finboard-export{suffix}.csv"))
        });

    let count = finboard::export::export_to_csv(store, &output_path, year)?;
    if count == 0 {
        println!("No entries to export");
    } else {
        println!("Exported {count} entries to {}", output_path.display());
    }
    Ok(())
}

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use rust_decimal::Decimal;

use finboard::config::expand_home;
use finboard::models::{
    parse_amount, CreditCard, Project, ProjectStatus, SavingsGoal, TransactionDraft,
};
use finboard::money::AmountFormat;
use finboard::store::{Store, Upsert};
use finboard::Error;

use super::app::{App, InputMode, PendingAction, Screen};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut dyn Store) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit finboard", cmd_quit, r);
    register_command!("quit", "Quit finboard", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("l", "Go to Ledger", cmd_ledger, r);
    register_command!("ledger", "Go to Ledger", cmd_ledger, r);
    register_command!("c", "Go to Cards", cmd_cards, r);
    register_command!("cards", "Go to Cards", cmd_cards, r);
    register_command!("g", "Go to Goals", cmd_goals, r);
    register_command!("goals", "Go to Goals", cmd_goals, r);
    register_command!("p", "Go to Projects", cmd_projects, r);
    register_command!("projects", "Go to Projects", cmd_projects, r);
    register_command!("year", "Show a year (e.g. :year 2024)", cmd_year, r);
    register_command!("y", "Show a year (e.g. :y 2024)", cmd_year, r);
    register_command!("next-year", "Go to next year", cmd_next_year, r);
    register_command!("prev-year", "Go to previous year", cmd_prev_year, r);
    register_command!(
        "add",
        "Save an entry (e.g. :add março 1.500,00 200,00 Aluguel)",
        cmd_add,
        r
    );
    register_command!(
        "edit",
        "Change the selected entry's amounts (e.g. :edit 1.500,00 0)",
        cmd_edit,
        r
    );
    register_command!(
        "toggle-paid",
        "Mark the selected entry paid or unpaid",
        cmd_toggle_paid,
        r
    );
    register_command!(
        "delete",
        "Delete the selected entry, card, goal or project",
        cmd_delete,
        r
    );
    register_command!(
        "add-card",
        "Add a card (e.g. :add-card Nubank 5.000,00 1.250,50)",
        cmd_add_card,
        r
    );
    register_command!(
        "edit-card",
        "Change the selected card's limit and usage (e.g. :edit-card 6000 900)",
        cmd_edit_card,
        r
    );
    register_command!(
        "add-goal",
        "Add a savings goal (e.g. :add-goal Viagem 3.000,00 250)",
        cmd_add_goal,
        r
    );
    register_command!(
        "deposit",
        "Add to the selected goal's savings (e.g. :deposit 150,00)",
        cmd_deposit,
        r
    );
    register_command!(
        "add-project",
        "Add a project (e.g. :add-project Loja virtual 4.500,00 1.000,00)",
        cmd_add_project,
        r
    );
    register_command!(
        "status",
        "Set the selected project's status (trabalhando, pausado, finalizado)",
        cmd_status,
        r
    );
    register_command!(
        "types",
        "Set the selected project's types (e.g. :types Design, Frontend)",
        cmd_types,
        r
    );
    register_command!(
        "received",
        "Set what the client has paid on the selected project (e.g. :received 2.000,00)",
        cmd_received,
        r
    );
    register_command!(
        "image",
        "Set the image or logo URL of the selected card, goal or project",
        cmd_image,
        r
    );
    register_command!(
        "export",
        "Export the shown year to CSV (e.g. :export ~/finboard.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut dyn Store,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        tracing::debug!(command = cmd_name, args, "running command");
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

/// Run `input`, reporting a failure on the status line instead of returning
/// it. Key bindings and the command bar both go through here.
pub(crate) fn run_reporting(input: &str, app: &mut App, store: &mut dyn Store) {
    if let Err(e) = handle_command(input, app, store) {
        tracing::warn!(command = %input, error = %e, "command failed");
        app.set_status(format!("Error: {e}"));
    }
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Split `args` into a leading name and `n` trailing amount tokens.
/// Names may contain spaces, amounts may not.
fn split_name_and_amounts(args: &str, n: usize) -> Option<(&str, Vec<&str>)> {
    let mut rest = args.trim();
    let mut amounts = Vec::with_capacity(n);
    for _ in 0..n {
        let (head, last) = rest.rsplit_once(' ')?;
        amounts.push(last);
        rest = head.trim_end();
    }
    if rest.is_empty() {
        return None;
    }
    amounts.reverse();
    Some((rest, amounts))
}

fn parse_pair(amounts: &[&str], format: AmountFormat) -> Result<(Decimal, Decimal), Error> {
    Ok((
        parse_amount(amounts[0], format)?,
        parse_amount(amounts[1], format)?,
    ))
}

// ── Navigation ───────────────────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut dyn Store) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut dyn Store) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_ledger(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    app.screen = Screen::Ledger;
    app.refresh_ledger(store)?;
    Ok(())
}

fn cmd_cards(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    app.screen = Screen::Cards;
    app.refresh_cards(store)?;
    Ok(())
}

fn cmd_goals(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    app.screen = Screen::Goals;
    app.refresh_goals(store)?;
    Ok(())
}

fn cmd_projects(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    app.screen = Screen::Projects;
    app.refresh_projects(store)?;
    Ok(())
}

fn cmd_year(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status(format!("Showing {}. Usage: :year <YYYY>", app.selected_year));
        return Ok(());
    }
    match args.parse::<i32>() {
        Ok(year) if (1900..=9999).contains(&year) => {
            app.set_year(year);
            app.screen = Screen::Ledger;
            app.refresh_ledger(store)?;
            app.set_status(format!("Year: {year}"));
        }
        _ => app.set_status(format!("Invalid year: {args}")),
    }
    Ok(())
}

fn cmd_next_year(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    advance_year(app, store, 1)
}

fn cmd_prev_year(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    advance_year(app, store, -1)
}

fn advance_year(app: &mut App, store: &mut dyn Store, delta: i32) -> anyhow::Result<()> {
    let year = app.selected_year + delta;
    app.set_year(year);
    app.refresh_ledger(store)?;
    app.set_status(format!("Year: {year}"));
    Ok(())
}

// ── Ledger entries ───────────────────────────────────────────

fn cmd_add(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() < 3 {
        app.set_status("Usage: :add <month> <earned> <owed> [type]");
        return Ok(());
    }

    let draft = TransactionDraft {
        year: app.selected_year,
        month: parts[0].to_string(),
        earned: parts[1].to_string(),
        owed: parts[2].to_string(),
        transaction_type: parts[3..].join(" "),
    };
    let txn = match draft.validate(app.format()) {
        Ok(txn) => txn,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };

    let outcome = store.upsert_transaction(&txn)?;
    app.expanded.insert(txn.month);
    app.screen = Screen::Ledger;
    app.refresh_ledger(store)?;
    let verb = match outcome {
        Upsert::Inserted(_) => "Added",
        Upsert::Updated(_) => "Updated",
    };
    app.set_status(format!(
        "{verb} {} for {} {}",
        txn.transaction_type, txn.month, txn.year
    ));
    Ok(())
}

fn cmd_edit(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some(selected) = app.selected_transaction().cloned() else {
        app.set_status("Select an entry in the ledger first");
        return Ok(());
    };
    let Some(id) = selected.id else {
        return Ok(());
    };
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :edit <earned> <owed>");
        return Ok(());
    }

    let draft = TransactionDraft {
        year: selected.year,
        month: selected.month.as_str().to_string(),
        earned: parts[0].to_string(),
        owed: parts[1].to_string(),
        transaction_type: selected.transaction_type.clone(),
    };
    let mut txn = match draft.validate(app.format()) {
        Ok(txn) => txn,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    txn.paid = selected.paid;

    store.update_transaction(id, &txn)?;
    app.refresh_ledger(store)?;
    app.set_status(format!("Updated {}", txn.transaction_type));
    Ok(())
}

fn cmd_toggle_paid(_args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some((id, paid, label)) = app
        .selected_transaction()
        .and_then(|t| t.id.map(|id| (id, t.paid, t.transaction_type.clone())))
    else {
        app.set_status("Select an entry in the ledger first");
        return Ok(());
    };

    store.set_transaction_paid(id, !paid)?;
    app.refresh_ledger(store)?;
    app.set_status(if paid {
        format!("{label} marked unpaid")
    } else {
        format!("{label} marked paid")
    });
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _store: &mut dyn Store) -> anyhow::Result<()> {
    let request = match app.screen {
        Screen::Ledger => app.selected_transaction().and_then(|t| {
            let label = format!("{} {} {}", t.transaction_type, t.month, t.year);
            t.id.map(|id| {
                (
                    format!("Delete '{label}'?"),
                    PendingAction::DeleteTransaction { id, label },
                )
            })
        }),
        Screen::Cards => app.selected_card().and_then(|c| {
            c.id.map(|id| {
                (
                    format!("Delete card '{}'?", c.name),
                    PendingAction::DeleteCard {
                        id,
                        name: c.name.clone(),
                    },
                )
            })
        }),
        Screen::Goals => app.selected_goal().and_then(|g| {
            g.id.map(|id| {
                (
                    format!("Delete goal '{}'?", g.name),
                    PendingAction::DeleteGoal {
                        id,
                        name: g.name.clone(),
                    },
                )
            })
        }),
        Screen::Projects => app.selected_project().and_then(|p| {
            p.id.map(|id| {
                (
                    format!("Delete project '{}'?", p.name),
                    PendingAction::DeleteProject {
                        id,
                        name: p.name.clone(),
                    },
                )
            })
        }),
    };

    match request {
        Some((message, action)) => app.confirm(message, action),
        None => app.set_status("Nothing selected to delete"),
    }
    Ok(())
}

/// Carry out a confirmed [`PendingAction`].
pub(crate) fn apply_pending(
    action: PendingAction,
    app: &mut App,
    store: &mut dyn Store,
) -> anyhow::Result<()> {
    match action {
        PendingAction::DeleteTransaction { id, label } => {
            store.delete_transaction(id)?;
            app.refresh_ledger(store)?;
            app.set_status(format!("Deleted: {label}"));
        }
        PendingAction::DeleteCard { id, name } => {
            store.delete_card(id)?;
            app.refresh_cards(store)?;
            app.set_status(format!("Deleted card: {name}"));
        }
        PendingAction::DeleteGoal { id, name } => {
            store.delete_goal(id)?;
            app.refresh_goals(store)?;
            app.set_status(format!("Deleted goal: {name}"));
        }
        PendingAction::DeleteProject { id, name } => {
            store.delete_project(id)?;
            app.refresh_projects(store)?;
            app.set_status(format!("Deleted project: {name}"));
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    Ok(())
}

/// Apply the pending action after a "y" at the prompt. A failure lands on
/// the status line and the prompt is closed either way.
pub(crate) fn confirm_pending(app: &mut App, store: &mut dyn Store) {
    if let Some(action) = app.pending_action.take() {
        if let Err(e) = apply_pending(action, app, store) {
            tracing::warn!(error = %e, "confirmed action failed");
            app.set_status(format!("Error: {e}"));
        }
    }
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
}

// ── Cards ────────────────────────────────────────────────────

fn cmd_add_card(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some((name, amounts)) = split_name_and_amounts(args, 2) else {
        app.set_status("Usage: :add-card <name> <limit> <used>");
        return Ok(());
    };

    let card = match CreditCard::new(name, amounts[0], amounts[1], "", app.format()) {
        Ok(card) => card,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    store.insert_card(&card)?;
    app.screen = Screen::Cards;
    app.refresh_cards(store)?;
    app.card_index = app.cards.len().saturating_sub(1);
    app.set_status(format!("Added card: {}", card.name));
    Ok(())
}

fn cmd_edit_card(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some(selected) = app.selected_card().cloned() else {
        app.set_status("Select a card first");
        return Ok(());
    };
    let Some(id) = selected.id else {
        return Ok(());
    };
    let parts: Vec<&str> = args.split_whitespace().collect();
    if parts.len() != 2 {
        app.set_status("Usage: :edit-card <limit> <used>");
        return Ok(());
    }

    let card = match CreditCard::new(
        &selected.name,
        parts[0],
        parts[1],
        &selected.logo_url,
        app.format(),
    ) {
        Ok(card) => card,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    store.update_card(id, &card)?;
    app.refresh_cards(store)?;
    app.set_status(format!("Updated card: {}", card.name));
    Ok(())
}

// ── Goals ────────────────────────────────────────────────────

fn cmd_add_goal(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some((name, amounts)) = split_name_and_amounts(args, 2) else {
        app.set_status("Usage: :add-goal <name> <target> <saved>");
        return Ok(());
    };

    let goal = parse_pair(&amounts, app.format())
        .and_then(|(value, saved)| SavingsGoal::new(name, value, saved));
    let goal = match goal {
        Ok(goal) => goal,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    store.insert_goal(&goal)?;
    app.screen = Screen::Goals;
    app.refresh_goals(store)?;
    app.goal_index = app.goals.len().saturating_sub(1);
    app.set_status(format!("Added goal: {}", goal.name));
    Ok(())
}

fn cmd_deposit(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some(mut goal) = app.selected_goal().cloned() else {
        app.set_status("Select a goal first");
        return Ok(());
    };
    let Some(id) = goal.id else {
        return Ok(());
    };
    if args.is_empty() {
        app.set_status("Usage: :deposit <amount>");
        return Ok(());
    }

    let amount = match parse_amount(args, app.format()) {
        Ok(amount) => amount,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    goal.saved_value = goal.saved_value.saturating_add(amount);
    store.update_goal(id, &goal)?;
    app.refresh_goals(store)?;
    if goal.is_reached() {
        app.set_status(format!("{} reached!", goal.name));
    } else {
        app.set_status(format!(
            "{}: {:.0}% saved",
            goal.name,
            goal.progress_percent()
        ));
    }
    Ok(())
}

// ── Projects ─────────────────────────────────────────────────

fn cmd_add_project(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let Some((name, amounts)) = split_name_and_amounts(args, 2) else {
        app.set_status("Usage: :add-project <name> <value> <received>");
        return Ok(());
    };

    let project = parse_pair(&amounts, app.format())
        .and_then(|(value, paid)| Project::new(name, value, paid));
    let project = match project {
        Ok(project) => project,
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    store.insert_project(&project)?;
    app.screen = Screen::Projects;
    app.refresh_projects(store)?;
    app.project_index = app.projects.len().saturating_sub(1);
    app.set_status(format!("Added project: {}", project.name));
    Ok(())
}

/// Apply `edit` to the selected project and save it.
fn update_selected_project(
    app: &mut App,
    store: &mut dyn Store,
    edit: impl FnOnce(&mut Project),
) -> anyhow::Result<Option<Project>> {
    let Some(mut project) = app.selected_project().cloned() else {
        app.set_status("Select a project first");
        return Ok(None);
    };
    let Some(id) = project.id else {
        return Ok(None);
    };
    edit(&mut project);
    store.update_project(id, &project)?;
    app.refresh_projects(store)?;
    Ok(Some(project))
}

fn cmd_status(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let status = match ProjectStatus::parse(args) {
        Ok(status) => status,
        Err(_) => {
            let names: Vec<&str> = ProjectStatus::all().iter().map(|s| s.as_str()).collect();
            app.set_status(format!("Usage: :status <{}>", names.join("|")));
            return Ok(());
        }
    };
    if let Some(project) = update_selected_project(app, store, |p| p.status = status)? {
        app.set_status(format!("{} is now {}", project.name, project.status));
    }
    Ok(())
}

fn cmd_types(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    if let Some(project) = update_selected_project(app, store, |p| *p = p.clone().with_types(args))? {
        app.set_status(format!("{}: {}", project.name, project.types_label()));
    }
    Ok(())
}

fn cmd_received(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let amount = match parse_amount(args, app.format()) {
        Ok(amount) if !args.is_empty() => amount,
        Ok(_) => {
            app.set_status("Usage: :received <amount>");
            return Ok(());
        }
        Err(e) => {
            app.set_status(e.to_string());
            return Ok(());
        }
    };
    if let Some(project) = update_selected_project(app, store, |p| p.amount_paid = amount)? {
        let msg = if project.is_paid_off() {
            format!("{} is paid off", project.name)
        } else {
            format!(
                "{}: {} outstanding",
                project.name,
                finboard::money::format_brl(project.outstanding())
            )
        };
        app.set_status(msg);
    }
    Ok(())
}

// ── Shared ───────────────────────────────────────────────────

fn cmd_image(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let url = args.trim().to_string();
    match app.screen {
        Screen::Cards => {
            let Some(mut card) = app.selected_card().cloned() else {
                app.set_status("Select a card first");
                return Ok(());
            };
            if let Some(id) = card.id {
                card.logo_url = url;
                store.update_card(id, &card)?;
                app.refresh_cards(store)?;
                app.set_status(format!("Updated logo for {}", card.name));
            }
        }
        Screen::Goals => {
            let Some(goal) = app.selected_goal().cloned() else {
                app.set_status("Select a goal first");
                return Ok(());
            };
            if let Some(id) = goal.id {
                let goal = goal.with_image(&url);
                store.update_goal(id, &goal)?;
                app.refresh_goals(store)?;
                app.set_status(format!("Updated image for {}", goal.name));
            }
        }
        Screen::Projects => {
            if let Some(project) = update_selected_project(app, store, |p| p.image_url = url)? {
                app.set_status(format!("Updated image for {}", project.name));
            }
        }
        Screen::Ledger => app.set_status("Switch to Cards, Goals or Projects first"),
    }
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, store: &mut dyn Store) -> anyhow::Result<()> {
    let year = app.selected_year;
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        PathBuf::from(format!("{home}/finboard-export-{year}.csv"))
    } else {
        PathBuf::from(expand_home(args))
    };

    let count = finboard::export::export_to_csv(store, &path, Some(year))?;
    if count == 0 {
        app.set_status(format!("No entries for {year}"));
    } else {
        app.set_status(format!("Exported {count} entries to {}", path.display()));
    }
    Ok(())
}

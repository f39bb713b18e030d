use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::tracker::Tracker;
use crate::validate::TransactionForm;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Tracker) -> anyhow::Result<()>,
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

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("i", "Go to Insights", cmd_insights, r);
    register_command!("insights", "Go to Insights", cmd_insights, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add transaction (e.g. :add 2025-07-01 4.50 Drinks Coffee)",
        cmd_add,
        r
    );
    register_command!(
        "delete-latest",
        "Delete the most recently added transaction",
        cmd_delete_latest,
        r
    );
    register_command!(
        "delete-all",
        "Delete every transaction",
        cmd_delete_all,
        r
    );
    register_command!(
        "export",
        "Export transactions to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, tracker)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

pub(crate) fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

pub(crate) fn levenshtein(a: &str, b: &str) -> usize {
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

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _tracker: &mut Tracker) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.refresh(tracker)
}

fn cmd_insights(_args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    app.screen = Screen::Insights;
    app.refresh(tracker)
}

fn cmd_help(_args: &str, app: &mut App, _tracker: &mut Tracker) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

/// `:add <date> <amount> <category> [description]` goes through the same
/// form submission as the entry form, so rejections read the same.
fn cmd_add(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    let mut parts = args.splitn(4, ' ').map(str::trim);
    let (Some(date), Some(amount), Some(category)) = (parts.next(), parts.next(), parts.next())
    else {
        app.set_status("Usage: :add <date> <amount> <category> [description]");
        return Ok(());
    };
    let description = parts.next().unwrap_or("");

    let saved_form = std::mem::replace(
        &mut app.form,
        TransactionForm {
            date: date.to_string(),
            amount: amount.to_string(),
            category: category.to_string(),
            description: description.to_string(),
        },
    );
    let before = app.overview.transactions.len();
    let result = app.submit_form(tracker);
    let added = app.overview.transactions.len() != before;
    // the entry form keeps whatever the user had typed there
    app.form = saved_form;
    if added {
        app.screen = Screen::Transactions;
    }
    result
}

fn cmd_delete_latest(_args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    app.delete_latest(tracker)
}

fn cmd_delete_all(_args: &str, app: &mut App, _tracker: &mut Tracker) -> anyhow::Result<()> {
    app.request_delete_all();
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, tracker: &mut Tracker) -> anyhow::Result<()> {
    let path = (!args.is_empty()).then(|| PathBuf::from(crate::run::shellexpand(args)));
    app.export(tracker, path.as_deref())
}

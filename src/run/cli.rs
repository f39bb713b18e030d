use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::analytics::DEFAULT_TOP_N;
use crate::config::Config;
use crate::tracker::Tracker;
use crate::ui::util::format_amount;
use crate::validate::TransactionForm;

pub(crate) fn as_cli(args: &[String], tracker: &mut Tracker, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], tracker),
        "list" | "ls" => cli_list(tracker, config),
        "summary" | "s" => cli_summary(tracker, config),
        "total" => cli_total(tracker, config),
        "average" | "avg" => cli_average(tracker, config),
        "forecast" => cli_forecast(tracker, config),
        "months" => cli_months(tracker, config),
        "categories" => cli_categories(tracker, config),
        "top" => cli_top(&args[2..], tracker, config),
        "insight" => cli_insight(tracker),
        "delete-latest" => cli_delete_latest(tracker),
        "delete-all" => cli_delete_all(&args[2..], tracker),
        "export" => cli_export(&args[2..], tracker, config),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("budget-tracker {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Budget Tracker - local expense tracker with monthly insights");
    println!();
    println!("Usage: budget-tracker [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                 Launch interactive TUI");
    println!("  add <date> <amount> <category> [desc]  Record a transaction");
    println!("  list                                   List all transactions, newest first");
    println!("  summary                                Totals, forecast and spending insight");
    println!("  total                                  Sum of every transaction");
    println!("  average                                Mean spend per recorded month");
    println!("  forecast                               Predicted spend for next month");
    println!("  months                                 Spend per calendar month");
    println!("  categories                             Spend per category");
    println!("  top [n]                                Highest-spend categories (default 3)");
    println!("  insight                                Latest month-over-month change");
    println!("  delete-latest                          Remove the most recently added transaction");
    println!("  delete-all --yes                       Remove every transaction");
    println!("  export [path]                          Export transactions to CSV");
    println!("  --help, -h                             Show this help");
    println!("  --version, -V                          Show version");
    println!();
    println!("Categories: Food, Drinks, Entertainment, Transport, Holidays, Other");
    println!("Dates: YYYY-MM-DD, DD-MM-YYYY or DD/MM/YYYY");
}

fn parse_add_args(args: &[String]) -> Result<TransactionForm> {
    let [date, amount, category, description @ ..] = args else {
        anyhow::bail!("Usage: budget-tracker add <date> <amount> <category> [description]");
    };
    Ok(TransactionForm {
        date: date.clone(),
        amount: amount.clone(),
        category: category.clone(),
        description: description.join(" "),
    })
}

fn cli_add(args: &[String], tracker: &Tracker) -> Result<()> {
    let form = parse_add_args(args)?;
    let id = tracker.add(&form).context("Transaction not added")?;
    println!("Added transaction #{id}");
    Ok(())
}

fn cli_list(tracker: &Tracker, config: &Config) -> Result<()> {
    let txns = tracker.transactions()?;
    if txns.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:>12}  {:<14} Description",
        "ID", "Date", "Amount", "Category"
    );
    println!("{}", "─".repeat(64));
    for txn in &txns {
        println!(
            "{:<6} {:<12} {:>12}  {:<14} {}",
            txn.id,
            txn.date_iso(),
            format_amount(txn.amount, &config.currency),
            txn.category.as_str(),
            txn.description,
        );
    }
    Ok(())
}

fn cli_summary(tracker: &Tracker, config: &Config) -> Result<()> {
    let overview = tracker.overview()?;
    let money = |v| format_amount(v, &config.currency);

    println!("Budget Tracker - {} transactions", overview.transactions.len());
    println!("{}", "─".repeat(40));
    println!("  Total:                {}", money(overview.total));
    println!("  Monthly average:      {}", money(overview.monthly_average));
    match overview.prediction {
        Some(p) => println!("  Predicted next month: {}", money(p)),
        None => println!("  Predicted next month: not enough data"),
    }

    if !overview.monthly_totals.is_empty() {
        println!();
        println!("Monthly totals:");
        for m in &overview.monthly_totals {
            println!("  {}  {:>12}", m.month, money(m.amount));
        }
    }

    if !overview.category_totals.is_empty() {
        println!();
        println!("Spending by category:");
        for (category, amount) in &overview.category_totals {
            println!("  {:<14} {:>12}", category.as_str(), money(*amount));
        }
    }

    if !overview.top_categories.is_empty() {
        println!();
        println!("Top categories:");
        for (rank, c) in overview.top_categories.iter().enumerate() {
            println!("  {}. {:<14} {:>12}", rank + 1, c.category.as_str(), money(c.amount));
        }
    }

    println!();
    println!("{}", overview.insight);
    Ok(())
}

fn cli_total(tracker: &Tracker, config: &Config) -> Result<()> {
    println!("{}", format_amount(tracker.total()?, &config.currency));
    Ok(())
}

fn cli_average(tracker: &Tracker, config: &Config) -> Result<()> {
    println!("{}", format_amount(tracker.monthly_average()?, &config.currency));
    Ok(())
}

fn cli_forecast(tracker: &Tracker, config: &Config) -> Result<()> {
    match tracker.predict_next_month()? {
        Some(p) => println!("{}", format_amount(p, &config.currency)),
        None => println!("Not enough data to predict next month"),
    }
    Ok(())
}

fn cli_months(tracker: &Tracker, config: &Config) -> Result<()> {
    let monthly = tracker.monthly_totals()?;
    if monthly.is_empty() {
        println!("No transactions");
    }
    for m in &monthly {
        println!("{}  {:>12}", m.month, format_amount(m.amount, &config.currency));
    }
    Ok(())
}

fn cli_categories(tracker: &Tracker, config: &Config) -> Result<()> {
    let totals = tracker.category_totals()?;
    if totals.is_empty() {
        println!("No transactions");
    }
    for (category, amount) in &totals {
        println!("{:<14} {:>12}", category.as_str(), format_amount(*amount, &config.currency));
    }
    Ok(())
}

fn parse_top_n(args: &[String]) -> Result<usize> {
    match args.first() {
        None => Ok(DEFAULT_TOP_N),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Invalid count: {raw}")),
    }
}

fn cli_top(args: &[String], tracker: &Tracker, config: &Config) -> Result<()> {
    let top = tracker.top_categories(parse_top_n(args)?)?;
    if top.is_empty() {
        println!("No transactions");
    }
    for (rank, c) in top.iter().enumerate() {
        println!(
            "{}. {:<14} {:>12}",
            rank + 1,
            c.category.as_str(),
            format_amount(c.amount, &config.currency)
        );
    }
    Ok(())
}

fn cli_insight(tracker: &Tracker) -> Result<()> {
    println!("{}", tracker.insight()?);
    Ok(())
}

fn cli_delete_latest(tracker: &mut Tracker) -> Result<()> {
    match tracker.delete_latest()? {
        Some(id) => println!("Deleted transaction #{id}"),
        None => println!("No transactions to delete"),
    }
    Ok(())
}

fn cli_delete_all(args: &[String], tracker: &Tracker) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") {
        let count = tracker.count()?;
        anyhow::bail!("Refusing to delete {count} transactions without --yes");
    }
    let removed = tracker.delete_all()?;
    println!("Deleted {removed} transactions");
    Ok(())
}

fn cli_export(args: &[String], tracker: &Tracker, config: &Config) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| config.export_path.clone());

    let count = tracker
        .export_csv(&output_path)
        .with_context(|| format!("Failed to export to {}", output_path.display()))?;
    if count == 0 {
        println!("No transactions to export");
    } else {
        println!("Exported {count} transactions to {}", output_path.display());
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

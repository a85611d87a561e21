use crate::cli::io;
use crate::cli::output::section;
use crate::domain::{Account, AccountSummary, TransactionRecord};

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_transaction(record: &TransactionRecord) -> String {
    format!(
        "{}  {:<8}  {:>10}",
        record.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
        record.kind.label(),
        format_money(record.amount)
    )
}

/// Renders `label: value` pairs with the labels padded to a common width.
pub fn two_column(entries: &[(&str, String)]) -> Vec<String> {
    let width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    entries
        .iter()
        .map(|(label, value)| format!("  {:<width$} : {}", label, value, width = width))
        .collect()
}

pub fn print_account_details(account: &Account, history_limit: usize) {
    section("Profile");
    let rows = two_column(&[
        ("Name", account.name.clone()),
        ("Age", account.age.to_string()),
        ("Email", account.email.clone()),
        ("Account number", account.account_number.clone()),
        ("Balance", format_money(account.balance)),
    ]);
    for row in rows {
        io::print_info(row);
    }

    section("Transactions");
    if account.transactions.is_empty() {
        io::print_info("No transactions yet.");
        return;
    }
    for record in account.recent_transactions(history_limit) {
        io::print_info(format!("  {}", format_transaction(record)));
    }
    let hidden = account.transactions.len().saturating_sub(history_limit);
    if hidden > 0 {
        io::print_hint(format!("{hidden} older transaction(s) not shown."));
    }
}

pub fn account_table(summaries: &[AccountSummary]) -> Vec<String> {
    let name_width = summaries
        .iter()
        .map(|summary| summary.name.chars().count())
        .chain(std::iter::once(4))
        .max()
        .unwrap_or(4);
    let mut lines = vec![format!(
        "  {:<10}  {:<name_width$}  {:>12}  {:>4}  {}",
        "Account",
        "Name",
        "Balance",
        "Txns",
        "Email",
        name_width = name_width
    )];
    lines.extend(summaries.iter().map(|summary| {
        format!(
            "  {:<10}  {:<name_width$}  {:>12}  {:>4}  {}",
            summary.account_number,
            summary.name,
            format_money(summary.balance),
            summary.transaction_count(),
            summary.email,
            name_width = name_width
        )
    }));
    lines
}

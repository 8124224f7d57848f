//! Balance display formatting

use crate::config::DurationStyle;
use crate::ledger::PairBalance;
use crate::models::Minutes;
use crate::services::CounterpartBalance;

/// Describe a pair balance using display names
///
/// `a_name` and `b_name` belong to `balance.member_a` and `balance.member_b`.
pub fn format_pair_balance(
    balance: &PairBalance,
    a_name: &str,
    b_name: &str,
    style: DurationStyle,
) -> String {
    balance.describe(a_name, b_name, &style.format(balance.owed()))
}

/// Format a member's balances with everyone they have traded favors with
pub fn format_summary(
    member_name: &str,
    lines: &[CounterpartBalance],
    net: Minutes,
    style: DurationStyle,
) -> String {
    if lines.is_empty() {
        return format!("{} has not traded any favors yet.", member_name);
    }

    let name_width = lines
        .iter()
        .map(|l| l.counterpart.display_name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!("Balances for {}\n\n", member_name));
    output.push_str(&format!(
        "{:width$}  {:>10}  {}\n",
        "Member",
        "Time",
        "Direction",
        width = name_width
    ));
    output.push_str(&format!("{}\n", "-".repeat(name_width + 28)));

    for line in lines {
        let direction = match line.balance.debtor() {
            None => "settled",
            Some(debtor) if *debtor == line.balance.member_a => "you owe",
            Some(_) => "owes you",
        };
        output.push_str(&format!(
            "{:width$}  {:>10}  {}\n",
            line.counterpart.display_name,
            style.format(line.balance.owed()),
            direction,
            width = name_width
        ));
    }

    output.push_str(&format!("{}\n", "-".repeat(name_width + 28)));
    let net_text = if net.is_zero() {
        "even with the circle".to_string()
    } else if net.is_positive() {
        format!("you owe {} overall", style.format(net.abs()))
    } else {
        format!("you are owed {} overall", style.format(net.abs()))
    };
    output.push_str(&format!("Net: {}\n", net_text));

    output
}

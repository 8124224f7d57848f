//! Favor display formatting

use std::collections::HashMap;

use tabled::{settings::Style, Table, Tabled};

use crate::config::DurationStyle;
use crate::models::{Favor, MemberId};

#[derive(Tabled)]
struct FavorRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "To")]
    to: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Note")]
    note: String,
}

fn name<'a>(names: &'a HashMap<MemberId, String>, id: &'a MemberId) -> &'a str {
    names.get(id).map(String::as_str).unwrap_or(id.as_str())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Format favors as a table, resolving member ids through `names`
pub fn format_favor_list(
    favors: &[Favor],
    names: &HashMap<MemberId, String>,
    style: DurationStyle,
) -> String {
    if favors.is_empty() {
        return "No favors recorded.".to_string();
    }

    let rows: Vec<FavorRow> = favors
        .iter()
        .map(|f| FavorRow {
            id: f.id.short(),
            date: f.date.format("%Y-%m-%d").to_string(),
            from: name(names, &f.from_member).to_string(),
            to: name(names, &f.to_member).to_string(),
            time: style.format(f.minutes),
            note: truncate(&f.description, 40),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

/// One-line confirmation after recording a favor
pub fn format_favor_recorded(favor: &Favor, from_name: &str, to_name: &str, style: DurationStyle) -> String {
    format!(
        "Recorded {}: {} helped {} for {} on {}",
        favor.id.short(),
        from_name,
        to_name,
        style.format(favor.minutes),
        favor.date.format("%Y-%m-%d")
    )
}

//! Member display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Member;

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Phone")]
    phone: String,
    #[tabled(rename = "Joined")]
    joined: String,
}

/// Format members as a table
pub fn format_member_list(members: &[Member], current: Option<&Member>) -> String {
    if members.is_empty() {
        return "No members yet. Add one with `village member add <name>`.".to_string();
    }

    let rows: Vec<MemberRow> = members
        .iter()
        .map(|m| {
            let marker = if current.is_some_and(|c| c.id == m.id) { " *" } else { "" };
            MemberRow {
                name: format!("{}{}", m.display_name, marker),
                id: m.id.to_string(),
                phone: m.phone.clone().unwrap_or_default(),
                joined: m.created_at.format("%Y-%m-%d").to_string(),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

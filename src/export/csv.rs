//! CSV export of the favor history

use std::collections::HashMap;
use std::io::Write;

use serde::Serialize;

use crate::error::VillageResult;
use crate::models::MemberId;
use crate::storage::Storage;

#[derive(Serialize)]
struct FavorRow<'a> {
    id: String,
    date: String,
    from_id: &'a str,
    from_name: &'a str,
    to_id: &'a str,
    to_name: &'a str,
    minutes: i64,
    description: &'a str,
}

/// Write every favor, newest first, as CSV with a header row
pub fn export_favors_csv<W: Write>(storage: &Storage, writer: W) -> VillageResult<()> {
    let names: HashMap<MemberId, String> = storage
        .members
        .get_all()?
        .into_iter()
        .map(|m| (m.id, m.display_name))
        .collect();
    let name_of = |id: &MemberId| names.get(id).map(String::as_str).unwrap_or("Unknown");

    let favors = storage.favors.get_all()?;
    let mut csv_writer = csv::Writer::from_writer(writer);

    for favor in &favors {
        csv_writer.serialize(FavorRow {
            id: favor.id.to_string(),
            date: favor.date.format("%Y-%m-%d").to_string(),
            from_id: favor.from_member.as_str(),
            from_name: name_of(&favor.from_member),
            to_id: favor.to_member.as_str(),
            to_name: name_of(&favor.to_member),
            minutes: favor.minutes.get(),
            description: &favor.description,
        })?;
    }

    if favors.is_empty() {
        csv_writer.write_record([
            "id",
            "date",
            "from_id",
            "from_name",
            "to_id",
            "to_name",
            "minutes",
            "description",
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

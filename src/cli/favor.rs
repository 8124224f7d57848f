//! Favor CLI commands

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_favor_list, format_favor_recorded};
use crate::error::{VillageError, VillageResult};
use crate::export::{export_favors_csv, export_full_json, ExportFormat};
use crate::models::{MemberId, Minutes};
use crate::services::{FavorFilter, FavorService, MemberService, RecordFavorInput};
use crate::storage::Storage;

/// Favor subcommands
#[derive(Subcommand)]
pub enum FavorCommands {
    /// Record time one member gave another
    Record {
        /// Member who gave the time (name or ID)
        from: String,
        /// Member who received it (name or ID)
        to: String,
        /// Duration, e.g. "45", "1h30m" or "1:30"
        duration: String,
        /// Date of the favor (YYYY-MM-DD, default today)
        #[arg(short, long)]
        date: Option<String>,
        /// What was done
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List recorded favors, newest first
    List {
        /// Only favors involving this member
        #[arg(short, long)]
        member: Option<String>,
        /// With --member, only favors exchanged with this member
        #[arg(short, long, requires = "member")]
        with: Option<String>,
        /// Number of favors to show (default from settings)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Delete a favor
    Delete {
        /// Favor ID (full or as shown by `favor list`)
        id: String,
    },
    /// Export the favor history
    Export {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle a favor command
pub fn handle_favor_command(
    storage: &Storage,
    settings: &Settings,
    cmd: FavorCommands,
) -> VillageResult<()> {
    let members = MemberService::new(storage);
    let favors = FavorService::new(storage);
    let style = settings.duration_style;

    match cmd {
        FavorCommands::Record {
            from,
            to,
            duration,
            date,
            note,
        } => {
            let giver = members.resolve(&from)?;
            let receiver = members.resolve(&to)?;
            let minutes = Minutes::parse(&duration)
                .map_err(|e| VillageError::Validation(e.to_string()))?;
            let date = match date {
                Some(d) => parse_date(&d)?,
                None => Local::now().date_naive(),
            };

            let favor = favors.record(RecordFavorInput {
                from_member: giver.id.clone(),
                to_member: receiver.id.clone(),
                minutes,
                date,
                description: note,
            })?;
            println!(
                "{}",
                format_favor_recorded(&favor, &giver.display_name, &receiver.display_name, style)
            );
        }
        FavorCommands::List {
            member,
            with,
            limit,
        } => {
            let mut filter = FavorFilter::new().limit(limit.unwrap_or(settings.list_limit));
            if let Some(member) = member {
                let member = members.resolve(&member)?;
                filter = match with {
                    Some(other) => filter.between(member.id, members.resolve(&other)?.id),
                    None => filter.member(member.id),
                };
            }

            let list = favors.list(filter)?;
            let names: HashMap<MemberId, String> = members
                .list()?
                .into_iter()
                .map(|m| (m.id, m.display_name))
                .collect();
            println!("{}", format_favor_list(&list, &names, style));
        }
        FavorCommands::Delete { id } => {
            let favor = favors.delete(&id)?;
            println!(
                "Deleted favor {} ({} on {})",
                favor.id.short(),
                style.format(favor.minutes),
                favor.date.format("%Y-%m-%d")
            );
        }
        FavorCommands::Export { format, output } => match output {
            Some(path) => {
                let file = File::create(&path).map_err(|e| {
                    VillageError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                let mut writer = BufWriter::new(file);
                write_export(storage, format, &mut writer)?;
                writer.flush()?;
                eprintln!("Exported to {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                write_export(storage, format, &mut writer)?;
            }
        },
    }

    Ok(())
}

fn write_export<W: Write>(storage: &Storage, format: ExportFormat, writer: &mut W) -> VillageResult<()> {
    match format {
        ExportFormat::Csv => export_favors_csv(storage, writer),
        ExportFormat::Json => export_full_json(storage, writer),
    }
}

fn parse_date(s: &str) -> VillageResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        VillageError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-09").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
        );
        assert!(parse_date("09/03/2025").unwrap_err().is_validation());
    }
}

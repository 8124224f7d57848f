//! Balance CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::{DurationStyle, SessionProvider};
use crate::display::{format_pair_balance, format_summary};
use crate::error::VillageResult;
use crate::models::{Member, MemberId};
use crate::services::{BalanceService, MemberService};
use crate::storage::{ExportSource, Storage};

/// Balance subcommands
#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Balance between you and another member
    Show {
        /// The other member (name or ID)
        other: String,
        /// Compute for this member instead of the signed-in one
        #[arg(long = "as", value_name = "MEMBER")]
        as_member: Option<String>,
    },
    /// Balances with everyone you have traded favors with
    Summary {
        /// Summarize this member instead of the signed-in one
        #[arg(long = "as", value_name = "MEMBER")]
        as_member: Option<String>,
    },
    /// Balance between two members from a hosted-backend JSON export
    File {
        /// Path to the exported transaction rows
        path: PathBuf,
        /// First member ID
        member_a: String,
        /// Second member ID
        member_b: String,
    },
}

/// Handle a balance command
pub fn handle_balance_command(
    storage: &Storage,
    session: &dyn SessionProvider,
    style: DurationStyle,
    cmd: BalanceCommands,
) -> VillageResult<()> {
    let members = MemberService::new(storage);
    let balances = BalanceService::new(storage);

    match cmd {
        BalanceCommands::Show { other, as_member } => {
            let me = acting_member(&members, session, as_member.as_deref())?;
            let other = members.resolve(&other)?;
            let balance = balances.between(&me.id, &other.id)?;
            println!(
                "{}",
                format_pair_balance(&balance, &me.display_name, &other.display_name, style)
            );
        }
        BalanceCommands::Summary { as_member } => {
            let me = acting_member(&members, session, as_member.as_deref())?;
            let lines = balances.summary_for(&me.id)?;
            let net = balances.net_for(&me.id)?;
            print!("{}", format_summary(&me.display_name, &lines, net, style));
            if lines.is_empty() {
                println!();
            }
        }
        BalanceCommands::File {
            path,
            member_a,
            member_b,
        } => {
            let a = MemberId::new(member_a);
            let b = MemberId::new(member_b);
            let source = ExportSource::new(path);
            let balance = balances.between_with(&source, &a, &b)?;
            println!(
                "{}",
                format_pair_balance(
                    &balance,
                    &members.display_name(&a)?,
                    &members.display_name(&b)?,
                    style
                )
            );
        }
    }

    Ok(())
}

/// The member a command acts for: `--as` if given, else the signed-in member
fn acting_member(
    members: &MemberService,
    session: &dyn SessionProvider,
    as_member: Option<&str>,
) -> VillageResult<Member> {
    match as_member {
        Some(identifier) => members.resolve(identifier),
        None => {
            let id = session.require_member()?;
            members.resolve(id.as_str())
        }
    }
}

//! Member CLI commands

use clap::Subcommand;

use crate::config::SessionProvider;
use crate::display::format_member_list;
use crate::error::VillageResult;
use crate::models::MemberId;
use crate::services::MemberService;
use crate::storage::Storage;

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// Add a member to the circle
    Add {
        /// Display name
        name: String,
        /// Identifier from the sign-in provider (generated when omitted)
        #[arg(long)]
        id: Option<String>,
        /// Contact phone number
        #[arg(short, long)]
        phone: Option<String>,
    },
    /// List all members
    List,
    /// Remove a member with no recorded favors
    Remove {
        /// Member name or ID
        member: String,
    },
}

/// Handle a member command
pub fn handle_member_command(
    storage: &Storage,
    session: &dyn SessionProvider,
    cmd: MemberCommands,
) -> VillageResult<()> {
    let service = MemberService::new(storage);

    match cmd {
        MemberCommands::Add { name, id, phone } => {
            let member = service.add(&name, id.map(MemberId::new), phone)?;
            println!("Added member: {} ({})", member.display_name, member.id);
        }
        MemberCommands::List => {
            let members = service.list()?;
            let current = match session.current_member() {
                Some(id) => service.get(&id)?,
                None => None,
            };
            println!("{}", format_member_list(&members, current.as_ref()));
        }
        MemberCommands::Remove { member } => {
            let removed = service.remove(&member)?;
            println!("Removed member: {}", removed.display_name);
        }
    }

    Ok(())
}

//! Sign-in commands
//!
//! The signed-in member is remembered in the settings file and used as the
//! default side of `balance` commands.

use crate::config::{Settings, VillagePaths};
use crate::error::VillageResult;
use crate::services::MemberService;
use crate::storage::Storage;

/// Sign in as an existing member
pub fn handle_login(
    storage: &Storage,
    paths: &VillagePaths,
    settings: &mut Settings,
    member: &str,
) -> VillageResult<()> {
    let member = MemberService::new(storage).resolve(member)?;
    settings.sign_in(member.id.clone());
    settings.save(paths)?;
    println!("Signed in as {}", member.display_name);
    Ok(())
}

pub fn handle_logout(paths: &VillagePaths, settings: &mut Settings) -> VillageResult<()> {
    if settings.current_member.is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    settings.sign_out();
    settings.save(paths)?;
    println!("Signed out.");
    Ok(())
}

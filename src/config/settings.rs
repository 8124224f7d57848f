//! User settings
//!
//! Persisted as `config.json` in the base directory. Every field has a
//! default so older or hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::VillagePaths;
use super::session::SessionProvider;
use crate::error::VillageError;
use crate::models::{MemberId, Minutes};

/// How durations are rendered in command output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `1h 30m`
    #[default]
    Compact,
    /// `1:30`
    Clock,
}

impl DurationStyle {
    pub fn format(&self, minutes: Minutes) -> String {
        match self {
            Self::Compact => minutes.to_string(),
            Self::Clock => minutes.format_clock(),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Member signed in on this device
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_member: Option<MemberId>,

    #[serde(default)]
    pub duration_style: DurationStyle,

    /// Default number of favors shown by `favor list`
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_list_limit() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            current_member: None,
            duration_style: DurationStyle::default(),
            list_limit: default_list_limit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &VillagePaths) -> Result<Self, VillageError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not persisted until the caller saves
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| VillageError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| VillageError::Config(format!("Failed to parse settings file: {}", e)))
    }

    pub fn save(&self, paths: &VillagePaths) -> Result<(), VillageError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| VillageError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| VillageError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn sign_in(&mut self, member: MemberId) {
        self.current_member = Some(member);
    }

    pub fn sign_out(&mut self) {
        self.current_member = None;
    }
}

impl SessionProvider for Settings {
    fn current_member(&self) -> Option<MemberId> {
        self.current_member.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.current_member.is_none());
        assert_eq!(settings.duration_style, DurationStyle::Compact);
        assert_eq!(settings.list_limit, 20);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VillagePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.sign_in("u1".into());
        settings.duration_style = DurationStyle::Clock;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.current_member(), Some(MemberId::from("u1")));
        assert_eq!(loaded.duration_style, DurationStyle::Clock);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VillagePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"duration_style": "clock"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.duration_style, DurationStyle::Clock);
        assert_eq!(loaded.list_limit, 20);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = VillagePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(VillageError::Config(_))
        ));
    }

    #[test]
    fn test_duration_style_format() {
        assert_eq!(DurationStyle::Compact.format(Minutes::new(90)), "1h 30m");
        assert_eq!(DurationStyle::Clock.format(Minutes::new(90)), "1:30");
    }

    #[test]
    fn test_sign_out() {
        let mut settings = Settings::default();
        settings.sign_in("u1".into());
        settings.sign_out();
        assert!(settings.current_member().is_none());
    }
}

//! Participant roster files.
//!
//! A roster is either a JSON array of participants or a TOML document with
//! `[[participant]]` tables:
//!
//! ```toml
//! [[participant]]
//! name = "ana"
//! timezone = "Europe/Berlin"
//! preference = "early_bird"
//! blocked = [{ start = "12:00", end = "13:00" }]
//! ```

use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::participant::Participant;

#[derive(Deserialize)]
struct TomlRoster {
    #[serde(default)]
    participant: Vec<Participant>,
}

/// Load participants from a `.json` or `.toml` file.
///
/// # Errors
/// Returns [`CoreError::Roster`] if the file cannot be read or parsed, has an
/// unsupported extension, or repeats a participant name.
pub fn load_roster(path: &Path) -> Result<Vec<Participant>> {
    let roster_error = |message: String| CoreError::Roster {
        path: path.to_path_buf(),
        message,
    };

    let content = std::fs::read_to_string(path).map_err(|e| roster_error(e.to_string()))?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let participants = match extension.as_deref() {
        Some("json") => parse_json_roster(&content),
        Some("toml") => parse_toml_roster(&content),
        _ => Err("unsupported roster format (expected .json or .toml)".to_string()),
    }
    .map_err(roster_error)?;

    ensure_unique_names(&participants).map_err(roster_error)?;
    Ok(participants)
}

fn parse_json_roster(content: &str) -> std::result::Result<Vec<Participant>, String> {
    serde_json::from_str(content).map_err(|e| e.to_string())
}

fn parse_toml_roster(content: &str) -> std::result::Result<Vec<Participant>, String> {
    toml::from_str::<TomlRoster>(content)
        .map(|r| r.participant)
        .map_err(|e| e.to_string())
}

fn ensure_unique_names(participants: &[Participant]) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for p in participants {
        if !seen.insert(p.name.as_str()) {
            return Err(format!("duplicate participant name '{}'", p.name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::participant::Preference;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn loads_json_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "team.json",
            r#"[{"name":"ana","timezone":"Europe/Berlin"},{"name":"bo","preference":"early_bird"}]"#,
        );
        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].preference, Preference::EarlyBird);
    }

    #[test]
    fn loads_toml_roster() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "team.toml",
            r#"
[[participant]]
name = "ana"
timezone = "Europe/Berlin"
blocked = [{ start = "12:00", end = "13:00" }]

[[participant]]
name = "bo"
timezone = "Asia/Tokyo"
team = "infra"
"#,
        );
        let roster = load_roster(&path).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].blocked.len(), 1);
        assert_eq!(roster[1].team.as_deref(), Some("infra"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "dup.json", r#"[{"name":"ana"},{"name":"ana"}]"#);
        let err = load_roster(&path).unwrap_err();
        assert!(err.to_string().contains("duplicate participant name 'ana'"));
    }

    #[test]
    fn unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "team.csv", "name\nana\n");
        assert!(matches!(load_roster(&path), Err(CoreError::Roster { .. })));
    }

    #[test]
    fn missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_roster(&dir.path().join("absent.json")),
            Err(CoreError::Roster { .. })
        ));
    }
}

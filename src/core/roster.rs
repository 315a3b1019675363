//! Staff roster — the records shown on the cards and how they are read
//! from a TOML file.
//!
//! ```toml
//! [[staff]]
//! id = 1
//! name = "Dilnoza Karimova"
//! description = "Head of sales"
//! photo_path = "dilnoza.jpg"
//! order_index = 0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Demo roster used when no file is given on the command line.
pub const DEMO_ROSTER: &str = include_str!("../../data/staff.toml");

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("cannot read roster {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid roster: {0}")]
    Parse(#[from] toml::de::Error),
}

/// One person on the showcase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StaffMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_path: Option<String>,
    #[serde(default)]
    pub order_index: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl StaffMember {
    /// Public URL of the member's photo.
    ///
    /// Absolute `http(s)` paths are used as-is; relative storage paths are
    /// joined onto `base` when one is configured.
    pub fn photo_url(&self, base: Option<&str>) -> Option<String> {
        let path = self.photo_path.as_deref()?.trim();
        if path.is_empty() {
            return None;
        }
        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }
        match base {
            Some(base) => Some(format!(
                "{}/{}",
                base.trim_end_matches('/'),
                path.trim_start_matches('/')
            )),
            None => Some(path.to_string()),
        }
    }

    /// Up to two upper-case initials, e.g. `"DK"` for `"Dilnoza Karimova"`.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct RosterFile {
    #[serde(default)]
    staff: Vec<StaffMember>,
}

/// Parse a roster document, keeping active members in display order.
pub fn parse_roster(contents: &str) -> Result<Vec<StaffMember>, RosterError> {
    let file: RosterFile = toml::from_str(contents)?;
    let mut staff: Vec<StaffMember> = file.staff.into_iter().filter(|m| m.is_active).collect();
    staff.sort_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id)));
    Ok(staff)
}

/// Where the roster comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterSource {
    /// The compiled-in demo roster.
    Demo,
    File(PathBuf),
}

impl RosterSource {
    pub fn load(&self) -> Result<Vec<StaffMember>, RosterError> {
        match self {
            RosterSource::Demo => parse_roster(DEMO_ROSTER),
            RosterSource::File(path) => load_roster(path),
        }
    }

    /// Short label for the header.
    pub fn label(&self) -> String {
        match self {
            RosterSource::Demo => "demo roster".into(),
            RosterSource::File(path) => path.display().to_string(),
        }
    }
}

/// Read and parse a roster file.
pub fn load_roster(path: &Path) -> Result<Vec<StaffMember>, RosterError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RosterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_roster(&contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, photo: Option<&str>) -> StaffMember {
        StaffMember {
            id: 1,
            name: name.into(),
            description: None,
            photo_path: photo.map(Into::into),
            order_index: 0,
            is_active: true,
        }
    }

    #[test]
    fn parse_filters_inactive_and_sorts() {
        let doc = r#"
            [[staff]]
            id = 3
            name = "Third"
            order_index = 2

            [[staff]]
            id = 1
            name = "Hidden"
            order_index = 0
            is_active = false

            [[staff]]
            id = 2
            name = "First"
            order_index = 1

            [[staff]]
            id = 4
            name = "Tied"
            order_index = 1
        "#;
        let staff = parse_roster(doc).unwrap();
        let names: Vec<&str> = staff.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["First", "Tied", "Third"]);
    }

    #[test]
    fn empty_document_is_an_empty_roster() {
        assert!(parse_roster("").unwrap().is_empty());
    }

    #[test]
    fn malformed_document_is_a_parse_error() {
        let err = parse_roster("[[staff]]\nname = 5").unwrap_err();
        assert!(matches!(err, RosterError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_roster(Path::new("/nonexistent/staff-showcase/roster.toml")).unwrap_err();
        assert!(matches!(err, RosterError::Io { .. }));
    }

    #[test]
    fn demo_roster_parses() {
        let staff = RosterSource::Demo.load().unwrap();
        assert!(staff.len() >= 2);
        assert!(staff.iter().all(|m| m.is_active));
    }

    #[test]
    fn photo_url_resolution() {
        let base = Some("https://cdn.example.com/staff-photos/");
        assert_eq!(member("A", None).photo_url(base), None);
        assert_eq!(member("A", Some("  ")).photo_url(base), None);
        assert_eq!(
            member("A", Some("https://img.example.com/a.jpg")).photo_url(base),
            Some("https://img.example.com/a.jpg".into())
        );
        assert_eq!(
            member("A", Some("/team/a.jpg")).photo_url(base),
            Some("https://cdn.example.com/staff-photos/team/a.jpg".into())
        );
        assert_eq!(
            member("A", Some("a.jpg")).photo_url(None),
            Some("a.jpg".into())
        );
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(member("dilnoza karimova aka", None).initials(), "DK");
        assert_eq!(member("Bobur", None).initials(), "B");
        assert_eq!(member("", None).initials(), "");
    }
}

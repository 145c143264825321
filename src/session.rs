//! Who is looking at which semester. Passed explicitly to the API client and UI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Semester {
    #[default]
    #[serde(rename = "Fall 2025")]
    Fall2025,
    #[serde(rename = "Winter 2026")]
    Winter2026,
    #[serde(rename = "Spring 2026")]
    Spring2026,
}

impl Semester {
    pub const ALL: [Semester; 3] = [Semester::Fall2025, Semester::Winter2026, Semester::Spring2026];

    pub fn label(self) -> &'static str {
        match self {
            Semester::Fall2025 => "Fall 2025",
            Semester::Winter2026 => "Winter 2026",
            Semester::Spring2026 => "Spring 2026",
        }
    }
}

impl fmt::Display for Semester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Semester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Semester::ALL
            .into_iter()
            .find(|sem| sem.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown semester '{}'", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
    semester: Semester,
}

impl Session {
    pub fn new(user_id: Option<String>, semester: Semester) -> Self {
        let mut session = Self { user_id: None, semester };
        session.set_user_id(user_id);
        session
    }

    pub fn current_semester(&self) -> Semester {
        self.semester
    }

    /// Returns true when the semester actually changed (caller reloads the schedule)
    pub fn set_semester(&mut self, semester: Semester) -> bool {
        if self.semester == semester {
            return false;
        }
        self.semester = semester;
        true
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Blank ids are treated as signed out; the server then falls back to its demo user
    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fall() {
        let session = Session::default();
        assert_eq!(session.current_semester(), Semester::Fall2025);
        assert_eq!(session.user_id(), None);
    }

    #[test]
    fn set_semester_reports_change() {
        let mut session = Session::default();
        assert!(!session.set_semester(Semester::Fall2025));
        assert!(session.set_semester(Semester::Spring2026));
        assert_eq!(session.current_semester().label(), "Spring 2026");
    }

    #[test]
    fn blank_user_id_is_none() {
        let session = Session::new(Some("   ".to_string()), Semester::Winter2026);
        assert_eq!(session.user_id(), None);

        let session = Session::new(Some(" 1234567 ".to_string()), Semester::Winter2026);
        assert_eq!(session.user_id(), Some("1234567"));
    }

    #[test]
    fn semester_parses_and_serializes_as_label() {
        assert_eq!("winter 2026".parse::<Semester>(), Ok(Semester::Winter2026));
        assert!("Summer 2026".parse::<Semester>().is_err());
        assert_eq!(serde_json::to_string(&Semester::Spring2026).unwrap(), "\"Spring 2026\"");
        let parsed: Semester = serde_json::from_str("\"Fall 2025\"").unwrap();
        assert_eq!(parsed, Semester::Fall2025);
    }
}

use serde::{Deserialize, Serialize};

/// Storage key holding the last selected mode.
pub const MODE_PREFERENCE_KEY: &str = "app_mode";

/// One of the two independent curricula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    #[serde(rename = "LLD")]
    Lld,
    #[serde(rename = "HLD")]
    Hld,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Lld, Mode::Hld];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Lld => "LLD",
            Mode::Hld => "HLD",
        }
    }

    /// Parse the persisted textual form. Case-insensitive, surrounding
    /// whitespace ignored.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "LLD" => Some(Mode::Lld),
            "HLD" => Some(Mode::Hld),
            _ => None,
        }
    }

    /// Key under which this mode's progress record is persisted.
    #[must_use]
    pub fn progress_key(self) -> &'static str {
        match self {
            Mode::Lld => "lld_master_state",
            Mode::Hld => "hld_master_state",
        }
    }

    /// File name of this mode's catalog document.
    #[must_use]
    pub fn catalog_document(self) -> &'static str {
        match self {
            Mode::Lld => "lld.json",
            Mode::Hld => "hld.json",
        }
    }

    #[must_use]
    pub fn accent_color(self) -> &'static str {
        match self {
            Mode::Lld => "#2563eb",
            Mode::Hld => "#8b5cf6",
        }
    }

    #[must_use]
    pub fn logo_title(self) -> String {
        format!("{} MASTER", self.as_str())
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

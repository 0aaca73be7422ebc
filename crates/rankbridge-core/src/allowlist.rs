/// Rank names tracked by default, lowest tier first.
pub const DEFAULT_RANKS: [&str; 4] = ["Placement", "Bronze", "Gold", "Diamond"];

/// The fixed set of rank names the services track and may assign.
///
/// Membership is checked by exact name match; any upstream role whose name
/// is not in the list is invisible to the rest of the system.
#[derive(Debug, Clone)]
pub struct Allowlist(Vec<String>);

impl Allowlist {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Parse a comma-separated override, e.g. `Placement,Bronze,Gold,Diamond`.
    /// Blank entries are dropped; an all-blank string yields the default list.
    pub fn from_csv(csv: &str) -> Self {
        let names: Vec<String> = csv
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if names.is_empty() {
            Self::default()
        } else {
            Self(names)
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::new(DEFAULT_RANKS)
    }
}

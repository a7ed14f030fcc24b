//! Location categories.

use std::fmt;

/// Label that marks the subject's home in the default event log layout.
pub const DEFAULT_HOME_LABEL: &str = "HOME";

/// Where an event happened.
///
/// Time spent at home is never caregiving time, so home is a category of its
/// own rather than a name compared against a sentinel inside the fold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Home,
    Named(String),
}

impl Location {
    /// Classifies a raw location name against the configured home label.
    pub fn classify(name: &str, home_label: &str) -> Self {
        if name == home_label {
            Self::Home
        } else {
            Self::Named(name.to_string())
        }
    }

    pub const fn is_home(&self) -> bool {
        matches!(self, Self::Home)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => write!(f, "home"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_label_is_home() {
        assert_eq!(Location::classify("HOME", DEFAULT_HOME_LABEL), Location::Home);
        assert!(Location::classify("HOME", DEFAULT_HOME_LABEL).is_home());
    }

    #[test]
    fn other_names_are_named() {
        assert_eq!(
            Location::classify("WORK", DEFAULT_HOME_LABEL),
            Location::Named("WORK".to_string())
        );
        // Exact match only
        assert!(!Location::classify("home", DEFAULT_HOME_LABEL).is_home());
    }

    #[test]
    fn custom_home_label() {
        assert!(Location::classify("Casa", "Casa").is_home());
        assert!(!Location::classify("HOME", "Casa").is_home());
    }
}

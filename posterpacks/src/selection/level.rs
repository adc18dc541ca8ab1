//! Level identity and whitelist inclusion.

use std::fmt;

/// Level name the host uses for every endless floor.
pub const ENDLESS_LEVEL_NAME: &str = "INF";

/// Identifies one level being generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LevelKey {
    pub name: String,
    pub id: i32,
}

impl LevelKey {
    pub fn new(name: impl Into<String>, id: i32) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }

    pub fn is_endless(&self) -> bool {
        self.name == ENDLESS_LEVEL_NAME
    }

    /// Name matched against whitelists. Endless floors append their id, so
    /// `INF3` names the third floor.
    pub fn whitelist_key(&self) -> String {
        if self.is_endless() {
            format!("{}{}", self.name, self.id)
        } else {
            self.name.clone()
        }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

/// Whether a poster with this whitelist may appear in `level`.
///
/// An empty whitelist admits every level. Otherwise a listed level is
/// admitted, or excluded when `reverse` is set. Endless floors also match on
/// the plain `INF` name.
pub fn level_included(whitelist: &[String], reverse: bool, level: &LevelKey) -> bool {
    if whitelist.is_empty() {
        return true;
    }
    let key = level.whitelist_key();
    let listed = whitelist.iter().any(|name| *name == key)
        || (level.is_endless() && whitelist.iter().any(|name| *name == level.name));
    listed != reverse
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_whitelist_key() {
        assert_eq!(LevelKey::new("F2", 1).whitelist_key(), "F2");
        assert_eq!(LevelKey::new("INF", 7).whitelist_key(), "INF7");
    }

    #[test]
    fn test_listed_level() {
        let level = LevelKey::new("F1", 0);
        assert!(level_included(&list(&["F1", "F3"]), false, &level));
        assert!(!level_included(&list(&["F2"]), false, &level));
        assert!(!level_included(&list(&["F1"]), true, &level));
    }

    #[test]
    fn test_endless_matches_key_or_name() {
        let floor = LevelKey::new("INF", 4);
        assert!(level_included(&list(&["INF4"]), false, &floor));
        assert!(level_included(&list(&["INF"]), false, &floor));
        assert!(!level_included(&list(&["INF5"]), false, &floor));
    }

    proptest! {
        #[test]
        fn prop_empty_whitelist_always_includes(name in "[A-Z]{1,4}", id in 0i32..50, reverse: bool) {
            prop_assert!(level_included(&[], reverse, &LevelKey::new(name, id)));
        }

        #[test]
        fn prop_reverse_flips_non_empty_whitelist(
            names in prop::collection::vec("[A-Z]{1,3}[0-9]?", 1..6),
            name in "[A-Z]{1,3}",
            id in 0i32..10,
        ) {
            let level = LevelKey::new(name, id);
            prop_assert_eq!(
                level_included(&names, false, &level),
                !level_included(&names, true, &level)
            );
        }
    }
}

//! Foreign poster blacklist.

use std::collections::HashSet;

/// Name list used to strip posters that did not come from user packs.
///
/// A name matches when its trimmed form is in the list, XOR the invert flag.
/// With `invert` set the list becomes the set of names to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Blacklist {
    names: HashSet<String>,
    invert: bool,
}

impl Blacklist {
    /// Build from names; entries are trimmed and empty entries dropped.
    pub fn new<I, S>(names: I, invert: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names, invert }
    }

    /// Build from a comma-separated list.
    pub fn parse(raw: &str, invert: bool) -> Self {
        Self::new(raw.split(','), invert)
    }

    /// Whether a poster with this name is blacklisted.
    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(name.trim()) != self.invert
    }

    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.names.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The list as written in the config file.
    pub fn to_raw(&self) -> String {
        self.names().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_drops_empty() {
        let list = Blacklist::parse(" chalk_face , ,principal_poster,", false);
        assert_eq!(list.names(), vec!["chalk_face", "principal_poster"]);
        assert_eq!(list.to_raw(), "chalk_face,principal_poster");
    }

    #[test]
    fn test_matches_trimmed_name() {
        let list = Blacklist::parse("chalk_face", false);
        assert!(list.matches("chalk_face"));
        assert!(list.matches("  chalk_face "));
        assert!(!list.matches("other"));
    }

    #[test]
    fn test_invert_keeps_only_listed() {
        let list = Blacklist::parse("keep_me", true);
        assert!(!list.matches("keep_me"));
        assert!(list.matches("anything_else"));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let list = Blacklist::default();
        assert!(!list.matches("anything"));
        assert!(!list.is_inverted());
    }
}

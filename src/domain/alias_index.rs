//! Alias → owning entry lookup, rebuilt for every command.

use std::collections::HashMap;

use crate::domain::HostEntry;

/// Maps each alias to the position of the entry that owns it.
///
/// Positions are whatever the caller enumerates with (block index, list index).
/// If a hand-edited file repeats an alias, the last owner wins.
#[derive(Debug, Default)]
pub struct AliasIndex {
    owners: HashMap<String, usize>,
}

impl AliasIndex {
    pub fn build<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a HostEntry)>,
    {
        let mut owners = HashMap::new();
        for (pos, entry) in entries {
            for alias in &entry.aliases {
                owners.insert(alias.clone(), pos);
            }
        }
        Self { owners }
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.owners.contains_key(alias)
    }

    pub fn owner(&self, alias: &str) -> Option<usize> {
        self.owners.get(alias).copied()
    }

    /// First of `aliases` that is not indexed.
    pub fn first_missing<'s>(&self, aliases: &'s [String]) -> Option<&'s str> {
        aliases
            .iter()
            .find(|a| !self.contains(a))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<HostEntry> {
        vec![
            HostEntry {
                aliases: vec!["web".into(), "www".into()],
                ..Default::default()
            },
            HostEntry::new("db"),
            HostEntry::new("web"),
        ]
    }

    #[test]
    fn test_build_indexes_every_alias() {
        let list = entries();
        let index = AliasIndex::build(list.iter().enumerate());
        assert_eq!(index.len(), 3);
        assert_eq!(index.owner("www"), Some(0));
        assert_eq!(index.owner("db"), Some(1));
        assert!(!index.contains("cache"));
    }

    #[test]
    fn test_duplicate_alias_last_owner_wins() {
        let list = entries();
        let index = AliasIndex::build(list.iter().enumerate());
        assert_eq!(index.owner("web"), Some(2));
    }

    #[test]
    fn test_first_missing() {
        let list = entries();
        let index = AliasIndex::build(list.iter().enumerate());
        let wanted = vec!["db".to_string(), "nope".to_string(), "gone".to_string()];
        assert_eq!(index.first_missing(&wanted), Some("nope"));
        assert_eq!(index.first_missing(&wanted[..1]), None);
    }
}

//! Entry-state classification and predicate filtering.

use serde::{Deserialize, Serialize};

use crate::types::{Catalog, Entry};

/// The translation state of a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryState {
    /// Has a non-empty, non-fuzzy translation.
    Translated,
    /// Every translation string is empty.
    Untranslated,
    /// Carries the `fuzzy` flag.
    Fuzzy,
    /// The translation is textually identical to the source.
    Same,
    /// Retired (`#~`) entry.
    Obsolete,
}

/// Classifies one entry for display and statistics.
pub fn classify(entry: &Entry) -> EntryState {
    if entry.obsolete {
        EntryState::Obsolete
    } else if entry.fuzzy {
        EntryState::Fuzzy
    } else if entry.is_untranslated() {
        EntryState::Untranslated
    } else if entry.is_same_as_source() {
        EntryState::Same
    } else {
        EntryState::Translated
    }
}

/// A predicate over entry states.
///
/// `translated` / `untranslated` / `fuzzy` are OR'd together when any is
/// set; with none set every state matches. `no_obsolete` overrides
/// `with_obsolete`. `only_same` and `only_obsolete` are override modes
/// checked before everything else. The default selects all states and
/// includes obsolete entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EntryStateFilter {
    pub translated: bool,
    pub untranslated: bool,
    pub fuzzy: bool,
    pub with_obsolete: bool,
    pub no_obsolete: bool,
    pub only_same: bool,
    pub only_obsolete: bool,
}

impl EntryStateFilter {
    fn has_state_bits(&self) -> bool {
        self.translated || self.untranslated || self.fuzzy
    }

    /// Returns `true` if `entry` passes this filter. The evaluation order
    /// matters: override modes, then obsolete handling, then state bits.
    pub fn matches(&self, entry: &Entry) -> bool {
        if self.only_same {
            return !entry.obsolete && entry.is_same_as_source();
        }
        if self.only_obsolete {
            return entry.obsolete;
        }
        if entry.obsolete {
            if self.no_obsolete {
                return false;
            }
            return self.with_obsolete || !self.has_state_bits();
        }
        if self.has_state_bits() {
            return (self.translated && entry.has_translation() && !entry.fuzzy)
                || (self.untranslated && entry.is_untranslated())
                || (self.fuzzy && entry.fuzzy);
        }
        true
    }
}

/// Returns the order-preserving subsequence of entries matching `filter`.
pub fn filter_entries<'a>(entries: &'a [Entry], filter: &EntryStateFilter) -> Vec<&'a Entry> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

/// Per-state entry counts for a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total: usize,
    pub translated: usize,
    pub untranslated: usize,
    pub fuzzy: usize,
    pub same: usize,
    pub obsolete: usize,
}

/// Counts entries by state.
pub fn catalog_stats(catalog: &Catalog) -> CatalogStats {
    let mut stats = CatalogStats::default();
    for entry in &catalog.entries {
        stats.total += 1;
        match classify(entry) {
            EntryState::Translated => stats.translated += 1,
            EntryState::Untranslated => stats.untranslated += 1,
            EntryState::Fuzzy => stats.fuzzy += 1,
            EntryState::Same => stats.same += 1,
            EntryState::Obsolete => stats.obsolete += 1,
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Vec<Entry> {
        let a = Entry::new("a", "A");
        let b = Entry::new("b", "");
        let c = Entry::new("c", "c");
        let mut d = Entry::new("d", "D");
        d.obsolete = true;
        vec![a, b, c, d]
    }

    fn ids(selected: &[&Entry]) -> Vec<String> {
        selected.iter().map(|entry| entry.msg_id.clone()).collect()
    }

    #[test]
    fn test_default_filter_selects_everything() {
        let entries = fixture();
        let selected = filter_entries(&entries, &EntryStateFilter::default());
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn test_translated_bit_excludes_obsolete_by_default() {
        let entries = fixture();
        let filter = EntryStateFilter {
            translated: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["a", "c"]);
    }

    #[test]
    fn test_translated_with_no_obsolete() {
        let entries = fixture();
        let filter = EntryStateFilter {
            translated: true,
            no_obsolete: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["a", "c"]);
    }

    #[test]
    fn test_no_obsolete_overrides_with_obsolete() {
        let entries = fixture();
        let filter = EntryStateFilter {
            with_obsolete: true,
            no_obsolete: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_state_bits_with_obsolete_included() {
        let entries = fixture();
        let filter = EntryStateFilter {
            translated: true,
            with_obsolete: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_untranslated_bit() {
        let entries = fixture();
        let filter = EntryStateFilter {
            untranslated: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["b"]);
    }

    #[test]
    fn test_fuzzy_bit_matches_fuzzy_even_when_translated() {
        let mut entries = fixture();
        entries[0].fuzzy = true;
        let filter = EntryStateFilter {
            fuzzy: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["a"]);

        // A fuzzy entry does not count as translated.
        let translated = EntryStateFilter {
            translated: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &translated)), vec!["c"]);
    }

    #[test]
    fn test_only_same() {
        let entries = fixture();
        let filter = EntryStateFilter {
            only_same: true,
            // State bits are ignored in override mode.
            untranslated: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["c"]);
    }

    #[test]
    fn test_only_same_matches_plural_form_zero() {
        let mut entry = Entry::new("day", "");
        entry.msg_id_plural = Some("days".to_string());
        entry.msg_str_plural = vec!["day".to_string(), "days".to_string()];
        let filter = EntryStateFilter {
            only_same: true,
            ..EntryStateFilter::default()
        };
        assert!(filter.matches(&entry));
    }

    #[test]
    fn test_only_obsolete() {
        let entries = fixture();
        let filter = EntryStateFilter {
            only_obsolete: true,
            ..EntryStateFilter::default()
        };
        assert_eq!(ids(&filter_entries(&entries, &filter)), vec!["d"]);
    }

    #[test]
    fn test_plural_translation_counts_when_any_form_set() {
        let mut entry = Entry::new("file", "");
        entry.msg_id_plural = Some("files".to_string());
        entry.msg_str_plural = vec![String::new(), "Dateien".to_string()];
        let filter = EntryStateFilter {
            translated: true,
            ..EntryStateFilter::default()
        };
        assert!(filter.matches(&entry));

        entry.msg_str_plural = vec![String::new(), String::new()];
        let untranslated = EntryStateFilter {
            untranslated: true,
            ..EntryStateFilter::default()
        };
        assert!(untranslated.matches(&entry));
        assert!(!filter.matches(&entry));
    }

    #[test]
    fn test_classify_and_stats() {
        let mut entries = fixture();
        entries[1].fuzzy = true;
        let catalog = Catalog::default().with_entries(entries);

        assert_eq!(classify(&catalog.entries[0]), EntryState::Translated);
        assert_eq!(classify(&catalog.entries[1]), EntryState::Fuzzy);
        assert_eq!(classify(&catalog.entries[2]), EntryState::Same);
        assert_eq!(classify(&catalog.entries[3]), EntryState::Obsolete);

        let stats = catalog_stats(&catalog);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.translated, 1);
        assert_eq!(stats.fuzzy, 1);
        assert_eq!(stats.same, 1);
        assert_eq!(stats.obsolete, 1);
    }
}

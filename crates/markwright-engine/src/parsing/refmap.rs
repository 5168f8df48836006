use std::collections::BTreeMap;

use super::chars::is_line_whitespace;

/// Destination and title of a link reference definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReference {
    pub destination: String,
    /// Empty when the definition had no title.
    pub title: String,
}

/// Link reference definitions keyed by normalized label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMap {
    entries: BTreeMap<String, LinkReference>,
}

impl ReferenceMap {
    /// Records a definition. The first definition of a label wins; returns
    /// whether this one was stored.
    pub fn insert(&mut self, label: &str, reference: LinkReference) -> bool {
        let key = normalize_label(label);
        if key.is_empty() || self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, reference);
        true
    }

    pub fn get(&self, label: &str) -> Option<&LinkReference> {
        self.entries.get(&normalize_label(label))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LinkReference)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Case-folds a label and collapses its internal whitespace.
///
/// Surrounding brackets, if present, are not part of the label.
pub fn normalize_label(label: &str) -> String {
    let inner = label
        .strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .unwrap_or(label);
    let collapsed = inner
        .split(is_line_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.to_lowercase().to_uppercase()
}

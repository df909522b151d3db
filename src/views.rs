use std::collections::{hash_map::Entry, HashMap, HashSet};

use num_traits::ToPrimitive;

use crate::{fields::LogicalField, filter::FilteredRows};

/// The most titles a ranking shows.
pub(crate) const TOP_N: usize = 20;

/// Counts occurrences, most frequent first. Equal counts keep the order in
/// which values were first seen.
pub(crate) fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for value in values {
        match index.entry(value) {
            Entry::Occupied(slot) => counts[*slot.get()].1 += 1,
            Entry::Vacant(slot) => {
                slot.insert(counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Number of distinct non-empty values of `field` in the filtered rows.
pub(crate) fn distinct_count(rows: &FilteredRows<'_>, field: LogicalField) -> usize {
    rows.values(field).collect::<HashSet<_>>().len()
}

/// The most frequent non-empty value of `field`, with its count.
pub(crate) fn most_common(rows: &FilteredRows<'_>, field: LogicalField) -> Option<(String, usize)> {
    value_counts(rows.values(field))
        .first()
        .map(|(value, count)| ((*value).to_string(), *count))
}

/// Top job titles by listing count.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ranking {
    entries: Vec<(String, usize)>,
}

impl Ranking {
    /// `None` when the title field is unresolved or nothing passed the
    /// filter.
    pub(crate) fn top_titles(rows: &FilteredRows<'_>) -> Option<Self> {
        if rows.is_empty() || rows.dataset().text(LogicalField::JobTitle).is_none() {
            return None;
        }
        let entries: Vec<_> = value_counts(rows.values(LogicalField::JobTitle))
            .into_iter()
            .take(TOP_N)
            .map(|(title, count)| (title.to_string(), count))
            .collect();
        if entries.is_empty() {
            return None;
        }
        Some(Self { entries })
    }

    pub(crate) fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub(crate) fn top(&self) -> Option<&(String, usize)> {
        self.entries.first()
    }

    /// Mean count across the ranked titles.
    pub(crate) fn average(&self) -> f64 {
        let total: usize = self.entries.iter().map(|(_, count)| count).sum();
        match (total.to_f64(), self.entries.len().to_f64()) {
            (Some(total), Some(len)) if len > 0.0 => total / len,
            _ => 0.0,
        }
    }
}

/// Compact form of a count: `1.5K`, `2.3M`, or the plain number below a
/// thousand.
pub(crate) fn format_number(n: usize) -> String {
    let value = n.to_f64().unwrap_or_default();
    if n >= 1_000_000 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.1}K", value / 1_000.0)
    } else {
        n.to_string()
    }
}

/// `part` as a percentage of `total`; zero for an empty total.
pub(crate) fn share_of_total(part: usize, total: usize) -> f64 {
    match (part.to_f64(), total.to_f64()) {
        (Some(part), Some(total)) if total > 0.0 => part / total * 100.0,
        _ => 0.0,
    }
}

/// Comma-separated selection, or `All` when nothing is selected.
pub(crate) fn describe_selection<T: ToString>(values: &[T]) -> String {
    if values.is_empty() {
        "All".to_string()
    } else {
        values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

use std::collections::BTreeSet;

use async_graphql::SimpleObject;

use crate::{
    dataset::Dataset,
    fields::{FieldKind, LogicalField},
    filter::FilterSelection,
    settings::DefaultPreferences,
};

/// Number of leading options selected when no preferred job title matches.
pub(crate) const JOB_TITLE_FALLBACK: usize = 2;
/// Number of leading options selected when no location or experience hint
/// matches.
pub(crate) const HINT_FALLBACK: usize = 1;

/// Sorted distinct non-empty values of a text column.
pub(crate) fn distinct_values(cells: &[String]) -> Vec<String> {
    cells
        .iter()
        .filter(|cell| !cell.is_empty())
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(ToString::to_string)
        .collect()
}

/// Sorted distinct codes of a numeric column.
pub(crate) fn distinct_codes(codes: &[Option<i64>]) -> Vec<i64> {
    codes
        .iter()
        .flatten()
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Picks the options matching `preferred`, in preferred-list order.
///
/// A preferred value matches an option when the two are equal ignoring
/// case, or when it is contained in the option ignoring case. Each option
/// is picked at most once. When nothing matches, the first `fallback`
/// options are picked instead.
pub(crate) fn pick_defaults<S: AsRef<str>>(
    options: &[String],
    preferred: &[S],
    fallback: usize,
) -> Vec<String> {
    let lowered: Vec<String> = options.iter().map(|o| o.to_lowercase()).collect();
    let mut picks: Vec<String> = Vec::new();
    for p in preferred {
        let p = p.as_ref().to_lowercase();
        for (option, lower) in options.iter().zip(&lowered) {
            if (*lower == p || lower.contains(&p)) && !picks.contains(option) {
                picks.push(option.clone());
            }
        }
    }
    if picks.is_empty() {
        options.iter().take(fallback).cloned().collect()
    } else {
        picks
    }
}

/// The first non-zero code, or the first code when all are zero.
pub(crate) fn pick_remote_default(codes: &[i64]) -> Vec<i64> {
    codes
        .iter()
        .find(|&&code| code != 0)
        .or_else(|| codes.first())
        .copied()
        .into_iter()
        .collect()
}

/// Selectable values for each filterable field. Unresolved fields have no
/// options. Only one of `remote_ratios` and `remote_labels` is filled,
/// depending on whether the remote column holds codes or text.
#[derive(SimpleObject, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FilterOptions {
    pub(crate) job_titles: Vec<String>,
    pub(crate) locations: Vec<String>,
    pub(crate) experience_levels: Vec<String>,
    pub(crate) remote_ratios: Vec<i64>,
    pub(crate) remote_labels: Vec<String>,
}

impl FilterOptions {
    pub(crate) fn enumerate(dataset: &Dataset) -> Self {
        let text = |field| dataset.text(field).map(distinct_values).unwrap_or_default();
        Self {
            job_titles: text(LogicalField::JobTitle),
            locations: text(LogicalField::Location),
            experience_levels: text(LogicalField::Experience),
            remote_ratios: dataset
                .codes(LogicalField::RemoteRatio)
                .map(distinct_codes)
                .unwrap_or_default(),
            remote_labels: if dataset.kind(LogicalField::RemoteRatio) == Some(FieldKind::Text) {
                text(LogicalField::RemoteRatio)
            } else {
                Vec::new()
            },
        }
    }

    /// The selection a fresh session starts with.
    pub(crate) fn defaults(&self, preferences: &DefaultPreferences) -> FilterSelection {
        FilterSelection {
            job_titles: pick_defaults(
                &self.job_titles,
                &preferences.job_titles,
                JOB_TITLE_FALLBACK,
            ),
            locations: pick_defaults(&self.locations, &preferences.locations, HINT_FALLBACK),
            experience_levels: pick_defaults(
                &self.experience_levels,
                &preferences.experience_levels,
                HINT_FALLBACK,
            ),
            remote_ratios: pick_remote_default(&self.remote_ratios),
            remote_labels: self
                .remote_labels
                .iter()
                .take(HINT_FALLBACK)
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::dataset_from_csv;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn distinct_values_are_sorted_and_skip_empty() {
        let cells = strings(&["b", "", "a", "b", "C"]);
        assert_eq!(distinct_values(&cells), ["C", "a", "b"]);
    }

    #[test]
    fn distinct_codes_are_numerically_sorted() {
        assert_eq!(
            distinct_codes(&[Some(100), None, Some(0), Some(50), Some(100)]),
            [0, 50, 100]
        );
    }

    #[test]
    fn defaults_match_case_insensitively_in_preferred_order() {
        let options = strings(&["Data Scientist", "ML Engineer", "AI Research Scientist"]);
        let picks = pick_defaults(
            &options,
            &["Data Scientist", "Ai Research Scientist"],
            JOB_TITLE_FALLBACK,
        );
        assert_eq!(picks, ["Data Scientist", "AI Research Scientist"]);
    }

    #[test]
    fn defaults_follow_preferred_order_not_option_order() {
        let options = strings(&["Analyst", "Engineer"]);
        let picks = pick_defaults(&options, &["engineer", "analyst"], JOB_TITLE_FALLBACK);
        assert_eq!(picks, ["Engineer", "Analyst"]);
    }

    #[test]
    fn substring_matches_are_deduplicated() {
        let options = strings(&["Data Scientist", "Senior Data Scientist"]);
        let picks = pick_defaults(&options, &["scientist", "data"], JOB_TITLE_FALLBACK);
        assert_eq!(picks, ["Data Scientist", "Senior Data Scientist"]);
    }

    #[test]
    fn falls_back_to_leading_options() {
        let options = strings(&["A", "B", "C"]);
        assert_eq!(pick_defaults(&options, &["zzz"], JOB_TITLE_FALLBACK), ["A", "B"]);
        assert_eq!(pick_defaults(&options, &["zzz"], HINT_FALLBACK), ["A"]);

        let single = strings(&["A"]);
        assert_eq!(pick_defaults(&single, &["zzz"], JOB_TITLE_FALLBACK), ["A"]);
    }

    #[test]
    fn empty_options_yield_no_defaults() {
        let picks = pick_defaults(&[], &["Data Scientist"], JOB_TITLE_FALLBACK);
        assert!(picks.is_empty());
    }

    #[test]
    fn remote_default_prefers_non_zero() {
        assert_eq!(pick_remote_default(&[0, 50, 100]), [50]);
        assert_eq!(pick_remote_default(&[0]), [0]);
        assert!(pick_remote_default(&[]).is_empty());
    }

    #[test]
    fn enumerates_resolved_fields_only() {
        let dataset = dataset_from_csv(
            "job_title,country,remote_ratio\n\
             ML Engineer,Germany,0\n\
             Data Scientist,France,100\n\
             ML Engineer,,50\n",
        );
        let options = FilterOptions::enumerate(&dataset);
        assert_eq!(options.job_titles, ["Data Scientist", "ML Engineer"]);
        assert_eq!(options.locations, ["France", "Germany"]);
        assert!(options.experience_levels.is_empty());
        assert_eq!(options.remote_ratios, [0, 50, 100]);
        assert!(options.remote_labels.is_empty());
    }

    #[test]
    fn text_remote_column_offers_labels() {
        let dataset = dataset_from_csv(
            "job_title,work_setting\n\
             A,Remote\n\
             B,Onsite\n\
             C,Hybrid\n\
             D,Remote\n",
        );
        let options = FilterOptions::enumerate(&dataset);
        assert!(options.remote_ratios.is_empty());
        assert_eq!(options.remote_labels, ["Hybrid", "Onsite", "Remote"]);

        let defaults = options.defaults(&DefaultPreferences::default());
        assert!(defaults.remote_ratios.is_empty());
        assert_eq!(defaults.remote_labels, ["Hybrid"]);
    }

    #[test]
    fn initial_defaults_per_field() {
        let dataset = dataset_from_csv(
            "job_title,country,experience_level,remote_ratio\n\
             ML Engineer,Germany,SE,0\n\
             Data Scientist,France,MI,100\n\
             Analyst,East Germany,EN,50\n",
        );
        let preferences = DefaultPreferences {
            job_titles: strings(&["Data Scientist", "Ai Research Scientist"]),
            locations: strings(&["germany"]),
            experience_levels: strings(&["mi"]),
        };
        let defaults = FilterOptions::enumerate(&dataset).defaults(&preferences);
        assert_eq!(defaults.job_titles, ["Data Scientist"]);
        assert_eq!(defaults.locations, ["East Germany", "Germany"]);
        assert_eq!(defaults.experience_levels, ["MI"]);
        assert_eq!(defaults.remote_ratios, [50]);
        assert!(defaults.remote_labels.is_empty());
    }
}

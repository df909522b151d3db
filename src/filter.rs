use std::collections::HashSet;

use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::{
    dataset::Dataset,
    fields::{FieldKind, LogicalField},
};

/// Values chosen per field. An empty list leaves the field unconstrained.
///
/// The remote field is selected through `remote_ratios` when its column
/// holds integer codes and through `remote_labels` when it holds text.
#[derive(SimpleObject, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub(crate) struct FilterSelection {
    pub(crate) job_titles: Vec<String>,
    pub(crate) locations: Vec<String>,
    pub(crate) experience_levels: Vec<String>,
    pub(crate) remote_ratios: Vec<i64>,
    pub(crate) remote_labels: Vec<String>,
}

/// Filter selection as sent by a client. Omitted fields are unconstrained.
#[derive(InputObject, Clone, Debug, Default)]
pub(crate) struct FilterSelectionInput {
    #[graphql(default)]
    job_titles: Vec<String>,
    #[graphql(default)]
    locations: Vec<String>,
    #[graphql(default)]
    experience_levels: Vec<String>,
    #[graphql(default)]
    remote_ratios: Vec<i64>,
    #[graphql(default)]
    remote_labels: Vec<String>,
}

impl From<FilterSelectionInput> for FilterSelection {
    fn from(input: FilterSelectionInput) -> Self {
        Self {
            job_titles: input.job_titles,
            locations: input.locations,
            experience_levels: input.experience_levels,
            remote_ratios: input.remote_ratios,
            remote_labels: input.remote_labels,
        }
    }
}

impl FilterSelection {
    fn text(&self, field: LogicalField) -> &[String] {
        match field {
            LogicalField::JobTitle => &self.job_titles,
            LogicalField::Location => &self.locations,
            LogicalField::Experience => &self.experience_levels,
            LogicalField::RemoteRatio => &self.remote_labels,
            LogicalField::Skills | LogicalField::Company => &[],
        }
    }
}

/// A single field constraint over the whole table.
enum Predicate<'a> {
    Text {
        cells: &'a [String],
        allowed: HashSet<&'a str>,
    },
    Code {
        codes: &'a [Option<i64>],
        allowed: HashSet<i64>,
    },
}

impl Predicate<'_> {
    fn matches(&self, row: usize) -> bool {
        match self {
            Predicate::Text { cells, allowed } => allowed.contains(cells[row].as_str()),
            Predicate::Code { codes, allowed } => {
                codes[row].is_some_and(|code| allowed.contains(&code))
            }
        }
    }
}

/// Turns the non-empty selections on resolved fields into predicates.
/// Everything else imposes no constraint and is skipped, including a
/// selection that does not fit the kind the field was loaded as.
fn compile<'a>(dataset: &'a Dataset, selection: &'a FilterSelection) -> Vec<Predicate<'a>> {
    let mut predicates = Vec::new();
    for field in [
        LogicalField::JobTitle,
        LogicalField::Location,
        LogicalField::Experience,
        LogicalField::RemoteRatio,
    ] {
        let chosen = selection.text(field);
        if chosen.is_empty() || dataset.kind(field) != Some(FieldKind::Text) {
            continue;
        }
        if let Some(cells) = dataset.text(field) {
            predicates.push(Predicate::Text {
                cells,
                allowed: chosen.iter().map(String::as_str).collect(),
            });
        }
    }
    if !selection.remote_ratios.is_empty() {
        if let Some(codes) = dataset.codes(LogicalField::RemoteRatio) {
            predicates.push(Predicate::Code {
                codes,
                allowed: selection.remote_ratios.iter().copied().collect(),
            });
        }
    }
    predicates
}

/// One entry per row: whether the row passes every active constraint.
pub(crate) fn mask(dataset: &Dataset, selection: &FilterSelection) -> Vec<bool> {
    let predicates = compile(dataset, selection);
    (0..dataset.len())
        .map(|row| predicates.iter().all(|p| p.matches(row)))
        .collect()
}

/// The rows of a dataset that passed a filter, in table order.
pub(crate) struct FilteredRows<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl<'a> FilteredRows<'a> {
    pub(crate) fn apply(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        let rows = mask(dataset, selection)
            .into_iter()
            .enumerate()
            .filter_map(|(row, keep)| keep.then_some(row))
            .collect();
        Self { dataset, rows }
    }

    pub(crate) fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Row indices into the underlying table.
    pub(crate) fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Non-empty values of a text field over the filtered rows.
    pub(crate) fn values(&self, field: LogicalField) -> impl Iterator<Item = &'a str> + '_ {
        self.rows
            .iter()
            .filter_map(move |&row| self.dataset.text_at(field, row))
    }
}

use async_graphql::{Context, Object, Result, SimpleObject};

use crate::{
    dashboard::Dashboard,
    fields::LogicalField,
    filter::{FilterSelection, FilterSelectionInput, FilteredRows},
    views::{describe_selection, distinct_count, format_number, most_common, share_of_total},
};

#[derive(SimpleObject)]
struct ValueCount {
    value: String,
    count: usize,
}

impl From<(String, usize)> for ValueCount {
    fn from((value, count): (String, usize)) -> Self {
        Self { value, count }
    }
}

/// The selection in human-readable form. Unconstrained fields read "All".
#[derive(SimpleObject)]
struct ActiveFilters {
    job_titles: String,
    locations: String,
    experience_levels: String,
    remote_ratios: String,
}

impl From<&FilterSelection> for ActiveFilters {
    fn from(selection: &FilterSelection) -> Self {
        Self {
            job_titles: describe_selection(&selection.job_titles),
            locations: describe_selection(&selection.locations),
            experience_levels: describe_selection(&selection.experience_levels),
            remote_ratios: if selection.remote_labels.is_empty() {
                describe_selection(&selection.remote_ratios)
            } else {
                describe_selection(&selection.remote_labels)
            },
        }
    }
}

#[derive(SimpleObject)]
struct Overview {
    /// The number of postings passing the filter.
    filtered_jobs: usize,

    /// `filtered_jobs` in compact form.
    filtered_jobs_display: String,

    /// `filtered_jobs` as a percentage of all postings.
    share_of_total: f64,

    /// Distinct job titles among the filtered postings.
    unique_titles: usize,

    /// Distinct companies among the filtered postings.
    unique_companies: usize,

    /// Distinct locations among the filtered postings.
    unique_locations: usize,

    /// The most frequent job title, if any.
    most_common_role: Option<ValueCount>,

    /// The most frequent location, if any.
    top_location: Option<ValueCount>,

    active_filters: ActiveFilters,
}

#[derive(Default)]
pub(super) struct OverviewQuery;

#[Object]
impl OverviewQuery {
    #[allow(clippy::unused_async)]
    async fn overview(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] selection: FilterSelectionInput,
    ) -> Result<Overview> {
        let dataset = ctx.data::<Dashboard>()?.dataset();
        let selection = FilterSelection::from(selection);
        let rows = FilteredRows::apply(dataset, &selection);

        Ok(Overview {
            filtered_jobs: rows.len(),
            filtered_jobs_display: format_number(rows.len()),
            share_of_total: share_of_total(rows.len(), dataset.len()),
            unique_titles: distinct_count(&rows, LogicalField::JobTitle),
            unique_companies: distinct_count(&rows, LogicalField::Company),
            unique_locations: distinct_count(&rows, LogicalField::Location),
            most_common_role: most_common(&rows, LogicalField::JobTitle).map(Into::into),
            top_location: most_common(&rows, LogicalField::Location).map(Into::into),
            active_filters: ActiveFilters::from(&selection),
        })
    }
}

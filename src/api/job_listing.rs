use async_graphql::{
    connection::{query, Connection, EmptyFields},
    Context, Object, Result, SimpleObject,
};

use super::total_count_field::TotalCountField;
use crate::{
    dashboard::Dashboard,
    dataset::Dataset,
    fields::{FieldKind, LogicalField},
    filter::{FilterSelection, FilterSelectionInput, FilteredRows},
};

/// One posting as shown in the search view. Fields whose column is missing
/// or blank are null.
#[derive(SimpleObject)]
pub(crate) struct JobListing {
    /// Zero-based position of the posting in the source file.
    row: usize,
    job_title: Option<String>,
    company: Option<String>,
    location: Option<String>,
    experience_level: Option<String>,
    remote_ratio: Option<i64>,
    /// The remote setting when the remote column holds text instead of
    /// codes.
    remote_label: Option<String>,
    skills: Option<String>,
}

impl JobListing {
    fn from_row(dataset: &Dataset, row: usize) -> Self {
        let text = |field| dataset.text_at(field, row).map(ToString::to_string);
        Self {
            row,
            job_title: text(LogicalField::JobTitle),
            company: text(LogicalField::Company),
            location: text(LogicalField::Location),
            experience_level: text(LogicalField::Experience),
            remote_ratio: dataset.code_at(LogicalField::RemoteRatio, row),
            remote_label: (dataset.kind(LogicalField::RemoteRatio) == Some(FieldKind::Text))
                .then(|| text(LogicalField::RemoteRatio))
                .flatten(),
            skills: text(LogicalField::Skills),
        }
    }
}

#[derive(Default)]
pub(super) struct JobListingQuery;

#[Object]
impl JobListingQuery {
    /// Postings passing the filter, in file order. Without paging arguments
    /// the first 50 are returned.
    async fn job_listings(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] selection: FilterSelectionInput,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<Connection<String, JobListing, TotalCountField, EmptyFields>> {
        let dataset = ctx.data::<Dashboard>()?.dataset();
        let selection = FilterSelection::from(selection);
        let rows = FilteredRows::apply(dataset, &selection);
        query(
            after,
            before,
            first,
            last,
            |after, before, first, last| async move {
                super::load_connection(
                    rows.rows(),
                    |row| JobListing::from_row(dataset, row),
                    after,
                    before,
                    first,
                    last,
                )
            },
        )
        .await
    }
}

use async_graphql::SimpleObject;

/// Connection-level field reporting how many rows matched, across all pages.
#[derive(SimpleObject)]
pub(super) struct TotalCountField {
    pub(super) total_count: usize,
}

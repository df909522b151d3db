use async_graphql::{
    connection::{query, Connection, EmptyFields},
    Context, Object, Result, SimpleObject,
};

use super::total_count_field::TotalCountField;
use crate::dashboard::Dashboard;

/// One line of the loaded file, with a cell for every column.
#[derive(SimpleObject)]
struct RawRow {
    /// Zero-based position of the row in the source file.
    row: usize,

    /// Cells in the order of `rawColumns`. Missing cells are empty.
    cells: Vec<String>,
}

#[derive(Default)]
pub(super) struct RawRowQuery;

#[Object]
impl RawRowQuery {
    /// Every column header of the loaded file, bound to a field or not.
    #[allow(clippy::unused_async)]
    async fn raw_columns(&self, ctx: &Context<'_>) -> Result<Vec<String>> {
        Ok(ctx.data::<Dashboard>()?.dataset().table().headers().to_vec())
    }

    /// The loaded file as is, in file order.
    async fn raw_rows(
        &self,
        ctx: &Context<'_>,
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Result<Connection<String, RawRow, TotalCountField, EmptyFields>> {
        let table = ctx.data::<Dashboard>()?.dataset().table();
        let rows: Vec<usize> = (0..table.len()).collect();
        query(
            after,
            before,
            first,
            last,
            |after, before, first, last| async move {
                super::load_connection(
                    &rows,
                    |row| RawRow {
                        row,
                        cells: table.row(row),
                    },
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

#[cfg(test)]
mod tests {
    use crate::api::TestSchema;

    const RAW_JOBS: &str = "job_title,salary_usd,benefits_score\n\
        Data Scientist,120000,7.5\n\
        ML Engineer,,8.1\n\
        Data Analyst,65000\n";

    #[tokio::test]
    async fn columns_include_unbound_headers() {
        let schema = TestSchema::new(RAW_JOBS);
        let res = schema.execute("{ rawColumns }").await;
        assert_eq!(
            res.data.to_string(),
            r#"{rawColumns: ["job_title", "salary_usd", "benefits_score"]}"#
        );
    }

    #[tokio::test]
    async fn rows_carry_every_cell() {
        let schema = TestSchema::new(RAW_JOBS);
        let query = r"
        {
            rawRows {
                totalCount
                edges {
                    node {
                        row
                        cells
                    }
                }
            }
        }";
        let data = schema.execute(query).await.data.into_json().unwrap();
        assert_eq!(
            data["rawRows"],
            serde_json::json!({
                "totalCount": 3,
                "edges": [
                    { "node": { "row": 0, "cells": ["Data Scientist", "120000", "7.5"] } },
                    { "node": { "row": 1, "cells": ["ML Engineer", "", "8.1"] } },
                    { "node": { "row": 2, "cells": ["Data Analyst", "65000", ""] } }
                ]
            })
        );
    }

    #[tokio::test]
    async fn rows_are_paged() {
        let schema = TestSchema::new(RAW_JOBS);
        let query = r"
        {
            rawRows(first: 2) {
                edges {
                    node {
                        row
                    }
                }
                pageInfo {
                    hasNextPage
                    endCursor
                }
            }
        }";
        let data = schema.execute(query).await.data.into_json().unwrap();
        assert_eq!(
            data["rawRows"]["edges"],
            serde_json::json!([{ "node": { "row": 0 } }, { "node": { "row": 1 } }])
        );
        assert_eq!(data["rawRows"]["pageInfo"]["hasNextPage"], true);

        let end_cursor = data["rawRows"]["pageInfo"]["endCursor"].as_str().unwrap();
        let query = format!(
            r#"
        {{
            rawRows(after: "{end_cursor}") {{
                edges {{
                    node {{
                        cells
                    }}
                }}
                pageInfo {{
                    hasNextPage
                }}
            }}
        }}"#
        );
        let data = schema.execute(&query).await.data.into_json().unwrap();
        assert_eq!(
            data["rawRows"]["edges"],
            serde_json::json!([{ "node": { "cells": ["Data Analyst", "65000", ""] } }])
        );
        assert_eq!(data["rawRows"]["pageInfo"]["hasNextPage"], false);
    }
}

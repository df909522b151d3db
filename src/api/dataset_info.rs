use async_graphql::{Context, Object, Result, SimpleObject};

use crate::{dashboard::Dashboard, fields::LogicalField, views::format_number};

#[derive(SimpleObject)]
struct ResolvedColumn {
    field: LogicalField,
    column: String,
}

#[derive(SimpleObject)]
struct DatasetInfo {
    /// The number of postings in the loaded file.
    total_jobs: usize,

    /// `total_jobs` in compact form, such as "15.0K".
    total_jobs_display: String,

    /// The column backing each logical field. Fields without a matching
    /// column are omitted.
    columns: Vec<ResolvedColumn>,
}

#[derive(Default)]
pub(super) struct DatasetInfoQuery;

#[Object]
impl DatasetInfoQuery {
    #[allow(clippy::unused_async)]
    async fn dataset_info(&self, ctx: &Context<'_>) -> Result<DatasetInfo> {
        let dataset = ctx.data::<Dashboard>()?.dataset();
        Ok(DatasetInfo {
            total_jobs: dataset.len(),
            total_jobs_display: format_number(dataset.len()),
            columns: dataset
                .bindings()
                .iter()
                .map(|(field, column)| ResolvedColumn {
                    field,
                    column: column.to_string(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{TestSchema, TEST_JOBS};

    #[tokio::test]
    async fn reports_size_and_bindings() {
        let schema = TestSchema::new(TEST_JOBS);
        let query = r"
        {
            datasetInfo {
                totalJobs
                totalJobsDisplay
                columns {
                    field
                    column
                }
            }
        }";
        let data = schema.execute(query).await.data.into_json().unwrap();
        assert_eq!(data["datasetInfo"]["totalJobs"], 6);
        assert_eq!(data["datasetInfo"]["totalJobsDisplay"], "6");
        assert_eq!(
            data["datasetInfo"]["columns"],
            serde_json::json!([
                { "field": "JOB_TITLE", "column": "job_title" },
                { "field": "LOCATION", "column": "country" },
                { "field": "EXPERIENCE", "column": "experience_level" },
                { "field": "SKILLS", "column": "required_skills" },
                { "field": "COMPANY", "column": "company_name" },
                { "field": "REMOTE_RATIO", "column": "remote_ratio" }
            ])
        );
    }

    #[tokio::test]
    async fn unknown_columns_leave_fields_unbound() {
        let schema = TestSchema::new("title,salary\nData Scientist,100\n");
        let query = r"
        {
            datasetInfo {
                columns {
                    field
                    column
                }
            }
        }";
        let data = schema.execute(query).await.data.into_json().unwrap();
        assert_eq!(
            data["datasetInfo"]["columns"],
            serde_json::json!([{ "field": "JOB_TITLE", "column": "title" }])
        );
    }
}

mod dataset_info;
mod filter_options;
mod job_listing;
mod overview;
mod raw_row;
mod top_job_title;
mod total_count_field;

use async_graphql::{
    connection::{Connection, Edge, EmptyFields},
    EmptyMutation, EmptySubscription, MergedObject, OutputType, Result,
};
use base64::{engine::general_purpose, Engine as _};

use self::total_count_field::TotalCountField;
use crate::dashboard::Dashboard;

/// The default page size for connections when neither `first` nor `last` is provided.
const DEFAULT_PAGE_SIZE: usize = 50;

/// A set of queries defined in the schema.
///
/// This is exposed only for [`Schema`], and not used directly.
#[derive(Default, MergedObject)]
pub(crate) struct Query(
    dataset_info::DatasetInfoQuery,
    filter_options::FilterOptionsQuery,
    job_listing::JobListingQuery,
    overview::OverviewQuery,
    raw_row::RawRowQuery,
    top_job_title::TopJobTitleQuery,
);

pub(crate) type Schema = async_graphql::Schema<Query, EmptyMutation, EmptySubscription>;

pub(crate) fn schema(dashboard: Dashboard) -> Schema {
    Schema::build(Query::default(), EmptyMutation, EmptySubscription)
        .data(dashboard)
        .finish()
}

fn encode_cursor(row: usize) -> String {
    general_purpose::STANDARD.encode(row.to_string())
}

fn decode_cursor(cursor: &str) -> Result<usize> {
    let bytes = general_purpose::STANDARD.decode(cursor)?;
    Ok(String::from_utf8(bytes)?.parse()?)
}

/// Pages through `rows`, which must be in ascending table order. Cursors
/// identify table rows, so they stay valid across pages of the same filter.
fn load_connection<N>(
    rows: &[usize],
    node: impl Fn(usize) -> N,
    after: Option<String>,
    before: Option<String>,
    first: Option<usize>,
    last: Option<usize>,
) -> Result<Connection<String, N, TotalCountField, EmptyFields>>
where
    N: OutputType,
{
    let len = rows.len();
    let (start, end, has_previous, has_next) = if let Some(before) = before {
        if after.is_some() {
            return Err("cannot use both `after` and `before`".into());
        }
        if first.is_some() {
            return Err("'before' and 'first' cannot be specified simultaneously".into());
        }
        let last = last.unwrap_or(DEFAULT_PAGE_SIZE);
        let cursor = decode_cursor(&before)?;
        let end = rows.partition_point(|&row| row < cursor);
        let start = end.saturating_sub(last);
        (start, end, start > 0, false)
    } else if let Some(after) = after {
        if last.is_some() {
            return Err("'after' and 'last' cannot be specified simultaneously".into());
        }
        let first = first.unwrap_or(DEFAULT_PAGE_SIZE);
        let cursor = decode_cursor(&after)?;
        let start = rows.partition_point(|&row| row <= cursor);
        let end = start.saturating_add(first).min(len);
        (start, end, false, end < len)
    } else if let Some(last) = last {
        if first.is_some() {
            return Err("first and last cannot be used together".into());
        }
        let start = len.saturating_sub(last);
        (start, len, start > 0, false)
    } else {
        let end = first.unwrap_or(DEFAULT_PAGE_SIZE).min(len);
        (0, end, false, end < len)
    };

    let mut connection = Connection::with_additional_fields(
        has_previous,
        has_next,
        TotalCountField { total_count: len },
    );
    connection.edges.extend(
        rows[start..end]
            .iter()
            .map(|&row| Edge::new(encode_cursor(row), node(row))),
    );
    Ok(connection)
}

#[cfg(test)]
struct TestSchema {
    _dir: tempfile::TempDir, // to keep the CSV file alive while the test is running
    schema: Schema,
}

#[cfg(test)]
impl TestSchema {
    fn new(csv: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jobs.csv");
        std::fs::write(&path, csv).unwrap();
        let settings = crate::settings::Settings::load(None).unwrap();
        let dashboard = Dashboard::load(&path, &settings.defaults).unwrap();
        Self {
            _dir: dir,
            schema: schema(dashboard),
        }
    }

    async fn execute(&self, query: &str) -> async_graphql::Response {
        let request: async_graphql::Request = query.into();
        self.schema.execute(request).await
    }
}

#[cfg(test)]
const TEST_JOBS: &str = "job_title,company_name,country,experience_level,remote_ratio,required_skills\n\
    Data Scientist,Acme,Germany,MI,100,Python\n\
    ML Engineer,Globex,France,SE,0,Rust\n\
    Data Scientist,Initech,France,MI,50,SQL\n\
    AI Research Scientist,Acme,Germany,EX,100,PyTorch\n\
    ML Engineer,Umbrella,Germany,MI,50,Go\n\
    Data Analyst,Globex,Spain,EN,0,Excel\n";

use async_graphql::{Context, Object, Result, SimpleObject};

use crate::{
    dashboard::Dashboard,
    filter::{FilterSelection, FilterSelectionInput, FilteredRows},
    views::Ranking,
};

#[derive(SimpleObject)]
struct JobTitleCount {
    job_title: String,
    count: usize,
}

#[derive(SimpleObject)]
struct TopJobTitles {
    /// At most 20 titles, most listings first. Ties keep file order.
    rankings: Vec<JobTitleCount>,

    /// The highest ranked title.
    top_title: String,

    /// The number of listings of `top_title`.
    top_count: usize,

    /// The mean number of listings across `rankings`.
    average_per_title: f64,

    /// `average_per_title` rounded to a whole number.
    average_per_title_display: String,
}

impl TopJobTitles {
    fn from_ranking(ranking: &Ranking) -> Option<Self> {
        let (top_title, top_count) = ranking.top()?.clone();
        let average = ranking.average();
        Some(Self {
            rankings: ranking
                .entries()
                .iter()
                .map(|(job_title, count)| JobTitleCount {
                    job_title: job_title.clone(),
                    count: *count,
                })
                .collect(),
            top_title,
            top_count,
            average_per_title: average,
            average_per_title_display: format!("{average:.0}"),
        })
    }
}

#[derive(Default)]
pub(super) struct TopJobTitleQuery;

#[Object]
impl TopJobTitleQuery {
    /// The most common job titles among filtered postings, or null when no
    /// job-title data is available.
    #[allow(clippy::unused_async)]
    async fn top_job_titles(
        &self,
        ctx: &Context<'_>,
        #[graphql(default)] selection: FilterSelectionInput,
    ) -> Result<Option<TopJobTitles>> {
        let dataset = ctx.data::<Dashboard>()?.dataset();
        let selection = FilterSelection::from(selection);
        let rows = FilteredRows::apply(dataset, &selection);
        Ok(Ranking::top_titles(&rows)
            .as_ref()
            .and_then(TopJobTitles::from_ranking))
    }
}

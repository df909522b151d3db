use async_graphql::{Context, Object, Result};

use crate::{
    dashboard::Dashboard,
    options::FilterOptions,
    session::{SessionInput, SessionState},
};

#[derive(Default)]
pub(super) struct FilterOptionsQuery;

#[Object]
impl FilterOptionsQuery {
    /// Selectable values for each filter, sorted.
    #[allow(clippy::unused_async)]
    async fn filter_options(&self, ctx: &Context<'_>) -> Result<FilterOptions> {
        Ok(ctx.data::<Dashboard>()?.options().clone())
    }

    /// The state a new session starts with.
    #[allow(clippy::unused_async)]
    async fn initial_session(&self, ctx: &Context<'_>) -> Result<SessionState> {
        Ok(SessionState::fresh(ctx.data::<Dashboard>()?.defaults()))
    }

    /// Clears the given session's selections, restoring the defaults under a
    /// new reset epoch.
    #[allow(clippy::unused_async)]
    async fn reset_session(
        &self,
        ctx: &Context<'_>,
        session: SessionInput,
    ) -> Result<SessionState> {
        let defaults = ctx.data::<Dashboard>()?.defaults();
        Ok(SessionState::from(session).reset(defaults))
    }
}

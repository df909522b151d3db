use async_graphql::{InputObject, SimpleObject};
use serde::{Deserialize, Serialize};

use crate::filter::{FilterSelection, FilterSelectionInput};

/// Per-session filter state. The server keeps none of it; clients send it
/// with each request and receive the next state back.
#[derive(SimpleObject, Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SessionState {
    /// Incremented on every reset. Clients key their selection widgets on
    /// it so that a reset discards whatever the widgets held.
    pub(crate) reset_epoch: u64,
    pub(crate) selection: FilterSelection,
}

#[derive(InputObject, Debug, Default)]
pub(crate) struct SessionInput {
    #[graphql(default)]
    reset_epoch: u64,
    #[graphql(default)]
    selection: FilterSelectionInput,
}

impl From<SessionInput> for SessionState {
    fn from(input: SessionInput) -> Self {
        Self {
            reset_epoch: input.reset_epoch,
            selection: input.selection.into(),
        }
    }
}

impl SessionState {
    pub(crate) fn fresh(defaults: &FilterSelection) -> Self {
        Self {
            reset_epoch: 0,
            selection: defaults.clone(),
        }
    }

    /// Starts a new epoch with every selection replaced by the defaults.
    #[must_use]
    pub(crate) fn reset(self, defaults: &FilterSelection) -> Self {
        Self {
            reset_epoch: self.reset_epoch.saturating_add(1),
            selection: defaults.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> FilterSelection {
        FilterSelection {
            job_titles: vec!["Data Scientist".to_string()],
            remote_ratios: vec![50],
            ..Default::default()
        }
    }

    #[test]
    fn fresh_session_starts_at_epoch_zero() {
        let session = SessionState::fresh(&defaults());
        assert_eq!(session.reset_epoch, 0);
        assert_eq!(session.selection, defaults());
    }

    #[test]
    fn reset_restores_fresh_defaults() {
        let mut session = SessionState::fresh(&defaults());
        session.selection.locations = vec!["France".to_string()];
        session.selection.job_titles.clear();

        let session = session.reset(&defaults());
        assert_eq!(session.reset_epoch, 1);
        assert_eq!(session.selection, SessionState::fresh(&defaults()).selection);

        let session = session.reset(&defaults());
        assert_eq!(session.reset_epoch, 2);
    }

    #[test]
    fn round_trips_through_json() {
        let session = SessionState::fresh(&defaults()).reset(&defaults());
        let json = serde_json::to_string(&session).unwrap();
        let back: SessionState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);

        let sparse: SessionState =
            serde_json::from_str(r#"{"reset_epoch": 3, "selection": {"locations": ["Germany"]}}"#)
                .unwrap();
        assert_eq!(sparse.reset_epoch, 3);
        assert_eq!(sparse.selection.locations, ["Germany"]);
        assert!(sparse.selection.job_titles.is_empty());
    }
}

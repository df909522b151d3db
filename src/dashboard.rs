use std::path::Path;

use anyhow::Result;

use crate::{
    dataset::Dataset, filter::FilterSelection, options::FilterOptions,
    settings::DefaultPreferences,
};

/// Process-wide read-only state: the loaded postings, the options derived
/// from them and the selection every fresh session starts with.
#[derive(Debug)]
pub(crate) struct Dashboard {
    dataset: Dataset,
    options: FilterOptions,
    defaults: FilterSelection,
}

impl Dashboard {
    pub(crate) fn load(path: &Path, preferences: &DefaultPreferences) -> Result<Self> {
        Ok(Self::new(Dataset::load(path)?, preferences))
    }

    pub(crate) fn new(dataset: Dataset, preferences: &DefaultPreferences) -> Self {
        let options = FilterOptions::enumerate(&dataset);
        let defaults = options.defaults(preferences);
        Self {
            dataset,
            options,
            defaults,
        }
    }

    pub(crate) fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub(crate) fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub(crate) fn defaults(&self) -> &FilterSelection {
        &self.defaults
    }
}

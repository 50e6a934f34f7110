use crate::api::{ApiError, OperationsApi, SearchDefinition};
use crate::domain::listing::{format_clothes, Listing};
use chrono_tz::Tz;
use std::iter;
use thiserror::Error;
use tracing::{error, info, warn};

/// Listings of one search run, newest first, with the name of the search
/// definition that produced each of them at the same position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub listings: Vec<Listing>,
    pub produced_by: Vec<String>,
}

impl SearchResults {
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Listing, &str)> {
        self.listings
            .iter()
            .zip(self.produced_by.iter().map(String::as_str))
    }

    /// Newest first. Ties keep their merge order, and `produced_by` follows
    /// the same permutation.
    fn sort_by_date_desc(&mut self) {
        let mut order: Vec<usize> = (0..self.listings.len()).collect();
        order.sort_by(|&a, &b| {
            self.listings[b]
                .created_at
                .cmp(&self.listings[a].created_at)
        });

        let mut listings: Vec<Option<Listing>> = self.listings.drain(..).map(Some).collect();
        let mut produced_by: Vec<Option<String>> = self.produced_by.drain(..).map(Some).collect();

        for i in order {
            if let (Some(listing), Some(source)) = (listings[i].take(), produced_by[i].take()) {
                self.listings.push(listing);
                self.produced_by.push(source);
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum SearchFailure {
    #[error("no search selected")]
    EmptySelection,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SearchFailure {
    pub fn user_message(&self) -> String {
        match self {
            SearchFailure::EmptySelection => {
                "Veuillez sélectionner au moins une recherche.".to_string()
            }
            SearchFailure::Api(ApiError::Connection(_)) => "Oops! L'API semble down.".to_string(),
            SearchFailure::Api(ApiError::Status { message, .. }) => {
                format!("Oops ! Il y a eu un souci avec l'acquisition des vêtements : {message}")
            }
            SearchFailure::Api(ApiError::Payload(_)) => {
                "Oops ! L'API a renvoyé des vêtements illisibles.".to_string()
            }
        }
    }
}

/// Runs every selected search definition against the listings endpoint,
/// one request each, and merges the pages.
///
/// Selected names are resolved against `definitions`; unknown names are
/// skipped. Any API failure aborts the whole run.
pub fn get_clothes(
    api: &dyn OperationsApi,
    definitions: &[SearchDefinition],
    selected: &[String],
    tz: Tz,
) -> Result<SearchResults, SearchFailure> {
    if selected.is_empty() {
        info!("No search selected");
        return Err(SearchFailure::EmptySelection);
    }

    info!(searches = ?selected, "Acquiring clothes");
    let mut results = SearchResults::default();

    for name in selected {
        let Some(definition) = definitions.iter().find(|d| &d.name == name) else {
            warn!(search = %name, "selected search is not an active definition, skipping");
            continue;
        };

        let records = api.get_clothes(definition).map_err(|e| {
            error!(search = %name, "could not acquire clothes: {e}");
            e
        })?;

        let added = format_clothes(&mut results.listings, records, tz);
        results
            .produced_by
            .extend(iter::repeat(definition.name.clone()).take(added));
    }

    results.sort_by_date_desc();
    info!("Successfully retrieved {} clothes", results.len());

    Ok(results)
}

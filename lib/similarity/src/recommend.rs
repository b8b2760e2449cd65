//! Recommendation entry points
//!
//! Two independent flows over the same catalog snapshot:
//! - similarity: location view, votes > 0, cosine ranking, page, dedup, votes sort
//! - filter: location, votes > 0, cost ceiling and optional substrings, catalog order

use crate::page::{dedup_and_sort, paginate, Page, DEFAULT_PAGE_SIZE};
use crate::rank::Ranker;
use crate::snapshot::CatalogSnapshot;
use platewise_core::{
    CategoricalAttribute, ContinuousField, Error, FilterCondition, QueryProfile, RecordFilter,
    RestaurantRecord, Result,
};
use platewise_schema::FeatureEncoder;
use std::sync::Arc;
use tracing::debug;

/// Serves both recommendation flows against a catalog snapshot
#[derive(Debug, Clone)]
pub struct Recommender {
    encoder: Arc<FeatureEncoder>,
    ranker: Ranker,
    page_size: usize,
}

impl Recommender {
    pub fn new(encoder: Arc<FeatureEncoder>) -> Self {
        Self {
            encoder,
            ranker: Ranker::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the page size; values below 1 are raised to 1
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    #[inline]
    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Similarity flow.
    ///
    /// # Errors
    /// - `NotFound` when no row at the location has votes
    /// - `SchemaMismatch` when catalog rows and the query vector disagree on width
    ///
    /// A page past the end of the ranking is an empty page, not an error.
    pub fn recommend_by_similarity<'s>(
        &self,
        snapshot: &'s CatalogSnapshot,
        profile: &QueryProfile,
    ) -> Result<Page<'s>> {
        let catalog = snapshot.catalog();
        let view = catalog.build_view(&profile.location).restrict_popularity();
        if view.is_empty() {
            debug!(location = %profile.location, "similarity view is empty");
            return Err(Error::NotFound);
        }

        let query = self.encoder.encode_query(profile);
        let candidates = snapshot.aligned_features(&view, query.dim())?;
        let ranked = self.ranker.rank(&query, &candidates)?;

        let number = profile.page_number();
        let selected: Vec<&'s RestaurantRecord> = paginate(&ranked, number, self.page_size)
            .iter()
            .filter_map(|r| catalog.get(r.row))
            .collect();

        debug!(
            location = %profile.location,
            candidates = ranked.len(),
            page = number,
            selected = selected.len(),
            "ranked similarity view"
        );

        Ok(Page {
            number,
            page_size: self.page_size,
            total_candidates: ranked.len(),
            items: dedup_and_sort(&selected),
        })
    }

    /// Hard-filter flow.
    ///
    /// # Errors
    /// `NotFound` when nothing passes the filters
    pub fn recommend_by_filter<'s>(
        &self,
        snapshot: &'s CatalogSnapshot,
        profile: &QueryProfile,
    ) -> Result<Vec<&'s RestaurantRecord>> {
        let filter = RecordFilter::new(filter_condition(profile));
        let matches: Vec<&'s RestaurantRecord> = snapshot
            .catalog()
            .build_view(&profile.location)
            .restrict_popularity()
            .filter(&filter)
            .records()
            .collect();

        debug!(location = %profile.location, matches = matches.len(), "filtered catalog");

        if matches.is_empty() {
            return Err(Error::NotFound);
        }
        Ok(matches)
    }
}

/// Predicates applied by the filter flow on top of the location view
pub fn filter_condition(profile: &QueryProfile) -> FilterCondition {
    let mut conditions = vec![
        FilterCondition::GreaterThan {
            field: ContinuousField::Votes,
            value: 0.0,
        },
        FilterCondition::LessEqual {
            field: ContinuousField::Cost,
            value: profile.cost,
        },
    ];

    if let Some(cuisine) = profile.cuisine_filter() {
        conditions.push(FilterCondition::Contains {
            field: CategoricalAttribute::Cuisines,
            value: cuisine.to_string(),
        });
    }
    if let Some(dine_type) = profile.dine_type_filter() {
        conditions.push(FilterCondition::Contains {
            field: CategoricalAttribute::ListedInType,
            value: dine_type.to_string(),
        });
    }

    FilterCondition::And(conditions)
}

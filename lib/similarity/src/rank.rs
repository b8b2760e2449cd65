//! Cosine-similarity ranker
//!
//! Scores every candidate row against one query vector and produces a full
//! ordering. Pagination happens downstream.

use ordered_float::OrderedFloat;
use platewise_core::{Error, FeatureVector, Result};
use rayon::prelude::*;

/// Views at least this large are scored on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

/// A candidate row with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Catalog row index
    pub row: usize,
    /// Cosine similarity in [-1, 1]
    pub score: f32,
}

/// Orders candidate rows by descending cosine similarity
#[derive(Debug, Clone)]
pub struct Ranker {
    parallel_threshold: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Rank `candidates` against `query`.
    ///
    /// # Returns
    /// Every candidate, highest similarity first. Equal scores keep their
    /// candidate order. An empty candidate list yields an empty ordering.
    ///
    /// # Errors
    /// `SchemaMismatch` when any candidate's width differs from the query's.
    pub fn rank(
        &self,
        query: &FeatureVector,
        candidates: &[(usize, &FeatureVector)],
    ) -> Result<Vec<Ranked>> {
        if let Some((_, row)) = candidates.iter().find(|(_, row)| row.dim() != query.dim()) {
            return Err(Error::SchemaMismatch {
                expected: query.dim(),
                actual: row.dim(),
            });
        }

        let score = |&(row, features): &(usize, &FeatureVector)| Ranked {
            row,
            score: query.cosine_similarity(features),
        };

        let mut ranked: Vec<Ranked> = if candidates.len() >= self.parallel_threshold {
            candidates.par_iter().map(score).collect()
        } else {
            candidates.iter().map(score).collect()
        };

        // Stable: ties keep candidate order
        ranked.sort_by_key(|r| std::cmp::Reverse(OrderedFloat(r.score)));

        Ok(ranked)
    }
}

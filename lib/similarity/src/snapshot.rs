//! Catalog snapshot
//!
//! Pairs the catalog with one feature row per record, encoded once when the
//! catalog is loaded. A snapshot is immutable; reloading builds a new one.

use platewise_core::{Catalog, CatalogView, Error, FeatureVector, Result};
use platewise_schema::FeatureEncoder;
use rayon::prelude::*;

#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    catalog: Catalog,
    features: Vec<FeatureVector>,
}

impl CatalogSnapshot {
    /// Encode every record with `encoder`
    pub fn encode(catalog: Catalog, encoder: &FeatureEncoder) -> Self {
        let features = catalog
            .records()
            .par_iter()
            .map(|record| encoder.encode_record(record))
            .collect();

        Self { catalog, features }
    }

    /// Assemble from pre-computed feature rows, one per record
    pub fn from_parts(catalog: Catalog, features: Vec<FeatureVector>) -> Result<Self> {
        if catalog.len() != features.len() {
            return Err(Error::InvalidConfig(format!(
                "catalog has {} records but {} feature rows",
                catalog.len(),
                features.len()
            )));
        }
        Ok(Self { catalog, features })
    }

    #[inline]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[inline]
    pub fn features(&self) -> &[FeatureVector] {
        &self.features
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Feature rows for `view`, in view order, checked against the schema width.
    ///
    /// Rows that do not have exactly `dim` columns cannot be compared with a
    /// query vector and fail with `SchemaMismatch`.
    pub fn aligned_features<'s>(
        &'s self,
        view: &CatalogView<'_>,
        dim: usize,
    ) -> Result<Vec<(usize, &'s FeatureVector)>> {
        view.rows()
            .iter()
            .map(|&row| {
                let features = self.features.get(row).ok_or(Error::SchemaMismatch {
                    expected: dim,
                    actual: 0,
                })?;
                if features.dim() != dim {
                    return Err(Error::SchemaMismatch {
                        expected: dim,
                        actual: features.dim(),
                    });
                }
                Ok((row, features))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platewise_core::{CategoricalAttribute, RestaurantRecord};
    use platewise_schema::EncoderBuilder;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            RestaurantRecord::new("A", "BTM", 300.0, 10),
            RestaurantRecord::new("B", "HSR", 400.0, 5),
            RestaurantRecord::new("C", "BTM", 500.0, 1),
        ])
    }

    #[test]
    fn test_encode_produces_one_row_per_record() {
        let encoder = EncoderBuilder::new()
            .categories(CategoricalAttribute::Location, ["BTM", "HSR"])
            .build()
            .unwrap();
        let snapshot = CatalogSnapshot::encode(catalog(), &encoder);

        assert_eq!(snapshot.features().len(), 3);
        assert_eq!(snapshot.features()[1].as_slice(), &[0.0, 1.0, 400.0]);
        assert!(snapshot.features().iter().all(|f| f.dim() == encoder.dim()));
    }

    #[test]
    fn test_aligned_features_follow_view_order() {
        let encoder = EncoderBuilder::new()
            .categories(CategoricalAttribute::Location, ["BTM", "HSR"])
            .build()
            .unwrap();
        let snapshot = CatalogSnapshot::encode(catalog(), &encoder);
        let view = snapshot.catalog().build_view("BTM");

        let rows = snapshot.aligned_features(&view, encoder.dim()).unwrap();
        let indices: Vec<usize> = rows.iter().map(|(row, _)| *row).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_misaligned_rows_are_schema_mismatch() {
        let features = vec![
            FeatureVector::zeros(3),
            FeatureVector::zeros(3),
            FeatureVector::zeros(2),
        ];
        let snapshot = CatalogSnapshot::from_parts(catalog(), features).unwrap();
        let view = snapshot.catalog().build_view("BTM");

        let err = snapshot.aligned_features(&view, 3).unwrap_err();
        assert!(matches!(err, Error::SchemaMismatch { expected: 3, actual: 2 }));
    }

    #[test]
    fn test_from_parts_checks_lengths() {
        let err = CatalogSnapshot::from_parts(catalog(), vec![FeatureVector::zeros(1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}

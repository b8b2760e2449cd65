use crate::catalog_csv::load_catalog;
use crate::vocabulary::load_encoder;
use parking_lot::RwLock;
use platewise_core::{Catalog, Result};
use platewise_schema::FeatureEncoder;
use platewise_similarity::CatalogSnapshot;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Where the catalog and vocabulary live on disk
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub catalog_path: PathBuf,
    pub vocabulary_path: PathBuf,
}

/// Holds the encoder and the current catalog snapshot.
///
/// Readers clone the snapshot `Arc` and never block on a reload; a reload
/// builds the next snapshot without holding the lock and swaps it in.
pub struct CatalogStore {
    catalog_path: PathBuf,
    encoder: Arc<FeatureEncoder>,
    snapshot: RwLock<Arc<CatalogSnapshot>>,
}

impl CatalogStore {
    /// Load the vocabulary, then the catalog, and encode the catalog
    pub fn open(config: &StoreConfig) -> Result<Self> {
        let encoder = Arc::new(load_encoder(&config.vocabulary_path)?);
        let catalog = load_catalog(&config.catalog_path)?;
        Ok(Self::with_catalog(encoder, catalog, &config.catalog_path))
    }

    /// Build a store around an in-memory catalog. `catalog_path` is used by [`reload`].
    ///
    /// [`reload`]: CatalogStore::reload
    pub fn with_catalog<P: AsRef<Path>>(
        encoder: Arc<FeatureEncoder>,
        catalog: Catalog,
        catalog_path: P,
    ) -> Self {
        let snapshot = Arc::new(encode_snapshot(catalog, &encoder));
        Self {
            catalog_path: catalog_path.as_ref().to_path_buf(),
            encoder,
            snapshot: RwLock::new(snapshot),
        }
    }

    #[inline]
    pub fn encoder(&self) -> Arc<FeatureEncoder> {
        self.encoder.clone()
    }

    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        self.snapshot.read().clone()
    }

    #[inline]
    #[must_use]
    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Re-read the catalog file. On failure the current snapshot stays in place.
    pub fn reload(&self) -> Result<usize> {
        let catalog = load_catalog(&self.catalog_path)?;
        Ok(self.replace(catalog))
    }

    /// Swap in a new catalog, returning its record count
    pub fn replace(&self, catalog: Catalog) -> usize {
        let next = Arc::new(encode_snapshot(catalog, &self.encoder));
        let records = next.len();
        *self.snapshot.write() = next;
        records
    }
}

fn encode_snapshot(catalog: Catalog, encoder: &FeatureEncoder) -> CatalogSnapshot {
    let started = Instant::now();
    let snapshot = CatalogSnapshot::encode(catalog, encoder);
    info!(
        "Encoded {} restaurants into {} feature columns in {:?}",
        snapshot.len(),
        encoder.dim(),
        started.elapsed()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use platewise_core::{CategoricalAttribute, Error, RestaurantRecord};
    use platewise_schema::EncoderBuilder;
    use std::io::Write;

    const HEADER: &str = "name,location,rest_type,cuisines,listed_in(type),cost,rate,votes";

    fn encoder() -> Arc<FeatureEncoder> {
        Arc::new(
            EncoderBuilder::new()
                .categories(CategoricalAttribute::Location, ["BTM"])
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_open_loads_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.csv");
        let vocabulary_path = dir.path().join("vocabulary.json");

        std::fs::write(
            &catalog_path,
            format!("{}\nA,BTM,Cafe,Cafe,Delivery,300,4.0,3\n", HEADER),
        )
        .unwrap();
        std::fs::write(
            &vocabulary_path,
            r#"{"attributes": [
                {"name": "location", "categories": ["BTM"]},
                {"name": "rest_type", "categories": ["Cafe"]},
                {"name": "cuisines", "categories": []},
                {"name": "listed_in_type", "categories": []}
            ]}"#,
        )
        .unwrap();

        let store = CatalogStore::open(&StoreConfig {
            catalog_path,
            vocabulary_path,
        })
        .unwrap();

        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.features()[0].as_slice(), &[1.0, 1.0, 300.0]);
    }

    #[test]
    fn test_reload_swaps_snapshot() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        writeln!(file, "A,BTM,Cafe,Cafe,Delivery,300,4.0,3").unwrap();
        file.flush().unwrap();

        let store = CatalogStore::with_catalog(encoder(), Catalog::default(), file.path());
        assert_eq!(store.catalog_path(), file.path());
        let before = store.snapshot();
        assert!(before.is_empty());

        assert_eq!(store.reload().unwrap(), 1);
        // readers holding the old snapshot are unaffected
        assert!(before.is_empty());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_failed_reload_keeps_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new(vec![RestaurantRecord::new("A", "BTM", 100.0, 1)]);
        let store = CatalogStore::with_catalog(encoder(), catalog, dir.path().join("missing.csv"));

        let err = store.reload().unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[test]
    fn test_replace_returns_record_count() {
        let store = CatalogStore::with_catalog(encoder(), Catalog::default(), "unused.csv");
        let count = store.replace(Catalog::new(vec![
            RestaurantRecord::new("A", "BTM", 100.0, 1),
            RestaurantRecord::new("B", "BTM", 200.0, 2),
        ]));
        assert_eq!(count, 2);
        assert_eq!(store.snapshot().features()[1].as_slice(), &[1.0, 200.0]);
    }
}

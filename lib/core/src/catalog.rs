use crate::{Filter, RestaurantRecord};

/// The full, read-only restaurant catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<RestaurantRecord>,
}

impl Catalog {
    pub fn new(records: Vec<RestaurantRecord>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[RestaurantRecord] {
        &self.records
    }

    #[inline]
    pub fn get(&self, row: usize) -> Option<&RestaurantRecord> {
        self.records.get(row)
    }

    /// View over every row, in catalog order
    pub fn full_view(&self) -> CatalogView<'_> {
        CatalogView {
            catalog: self,
            rows: (0..self.records.len()).collect(),
        }
    }

    /// Rows whose location equals `location` exactly (case-sensitive).
    /// An empty location matches nothing.
    pub fn build_view(&self, location: &str) -> CatalogView<'_> {
        let rows = if location.is_empty() {
            Vec::new()
        } else {
            self.records
                .iter()
                .enumerate()
                .filter(|(_, record)| record.location == location)
                .map(|(row, _)| row)
                .collect()
        };

        CatalogView { catalog: self, rows }
    }
}

impl From<Vec<RestaurantRecord>> for Catalog {
    fn from(records: Vec<RestaurantRecord>) -> Self {
        Self::new(records)
    }
}

/// An ordered selection of catalog rows. Never copies or mutates records.
#[derive(Debug, Clone)]
pub struct CatalogView<'a> {
    catalog: &'a Catalog,
    rows: Vec<usize>,
}

impl<'a> CatalogView<'a> {
    /// Keep only rows with a positive popularity count
    pub fn restrict_popularity(&self) -> CatalogView<'a> {
        self.retain(|record| record.is_popular())
    }

    /// Keep only rows accepted by `filter`
    pub fn filter(&self, filter: &dyn Filter) -> CatalogView<'a> {
        self.retain(|record| filter.matches(record))
    }

    fn retain(&self, mut keep: impl FnMut(&RestaurantRecord) -> bool) -> CatalogView<'a> {
        let catalog = self.catalog;
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|row| keep(&catalog.records[*row]))
            .collect();

        CatalogView { catalog, rows }
    }

    #[inline]
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Catalog row indices, in view order
    #[inline]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record at view position `position`
    #[inline]
    pub fn get(&self, position: usize) -> Option<&'a RestaurantRecord> {
        let catalog = self.catalog;
        self.rows.get(position).map(|row| &catalog.records[*row])
    }

    pub fn records(&self) -> impl Iterator<Item = &'a RestaurantRecord> + '_ {
        let catalog = self.catalog;
        self.rows.iter().map(move |row| &catalog.records[*row])
    }
}

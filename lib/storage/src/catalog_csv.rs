// CSV catalog loading
use platewise_core::{Catalog, Error, RestaurantRecord, Result};
use serde::{Deserialize, Deserializer};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Columns every catalog file must carry. `listed_in(type)` may also be spelled `listed_in_type`.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "name",
    "location",
    "rest_type",
    "cuisines",
    "listed_in(type)",
    "cost",
    "votes",
];

#[derive(Debug, Deserialize)]
struct CatalogRow {
    name: String,
    location: String,
    rest_type: String,
    cuisines: String,
    #[serde(rename = "listed_in(type)", alias = "listed_in_type")]
    listed_in_type: String,
    #[serde(deserialize_with = "finite_cost")]
    cost: f32,
    #[serde(default, deserialize_with = "lenient_rate")]
    rate: Option<f32>,
    votes: u32,
    #[serde(default, deserialize_with = "lenient_flag")]
    book_table: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    online_order: Option<bool>,
}

impl From<CatalogRow> for RestaurantRecord {
    fn from(row: CatalogRow) -> Self {
        RestaurantRecord {
            name: row.name,
            location: row.location,
            rest_type: row.rest_type,
            cuisines: row.cuisines,
            listed_in_type: row.listed_in_type,
            cost: row.cost,
            rate: row.rate,
            votes: row.votes,
            book_table: row.book_table,
            online_order: row.online_order,
        }
    }
}

/// Load a catalog CSV from disk
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let catalog = read_catalog(file)?;
    info!("Loaded {} restaurants from {:?}", catalog.len(), path);
    Ok(catalog)
}

/// Parse a catalog from any CSV source with a header row
pub fn read_catalog<R: Read>(source: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);

    let headers = reader.headers().map_err(csv_error)?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.deserialize::<CatalogRow>() {
        let row = row.map_err(csv_error)?;
        records.push(RestaurantRecord::from(row));
    }

    Ok(Catalog::new(records))
}

fn check_headers(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| {
            !headers.iter().any(|h| {
                h == *column || (*column == "listed_in(type)" && h == "listed_in_type")
            })
        })
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Csv {
            line: 1,
            message: format!(
                "missing required columns {:?}; available columns: {:?}",
                missing,
                headers.iter().collect::<Vec<_>>()
            ),
        })
    }
}

fn csv_error(e: csv::Error) -> Error {
    let line = e.position().map(|p| p.line()).unwrap_or(0);
    let message = e.to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        _ => Error::Csv { line, message },
    }
}

/// Ratings show up as "4.1", "4.1/5", "NEW" or "-"; only numbers are kept
fn lenient_rate<'de, D>(deserializer: D) -> std::result::Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let value = raw.split('/').next().unwrap_or("").trim();
    Ok(value.parse::<f32>().ok().filter(|v| v.is_finite()))
}

fn finite_cost<'de, D>(deserializer: D) -> std::result::Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let cost = f32::deserialize(deserializer)?;
    if cost.is_finite() {
        Ok(cost)
    } else {
        Err(serde::de::Error::custom(format!("cost must be a finite number, got {}", cost)))
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> std::result::Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    })
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single restaurant row from the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantRecord {
    pub name: String,
    pub location: String,
    pub rest_type: String,
    /// Free-text, comma separated list such as "North Indian, Chinese"
    pub cuisines: String,
    pub listed_in_type: String,
    pub cost: f32,
    #[serde(default)]
    pub rate: Option<f32>,
    /// Popularity count; rows with zero votes are never recommended
    pub votes: u32,
    #[serde(default)]
    pub book_table: Option<bool>,
    #[serde(default)]
    pub online_order: Option<bool>,
}

impl RestaurantRecord {
    pub fn new(
        name: impl Into<String>,
        location: impl Into<String>,
        cost: f32,
        votes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            rest_type: String::new(),
            cuisines: String::new(),
            listed_in_type: String::new(),
            cost,
            rate: None,
            votes,
            book_table: None,
            online_order: None,
        }
    }

    pub fn with_rest_type(mut self, rest_type: impl Into<String>) -> Self {
        self.rest_type = rest_type.into();
        self
    }

    pub fn with_cuisines(mut self, cuisines: impl Into<String>) -> Self {
        self.cuisines = cuisines.into();
        self
    }

    pub fn with_listed_in_type(mut self, listed_in_type: impl Into<String>) -> Self {
        self.listed_in_type = listed_in_type.into();
        self
    }

    pub fn with_rate(mut self, rate: f32) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn with_flags(mut self, book_table: Option<bool>, online_order: Option<bool>) -> Self {
        self.book_table = book_table;
        self.online_order = online_order;
        self
    }

    #[inline]
    pub fn is_popular(&self) -> bool {
        self.votes > 0
    }

    /// Value of a categorical attribute
    pub fn attribute(&self, attribute: CategoricalAttribute) -> &str {
        match attribute {
            CategoricalAttribute::Location => &self.location,
            CategoricalAttribute::RestType => &self.rest_type,
            CategoricalAttribute::Cuisines => &self.cuisines,
            CategoricalAttribute::ListedInType => &self.listed_in_type,
        }
    }

    /// Value of a continuous field; a missing rating reads as 0
    pub fn continuous(&self, field: ContinuousField) -> f32 {
        match field {
            ContinuousField::Cost => self.cost,
            ContinuousField::Rate => self.rate.unwrap_or(0.0),
            ContinuousField::Votes => self.votes as f32,
        }
    }
}

/// Categorical attributes, in the order their one-hot blocks appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalAttribute {
    Location,
    RestType,
    Cuisines,
    #[serde(alias = "listed_in(type)")]
    ListedInType,
}

impl CategoricalAttribute {
    pub const ALL: [CategoricalAttribute; 4] = [
        CategoricalAttribute::Location,
        CategoricalAttribute::RestType,
        CategoricalAttribute::Cuisines,
        CategoricalAttribute::ListedInType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalAttribute::Location => "location",
            CategoricalAttribute::RestType => "rest_type",
            CategoricalAttribute::Cuisines => "cuisines",
            CategoricalAttribute::ListedInType => "listed_in_type",
        }
    }
}

impl fmt::Display for CategoricalAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric columns appended after the one-hot blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContinuousField {
    Cost,
    Rate,
    Votes,
}

impl ContinuousField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContinuousField::Cost => "cost",
            ContinuousField::Rate => "rate",
            ContinuousField::Votes => "votes",
        }
    }
}

impl fmt::Display for ContinuousField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A user's preference profile, as submitted with a recommendation request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct QueryProfile {
    #[serde(default)]
    pub location: String,

    /// Price ceiling (inclusive) for the filter path; a continuous feature
    /// for the similarity path
    #[serde(default)]
    pub cost: f32,

    #[serde(default)]
    pub cuisines: Option<String>,

    #[serde(default, alias = "listed_in(type)")]
    pub listed_in_type: Option<String>,

    #[serde(default)]
    pub rest_type: Option<String>,

    /// Requested 1-based page; kept loose so odd values can be clamped
    #[serde(default)]
    pub page: Option<Value>,
}

impl QueryProfile {
    pub fn new(location: impl Into<String>, cost: f32) -> Self {
        Self {
            location: location.into(),
            cost,
            ..Default::default()
        }
    }

    pub fn with_cuisines(mut self, cuisines: impl Into<String>) -> Self {
        self.cuisines = Some(cuisines.into());
        self
    }

    pub fn with_listed_in_type(mut self, listed_in_type: impl Into<String>) -> Self {
        self.listed_in_type = Some(listed_in_type.into());
        self
    }

    pub fn with_rest_type(mut self, rest_type: impl Into<String>) -> Self {
        self.rest_type = Some(rest_type.into());
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(Value::from(page));
        self
    }

    /// Requested page, clamped to 1 when absent, non-positive or not an integer
    pub fn page_number(&self) -> usize {
        match self.page.as_ref() {
            Some(Value::Number(n)) => match n.as_u64() {
                Some(page) if page >= 1 => usize::try_from(page).unwrap_or(usize::MAX),
                _ => 1,
            },
            _ => 1,
        }
    }

    /// Cuisine substring, if one was given and is not blank
    pub fn cuisine_filter(&self) -> Option<&str> {
        non_empty(self.cuisines.as_deref())
    }

    /// Dining-type substring, if one was given and is not blank
    pub fn dine_type_filter(&self) -> Option<&str> {
        non_empty(self.listed_in_type.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

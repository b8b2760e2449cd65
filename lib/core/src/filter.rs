// Record predicates for the hard-filter path
use crate::record::{CategoricalAttribute, ContinuousField, RestaurantRecord};

pub trait Filter {
    fn matches(&self, record: &RestaurantRecord) -> bool;
}

pub struct RecordFilter {
    condition: FilterCondition,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// Exact, case-sensitive equality
    Equals { field: CategoricalAttribute, value: String },
    /// Case-insensitive substring containment
    Contains { field: CategoricalAttribute, value: String },
    GreaterThan { field: ContinuousField, value: f32 },
    LessEqual { field: ContinuousField, value: f32 },
    And(Vec<FilterCondition>),
    Or(Vec<FilterCondition>),
    Not(Box<FilterCondition>),
}

impl RecordFilter {
    pub fn new(condition: FilterCondition) -> Self {
        Self { condition }
    }

    pub fn condition(&self) -> &FilterCondition {
        &self.condition
    }

    fn matches_condition(condition: &FilterCondition, record: &RestaurantRecord) -> bool {
        match condition {
            FilterCondition::Equals { field, value } => record.attribute(*field) == value,
            FilterCondition::Contains { field, value } => {
                contains_ignore_case(record.attribute(*field), value)
            }
            FilterCondition::GreaterThan { field, value } => record.continuous(*field) > *value,
            FilterCondition::LessEqual { field, value } => record.continuous(*field) <= *value,
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
            FilterCondition::Or(conditions) => {
                conditions.iter().any(|c| Self::matches_condition(c, record))
            }
            FilterCondition::Not(condition) => !Self::matches_condition(condition, record),
        }
    }
}

impl Filter for RecordFilter {
    fn matches(&self, record: &RestaurantRecord) -> bool {
        Self::matches_condition(&self.condition, record)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

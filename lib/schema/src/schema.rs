//! Feature schema definitions
//!
//! The schema is the ordered list of columns every [`FeatureVector`] follows:
//! one one-hot column per vocabulary slot, attribute by attribute, then the
//! continuous columns. Query vectors and catalog vectors are only comparable
//! because both are laid out by the same schema.
//!
//! [`FeatureVector`]: platewise_core::FeatureVector

use crate::vocabulary::CategoryVocabulary;
use platewise_core::{CategoricalAttribute, ContinuousField};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A numeric column appended after the one-hot blocks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ContinuousColumn {
    pub field: ContinuousField,
    /// Raw values are divided by this before they enter the vector
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

impl ContinuousColumn {
    pub fn new(field: ContinuousField) -> Self {
        Self { field, scale: 1.0 }
    }

    pub fn scaled(field: ContinuousField, scale: f32) -> Self {
        Self { field, scale }
    }
}

/// One column of the feature space
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    OneHot {
        attribute: CategoricalAttribute,
        category: String,
    },
    Continuous(ContinuousColumn),
}

impl Column {
    /// Column name in `<attribute>_<category>` form for one-hot columns
    pub fn name(&self) -> String {
        match self {
            Column::OneHot { attribute, category } => format!("{}_{}", attribute, category),
            Column::Continuous(column) => column.field.to_string(),
        }
    }
}

/// Ordered, typed column layout shared by every vector at serving time
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSchema {
    columns: Vec<Column>,
    blocks: Vec<(CategoricalAttribute, Range<usize>)>,
    continuous: Vec<ContinuousColumn>,
}

impl FeatureSchema {
    /// Lay out the columns for `vocabulary` followed by `continuous`
    pub fn new(
        vocabulary: &CategoryVocabulary,
        continuous: Vec<ContinuousColumn>,
    ) -> Result<Self, SchemaError> {
        validate_continuous(&continuous)?;

        let mut columns = Vec::with_capacity(vocabulary.total_slots() + continuous.len());
        let mut blocks = Vec::with_capacity(CategoricalAttribute::ALL.len());

        for attribute in CategoricalAttribute::ALL {
            let block = vocabulary.get(attribute);
            let start = columns.len();
            columns.extend(block.categories().iter().map(|category| Column::OneHot {
                attribute,
                category: category.clone(),
            }));
            blocks.push((attribute, start..columns.len()));
        }

        columns.extend(continuous.iter().copied().map(Column::Continuous));

        Ok(Self {
            columns,
            blocks,
            continuous,
        })
    }

    /// Total number of columns
    #[inline]
    pub fn dim(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Column range holding the one-hot block of `attribute`
    pub fn block(&self, attribute: CategoricalAttribute) -> Range<usize> {
        self.blocks
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, range)| range.clone())
            .unwrap_or(0..0)
    }

    /// Offset of the first continuous column
    #[inline]
    pub fn continuous_offset(&self) -> usize {
        self.columns.len() - self.continuous.len()
    }

    #[inline]
    pub fn continuous_columns(&self) -> &[ContinuousColumn] {
        &self.continuous
    }
}

fn validate_continuous(continuous: &[ContinuousColumn]) -> Result<(), SchemaError> {
    for (i, column) in continuous.iter().enumerate() {
        if !column.scale.is_finite() || column.scale <= 0.0 {
            return Err(SchemaError::InvalidScale {
                column: column.field.to_string(),
                scale: column.scale,
            });
        }
        if continuous[..i].iter().any(|c| c.field == column.field) {
            return Err(SchemaError::DuplicateColumn(column.field.to_string()));
        }
    }

    if !continuous.iter().any(|c| c.field == ContinuousField::Cost) {
        return Err(SchemaError::MissingCost);
    }

    Ok(())
}

/// Errors raised while validating a vocabulary artifact or feature schema
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum SchemaError {
    #[error("Unsupported vocabulary version {0}")]
    UnsupportedVersion(u32),

    #[error("Unknown categorical attribute '{0}'")]
    UnknownAttribute(String),

    #[error("Categorical attribute '{0}' is missing from the vocabulary")]
    MissingAttribute(CategoricalAttribute),

    #[error("Categorical attribute '{0}' appears more than once")]
    DuplicateAttribute(CategoricalAttribute),

    #[error("Category '{category}' appears more than once in '{attribute}'")]
    DuplicateCategory {
        attribute: CategoricalAttribute,
        category: String,
    },

    #[error("Unsupported continuous column '{0}'")]
    UnsupportedColumn(String),

    #[error("Continuous column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Continuous column 'cost' is required")]
    MissingCost,

    #[error("Continuous column '{column}' has invalid scale {scale}")]
    InvalidScale { column: String, scale: f32 },
}

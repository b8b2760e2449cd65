//! Category vocabulary
//!
//! Holds, for every categorical attribute, the distinct values observed when
//! the encoder was fit. Each value owns a stable slot in its attribute's
//! one-hot block. The vocabulary never changes while serving.

use crate::schema::{ContinuousColumn, SchemaError};
use ahash::AHashMap;
use platewise_core::{CategoricalAttribute, ContinuousField};
use serde::{Deserialize, Serialize};

/// Fitted categories of a single attribute
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeVocabulary {
    attribute: CategoricalAttribute,
    categories: Vec<String>,
    slots: AHashMap<String, usize>,
}

impl AttributeVocabulary {
    pub fn new(
        attribute: CategoricalAttribute,
        categories: Vec<String>,
    ) -> Result<Self, SchemaError> {
        let mut slots = AHashMap::with_capacity(categories.len());
        for (slot, category) in categories.iter().enumerate() {
            if slots.insert(category.clone(), slot).is_some() {
                return Err(SchemaError::DuplicateCategory {
                    attribute,
                    category: category.clone(),
                });
            }
        }

        Ok(Self {
            attribute,
            categories,
            slots,
        })
    }

    #[inline]
    pub fn attribute(&self) -> CategoricalAttribute {
        self.attribute
    }

    #[inline]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Slot of `value`, or `None` when it was not seen at fit time
    #[inline]
    pub fn slot(&self, value: &str) -> Option<usize> {
        self.slots.get(value).copied()
    }
}

/// Fitted categories for all four categorical attributes, in block order
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryVocabulary {
    attributes: Vec<AttributeVocabulary>,
}

impl CategoryVocabulary {
    /// Build from per-attribute vocabularies. Every attribute must appear exactly once.
    pub fn new(mut attributes: Vec<AttributeVocabulary>) -> Result<Self, SchemaError> {
        for (i, block) in attributes.iter().enumerate() {
            if attributes[..i].iter().any(|b| b.attribute == block.attribute) {
                return Err(SchemaError::DuplicateAttribute(block.attribute));
            }
        }
        for attribute in CategoricalAttribute::ALL {
            if !attributes.iter().any(|b| b.attribute == attribute) {
                return Err(SchemaError::MissingAttribute(attribute));
            }
        }

        attributes.sort_by_key(|b| block_position(b.attribute));
        Ok(Self { attributes })
    }

    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::default()
    }

    /// Vocabulary of one attribute
    pub fn get(&self, attribute: CategoricalAttribute) -> &AttributeVocabulary {
        &self.attributes[block_position(attribute)]
    }

    pub fn attributes(&self) -> &[AttributeVocabulary] {
        &self.attributes
    }

    /// Number of one-hot columns across all attributes
    pub fn total_slots(&self) -> usize {
        self.attributes.iter().map(AttributeVocabulary::len).sum()
    }
}

fn block_position(attribute: CategoricalAttribute) -> usize {
    CategoricalAttribute::ALL
        .iter()
        .position(|a| *a == attribute)
        .unwrap_or(0)
}

/// Builder that fills in empty blocks for attributes never mentioned
#[derive(Debug, Clone, Default)]
pub struct VocabularyBuilder {
    categories: Vec<(CategoricalAttribute, Vec<String>)>,
}

impl VocabularyBuilder {
    pub fn categories<I, S>(mut self, attribute: CategoricalAttribute, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into);
        match self.categories.iter_mut().find(|(a, _)| *a == attribute) {
            Some((_, existing)) => existing.extend(values),
            None => self.categories.push((attribute, values.collect())),
        }
        self
    }

    pub fn build(mut self) -> Result<CategoryVocabulary, SchemaError> {
        for attribute in CategoricalAttribute::ALL {
            if !self.categories.iter().any(|(a, _)| *a == attribute) {
                self.categories.push((attribute, Vec::new()));
            }
        }

        let blocks = self
            .categories
            .into_iter()
            .map(|(attribute, values)| AttributeVocabulary::new(attribute, values))
            .collect::<Result<Vec<_>, _>>()?;

        CategoryVocabulary::new(blocks)
    }
}

pub const ARTIFACT_VERSION: u32 = 1;

/// On-disk form of a fitted encoder: categories plus continuous columns
///
/// ```json
/// {
///   "version": 1,
///   "attributes": [
///     {"name": "location", "categories": ["BTM", "HSR"]},
///     {"name": "rest_type", "categories": ["Cafe"]},
///     {"name": "cuisines", "categories": ["Italian, Pizza"]},
///     {"name": "listed_in_type", "categories": ["Delivery"]}
///   ],
///   "continuous": [{"name": "cost", "scale": 1.0}]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VocabularyArtifact {
    #[serde(default = "default_version")]
    pub version: u32,
    pub attributes: Vec<AttributeEntry>,
    #[serde(default = "default_continuous")]
    pub continuous: Vec<ContinuousEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeEntry {
    pub name: String,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinuousEntry {
    pub name: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_version() -> u32 {
    ARTIFACT_VERSION
}

fn default_scale() -> f32 {
    1.0
}

fn default_continuous() -> Vec<ContinuousEntry> {
    vec![ContinuousEntry {
        name: "cost".to_string(),
        scale: 1.0,
    }]
}

impl VocabularyArtifact {
    /// Validate and split into the vocabulary and continuous columns
    pub fn into_parts(self) -> Result<(CategoryVocabulary, Vec<ContinuousColumn>), SchemaError> {
        if self.version != ARTIFACT_VERSION {
            return Err(SchemaError::UnsupportedVersion(self.version));
        }

        let blocks = self
            .attributes
            .into_iter()
            .map(|entry| {
                let attribute = parse_attribute(&entry.name)?;
                AttributeVocabulary::new(attribute, entry.categories)
            })
            .collect::<Result<Vec<_>, _>>()?;
        let vocabulary = CategoryVocabulary::new(blocks)?;

        let continuous = self
            .continuous
            .into_iter()
            .map(|entry| {
                parse_continuous(&entry.name).map(|field| ContinuousColumn::scaled(field, entry.scale))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok((vocabulary, continuous))
    }
}

fn parse_attribute(name: &str) -> Result<CategoricalAttribute, SchemaError> {
    match name {
        "location" => Ok(CategoricalAttribute::Location),
        "rest_type" => Ok(CategoricalAttribute::RestType),
        "cuisines" => Ok(CategoricalAttribute::Cuisines),
        "listed_in_type" | "listed_in(type)" => Ok(CategoricalAttribute::ListedInType),
        other => Err(SchemaError::UnknownAttribute(other.to_string())),
    }
}

fn parse_continuous(name: &str) -> Result<ContinuousField, SchemaError> {
    match name {
        "cost" => Ok(ContinuousField::Cost),
        "rate" => Ok(ContinuousField::Rate),
        "votes" => Ok(ContinuousField::Votes),
        other => Err(SchemaError::UnsupportedColumn(other.to_string())),
    }
}

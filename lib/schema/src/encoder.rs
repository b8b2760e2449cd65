//! Feature encoder
//!
//! Turns categorical attributes plus a few continuous fields into a
//! [`FeatureVector`] laid out by the [`FeatureSchema`]. Values the vocabulary
//! has never seen leave their block at zero instead of failing.

use crate::schema::{ContinuousColumn, FeatureSchema, SchemaError};
use crate::vocabulary::{CategoryVocabulary, VocabularyArtifact, VocabularyBuilder};
use platewise_core::{
    CategoricalAttribute, ContinuousField, FeatureVector, QueryProfile, RestaurantRecord,
};

/// Categorical values to encode; `None` behaves like the empty string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoricalValues<'a> {
    pub location: Option<&'a str>,
    pub rest_type: Option<&'a str>,
    pub cuisines: Option<&'a str>,
    pub listed_in_type: Option<&'a str>,
}

impl<'a> CategoricalValues<'a> {
    pub fn get(&self, attribute: CategoricalAttribute) -> &'a str {
        let value = match attribute {
            CategoricalAttribute::Location => self.location,
            CategoricalAttribute::RestType => self.rest_type,
            CategoricalAttribute::Cuisines => self.cuisines,
            CategoricalAttribute::ListedInType => self.listed_in_type,
        };
        value.unwrap_or("")
    }
}

impl<'a> From<&'a RestaurantRecord> for CategoricalValues<'a> {
    fn from(record: &'a RestaurantRecord) -> Self {
        Self {
            location: Some(&record.location),
            rest_type: Some(&record.rest_type),
            cuisines: Some(&record.cuisines),
            listed_in_type: Some(&record.listed_in_type),
        }
    }
}

impl<'a> From<&'a QueryProfile> for CategoricalValues<'a> {
    fn from(profile: &'a QueryProfile) -> Self {
        Self {
            location: Some(&profile.location),
            rest_type: profile.rest_type.as_deref(),
            cuisines: profile.cuisines.as_deref(),
            listed_in_type: profile.listed_in_type.as_deref(),
        }
    }
}

/// One-hot encoder over a fixed vocabulary
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    vocabulary: CategoryVocabulary,
    schema: FeatureSchema,
}

impl FeatureEncoder {
    /// Create an encoder for `vocabulary` with the given continuous columns
    pub fn new(
        vocabulary: CategoryVocabulary,
        continuous: Vec<ContinuousColumn>,
    ) -> Result<Self, SchemaError> {
        let schema = FeatureSchema::new(&vocabulary, continuous)?;
        Ok(Self { vocabulary, schema })
    }

    /// Create an encoder from a loaded artifact
    pub fn from_artifact(artifact: VocabularyArtifact) -> Result<Self, SchemaError> {
        let (vocabulary, continuous) = artifact.into_parts()?;
        Self::new(vocabulary, continuous)
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.schema.dim()
    }

    #[inline]
    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    #[inline]
    pub fn vocabulary(&self) -> &CategoryVocabulary {
        &self.vocabulary
    }

    /// Encode categorical values plus continuous fields.
    ///
    /// The vector is constructed by:
    /// 1. Setting one bit per attribute block when the value is in the vocabulary
    /// 2. Writing each continuous column as `value / scale`
    pub fn encode<F>(&self, values: &CategoricalValues<'_>, continuous: F) -> FeatureVector
    where
        F: Fn(ContinuousField) -> f32,
    {
        let mut vector = FeatureVector::zeros(self.schema.dim());
        let components = vector.as_mut_slice();

        for block in self.vocabulary.attributes() {
            let attribute = block.attribute();
            if let Some(slot) = block.slot(values.get(attribute)) {
                components[self.schema.block(attribute).start + slot] = 1.0;
            }
        }

        let offset = self.schema.continuous_offset();
        for (i, column) in self.schema.continuous_columns().iter().enumerate() {
            components[offset + i] = continuous(column.field) / column.scale;
        }

        vector
    }

    /// Encode a query profile. Continuous fields other than cost read as 0.
    pub fn encode_query(&self, profile: &QueryProfile) -> FeatureVector {
        let cost = profile.cost;
        self.encode(&CategoricalValues::from(profile), |field| match field {
            ContinuousField::Cost => cost,
            ContinuousField::Rate | ContinuousField::Votes => 0.0,
        })
    }

    /// Encode a catalog row
    pub fn encode_record(&self, record: &RestaurantRecord) -> FeatureVector {
        self.encode(&CategoricalValues::from(record), |field| record.continuous(field))
    }
}

/// Builder for creating a FeatureEncoder in code
#[derive(Debug, Clone, Default)]
pub struct EncoderBuilder {
    vocabulary: VocabularyBuilder,
    continuous: Vec<ContinuousColumn>,
}

impl EncoderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories<I, S>(mut self, attribute: CategoricalAttribute, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vocabulary = self.vocabulary.categories(attribute, values);
        self
    }

    pub fn continuous(mut self, field: ContinuousField, scale: f32) -> Self {
        self.continuous.push(ContinuousColumn::scaled(field, scale));
        self
    }

    /// Build the encoder; a cost column with scale 1.0 is added when none was given
    pub fn build(mut self) -> Result<FeatureEncoder, SchemaError> {
        if self.continuous.is_empty() {
            self.continuous.push(ContinuousColumn::new(ContinuousField::Cost));
        }
        FeatureEncoder::new(self.vocabulary.build()?, self.continuous)
    }
}

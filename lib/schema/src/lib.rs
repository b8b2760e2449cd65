//! # Platewise Schema
//!
//! Fixed feature space for restaurant recommendation.
//!
//! ## Overview
//!
//! A [`CategoryVocabulary`] is fit offline and shipped as a JSON artifact.
//! The [`FeatureEncoder`] lays every vector out by the same [`FeatureSchema`]:
//! one one-hot block per categorical attribute, followed by continuous columns.
//!
//! ```text
//! | location ... | rest_type ... | cuisines ... | listed_in_type ... | cost (rate, votes) |
//! ```
//!
//! ## Example
//!
//! ```rust
//! use platewise_core::{CategoricalAttribute, QueryProfile};
//! use platewise_schema::EncoderBuilder;
//!
//! let encoder = EncoderBuilder::new()
//!     .categories(CategoricalAttribute::Location, ["BTM", "HSR"])
//!     .categories(CategoricalAttribute::Cuisines, ["North Indian, Chinese"])
//!     .build()
//!     .unwrap();
//!
//! let vector = encoder.encode_query(&QueryProfile::new("HSR", 500.0));
//! assert_eq!(vector.as_slice(), &[0.0, 1.0, 0.0, 500.0]);
//! ```

pub mod encoder;
pub mod schema;
pub mod vocabulary;

pub use encoder::{CategoricalValues, EncoderBuilder, FeatureEncoder};
pub use schema::{Column, ContinuousColumn, FeatureSchema, SchemaError};
pub use vocabulary::{
    AttributeEntry, AttributeVocabulary, CategoryVocabulary, ContinuousEntry, VocabularyArtifact,
    VocabularyBuilder, ARTIFACT_VERSION,
};

// Vocabulary artifact loading
use platewise_core::{Error, Result};
use platewise_schema::{FeatureEncoder, VocabularyArtifact};
use std::path::Path;
use tracing::info;

/// Load the fitted vocabulary artifact and build the encoder from it.
/// The artifact is validated here so a bad schema stops the process at startup.
pub fn load_encoder<P: AsRef<Path>>(path: P) -> Result<FeatureEncoder> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let encoder = parse_encoder(&contents)?;
    info!(
        "Loaded vocabulary from {:?}: {} categories, {} feature columns",
        path,
        encoder.vocabulary().total_slots(),
        encoder.dim()
    );
    Ok(encoder)
}

/// Build an encoder from artifact JSON
pub fn parse_encoder(json: &str) -> Result<FeatureEncoder> {
    let artifact: VocabularyArtifact =
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
    FeatureEncoder::from_artifact(artifact).map_err(|e| Error::InvalidConfig(e.to_string()))
}

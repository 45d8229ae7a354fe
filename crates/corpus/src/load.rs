//! JSON dataset files.
//!
//! ```json
//! {
//!   "label": "standard feature vector",
//!   "documents": {
//!     "d0": [1, 1, 0, 0],
//!     "d1": [1, 0, 1, 0]
//!   }
//! }
//! ```

use std::fmt;
use std::fs;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::error::CorpusError;
use crate::types::{Dataset, DocumentId, FeatureVector, LabeledDataset};

#[derive(Debug, Deserialize)]
struct DatasetFile {
    label: String,
    #[serde(deserialize_with = "document_entries")]
    documents: Vec<(DocumentId, FeatureVector)>,
}

/// Keeps every `documents` entry in file order, repeated ids included, so
/// `Dataset::insert` gets to reject them.
fn document_entries<'de, D>(deserializer: D) -> Result<Vec<(DocumentId, FeatureVector)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(DocumentId, FeatureVector)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of document ids to feature vectors")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<DocumentId, FeatureVector>()? {
                entries.push(entry);
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(EntriesVisitor)
}

/// Parse a labeled dataset from its JSON form.
pub fn parse_dataset(json: &str) -> Result<LabeledDataset, CorpusError> {
    let file: DatasetFile =
        serde_json::from_str(json).map_err(|err| CorpusError::Parse(err.to_string()))?;
    let dataset = Dataset::from_documents(file.documents)?;
    Ok(LabeledDataset::new(file.label, dataset))
}

/// Read and parse a labeled dataset file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<LabeledDataset, CorpusError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|err| CorpusError::Io {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    let labeled = parse_dataset(&content)?;
    info!(
        path = %path.display(),
        label = %labeled.label,
        documents = labeled.dataset.len(),
        dimension = labeled.dataset.dimension(),
        "dataset_loaded"
    );
    Ok(labeled)
}

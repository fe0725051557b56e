//! Article file loading
//!
//! Reads JSON or CSV files of `{title, text}` records into a [`Corpus`].
//! Missing titles are replaced by the first characters of the text.

use std::{fs, path::Path};

use rand::{seq::SliceRandom, Rng};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::vectorizer::corpus::{Corpus, Document};

/// Length of a title derived from the text
pub const DERIVED_TITLE_CHARS: usize = 30;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// Detect the format from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("csv") => Ok(FileFormat::Csv),
            _ => Err(LoadError::UnknownFormat(path.display().to_string())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

impl RawArticle {
    fn into_document(self) -> Document {
        let text = self.text.unwrap_or_default();
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => text.chars().take(DERIVED_TITLE_CHARS).collect(),
        };
        Document { title, text }
    }
}

/// Load articles from a file.
/// With `limit`, the articles are shuffled and only the first `limit` kept.
///
/// # Arguments
/// * `path` - file to read
/// * `format` - JSON array of objects, or CSV with a header row
/// * `limit` - maximum number of articles
/// * `rng` - random source for the shuffle
pub fn load_articles<P, R>(path: P, format: FileFormat, limit: Option<usize>, rng: &mut R) -> Result<Corpus, LoadError>
where
    P: AsRef<Path>,
    R: Rng + ?Sized,
{
    let path = path.as_ref();
    let raw: Vec<RawArticle> = match format {
        FileFormat::Json => {
            let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&contents)?
        }
        FileFormat::Csv => {
            let mut reader = csv::Reader::from_path(path)?;
            reader.deserialize().collect::<Result<Vec<RawArticle>, csv::Error>>()?
        }
    };

    let mut documents: Vec<Document> = raw.into_iter().map(RawArticle::into_document).collect();
    if let Some(limit) = limit {
        documents.shuffle(rng);
        documents.truncate(limit);
    }
    info!(path = %path.display(), count = documents.len(), "articles loaded");
    Ok(Corpus::new(documents))
}

//! In-memory chunk store loaded from a JSONL corpus.
//!
//! Each non-blank line of the corpus is one chunk:
//!
//! ```text
//! {"text": "Planck proposed that energy is emitted in quanta.", "source": "physics.pdf"}
//! ```
//!
//! Retrieval scores chunks by how many distinct query keywords they contain.

use async_trait::async_trait;
use gated_rag_application::{ChunkRetriever, CollaboratorError};
use gated_rag_domain::util::preview;
use gated_rag_domain::{ContextRecord, FilteredQuestionSet};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

const STOPWORDS: &[&str] = &[
    "what", "is", "the", "a", "an", "and", "or", "for", "in", "on", "to", "of", "are", "how",
    "does", "do", "can", "will", "be", "this", "that", "with", "from", "by", "at", "as", "it",
    "its", "which", "who", "was", "were", "why", "when", "where", "has", "have", "had", "not",
    "but", "you", "your", "about", "into", "than", "then", "there", "their",
];

/// Errors loading a corpus
#[derive(Error, Debug)]
pub enum ChunkStoreError {
    #[error("Failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed corpus line {line}: {message}")]
    Malformed { line: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct CorpusLine {
    text: String,
    #[serde(default)]
    source: Option<String>,
}

/// One retrievable passage.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub text: String,
    pub source: Option<String>,
    keywords: HashSet<String>,
}

impl Chunk {
    pub fn new(text: impl Into<String>, source: Option<String>) -> Self {
        let text = text.into();
        let keywords = extract_keywords(&text).into_iter().collect();
        Self {
            text,
            source,
            keywords,
        }
    }
}

/// Lexical chunk retriever over an in-memory corpus
#[derive(Debug)]
pub struct LocalChunkStore {
    chunks: Vec<Chunk>,
    top_k: usize,
}

impl LocalChunkStore {
    /// A store with no chunks; every lookup finds nothing.
    pub fn empty(top_k: usize) -> Self {
        Self::from_chunks(Vec::new(), top_k)
    }

    pub fn from_chunks(chunks: Vec<Chunk>, top_k: usize) -> Self {
        Self { chunks, top_k }
    }

    /// Load a JSONL corpus. Blank lines are skipped; any other line that is
    /// not a `{"text": ...}` object fails the load.
    pub fn load(path: impl AsRef<Path>, top_k: usize) -> Result<Self, ChunkStoreError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ChunkStoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let chunks = Self::parse(&content)?;
        info!("Loaded {} chunks from {}", chunks.len(), path.display());
        Ok(Self::from_chunks(chunks, top_k))
    }

    fn parse(content: &str) -> Result<Vec<Chunk>, ChunkStoreError> {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                let parsed: CorpusLine =
                    serde_json::from_str(line).map_err(|e| ChunkStoreError::Malformed {
                        line: i + 1,
                        message: e.to_string(),
                    })?;
                Ok(Chunk::new(parsed.text, parsed.source))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// The `top_k` chunks sharing the most keywords with `query`.
    ///
    /// Chunks sharing no keyword are never returned. Ties keep corpus order.
    pub fn search(&self, query: &str) -> Vec<&Chunk> {
        let terms: HashSet<String> = extract_keywords(query).into_iter().collect();
        if terms.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &Chunk)> = self
            .chunks
            .iter()
            .map(|chunk| (terms.intersection(&chunk.keywords).count(), chunk))
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort keeps corpus order among equal scores
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        scored
            .into_iter()
            .take(self.top_k)
            .map(|(_, chunk)| chunk)
            .collect()
    }
}

#[async_trait]
impl ChunkRetriever for LocalChunkStore {
    async fn retrieve(
        &self,
        filtered: &FilteredQuestionSet,
    ) -> Result<Vec<ContextRecord>, CollaboratorError> {
        let questions = match filtered {
            FilteredQuestionSet::Structured(questions) => questions,
            FilteredQuestionSet::Degraded(text) => {
                warn!(
                    "Filter output was not structured, retrieving nothing for: {}",
                    preview(text, 200)
                );
                return Ok(Vec::new());
            }
        };

        Ok(questions
            .iter()
            .map(|q| {
                let hits = self.search(&q.question);
                debug!(
                    "'{}' matched {} chunks from {:?}",
                    q.question,
                    hits.len(),
                    hits.iter().filter_map(|c| c.source.as_deref()).collect::<Vec<_>>()
                );
                ContextRecord::new(
                    q.question.clone(),
                    hits.into_iter().map(|c| c.text.clone()).collect(),
                )
            })
            .collect())
    }
}

/// Lower-cased alphanumeric keywords with stop-words and short tokens removed.
fn extract_keywords(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 2 && !STOPWORDS.contains(w))
        .map(|s| s.to_string())
        .collect()
}

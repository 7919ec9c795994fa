//! Cross-encoder reranker over a text-embeddings-inference style endpoint.
//!
//! `POST {endpoint}/rerank` with `{"query": ..., "texts": [...]}` answers
//! `[{"index": i, "score": s}, ...]`.

use crate::config::FileRerankerConfig;
use async_trait::async_trait;
use gated_rag_application::{ChunkReranker, CollaboratorError};
use gated_rag_domain::ContextRecord;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct RerankRequest<'a> {
    query: &'a str,
    texts: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct RerankScore {
    index: usize,
    score: f64,
}

/// Reorders each record's chunks by cross-encoder score and keeps `top_n`.
pub struct CrossEncoderReranker {
    http_client: Client,
    endpoint: String,
    model: Option<String>,
    top_n: usize,
}

impl CrossEncoderReranker {
    pub fn new(
        endpoint: impl Into<String>,
        top_n: usize,
        timeout: Duration,
    ) -> Result<Self, CollaboratorError> {
        let http_client = Client::builder().timeout(timeout).build().map_err(|e| {
            CollaboratorError::Other(format!("Failed to build HTTP client: {}", e))
        })?;
        Ok(Self {
            http_client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: None,
            top_n,
        })
    }

    /// Build from the `[reranker]` section; `None` when no endpoint is set.
    pub fn from_config(config: &FileRerankerConfig) -> Result<Option<Self>, CollaboratorError> {
        let Some(endpoint) = &config.endpoint else {
            return Ok(None);
        };
        let mut reranker = Self::new(
            endpoint,
            config.top_n,
            Duration::from_secs(config.timeout_secs),
        )?;
        reranker.model = config.model.clone();
        Ok(Some(reranker))
    }

    async fn scores(
        &self,
        query: &str,
        texts: &[String],
    ) -> Result<Vec<RerankScore>, CollaboratorError> {
        let request = RerankRequest {
            query,
            texts,
            model: self.model.as_deref(),
        };

        let response = self
            .http_client
            .post(format!("{}/rerank", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Rerank request failed");
                CollaboratorError::Unavailable(format!("reranker: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Rerank API error");
            return Err(CollaboratorError::Unavailable(format!(
                "reranker returned {}: {}",
                status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| CollaboratorError::InvalidResponse(format!("reranker: {}", e)))
    }

    async fn rerank_record(
        &self,
        record: ContextRecord,
    ) -> Result<ContextRecord, CollaboratorError> {
        if record.is_empty() {
            return Ok(record);
        }

        let scores = self.scores(&record.question, &record.search_results).await?;
        let ordered = order_by_score(scores, &record.search_results, self.top_n)?;
        debug!(
            "Reranked '{}': kept {} of {} chunks",
            record.question,
            ordered.len(),
            record.search_results.len()
        );
        Ok(ContextRecord::new(record.question, ordered))
    }
}

/// Sort `texts` by descending score and keep the first `top_n`.
fn order_by_score(
    mut scores: Vec<RerankScore>,
    texts: &[String],
    top_n: usize,
) -> Result<Vec<String>, CollaboratorError> {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
    scores
        .into_iter()
        .take(top_n)
        .map(|s| {
            texts.get(s.index).cloned().ok_or_else(|| {
                CollaboratorError::InvalidResponse(format!(
                    "reranker returned index {} for {} texts",
                    s.index,
                    texts.len()
                ))
            })
        })
        .collect()
}

#[async_trait]
impl ChunkReranker for CrossEncoderReranker {
    async fn rerank(
        &self,
        records: Vec<ContextRecord>,
    ) -> Result<Vec<ContextRecord>, CollaboratorError> {
        let mut ranked = Vec::with_capacity(records.len());
        for record in records {
            ranked.push(self.rerank_record(record).await?);
        }
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::spawn_responder;
    use axum::http::Method;
    use serde_json::json;

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn reranker(url: &str, top_n: usize) -> CrossEncoderReranker {
        CrossEncoderReranker::new(url, top_n, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_order_by_score() {
        let scores = vec![
            RerankScore { index: 0, score: 0.1 },
            RerankScore { index: 1, score: 0.9 },
            RerankScore { index: 2, score: 0.5 },
        ];
        let out = order_by_score(scores, &texts(&["a", "b", "c"]), 2).unwrap();
        assert_eq!(out, vec!["b", "c"]);
    }

    #[test]
    fn test_out_of_range_index_is_invalid() {
        let scores = vec![RerankScore { index: 7, score: 1.0 }];
        let err = order_by_score(scores, &texts(&["a"]), 3).unwrap_err();
        assert!(matches!(err, CollaboratorError::InvalidResponse(_)));
    }

    #[test]
    fn test_from_config_without_endpoint_is_none() {
        let config = FileRerankerConfig::default();
        assert!(CrossEncoderReranker::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rerank_posts_query_and_texts() {
        let (url, request) = spawn_responder(
            200,
            r#"[
                {"index": 2, "score": 3.5},
                {"index": 0, "score": -1.0},
                {"index": 1, "score": 0.2}
            ]"#,
        )
        .await;

        let out = reranker(&url, 2)
            .rerank(vec![ContextRecord::new("Who was Planck?", texts(&["x", "y", "z"]))])
            .await
            .unwrap();
        assert_eq!(out, vec![ContextRecord::new("Who was Planck?", texts(&["z", "y"]))]);

        let request = request.await.unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/rerank");
        assert_eq!(
            request.json_body(),
            json!({"query": "Who was Planck?", "texts": ["x", "y", "z"]})
        );
    }

    #[tokio::test]
    async fn test_empty_record_skips_request() {
        // No server: a request would fail
        let out = reranker("http://127.0.0.1:9", 3)
            .rerank(vec![ContextRecord::new("q", vec![])])
            .await
            .unwrap();
        assert_eq!(out, vec![ContextRecord::new("q", vec![])]);
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let (url, _request) = spawn_responder(503, r#"{"error":"loading"}"#).await;
        let err = reranker(&url, 3)
            .rerank(vec![ContextRecord::new("q", texts(&["a"]))])
            .await
            .unwrap_err();
        assert!(matches!(err, CollaboratorError::Unavailable(_)));
    }
}

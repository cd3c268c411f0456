//! Exhaustive Top-N ranking of a corpus against a target vector.
//!
//! Every entry is scored, the scores are stably sorted best-first according
//! to the metric's polarity, and `n + 1` entries are kept. The extra slot
//! accommodates the target's own entry, which usually appears in the corpus
//! and ranks first; callers that want only other images drop element 0 (see
//! [`without_self`]). Ties keep corpus order.

use crate::metric::Metric;
use crate::trace::{trace_event, trace_span};
use crate::util::{CbirError, CbirResult};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Identified feature vector in the searchable corpus.
#[derive(Clone, Debug, PartialEq)]
pub struct CorpusEntry {
    /// Image identifier, usually its path.
    pub id: String,
    /// Feature vector produced by the same extractor as the target.
    pub vector: Vec<f32>,
}

impl CorpusEntry {
    /// Creates a corpus entry.
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
        }
    }
}

/// Corpus entry identifier with its score against the target.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredMatch {
    /// Image identifier.
    pub id: String,
    /// Metric score; its meaning depends on the metric polarity.
    pub score: f32,
}

/// Ranking options.
#[derive(Clone, Debug, Default)]
pub struct RankConfig {
    /// Score corpus entries on the rayon thread pool (requires `rayon`).
    pub parallel: bool,
}

/// Ranks corpora under a fixed metric.
#[derive(Clone, Debug)]
pub struct Ranker {
    metric: Metric,
    cfg: RankConfig,
}

impl Ranker {
    /// Creates a ranker with the default configuration.
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            cfg: RankConfig::default(),
        }
    }

    /// Replaces the ranking configuration.
    pub fn with_config(mut self, cfg: RankConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the metric used for scoring.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Returns the ranking configuration.
    pub fn config(&self) -> &RankConfig {
        &self.cfg
    }

    /// Returns the best `min(n + 1, corpus.len())` entries, best first.
    ///
    /// Any length mismatch between `target` and an entry aborts the whole
    /// call without partial results.
    pub fn rank(
        &self,
        target: &[f32],
        corpus: &[CorpusEntry],
        n: usize,
    ) -> CbirResult<Vec<ScoredMatch>> {
        if n < 1 {
            return Err(CbirError::InvalidArgument {
                reason: "n must be at least 1",
            });
        }
        if corpus.is_empty() {
            return Err(CbirError::EmptyCorpus);
        }

        let _span = trace_span!(
            "rank",
            corpus = corpus.len(),
            n = n,
            metric = self.metric.name()
        )
        .entered();

        let scores = self.score_all(target, corpus)?;
        let polarity = self.metric.polarity();
        let mut matches: Vec<ScoredMatch> = corpus
            .iter()
            .zip(scores)
            .map(|(entry, score)| ScoredMatch {
                id: entry.id.clone(),
                score,
            })
            .collect();
        matches.sort_by(|a, b| polarity.compare(a.score, b.score));
        matches.truncate(n.saturating_add(1));

        trace_event!("ranked", count = matches.len());
        Ok(matches)
    }

    /// Ranks using the corpus entry named `target_id` as the target.
    ///
    /// The first entry with that identifier is used. Fails with
    /// `InvalidArgument` when no entry matches.
    pub fn rank_by_id(
        &self,
        target_id: &str,
        corpus: &[CorpusEntry],
        n: usize,
    ) -> CbirResult<Vec<ScoredMatch>> {
        let target = corpus
            .iter()
            .find(|entry| entry.id == target_id)
            .ok_or(CbirError::InvalidArgument {
                reason: "target identifier not present in corpus",
            })?;
        self.rank(&target.vector, corpus, n)
    }

    fn score_all(&self, target: &[f32], corpus: &[CorpusEntry]) -> CbirResult<Vec<f32>> {
        #[cfg(feature = "rayon")]
        {
            if self.cfg.parallel {
                let metric = self.metric;
                return corpus
                    .par_iter()
                    .map(|entry| metric.score(target, &entry.vector))
                    .collect();
            }
        }

        corpus
            .iter()
            .map(|entry| self.metric.score(target, &entry.vector))
            .collect()
    }
}

/// Ranks `corpus` against `target` sequentially; see [`Ranker::rank`].
pub fn rank(
    target: &[f32],
    corpus: &[CorpusEntry],
    metric: Metric,
    n: usize,
) -> CbirResult<Vec<ScoredMatch>> {
    Ranker::new(metric).rank(target, corpus, n)
}

/// Drops the leading self-match and keeps at most `n` results.
///
/// Only element 0 is treated as the self-match, and only when its
/// identifier equals `target_id`.
pub fn without_self(mut ranked: Vec<ScoredMatch>, target_id: &str, n: usize) -> Vec<ScoredMatch> {
    if ranked.first().is_some_and(|m| m.id == target_id) {
        ranked.remove(0);
    }
    ranked.truncate(n);
    ranked
}

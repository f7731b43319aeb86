//! Debug breakdown (component C10): deterministic rendering of a
//! [`ScoreBreakdown`], A/B comparison between two configurations over
//! the same candidate vector, and aggregate result-set statistics.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write as _;

use crate::engine::Engine;
use crate::model::{Bucket, Entry, EntryId, RankedEntry, ScoreBreakdown, ScoringContext};

/// Renders a [`ScoreBreakdown`] with its features sorted by contribution
/// descending, so the output is stable across runs regardless of the
/// features' registration order.
pub fn render(breakdown: &ScoreBreakdown) -> String {
	let mut features = breakdown.feature_scores.clone();
	features.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

	let mut out = String::new();
	let _ = writeln!(out, "bucket={:?} rule={} total={:.3}", breakdown.bucket, breakdown.bucket_rule, breakdown.total);
	for (name, score) in features {
		let _ = writeln!(out, "  {:<24} {:+.3}", name, score);
	}
	out
}

/// Per-result-set rollup.
#[derive(Clone, Debug)]
pub struct AggregateStats {
	pub count: usize,
	pub mean_score: f64,
	pub bucket_counts: HashMap<Bucket, usize>,
}

pub fn aggregate_stats(entries: &[RankedEntry]) -> AggregateStats {
	let count = entries.len();
	let mean_score = if count == 0 { 0.0 } else { entries.iter().map(|e| e.score).sum::<f64>() / count as f64 };
	let mut bucket_counts: HashMap<Bucket, usize> = HashMap::new();
	for entry in entries {
		*bucket_counts.entry(entry.bucket).or_insert(0) += 1;
	}
	AggregateStats { count, mean_score, bucket_counts }
}

/// One entry's outcome under two configurations, for A/B comparison.
/// `rank_*`/`score_*`/`bucket_*` are `None` when the configuration's
/// hard rules/features excluded this entry from its result (this never
/// happens today since both engines run over the same candidate vector,
/// but the field stays optional in case a future engine variant filters).
#[derive(Clone, Debug)]
pub struct ComparisonEntry {
	pub entry_id: EntryId,
	pub rank_a: Option<usize>,
	pub rank_b: Option<usize>,
	pub score_a: Option<f64>,
	pub score_b: Option<f64>,
	pub bucket_a: Option<Bucket>,
	pub bucket_b: Option<Bucket>,
}

impl ComparisonEntry {
	/// Absolute change in rank position (`None` if absent from either side).
	pub fn rank_delta(&self) -> Option<i64> {
		match (self.rank_a, self.rank_b) {
			(Some(a), Some(b)) => Some(b as i64 - a as i64),
			_ => None,
		}
	}
}

/// Runs the same candidate vector through two engines and compares their
/// outcomes per entry, ordered by configuration A's rank.
pub fn compare_configs(
	engine_a: &Engine,
	engine_b: &Engine,
	candidates: Vec<(Entry, ScoringContext)>,
) -> Vec<ComparisonEntry> {
	let ranked_a = engine_a.rank(candidates.clone());
	let ranked_b = engine_b.rank(candidates);

	let mut rows: HashMap<EntryId, ComparisonEntry> = HashMap::new();
	for (i, r) in ranked_a.iter().enumerate() {
		let row = rows.entry(r.entry.id).or_insert_with(|| blank_row(r.entry.id));
		row.rank_a = Some(i);
		row.score_a = Some(r.score);
		row.bucket_a = Some(r.bucket);
	}
	for (i, r) in ranked_b.iter().enumerate() {
		let row = rows.entry(r.entry.id).or_insert_with(|| blank_row(r.entry.id));
		row.rank_b = Some(i);
		row.score_b = Some(r.score);
		row.bucket_b = Some(r.bucket);
	}

	let mut rows: Vec<ComparisonEntry> = rows.into_values().collect();
	rows.sort_by_key(|r| r.rank_a.unwrap_or(usize::MAX));
	rows
}

fn blank_row(entry_id: EntryId) -> ComparisonEntry {
	ComparisonEntry { entry_id, rank_a: None, rank_b: None, score_a: None, score_b: None, bucket_a: None, bucket_b: None }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_render_sorts_by_contribution_descending() {
		let breakdown = ScoreBreakdown {
			total: 42.0,
			bucket: Bucket::A,
			bucket_rule: "exactMatchBucket".to_string(),
			feature_scores: vec![("lemmaMatch".to_string(), 5.0), ("exactMatch".to_string(), 100.0)],
		};
		let rendered = render(&breakdown);
		let exact_pos = rendered.find("exactMatch").unwrap();
		let lemma_pos = rendered.find("lemmaMatch").unwrap();
		assert!(exact_pos < lemma_pos);
	}

	#[test]
	fn test_aggregate_stats_empty() {
		let stats = aggregate_stats(&[]);
		assert_eq!(stats.count, 0);
		assert_eq!(stats.mean_score, 0.0);
	}
}

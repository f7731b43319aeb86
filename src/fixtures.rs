//! In-memory reference implementation of [`Store`] for tests. The
//! physical, schema-backed store is out of scope for this crate; this
//! fixture exists purely to make the ranking pipeline testable.

use crate::error::Error;
use crate::model::{Entry, EntryId, Sense};
use crate::store::Store;

/// A `Store` backed by a plain `Vec<Entry>`, with each entry's `senses`
/// already populated.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
	entries: Vec<Entry>,
}

impl MemoryStore {
	pub fn new(entries: Vec<Entry>) -> MemoryStore {
		MemoryStore { entries }
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}
}

impl Store for MemoryStore {
	fn search_forward(&self, query: &str, limit: usize) -> Result<Vec<Entry>, Error> {
		Ok(self
			.entries
			.iter()
			.filter(|e| {
				e.headword.starts_with(query) || e.reading_hiragana.starts_with(query) || e.reading_romaji.starts_with(query)
			})
			.take(limit)
			.cloned()
			.collect())
	}

	fn search_variants_by_reading(&self, query: &str) -> Result<Vec<Entry>, Error> {
		Ok(self.entries.iter().filter(|e| e.reading_hiragana == query).cloned().collect())
	}

	fn search_contains(&self, query: &str, max_len: usize, limit: usize) -> Result<Vec<Entry>, Error> {
		Ok(self
			.entries
			.iter()
			.filter(|e| (e.headword.contains(query) || e.reading_hiragana.contains(query)) && e.surface_length() <= max_len)
			.take(limit)
			.cloned()
			.collect())
	}

	fn search_kanji_compounds(&self, kanji: char, reading_prefix: &str, limit: usize) -> Result<Vec<Entry>, Error> {
		Ok(self
			.entries
			.iter()
			.filter(|e| e.headword.starts_with(kanji) && e.reading_hiragana.starts_with(reading_prefix))
			.take(limit)
			.cloned()
			.collect())
	}

	fn search_reverse(
		&self,
		query: &str,
		limit: usize,
		_is_english: bool,
		_hint: Option<&str>,
		core_set: Option<&[String]>,
	) -> Result<Vec<Entry>, Error> {
		let query_lower = query.to_lowercase();
		Ok(self
			.entries
			.iter()
			.filter(|e| {
				let core_hit = core_set.map(|set| set.iter().any(|c| c == &e.headword)).unwrap_or(false);
				core_hit
					|| e.senses.iter().any(|s| {
						s.definition_english.to_lowercase().contains(&query_lower)
							|| s.definition_chinese_simplified.as_deref().map(|c| c.contains(query)).unwrap_or(false)
							|| s.definition_chinese_traditional.as_deref().map(|c| c.contains(query)).unwrap_or(false)
					})
			})
			.take(limit)
			.cloned()
			.collect())
	}

	fn fetch_senses(&self, entry_id: EntryId) -> Result<Vec<Sense>, Error> {
		Ok(self.entries.iter().find(|e| e.id == entry_id).map(|e| e.senses.clone()).unwrap_or_default())
	}

	fn validate_integrity(&self) -> Result<bool, Error> {
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::JlptLevel;

	fn entry(id: EntryId, headword: &str, reading: &str) -> Entry {
		Entry {
			id,
			headword: headword.to_string(),
			reading_hiragana: reading.to_string(),
			reading_romaji: String::new(),
			frequency_rank: None,
			jlpt_level: Some(JlptLevel::N5),
			pitch_accent: None,
			created_at: id,
			senses: Vec::new(),
			source: "test".to_string(),
		}
	}

	#[test]
	fn test_search_forward_prefix() {
		let store = MemoryStore::new(vec![entry(1, "食べる", "たべる"), entry(2, "食べ物", "たべもの")]);
		let hits = store.search_forward("食べ", 10).unwrap();
		assert_eq!(hits.len(), 2);
	}

	#[test]
	fn test_fetch_senses_missing_returns_empty() {
		let store = MemoryStore::new(vec![]);
		assert_eq!(store.fetch_senses(999).unwrap(), Vec::<Sense>::new());
	}
}

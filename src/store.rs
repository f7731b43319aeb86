//! The `Store` trait: the read-only collaborator candidate retrieval runs
//! against. The physical schema and its population are out of scope for
//! this crate (spec.md 1); only [`crate::fixtures::MemoryStore`] ships as
//! a reference implementation for tests.

use crate::error::Error;
use crate::model::{Entry, EntryId, Sense};

/// Read-only dictionary access, per spec.md 6.
///
/// Implementations are expected to return entries with their `senses`
/// already populated; `fetch_senses` exists as a convenience accessor for
/// callers (e.g. reverse retrieval) that already hold an `Entry` and want
/// just its sense list.
pub trait Store: Send + Sync {
	/// Entries whose headword or reading starts with `query`, in
	/// store-native order. Candidate retrieval (C4) re-orders the result.
	fn search_forward(&self, query: &str, limit: usize) -> Result<Vec<Entry>, Error>;

	/// Entries whose hiragana reading equals `query` exactly (used to
	/// surface reading-variant headwords for a pure-kana query).
	fn search_variants_by_reading(&self, query: &str) -> Result<Vec<Entry>, Error>;

	/// Entries whose headword or reading contains `query` as a substring,
	/// excluding headwords longer than `max_len`.
	fn search_contains(&self, query: &str, max_len: usize, limit: usize) -> Result<Vec<Entry>, Error>;

	/// Entries whose headword starts with `kanji` and whose reading starts
	/// with `reading_prefix` (kanji-compound expansion for mixed queries).
	fn search_kanji_compounds(&self, kanji: char, reading_prefix: &str, limit: usize) -> Result<Vec<Entry>, Error>;

	/// A loose candidate pool of entries whose senses plausibly mention
	/// `query` in their English or Chinese definitions. The store performs
	/// only coarse filtering (e.g. substring containment); word-boundary
	/// matching, priority computation, and strict filtering are done by
	/// candidate retrieval (C4) over the returned entries' senses.
	fn search_reverse(
		&self,
		query: &str,
		limit: usize,
		is_english: bool,
		hint: Option<&str>,
		core_set: Option<&[String]>,
	) -> Result<Vec<Entry>, Error>;

	/// The ordered sense list for a single entry.
	fn fetch_senses(&self, entry_id: EntryId) -> Result<Vec<Sense>, Error>;

	/// Performs a startup-time self-check of the store's schema and
	/// referential integrity; `Ok(false)` (not an error) means the check
	/// ran but failed.
	fn validate_integrity(&self) -> Result<bool, Error>;
}

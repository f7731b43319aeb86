//! Intent resolution (component C3): forward vs. reverse search, English
//! likelihood, parenthetical hint extraction, and the core-headword /
//! core-kanji / honorific tables used by reverse retrieval.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use crate::script::ScriptType;

/// High-value English single words that strongly suggest an English
/// (reverse-search) query rather than romanized Japanese.
const ENGLISH_WHITELIST: &[&str] = &[
	"go", "do", "be", "am", "is", "are", "was", "were", "eat", "run", "see", "get", "make", "take", "come", "know",
	"think", "look", "want", "give", "use", "find", "tell", "ask", "work", "feel", "try", "leave", "call", "star",
	"car", "bus", "train", "game", "play", "phone", "music", "movie", "book", "time",
];

/// Romanized Japanese particles that should never be treated as English.
const PARTICLE_BLACKLIST: &[&str] = &["wa", "ga", "wo", "o", "ni", "de", "to", "ya", "ka", "ne", "yo"];

/// Prefixes that, combined with a `be`/`ku` suffix, suggest Japanese verb
/// romanization (e.g. "taberu", "kaku") rather than English.
const VERB_PREFIXES: &[&str] = &["ta", "ka", "sa", "na", "ha", "ma", "ya", "ra"];

lazy_static! {
	/// English base word -> ordered sequence of canonical Japanese
	/// headwords.
	static ref CORE_HEADWORDS: HashMap<&'static str, Vec<&'static str>> = {
		let mut m = HashMap::new();
		m.insert("eat", vec!["食べる"]);
		m.insert("go", vec!["行く"]);
		m.insert("come", vec!["来る"]);
		m.insert("do", vec!["する"]);
		m.insert("see", vec!["見る"]);
		m.insert("wear", vec!["着る", "履く", "被る", "掛ける", "締める"]);
		m.insert("drink", vec!["飲む"]);
		m.insert("wake up", vec!["目覚める", "目を覚ます"]);
		m.insert("sleep", vec!["寝る"]);
		m.insert("read", vec!["読む"]);
		m.insert("write", vec!["書く"]);
		m.insert("speak", vec!["話す"]);
		m.insert("listen", vec!["聞く"]);
		m.insert("buy", vec!["買う"]);
		m.insert("sell", vec!["売る"]);
		m
	};

	/// English base word -> suppletive honorific/humble forms that the
	/// reverse-search strict filter must keep even without core kanji.
	static ref HONORIFIC_WHITELIST: HashMap<&'static str, HashSet<&'static str>> = {
		let mut m = HashMap::new();
		let mut eat = HashSet::new();
		eat.insert("頂く");
		eat.insert("召し上がる");
		eat.insert("召す");
		m.insert("eat", eat);
		m
	};

	/// English base word -> set of kanji considered semantically related
	/// to it, used by the strict verb-definition filter.
	static ref CORE_KANJI: HashMap<&'static str, HashSet<char>> = {
		let mut m = HashMap::new();
		m.insert("come", ['来'].iter().cloned().collect());
		m.insert("go", ['行'].iter().cloned().collect());
		m.insert("eat", ['食'].iter().cloned().collect());
		m.insert("wear", ['着', '履', '被', '掛', '締'].iter().cloned().collect());
		m.insert("drink", ['飲'].iter().cloned().collect());
		m
	};
}

/// Resolved intent for a classified, normalized query.
#[derive(Clone, Debug)]
pub struct Intent {
	pub use_reverse_search: bool,
	pub is_english: bool,
	/// Base word with a leading `"to "` stripped, if any.
	pub base: String,
	/// Parenthetical hint extracted from a `"word (hint)"` query.
	pub hint: Option<String>,
	/// Core headwords for `base`, if any (augmented by `hint`'s own
	/// mapping, if it has one).
	pub core_set: Vec<String>,
}

/// Decides whether a query should use reverse (definition) search,
/// per spec.md 4.3.
pub fn resolve(query_normalized: &str, script: ScriptType) -> Intent {
	let use_reverse_search = match script {
		ScriptType::Kanji => true,
		ScriptType::Romaji => is_likely_english(query_normalized),
		_ => false,
	};
	let is_english = use_reverse_search && script == ScriptType::Romaji;

	if !use_reverse_search {
		return Intent {
			use_reverse_search,
			is_english: false,
			base: query_normalized.to_string(),
			hint: None,
			core_set: Vec::new(),
		};
	}

	let (base, hint) = extract_parenthetical(query_normalized);
	let (stripped_base, first_word) = strip_to_prefix(&base);

	let mut core_set = core_headwords_for(&stripped_base);
	if core_set.is_empty() {
		if let Some(first) = &first_word {
			core_set = core_headwords_for(first);
		}
	}
	if let Some(hint) = &hint {
		let hinted = core_headwords_for(hint);
		for w in hinted {
			if !core_set.contains(&w) {
				core_set.push(w);
			}
		}
	}

	Intent {
		use_reverse_search,
		is_english,
		base: stripped_base,
		hint,
		core_set,
	}
}

fn core_headwords_for(base: &str) -> Vec<String> {
	CORE_HEADWORDS
		.get(base)
		.map(|v| v.iter().map(|s| s.to_string()).collect())
		.unwrap_or_default()
}

/// Returns the honorific/humble whitelist for a base English verb.
pub fn honorific_whitelist(base: &str) -> HashSet<&'static str> {
	HONORIFIC_WHITELIST.get(base).cloned().unwrap_or_default()
}

/// Returns the core-kanji set for a base English verb.
pub fn core_kanji(base: &str) -> HashSet<char> {
	CORE_KANJI.get(base).cloned().unwrap_or_default()
}

/// `"japanese (language)"` -> (`"japanese"`, `Some("language")`).
fn extract_parenthetical(q: &str) -> (String, Option<String>) {
	if let Some(open) = q.find('(') {
		if let Some(close) = q.rfind(')') {
			if close > open {
				let base = q[..open].trim().to_string();
				let hint = q[open + 1..close].trim().to_string();
				if !base.is_empty() && !hint.is_empty() {
					return (base, Some(hint));
				}
			}
		}
	}
	(q.trim().to_string(), None)
}

/// For two-word inputs prefixed by `"to "`, strips the prefix and
/// returns both the full remainder and just its first word.
fn strip_to_prefix(q: &str) -> (String, Option<String>) {
	if let Some(rest) = q.strip_prefix("to ") {
		let rest = rest.trim().to_string();
		let first = rest.split_whitespace().next().map(|s| s.to_string());
		(rest, first)
	} else {
		let first = q.split_whitespace().next().map(|s| s.to_string());
		(q.to_string(), first)
	}
}

/// Heuristic English-likelihood test for a romaji query (spec.md 4.3).
pub fn is_likely_english(query: &str) -> bool {
	let q = query.trim();
	if q.chars().count() <= 1 {
		return false;
	}
	if ENGLISH_WHITELIST.contains(&q) {
		return true;
	}
	if PARTICLE_BLACKLIST.contains(&q) {
		return false;
	}
	for prefix in VERB_PREFIXES {
		if let Some(rest) = q.strip_prefix(prefix) {
			if rest.starts_with("be") || rest.starts_with("ku") {
				return false;
			}
		}
	}
	true
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_is_likely_english() {
		assert!(is_likely_english("eat"));
		assert!(!is_likely_english("wa"));
		assert!(!is_likely_english("a"));
		assert!(!is_likely_english("taberu"));
		assert!(!is_likely_english("kaku"));
		assert!(is_likely_english("test"));
	}

	#[test]
	fn test_resolve_kanji_is_reverse() {
		let intent = resolve("大学生活", ScriptType::Kanji);
		assert!(intent.use_reverse_search);
		assert!(!intent.is_english);
	}

	#[test]
	fn test_resolve_romaji_particle_is_forward() {
		let intent = resolve("wa", ScriptType::Romaji);
		assert!(!intent.use_reverse_search);
	}

	#[test]
	fn test_resolve_english_core_set() {
		let intent = resolve("eat", ScriptType::Romaji);
		assert!(intent.use_reverse_search);
		assert!(intent.is_english);
		assert_eq!(intent.core_set, vec!["食べる".to_string()]);
	}

	#[test]
	fn test_resolve_to_prefix() {
		let intent = resolve("to wake up", ScriptType::Romaji);
		assert_eq!(intent.base, "wake up");
		assert_eq!(intent.core_set, vec!["目覚める".to_string(), "目を覚ます".to_string()]);
	}

	#[test]
	fn test_resolve_parenthetical_hint() {
		let intent = resolve("japanese (language)", ScriptType::Romaji);
		assert_eq!(intent.base, "japanese");
		assert_eq!(intent.hint.as_deref(), Some("language"));
	}
}

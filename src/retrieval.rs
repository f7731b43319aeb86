//! Candidate retrieval (component C4): forward (prefix/contains/compound)
//! and reverse (definition) strategies driven by the classified query.
//!
//! The store performs only coarse, schema-aware filtering; the ordering
//! cascades, priority computation, and strict filters below run entirely
//! over the `Entry`/`Sense` values it returns.

use std::cmp::Ordering;
use std::collections::HashMap;

use itertools::Itertools;

use crate::error::Error;
use crate::kana::is::{is_hiragana, is_kanji, is_katakana};
use crate::model::{jlpt_rank, Entry, EntryId, JlptLevel, Sense};
use crate::script::{self, ScriptType};
use crate::store::Store;

const VERB_ENDINGS: &[char] = &['る', 'く', 'ぐ', 'す', 'つ', 'ぬ', 'ぶ', 'む', 'う'];
const PARTICLE_MARKERS: &[&str] = &["の", "で", "と", "に", "が", "を", "から", "まで"];
const SURU_CANONICAL_HEADWORD: &str = "為る";
const NUMBER_WORDS: &[&str] = &[
	"one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven", "twelve",
];

/// True for the one hard-coded editorial override: the canonical kanji
/// spelling of the light verb する gets treated as if it were an exact
/// match when the query itself is する.
pub(crate) fn suru_override(headword: &str, query: &str) -> bool {
	query == "する" && headword == SURU_CANONICAL_HEADWORD
}

fn effective_jlpt(entry: &Entry) -> Option<JlptLevel> {
	if entry.headword == SURU_CANONICAL_HEADWORD {
		Some(JlptLevel::N5)
	} else {
		entry.jlpt_level
	}
}

fn freq_key(entry: &Entry) -> u32 {
	entry.frequency_rank.unwrap_or(u32::MAX)
}

fn chars_skip(s: &str, n: usize) -> String {
	s.chars().skip(n).collect()
}

/// `match_priority` per spec.md 4.4.1 step 2.
fn match_priority(entry: &Entry, q: &str) -> u8 {
	if entry.headword == q || suru_override(&entry.headword, q) {
		0
	} else if entry.reading_hiragana == q {
		1
	} else if entry.headword.starts_with(q) && entry.headword != q {
		2
	} else if entry.reading_romaji == q {
		3
	} else if entry.reading_hiragana.starts_with(q) && entry.reading_hiragana != q {
		4
	} else {
		5
	}
}

fn compound_priority(entry: &Entry, q: &str, priority: u8) -> u8 {
	let qlen = q.chars().count();
	let extension = match priority {
		2 => chars_skip(&entry.headword, qlen),
		4 => chars_skip(&entry.reading_hiragana, qlen),
		_ => return 1,
	};
	if PARTICLE_MARKERS.iter().any(|m| extension.starts_with(m)) {
		0
	} else if extension.chars().count() <= 2 {
		1
	} else {
		2
	}
}

fn katakana_demotion(entry: &Entry, q: &str, priority: u8) -> u8 {
	let qlen = q.chars().count();
	let extension = match priority {
		2 => chars_skip(&entry.headword, qlen),
		4 => chars_skip(&entry.reading_hiragana, qlen),
		_ => return 0,
	};
	match extension.chars().next() {
		Some(c) => {
			if c == 'ー' || is_katakana(c) {
				1
			} else {
				0
			}
		}
		None => 0,
	}
}

fn jlpt_exists_key(level: Option<JlptLevel>) -> u8 {
	if level.is_some() {
		0
	} else {
		1
	}
}

fn primary_cascade_key(entry: &Entry, q: &str) -> (u8, u8, u8, u8, u8, u32, usize) {
	let mp = match_priority(entry, q);
	let cp = compound_priority(entry, q, mp);
	let kd = katakana_demotion(entry, q, mp);
	let eff_jlpt = effective_jlpt(entry);
	(mp, cp, jlpt_exists_key(eff_jlpt), jlpt_rank(eff_jlpt), kd, freq_key(entry), entry.surface_length())
}

fn sort_primary_cascade(entries: &mut [Entry], q: &str) {
	entries.sort_by(|a, b| primary_cascade_key(a, q).cmp(&primary_cascade_key(b, q)));
}

fn variant_priority(entry: &Entry, q: &str) -> u8 {
	if entry.headword == q {
		0
	} else if entry.reading_hiragana == q {
		1
	} else {
		2
	}
}

fn sort_variant_cascade(entries: &mut [Entry], q: &str) {
	entries.sort_by(|a, b| {
		let key_a = (
			variant_priority(a, q),
			jlpt_exists_key(effective_jlpt(a)),
			jlpt_rank(effective_jlpt(a)),
			freq_key(a),
			a.surface_length(),
		);
		let key_b = (
			variant_priority(b, q),
			jlpt_exists_key(effective_jlpt(b)),
			jlpt_rank(effective_jlpt(b)),
			freq_key(b),
			b.surface_length(),
		);
		key_a.cmp(&key_b)
	});
}

fn sort_contains_cascade(entries: &mut [Entry]) {
	entries.sort_by(|a, b| {
		let key_a = (jlpt_exists_key(a.jlpt_level), jlpt_rank(a.jlpt_level), freq_key(a), a.surface_length());
		let key_b = (jlpt_exists_key(b.jlpt_level), jlpt_rank(b.jlpt_level), freq_key(b), b.surface_length());
		key_a.cmp(&key_b)
	});
}

fn rare_kanji_demotion(entries: &mut Vec<Entry>) {
	entries.sort_by_key(|e| if e.is_rare_kanji() { 1u8 } else { 0u8 });
}

/// Extracts the verb stem for over-matching stem union, per spec.md
/// 4.4.1 step 1: a query of length >= 2 ending in a plain-verb kana
/// ending whose remaining stem is itself length >= 2.
fn verb_stem(q: &str) -> Option<String> {
	let chars: Vec<char> = q.chars().collect();
	if chars.len() < 2 {
		return None;
	}
	let last = *chars.last().unwrap();
	if !VERB_ENDINGS.contains(&last) {
		return None;
	}
	let stem: String = chars[..chars.len() - 1].iter().collect();
	if stem.chars().count() >= 2 {
		Some(stem)
	} else {
		None
	}
}

/// First kanji character and first two hiragana characters of a mixed
/// query, used for kanji-compound expansion.
fn mixed_kanji_prefix(q: &str) -> Option<(char, String)> {
	let kanji = q.chars().find(|&c| is_kanji(c))?;
	let hiragana: String = q.chars().filter(|&c| is_hiragana(c)).take(2).collect();
	if hiragana.chars().count() < 2 {
		return None;
	}
	Some((kanji, hiragana))
}

/// Runs forward retrieval (spec.md 4.4.1) for an already-normalized query.
pub fn forward_search(store: &dyn Store, q: &str, limit: usize) -> Result<Vec<Entry>, Error> {
	let limit = limit.clamp(1, 100);
	let mut stages: Vec<Entry> = Vec::new();

	let mut primary = store.search_forward(q, limit)?;
	if let Some(stem) = verb_stem(q) {
		for e in store.search_forward(&stem, limit)? {
			if !primary.iter().any(|p| p.id == e.id) {
				primary.push(e);
			}
		}
	}
	sort_primary_cascade(&mut primary, q);
	stages.extend(primary);

	if script::classify(q) == ScriptType::Hiragana {
		let mut variants = store.search_variants_by_reading(q)?;
		sort_variant_cascade(&mut variants, q);
		stages.extend(variants);
	}

	if stages.iter().unique_by(|e| e.id).count() < limit {
		let max_len = q.chars().count() + 3;
		let mut contains = store.search_contains(q, max_len, limit)?;
		sort_contains_cascade(&mut contains);
		stages.extend(contains);
	}

	if script::classify(q) == ScriptType::Mixed {
		if let Some((kanji, reading_prefix)) = mixed_kanji_prefix(q) {
			let mut compounds = store.search_kanji_compounds(kanji, &reading_prefix, limit)?;
			compounds.retain(|e| e.headword != q && e.surface_length() <= 4);
			compounds.sort_by_key(|e| (e.surface_length(), freq_key(e)));
			stages.extend(compounds);
		}
	}

	let mut candidates: Vec<Entry> = stages.into_iter().unique_by(|e| e.id).collect();

	if candidates.is_empty() && q.ends_with("する") {
		let base: String = q.chars().take(q.chars().count() - 2).collect();
		if !base.is_empty() {
			return forward_search(store, &base, limit);
		}
	}

	rare_kanji_demotion(&mut candidates);
	candidates.truncate(limit);
	Ok(candidates)
}

// -- Reverse retrieval -------------------------------------------------

fn is_boundary(c: Option<char>) -> bool {
	match c {
		None => true,
		Some(c) => c.is_whitespace() || matches!(c, ';' | ',' | '.' | ')'),
	}
}

/// Finds `q` in `def` as a free-standing word, excluding a possessive
/// (`q's`) occurrence. Case-sensitive on its inputs -- callers lowercase
/// both sides first.
fn word_boundary_match(def: &str, q: &str) -> bool {
	if q.is_empty() {
		return false;
	}
	let mut start = 0usize;
	while let Some(rel) = def[start..].find(q) {
		let idx = start + rel;
		let before = def[..idx].chars().last();
		let after_idx = idx + q.len();
		let after = def[after_idx..].chars().next();
		if is_boundary(before) && is_boundary(after) {
			return true;
		}
		start = idx + q.len().max(1);
		if start > def.len() {
			break;
		}
	}
	false
}

fn number_query_guard(q: &str, def: &str) -> bool {
	let rank = match NUMBER_WORDS.iter().position(|&w| w == q) {
		Some(r) => r + 1,
		None => return true,
	};
	if def.contains(&format!("{} o'clock", q)) || def.contains(&format!("part {}", q)) {
		return false;
	}
	if def.trim_start().starts_with('(') && def.trim_end().ends_with(')') && def.contains(q) {
		return false;
	}
	for unit in &["days", "weeks", "months", "years"] {
		if def.contains(&format!("{} {}", q, unit)) {
			return false;
		}
	}
	if rank <= 5 {
		let strict_prefixes = [
			"the ", "this ", "that ", "which ", "another ", "any ", "each ", "every ", "between ", "of ", "or ",
			"part ",
		];
		for prefix in &strict_prefixes {
			if def.contains(&format!("{}{}", prefix, q)) {
				return false;
			}
		}
	}
	true
}

fn parenthetical_priority(def: &str, q: &str) -> u8 {
	if let Some(start) = def.find('(') {
		if let Some(rel_end) = def[start..].find(')') {
			let inside = &def[start + 1..start + rel_end];
			if inside.contains(q) {
				return 1;
			}
		}
	}
	for prefix in &["as a ", "as an ", "by way of a ", "by way of an "] {
		if let Some(idx) = def.find(prefix) {
			if def[idx + prefix.len()..].starts_with(q) {
				return 1;
			}
		}
	}
	0
}

fn pos_weight(part_of_speech: &str) -> u8 {
	let pos = part_of_speech.to_lowercase();
	if pos.contains("verb") {
		0
	} else if pos.contains("noun") {
		1
	} else {
		2
	}
}

fn semantic_priority(def: &str) -> u8 {
	if def.contains("from the shoulders down") {
		0
	} else if ["lower-body", "footwear", "pants", "shoes"].iter().any(|m| def.contains(m)) {
		1
	} else if ["glasses", "necklace", "accessor"].iter().any(|m| def.contains(m)) {
		2
	} else if ["belt", "necktie", "tie", "one's head", "hat"].iter().any(|m| def.contains(m)) {
		3
	} else if def.contains("e.g.") && def.contains("decoration") {
		4
	} else if ["cloth", "garment"].iter().any(|m| def.contains(m)) {
		5
	} else if ["a sword", "sword", "at one's side"].iter().any(|m| def.contains(m)) {
		6
	} else {
		7
	}
}

#[derive(Copy, Clone, Debug)]
struct RowAgg {
	match_priority: u8,
	parenthetical_priority: u8,
	pos_weight: u8,
	semantic_priority: u8,
	idiom_priority: u8,
	first_matching_sense_order: u32,
}

fn evaluate_sense(q: &str, sense: &Sense) -> Option<RowAgg> {
	let def = sense.definition_english.to_lowercase();
	let to_q = format!("to {}", q);

	let textual_priority = if def.trim() == q {
		Some(0u8)
	} else if def == to_q || def.starts_with(&format!("{};", to_q)) {
		Some(1)
	} else if (def.starts_with(&format!("{} ", q)) || def.starts_with(&format!("{};", q)))
		&& !def.starts_with(&format!("{}'s", q))
	{
		Some(2)
	} else if word_boundary_match(&def, q) {
		Some(3)
	} else {
		None
	};

	let chinese_hit = sense.definition_chinese_simplified.as_deref().map(|c| c.contains(q)).unwrap_or(false)
		|| sense.definition_chinese_traditional.as_deref().map(|c| c.contains(q)).unwrap_or(false);

	if textual_priority.is_none() && !chinese_hit {
		return None;
	}
	if !number_query_guard(q, &def) {
		return None;
	}

	Some(RowAgg {
		match_priority: textual_priority.unwrap_or(4),
		parenthetical_priority: parenthetical_priority(&def, q),
		pos_weight: pos_weight(&sense.part_of_speech),
		semantic_priority: semantic_priority(&def),
		idiom_priority: if def.contains("out of") { 1 } else { 0 },
		first_matching_sense_order: sense.sense_order,
	})
}

fn elementwise_min(a: RowAgg, b: RowAgg) -> RowAgg {
	RowAgg {
		match_priority: a.match_priority.min(b.match_priority),
		parenthetical_priority: a.parenthetical_priority.min(b.parenthetical_priority),
		pos_weight: a.pos_weight.min(b.pos_weight),
		semantic_priority: a.semantic_priority.min(b.semantic_priority),
		idiom_priority: a.idiom_priority.min(b.idiom_priority),
		first_matching_sense_order: a.first_matching_sense_order.min(b.first_matching_sense_order),
	}
}

fn is_pure_katakana(s: &str) -> bool {
	!s.is_empty() && s.chars().all(is_katakana)
}

#[allow(clippy::too_many_arguments)]
fn compare_reverse(agg_a: &RowAgg, agg_b: &RowAgg, a: &Entry, b: &Entry, core_set: &[String], is_english: bool) -> Ordering {
	let core_a = if core_set.iter().any(|c| c == &a.headword) { 0u8 } else { 1 };
	let core_b = if core_set.iter().any(|c| c == &b.headword) { 0u8 } else { 1 };
	let main_verb_a = if a.jlpt_level == Some(JlptLevel::N5) && a.surface_length() <= 3 { 0u8 } else { 1 };
	let main_verb_b = if b.jlpt_level == Some(JlptLevel::N5) && b.surface_length() <= 3 { 0u8 } else { 1 };
	let katakana_a = if is_english && is_pure_katakana(&a.headword) { 1u8 } else { 0 };
	let katakana_b = if is_english && is_pure_katakana(&b.headword) { 1u8 } else { 0 };

	core_a
		.cmp(&core_b)
		.then(jlpt_exists_key(a.jlpt_level).cmp(&jlpt_exists_key(b.jlpt_level)))
		.then(agg_a.semantic_priority.cmp(&agg_b.semantic_priority))
		.then(agg_a.parenthetical_priority.cmp(&agg_b.parenthetical_priority))
		.then(agg_a.first_matching_sense_order.cmp(&agg_b.first_matching_sense_order))
		.then(jlpt_rank(a.jlpt_level).cmp(&jlpt_rank(b.jlpt_level)))
		.then(main_verb_a.cmp(&main_verb_b))
		.then(agg_a.idiom_priority.cmp(&agg_b.idiom_priority))
		.then(freq_key(a).cmp(&freq_key(b)))
		.then(agg_a.pos_weight.cmp(&agg_b.pos_weight))
		.then(katakana_a.cmp(&katakana_b))
		.then(agg_a.match_priority.cmp(&agg_b.match_priority))
}

fn reorder_core_words(entries: &mut Vec<Entry>, core_set: &[String]) {
	if core_set.is_empty() {
		return;
	}
	let mut core_entries = Vec::new();
	let mut rest = Vec::new();
	for e in entries.drain(..) {
		if core_set.iter().any(|c| c == &e.headword) {
			core_entries.push(e);
		} else {
			rest.push(e);
		}
	}
	core_entries.sort_by_key(|e| core_set.iter().position(|c| c == &e.headword).unwrap_or(usize::MAX));
	entries.extend(core_entries);
	entries.extend(rest);
}

fn strict_definition_filter(entry: &Entry, q: &str) -> bool {
	entry.senses.iter().any(|s| {
		let def = s.definition_english.to_lowercase();
		if word_boundary_match(&def, q) {
			return true;
		}
		for cdef in [&s.definition_chinese_simplified, &s.definition_chinese_traditional] {
			if let Some(c) = cdef {
				if c.split(';').any(|part| part.trim() == q) {
					return true;
				}
			}
		}
		false
	})
}

fn is_multi_verb(def: &str) -> bool {
	def.contains("; to ")
}

fn verb_strictness_ok(entry: &Entry, full_query: &str) -> bool {
	let base = full_query.strip_prefix("to ").unwrap_or(full_query);
	entry.senses.iter().any(|s| {
		let def = s.definition_english.to_lowercase();
		let matches_prefix =
			def == full_query || def.starts_with(&format!("{};", full_query)) || def.starts_with(&format!("{} (", full_query));
		if !matches_prefix {
			return false;
		}
		if !is_multi_verb(&def) {
			return true;
		}
		let core = crate::intent::core_kanji(base);
		let honorific = crate::intent::honorific_whitelist(base);
		(!core.is_empty() && entry.headword.chars().any(|c| core.contains(&c))) || honorific.contains(entry.headword.as_str())
	})
}

/// Runs reverse retrieval (spec.md 4.4.2) for a normalized query that has
/// already been resolved to use the definition-search strategy.
pub fn reverse_search(
	store: &dyn Store,
	q: &str,
	limit: usize,
	is_english: bool,
	hint: Option<&str>,
	core_set: &[String],
) -> Result<Vec<Entry>, Error> {
	let limit = limit.clamp(1, 100);
	let pool = store.search_reverse(q, limit, is_english, hint, Some(core_set))?;

	let mut agg_by_id: HashMap<EntryId, RowAgg> = HashMap::new();
	let mut entry_by_id: HashMap<EntryId, Entry> = HashMap::new();

	for entry in pool {
		let mut agg: Option<RowAgg> = None;
		for sense in &entry.senses {
			if let Some(row) = evaluate_sense(q, sense) {
				agg = Some(match agg {
					None => row,
					Some(prev) => elementwise_min(prev, row),
				});
			}
		}
		if let Some(agg) = agg {
			agg_by_id.insert(entry.id, agg);
			entry_by_id.insert(entry.id, entry);
		}
	}

	let mut ids: Vec<EntryId> = agg_by_id.keys().cloned().collect();
	ids.sort_by(|ia, ib| {
		let (a, b) = (&agg_by_id[ia], &agg_by_id[ib]);
		let (ea, eb) = (&entry_by_id[ia], &entry_by_id[ib]);
		compare_reverse(a, b, ea, eb, core_set, is_english)
			.then(ea.created_at.cmp(&eb.created_at))
			.then(ia.cmp(ib))
	});

	let mut entries: Vec<Entry> = ids.into_iter().map(|id| entry_by_id.remove(&id).unwrap()).collect();

	reorder_core_words(&mut entries, core_set);
	entries.retain(|e| strict_definition_filter(e, q));
	if q.starts_with("to ") {
		entries.retain(|e| verb_strictness_ok(e, q));
	}

	entries.truncate(limit);
	Ok(entries)
}

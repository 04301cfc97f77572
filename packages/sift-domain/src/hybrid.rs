/// Weight sent when nothing suggests a pure keyword lookup.
pub const BALANCED_HYBRID_WEIGHT: f32 = 0.5;
/// Weight sent when the query is a known keyword phrase.
pub const KEYWORD_HYBRID_WEIGHT: f32 = 0.0;

/// Derives the hybrid weight implied by `query`.
///
/// An empty query or the wildcard is balanced. A query equal to one of `known_phrases`
/// (trimmed, case-insensitive) asks for pure keyword search. Anything else is balanced.
pub fn derive_hybrid_weight(query: &str, wildcard: &str, known_phrases: &[String]) -> f32 {
	let query = query.trim();

	if query.is_empty() || query == wildcard {
		return BALANCED_HYBRID_WEIGHT;
	}

	let lowered = query.to_lowercase();

	if known_phrases.iter().any(|phrase| phrase.trim().to_lowercase() == lowered) {
		KEYWORD_HYBRID_WEIGHT
	} else {
		BALANCED_HYBRID_WEIGHT
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn phrases() -> Vec<String> {
		vec!["Sea Surface Temperature".to_string(), "precipitation".to_string()]
	}

	#[test]
	fn empty_and_wildcard_queries_are_balanced() {
		assert_eq!(derive_hybrid_weight("", "*", &phrases()), 0.5);
		assert_eq!(derive_hybrid_weight("*", "*", &phrases()), 0.5);
		assert_eq!(derive_hybrid_weight("   ", "*", &phrases()), 0.5);
	}

	#[test]
	fn known_phrase_selects_keyword_search() {
		assert_eq!(derive_hybrid_weight("  sea surface TEMPERATURE ", "*", &phrases()), 0.0);
	}

	#[test]
	fn partial_phrase_is_balanced() {
		assert_eq!(derive_hybrid_weight("sea surface", "*", &phrases()), 0.5);
		assert_eq!(derive_hybrid_weight("precipitation", "*", &[]), 0.5);
	}
}

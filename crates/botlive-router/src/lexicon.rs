// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Accent-insensitive lexical matching for the routing heuristics.
//!
//! Customers write "delai" as often as "délai", so trigger and keyword
//! matching folds diacritics on both sides: NFD decomposition, combining
//! marks dropped, lowercased. Interrogative markers are matched
//! case-insensitively against the raw message without folding, matching
//! how the marker list is written.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase a string and strip diacritics via NFD decomposition.
pub fn fold_diacritics(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// True when any interrogative marker occurs in the message
/// (case-insensitive substring match).
pub fn contains_interrogative(message: &str, markers: &[String]) -> bool {
    let lower = message.to_lowercase();
    markers
        .iter()
        .map(|m| m.to_lowercase())
        .any(|m| !m.is_empty() && lower.contains(&m))
}

/// Count how many trigger words/phrases occur in an already-folded
/// message. Each trigger counts at most once.
pub fn count_trigger_hits(folded_message: &str, triggers: &[String]) -> usize {
    triggers
        .iter()
        .map(|t| fold_diacritics(t))
        .filter(|t| !t.is_empty() && folded_message.contains(t.as_str()))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn folding_strips_french_diacritics() {
        assert_eq!(fold_diacritics("Délai"), "delai");
        assert_eq!(fold_diacritics("reçu"), "recu");
        assert_eq!(fold_diacritics("Où est-il ?"), "ou est-il ?");
        assert_eq!(fold_diacritics("port-bouët"), "port-bouet");
    }

    #[test]
    fn folding_leaves_plain_ascii_untouched() {
        assert_eq!(fold_diacritics("livraison rapide"), "livraison rapide");
    }

    #[test]
    fn interrogative_detection_is_case_insensitive() {
        let markers = list(&["combien", "c'est quoi"]);
        assert!(contains_interrogative("COMBIEN ça coûte", &markers));
        assert!(contains_interrogative("dis-moi c'est quoi ça", &markers));
        assert!(!contains_interrogative("je veux commander", &markers));
    }

    #[test]
    fn accented_marker_matches_accented_message() {
        let markers = list(&["où"]);
        assert!(contains_interrogative("où est ma commande", &markers));
        // No folding on this path: the raw message must carry the accent.
        assert!(!contains_interrogative("ou est ma commande", &markers));
    }

    #[test]
    fn trigger_counting_is_accent_insensitive() {
        let triggers = list(&["délai", "livraison"]);
        let folded = fold_diacritics("quel delai de LIVRAISON");
        assert_eq!(count_trigger_hits(&folded, &triggers), 2);
    }

    #[test]
    fn each_trigger_counts_once() {
        let triggers = list(&["zone"]);
        let folded = fold_diacritics("zone zone zone");
        assert_eq!(count_trigger_hits(&folded, &triggers), 1);
    }

    #[test]
    fn phrase_triggers_match_as_substrings() {
        let triggers = list(&["où en est", "numéro de suivi"]);
        let folded = fold_diacritics("Où en est ma commande svp");
        assert_eq!(count_trigger_hits(&folded, &triggers), 1);
    }
}

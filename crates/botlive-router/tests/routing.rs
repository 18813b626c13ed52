// SPDX-FileCopyrightText: 2026 Botlive Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing scenarios over a deterministic stub embedder.

use std::sync::Arc;

use botlive_config::{LexiconConfig, RouterConfig};
use botlive_core::vector::l2_norm;
use botlive_router::{CentroidRouter, IntentCorpus};
use botlive_test_utils::StubEmbedder;

fn build_router(json: &str, embedder: StubEmbedder, config: RouterConfig) -> CentroidRouter {
    CentroidRouter::new(
        IntentCorpus::from_json(json).unwrap(),
        Arc::new(embedder),
        config,
        LexiconConfig::default(),
        None,
    )
    .unwrap()
}

/// Price-inquiry vs greeting: "combien ça coûte" must land on the price
/// intent with solid confidence.
#[test]
fn price_inquiry_beats_greeting() {
    let json = r#"{
        "intents": [
            {
                "id": 1,
                "name": "price_inquiry",
                "prompt_target": "PROMPT_PRIX",
                "boost_interrogatif": true,
                "variations_naturelles": ["c'est combien", "quel est le prix"]
            },
            {
                "id": 2,
                "name": "greeting",
                "prompt_target": "PROMPT_SALUTATION",
                "variations_naturelles": ["bonjour", "salut ça va"]
            }
        ]
    }"#;
    let embedder = StubEmbedder::with_synonyms(
        64,
        &[("combien", "prix"), ("coûte", "prix"), ("coute", "prix")],
    );
    let router = build_router(json, embedder, RouterConfig::default());

    let result = router.route("combien ça coûte").unwrap();
    assert_eq!(result.intent_name, "price_inquiry");
    assert_eq!(result.prompt_target, "PROMPT_PRIX");
    assert!(
        result.confidence > 0.5,
        "expected confidence above 0.5, got {}",
        result.confidence
    );
    // "combien" is an interrogative marker and the intent is flagged.
    assert!(result.boost_applied);
    assert!(result.confidence >= result.similarity);
    assert!(!result.is_ambiguous);
}

/// Empty input is a total function: deterministic fallback, never an error.
#[test]
fn empty_message_routes_to_fallback() {
    let json = r#"{
        "intents": [
            {"id": 1, "name": "prix", "variations_naturelles": ["c'est combien"]},
            {"id": 2, "name": "salutation", "variations_naturelles": ["bonjour"]}
        ]
    }"#;
    let router = build_router(json, StubEmbedder::new(32), RouterConfig::default());

    for message in ["", "   "] {
        let result = router.route(message).unwrap();
        assert_eq!(result.confidence, 0.0);
        assert!(!result.is_ambiguous);
        assert!(result.top_k_intents.is_empty());
    }
}

/// An intent with all six variation groups empty never registers and can
/// never win.
#[test]
fn exampleless_intent_is_absent_from_routing() {
    let json = r#"{
        "intents": [
            {"id": 1, "name": "prix", "variations_naturelles": ["c'est combien"]},
            {"id": 2, "name": "fantome", "prompt_target": "PROMPT_FANTOME"},
            {"id": 3, "name": "salutation", "variations_naturelles": ["bonjour"]}
        ]
    }"#;
    let router = build_router(json, StubEmbedder::new(32), RouterConfig::default());

    assert_eq!(router.intent_count(), 2);
    assert!(!router.contains_intent(2));

    let result = router.route_with("fantome", 10, true).unwrap();
    assert_ne!(result.intent_id, 2);
    assert!(result.top_k_intents.iter().all(|t| t.intent_id != 2));
}

/// Same corpus, same embedder, same message: bit-identical results.
#[test]
fn routing_is_deterministic() {
    let json = r#"{
        "intents": [
            {
                "id": 1,
                "name": "prix",
                "keywords": ["prix"],
                "variations_naturelles": ["c'est combien", "quel est le prix"]
            },
            {"id": 2, "name": "salutation", "variations_naturelles": ["bonjour ça va"]}
        ]
    }"#;
    let router = build_router(json, StubEmbedder::new(64), RouterConfig::default());

    let first = router.route("quel est le prix du bonjour").unwrap();
    let second = router.route("quel est le prix du bonjour").unwrap();
    assert_eq!(first, second);
}

/// With only delivery-trigger words in the message and the pair in the
/// top-2 within the tie-break threshold, delivery must rank first even
/// when raw similarity favored tracking.
#[test]
fn delivery_tracking_tie_break_prefers_the_signaled_intent() {
    let json = r#"{
        "intents": [
            {
                "id": 6,
                "name": "livraison",
                "prompt_target": "PROMPT_LIVRAISON",
                "variations_naturelles": ["livraison rapide"]
            },
            {
                "id": 7,
                "name": "suivi_commande",
                "prompt_target": "PROMPT_SUIVI",
                "variations_naturelles": ["livraison adresse suivi"]
            }
        ]
    }"#;
    let router = build_router(json, StubEmbedder::new(32), RouterConfig::default());

    // "livraison" and "adresse" are delivery triggers; no tracking
    // trigger occurs. Raw similarity favors the tracking intent (it
    // shares both tokens), leaving the pair well inside the tie-break
    // threshold after boosting.
    let result = router.route("livraison adresse").unwrap();

    assert_eq!(result.intent_id, 6, "delivery must win the tie-break");
    assert_eq!(result.top_k_intents[0].intent_id, 6);
    assert_eq!(result.top_k_intents[1].intent_id, 7);
    // Rank-only reorder: each candidate keeps its boosted confidence,
    // so the reordered list is no longer strictly descending.
    assert!(result.top_k_intents[0].confidence < result.top_k_intents[1].confidence);
    assert!(result.is_ambiguous);
    // Winner fields reflect the delivery intent's scores.
    assert!((result.similarity - 0.5).abs() < 1e-3);
    assert!(result.confidence > result.similarity);
}

/// With tied trigger hits the tie-break leaves the similarity order
/// untouched even inside its threshold.
#[test]
fn tie_break_leaves_order_alone_when_hits_are_tied() {
    let json = r#"{
        "intents": [
            {"id": 6, "name": "livraison", "variations_naturelles": ["demain matin"]},
            {"id": 7, "name": "suivi_commande", "variations_naturelles": ["demain matin soir"]}
        ]
    }"#;
    let router = build_router(json, StubEmbedder::new(32), RouterConfig::default());

    // The pair occupies the top-2 about 0.18 apart (inside the 0.25
    // tie-break threshold), but no trigger word occurs on either side:
    // zero hits each, so the similarity order stands.
    let result = router.route("demain matin").unwrap();
    assert_eq!(result.intent_id, 6);
    assert_eq!(result.top_k_intents[0].intent_id, 6);
    assert_eq!(result.top_k_intents[1].intent_id, 7);
    assert!(result.confidence_delta < 0.25);
}

/// Every registered centroid is unit length.
#[test]
fn centroids_are_unit_length() {
    let json = r#"{
        "intents": [
            {
                "id": 1,
                "name": "prix",
                "variations_naturelles": ["c'est combien"],
                "variations_bruitees": ["cb sa coute"],
                "variations_nouchi": ["c'est combien même"],
                "variations_ambiguës": ["et ça"],
                "variations_zones_generiques": ["cocody"],
                "variations_confirmation_reception": ["j'ai reçu le colis"]
            },
            {"id": 2, "name": "salutation", "variations_naturelles": ["bonjour"]}
        ]
    }"#;
    let router = build_router(json, StubEmbedder::new(64), RouterConfig::default());

    for centroid in router.centroids() {
        let norm = l2_norm(&centroid.centroid);
        assert!(
            (norm - 1.0).abs() < 1e-5,
            "centroid for intent {} has norm {norm}",
            centroid.intent.intent_id
        );
    }
}

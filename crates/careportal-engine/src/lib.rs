//! # careportal-engine
//!
//! The mock conversational and diagnostic engine behind CarePortal.
//!
//! ## Overview
//!
//! - [`TableSymptomMatcher`] implements
//!   [`SymptomMatcher`](careportal_core::traits::SymptomMatcher): keys are
//!   declared in a TOML table, matched as lowercase substrings in declaration
//!   order, first match wins, and a fallback candidate covers "no match".
//! - [`CannedResponder`] implements
//!   [`ResponseSelector`](careportal_core::traits::ResponseSelector): a
//!   uniform random pick from a fixed list of replies.
//! - [`PortalConfig`] loads latency settings and optional table overrides.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use careportal_engine::TableSymptomMatcher;
//!
//! let matcher = TableSymptomMatcher::builtin()?;
//! let candidates = matcher.match_symptoms("fever headache and chills");
//! ```

pub mod config;
pub mod matcher;
pub mod responder;
pub mod table;

pub use config::PortalConfig;
pub use matcher::TableSymptomMatcher;
pub use responder::CannedResponder;
pub use table::{ResponseTable, SymptomKey, SymptomTable};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{rngs::StdRng, SeedableRng};

    use careportal_contracts::{diagnosis::DiagnosisCandidate, error::PortalError};
    use careportal_core::traits::{ResponseSelector, SymptomMatcher};

    use crate::{CannedResponder, PortalConfig, ResponseTable, SymptomTable, TableSymptomMatcher};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn matcher() -> TableSymptomMatcher {
        TableSymptomMatcher::builtin().unwrap()
    }

    fn summary(candidates: &[DiagnosisCandidate]) -> Vec<(&str, f64)> {
        candidates
            .iter()
            .map(|c| (c.disease.as_str(), c.probability))
            .collect()
    }

    // ── 1. built-in symptom keys ──────────────────────────────────────────────

    #[test]
    fn fever_headache_yields_cold_then_influenza() {
        let result = matcher().match_symptoms("fever headache and chills");
        assert_eq!(
            summary(&result),
            vec![("Common Cold", 0.75), ("Influenza", 0.62)]
        );
        assert_eq!(
            result[0].recommendations,
            vec!["Rest", "Stay hydrated", "Over-the-counter pain relievers"]
        );
    }

    #[test]
    fn rash_itching_yields_dermatitis_then_eczema() {
        let result = matcher().match_symptoms("I have a rash itching on my arm");
        assert_eq!(
            summary(&result),
            vec![("Contact Dermatitis", 0.88), ("Eczema", 0.67)]
        );
    }

    #[test]
    fn cough_chest_pain_yields_bronchitis_then_pneumonia() {
        let result = matcher().match_symptoms("persistent cough chest pain at night");
        assert_eq!(
            summary(&result),
            vec![("Bronchitis", 0.82), ("Pneumonia", 0.58)]
        );
    }

    // ── 2. fallback ───────────────────────────────────────────────────────────

    #[test]
    fn unmatched_description_yields_single_fallback() {
        let result = matcher().match_symptoms("broken toe");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].disease, "Unknown Condition");
        assert_eq!(result[0].probability, 0.5);
        assert_eq!(
            result[0].recommendations,
            vec![
                "Detailed physical examination",
                "Laboratory tests",
                "Specialist consultation"
            ]
        );
    }

    /// Words separated by other words never match: matching is substring
    /// containment of the whole phrase, not keyword sets.
    #[test]
    fn separated_key_words_fall_back() {
        let result = matcher().match_symptoms("I have a rash and itching on my arm");
        assert_eq!(summary(&result), vec![("Unknown Condition", 0.5)]);
    }

    #[test]
    fn reversed_word_order_falls_back() {
        let result = matcher().match_symptoms("headache and fever");
        assert_eq!(result[0].disease, "Unknown Condition");
    }

    // ── 3. case-insensitivity and determinism ─────────────────────────────────

    #[test]
    fn matching_is_case_insensitive() {
        let m = matcher();
        assert_eq!(
            m.match_symptoms("FEVER HEADACHE"),
            m.match_symptoms("fever headache")
        );
        assert_eq!(m.match_symptoms("Fever Headache")[0].disease, "Common Cold");
    }

    #[test]
    fn repeated_calls_are_identical() {
        let m = matcher();
        let first = m.match_symptoms("cough chest pain");
        let second = m.match_symptoms("cough chest pain");
        assert_eq!(first, second);
    }

    // ── 4. first-match wins ───────────────────────────────────────────────────

    #[test]
    fn earlier_key_wins_when_two_keys_are_present() {
        let m = matcher();
        // Both "fever headache" and "rash itching" occur; the earlier key wins
        // regardless of where each phrase sits in the text.
        let result = m.match_symptoms("rash itching plus fever headache");
        assert_eq!(result[0].disease, "Common Cold");
        assert_eq!(m.matched_key("rash itching plus fever headache").unwrap().phrase, "fever headache");
    }

    #[test]
    fn custom_table_keeps_declaration_order() {
        let toml = r#"
            [[keys]]
            phrase = "pain"
              [[keys.candidates]]
              disease = "General Pain"
              probability = 0.3
              description = "d"
              recommendations = []

            [[keys]]
            phrase = "chest pain"
              [[keys.candidates]]
              disease = "Never Reached"
              probability = 0.9
              description = "d"
              recommendations = []

            [fallback]
            disease = "Unknown Condition"
            probability = 0.5
            description = "d"
            recommendations = []
        "#;

        let m = TableSymptomMatcher::new(SymptomTable::from_toml_str(toml).unwrap());
        assert_eq!(m.match_symptoms("chest pain")[0].disease, "General Pain");
    }

    // ── 5. table validation ───────────────────────────────────────────────────

    fn single_key_table(phrase: &str, probability: f64) -> String {
        format!(
            r#"
            [[keys]]
            phrase = "{phrase}"
              [[keys.candidates]]
              disease = "X"
              probability = {probability}
              description = "d"
              recommendations = []

            [fallback]
            disease = "Unknown Condition"
            probability = 0.5
            description = "d"
            recommendations = []
            "#
        )
    }

    #[test]
    fn uppercase_phrase_is_rejected() {
        match SymptomTable::from_toml_str(&single_key_table("Fever", 0.5)) {
            Err(PortalError::TableValidation { reason }) => {
                assert!(reason.contains("lowercase"), "unexpected reason: {reason}");
            }
            other => panic!("expected TableValidation, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        match SymptomTable::from_toml_str(&single_key_table("fever", 1.5)) {
            Err(PortalError::TableValidation { reason }) => {
                assert!(reason.contains("outside [0, 1]"), "unexpected reason: {reason}");
            }
            other => panic!("expected TableValidation, got {:?}", other),
        }
    }

    #[test]
    fn key_without_candidates_is_rejected() {
        let toml = r#"
            [[keys]]
            phrase = "fever"
            candidates = []

            [fallback]
            disease = "Unknown Condition"
            probability = 0.5
            description = "d"
            recommendations = []
        "#;
        assert!(matches!(
            SymptomTable::from_toml_str(toml),
            Err(PortalError::TableValidation { .. })
        ));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        match SymptomTable::from_toml_str("this is not valid toml ][[[") {
            Err(PortalError::Config { reason }) => {
                assert!(reason.contains("failed to parse symptom table TOML"));
            }
            other => panic!("expected Config, got {:?}", other),
        }
    }

    #[test]
    fn missing_fallback_is_config_error() {
        let toml = r#"
            keys = []
        "#;
        assert!(matches!(
            SymptomTable::from_toml_str(toml),
            Err(PortalError::Config { .. })
        ));
    }

    // ── 6. canned responder ───────────────────────────────────────────────────

    #[test]
    fn builtin_responses_are_the_five_acknowledgements() {
        let responder = CannedResponder::builtin().unwrap();
        assert_eq!(responder.responses().len(), 5);
        assert_eq!(
            responder.responses()[0],
            "I understand your concern. Let me help you with that."
        );
    }

    #[test]
    fn reply_is_always_from_the_fixed_set() {
        let responder = CannedResponder::builtin().unwrap();
        let allowed: HashSet<&str> = responder.responses().iter().map(String::as_str).collect();

        for text in ["hello", "I have a fever", "x", "a much longer message about my knee"] {
            for _ in 0..20 {
                let reply = responder.select_response(text);
                assert!(allowed.contains(reply.as_str()), "unexpected reply: {reply}");
            }
        }
    }

    #[test]
    fn same_input_can_yield_different_replies() {
        let responder = CannedResponder::builtin().unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let seen: HashSet<&str> = (0..200).map(|_| responder.select_with(&mut rng)).collect();
        assert!(seen.len() > 1, "200 draws over 5 replies should not all agree");
    }

    #[test]
    fn seeded_responders_agree() {
        let a = CannedResponder::seeded(ResponseTable::builtin().unwrap(), 7).unwrap();
        let b = CannedResponder::seeded(ResponseTable::builtin().unwrap(), 7).unwrap();

        let from_a: Vec<String> = (0..10).map(|_| a.select_response("same")).collect();
        let from_b: Vec<String> = (0..10).map(|_| b.select_response("different text")).collect();
        assert_eq!(from_a, from_b, "choice depends on the seed, never on the input");
    }

    #[test]
    fn empty_response_table_is_rejected() {
        match ResponseTable::from_toml_str("responses = []") {
            Err(PortalError::TableValidation { reason }) => {
                assert!(reason.contains("empty"));
            }
            other => panic!("expected TableValidation, got {:?}", other),
        }

        let empty = ResponseTable { responses: vec![] };
        assert!(CannedResponder::new(empty).is_err());
    }

    #[test]
    fn blank_response_is_rejected() {
        assert!(matches!(
            ResponseTable::from_toml_str(r#"responses = ["ok", "   "]"#),
            Err(PortalError::TableValidation { .. })
        ));
    }

    // ── 7. portal config ──────────────────────────────────────────────────────

    #[test]
    fn empty_config_uses_defaults() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.latency.chat_reply_ms, 1500);
        assert!(config.symptom_matcher().is_ok());
        assert!(config.responder().is_ok());
    }

    #[test]
    fn partial_latency_keeps_other_defaults() {
        let config = PortalConfig::from_toml_str(
            r#"
            [latency]
            chat_reply_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.latency.chat_reply_ms, 10);
        assert_eq!(config.latency.symptom_analysis_ms, 2000);
    }

    #[test]
    fn config_file_resolves_relative_table_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("replies.toml"),
            r#"responses = ["Only reply"]"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("portal.toml"),
            r#"
            response_table = "replies.toml"
            seed = 3
            "#,
        )
        .unwrap();

        let config = PortalConfig::from_file(&dir.path().join("portal.toml")).unwrap();
        assert_eq!(config.response_table, Some(dir.path().join("replies.toml")));

        let responder = config.responder().unwrap();
        assert_eq!(responder.select_response("anything"), "Only reply");
    }

    #[test]
    fn missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        match PortalConfig::from_file(&dir.path().join("absent.toml")) {
            Err(PortalError::Config { reason }) => {
                assert!(reason.contains("failed to read config file"));
            }
            other => panic!("expected Config, got {:?}", other),
        }
    }
}

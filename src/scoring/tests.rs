use super::*;
use crate::similarity::SimilarityMethod;
use crate::text::TextLimits;

const EPS: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPS
}

fn gap(missing_count: usize, total_keywords: usize) -> KeywordGap {
    KeywordGap {
        missing: (0..missing_count).map(|i| format!("w{i}")).collect(),
        missing_count,
        total_keywords,
    }
}

mod normalize_tests {
    use super::*;

    #[test]
    fn test_extremes_stay_in_unit_interval() {
        let bounds = DistanceBounds::default();
        let extremes = [
            -1e9,
            -1.0,
            0.0,
            1.0,
            2.0,
            100.0,
            1e9,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NAN,
        ];
        for method in SimilarityMethod::ALL {
            for raw in extremes {
                let n = normalize(method, raw, &bounds);
                assert!(
                    (0.0..=1.0).contains(&n),
                    "{method} raw={raw} normalized={n}"
                );
            }
        }
    }

    #[test]
    fn test_cosine_linear_rescale() {
        let bounds = DistanceBounds::default();
        assert!(approx_eq(normalize(SimilarityMethod::Cosine, -1.0, &bounds), 0.0));
        assert!(approx_eq(normalize(SimilarityMethod::Cosine, 0.0, &bounds), 0.5));
        assert!(approx_eq(normalize(SimilarityMethod::Cosine, 1.0, &bounds), 1.0));
    }

    #[test]
    fn test_cosine_monotonic() {
        let bounds = DistanceBounds::default();
        let mut prev = -1.0;
        for step in 0..=200 {
            let raw = -1.0 + step as f64 * 0.01;
            let n = normalize(SimilarityMethod::Cosine, raw, &bounds);
            assert!(n >= prev);
            prev = n;
        }
    }

    #[test]
    fn test_euclidean_inverts_against_bound() {
        let bounds = DistanceBounds::default();
        assert!(approx_eq(normalize(SimilarityMethod::Euclidean, 0.0, &bounds), 1.0));
        assert!(approx_eq(normalize(SimilarityMethod::Euclidean, 1.0, &bounds), 0.5));
        assert!(approx_eq(normalize(SimilarityMethod::Euclidean, 2.0, &bounds), 0.0));
    }

    #[test]
    fn test_distance_past_bound_clamps_to_zero() {
        let bounds = DistanceBounds::default();
        assert_eq!(normalize(SimilarityMethod::Euclidean, 3.7, &bounds), 0.0);
        assert_eq!(normalize(SimilarityMethod::Manhattan, 150.0, &bounds), 0.0);
    }

    #[test]
    fn test_manhattan_uses_its_own_bound() {
        let bounds = DistanceBounds {
            euclidean_max: 2.0,
            manhattan_max: 10.0,
        };
        assert!(approx_eq(normalize(SimilarityMethod::Manhattan, 2.5, &bounds), 0.75));
    }

    #[test]
    fn test_lexical_pass_through() {
        let bounds = DistanceBounds::default();
        assert!(approx_eq(normalize(SimilarityMethod::Jaccard, 0.27, &bounds), 0.27));
        assert!(approx_eq(normalize(SimilarityMethod::Levenshtein, 1.0, &bounds), 1.0));
    }

    #[test]
    fn test_nan_collapses_to_zero() {
        let bounds = DistanceBounds::default();
        assert_eq!(normalize(SimilarityMethod::Cosine, f64::NAN, &bounds), 0.0);
    }
}

mod keyword_tests {
    use super::*;

    #[test]
    fn test_analyze_sorted_missing_words() {
        let gap = KeywordGap::analyze(
            "Insulin lowers blood glucose by helping cells absorb sugar.",
            "Insulin helps cells absorb glucose.",
        );

        assert_eq!(gap.missing, vec!["blood", "by", "helping", "lowers", "sugar"]);
        assert_eq!(gap.missing_count, 5);
        assert_eq!(gap.total_keywords, 9);
        assert!(!gap.is_complete());
    }

    #[test]
    fn test_analyze_case_insensitive() {
        let gap = KeywordGap::analyze("Metformin EXERCISE", "metformin and exercise");
        assert!(gap.is_complete());
        assert_eq!(gap.total_keywords, 2);
    }

    #[test]
    fn test_missing_count_matches_set_identity() {
        let reference = "Red blood cells carry oxygen from the lungs to tissues";
        let candidate = "They transport oxygen using hemoglobin to tissues";
        let gap = KeywordGap::analyze(reference, candidate);

        let reference_words = crate::text::word_set(reference);
        let candidate_words = crate::text::word_set(candidate);
        let shared = reference_words.intersection(&candidate_words).count();

        assert_eq!(gap.missing_count, reference_words.len() - shared);
    }

    #[test]
    fn test_empty_reference_has_no_missing() {
        let gap = KeywordGap::analyze("...", "anything at all");
        assert_eq!(gap.total_keywords, 0);
        assert!(gap.missing.is_empty());
        assert_eq!(gap.missing_fraction(), 0.0);
        assert_eq!(gap.coverage(), 1.0);
    }

    #[test]
    fn test_coverage() {
        assert!(approx_eq(gap(1, 4).coverage(), 0.75));
        assert!(approx_eq(gap(4, 4).coverage(), 0.0));
    }
}

mod scorer_tests {
    use super::*;

    #[test]
    fn test_keyword_penalty_weighting() {
        assert!(approx_eq(keyword_penalty(&gap(5, 10), 0.4), 0.2));
        assert!(approx_eq(keyword_penalty(&gap(10, 10), 0.4), 0.4));
        assert_eq!(keyword_penalty(&gap(0, 10), 0.4), 0.0);
    }

    #[test]
    fn test_zero_total_keywords_yields_zero_penalty() {
        assert_eq!(keyword_penalty(&gap(0, 0), 0.4), 0.0);
    }

    #[test]
    fn test_final_score_floored_at_zero() {
        assert_eq!(final_score(0.1, 0.4), 0.0);
        assert!(approx_eq(final_score(0.9, 0.1), 0.8));
    }

    #[test]
    fn test_final_score_monotonic_in_missing_count() {
        let config = ScoringConfig::default();
        for normalized in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let mut prev = f64::INFINITY;
            for missing in 0..=12 {
                let penalty = keyword_penalty(&gap(missing, 12), config.penalty_weight);
                let score = final_score(normalized, penalty);
                assert!(score <= prev, "missing={missing} raised the score");
                assert!(score >= 0.0);
                prev = score;
            }
        }
    }

    #[test]
    fn test_round_score_to_four_places() {
        assert_eq!(round_score(0.12346), 0.1235);
        assert_eq!(round_score(0.12344), 0.1234);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn test_scale_score() {
        assert_eq!(scale_score(1.0, 5.0), 5.0);
        assert_eq!(scale_score(0.5, 5.0), 2.5);
        assert_eq!(scale_score(0.0, 5.0), 0.0);
    }
}

mod label_tests {
    use super::*;

    #[test]
    fn test_label_tiers() {
        let t = LabelThresholds::default();
        assert_eq!(Label::from_score(1.0, &t), Label::Excellent);
        assert_eq!(Label::from_score(0.8, &t), Label::Excellent);
        assert_eq!(Label::from_score(0.7999, &t), Label::Fair);
        assert_eq!(Label::from_score(0.5, &t), Label::Fair);
        assert_eq!(Label::from_score(0.4999, &t), Label::NeedsImprovement);
        assert_eq!(Label::from_score(0.0, &t), Label::NeedsImprovement);
    }

    #[test]
    fn test_labels_monotonic_over_unit_interval() {
        let t = LabelThresholds::default();
        let rank = |label: Label| match label {
            Label::NeedsImprovement => 0,
            Label::Fair => 1,
            Label::Excellent => 2,
        };

        let mut prev = 0;
        for step in 0..=1000 {
            let r = rank(Label::from_score(step as f64 / 1000.0, &t));
            assert!(r >= prev);
            prev = r;
        }
    }

    #[test]
    fn test_label_display_and_feedback() {
        assert_eq!(Label::Excellent.to_string(), "Excellent");
        assert_eq!(Label::NeedsImprovement.to_string(), "Needs improvement");
        assert!(Label::Fair.feedback().starts_with("Fair"));
    }

    #[test]
    fn test_label_serde() {
        let json = serde_json::to_string(&Label::NeedsImprovement).unwrap();
        assert_eq!(json, "\"needs_improvement\"");
    }
}

mod breakdown_tests {
    use super::*;

    #[test]
    fn test_breakdown_perfect_answer() {
        let b = ScoreBreakdown::compute(1.0, &gap(0, 9), &ScoringConfig::default());

        assert_eq!(b.final_score, 1.0);
        assert_eq!(b.scaled_score, 5.0);
        assert_eq!(b.penalty, 0.0);
        assert_eq!(b.label, Label::Excellent);
    }

    #[test]
    fn test_breakdown_penalty_applied() {
        let b = ScoreBreakdown::compute(0.9, &gap(3, 12), &ScoringConfig::default());

        assert!(approx_eq(b.penalty, 0.1));
        assert!(approx_eq(b.final_score, 0.8));
        assert!(approx_eq(b.scaled_score, 4.0));
        assert_eq!(b.label, Label::Excellent);
    }

    #[test]
    fn test_breakdown_label_follows_rounded_score() {
        // 0.79996 rounds to 0.8 and must label as the top tier.
        let b = ScoreBreakdown::compute(0.79996, &gap(0, 1), &ScoringConfig::default());
        assert_eq!(b.final_score, 0.8);
        assert_eq!(b.scaled_score, 4.0);
        assert_eq!(b.label, Label::Excellent);
    }

    #[test]
    fn test_breakdown_custom_scale() {
        let config = ScoringConfig::default().with_scale_out_of(10.0);
        let b = ScoreBreakdown::compute(0.5, &gap(0, 1), &config);
        assert_eq!(b.scaled_score, 5.0);
        assert_eq!(b.scale_out_of, 10.0);
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.penalty_weight, 0.4);
        assert_eq!(config.bounds.manhattan_max, 100.0);
        assert_eq!(config.limits, TextLimits::default());
    }

    #[test]
    fn test_rejects_penalty_weight_out_of_range() {
        let err = ScoringConfig::default()
            .with_penalty_weight(1.5)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("penalty_weight"));
    }

    #[test]
    fn test_rejects_non_monotonic_thresholds() {
        assert!(ScoringConfig::default()
            .with_thresholds(0.5, 0.8)
            .validate()
            .is_err());
        assert!(ScoringConfig::default()
            .with_thresholds(0.6, 0.6)
            .validate()
            .is_err());
        assert!(ScoringConfig::default()
            .with_thresholds(1.2, 0.5)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_non_positive_bounds() {
        assert!(ScoringConfig::default()
            .with_bounds(0.0, 100.0)
            .validate()
            .is_err());
        assert!(ScoringConfig::default()
            .with_bounds(2.0, f64::INFINITY)
            .validate()
            .is_err());
        assert!(ScoringConfig::default()
            .with_scale_out_of(-5.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_rejects_zero_sentence_limit() {
        let limits = TextLimits {
            max_sentences: 0,
            ..Default::default()
        };
        assert!(ScoringConfig::default()
            .with_limits(limits)
            .validate()
            .is_err());
    }
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_method() -> impl Strategy<Value = SimilarityMethod> {
        prop::sample::select(SimilarityMethod::ALL.to_vec())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn prop_normalized_in_unit_interval(method in any_method(), raw in prop::num::f64::ANY) {
            let n = normalize(method, raw, &DistanceBounds::default());
            prop_assert!((0.0..=1.0).contains(&n), "{} raw={} normalized={}", method, raw, n);
        }

        #[test]
        fn prop_distance_past_bound_is_zero(excess in 0.0f64..1e6) {
            let bounds = DistanceBounds::default();
            let euclidean = normalize(SimilarityMethod::Euclidean, bounds.euclidean_max + excess, &bounds);
            let manhattan = normalize(SimilarityMethod::Manhattan, bounds.manhattan_max + excess, &bounds);
            prop_assert_eq!(euclidean, 0.0);
            prop_assert_eq!(manhattan, 0.0);
        }

        #[test]
        fn prop_more_missing_never_raises_score(
            normalized in 0.0f64..=1.0,
            total in 1usize..40,
            missing in 0usize..40,
            weight in 0.0f64..=1.0,
        ) {
            let missing = missing.min(total - 1);
            let fewer = final_score(normalized, keyword_penalty(&gap(missing, total), weight));
            let more = final_score(normalized, keyword_penalty(&gap(missing + 1, total), weight));
            prop_assert!(more <= fewer);
        }

        #[test]
        fn prop_final_score_non_negative(
            normalized in 0.0f64..=1.0,
            total in 0usize..40,
            missing in 0usize..40,
            weight in 0.0f64..=1.0,
        ) {
            let missing = missing.min(total);
            let score = final_score(normalized, keyword_penalty(&gap(missing, total), weight));
            prop_assert!(score >= 0.0);
        }

        #[test]
        fn prop_scaled_score_matches_final(normalized in 0.0f64..=1.0, missing in 0usize..10) {
            let config = ScoringConfig::default();
            let b = ScoreBreakdown::compute(normalized, &gap(missing, 10), &config);
            prop_assert_eq!(b.scaled_score, round_score(b.final_score * config.scale_out_of));
        }
    }
}

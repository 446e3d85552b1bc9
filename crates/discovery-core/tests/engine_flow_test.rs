//! End-to-end tests for the diagnostic flow: threshold behavior, help
//! idempotence, completion, restart and export.

use discovery_core::{
    Catalog, Confidence, DiagnosticEngine, Outcome, PlanEntry, export::NO_CONFIDENT_ANSWERS,
};
use discovery_test_utils::{activity, sample_activities, sample_engine, seven_steps, step};

fn names(activities: &[discovery_core::Activity]) -> Vec<&str> {
    activities.iter().map(|a| a.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Threshold
// ---------------------------------------------------------------------------

#[test]
fn advances_iff_confidence_at_least_three() {
    for rating in 1..=5u8 {
        let mut engine = sample_engine();
        let outcome = engine.submit_answer("a real answer", Some(rating));
        if rating >= 3 {
            assert!(
                matches!(outcome, Outcome::Advanced(ref s) if s.key == "understanding"),
                "rating {rating}: expected Advanced, got {outcome:?}"
            );
            assert_eq!(engine.current_index(), 1, "rating {rating}");
        } else {
            assert!(
                matches!(outcome, Outcome::NeedsHelp { .. }),
                "rating {rating}: expected NeedsHelp, got {outcome:?}"
            );
            assert_eq!(engine.current_index(), 0, "rating {rating}");
        }
    }
}

#[test]
fn failure_mid_flow_recommends_for_that_step() {
    let mut engine = sample_engine();
    engine.submit_answer("goal", Some(5));
    engine.submit_answer("problem", Some(4));
    let outcome = engine.submit_answer("not sure", Some(1));

    let Outcome::NeedsHelp {
        step_title,
        activities,
    } = outcome
    else {
        panic!("expected NeedsHelp");
    };
    assert_eq!(step_title, "Step 3");
    assert_eq!(names(&activities), vec!["framing drill", "Five Whys", "Retro"]);
    assert_eq!(engine.current_index(), 2);
    assert_eq!(engine.plan().len(), 3);
}

// ---------------------------------------------------------------------------
// Help idempotence
// ---------------------------------------------------------------------------

#[test]
fn repeated_help_keeps_one_failure_entry() {
    let mut engine = sample_engine();

    let first = engine.request_help();
    let plan_len = engine.plan().len();
    let first_recs = engine.last_recommendations().to_vec();

    let second = engine.request_help();
    assert_eq!(engine.plan().len(), plan_len);
    assert_eq!(engine.last_recommendations(), first_recs.as_slice());
    assert_eq!(first, second);

    let failures = engine.plan().iter().filter(|e| e.is_failure()).count();
    assert_eq!(failures, 1);
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[test]
fn seven_confident_answers_complete_the_flow() {
    let mut engine = sample_engine();
    for i in 0..7 {
        let outcome = engine.submit_answer(&format!("answer {i}"), Some(3 + (i % 3) as u8));
        if i < 6 {
            assert!(matches!(outcome, Outcome::Advanced(_)), "step {i}: {outcome:?}");
        } else {
            assert_eq!(outcome, Outcome::Completed);
        }
    }
    assert_eq!(engine.plan().len(), 7);
    assert!(engine.plan().iter().all(|e| e.confidence.is_rated()));
    assert!(engine.is_complete());
}

// ---------------------------------------------------------------------------
// Recommendation filter
// ---------------------------------------------------------------------------

#[test]
fn framing_failure_returns_matching_and_core_activities() {
    let mut engine = DiagnosticEngine::new(
        vec![step(1, "framing", "Framing The Problem")],
        vec![
            activity("A", "Framing"),
            activity("B", "Core Techniques"),
            activity("C", "Evaluating"),
        ],
    );
    let recs = engine.record_failure(0);
    assert_eq!(names(&recs), vec!["A", "B"]);
}

#[test]
fn unmatched_category_is_never_recommended() {
    let mut engine = sample_engine();
    for index in 0..engine.steps().len() {
        let recs = engine.record_failure(index);
        assert!(!names(&recs).contains(&"Orphan"));
    }
}

// ---------------------------------------------------------------------------
// Restart and export
// ---------------------------------------------------------------------------

#[test]
fn restart_export_matches_fresh_engine() {
    let fresh = sample_engine().export_plan();

    let mut engine = sample_engine();
    engine.submit_answer("goal", Some(4));
    engine.submit_answer("meh", Some(2));
    engine.request_help();
    engine.restart();

    let exported = engine.export_plan();
    assert_eq!(exported, fresh);
    assert!(exported.contains(NO_CONFIDENT_ANSWERS));
    assert!(!exported.contains("Recommended Activities"));
}

#[test]
fn export_contains_confident_answer() {
    let mut engine = DiagnosticEngine::new(
        vec![
            discovery_core::Step {
                order: 1,
                emoji: "🧭".to_string(),
                title: "Agreeing On Goals".to_string(),
                question: "Q".to_string(),
                key: "goals".to_string(),
            },
            step(2, "framing", "Framing The Problem"),
        ],
        sample_activities(),
    );
    engine.submit_answer("Ans", Some(4));
    assert_eq!(
        engine.plan(),
        &[PlanEntry {
            step_title: "Agreeing On Goals".to_string(),
            question: "Q".to_string(),
            answer: "Ans".to_string(),
            confidence: Confidence::Rated(4),
        }]
    );

    let text = engine.export_plan();
    assert!(text.contains("Agreeing On Goals"));
    assert!(text.contains("Ans"));
    assert!(text.contains('4'));
    assert!(!text.contains("Recommended Activities"));
}

#[test]
fn export_is_pure() {
    let mut engine = sample_engine();
    engine.submit_answer("goal", Some(4));
    engine.request_help();
    let before = engine.plan().to_vec();
    let a = engine.export_plan();
    let b = engine.export_plan();
    assert_eq!(a, b);
    assert_eq!(engine.plan(), before.as_slice());
    assert!(a.contains("Recommended Activities for \"Step 2\""));
}

#[test]
fn builtin_catalog_drives_a_full_run() {
    let mut engine = DiagnosticEngine::from_catalog(Catalog::builtin());
    assert_eq!(engine.steps(), Catalog::builtin().steps());
    let outcome = engine.request_help();
    let Outcome::NeedsHelp {
        step_title,
        activities,
    } = outcome
    else {
        panic!("expected NeedsHelp");
    };
    assert_eq!(step_title, "Agreeing On Goals");
    assert!(activities.iter().any(|a| a.category == "Goals"));
    assert!(activities.iter().any(|a| a.category == "Core Techniques"));
    assert!(activities.iter().any(|a| a.category == "Discussions"));
    assert!(activities.iter().all(|a| a.category != "Testing"));

    engine.restart();
    for _ in seven_steps() {
        engine.submit_answer("yes", Some(5));
    }
    assert!(engine.is_complete());
}

//! Recommendation Journey Tests
//!
//! A student seeds the campus store and searches it the way the app does:
//! free text in, four ranked lists out.

use collabup_core::{Query, RecommendationResult, Recommender, RecordType};
use collabup_e2e_tests::TestDatabaseManager;

fn recommend(db: &TestDatabaseManager, query: &str, top_n: usize) -> RecommendationResult {
    Recommender::default()
        .recommend(&Query::new(query, top_n), db.storage.as_ref())
        .expect("recommend should succeed")
}

fn ranked(result: &RecommendationResult, record_type: RecordType) -> Vec<(&str, f64)> {
    result
        .get(record_type)
        .iter()
        .map(|hit| (hit.record.id.as_str(), hit.similarity_score))
        .collect()
}

// ============================================================================
// RANKINGS
// ============================================================================

#[test]
fn test_location_and_skill_query() {
    let db = TestDatabaseManager::new_seeded();
    let result = recommend(&db, "python, bangalore", 5);

    assert_eq!(
        ranked(&result, RecordType::StudentProjects),
        [
            ("p1", 2.7176470588235295),
            ("p2", 0.6618803418803421),
            ("p3", 0.6490497737556563)
        ]
    );
    assert_eq!(
        ranked(&result, RecordType::StartupProjects),
        [
            ("s2", 2.589230769230769),
            ("s3", 1.736842105263158),
            ("s1", 0.9354621848739496)
        ]
    );
    assert_eq!(
        ranked(&result, RecordType::MentorProfiles),
        [("m1", 3.6520000000000006), ("m2", 0.7972649572649574)]
    );
    assert_eq!(
        ranked(&result, RecordType::ResearchProjects),
        [("f2", 1.785882352941177), ("f1", 0.8134453781512606)]
    );
}

#[test]
fn test_mixed_delimiters() {
    let db = TestDatabaseManager::new_seeded();
    let result = recommend(&db, "machine learning; fintech", 5);

    let mentors = ranked(&result, RecordType::MentorProfiles);
    assert_eq!(mentors, [("m1", 6.221217391304349), ("m2", 4.8048)]);

    let projects: Vec<_> = ranked(&result, RecordType::StudentProjects)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    assert_eq!(projects, ["p3", "p1", "p2"]);

    assert_eq!(result.research_projects[0].record.id, "f2");
    assert_eq!(result.research_projects[0].similarity_score, 4.092);
}

#[test]
fn test_single_term_gets_affinity_but_no_multi_term_boost() {
    let db = TestDatabaseManager::new_seeded();
    let result = recommend(&db, "Fintech", 5);

    // skills term: boosted for projects and mentors, not for startups or faculty
    assert_eq!(result.student_projects[0].similarity_score, 3.0);
    assert_eq!(result.startup_projects[0].similarity_score, 2.5);
    assert_eq!(result.mentor_profiles[0].record.id, "m2");
    assert_eq!(result.mentor_profiles[0].similarity_score, 3.5999999999999996);
    assert_eq!(result.research_projects[0].similarity_score, 3.0);
}

#[test]
fn test_typo_still_matches() {
    let db = TestDatabaseManager::new_seeded();
    let result = recommend(&db, "pyhton", 5);

    assert_eq!(result.mentor_profiles[0].record.id, "m1");
    assert_eq!(result.mentor_profiles[0].similarity_score, 1.0);
    assert_eq!(result.student_projects[0].similarity_score, 0.6666666666666667);
}

#[test]
fn test_results_carry_record_fields() {
    let db = TestDatabaseManager::new_seeded();
    let result = recommend(&db, "computer vision", 5);

    let top = &result.research_projects[0];
    assert_eq!(top.record.id, "f1");
    assert_eq!(top.similarity_score, 5.280000000000001);

    let json = serde_json::to_value(top).unwrap();
    assert_eq!(json["id"], "f1");
    assert_eq!(json["institute"], "IIT Bombay");
    assert_eq!(json["researchAreas"][0], "Computer Vision");
    assert_eq!(json["similarity_score"], 5.280000000000001);
}

// ============================================================================
// LIMITS
// ============================================================================

#[test]
fn test_top_n_truncates_each_type() {
    let db = TestDatabaseManager::new_seeded();
    let result = recommend(&db, "python, bangalore", 1);

    for record_type in RecordType::ALL {
        assert_eq!(result.get(record_type).len(), 1, "{record_type}");
    }
    assert_eq!(result.startup_projects[0].record.id, "s2");
}

#[test]
fn test_top_n_zero_returns_nothing() {
    let db = TestDatabaseManager::new_seeded();
    assert!(recommend(&db, "python, bangalore", 0).is_empty());
}

#[test]
fn test_query_without_usable_terms() {
    let db = TestDatabaseManager::new_seeded();
    for query in ["", "   ", "a b c", ",;,"] {
        assert!(recommend(&db, query, 5).is_empty(), "{query:?}");
    }
}

#[test]
fn test_empty_store_returns_empty_lists() {
    let db = TestDatabaseManager::new_temp();
    let result = recommend(&db, "python, bangalore", 5);
    assert!(result.is_empty());
}

//! Integration tests for the candidate ranker

use candidate_ranker::config::{Config, OutputFormat};
use candidate_ranker::input::InputManager;
use candidate_ranker::output::formatter::{save_report_to_file, ReportGenerator};
use candidate_ranker::output::report::RankingReport;
use candidate_ranker::{
    qualification_score, round_to_cents, skill_match_score, Candidate, CategoryTable, FitScorer,
    RankerError, Ranker, Requirement, ShortlistPolicy,
};
use std::path::Path;
use tempfile::TempDir;

fn load_students() -> (Vec<Candidate>, Requirement) {
    let manager = InputManager::default();
    let pool = manager
        .load_candidates(Path::new("tests/fixtures/students.json"))
        .unwrap();
    let requirement = manager
        .load_requirement(Path::new("tests/fixtures/requirement.json"))
        .unwrap();
    (pool, requirement)
}

fn ids(ranked: &[candidate_ranker::ScoredCandidate<'_>]) -> Vec<String> {
    ranked.iter().map(|s| s.candidate.id.clone()).collect()
}

#[test]
fn test_load_json_pool_with_legacy_field_names() {
    let (pool, requirement) = load_students();
    assert_eq!(pool.len(), 10);
    assert_eq!(pool[0].id, "1");
    assert_eq!(pool[0].category, "Computer Science");
    assert_eq!(requirement.company.as_deref(), Some("Acme Analytics"));
    assert_eq!(requirement.min_qualification, 7.0);
    assert_eq!(requirement.category_preference(), Some("Computer Science"));
}

#[test]
fn test_rank_student_pool() {
    let (pool, requirement) = load_students();
    let ranked = Ranker::default().rank(&pool, &requirement);

    assert_eq!(
        ids(&ranked),
        vec!["1", "7", "10", "3", "5", "6", "9", "2", "4", "8"]
    );
    assert_eq!(ranked[0].fit_score, 80.83);
    assert_eq!(ranked[2].fit_score, 66.04);
    for pair in ranked.windows(2) {
        assert!(pair[0].fit_score >= pair[1].fit_score);
    }
}

#[test]
fn test_shortlist_requires_skill_overlap() {
    let (pool, requirement) = load_students();
    let ranked = Ranker::default().rank(&pool, &requirement);
    let shortlist = ShortlistPolicy::default().apply(&ranked);

    assert_eq!(ids(&shortlist), vec!["1", "7", "10", "3", "5", "6"]);
    // "graphql" does not contain "sql", so Arjun has no overlap at all
    assert!(!shortlist.iter().any(|s| s.candidate.id == "9"));
    // Anjali only reaches the list through "mysql" containing "sql"
    let anjali = shortlist.iter().find(|s| s.candidate.id == "6").unwrap();
    assert!((anjali.skill_score - 50.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_ranking_is_reproducible() {
    let (pool, requirement) = load_students();
    let ranker = Config::default().ranker();
    let first = ranker.rank(&pool, &requirement);
    let second = ranker.rank(&pool, &requirement);
    assert_eq!(first, second);
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.fit_score.to_bits(), b.fit_score.to_bits());
    }
}

#[test]
fn test_toml_inputs() {
    let manager = InputManager::default();
    let pool = manager
        .load_candidates(Path::new("tests/fixtures/candidates.toml"))
        .unwrap();
    let requirement = manager
        .load_requirement(Path::new("tests/fixtures/requirement.toml"))
        .unwrap();
    assert_eq!(pool.len(), 4);
    assert_eq!(requirement.id.as_deref(), Some("job-42"));

    let ranked = Ranker::default().rank(&pool, &requirement);
    assert_eq!(ids(&ranked), vec!["s04", "s03", "s01", "s02"]);

    let top = &ranked[0];
    assert_eq!(top.skill_score, 100.0);
    // 50 + 68.75 * 0.3 + 70 * 0.2
    assert!((top.fit_score - 84.625).abs() <= 0.005 + 1e-9);
}

#[test]
fn test_single_letter_skill_partially_matches_longer_tokens() {
    // "c" is contained in "machine learning", so it earns partial credit
    let score = skill_match_score("Python, Machine Learning", "c");
    assert_eq!(score, 50.0);
}

#[test]
fn test_unsupported_file_type() {
    let manager = InputManager::default();
    let result = manager.load_candidates(Path::new("tests/fixtures/unsupported.xyz"));
    assert!(matches!(result, Err(RankerError::UnsupportedFormat(_))));
}

#[test]
fn test_nonexistent_file() {
    let manager = InputManager::default();
    let result = manager.load_candidates(Path::new("tests/fixtures/nonexistent.json"));
    assert!(matches!(result, Err(RankerError::InvalidInput(_))));
}

#[test]
fn test_out_of_scale_qualification_fails_at_boundary() {
    let manager = InputManager::default();
    let result = manager.load_candidates(Path::new("tests/fixtures/out_of_scale.json"));
    assert!(matches!(result, Err(RankerError::Validation { .. })));

    // the same record is accepted on a wider scale
    let manager = InputManager::new(20.0);
    assert!(manager
        .load_candidates(Path::new("tests/fixtures/out_of_scale.json"))
        .is_ok());
}

#[test]
fn test_duplicate_identifiers_rejected() {
    let manager = InputManager::default();
    let result = manager.load_candidates(Path::new("tests/fixtures/duplicate_ids.json"));
    assert!(matches!(result, Err(RankerError::Validation { .. })));
}

#[test]
fn test_malformed_record_names_position_and_field() {
    let manager = InputManager::default();
    let err = manager
        .load_candidates(Path::new("tests/fixtures/non_numeric_qualification.json"))
        .unwrap_err();
    match err {
        RankerError::Validation { field, reason } => {
            assert_eq!(field, "candidates[1]");
            assert!(reason.contains("qualification must be a number"), "{}", reason);
            assert!(reason.contains("nine"), "{}", reason);
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_malformed_toml_record_names_position_and_field() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pool.toml");
    std::fs::write(
        &path,
        "[[candidates]]\nid = \"s01\"\nqualification = \"high\"\n",
    )
    .unwrap();

    let err = InputManager::default().load_candidates(&path).unwrap_err();
    match err {
        RankerError::Validation { field, reason } => {
            assert_eq!(field, "candidates[0]");
            assert!(reason.contains("qualification must be a number"), "{}", reason);
        }
        other => panic!("expected a validation error, got {:?}", other),
    }
}

#[test]
fn test_pool_without_candidates_array_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pool.json");
    std::fs::write(&path, r#"{"students": []}"#).unwrap();

    let result = InputManager::default().load_candidates(&path);
    assert!(matches!(result, Err(RankerError::InvalidInput(_))));
}

#[test]
fn test_reference_scenarios() {
    let scorer = FitScorer::default();

    // skills 2/3 exact, qualification 9 over a 7 minimum, no category preference
    let candidate = Candidate::new("s", "Python, Django, SQL", 9.0, "Computer Science");
    let requirement = Requirement::new("python, sql, aws", 7.0);
    let score = scorer.score(&candidate, &requirement);
    assert!((score.skill_score - 66.67).abs() < 0.01);
    assert_eq!(
        score.fit_score,
        round_to_cents(score.skill_score * 0.5 + (50.0 + 100.0 / 3.0) * 0.3 + 100.0 * 0.2)
    );
    assert_eq!(score.fit_score, 78.33);

    // below the minimum only skills and category contribute
    let below = Candidate::new("s", "Python, Django, SQL", 5.0, "Computer Science");
    let score = scorer.score(&below, &requirement);
    assert_eq!(
        score.fit_score,
        round_to_cents(score.skill_score * 0.5 + 100.0 * 0.2)
    );

    // related categories
    let table = CategoryTable::default();
    assert_eq!(table.affinity("Electronics", Some("Electrical")), 70.0);
}

#[test]
fn test_scores_stay_in_bounds_across_inputs() {
    let scorer = FitScorer::default();
    let skill_lists = ["", "python", "Python, SQL, AWS", "java, javascript", " , c ,"];
    let categories = ["", "Computer Science", "Electronics", "Mechanical", "Arts"];
    let metrics = [0.0, 5.0, 7.0, 9.99, 10.0];

    for required in skill_lists {
        for preferred in categories {
            for threshold in metrics {
                let requirement =
                    Requirement::new(required, threshold).with_preferred_category(preferred);
                for skills in skill_lists {
                    for metric in metrics {
                        let candidate = Candidate::new("c", skills, metric, "Electrical");
                        let breakdown = scorer.breakdown(&candidate, &requirement);
                        assert!((0.0..=100.0).contains(&breakdown.fit_score));
                        assert!((0.0..=100.0).contains(&breakdown.skill_score));
                        assert!([0.0, 70.0, 100.0].contains(&breakdown.category_score));
                        if parse_is_empty(required) {
                            assert_eq!(breakdown.skill_score, 100.0);
                        }
                        if metric < threshold {
                            assert_eq!(breakdown.qualification_score, 0.0);
                        }
                        if metric == threshold && threshold < 10.0 {
                            assert_eq!(breakdown.qualification_score, 50.0);
                        }
                    }
                }
            }
        }
    }

    assert_eq!(qualification_score(10.0, 10.0, 10.0), 100.0);
}

fn parse_is_empty(list: &str) -> bool {
    list.split(',').all(|token| token.trim().is_empty())
}

#[test]
fn test_config_category_groups_change_scores() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[categories]\nrelated_groups = [[\"Computer Science\", \"Electronics\"]]\n",
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    let candidate = Candidate::new("s", "python", 8.0, "Electronics");
    let requirement =
        Requirement::new("python", 7.0).with_preferred_category("Computer Science");

    let default_fit = FitScorer::default().score(&candidate, &requirement).fit_score;
    let custom_fit = config.fit_scorer().score(&candidate, &requirement).fit_score;
    assert!((custom_fit - default_fit - 70.0 * 0.2).abs() < 0.011);
}

#[test]
fn test_report_saved_as_csv() {
    let (pool, requirement) = load_students();
    let ranker = Ranker::default();
    let ranked = ranker.rank(&pool, &requirement);
    let policy = ShortlistPolicy::default();
    let report =
        RankingReport::from_ranking(&requirement, &ranked, Some(&policy), ranker.scorer(), false);

    let rendered = ReportGenerator::with_options(false, false, true, false)
        .generate_report(&report, &OutputFormat::Csv)
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out").join("shortlist.csv");
    save_report_to_file(&rendered, &path).unwrap();

    let saved = std::fs::read_to_string(&path).unwrap();
    assert_eq!(saved.lines().count(), 1 + 6);
    assert!(saved
        .lines()
        .nth(1)
        .unwrap()
        .starts_with("Rahul Sharma,rahul.sharma@university.edu,+1-555-0101,Computer Science,9.5,"));
}

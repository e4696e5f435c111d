mod common;

use std::collections::HashSet;

use cardmarathon::db::models::Difficulty;
use cardmarathon::db::Db;
use common::create_test_db;

async fn seed_category(db: &Db, username: &str, category: &str, count: usize) {
    let difficulties = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
    for i in 0..count {
        db.create_flashcard(
            username,
            &format!("{category} question {i}"),
            &format!("{category} answer {i}"),
            category,
            difficulties[i % 3],
            false,
        )
        .await
        .unwrap();
    }
}

#[tokio::test]
async fn test_generated_quiz_stays_inside_category_and_owner() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 8).await;
    seed_category(&db, "u1", "History", 8).await;
    seed_category(&db, "u2", "Biology", 8).await;

    let quizzes = db
        .generate_quizzes("u1", &["Biology".to_string()], 4)
        .await
        .unwrap();

    assert_eq!(quizzes.len(), 1);
    let quiz = &quizzes[0];
    assert_eq!(quiz.categories, vec!["Biology".to_string()]);
    for card in &quiz.flashcards {
        assert_eq!(card.username, "u1", "card {} leaked another owner", card.id);
        assert_eq!(card.category, "Biology");
    }
}

#[tokio::test]
async fn test_generated_quiz_has_distinct_cards_and_bounded_size() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 10).await;

    // Generation is randomized; check the invariants over several draws
    for _ in 0..20 {
        let quizzes = db
            .generate_quizzes("u1", &["Biology".to_string()], 4)
            .await
            .unwrap();
        let quiz = &quizzes[0];

        assert!(
            (4..=10).contains(&quiz.flashcards.len()),
            "quiz size {} out of range",
            quiz.flashcards.len()
        );

        let unique: HashSet<&str> = quiz.flashcards.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            unique.len(),
            quiz.flashcards.len(),
            "quiz contains duplicate flashcards"
        );
    }
}

#[tokio::test]
async fn test_difficulty_levels_are_sorted_and_distinct() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 9).await;

    for _ in 0..10 {
        let quizzes = db
            .generate_quizzes("u1", &["Biology".to_string()], 4)
            .await
            .unwrap();
        let levels = &quizzes[0].difficulty_levels;

        assert!(!levels.is_empty());
        assert!(
            levels.windows(2).all(|w| w[0] < w[1]),
            "difficulty levels not in Easy < Medium < Hard order: {levels:?}"
        );

        let expected: HashSet<Difficulty> = quizzes[0]
            .flashcards
            .iter()
            .map(|c| c.difficulty_level)
            .collect();
        assert_eq!(levels.len(), expected.len());
    }
}

#[tokio::test]
async fn test_insufficient_pool_fails_whole_request() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 2).await;

    let result = db.generate_quizzes("u1", &["Biology".to_string()], 5).await;

    let err = result.unwrap_err();
    assert!(
        err.to_string().contains("enough flashcards"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_one_small_category_aborts_all_quizzes() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 8).await;
    seed_category(&db, "u1", "History", 2).await;

    let result = db
        .generate_quizzes(
            "u1",
            &["Biology".to_string(), "History".to_string()],
            4,
        )
        .await;

    assert!(
        result.is_err(),
        "a single undersized category must abort the request"
    );
}

#[tokio::test]
async fn test_at_most_four_categories_are_used() {
    let db = create_test_db().await;
    for category in ["A", "B", "C", "D", "E"] {
        seed_category(&db, "u1", category, 5).await;
    }

    let categories: Vec<String> = ["A", "B", "C", "D", "E"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let quizzes = db.generate_quizzes("u1", &categories, 4).await.unwrap();

    assert_eq!(quizzes.len(), 4, "only the first four categories count");
    assert_eq!(quizzes[0].title, "Quiz 1");
    assert_eq!(quizzes[3].title, "Quiz 4");
}

#[tokio::test]
async fn test_generation_persists_nothing() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 6).await;

    let quizzes = db
        .generate_quizzes("u1", &["Biology".to_string()], 4)
        .await
        .unwrap();

    assert_eq!(
        db.quiz_record_count(&quizzes[0].id).await.unwrap(),
        0,
        "ad-hoc quizzes are only recorded at submission time"
    );
}

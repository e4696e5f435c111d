mod common;

use std::collections::HashSet;

use cardmarathon::db::models::{Difficulty, DidQuiz};
use cardmarathon::db::Db;
use cardmarathon::models::{SubmitQuizBody, SubmittedFlashcard};
use chrono::{Duration, NaiveDate};
use common::create_test_db;

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

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

async fn submit_day(db: &Db, username: &str, marathon_id: &str, quiz_id: &str) {
    let start = start_date().and_hms_opt(9, 0, 0).unwrap();
    let cards = db.quiz_flashcards(quiz_id).await.unwrap();
    db.submit_quiz(
        username,
        &SubmitQuizBody {
            quiz_id: quiz_id.to_string(),
            marathon_id: Some(marathon_id.to_string()),
            flashcards: cards
                .iter()
                .map(|card| SubmittedFlashcard {
                    id: card.id.clone(),
                    question: None,
                    answer: None,
                })
                .collect(),
            start_date: Some(start),
            end_date: Some(start + Duration::minutes(10)),
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_marathon_partitions_pool_evenly() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 6).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap();

    let days = db.marathon_days(&marathon_id).await.unwrap();
    assert_eq!(days.len(), 3);

    let mut seen_cards = HashSet::new();
    let mut record_total = 0;
    for (i, day) in days.iter().enumerate() {
        assert_eq!(day.day_index, i as i64, "day indexes must be contiguous");
        assert_eq!(day.total_days, 3);
        assert_eq!(day.start_date, start_date());
        assert!(!day.completed);

        let cards = db.quiz_flashcards(&day.quiz_id).await.unwrap();
        assert_eq!(cards.len(), 2, "6 cards over 3 days is 2 per day");
        record_total += db.quiz_record_count(&day.quiz_id).await.unwrap();

        for card in cards {
            assert!(
                seen_cards.insert(card.id.clone()),
                "card {} assigned to two days",
                card.id
            );
        }
    }

    assert_eq!(record_total, 6);
    assert_eq!(seen_cards.len(), 6, "no leftover with an even division");
}

#[tokio::test]
async fn test_marathon_uneven_division_leaves_remainder_unassigned() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 7).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap();

    let days = db.marathon_days(&marathon_id).await.unwrap();
    let mut assigned = HashSet::new();
    for day in &days {
        for card in db.quiz_flashcards(&day.quiz_id).await.unwrap() {
            assigned.insert(card.id);
        }
    }

    assert_eq!(assigned.len(), 6, "floor(7 / 3) = 2 cards per day, 1 spare");
}

#[tokio::test]
async fn test_marathon_rejects_undersized_pool() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 2).await;

    let err = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap_err();
    assert!(
        err.to_string().contains("enough flashcards"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_due_quiz_day_zero_then_done_after_submission() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 6).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap();
    let days = db.marathon_days(&marathon_id).await.unwrap();

    let due = db
        .due_quiz(&marathon_id, start_date())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(due.quiz_id, days[0].quiz_id, "day 0 is due on the start date");
    assert_eq!(due.did_quiz, DidQuiz::NotDone);
    assert_eq!(due.flashcards.len(), 2);

    submit_day(&db, "u1", &marathon_id, &due.quiz_id).await;

    // Same calendar day, the quiz is still retrievable but reads as done
    let due = db
        .due_quiz(&marathon_id, start_date())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(due.quiz_id, days[0].quiz_id);
    assert_eq!(due.did_quiz, DidQuiz::Done);
}

#[tokio::test]
async fn test_due_quiz_advances_by_wall_clock_not_submissions() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 6).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap();
    let days = db.marathon_days(&marathon_id).await.unwrap();

    // Day 1 is due the next day even though day 0 was never submitted
    let due = db
        .due_quiz(&marathon_id, start_date() + Duration::days(1))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(due.quiz_id, days[1].quiz_id);
    assert_eq!(due.did_quiz, DidQuiz::NotDone);
}

#[tokio::test]
async fn test_completed_plan_expires_past_last_day() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 6).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap();
    let days = db.marathon_days(&marathon_id).await.unwrap();

    submit_day(&db, "u1", &marathon_id, &days[2].quiz_id).await;

    // Exactly total_days past the start, the completed plan expires
    let due = db
        .due_quiz(&marathon_id, start_date() + Duration::days(3))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(due.did_quiz, DidQuiz::Expired);

    // The expiry tore down every row of the plan
    assert!(db
        .due_quiz(&marathon_id, start_date() + Duration::days(3))
        .await
        .unwrap()
        .is_none());
    assert!(db.marathon_days(&marathon_id).await.unwrap().is_empty());
    for day in &days {
        assert_eq!(db.quiz_record_count(&day.quiz_id).await.unwrap(), 0);
    }
}

#[tokio::test]
async fn test_unfinished_plan_keeps_serving_last_day() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 6).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 3, start_date())
        .await
        .unwrap();
    let days = db.marathon_days(&marathon_id).await.unwrap();

    // Way past the end, but the last day was never submitted
    let due = db
        .due_quiz(&marathon_id, start_date() + Duration::days(10))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(due.quiz_id, days[2].quiz_id);
    assert_eq!(due.did_quiz, DidQuiz::NotDone);

    // The plan is still intact
    assert_eq!(db.marathon_days(&marathon_id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_due_quiz_unknown_marathon() {
    let db = create_test_db().await;
    assert!(db
        .due_quiz("no-such-marathon", start_date())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_submission_with_unknown_marathon_day_is_soft() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 3).await;
    let cards = db.list_flashcards("u1", None, None).await.unwrap();

    // A marathon id that matches nothing: submission still succeeds
    db.submit_quiz(
        "u1",
        &SubmitQuizBody {
            quiz_id: "orphan-quiz".to_string(),
            marathon_id: Some("no-such-marathon".to_string()),
            flashcards: vec![SubmittedFlashcard {
                id: cards[0].id.clone(),
                question: None,
                answer: None,
            }],
            start_date: None,
            end_date: None,
        },
    )
    .await
    .expect("missing marathon day must not fail the submission");

    assert_eq!(db.quiz_record_count("orphan-quiz").await.unwrap(), 1);
}

#[tokio::test]
async fn test_marathon_single_day_takes_whole_pool() {
    let db = create_test_db().await;
    seed_category(&db, "u1", "Biology", 5).await;

    let marathon_id = db
        .create_marathon("u1", "Biology", 1, start_date())
        .await
        .unwrap();

    let days = db.marathon_days(&marathon_id).await.unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(db.quiz_flashcards(&days[0].quiz_id).await.unwrap().len(), 5);
}

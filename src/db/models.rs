// Database model structs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Flashcard difficulty. The declaration order is the canonical sort order
/// used everywhere a set of difficulties is reported.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Flashcard {
    pub id: String,
    pub username: String,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty_level: Difficulty,
    pub is_auto: bool,
}

#[derive(Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub username: String,
    pub fname: Option<String>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct QuizRecord {
    pub quiz_id: String,
    pub flashcard_id: String,
    pub difficulty_level: Option<Difficulty>,
    pub username: String,
    pub category: Option<String>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct MarathonDay {
    pub marathon_id: String,
    pub quiz_id: String,
    pub username: String,
    pub category: String,
    pub day_index: i64,
    pub total_days: i64,
    pub start_date: NaiveDate,
    pub completed: bool,
}

/// Completion state of a marathon day, reported as 0/1/2 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DidQuiz {
    NotDone = 0,
    Done = 1,
    Expired = 2,
}

impl Serialize for DidQuiz {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Serialize)]
pub struct DueQuiz {
    pub quiz_id: String,
    pub flashcards: Vec<Flashcard>,
    pub did_quiz: DidQuiz,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CategoryEasyCount {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct CategoryDifficultyRow {
    pub category: String,
    pub easy: i64,
    pub medium: i64,
    pub hard: i64,
}

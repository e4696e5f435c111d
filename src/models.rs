use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::models::{CategoryDifficultyRow, CategoryEasyCount, Difficulty, Flashcard};

#[derive(Deserialize)]
pub struct FlashcardQuery {
    pub category: Option<String>,
    pub difficulty_level: Option<Difficulty>,
}

#[derive(Deserialize)]
pub struct CreateFlashcardBody {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty_level: Difficulty,
}

#[derive(Deserialize)]
pub struct UpdateFlashcardBody {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<String>,
    pub difficulty_level: Option<Difficulty>,
}

#[derive(Deserialize)]
pub struct GenerateQuizzesBody {
    pub categories: Vec<String>,
}

/// An ad-hoc quiz as handed to the client. Nothing is stored for it until
/// the attempt comes back through submission.
#[derive(Debug, Serialize)]
pub struct GeneratedQuiz {
    pub id: String,
    pub title: String,
    pub categories: Vec<String>,
    pub flashcards: Vec<Flashcard>,
    pub difficulty_levels: Vec<Difficulty>,
}

#[derive(Deserialize)]
pub struct GenerateMarathonBody {
    pub category: String,
    pub total_days: i64,
}

#[derive(Deserialize)]
pub struct SubmittedFlashcard {
    pub id: String,
    pub question: Option<String>,
    pub answer: Option<String>,
}

#[derive(Deserialize)]
pub struct SubmitQuizBody {
    pub quiz_id: String,
    pub marathon_id: Option<String>,
    pub flashcards: Vec<SubmittedFlashcard>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

/// The five usage-analytics entries, serialized as a 5-element array:
/// preferred study time, Easy-count per category, difficulty distribution,
/// per-category difficulty breakdown, average quiz duration.
#[derive(Serialize)]
pub struct StatsResponse(
    pub String,
    pub Vec<CategoryEasyCount>,
    pub [i64; 3],
    pub Vec<CategoryDifficultyRow>,
    pub String,
);

#[derive(Deserialize)]
pub struct RegisterBody {
    pub username: String,
    pub password: String,
    pub fname: String,
    pub lname: String,
}

#[derive(Deserialize)]
pub struct LoginBody {
    pub username: String,
    pub password: String,
}

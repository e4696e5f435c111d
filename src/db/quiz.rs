use std::collections::BTreeSet;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ulid::Ulid;

use super::models::Difficulty;
use super::Db;
use crate::models::{GeneratedQuiz, SubmitQuizBody};
use crate::{names, sampling};

impl Db {
    /// Build one ad-hoc quiz per requested category (at most
    /// [`names::MAX_QUIZ_CATEGORIES`] of them). Every category must hold at
    /// least `min_pool` of the user's cards or the whole request fails; no
    /// partial result is returned. Nothing is persisted until the quiz is
    /// submitted.
    pub async fn generate_quizzes(
        &self,
        username: &str,
        categories: &[String],
        min_pool: usize,
    ) -> Result<Vec<GeneratedQuiz>> {
        let mut rng = StdRng::seed_from_u64(rand::random());
        let mut quizzes = Vec::new();

        for (i, category) in categories
            .iter()
            .take(names::MAX_QUIZ_CATEGORIES)
            .enumerate()
        {
            let pool = self
                .list_flashcards(username, Some(category.as_str()), None)
                .await?;

            if pool.len() < min_pool {
                return Err(eyre!(
                    "category '{category}' doesn't have enough flashcards for a quiz"
                ));
            }

            // Quiz size varies per draw, but never past the pool
            let count = rng.gen_range(min_pool..=pool.len());
            let indices = sampling::sample_distinct(&mut rng, pool.len(), count)?;

            let flashcards: Vec<_> = indices.iter().map(|&idx| pool[idx].clone()).collect();
            let difficulty_levels: BTreeSet<_> =
                flashcards.iter().map(|card| card.difficulty_level).collect();

            quizzes.push(GeneratedQuiz {
                id: Ulid::new().to_string(),
                title: format!("Quiz {}", i + 1),
                categories: vec![category.clone()],
                flashcards,
                difficulty_levels: difficulty_levels.into_iter().collect(),
            });
        }

        tracing::info!("generated {} quizzes for user: {username}", quizzes.len());
        Ok(quizzes)
    }

    pub async fn quiz_record_count(&self, quiz_id: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM quiz_records WHERE quiz_id = $1")
            .bind(quiz_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Record a finished quiz attempt: one quiz_record row per submitted
    /// card, stamped with the attempt's start and end times. Cards the
    /// system auto-generated may be re-saved with edited content as part of
    /// the submission. When the attempt belongs to a marathon, the matching
    /// day is marked completed; a missing day row is only worth a warning.
    pub async fn submit_quiz(&self, username: &str, submission: &SubmitQuizBody) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for submitted in &submission.flashcards {
            let stored = sqlx::query_as::<_, (String, Difficulty, bool)>(
                "SELECT category, difficulty_level, is_auto FROM flashcards WHERE id = $1",
            )
            .bind(&submitted.id)
            .fetch_optional(&mut *tx)
            .await?;

            let Some((category, difficulty, is_auto)) = stored else {
                tracing::warn!(
                    "submission for quiz {} references unknown flashcard {}",
                    submission.quiz_id,
                    submitted.id
                );
                continue;
            };

            sqlx::query(
                r#"
                INSERT INTO quiz_records
                    (quiz_id, flashcard_id, difficulty_level, username, category, start_date, end_date)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (quiz_id, flashcard_id) DO UPDATE SET
                    difficulty_level = excluded.difficulty_level,
                    start_date = excluded.start_date,
                    end_date = excluded.end_date
                "#,
            )
            .bind(&submission.quiz_id)
            .bind(&submitted.id)
            .bind(difficulty)
            .bind(username)
            .bind(&category)
            .bind(submission.start_date)
            .bind(submission.end_date)
            .execute(&mut *tx)
            .await?;

            if is_auto {
                if let (Some(question), Some(answer)) = (&submitted.question, &submitted.answer) {
                    sqlx::query("UPDATE flashcards SET question = $1, answer = $2 WHERE id = $3")
                        .bind(question)
                        .bind(answer)
                        .bind(&submitted.id)
                        .execute(&mut *tx)
                        .await?;
                }
            }
        }

        if let Some(marathon_id) = &submission.marathon_id {
            let marked =
                Self::mark_day_completed_tx(&mut tx, marathon_id, &submission.quiz_id).await?;
            if !marked {
                tracing::warn!(
                    "no marathon day matches marathon {marathon_id} and quiz {}",
                    submission.quiz_id
                );
            }
        }

        tx.commit().await?;

        tracing::info!("quiz {} submitted by user: {username}", submission.quiz_id);
        Ok(())
    }
}

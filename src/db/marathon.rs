use chrono::NaiveDate;
use color_eyre::eyre::{eyre, OptionExt};
use color_eyre::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ulid::Ulid;

use super::models::{DidQuiz, DueQuiz, Flashcard, MarathonDay};
use super::Db;
use crate::sampling;

impl Db {
    /// Create a multi-day study plan over one category: the user's pool is
    /// partitioned into `total_days` disjoint daily quizzes of
    /// `pool / total_days` cards each, all persisted atomically under a
    /// single marathon id and a single start date. Leftover cards from an
    /// uneven division belong to no day.
    ///
    /// Returns the new marathon id.
    pub async fn create_marathon(
        &self,
        username: &str,
        category: &str,
        total_days: i64,
        start_date: NaiveDate,
    ) -> Result<String> {
        if total_days < 1 {
            return Err(eyre!("a marathon needs at least one day"));
        }

        let pool = self.list_flashcards(username, Some(category), None).await?;
        if (pool.len() as i64) < total_days {
            return Err(eyre!(
                "category '{category}' doesn't have enough flashcards for a {total_days}-day marathon"
            ));
        }

        let mut rng = StdRng::seed_from_u64(rand::random());
        let days = sampling::partition_days(&mut rng, pool.len(), total_days as usize)?;

        let marathon_id = Ulid::new().to_string();
        let mut tx = self.pool.begin().await?;

        for (day_index, indices) in days.iter().enumerate() {
            let quiz_id = Ulid::new().to_string();

            for &idx in indices {
                let card = &pool[idx];
                sqlx::query(
                    r#"
                    INSERT INTO quiz_records (quiz_id, flashcard_id, difficulty_level, username, category)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(&quiz_id)
                .bind(&card.id)
                .bind(card.difficulty_level)
                .bind(username)
                .bind(category)
                .execute(&mut *tx)
                .await?;
            }

            sqlx::query(
                r#"
                INSERT INTO marathon_days
                    (marathon_id, quiz_id, username, category, day_index, total_days, start_date, completed)
                VALUES ($1, $2, $3, $4, $5, $6, $7, FALSE)
                "#,
            )
            .bind(&marathon_id)
            .bind(&quiz_id)
            .bind(username)
            .bind(category)
            .bind(day_index as i64)
            .bind(total_days)
            .bind(start_date)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "marathon created with id: {marathon_id} for user: {username} ({total_days} days over '{category}')"
        );
        Ok(marathon_id)
    }

    /// Resolve the quiz a marathon owes for `today`.
    ///
    /// The current day is pure calendar arithmetic on the start date; the
    /// plan advances whether or not earlier days were submitted. Lookups go
    /// by day index (clamped to the final day), so an already-completed day
    /// can be retrieved again. Once the final day is completed and the
    /// calendar has moved past it, the whole marathon is torn down and this
    /// call reports `Expired`.
    ///
    /// Returns `None` when no such marathon exists (including one already
    /// expired).
    pub async fn due_quiz(&self, marathon_id: &str, today: NaiveDate) -> Result<Option<DueQuiz>> {
        let plan = sqlx::query_as::<_, (NaiveDate, i64)>(
            "SELECT start_date, total_days FROM marathon_days WHERE marathon_id = $1 LIMIT 1",
        )
        .bind(marathon_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((start_date, total_days)) = plan else {
            return Ok(None);
        };

        let current_day = (today - start_date).num_days().max(0);
        let lookup_day = current_day.min(total_days - 1);

        let day = sqlx::query_as::<_, MarathonDay>(
            r#"
            SELECT marathon_id, quiz_id, username, category, day_index, total_days, start_date, completed
            FROM marathon_days
            WHERE marathon_id = $1 AND day_index = $2
            "#,
        )
        .bind(marathon_id)
        .bind(lookup_day)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_eyre("marathon day rows are not contiguous")?;

        let flashcards = self.quiz_flashcards(&day.quiz_id).await?;

        let did_quiz = if day.completed && current_day >= total_days {
            self.delete_marathon(marathon_id).await?;
            DidQuiz::Expired
        } else if day.completed {
            DidQuiz::Done
        } else {
            DidQuiz::NotDone
        };

        Ok(Some(DueQuiz {
            quiz_id: day.quiz_id,
            flashcards,
            did_quiz,
        }))
    }

    pub async fn marathon_days(&self, marathon_id: &str) -> Result<Vec<MarathonDay>> {
        let days = sqlx::query_as::<_, MarathonDay>(
            r#"
            SELECT marathon_id, quiz_id, username, category, day_index, total_days, start_date, completed
            FROM marathon_days
            WHERE marathon_id = $1
            ORDER BY day_index
            "#,
        )
        .bind(marathon_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(days)
    }

    /// Flashcards of one quiz, resolved through its quiz_records.
    pub async fn quiz_flashcards(&self, quiz_id: &str) -> Result<Vec<Flashcard>> {
        let cards = sqlx::query_as::<_, Flashcard>(
            r#"
            SELECT f.id, f.username, f.question, f.answer, f.category, f.difficulty_level, f.is_auto
            FROM quiz_records qr
            JOIN flashcards f ON f.id = qr.flashcard_id
            WHERE qr.quiz_id = $1
            ORDER BY f.id
            "#,
        )
        .bind(quiz_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    pub(super) async fn mark_day_completed_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        marathon_id: &str,
        quiz_id: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE marathon_days SET completed = TRUE WHERE marathon_id = $1 AND quiz_id = $2",
        )
        .bind(marathon_id)
        .bind(quiz_id)
        .execute(&mut **tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove every row belonging to a marathon: the day rows and the quiz
    /// records of each day's quiz, in one transaction.
    async fn delete_marathon(&self, marathon_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM quiz_records
            WHERE quiz_id IN (SELECT quiz_id FROM marathon_days WHERE marathon_id = $1)
            "#,
        )
        .bind(marathon_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM marathon_days WHERE marathon_id = $1")
            .bind(marathon_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("marathon expired and deleted: {marathon_id}");
        Ok(())
    }
}

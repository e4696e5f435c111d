use chrono::{NaiveDateTime, Timelike};
use color_eyre::Result;

use super::models::{CategoryDifficultyRow, CategoryEasyCount, Difficulty};
use super::Db;
use crate::names;

impl Db {
    /// Which part of the day the user tends to finish quizzes in, judged by
    /// the end timestamps of completed attempts. Ties fall to the earlier
    /// bucket; no history at all reports "No preference".
    pub async fn preferred_study_time(&self, username: &str) -> Result<String> {
        let ends: Vec<NaiveDateTime> = sqlx::query_scalar(
            "SELECT end_date FROM quiz_records WHERE username = $1 AND end_date IS NOT NULL",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        if ends.is_empty() {
            return Ok("No preference".to_string());
        }

        let mut counts = [0usize; 3]; // Morning, Evening, Night
        for end in &ends {
            let hour = end.hour();
            if (names::MORNING_START_HOUR..names::EVENING_START_HOUR).contains(&hour) {
                counts[0] += 1;
            } else if hour >= names::EVENING_START_HOUR {
                counts[1] += 1;
            } else {
                counts[2] += 1;
            }
        }

        let buckets = ["Morning", "Evening", "Night"];
        let mut best = 0;
        for i in 1..buckets.len() {
            if counts[i] > counts[best] {
                best = i;
            }
        }
        Ok(buckets[best].to_string())
    }

    /// Easy-question count per category. Derived from quiz history when the
    /// user has any; otherwise falls back to their flashcard pool.
    pub async fn easy_count_per_category(&self, username: &str) -> Result<Vec<CategoryEasyCount>> {
        let has_history: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM quiz_records WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.pool)
                .await?;

        let sql = if has_history {
            r#"
            SELECT category, COUNT(DISTINCT flashcard_id) AS count
            FROM quiz_records
            WHERE username = $1 AND difficulty_level = 'Easy' AND category IS NOT NULL
            GROUP BY category
            ORDER BY category
            "#
        } else {
            r#"
            SELECT category, COUNT(*) AS count
            FROM flashcards
            WHERE username = $1 AND difficulty_level = 'Easy'
            GROUP BY category
            ORDER BY category
            "#
        };

        let counts = sqlx::query_as::<_, CategoryEasyCount>(sql)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;

        Ok(counts)
    }

    /// Distinct questions the user has been quizzed on, per difficulty.
    /// Always three entries in Easy/Medium/Hard order, zero-filled.
    pub async fn difficulty_distribution(&self, username: &str) -> Result<[i64; 3]> {
        let rows = sqlx::query_as::<_, (Difficulty, i64)>(
            r#"
            SELECT difficulty_level, COUNT(DISTINCT flashcard_id)
            FROM quiz_records
            WHERE username = $1 AND difficulty_level IS NOT NULL
            GROUP BY difficulty_level
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        let mut distribution = [0i64; 3];
        for (difficulty, count) in rows {
            distribution[difficulty as usize] = count;
        }

        Ok(distribution)
    }

    /// Easy/Medium/Hard counts of the user's flashcard pool, per category.
    pub async fn difficulty_breakdown_per_category(
        &self,
        username: &str,
    ) -> Result<Vec<CategoryDifficultyRow>> {
        let rows = sqlx::query_as::<_, CategoryDifficultyRow>(
            r#"
            SELECT
                category,
                SUM(CASE WHEN difficulty_level = 'Easy' THEN 1 ELSE 0 END) AS easy,
                SUM(CASE WHEN difficulty_level = 'Medium' THEN 1 ELSE 0 END) AS medium,
                SUM(CASE WHEN difficulty_level = 'Hard' THEN 1 ELSE 0 END) AS hard
            FROM flashcards
            WHERE username = $1
            GROUP BY category
            ORDER BY category
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Mean quiz duration in whole minutes, over attempts that carry both
    /// timestamps, formatted as `"N min"`.
    pub async fn average_quiz_duration(&self, username: &str) -> Result<String> {
        let spans: Vec<(NaiveDateTime, NaiveDateTime)> = sqlx::query_as(
            r#"
            SELECT start_date, end_date
            FROM quiz_records
            WHERE username = $1 AND start_date IS NOT NULL AND end_date IS NOT NULL
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        if spans.is_empty() {
            return Ok("0 min".to_string());
        }

        let total_minutes: i64 = spans
            .iter()
            .map(|(start, end)| (*end - *start).num_minutes())
            .sum();
        let average = total_minutes / spans.len() as i64;

        Ok(format!("{average} min"))
    }
}

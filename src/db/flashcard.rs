use color_eyre::{eyre::OptionExt, Result};
use ulid::Ulid;

use super::models::{Difficulty, Flashcard};
use super::Db;
use crate::models::UpdateFlashcardBody;

impl Db {
    /// List a user's flashcards. Filters are conjunctive; `None` means
    /// unconstrained.
    pub async fn list_flashcards(
        &self,
        username: &str,
        category: Option<&str>,
        difficulty: Option<Difficulty>,
    ) -> Result<Vec<Flashcard>> {
        let cards = sqlx::query_as::<_, Flashcard>(
            r#"
            SELECT id, username, question, answer, category, difficulty_level, is_auto
            FROM flashcards
            WHERE username = $1
              AND ($2 IS NULL OR category = $2)
              AND ($3 IS NULL OR difficulty_level = $3)
            ORDER BY id
            "#,
        )
        .bind(username)
        .bind(category)
        .bind(difficulty)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    pub async fn get_flashcard(&self, id: &str) -> Result<Option<Flashcard>> {
        let card = sqlx::query_as::<_, Flashcard>(
            r#"
            SELECT id, username, question, answer, category, difficulty_level, is_auto
            FROM flashcards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// Insert a flashcard, creating the owner's category row first when this
    /// is their first card in it. Returns the stored card.
    pub async fn create_flashcard(
        &self,
        username: &str,
        question: &str,
        answer: &str,
        category: &str,
        difficulty: Difficulty,
        is_auto: bool,
    ) -> Result<Flashcard> {
        let id = Ulid::new().to_string();
        let mut tx = self.pool.begin().await?;

        Self::ensure_category_tx(&mut tx, username, category).await?;

        sqlx::query(
            r#"
            INSERT INTO flashcards (id, username, question, answer, category, difficulty_level, is_auto)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&id)
        .bind(username)
        .bind(question)
        .bind(answer)
        .bind(category)
        .bind(difficulty)
        .bind(is_auto)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("new flashcard created with id: {id} for user: {username}");
        self.get_flashcard(&id)
            .await?
            .ok_or_eyre("flashcard missing after insert")
    }

    /// Apply only the provided fields. A category change keeps the derived
    /// category rows consistent on both sides. Returns `None` when the id is
    /// unknown.
    pub async fn update_flashcard(
        &self,
        id: &str,
        fields: &UpdateFlashcardBody,
    ) -> Result<Option<Flashcard>> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Flashcard>(
            r#"
            SELECT id, username, question, answer, category, difficulty_level, is_auto
            FROM flashcards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(existing) = existing else {
            return Ok(None);
        };

        let mut updates = Vec::new();
        if fields.question.is_some() {
            updates.push("question = ?");
        }
        if fields.answer.is_some() {
            updates.push("answer = ?");
        }
        if fields.category.is_some() {
            updates.push("category = ?");
        }
        if fields.difficulty_level.is_some() {
            updates.push("difficulty_level = ?");
        }

        if updates.is_empty() {
            return Ok(Some(existing));
        }

        let category_changed = fields
            .category
            .as_deref()
            .is_some_and(|c| c != existing.category);
        if category_changed {
            if let Some(new_category) = fields.category.as_deref() {
                Self::ensure_category_tx(&mut tx, &existing.username, new_category).await?;
            }
        }

        let sql = format!("UPDATE flashcards SET {} WHERE id = ?", updates.join(", "));
        let mut query = sqlx::query(&sql);
        if let Some(question) = &fields.question {
            query = query.bind(question);
        }
        if let Some(answer) = &fields.answer {
            query = query.bind(answer);
        }
        if let Some(category) = &fields.category {
            query = query.bind(category);
        }
        if let Some(difficulty) = fields.difficulty_level {
            query = query.bind(difficulty);
        }
        query.bind(id).execute(&mut *tx).await?;

        if category_changed {
            Self::prune_category_tx(&mut tx, &existing.username, &existing.category).await?;
        }

        let updated = sqlx::query_as::<_, Flashcard>(
            r#"
            SELECT id, username, question, answer, category, difficulty_level, is_auto
            FROM flashcards
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!("flashcard updated with id: {id}");
        Ok(Some(updated))
    }

    /// Delete a flashcard and everything hanging off it: referencing quiz
    /// records go first, then the card, then the category row if this was
    /// the owner's last card in it. Returns whether the card existed.
    pub async fn delete_flashcard(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, (String, String)>(
            "SELECT username, category FROM flashcards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((username, category)) = existing else {
            return Ok(false);
        };

        sqlx::query("DELETE FROM quiz_records WHERE flashcard_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM flashcards WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::prune_category_tx(&mut tx, &username, &category).await?;

        tx.commit().await?;

        tracing::info!("flashcard deleted with id: {id} for user: {username}");
        Ok(true)
    }
}

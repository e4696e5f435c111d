use color_eyre::Result;

use super::Db;

/// Category rows are derived state: a `(category, username)` row exists
/// exactly while at least one of the user's flashcards references it. Both
/// helpers run inside the caller's transaction so the invariant cannot drift
/// between the category table and the flashcard table.
impl Db {
    pub async fn list_categories(&self, username: &str) -> Result<Vec<String>> {
        let categories: Vec<String> = sqlx::query_scalar(
            "SELECT category FROM categories WHERE username = $1 ORDER BY category",
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn category_exists(&self, username: &str, category: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE username = $1 AND category = $2)",
        )
        .bind(username)
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub(super) async fn ensure_category_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        username: &str,
        category: &str,
    ) -> Result<()> {
        sqlx::query("INSERT OR IGNORE INTO categories (category, username) VALUES ($1, $2)")
            .bind(category)
            .bind(username)
            .execute(&mut **tx)
            .await?;

        Ok(())
    }

    /// Delete the category row once the user's last flashcard in it is gone.
    /// Returns whether the row was removed.
    pub(super) async fn prune_category_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
        username: &str,
        category: &str,
    ) -> Result<bool> {
        let remaining: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM flashcards WHERE username = $1 AND category = $2",
        )
        .bind(username)
        .bind(category)
        .fetch_one(&mut **tx)
        .await?;

        if remaining > 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM categories WHERE username = $1 AND category = $2")
            .bind(username)
            .bind(category)
            .execute(&mut **tx)
            .await?;

        Ok(true)
    }
}

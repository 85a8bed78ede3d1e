//! # Category Repository
//!
//! Database operations for categories. The product rules only need the
//! total count; lookups by id back the category service.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use catalog_core::{Category, CategoryId};

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// Inserts a category.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - category_id already exists
    pub async fn add(&self, category: &Category) -> DbResult<()> {
        debug!(category_id = category.category_id, "Inserting category");

        sqlx::query("INSERT INTO categories (category_id, category_name) VALUES (?1, ?2)")
            .bind(category.category_id)
            .bind(category.category_name.as_str())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// All categories ordered by id.
    pub async fn get_all(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name FROM categories ORDER BY category_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn get_by_id(&self, id: CategoryId) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT category_id, category_name FROM categories WHERE category_id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_add_and_list() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        repo.add(&Category::new(2, "Condiments")).await.unwrap();
        repo.add(&Category::new(1, "Beverages")).await.unwrap();

        let all = repo.get_all().await.unwrap();
        assert_eq!(
            all,
            vec![Category::new(1, "Beverages"), Category::new(2, "Condiments")]
        );
        assert_eq!(repo.count().await.unwrap(), 2);
        assert_eq!(
            repo.get_by_id(2).await.unwrap(),
            Some(Category::new(2, "Condiments"))
        );
        assert_eq!(repo.get_by_id(3).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_category_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.categories();

        repo.add(&Category::new(1, "Beverages")).await.unwrap();
        let err = repo.add(&Category::new(1, "Again")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }
}

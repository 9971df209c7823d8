//! 예산 카테고리 / 배분 항목 저장소.
//!
//! 항목은 소유자 컬럼이 없으며 상위 카테고리의 `user_id`로 범위가 제한됩니다.

use budget_core::{
    group_items, AllocationItem, BudgetError, BudgetResult, Category, CategoryWithItems,
};
use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

/// 카테고리 생성/수정 입력.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CategoryInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// UI 표시 색상 (예: "#22c55e")
    #[validate(length(min = 1, max = 32))]
    pub color: String,
}

/// 배분 항목 생성/수정 입력.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AllocationItemInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0))]
    pub amount: i64,
}

/// Category Repository
pub struct CategoryRepository;

impl CategoryRepository {
    /// 소유자의 카테고리와 항목 목록.
    ///
    /// 카테고리 1회, 항목 1회 조회 후 메모리에서 묶습니다.
    pub async fn list_with_items(
        conn: &mut SqliteConnection,
        owner_id: i64,
    ) -> BudgetResult<Vec<CategoryWithItems>> {
        let categories = Self::list(&mut *conn, owner_id).await?;

        let items = sqlx::query_as::<_, AllocationItem>(
            r#"
            SELECT id, category_id, name, amount
            FROM allocation_items
            WHERE category_id IN (SELECT id FROM categories WHERE user_id = ?1)
            ORDER BY id
            "#,
        )
        .bind(owner_id)
        .fetch_all(conn)
        .await?;

        debug!(
            owner_id,
            categories = categories.len(),
            items = items.len(),
            "Loaded categories"
        );
        Ok(group_items(categories, items))
    }

    /// 소유자의 카테고리 목록 (항목 제외, id 순).
    pub async fn list(conn: &mut SqliteConnection, owner_id: i64) -> BudgetResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>(
            "SELECT id, user_id, name, color FROM categories WHERE user_id = ?1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }

    /// 단건 조회.
    pub async fn find(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
    ) -> BudgetResult<Option<Category>> {
        let row = sqlx::query_as::<_, Category>(
            "SELECT id, user_id, name, color FROM categories WHERE id = ?1 AND user_id = ?2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    /// 생성.
    pub async fn create(
        conn: &mut SqliteConnection,
        owner_id: i64,
        input: &CategoryInput,
    ) -> BudgetResult<Category> {
        let row = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (user_id, name, color)
            VALUES (?1, ?2, ?3)
            RETURNING id, user_id, name, color
            "#,
        )
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.color)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    /// 전체 필드 교체.
    pub async fn update(
        conn: &mut SqliteConnection,
        owner_id: i64,
        id: i64,
        input: &CategoryInput,
    ) -> BudgetResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories SET name = ?3, color = ?4
            WHERE id = ?1 AND user_id = ?2
            RETURNING id, user_id, name, color
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.color)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| BudgetError::not_found("category", id))
    }

    /// 삭제. 소속 항목을 먼저 삭제합니다.
    ///
    /// 두 문장이 같은 트랜잭션 안에서 실행되도록 호출자가 연결을 관리해야 합니다.
    pub async fn delete(conn: &mut SqliteConnection, owner_id: i64, id: i64) -> BudgetResult<bool> {
        let items = sqlx::query(
            r#"
            DELETE FROM allocation_items
            WHERE category_id IN (SELECT id FROM categories WHERE id = ?1 AND user_id = ?2)
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

        let result = sqlx::query("DELETE FROM categories WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(owner_id)
            .execute(conn)
            .await?;

        debug!(
            category_id = id,
            items_removed = items.rows_affected(),
            "Category delete"
        );
        Ok(result.rows_affected() > 0)
    }

    /// 카테고리의 항목 목록.
    pub async fn items_for_category(
        conn: &mut SqliteConnection,
        owner_id: i64,
        category_id: i64,
    ) -> BudgetResult<Vec<AllocationItem>> {
        let rows = sqlx::query_as::<_, AllocationItem>(
            r#"
            SELECT i.id, i.category_id, i.name, i.amount
            FROM allocation_items i
            JOIN categories c ON c.id = i.category_id
            WHERE i.category_id = ?1 AND c.user_id = ?2
            ORDER BY i.id
            "#,
        )
        .bind(category_id)
        .bind(owner_id)
        .fetch_all(conn)
        .await?;

        Ok(rows)
    }

    /// 항목 추가. 카테고리가 호출자 소유가 아니면 NotFound.
    pub async fn create_item(
        conn: &mut SqliteConnection,
        owner_id: i64,
        category_id: i64,
        input: &AllocationItemInput,
    ) -> BudgetResult<AllocationItem> {
        if Self::find(&mut *conn, owner_id, category_id).await?.is_none() {
            return Err(BudgetError::not_found("category", category_id));
        }

        let row = sqlx::query_as::<_, AllocationItem>(
            r#"
            INSERT INTO allocation_items (category_id, name, amount)
            VALUES (?1, ?2, ?3)
            RETURNING id, category_id, name, amount
            "#,
        )
        .bind(category_id)
        .bind(&input.name)
        .bind(input.amount)
        .fetch_one(conn)
        .await?;

        Ok(row)
    }

    /// 항목 수정. 호출자 소유 카테고리의 항목이 아니면 NotFound.
    pub async fn update_item(
        conn: &mut SqliteConnection,
        owner_id: i64,
        item_id: i64,
        input: &AllocationItemInput,
    ) -> BudgetResult<AllocationItem> {
        sqlx::query_as::<_, AllocationItem>(
            r#"
            UPDATE allocation_items SET name = ?3, amount = ?4
            WHERE id = ?1
              AND category_id IN (SELECT id FROM categories WHERE user_id = ?2)
            RETURNING id, category_id, name, amount
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .bind(&input.name)
        .bind(input.amount)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| BudgetError::not_found("item", item_id))
    }

    /// 항목 삭제. 대상이 없으면 false.
    pub async fn delete_item(
        conn: &mut SqliteConnection,
        owner_id: i64,
        item_id: i64,
    ) -> BudgetResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM allocation_items
            WHERE id = ?1
              AND category_id IN (SELECT id FROM categories WHERE user_id = ?2)
            "#,
        )
        .bind(item_id)
        .bind(owner_id)
        .execute(conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connect_in_memory;
    use crate::repository::UserRepository;
    use sqlx::SqlitePool;

    fn category(name: &str) -> CategoryInput {
        CategoryInput {
            name: name.to_string(),
            color: "#22c55e".to_string(),
        }
    }

    fn item(name: &str, amount: i64) -> AllocationItemInput {
        AllocationItemInput {
            name: name.to_string(),
            amount,
        }
    }

    async fn setup() -> (SqlitePool, i64, i64) {
        let pool = connect_in_memory().await.unwrap();
        let alice = UserRepository::create(&pool, "alice", "h").await.unwrap();
        let bob = UserRepository::create(&pool, "bob", "h").await.unwrap();
        (pool, alice.id, bob.id)
    }

    async fn create_category(conn: &mut SqliteConnection, owner_id: i64, name: &str) -> Category {
        CategoryRepository::create(conn, owner_id, &category(name))
            .await
            .unwrap()
    }

    async fn create_item(
        conn: &mut SqliteConnection,
        owner_id: i64,
        category_id: i64,
        name: &str,
        amount: i64,
    ) -> AllocationItem {
        CategoryRepository::create_item(conn, owner_id, category_id, &item(name, amount))
            .await
            .unwrap()
    }

    async fn item_count(conn: &mut SqliteConnection, owner_id: i64, category_id: i64) -> usize {
        CategoryRepository::items_for_category(conn, owner_id, category_id)
            .await
            .unwrap()
            .len()
    }

    #[tokio::test]
    async fn test_list_with_items_groups_by_category() {
        let (pool, alice, bob) = setup().await;
        let mut conn = pool.acquire().await.unwrap();

        let needs = create_category(&mut conn, alice, "Needs").await;
        let fun = create_category(&mut conn, alice, "Fun").await;
        let bobs = create_category(&mut conn, bob, "Bob").await;

        create_item(&mut conn, alice, needs.id, "Rent", 800).await;
        create_item(&mut conn, alice, fun.id, "Games", 50).await;
        create_item(&mut conn, alice, needs.id, "Food", 200).await;
        create_item(&mut conn, bob, bobs.id, "Other", 1).await;

        let listed = CategoryRepository::list_with_items(&mut conn, alice)
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "Needs");
        assert_eq!(listed[0].items.len(), 2);
        assert_eq!(listed[0].items[0].name, "Rent");
        assert_eq!(listed[0].items[1].name, "Food");
        assert_eq!(listed[1].items.len(), 1);

        assert_eq!(item_count(&mut conn, alice, needs.id).await, 2);
        assert_eq!(item_count(&mut conn, bob, needs.id).await, 0);
    }

    #[tokio::test]
    async fn test_create_item_requires_owned_category() {
        let (pool, alice, bob) = setup().await;
        let mut conn = pool.acquire().await.unwrap();

        let needs = create_category(&mut conn, alice, "Needs").await;

        let sneaky = item("Sneaky", 1);
        let result = CategoryRepository::create_item(&mut conn, bob, needs.id, &sneaky).await;
        assert!(matches!(result, Err(BudgetError::NotFound(_))));

        let ghost = item("Ghost", 1);
        let result = CategoryRepository::create_item(&mut conn, alice, 9999, &ghost).await;
        assert!(matches!(result, Err(BudgetError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_cascades_items() {
        let (pool, alice, bob) = setup().await;
        let mut conn = pool.acquire().await.unwrap();

        let needs = create_category(&mut conn, alice, "Needs").await;
        create_item(&mut conn, alice, needs.id, "Rent", 800).await;
        create_item(&mut conn, alice, needs.id, "Food", 200).await;

        // 타인의 삭제 시도는 항목도 건드리지 않음
        let deleted = CategoryRepository::delete(&mut conn, bob, needs.id)
            .await
            .unwrap();
        assert!(!deleted);
        assert_eq!(item_count(&mut conn, alice, needs.id).await, 2);

        let deleted = CategoryRepository::delete(&mut conn, alice, needs.id)
            .await
            .unwrap();
        assert!(deleted);

        let (remaining,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM allocation_items")
            .fetch_one(&mut *conn)
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let deleted = CategoryRepository::delete(&mut conn, alice, needs.id)
            .await
            .unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_update_and_delete_item_scoped_by_category_owner() {
        let (pool, alice, bob) = setup().await;
        let mut conn = pool.acquire().await.unwrap();

        let needs = create_category(&mut conn, alice, "Needs").await;
        let rent = create_item(&mut conn, alice, needs.id, "Rent", 800).await;

        let hacked = item("Hacked", 0);
        let result = CategoryRepository::update_item(&mut conn, bob, rent.id, &hacked).await;
        assert!(matches!(result, Err(BudgetError::NotFound(_))));
        let deleted = CategoryRepository::delete_item(&mut conn, bob, rent.id)
            .await
            .unwrap();
        assert!(!deleted);

        let raised = item("Rent", 850);
        let updated = CategoryRepository::update_item(&mut conn, alice, rent.id, &raised)
            .await
            .unwrap();
        assert_eq!(updated.amount, 850);
        assert_eq!(updated.category_id, Some(needs.id));

        let deleted = CategoryRepository::delete_item(&mut conn, alice, rent.id)
            .await
            .unwrap();
        assert!(deleted);
        let deleted = CategoryRepository::delete_item(&mut conn, alice, rent.id)
            .await
            .unwrap();
        assert!(!deleted);
    }

    #[tokio::test]
    async fn test_update_category() {
        let (pool, alice, bob) = setup().await;
        let mut conn = pool.acquire().await.unwrap();

        let needs = create_category(&mut conn, alice, "Needs").await;
        let changed = CategoryInput {
            name: "Essentials".to_string(),
            color: "#ef4444".to_string(),
        };

        let result = CategoryRepository::update(&mut conn, bob, needs.id, &changed).await;
        assert!(matches!(result, Err(BudgetError::NotFound(_))));

        let updated = CategoryRepository::update(&mut conn, alice, needs.id, &changed)
            .await
            .unwrap();
        assert_eq!(updated.name, "Essentials");
        assert_eq!(updated.color, "#ef4444");
        assert_eq!(updated.user_id, alice);
    }
}

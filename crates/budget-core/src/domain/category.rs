//! 예산 카테고리와 배분 항목.

use serde::{Deserialize, Serialize};

/// 예산 카테고리 레코드 (항목 제외).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct Category {
    pub id: i64,
    /// 소유자 ID
    pub user_id: i64,
    pub name: String,
    /// UI 표시 색상 (예: "#22c55e")
    pub color: String,
}

/// 카테고리에 속한 배분 항목.
///
/// 소유권은 상위 카테고리를 통해 상속됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct AllocationItem {
    pub id: i64,
    pub category_id: Option<i64>,
    pub name: String,
    pub amount: i64,
}

/// 카테고리 + 소속 항목 (목록 조회 응답).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct CategoryWithItems {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: String,
    pub items: Vec<AllocationItem>,
}

impl CategoryWithItems {
    /// 카테고리와 항목 목록을 결합합니다.
    pub fn new(category: Category, items: Vec<AllocationItem>) -> Self {
        Self {
            id: category.id,
            user_id: category.user_id,
            name: category.name,
            color: category.color,
            items,
        }
    }
}

/// 카테고리 목록에 항목들을 `category_id` 기준으로 분배합니다.
///
/// 카테고리 순서는 유지되며, 어느 카테고리에도 속하지 않는 항목은 버려집니다.
pub fn group_items(
    categories: Vec<Category>,
    items: Vec<AllocationItem>,
) -> Vec<CategoryWithItems> {
    let mut grouped: Vec<CategoryWithItems> = categories
        .into_iter()
        .map(|category| CategoryWithItems::new(category, Vec::new()))
        .collect();

    for item in items {
        let Some(category_id) = item.category_id else {
            continue;
        };
        if let Some(target) = grouped.iter_mut().find(|c| c.id == category_id) {
            target.items.push(item);
        }
    }

    grouped
}

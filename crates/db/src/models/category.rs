//! Category entity model, DTOs, and tree assembly.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vitrine_core::types::{DbId, Timestamp};

/// A category row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category. `slug` is already resolved by the
/// caller.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing category.
///
/// `name`, `slug`, and `sort_order` follow COALESCE semantics. `parent_id`
/// is written as given -- the handler computes the effective value (and
/// runs the cycle check) before calling the repository, so `None` here
/// means "root".
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub parent_id: Option<DbId>,
    pub sort_order: Option<i32>,
}

/// A category with its children, as served by the public tree endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTreeNode {
    #[serde(flatten)]
    pub category: Category,
    pub children: Vec<CategoryTreeNode>,
}

/// Assemble flat category rows into a nested tree.
///
/// Rows are grouped by `parent_id` and attached recursively. Input order is
/// preserved within each sibling group, so callers should pass rows already
/// ordered (`sort_order`, then name). A row whose parent id does not appear
/// in the input is promoted to a root rather than dropped.
pub fn build_category_tree(rows: Vec<Category>) -> Vec<CategoryTreeNode> {
    let known_ids: HashSet<DbId> = rows.iter().map(|c| c.id).collect();

    let mut roots: Vec<Category> = Vec::new();
    let mut children_of: HashMap<DbId, Vec<Category>> = HashMap::new();

    for row in rows {
        match row.parent_id {
            Some(parent) if known_ids.contains(&parent) => {
                children_of.entry(parent).or_default().push(row);
            }
            _ => roots.push(row),
        }
    }

    roots
        .into_iter()
        .map(|root| attach_children(root, &mut children_of))
        .collect()
}

fn attach_children(
    category: Category,
    children_of: &mut HashMap<DbId, Vec<Category>>,
) -> CategoryTreeNode {
    let children = children_of
        .remove(&category.id)
        .unwrap_or_default()
        .into_iter()
        .map(|child| attach_children(child, children_of))
        .collect();

    CategoryTreeNode { category, children }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: DbId, parent_id: Option<DbId>, name: &str) -> Category {
        let now = chrono::Utc::now();
        Category {
            id,
            name: name.to_string(),
            slug: name.to_lowercase(),
            parent_id,
            sort_order: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn builds_nested_tree() {
        let rows = vec![
            row(1, None, "Men"),
            row(2, None, "Women"),
            row(3, Some(1), "Shoes"),
            row(4, Some(1), "Coats"),
            row(5, Some(3), "Sneakers"),
        ];

        let tree = build_category_tree(rows);
        assert_eq!(tree.len(), 2);

        let men = &tree[0];
        assert_eq!(men.category.name, "Men");
        assert_eq!(men.children.len(), 2);
        assert_eq!(men.children[0].category.name, "Shoes");
        assert_eq!(men.children[0].children[0].category.name, "Sneakers");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn preserves_sibling_order() {
        let rows = vec![
            row(1, None, "Root"),
            row(2, Some(1), "First"),
            row(3, Some(1), "Second"),
            row(4, Some(1), "Third"),
        ];

        let tree = build_category_tree(rows);
        let names: Vec<&str> = tree[0]
            .children
            .iter()
            .map(|n| n.category.name.as_str())
            .collect();
        assert_eq!(names, ["First", "Second", "Third"]);
    }

    #[test]
    fn orphan_rows_become_roots() {
        // Parent 42 is not part of the result set.
        let rows = vec![row(1, None, "Men"), row(7, Some(42), "Orphan")];

        let tree = build_category_tree(rows);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[1].category.name, "Orphan");
    }

    #[test]
    fn empty_input_yields_empty_tree() {
        assert!(build_category_tree(Vec::new()).is_empty());
    }
}

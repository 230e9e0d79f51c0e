//! Integration tests for the category hierarchy.
//!
//! Covers tree assembly from real rows, the parent-map input to the cycle
//! check, and the deletion guard counts.

use sqlx::PgPool;
use vitrine_core::taxonomy::would_create_cycle;
use vitrine_db::models::brand::CreateBrand;
use vitrine_db::models::category::{build_category_tree, CreateCategory, UpdateCategory};
use vitrine_db::models::product::CreateProduct;
use vitrine_db::repositories::{BrandRepo, CategoryRepo, ProductRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_category(name: &str, slug: &str, parent_id: Option<i64>) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        parent_id,
        sort_order: None,
    }
}

fn ordered(name: &str, slug: &str, parent_id: Option<i64>, sort_order: i32) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        slug: slug.to_string(),
        parent_id,
        sort_order: Some(sort_order),
    }
}

// ---------------------------------------------------------------------------
// Tree assembly
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn tree_nests_children_under_parents(pool: PgPool) {
    let women = CategoryRepo::create(&pool, &new_category("Women", "women", None))
        .await
        .unwrap();
    let men = CategoryRepo::create(&pool, &new_category("Men", "men", None))
        .await
        .unwrap();
    let dresses = CategoryRepo::create(&pool, &new_category("Dresses", "dresses", Some(women.id)))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &new_category("Knitwear", "knitwear", Some(men.id)))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &new_category("Maxi", "maxi", Some(dresses.id)))
        .await
        .unwrap();

    let rows = CategoryRepo::list_all(&pool).await.unwrap();
    let tree = build_category_tree(rows);

    assert_eq!(tree.len(), 2);
    // sort_order all 0, so name order decides: Men before Women.
    assert_eq!(tree[0].category.name, "Men");
    assert_eq!(tree[1].category.name, "Women");
    assert_eq!(tree[1].children[0].category.name, "Dresses");
    assert_eq!(tree[1].children[0].children[0].category.name, "Maxi");
}

#[sqlx::test]
async fn tree_respects_sort_order_within_siblings(pool: PgPool) {
    let root = CategoryRepo::create(&pool, &ordered("Apparel", "apparel", None, 0))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &ordered("Last", "last", Some(root.id), 20))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &ordered("First", "first", Some(root.id), 1))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &ordered("Middle", "middle", Some(root.id), 10))
        .await
        .unwrap();

    let tree = build_category_tree(CategoryRepo::list_all(&pool).await.unwrap());
    let names: Vec<&str> = tree[0]
        .children
        .iter()
        .map(|n| n.category.name.as_str())
        .collect();
    assert_eq!(names, ["First", "Middle", "Last"]);
}

// ---------------------------------------------------------------------------
// Cycle prevention
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn parent_map_feeds_the_cycle_check(pool: PgPool) {
    let women = CategoryRepo::create(&pool, &new_category("Women", "women", None))
        .await
        .unwrap();
    let dresses = CategoryRepo::create(&pool, &new_category("Dresses", "dresses", Some(women.id)))
        .await
        .unwrap();
    let maxi = CategoryRepo::create(&pool, &new_category("Maxi", "maxi", Some(dresses.id)))
        .await
        .unwrap();

    let parents = CategoryRepo::parent_map(&pool).await.unwrap();

    // Moving the root under its own grandchild must be flagged.
    assert!(would_create_cycle(&parents, women.id, maxi.id));
    assert!(would_create_cycle(&parents, women.id, women.id));
    // Moving a leaf between branches is fine.
    assert!(!would_create_cycle(&parents, maxi.id, women.id));
}

#[sqlx::test]
async fn reparenting_update_is_applied(pool: PgPool) {
    let women = CategoryRepo::create(&pool, &new_category("Women", "women", None))
        .await
        .unwrap();
    let accessories =
        CategoryRepo::create(&pool, &new_category("Accessories", "accessories", None))
            .await
            .unwrap();

    let moved = CategoryRepo::update(
        &pool,
        accessories.id,
        &UpdateCategory {
            name: None,
            slug: None,
            parent_id: Some(women.id),
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.parent_id, Some(women.id));

    // And back to the root.
    let rooted = CategoryRepo::update(
        &pool,
        accessories.id,
        &UpdateCategory {
            name: None,
            slug: None,
            parent_id: None,
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(rooted.parent_id, None);
}

// ---------------------------------------------------------------------------
// Deletion guards
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn guard_counts_cover_children_and_products(pool: PgPool) {
    let women = CategoryRepo::create(&pool, &new_category("Women", "women", None))
        .await
        .unwrap();
    let dresses = CategoryRepo::create(&pool, &new_category("Dresses", "dresses", Some(women.id)))
        .await
        .unwrap();

    assert_eq!(CategoryRepo::child_count(&pool, women.id).await.unwrap(), 1);
    assert_eq!(CategoryRepo::child_count(&pool, dresses.id).await.unwrap(), 0);

    let brand = BrandRepo::create(
        &pool,
        &CreateBrand {
            name: "Maison Nord".to_string(),
            slug: "maison-nord".to_string(),
            description: None,
            logo_url: None,
            website_url: None,
        },
    )
    .await
    .unwrap();

    ProductRepo::create(
        &pool,
        &CreateProduct {
            name: "Slip Dress".to_string(),
            slug: "slip-dress".to_string(),
            description: None,
            price_cents: 9_900,
            brand_id: brand.id,
            category_id: women.id,
            subcategory_id: Some(dresses.id),
            is_published: None,
            is_featured: None,
            images: Vec::new(),
        },
    )
    .await
    .unwrap();

    // The product counts against both its category and its subcategory.
    assert_eq!(CategoryRepo::product_count(&pool, women.id).await.unwrap(), 1);
    assert_eq!(
        CategoryRepo::product_count(&pool, dresses.id).await.unwrap(),
        1
    );

    // RESTRICT backstop: deleting a category with children fails in the db.
    let err = CategoryRepo::delete(&pool, women.id).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23503"));
        }
        other => panic!("expected database error, got: {other:?}"),
    }
}

#[sqlx::test]
async fn duplicate_category_slug_rejected(pool: PgPool) {
    CategoryRepo::create(&pool, &new_category("Women", "women", None))
        .await
        .unwrap();

    let err = CategoryRepo::create(&pool, &new_category("Womenswear", "women", None))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_categories_slug"));
        }
        other => panic!("expected database error, got: {other:?}"),
    }
}

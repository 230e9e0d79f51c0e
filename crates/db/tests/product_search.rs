//! Integration tests for the product filter pipeline.
//!
//! Seeds a small catalog and exercises every facet combination, the count +
//! page pairing, pagination clamps, and the featured-first ordering.

use sqlx::PgPool;
use vitrine_core::search::like_pattern;
use vitrine_core::types::DbId;
use vitrine_db::models::brand::CreateBrand;
use vitrine_db::models::category::CreateCategory;
use vitrine_db::models::product::{CreateProduct, ProductFilter};
use vitrine_db::repositories::{BrandRepo, CategoryRepo, ProductRepo};

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

struct Catalog {
    nord: DbId,
    sud: DbId,
    women: DbId,
    men: DbId,
    dresses: DbId,
}

/// Seed two brands, two top categories (one with a subcategory), and five
/// products:
///
/// | name             | brand | category | subcat  | published | featured |
/// |------------------|-------|----------|---------|-----------|----------|
/// | Wool Coat        | nord  | women    | -       | yes       | no       |
/// | Slip Dress       | nord  | women    | dresses | yes       | yes      |
/// | Wrap Dress       | sud   | women    | dresses | yes       | no       |
/// | Wool Scarf       | sud   | men      | -       | yes       | no       |
/// | Archive Coat     | nord  | men      | -       | no        | no       |
async fn seed(pool: &PgPool) -> Catalog {
    let nord = brand(pool, "Maison Nord", "maison-nord").await;
    let sud = brand(pool, "Atelier Sud", "atelier-sud").await;
    let women = category(pool, "Women", "women", None).await;
    let men = category(pool, "Men", "men", None).await;
    let dresses = category(pool, "Dresses", "dresses", Some(women)).await;

    product(pool, "Wool Coat", "wool-coat", nord, women, None, true, false).await;
    product(pool, "Slip Dress", "slip-dress", nord, women, Some(dresses), true, true).await;
    product(pool, "Wrap Dress", "wrap-dress", sud, women, Some(dresses), true, false).await;
    product(pool, "Wool Scarf", "wool-scarf", sud, men, None, true, false).await;
    product(pool, "Archive Coat", "archive-coat", nord, men, None, false, false).await;

    Catalog {
        nord,
        sud,
        women,
        men,
        dresses,
    }
}

async fn brand(pool: &PgPool, name: &str, slug: &str) -> DbId {
    BrandRepo::create(
        pool,
        &CreateBrand {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            logo_url: None,
            website_url: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn category(pool: &PgPool, name: &str, slug: &str, parent_id: Option<DbId>) -> DbId {
    CategoryRepo::create(
        pool,
        &CreateCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            parent_id,
            sort_order: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[allow(clippy::too_many_arguments)]
async fn product(
    pool: &PgPool,
    name: &str,
    slug: &str,
    brand_id: DbId,
    category_id: DbId,
    subcategory_id: Option<DbId>,
    published: bool,
    featured: bool,
) -> DbId {
    ProductRepo::create(
        pool,
        &CreateProduct {
            name: name.to_string(),
            slug: slug.to_string(),
            description: Some(format!("{name} from the current collection")),
            price_cents: 19_900,
            brand_id,
            category_id,
            subcategory_id,
            is_published: Some(published),
            is_featured: Some(featured),
            images: Vec::new(),
        },
    )
    .await
    .unwrap()
    .product
    .id
}

fn public_filter() -> ProductFilter {
    ProductFilter {
        published_only: true,
        ..ProductFilter::default()
    }
}

fn names(page: &vitrine_db::models::product::ProductPage) -> Vec<&str> {
    page.items.iter().map(|p| p.product.name.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Facets
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn no_facets_returns_all_published(pool: PgPool) {
    seed(&pool).await;

    let page = ProductRepo::search(&pool, &public_filter()).await.unwrap();
    assert_eq!(page.total_count, 4);
    // The featured product leads; the rest are newest-first.
    assert_eq!(
        names(&page),
        ["Slip Dress", "Wool Scarf", "Wrap Dress", "Wool Coat"]
    );
}

#[sqlx::test]
async fn admin_listing_includes_unpublished(pool: PgPool) {
    seed(&pool).await;

    let filter = ProductFilter::default();
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 5);
}

#[sqlx::test]
async fn brand_facet(pool: PgPool) {
    let catalog = seed(&pool).await;

    let filter = ProductFilter {
        brand_id: Some(catalog.sud),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(names(&page), ["Wool Scarf", "Wrap Dress"]);
}

#[sqlx::test]
async fn category_facet(pool: PgPool) {
    let catalog = seed(&pool).await;

    let filter = ProductFilter {
        category_id: Some(catalog.women),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 3);
}

#[sqlx::test]
async fn subcategory_facet(pool: PgPool) {
    let catalog = seed(&pool).await;

    let filter = ProductFilter {
        subcategory_id: Some(catalog.dresses),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(names(&page), ["Slip Dress", "Wrap Dress"]);
}

#[sqlx::test]
async fn free_text_matches_name_and_description(pool: PgPool) {
    seed(&pool).await;

    let filter = ProductFilter {
        pattern: like_pattern("wool"),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 2);
    assert_eq!(names(&page), ["Wool Scarf", "Wool Coat"]);

    // "collection" only appears in the generated descriptions.
    let filter = ProductFilter {
        pattern: like_pattern("collection"),
        ..public_filter()
    };
    assert_eq!(
        ProductRepo::search(&pool, &filter).await.unwrap().total_count,
        4
    );
}

#[sqlx::test]
async fn facets_combine(pool: PgPool) {
    let catalog = seed(&pool).await;

    let filter = ProductFilter {
        brand_id: Some(catalog.nord),
        category_id: Some(catalog.women),
        subcategory_id: Some(catalog.dresses),
        pattern: like_pattern("dress"),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(names(&page), ["Slip Dress"]);
}

#[sqlx::test]
async fn like_metacharacters_do_not_wildcard(pool: PgPool) {
    seed(&pool).await;

    // A literal "%" in the query must not match everything.
    let filter = ProductFilter {
        pattern: like_pattern("100%"),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.total_count, 0);
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn pagination_slices_while_count_stays_total(pool: PgPool) {
    seed(&pool).await;

    let filter = ProductFilter {
        limit: Some(2),
        offset: Some(0),
        ..public_filter()
    };
    let first = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(first.total_count, 4);
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.limit, 2);

    let filter = ProductFilter {
        limit: Some(2),
        offset: Some(2),
        ..public_filter()
    };
    let second = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(second.total_count, 4);
    assert_eq!(second.items.len(), 2);
    assert_eq!(second.offset, 2);

    // No overlap between pages.
    let first_names = names(&first);
    assert!(names(&second).iter().all(|n| !first_names.contains(n)));
}

#[sqlx::test]
async fn out_of_range_pagination_is_clamped(pool: PgPool) {
    seed(&pool).await;

    let filter = ProductFilter {
        limit: Some(-3),
        offset: Some(-10),
        ..public_filter()
    };
    let page = ProductRepo::search(&pool, &filter).await.unwrap();
    assert_eq!(page.limit, 1);
    assert_eq!(page.offset, 0);
    assert_eq!(page.items.len(), 1);
}

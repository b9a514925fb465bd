//! Integration tests for repository layer
//!
//! These tests verify that repository implementations correctly interact
//! with the PostgreSQL database, including upserts, uniqueness conflicts,
//! quota accounting and transactional state changes. They need a database
//! at `DATABASE_URL` and are ignored by default.

use chrono::{Duration, NaiveDate, Utc};
use managehub_api::auth::api_key::{generate_api_key, hash_api_key, key_prefix};
use managehub_api::auth::password::hash_password;
use managehub_api::domain::api_key::{ApiKey, ApiKeyRegistration, UsageEvent};
use managehub_api::domain::asset::{
    Asset, AssetChanges, AssetDetails, AssetStatus, DisposalRequest,
};
use managehub_api::domain::errors::DomainError;
use managehub_api::domain::inventory::{
    InventoryDetails, InventoryItem, MovementType, StockAdjustment,
};
use managehub_api::domain::library::{Book, BookAction, BookActionRequest, BookDetails};
use managehub_api::domain::notification::Announcement;
use managehub_api::domain::organization::{
    Branch, BranchDetails, Company, CompanyDetails, Department, DepartmentDetails, Location,
    LocationChanges, LocationDetails, LookupDetails, LookupEntry, LookupKind,
};
use managehub_api::domain::repositories::{
    ApiKeyRepository, AssetRepository, CompanyRepository, DepartmentRepository,
    InventoryRepository, LibraryRepository, LocationRepository, LookupRepository,
    MetricsRepository, NotificationRepository, RepositoryError, SearchRepository,
    UserRepository,
};
use managehub_api::domain::search::{AssetSearchRow, SearchParams, SearchQuery};
use managehub_api::domain::user::{Email, User};
use managehub_api::infrastructure::repositories::{
    PostgresApiKeyRepository, PostgresAssetRepository, PostgresCompanyRepository,
    PostgresDepartmentRepository, PostgresInventoryRepository, PostgresLibraryRepository,
    PostgresLocationRepository, PostgresLookupRepository, PostgresMetricsRepository,
    PostgresNotificationRepository, PostgresSearchRepository, PostgresUserRepository,
};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Set up test database connection pool
async fn setup_test_db() -> PgPool {
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for integration tests");

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn unique(label: &str) -> String {
    format!("{}-{}", label, Uuid::new_v4())
}

fn test_user(email: &str) -> User {
    User {
        id: Uuid::new_v4(),
        email: Email::new(email).expect("valid email"),
        password_hash: hash_password("testpass").expect("hash password"),
        full_name: "Test User".to_string(),
        is_active: true,
    }
}

fn asset_names(rows: &[AssetSearchRow]) -> Vec<String> {
    rows.iter().map(|row| row.name.clone()).collect()
}

async fn create_api_key(repo: &PostgresApiKeyRepository, daily_limit: i32) -> (ApiKey, String) {
    let plaintext = generate_api_key();
    let key = ApiKey::new(
        ApiKeyRegistration {
            app_name: unique("partner"),
            daily_limit: Some(daily_limit),
            ..Default::default()
        },
        key_prefix(&plaintext).unwrap().to_string(),
        hash_api_key(&plaintext).unwrap(),
    )
    .unwrap();
    repo.create(&key).await.expect("create key");
    (key, plaintext)
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_user_repository_create_and_find_by_email() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);
    let user = test_user(&format!("{}@test.com", unique("find")));

    repo.create(&user).await.expect("create user");

    let found = repo
        .find_by_email(&user.email)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(found.id, user.id);
    assert_eq!(found.full_name, "Test User");
    assert!(found.is_active);

    repo.update_last_login(user.id).await.expect("update login");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_user_repository_duplicate_email_conflicts() {
    let pool = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);
    let email = format!("{}@test.com", unique("dup"));

    repo.create(&test_user(&email)).await.expect("first insert");
    let result = repo.create(&test_user(&email)).await;

    assert!(matches!(result, Err(RepositoryError::Conflict(_))));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_api_key_quota_resets_with_the_day() {
    let pool = setup_test_db().await;
    let repo = PostgresApiKeyRepository::new(pool);
    let (key, plaintext) = create_api_key(&repo, 2).await;

    let candidates = repo
        .find_by_prefix(key_prefix(&plaintext).unwrap())
        .await
        .expect("lookup");
    assert!(candidates.iter().any(|c| c.id() == key.id()));

    let day_one = NaiveDate::from_ymd_opt(2024, 10, 1).unwrap();
    assert!(repo.consume_quota(key.id(), day_one).await.unwrap());
    assert!(repo.consume_quota(key.id(), day_one).await.unwrap());
    assert!(!repo.consume_quota(key.id(), day_one).await.unwrap());

    let day_two = day_one.succ_opt().unwrap();
    assert!(repo.consume_quota(key.id(), day_two).await.unwrap());

    let stored = repo.find_by_id(key.id()).await.unwrap().unwrap();
    assert_eq!(stored.current_day_usage(), 1);
    assert_eq!(stored.last_usage_date(), Some(day_two));
    assert_eq!(stored.total_usage(), 3);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_api_key_usage_recorded() {
    let pool = setup_test_db().await;
    let repo = PostgresApiKeyRepository::new(pool);
    let (key, _) = create_api_key(&repo, 100).await;

    let event = UsageEvent {
        endpoint: "/api/external/search".to_string(),
        method: "GET".to_string(),
        status_code: 200,
        user_agent: Some("partner-sdk/1.0".to_string()),
        ip_address: Some("203.0.113.7".to_string()),
        response_time_ms: 42,
    };
    repo.record_usage(key.id(), &event).await.expect("record");

    let usage = repo
        .usage_since(key.id(), Utc::now() - Duration::days(1))
        .await
        .expect("usage");
    assert_eq!(usage.len(), 1);
    assert_eq!(usage[0].status_code, 200);
    assert_eq!(usage[0].response_time_ms, Some(42));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_api_key_revocation_persists() {
    let pool = setup_test_db().await;
    let repo = PostgresApiKeyRepository::new(pool);
    let (mut key, _) = create_api_key(&repo, 10).await;

    key.revoke();
    repo.save(&key).await.expect("save");

    let stored = repo.find_by_id(key.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), key.status());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_asset_disposal_is_transactional() {
    let pool = setup_test_db().await;
    let repo = PostgresAssetRepository::new(pool);
    let asset = Asset::new(AssetDetails {
        name: unique("Laptop"),
        quantity: Some(1),
        purchase_cost: Some(Decimal::new(120000, 2)),
        ..Default::default()
    })
    .unwrap();
    repo.save(&asset).await.expect("save asset");

    let request = DisposalRequest {
        asset_id: asset.id(),
        disposal_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        method: "Sold".to_string(),
        reason: Some("End of life".to_string()),
        approved_by: None,
    };
    let disposal = repo.dispose(request.clone()).await.expect("dispose");
    assert_eq!(disposal.asset_id, asset.id());

    let stored = repo.find_by_id(asset.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), AssetStatus::Disposed);

    // Second disposal fails and records nothing
    let result = repo.dispose(request).await;
    assert!(matches!(result, Err(RepositoryError::Domain(_))));
    let disposals = repo.list_disposals().await.unwrap();
    assert_eq!(
        disposals.iter().filter(|d| d.asset_id == asset.id()).count(),
        1
    );

    let missing = repo
        .dispose(DisposalRequest {
            asset_id: Uuid::new_v4(),
            disposal_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            method: "Sold".to_string(),
            reason: None,
            approved_by: None,
        })
        .await;
    assert!(matches!(missing, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_inventory_stock_adjustment_records_movement() {
    let pool = setup_test_db().await;
    let repo = PostgresInventoryRepository::new(pool);
    let item = InventoryItem::new(InventoryDetails {
        name: "Printer paper".to_string(),
        sku: unique("SKU"),
        quantity: Some(10),
        unit_price: None,
        reorder_level: Some(3),
        category_id: None,
        supplier_id: None,
        branch_id: None,
        location_id: None,
    })
    .unwrap();
    repo.create(&item).await.expect("create item");

    let updated = repo
        .adjust_stock(
            item.id,
            StockAdjustment {
                quantity: 4,
                reason: Some("Used for onboarding".to_string()),
            },
        )
        .await
        .expect("adjust");
    assert_eq!(updated.quantity, 4);

    // Unchanged quantity records nothing
    repo.adjust_stock(
        item.id,
        StockAdjustment {
            quantity: 4,
            reason: None,
        },
    )
    .await
    .expect("no-op adjust");

    let movements = repo.movements(item.id).await.unwrap();
    assert_eq!(movements.len(), 1);
    assert_eq!(movements[0].movement_type, MovementType::Out);
    assert_eq!(movements[0].quantity, 6);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_library_checkout_and_return() {
    let pool = setup_test_db().await;
    let repo = PostgresLibraryRepository::new(pool);
    let book = Book::new(BookDetails {
        title: "The Rust Programming Language".to_string(),
        author: "Klabnik & Nichols".to_string(),
        isbn: Some(unique("isbn")),
    })
    .unwrap();
    repo.create_book(&book).await.expect("create book");

    let action = |action| BookActionRequest {
        book_id: book.id,
        user_name: "ada".to_string(),
        action,
    };

    let log = repo.record_action(action(BookAction::Checkout)).await.unwrap();
    assert_eq!(log.action, BookAction::Checkout);
    assert!(repo.record_action(action(BookAction::Checkout)).await.is_err());
    repo.record_action(action(BookAction::Return)).await.unwrap();

    let books = repo.list_books().await.unwrap();
    let stored = books.iter().find(|b| b.id == book.id).unwrap();
    assert!(stored.available);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_announcement_reaches_every_recipient() {
    let pool = setup_test_db().await;
    let repo = PostgresNotificationRepository::new(pool);
    let (first, second) = (Uuid::new_v4(), Uuid::new_v4());

    let notifications = Announcement {
        recipient_ids: vec![first, second, first],
        message: "Office closed on Friday".to_string(),
    }
    .into_notifications()
    .unwrap();
    repo.create_many(&notifications).await.expect("announce");

    let inbox = repo.for_recipient(first).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert!(!inbox[0].is_read);

    let read = repo.mark_read(inbox[0].id).await.unwrap();
    assert!(read.is_read);
    assert!(matches!(
        repo.mark_read(Uuid::new_v4()).await,
        Err(RepositoryError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_dashboard_metrics_aggregate() {
    let pool = setup_test_db().await;
    let assets = PostgresAssetRepository::new(pool.clone());
    let asset = Asset::new(AssetDetails {
        name: unique("Chair"),
        quantity: Some(1),
        ..Default::default()
    })
    .unwrap();
    assets.save(&asset).await.unwrap();

    let metrics = PostgresMetricsRepository::new(pool)
        .asset_metrics(5)
        .await
        .expect("metrics");

    assert!(metrics.total_count >= 1);
    assert!(metrics.low_stock_count >= 1);
    assert_eq!(metrics.low_stock_threshold, 5);
    assert!(metrics.low_stock_locations.len() <= 5);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_stale_asset_copy_cannot_undo_disposal() {
    let pool = setup_test_db().await;
    let repo = PostgresAssetRepository::new(pool);
    let asset = Asset::new(AssetDetails {
        name: unique("Monitor"),
        quantity: Some(1),
        ..Default::default()
    })
    .unwrap();
    repo.save(&asset).await.expect("save asset");

    // Loaded before the disposal commits
    let mut stale = repo.find_by_id(asset.id()).await.unwrap().unwrap();
    repo.dispose(DisposalRequest {
        asset_id: asset.id(),
        disposal_date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
        method: "Donated".to_string(),
        reason: None,
        approved_by: None,
    })
    .await
    .expect("dispose");

    stale
        .apply(AssetChanges {
            name: Some("Renamed monitor".to_string()),
            ..Default::default()
        })
        .unwrap();
    let result = repo.save(&stale).await;
    assert!(matches!(
        result,
        Err(RepositoryError::Domain(DomainError::InvalidState(_)))
    ));

    let result = repo
        .update(
            asset.id(),
            AssetChanges {
                status: Some(AssetStatus::Available),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(RepositoryError::Domain(DomainError::InvalidState(_)))
    ));

    let stored = repo.find_by_id(asset.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), AssetStatus::Disposed);
    assert_eq!(stored.name(), asset.name());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_asset_update_applies_changes() {
    let pool = setup_test_db().await;
    let repo = PostgresAssetRepository::new(pool);
    let asset = Asset::new(AssetDetails {
        name: unique("Whiteboard"),
        ..Default::default()
    })
    .unwrap();
    repo.save(&asset).await.expect("save asset");

    let updated = repo
        .update(
            asset.id(),
            AssetChanges {
                status: Some(AssetStatus::Assigned),
                quantity: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.status(), AssetStatus::Assigned);

    let stored = repo.find_by_id(asset.id()).await.unwrap().unwrap();
    assert_eq!(stored.status(), AssetStatus::Assigned);
    assert_eq!(stored.quantity(), Some(3));

    let missing = repo.update(Uuid::new_v4(), AssetChanges::default()).await;
    assert!(matches!(missing, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_unknown_reference_reports_missing_entity() {
    let pool = setup_test_db().await;
    let assets = PostgresAssetRepository::new(pool.clone());
    let asset = Asset::new(AssetDetails {
        name: unique("Chair"),
        category_id: Some(Uuid::new_v4()),
        ..Default::default()
    })
    .unwrap();

    let result = assets.save(&asset).await;
    assert!(matches!(
        result,
        Err(RepositoryError::MissingReference { entity: "Category" })
    ));

    let company = Company::new(CompanyDetails {
        name: unique("Hub Ltd"),
        ..Default::default()
    })
    .unwrap();
    PostgresCompanyRepository::new(pool.clone())
        .save(&company)
        .await
        .unwrap();
    let department = Department::new(DepartmentDetails {
        company_id: company.id,
        branch_id: Some(Uuid::new_v4()),
        name: "Facilities".to_string(),
        description: None,
    })
    .unwrap();
    let result = PostgresDepartmentRepository::new(pool).save(&department).await;
    assert!(matches!(
        result,
        Err(RepositoryError::MissingReference { entity: "Branch" })
    ));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_search_matches_literally_and_paginates() {
    let pool = setup_test_db().await;
    let lookups = PostgresLookupRepository::new(pool.clone());
    let assets = PostgresAssetRepository::new(pool.clone());

    // `_` and `%` in the filter must not act as wildcards
    let tag = Uuid::new_v4().simple().to_string();
    let literal = LookupEntry::new(
        LookupKind::Category,
        LookupDetails {
            name: format!("{}_50%off", tag),
        },
    )
    .unwrap();
    let lookalike = LookupEntry::new(
        LookupKind::Category,
        LookupDetails {
            name: format!("{}x50yoff", tag),
        },
    )
    .unwrap();
    lookups.create(LookupKind::Category, &literal).await.unwrap();
    lookups.create(LookupKind::Category, &lookalike).await.unwrap();

    for (name, category) in [
        ("Alpha", literal.id),
        ("Charlie", literal.id),
        ("Bravo", literal.id),
        ("Delta", lookalike.id),
    ] {
        let asset = Asset::new(AssetDetails {
            name: name.to_string(),
            category_id: Some(category),
            ..Default::default()
        })
        .unwrap();
        assets.save(&asset).await.unwrap();
    }

    let search = PostgresSearchRepository::new(pool);
    let query = |page: u32, order: &str| {
        SearchQuery::from_params(SearchParams {
            // Case-insensitive match
            category: Some(format!("{}_50%", tag.to_uppercase())),
            page: Some(page),
            limit: Some(2),
            sort_by: Some("name".to_string()),
            order: Some(order.to_string()),
            ..Default::default()
        })
        .unwrap()
    };

    let first = search.search(&query(1, "ASC")).await.expect("search");
    assert_eq!(first.assets.total, 3);
    assert_eq!(asset_names(&first.assets.data), ["Alpha", "Bravo"]);
    assert_eq!(first.inventories.total, 0);
    assert!(first.inventories.data.is_empty());

    let second = search.search(&query(2, "ASC")).await.unwrap();
    assert_eq!(second.assets.total, 3);
    assert_eq!(asset_names(&second.assets.data), ["Charlie"]);

    let descending = search.search(&query(1, "DESC")).await.unwrap();
    assert_eq!(asset_names(&descending.assets.data), ["Charlie", "Bravo"]);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
async fn test_organization_names_are_unique() {
    let pool = setup_test_db().await;
    let companies = PostgresCompanyRepository::new(pool.clone());
    let departments = PostgresDepartmentRepository::new(pool.clone());
    let locations = PostgresLocationRepository::new(pool);

    let company_name = unique("Acme");
    let company = |name: &str| {
        Company::new(CompanyDetails {
            name: name.to_string(),
            ..Default::default()
        })
        .unwrap()
    };
    let acme = company(&company_name);
    companies.save(&acme).await.unwrap();
    assert!(matches!(
        companies.save(&company(&company_name)).await,
        Err(RepositoryError::Conflict(_))
    ));

    // Branch names are unique per company only
    let branch = |company_id| {
        Branch::new(
            company_id,
            BranchDetails {
                name: "Yaba".to_string(),
                address: None,
            },
        )
        .unwrap()
    };
    companies.add_branch(&branch(acme.id)).await.unwrap();
    assert!(matches!(
        companies.add_branch(&branch(acme.id)).await,
        Err(RepositoryError::Conflict(_))
    ));
    let other = company(&unique("Globex"));
    companies.save(&other).await.unwrap();
    companies.add_branch(&branch(other.id)).await.unwrap();

    let department = |company_id| {
        Department::new(DepartmentDetails {
            company_id,
            branch_id: None,
            name: "Operations".to_string(),
            description: None,
        })
        .unwrap()
    };
    departments.save(&department(acme.id)).await.unwrap();
    assert!(matches!(
        departments.save(&department(acme.id)).await,
        Err(RepositoryError::Conflict(_))
    ));
    departments.save(&department(other.id)).await.unwrap();

    let location = |name: String| {
        Location::new(LocationDetails {
            name,
            address: None,
            is_active: None,
        })
        .unwrap()
    };
    let taken = unique("Ground floor");
    locations.save(&location(taken.clone())).await.unwrap();
    let mut renamed = location(unique("Annex"));
    locations.save(&renamed).await.unwrap();

    renamed
        .apply(LocationChanges {
            name: Some(taken),
            ..Default::default()
        })
        .unwrap();
    assert!(matches!(
        locations.save(&renamed).await,
        Err(RepositoryError::Conflict(_))
    ));
}

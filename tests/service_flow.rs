//! Service-level behavior over the in-memory store.

use catalog_service::model::PicInput;
use catalog_service::{
    AppError, LookupKey, ManufacturerPatch, ManufacturerService, MemoryStore, Page,
    RequestContext, SearchQuery, Status,
};
use serde_json::json;

fn ctx(tenant: &str) -> RequestContext {
    RequestContext::new(tenant)
}

fn patch(code: &str, name: &str) -> ManufacturerPatch {
    ManufacturerPatch {
        code: Some(code.into()),
        name: Some(name.into()),
        ..Default::default()
    }
}

#[tokio::test]
async fn create_sets_defaults_and_normalizes_code() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let entity = ManufacturerService::create(&store, patch("ACME", "Acme Corp"), &ctx)
        .await
        .unwrap();

    assert_eq!(entity.status, Status::Active);
    assert_eq!(entity.tenant, "t1");
    assert_eq!(entity.code, "acme");
    assert_eq!(entity.name, "Acme Corp");
}

#[tokio::test]
async fn create_requires_code_before_name() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let err = ManufacturerService::create(&store, ManufacturerPatch::default(), &ctx)
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::Validation(msg) if msg == "code is required"));

    let err = ManufacturerService::create(
        &store,
        ManufacturerPatch {
            code: Some("acme".into()),
            ..Default::default()
        },
        &ctx,
    )
    .await
    .unwrap_err();
    assert!(matches!(&err, AppError::Validation(msg) if msg == "name is required"));
}

#[tokio::test]
async fn duplicate_code_differing_only_by_case_conflicts() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    ManufacturerService::create(&store, patch("acme", "Acme"), &ctx)
        .await
        .unwrap();
    let err = ManufacturerService::create(&store, patch("ACME", "Other"), &ctx)
        .await
        .unwrap_err();
    // The conflict names the normalized code, the same casing the store
    // itself reports on a unique-index violation.
    assert!(matches!(&err, AppError::Conflict(msg) if msg.contains("'acme' already exists")));
}

#[tokio::test]
async fn same_code_in_another_tenant_is_allowed() {
    let store = MemoryStore::new();

    ManufacturerService::create(&store, patch("acme", "Acme"), &ctx("t1"))
        .await
        .unwrap();
    let other = ManufacturerService::create(&store, patch("acme", "Acme"), &ctx("t2"))
        .await
        .unwrap();
    assert_eq!(other.tenant, "t2");
}

#[tokio::test]
async fn update_applies_only_present_fields() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let mut model = patch("acme", "Acme Corp");
    model.pic = Some(serde_json::from_value::<PicInput>(json!("http://x/img.png")).unwrap());
    let created = ManufacturerService::create(&store, model, &ctx).await.unwrap();

    let updated = ManufacturerService::update(
        &store,
        created.id,
        ManufacturerPatch {
            description: Some("tools".into()),
            ..Default::default()
        },
        &ctx,
    )
    .await
    .unwrap();

    assert_eq!(updated.description.as_deref(), Some("tools"));
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.code, created.code);
    assert_eq!(updated.pic, created.pic);
}

#[tokio::test]
async fn update_to_taken_code_conflicts_but_own_code_does_not() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let a = ManufacturerService::create(&store, patch("alpha", "Alpha"), &ctx)
        .await
        .unwrap();
    ManufacturerService::create(&store, patch("beta", "Beta"), &ctx)
        .await
        .unwrap();

    let err = ManufacturerService::update(
        &store,
        a.id,
        ManufacturerPatch {
            code: Some("BETA".into()),
            ..Default::default()
        },
        &ctx,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // Reassigning the current code (case-insensitively) is a no-op, not a
    // conflict.
    let same = ManufacturerService::update(
        &store,
        a.id,
        ManufacturerPatch {
            code: Some("ALPHA".into()),
            ..Default::default()
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(same.code, "alpha");
}

#[tokio::test]
async fn empty_string_fields_are_ignored_on_update() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let mut model = patch("acme", "Acme Corp");
    model.description = Some("tools".into());
    model.pic = Some(serde_json::from_value::<PicInput>(json!("http://x/img.png")).unwrap());
    let created = ManufacturerService::create(&store, model, &ctx).await.unwrap();

    let updated = ManufacturerService::update(
        &store,
        created.id,
        ManufacturerPatch {
            code: Some("".into()),
            name: Some("".into()),
            description: Some("   ".into()),
            pic: Some(serde_json::from_value::<PicInput>(json!("")).unwrap()),
            ..Default::default()
        },
        &ctx,
    )
    .await
    .unwrap();

    assert_eq!(updated.code, "acme");
    assert_eq!(updated.name, "Acme Corp");
    assert_eq!(updated.description.as_deref(), Some("tools"));
    assert_eq!(updated.pic, created.pic);
}

#[tokio::test]
async fn update_missing_id_is_not_found() {
    let store = MemoryStore::new();
    let err = ManufacturerService::update(
        &store,
        uuid::Uuid::new_v4(),
        ManufacturerPatch::default(),
        &ctx("t1"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn remove_soft_deletes_and_keeps_record_fetchable() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let created = ManufacturerService::create(&store, patch("acme", "Acme"), &ctx)
        .await
        .unwrap();
    ManufacturerService::remove(&store, created.id, &ctx).await.unwrap();

    // Excluded from default search...
    let result = ManufacturerService::search(&store, &SearchQuery::default(), None, &ctx)
        .await
        .unwrap();
    assert_eq!(result.count, 0);

    // ...but still resolvable by id, with only status changed.
    let fetched = ManufacturerService::get(&store, &LookupKey::Id(created.id), &ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.status, Status::Inactive);
    assert_eq!(fetched.name, created.name);
    assert_eq!(fetched.code, created.code);

    // Status filter override finds it again.
    let inactive = ManufacturerService::search(
        &store,
        &SearchQuery {
            status: Some(Status::Inactive),
            ..Default::default()
        },
        None,
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(inactive.count, 1);
}

#[tokio::test]
async fn search_name_is_case_insensitive_substring_and_count_ignores_paging() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    for (code, name) in [("a1", "ABC Corp"), ("a2", "xabcx"), ("a3", "Other")] {
        ManufacturerService::create(&store, patch(code, name), &ctx)
            .await
            .unwrap();
    }

    let query = SearchQuery {
        name: Some("abc".into()),
        ..Default::default()
    };
    let all = ManufacturerService::search(&store, &query, None, &ctx)
        .await
        .unwrap();
    assert_eq!(all.count, 2);
    assert_eq!(all.items.len(), 2);

    let paged = ManufacturerService::search(&store, &query, Some(&Page { skip: 0, limit: 1 }), &ctx)
        .await
        .unwrap();
    assert_eq!(paged.count, 2);
    assert_eq!(paged.items.len(), 1);
}

#[tokio::test]
async fn get_resolves_id_code_and_query_object_shapes() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let created = ManufacturerService::create(&store, patch("ACME", "Acme"), &ctx)
        .await
        .unwrap();

    let by_id = ManufacturerService::get(
        &store,
        &LookupKey::parse(&created.id.to_string()),
        &ctx,
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(by_id.id, created.id);

    let by_code = ManufacturerService::get(&store, &LookupKey::parse("acme"), &ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_code.id, created.id);

    let by_query = LookupKey::from_query(&json!({"code": "ACME"})).unwrap();
    let found = ManufacturerService::get(&store, &by_query, &ctx)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, created.id);

    assert!(LookupKey::from_query(&json!({"nope": true})).is_none());
}

#[tokio::test]
async fn id_lookups_are_tenant_scoped() {
    let store = MemoryStore::new();

    let created = ManufacturerService::create(&store, patch("acme", "Acme"), &ctx("t1"))
        .await
        .unwrap();
    let cross = ManufacturerService::get(&store, &LookupKey::Id(created.id), &ctx("t2"))
        .await
        .unwrap();
    assert!(cross.is_none());
}

#[tokio::test]
async fn pic_shorthand_and_object_forms() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let mut model = patch("a", "A");
    model.pic = Some(serde_json::from_value(json!("http://x/img.png")).unwrap());
    let short = ManufacturerService::create(&store, model, &ctx).await.unwrap();
    let pic = short.pic.unwrap();
    assert_eq!(pic.url, "http://x/img.png");
    assert_eq!(pic.thumbnail, "http://x/img.png");

    let mut model = patch("b", "B");
    model.pic = Some(
        serde_json::from_value(json!({"url": "http://x/a.png", "thumbnail": "http://x/b.png"}))
            .unwrap(),
    );
    let full = ManufacturerService::create(&store, model, &ctx).await.unwrap();
    let pic = full.pic.unwrap();
    assert_eq!(pic.url, "http://x/a.png");
    assert_eq!(pic.thumbnail, "http://x/b.png");
}

#[tokio::test]
async fn reusing_an_inactive_records_code_is_allowed() {
    let store = MemoryStore::new();
    let ctx = ctx("t1");

    let old = ManufacturerService::create(&store, patch("acme", "Old Acme"), &ctx)
        .await
        .unwrap();
    ManufacturerService::remove(&store, old.id, &ctx).await.unwrap();

    // Only one *active* record per (tenant, code); the retired record does
    // not block the code.
    let fresh = ManufacturerService::create(&store, patch("acme", "New Acme"), &ctx)
        .await
        .unwrap();
    assert_eq!(fresh.code, "acme");
}

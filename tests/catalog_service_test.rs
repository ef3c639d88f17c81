use std::collections::HashSet;
use std::sync::Arc;

use course_catalog::error::AppError;
use course_catalog::ids::SequenceGenerator;
use course_catalog::models::{Course, EnrolledCourse, Record};
use course_catalog::services::CatalogService;
use course_catalog::store::{Collection, MemoryCollectionClient, Operation};
use course_catalog::views::DraftField;
use serde_json::json;

async fn seeded_store() -> Arc<MemoryCollectionClient> {
    let store = Arc::new(MemoryCollectionClient::new());
    store
        .seed(
            Collection::Courses,
            "c1",
            json!({
                "_id": "c1",
                "title": "Algebra",
                "instructor": "Lin",
                "likes": 3,
                "syllabus": [{ "week": 1, "topic": "Sets" }, { "week": 2, "topic": "Groups" }]
            }),
        )
        .await;
    store
        .seed(
            Collection::Courses,
            "c2",
            json!({ "_id": "c2", "title": "Biology", "instructor": "Ng" }),
        )
        .await;
    store
        .seed(
            Collection::EnrolledCourses,
            "e1",
            json!({ "_id": "e1", "title": "Physics", "instructor": "Noether", "progress": 40 }),
        )
        .await;
    store
}

fn service(store: Arc<MemoryCollectionClient>, prefix: &str) -> CatalogService {
    CatalogService::new(store, Arc::new(SequenceGenerator::new(prefix)))
}

#[tokio::test]
async fn test_load_empty_store_is_not_an_error() {
    let store = Arc::new(MemoryCollectionClient::new());
    let service = service(store, "tmp");

    let courses = service.load::<Course>().await.expect("empty load succeeds");
    assert!(courses.is_empty());

    let state = service.mount_course_list().await;
    assert!(!state.is_loading());
    assert_eq!(state.error(), None);
}

#[tokio::test]
async fn test_load_failure_is_reported() {
    let store = seeded_store().await;
    store.set_failing(Operation::Fetch, true).await;
    let service = service(store, "tmp");

    assert!(matches!(service.load::<Course>().await, Err(AppError::FetchFailed(_))));

    let list = service.mount_course_list().await;
    assert!(!list.is_loading());
    assert_eq!(list.error(), Some("Failed to load courses."));

    let dashboard = service.mount_dashboard().await;
    assert_eq!(dashboard.error(), Some("Failed to load courses."));
}

#[tokio::test]
async fn test_like_round_trip_persists_counter() {
    let store = seeded_store().await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;

    service.toggle_like(&mut list, "c1").await.expect("like succeeds");
    assert_eq!(list.courses()[0].likes(), 4);
    assert!(list.is_liked("c1"));
    assert_eq!(store.snapshot(Collection::Courses).await["c1"]["likes"], json!(4));

    service.toggle_like(&mut list, "c1").await.expect("unlike succeeds");
    assert_eq!(list.courses()[0].likes(), 3);
    assert!(!list.is_liked("c1"));
    assert_eq!(store.snapshot(Collection::Courses).await["c1"]["likes"], json!(3));

    // the patch only touched the counter
    assert_eq!(store.snapshot(Collection::Courses).await["c1"]["title"], json!("Algebra"));
}

#[tokio::test]
async fn test_failed_patch_changes_nothing() {
    let store = seeded_store().await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;
    let before = list.courses().to_vec();

    store.set_failing(Operation::Patch, true).await;
    let result = service.toggle_like(&mut list, "c1").await;

    assert!(matches!(result, Err(AppError::PatchFailed(_))));
    assert_eq!(list.courses(), before.as_slice());
    assert!(!list.is_liked("c1"));
    assert_eq!(list.notice(), Some("Failed to update likes."));
    assert_eq!(store.snapshot(Collection::Courses).await["c1"]["likes"], json!(3));
}

#[tokio::test]
async fn test_create_appends_with_assigned_key() {
    let store = seeded_store().await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;

    list.open_form(service.ids());
    list.edit_draft(DraftField::Title, "Topology").unwrap();
    list.edit_draft(DraftField::Instructor, "Hausdorff").unwrap();
    list.edit_draft(DraftField::Description, "Open and closed sets").unwrap();
    list.edit_syllabus_topic(0, "Metric spaces").unwrap();

    service.submit_draft(&mut list).await.expect("create succeeds");

    let created = list.courses().last().expect("appended");
    assert_eq!(list.courses().len(), 3);
    assert!(created.id.starts_with("-mem"));
    assert_eq!(created.title, "Topology");
    assert!(!list.is_form_visible());

    let stored = store.snapshot(Collection::Courses).await;
    let persisted = &stored[&created.id];
    assert_eq!(persisted["title"], json!("Topology"));
    assert_eq!(persisted["_id"], json!(created.id));
    assert_eq!(created.key(), created.id);
    assert_eq!(persisted["syllabus"][0], json!({ "week": 1, "topic": "Metric spaces" }));
    assert!(persisted["syllabus"][0].get("expanded").is_none());
    assert!(persisted.get("likes").is_none());
}

#[tokio::test]
async fn test_failed_create_keeps_draft_and_list() {
    let store = seeded_store().await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;

    list.open_form(service.ids());
    list.edit_draft(DraftField::Title, "Topology").unwrap();
    list.edit_draft(DraftField::Instructor, "Hausdorff").unwrap();
    list.edit_draft(DraftField::Description, "Open sets").unwrap();

    store.set_failing(Operation::Create, true).await;
    let result = service.submit_draft(&mut list).await;

    assert!(matches!(result, Err(AppError::CreateFailed(_))));
    assert_eq!(list.courses().len(), 2);
    assert!(list.is_form_visible());
    assert_eq!(list.draft().record().title, "Topology");
    assert_eq!(store.snapshot(Collection::Courses).await.len(), 2);

    store.set_failing(Operation::Create, false).await;
    service.submit_draft(&mut list).await.expect("retry by the user succeeds");
    assert_eq!(list.courses().len(), 3);
}

#[tokio::test]
async fn test_invalid_draft_issues_no_request() {
    let store = seeded_store().await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;
    let requests = store.request_count();

    list.open_form(service.ids());
    list.edit_draft(DraftField::Title, "Only a title").unwrap();
    let result = service.submit_draft(&mut list).await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
    assert_eq!(store.request_count(), requests);
}

#[tokio::test]
async fn test_detail_and_dashboard_mounts() {
    let store = seeded_store().await;
    let service = service(store, "tmp");

    let mut detail = service.mount_course_detail("c1").await;
    assert_eq!(detail.course().unwrap().title, "Algebra");
    assert_eq!(detail.syllabus().len(), 2);
    assert!(detail.toggle_expand(0));
    assert!(detail.syllabus()[0].expanded);

    let missing = service.mount_course_detail("nope").await;
    assert_eq!(missing.error(), Some("Course not found."));

    let mut dashboard = service.mount_dashboard().await;
    let enrolled: &[EnrolledCourse] = dashboard.enrolled();
    assert_eq!(enrolled.len(), 1);
    assert_eq!(enrolled[0].progress, Some(40.0));
    assert!(dashboard.toggle_completed("e1").unwrap());
    assert!(dashboard.is_completed("e1"));
}

#[tokio::test]
async fn test_like_patches_the_container_key() {
    let store = Arc::new(MemoryCollectionClient::new());
    store
        .seed(
            Collection::Courses,
            "k1",
            json!({ "_id": "c1", "title": "Algebra", "instructor": "Lin", "likes": 3 }),
        )
        .await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;

    let result = service.toggle_like(&mut list, "c1").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    service.toggle_like(&mut list, "k1").await.expect("like succeeds");
    assert_eq!(list.courses()[0].likes(), 4);

    let stored = store.snapshot(Collection::Courses).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored["k1"]["likes"], json!(4));
    assert_eq!(stored["k1"]["_id"], json!("c1"));
    assert!(stored.get("c1").is_none());

    let detail = service.mount_course_detail("k1").await;
    assert_eq!(detail.course().unwrap().likes(), 4);
}

#[tokio::test]
async fn test_created_course_survives_reload_like_and_detail() {
    let store = seeded_store().await;
    let service = service(store.clone(), "tmp");
    let mut list = service.mount_course_list().await;

    list.open_form(service.ids());
    list.edit_draft(DraftField::Title, "Topology").unwrap();
    list.edit_draft(DraftField::Instructor, "Hausdorff").unwrap();
    list.edit_draft(DraftField::Description, "Open sets").unwrap();
    service.submit_draft(&mut list).await.expect("create succeeds");
    let key = list.courses().last().unwrap().key().to_string();

    let mut reloaded = service.mount_course_list().await;
    assert_eq!(reloaded.courses().len(), 3);
    let created = reloaded.courses().iter().find(|c| c.title == "Topology").unwrap();
    assert_eq!(created.key(), key);
    assert_eq!(created.id, key);

    service.toggle_like(&mut reloaded, &key).await.expect("like succeeds");
    assert!(reloaded.is_liked(&key));

    let stored = store.snapshot(Collection::Courses).await;
    assert_eq!(stored.len(), 3);
    assert_eq!(stored[&key]["likes"], json!(1));

    let detail = service.mount_course_detail(&key).await;
    assert_eq!(detail.error(), None);
    assert_eq!(detail.course().unwrap().title, "Topology");
    assert_eq!(detail.course().unwrap().likes(), 1);

    let again = service.mount_course_list().await;
    let keys: HashSet<&str> = again.courses().iter().map(|c| c.key()).collect();
    let ids: HashSet<&str> = again.courses().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(keys.len(), 3);
    assert_eq!(ids.len(), 3);
}

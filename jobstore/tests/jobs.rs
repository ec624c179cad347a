use bson::oid::ObjectId;
use chrono::{TimeZone, Utc};
use jobstore::{memory::InMemoryStore, prelude::*};

const JOBS: &str = "jobdetails";

fn job(title: &str, company_name: &str, location: &str) -> JobDetails {
    JobDetails {
        title: title.to_string(),
        company_name: company_name.to_string(),
        location: location.to_string(),
        ..Default::default()
    }
}

async fn context_with(
    store: InMemoryStore,
    jobs: Vec<JobDetails>,
) -> (JobStoreContext<InMemoryStore>, Vec<ObjectId>) {
    let config = JobStoreConfig::new("memory://", "jobcrawler", JOBS);
    let context = JobStoreContext::init(InMemoryStore::builder().with_store(store), &config)
        .await
        .unwrap();
    let ids = context
        .connection()
        .typed_collection_named::<JobDetails>(JOBS)
        .add_many(jobs)
        .await
        .unwrap();

    (context, ids)
}

fn ids_of(jobs: &[JobDetails]) -> Vec<ObjectId> {
    jobs.iter().map(|job| job.id.unwrap()).collect()
}

#[tokio::test]
async fn location_and_keywords_narrow_the_listing() {
    let (context, ids) = context_with(
        InMemoryStore::new(),
        vec![job("Engineer", "Acme", "NYC"), job("Engineer", "Acme", "LA")],
    )
    .await;
    let service = context.service();

    let nyc = service
        .get_jobs(Some(&SearchCriteria::new("NYC", "Engineer")), 10, 1)
        .await
        .unwrap();
    let anywhere = service
        .get_jobs(Some(&SearchCriteria::new("", "Engineer")), 10, 1)
        .await
        .unwrap();
    let by_company = service
        .get_jobs(Some(&SearchCriteria::new("LA", "Acme")), 10, 1)
        .await
        .unwrap();

    assert_eq!(ids_of(&nyc.jobs), vec![ids[0]]);
    assert_eq!(ids_of(&anywhere.jobs), ids);
    assert_eq!(ids_of(&by_company.jobs), vec![ids[1]]);
}

#[tokio::test]
async fn exact_keywords_miss_partial_titles_unless_contains_is_selected() {
    let (context, ids) = context_with(
        InMemoryStore::new(),
        vec![job("Senior Engineer", "Acme", "NYC"), job("Designer", "Beta", "NYC")],
    )
    .await;
    let criteria = SearchCriteria::new("NYC", "engineer");

    let exact = context.service().get_jobs(Some(&criteria), 10, 1).await.unwrap();
    let contains = JobService::from_connection(context.connection(), JOBS)
        .with_keyword_match(KeywordMatch::Contains)
        .get_jobs(Some(&criteria), 10, 1)
        .await
        .unwrap();

    assert!(exact.jobs.is_empty());
    assert_eq!(ids_of(&contains.jobs), vec![ids[0]]);
}

#[tokio::test]
async fn pages_follow_the_skip_formula() {
    let (context, ids) = context_with(
        InMemoryStore::new(),
        (1..=5).map(|n| job(&format!("Job {n}"), "Acme", "NYC")).collect(),
    )
    .await;
    let service = context.service();

    let first = service.get_jobs(None, 2, 1).await.unwrap();
    let second = service.get_jobs(None, 2, 2).await.unwrap();
    let zeroth = service.get_jobs(None, 2, 0).await.unwrap();
    let past_the_end = service.get_jobs(None, 2, 10).await.unwrap();

    assert_eq!(ids_of(&first.jobs), ids[0..2].to_vec());
    assert_eq!(ids_of(&second.jobs), ids[1..3].to_vec());
    assert_eq!(zeroth.jobs, first.jobs);
    assert!(past_the_end.jobs.is_empty());
    assert_eq!((second.page_size, second.page_number), (2, 2));
}

#[tokio::test]
async fn zero_page_size_uses_the_default() {
    let (context, _) = context_with(
        InMemoryStore::new(),
        (0..15).map(|n| job(&format!("Job {n}"), "Acme", "NYC")).collect(),
    )
    .await;

    let page = context.service().get_jobs(None, 0, 1).await.unwrap();

    assert_eq!(page.jobs.len() as i64, jobstore::page::DEFAULT_PAGE_SIZE);
}

#[tokio::test]
async fn negative_paging_is_rejected() {
    let (context, _) = context_with(InMemoryStore::new(), vec![job("Engineer", "Acme", "NYC")]).await;

    assert!(matches!(
        context.service().get_jobs(None, 10, -1).await,
        Err(StoreError::Validation(_))
    ));
    assert!(matches!(
        context.service().get_jobs(None, -5, 1).await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn empty_collection_yields_empty_pages() {
    let (context, ids) = context_with(InMemoryStore::new(), Vec::new()).await;
    let service = context.service();

    assert!(ids.is_empty());
    for criteria in [None, Some(SearchCriteria::new("NYC", "Engineer"))] {
        for (size, number) in [(0, 0), (1, 1), (10, 3)] {
            let page = service.get_jobs(criteria.as_ref(), size, number).await.unwrap();
            assert!(page.jobs.is_empty());
        }
    }
}

#[tokio::test]
async fn inserted_job_round_trips_by_id() {
    let (context, _) = context_with(InMemoryStore::new(), Vec::new()).await;
    let jobs = context.connection().typed_collection_named::<JobDetails>(JOBS);
    let posted = JobDetails {
        description: Some("Build things".to_string()),
        url: Some("https://jobs.example.com/1".to_string()),
        posted_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
        ..job("Engineer", "Acme", "NYC")
    };

    let id = jobs.add_single(posted.clone()).await.unwrap();
    let stored = jobs.get_by_id(&id).await.unwrap();

    assert_eq!(stored, JobDetails { id: Some(id), ..posted });
}

#[tokio::test]
async fn job_detail_lookup_distinguishes_missing_from_malformed() {
    let (context, ids) = context_with(InMemoryStore::new(), vec![job("Engineer", "Acme", "NYC")]).await;
    let service = context.service();

    let found = service.get_job_detail(&ids[0].to_hex()).await.unwrap();
    let missing = service.get_job_detail(&ObjectId::new().to_hex()).await.unwrap();

    assert_eq!(found.map(|job| job.title), Some("Engineer".to_string()));
    assert!(missing.is_none());
    assert!(matches!(
        service.get_job_detail("not-an-id").await,
        Err(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn get_by_id_reports_missing_documents() {
    let (context, _) = context_with(InMemoryStore::new(), Vec::new()).await;
    let jobs = context.connection().typed_collection_named::<JobDetails>(JOBS);

    let err = jobs.get_by_id(&ObjectId::new()).await.unwrap_err();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn unknown_user_name_yields_the_default_user() {
    let (context, _) = context_with(InMemoryStore::new(), Vec::new()).await;
    let users = context.connection().typed_collection::<User>();
    users
        .add_single(User {
            username: "ada".to_string(),
            email: Some("ada@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let known = users.get_by_user_name("ada").await.unwrap();
    let unknown = users.get_by_user_name("grace").await.unwrap();

    assert_eq!(known.email.as_deref(), Some("ada@example.com"));
    assert!(known.id.is_some());
    assert_eq!(unknown, User::default());
}

#[tokio::test]
async fn request_dto_drives_the_service() {
    let (context, ids) = context_with(
        InMemoryStore::new(),
        vec![job("Engineer", "Acme", "NYC"), job("Engineer", "Acme", "LA")],
    )
    .await;
    let request: GetJobsRequest = serde_json::from_value(serde_json::json!({
        "location": "LA",
        "keywords": "Engineer",
        "pageSize": 5,
        "pageNumber": 1,
    }))
    .unwrap();

    let page = context.service().handle(&request).await.unwrap();
    let body = serde_json::to_value(&page).unwrap();

    assert_eq!(ids_of(&page.jobs), vec![ids[1]]);
    assert_eq!(body["pageSize"], 5);
    assert_eq!(body["pageNumber"], 1);
    assert_eq!(body["jobs"][0]["companyName"], "Acme");
}

#[tokio::test]
async fn contexts_share_a_seeded_store_and_shutdown_is_idempotent() {
    let store = InMemoryStore::new();
    let (first, ids) = context_with(store.clone(), vec![job("Engineer", "Acme", "NYC")]).await;
    let (second, _) = context_with(store, Vec::new()).await;

    let seen = second.service().get_jobs(None, 10, 1).await.unwrap();
    assert_eq!(ids_of(&seen.jobs), ids);

    first.shutdown().await.unwrap();
    first.shutdown().await.unwrap();

    assert!(matches!(
        second.service().get_jobs(None, 10, 1).await,
        Err(StoreError::Connection(_))
    ));
}

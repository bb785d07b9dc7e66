//! Repository behaviour against a live database (`TEST_DATABASE_URL`); no-ops otherwise.

mod common;

use common::{ad, test_pool, unique};
use quizbox_db::maintenance::seed::sample_quizzes;
use quizbox_db::repositories::ad_repo::AdRepository;
use quizbox_db::repositories::quiz_repo::QuizRepository;

#[tokio::test]
async fn ctr_follows_impressions_and_clicks() {
    let Some(pool) = test_pool().await else { return };
    let repo = AdRepository::new(pool);
    let created = repo
        .create(&ad(&unique("ctr"), "https://cdn.example.com/ctr.png"))
        .await
        .unwrap();
    assert_eq!(created.ctr, 0.0);

    // a click before any impression leaves the rate at zero
    assert!(repo.record_click(created.id).await.unwrap());
    let row = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!((row.impressions, row.clicks, row.ctr), (0, 1, 0.0));

    for _ in 0..4 {
        assert!(repo.record_impression(created.id).await.unwrap());
    }
    let row = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!((row.impressions, row.clicks, row.ctr), (4, 1, 25.0));

    assert!(repo.record_click(created.id).await.unwrap());
    let row = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!((row.clicks, row.ctr), (2, 50.0));

    assert!(repo.record_impression(created.id).await.unwrap());
    let row = repo.get(created.id).await.unwrap().unwrap();
    assert_eq!(row.ctr, 40.0);

    assert!(repo.delete(created.id).await.unwrap());
    assert!(!repo.record_impression(created.id).await.unwrap());
    assert!(!repo.record_click(created.id).await.unwrap());
}

#[tokio::test]
async fn upsert_reports_insert_then_update() {
    let Some(pool) = test_pool().await else { return };
    let repo = QuizRepository::new(pool);

    let mut quiz = sample_quizzes().unwrap().remove(1);
    quiz.slug = unique("upsert").replace('_', "-");

    let first = repo.upsert(&quiz).await.unwrap();
    assert!(first.inserted);

    quiz.title = "Capitals, revised".to_string();
    let second = repo.upsert(&quiz).await.unwrap();
    assert!(!second.inserted);
    assert_eq!(second.quiz.id, first.quiz.id);
    assert_eq!(second.quiz.title, "Capitals, revised");

    let stored = repo.get_by_slug(&quiz.slug).await.unwrap().unwrap();
    assert_eq!(stored.title, "Capitals, revised");
    assert!(repo.delete(&quiz.slug).await.unwrap());
}

#[tokio::test]
async fn unreadable_quiz_data_is_skipped_in_listings() {
    let Some(pool) = test_pool().await else { return };
    let repo = QuizRepository::new(pool.clone());

    let mut good = sample_quizzes().unwrap().remove(0);
    good.slug = unique("good").replace('_', "-");
    repo.upsert(&good).await.unwrap();

    let broken = unique("broken").replace('_', "-");
    sqlx::query(
        "INSERT INTO quizzes (slug, title, quiz_data, status) VALUES ($1, 'Legacy', '{\"questions\": []}', 'published')",
    )
    .bind(&broken)
    .execute(&pool)
    .await
    .unwrap();

    let published = repo.list_published().await.unwrap();
    assert!(published.iter().any(|q| q.slug == good.slug));
    assert!(published.iter().all(|q| q.slug != broken));
    assert!(repo.list_all().await.unwrap().iter().all(|q| q.slug != broken));

    assert!(repo.get_published(&broken).await.is_err());
    assert!(repo.get_published(&good.slug).await.unwrap().is_some());

    assert!(repo.delete(&broken).await.unwrap());
    assert!(repo.delete(&good.slug).await.unwrap());
}

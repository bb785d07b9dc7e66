//! Whole-table operations against a live database (`TEST_DATABASE_URL`); no-ops otherwise.
//!
//! These empty `ads` and `quizzes`, so point them at a scratch database. Tests in this
//! file hold `TABLES` so they never overlap each other.

mod common;

use common::{ad, test_pool, unique};
use quizbox_db::maintenance::{seed, wipe};
use quizbox_db::repositories::ad_repo::AdRepository;
use quizbox_db::repositories::quiz_repo::QuizRepository;
use std::sync::Mutex;

static TABLES: Mutex<()> = Mutex::new(());

fn backup_names(file: &std::path::Path) -> Vec<String> {
    let rows: Vec<serde_json::Value> = serde_json::from_slice(&std::fs::read(file).unwrap()).unwrap();
    rows.iter()
        .filter_map(|row| row["name"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn export_and_wipe_backs_up_then_empties_both_tables() {
    let Some(pool) = test_pool().await else { return };
    let _tables = TABLES.lock().unwrap_or_else(|e| e.into_inner());
    let ads = AdRepository::new(pool.clone());
    let quizzes = QuizRepository::new(pool.clone());
    let dir = tempfile::tempdir().unwrap();

    let tag = unique("wipe");
    ads.create(&ad(&tag, "https://cdn.example.com/a.png")).await.unwrap();
    ads.create(&ad(&tag, "https://cdn.example.com/b.png")).await.unwrap();
    seed::seed_quizzes(&pool).await.unwrap();

    let report = wipe::export_and_wipe(&pool, dir.path()).await.unwrap();
    assert_eq!(backup_names(&report.ads_file).iter().filter(|n| **n == tag).count(), 2);
    assert_eq!(report.quizzes_count, 2);

    assert!(ads.list(None, None).await.unwrap().is_empty());
    assert!(quizzes.list_all().await.unwrap().is_empty());

    // identities restart after the wipe
    let fresh = ads.create(&ad(&tag, "https://cdn.example.com/c.png")).await.unwrap();
    assert_eq!(fresh.id, 1);
    assert!(ads.delete(fresh.id).await.unwrap());
}

#[tokio::test]
async fn rows_written_during_a_wipe_are_backed_up_or_kept() {
    let Some(pool) = test_pool().await else { return };
    let _tables = TABLES.lock().unwrap_or_else(|e| e.into_inner());
    let ads = AdRepository::new(pool.clone());
    let dir = tempfile::tempdir().unwrap();

    let tag = unique("late");
    let late_ad = ad(&tag, "https://cdn.example.com/late.png");
    let (report, late) = tokio::join!(
        wipe::export_and_wipe(&pool, dir.path()),
        ads.create(&late_ad),
    );
    let report = report.unwrap();
    let late = late.unwrap();

    let in_backup = backup_names(&report.ads_file).contains(&tag);
    let still_stored = ads.get(late.id).await.unwrap().is_some();
    assert!(in_backup != still_stored, "backed up: {}, stored: {}", in_backup, still_stored);

    if still_stored {
        assert!(ads.delete(late.id).await.unwrap());
    }
}

#[tokio::test]
async fn seeding_replaces_every_quiz() {
    let Some(pool) = test_pool().await else { return };
    let _tables = TABLES.lock().unwrap_or_else(|e| e.into_inner());
    let repo = QuizRepository::new(pool.clone());

    let mut extra = seed::sample_quizzes().unwrap().remove(0);
    extra.slug = unique("extra").replace('_', "-");
    repo.upsert(&extra).await.unwrap();

    let slugs = seed::seed_quizzes(&pool).await.unwrap();
    assert_eq!(slugs, vec!["which-dessert-are-you", "world-capitals-challenge"]);

    let mut stored: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|q| q.slug).collect();
    stored.sort();
    assert_eq!(stored, slugs);

    // seeding twice leaves the same two rows
    seed::seed_quizzes(&pool).await.unwrap();
    assert_eq!(repo.list_all().await.unwrap().len(), 2);

    assert_eq!(repo.delete_all().await.unwrap(), 2);
    assert!(repo.list_all().await.unwrap().is_empty());
}

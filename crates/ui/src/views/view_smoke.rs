use std::sync::Arc;
use std::time::Duration;

use services::ClickContext;
use storage::repository::{InMemoryRepository, KeyValueRepository, StorageError};
use tracker_core::milestone::NormalizedPoint;
use tracker_core::model::Mode;

use super::dashboard::DashboardIntent;
use super::test_harness::{setup_dashboard_harness, setup_dashboard_harness_with_repo, setup_failed_harness};

fn toggle(title: &str) -> DashboardIntent {
    DashboardIntent::ToggleTopic {
        title: title.to_string(),
        click: ClickContext::at(NormalizedPoint::CENTER),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn dashboard_smoke_renders_active_section() {
    let mut harness = setup_dashboard_harness().await;
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "LLD MASTER",
        "Foundations",
        "Objects and languages",
        "C++ Basics",
        "RAII first",
        "Concurrency",
        "pill-1",
        "prio-high",
        "Read Notes",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("width: 0%;"), "mastery should start empty in {html}");
    assert!(!html.contains("Mutex"), "inactive section rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn toggling_a_topic_updates_card_and_storage() {
    let mut harness = setup_dashboard_harness().await;
    harness.rebuild();

    harness.handles.dispatch().call(toggle("C++ Basics"));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("topic-card prio-high completed"), "card not completed in {html}");
    assert!(!html.contains("topic-card prio-none completed"), "C Basics collided in {html}");
    assert!(html.contains("25%"), "mastery not updated in {html}");

    let stored = harness
        .repo
        .get_value("lld_master_state")
        .await
        .unwrap()
        .expect("record persisted");
    assert!(stored.contains("\"C++ Basics\":true"), "unexpected record {stored}");
}

#[tokio::test(flavor = "current_thread")]
async fn selecting_text_does_not_toggle() {
    let mut harness = setup_dashboard_harness().await;
    harness.rebuild();

    harness.handles.dispatch().call(DashboardIntent::ToggleTopic {
        title: "C Basics".to_string(),
        click: ClickContext::selecting(),
    });
    harness.drive_async().await;

    assert!(!harness.render().contains("completed"));
    assert!(harness.repo.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn search_without_matches_shows_placeholder() {
    let mut harness = setup_dashboard_harness().await;
    harness.rebuild();

    harness
        .handles
        .dispatch()
        .call(DashboardIntent::Search("zzz".to_string()));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("No vibes found."), "missing placeholder in {html}");
    assert!(!html.contains("topic-card"), "cards rendered in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn detail_modal_renders_blocks_and_placeholder() {
    let mut harness = setup_dashboard_harness().await;
    harness.rebuild();

    harness
        .handles
        .dispatch()
        .call(DashboardIntent::OpenDetail("Factory".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("<strong>objects</strong>"), "missing text block in {html}");
    assert!(html.contains("code-keyword"), "missing highlight in {html}");
    assert!(html.contains("Copy code"), "missing copy button in {html}");
    assert!(!html.contains("No formatted notes available."));

    harness.handles.dispatch().call(DashboardIntent::CloseDetail);
    harness
        .handles
        .dispatch()
        .call(DashboardIntent::OpenDetail("Mutex".to_string()));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No formatted notes available."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread", start_paused = true)]
async fn switching_mode_swaps_catalog_after_fade() {
    let mut harness = setup_dashboard_harness().await;
    harness.rebuild();

    harness
        .handles
        .dispatch()
        .call(DashboardIntent::SwitchMode(Mode::Hld));
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("dashboard light fading"), "fade not started in {html}");
    assert!(html.contains("LLD MASTER"), "switched before fade ended in {html}");
    assert!(!html.contains("Sharding"), "HLD catalog shown during fade in {html}");
    assert_eq!(harness.repo.get_value("app_mode").await.unwrap(), None);

    tokio::time::sleep(Duration::from_millis(300)).await;
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("fading"), "fade not cleared in {html}");
    assert!(html.contains("HLD MASTER"), "logo not switched in {html}");
    assert!(html.contains("Sharding"), "HLD catalog missing in {html}");
    assert_eq!(
        harness.repo.get_value("app_mode").await.unwrap().as_deref(),
        Some("HLD")
    );
}

#[tokio::test(flavor = "current_thread")]
async fn failed_load_renders_error_header() {
    let mut harness = setup_failed_harness("details.json is malformed");
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Error Loading Data"), "missing header in {html}");
    assert!(html.contains("details.json is malformed"), "missing cause in {html}");
}

struct ReadOnlyRepo(InMemoryRepository);

#[async_trait::async_trait]
impl KeyValueRepository for ReadOnlyRepo {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_value(key).await
    }

    async fn put_value(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }

    async fn delete_value(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn failed_save_shows_banner_and_keeps_state() {
    let repo = InMemoryRepository::new();
    let kv = Arc::new(ReadOnlyRepo(repo.clone()));
    let mut harness = setup_dashboard_harness_with_repo(repo, kv).await;
    harness.rebuild();

    harness.handles.dispatch().call(toggle("C Basics"));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Could not save your progress"), "missing banner in {html}");
    assert!(!html.contains(" completed"), "state ran ahead of storage in {html}");
}

use std::sync::Arc;

use async_trait::async_trait;
use guide_core::model::{AdviceSettings, EndOfCatalog, NavigationPolicy, StepId};
use guide_core::time::{fixed_clock, fixed_now};
use services::{AppServices, CONNECTION_FALLBACK};
use storage::repository::{
    InMemoryRepository, ProgressRecord, ProgressRepository, Storage, StorageError,
};

use super::test_harness::{
    ViewKind, setup_view_harness, setup_view_harness_over, setup_view_harness_with,
};

const STORAGE_WARNING: &str = "saved right now";

/// Loads an empty set and rejects every write.
struct ReadOnlyRepository;

#[async_trait]
impl ProgressRepository for ReadOnlyRepository {
    async fn load_progress(&self) -> Result<Option<ProgressRecord>, StorageError> {
        Ok(None)
    }

    async fn save_progress(&self, _record: &ProgressRecord) -> Result<(), StorageError> {
        Err(StorageError::Connection("read-only".into()))
    }
}

/// Opening tag of the element carrying `id`.
fn opening_tag<'a>(html: &'a str, id: &str) -> &'a str {
    let marker = format!("id=\"{id}\"");
    let at = html.find(&marker).unwrap_or_else(|| panic!("no element {id} in {html}"));
    let start = html[..at].rfind('<').expect("tag start");
    let end = at + html[at..].find('>').expect("tag end");
    &html[start..=end]
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_smoke_renders_first_step_and_side_panel() {
    let mut harness = setup_view_harness(ViewKind::Guide, Storage::in_memory()).await;
    harness.rebuild();
    let html = harness.render();

    for expected in [
        "Step 1 of 4",
        "Obtain your NIN",
        "Profile Code",
        "Mark as complete",
        "Watch video guide",
        "Quick requirements",
        "Registration Ends",
        "0 of 4 steps done",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
    assert!(html.contains("key-date--urgent"), "urgent date not highlighted in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_smoke_restores_saved_progress() {
    let repo = InMemoryRepository::new();
    repo.save_progress(&ProgressRecord::new(
        vec![StepId::new(2), StepId::new(3)],
        fixed_now(),
    ))
    .await
    .expect("seed progress");
    let storage = Storage {
        progress: std::sync::Arc::new(repo),
    };

    let mut harness = setup_view_harness(ViewKind::Guide, storage).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("50%"), "missing percent in {html}");
    assert!(html.contains("2 of 4 steps done"), "missing summary in {html}");
    assert!(html.contains("step-tab--done"), "missing completed tab in {html}");
    assert!(html.contains("Start over"), "missing reset in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn guide_view_smoke_shows_selected_last_step() {
    let policy = NavigationPolicy {
        end_of_catalog: EndOfCatalog::Finish,
        complete_on_advance: false,
    };
    let mut harness =
        setup_view_harness_with(ViewKind::Guide, Storage::in_memory(), policy, |state| {
            state.select_step(StepId::new(4)).expect("select");
            state.next();
        })
        .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Print Registration Slip"), "missing title in {html}");
    assert!(html.contains("Step 4 of 4"), "missing position in {html}");
    assert!(html.contains("end of the guide"), "missing finish banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_widget_smoke_renders_transcript_and_pending_state() {
    let mut harness = setup_view_harness_with(
        ViewKind::Chat,
        Storage::in_memory(),
        NavigationPolicy::default(),
        |state| {
            let chat = state.chat_mut();
            let ticket = chat.begin("When does registration end?").expect("ticket");
            chat.settle(&ticket, "Registration ends in **February**.");
            chat.begin("And the exam?").expect("second ticket");
        },
    )
    .await;
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("When does registration end?"), "missing user text in {html}");
    assert!(html.contains("<strong>February</strong>"), "reply not rendered in {html}");
    assert!(html.contains("Thinking..."), "missing pending indicator in {html}");
    assert!(html.contains("And the exam?"), "missing pending question in {html}");
    assert!(opening_tag(&html, "chat-draft").contains("disabled"), "draft enabled in {html}");
    assert!(opening_tag(&html, "chat-send").contains("disabled"), "send enabled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn chat_widget_smoke_renders_fallback_reply() {
    let mut harness = setup_view_harness_with(
        ViewKind::Chat,
        Storage::in_memory(),
        NavigationPolicy::default(),
        |state| {
            let chat = state.chat_mut();
            let ticket = chat.begin("hello").expect("ticket");
            chat.settle(&ticket, CONNECTION_FALLBACK);
        },
    )
    .await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("JAMB help database"), "missing fallback in {html}");
    assert!(!html.contains("Thinking..."), "unexpected pending indicator in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn install_dialog_smoke_lists_steps() {
    let mut harness = setup_view_harness(ViewKind::Install, Storage::in_memory()).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Install this guide"), "missing title in {html}");
    assert!(html.contains("Tap the Menu or Share button."), "missing step in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn storage_banner_smoke_shows_when_storage_is_unavailable() {
    let services = AppServices::without_storage(
        "database missing",
        fixed_clock(),
        AdviceSettings::default(),
        NavigationPolicy::default(),
    )
    .expect("services");
    let mut harness = setup_view_harness_over(ViewKind::Banner, services, |_| {}).await;
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains(STORAGE_WARNING), "missing banner in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn storage_banner_smoke_hidden_while_durable() {
    let mut harness = setup_view_harness(ViewKind::Banner, Storage::in_memory()).await;
    harness.rebuild();
    assert!(!harness.render().contains(STORAGE_WARNING));
}

#[tokio::test(flavor = "current_thread")]
async fn toggle_smoke_writes_progress_to_storage() {
    let repo = InMemoryRepository::new();
    let storage = Storage {
        progress: Arc::new(repo.clone()),
    };
    let mut harness = setup_view_harness(ViewKind::ToggleStep(2), storage).await;
    harness.rebuild();
    harness.drive_async().await;

    let record = repo.load_progress().await.expect("load").expect("progress written");
    assert_eq!(record.completed, vec![StepId::new(2)]);
    assert!(!harness.render().contains(STORAGE_WARNING));
}

#[tokio::test(flavor = "current_thread")]
async fn toggle_smoke_failed_write_shows_banner() {
    let storage = Storage {
        progress: Arc::new(ReadOnlyRepository),
    };
    let mut harness = setup_view_harness(ViewKind::ToggleStep(1), storage).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains(STORAGE_WARNING), "missing banner after failed write in {html}");
}

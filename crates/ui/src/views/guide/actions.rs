use std::sync::Arc;

use dioxus::prelude::*;
use services::{GuideState, ProgressSnapshot, ProgressStore};

/// Write `snapshot` in the background; a failed write switches the guide to memory-only.
pub(crate) fn persist(
    store: Arc<ProgressStore>,
    state: Signal<GuideState>,
    snapshot: Option<ProgressSnapshot>,
) {
    let Some(snapshot) = snapshot else {
        return;
    };
    spawn(async move {
        let mut state = state;
        if store.save(&snapshot).await.is_err() {
            state.write().storage_failed();
        }
    });
}

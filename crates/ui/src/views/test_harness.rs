use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use guide_core::model::{AdviceSettings, NavigationPolicy, StepCatalog, StepId};
use guide_core::time::fixed_clock;
use services::{AdviceRelay, AppServices, GuideState, ProgressStore};
use storage::repository::Storage;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::guide::persist;
use crate::views::{ChatWidget, GuideView, InstallDialog, StorageBanner};

struct TestApp {
    services: AppServices,
    initial_state: GuideState,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<StepCatalog> {
        self.services.catalog()
    }

    fn initial_state(&self) -> GuideState {
        self.initial_state.clone()
    }

    fn progress_store(&self) -> Arc<ProgressStore> {
        self.services.progress_store()
    }

    fn advice(&self) -> Arc<AdviceRelay> {
        self.services.advice()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Guide,
    Chat,
    Install,
    Banner,
    /// Toggle the step once on mount and persist it the way the guide view does.
    ToggleStep(u32),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_context_provider(|| Signal::new(ctx.initial_state()));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Guide => rsx! { GuideView {} },
        ViewKind::Chat => rsx! { ChatWidget { start_open: true } },
        ViewKind::Install => rsx! { InstallDialog { on_close: move |()| {} } },
        ViewKind::Banner => rsx! { StorageBanner {} },
        ViewKind::ToggleStep(step) => rsx! { ToggleStep { step: step } },
    }
}

#[component]
fn ToggleStep(step: u32) -> Element {
    let ctx = use_context::<AppContext>();
    let state = use_context::<Signal<GuideState>>();
    use_hook(move || {
        let mut state = state;
        let change = state.write().toggle_completion(StepId::new(step));
        if let Ok(change) = change {
            persist(ctx.progress_store(), state, change.pending_write);
        }
    });
    rsx! { StorageBanner {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind, storage: Storage) -> ViewHarness {
    setup_view_harness_with(view, storage, NavigationPolicy::default(), |_| {}).await
}

/// Build a harness whose initial state is adjusted by `prepare` before the first render.
pub async fn setup_view_harness_with(
    view: ViewKind,
    storage: Storage,
    policy: NavigationPolicy,
    prepare: impl FnOnce(&mut GuideState),
) -> ViewHarness {
    let services = AppServices::new(&storage, fixed_clock(), AdviceSettings::default(), policy)
        .expect("services");
    setup_view_harness_over(view, services, prepare).await
}

/// Build a harness over already assembled services.
pub async fn setup_view_harness_over(
    view: ViewKind,
    services: AppServices,
    prepare: impl FnOnce(&mut GuideState),
) -> ViewHarness {
    let mut initial_state = services.initial_state().await;
    prepare(&mut initial_state);

    let app = Arc::new(TestApp {
        services,
        initial_state,
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}

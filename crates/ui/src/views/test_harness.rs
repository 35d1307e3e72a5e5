use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, ContentStore, DashboardService};
use storage::repository::{InMemoryRepository, KeyValueRepository};

use crate::context::{UiApp, build_app_context};
use crate::views::DashboardView;
use crate::views::dashboard::DashboardTestHandles;

pub const LLD_FIXTURE: &str = r#"[
    {
        "title": "Foundations",
        "subtitle": "Objects and languages",
        "groups": [
            { "name": "Languages", "topics": [
                { "title": "C++ Basics", "priority": "high", "note": "RAII first" },
                "C Basics"
            ] },
            { "name": "Patterns", "topics": [{ "title": "Factory", "priority": "medium" }] }
        ]
    },
    {
        "title": "Concurrency",
        "groups": [{ "name": "Primitives", "topics": ["Mutex"] }]
    }
]"#;

pub const HLD_FIXTURE: &str = r#"[
    {
        "title": "Scaling",
        "subtitle": "Going wide",
        "groups": [{ "name": "Data", "topics": ["Sharding"] }]
    }
]"#;

pub const DETAILS_FIXTURE: &str = r#"{
    "Factory": { "blocks": [
        { "type": "text", "content": "Creates **objects** for you." },
        { "type": "code", "language": "java", "content": "public class Car {} // ok" },
        { "type": "video", "url": "ignored" }
    ] }
}"#;

#[derive(Clone)]
struct TestApp {
    dashboard: Option<Arc<DashboardService>>,
    load_error: Option<String>,
}

impl UiApp for TestApp {
    fn dashboard(&self) -> Option<Arc<DashboardService>> {
        self.dashboard.clone()
    }

    fn load_error(&self) -> Option<String> {
        self.load_error.clone()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    handles: DashboardTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
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
    rsx! { DashboardView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub repo: InMemoryRepository,
    pub handles: DashboardTestHandles,
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

fn harness_for(app: TestApp, repo: InMemoryRepository) -> ViewHarness {
    let handles = DashboardTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app: Arc::new(app),
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, repo, handles }
}

pub async fn setup_dashboard_harness() -> ViewHarness {
    let repo = InMemoryRepository::new();
    let kv: Arc<dyn KeyValueRepository> = Arc::new(repo.clone());
    setup_dashboard_harness_with_repo(repo, kv).await
}

pub async fn setup_dashboard_harness_with_repo(
    repo: InMemoryRepository,
    kv: Arc<dyn KeyValueRepository>,
) -> ViewHarness {
    let content = ContentStore::from_documents(LLD_FIXTURE, HLD_FIXTURE, DETAILS_FIXTURE)
        .expect("fixtures parse");
    let services = AppServices::assemble(content, kv).await;
    let app = TestApp {
        dashboard: Some(services.dashboard()),
        load_error: None,
    };
    harness_for(app, repo)
}

pub fn setup_failed_harness(message: &str) -> ViewHarness {
    let app = TestApp {
        dashboard: None,
        load_error: Some(message.to_string()),
    };
    harness_for(app, InMemoryRepository::new())
}

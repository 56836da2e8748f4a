use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use lms_core::model::{Course, CourseId, Credentials, Lesson, LessonId, User};
use lms_core::time::fixed_clock;
use services::{AppServices, AuthProvider, CatalogService, PasswordHashing, ProgressService};
use storage::repository::{CourseRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::views::{CatalogView, LessonListView, LessonViewerView, ProgressView, SessionGate, ToastHost};
use crate::vm::Toaster;

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth(&self) -> Arc<dyn AuthProvider> {
        self.services.auth()
    }

    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Gate,
    Catalog,
    LessonList(CourseId),
    LessonViewer(CourseId, LessonId),
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    user: User,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| Signal::new(Toaster::default()));

    let user = props.user.clone();
    let view = match props.view.clone() {
        ViewKind::Gate => rsx! { SessionGate {} },
        ViewKind::Catalog => rsx! { CatalogView { on_select: move |_: CourseId| {} } },
        ViewKind::LessonList(course_id) => rsx! {
            LessonListView { user, course_id, on_back: move |()| {} }
        },
        ViewKind::LessonViewer(course_id, lesson_id) => rsx! {
            LessonViewerView {
                course_id,
                lesson_id,
                on_complete: move |_: LessonId| {},
                on_back: move |()| {},
            }
        },
        ViewKind::Progress => rsx! { ProgressView { user } },
    };

    rsx! {
        {view}
        ToastHost {}
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub services: AppServices,
    pub user: User,
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

    /// Rebuild, then give spawned tasks and resources a few turns.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..4 {
            self.drive_async().await;
        }
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

/// Two courses: "Rust Basics" with three lessons, "Async Rust" with five.
pub async fn seed_default_courses(storage: &Storage) {
    seed_course(storage, "rust-basics", "Rust Basics", 1, 3).await;
    seed_course(storage, "async-rust", "Async Rust", 2, 5).await;
}

pub async fn seed_course(storage: &Storage, id: &str, title: &str, order: i64, lessons: u32) {
    let course = Course::new(CourseId::new(id), title, format!("About {title}"), order)
        .expect("valid course");
    storage.courses.upsert_course(&course).await.expect("upsert course");

    for i in 1..=lessons {
        let lesson = Lesson::new(
            LessonId::new(format!("l{i}")),
            course.id().clone(),
            format!("Lesson {i}"),
            format!("## Part {i}\n\nEvery value has an **owner**."),
            i64::from(i),
        )
        .expect("valid lesson");
        storage.courses.upsert_lesson(&lesson).await.expect("upsert lesson");
    }
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    let storage = Storage::in_memory();
    seed_default_courses(&storage).await;
    setup_view_harness_with_storage(view, storage).await
}

/// Build the harness over `storage` with a freshly signed-up user.
pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(fixed_clock(), &storage, PasswordHashing::low_cost());
    let user = services
        .auth()
        .sign_up(&Credentials::for_sign_up("learner@example.com", "secret1").expect("creds"))
        .await
        .expect("sign up");

    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(
        ViewHarnessRoot,
        ViewHarnessProps {
            app,
            view,
            user: user.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        services,
        user,
    }
}

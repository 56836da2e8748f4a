use dioxus::prelude::*;
use lms_core::model::{CourseId, User};

use crate::context::AppContext;
use crate::views::{CatalogView, LessonListView, ProgressView};
use crate::vm::{ActiveView, WorkspaceIntent, WorkspaceVm};

fn go(mut workspace: Signal<WorkspaceVm>, intent: WorkspaceIntent) {
    if let Err(rejected) = workspace.write().apply(intent) {
        tracing::debug!(%rejected, "ignored workspace transition");
    }
}

#[component]
pub fn WorkspaceView(user: User) -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let workspace = use_signal(WorkspaceVm::default);

    let sign_out = move |_: MouseEvent| {
        let auth = auth.clone();
        spawn(async move {
            // The gate reacts to the session change; nothing to do here on success.
            if let Err(err) = auth.sign_out().await {
                tracing::error!(error = %err, "sign-out failed");
            }
        });
    };

    let active = workspace.read().active().clone();
    let nav_action = match &active {
        ActiveView::Progress => rsx! {
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| go(workspace, WorkspaceIntent::ShowCourses),
                "Courses"
            }
        },
        _ if workspace.read().can_show_progress() => rsx! {
            button {
                class: "btn btn-secondary",
                r#type: "button",
                onclick: move |_| go(workspace, WorkspaceIntent::ShowProgress),
                "My progress"
            }
        },
        _ => rsx! {},
    };

    let content = match active {
        ActiveView::Courses => rsx! {
            CatalogView { on_select: move |course_id: CourseId| go(workspace, WorkspaceIntent::SelectCourse(course_id)) }
        },
        ActiveView::Detail(course_id) => {
            let key = course_id.to_string();
            rsx! {
                LessonListView {
                    key: "{key}",
                    user: user.clone(),
                    course_id,
                    on_back: move |()| go(workspace, WorkspaceIntent::ShowCourses),
                }
            }
        }
        ActiveView::Progress => rsx! {
            ProgressView { user: user.clone() }
        },
    };

    rsx! {
        div { class: "workspace",
            header { class: "workspace-header",
                button {
                    class: "brand",
                    r#type: "button",
                    onclick: move |_| go(workspace, WorkspaceIntent::Home),
                    "Mini LMS"
                }
                nav { class: "workspace-nav",
                    {nav_action}
                    span { class: "user-email", "{user.email()}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: sign_out,
                        "Sign out"
                    }
                }
            }
            main { class: "content", {content} }
        }
    }
}

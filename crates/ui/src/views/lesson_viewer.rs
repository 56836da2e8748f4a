use dioxus::prelude::*;
use lms_core::model::{CourseId, LessonId};

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, log_read_error, view_state_from_resource};
use crate::vm::LessonPageVm;

#[component]
pub fn LessonViewerView(
    course_id: CourseId,
    lesson_id: LessonId,
    on_complete: Callback<LessonId>,
    on_back: Callback<()>,
) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    // Re-fetches whenever either id prop changes.
    let resource = use_resource(use_reactive!(|(course_id, lesson_id)| {
        let catalog = catalog.clone();
        async move {
            catalog
                .get_lesson(&course_id, &lesson_id)
                .await
                .map(|lesson| lesson.as_ref().map(LessonPageVm::from_lesson))
                .map_err(|err| log_read_error("lesson", &err))
        }
    }));

    let body = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => rsx! {
            p { class: "loading", "Loading..." }
        },
        ViewState::Ready(Some(page)) => {
            let completed_id = page.id.clone();
            rsx! {
                article { class: "lesson",
                    h2 { class: "lesson-heading", "{page.title}" }
                    div { class: "lesson-content", dangerous_inner_html: "{page.html}" }
                }
                div { class: "lesson-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| on_complete.call(completed_id.clone()),
                        "Mark as complete"
                    }
                }
            }
        }
        ViewState::Ready(None) => rsx! {
            p { class: "empty", "Lesson not found." }
        },
        ViewState::Error(_) => rsx! {
            p { {ViewError::message()} }
        },
    };

    rsx! {
        div { class: "page lesson-viewer-page",
            header { class: "view-header",
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "← Back to lessons"
                }
            }
            {body}
        }
    }
}

use dioxus::prelude::*;
use lms_core::model::{CompletionSet, CourseId, LessonId, User};

use crate::context::AppContext;
use crate::views::{LessonViewerView, ViewState, log_read_error, view_state_from_resource};
use crate::vm::{LessonRowVm, Toaster, apply_completion, complete_lesson, map_lesson_rows};

#[component]
pub fn LessonListView(user: User, course_id: CourseId, on_back: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let toaster = use_context::<Signal<Toaster>>();

    let mut open_lesson = use_signal(|| None::<LessonId>);
    // Bumped when the viewer closes; the list re-reads on every bump.
    let mut refresh = use_signal(|| 0_u32);
    // Completions only grow, so fetched sets and confirmed writes are unioned.
    let mut completed = use_signal(CompletionSet::new);

    let resource = {
        let progress = progress.clone();
        let user_id = user.id().clone();
        let course_id = course_id.clone();
        use_resource(move || {
            let _generation = refresh();
            let progress = progress.clone();
            let user_id = user_id.clone();
            let course_id = course_id.clone();
            async move {
                let detail = progress
                    .course_detail(&user_id, &course_id)
                    .await
                    .map_err(|err| log_read_error("lesson list", &err))?;
                completed.write().union_with(&detail.completed);
                Ok(detail)
            }
        })
    };

    let on_complete = {
        let user_id = user.id().clone();
        let course_id = course_id.clone();
        use_callback(move |lesson_id: LessonId| {
            open_lesson.set(None);

            let progress = progress.clone();
            let user_id = user_id.clone();
            let course_id = course_id.clone();
            let mut toaster = toaster;
            spawn(async move {
                let result =
                    complete_lesson(progress, user_id, course_id, lesson_id.clone()).await;
                apply_completion(&mut completed.write(), &mut toaster, lesson_id, result);
            });

            *refresh.write() += 1;
        })
    };

    let on_close_viewer = use_callback(move |()| {
        open_lesson.set(None);
        *refresh.write() += 1;
    });

    if let Some(lesson_id) = open_lesson() {
        return rsx! {
            LessonViewerView {
                course_id: course_id.clone(),
                lesson_id,
                on_complete,
                on_back: on_close_viewer,
            }
        };
    }

    let state = view_state_from_resource(&resource);
    let (title, rows) = match state {
        ViewState::Idle | ViewState::Loading => (None, None),
        ViewState::Ready(detail) => (
            detail.title,
            Some(map_lesson_rows(&detail.lessons, &completed.read())),
        ),
        ViewState::Error(_) => (None, Some(Vec::new())),
    };
    let title = title.unwrap_or_else(|| "Course".to_string());

    rsx! {
        div { class: "page lesson-list-page",
            header { class: "view-header",
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_back.call(()),
                    "← Back to courses"
                }
                h2 { class: "view-title", "{title}" }
            }
            match rows {
                None => rsx! {
                    p { class: "loading", "Loading..." }
                },
                Some(rows) if rows.is_empty() => rsx! {
                    p { class: "empty", "This course has no lessons yet." }
                },
                Some(rows) => {
                    let items = rows.into_iter().map(|row| {
                        let key = row.id.to_string();
                        rsx! {
                            LessonRow {
                                key: "{key}",
                                row,
                                on_open: move |lesson_id: LessonId| open_lesson.set(Some(lesson_id)),
                            }
                        }
                    });
                    rsx! {
                        ol { class: "lesson-list", {items} }
                    }
                }
            }
        }
    }
}

#[component]
fn LessonRow(row: LessonRowVm, on_open: Callback<LessonId>) -> Element {
    let lesson_id = row.id.clone();
    let (class, marker, status) = if row.completed {
        ("lesson-row lesson-row--done", "✓", "Completed")
    } else {
        ("lesson-row", "○", "Not started")
    };

    rsx! {
        li { class,
            button {
                class: "lesson-open",
                r#type: "button",
                onclick: move |_| on_open.call(lesson_id.clone()),
                span { class: "lesson-marker", title: status, "{marker}" }
                span { class: "lesson-title", "{row.title}" }
            }
        }
    }
}

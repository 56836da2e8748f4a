use dioxus::prelude::*;
use lms_core::model::User;

use crate::context::AppContext;
use crate::views::{ViewState, log_read_error, view_state_from_resource};
use crate::vm::{ProgressRowVm, map_progress_rows};

#[component]
pub fn ProgressView(user: User) -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let user_id = user.id().clone();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let user_id = user_id.clone();
        async move {
            let rows = progress
                .course_progress(&user_id)
                .await
                .map_err(|err| log_read_error("progress", &err))?;
            Ok(map_progress_rows(&rows))
        }
    });

    let rows = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => None,
        ViewState::Ready(rows) => Some(rows),
        ViewState::Error(_) => Some(Vec::new()),
    };

    rsx! {
        div { class: "page progress-page",
            header { class: "view-header",
                h2 { class: "view-title", "My progress" }
            }
            match rows {
                None => rsx! {
                    p { class: "loading", "Loading..." }
                },
                Some(rows) if rows.is_empty() => rsx! {
                    p { class: "empty", "No courses to track yet." }
                },
                Some(rows) => {
                    let items = rows.into_iter().map(|row| {
                        let key = row.course_id.to_string();
                        rsx! {
                            ProgressRow { key: "{key}", row }
                        }
                    });
                    rsx! {
                        ul { class: "progress-list", {items} }
                    }
                }
            }
        }
    }
}

#[component]
fn ProgressRow(row: ProgressRowVm) -> Element {
    rsx! {
        li { class: "progress-row",
            div { class: "progress-meta",
                span { class: "progress-title", "{row.title}" }
                span { class: "progress-count", "{row.count_label}" }
                span { class: "progress-percent", "{row.percent_label}" }
            }
            div { class: "progress-track",
                div { class: "progress-bar", style: "{row.bar_style}" }
            }
        }
    }
}

use dioxus::prelude::*;
use lms_core::model::{Course, CourseId};

use crate::context::AppContext;
use crate::views::{ViewState, log_read_error, view_state_from_resource};

#[component]
pub fn CatalogView(on_select: Callback<CourseId>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            catalog
                .list_courses()
                .await
                .map_err(|err| log_read_error("courses", &err))
        }
    });

    // A failed read settles like an empty catalog.
    let courses = match view_state_from_resource(&resource) {
        ViewState::Idle | ViewState::Loading => None,
        ViewState::Ready(courses) => Some(courses),
        ViewState::Error(_) => Some(Vec::new()),
    };

    rsx! {
        div { class: "page catalog-page",
            header { class: "view-header",
                h2 { class: "view-title", "Courses" }
            }
            match courses {
                None => rsx! {
                    p { class: "loading", "Loading..." }
                },
                Some(courses) if courses.is_empty() => rsx! {
                    p { class: "empty", "No courses yet." }
                },
                Some(courses) => {
                    let cards = courses.into_iter().map(|course| {
                        let key = course.id().to_string();
                        rsx! {
                            CourseCard { key: "{key}", course, on_select }
                        }
                    });
                    rsx! {
                        ul { class: "course-grid", {cards} }
                    }
                }
            }
        }
    }
}

#[component]
fn CourseCard(course: Course, on_select: Callback<CourseId>) -> Element {
    let course_id = course.id().clone();
    rsx! {
        li { class: "course-card",
            h3 { class: "course-title", "{course.title()}" }
            p { class: "course-description", "{course.description()}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_select.call(course_id.clone()),
                "Start learning"
            }
        }
    }
}

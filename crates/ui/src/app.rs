use dioxus::prelude::*;

use crate::views::{SessionGate, ToastHost};
use crate::vm::Toaster;

#[component]
pub fn App() -> Element {
    use_context_provider(|| Signal::new(Toaster::default()));

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Mini LMS" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                SessionGate {}
            }
            ToastHost {}
        }
    }
}

use dioxus::prelude::*;

use crate::vm::Toaster;

#[component]
pub fn ToastHost() -> Element {
    let toaster = use_context::<Signal<Toaster>>();
    let toasts = toaster.read().toasts().to_vec();

    rsx! {
        div { class: "toast-host", role: "status",
            for toast in toasts {
                div { key: "{toast.id:?}", class: toast.kind.css_class(), "{toast.message}" }
            }
        }
    }
}

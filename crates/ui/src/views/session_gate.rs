use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{SignInForm, SignUpForm, WorkspaceView};
use crate::vm::{GateScreen, SessionGateVm};

/// Top-level switch between the credential forms and the workspace.
///
/// Subscribes to session changes once per mount; the subscription is dropped
/// with the component.
#[component]
pub fn SessionGate() -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let mut gate = use_signal(SessionGateVm::default);

    use_future(move || {
        let auth = auth.clone();
        async move {
            let mut subscription = auth.subscribe();
            while let Some(session) = subscription.next().await {
                gate.write().apply(session);
            }
        }
    });

    let screen = gate.read().screen();
    match screen {
        GateScreen::Loading => rsx! {
            div { class: "gate-loading",
                p { "Loading..." }
            }
        },
        GateScreen::SignIn => rsx! {
            div { class: "auth-page",
                SignInForm { on_switch: move |()| gate.write().toggle_registering() }
            }
        },
        GateScreen::SignUp => rsx! {
            div { class: "auth-page",
                SignUpForm {
                    on_switch: move |()| gate.write().toggle_registering(),
                    on_registered: move |()| gate.write().show_sign_in(),
                }
            }
        },
        GateScreen::Workspace(user) => rsx! {
            WorkspaceView { user }
        },
    }
}

use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::{Toaster, await_sign_up_redirect, submit_sign_in, submit_sign_up};

#[component]
pub fn SignInForm(on_switch: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_context::<Signal<Toaster>>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let mut toaster = toaster;
        let email = email();
        let password = password();
        spawn(async move {
            busy.set(true);
            // Success needs no navigation: the gate follows the session.
            let _ = submit_sign_in(auth.as_ref(), &mut toaster, &email, &password).await;
            busy.set(false);
        });
    };

    rsx! {
        form { class: "auth-form", onsubmit: submit,
            h2 { class: "auth-title", "Sign in" }
            label { class: "auth-label", r#for: "sign-in-email", "Email" }
            input {
                id: "sign-in-email",
                class: "auth-input",
                r#type: "email",
                required: true,
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            label { class: "auth-label", r#for: "sign-in-password", "Password" }
            input {
                id: "sign-in-password",
                class: "auth-input",
                r#type: "password",
                required: true,
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            button { class: "btn btn-primary", r#type: "submit", disabled: busy(), "Sign in" }
            p { class: "auth-switch",
                "No account yet? "
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_switch.call(()),
                    "Create one"
                }
            }
        }
    }
}

#[component]
pub fn SignUpForm(on_switch: Callback<()>, on_registered: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let toaster = use_context::<Signal<Toaster>>();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut busy = use_signal(|| false);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();
        if busy() {
            return;
        }
        let auth = ctx.auth();
        let mut toaster = toaster;
        let email = email();
        let password = password();
        spawn(async move {
            busy.set(true);
            let outcome = submit_sign_up(auth.as_ref(), &mut toaster, &email, &password).await;
            busy.set(false);
            if await_sign_up_redirect(&outcome).await {
                on_registered.call(());
            }
        });
    };

    rsx! {
        form { class: "auth-form", onsubmit: submit,
            h2 { class: "auth-title", "Create account" }
            label { class: "auth-label", r#for: "sign-up-email", "Email" }
            input {
                id: "sign-up-email",
                class: "auth-input",
                r#type: "email",
                required: true,
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            label { class: "auth-label", r#for: "sign-up-password", "Password" }
            input {
                id: "sign-up-password",
                class: "auth-input",
                r#type: "password",
                required: true,
                placeholder: "At least 6 characters",
                value: "{password}",
                oninput: move |evt| password.set(evt.value()),
            }
            button { class: "btn btn-primary", r#type: "submit", disabled: busy(), "Sign up" }
            p { class: "auth-switch",
                "Already registered? "
                button {
                    class: "btn btn-link",
                    r#type: "button",
                    onclick: move |_| on_switch.call(()),
                    "Sign in instead"
                }
            }
        }
    }
}

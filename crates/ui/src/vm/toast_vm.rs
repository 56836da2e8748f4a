use std::time::Duration;

use dioxus::prelude::*;

/// How long success and error toasts stay on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Loading,
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Loading => "toast toast--loading",
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

/// The notification stack, newest last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toaster {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Toaster {
    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    #[cfg(test)]
    pub(crate) fn count(&self, kind: ToastKind) -> usize {
        self.toasts.iter().filter(|t| t.kind == kind).count()
    }

    fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.push(Toast {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    fn remove(&mut self, id: ToastId) {
        self.toasts.retain(|t| t.id != id);
    }
}

/// Anything that can raise and dismiss notifications.
///
/// Success and error toasts expire after [`TOAST_TTL`]; loading toasts stay
/// until dismissed. Form handlers are written against this so they run the same against a bare
/// [`Toaster`] in tests and a `Signal<Toaster>` in the app.
pub trait Toasts {
    fn loading(&mut self, message: &str) -> ToastId;
    fn success(&mut self, message: &str) -> ToastId;
    fn error(&mut self, message: &str) -> ToastId;
    fn dismiss(&mut self, id: ToastId);
}

impl Toasts for Toaster {
    fn loading(&mut self, message: &str) -> ToastId {
        self.push(ToastKind::Loading, message)
    }

    fn success(&mut self, message: &str) -> ToastId {
        self.push(ToastKind::Success, message)
    }

    fn error(&mut self, message: &str) -> ToastId {
        self.push(ToastKind::Error, message)
    }

    fn dismiss(&mut self, id: ToastId) {
        self.remove(id);
    }
}

impl Toasts for Signal<Toaster> {
    fn loading(&mut self, message: &str) -> ToastId {
        self.write().loading(message)
    }

    fn success(&mut self, message: &str) -> ToastId {
        let id = self.write().success(message);
        expire_later(*self, id);
        id
    }

    fn error(&mut self, message: &str) -> ToastId {
        let id = self.write().error(message);
        expire_later(*self, id);
        id
    }

    fn dismiss(&mut self, id: ToastId) {
        self.write().dismiss(id);
    }
}

// Runs on the root scope so the toast still expires if the view that raised
// it has unmounted.
fn expire_later(mut toaster: Signal<Toaster>, id: ToastId) {
    spawn_forever(async move {
        tokio::time::sleep(TOAST_TTL).await;
        toaster.write().dismiss(id);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dismiss_removes_only_that_toast() {
        let mut toaster = Toaster::default();
        let loading = toaster.loading("Signing in...");
        toaster.success("done");
        toaster.dismiss(loading);

        assert_eq!(toaster.toasts().len(), 1);
        assert_eq!(toaster.toasts()[0].kind, ToastKind::Success);
    }

    #[test]
    fn ids_are_unique() {
        let mut toaster = Toaster::default();
        let a = toaster.error("a");
        let b = toaster.error("b");
        assert_ne!(a, b);
        assert_eq!(toaster.count(ToastKind::Error), 2);
    }
}

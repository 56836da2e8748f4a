use std::time::Duration;

use lms_core::model::{Credentials, CredentialsError, User};
use services::AuthProvider;

use crate::vm::Toasts;

/// Delay between a successful sign-up and switching back to the sign-in form.
pub const SIGN_UP_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

pub const SIGNING_IN: &str = "Signing in...";
pub const SIGNING_UP: &str = "Creating account...";
pub const SIGN_IN_SUCCESS: &str = "Signed in successfully!";
pub const SIGN_IN_FAILED: &str = "Sign-in failed. Check your email and password.";
pub const SIGN_UP_SUCCESS: &str = "Account created!";
pub const SIGN_UP_FAILED: &str = "Sign-up failed. The email may already be registered.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters.";
pub const FIELDS_REQUIRED: &str = "Email and password are required.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    SignedIn(User),
    Registered(User),
    /// Local validation failed; the provider was not called.
    Invalid,
    /// The provider refused or failed.
    Failed,
}

/// Sign in and raise exactly one terminal notification.
pub async fn submit_sign_in(
    auth: &dyn AuthProvider,
    toasts: &mut impl Toasts,
    email: &str,
    password: &str,
) -> SubmitOutcome {
    let Ok(credentials) = Credentials::for_sign_in(email, password) else {
        toasts.error(FIELDS_REQUIRED);
        return SubmitOutcome::Invalid;
    };

    let pending = toasts.loading(SIGNING_IN);
    let result = auth.sign_in(&credentials).await;
    toasts.dismiss(pending);

    match result {
        Ok(user) => {
            toasts.success(SIGN_IN_SUCCESS);
            SubmitOutcome::SignedIn(user)
        }
        Err(err) => {
            tracing::warn!(error = %err, "sign-in rejected");
            toasts.error(SIGN_IN_FAILED);
            SubmitOutcome::Failed
        }
    }
}

/// Register a new account. The password length is checked before the provider
/// sees anything.
pub async fn submit_sign_up(
    auth: &dyn AuthProvider,
    toasts: &mut impl Toasts,
    email: &str,
    password: &str,
) -> SubmitOutcome {
    let credentials = match Credentials::for_sign_up(email, password) {
        Ok(credentials) => credentials,
        Err(CredentialsError::PasswordTooShort { .. }) => {
            toasts.error(PASSWORD_TOO_SHORT);
            return SubmitOutcome::Invalid;
        }
        Err(_) => {
            toasts.error(FIELDS_REQUIRED);
            return SubmitOutcome::Invalid;
        }
    };

    let pending = toasts.loading(SIGNING_UP);
    let result = auth.sign_up(&credentials).await;
    toasts.dismiss(pending);

    match result {
        Ok(user) => {
            toasts.success(SIGN_UP_SUCCESS);
            SubmitOutcome::Registered(user)
        }
        Err(err) => {
            tracing::warn!(error = %err, "sign-up rejected");
            toasts.error(SIGN_UP_FAILED);
            SubmitOutcome::Failed
        }
    }
}

/// Hold a successful registration on screen for [`SIGN_UP_REDIRECT_DELAY`].
///
/// Returns `true` once the caller should switch back to the sign-in form;
/// any other outcome returns `false` straight away.
pub async fn await_sign_up_redirect(outcome: &SubmitOutcome) -> bool {
    if !matches!(outcome, SubmitOutcome::Registered(_)) {
        return false;
    }
    tokio::time::sleep(SIGN_UP_REDIRECT_DELAY).await;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use lms_core::time::fixed_clock;
    use services::{AuthError, LocalAuthProvider, PasswordHashing, SessionSubscription};
    use storage::repository::InMemoryRepository;
    use tokio::sync::watch;

    use crate::vm::{GateScreen, SessionGateVm, ToastKind, Toaster};

    fn local_auth() -> LocalAuthProvider {
        LocalAuthProvider::new(fixed_clock(), Arc::new(InMemoryRepository::new()))
            .with_hashing(PasswordHashing::low_cost())
    }

    /// Counts provider calls and always refuses.
    #[derive(Default)]
    struct CountingAuth {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AuthProvider for CountingAuth {
        async fn sign_in(&self, _credentials: &Credentials) -> Result<User, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AuthError::InvalidCredentials)
        }
        async fn sign_up(&self, _credentials: &Credentials) -> Result<User, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AuthError::EmailTaken)
        }
        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
        fn subscribe(&self) -> SessionSubscription {
            let (_tx, rx) = watch::channel(services::Session::SignedOut);
            SessionSubscription::new(rx)
        }
        fn current_user(&self) -> Option<User> {
            None
        }
    }

    #[tokio::test]
    async fn short_password_never_reaches_the_provider() {
        let auth = CountingAuth::default();
        let mut toaster = Toaster::default();

        let outcome = submit_sign_up(&auth, &mut toaster, "a@b.c", "12345").await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
        assert_eq!(toaster.toasts().len(), 1);
        assert_eq!(toaster.toasts()[0].message, PASSWORD_TOO_SHORT);
    }

    #[tokio::test]
    async fn wrong_password_yields_one_generic_failure() {
        let auth = local_auth();
        auth.sign_up(&Credentials::for_sign_up("ada@example.com", "secret1").unwrap())
            .await
            .unwrap();
        auth.sign_out().await.unwrap();

        let mut toaster = Toaster::default();
        let outcome = submit_sign_in(&auth, &mut toaster, "ada@example.com", "wrong!").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(toaster.count(ToastKind::Loading), 0);
        assert_eq!(toaster.count(ToastKind::Error), 1);
        assert_eq!(toaster.toasts()[0].message, SIGN_IN_FAILED);
        assert!(auth.current_user().is_none());
    }

    #[tokio::test]
    async fn successful_sign_in_reports_success_once() {
        let auth = local_auth();
        auth.sign_up(&Credentials::for_sign_up("ada@example.com", "secret1").unwrap())
            .await
            .unwrap();
        auth.sign_out().await.unwrap();

        let mut toaster = Toaster::default();
        let outcome = submit_sign_in(&auth, &mut toaster, "ada@example.com", "secret1").await;

        assert!(matches!(outcome, SubmitOutcome::SignedIn(_)));
        assert_eq!(toaster.toasts().len(), 1);
        assert_eq!(toaster.toasts()[0].message, SIGN_IN_SUCCESS);
    }

    #[tokio::test]
    async fn duplicate_sign_up_shows_generic_failure() {
        let auth = CountingAuth::default();
        let mut toaster = Toaster::default();

        let outcome = submit_sign_up(&auth, &mut toaster, "a@b.c", "secret1").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(auth.calls.load(Ordering::SeqCst), 1);
        assert_eq!(toaster.count(ToastKind::Loading), 0);
        assert_eq!(toaster.toasts()[0].message, SIGN_UP_FAILED);
    }

    #[tokio::test(start_paused = true)]
    async fn registration_switches_back_to_sign_in_after_the_delay() {
        let auth = local_auth();
        let mut toaster = Toaster::default();
        let mut gate = SessionGateVm::default();
        gate.apply(services::Session::SignedOut);
        gate.toggle_registering();
        assert_eq!(gate.screen(), GateScreen::SignUp);

        let outcome = submit_sign_up(&auth, &mut toaster, "ada@example.com", "secret1").await;
        assert!(matches!(outcome, SubmitOutcome::Registered(_)));
        assert_eq!(toaster.toasts()[0].message, SIGN_UP_SUCCESS);

        let started = tokio::time::Instant::now();
        let redirect = tokio::spawn(async move { await_sign_up_redirect(&outcome).await });

        tokio::time::sleep(SIGN_UP_REDIRECT_DELAY - Duration::from_millis(1)).await;
        assert!(!redirect.is_finished());

        assert!(redirect.await.unwrap());
        assert!(started.elapsed() >= SIGN_UP_REDIRECT_DELAY);

        gate.show_sign_in();
        assert_eq!(gate.screen(), GateScreen::SignIn);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_sign_up_does_not_wait_or_redirect() {
        let started = tokio::time::Instant::now();
        assert!(!await_sign_up_redirect(&SubmitOutcome::Failed).await);
        assert!(!await_sign_up_redirect(&SubmitOutcome::Invalid).await);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }
}

use lms_core::model::User;
use services::Session;

/// What the gate should render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateScreen {
    Loading,
    SignIn,
    SignUp,
    Workspace(User),
}

/// Session gate state: the last session seen and which credential form is up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionGateVm {
    ready: bool,
    user: Option<User>,
    registering: bool,
}

impl SessionGateVm {
    /// Apply one session notification. The first one marks the gate ready.
    pub fn apply(&mut self, session: Session) {
        self.ready = true;
        self.user = match session {
            Session::SignedIn(user) => {
                self.registering = false;
                Some(user)
            }
            Session::SignedOut => None,
        };
    }

    pub fn toggle_registering(&mut self) {
        self.registering = !self.registering;
    }

    pub fn show_sign_in(&mut self) {
        self.registering = false;
    }

    #[must_use]
    pub fn screen(&self) -> GateScreen {
        match (&self.user, self.ready, self.registering) {
            (_, false, _) => GateScreen::Loading,
            (Some(user), true, _) => GateScreen::Workspace(user.clone()),
            (None, true, false) => GateScreen::SignIn,
            (None, true, true) => GateScreen::SignUp,
        }
    }
}

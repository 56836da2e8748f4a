mod auth_forms;
mod catalog;
mod lesson_list;
mod lesson_viewer;
mod progress;
mod session_gate;
mod state;
mod toasts;
mod workspace;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use auth_forms::{SignInForm, SignUpForm};
pub use catalog::CatalogView;
pub use lesson_list::LessonListView;
pub use lesson_viewer::LessonViewerView;
pub use progress::ProgressView;
pub use session_gate::SessionGate;
pub use state::{ViewError, ViewState, log_read_error, view_state_from_resource};
pub use toasts::ToastHost;
pub use workspace::WorkspaceView;

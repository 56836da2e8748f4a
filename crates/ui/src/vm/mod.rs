mod auth_vm;
mod lesson_vm;
mod markdown_vm;
mod progress_vm;
mod session_vm;
mod toast_vm;
mod workspace_vm;

pub use auth_vm::{
    SIGN_UP_REDIRECT_DELAY, SubmitOutcome, await_sign_up_redirect, submit_sign_in,
    submit_sign_up,
};
pub use lesson_vm::{
    COMPLETION_FAILED, LessonPageVm, LessonRowVm, apply_completion, complete_lesson,
    map_lesson_rows,
};
pub use markdown_vm::{markdown_to_html, sanitize_html};
pub use progress_vm::{ProgressRowVm, map_progress_row, map_progress_rows};
pub use session_vm::{GateScreen, SessionGateVm};
pub use toast_vm::{TOAST_TTL, Toast, ToastId, ToastKind, Toaster, Toasts};
pub use workspace_vm::{ActiveView, TransitionRejected, WorkspaceIntent, WorkspaceVm};


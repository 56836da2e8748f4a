use std::fmt;

use lms_core::model::CourseId;

/// The workspace's single active view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    Courses,
    Detail(CourseId),
    Progress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkspaceIntent {
    SelectCourse(CourseId),
    /// Back to the catalog from the lesson list or progress.
    ShowCourses,
    ShowProgress,
    /// Header title: catalog from anywhere.
    Home,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionRejected {
    pub from: ActiveView,
    pub intent: WorkspaceIntent,
}

impl fmt::Display for TransitionRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot apply {:?} while showing {:?}", self.intent, self.from)
    }
}

impl std::error::Error for TransitionRejected {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkspaceVm {
    active: ActiveView,
}

impl WorkspaceVm {
    #[must_use]
    pub fn active(&self) -> &ActiveView {
        &self.active
    }

    /// Whether the header should offer the progress action.
    #[must_use]
    pub fn can_show_progress(&self) -> bool {
        matches!(self.active, ActiveView::Courses | ActiveView::Progress)
    }

    /// # Errors
    ///
    /// Returns `TransitionRejected` and leaves the view unchanged when the
    /// intent is not valid from the current view.
    pub fn apply(&mut self, intent: WorkspaceIntent) -> Result<(), TransitionRejected> {
        let next = match (&self.active, &intent) {
            (_, WorkspaceIntent::Home) => ActiveView::Courses,
            (ActiveView::Courses, WorkspaceIntent::SelectCourse(id)) => {
                ActiveView::Detail(id.clone())
            }
            (ActiveView::Courses, WorkspaceIntent::ShowProgress)
            | (ActiveView::Progress, WorkspaceIntent::ShowProgress) => ActiveView::Progress,
            (ActiveView::Detail(_) | ActiveView::Progress, WorkspaceIntent::ShowCourses) => {
                ActiveView::Courses
            }
            _ => {
                return Err(TransitionRejected {
                    from: self.active.clone(),
                    intent,
                });
            }
        };
        self.active = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> CourseId {
        CourseId::new("c1")
    }

    #[test]
    fn starts_on_courses() {
        assert_eq!(WorkspaceVm::default().active(), &ActiveView::Courses);
    }

    #[test]
    fn select_then_back_clears_selection() {
        let mut vm = WorkspaceVm::default();
        vm.apply(WorkspaceIntent::SelectCourse(course())).unwrap();
        assert_eq!(vm.active(), &ActiveView::Detail(course()));

        vm.apply(WorkspaceIntent::ShowCourses).unwrap();
        assert_eq!(vm.active(), &ActiveView::Courses);
        assert!(!matches!(vm.active(), ActiveView::Detail(_)));
    }

    #[test]
    fn courses_and_progress_toggle() {
        let mut vm = WorkspaceVm::default();
        vm.apply(WorkspaceIntent::ShowProgress).unwrap();
        assert_eq!(vm.active(), &ActiveView::Progress);
        vm.apply(WorkspaceIntent::ShowCourses).unwrap();
        assert_eq!(vm.active(), &ActiveView::Courses);
    }

    #[test]
    fn detail_to_progress_is_rejected() {
        let mut vm = WorkspaceVm::default();
        vm.apply(WorkspaceIntent::SelectCourse(course())).unwrap();
        assert!(!vm.can_show_progress());

        let err = vm.apply(WorkspaceIntent::ShowProgress).unwrap_err();
        assert_eq!(err.from, ActiveView::Detail(course()));
        assert_eq!(vm.active(), &ActiveView::Detail(course()));
    }

    #[test]
    fn selecting_from_progress_is_rejected() {
        let mut vm = WorkspaceVm::default();
        vm.apply(WorkspaceIntent::ShowProgress).unwrap();
        assert!(vm.apply(WorkspaceIntent::SelectCourse(course())).is_err());
    }

    #[test]
    fn home_works_from_every_view() {
        let mut vm = WorkspaceVm::default();
        vm.apply(WorkspaceIntent::SelectCourse(course())).unwrap();
        vm.apply(WorkspaceIntent::Home).unwrap();
        assert_eq!(vm.active(), &ActiveView::Courses);

        vm.apply(WorkspaceIntent::ShowProgress).unwrap();
        vm.apply(WorkspaceIntent::Home).unwrap();
        assert_eq!(vm.active(), &ActiveView::Courses);
    }
}

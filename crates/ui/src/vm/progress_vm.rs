use lms_core::model::{CourseId, CourseProgress};

/// One row of the progress view.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressRowVm {
    pub course_id: CourseId,
    pub title: String,
    pub count_label: String,
    pub percent_label: String,
    pub bar_style: String,
}

#[must_use]
pub fn map_progress_row(progress: &CourseProgress) -> ProgressRowVm {
    let percent = progress.percent();
    ProgressRowVm {
        course_id: progress.course_id.clone(),
        title: progress.title.clone(),
        count_label: format!("{} / {} lessons", progress.completed, progress.total),
        percent_label: format!("{percent:.0}%"),
        bar_style: format!("width: {percent:.1}%"),
    }
}

#[must_use]
pub fn map_progress_rows(rows: &[CourseProgress]) -> Vec<ProgressRowVm> {
    rows.iter().map(map_progress_row).collect()
}

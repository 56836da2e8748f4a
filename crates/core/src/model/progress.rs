use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::model::ids::{CourseId, LessonId, UserId};

//
// ─── COMPLETION SET ────────────────────────────────────────────────────────────
//

/// Lessons a user has finished within one course.
///
/// Insertion is a set union: merging a lesson that is already present
/// changes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompletionSet(BTreeSet<LessonId>);

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `lesson_id`. Returns `true` if it was not present before.
    pub fn merge(&mut self, lesson_id: LessonId) -> bool {
        self.0.insert(lesson_id)
    }

    #[must_use]
    pub fn contains(&self, lesson_id: &LessonId) -> bool {
        self.0.contains(lesson_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges every lesson of `other` into `self`.
    pub fn union_with(&mut self, other: &CompletionSet) {
        self.0.extend(other.0.iter().cloned());
    }
}

impl FromIterator<LessonId> for CompletionSet {
    fn from_iter<I: IntoIterator<Item = LessonId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

//
// ─── USER PROGRESS ─────────────────────────────────────────────────────────────
//

/// Per-user record of completed lesson ids grouped by course.
///
/// Created lazily on the first completion. Completions only ever add to the
/// record, so entries for one course are never affected by writes to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProgress {
    user_id: UserId,
    completed_lessons: BTreeMap<CourseId, CompletionSet>,
}

impl UserProgress {
    /// An empty record for `user_id`.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            completed_lessons: BTreeMap::new(),
        }
    }

    /// Rebuild a record from stored `(course, lesson)` pairs.
    ///
    /// Duplicate pairs collapse into one entry.
    #[must_use]
    pub fn from_persisted(
        user_id: UserId,
        entries: impl IntoIterator<Item = (CourseId, LessonId)>,
    ) -> Self {
        let mut progress = Self::new(user_id);
        for (course_id, lesson_id) in entries {
            progress.mark_complete(course_id, lesson_id);
        }
        progress
    }

    /// Record a completion. Returns `true` if the lesson was newly added.
    pub fn mark_complete(&mut self, course_id: CourseId, lesson_id: LessonId) -> bool {
        self.completed_lessons
            .entry(course_id)
            .or_default()
            .merge(lesson_id)
    }

    /// The completion set for `course_id`, empty when the course has no entry.
    #[must_use]
    pub fn completed_in(&self, course_id: &CourseId) -> CompletionSet {
        self.completed_lessons
            .get(course_id)
            .cloned()
            .unwrap_or_default()
    }

    #[must_use]
    pub fn completed_count(&self, course_id: &CourseId) -> u32 {
        self.completed_lessons
            .get(course_id)
            .map_or(0, |set| u32::try_from(set.len()).unwrap_or(u32::MAX))
    }
}

//
// ─── COURSE PROGRESS ───────────────────────────────────────────────────────────
//

/// Aggregated `(completed, total)` pair for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProgress {
    pub course_id: CourseId,
    pub title: String,
    pub completed: u32,
    pub total: u32,
}

impl CourseProgress {
    /// Share of completed lessons as a percentage for bar display.
    ///
    /// Returns exactly `0.0` for a course without lessons. A record that
    /// counts more completions than the course still has lessons (a lesson
    /// was deleted after completion) caps at `100.0`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let ratio = f64::from(self.completed) / f64::from(self.total) * 100.0;
        ratio.min(100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("u1")
    }

    #[test]
    fn marking_twice_equals_marking_once() {
        let mut once = UserProgress::new(user());
        once.mark_complete(CourseId::new("c1"), LessonId::new("l1"));

        let mut twice = UserProgress::new(user());
        assert!(twice.mark_complete(CourseId::new("c1"), LessonId::new("l1")));
        assert!(!twice.mark_complete(CourseId::new("c1"), LessonId::new("l1")));

        assert_eq!(once, twice);
        assert_eq!(twice.completed_count(&CourseId::new("c1")), 1);
    }

    #[test]
    fn completion_in_one_course_leaves_others_untouched() {
        let mut progress = UserProgress::new(user());
        progress.mark_complete(CourseId::new("b"), LessonId::new("b1"));
        let before = progress.completed_in(&CourseId::new("b"));

        progress.mark_complete(CourseId::new("a"), LessonId::new("a1"));
        progress.mark_complete(CourseId::new("a"), LessonId::new("a2"));

        assert_eq!(progress.completed_in(&CourseId::new("b")), before);
        assert_eq!(progress.completed_count(&CourseId::new("a")), 2);
    }

    #[test]
    fn missing_course_yields_empty_set() {
        let progress = UserProgress::new(user());
        assert!(progress.completed_in(&CourseId::new("nope")).is_empty());
        assert_eq!(progress.completed_count(&CourseId::new("nope")), 0);
    }

    #[test]
    fn union_never_drops_lessons() {
        let mut local: CompletionSet = [LessonId::new("l1")].into_iter().collect();
        let fetched: CompletionSet = [LessonId::new("l2")].into_iter().collect();
        local.union_with(&fetched);
        assert_eq!(local.len(), 2);
        assert!(local.contains(&LessonId::new("l1")));
    }

    #[test]
    fn from_persisted_collapses_duplicates() {
        let progress = UserProgress::from_persisted(
            user(),
            vec![
                (CourseId::new("c1"), LessonId::new("l1")),
                (CourseId::new("c1"), LessonId::new("l1")),
                (CourseId::new("c1"), LessonId::new("l2")),
            ],
        );
        assert_eq!(progress.completed_count(&CourseId::new("c1")), 2);
    }

    #[test]
    fn percent_is_zero_for_empty_course() {
        let row = CourseProgress {
            course_id: CourseId::new("c"),
            title: "Empty".into(),
            completed: 0,
            total: 0,
        };
        assert_eq!(row.percent(), 0.0);
        assert!(row.percent().is_finite());
    }

    #[test]
    fn percent_tracks_ratio_and_clamps_counts_past_the_lesson_total() {
        let mut row = CourseProgress {
            course_id: CourseId::new("c"),
            title: "Course".into(),
            completed: 1,
            total: 4,
        };
        assert!((row.percent() - 25.0).abs() < f64::EPSILON);

        row.completed = 5;
        assert!((row.percent() - 100.0).abs() < f64::EPSILON);
    }
}

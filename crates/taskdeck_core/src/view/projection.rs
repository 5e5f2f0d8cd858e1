//! Display projection over the task collection.
//!
//! # Responsibility
//! - Filter by status and priority, then order for display.
//! - Compute summary counts over the unfiltered collection.
//!
//! # Invariants
//! - Pure: the input slice is never reordered or mutated.
//! - Sorting is stable, so equal (completed, priority) keys keep base order.

use crate::model::task::{Priority, Task, TaskValidationError};
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Completion-state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Unrecognized filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown filter `{}`", self.0)
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for StatusFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}

/// Priority filter: everything, or a single level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Only(priority) => task.priority == priority,
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(value: Priority) -> Self {
        Self::Only(value)
    }
}

impl FromStr for PriorityFilter {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value
            .parse::<Priority>()
            .map(Self::Only)
            .map_err(|err| match err {
                TaskValidationError::UnknownPriority(name) => UnknownFilter(name),
                other => UnknownFilter(other.to_string()),
            })
    }
}

/// Filter pair supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

impl TaskQuery {
    pub fn new(status: StatusFilter, priority: PriorityFilter) -> Self {
        Self { status, priority }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.matches(task) && self.priority.matches(task)
    }
}

/// Aggregate counts over the whole collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TaskCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    pub fn of(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }
}

/// Why the visible list is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// The collection itself has no tasks.
    NoTasks,
    /// Tasks exist but none pass the filters.
    NoMatches,
}

/// Filtered, ordered view plus counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub tasks: Vec<&'a Task>,
    pub counts: TaskCounts,
}

impl Projection<'_> {
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.tasks.is_empty() {
            None
        } else if self.counts.total == 0 {
            Some(EmptyState::NoTasks)
        } else {
            Some(EmptyState::NoMatches)
        }
    }

    pub fn titles(&self) -> Vec<&str> {
        self.tasks.iter().map(|task| task.title.as_str()).collect()
    }
}

/// Builds the display projection for `tasks` in base order.
pub fn project<'a>(tasks: &'a [Task], query: &TaskQuery) -> Projection<'a> {
    let mut visible: Vec<&Task> = tasks.iter().filter(|task| query.matches(task)).collect();
    visible.sort_by_key(|task| display_key(task));

    Projection {
        tasks: visible,
        counts: TaskCounts::of(tasks),
    }
}

fn display_key(task: &Task) -> (bool, u8) {
    (task.completed, task.priority.rank())
}

#[cfg(test)]
mod tests {
    use super::{project, EmptyState, PriorityFilter, StatusFilter, TaskCounts, TaskQuery};
    use crate::model::task::{Priority, Task, TaskDraft};
    use chrono::Utc;

    fn task(title: &str, priority: Priority, completed: bool) -> Task {
        let mut task =
            Task::create_at(TaskDraft::new(title).priority(priority), title.to_string(), Utc::now())
                .unwrap();
        task.completed = completed;
        task
    }

    #[test]
    fn filters_parse_from_names() {
        assert_eq!("Active".parse::<StatusFilter>().unwrap(), StatusFilter::Active);
        assert_eq!("all".parse::<PriorityFilter>().unwrap(), PriorityFilter::All);
        assert_eq!(
            "high".parse::<PriorityFilter>().unwrap(),
            PriorityFilter::Only(Priority::High)
        );
        assert!("urgent".parse::<PriorityFilter>().is_err());
        assert!("done".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn sorts_incomplete_first_then_by_priority_keeping_base_order() {
        let tasks = vec![
            task("done-high", Priority::High, true),
            task("low-a", Priority::Low, false),
            task("high-a", Priority::High, false),
            task("medium-a", Priority::Medium, false),
            task("low-b", Priority::Low, false),
            task("done-low", Priority::Low, true),
            task("high-b", Priority::High, false),
            task("done-high-2", Priority::High, true),
        ];

        let projection = project(&tasks, &TaskQuery::default());
        assert_eq!(
            projection.titles(),
            vec![
                "high-a",
                "high-b",
                "medium-a",
                "low-a",
                "low-b",
                "done-high",
                "done-high-2",
                "done-low",
            ]
        );
        assert_eq!(tasks[0].title, "done-high");
    }

    #[test]
    fn counts_ignore_filters() {
        let tasks = vec![
            task("a", Priority::High, false),
            task("b", Priority::Low, true),
            task("c", Priority::Low, false),
        ];
        let query = TaskQuery::new(StatusFilter::Completed, PriorityFilter::Only(Priority::High));

        let projection = project(&tasks, &query);
        assert!(projection.tasks.is_empty());
        assert_eq!(
            projection.counts,
            TaskCounts {
                total: 3,
                active: 2,
                completed: 1
            }
        );
        assert_eq!(projection.empty_state(), Some(EmptyState::NoMatches));
    }

    #[test]
    fn filters_combine_status_and_priority() {
        let tasks = vec![
            task("a", Priority::Low, false),
            task("b", Priority::Low, true),
            task("c", Priority::High, false),
        ];

        let active_low = TaskQuery::new(StatusFilter::Active, Priority::Low.into());
        assert_eq!(project(&tasks, &active_low).titles(), vec!["a"]);

        let completed_any = TaskQuery::new(StatusFilter::Completed, PriorityFilter::All);
        assert_eq!(project(&tasks, &completed_any).titles(), vec!["b"]);
    }

    #[test]
    fn empty_collection_reports_no_tasks() {
        let projection = project(&[], &TaskQuery::default());
        assert_eq!(projection.counts, TaskCounts::default());
        assert_eq!(projection.empty_state(), Some(EmptyState::NoTasks));
    }
}

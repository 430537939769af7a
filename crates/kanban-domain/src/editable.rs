use chrono::{DateTime, Utc};
use kanban_core::Editable;
use serde::{Deserialize, Serialize};

use crate::field_update::FieldUpdate;
use crate::task::{Assignee, Priority, Progress, Task, TaskDraft};

/// The user-editable fields of a task, as submitted by an edit form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub progress: Progress,
    pub assignee: Assignee,
    pub allocator: String,
    pub deadline: Option<DateTime<Utc>>,
}

impl Editable<Task> for TaskFields {
    fn from_entity(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            progress: task.progress,
            assignee: task.assignee.clone(),
            allocator: task.allocator.clone(),
            deadline: task.deadline,
        }
    }

    fn apply_to(self, task: &mut Task) {
        task.title = self.title;
        task.description = self.description;
        task.priority = self.priority;
        task.progress = self.progress;
        task.assignee = self.assignee;
        task.allocator = self.allocator;
        task.deadline = self.deadline;
    }
}

impl Editable<TaskDraft> for TaskFields {
    fn from_entity(draft: &TaskDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            priority: draft.priority,
            progress: draft.progress,
            assignee: draft.assignee.clone(),
            allocator: draft.allocator.clone(),
            deadline: draft.deadline,
        }
    }

    fn apply_to(self, draft: &mut TaskDraft) {
        draft.title = self.title;
        draft.description = self.description;
        draft.priority = self.priority;
        draft.progress = self.progress;
        draft.assignee = self.assignee;
        draft.allocator = self.allocator;
        draft.deadline = self.deadline;
    }
}

/// A partial edit: only the fields that are `Some` (or a deadline change)
/// are touched when layered over the current values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub progress: Option<Progress>,
    pub assignee: Option<String>,
    pub allocator: Option<String>,
    pub deadline: FieldUpdate<DateTime<Utc>>,
}

impl TaskUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.progress.is_none()
            && self.assignee.is_none()
            && self.allocator.is_none()
            && !self.deadline.is_change()
    }

    /// Layer this edit over `fields`, returning the full field set to submit.
    pub fn apply(self, mut fields: TaskFields) -> TaskFields {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        if let Some(priority) = self.priority {
            fields.priority = priority;
        }
        if let Some(progress) = self.progress {
            fields.progress = progress;
        }
        if let Some(name) = self.assignee {
            fields.assignee.name = name;
        }
        if let Some(allocator) = self.allocator {
            fields.allocator = allocator;
        }
        self.deadline.apply_to(&mut fields.deadline);
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;

    #[test]
    fn test_apply_keeps_identity_and_creation_date() {
        let mut task = Task::new(TaskId::from("t1"), "Old");
        let created_at = task.created_at;

        let mut fields = TaskFields::from_entity(&task);
        fields.title = "New".to_string();
        fields.priority = Priority::Urgent;
        fields.progress = Progress::new(75);
        fields.apply_to(&mut task);

        assert_eq!(task.id, TaskId::from("t1"));
        assert_eq!(task.title, "New");
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.progress.value(), 75);
        assert_eq!(task.created_at, created_at);
    }

    #[test]
    fn test_partial_update_touches_only_given_fields() {
        let mut task = Task::new(TaskId::from("t1"), "Keep me");
        task.deadline = Some(Utc::now());
        task.assignee = Assignee::new("Ana");

        let update = TaskUpdate {
            priority: Some(Priority::High),
            assignee: Some("Carlos".to_string()),
            deadline: FieldUpdate::Clear,
            ..Default::default()
        };
        assert!(!update.is_empty());

        let fields = update.apply(TaskFields::from_entity(&task));
        assert_eq!(fields.title, "Keep me");
        assert_eq!(fields.priority, Priority::High);
        assert_eq!(fields.assignee.name, "Carlos");
        assert_eq!(fields.assignee.avatar_url, task.assignee.avatar_url);
        assert!(fields.deadline.is_none());
        assert!(TaskUpdate::default().is_empty());
    }
}

//! Wire models for the remote API and their mapping to the domain types.
//!
//! Inbound records are read leniently: the collaborator has shipped several
//! field spellings over time, so each domain field accepts every known
//! spelling and falls back to a default. Outbound payloads use exactly one
//! spelling.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use kanban_domain::{
    Assignee, BoardId, ColumnId, EntityId, Priority, Progress, Task, TaskDraft, TaskId,
};
use kanban_core::{KanbanError, KanbanResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const UNTITLED_COLUMN: &str = "Untitled";
const UNTITLED_TASK: &str = "Untitled";
const DEFAULT_NEW_TASK_TITLE: &str = "New task";
const DEFAULT_PERSON: &str = "User";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiBoard {
    pub id: BoardId,
    #[serde(default)]
    pub name: String,
}

/// A remote "card", which is a column on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiColumn {
    pub id: ColumnId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

impl ApiColumn {
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .or_else(|| self.name.clone())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED_COLUMN.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTask {
    pub id: TaskId,
    #[serde(default)]
    pub task_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "card_id")]
    pub card_id: Option<EntityId>,
    #[serde(default)]
    pub status: Option<EntityId>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub progress: Option<f64>,
    #[serde(default)]
    pub employee: Option<String>,
    #[serde(default)]
    pub user: Option<ApiUser>,
    #[serde(default)]
    pub allocator: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub deadline: Option<String>,
}

impl ApiTask {
    /// The remote column reference this task claims to belong to.
    pub fn column_ref(&self) -> Option<&EntityId> {
        self.card_id.as_ref().or(self.status.as_ref())
    }

    pub fn into_task(self) -> Task {
        let user = self.user.unwrap_or_default();
        let assignee = Assignee {
            name: non_empty(self.employee)
                .or_else(|| non_empty(user.name.clone()))
                .unwrap_or_else(|| DEFAULT_PERSON.to_string()),
            role: user.role.unwrap_or_default(),
            avatar_url: non_empty(user.avatar_url)
                .unwrap_or_else(|| kanban_domain::task::DEFAULT_AVATAR_URL.to_string()),
        };

        Task {
            id: self.id,
            title: non_empty(self.task_name)
                .or_else(|| non_empty(self.title))
                .unwrap_or_else(|| UNTITLED_TASK.to_string()),
            description: self.description.unwrap_or_default(),
            priority: self
                .priority
                .as_deref()
                .map(priority_from_remote)
                .unwrap_or_default(),
            progress: Progress::new(self.progress.unwrap_or(0.0).round() as i64),
            assignee,
            allocator: self.allocator.unwrap_or_default(),
            created_at: self
                .start_date
                .as_deref()
                .or(self.creation_date.as_deref())
                .and_then(parse_remote_date)
                .unwrap_or_else(Utc::now),
            deadline: self
                .end_date
                .as_deref()
                .or(self.deadline.as_deref())
                .and_then(parse_remote_date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoard {
    pub name: String,
    /// Hint for how many columns the board will get.
    pub num_cards: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewColumn {
    pub title: String,
    pub order: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Full task record as sent on create and update. The column reference is
/// computed by the caller from the task's current column at send time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPayload {
    pub task_name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub allocator: String,
    pub employee: String,
    pub priority: String,
    pub progress: u8,
    #[serde(rename = "card_id")]
    pub card_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<BoardId>,
}

impl TaskPayload {
    pub fn from_task(task: &Task, card_id: EntityId) -> Self {
        Self {
            task_name: or_default(&task.title, DEFAULT_NEW_TASK_TITLE),
            description: task.description.clone(),
            start_date: task.created_at.date_naive(),
            end_date: task.deadline.map(|d| d.date_naive()),
            allocator: or_default(&task.allocator, DEFAULT_PERSON),
            employee: or_default(&task.assignee.name, DEFAULT_PERSON),
            priority: priority_to_remote(task.priority).to_string(),
            progress: task.progress.value(),
            card_id,
            board_id: None,
        }
    }

    pub fn from_draft(draft: &TaskDraft, card_id: EntityId) -> Self {
        Self {
            task_name: or_default(&draft.title, DEFAULT_NEW_TASK_TITLE),
            description: draft.description.clone(),
            start_date: draft.created_at.date_naive(),
            end_date: draft.deadline.map(|d| d.date_naive()),
            allocator: or_default(&draft.allocator, DEFAULT_PERSON),
            employee: or_default(&draft.assignee.name, DEFAULT_PERSON),
            priority: priority_to_remote(draft.priority).to_string(),
            progress: draft.progress.value(),
            card_id,
            board_id: None,
        }
    }

    pub fn with_board(mut self, board_id: BoardId) -> Self {
        self.board_id = Some(board_id);
        self
    }
}

/// Priority in the remote vocabulary.
pub fn priority_to_remote(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Baja",
        Priority::Medium => "Media",
        Priority::High => "Alta",
        Priority::Urgent => "Urgente",
    }
}

/// Accepts the remote vocabulary and the domain names; anything else is Medium.
pub fn priority_from_remote(value: &str) -> Priority {
    match value.trim().to_lowercase().as_str() {
        "baja" | "low" => Priority::Low,
        "alta" | "high" => Priority::High,
        "urgente" | "urgent" => Priority::Urgent,
        _ => Priority::Medium,
    }
}

/// Parse a date-only (`2024-07-15`) or full timestamp value.
pub fn parse_remote_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// List endpoints sometimes wrap their array in `{"data": [...]}` and
/// sometimes return something that is not a list at all.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody {
    Bare(Vec<Value>),
    Wrapped { data: Vec<Value> },
    Other(Value),
}

impl ListBody {
    /// Decode every record on its own. A malformed record is skipped with a
    /// warning; a body that is not a list is an error.
    pub(crate) fn into_items<T: DeserializeOwned>(self) -> KanbanResult<Vec<T>> {
        let raw = match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
            Self::Other(_) => {
                return Err(KanbanError::Serialization(
                    "Expected a list in the response body".to_string(),
                ))
            }
        };

        let items = raw
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match serde_json::from_value(item) {
                Ok(parsed) => Some(parsed),
                Err(e) => {
                    tracing::warn!("Skipping malformed record at index {}: {}", index, e);
                    None
                }
            })
            .collect();
        Ok(items)
    }
}

/// Accepts a number, a numeric string such as `"50.00"`, or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn or_default(value: &str, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_api_task_reads_remote_spellings() {
        let raw = json!({
            "id": 12,
            "taskName": "Design landing page",
            "description": "Wireframe first",
            "card_id": 3,
            "priority": "Alta",
            "progress": 140,
            "employee": "Ana",
            "allocator": "Carlos",
            "startDate": "2024-07-15",
            "endDate": "2024-08-01T23:59:59Z"
        });

        let api: ApiTask = serde_json::from_value(raw).unwrap();
        assert_eq!(api.column_ref(), Some(&EntityId::from("3")));

        let task = api.into_task();
        assert_eq!(task.id, TaskId::from("12"));
        assert_eq!(task.title, "Design landing page");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.progress.value(), 100);
        assert_eq!(task.assignee.name, "Ana");
        assert_eq!(task.allocator, "Carlos");
        assert_eq!(
            task.created_at,
            Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap()
        );
        assert_eq!(
            task.deadline,
            Some(Utc.with_ymd_and_hms(2024, 8, 1, 23, 59, 59).unwrap())
        );
    }

    #[test]
    fn test_api_task_falls_back_to_alternate_fields() {
        let raw = json!({
            "id": "TSK-1",
            "title": "Configure environment",
            "status": "Pending",
            "user": { "name": "Luisa", "role": "Backend", "avatarUrl": "https://example.com/a.png" }
        });

        let api: ApiTask = serde_json::from_value(raw).unwrap();
        assert_eq!(api.column_ref(), Some(&EntityId::from("Pending")));

        let task = api.into_task();
        assert_eq!(task.title, "Configure environment");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.progress.value(), 0);
        assert_eq!(task.assignee.name, "Luisa");
        assert_eq!(task.assignee.role, "Backend");
        assert_eq!(task.assignee.avatar_url, "https://example.com/a.png");
        assert!(task.deadline.is_none());
    }

    #[test]
    fn test_payload_field_mapping() {
        let mut task = Task::new(TaskId::from("5"), "");
        task.created_at = Utc.with_ymd_and_hms(2024, 7, 16, 11, 0, 0).unwrap();
        task.deadline = Some(Utc.with_ymd_and_hms(2024, 7, 30, 23, 59, 59).unwrap());
        task.assignee = Assignee::new("Carlos");
        task.allocator = "Ana".to_string();
        task.priority = Priority::Urgent;
        task.progress = Progress::new(35);

        let payload = TaskPayload::from_task(&task, EntityId::from(4));
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["taskName"], "New task");
        assert_eq!(value["startDate"], "2024-07-16");
        assert_eq!(value["endDate"], "2024-07-30");
        assert_eq!(value["employee"], "Carlos");
        assert_eq!(value["allocator"], "Ana");
        assert_eq!(value["priority"], "Urgente");
        assert_eq!(value["progress"], 35);
        assert_eq!(value["card_id"], 4);
        assert!(value.get("boardId").is_none());
    }

    #[test]
    fn test_payload_with_board_and_null_deadline() {
        let draft = TaskDraft::new(ColumnId::from("7"));
        let payload =
            TaskPayload::from_draft(&draft, EntityId::from(7)).with_board(BoardId::from("2"));
        let value = serde_json::to_value(&payload).unwrap();

        assert_eq!(value["boardId"], 2);
        assert!(value["endDate"].is_null());
        assert_eq!(value["employee"], "User");
        assert_eq!(value["priority"], "Media");
    }

    #[test]
    fn test_priority_vocabularies() {
        for priority in [
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Urgent,
        ] {
            assert_eq!(priority_from_remote(priority_to_remote(priority)), priority);
        }
        assert_eq!(priority_from_remote("urgent"), Priority::Urgent);
        assert_eq!(priority_from_remote("whatever"), Priority::Medium);
    }

    #[test]
    fn test_parse_remote_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(parse_remote_date("2024-01-02"), Some(midnight));
        assert_eq!(parse_remote_date("2024-01-02T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse_remote_date("2024-01-02 00:00:00"), Some(midnight));
        assert_eq!(parse_remote_date("not a date"), None);
    }

    #[test]
    fn test_column_title_fallbacks() {
        let column: ApiColumn = serde_json::from_value(json!({"id": 1, "name": "Doing"})).unwrap();
        assert_eq!(column.display_title(), "Doing");

        let column: ApiColumn = serde_json::from_value(json!({"id": 2})).unwrap();
        assert_eq!(column.display_title(), "Untitled");
    }

    #[test]
    fn test_list_body_shapes() {
        let bare: ListBody = serde_json::from_value(json!([{"id": 1, "name": "A"}])).unwrap();
        assert_eq!(bare.into_items::<ApiBoard>().unwrap().len(), 1);

        let wrapped: ListBody =
            serde_json::from_value(json!({"data": [{"id": 1, "name": "A"}]})).unwrap();
        assert_eq!(wrapped.into_items::<ApiBoard>().unwrap().len(), 1);

        let other: ListBody = serde_json::from_value(json!({"message": "ok"})).unwrap();
        assert!(matches!(
            other.into_items::<ApiBoard>(),
            Err(KanbanError::Serialization(_))
        ));
    }

    #[test]
    fn test_malformed_record_only_drops_itself() {
        let body: ListBody = serde_json::from_value(json!([
            {"id": 1, "progress": 20},
            {"id": null},
            {"id": 3, "progress": "50.00"},
            {"id": 4, "progress": null}
        ]))
        .unwrap();

        let tasks = body.into_items::<ApiTask>().unwrap();
        let ids: Vec<_> = tasks.iter().map(|t| t.id.as_str().to_string()).collect();
        assert_eq!(ids, vec!["1", "3", "4"]);
        assert_eq!(tasks[1].progress, Some(50.0));
        assert_eq!(tasks[2].progress, None);
    }
}

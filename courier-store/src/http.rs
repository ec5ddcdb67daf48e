//! Blocking HTTP client for Notion-compatible task boards.
//!
//! Speaks the two endpoints the sync engine needs:
//! - `POST /v1/databases/{board_id}/query` — paginated listing of existing
//!   tasks, used to seed duplicate detection.
//! - `POST /v1/pages` — create one task.
//!
//! Property mapping: `Name` (title, capped at the API's 2000-character
//! limit), `Assignee`/`Role` (rich text), `Priority` (select), `Deadline`
//! (date), `Confidence` (number), `Status` (select, always "To Do" on
//! create).

use std::time::Duration;

use courier_core::types::Task;
use serde_json::{json, Value};

use crate::client::{CreatedTask, ExistingTask, StoreClient};
use crate::error::StoreError;

const DEFAULT_BASE_URL: &str = "https://api.notion.com";
const API_VERSION: &str = "2022-06-28";
const TITLE_CHAR_LIMIT: usize = 2000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One department board, reachable over HTTP.
pub struct HttpStoreClient {
    agent: ureq::Agent,
    base_url: String,
    token: String,
    board_id: String,
}

impl HttpStoreClient {
    pub fn new(token: impl Into<String>, board_id: impl Into<String>) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, token, board_id)
    }

    /// Point the client at a non-default API host (proxies, test servers).
    pub fn with_base_url(
        base_url: impl Into<String>,
        token: impl Into<String>,
        board_id: impl Into<String>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            board_id: board_id.into(),
        }
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    fn post(&self, url: &str, body: Value) -> Result<Value, StoreError> {
        let response = self
            .agent
            .post(url)
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Notion-Version", API_VERSION)
            .send_json(body)?;
        Ok(response.into_json()?)
    }
}

impl StoreClient for HttpStoreClient {
    fn list_existing(&self) -> Result<Vec<ExistingTask>, StoreError> {
        let url = format!("{}/v1/databases/{}/query", self.base_url, self.board_id);
        let mut existing = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let body = match &cursor {
                Some(cursor) => json!({ "start_cursor": cursor }),
                None => json!({}),
            };
            let page = self.post(&url, body)?;
            existing.extend(titles_from_query_page(&page));

            let has_more = page.get("has_more").and_then(Value::as_bool).unwrap_or(false);
            if !has_more {
                break;
            }
            cursor = match page.get("next_cursor").and_then(Value::as_str) {
                Some(next) => Some(next.to_string()),
                // has_more without a cursor would loop forever; treat the
                // page as final instead.
                None => break,
            };
        }

        Ok(existing)
    }

    fn create(&self, task: &Task) -> Result<CreatedTask, StoreError> {
        let url = format!("{}/v1/pages", self.base_url);
        let body = json!({
            "parent": { "type": "database_id", "database_id": self.board_id },
            "properties": task_properties(task),
        });
        let page = self.post(&url, body)?;
        let id = page
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Response("created page has no id".to_string()))?;
        Ok(CreatedTask { id: id.to_string() })
    }
}

// ---------------------------------------------------------------------------
// Payload shaping (pure)
// ---------------------------------------------------------------------------

/// Build the properties object for a task create.
fn task_properties(task: &Task) -> Value {
    let title: String = task.text.chars().take(TITLE_CHAR_LIMIT).collect();
    let mut properties = serde_json::Map::new();
    properties.insert(
        "Name".to_string(),
        json!({ "title": [ { "text": { "content": title } } ] }),
    );
    properties.insert(
        "Status".to_string(),
        json!({ "select": { "name": "To Do" } }),
    );

    if let Some(assignee) = &task.assignee {
        properties.insert(
            "Assignee".to_string(),
            json!({ "rich_text": [ { "text": { "content": assignee } } ] }),
        );
    }
    if let Some(role) = &task.role {
        properties.insert(
            "Role".to_string(),
            json!({ "rich_text": [ { "text": { "content": role } } ] }),
        );
    }
    if let Some(priority) = task.priority {
        properties.insert(
            "Priority".to_string(),
            json!({ "select": { "name": priority.to_string() } }),
        );
    }
    if let Some(deadline) = task.deadline {
        properties.insert(
            "Deadline".to_string(),
            json!({ "date": { "start": deadline.format("%Y-%m-%d").to_string() } }),
        );
    }
    if let Some(confidence) = task.confidence {
        properties.insert("Confidence".to_string(), json!({ "number": confidence }));
    }

    Value::Object(properties)
}

/// Pull displayed titles out of one query-results page.
///
/// The title property is located by type rather than by name, so boards
/// that renamed the `Name` column still dedup correctly.
fn titles_from_query_page(page: &Value) -> Vec<ExistingTask> {
    let Some(results) = page.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .filter_map(|result| {
            let properties = result.get("properties")?.as_object()?;
            let title_prop = properties
                .values()
                .find(|prop| prop.get("type").and_then(Value::as_str) == Some("title"))?;
            let fragments = title_prop.get("title")?.as_array()?;
            let title: String = fragments
                .iter()
                .filter_map(|f| f.get("plain_text").and_then(Value::as_str))
                .collect();
            Some(ExistingTask { title })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use courier_core::types::Priority;

    fn full_task() -> Task {
        Task {
            text: "Finalize the launch plan".to_string(),
            assignee: Some("Shagun".to_string()),
            role: Some("Marketing Lead".to_string()),
            priority: Some(Priority::High),
            deadline: NaiveDate::from_ymd_opt(2025, 12, 8),
            confidence: Some(0.95),
        }
    }

    #[test]
    fn properties_include_all_task_fields() {
        let props = task_properties(&full_task());
        assert_eq!(
            props["Name"]["title"][0]["text"]["content"],
            "Finalize the launch plan"
        );
        assert_eq!(props["Assignee"]["rich_text"][0]["text"]["content"], "Shagun");
        assert_eq!(props["Role"]["rich_text"][0]["text"]["content"], "Marketing Lead");
        assert_eq!(props["Priority"]["select"]["name"], "High");
        assert_eq!(props["Deadline"]["date"]["start"], "2025-12-08");
        assert_eq!(props["Confidence"]["number"], 0.95);
        assert_eq!(props["Status"]["select"]["name"], "To Do");
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let props = task_properties(&Task::with_text("Bare task"));
        let map = props.as_object().unwrap();
        assert!(map.contains_key("Name"));
        assert!(map.contains_key("Status"));
        assert!(!map.contains_key("Assignee"));
        assert!(!map.contains_key("Priority"));
        assert!(!map.contains_key("Deadline"));
        assert!(!map.contains_key("Confidence"));
    }

    #[test]
    fn title_is_capped_at_store_limit() {
        let long = "x".repeat(TITLE_CHAR_LIMIT + 500);
        let props = task_properties(&Task::with_text(long));
        let title = props["Name"]["title"][0]["text"]["content"].as_str().unwrap();
        assert_eq!(title.chars().count(), TITLE_CHAR_LIMIT);
    }

    #[test]
    fn query_page_titles_are_extracted_by_property_type() {
        let page = serde_json::json!({
            "results": [
                {
                    "properties": {
                        "Task": {
                            "type": "title",
                            "title": [
                                { "plain_text": "Update the " },
                                { "plain_text": "landing page" }
                            ]
                        },
                        "Status": { "type": "select", "select": { "name": "To Do" } }
                    }
                },
                {
                    "properties": {
                        "Name": { "type": "title", "title": [ { "plain_text": "Second" } ] }
                    }
                }
            ],
            "has_more": false
        });
        let titles = titles_from_query_page(&page);
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].title, "Update the landing page");
        assert_eq!(titles[1].title, "Second");
    }

    #[test]
    fn malformed_query_page_yields_no_titles() {
        assert!(titles_from_query_page(&serde_json::json!({})).is_empty());
        assert!(titles_from_query_page(&serde_json::json!({"results": "nope"})).is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpStoreClient::with_base_url("http://localhost:8080/", "tok", "b1");
        assert_eq!(client.base_url, "http://localhost:8080");
    }
}

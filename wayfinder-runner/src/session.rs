use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;
use wayfinder_core::{Content, Event, Result, Session, WayfinderError};

#[derive(Clone)]
pub struct CreateRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: Option<String>,
}

#[derive(Clone)]
pub struct GetRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    async fn create(&self, req: CreateRequest) -> Result<Box<dyn Session>>;
    async fn get(&self, req: GetRequest) -> Result<Box<dyn Session>>;
    async fn append_event(&self, req: &GetRequest, event: Event) -> Result<()>;
}

#[derive(Clone)]
struct SessionData {
    id: SessionId,
    events: Vec<Event>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SessionId {
    app_name: String,
    user_id: String,
    session_id: String,
}

impl SessionId {
    fn key(&self) -> String {
        format!("{}:{}:{}", self.app_name, self.user_id, self.session_id)
    }
}

/// Process-local session storage. One travel-planner run never needs more,
/// and tests get cheap isolation.
pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())) }
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create(&self, req: CreateRequest) -> Result<Box<dyn Session>> {
        let session_id = req.session_id.unwrap_or_else(|| Uuid::new_v4().to_string());

        let id = SessionId {
            app_name: req.app_name,
            user_id: req.user_id,
            session_id,
        };

        let data = SessionData { id: id.clone(), events: Vec::new() };

        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(id.key(), data);

        Ok(Box::new(InMemorySession { id, events: Vec::new() }))
    }

    async fn get(&self, req: GetRequest) -> Result<Box<dyn Session>> {
        let id = SessionId {
            app_name: req.app_name,
            user_id: req.user_id,
            session_id: req.session_id,
        };

        let sessions = self.sessions.read().unwrap();
        let data = sessions
            .get(&id.key())
            .ok_or_else(|| WayfinderError::Session("session not found".into()))?;

        Ok(Box::new(InMemorySession { id: data.id.clone(), events: data.events.clone() }))
    }

    async fn append_event(&self, req: &GetRequest, event: Event) -> Result<()> {
        let id = SessionId {
            app_name: req.app_name.clone(),
            user_id: req.user_id.clone(),
            session_id: req.session_id.clone(),
        };

        let mut sessions = self.sessions.write().unwrap();
        let data = sessions
            .get_mut(&id.key())
            .ok_or_else(|| WayfinderError::Session("session not found".into()))?;

        data.events.push(event);
        Ok(())
    }
}

struct InMemorySession {
    id: SessionId,
    events: Vec<Event>,
}

impl Session for InMemorySession {
    fn id(&self) -> &str {
        &self.id.session_id
    }

    fn app_name(&self) -> &str {
        &self.id.app_name
    }

    fn user_id(&self) -> &str {
        &self.id.user_id
    }

    fn conversation_history(&self) -> Vec<Content> {
        self.events.iter().filter_map(|e| e.llm_response.content.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_with_text(invocation_id: &str, role: &str, text: &str) -> Event {
        let mut event = Event::new(invocation_id);
        event.author = role.to_string();
        event.set_content(Content::new(role).with_text(text));
        event
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let service = InMemorySessionService::new();

        let session = service
            .create(CreateRequest {
                app_name: "planner".into(),
                user_id: "user1".into(),
                session_id: Some("s1".into()),
            })
            .await
            .unwrap();
        assert_eq!(session.id(), "s1");
        assert_eq!(session.app_name(), "planner");

        let fetched = service
            .get(GetRequest {
                app_name: "planner".into(),
                user_id: "user1".into(),
                session_id: "s1".into(),
            })
            .await
            .unwrap();
        assert_eq!(fetched.user_id(), "user1");
        assert!(fetched.conversation_history().is_empty());
    }

    #[tokio::test]
    async fn test_get_unknown_session_fails() {
        let service = InMemorySessionService::new();
        let result = service
            .get(GetRequest {
                app_name: "planner".into(),
                user_id: "user1".into(),
                session_id: "nope".into(),
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_append_event_builds_history() {
        let service = InMemorySessionService::new();
        service
            .create(CreateRequest {
                app_name: "planner".into(),
                user_id: "user1".into(),
                session_id: Some("s1".into()),
            })
            .await
            .unwrap();

        let key = GetRequest {
            app_name: "planner".into(),
            user_id: "user1".into(),
            session_id: "s1".into(),
        };
        service.append_event(&key, event_with_text("inv-1", "user", "3 days in Rome")).await.unwrap();
        service.append_event(&key, event_with_text("inv-1", "model", "Day 1: ...")).await.unwrap();

        let session = service.get(key).await.unwrap();

        let history = session.conversation_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, "user");
        assert_eq!(history[1].joined_text(), "Day 1: ...");
    }

    #[tokio::test]
    async fn test_append_event_scopes_by_app_and_user() {
        let service = InMemorySessionService::new();
        for app in ["planner", "other-app"] {
            service
                .create(CreateRequest {
                    app_name: app.into(),
                    user_id: "user1".into(),
                    session_id: Some("shared".into()),
                })
                .await
                .unwrap();
        }

        let planner_key = GetRequest {
            app_name: "planner".into(),
            user_id: "user1".into(),
            session_id: "shared".into(),
        };
        service
            .append_event(&planner_key, event_with_text("inv-1", "user", "hello"))
            .await
            .unwrap();

        let planner = service.get(planner_key).await.unwrap();
        assert_eq!(planner.conversation_history().len(), 1);

        let other = service
            .get(GetRequest {
                app_name: "other-app".into(),
                user_id: "user1".into(),
                session_id: "shared".into(),
            })
            .await
            .unwrap();
        assert!(other.conversation_history().is_empty());

        let missing = GetRequest {
            app_name: "planner".into(),
            user_id: "someone-else".into(),
            session_id: "shared".into(),
        };
        let result = service.append_event(&missing, event_with_text("inv-1", "user", "hi")).await;
        assert!(result.is_err());
    }
}

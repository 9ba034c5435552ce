use std::sync::Arc;

use async_stream::stream;
use futures::StreamExt;
use tracing::{debug, info};
use uuid::Uuid;
use wayfinder_core::{Agent, Content, Event, EventStream, Result};

use crate::context::RunnerInvocationContext;
use crate::session::{GetRequest, SessionService};

pub struct RunnerConfig {
    pub app_name: String,
    pub agent: Arc<dyn Agent>,
    pub session_service: Arc<dyn SessionService>,
}

/// Drives one agent turn against a stored session: records the user message,
/// runs the root agent, and records every event the agent emits.
pub struct Runner {
    app_name: String,
    agent: Arc<dyn Agent>,
    session_service: Arc<dyn SessionService>,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            app_name: config.app_name,
            agent: config.agent,
            session_service: config.session_service,
        }
    }

    pub async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        user_content: Content,
    ) -> Result<EventStream> {
        let session_key = GetRequest {
            app_name: self.app_name.clone(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
        };
        let session = self.session_service.get(session_key.clone()).await?;

        let invocation_id = format!("inv-{}", Uuid::new_v4());
        info!(invocation_id = %invocation_id, agent = self.agent.name(), "starting invocation");

        let mut user_event = Event::new(&invocation_id);
        user_event.author = "user".to_string();
        user_event.set_content(user_content.clone());
        self.session_service
            .append_event(&session_key, user_event)
            .await?;

        let ctx = Arc::new(RunnerInvocationContext::new(
            invocation_id,
            self.agent.name(),
            user_content,
            session,
        ));

        let agent = Arc::clone(&self.agent);
        let session_service = Arc::clone(&self.session_service);

        let stream = stream! {
            let mut agent_events = match agent.run(ctx).await {
                Ok(s) => s,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            while let Some(event) = agent_events.next().await {
                match event {
                    Ok(event) => {
                        debug!(author = %event.author, "recording event");
                        if let Err(e) = session_service.append_event(&session_key, event.clone()).await {
                            yield Err(e);
                            return;
                        }
                        yield Ok(event);
                    }
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

//! Scripted generative model for tests.
//!
//! Replies are produced by a closure over the user prompt, so a single mock can
//! drive every stage of a workflow run. Every call is counted.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{GenerativeModel, LlmError};

type Responder = dyn Fn(&str) -> Result<String, LlmError> + Send + Sync;

pub struct ScriptedModel {
    responder: Box<Responder>,
    /// Prompts containing this marker never get a reply.
    stall_marker: Option<&'static str>,
    calls: AtomicUsize,
}

impl ScriptedModel {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(&str) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            stall_marker: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Replies with `reply`, except that prompts containing `marker` hang forever.
    pub fn stalling_on(marker: &'static str, reply: impl Into<String>) -> Arc<Self> {
        let reply = reply.into();
        Arc::new(Self {
            responder: Box::new(move |_| Ok(reply.clone())),
            stall_marker: Some(marker),
            calls: AtomicUsize::new(0),
        })
    }

    /// A mock that returns the same reply to every prompt.
    pub fn fixed(reply: impl Into<String>) -> Arc<Self> {
        let reply = reply.into();
        Self::new(move |_| Ok(reply.clone()))
    }

    /// A mock whose every call fails as if the upstream service were down.
    pub fn failing() -> Arc<Self> {
        Self::new(|_| {
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            })
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn complete(&self, prompt: &str, _system: Option<&str>) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.stall_marker.is_some_and(|marker| prompt.contains(marker)) {
            std::future::pending::<()>().await;
        }
        (self.responder)(prompt)
    }
}

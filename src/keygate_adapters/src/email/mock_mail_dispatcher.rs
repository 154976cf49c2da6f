use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use keygate_core::{Email, MailDispatchError, MailDispatcher};

/// A message recorded by [`MockMailDispatcher`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Records dispatched messages instead of sending them; optionally fails
/// every dispatch to exercise rollback paths.
#[derive(Debug, Clone, Default)]
pub struct MockMailDispatcher {
    sent: Arc<Mutex<Vec<SentMail>>>,
    fail: bool,
}

impl MockMailDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailDispatcher for MockMailDispatcher {
    async fn send(
        &self,
        to: &Email,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), MailDispatchError> {
        if self.fail {
            return Err(MailDispatchError::Dispatch(
                "mock dispatcher configured to fail".to_string(),
            ));
        }
        self.sent.lock().unwrap().push(SentMail {
            to: to.as_str().to_string(),
            subject: subject.to_string(),
            text_body: text_body.to_string(),
            html_body: html_body.to_string(),
        });
        Ok(())
    }
}

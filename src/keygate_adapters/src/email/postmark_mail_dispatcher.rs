use async_trait::async_trait;
use keygate_core::{Email, MailDispatchError, MailDispatcher};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

/// Mail dispatcher backed by the Postmark HTTP API.
#[derive(Clone)]
pub struct PostmarkMailDispatcher {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkMailDispatcher {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait]
impl MailDispatcher for PostmarkMailDispatcher {
    #[tracing::instrument(name = "Dispatching email", skip_all)]
    async fn send(
        &self,
        to: &Email,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), MailDispatchError> {
        let base = Url::parse(&self.base_url)
            .map_err(|e| MailDispatchError::Dispatch(e.to_string()))?;
        let url = base
            .join("/email")
            .map_err(|e| MailDispatchError::Dispatch(e.to_string()))?;

        let request_body = SendEmailRequest {
            from: self.sender.as_str(),
            to: to.as_str(),
            subject,
            html_body,
            text_body,
            message_stream: MESSAGE_STREAM,
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| MailDispatchError::Dispatch(e.to_string()))?
            .error_for_status()
            .map_err(|e| MailDispatchError::Dispatch(e.to_string()))?;

        Ok(())
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}

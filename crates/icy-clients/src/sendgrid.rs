use serde::Serialize;

use crate::error::{Result, check_status};

const BASE_URL: &str = "https://api.sendgrid.com";

/// A single outbound email with plain-text and HTML bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub struct SendGridClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MailSend<'a> {
    personalizations: Vec<Personalization<'a>>,
    from: Address<'a>,
    subject: &'a str,
    content: Vec<MailContent<'a>>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct MailContent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

impl SendGridClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// POST /v3/mail/send. SendGrid answers 202 Accepted on success.
    pub async fn send(&self, email: &Email) -> Result<()> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let body = MailSend {
            personalizations: vec![Personalization {
                to: vec![Address { email: &email.to }],
            }],
            from: Address { email: &email.from },
            subject: &email.subject,
            content: vec![
                MailContent {
                    kind: "text/plain",
                    value: &email.text,
                },
                MailContent {
                    kind: "text/html",
                    value: &email.html,
                },
            ],
        };

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        check_status(resp).await?;

        tracing::info!(to = %email.to, "Email accepted by SendGrid");
        Ok(())
    }
}

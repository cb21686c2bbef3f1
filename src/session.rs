// src/session.rs

use lazy_static::lazy_static;
use reqwest::{Client, Response};
use std::time::Duration;

use crate::config::{HTTP_TIMEOUT_SECS, USER_AGENT};

lazy_static! {
    static ref SINGLETON_SESSION: HttpSession = HttpSession::new();
}

/// Shared HTTP session. Both collectors issue every request through the one
/// underlying client.
pub struct HttpSession {
    client: Client,
}

impl HttpSession {
    fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");
        HttpSession { client }
    }

    pub async fn send_request(url: &str) -> Result<Response, reqwest::Error> {
        SINGLETON_SESSION.client.get(url).send().await
    }
}

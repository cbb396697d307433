//! HTTP client for the hosted identity service.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;

use ecoboard_auth::Account;

use crate::events::{AuthEvent, EventSubscription};
use crate::gateway::{IdentityGateway, LiveSession, RemoteError};

/// REST/SSE consumer of the identity service.
///
/// Endpoints:
/// - `GET  /api/users?email=`      row lookup on the users table
/// - `GET  /api/auth/session`      current live session (204 when none)
/// - `POST /api/auth/login`        establish a live session
/// - `POST /api/auth/logout`       end the live session
/// - `GET  /api/auth/events`       server-sent auth events
#[derive(Debug, Clone)]
pub struct HttpIdentityGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpIdentityGateway {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorized(self.http.get(format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.authorized(self.http.post(format!("{}{}", self.base_url, path)))
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }
}

async fn api_error(resp: reqwest::Response) -> RemoteError {
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    RemoteError::Api(status, body)
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>, RemoteError> {
        let resp = self
            .get("/api/users")
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        let mut rows: Vec<Account> = resp
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        match rows.len() {
            0 => Ok(None),
            1 => Ok(rows.pop()),
            n => Err(RemoteError::Decode(format!(
                "expected at most one account for {email}, got {n}"
            ))),
        }
    }

    async fn get_session(&self) -> Result<Option<LiveSession>, RemoteError> {
        let resp = self
            .get("/api/auth/session")
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        // 204: the service is tracking no session; 401: our credentials no
        // longer identify one. Both resolve to "none" rather than an error.
        match resp.status().as_u16() {
            204 | 401 => Ok(None),
            s if (200..300).contains(&s) => {
                let session = resp
                    .json()
                    .await
                    .map_err(|e| RemoteError::Decode(e.to_string()))?;
                Ok(Some(session))
            }
            _ => Err(api_error(resp).await),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LiveSession, RemoteError> {
        let resp = self
            .post("/api/auth/login")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }

        resp.json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    async fn sign_out(&self) -> Result<(), RemoteError> {
        let resp = self
            .post("/api/auth/logout")
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(api_error(resp).await);
        }
        Ok(())
    }

    fn subscribe(&self) -> EventSubscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let gateway = self.clone();
        let pump = tokio::spawn(async move {
            if let Err(err) = pump_event_stream(gateway, tx).await {
                tracing::warn!("auth event stream closed: {err}");
            }
        });
        EventSubscription::with_pump(rx, pump)
    }
}

/// Read the SSE connection and feed parsed events into the subscription
/// channel until either side goes away.
async fn pump_event_stream(
    gateway: HttpIdentityGateway,
    tx: mpsc::UnboundedSender<AuthEvent>,
) -> Result<(), RemoteError> {
    let resp = gateway
        .get("/api/auth/events")
        .send()
        .await
        .map_err(|e| RemoteError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        return Err(api_error(resp).await);
    }

    let stream = resp.bytes_stream();
    tokio::pin!(stream);

    let mut buffer = SseBuffer::default();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| RemoteError::Network(e.to_string()))?;
        for event in buffer.push(&String::from_utf8_lossy(&chunk)) {
            if tx.send(event).is_err() {
                // Subscriber hung up; unsubscribe by ending the pump.
                return Ok(());
            }
        }
    }
    Ok(())
}

/// Minimal SSE framing: events arrive as `data: <json>` lines; comment and
/// field lines we do not use are skipped.
#[derive(Debug, Default)]
struct SseBuffer {
    pending: String,
}

impl SseBuffer {
    fn push(&mut self, chunk: &str) -> Vec<AuthEvent> {
        self.pending.push_str(chunk);

        let mut events = Vec::new();
        while let Some(newline) = self.pending.find('\n') {
            let line: String = self.pending.drain(..=newline).collect();
            if let Some(event) = parse_sse_line(line.trim_end_matches(['\n', '\r'])) {
                events.push(event);
            }
        }
        events
    }
}

fn parse_sse_line(line: &str) -> Option<AuthEvent> {
    let payload = line.strip_prefix("data:")?.trim();
    if payload.is_empty() {
        return None;
    }
    match serde_json::from_str(payload) {
        Ok(event) => Some(event),
        Err(err) => {
            tracing::warn!("discarding unparseable auth event: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AuthEventKind;

    #[test]
    fn data_lines_parse_into_events() {
        let mut buffer = SseBuffer::default();
        let events = buffer.push("data: {\"event\":\"signed_in\"}\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AuthEventKind::SignedIn);
    }

    #[test]
    fn events_split_across_chunks_reassemble() {
        let mut buffer = SseBuffer::default();
        assert!(buffer.push("data: {\"event\":\"token_").is_empty());
        let events = buffer.push("refreshed\"}\n\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AuthEventKind::TokenRefreshed);
    }

    #[test]
    fn comments_and_unknown_fields_are_skipped() {
        let mut buffer = SseBuffer::default();
        let events = buffer.push(": keep-alive\nretry: 3000\ndata: {\"event\":\"signed_out\"}\n");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, AuthEventKind::SignedOut);
    }

    #[test]
    fn malformed_payload_is_dropped_not_fatal() {
        let mut buffer = SseBuffer::default();
        let events = buffer.push("data: {nope\ndata: {\"event\":\"signed_in\"}\n");
        assert_eq!(events.len(), 1);
    }
}

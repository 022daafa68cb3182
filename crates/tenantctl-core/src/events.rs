//! Event log queries and the `--follow` polling loop.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{expect_status, rest_headers, tenant_url, HttpExecutor, Result, TenantSession};

pub const EVENTS_PATH: &str = "/v1.0/events";

#[derive(Debug, Clone)]
pub struct EventQuery {
    pub event_type: Option<String>,
    /// Lower bound on event time, epoch milliseconds.
    pub from: Option<i64>,
    pub size: u32,
}

impl Default for EventQuery {
    fn default() -> Self {
        Self {
            event_type: None,
            from: None,
            size: 100,
        }
    }
}

impl EventQuery {
    fn url(&self, tenant: &str) -> String {
        let mut params = vec![format!("size={}", self.size)];
        if let Some(event_type) = self.event_type.as_deref() {
            params.push(format!("event_type={}", urlencoding::encode(event_type)));
        }
        if let Some(from) = self.from {
            params.push(format!("from={from}"));
            params.push("sort_order=asc".to_string());
        }
        format!("{}?{}", tenant_url(tenant, EVENTS_PATH), params.join("&"))
    }
}

#[derive(Debug, Default, Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    response: EventsBody,
}

#[derive(Debug, Default, Deserialize)]
struct EventsBody {
    #[serde(default)]
    events: EventsPage,
}

#[derive(Debug, Default, Deserialize)]
struct EventsPage {
    #[serde(default)]
    events: Vec<Value>,
}

#[derive(Deserialize)]
struct EventTime {
    time: i64,
}

fn event_time(event: &Value) -> Option<i64> {
    EventTime::deserialize(event).ok().map(|e| e.time)
}

/// Lower bound that skips everything already seen.
fn next_lower_bound(events: &[Value]) -> Option<i64> {
    events
        .iter()
        .filter_map(event_time)
        .max()
        .map(|latest| latest.saturating_add(1))
}

pub async fn fetch_events(
    executor: &HttpExecutor,
    session: &TenantSession,
    query: &EventQuery,
) -> Result<Vec<Value>> {
    let response = executor
        .get(&query.url(&session.tenant), rest_headers(&session.token)?)
        .await?;
    expect_status(&response, 200, "query events")?;
    let envelope: EventsEnvelope = response.json()?;
    Ok(envelope.response.events.events)
}

#[derive(Debug, Clone, Copy)]
pub struct FollowOptions {
    pub interval: Duration,
    /// Stop after this many polls; `None` polls until the process is killed.
    pub max_rounds: Option<usize>,
}

/// Polls for new events and hands each one to `sink`.
///
/// A failed poll is logged and the loop carries on with the same lower bound.
pub async fn follow_events<F>(
    executor: &HttpExecutor,
    session: &TenantSession,
    mut query: EventQuery,
    options: FollowOptions,
    mut sink: F,
) where
    F: FnMut(&Value),
{
    let mut rounds = 0usize;
    loop {
        match fetch_events(executor, session, &query).await {
            Ok(events) => {
                debug!(count = events.len(), from = ?query.from, "events fetched");
                for event in &events {
                    sink(event);
                }
                if let Some(from) = next_lower_bound(&events) {
                    query.from = Some(from);
                }
            }
            Err(err) => warn!(error = %err, "event query failed; retrying"),
        }
        rounds += 1;
        if options.max_rounds.is_some_and(|max| rounds >= max) {
            return;
        }
        tokio::time::sleep(options.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_url_carries_bounds() {
        let query = EventQuery {
            event_type: Some("sso".to_string()),
            from: Some(1000),
            size: 10,
        };
        assert_eq!(
            query.url("t.example.com"),
            "https://t.example.com/v1.0/events?size=10&event_type=sso&from=1000&sort_order=asc"
        );
    }

    #[test]
    fn event_time_reads_numeric_time() {
        assert_eq!(event_time(&json!({"time": 5, "id": "e"})), Some(5));
        assert_eq!(event_time(&json!({"id": "e"})), None);
    }

    #[test]
    fn lower_bound_moves_past_newest_event() {
        let events = vec![json!({"time": 250}), json!({"id": "no-time"}), json!({"time": 100})];
        assert_eq!(next_lower_bound(&events), Some(251));
        assert_eq!(next_lower_bound(&[]), None);
        assert_eq!(next_lower_bound(&[json!({"time": i64::MAX})]), Some(i64::MAX));
    }
}

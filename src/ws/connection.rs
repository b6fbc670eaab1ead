//! WebSocket connection loop.
//!
//! Handles the read/write loop for a single WebSocket connection,
//! dispatching incoming commands and forwarding filtered events.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;

use super::messages::{WsCommand, WsMessage, WsMessageType};
use super::subscription::SubscriptionManager;
use crate::domain::LedgerEvent;
use crate::service::LedgerService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Reads commands from the client and dispatches them.
/// - Forwards matching events from the [`broadcast::Receiver`] to the client.
pub async fn run_connection(
    socket: WebSocket,
    mut event_rx: broadcast::Receiver<LedgerEvent>,
    ledger_service: Arc<LedgerService>,
) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut subs = SubscriptionManager::new();

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let response = handle_text_message(&text, &mut subs, &ledger_service).await;
                        if let Some(resp_json) = response
                            && ws_tx.send(Message::text(resp_json)).await.is_err() {
                                break;
                            }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    _ => {}
                }
            }
            event = event_rx.recv() => {
                match event {
                    Ok(ledger_event) => {
                        if subs.matches(&ledger_event) {
                            let msg = WsMessage::new(
                                uuid::Uuid::new_v4().to_string(),
                                WsMessageType::Event,
                                serde_json::to_value(&ledger_event).unwrap_or_default(),
                            );
                            let json = serde_json::to_string(&msg).unwrap_or_default();
                            if ws_tx.send(Message::text(json)).await.is_err() {
                                break;
                            }
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(lagged = n, "ws client lagged behind event bus");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        }
    }

    tracing::debug!("ws connection closed");
}

/// Handles a text message from the client, returning an optional JSON
/// response.
async fn handle_text_message(
    text: &str,
    subs: &mut SubscriptionManager,
    ledger_service: &LedgerService,
) -> Option<String> {
    let Ok(msg) = serde_json::from_str::<WsMessage>(text) else {
        return serde_json::to_string(&WsMessage::error(String::new(), 400, "malformed JSON")).ok();
    };

    let Ok(command) = serde_json::from_value::<WsCommand>(msg.payload) else {
        return serde_json::to_string(&WsMessage::error(msg.id, 404, "unknown command")).ok();
    };

    let response = match command {
        WsCommand::Subscribe { route_ids } => {
            subs.subscribe(&route_ids);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "subscribed": route_ids,
                    "count": subs.count(),
                    "wildcard": subs.is_subscribed_all(),
                }),
            )
        }
        WsCommand::Unsubscribe { route_ids } => {
            subs.unsubscribe(&route_ids);
            WsMessage::new(
                msg.id,
                WsMessageType::Response,
                serde_json::json!({
                    "unsubscribed": route_ids,
                    "remaining_count": subs.count(),
                }),
            )
        }
        WsCommand::GetReport => match ledger_service.build_route_report().await {
            Ok(report) => {
                let total_bookings = report.total_bookings();
                WsMessage::new(
                    msg.id,
                    WsMessageType::Response,
                    serde_json::json!({
                        "chart": report.chart,
                        "total_bookings": total_bookings,
                    }),
                )
            }
            Err(err) => WsMessage::error(msg.id, err.error_code(), &err.to_string()),
        },
    };
    serde_json::to_string(&response).ok()
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::EventBus;
    use crate::persistence::{LedgerStore, MemoryStore};

    fn service() -> LedgerService {
        LedgerService::new(
            LedgerStore::new(Arc::new(MemoryStore::new())),
            EventBus::new(8),
        )
    }

    fn command(payload: serde_json::Value) -> String {
        serde_json::to_string(&WsMessage::new("c1".to_string(), WsMessageType::Command, payload))
            .unwrap_or_default()
    }

    #[tokio::test]
    async fn malformed_json_yields_error() {
        let mut subs = SubscriptionManager::new();
        let Some(reply) = handle_text_message("{nope", &mut subs, &service()).await else {
            panic!("expected reply");
        };
        assert!(reply.contains("malformed JSON"));
    }

    #[tokio::test]
    async fn subscribe_updates_filter() {
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({"command": "subscribe", "route_ids": ["r1"]}));
        let Some(reply) = handle_text_message(&text, &mut subs, &service()).await else {
            panic!("expected reply");
        };
        assert!(reply.contains("\"count\":1"));
        assert_eq!(subs.count(), 1);
    }

    #[tokio::test]
    async fn get_report_returns_chart() {
        let service = service();
        let _ = service.create_route("A", "", "9am", 2).await;
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({"command": "get_report"}));
        let Some(reply) = handle_text_message(&text, &mut subs, &service).await else {
            panic!("expected reply");
        };
        assert!(reply.contains("\"title\":\"A\""));
    }

    #[tokio::test]
    async fn unknown_command_yields_error() {
        let mut subs = SubscriptionManager::new();
        let text = command(serde_json::json!({"command": "swap"}));
        let Some(reply) = handle_text_message(&text, &mut subs, &service()).await else {
            panic!("expected reply");
        };
        assert!(reply.contains("unknown command"));
    }
}

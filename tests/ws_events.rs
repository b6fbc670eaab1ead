//! WebSocket subscribers receive ledger events for their routes.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use futures_util::{SinkExt, StreamExt};
use route_ledger::api::build_app;
use route_ledger::app_state::AppState;
use route_ledger::persistence::MemoryStore;
use serde_json::{Value, json};
use tokio_tungstenite::tungstenite::Message;

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn next_json(ws: &mut WsStream) -> anyhow::Result<Value> {
    loop {
        let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .context("timed out waiting for ws message")?
            .context("ws stream ended")??;
        if let Message::Text(text) = msg {
            return Ok(serde_json::from_str(text.as_str())?);
        }
    }
}

#[tokio::test]
async fn wildcard_subscriber_sees_booking_events() -> anyhow::Result<()> {
    let state = AppState::new(Arc::new(MemoryStore::new()), false, 64);
    let service = Arc::clone(&state.ledger_service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = build_app(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws")).await?;

    let subscribe = json!({
        "id": "sub-1",
        "type": "command",
        "timestamp": chrono::Utc::now(),
        "payload": {"command": "subscribe", "route_ids": ["*"]},
    });
    ws.send(Message::text(subscribe.to_string())).await?;
    let ack = next_json(&mut ws).await?;
    assert_eq!(ack["type"], "response");
    assert_eq!(ack["payload"]["wildcard"], true);

    let route = service.create_route("Single", "", "9am", 1).await?;
    service
        .book_seat(&route.id, "9am", "Ada", "ada@example.com")
        .await?;

    let mut seen = Vec::new();
    for _ in 0..3 {
        let event = next_json(&mut ws).await?;
        assert_eq!(event["type"], "event");
        seen.push(
            event["payload"]["event_type"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
        );
    }
    assert_eq!(seen, vec!["route_created", "seat_booked", "route_full"]);

    Ok(())
}

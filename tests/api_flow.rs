//! End-to-end booking flow against a live server on an ephemeral port.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use route_ledger::api::build_app;
use route_ledger::app_state::AppState;
use route_ledger::persistence::{FileStore, KeyValueStore, MemoryStore};
use serde_json::{Value, json};

async fn spawn_server(backend: Arc<dyn KeyValueStore>) -> anyhow::Result<SocketAddr> {
    let app = build_app(AppState::new(backend, false, 64));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(addr)
}

async fn create_route(
    client: &reqwest::Client,
    base: &str,
    title: &str,
    seats: i64,
) -> anyhow::Result<String> {
    let res = client
        .post(format!("{base}/api/v1/routes"))
        .json(&json!({"title": title, "desc": "", "times": "9am, 10am", "seats": seats}))
        .send()
        .await?;
    anyhow::ensure!(res.status() == reqwest::StatusCode::CREATED, "create failed");
    let body: Value = res.json().await?;
    body.get("id")
        .and_then(Value::as_str)
        .map(ToString::to_string)
        .context("route id missing")
}

async fn book(
    client: &reqwest::Client,
    base: &str,
    route_id: &str,
    name: &str,
) -> anyhow::Result<reqwest::Response> {
    Ok(client
        .post(format!("{base}/api/v1/bookings"))
        .json(&json!({
            "route_id": route_id,
            "time": "9am",
            "name": name,
            "email": format!("{name}@example.com"),
        }))
        .send()
        .await?)
}

#[tokio::test]
async fn capacity_and_report_flow() -> anyhow::Result<()> {
    let addr = spawn_server(Arc::new(MemoryStore::new())).await?;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let single = create_route(&client, &base, "Single", 1).await?;
    let other = create_route(&client, &base, "Other", 5).await?;

    let first = book(&client, &base, &single, "ada").await?;
    assert_eq!(first.status(), reqwest::StatusCode::CREATED);

    let second = book(&client, &base, &single, "bob").await?;
    assert_eq!(second.status(), reqwest::StatusCode::CONFLICT);
    let err: Value = second.json().await?;
    assert_eq!(err["error"]["code"], 4001);

    let third = book(&client, &base, &other, "cy").await?;
    assert_eq!(third.status(), reqwest::StatusCode::CREATED);

    let report: Value = client
        .get(format!("{base}/api/v1/reports/routes"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        report["chart"],
        json!([{"title": "Single", "count": 1}, {"title": "Other", "count": 1}])
    );
    assert_eq!(report["entries"][0]["route"]["status"], "full");
    assert_eq!(report["entries"][0]["route"]["booked"], 1);

    Ok(())
}

#[tokio::test]
async fn deleted_route_leaves_orphaned_bookings() -> anyhow::Result<()> {
    let addr = spawn_server(Arc::new(MemoryStore::new())).await?;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let route_id = create_route(&client, &base, "Coastal", 3).await?;
    assert!(book(&client, &base, &route_id, "ada").await?.status().is_success());

    for _ in 0..2 {
        let res = client
            .delete(format!("{base}/api/v1/routes/{route_id}"))
            .send()
            .await?;
        assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);
    }

    let report: Value = client
        .get(format!("{base}/api/v1/reports/routes"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(report["entries"], json!([]));

    let bookings: Value = client
        .get(format!("{base}/api/v1/bookings"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(bookings["pagination"]["total"], 1);
    assert_eq!(bookings["data"][0]["route_title"], "Coastal");

    let missing = book(&client, &base, &route_id, "bob").await?;
    assert_eq!(missing.status(), reqwest::StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn feedback_report_lists_submissions_in_order() -> anyhow::Result<()> {
    let addr = spawn_server(Arc::new(MemoryStore::new())).await?;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    for text in ["first", "second"] {
        let res = client
            .post(format!("{base}/api/v1/feedback"))
            .json(&json!({"feedback": text}))
            .send()
            .await?;
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    }
    let blank = client
        .post(format!("{base}/api/v1/feedback"))
        .json(&json!({"name": "Ada", "feedback": "  "}))
        .send()
        .await?;
    assert_eq!(blank.status(), reqwest::StatusCode::BAD_REQUEST);

    let feedback: Value = client
        .get(format!("{base}/api/v1/reports/feedback"))
        .send()
        .await?
        .json()
        .await?;
    let texts: Vec<&str> = feedback
        .as_array()
        .context("feedback array")?
        .iter()
        .filter_map(|f| f.get("feedback").and_then(Value::as_str))
        .collect();
    assert_eq!(texts, vec!["first", "second"]);

    Ok(())
}

#[tokio::test]
async fn file_store_survives_restart() -> anyhow::Result<()> {
    let tmp = tempfile::TempDir::new()?;

    let first_store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(tmp.path()).await?);
    let addr = spawn_server(first_store).await?;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();
    let route_id = create_route(&client, &base, "Persistent", 2).await?;
    assert!(book(&client, &base, &route_id, "ada").await?.status().is_success());

    let second_store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(tmp.path()).await?);
    let addr = spawn_server(second_store).await?;
    let routes: Value = client
        .get(format!("http://{addr}/api/v1/routes"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(routes[0]["id"], route_id.as_str());
    assert_eq!(routes[0]["booked"], 1);
    assert_eq!(routes[0]["seats_left"], 1);

    Ok(())
}

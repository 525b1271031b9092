//! Shared helpers for gateway integration tests.
//!
//! Each test builds an `axum` router emulating the parts of the REST API it
//! needs and points a real [`RestGateway`] at it over loopback TCP.

#![allow(dead_code)]

use std::time::Duration;

use axum::Router;
use projdesk_gateway::RestGateway;
use serde_json::{json, Value};

/// Serve `router` on an ephemeral port and return a gateway aimed at it.
pub async fn serve(router: Router) -> RestGateway {
    serve_with_timeout(router, Duration::from_secs(5)).await
}

pub async fn serve_with_timeout(router: Router, timeout: Duration) -> RestGateway {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    RestGateway::new(format!("http://{addr}"), timeout).expect("build gateway")
}

/// A base URL nothing is listening on.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn project_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "startDate": "2024-01-10T00:00:00.000Z",
        "endDate": "2024-03-01T00:00:00.000Z",
        "status": "Pendiente",
        "createdAt": "2024-01-01T10:00:00.000Z",
        "updatedAt": "2024-01-01T10:00:00.000Z"
    })
}

pub fn module_json(id: i64, project_id: i64, phase_id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Module {id}"),
        "description": "A module",
        "projectId": project_id,
        "phaseId": phase_id,
        "startDate": "2024-01-15",
        "endDate": "2024-02-15",
        "status": "Pendiente",
        "phase": { "id": phase_id, "name": "Diseño", "color": "#00ff00" }
    })
}

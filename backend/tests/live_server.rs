//! Live-server checks over a real socket using the Actix Web client.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use actix_web::dev::ServerHandle;
use actix_web::web;
use awc::Client;
use leaves_api::outbound::persistence::DocumentStore;
use leaves_api::server::{ServerConfig, build_http_state, create_server, drain_on};
use serde_json::{Value, json};

struct Running {
    base: String,
    handle: ServerHandle,
}

fn start() -> Running {
    let state = build_http_state(&DocumentStore::new()).expect("users module registers");
    let config = ServerConfig::new("127.0.0.1", 0).with_shutdown_timeout(1);
    let bound = create_server(web::Data::new(state), &config).expect("bind");
    let addr = bound.addrs.first().copied().expect("bound address");
    let handle = bound.server.handle();
    actix_web::rt::spawn(bound.server);
    Running {
        base: format!("http://{addr}"),
        handle,
    }
}

#[actix_rt::test]
async fn docs_json_describes_the_api() {
    let server = start();
    let client = Client::default();

    let mut response = client
        .get(format!("{}/docs-json", server.base))
        .send()
        .await
        .expect("request succeeds");
    assert!(response.status().is_success());
    let doc: Value = response.json().limit(1 << 20).await.expect("json document");
    assert_eq!(doc.pointer("/info/title"), Some(&json!("Leaves Tracker")));
    assert!(doc.pointer("/paths/~1api~1v1~1users").is_some());

    drain_on(std::future::ready(()), server.handle).await;
}

#[actix_rt::test]
async fn drained_server_refuses_new_connections() {
    let server = start();

    let before = Client::default()
        .get(format!("{}/api/v1/users", server.base))
        .send()
        .await
        .expect("request succeeds");
    assert_eq!(before.status().as_u16(), 200);

    drain_on(std::future::ready(()), server.handle).await;

    let after = Client::default()
        .get(format!("{}/api/v1/users", server.base))
        .send()
        .await;
    assert!(after.is_err(), "listener should be closed after draining");
}

#[actix_rt::test]
async fn created_users_are_listed() {
    let server = start();
    let client = Client::default();

    let created = client
        .post(format!("{}/api/v1/users", server.base))
        .send_json(&json!({ "displayName": "Grace Hopper" }))
        .await
        .expect("request succeeds");
    assert_eq!(created.status().as_u16(), 201);

    let mut listed = client
        .get(format!("{}/api/v1/users", server.base))
        .send()
        .await
        .expect("request succeeds");
    let users: Value = listed.json().await.expect("json body");
    assert_eq!(users.pointer("/0/displayName"), Some(&json!("Grace Hopper")));

    drain_on(std::future::ready(()), server.handle).await;
}

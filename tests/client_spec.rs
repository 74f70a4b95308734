use gift_registry::api::create_router;
use gift_registry::client::{ClientError, RegistryClient};
use gift_registry::models::*;
use gift_registry::registry::Registry;
use gift_registry::store::{GiftStore, PersonStore};
use tempfile::TempDir;
use tokio_test::assert_ok;

/// Start a real server on an ephemeral port and return a client for it.
async fn spawn_server() -> (RegistryClient, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let gifts = GiftStore::new(dir.path().join("presentes.json"));
    gifts
        .save(&[
            Gift::new("g1", "Aspirador de pó", GiftCategory::Household),
            Gift::new("g2", "Cesto de roupa", GiftCategory::Laundry),
        ])
        .expect("Failed to seed gifts");
    let registry = Registry::new(gifts, PersonStore::new(dir.path().join("pessoas.json")));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("No local address");
    tokio::spawn(async move {
        axum::serve(listener, create_router(registry))
            .await
            .expect("Server failed");
    });

    (RegistryClient::new(format!("http://{}/", addr)), dir)
}

#[tokio::test]
async fn health_reports_ok() {
    let (client, _dir) = spawn_server().await;

    let health = assert_ok!(client.health().await);
    assert_eq!(health.status, "OK");
}

#[tokio::test]
async fn reserve_and_cancel_round_trip() {
    let (client, _dir) = spawn_server().await;

    let reserved = assert_ok!(client.reserve("g2", "Beatriz").await);
    assert!(reserved.success);
    assert_eq!(
        reserved.presente.and_then(|g| g.reservado_por).as_deref(),
        Some("Beatriz")
    );

    let people = assert_ok!(client.list_people().await);
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].presente_nome, "Cesto de roupa");

    let summary = assert_ok!(client.summary("Beatriz").await);
    assert_eq!(summary.reservados, 1);

    let cancelled = assert_ok!(client.cancel("g2", "Beatriz").await);
    assert!(cancelled.success);

    let gifts = assert_ok!(client.list_gifts().await);
    assert!(gifts.iter().all(|g| !g.reservado));
}

#[tokio::test]
async fn second_reservation_is_a_rejection_not_an_error() {
    let (client, _dir) = spawn_server().await;
    assert_ok!(client.reserve("g1", "Beatriz").await);

    let response = assert_ok!(client.reserve("g1", "Caio").await);

    assert!(!response.success);
    assert_eq!(response.message, "Este presente já foi reservado");
}

#[tokio::test]
async fn surfaces_envelope_messages_in_errors() {
    let (client, _dir) = spawn_server().await;

    match client.reserve("g404", "Beatriz").await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Presente não encontrado"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    match client.cancel("g1", "B").await {
        Err(ClientError::BadRequest(message)) => assert_eq!(message, "Nome inválido"),
        other => panic!("expected BadRequest, got {:?}", other),
    }
}

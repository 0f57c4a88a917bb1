use api_types::{
    Category, Currency,
    expense::{ExpenseNew, ExpenseUpdate},
};
use chrono::{TimeZone, Utc};
use sea_orm::Database;

use holiday_cli::{
    cache::CachedClient,
    client::{Client, ClientError},
};
use migration::MigratorTrait;

const PIN: &str = "1122";

/// Start a server on a random port with one child, returning its base URL.
async fn serve() -> (String, i32) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = engine::Engine::builder().database(db).build().await.unwrap();
    let child = engine.create_child("Emma").await.unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = server::spawn_with_listener(engine, server::ServerConfig::default(), listener)
        .unwrap();
    (format!("http://{addr}/"), child.id)
}

fn ice_cream(child_id: i32) -> ExpenseNew {
    ExpenseNew {
        child_id,
        amount: 50.0,
        description: "Ice cream".to_string(),
        date: Utc
            .with_ymd_and_hms(2024, 7, 1, 16, 0, 0)
            .unwrap()
            .fixed_offset(),
        category: Some(Category::Cash),
        currency: Some(Currency::Mad),
    }
}

#[tokio::test]
async fn wrong_pin_is_unauthorized() {
    let (base_url, _) = serve().await;
    let client = Client::new(&base_url).unwrap();

    let err = client.verify_pin("0000").await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized), "{err:?}");
    assert!(client.verify_pin(PIN).await.is_ok());
}

#[tokio::test]
async fn unknown_child_is_not_found() {
    let (base_url, _) = serve().await;
    let client = Client::new(&base_url).unwrap();

    match client.total(999).await {
        Err(ClientError::NotFound(message)) => assert_eq!(message, "Child not found"),
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn mutations_refresh_cached_reads() {
    let (base_url, child_id) = serve().await;
    let api = CachedClient::new(Client::new(&base_url).unwrap());
    let session = api.client().verify_pin(PIN).await.unwrap();

    assert_eq!(api.total(child_id).await.unwrap().total_amount, 0.0);
    assert!(api.expenses(child_id).await.unwrap().is_empty());

    let created = api
        .create_expense(&session, &ice_cream(child_id))
        .await
        .unwrap();
    assert_eq!(created.currency, Currency::Mad);

    let totals = api.total(child_id).await.unwrap();
    assert_eq!(totals.total_amount, 50.0);
    assert!((totals.grand_total_gbp - 4.0).abs() < 1e-9);
    assert_eq!(api.expenses(child_id).await.unwrap().len(), 1);

    let update = ExpenseUpdate {
        currency: Some(Currency::Gbp),
        ..Default::default()
    };
    let updated = api
        .update_expense(&session, created.id, &update)
        .await
        .unwrap();
    assert_eq!(updated.description, "Ice cream");
    assert!((api.total(child_id).await.unwrap().grand_total_gbp - 50.0).abs() < 1e-9);

    let deleted = api.delete_expense(&session, created.id).await.unwrap();
    assert_eq!(deleted.status, "success");
    assert!(api.expenses(child_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_amount_is_a_validation_error() {
    let (base_url, child_id) = serve().await;
    let client = Client::new(&base_url).unwrap();
    let session = client.verify_pin(PIN).await.unwrap();

    let payload = ExpenseNew {
        amount: 0.0,
        ..ice_cream(child_id)
    };
    let err = client.create_expense(&session, &payload).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new(&format!("http://{addr}/")).unwrap();
    let err = client.children().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
}

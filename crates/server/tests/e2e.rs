use std::net::SocketAddr;
use std::sync::Arc;

use migration::MigratorTrait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use service::provider::{ProviderRepository, SeaOrmProviderRepository};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes::{self, AppState};

struct TestApp {
    base_url: String,
    client: reqwest::Client,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn db_tests_enabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_err() && std::env::var("DATABASE_URL").is_ok()
}

async fn start_server() -> anyhow::Result<TestApp> {
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }

    let repo: Arc<dyn ProviderRepository> = Arc::new(SeaOrmProviderRepository::new(db));
    let origins = configs::ServerConfig::default().cors_origins;
    let app = routes::build_router(AppState::new(repo), routes::build_cors(&origins));

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url: format!("http://{}", addr), client: reqwest::Client::new() })
}

fn unique_email() -> String {
    format!("e2e_{}@example.com", Uuid::new_v4().simple())
}

#[tokio::test]
async fn provider_lifecycle_against_postgres() -> anyhow::Result<()> {
    if !db_tests_enabled() {
        eprintln!("DATABASE_URL missing or SKIP_DB_TESTS set; skipping e2e test");
        return Ok(());
    }
    let app = start_server().await?;

    let res = app.client.get(app.url("/api/hello")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?["message"], "Backend connected successfully!");

    let email = unique_email();
    let body = json!({ "name": "E2E", "email": email, "phone": "555", "serviceType": "plumbing" });
    let res = app.client.post(app.url("/api/providers/")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["status"], "active");
    let id = created["id"].as_str().unwrap_or_default().to_string();
    let item = app.url(&format!("/api/providers/{id}"));

    let res = app.client.post(app.url("/api/providers/")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: Vec<Value> = app.client.get(app.url("/api/providers")).send().await?.json().await?;
    assert!(list.iter().any(|p| p["id"] == created["id"]));

    let fetched: Value = app.client.get(&item).send().await?.json().await?;
    assert_eq!(fetched, created);

    let res = app.client.put(&item).json(&json!({ "status": "inactive" })).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["status"], "inactive");
    assert_eq!(updated["email"], created["email"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_ne!(updated["updatedAt"], created["updatedAt"]);

    let res = app.client.delete(&item).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = app.client.get(&item).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["message"], "Provider not found");

    let res = app.client.delete(&item).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

static SERVER: OnceLock<TestServer> = OnceLock::new();
static EMAIL_SEQ: AtomicU32 = AtomicU32::new(0);

/// Shared signing secret for the spawned server; tests mint tokens through
/// POST /jwt so they never need the secret directly.
const TEST_JWT_SECRET: &str = "launchpad-test-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_launchpad-api"));
        cmd.env("LAUNCHPAD_API_PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("JWT_SECRET", TEST_JWT_SECRET)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

/// Spawn (once) and return the shared test server, or None when no test
/// database is configured. Server-backed suites skip cleanly in that case.
pub async fn ensure_server() -> Result<Option<&'static TestServer>> {
    let database_url = match std::env::var("LAUNCHPAD_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("LAUNCHPAD_TEST_DATABASE_URL not set; skipping server-backed test");
            return Ok(None);
        }
    };

    let server = SERVER
        .get_or_init(|| TestServer::spawn(&database_url).expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

/// Direct pool into the test database, for seeding roles the API can only
/// grant to callers that already hold them.
pub async fn test_db() -> Result<sqlx::PgPool> {
    let database_url =
        std::env::var("LAUNCHPAD_TEST_DATABASE_URL").context("LAUNCHPAD_TEST_DATABASE_URL")?;
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&database_url)
        .await
        .context("connect test database")
}

/// Unique email per call so reruns against a persistent database stay green
pub fn unique_email(tag: &str) -> String {
    let seq = EMAIL_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}-{}@test.launchpad", tag, std::process::id(), seq)
}

/// Mint a token for `email` through the public /jwt endpoint
pub async fn token_for(server: &TestServer, email: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/jwt", server.base_url))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "token issuance failed: {}", res.status());
    let body = res.json::<serde_json::Value>().await?;
    body["token"]
        .as_str()
        .map(str::to_string)
        .context("token field missing")
}

/// Register `email` and stamp the given role directly in the database
pub async fn seed_user_with_role(server: &TestServer, email: &str, role: &str) -> Result<()> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&serde_json::json!({ "email": email }))
        .send()
        .await?;
    anyhow::ensure!(res.status().is_success(), "user creation failed: {}", res.status());

    let pool = test_db().await?;
    sqlx::query("UPDATE users SET role = $2 WHERE email = $1")
        .bind(email)
        .bind(role)
        .execute(&pool)
        .await?;
    Ok(())
}

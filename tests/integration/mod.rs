//! Integration tests for the status service and its diagnostics.
//!
//! Every test binds real listeners on loopback. The `/auth/login` route used
//! here is a test double; the service itself does not serve it.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use axum::{http::StatusCode, routing::post, Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use status_api::api::{create_router, HealthResponse, RootResponse};
use status_api::login::types::{ADMIN_CREDENTIALS, USER_CREDENTIALS};
use status_api::login::{LoginOutcome, LoginRequest, LoginSmokeTest};
use status_api::probe::{NetworkProbe, ProbeOutcome, Reachability};

/// Stub login: accepts only the admin credentials.
async fn stub_login(Json(req): Json<LoginRequest>) -> (StatusCode, Json<Value>) {
    if req.email == ADMIN_CREDENTIALS.email && req.password == ADMIN_CREDENTIALS.password {
        (
            StatusCode::OK,
            Json(json!({
                "usuario": { "nombre": "Administrador", "email": req.email, "rol": "admin" },
                "token": "test-token"
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Credenciales inválidas" })),
        )
    }
}

/// Spawn `app` on an ephemeral loopback port.
async fn spawn(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_with_login() -> SocketAddr {
    spawn(create_router().route("/auth/login", post(stub_login))).await
}

/// A loopback port with nothing listening on it.
fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[tokio::test]
async fn root_and_health_over_http() {
    let addr = spawn(create_router()).await;
    let http = reqwest::Client::new();

    let root = http.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(root.status(), 200);
    let body: RootResponse = root.json().await.unwrap();
    assert_eq!(body.status, "OK");
    assert_eq!(body.message, "API funcionando correctamente");
    assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());

    let health = http
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    let body: HealthResponse = health.json().await.unwrap();
    assert_eq!(body.status, "OK");
}

#[tokio::test]
async fn serve_on_answers_health() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(status_api::api::server::serve_on(listener));

    let resp = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(resp.status(), 200);

    server.abort();
}

#[tokio::test]
async fn probe_reports_successful_login() {
    let addr = spawn_with_login().await;
    let probe = NetworkProbe::new(addr.port(), Duration::from_secs(5)).unwrap();

    let reports = probe.run(&[Ipv4Addr::LOCALHOST]).await;

    assert_eq!(reports.len(), 1);
    let report = &reports[0];
    assert_eq!(report.reachability, Reachability::Reachable { status: 200 });
    assert_eq!(report.outcome(), ProbeOutcome::LoginSucceeded);

    let session = report.login.as_ref().unwrap().session().unwrap();
    assert_eq!(session.usuario.rol, "admin");
    assert_eq!(session.token, "test-token");
}

#[tokio::test]
async fn probe_reports_missing_login_route_as_failure() {
    let addr = spawn(create_router()).await;
    let probe = NetworkProbe::new(addr.port(), Duration::from_secs(5)).unwrap();

    let report = probe.probe_address(Ipv4Addr::LOCALHOST).await.unwrap();

    assert!(report.is_reachable());
    assert_eq!(report.outcome(), ProbeOutcome::LoginFailed);
    assert!(matches!(
        report.login,
        Some(LoginOutcome::Rejected { status: 404, .. })
    ));
}

#[tokio::test]
async fn probe_rejected_credentials() {
    let addr = spawn_with_login().await;
    let probe = NetworkProbe::new(addr.port(), Duration::from_secs(5))
        .unwrap()
        .with_credentials(USER_CREDENTIALS);

    let report = probe.probe_address(Ipv4Addr::LOCALHOST).await.unwrap();

    assert_eq!(
        report.login,
        Some(LoginOutcome::Rejected {
            status: 401,
            message: "Credenciales inválidas".to_string(),
        })
    );
}

#[tokio::test]
async fn probe_continues_past_unreachable_addresses() {
    let addr = spawn_with_login().await;
    let probe = NetworkProbe::new(addr.port(), Duration::from_millis(500)).unwrap();

    // TEST-NET-1 first: never routed, must not stop the run.
    let reports = probe
        .run(&[Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::LOCALHOST])
        .await;

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].outcome(), ProbeOutcome::Unreachable);
    assert_eq!(reports[1].outcome(), ProbeOutcome::LoginSucceeded);
}

#[tokio::test]
async fn probe_refused_port_is_unreachable() {
    let probe = NetworkProbe::new(closed_port(), Duration::from_secs(2)).unwrap();

    let report = probe.probe_address(Ipv4Addr::LOCALHOST).await.unwrap();

    assert!(matches!(
        report.reachability,
        Reachability::Unreachable { .. }
    ));
    assert!(report.login.is_none());
}

#[tokio::test]
async fn smoke_test_reports_each_credential_pair() {
    let addr = spawn_with_login().await;
    let runner = LoginSmokeTest::new(&format!("http://{}/auth/login", addr)).unwrap();

    let attempts = runner.run_default().await;

    assert_eq!(attempts.len(), 2);
    assert_eq!(attempts[0].credentials, ADMIN_CREDENTIALS);
    assert!(attempts[0].outcome.is_success());
    match &attempts[0].outcome {
        LoginOutcome::Success { payload, .. } => {
            assert_eq!(payload["usuario"]["nombre"], "Administrador");
        }
        other => panic!("unexpected outcome: {:?}", other),
    }

    assert_eq!(attempts[1].credentials, USER_CREDENTIALS);
    assert_eq!(
        attempts[1].outcome,
        LoginOutcome::Rejected {
            status: 401,
            message: "Credenciales inválidas".to_string(),
        }
    );
}

#[tokio::test]
async fn smoke_test_against_closed_port_reports_errors() {
    let runner =
        LoginSmokeTest::new(&format!("http://127.0.0.1:{}/auth/login", closed_port())).unwrap();

    let attempts = runner.run_default().await;

    assert_eq!(attempts.len(), 2);
    for attempt in attempts {
        assert!(matches!(attempt.outcome, LoginOutcome::Failed { .. }));
    }
}

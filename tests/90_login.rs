mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

/// Field validation runs before any credential check or store access, so
/// missing fields are 400 even with the store down.
#[tokio::test]
async fn admin_login_requires_both_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for payload in [
        json!({}),
        json!({ "email": "admin@example.com" }),
        json!({ "password": "secret" }),
        json!({ "email": "", "password": "secret" }),
    ] {
        let res = client
            .post(format!("{}/admin/login", server.base_url))
            .json(&payload)
            .send()
            .await?;
        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "expected 400 for payload {}",
            payload
        );

        let body = res.json::<serde_json::Value>().await?;
        assert_eq!(body["error"], "Email and password required");
    }
    Ok(())
}

#[tokio::test]
async fn user_register_and_login_require_both_fields() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    for path in ["/auth/register", "/auth/login"] {
        let res = client
            .post(format!("{}{}", server.base_url, path))
            .json(&json!({ "email": "someone@example.com" }))
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "expected 400 for {}", path);
    }
    Ok(())
}

/// Logout is a stateless acknowledgement; no token or store involved.
#[tokio::test]
async fn logout_acknowledges() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/auth/logout", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("message").is_some());
    Ok(())
}

/// With credentials present, login proceeds to the store; a reachable store
/// answers 401 for an unknown account, an unreachable one 503. Either way the
/// caller sees the structured error shape.
#[tokio::test]
async fn login_with_unknown_account_fails_closed() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/admin/login", server.base_url))
        .json(&json!({ "email": "nobody@example.com", "password": "wrong" }))
        .send()
        .await?;
    assert!(
        res.status() == StatusCode::UNAUTHORIZED
            || res.status() == StatusCode::SERVICE_UNAVAILABLE,
        "unexpected status: {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    assert!(body.get("error").is_some(), "failure body should carry 'error': {}", body);
    Ok(())
}

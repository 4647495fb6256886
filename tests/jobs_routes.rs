mod common;

use anyhow::Result;
use axum::http::{Method, StatusCode};
use serde_json::json;

// Requests here are all answered before the store is touched, so they run
// against a pool that never connects.

#[tokio::test]
async fn anonymous_writes_are_unauthorized() -> Result<()> {
    let cases = [
        (Method::POST, "/jobs", Some(json!({"title": "x", "companyHandle": "c1"}))),
        (Method::PATCH, "/jobs/1", Some(json!({"title": "x"}))),
        (Method::DELETE, "/jobs/1", None),
    ];

    for (method, uri, body) in cases {
        let app = common::router(common::lazy_pool());
        let (status, payload) = common::send(app, method.clone(), uri, None, body).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}: {}", method, uri, payload);
        assert_eq!(payload["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn non_admin_writes_are_unauthorized() -> Result<()> {
    let token = common::user_token();
    let cases = [
        (Method::POST, "/jobs", Some(json!({"title": "x", "companyHandle": "c1"}))),
        (Method::PATCH, "/jobs/1", Some(json!({"title": "x"}))),
        (Method::DELETE, "/jobs/1", None),
    ];

    for (method, uri, body) in cases {
        let app = common::router(common::lazy_pool());
        let (status, payload) = common::send(app, method.clone(), uri, Some(&token), body).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} {}: {}", method, uri, payload);
        assert_eq!(payload["message"], "Admin access required");
    }
    Ok(())
}

#[tokio::test]
async fn gate_runs_before_validation() -> Result<()> {
    // Invalid body and unknown id, but the caller is not an admin
    let app = common::router(common::lazy_pool());
    let (status, _) =
        common::send(app, Method::PATCH, "/jobs/nope", None, Some(json!({"bogus": true}))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn forged_token_is_treated_as_anonymous() -> Result<()> {
    let forged = jobly_api::auth::encode_jwt(
        &jobly_api::auth::Claims::new("admin", true),
        "not-the-server-secret",
    )?;
    let app = common::router(common::lazy_pool());
    let (status, payload) = common::send(app, Method::DELETE, "/jobs/1", Some(&forged), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(payload["message"], "Authentication required");
    Ok(())
}

#[tokio::test]
async fn unknown_filter_is_bad_request() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let (status, payload) = common::send(app, Method::GET, "/jobs?titlasd=invalid", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(payload["field_errors"]["titlasd"].is_string(), "{}", payload);
    Ok(())
}

#[tokio::test]
async fn malformed_filter_values_are_bad_request() -> Result<()> {
    for uri in ["/jobs?minSalary=lots", "/jobs?minSalary=-5", "/jobs?hasEquity=yes"] {
        let app = common::router(common::lazy_pool());
        let (status, _) = common::send(app, Method::GET, uri, None, None).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
    }
    Ok(())
}

#[tokio::test]
async fn admin_invalid_bodies_are_bad_request() -> Result<()> {
    let token = common::admin_token();
    let cases = [
        (Method::POST, "/jobs", json!({"title": "x"})),
        (Method::POST, "/jobs", json!({"title": "x", "salary": "lots", "companyHandle": "c1"})),
        (Method::POST, "/jobs", json!({"title": "x", "equity": 1.5, "companyHandle": "c1"})),
        (Method::PATCH, "/jobs/1", json!({"companyHandle": "other"})),
        (Method::PATCH, "/jobs/1", json!({"id": 99})),
        (Method::PATCH, "/jobs/1", json!({"salary": "lots"})),
    ];

    for (method, uri, body) in cases {
        let app = common::router(common::lazy_pool());
        let (status, payload) =
            common::send(app, method.clone(), uri, Some(&token), Some(body.clone())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {} {}: {}", method, uri, body, payload);
    }
    Ok(())
}

#[tokio::test]
async fn empty_patch_is_bad_request_without_store_access() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let token = common::admin_token();
    let (status, payload) =
        common::send(app, Method::PATCH, "/jobs/0", Some(&token), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "No data");
    Ok(())
}

#[tokio::test]
async fn non_numeric_id_is_not_found() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let (status, payload) = common::send(app, Method::GET, "/jobs/abc", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(payload["message"], "No job: abc");
    Ok(())
}

#[tokio::test]
async fn root_describes_service() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let (status, payload) = common::send(app, Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["name"], "Jobly API");
    Ok(())
}

#[tokio::test]
async fn nul_in_title_filter_is_bad_request() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let (status, payload) = common::send(app, Method::GET, "/jobs?title=a%00b", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
    assert!(payload["field_errors"]["title"].is_string(), "{}", payload);
    Ok(())
}

#[tokio::test]
async fn nul_in_body_title_is_bad_request() -> Result<()> {
    let token = common::admin_token();
    let cases = [
        (Method::POST, "/jobs", json!({"title": "a\0b", "companyHandle": "c1"})),
        (Method::PATCH, "/jobs/1", json!({"title": "a\0b"})),
    ];

    for (method, uri, body) in cases {
        let app = common::router(common::lazy_pool());
        let (status, payload) = common::send(app, method.clone(), uri, Some(&token), Some(body)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}: {}", method, uri, payload);
        assert!(payload["field_errors"]["title"].is_string(), "{}", payload);
    }
    Ok(())
}

#[tokio::test]
async fn repeated_filter_key_is_bad_request() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let (status, payload) =
        common::send(app, Method::GET, "/jobs?minSalary=1&minSalary=lots", None, None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["field_errors"]["minSalary"], "minSalary given more than once");
    Ok(())
}

#[tokio::test]
async fn over_precise_equity_is_bad_request() -> Result<()> {
    let app = common::router(common::lazy_pool());
    let token = common::admin_token();
    let body = json!({
        "title": "x",
        "equity": "0.10000000000000000000000000000000001",
        "companyHandle": "c1"
    });
    let (status, _) = common::send(app, Method::POST, "/jobs", Some(&token), Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn admin_token_without_expiry_passes_gate() -> Result<()> {
    let secret = common::settings().security.jwt_secret.clone();
    let token = jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &json!({"username": "admin", "isAdmin": true}),
        &jsonwebtoken::EncodingKey::from_secret(secret.as_bytes()),
    )?;

    // Empty patch fails after the gate, before the store
    let app = common::router(common::lazy_pool());
    let (status, payload) =
        common::send(app, Method::PATCH, "/jobs/1", Some(&token), Some(json!({}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{}", payload);
    assert_eq!(payload["message"], "No data");
    Ok(())
}

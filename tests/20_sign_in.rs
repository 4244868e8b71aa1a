mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{client, location, FakeIdentity, TestServer, CODE, EMAIL};

const CONFIRM: &str = "/confirm-sign-in-with-email-code?email=ada%40example.com";

#[tokio::test]
async fn email_code_sign_in_round_trip() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;
    let client = client()?;

    let res = client.get(server.url("/sign-in")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["fields"], json!(["email"]));

    let res = client
        .post(server.url("/sign-in"))
        .json(&json!({ "email": EMAIL }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some(CONFIRM));

    let res = client.get(server.url(CONFIRM)).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["email"], EMAIL);

    let res = client
        .post(server.url("/confirm-sign-in-with-email-code"))
        .json(&json!({ "email": EMAIL, "code": "000000" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.json::<Value>().await?["code"], "UNAUTHORIZED");

    let res = client
        .post(server.url("/confirm-sign-in-with-email-code"))
        .json(&json!({ "email": EMAIL, "code": CODE }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/dashboard"));

    let res = client.get(server.url("/dashboard")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn confirmation_link_refused_without_passing_sign_in() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;

    // fresh process: the previous location is `/`
    let res = client()?.get(server.url(CONFIRM)).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(server.state.guard.current().path, "/");
    Ok(())
}

#[tokio::test]
async fn confirmation_needs_an_email() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;
    let client = client()?;

    client.get(server.url("/sign-in")).send().await?;

    for path in ["/confirm-sign-in-with-email-code", "/confirm-sign-in-with-email-code?email="] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::NO_CONTENT, "{}", path);
    }
    assert_eq!(server.state.guard.current().path, "/sign-in");
    Ok(())
}

#[tokio::test]
async fn blank_email_is_rejected() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;

    let res = client()?
        .post(server.url("/sign-in"))
        .json(&json!({ "email": "   " }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn sign_out_returns_to_sign_in_and_clears_stores_on_next_navigation() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_in()).await?;
    let client = client()?;

    client.get(server.url("/dashboard")).send().await?;
    assert!(server.state.sessions.is_set());

    let res = client.post(server.url("/sign-out")).send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/sign-in"));

    let res = client.get(server.url("/sign-in")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(!server.state.sessions.is_set());
    assert!(!server.state.attributes.is_set());

    let res = client.get(server.url("/dashboard")).send().await?;
    assert_eq!(location(&res).as_deref(), Some("/sign-in"));
    Ok(())
}

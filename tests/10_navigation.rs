mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::Value;
use std::sync::atomic::Ordering;

use common::{client, location, FakeIdentity, TestServer};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;

    let res = client()?.get(server.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["status"], "ok");

    // liveness is not a navigation
    assert_eq!(server.identity.session_calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test]
async fn signed_out_private_pages_redirect_to_sign_in() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;
    let client = client()?;

    for path in ["/", "/dashboard", "/person-metadata", "/model/log", "/unknown-type"] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&res).as_deref(), Some("/sign-in"), "{}", path);
    }

    assert!(!server.state.sessions.is_set());
    assert!(!server.state.attributes.is_set());
    Ok(())
}

#[tokio::test]
async fn signed_in_root_and_public_pages_redirect_to_dashboard() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_in()).await?;
    let client = client()?;

    for path in ["/", "/sign-in", "/confirm-sign-in-with-email-code?email=ada%40example.com"] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&res).as_deref(), Some("/dashboard"), "{}", path);
    }

    // the refresh on the way populated both stores
    assert_eq!(server.state.sessions.get().unwrap().subject, common::SUBJECT);
    assert_eq!(server.state.attributes.get().unwrap().get("given_name"), Some("Ada"));
    Ok(())
}

#[tokio::test]
async fn dashboard_lists_user_and_model_types() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_in()).await?;

    let res = client()?.get(server.url("/dashboard")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], common::EMAIL);

    let hrefs: Vec<&str> = body["data"]["models"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["href"].as_str())
        .collect();
    assert_eq!(hrefs, vec!["/model/log", "/model/person-metadata"]);
    Ok(())
}

#[tokio::test]
async fn registered_model_page_renders_its_columns() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_in()).await?;
    let client = client()?;

    for path in ["/person-metadata", "/model/person-metadata"] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::OK, "{}", path);

        let body = res.json::<Value>().await?;
        let ids: Vec<&str> = body["data"]["columns"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|c| c["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["select", "givenName", "familyName", "updatedAt"]);
        assert_eq!(body["data"]["model"]["title"], "Person Metadata");
    }
    Ok(())
}

#[tokio::test]
async fn unknown_model_type_is_refused_in_place() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_in()).await?;
    let client = client()?;

    let res = client.get(server.url("/dashboard")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    for path in ["/unknown-type", "/model/unknown-type", "/model/unknown-type/p-1/r-1"] {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::NO_CONTENT, "{}", path);
        assert!(location(&res).is_none());
    }

    assert_eq!(server.state.guard.current().path, "/dashboard");
    Ok(())
}

#[tokio::test]
async fn attribute_failure_counts_as_signed_out() -> Result<()> {
    let identity = FakeIdentity::signed_in();
    identity.fail_attributes();
    let server = TestServer::start(identity).await?;

    let res = client()?.get(server.url("/dashboard")).send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/sign-in"));

    assert!(!server.state.sessions.is_set());
    assert!(!server.state.attributes.is_set());
    Ok(())
}

#[tokio::test]
async fn unmatched_paths_are_still_guarded() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_out()).await?;
    let client = client()?;

    let paths = ["/a/b", "/model/log/only-partition", "/reports/2024/q1"];
    for path in paths {
        let res = client.get(server.url(path)).send().await?;
        assert_eq!(res.status(), StatusCode::SEE_OTHER, "{}", path);
        assert_eq!(location(&res).as_deref(), Some("/sign-in"), "{}", path);
    }
    assert_eq!(server.identity.session_calls.load(Ordering::SeqCst), paths.len());

    // signed in, the guard lets it through and nothing answers
    server.identity.set_signed_in(true);
    let res = client.get(server.url("/a/b")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(res.json::<Value>().await?["code"], "NOT_FOUND");
    Ok(())
}

#[tokio::test]
async fn head_requests_refresh_the_session_like_get() -> Result<()> {
    let server = TestServer::start(FakeIdentity::signed_in()).await?;
    let client = client()?;

    let res = client.head(server.url("/dashboard")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(server.state.sessions.is_set());

    server.identity.set_signed_in(false);
    let res = client.head(server.url("/dashboard")).send().await?;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res).as_deref(), Some("/sign-in"));
    assert!(!server.state.sessions.is_set());
    assert!(!server.state.attributes.is_set());
    Ok(())
}

use mockito::{Matcher, Server};
use serde_json::json;
use tenantctl_core::{
    resolve_id, AccessPolicy, ApiClient, Error, ErrorKind, HttpExecutor, ResolutionError,
    TenantSession, User,
};

fn session(tenant: String) -> TenantSession {
    TenantSession {
        tenant,
        token: "tok".to_string(),
        is_user: false,
    }
}

#[tokio::test]
async fn scim_lookup_returns_first_match() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/v2.0/Users")
        .match_query(Matcher::UrlEncoded(
            "filter".into(),
            r#"userName eq "alice""#.into(),
        ))
        .match_header("authorization", "Bearer tok")
        .match_header("accept", "application/scim+json")
        .with_status(200)
        .with_body(
            json!({
                "totalResults": 2,
                "Resources": [
                    {"id": "u-1", "userName": "alice"},
                    {"id": "u-2", "userName": "alice"}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let id = resolve_id::<User>(&executor, &session(server.url()), "alice")
        .await
        .expect("id");
    assert_eq!(id, "u-1");
    mock.assert_async().await;
}

#[tokio::test]
async fn empty_collection_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v2.0/Users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"Resources":[]}"#)
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let err = resolve_id::<User>(&executor, &session(server.url()), "alice")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Resolution);
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::NotFound { kind: "user", .. })
    ));
}

#[tokio::test]
async fn non_success_status_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v1.0/apiclients")
        .match_query(Matcher::UrlEncoded(
            "search".into(),
            r#"clientName = "ci-bot""#.into(),
        ))
        .with_status(500)
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let err = resolve_id::<ApiClient>(&executor, &session(server.url()), "ci-bot")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::NotFound { .. })
    ));
}

#[tokio::test]
async fn numeric_ids_and_shape_mismatches() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/v5.0/policyvault/accesspolicy")
        .match_query(Matcher::UrlEncoded("search".into(), r#"name = "mfa""#.into()))
        .with_status(200)
        .with_body(r#"{"policies":[{"id":12,"name":"mfa"}]}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/v5.0/policyvault/accesspolicy")
        .match_query(Matcher::UrlEncoded("search".into(), r#"name = "odd""#.into()))
        .with_status(200)
        .with_body(r#"{"policies":[{"id":"twelve","name":"odd"}]}"#)
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let tenant = session(server.url());
    let id = resolve_id::<AccessPolicy>(&executor, &tenant, "mfa")
        .await
        .expect("id");
    assert_eq!(id, 12);

    let err = resolve_id::<AccessPolicy>(&executor, &tenant, "odd")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Resolution(ResolutionError::InvalidFormat { .. })
    ));
}

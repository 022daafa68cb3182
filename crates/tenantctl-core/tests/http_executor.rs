use mockito::{Matcher, Server};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use tenantctl_core::{
    rest_headers, Error, ErrorKind, HttpExecutor, MultipartBody, MultipartFile,
};

#[tokio::test]
async fn redirect_is_a_transport_error() {
    let mut server = Server::new_async().await;
    let moved = server
        .mock("GET", "/v2.0/Users")
        .with_status(302)
        .with_header("location", "https://elsewhere.example.com/steal")
        .create_async()
        .await;
    let target = server
        .mock("GET", "/steal")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let err = executor
        .get(
            &format!("{}/v2.0/Users", server.url()),
            rest_headers("tok").expect("headers"),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    match err {
        Error::Redirect {
            status, location, ..
        } => {
            assert_eq!(status, 302);
            assert_eq!(location, "https://elsewhere.example.com/steal");
        }
        other => panic!("unexpected error {other:?}"),
    }
    moved.assert_async().await;
    target.assert_async().await;
}

#[tokio::test]
async fn caller_headers_and_body_are_sent_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/v1.0/attributes/a-1")
        .match_header("authorization", "Bearer tok")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(serde_json::json!({"name": "mail"})))
        .with_status(204)
        .with_header("x-request-id", "r-1")
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let response = executor
        .put(
            &format!("{}/v1.0/attributes/a-1", server.url()),
            rest_headers("tok").expect("headers"),
            Some(br#"{"name":"mail"}"#.to_vec()),
        )
        .await
        .expect("response");

    assert_eq!(response.status, 204);
    assert_eq!(response.header("x-request-id"), Some("r-1"));
    assert!(response.body.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn no_implicit_authorization_header() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/v2.0/Groups/g-1")
        .match_header("authorization", Matcher::Missing)
        .with_status(401)
        .with_body("denied")
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let response = executor
        .delete(&format!("{}/v2.0/Groups/g-1", server.url()), HeaderMap::new())
        .await
        .expect("response");
    assert_eq!(response.status, 401);
    assert_eq!(response.text(), "denied");
    mock.assert_async().await;
}

#[tokio::test]
async fn patch_and_post_return_buffered_bodies() {
    let mut server = Server::new_async().await;
    server
        .mock("PATCH", "/v2.0/Users/u-1")
        .with_status(200)
        .with_body(r#"{"id":"u-1"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/v2.0/Users")
        .with_status(201)
        .with_body(r#"{"id":"u-2"}"#)
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let patched = executor
        .patch(
            &format!("{}/v2.0/Users/u-1", server.url()),
            HeaderMap::new(),
            Some(b"{}".to_vec()),
        )
        .await
        .expect("patch");
    let created = executor
        .post(&format!("{}/v2.0/Users", server.url()), HeaderMap::new(), None)
        .await
        .expect("post");

    let patched: serde_json::Value = patched.json().expect("json");
    let created: serde_json::Value = created.json().expect("json");
    assert_eq!(patched["id"], "u-1");
    assert_eq!(created["id"], "u-2");
}

#[tokio::test]
async fn multipart_replaces_json_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1.0/branding/themes")
        .match_header("authorization", "Bearer tok")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="configuration""#.to_string()),
            Matcher::Regex(r#"filename="theme.zip""#.to_string()),
            Matcher::Regex("zip-bytes".to_string()),
        ]))
        .with_status(201)
        .create_async()
        .await;

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let body = MultipartBody::default()
        .field("configuration", r#"{"name":"dark"}"#)
        .file(MultipartFile {
            field: "files".to_string(),
            file_name: "theme.zip".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: b"zip-bytes".to_vec(),
        });

    let executor = HttpExecutor::new().expect("executor");
    let response = executor
        .post_multipart(
            &format!("{}/v1.0/branding/themes", server.url()),
            headers,
            body,
        )
        .await
        .expect("response");
    assert_eq!(response.status, 201);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    let executor = HttpExecutor::new().expect("executor");
    let err = executor
        .get("http://127.0.0.1:1/unreachable", HeaderMap::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn form_post_is_url_encoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/oauth2/token")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header("accept", "application/json")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("scope".into(), "openid profile".into()),
            Matcher::UrlEncoded("client_secret".into(), "s&cret=1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token":"tok"}"#)
        .create_async()
        .await;

    let executor = HttpExecutor::new().expect("executor");
    let response = executor
        .post_form(
            &format!("{}/oauth2/token", server.url()),
            &[
                ("grant_type", "client_credentials"),
                ("scope", "openid profile"),
                ("client_secret", "s&cret=1"),
            ],
        )
        .await
        .expect("response");
    assert_eq!(response.status, 200);
    mock.assert_async().await;
}

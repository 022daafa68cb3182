//! Shared HTTP client. Callers attach their own headers; redirects are never followed.

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, LOCATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Error, Result, SessionError, MEDIA_JSON, MEDIA_SCIM, REQUEST_TIMEOUT};

/// Base URL for a tenant. Bare hostnames get `https://`; an explicit scheme is kept.
pub fn tenant_base_url(tenant: &str) -> String {
    let tenant = tenant.trim().trim_end_matches('/');
    if tenant.starts_with("https://") || tenant.starts_with("http://") {
        tenant.to_string()
    } else {
        format!("https://{tenant}")
    }
}

pub fn tenant_url(tenant: &str, path: &str) -> String {
    format!(
        "{}/{}",
        tenant_base_url(tenant),
        path.trim_start_matches('/')
    )
}

pub fn bearer_headers(token: &str, media_type: &str) -> Result<HeaderMap> {
    if token.trim().is_empty() {
        return Err(SessionError::EmptyToken.into());
    }
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {token}"))?);
    headers.insert(ACCEPT, HeaderValue::from_str(media_type)?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_str(media_type)?);
    Ok(headers)
}

pub fn rest_headers(token: &str) -> Result<HeaderMap> {
    bearer_headers(token, MEDIA_JSON)
}

pub fn scim_headers(token: &str) -> Result<HeaderMap> {
    bearer_headers(token, MEDIA_SCIM)
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_status(&self, expected: u16) -> bool {
        self.status == expected
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[derive(Debug, Clone)]
pub struct MultipartFile {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    pub fields: Vec<(String, String)>,
    pub files: Vec<MultipartFile>,
}

impl MultipartBody {
    pub fn field(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, file: MultipartFile) -> Self {
        self.files.push(file);
        self
    }

    fn into_form(self) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for file in self.files {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.content_type)?;
            form = form.part(file.field, part);
        }
        Ok(form)
    }
}

enum RequestBody {
    Empty,
    Bytes(Vec<u8>),
    Form(Vec<(String, String)>),
    Multipart(MultipartBody),
}

#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
}

impl HttpExecutor {
    pub fn new() -> Result<Self> {
        Self::with_options(false)
    }

    pub fn with_options(accept_invalid_certs: bool) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|err| Error::transport("(client setup)", err))?;
        Ok(Self { client })
    }

    pub async fn get(&self, url: &str, headers: HeaderMap) -> Result<RawResponse> {
        self.execute(Method::GET, url, headers, RequestBody::Empty)
            .await
    }

    pub async fn delete(&self, url: &str, headers: HeaderMap) -> Result<RawResponse> {
        self.execute(Method::DELETE, url, headers, RequestBody::Empty)
            .await
    }

    pub async fn post(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        self.execute(Method::POST, url, headers, bytes_body(body))
            .await
    }

    pub async fn put(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        self.execute(Method::PUT, url, headers, bytes_body(body))
            .await
    }

    pub async fn patch(
        &self,
        url: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse> {
        self.execute(Method::PATCH, url, headers, bytes_body(body))
            .await
    }

    pub async fn post_multipart(
        &self,
        url: &str,
        headers: HeaderMap,
        body: MultipartBody,
    ) -> Result<RawResponse> {
        self.execute(Method::POST, url, headers, RequestBody::Multipart(body))
            .await
    }

    pub async fn put_multipart(
        &self,
        url: &str,
        headers: HeaderMap,
        body: MultipartBody,
    ) -> Result<RawResponse> {
        self.execute(Method::PUT, url, headers, RequestBody::Multipart(body))
            .await
    }

    /// Form-encoded POST used by the OAuth endpoints.
    pub async fn post_form(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> Result<RawResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(MEDIA_JSON));
        let pairs = params
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        self.execute(Method::POST, url, headers, RequestBody::Form(pairs))
            .await
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        mut headers: HeaderMap,
        body: RequestBody,
    ) -> Result<RawResponse> {
        let builder = match body {
            RequestBody::Empty => self.client.request(method.clone(), url).headers(headers),
            RequestBody::Bytes(bytes) => self
                .client
                .request(method.clone(), url)
                .headers(headers)
                .body(bytes),
            RequestBody::Form(pairs) => self
                .client
                .request(method.clone(), url)
                .headers(headers)
                .form(&pairs),
            RequestBody::Multipart(multipart) => {
                // The form supplies its own boundary-bearing content type.
                headers.remove(CONTENT_TYPE);
                let form = multipart
                    .into_form()
                    .map_err(|err| Error::transport(url, err))?;
                self.client
                    .request(method.clone(), url)
                    .headers(headers)
                    .multipart(form)
            }
        };

        debug!(method = %method, url = %url, "http request");
        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|err| Error::transport(url, err))?;
        let status = response.status();
        debug!(
            method = %method,
            url = %url,
            status = %status,
            elapsed_ms = start.elapsed().as_millis(),
            "http response"
        );

        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| Error::transport(url, err))?
            .to_vec();

        if status.is_redirection() {
            let location = headers
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("<none>")
                .to_string();
            return Err(Error::Redirect {
                url: url.to_string(),
                status: status.as_u16(),
                location,
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            headers,
            body,
        })
    }
}

fn bytes_body(body: Option<Vec<u8>>) -> RequestBody {
    match body {
        Some(bytes) => RequestBody::Bytes(bytes),
        None => RequestBody::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn bare_tenant_gets_https() {
        assert_eq!(tenant_base_url("t.example.com"), "https://t.example.com");
        assert_eq!(tenant_base_url("t.example.com/"), "https://t.example.com");
        assert_eq!(
            tenant_base_url("http://127.0.0.1:1234"),
            "http://127.0.0.1:1234"
        );
        assert_eq!(
            tenant_url("t.example.com", "/v2.0/Users"),
            "https://t.example.com/v2.0/Users"
        );
    }

    #[test]
    fn headers_carry_bearer_and_media_type() {
        let headers = scim_headers("tok").expect("headers");
        assert_eq!(headers.get(AUTHORIZATION).expect("auth"), "Bearer tok");
        assert_eq!(headers.get(ACCEPT).expect("accept"), MEDIA_SCIM);
        assert_eq!(headers.get(CONTENT_TYPE).expect("content type"), MEDIA_SCIM);

        let headers = rest_headers("tok").expect("headers");
        assert_eq!(headers.get(ACCEPT).expect("accept"), MEDIA_JSON);
    }

    #[test]
    fn empty_token_is_a_session_error() {
        let err = rest_headers("  ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Session);
    }
}

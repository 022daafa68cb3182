use std::fmt;
use std::marker::PhantomData;

use reqwest::header::{HeaderMap, LOCATION};
use serde::Serialize;
use serde_json::Value;

use crate::{
    expect_status, resolve_id, tenant_url, HttpExecutor, MultipartBody, ResourceKind, Result,
    TenantSession, SCIM_PATCH_SCHEMA,
};

#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Raw filter expression in the kind's own syntax.
    pub filter: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    Add,
    Replace,
    Remove,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatchOperation {
    pub op: PatchOp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

#[derive(Serialize)]
struct PatchRequest<'a> {
    schemas: [&'static str; 1],
    #[serde(rename = "Operations")]
    operations: &'a [PatchOperation],
}

/// CRUD against one resource collection for one tenant session.
pub struct ResourceClient<'a, K: ResourceKind> {
    executor: &'a HttpExecutor,
    session: &'a TenantSession,
    kind: PhantomData<K>,
}

impl<'a, K: ResourceKind> ResourceClient<'a, K> {
    pub fn new(executor: &'a HttpExecutor, session: &'a TenantSession) -> Self {
        Self {
            executor,
            session,
            kind: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        tenant_url(&self.session.tenant, K::COLLECTION_PATH)
    }

    fn item_url(&self, id: &dyn fmt::Display) -> String {
        format!(
            "{}/{}",
            self.collection_url(),
            urlencoding::encode(&id.to_string())
        )
    }

    fn headers(&self) -> Result<HeaderMap> {
        K::MEDIA.headers(&self.session.token)
    }

    pub async fn resolve(&self, name: &str) -> Result<K::Id> {
        resolve_id::<K>(self.executor, self.session, name).await
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<Value>> {
        let mut params = Vec::new();
        if let Some(filter) = query.filter.as_deref().filter(|f| !f.is_empty()) {
            params.push(format!(
                "{}={}",
                K::FILTER.query_param(),
                urlencoding::encode(filter)
            ));
        }
        if let Some(limit) = query.limit {
            params.push(format!("{}={}", K::FILTER.limit_param(), limit));
        }
        let mut url = self.collection_url();
        if !params.is_empty() {
            url.push('?');
            url.push_str(&params.join("&"));
        }
        let response = self.executor.get(&url, self.headers()?).await?;
        expect_status(&response, 200, &format!("list {}s", K::KIND))?;
        K::decode_list(&response.body)
    }

    pub async fn get(&self, id: impl fmt::Display) -> Result<Value> {
        let response = self
            .executor
            .get(&self.item_url(&id), self.headers()?)
            .await?;
        expect_status(&response, 200, &format!("get {} {id}", K::KIND))?;
        response.json()
    }

    pub async fn get_by_name(&self, name: &str) -> Result<(K::Id, Value)> {
        let id = self.resolve(name).await?;
        let body = self.get(&id).await?;
        Ok((id, body))
    }

    /// Returns the `Location` of the new resource when the service sends one.
    pub async fn create(&self, body: &Value) -> Result<Option<String>> {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .executor
            .post(&self.collection_url(), self.headers()?, Some(payload))
            .await?;
        expect_status(&response, 201, &format!("create {}", K::KIND))?;
        Ok(response.header(LOCATION.as_str()).map(str::to_string))
    }

    pub async fn update(&self, id: impl fmt::Display, body: &Value) -> Result<()> {
        let payload = serde_json::to_vec(body)?;
        let response = self
            .executor
            .put(&self.item_url(&id), self.headers()?, Some(payload))
            .await?;
        expect_status(&response, 204, &format!("update {} {id}", K::KIND))
    }

    pub async fn patch(&self, id: impl fmt::Display, operations: &[PatchOperation]) -> Result<()> {
        let payload = serde_json::to_vec(&PatchRequest {
            schemas: [SCIM_PATCH_SCHEMA],
            operations,
        })?;
        let response = self
            .executor
            .patch(&self.item_url(&id), self.headers()?, Some(payload))
            .await?;
        expect_status(&response, 204, &format!("patch {} {id}", K::KIND))
    }

    pub async fn delete(&self, id: impl fmt::Display) -> Result<()> {
        let response = self
            .executor
            .delete(&self.item_url(&id), self.headers()?)
            .await?;
        expect_status(&response, 204, &format!("delete {} {id}", K::KIND))
    }

    pub async fn delete_by_name(&self, name: &str) -> Result<K::Id> {
        let id = self.resolve(name).await?;
        self.delete(&id).await?;
        Ok(id)
    }

    pub async fn create_multipart(&self, body: MultipartBody) -> Result<Option<String>> {
        let response = self
            .executor
            .post_multipart(&self.collection_url(), self.headers()?, body)
            .await?;
        expect_status(&response, 201, &format!("create {}", K::KIND))?;
        Ok(response.header(LOCATION.as_str()).map(str::to_string))
    }

    pub async fn update_multipart(
        &self,
        id: impl fmt::Display,
        body: MultipartBody,
    ) -> Result<()> {
        let response = self
            .executor
            .put_multipart(&self.item_url(&id), self.headers()?, body)
            .await?;
        expect_status(&response, 204, &format!("update {} {id}", K::KIND))
    }
}

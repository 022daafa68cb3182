//! Name to identifier resolution through a filtered list call.

use std::fmt;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    bearer_headers, tenant_url, HttpExecutor, ResolutionError, Result, TenantSession, MEDIA_JSON,
    MEDIA_SCIM,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSyntax {
    /// `<field> eq "<value>"` in the `filter` query parameter.
    Scim,
    /// `<field> = "<value>"` in the `search` query parameter.
    Search,
}

impl FilterSyntax {
    pub fn query_param(self) -> &'static str {
        match self {
            FilterSyntax::Scim => "filter",
            FilterSyntax::Search => "search",
        }
    }

    pub fn expression(self, field: &str, value: &str) -> String {
        let value = escape_quoted(value);
        match self {
            FilterSyntax::Scim => format!("{field} eq \"{value}\""),
            FilterSyntax::Search => format!("{field} = \"{value}\""),
        }
    }

    pub fn limit_param(self) -> &'static str {
        match self {
            FilterSyntax::Scim => "count",
            FilterSyntax::Search => "limit",
        }
    }
}

fn escape_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Json,
    Scim,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Json => MEDIA_JSON,
            MediaType::Scim => MEDIA_SCIM,
        }
    }

    pub fn headers(self, token: &str) -> Result<HeaderMap> {
        bearer_headers(token, self.as_str())
    }
}

/// A list response body that can be flattened into its entries.
pub trait ListEnvelope: DeserializeOwned {
    fn into_entries(self) -> Vec<Value>;
}

impl ListEnvelope for Vec<Value> {
    fn into_entries(self) -> Vec<Value> {
        self
    }
}

#[derive(Debug, Deserialize)]
pub struct ScimListResponse {
    #[serde(rename = "Resources", default)]
    pub resources: Vec<Value>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u64>,
}

impl ListEnvelope for ScimListResponse {
    fn into_entries(self) -> Vec<Value> {
        self.resources
    }
}

#[derive(Deserialize)]
struct IdField<I> {
    id: I,
}

/// Static description of one resource collection on the service.
pub trait ResourceKind {
    /// Identifier type; string on most APIs, numeric on some older ones.
    type Id: DeserializeOwned + fmt::Display;
    type List: ListEnvelope;

    const KIND: &'static str;
    const COLLECTION_PATH: &'static str;
    const NAME_FIELD: &'static str;
    const FILTER: FilterSyntax;
    const MEDIA: MediaType;

    /// Query parameter name and expression selecting entries whose name equals `name`.
    fn encode_filter(name: &str) -> (&'static str, String) {
        (
            Self::FILTER.query_param(),
            Self::FILTER.expression(Self::NAME_FIELD, name),
        )
    }

    fn decode_list(body: &[u8]) -> Result<Vec<Value>> {
        Ok(serde_json::from_slice::<Self::List>(body)?.into_entries())
    }

    fn extract_id(entry: Value, name: &str) -> Result<Self::Id, ResolutionError> {
        serde_json::from_value::<IdField<Self::Id>>(entry)
            .map(|field| field.id)
            .map_err(|err| ResolutionError::InvalidFormat {
                kind: Self::KIND,
                name: name.to_string(),
                reason: err.to_string(),
            })
    }
}

/// Looks `name` up with a server-side filter and returns the first entry's identifier.
///
/// When several entries match, the first one in response order wins.
pub async fn resolve_id<K: ResourceKind>(
    executor: &HttpExecutor,
    session: &TenantSession,
    name: &str,
) -> Result<K::Id> {
    let (param, expression) = K::encode_filter(name);
    let url = format!(
        "{}?{}={}",
        tenant_url(&session.tenant, K::COLLECTION_PATH),
        param,
        urlencoding::encode(&expression)
    );
    let response = executor.get(&url, K::MEDIA.headers(&session.token)?).await?;
    if response.status != 200 {
        debug!(kind = K::KIND, name = %name, status = response.status, "lookup by name failed");
        return Err(not_found::<K>(name).into());
    }

    let entries = K::decode_list(&response.body)?;
    if entries.len() > 1 {
        warn!(
            kind = K::KIND,
            name = %name,
            matches = entries.len(),
            "several entries share this name; using the first"
        );
    }
    let first = entries
        .into_iter()
        .next()
        .ok_or_else(|| not_found::<K>(name))?;
    Ok(K::extract_id(first, name)?)
}

fn not_found<K: ResourceKind>(name: &str) -> ResolutionError {
    ResolutionError::NotFound {
        kind: K::KIND,
        name: name.to_string(),
    }
}

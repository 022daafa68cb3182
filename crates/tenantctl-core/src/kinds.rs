//! Resource collections exposed by the service.

use serde::Deserialize;
use serde_json::Value;

use crate::{FilterSyntax, ListEnvelope, MediaType, ResourceKind, ScimListResponse};

pub struct User;

impl ResourceKind for User {
    type Id = String;
    type List = ScimListResponse;

    const KIND: &'static str = "user";
    const COLLECTION_PATH: &'static str = "/v2.0/Users";
    const NAME_FIELD: &'static str = "userName";
    const FILTER: FilterSyntax = FilterSyntax::Scim;
    const MEDIA: MediaType = MediaType::Scim;
}

pub struct Group;

impl ResourceKind for Group {
    type Id = String;
    type List = ScimListResponse;

    const KIND: &'static str = "group";
    const COLLECTION_PATH: &'static str = "/v2.0/Groups";
    const NAME_FIELD: &'static str = "displayName";
    const FILTER: FilterSyntax = FilterSyntax::Scim;
    const MEDIA: MediaType = MediaType::Scim;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiClientList {
    #[serde(default)]
    pub api_clients: Vec<Value>,
}

impl ListEnvelope for ApiClientList {
    fn into_entries(self) -> Vec<Value> {
        self.api_clients
    }
}

pub struct ApiClient;

impl ResourceKind for ApiClient {
    type Id = String;
    type List = ApiClientList;

    const KIND: &'static str = "API client";
    const COLLECTION_PATH: &'static str = "/v1.0/apiclients";
    const NAME_FIELD: &'static str = "clientName";
    const FILTER: FilterSyntax = FilterSyntax::Search;
    const MEDIA: MediaType = MediaType::Json;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentitySourceList {
    #[serde(default)]
    pub identity_sources: Vec<Value>,
}

impl ListEnvelope for IdentitySourceList {
    fn into_entries(self) -> Vec<Value> {
        self.identity_sources
    }
}

pub struct IdentitySource;

impl ResourceKind for IdentitySource {
    type Id = String;
    type List = IdentitySourceList;

    const KIND: &'static str = "identity source";
    const COLLECTION_PATH: &'static str = "/v2.0/identitysources";
    const NAME_FIELD: &'static str = "instanceName";
    const FILTER: FilterSyntax = FilterSyntax::Search;
    const MEDIA: MediaType = MediaType::Json;
}

pub struct Attribute;

impl ResourceKind for Attribute {
    type Id = String;
    type List = Vec<Value>;

    const KIND: &'static str = "attribute";
    const COLLECTION_PATH: &'static str = "/v1.0/attributes";
    const NAME_FIELD: &'static str = "name";
    const FILTER: FilterSyntax = FilterSyntax::Search;
    const MEDIA: MediaType = MediaType::Json;
}

#[derive(Debug, Default, Deserialize)]
pub struct EmbeddedApplications {
    #[serde(default)]
    pub applications: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ApplicationList {
    #[serde(rename = "_embedded", default)]
    pub embedded: EmbeddedApplications,
}

impl ListEnvelope for ApplicationList {
    fn into_entries(self) -> Vec<Value> {
        self.embedded.applications
    }
}

pub struct Application;

impl ResourceKind for Application {
    type Id = String;
    type List = ApplicationList;

    const KIND: &'static str = "application";
    const COLLECTION_PATH: &'static str = "/v1.0/applications";
    const NAME_FIELD: &'static str = "name";
    const FILTER: FilterSyntax = FilterSyntax::Search;
    const MEDIA: MediaType = MediaType::Json;
}

#[derive(Debug, Deserialize)]
pub struct AccessPolicyList {
    #[serde(default)]
    pub policies: Vec<Value>,
}

impl ListEnvelope for AccessPolicyList {
    fn into_entries(self) -> Vec<Value> {
        self.policies
    }
}

pub struct AccessPolicy;

impl ResourceKind for AccessPolicy {
    type Id = u64;
    type List = AccessPolicyList;

    const KIND: &'static str = "access policy";
    const COLLECTION_PATH: &'static str = "/v5.0/policyvault/accesspolicy";
    const NAME_FIELD: &'static str = "name";
    const FILTER: FilterSyntax = FilterSyntax::Search;
    const MEDIA: MediaType = MediaType::Json;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeList {
    #[serde(default)]
    pub theme_registrations: Vec<Value>,
}

impl ListEnvelope for ThemeList {
    fn into_entries(self) -> Vec<Value> {
        self.theme_registrations
    }
}

pub struct Theme;

impl ResourceKind for Theme {
    type Id = String;
    type List = ThemeList;

    const KIND: &'static str = "theme";
    const COLLECTION_PATH: &'static str = "/v1.0/branding/themes";
    const NAME_FIELD: &'static str = "name";
    const FILTER: FilterSyntax = FilterSyntax::Search;
    const MEDIA: MediaType = MediaType::Json;
}

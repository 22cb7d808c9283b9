// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::collections::BTreeMap;
use std::sync::Mutex;

use uuid::Uuid;

use super::*;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BrandingColors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_background: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Branding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<BrandingColors>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OrganizationDetails {
    pub id: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding: Option<Branding>,
}

#[derive(Deserialize, JsonSchema)]
pub struct UpdateOrganizationDetailsRequest {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub branding: Option<Branding>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct IdentityProvider {
    pub id: String,
    pub strategy: String,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    pub domains: Vec<String>,
    pub show_as_button: bool,
    pub assign_membership_on_login: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

#[derive(Deserialize, JsonSchema)]
pub struct CreateIdentityProviderRequest {
    pub strategy: String,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub domains: Option<Vec<String>>,
    pub show_as_button: Option<bool>,
    pub assign_membership_on_login: Option<bool>,
    pub options: Option<serde_json::Value>,
}

#[derive(Deserialize, JsonSchema)]
pub struct UpdateIdentityProviderRequest {
    pub display_name: Option<String>,
    pub domains: Option<Vec<String>>,
    pub show_as_button: Option<bool>,
    pub assign_membership_on_login: Option<bool>,
    pub options: Option<serde_json::Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DomainStatus {
    Pending,
    Verified,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Domain {
    pub id: String,
    pub domain: String,
    pub status: DomainStatus,
    pub verification_host: String,
    pub verification_txt: String,
}

#[derive(Deserialize, JsonSchema)]
pub struct CreateDomainRequest {
    pub domain: String,
}

/// An error body in the shape the API returns
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ApiError {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message,
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            String::from("missing bearer token"),
        )
    }

    pub fn not_found(what: &str, id: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, format!("{what} {id} not found"))
    }

    pub fn conflict(detail: String) -> Self {
        Self::new(StatusCode::CONFLICT, detail)
    }

    pub fn bad_request(detail: String) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn internal_error(detail: String) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }

    pub fn to_http_response(self) -> Result<Response<Body>, http::Error> {
        let status = StatusCode::from_u16(self.status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Serializing three plain fields cannot fail, fall back to an empty
        // object regardless.
        let serialized = serde_json::to_string(&self)
            .unwrap_or_else(|_| String::from("{}"));

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(serialized.into())
    }
}

#[derive(Clone, Debug)]
pub struct ApiState {
    pub details: OrganizationDetails,
    pub identity_providers: BTreeMap<String, IdentityProvider>,
    pub domains: BTreeMap<String, Domain>,
}

/// A non-optimized store for the API's resources, for use with tests
pub struct ApiStore {
    state: Mutex<ApiState>,
}

impl Default for ApiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ApiState {
                details: OrganizationDetails {
                    id: String::from("org_dundermifflin"),
                    name: String::from("dunder-mifflin"),
                    display_name: Some(String::from("Dunder Mifflin")),
                    branding: None,
                },
                identity_providers: BTreeMap::new(),
                domains: BTreeMap::new(),
            }),
        }
    }

    pub fn state(&self) -> ApiState {
        self.state.lock().unwrap().clone()
    }

    pub fn get_details(&self) -> OrganizationDetails {
        self.state.lock().unwrap().details.clone()
    }

    pub fn update_details(
        &self,
        request: UpdateOrganizationDetailsRequest,
    ) -> Result<OrganizationDetails, ApiError> {
        let UpdateOrganizationDetailsRequest { name, display_name, branding } =
            request;

        if name.is_none() && display_name.is_none() && branding.is_none() {
            return Err(ApiError::bad_request(String::from(
                "update must set at least one field",
            )));
        }

        let mut state = self.state.lock().unwrap();
        let details = &mut state.details;

        if let Some(name) = name {
            details.name = name;
        }

        if let Some(display_name) = display_name {
            details.display_name = Some(display_name);
        }

        if let Some(update) = branding {
            let current = details.branding.get_or_insert_default();

            if let Some(logo_url) = update.logo_url {
                current.logo_url = Some(logo_url);
            }

            if let Some(colors) = update.colors {
                let current_colors = current.colors.get_or_insert_default();

                if let Some(primary) = colors.primary {
                    current_colors.primary = Some(primary);
                }

                if let Some(page_background) = colors.page_background {
                    current_colors.page_background = Some(page_background);
                }
            }
        }

        Ok(details.clone())
    }

    pub fn list_identity_providers(&self) -> Vec<IdentityProvider> {
        let state = self.state.lock().unwrap();
        state.identity_providers.values().cloned().collect()
    }

    pub fn get_identity_provider(
        &self,
        id: &str,
    ) -> Result<IdentityProvider, ApiError> {
        let state = self.state.lock().unwrap();
        state
            .identity_providers
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("identity provider", id))
    }

    pub fn create_identity_provider(
        &self,
        request: CreateIdentityProviderRequest,
    ) -> Result<IdentityProvider, ApiError> {
        if request.strategy.is_empty() {
            return Err(ApiError::bad_request(String::from(
                "strategy must not be empty",
            )));
        }

        let mut state = self.state.lock().unwrap();

        let id = format!("con_{}", Uuid::new_v4().simple());
        let name = request
            .name
            .unwrap_or_else(|| format!("{}-{}", request.strategy, &id[4..12]));

        if state.identity_providers.values().any(|idp| idp.name == name) {
            return Err(ApiError::conflict(format!(
                "identity provider named {name} exists already"
            )));
        }

        let identity_provider = IdentityProvider {
            id: id.clone(),
            strategy: request.strategy,
            name,
            display_name: request.display_name,
            domains: request.domains.unwrap_or_default(),
            show_as_button: request.show_as_button.unwrap_or(true),
            assign_membership_on_login: request
                .assign_membership_on_login
                .unwrap_or(false),
            options: request.options,
        };

        let existing =
            state.identity_providers.insert(id, identity_provider.clone());
        assert!(existing.is_none());

        Ok(identity_provider)
    }

    pub fn update_identity_provider(
        &self,
        id: &str,
        request: UpdateIdentityProviderRequest,
    ) -> Result<IdentityProvider, ApiError> {
        let UpdateIdentityProviderRequest {
            display_name,
            domains,
            show_as_button,
            assign_membership_on_login,
            options,
        } = request;

        if display_name.is_none()
            && domains.is_none()
            && show_as_button.is_none()
            && assign_membership_on_login.is_none()
            && options.is_none()
        {
            return Err(ApiError::bad_request(String::from(
                "update must set at least one field",
            )));
        }

        let mut state = self.state.lock().unwrap();
        let identity_provider = state
            .identity_providers
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("identity provider", id))?;

        if let Some(display_name) = display_name {
            identity_provider.display_name = Some(display_name);
        }

        if let Some(domains) = domains {
            identity_provider.domains = domains;
        }

        if let Some(show_as_button) = show_as_button {
            identity_provider.show_as_button = show_as_button;
        }

        if let Some(assign) = assign_membership_on_login {
            identity_provider.assign_membership_on_login = assign;
        }

        if let Some(options) = options {
            identity_provider.options = Some(options);
        }

        Ok(identity_provider.clone())
    }

    pub fn delete_identity_provider(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        match state.identity_providers.remove(id) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found("identity provider", id)),
        }
    }

    pub fn list_domains(&self) -> Vec<Domain> {
        let state = self.state.lock().unwrap();
        state.domains.values().cloned().collect()
    }

    pub fn get_domain(&self, id: &str) -> Result<Domain, ApiError> {
        let state = self.state.lock().unwrap();
        state
            .domains
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("domain", id))
    }

    pub fn create_domain(
        &self,
        request: CreateDomainRequest,
    ) -> Result<Domain, ApiError> {
        let name = request.domain.trim().to_ascii_lowercase();

        if name.is_empty() || !name.contains('.') {
            return Err(ApiError::bad_request(format!(
                "{} is not a domain name",
                request.domain
            )));
        }

        let mut state = self.state.lock().unwrap();

        if state.domains.values().any(|domain| domain.domain == name) {
            return Err(ApiError::conflict(format!(
                "domain {name} exists already"
            )));
        }

        let id = format!("dom_{}", Uuid::new_v4().simple());
        let domain = Domain {
            id: id.clone(),
            verification_host: format!("_myorg-verification.{name}"),
            verification_txt: format!("myorg-verification={}", Uuid::new_v4()),
            domain: name,
            status: DomainStatus::Pending,
        };

        let existing = state.domains.insert(id, domain.clone());
        assert!(existing.is_none());

        Ok(domain)
    }

    pub fn delete_domain(&self, id: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        match state.domains.remove(id) {
            Some(_) => Ok(()),
            None => Err(ApiError::not_found("domain", id)),
        }
    }

    /// There is no DNS to consult here, so verification always succeeds.
    pub fn verify_domain(&self, id: &str) -> Result<Domain, ApiError> {
        let mut state = self.state.lock().unwrap();
        let domain = state
            .domains
            .get_mut(id)
            .ok_or_else(|| ApiError::not_found("domain", id))?;

        domain.status = DomainStatus::Verified;

        Ok(domain.clone())
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// The REST operations of the My Organization API, each gated by one scope
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    GetOrganizationDetails,
    UpdateOrganizationDetails,

    ListIdentityProviders,
    GetIdentityProvider { id: String },
    CreateIdentityProvider,
    UpdateIdentityProvider { id: String },
    DeleteIdentityProvider { id: String },

    ListDomains,
    GetDomain { id: String },
    CreateDomain,
    DeleteDomain { id: String },
    VerifyDomain { id: String },
}

impl Operation {
    pub fn method(&self) -> Method {
        match self {
            Operation::GetOrganizationDetails
            | Operation::ListIdentityProviders
            | Operation::GetIdentityProvider { .. }
            | Operation::ListDomains
            | Operation::GetDomain { .. } => Method::GET,

            Operation::CreateIdentityProvider
            | Operation::CreateDomain
            | Operation::VerifyDomain { .. } => Method::POST,

            Operation::UpdateOrganizationDetails
            | Operation::UpdateIdentityProvider { .. } => Method::PATCH,

            Operation::DeleteIdentityProvider { .. }
            | Operation::DeleteDomain { .. } => Method::DELETE,
        }
    }

    /// Path relative to the API host, with path parameters percent-encoded
    pub fn path(&self) -> String {
        match self {
            Operation::GetOrganizationDetails
            | Operation::UpdateOrganizationDetails => {
                String::from("/my-org/details")
            }

            Operation::ListIdentityProviders
            | Operation::CreateIdentityProvider => {
                String::from("/my-org/identity-providers")
            }

            Operation::GetIdentityProvider { id }
            | Operation::UpdateIdentityProvider { id }
            | Operation::DeleteIdentityProvider { id } => {
                format!("/my-org/identity-providers/{}", urlencoding::encode(id))
            }

            Operation::ListDomains | Operation::CreateDomain => {
                String::from("/my-org/domains")
            }

            Operation::GetDomain { id } | Operation::DeleteDomain { id } => {
                format!("/my-org/domains/{}", urlencoding::encode(id))
            }

            Operation::VerifyDomain { id } => {
                format!("/my-org/domains/{}/verify", urlencoding::encode(id))
            }
        }
    }

    pub fn required_scope(&self) -> &'static str {
        match self {
            Operation::GetOrganizationDetails => "read:my_org:details",
            Operation::UpdateOrganizationDetails => "update:my_org:details",

            Operation::ListIdentityProviders
            | Operation::GetIdentityProvider { .. } => {
                "read:my_org:identity_providers"
            }
            Operation::CreateIdentityProvider => {
                "create:my_org:identity_providers"
            }
            Operation::UpdateIdentityProvider { .. } => {
                "update:my_org:identity_providers"
            }
            Operation::DeleteIdentityProvider { .. } => {
                "delete:my_org:identity_providers"
            }

            Operation::ListDomains | Operation::GetDomain { .. } => {
                "read:my_org:domains"
            }
            Operation::CreateDomain => "create:my_org:domains",
            Operation::DeleteDomain { .. } => "delete:my_org:domains",
            Operation::VerifyDomain { .. } => "update:my_org:domains",
        }
    }

    /// Build the request for this operation, checking `token` grants its
    /// scope.
    pub fn request(
        &self,
        token: &str,
        body: Option<String>,
    ) -> Result<RequestDescriptor, Error> {
        build(token, self.required_scope(), &self.path(), self.method(), body)
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Operation::GetOrganizationDetails => {
                write!(f, "get organization details")
            }
            Operation::UpdateOrganizationDetails => {
                write!(f, "update organization details")
            }
            Operation::ListIdentityProviders => {
                write!(f, "list identity providers")
            }
            Operation::GetIdentityProvider { id } => {
                write!(f, "get identity provider {id}")
            }
            Operation::CreateIdentityProvider => {
                write!(f, "create identity provider")
            }
            Operation::UpdateIdentityProvider { id } => {
                write!(f, "update identity provider {id}")
            }
            Operation::DeleteIdentityProvider { id } => {
                write!(f, "delete identity provider {id}")
            }
            Operation::ListDomains => write!(f, "list domains"),
            Operation::GetDomain { id } => write!(f, "get domain {id}"),
            Operation::CreateDomain => write!(f, "create domain"),
            Operation::DeleteDomain { id } => write!(f, "delete domain {id}"),
            Operation::VerifyDomain { id } => write!(f, "verify domain {id}"),
        }
    }
}

#[cfg(test)]
mod test {
    use http::Method;
    use serde_json::json;

    use crate::Error;
    use crate::Operation;
    use crate::token::test::token_with_payload;

    #[test]
    fn test_paths_encode_ids() {
        let op = Operation::GetIdentityProvider { id: String::from("con_1/2 3") };
        assert_eq!(op.path(), "/my-org/identity-providers/con_1%2F2%203");

        let op = Operation::VerifyDomain { id: String::from("dom_abc") };
        assert_eq!(op.path(), "/my-org/domains/dom_abc/verify");
        assert_eq!(op.method(), Method::POST);
        assert_eq!(op.required_scope(), "update:my_org:domains");
    }

    #[test]
    fn test_operation_request() {
        let token = token_with_payload(&json!({
            "scope": "read:my_org:identity_providers delete:my_org:identity_providers",
            "iss": "https://tenant.example.com/",
        }));

        let request = Operation::DeleteIdentityProvider {
            id: String::from("con_123"),
        }
        .request(&token, None)
        .unwrap();
        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(
            request.url(),
            "https://tenant.example.com/my-org/identity-providers/con_123"
        );

        // create is a separate scope from read and delete
        let result = Operation::CreateIdentityProvider
            .request(&token, Some(String::from(r#"{"strategy":"oidc"}"#)));
        assert!(matches!(
            result,
            Err(Error::Scope { required, .. })
                if required == "create:my_org:identity_providers"
        ));
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::Subcommand;
use myorg::Operation;

use crate::CliError;
use crate::Payload;
use crate::parse_object;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Organization name, display name and branding
    #[clap(subcommand)]
    Details(DetailsCommand),

    /// Identity providers members of the organization sign in with
    #[clap(subcommand)]
    IdentityProviders(IdentityProvidersCommand),

    /// Domains claimed by the organization
    #[clap(subcommand)]
    Domains(DomainsCommand),
}

#[derive(Debug, Subcommand)]
pub enum DetailsCommand {
    /// Show the organization's details
    Get,

    /// Change the organization's details
    Update(UpdateDetailsArgs),
}

#[derive(Debug, clap::Args)]
pub struct UpdateDetailsArgs {
    /// The complete request body as a JSON object
    #[clap(long)]
    json: Option<String>,

    #[clap(long, conflicts_with = "json")]
    name: Option<String>,

    #[clap(long, conflicts_with = "json")]
    display_name: Option<String>,

    #[clap(long, conflicts_with = "json")]
    logo_url: Option<String>,

    #[clap(long, conflicts_with = "json")]
    primary_color: Option<String>,

    #[clap(long, conflicts_with = "json")]
    page_background_color: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum IdentityProvidersCommand {
    /// List the organization's identity providers
    List,

    /// Show one identity provider
    Get(IdArgs),

    /// Add an identity provider
    Create(CreateIdentityProviderArgs),

    /// Change an identity provider
    Update(UpdateIdentityProviderArgs),

    /// Remove an identity provider
    Delete(IdArgs),
}

#[derive(Debug, clap::Args)]
pub struct IdArgs {
    #[clap(long)]
    id: String,
}

#[derive(Debug, clap::Args)]
pub struct CreateIdentityProviderArgs {
    /// The complete request body as a JSON object
    #[clap(long)]
    json: Option<String>,

    /// Connection strategy, e.g. oidc, samlp, okta, adfs, waad, google-apps
    #[clap(long, required_unless_present = "json", conflicts_with = "json")]
    strategy: Option<String>,

    #[clap(long, conflicts_with = "json")]
    name: Option<String>,

    #[clap(long, conflicts_with = "json")]
    display_name: Option<String>,

    /// Email domain routed to this provider, may be repeated
    #[clap(long = "domain", conflicts_with = "json")]
    domains: Vec<String>,

    #[clap(long, conflicts_with = "json")]
    show_as_button: Option<bool>,

    #[clap(long, conflicts_with = "json")]
    assign_membership_on_login: Option<bool>,

    /// Strategy specific options as a JSON object
    #[clap(long, conflicts_with = "json")]
    options: Option<String>,
}

#[derive(Debug, clap::Args)]
pub struct UpdateIdentityProviderArgs {
    #[clap(long)]
    id: String,

    /// The complete request body as a JSON object
    #[clap(long)]
    json: Option<String>,

    #[clap(long, conflicts_with = "json")]
    display_name: Option<String>,

    /// Email domain routed to this provider, may be repeated. Replaces the
    /// current list.
    #[clap(long = "domain", conflicts_with = "json")]
    domains: Vec<String>,

    #[clap(long, conflicts_with = "json")]
    show_as_button: Option<bool>,

    #[clap(long, conflicts_with = "json")]
    assign_membership_on_login: Option<bool>,

    /// Strategy specific options as a JSON object
    #[clap(long, conflicts_with = "json")]
    options: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum DomainsCommand {
    /// List the organization's domains
    List,

    /// Show one domain
    Get(IdArgs),

    /// Claim a domain
    Create(CreateDomainArgs),

    /// Release a domain
    Delete(IdArgs),

    /// Check a domain's verification record
    Verify(IdArgs),
}

#[derive(Debug, clap::Args)]
pub struct CreateDomainArgs {
    #[clap(long)]
    domain: String,
}

impl Command {
    /// The API operation this command wraps, with its request body
    pub fn into_operation(
        self,
    ) -> Result<(Operation, Option<String>), CliError> {
        match self {
            Command::Details(DetailsCommand::Get) => {
                Ok((Operation::GetOrganizationDetails, None))
            }

            Command::Details(DetailsCommand::Update(args)) => {
                Ok((Operation::UpdateOrganizationDetails, Some(args.body()?)))
            }

            Command::IdentityProviders(command) => command.into_operation(),

            Command::Domains(command) => Ok(command.into_operation()),
        }
    }
}

impl IdentityProvidersCommand {
    fn into_operation(self) -> Result<(Operation, Option<String>), CliError> {
        let operation = match self {
            IdentityProvidersCommand::List => {
                (Operation::ListIdentityProviders, None)
            }

            IdentityProvidersCommand::Get(IdArgs { id }) => {
                (Operation::GetIdentityProvider { id }, None)
            }

            IdentityProvidersCommand::Create(args) => {
                (Operation::CreateIdentityProvider, Some(args.body()?))
            }

            IdentityProvidersCommand::Update(args) => {
                let body = args.body()?;
                (Operation::UpdateIdentityProvider { id: args.id }, Some(body))
            }

            IdentityProvidersCommand::Delete(IdArgs { id }) => {
                (Operation::DeleteIdentityProvider { id }, None)
            }
        };

        Ok(operation)
    }
}

impl DomainsCommand {
    fn into_operation(self) -> (Operation, Option<String>) {
        match self {
            DomainsCommand::List => (Operation::ListDomains, None),

            DomainsCommand::Get(IdArgs { id }) => {
                (Operation::GetDomain { id }, None)
            }

            DomainsCommand::Create(CreateDomainArgs { domain }) => {
                let body = serde_json::json!({ "domain": domain }).to_string();
                (Operation::CreateDomain, Some(body))
            }

            DomainsCommand::Delete(IdArgs { id }) => {
                (Operation::DeleteDomain { id }, None)
            }

            DomainsCommand::Verify(IdArgs { id }) => {
                (Operation::VerifyDomain { id }, None)
            }
        }
    }
}

impl UpdateDetailsArgs {
    fn body(&self) -> Result<String, CliError> {
        let payload = match &self.json {
            Some(raw) => Payload::from_json("json", raw)?,

            None => {
                let mut payload = Payload::new();
                payload.set("name", self.name.as_deref());
                payload.set("display_name", self.display_name.as_deref());
                payload.set_path(&["branding", "logo_url"], self.logo_url.as_deref());
                payload.set_path(
                    &["branding", "colors", "primary"],
                    self.primary_color.as_deref(),
                );
                payload.set_path(
                    &["branding", "colors", "page_background"],
                    self.page_background_color.as_deref(),
                );
                payload
            }
        };

        payload.into_non_empty_body()
    }
}

impl CreateIdentityProviderArgs {
    fn body(&self) -> Result<String, CliError> {
        if let Some(raw) = &self.json {
            return Ok(Payload::from_json("json", raw)?.into_body());
        }

        let mut payload = Payload::new();
        payload.set("strategy", self.strategy.as_deref());
        payload.set("name", self.name.as_deref());
        payload.set("display_name", self.display_name.as_deref());
        if !self.domains.is_empty() {
            payload.set("domains", Some(self.domains.clone()));
        }
        payload.set("show_as_button", self.show_as_button);
        payload.set("assign_membership_on_login", self.assign_membership_on_login);
        if let Some(raw) = &self.options {
            payload.set("options", Some(parse_object("options", raw)?));
        }

        Ok(payload.into_body())
    }
}

impl UpdateIdentityProviderArgs {
    fn body(&self) -> Result<String, CliError> {
        if let Some(raw) = &self.json {
            return Payload::from_json("json", raw)?.into_non_empty_body();
        }

        let mut payload = Payload::new();
        payload.set("display_name", self.display_name.as_deref());
        if !self.domains.is_empty() {
            payload.set("domains", Some(self.domains.clone()));
        }
        payload.set("show_as_button", self.show_as_button);
        payload.set("assign_membership_on_login", self.assign_membership_on_login);
        if let Some(raw) = &self.options {
            payload.set("options", Some(parse_object("options", raw)?));
        }

        payload.into_non_empty_body()
    }
}

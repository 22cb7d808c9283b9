// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io::Write;
use std::net::TcpListener;
use std::process::Command;
use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use clap::Parser;
use dropshot::HttpServer;
use serde_json::Value;
use serde_json::json;
use tempfile::NamedTempFile;

use myorg_cli::Args;
use myorg_cli::CliError;
use myorg_test_api_server::ServerContext;
use myorg_test_api_server::create_http_server;

const ALL_SCOPES: &str = "read:my_org:details update:my_org:details \
    read:my_org:identity_providers create:my_org:identity_providers \
    update:my_org:identity_providers delete:my_org:identity_providers \
    read:my_org:domains create:my_org:domains update:my_org:domains \
    delete:my_org:domains";

struct TestServer {
    // Declared first so the server is dropped while its runtime still runs
    server: HttpServer<Arc<ServerContext>>,
    _runtime: tokio::runtime::Runtime,
    issuer: String,
}

impl TestServer {
    fn start() -> Self {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let log = slog::Logger::root(slog::Discard, slog::o!());

        let server = {
            let _guard = runtime.enter();
            create_http_server(log, None).unwrap()
        };

        let issuer = format!("http://{}/", server.local_addr());

        Self { server, _runtime: runtime, issuer }
    }

    fn token(&self, scope: &str) -> String {
        mint_token(&json!({ "scope": scope, "iss": self.issuer }))
    }

    /// Run the CLI with the given token, returning its result and stdout
    fn invoke(&self, token: &str, args: &[&str]) -> (Result<(), CliError>, String) {
        let args: Vec<&str> =
            ["-a", token].into_iter().chain(args.iter().copied()).collect();
        run_cli(&args)
    }

    /// Like `invoke`, for calls expected to succeed with a JSON body
    fn invoke_json(&self, args: &[&str]) -> Value {
        let (result, out) = self.invoke(&self.token(ALL_SCOPES), args);
        if let Err(e) = result {
            panic!("{args:?} failed: {e} ({out})");
        }
        serde_json::from_str(&out).unwrap()
    }
}

fn run_cli(args: &[&str]) -> (Result<(), CliError>, String) {
    let args =
        Args::try_parse_from(std::iter::once("myorg").chain(args.iter().copied()))
            .unwrap();

    let log = slog::Logger::root(slog::Discard, slog::o!());
    let mut out = Vec::new();
    let result = myorg_cli::run(&log, args, &mut out);

    (result, String::from_utf8(out).unwrap())
}

fn env_file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn mint_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

#[test]
fn test_identity_provider_round_trip() {
    let server = TestServer::start();

    let created = server.invoke_json(&[
        "identity-providers",
        "create",
        "--strategy",
        "oidc",
        "--name",
        "okta",
        "--domain",
        "dundermifflin.com",
    ]);
    assert_eq!(created["strategy"], "oidc");
    assert_eq!(created["domains"], json!(["dundermifflin.com"]));
    let id = created["id"].as_str().unwrap().to_string();

    let listed = server.invoke_json(&["identity-providers", "list"]);
    assert_eq!(listed["identity_providers"], json!([created]));

    let updated = server.invoke_json(&[
        "identity-providers",
        "update",
        "--id",
        &id,
        "--display-name",
        "Okta Workforce",
    ]);
    assert_eq!(updated["display_name"], "Okta Workforce");

    let fetched = server.invoke_json(&["identity-providers", "get", "--id", &id]);
    assert_eq!(fetched, updated);

    // 204: nothing is printed
    let (result, out) = server.invoke(
        &server.token(ALL_SCOPES),
        &["identity-providers", "delete", "--id", &id],
    );
    result.unwrap();
    assert_eq!(out, "");

    // The error body is still printed, the status becomes the error
    let (result, out) = server.invoke(
        &server.token(ALL_SCOPES),
        &["identity-providers", "get", "--id", &id],
    );
    let error = result.unwrap_err();
    assert!(
        matches!(&error, CliError::HttpStatus { status, .. } if status.as_u16() == 404)
    );
    assert_eq!(error.exit_code(), 4);
    let body: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(body["status"], 404);
}

#[test]
fn test_organization_details() {
    let server = TestServer::start();

    let details = server.invoke_json(&["details", "get"]);
    assert_eq!(details["display_name"], "Dunder Mifflin");

    let updated = server.invoke_json(&[
        "details",
        "update",
        "--logo-url",
        "https://dundermifflin.com/logo.png",
        "--page-background-color",
        "#ffffff",
    ]);
    assert_eq!(
        updated["branding"],
        json!({
            "logo_url": "https://dundermifflin.com/logo.png",
            "colors": { "page_background": "#ffffff" },
        })
    );
    assert_eq!(updated["name"], details["name"]);
}

#[test]
fn test_domain_verification() {
    let server = TestServer::start();

    let created = server
        .invoke_json(&["domains", "create", "--domain", "dundermifflin.com"]);
    assert_eq!(created["status"], "pending");
    let id = created["id"].as_str().unwrap().to_string();

    let verified = server.invoke_json(&["domains", "verify", "--id", &id]);
    assert_eq!(verified["status"], "verified");

    let listed = server.invoke_json(&["domains", "list"]);
    assert_eq!(listed["organization_domains"], json!([verified]));
}

#[test]
fn test_missing_scope_sends_nothing() {
    let server = TestServer::start();

    // read but not create
    let token = server.token("read:my_org:identity_providers");
    let (result, out) = server.invoke(
        &token,
        &["identity-providers", "create", "--strategy", "oidc"],
    );

    let error = result.unwrap_err();
    assert!(matches!(
        &error,
        CliError::Token(myorg::Error::Scope { required, .. })
            if required == "create:my_org:identity_providers"
    ));
    assert_eq!(error.exit_code(), 1);
    assert_eq!(out, "");

    let state = server.server.app_private().store.state();
    assert!(state.identity_providers.is_empty());
}

#[test]
fn test_issuer_must_form_a_url() {
    let server = TestServer::start();

    let token = mint_token(&json!({
        "scope": "read:my_org:details",
        "iss": "not a url/",
    }));
    let (result, _) = server.invoke(&token, &["details", "get"]);

    let error = result.unwrap_err();
    assert!(matches!(error, CliError::Token(myorg::Error::TokenFormat(_))));
}

#[test]
fn test_binary_exit_codes() {
    let server = TestServer::start();
    let myorg = env!("CARGO_BIN_EXE_myorg");

    let output = Command::new(myorg)
        .args(["-a", &server.token(ALL_SCOPES), "details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let details: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(details["id"], "org_dundermifflin");

    let output = Command::new(myorg)
        .args(["-a", &server.token("read:my_org:details:all"), "details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("read:my_org:details"));

    let output = Command::new(myorg)
        .env_remove("access_token")
        .args(["details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let output = Command::new(myorg)
        .args(["details", "get", "--no-such-flag"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let output = Command::new(myorg)
        .env("access_token", server.token(ALL_SCOPES))
        .args(["domains", "get", "--id", "dom_missing"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_env_file_token() {
    let server = TestServer::start();
    let file = env_file_with(&format!(
        "# tenant\nexport access_token={}\n",
        server.token(ALL_SCOPES)
    ));
    let path = file.path().to_str().unwrap();

    let (result, out) = run_cli(&["-e", path, "details", "get"]);
    result.unwrap();
    let details: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(details["id"], "org_dundermifflin");

    // The env file wins over a process token lacking every scope
    let output = Command::new(env!("CARGO_BIN_EXE_myorg"))
        .env("access_token", server.token(""))
        .args(["-e", path, "domains", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
    let listed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listed["organization_domains"], json!([]));

    // ... and -a wins over the env file
    let (result, out) =
        run_cli(&["-a", &server.token(""), "-e", path, "details", "get"]);
    assert!(matches!(
        result.unwrap_err(),
        CliError::Token(myorg::Error::Scope { .. })
    ));
    assert_eq!(out, "");
}

#[test]
fn test_unreadable_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.env");
    let path = path.to_str().unwrap();

    let (result, _) = run_cli(&["-e", path, "details", "get"]);
    let error = result.unwrap_err();
    assert!(matches!(error, CliError::EnvFile { .. }));
    assert_eq!(error.exit_code(), 2);

    let output = Command::new(env!("CARGO_BIN_EXE_myorg"))
        .args(["-e", path, "details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("reading env file"), "{stderr}");
    assert_eq!(stderr.matches("os error").count(), 1, "{stderr}");

    let file = env_file_with("access_token from-file\n");
    let output = Command::new(env!("CARGO_BIN_EXE_myorg"))
        .args(["-e", file.path().to_str().unwrap(), "details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_json_payload() {
    let server = TestServer::start();

    let (result, out) = server.invoke(
        &server.token(ALL_SCOPES),
        &["details", "update", "--json", "{bad"],
    );
    let error = result.unwrap_err();
    assert!(matches!(error, CliError::InvalidJson { flag: "json", .. }));
    assert_eq!(error.exit_code(), 2);
    assert_eq!(out, "");

    let output = Command::new(env!("CARGO_BIN_EXE_myorg"))
        .args(["-a", &server.token(ALL_SCOPES), "details", "update"])
        .args(["--json", "[1, 2]"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_request_timeout() {
    // Accepts connections at the socket level and never answers
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let issuer = format!("http://{}/", listener.local_addr().unwrap());
    let token = mint_token(&json!({ "scope": ALL_SCOPES, "iss": issuer }));
    let myorg = env!("CARGO_BIN_EXE_myorg");

    let (result, _) = run_cli(&["-a", &token, "--timeout", "1", "details", "get"]);
    let error = result.unwrap_err();
    assert!(matches!(error, CliError::Transport { .. }));
    assert_eq!(error.exit_code(), 4);

    let output = Command::new(myorg)
        .env("MYORG_HTTP_TIMEOUT", "1")
        .args(["-a", &token, "details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());

    // Zero would mean no timeout at all
    let output = Command::new(myorg)
        .env("MYORG_HTTP_TIMEOUT", "0")
        .args(["-a", &token, "details", "get"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let args = Args::try_parse_from(["myorg", "details", "get"]).unwrap();
    assert_eq!(args.timeout, myorg_cli::DEFAULT_TIMEOUT_SECS);

    drop(listener);
}

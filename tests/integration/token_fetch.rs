//! Password-grant requests against a mock token endpoint.

// std
use std::net::TcpListener;
// crates.io
use radosgw_oidc::{
	Error, Result,
	http::client::ClientOptions,
	token::{client, config::FetcherConfig, report},
};
use wiremock::{
	Mock, MockServer, ResponseTemplate,
	matchers::{body_string_contains, header, method, path},
};

const TOKEN_PATH: &str = "/realms/ops/protocol/openid-connect/token";
// Header {"alg":"RS256","typ":"JWT","kid":"k1"}.
// Payload {"sub":"alice","preferred_username":"alice","exp":1700000000}.
const TOKEN: &str = concat!(
	"eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCIsImtpZCI6ImsxIn0.",
	"eyJzdWIiOiJhbGljZSIsInByZWZlcnJlZF91c2VybmFtZSI6ImFsaWNlIiwiZXhwIjoxNzAwMDAwMDAwfQ.",
	"c2ln",
);

fn config(server: &MockServer) -> FetcherConfig {
	FetcherConfig {
		provider_url: format!("{}/realms/ops/", server.uri()),
		client_id: "radosgw".into(),
		client_secret: "s3cr3t".into(),
		username: "alice".into(),
		password: "correct horse".into(),
		scope: "openid".into(),
		ssl_verify: true,
	}
}

#[tokio::test]
async fn prints_exactly_the_received_token() -> Result<()> {
	let _ = tracing_subscriber::fmt::try_init();

	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path(TOKEN_PATH))
		.and(header("content-type", "application/x-www-form-urlencoded"))
		.and(body_string_contains("grant_type=password"))
		.and(body_string_contains("username=alice"))
		.and(body_string_contains("password=correct+horse"))
		.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
			"access_token": TOKEN,
			"token_type": "Bearer",
			"expires_in": 300,
		})))
		.expect(1)
		.mount(&server)
		.await;

	let config = config(&server);

	config.validate()?;

	let http = ClientOptions::new(config.ssl_verify).build()?;
	let response = client::fetch_token(&http, &config).await?;
	let mut out = Vec::new();
	let mut diag = Vec::new();

	report::write_token(&mut out, &mut diag, &response)?;

	let out = String::from_utf8(out).expect("utf-8");
	let diag = String::from_utf8(diag).expect("utf-8");

	assert_eq!(out, format!("RAW ACCESS TOKEN:\n{TOKEN}\n\n"));
	assert!(diag.contains("\"preferred_username\": \"alice\""));
	assert!(diag.contains("kid: k1"));
	assert!(diag.contains("exp: 2023-11-14T22:13:20+00:00"));

	server.verify().await;
	Ok(())
}

#[tokio::test]
async fn rejected_credentials_carry_status_and_body() -> Result<()> {
	let _ = tracing_subscriber::fmt::try_init();

	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path(TOKEN_PATH))
		.respond_with(ResponseTemplate::new(401).set_body_string(
			r#"{"error":"invalid_grant","error_description":"Invalid user credentials"}"#,
		))
		.expect(1)
		.mount(&server)
		.await;

	let http = ClientOptions::default().build()?;
	let err = client::fetch_token(&http, &config(&server)).await.unwrap_err();

	match &err {
		Error::HttpStatus { status, body, .. } => {
			assert_eq!(status.as_u16(), 401);
			assert!(body.as_deref().is_some_and(|body| body.contains("invalid_grant")));
		},
		other => panic!("unexpected error: {other}"),
	}
	assert_eq!(err.exit_code(), 1);

	let mut diag = Vec::new();

	report::write_failure(&mut diag, &err)?;

	let diag = String::from_utf8(diag).expect("utf-8");

	assert!(diag.contains("invalid_grant: Invalid user credentials"));

	Ok(())
}

#[tokio::test]
async fn success_without_token_is_an_error() -> Result<()> {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.and(path(TOKEN_PATH))
		.respond_with(ResponseTemplate::new(200).set_body_string(r#"{"token_type":"Bearer"}"#))
		.mount(&server)
		.await;

	let http = ClientOptions::default().build()?;
	let err = client::fetch_token(&http, &config(&server)).await.unwrap_err();

	assert!(matches!(err, Error::MissingToken(_)));

	Ok(())
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_failure() -> Result<()> {
	let port = TcpListener::bind("127.0.0.1:0")?.local_addr()?.port();
	let config = FetcherConfig {
		provider_url: format!("http://127.0.0.1:{port}/realms/ops"),
		client_secret: "s3cr3t".into(),
		username: "alice".into(),
		password: "correct horse".into(),
		..FetcherConfig::default()
	};
	let http = ClientOptions::default().build()?;
	let err = client::fetch_token(&http, &config).await.unwrap_err();

	assert!(matches!(err, Error::Reqwest(_)), "unexpected error: {err}");
	assert_eq!(err.exit_code(), 1);

	let mut diag = Vec::new();

	report::write_failure(&mut diag, &err)?;

	assert!(String::from_utf8(diag).expect("utf-8").starts_with("❌ Request failed: "));

	Ok(())
}

#[tokio::test]
async fn placeholder_credentials_are_rejected_before_any_request() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let config = FetcherConfig { provider_url: server.uri(), ..FetcherConfig::default() };

	assert!(matches!(config.validate(), Err(Error::Config { field: "client_secret", .. })));

	server.verify().await;
}

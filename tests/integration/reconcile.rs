//! Reconciliation against a mock IAM endpoint speaking the query protocol.

// std
use std::io::Write;
// crates.io
use radosgw_oidc::{
	Error, Result,
	iam::{
		client::{IamClient, IamConfig},
		sigv4::Credentials,
	},
	provider::{
		arn,
		confirm::Preset,
		desired::DesiredState,
		reconcile::{Outcome, Reconciler},
	},
};
use tempfile::NamedTempFile;
use wiremock::{
	Mock, MockBuilder, MockServer, ResponseTemplate,
	matchers::{body_string_contains, header_exists, method, path},
};

const ISSUER: &str = "https://idp.example.com/realms/ops";
const ENCODED_ARN: &str = concat!(
	"OpenIDConnectProviderArn=",
	"arn%3Aaws%3Aiam%3A%3A%3Aoidc-provider%2Fidp.example.com%2Frealms%2Fops",
);
const THUMBPRINT: &str = "9e99a48a9960b14926bb7f3b02e22da2b0ab7280";

fn xml(body: String) -> ResponseTemplate {
	ResponseTemplate::new(200).set_body_string(body).insert_header("content-type", "text/xml")
}

fn list_body(arns: &[&str]) -> String {
	let members =
		arns.iter().map(|arn| format!("<member><Arn>{arn}</Arn></member>")).collect::<String>();

	format!(
		"<ListOpenIDConnectProvidersResponse><ListOpenIDConnectProvidersResult>\
		 <OpenIDConnectProviderList>{members}</OpenIDConnectProviderList>\
		 </ListOpenIDConnectProvidersResult></ListOpenIDConnectProvidersResponse>"
	)
}

fn get_body(client_ids: &[&str], thumbprints: &[&str]) -> String {
	let members = |values: &[&str]| {
		values.iter().map(|value| format!("<member>{value}</member>")).collect::<String>()
	};

	format!(
		"<GetOpenIDConnectProviderResponse><GetOpenIDConnectProviderResult>\
		 <ClientIDList>{}</ClientIDList><ThumbprintList>{}</ThumbprintList>\
		 <Url>idp.example.com/realms/ops</Url><CreateDate>2024-05-01T12:00:00Z</CreateDate>\
		 </GetOpenIDConnectProviderResult></GetOpenIDConnectProviderResponse>",
		members(client_ids),
		members(thumbprints)
	)
}

fn create_body() -> String {
	format!(
		"<CreateOpenIDConnectProviderResponse><CreateOpenIDConnectProviderResult>\
		 <OpenIDConnectProviderArn>{}</OpenIDConnectProviderArn>\
		 </CreateOpenIDConnectProviderResult></CreateOpenIDConnectProviderResponse>",
		arn::provider_arn(ISSUER)
	)
}

fn action(name: &str) -> MockBuilder {
	Mock::given(method("POST"))
		.and(path("/"))
		.and(header_exists("authorization"))
		.and(header_exists("x-amz-date"))
		.and(body_string_contains(format!("Action={name}&")))
}

fn iam(server: &MockServer) -> Result<IamClient> {
	IamClient::new(IamConfig::new(&server.uri(), Credentials::new("AKID", "secret"))?)
}

async fn forbid(server: &MockServer, name: &str) {
	action(name).respond_with(xml(String::new())).expect(0).mount(server).await;
}

fn list_file(contents: &str) -> NamedTempFile {
	let mut file = NamedTempFile::new().expect("temp file");

	file.write_all(contents.as_bytes()).expect("write");

	file
}

fn desired(client_ids: &[&str]) -> DesiredState {
	DesiredState {
		client_ids: client_ids.iter().map(|v| v.to_string()).collect(),
		thumbprints: vec![THUMBPRINT.to_string()],
	}
}

async fn reconcile(
	api: &IamClient,
	answer: bool,
	state: &DesiredState,
) -> (Result<Outcome>, String) {
	let mut reconciler = Reconciler::new(api, Preset(answer), Vec::new());
	let outcome = reconciler.run(ISSUER, state).await;

	(outcome, String::from_utf8(reconciler.into_output()).expect("utf-8"))
}

#[tokio::test]
async fn creates_provider_when_absent() -> Result<()> {
	let _ = tracing_subscriber::fmt::try_init();

	let server = MockServer::start().await;

	action("ListOpenIDConnectProviders")
		.respond_with(xml(list_body(&[])))
		.expect(1)
		.mount(&server)
		.await;
	forbid(&server, "DeleteOpenIDConnectProvider").await;
	action("CreateOpenIDConnectProvider")
		.and(body_string_contains("ClientIDList.member.1=radosgw&ClientIDList.member.2=account"))
		.and(body_string_contains(format!("ThumbprintList.member.1={THUMBPRINT}")))
		.respond_with(xml(create_body()))
		.expect(1)
		.mount(&server)
		.await;
	action("GetOpenIDConnectProvider")
		.respond_with(xml(get_body(&["radosgw", "account"], &[THUMBPRINT])))
		.expect(1)
		.mount(&server)
		.await;

	let (outcome, out) = reconcile(&iam(&server)?, false, &desired(&["radosgw", "account"])).await;

	assert_eq!(outcome?, Outcome::Created { arn: arn::provider_arn(ISSUER) });
	assert!(out.contains("✓ Successfully created OIDC provider"));
	assert!(out.contains("Created: 2024-05-01T12:00:00Z"));

	server.verify().await;
	Ok(())
}

#[tokio::test]
async fn matching_provider_is_left_alone() -> Result<()> {
	let server = MockServer::start().await;
	let existing = arn::provider_arn(ISSUER);
	let other = "arn:aws:iam:::oidc-provider/other.example.com";

	action("ListOpenIDConnectProviders")
		.respond_with(xml(list_body(&[other, existing.as_str()])))
		.mount(&server)
		.await;
	action("GetOpenIDConnectProvider")
		.and(body_string_contains(ENCODED_ARN))
		.respond_with(xml(get_body(&["account", "radosgw"], &[THUMBPRINT])))
		.mount(&server)
		.await;
	forbid(&server, "DeleteOpenIDConnectProvider").await;
	forbid(&server, "CreateOpenIDConnectProvider").await;

	let (outcome, _) = reconcile(&iam(&server)?, true, &desired(&["radosgw", "account"])).await;

	assert_eq!(outcome?, Outcome::InSync { arn: existing });

	server.verify().await;
	Ok(())
}

#[tokio::test]
async fn drifted_provider_is_recreated_after_confirmation() -> Result<()> {
	let server = MockServer::start().await;

	action("ListOpenIDConnectProviders")
		.respond_with(xml(list_body(&[arn::provider_arn(ISSUER).as_str()])))
		.mount(&server)
		.await;
	action("GetOpenIDConnectProvider")
		.respond_with(xml(get_body(&["A", "B"], &[THUMBPRINT])))
		.up_to_n_times(1)
		.expect(1)
		.mount(&server)
		.await;
	action("GetOpenIDConnectProvider")
		.respond_with(xml(get_body(&["B", "C"], &[THUMBPRINT])))
		.expect(1)
		.mount(&server)
		.await;
	action("DeleteOpenIDConnectProvider")
		.and(body_string_contains(ENCODED_ARN))
		.respond_with(xml("<DeleteOpenIDConnectProviderResponse/>".into()))
		.expect(1)
		.mount(&server)
		.await;
	action("CreateOpenIDConnectProvider")
		.and(body_string_contains("ClientIDList.member.1=B&ClientIDList.member.2=C"))
		.respond_with(xml(create_body()))
		.expect(1)
		.mount(&server)
		.await;

	let (outcome, out) = reconcile(&iam(&server)?, true, &desired(&["B", "C"])).await;

	assert!(matches!(outcome?, Outcome::Recreated { .. }));
	assert!(out.contains("+ Adding: C"));
	assert!(out.contains("- Removing: A"));
	assert!(out.contains("✓ Successfully deleted old OIDC provider"));

	server.verify().await;
	Ok(())
}

#[tokio::test]
async fn declined_confirmation_sends_no_mutation() -> Result<()> {
	let server = MockServer::start().await;

	action("ListOpenIDConnectProviders")
		.respond_with(xml(list_body(&[arn::provider_arn(ISSUER).as_str()])))
		.mount(&server)
		.await;
	action("GetOpenIDConnectProvider")
		.respond_with(xml(get_body(&["A", "B"], &[THUMBPRINT])))
		.mount(&server)
		.await;
	forbid(&server, "DeleteOpenIDConnectProvider").await;
	forbid(&server, "CreateOpenIDConnectProvider").await;

	let (outcome, out) = reconcile(&iam(&server)?, false, &desired(&["B", "C"])).await;
	let err = outcome.unwrap_err();

	assert!(matches!(err, Error::Aborted));
	assert_eq!(err.exit_code(), 0);
	assert!(out.contains("Operation cancelled"));

	server.verify().await;
	Ok(())
}

#[tokio::test]
async fn rejected_listing_surfaces_the_iam_error() -> Result<()> {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(403).set_body_string(
			"<ErrorResponse><Error><Type>Sender</Type><Code>AccessDenied</Code>\
			 <Message>User is not authorized</Message></Error></ErrorResponse>",
		))
		.expect(1)
		.mount(&server)
		.await;

	let (outcome, _) = reconcile(&iam(&server)?, true, &desired(&["radosgw"])).await;

	match outcome {
		Err(Error::Api { operation, code, message }) => {
			assert_eq!(operation, "ListOpenIDConnectProviders");
			assert_eq!(code, "AccessDenied");
			assert_eq!(message, "User is not authorized");
		},
		other => panic!("unexpected outcome: {other:?}"),
	}

	server.verify().await;
	Ok(())
}

#[tokio::test]
async fn missing_list_file_fails_before_any_call() {
	let server = MockServer::start().await;

	Mock::given(method("POST"))
		.respond_with(ResponseTemplate::new(200))
		.expect(0)
		.mount(&server)
		.await;

	let client_ids = list_file("# audiences\nradosgw\n\naccount\n");
	let missing = client_ids.path().with_extension("absent");
	let err = DesiredState::load(client_ids.path(), &missing).unwrap_err();

	assert!(matches!(err, Error::InputFile { ref path, .. } if *path == missing));
	assert_eq!(err.exit_code(), 1);

	let thumbprints = list_file(&format!("{THUMBPRINT}\n"));
	let state = DesiredState::load(client_ids.path(), thumbprints.path()).expect("load");

	assert_eq!(state.client_ids, vec!["radosgw".to_string(), "account".to_string()]);

	server.verify().await;
}

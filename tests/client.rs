mod common;

use common::{StubServer, ALL_ENVELOPE, PROD_ENVELOPE};
use foxip::{ClientBuilder, DiagnosticSeverity, Error, IpEnvPlan, Provider, ProviderConfig};
use serde_json::json;

/*-------------------------------------------------------------------------------------------------
  Client End-to-End Tests
-------------------------------------------------------------------------------------------------*/

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/*--------------------------------------------------------------------------------------
  Reads
--------------------------------------------------------------------------------------*/

#[test]
fn get_ip_info_decodes_envelope() {
    let server = StubServer::routes(&[("GET /api/v1/ip-envs/prod", 200, PROD_ENVELOPE)]);

    let ip_info = foxip::get_ip_info(server.address(), "prod").unwrap();
    assert_eq!(ip_info.id, "prod");
    assert_eq!(ip_info.env, "prod");
    assert_eq!(ip_info.groups, ["g1"]);
    assert_eq!(ip_info.cidrs, ["10.0.0.0/8"]);
    assert_eq!(
        foxip::datetime::to_rfc3339_seconds(&ip_info.created),
        "2023-01-01T00:00:00Z"
    );
    assert_eq!(
        foxip::datetime::to_rfc3339_seconds(&ip_info.last_modified),
        "2023-01-02T00:00:00Z"
    );

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[0].header("content-type"), None);
}

#[test]
fn get_ip_info_not_found_is_unexpected_status() {
    let server = StubServer::routes(&[]);

    let error = foxip::get_ip_info(server.address(), "prod").unwrap_err();
    assert!(matches!(error, Error::UnexpectedStatus(404)));
}

#[test]
fn get_ip_info_missing_key_is_zero_record() {
    let server = StubServer::routes(&[("GET /api/v1/ip-envs/ghost", 200, r#"{"res":{}}"#)]);

    let ip_info = foxip::get_ip_info(server.address(), "ghost").unwrap();
    assert!(ip_info.is_zero());
}

#[test]
fn get_ip_info_malformed_body_is_decode_error() {
    let server = StubServer::routes(&[
        ("GET /api/v1/ip-envs/bad-json", 200, "<html>"),
        (
            "GET /api/v1/ip-envs/bad-time",
            200,
            r#"{"res":{"ipInfo":{"env":"bad-time","created":"2023-01-01 00:00"}}}"#,
        ),
    ]);

    for id in ["bad-json", "bad-time"] {
        let error = foxip::get_ip_info(server.address(), id).unwrap_err();
        assert!(error.is_decode(), "{id}: {error}");
    }
}

#[test]
fn get_ip_info_group_and_all_keep_server_order() {
    let server = StubServer::routes(&[
        ("GET /api/v1/ip-groups/g1", 200, ALL_ENVELOPE),
        ("GET /api/v1/ip-groups/none", 200, r#"{"res":{"ipInfoArr":[]}}"#),
        ("GET /api/v1/ip-all", 200, ALL_ENVELOPE),
    ]);

    let envs: Vec<String> = foxip::get_ip_info_group(server.address(), "g1")
        .unwrap()
        .into_iter()
        .map(|ip_info| ip_info.env)
        .collect();
    assert_eq!(envs, ["prod", "dev"]);

    assert!(foxip::get_ip_info_group(server.address(), "none")
        .unwrap()
        .is_empty());

    let all = foxip::get_ip_info_all(server.address()).unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[1].cidrs, ["1.2.3.0/24", "192.168.0.0/16"]);
}

#[test]
fn ping_reads_message() {
    let server = StubServer::routes(&[("GET /api/v1/ping", 200, r#"{"message":"pong"}"#)]);
    let client = ClientBuilder::default()
        .address(server.address())
        .trace(true)
        .build()
        .unwrap();

    assert_eq!(client.ping().unwrap().message, "pong");
}

#[test]
fn base_address_path_is_kept() {
    let server = StubServer::routes(&[("GET /fox/api/v1/ip-all", 200, ALL_ENVELOPE)]);
    let address = format!("{}/fox/", server.address());

    assert_eq!(foxip::get_ip_info_all(&address).unwrap().len(), 2);
}

/*--------------------------------------------------------------------------------------
  Writes
--------------------------------------------------------------------------------------*/

#[test]
fn create_posts_managed_body() {
    let server = StubServer::routes(&[("POST /api/v1/ip-envs/dev", 200, "")]);

    foxip::create_ip_info(server.address(), "dev", &strings(&["g1"]), &strings(&["1.2.3.0/24"]))
        .unwrap();

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    assert_eq!(
        requests[0].json(),
        json!({"groupArr": ["g1"], "cidrArr": ["1.2.3.0/24"], "managedBy": "tfc"})
    );
}

#[test]
fn create_requires_exactly_200() {
    let server = StubServer::routes(&[("POST /api/v1/ip-envs/dev", 201, "{}")]);

    let error = foxip::create_ip_info(server.address(), "dev", &[], &[]).unwrap_err();
    assert_eq!(error.status(), Some(201));
}

#[test]
fn update_puts_lists_only() {
    let server = StubServer::routes(&[("PUT /api/v1/ip-envs/dev", 200, "{}")]);

    foxip::update_ip_info(
        server.address(),
        "dev",
        &strings(&["g1", "g2"]),
        &strings(&["1.2.3.0/24", "10.0.0.0/8"]),
    )
    .unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
    assert_eq!(
        requests[0].json(),
        json!({"groupArr": ["g1", "g2"], "cidrArr": ["1.2.3.0/24", "10.0.0.0/8"]})
    );
}

#[test]
fn delete_sends_no_body() {
    let server = StubServer::routes(&[("DELETE /api/v1/ip-envs/dev", 200, "{}")]);

    foxip::delete_ip_info(server.address(), "dev").unwrap();

    let requests = server.requests();
    assert_eq!(requests[0].method, "DELETE");
    assert!(requests[0].body.is_empty());
    assert_eq!(requests[0].header("content-type"), None);
}

#[test]
fn delete_failure_status_is_returned() {
    let server = StubServer::routes(&[("DELETE /api/v1/ip-envs/dev", 500, "{}")]);

    let error = foxip::delete_ip_info(server.address(), "dev").unwrap_err();
    assert!(matches!(error, Error::UnexpectedStatus(500)));
}

/*--------------------------------------------------------------------------------------
  Raw Transport
--------------------------------------------------------------------------------------*/

#[test]
fn request_returns_status_and_body_without_interpreting() {
    let server = StubServer::routes(&[("GET /api/v1/ip-envs/prod", 200, PROD_ENVELOPE)]);
    let client = ClientBuilder::default()
        .address(server.address())
        .build()
        .unwrap();

    let url = client.api_url("ip-envs/prod").unwrap();
    let response = client
        .request(foxip::Method::GET, &url, foxip::DEFAULT_TIMEOUT, None, &[])
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, PROD_ENVELOPE.as_bytes());

    let url = client.api_url("ip-envs/missing").unwrap();
    let response = client
        .request(foxip::Method::GET, &url, foxip::DEFAULT_TIMEOUT, None, &[])
        .unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.body, br#"{"message":"not found"}"#);
}

/*-------------------------------------------------------------------------------------------------
  Provider Lifecycle Tests
-------------------------------------------------------------------------------------------------*/

fn provider(server: &StubServer) -> Provider {
    Provider::configure(&ProviderConfig {
        address: server.address().to_string(),
    })
    .unwrap()
}

#[test]
fn provider_create_reads_back() {
    let server = StubServer::routes(&[
        ("POST /api/v1/ip-envs/prod", 200, "{}"),
        ("GET /api/v1/ip-envs/prod", 200, PROD_ENVELOPE),
    ]);

    let provider = provider(&server);
    let (state, diagnostics) = provider
        .create_ip_env(&IpEnvPlan {
            env: "prod".to_string(),
            groups: strings(&["g1"]),
            cidrs: strings(&["10.0.0.0/8"]),
        })
        .unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(state.id, "prod");
    assert_eq!(state.created, "2023-01-01T00:00:00Z");
    assert_eq!(provider.read_ip_env_resource(&state).unwrap(), state);

    let methods: Vec<String> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["POST", "GET", "GET"]);
    assert_eq!(provider.client().address(), server.address());
}

#[test]
fn provider_create_keeps_id_when_read_back_fails() {
    let server = StubServer::routes(&[
        ("POST /api/v1/ip-envs/prod", 200, "{}"),
        ("GET /api/v1/ip-envs/prod", 500, "{}"),
    ]);

    let plan = IpEnvPlan {
        env: "prod".to_string(),
        groups: strings(&["g1"]),
        cidrs: strings(&["10.0.0.0/8"]),
    };
    let (state, diagnostics) = provider(&server).create_ip_env(&plan).unwrap();
    assert_eq!(state.id, "prod");
    assert_eq!(state.env, "prod");
    assert_eq!(state.groups, plan.groups);
    assert_eq!(state.cidrs, plan.cidrs);
    assert_eq!(state.created, "");
    assert_eq!(state.last_modified, "");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].severity, DiagnosticSeverity::Warning);
    assert_eq!(diagnostics[0].summary, "read after create fail");
    assert_eq!(
        diagnostics[0].detail.as_deref(),
        Some("error: http response not ok: get status: 500")
    );

    let methods: Vec<String> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["POST", "GET"]);
}

#[test]
fn provider_create_failure_is_an_error() {
    let server = StubServer::routes(&[("POST /api/v1/ip-envs/prod", 500, "{}")]);

    let plan = IpEnvPlan {
        env: "prod".to_string(),
        ..IpEnvPlan::default()
    };
    let error = provider(&server).create_ip_env(&plan).unwrap_err();
    assert!(matches!(error, Error::UnexpectedStatus(500)));

    let methods: Vec<String> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["POST"]);
}

#[test]
fn provider_update_without_changes_skips_put() {
    let server = StubServer::routes(&[
        ("PUT /api/v1/ip-envs/prod", 200, "{}"),
        ("GET /api/v1/ip-envs/prod", 200, PROD_ENVELOPE),
    ]);
    let provider = provider(&server);

    let prior = provider.read_ip_env("prod").unwrap();
    let plan = IpEnvPlan {
        env: prior.env.clone(),
        groups: prior.groups.clone(),
        cidrs: prior.cidrs.clone(),
    };
    let state = provider.update_ip_env(&prior, &plan).unwrap();
    assert_eq!(state, prior);

    let methods: Vec<String> = server.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, ["GET", "GET"]);
}

#[test]
fn provider_update_with_changes_puts_then_reads() {
    let server = StubServer::routes(&[
        ("PUT /api/v1/ip-envs/prod", 200, "{}"),
        ("GET /api/v1/ip-envs/prod", 200, PROD_ENVELOPE),
    ]);
    let provider = provider(&server);

    let prior = provider.read_ip_env("prod").unwrap();
    let plan = IpEnvPlan {
        env: prior.env.clone(),
        groups: prior.groups.clone(),
        cidrs: strings(&["10.0.0.0/8", "172.16.0.0/12"]),
    };
    provider.update_ip_env(&prior, &plan).unwrap();

    let requests = server.requests();
    let methods: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, ["GET", "PUT", "GET"]);
    assert_eq!(
        requests[1].json(),
        json!({"groupArr": ["g1"], "cidrArr": ["10.0.0.0/8", "172.16.0.0/12"]})
    );
}

#[test]
fn provider_data_sources() {
    let server = StubServer::routes(&[
        ("GET /api/v1/ping", 200, r#"{"message":"pong"}"#),
        ("GET /api/v1/ip-groups/g1", 200, ALL_ENVELOPE),
        ("GET /api/v1/ip-all", 200, ALL_ENVELOPE),
    ]);
    let provider = provider(&server);

    let ping = provider.read_ping().unwrap();
    assert_eq!(ping.message, "pong");
    assert!(ping.id.parse::<i64>().is_ok());

    let group = provider.read_ip_group("g1").unwrap();
    assert_eq!(group.id, "g1");
    assert_eq!(group.ip_infos.len(), 2);
    assert_eq!(group.ip_infos[1].last_modified, "2023-02-02T12:30:00Z");

    let all = provider.read_ip_all().unwrap();
    assert_eq!(all.id, "all");
    assert_eq!(all.ip_infos, group.ip_infos);
}

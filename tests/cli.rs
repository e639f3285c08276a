//! End-to-end runs of the `vault-k8s-auth-cp` binary.

use std::{
    path::Path,
    process::{Command, Output},
};

use serde_json::json;
use testresult::TestResult;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

const BIN: &str = env!("CARGO_BIN_EXE_vault-k8s-auth-cp");

const CLEARED_ENV: [&str; 10] = [
    "SOURCE_VAULT_ADDR",
    "SOURCE_VAULT_CACERT",
    "SOURCE_VAULT_TOKEN",
    "SOURCE_VAULT_NAMESPACE",
    "DESTINATION_VAULT_ADDR",
    "DESTINATION_VAULT_CACERT",
    "DESTINATION_VAULT_TOKEN",
    "DESTINATION_VAULT_NAMESPACE",
    "RUST_LOG",
    "LOG_FORMAT",
];

/// Runs the binary off the async runtime, from a directory without a `.env`.
async fn run(
    args: &[&str],
    env: &[(&str, String)],
) -> Result<Output, Box<dyn std::error::Error>> {
    let workdir = tempfile::tempdir()?;
    let args: Vec<String> = args.iter().map(ToString::to_string).collect();
    let env: Vec<(String, String)> = env
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect();

    let output = tokio::task::spawn_blocking(move || command(workdir.path(), &args, &env).output())
        .await??;

    Ok(output)
}

fn command(workdir: &Path, args: &[String], env: &[(String, String)]) -> Command {
    let mut command = Command::new(BIN);

    command.current_dir(workdir).args(args);

    for key in CLEARED_ENV {
        command.env_remove(key);
    }

    for (key, value) in env {
        command.env(key, value);
    }

    command
}

fn vault_env(source: &MockServer, destination: &MockServer) -> Vec<(&'static str, String)> {
    vec![
        ("SOURCE_VAULT_ADDR", source.uri()),
        ("SOURCE_VAULT_TOKEN", "s.source".to_string()),
        ("DESTINATION_VAULT_ADDR", destination.uri()),
        ("DESTINATION_VAULT_TOKEN", "s.destination".to_string()),
    ]
}

#[tokio::test]
async fn test_wrong_argument_count_prints_usage_and_exits_zero() -> TestResult {
    for args in [&[][..], &["kubernetes"][..], &["a", "b", "c"][..]] {
        let output = run(args, &[]).await?;

        // Conventional CLIs exit non-zero on misuse; this tool has always
        // exited 0 here and scripts may rely on it.
        assert_eq!(output.status.code(), Some(0), "args: {args:?}");
        assert_eq!(
            String::from_utf8(output.stdout)?,
            "usage: vault-k8s-auth-cp <source-k8s-auth-mount-path> <destination-k8s-auth-mount-path>\n"
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_bad_log_format_with_wrong_argument_count_prints_usage() -> TestResult {
    let output = run(&["kubernetes"], &[("LOG_FORMAT", "xml".to_string())]).await?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "usage: vault-k8s-auth-cp <source-k8s-auth-mount-path> <destination-k8s-auth-mount-path>\n"
    );

    Ok(())
}

#[tokio::test]
async fn test_bad_log_format_exits_one() -> TestResult {
    let output = run(&["kubernetes", "k8s-dr"], &[("LOG_FORMAT", "xml".to_string())]).await?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("unsupported log format `xml`"), "stderr: {stderr}");

    Ok(())
}

#[tokio::test]
async fn test_bad_rust_log_exits_one() -> TestResult {
    let output = run(
        &["kubernetes", "k8s-dr"],
        &[("RUST_LOG", "info,vault_k8s_auth_cp=loud".to_string())],
    )
    .await?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("invalid log level"), "stderr: {stderr}");

    Ok(())
}

#[tokio::test]
async fn test_log_level_flag_wins_over_rust_log() -> TestResult {
    let output = run(
        &["--log-level", "warn", "kubernetes", "k8s-dr"],
        &[
            ("RUST_LOG", "info,vault_k8s_auth_cp=loud".to_string()),
            ("SOURCE_VAULT_ADDR", "http://127.0.0.1:1".to_string()),
        ],
    )
    .await?;
    let stderr = String::from_utf8(output.stderr)?;

    // RUST_LOG alone would fail logging setup.
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("missing source vault token"), "stderr: {stderr}");

    Ok(())
}

#[tokio::test]
async fn test_missing_token_exits_one() -> TestResult {
    let output = run(
        &["kubernetes", "k8s-dr"],
        &[("SOURCE_VAULT_ADDR", "http://127.0.0.1:1".to_string())],
    )
    .await?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        String::from_utf8(output.stderr)?.contains("missing source vault token"),
        "diagnostic should name the missing setting"
    );

    Ok(())
}

#[tokio::test]
async fn test_copies_config_and_roles() -> TestResult {
    let source = MockServer::start().await;
    let destination = MockServer::start().await;

    let config = json!({ "kubernetes_host": "https://k8s:443" });
    let app_a = json!({
        "bound_service_account_names": ["app-a"],
        "bound_service_account_namespaces": ["apps"],
        "token_policies": ["app-a-read"],
    });
    let app_b = json!({
        "bound_service_account_names": ["app-b"],
        "bound_service_account_namespaces": ["apps"],
        "token_policies": ["app-b-write"],
    });

    Mock::given(method("GET"))
        .and(path("/v1/auth/kubernetes/config"))
        .and(header("X-Vault-Token", "s.source"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": config })))
        .expect(1)
        .mount(&source)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/kubernetes/role"))
        .and(query_param("list", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "data": { "keys": ["app-a", "app-b"] } })),
        )
        .expect(1)
        .mount(&source)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/kubernetes/role/app-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": app_a })))
        .expect(1)
        .mount(&source)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/kubernetes/role/app-b"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": app_b })))
        .expect(1)
        .mount(&source)
        .await;

    Mock::given(method("PUT"))
        .and(path("/v1/auth/k8s-dr/config"))
        .and(header("X-Vault-Token", "s.destination"))
        .and(body_json(config.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&destination)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/auth/k8s-dr/role/app-a"))
        .and(body_json(app_a.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&destination)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/auth/k8s-dr/role/app-b"))
        .and(body_json(app_b.clone()))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&destination)
        .await;

    let output = run(&["kubernetes", "k8s-dr/"], &vault_env(&source, &destination)).await?;

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty(), "stdout should stay empty on success");

    Ok(())
}

#[tokio::test]
async fn test_source_config_failure_exits_one_without_writes() -> TestResult {
    let source = MockServer::start().await;
    let destination = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/auth/kubernetes/config"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({ "errors": ["permission denied"] })),
        )
        .expect(1)
        .mount(&source)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/kubernetes/role"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&source)
        .await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&destination)
        .await;

    let output = run(&["kubernetes", "k8s-dr"], &vault_env(&source, &destination)).await?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr.contains("error reading k8s auth config from source vault"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("permission denied"), "stderr: {stderr}");

    Ok(())
}

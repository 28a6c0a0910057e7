//! CLI tests for `helmgen generate`.

mod common;

use assert_fs::prelude::*;
use common::{FULL_PAYLOAD, TestContext, read_yaml, yaml_at};
use predicates::prelude::*;

#[test]
fn generate_writes_values_and_templates() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", FULL_PAYLOAD);

    ctx.cli()
        .args(["generate"])
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Wrote values to"))
        .stdout(predicate::str::contains("✅ Wrote deployment manifest to"))
        .stderr(predicate::str::contains("monitoring"));

    let chart = ctx.chart_path();
    assert!(chart.join("values.yaml").exists());
    for name in ["deployment", "service", "ingress"] {
        assert!(chart.join("templates").join(format!("{name}.yaml")).exists(), "{name} missing");
    }
    assert!(!chart.join("templates/monitoring.yaml").exists());

    let deployment = read_yaml(&chart.join("templates/deployment.yaml"));
    assert_eq!(deployment["apiVersion"].as_str(), Some("apps/v1"));
    assert_eq!(deployment["kind"].as_str(), Some("Deployment"));
    assert_eq!(
        yaml_at(&deployment, "spec.replicas").as_str(),
        Some("{{.Values.deployment.spec.replicas}}")
    );
    let containers = yaml_at(&deployment, "spec.template.spec.containers");
    for container in containers.as_sequence().unwrap() {
        assert_eq!(
            container["image"].as_str(),
            Some("{{.Values.deployment.spec.template.spec.containers.image}}")
        );
    }
}

#[test]
fn values_file_matches_the_payload() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", FULL_PAYLOAD);

    ctx.cli().arg("generate").arg(&payload).assert().success();

    let values = read_yaml(&ctx.chart_path().join("values.yaml"));
    let expected: serde_yaml::Value = serde_json::from_str(FULL_PAYLOAD).unwrap();
    assert_eq!(values, expected);
    let raw = std::fs::read_to_string(ctx.chart_path().join("values.yaml")).unwrap();
    assert!(!raw.contains("{{.Values"), "values.yaml must not hold placeholders:\n{raw}");
}

#[test]
fn generate_reads_stdin() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "-"])
        .write_stdin(r#"{"service": {}}"#)
        .assert()
        .success();

    let service = read_yaml(&ctx.chart_path().join("templates/service.yaml"));
    assert_eq!(service["apiVersion"].as_str(), Some("v1"));
    assert_eq!(service["kind"].as_str(), Some("Service"));
    assert_eq!(service.as_mapping().unwrap().len(), 2);
}

#[test]
fn output_dir_flag_overrides_default() {
    let ctx = TestContext::new();
    let out = assert_fs::TempDir::new().unwrap();
    let payload = ctx.write_payload("config.json", r#"{"ingress": {"host": "a"}}"#);

    ctx.cli()
        .arg("generate")
        .arg(&payload)
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();

    out.child("values.yaml").assert(predicate::path::is_file());
    out.child("templates/ingress.yaml")
        .assert(predicate::str::contains("{{.Values.ingress.host}}"));
    assert!(!ctx.chart_path().exists());
}

#[test]
fn config_file_sets_output_dir() {
    let ctx = TestContext::new();
    ctx.write_file("helmgen.toml", "[output]\ndir = \"charts/app\"\n");
    let payload = ctx.write_payload("config.json", r#"{"deployment": {"replicas": 1}}"#);

    ctx.cli().arg("generate").arg(&payload).assert().success();

    assert!(ctx.work_dir().join("charts/app/templates/deployment.yaml").exists());
}

#[test]
fn dry_run_prints_without_writing() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", r#"{"Deployment": {"replicas": 1}}"#);

    ctx.cli()
        .args(["generate", "--dry-run"])
        .arg(&payload)
        .assert()
        .success()
        .stdout(predicate::str::contains("values.yaml"))
        .stdout(predicate::str::contains("templates/deployment.yaml"))
        .stdout(predicate::str::contains("{{.Values.Deployment.replicas}}"));

    assert!(!ctx.chart_path().exists());
}

#[test]
fn scalar_resource_fails_with_type_mismatch() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", r#"{"deployment": "not-an-object"}"#);

    ctx.cli()
        .arg("generate")
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Resource 'deployment' must be a JSON object"));

    assert!(!ctx.chart_path().exists());
}

#[test]
fn malformed_payload_fails_with_decode_error() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", "{not json");

    ctx.cli()
        .arg("generate")
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode configuration payload"));
}

#[test]
fn invalid_config_file_is_rejected() {
    let ctx = TestContext::new();
    ctx.write_file("helmgen.toml", "[server]\nport = 0\n");
    let payload = ctx.write_payload("config.json", "{}");

    ctx.cli()
        .arg("generate")
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("server.port must be greater than 0"));
}

#[test]
fn skipped_keys_are_logged_unless_quiet() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", r#"{"monitoring": {"enabled": true}}"#);

    ctx.cli()
        .arg("generate")
        .arg(&payload)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping top-level key"));

    ctx.cli()
        .args(["-q", "generate"])
        .arg(&payload)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping top-level key").not())
        .stderr(predicate::str::contains("Skipped keys with no known resource: monitoring"));
}

#[test]
fn verbose_flag_enables_info_logs() {
    let ctx = TestContext::new();
    let payload = ctx.write_payload("config.json", r#"{"service": {"port": 80}}"#);

    ctx.cli()
        .args(["-v", "generate"])
        .arg(&payload)
        .assert()
        .success()
        .stderr(predicate::str::contains("INFO"));
}

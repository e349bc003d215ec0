//! Configuration layering and validation tests.
//!
//! Every loader here skips the user config directory and uses an explicit
//! environment map and secrets, so the host environment cannot leak in.

use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;
use vasari::{
    ConfigLoader, ScheduleType, Secrets, Transport, VasariConfig, VasariErrorKind,
    build_sequencer,
};

fn secrets() -> Secrets {
    Secrets {
        api_key: Some("sk-test".to_string()),
        page_id: Some("page_1".to_string()),
        page_access_token: Some("page-token".to_string()),
    }
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

fn loader(file: &NamedTempFile) -> ConfigLoader {
    ConfigLoader::new()
        .without_user_dir()
        .environment(HashMap::new())
        .file(file.path())
}

fn load(contents: &str, secrets: Secrets) -> VasariConfig {
    let file = config_file(contents);
    loader(&file).secrets(secrets).load().expect("load config")
}

fn assert_config_error(config: &VasariConfig, needle: &str) {
    let err = config.validate().expect_err("validation should fail");
    assert!(
        matches!(err.kind(), VasariErrorKind::Config(_)),
        "expected config error, got {err}"
    );
    assert!(err.to_string().contains(needle), "{err} should mention {needle}");
}

#[test]
fn bundled_defaults_with_secrets_are_valid() {
    let config = load("", secrets());

    assert_eq!(*config.run().quota(), 20);
    assert_eq!(*config.run().phase_cap(), 9);
    assert_eq!(*config.run().recent_posts(), 3);
    assert_eq!(config.run().page_id(), "page_1");
    assert_eq!(config.generator().fallback_text(), "Thank you!");
    assert_eq!(config.generator().api_key().as_deref(), Some("sk-test"));
    assert_eq!(*config.platform().transport(), Transport::Graph);
    assert_eq!(config.platform().access_token().as_deref(), Some("page-token"));
    assert_eq!(*config.retry().max_retries(), 2);
    assert_eq!(config.server().trigger_path(), "/api/cron");
    assert!(config.schedule().is_none());
    config.validate().expect("defaults should validate");
}

#[test]
fn file_values_override_defaults() {
    let config = load(
        r#"
[run]
quota = 5
recent_posts = 2

[generator]
fallback_text = "Thanks for writing!"

[server]
trigger_path = "/hooks/run"
"#,
        secrets(),
    );

    assert_eq!(*config.run().quota(), 5);
    assert_eq!(*config.run().recent_posts(), 2);
    assert_eq!(*config.run().phase_cap(), 9);
    assert_eq!(config.generator().fallback_text(), "Thanks for writing!");
    assert_eq!(config.server().trigger_path(), "/hooks/run");
}

#[test]
fn environment_overrides_file() {
    let file = config_file("[run]\nquota = 5\n");
    let env = HashMap::from([
        ("VASARI_RUN__QUOTA".to_string(), "7".to_string()),
        ("VASARI_PLATFORM__TRANSPORT".to_string(), "dry_run".to_string()),
        ("UNRELATED".to_string(), "ignored".to_string()),
    ]);

    let config = ConfigLoader::new()
        .without_user_dir()
        .environment(env)
        .file(file.path())
        .secrets(secrets())
        .load()
        .expect("load config");

    assert_eq!(*config.run().quota(), 7);
    assert_eq!(*config.platform().transport(), Transport::DryRun);
}

#[test]
fn disabled_environment_is_ignored() {
    let file = config_file("");
    let config = ConfigLoader::new()
        .without_user_dir()
        .without_environment()
        .file(file.path())
        .secrets(secrets())
        .load()
        .expect("load config");

    assert_eq!(*config.run().quota(), 20);
}

#[test]
fn secrets_override_file_values() {
    let config = load(
        "[run]\npage_id = \"from_file\"\n[generator]\napi_key = \"file-key\"\n",
        secrets(),
    );

    assert_eq!(config.run().page_id(), "page_1");
    assert_eq!(config.generator().api_key().as_deref(), Some("sk-test"));
}

#[test]
fn unset_secrets_keep_file_values() {
    let config = load("[run]\npage_id = \"from_file\"\n", Secrets::default());

    assert_eq!(config.run().page_id(), "from_file");
    assert!(config.generator().api_key().is_none());
}

#[test]
fn missing_explicit_file_is_an_error() {
    let err = ConfigLoader::new()
        .without_user_dir()
        .environment(HashMap::new())
        .file("/nonexistent/vasari.toml")
        .secrets(secrets())
        .load()
        .expect_err("missing file should fail");

    assert!(matches!(err.kind(), VasariErrorKind::Config(_)));
}

#[test]
fn wrongly_typed_value_is_an_error() {
    let file = config_file("[run]\nquota = \"lots\"\n");
    let result = loader(&file).secrets(secrets()).load();

    assert!(result.is_err());
}

#[test]
fn validation_rejects_zero_quota() {
    assert_config_error(&load("[run]\nquota = 0\n", secrets()), "quota");
}

#[test]
fn validation_rejects_zero_phase_cap() {
    assert_config_error(&load("[run]\nphase_cap = 0\n", secrets()), "phase_cap");
}

#[test]
fn validation_rejects_missing_page_id() {
    let secrets = Secrets {
        page_id: None,
        ..secrets()
    };
    assert_config_error(&load("", secrets), "PAGE_ID");
}

#[test]
fn validation_rejects_missing_api_key() {
    let secrets = Secrets {
        api_key: None,
        ..secrets()
    };
    assert_config_error(&load("", secrets), "API_KEY");
}

#[test]
fn validation_rejects_empty_post_prompt() {
    assert_config_error(&load("[run]\npost_prompt = \"\"\n", secrets()), "post_prompt");
}

#[test]
fn validation_rejects_empty_fallback() {
    assert_config_error(
        &load("[generator]\nfallback_text = \"  \"\n", secrets()),
        "fallback_text",
    );
}

#[test]
fn graph_transport_requires_token() {
    let secrets = Secrets {
        page_access_token: None,
        ..secrets()
    };
    let config = load("", secrets);

    assert_config_error(&config, "PAGE_ACCESS_TOKEN");
    assert!(build_sequencer(&config).is_err());
}

#[test]
fn dry_run_needs_no_token() {
    let secrets = Secrets {
        page_access_token: None,
        ..secrets()
    };
    let config = load("", secrets).into_dry_run();

    assert_eq!(*config.platform().transport(), Transport::DryRun);
    config.validate().expect("dry run should validate");
    let sequencer = build_sequencer(&config).expect("build dry run sequencer");
    assert_eq!(sequencer.gateway().transport_name(), "dry_run");
}

#[test]
fn validation_rejects_relative_trigger_path() {
    assert_config_error(
        &load("[server]\ntrigger_path = \"api/cron\"\n", secrets()),
        "trigger_path",
    );
}

#[test]
fn schedule_section_is_parsed() {
    let config = load(
        "[schedule]\ntype = \"Interval\"\nseconds = 3600\n",
        secrets(),
    );

    assert_eq!(
        config.schedule(),
        &Some(ScheduleType::Interval { seconds: 3600 })
    );
    config.validate().expect("interval schedule should validate");
}

#[test]
fn invalid_schedule_fails_validation() {
    let config = load("[schedule]\ntype = \"Interval\"\nseconds = 0\n", secrets());

    let err = config.validate().expect_err("zero interval should fail");
    assert!(matches!(err.kind(), VasariErrorKind::Server(_)));
}

#[test]
fn redacted_toml_omits_secrets() {
    let config = load("", secrets());
    let rendered = config.to_redacted_toml().expect("render config");

    assert!(rendered.contains("quota = 20"));
    assert!(rendered.contains("page_1"));
    assert!(!rendered.contains("sk-test"));
    assert!(!rendered.contains("page-token"));
}

#[test]
fn secrets_debug_hides_values() {
    let rendered = format!("{:?}", secrets());

    assert!(rendered.contains("[SET]"));
    assert!(!rendered.contains("sk-test"));
    assert!(!rendered.contains("page-token"));
}

use rdk_core::config::{Config, LogFormat, PROJECT_CONFIG_FILE};

#[test]
fn default_config() {
    let cfg = Config::default();
    assert_eq!(cfg.general.log_level, "warn");
    assert_eq!(cfg.general.log_format, LogFormat::Human);
    assert_eq!(cfg.files.context, "project-context.md");
    assert_eq!(cfg.files.state, "development-state.md");
    assert_eq!(cfg.files.prompt, "prompt-template.md");
    assert_eq!(cfg.prompt.completed_limit, 3);
    assert_eq!(cfg.prompt.next_limit, 3);
    assert_eq!(cfg.prompt.decisions_limit, 2);
    cfg.validate().expect("defaults validate");
}

#[test]
fn config_roundtrip() {
    let cfg = Config::default();
    let toml_str = cfg.to_toml().expect("serialize to toml");
    assert!(toml_str.contains("development-state.md"));

    let parsed: Config = toml::from_str(&toml_str).expect("parse toml back");
    assert_eq!(parsed.files.state, cfg.files.state);
    assert_eq!(parsed.prompt.next_limit, cfg.prompt.next_limit);
    parsed.validate().expect("config validates");
}

#[test]
fn config_partial_toml() {
    let partial = r#"
[general]
log_format = "json"

[prompt]
completed_limit = 5
"#;
    let cfg: Config = toml::from_str(partial).expect("parse partial");
    assert_eq!(cfg.general.log_format, LogFormat::Json);
    assert_eq!(cfg.prompt.completed_limit, 5);
    // defaults should fill in the rest
    assert_eq!(cfg.general.log_level, "warn");
    assert_eq!(cfg.prompt.decisions_limit, 2);
    assert_eq!(cfg.files.prompt, "prompt-template.md");
    cfg.validate().expect("config validates");
}

#[test]
fn resolve_prefers_project_file() {
    let project = tempfile::tempdir().unwrap();
    let user = tempfile::tempdir().unwrap();
    let user_path = user.path().join("config.toml");
    std::fs::write(&user_path, "[files]\nprompt = \"user-prompt.md\"\n").unwrap();

    let cfg = Config::resolve(project.path(), Some(&user_path)).unwrap();
    assert_eq!(cfg.files.prompt, "user-prompt.md");

    std::fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[files]\nprompt = \"next-prompt.md\"\n",
    )
    .unwrap();
    let cfg = Config::resolve(project.path(), Some(&user_path)).unwrap();
    assert_eq!(cfg.files.prompt, "next-prompt.md");
}

#[test]
fn resolve_without_files_uses_defaults() {
    let project = tempfile::tempdir().unwrap();
    let cfg = Config::resolve(project.path(), None).unwrap();
    assert_eq!(cfg.files.context, "project-context.md");
}

#[test]
fn invalid_project_file_is_rejected() {
    let project = tempfile::tempdir().unwrap();
    std::fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[prompt]\ndecisions_limit = 0\n",
    )
    .unwrap();
    let err = Config::resolve(project.path(), None).expect_err("validation should fail");
    assert!(err.to_string().contains("decisions_limit"));
}

#[test]
fn load_from_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from(dir.path().join("nope.toml")).expect_err("missing file");
    assert!(err.to_string().starts_with("io:"));
}

#[test]
fn padded_file_name_in_project_file_is_rejected() {
    let project = tempfile::tempdir().unwrap();
    std::fs::write(
        project.path().join(PROJECT_CONFIG_FILE),
        "[files]\ncontext = \" project-context.md\"\n",
    )
    .unwrap();
    let err = Config::resolve(project.path(), None).expect_err("validation should fail");
    assert!(err.to_string().contains("files.context"));
}

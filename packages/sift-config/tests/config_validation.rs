use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use sift_config::{Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &str, key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root
		.as_table_mut()
		.expect("Template config must be a table.")
		.get_mut(section)
		.and_then(Value::as_table_mut)
		.unwrap_or_else(|| panic!("Template config must include [{section}]."));

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("sift_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> sift_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = sift_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string()).expect("Sample config must be valid.")
}

#[test]
fn sample_config_loads_and_normalizes() {
	let cfg = base_config();

	assert_eq!(cfg.backend.api_base, "http://127.0.0.1:8080");
	assert!(cfg.backend.api_key.is_none(), "Blank api_key must normalize to None.");
	assert_eq!(cfg.paging.page_size, 50);
	assert_eq!(cfg.debounce.query_ms, 500);
	assert_eq!(cfg.search.wildcard, "*");
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let payload = r#"
[service]
log_level = "debug"

[backend]
api_base = "http://localhost:9000"
"#;
	let cfg = load_payload(payload.to_string()).expect("Minimal config must be valid.");

	assert_eq!(cfg.backend.timeout_ms, 60_000);
	assert_eq!(cfg.backend.search_path, "/v1/search");
	assert_eq!(cfg.paging.page_size, 50);
	assert_eq!(cfg.paging.min_results, 20);
	assert_eq!(cfg.paging.auto_continue_delay_ms, 100);
	assert_eq!(cfg.debounce.hybrid_weight_ms, 300);
	assert_eq!(cfg.debounce.max_distance_ms, 300);
	assert_eq!(cfg.search.mode, "cursor");
	assert_eq!(cfg.similar.description_field, "description");
}

#[test]
fn missing_file_reports_read_error() {
	let err = sift_config::load(&env::temp_dir().join("sift_config_does_not_exist.toml"))
		.expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }));
}

#[test]
fn malformed_file_reports_parse_error() {
	let err = load_payload("[service\nlog_level = 1".to_string()).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }));
}

#[test]
fn mode_literal_is_normalized_then_checked() {
	let cfg = load_payload(sample_toml_with("search", "mode", Value::String(" Legacy ".into())))
		.expect("Mixed-case mode must be accepted.");

	assert_eq!(cfg.search.mode, "legacy");

	let err = load_payload(sample_toml_with("search", "mode", Value::String("offset".into())))
		.expect_err("Expected unknown mode error.");

	match err {
		Error::UnknownLiteral { key, value, .. } => {
			assert_eq!(key, "search.mode");
			assert_eq!(value, "offset");
		},
		other => panic!("Unexpected error: {other:?}"),
	}
}

#[test]
fn strategy_literal_must_be_known() {
	let err = load_payload(sample_toml_with(
		"search",
		"max_distance_strategy",
		Value::String("nearest".into()),
	))
	.expect_err("Expected unknown strategy error.");

	assert!(matches!(err, Error::UnknownLiteral { key: "search.max_distance_strategy", .. }));
}

#[test]
fn page_size_must_be_positive() {
	let err = load_payload(sample_toml_with("paging", "page_size", Value::Integer(0)))
		.expect_err("Expected page_size validation error.");

	assert!(err.to_string().contains("paging.page_size must be greater than zero."));
}

#[test]
fn timeout_must_be_positive() {
	let mut cfg = base_config();

	cfg.backend.timeout_ms = 0;

	let err = sift_config::validate(&cfg).expect_err("Expected timeout validation error.");

	assert!(err.to_string().contains("backend.timeout_ms"));
}

#[test]
fn weights_must_stay_in_unit_range() {
	let mut cfg = base_config();

	cfg.search.hybrid_weight = 1.5;

	let err = sift_config::validate(&cfg).expect_err("Expected hybrid_weight range error.");

	assert!(err.to_string().contains("search.hybrid_weight must be in the range 0.0-1.0."));

	cfg.search.hybrid_weight = 0.5;
	cfg.search.max_distance = f32::NAN;

	let err = sift_config::validate(&cfg).expect_err("Expected max_distance finite error.");

	assert!(err.to_string().contains("search.max_distance must be a finite number."));
}

#[test]
fn paths_must_be_rooted() {
	let mut cfg = base_config();

	cfg.backend.lookup_path = "v1/items".to_string();

	let err = sift_config::validate(&cfg).expect_err("Expected lookup_path validation error.");

	assert!(err.to_string().contains("backend.lookup_path must start with '/'."));
}

#[test]
fn header_values_must_be_strings() {
	let mut cfg = base_config();

	cfg.backend.default_headers.insert("x-retries".to_string(), serde_json::json!(3));

	let err = sift_config::validate(&cfg).expect_err("Expected header validation error.");

	assert!(err.to_string().contains("backend.default_headers.x-retries must be a string."));
}

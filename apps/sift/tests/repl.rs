use uuid::Uuid;

use sift::{
	Error,
	render::{Renderer, status_line},
	repl::{self, Input},
};
use sift_domain::{BackendMode, DistanceStrategy, ResultItem, SearchParameters};
use sift_engine::SessionSnapshot;

fn parse(line: &str) -> Input {
	repl::parse_line(line).expect("Failed to parse line.").expect("Line must not be blank.")
}

fn snapshot(session_id: Uuid, ids: &[&str]) -> SessionSnapshot {
	SessionSnapshot {
		session_id,
		results: ids
			.iter()
			.map(|id| ResultItem::new(*id, 0.5, serde_json::json!({ "title": format!("T {id}") })))
			.collect(),
		loading: false,
		loading_more: false,
		has_more: true,
		total_hits_estimate: 120,
		backend_offline: false,
		page: 1,
		parameters: SearchParameters { query: "rain".to_string(), ..Default::default() },
	}
}

#[test]
fn plain_text_is_a_query() {
	assert_eq!(parse("  sea ice extent "), Input::Query("sea ice extent".to_string()));
	assert!(repl::parse_line("   ").expect("Blank line must parse.").is_none());
}

#[test]
fn commands_parse_their_arguments() {
	assert_eq!(parse(":more"), Input::More);
	assert_eq!(parse(":mode Legacy"), Input::Mode(BackendMode::Legacy));
	assert_eq!(parse(":strategy both"), Input::Strategy(DistanceStrategy::Both));
	assert_eq!(parse(":weight 0.25"), Input::Weight(0.25));
	assert_eq!(parse(":similar 3"), Input::Similar(3));
	assert_eq!(parse(":category"), Input::Category(None));
	assert_eq!(parse(":category ocean"), Input::Category(Some("ocean".to_string())));

	match parse(":filter region arctic, antarctic") {
		Input::Filter { category, values } => {
			assert_eq!(category, "region");
			assert_eq!(values.into_iter().collect::<Vec<_>>(), vec!["antarctic", "arctic"]);
		},
		other => panic!("Unexpected input: {other:?}"),
	}
}

#[test]
fn bad_commands_are_rejected() {
	assert!(matches!(repl::parse_line(":zoom"), Err(Error::UnknownCommand { .. })));
	assert!(matches!(repl::parse_line(":weight 2"), Err(Error::InvalidArgument { .. })));
	assert!(matches!(repl::parse_line(":similar 0"), Err(Error::InvalidArgument { .. })));
	assert!(matches!(repl::parse_line(":mode offset"), Err(Error::Domain(_))));
}

#[test]
fn renderer_prints_each_result_once_per_session() {
	let mut renderer = Renderer::default();
	let session = Uuid::new_v4();
	let first = renderer.render(&snapshot(session, &["a", "b"]));

	assert_eq!(first.len(), 3);
	assert!(first[0].contains("1. a"));
	assert!(first[1].contains("T b"));

	let appended = renderer.render(&snapshot(session, &["a", "b", "c"]));

	assert_eq!(appended.len(), 2);
	assert!(appended[0].contains("3. c"));

	let reset = renderer.render(&snapshot(Uuid::new_v4(), &["z"]));

	assert!(reset[0].contains("1. z"));
}

#[test]
fn status_line_reports_offline_backend() {
	let mut offline = snapshot(Uuid::new_v4(), &["a"]);

	offline.backend_offline = true;

	let line = status_line(&offline);

	assert!(line.contains("backend offline"));
	assert!(line.contains("1 of ~120 results"));
}

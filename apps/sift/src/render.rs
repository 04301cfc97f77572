use serde_json::Value;
use uuid::Uuid;

use sift_engine::SessionSnapshot;

const TITLE_FIELDS: [&str; 3] = ["title", "name", "description"];
const TITLE_WIDTH: usize = 72;

/// Turns successive snapshots into terminal lines, printing each result once per session.
#[derive(Debug, Default)]
pub struct Renderer {
	session_id: Option<Uuid>,
	printed: usize,
	status: String,
}
impl Renderer {
	pub fn render(&mut self, snapshot: &SessionSnapshot) -> Vec<String> {
		let mut lines = Vec::new();

		if self.session_id != Some(snapshot.session_id) || snapshot.results.len() < self.printed {
			self.session_id = Some(snapshot.session_id);
			self.printed = 0;
		}

		for (index, item) in snapshot.results.iter().enumerate().skip(self.printed) {
			lines.push(format!(
				"{:>4}. {}  [{:.3}]  {}",
				index + 1,
				item.id,
				item.score,
				title(&item.payload)
			));
		}

		self.printed = snapshot.results.len();

		let status = status_line(snapshot);

		if status != self.status {
			lines.push(status.clone());
			self.status = status;
		}

		lines
	}
}

pub fn status_line(snapshot: &SessionSnapshot) -> String {
	let state = if snapshot.backend_offline {
		"backend offline, :retry to try again"
	} else if snapshot.loading {
		"searching"
	} else if snapshot.loading_more {
		"loading more"
	} else if snapshot.has_more {
		":more for more"
	} else {
		"end of results"
	};
	let query = if snapshot.parameters.query.trim().is_empty() {
		"*"
	} else {
		snapshot.parameters.query.as_str()
	};

	format!(
		"-- {query:?} ({}): {} of ~{} results, page {}, {state} --",
		snapshot.parameters.mode,
		snapshot.results.len(),
		snapshot.total_hits_estimate,
		snapshot.page
	)
}

fn title(payload: &Value) -> String {
	let text = TITLE_FIELDS
		.iter()
		.find_map(|field| payload.get(field).and_then(Value::as_str))
		.unwrap_or("");
	let mut title: String = text.chars().take(TITLE_WIDTH).collect();

	if text.chars().count() > TITLE_WIDTH {
		title.push_str("...");
	}

	title
}

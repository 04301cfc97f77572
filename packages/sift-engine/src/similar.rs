use crate::{Error, ItemLookup, Result, SessionController, controller::Command};
use sift_domain::ResultItem;

impl SessionController {
	/// Switches the session to items similar to `anchor`.
	///
	/// The anchor's description becomes the query and the anchor itself is excluded from the
	/// first page. If no description can be found the session is left untouched.
	pub async fn find_similar(&self, anchor: &ResultItem) -> Result<()> {
		let description =
			match resolve_description(self.lookup.as_ref(), &self.description_field, anchor).await {
				Ok(description) => description,
				Err(err) => {
					tracing::warn!(
						error = %err,
						anchor_id = %anchor.id,
						"Failed to resolve anchor description. Similar search skipped."
					);

					return Err(err);
				},
			};

		self.send(Command::Similar { query: description, anchor_id: anchor.id.clone() })
	}
}

/// Reads `field` from the anchor, falling back to a lookup of the full item.
pub async fn resolve_description(
	lookup: &dyn ItemLookup,
	field: &str,
	anchor: &ResultItem,
) -> Result<String> {
	if let Some(description) = anchor.description(field) {
		return Ok(description.to_string());
	}

	tracing::debug!(anchor_id = %anchor.id, "Anchor has no description. Looking it up.");

	let item = lookup
		.lookup_by_id(&anchor.id)
		.await
		.map_err(|err| Error::Lookup { message: err.to_string() })?;

	item.description(field)
		.map(str::to_string)
		.ok_or_else(|| Error::MissingDescription { id: anchor.id.clone() })
}

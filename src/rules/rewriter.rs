use crate::rules::evaluator::QueryFilter;
use std::collections::HashMap;
use url::{Url, form_urlencoded};

/// Decode the URL's query into ordered key/value pairs.
///
/// Segments without `=` (`?amp&id=2`) carry no key and are dropped.
pub fn query_pairs(url: &Url) -> Vec<(String, String)> {
	let Some(query) = url.query() else {
		return Vec::new();
	};

	query
		.split('&')
		.filter(|segment| segment.contains('='))
		.flat_map(|segment| form_urlencoded::parse(segment.as_bytes()).into_owned())
		.collect()
}

/// Decide whether a query key survives the filters.
///
/// Keys are included by default; every matching filter overrides the
/// decision, so the last match wins.
pub fn is_key_included(key: &str, filters: &[QueryFilter]) -> bool {
	filters
		.iter()
		.filter(|filter| filter.pattern.is_match(key))
		.fold(true, |_, filter| filter.include)
}

/// Keep the query pairs whose keys survive the filters.
///
/// Each distinct key is decided once; retained pairs keep their original
/// order and duplicates.
pub fn filter_query(pairs: &[(String, String)], filters: &[QueryFilter]) -> Vec<(String, String)> {
	let mut decisions: HashMap<&str, bool> = HashMap::new();
	for (key, _) in pairs {
		decisions
			.entry(key.as_str())
			.or_insert_with(|| is_key_included(key, filters));
	}

	pairs
		.iter()
		.filter(|(key, _)| decisions[key.as_str()])
		.inspect(|(key, _)| tracing::trace!(key, "keeping query parameter"))
		.cloned()
		.collect()
}

/// Rebuild `url` with the given query pairs.
///
/// Scheme, host and path are kept as parsed. Port, user info and fragment
/// are dropped, and the query is re-encoded (omitted entirely when empty).
pub fn rebuild_url(url: &Url, pairs: &[(String, String)]) -> String {
	let mut rebuilt = url.clone();
	rebuilt.set_fragment(None);
	// These fail only for URLs that cannot carry them, which have none.
	let _ = rebuilt.set_port(None);
	let _ = rebuilt.set_username("");
	let _ = rebuilt.set_password(None);

	if pairs.is_empty() {
		rebuilt.set_query(None);
	} else {
		rebuilt.query_pairs_mut().clear().extend_pairs(pairs);
	}

	rebuilt.to_string()
}

//! Resource URI construction for an application identity.

// self
use crate::{_prelude::*, config::AppKey, error::ConfigError};

/// Empty segment list for resource paths without trailing segments.
pub const NO_SEGMENTS: &[&str] = &[];

/// Builds `{domain}/{org}/{app}/{resource}[/{segments}][?{query}]` URIs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
	base: Url,
}
impl Endpoint {
	/// Creates a resolver rooted at `{domain}/{org}/{app}`.
	pub fn new(domain: &Url, app_key: &AppKey) -> Result<Self, ConfigError> {
		let mut base = domain.clone();

		base.path_segments_mut()
			.map_err(|_| ConfigError::InvalidDomain { domain: domain.to_string() })?
			.pop_if_empty()
			.push(app_key.org_name())
			.push(app_key.app_name());

		Ok(Self { base })
	}

	/// Application root, `{domain}/{org}/{app}`.
	pub fn base(&self) -> &Url {
		&self.base
	}

	/// Resolves a resource path.
	///
	/// Segments keep the caller's order and are percent-encoded individually. Query pairs are
	/// encoded in key order; an empty map produces no `?`.
	pub fn build_path<S>(
		&self,
		resource: &str,
		segments: &[S],
		query: &BTreeMap<String, String>,
	) -> Url
	where
		S: AsRef<str>,
	{
		let mut url = self.base.clone();

		if let Ok(mut path) = url.path_segments_mut() {
			path.push(resource);
			path.extend(segments.iter().map(AsRef::as_ref));
		}
		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query.iter());
		}

		url
	}

	/// Shorthand for a resource path without query parameters.
	pub fn path<S>(&self, resource: &str, segments: &[S]) -> Url
	where
		S: AsRef<str>,
	{
		self.build_path(resource, segments, &BTreeMap::new())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn endpoint(domain: &str) -> Endpoint {
		let domain = Url::parse(domain).expect("Fixture domain should parse.");
		let key = AppKey::parse("acme#chat").expect("Fixture app key should parse.");

		Endpoint::new(&domain, &key).expect("Fixture endpoint should build.")
	}

	#[test]
	fn build_path_without_segments_or_query() {
		let url = endpoint("https://a1.easemob.com").path("users", NO_SEGMENTS);

		assert_eq!(url.as_str(), "https://a1.easemob.com/acme/chat/users");
	}

	#[test]
	fn build_path_preserves_segment_order() {
		let endpoint = endpoint("https://a1.easemob.com");

		assert_eq!(
			endpoint.path("chatgroups", &["g1", "users", "u1"]).as_str(),
			"https://a1.easemob.com/acme/chat/chatgroups/g1/users/u1"
		);
		assert_eq!(
			endpoint.path("chatmessages", &["2024010112"]).as_str(),
			"https://a1.easemob.com/acme/chat/chatmessages/2024010112"
		);
	}

	#[test]
	fn build_path_sorts_query_keys() {
		let query = BTreeMap::from([
			("limit".to_owned(), "10".to_owned()),
			("cursor".to_owned(), "a b".to_owned()),
		]);
		let url = endpoint("https://a1.easemob.com").build_path("users", NO_SEGMENTS, &query);

		assert_eq!(url.as_str(), "https://a1.easemob.com/acme/chat/users?cursor=a+b&limit=10");
	}

	#[test]
	fn build_path_keeps_domain_prefix() {
		let url = endpoint("http://127.0.0.1:9000/proxy/").path("token", NO_SEGMENTS);

		assert_eq!(url.as_str(), "http://127.0.0.1:9000/proxy/acme/chat/token");
	}

	#[test]
	fn build_path_encodes_segments() {
		let url = endpoint("https://a1.easemob.com").path("users", &["a/b"]);

		assert_eq!(url.as_str(), "https://a1.easemob.com/acme/chat/users/a%2Fb");
	}
}

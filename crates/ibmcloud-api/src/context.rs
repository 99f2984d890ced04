//! Per-client request context: auth headers, API versioning and resolver policy.
//!
//! Built once and passed into the client; nothing here is global.

use ibmcloud_core::AmbiguityPolicy;
use reqwest::header::HeaderMap;
use url::form_urlencoded;

pub const DEFAULT_VERSION: &str = "2024-04-30";
pub const DEFAULT_GENERATION: &str = "2";

#[derive(Debug, Clone)]
pub struct Context {
    version: String,
    generation: String,
    headers: HeaderMap,
    ambiguity: AmbiguityPolicy,
}

impl Context {
    pub fn new(version: impl Into<String>, generation: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            version: version.into(),
            generation: generation.into(),
            headers,
            ambiguity: AmbiguityPolicy::default(),
        }
    }

    /// Context with default versioning parameters
    pub fn with_headers(headers: HeaderMap) -> Self {
        Self::new(DEFAULT_VERSION, DEFAULT_GENERATION, headers)
    }

    pub fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn generation(&self) -> &str {
        &self.generation
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn ambiguity(&self) -> AmbiguityPolicy {
        self.ambiguity
    }

    /// VPC path with `version` and `generation` appended after `query`
    pub fn iaas_path(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in query {
            serializer.append_pair(key, value);
        }
        serializer.append_pair("version", &self.version);
        serializer.append_pair("generation", &self.generation);

        format!("{}?{}", path, serializer.finish())
    }

    /// Resource Controller path; it takes no versioning parameters
    pub fn controller_path(&self, path: &str, query: &[(&str, &str)]) -> String {
        if query.is_empty() {
            return path.to_string();
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in query {
            serializer.append_pair(key, value);
        }

        format!("{}?{}", path, serializer.finish())
    }
}

/// Percent-encode one path segment (ids may be CRNs containing `/` and `:`)
pub fn encode_segment(segment: &str) -> String {
    urlencoding::encode(segment).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iaas_path_versioning() {
        let context = Context::new("2024-01-01", "2", HeaderMap::new());

        assert_eq!(
            context.iaas_path("/v1/vpcs", &[]),
            "/v1/vpcs?version=2024-01-01&generation=2"
        );
        assert_eq!(
            context.iaas_path("/v1/subnets", &[("name", "a b")]),
            "/v1/subnets?name=a+b&version=2024-01-01&generation=2"
        );
    }

    #[test]
    fn test_controller_path() {
        let context = Context::with_headers(HeaderMap::new());

        assert_eq!(context.controller_path("/v2/resource_groups", &[]), "/v2/resource_groups");
        assert_eq!(
            context.controller_path("/v2/resource_instances", &[("name", "my dns")]),
            "/v2/resource_instances?name=my+dns"
        );
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("r006-abc"), "r006-abc");
        assert_eq!(encode_segment("crn:v1:a/b"), "crn%3Av1%3Aa%2Fb");
        assert_eq!(encode_segment("bx2 2x8"), "bx2%202x8");
        assert_eq!(encode_segment("a+b~c"), "a%2Bb~c");
    }
}

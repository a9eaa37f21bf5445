use url::Url;

use crate::error::HostFilterError;

/// Leading labels that mark the mobile or "world wide web" flavour of a site.
const COMMON_PREFIXES: [&str; 3] = ["www.", "mobile.", "m."];

/// Strip a single common prefix (`www.`, `mobile.`, `m.`) from `host`.
#[must_use]
pub fn host_without_common_prefixes(host: &str) -> &str {
    COMMON_PREFIXES
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(host)
}

fn normalized_host(input: &str) -> Option<String> {
    let url = Url::parse(input).ok()?;
    let host = url.host_str()?.to_ascii_lowercase();
    Some(host_without_common_prefixes(&host).to_string())
}

/// Restricts suggestions to destinations on a single site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFilter {
    url: Url,
    host: String,
}

impl HostFilter {
    /// Parse `input` as an absolute URL and remember its normalised host.
    pub fn parse(input: &str) -> Result<Self, HostFilterError> {
        let url = Url::parse(input).map_err(|source| HostFilterError::InvalidUrl {
            input: input.to_string(),
            source,
        })?;
        let host = normalized_host(url.as_str()).ok_or_else(|| HostFilterError::MissingHost {
            input: input.to_string(),
        })?;
        Ok(Self { url, host })
    }

    /// URL the filter was built from.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Host compared against candidates, without its mobile prefix.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Whether `candidate` lives on the filtered site.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        normalized_host(candidate).is_some_and(|host| host == self.host)
    }
}

impl std::fmt::Display for HostFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.url.as_str())
    }
}

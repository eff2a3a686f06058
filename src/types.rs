use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::matcher::RangeRule;

/// View modes that never trigger the gate. These render only metadata, not
/// full content, so restricted objects stay discoverable in listings and
/// search results.
pub const EXEMPT_VIEW_MODES: [&str; 6] = [
    "collection",
    "metadata_only",
    "newspaper",
    "search_index",
    "search_result",
    "teaser",
];

/// Convert a dotted-decimal IPv4 string to its 32-bit numeric form.
///
/// Strict: exactly four octets in 0-255 separated by three dots. Anything
/// else is `None` — including the empty string, which is how a trailing
/// colon in a range line (`"1.2.3.4:"`) ends up as an interval that can
/// never match. A `None` bound is "no value", not a sentinel that could
/// accidentally compare as a real address.
pub fn parse_ipv4(s: &str) -> Option<u32> {
    s.parse::<Ipv4Addr>().ok().map(u32::from)
}

/// Client address probe for matching.
///
/// Holds the raw textual form alongside its numeric form, computed once per
/// evaluation. Single-address rules compare against the text, interval rules
/// against the number.
#[derive(Debug, Clone)]
pub struct ClientAddr<'a> {
    text: &'a str,
    numeric: Option<u32>,
}

impl<'a> ClientAddr<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            numeric: parse_ipv4(text),
        }
    }

    /// The client IP exactly as supplied by the request layer.
    pub fn text(&self) -> &str {
        self.text
    }

    /// Numeric form, if the text is a valid dotted-decimal address.
    pub fn numeric(&self) -> Option<u32> {
        self.numeric
    }
}

/// An ordered, immutable set of range rules produced by the parser.
///
/// Order follows the configuration text; matching is existential, so order
/// only affects which rule short-circuits first.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<RangeRule>,
}

impl RuleSet {
    pub(crate) fn new(rules: Vec<RangeRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RangeRule> {
        self.rules.iter()
    }
}

/// Configuration of the restriction condition, as stored by the CMS.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionConfig {
    /// Reference URI that marks a taxonomy term as "access restricted".
    pub target_uri: String,
    /// Roles that may view restricted content regardless of IP.
    #[serde(default)]
    pub allowed_roles: Vec<String>,
    /// Operator-entered range specification, one range or address per line.
    #[serde(default)]
    pub ranges_text: String,
    /// When set, every evaluation emits a log record.
    #[serde(default)]
    pub log_requests: bool,
}

/// Read-only projection of a CMS content entity, as far as gating cares.
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Entity bundle (content type) name.
    pub bundle: String,
    /// Values of the access-restriction field: taxonomy term ids.
    /// `None` means the entity has no such field at all.
    pub access_terms: Option<Vec<String>>,
}

impl ContentItem {
    pub fn new(bundle: impl Into<String>, access_terms: Option<Vec<String>>) -> Self {
        Self {
            bundle: bundle.into(),
            access_terms,
        }
    }
}

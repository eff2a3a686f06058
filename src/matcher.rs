//! Rule matchers.
//!
//! Two rule shapes exist: a single address, matched by exact string equality
//! against the client IP text, and a low:high interval, matched numerically.
//! The asymmetry is deliberate and observable (a client address with
//! non-canonical formatting that is numerically equal to a single-address
//! rule does not match it), so it must not be normalized away.

use crate::types::{parse_ipv4, ClientAddr};

/// Trait for client address matchers
pub trait ClientMatcher: Send + Sync {
    /// Check if the client address matches this matcher
    fn matches(&self, client: &ClientAddr<'_>) -> bool;
}

/// Single-address matcher - compares the client IP text verbatim
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleMatcher {
    text: String,
    addr: Option<u32>,
}

impl SingleMatcher {
    /// `text` is the whitespace-stripped line from the configuration.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let addr = parse_ipv4(&text);
        Self { text, addr }
    }

    /// The original textual form the rule was written with.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Numeric form of the address, if it parses. Diagnostics only; matching
    /// is textual.
    pub fn addr(&self) -> Option<u32> {
        self.addr
    }
}

impl ClientMatcher for SingleMatcher {
    fn matches(&self, client: &ClientAddr<'_>) -> bool {
        client.text() == self.text
    }
}

/// Interval matcher - matches client addresses within a numeric low..=high range
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalMatcher {
    low: Option<u32>,
    high: Option<u32>,
}

impl IntervalMatcher {
    pub fn new(low: &str, high: &str) -> Self {
        Self {
            low: parse_ipv4(low),
            high: parse_ipv4(high),
        }
    }

    pub fn low(&self) -> Option<u32> {
        self.low
    }

    pub fn high(&self) -> Option<u32> {
        self.high
    }
}

impl ClientMatcher for IntervalMatcher {
    fn matches(&self, client: &ClientAddr<'_>) -> bool {
        // A bound that failed to parse leaves the interval permanently
        // non-matching. A reversed interval (low > high) also never matches,
        // since no value satisfies both comparisons; operators rely on bad
        // lines denying rather than failing.
        match (self.low, self.high, client.numeric()) {
            (Some(low), Some(high), Some(addr)) => low <= addr && addr <= high,
            _ => false,
        }
    }
}

/// Enum wrapper for all rule matcher types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeRule {
    Single(SingleMatcher),
    Interval(IntervalMatcher),
}

impl ClientMatcher for RangeRule {
    fn matches(&self, client: &ClientAddr<'_>) -> bool {
        match self {
            RangeRule::Single(m) => m.matches(client),
            RangeRule::Interval(m) => m.matches(client),
        }
    }
}

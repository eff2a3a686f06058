//! IP Range Gate - IP-range and role based access gating for protected content
//!
//! This library decides whether a visitor may view protected content in a
//! content-management system, combining:
//! - Tagging: is the content item marked access-restricted via a taxonomy term?
//! - IP ranges: does the client IP fall in an operator-configured range?
//! - Roles: does the visitor hold one of the configured override roles?
//!
//! # Example
//!
//! ```rust
//! use ip_range_gate::{evaluator, parser};
//!
//! let ranges_text = "
//! 10.0.0.0 : 10.255.255.255
//! 192.168.1.7
//! ";
//!
//! // Parse the operator-entered ranges (total: never fails)
//! let rules = parser::parse(ranges_text);
//! assert_eq!(rules.len(), 2);
//!
//! // Match a client IP against them
//! assert!(evaluator::matches(&rules, "10.20.30.40"));
//! assert!(!evaluator::matches(&rules, "8.8.8.8"));
//!
//! // Combine with the role override for the final verdict
//! assert!(evaluator::decide(&rules, "8.8.8.8", true, false));
//! ```
//!
//! # Range Syntax
//!
//! One rule per line, whitespace anywhere in a line is ignored:
//!
//! | Form | Example | Match |
//! |------|---------|-------|
//! | Range | `10.0.0.0:10.0.0.255` | numeric, inclusive both ends |
//! | Single IP | `192.168.1.7` | exact string comparison |
//!
//! No wildcards, no CIDR, no comments. Lines that cannot be understood as
//! addresses become rules that never match (deny-by-default); the
//! [`parser::lint`] pass reports them for display in an admin form.
//!
//! # Notes
//!
//! - Single addresses match the client IP *text* verbatim while ranges match
//!   numerically. This asymmetry is observable (octet formatting matters for
//!   single-address rules) and is part of the contract.
//! - A reversed range (low above high) never matches any address.
//! - Only dotted-decimal IPv4 is supported; an IPv6 client never matches a
//!   range rule and matches a single-address rule only byte-for-byte.

pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod parser;
pub mod policy;
pub mod types;

// Re-export commonly used items
pub use error::RangeWarning;
pub use evaluator::{decide, matches};
pub use matcher::{ClientMatcher, IntervalMatcher, RangeRule, SingleMatcher};
pub use parser::{lint, parse};
pub use policy::{ConditionStore, ProtectionPolicy, TermResolver, DEFAULT_RULESET_CACHE};
pub use types::{
    parse_ipv4, ClientAddr, ConditionConfig, ContentItem, RuleSet, EXEMPT_VIEW_MODES,
};

//! Access evaluation.
//!
//! Pure functions over a parsed [`RuleSet`]: whether a client IP falls in any
//! configured range, and how that combines with the role override into the
//! final verdict. The caller supplies the client IP and the role signal
//! explicitly; nothing here reaches for request or session state.

use tracing::info;

use crate::matcher::ClientMatcher;
use crate::types::{ClientAddr, RuleSet};

/// Check the client IP against every rule, short-circuiting on first match.
///
/// An empty client IP never matches; no rule is consulted. The numeric form
/// of the address is computed once and reused across interval rules.
pub fn matches(rules: &RuleSet, client_ip: &str) -> bool {
    if client_ip.is_empty() {
        return false;
    }

    let probe = ClientAddr::new(client_ip);
    rules.iter().any(|rule| rule.matches(&probe))
}

/// Combine the IP-range check with the role override into the final verdict.
///
/// Either signal alone grants access; there is no priority between them.
/// When `log_requests` is set, one info record is emitted per invocation
/// carrying the client IP and whether the IP condition (not the combined
/// verdict) was met, as the literal strings "Yes"/"No". The log never
/// changes the returned decision.
pub fn decide(rules: &RuleSet, client_ip: &str, role_match: bool, log_requests: bool) -> bool {
    let ip_matched = matches(rules, client_ip);

    if log_requests {
        let met_condition = if ip_matched { "Yes" } else { "No" };
        info!(
            client_ip,
            met_condition, "client IP checked against configured ranges"
        );
    }

    ip_matched || role_match
}

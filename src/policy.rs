//! Protection policy.
//!
//! Boundary between the CMS and the IP-range engine: decides whether a
//! content item is gated at all for a given render mode, then asks the
//! evaluator for the verdict. The CMS side (condition configuration,
//! taxonomy term lookup) is reached only through the narrow read-only
//! traits below, injected at construction.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::evaluator;
use crate::parser::parse;
use crate::types::{ConditionConfig, ContentItem, RuleSet, EXEMPT_VIEW_MODES};

/// Default number of parsed rule sets kept by the policy cache.
///
/// One configuration is the common case; a handful covers multi-site setups
/// where several conditions share a policy instance.
pub const DEFAULT_RULESET_CACHE: usize = 16;

/// Read access to the stored restriction-condition configuration.
///
/// `None` means no condition is configured, which disables gating entirely.
pub trait ConditionStore: Send + Sync {
    fn condition_config(&self) -> Option<ConditionConfig>;
}

/// Resolves a taxonomy term id to its external reference URI.
///
/// `None` means the term does not exist or carries no URI; such values are
/// skipped during protection checks, never treated as errors.
pub trait TermResolver: Send + Sync {
    fn resolve_term_uri(&self, term_id: &str) -> Option<String>;
}

/// Per-site gate over protected content.
///
/// Holds the bundle name that is subject to gating, the two CMS
/// collaborators, and an LRU cache of parsed rule sets keyed by the raw
/// ranges text. Parsing is deterministic, so cache hits are invisible to
/// callers.
pub struct ProtectionPolicy<S, T> {
    bundle: String,
    store: S,
    resolver: T,
    rulesets: Mutex<LruCache<String, Arc<RuleSet>>>,
}

impl<S: ConditionStore, T: TermResolver> ProtectionPolicy<S, T> {
    /// Create a policy gating entities of `bundle`.
    pub fn new(bundle: impl Into<String>, store: S, resolver: T) -> Self {
        Self::with_cache_size(bundle, store, resolver, DEFAULT_RULESET_CACHE)
    }

    pub fn with_cache_size(
        bundle: impl Into<String>,
        store: S,
        resolver: T,
        cache_size: usize,
    ) -> Self {
        let cache_size = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            bundle: bundle.into(),
            store,
            resolver,
            rulesets: Mutex::new(LruCache::new(cache_size)),
        }
    }

    /// Whether `item` rendered as `view_mode` is subject to IP gating.
    ///
    /// False for foreign bundles, for metadata-only view modes, when no
    /// condition is configured, or when the entity has no access-restriction
    /// field. Otherwise true iff any of the item's term ids resolves to the
    /// configured target URI. Unresolvable term ids are skipped.
    pub fn is_protected(&self, item: &ContentItem, view_mode: &str) -> bool {
        if item.bundle != self.bundle {
            return false;
        }

        if EXEMPT_VIEW_MODES.contains(&view_mode) {
            return false;
        }

        let Some(config) = self.store.condition_config() else {
            return false;
        };

        let Some(terms) = item.access_terms.as_ref() else {
            return false;
        };

        terms.iter().any(|term_id| {
            self.resolver
                .resolve_term_uri(term_id)
                .is_some_and(|uri| uri == config.target_uri)
        })
    }

    /// Final access verdict for `item` rendered as `view_mode`.
    ///
    /// Ungated content is always visible. Gated content is visible when the
    /// client IP falls in a configured range OR the visitor holds one of the
    /// configured allowed roles.
    pub fn is_access_granted(
        &self,
        item: &ContentItem,
        view_mode: &str,
        client_ip: &str,
        user_roles: &[String],
    ) -> bool {
        if !self.is_protected(item, view_mode) {
            return true;
        }

        // is_protected returned true, so a configuration exists; a store
        // that stops returning one mid-request reads as deny-by-default.
        let Some(config) = self.store.condition_config() else {
            return false;
        };

        let rules = self.ruleset_for(&config.ranges_text);
        let role_match = user_roles
            .iter()
            .any(|role| config.allowed_roles.contains(role));

        evaluator::decide(&rules, client_ip, role_match, config.log_requests)
    }

    fn ruleset_for(&self, ranges_text: &str) -> Arc<RuleSet> {
        let mut cache = self.rulesets.lock();
        if let Some(rules) = cache.get(ranges_text) {
            return rules.clone();
        }
        let rules = Arc::new(parse(ranges_text));
        cache.put(ranges_text.to_string(), rules.clone());
        rules
    }
}

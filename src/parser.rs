use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RangeWarning;
use crate::matcher::{IntervalMatcher, RangeRule, SingleMatcher};
use crate::types::{parse_ipv4, RuleSet};

/// Line separator pattern: CRLF, bare CR, or bare LF, mixed freely within
/// one configuration blob (operator text pasted from different platforms).
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\r|\n").expect("LINE_BREAK: hardcoded regex is invalid")
});

/// Whitespace anywhere in a line is noise and is removed before the line is
/// interpreted, not just trimmed at the edges.
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("WHITESPACE: hardcoded regex is invalid"));

/// Parse an operator-entered range specification into a [`RuleSet`].
///
/// One rule per non-empty line: either `low_ip:high_ip` or a single `ip`.
/// The line is split on the FIRST colon only. Parsing is total — it never
/// fails. Malformed addresses are kept as rules that cannot match anything,
/// so a typo in the configuration denies access rather than erroring out of
/// the render pipeline. Use [`lint`] to surface such lines to the operator.
pub fn parse(text: &str) -> RuleSet {
    let mut rules = Vec::new();

    for raw_line in LINE_BREAK.split(text) {
        let line = WHITESPACE.replace_all(raw_line, "");

        // Skip empty lines
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((low, high)) => {
                rules.push(RangeRule::Interval(IntervalMatcher::new(low, high)));
            }
            None => {
                // Single addresses keep their textual form: matching compares
                // the client IP string verbatim, not numerically.
                rules.push(RangeRule::Single(SingleMatcher::new(line.as_ref())));
            }
        }
    }

    RuleSet::new(rules)
}

/// Check a range specification for lines that can never match.
///
/// Purely advisory: [`parse`] accepts everything this flags, and evaluation
/// treats flagged lines as non-matching. Line numbers are 1-based positions
/// in the original text, counting empty lines.
pub fn lint(text: &str) -> Vec<RangeWarning> {
    let mut warnings = Vec::new();

    for (idx, raw_line) in LINE_BREAK.split(text).enumerate() {
        let line_num = idx + 1;
        let line = WHITESPACE.replace_all(raw_line, "");

        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((low, high)) => {
                let low_addr = parse_ipv4(low);
                if low_addr.is_none() {
                    warnings.push(RangeWarning::InvalidAddress {
                        line: line_num,
                        text: low.to_string(),
                    });
                }
                if high.is_empty() {
                    warnings.push(RangeWarning::EmptyHighBound { line: line_num });
                } else {
                    let high_addr = parse_ipv4(high);
                    if high_addr.is_none() {
                        warnings.push(RangeWarning::InvalidAddress {
                            line: line_num,
                            text: high.to_string(),
                        });
                    }
                    if let (Some(l), Some(h)) = (low_addr, high_addr) {
                        if l > h {
                            warnings.push(RangeWarning::ReversedInterval {
                                line: line_num,
                                low: low.to_string(),
                                high: high.to_string(),
                            });
                        }
                    }
                }
            }
            None => {
                if parse_ipv4(&line).is_none() {
                    warnings.push(RangeWarning::InvalidAddress {
                        line: line_num,
                        text: line.into_owned(),
                    });
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::ClientMatcher;
    use crate::types::ClientAddr;

    #[test]
    fn test_line_break_regex_compiles() {
        // Forces Lazy evaluation; if the pattern is invalid, this panics
        // with the expect message rather than an opaque unwrap.
        assert!(LINE_BREAK.is_match("a\r\nb"));
        assert!(WHITESPACE.is_match(" "));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n\r\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_parse_single_address() {
        let rules = parse("1.2.3.4");
        assert_eq!(rules.len(), 1);
        match rules.iter().next().unwrap() {
            RangeRule::Single(m) => assert_eq!(m.text(), "1.2.3.4"),
            other => panic!("expected single-address rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_interval() {
        let rules = parse("10.0.0.0:10.0.0.255");
        assert_eq!(rules.len(), 1);
        match rules.iter().next().unwrap() {
            RangeRule::Interval(m) => {
                assert_eq!(m.low(), Some(0x0A000000));
                assert_eq!(m.high(), Some(0x0A0000FF));
            }
            other => panic!("expected interval rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        // Everything after the first colon is the high side, even if it
        // contains more colons (and therefore never parses).
        let rules = parse("1.2.3.4:5.6.7.8:9.9.9.9");
        assert_eq!(rules.len(), 1);
        match rules.iter().next().unwrap() {
            RangeRule::Interval(m) => {
                assert_eq!(m.low(), Some(0x01020304));
                assert_eq!(m.high(), None);
            }
            other => panic!("expected interval rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_strips_interior_whitespace() {
        let noisy = parse(" 1.2.3.4 : 5.6.7.8 \n\n 9.9.9.9 ");
        let clean = parse("1.2.3.4:5.6.7.8\n9.9.9.9");
        assert_eq!(noisy.len(), clean.len());
        assert_eq!(noisy.len(), 2);

        // Whitespace inside an address is also removed, not rejected.
        let rules = parse("1.2.\t3.4");
        match rules.iter().next().unwrap() {
            RangeRule::Single(m) => assert_eq!(m.text(), "1.2.3.4"),
            other => panic!("expected single-address rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_mixed_line_endings() {
        let mixed = parse("1.1.1.1\r\n2.2.2.2\r3.3.3.3\n4.4.4.4");
        let uniform = parse("1.1.1.1\n2.2.2.2\n3.3.3.3\n4.4.4.4");
        assert_eq!(mixed.len(), 4);
        assert_eq!(mixed.len(), uniform.len());
    }

    #[test]
    fn test_parse_trailing_colon_is_interval() {
        // "1.2.3.4:" has a colon, so it is an interval whose high bound is
        // the empty string — an interval that can never match. It is NOT
        // folded into a single-address rule.
        let rules = parse("1.2.3.4:");
        assert_eq!(rules.len(), 1);
        match rules.iter().next().unwrap() {
            RangeRule::Interval(m) => {
                assert_eq!(m.low(), Some(0x01020304));
                assert_eq!(m.high(), None);
                assert!(!m.matches(&ClientAddr::new("1.2.3.4")));
            }
            other => panic!("expected interval rule, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_is_total_on_garbage() {
        let rules = parse("not-an-ip\n999.999.999.999:1.2.3.4\n::\n1.2.3.4");
        assert_eq!(rules.len(), 4);
    }

    #[test]
    fn test_parse_preserves_document_order() {
        let rules = parse("2.2.2.2\n1.1.1.1:3.3.3.3\n4.4.4.4");
        let shapes: Vec<bool> = rules
            .iter()
            .map(|r| matches!(r, RangeRule::Single(_)))
            .collect();
        assert_eq!(shapes, vec![true, false, true]);
    }

    #[test]
    fn test_lint_clean_config() {
        assert!(lint("1.2.3.4\n10.0.0.0:10.255.255.255\n").is_empty());
        assert!(lint("").is_empty());
    }

    #[test]
    fn test_lint_invalid_address() {
        let warnings = lint("1.2.3.4\nnot-an-ip");
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0],
            RangeWarning::InvalidAddress {
                line: 2,
                text: "not-an-ip".to_string(),
            }
        );
    }

    #[test]
    fn test_lint_reversed_interval() {
        let warnings = lint("200.0.0.1:1.0.0.1");
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            RangeWarning::ReversedInterval { line: 1, .. }
        ));
    }

    #[test]
    fn test_lint_empty_high_bound() {
        let warnings = lint("1.2.3.4:");
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0], RangeWarning::EmptyHighBound { line: 1 });
    }

    #[test]
    fn test_lint_counts_empty_lines() {
        // Line numbers refer to the original text so the operator can find
        // the offending line in the textarea.
        let warnings = lint("\n\nbogus");
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            warnings[0],
            RangeWarning::InvalidAddress { line: 3, .. }
        ));
    }

    #[test]
    fn test_lint_flags_both_bad_bounds() {
        let warnings = lint("bad-low:bad-high");
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_lint_does_not_change_parse() {
        // Everything lint flags still parses into a rule.
        let text = "not-an-ip\n200.0.0.1:1.0.0.1\n1.2.3.4:";
        assert_eq!(lint(text).len(), 3);
        assert_eq!(parse(text).len(), 3);
    }
}

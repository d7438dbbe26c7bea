/// directional endings a stop tag may carry: inbound-only, outbound-only,
/// arrival-only. the ending has meaning only relative to a direction; the
/// physical stop is the same, so tags are trimmed of these endings when
/// used as graph nodes (1000 and 1000_ar are one node).
const DIRECTIONAL_SUFFIXES: [&str; 3] = ["_IB", "_OB", "_ar"];

/// canonical node identity for a stop tag. each suffix strip applies
/// independently; well-formed tags carry at most one, so the operation is
/// order-insensitive and idempotent.
pub fn normalize_stop_tag(tag: &str) -> &str {
    DIRECTIONAL_SUFFIXES
        .iter()
        .fold(tag, |node, suffix| node.strip_suffix(suffix).unwrap_or(node))
}

#[cfg(test)]
mod test {
    use super::normalize_stop_tag;

    #[test]
    fn test_strips_each_directional_suffix() {
        assert_eq!(normalize_stop_tag("1000_IB"), "1000");
        assert_eq!(normalize_stop_tag("1000_OB"), "1000");
        assert_eq!(normalize_stop_tag("1000_ar"), "1000");
    }

    #[test]
    fn test_plain_tag_unchanged() {
        assert_eq!(normalize_stop_tag("1000"), "1000");
        assert_eq!(normalize_stop_tag("14339"), "14339");
    }

    #[test]
    fn test_suffix_in_the_middle_is_not_stripped() {
        assert_eq!(normalize_stop_tag("10_IB_00"), "10_IB_00");
    }

    #[test]
    fn test_idempotent() {
        for tag in ["1000", "1000_IB", "1000_OB", "1000_ar", "stn_ar"] {
            let once = normalize_stop_tag(tag);
            assert_eq!(normalize_stop_tag(once), once);
        }
    }
}

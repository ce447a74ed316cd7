//! Entity id normalization.
//!
//! Raw ids arrive in many spellings ("001", "01", "d001"); the whole system
//! keys statistics by the canonical form so equivalent spellings collapse to
//! one entity.

/// Normalize a raw entity id to its canonical form.
///
/// Rules, in order:
/// 1. Trim surrounding whitespace.
/// 2. Pure-digit ids: strip leading zeros ("001", "01" and "1" all become
///    "1"). Done textually rather than via integer parsing, so ids longer
///    than any machine integer still normalize.
/// 3. Anything else: uppercase unchanged ("d001" becomes "D001").
///
/// Pure, total and idempotent. Whitespace-only input normalizes to the
/// empty string; callers reject empty ids upstream.
pub fn normalize_entity_id(raw: &str) -> String {
    let trimmed = raw.trim();

    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = trimmed.trim_start_matches('0');
        if stripped.is_empty() {
            return "0".to_string();
        }
        return stripped.to_string();
    }

    trimmed.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numeric_variants_collapse() {
        assert_eq!(normalize_entity_id("001"), "1");
        assert_eq!(normalize_entity_id("01"), "1");
        assert_eq!(normalize_entity_id("1"), "1");
        assert_eq!(normalize_entity_id("000"), "0");
    }

    #[test]
    fn test_alphanumeric_uppercased() {
        assert_eq!(normalize_entity_id("d001"), "D001");
        assert_eq!(normalize_entity_id("DRV42"), "DRV42");
        assert_eq!(normalize_entity_id("  trip-9a "), "TRIP-9A");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert_eq!(normalize_entity_id("   "), "");
        assert_eq!(normalize_entity_id(""), "");
    }

    #[test]
    fn test_long_digit_runs_do_not_overflow() {
        let raw = format!("000{}", "9".repeat(40));
        assert_eq!(normalize_entity_id(&raw), "9".repeat(40));
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(raw in ".{0,64}") {
            let once = normalize_entity_id(&raw);
            prop_assert_eq!(normalize_entity_id(&once), once);
        }

        #[test]
        fn test_digit_ids_share_canonical_form(n in 0u64..1_000_000, zeros in 0usize..5) {
            let padded = format!("{}{}", "0".repeat(zeros), n);
            prop_assert_eq!(normalize_entity_id(&padded), n.to_string());
        }
    }
}

//! Code prefix matching.

/// True when `code` belongs to the `prefix` family.
///
/// An exact match counts. Otherwise `code` must start with `prefix` and the
/// next character must not be an ASCII letter, so `T1` and `T-01` match `T`
/// while `TRIO` does not. Empty inputs never match.
pub fn matches_prefix(code: &str, prefix: &str) -> bool {
    if code.is_empty() || prefix.is_empty() {
        return false;
    }
    if code == prefix {
        return true;
    }
    match code.strip_prefix(prefix) {
        Some(rest) => !rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()),
        None => false,
    }
}

/// True when `code` matches any of `prefixes` (each trimmed first).
pub fn matches_any_prefix<S: AsRef<str>>(code: &str, prefixes: &[S]) -> bool {
    prefixes
        .iter()
        .any(|prefix| matches_prefix(code, prefix.as_ref().trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_after_prefix_breaks_the_match() {
        assert!(matches_prefix("T1", "T"));
        assert!(matches_prefix("T", "T"));
        assert!(matches_prefix("T-01", "T"));
        assert!(!matches_prefix("TRIO", "T"));
        assert!(!matches_prefix("DTF01", "DT"));
        assert!(matches_prefix("DTF01", "DTF"));
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(!matches_prefix("", "T"));
        assert!(!matches_prefix("T1", ""));
        assert!(!matches_prefix("", ""));
    }

    #[test]
    fn any_prefix_trims_entries() {
        assert!(matches_any_prefix("NM01", &[" ND", "NM "]));
        assert!(!matches_any_prefix::<&str>("NM01", &[]));
    }
}

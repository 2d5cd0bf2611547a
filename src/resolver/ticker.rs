/// Exchange prefixes stripped during normalization.
const EXCHANGE_PREFIXES: &[&str] = &[
    "NASDAQ:", "NYSE:", "AMEX:", "BATS:", "TASE:", "TLV:", "LON:",
];

/// Exchange suffixes stripped during normalization.
const EXCHANGE_SUFFIXES: &[&str] = &[".US", ".TA", ".L", ".AX", ".TO", ".HK"];

/// Canonicalize a raw ticker string.
///
/// Trims surrounding whitespace, upper-cases, then strips one known
/// exchange prefix and one known exchange suffix. Pure and total: any
/// input yields a (possibly empty) canonical ticker.
///
/// # Examples
///
/// ```
/// use pricesync::resolver::normalize;
///
/// assert_eq!(normalize("NASDAQ:AAPL"), "AAPL");
/// assert_eq!(normalize("teva.ta"), "TEVA");
/// assert_eq!(normalize("  msft "), "MSFT");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut ticker = raw.trim().to_ascii_uppercase();

    for prefix in EXCHANGE_PREFIXES {
        if let Some(stripped) = ticker.strip_prefix(prefix) {
            ticker = stripped.to_string();
            break;
        }
    }

    for suffix in EXCHANGE_SUFFIXES {
        if let Some(stripped) = ticker.strip_suffix(suffix) {
            ticker = stripped.to_string();
            break;
        }
    }

    ticker
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_exchange_prefix() {
        assert_eq!(normalize("NASDAQ:AAPL"), "AAPL");
        assert_eq!(normalize("NYSE:GE"), "GE");
        assert_eq!(normalize("TASE:TEVA"), "TEVA");
    }

    #[test]
    fn test_strips_exchange_suffix() {
        assert_eq!(normalize("AAPL.US"), "AAPL");
        assert_eq!(normalize("VOD.L"), "VOD");
        assert_eq!(normalize("SHOP.TO"), "SHOP");
    }

    #[test]
    fn test_strips_prefix_then_suffix() {
        assert_eq!(normalize("TLV:TEVA.TA"), "TEVA");
    }

    #[test]
    fn test_case_folds_and_trims() {
        assert_eq!(normalize("  aapl\t"), "AAPL");
        assert_eq!(normalize("nasdaq:msft"), "MSFT");
    }

    #[test]
    fn test_unknown_decorations_preserved() {
        // Share classes are not exchange suffixes.
        assert_eq!(normalize("BRK.B"), "BRK.B");
        assert_eq!(normalize("XETRA:SAP"), "XETRA:SAP");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_only_one_suffix_stripped() {
        assert_eq!(normalize("ABC.US.US"), "ABC.US");
    }
}

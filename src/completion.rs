//! Prefix completion over a sorted list of names.

/// Returns the bytes that extend `prefix` as far as every name starting with it
/// agrees.
///
/// `names` must be sorted ascending. A low pointer skips names that sort below
/// the prefix and a high pointer skips names that sort above it; when the names
/// under both pointers start with the prefix and share their next byte, that byte
/// is appended and the scan repeats with the longer prefix. Because the list is
/// sorted, agreement of the two outermost candidates means every candidate
/// between them agrees too.
///
/// The result is empty when nothing matches, when the prefix is already a whole
/// name, or when the candidates disagree on the next byte.
pub fn extension(names: &[&str], prefix: &[u8]) -> Vec<u8> {
    let Some(mut high) = names.len().checked_sub(1) else {
        return Vec::new();
    };
    let mut low = 0;
    let mut current = prefix.to_vec();

    loop {
        let len = current.len();
        while low < high && truncated(names[low], len) < current.as_slice() {
            low += 1;
        }
        while high > low && truncated(names[high], len) > current.as_slice() {
            high -= 1;
        }

        let (lo, hi) = (names[low].as_bytes(), names[high].as_bytes());
        let agreed = match (lo.get(len), hi.get(len)) {
            (Some(&c), Some(&d)) if c == d && lo.starts_with(&current) && hi.starts_with(&current) => c,
            _ => break,
        };
        current.push(agreed);
    }

    current.split_off(prefix.len())
}

/// The first `len` bytes of `name`, or all of it when shorter.
fn truncated(name: &str, len: usize) -> &[u8] {
    let bytes = name.as_bytes();
    &bytes[..len.min(bytes.len())]
}

#[cfg(test)]
mod tests {
    use super::extension;
    use pretty_assertions::assert_eq;

    const NAMES: [&str; 5] = ["date", "exit", "help", "history", "log"];

    fn complete(prefix: &str) -> String {
        String::from_utf8(extension(&NAMES, prefix.as_bytes())).unwrap()
    }

    #[test]
    fn test_sole_match_completes_fully() {
        assert_eq!(complete("d"), "ate");
        assert_eq!(complete("e"), "xit");
        assert_eq!(complete("l"), "og");
        assert_eq!(complete("hi"), "story");
        assert_eq!(complete("he"), "lp");
    }

    #[test]
    fn test_ambiguous_prefix_is_unchanged() {
        assert_eq!(complete("h"), "");
        assert_eq!(complete(""), "");
    }

    #[test]
    fn test_no_match_is_unchanged() {
        assert_eq!(complete("z"), "");
        assert_eq!(complete("a"), "");
        assert_eq!(complete("dx"), "");
        assert_eq!(complete("loggers"), "");
    }

    #[test]
    fn test_full_name_is_unchanged() {
        assert_eq!(complete("help"), "");
        assert_eq!(complete("history"), "");
        assert_eq!(complete("log"), "");
    }

    #[test]
    fn test_common_stem_stops_at_divergence() {
        let names = ["hist", "histogram", "history"];
        assert_eq!(extension(&names, b"h"), b"ist");
        assert_eq!(extension(&names, b"histo"), b"");
        assert_eq!(extension(&names, b"histog"), b"ram");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(extension(&[], b"d"), b"");
    }
}

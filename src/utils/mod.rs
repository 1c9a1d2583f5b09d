pub mod url_validator;

/// Characters a generated alias is drawn from
pub const ALIAS_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of a generated alias
pub const DEFAULT_ALIAS_LENGTH: usize = 6;

/// Longest alias the links table accepts
pub const MAX_ALIAS_LENGTH: usize = 128;

/// Generate a random alias of `length` characters from [`ALIAS_ALPHABET`].
///
/// Not unique by itself; the store's pre-check and unique constraint decide that.
pub fn generate_alias(length: usize) -> String {
    use std::iter;

    iter::repeat_with(|| ALIAS_ALPHABET[rand::random_range(0..ALIAS_ALPHABET.len())] as char)
        .take(length)
        .collect()
}

/// 校验用户提供的别名：非空、长度受限、只允许字母数字、连字符和下划线
pub fn is_valid_alias(alias: &str) -> bool {
    !alias.is_empty()
        && alias.len() <= MAX_ALIAS_LENGTH
        && alias
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_alias_length_and_charset() {
        for n in [1, 2, 6, 12, 64] {
            let alias = generate_alias(n);
            assert_eq!(alias.len(), n);
            assert!(alias.bytes().all(|b| ALIAS_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn test_generate_alias_zero_length() {
        assert_eq!(generate_alias(0), "");
    }

    #[test]
    fn test_generate_alias_is_random() {
        let aliases: std::collections::HashSet<String> =
            (0..50).map(|_| generate_alias(DEFAULT_ALIAS_LENGTH)).collect();
        assert!(aliases.len() > 45);
    }

    #[test]
    fn test_generated_alias_is_valid() {
        for _ in 0..100 {
            assert!(is_valid_alias(&generate_alias(DEFAULT_ALIAS_LENGTH)));
        }
    }

    #[test]
    fn test_is_valid_alias() {
        assert!(is_valid_alias("promo"));
        assert!(is_valid_alias("Summer-Sale_2026"));
        assert!(is_valid_alias(&"a".repeat(MAX_ALIAS_LENGTH)));

        assert!(!is_valid_alias(""));
        assert!(!is_valid_alias("has space"));
        assert!(!is_valid_alias("path/segment"));
        assert!(!is_valid_alias("dot.ted"));
        assert!(!is_valid_alias("ünïcode"));
        assert!(!is_valid_alias(&"a".repeat(MAX_ALIAS_LENGTH + 1)));
    }
}

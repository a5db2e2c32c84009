use itertools::Itertools;

/// Trait for per-token rendering applied after generation
pub trait TokenFormatter {
    fn format_token(&self, token: &str) -> String;

    fn format_all(&self, tokens: Vec<String>) -> Vec<String> {
        tokens.iter().map(|t| self.format_token(t)).collect()
    }
}

/// Leaves tokens untouched
pub struct PlainFormatter;

impl TokenFormatter for PlainFormatter {
    fn format_token(&self, token: &str) -> String {
        token.to_string()
    }

    fn format_all(&self, tokens: Vec<String>) -> Vec<String> {
        tokens
    }
}

/// Replaces each character by its code point as a zero-padded 8-digit binary group
pub struct BinaryFormatter;

impl TokenFormatter for BinaryFormatter {
    fn format_token(&self, token: &str) -> String {
        token.chars().map(|c| format!("{:08b}", c as u32)).join("")
    }
}

pub fn formatter_for(binary: bool) -> Box<dyn TokenFormatter> {
    if binary {
        Box::new(BinaryFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatter_is_identity() {
        let tokens = vec!["hello".to_string(), "world.".to_string()];
        assert_eq!(PlainFormatter.format_all(tokens.clone()), tokens);
    }

    #[test]
    fn test_binary_formatter_ascii() {
        assert_eq!(BinaryFormatter.format_token("a"), "01100001");
        assert_eq!(BinaryFormatter.format_token("hi"), "0110100001101001");
    }

    #[test]
    fn test_binary_formatter_wide_char_is_not_truncated() {
        // ß is U+00DF, still 8 digits; € is U+20AC and needs more
        assert_eq!(BinaryFormatter.format_token("ß"), "11011111");
        assert_eq!(BinaryFormatter.format_token("€"), "10000010101100");
    }

    #[test]
    fn test_binary_formatter_keeps_token_count() {
        let tokens = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(formatter_for(true).format_all(tokens).len(), 3);
    }
}

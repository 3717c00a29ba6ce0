/// Punctuation marks that always form a token of their own.
pub const PUNCTUATION: [char; 8] = ['.', ',', '!', '?', ';', ':', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenClass {
    Whitespace,
    Punctuation,
    Word,
}

/// Whitespace as browsers match `\s`: Unicode `White_Space` plus the byte
/// order mark, but without NEXT LINE (U+0085).
fn is_space(c: char) -> bool {
    match c {
        '\u{feff}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

impl TokenClass {
    fn of(c: char) -> Self {
        if is_space(c) {
            TokenClass::Whitespace
        } else if PUNCTUATION.contains(&c) {
            TokenClass::Punctuation
        } else {
            TokenClass::Word
        }
    }
}

/// Splits text into the atomic units compared by the diff.
///
/// A token is a maximal run of whitespace, a single punctuation mark from
/// [`PUNCTUATION`], or a maximal run of anything else. Concatenating the
/// tokens always yields the input and no token is empty.
///
/// ```not_rust
/// "Hi there, you!" -> ["Hi", " ", "there", ",", " ", "you", "!"]
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut result = Vec::new();
    let mut previous: Option<TokenClass> = None;
    let mut boundary = 0;

    for (i, c) in text.char_indices() {
        let class = TokenClass::of(c);
        let is_new_token = match previous {
            None => false,
            Some(TokenClass::Punctuation) => true,
            Some(previous) => previous != class,
        };

        if is_new_token {
            result.push(&text[boundary..i]);
            boundary = i;
        }

        previous = Some(class);
    }

    if boundary < text.len() {
        result.push(&text[boundary..]);
    }

    result
}

#[cfg(test)]
mod tests {
    use insta::assert_debug_snapshot;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;

    #[test_case("", &[]; "empty")]
    #[test_case("Hello", &["Hello"]; "single word")]
    #[test_case("  \t\n ", &["  \t\n "]; "whitespace run")]
    #[test_case("Hi there, you!", &["Hi", " ", "there", ",", " ", "you", "!"]; "sentence")]
    #[test_case("Wait...", &["Wait", ".", ".", "."]; "repeated punctuation")]
    #[test_case("(yes)", &["(", "yes", ")"]; "parentheses")]
    #[test_case("e-mail's", &["e-mail's"]; "hyphen and apostrophe stay in words")]
    #[test_case("\u{feff}Dear team", &["\u{feff}", "Dear", " ", "team"]; "byte order mark is whitespace")]
    #[test_case("a\u{a0}\u{3000}b", &["a", "\u{a0}\u{3000}", "b"]; "unicode spaces")]
    #[test_case("line\u{85}break", &["line\u{85}break"]; "next line is not whitespace")]
    fn test_tokenize(text: &str, expected: &[&str]) {
        assert_eq!(tokenize(text), expected);
    }

    #[test]
    fn test_tokens_concatenate_to_input() {
        let text = " 저는 3년간 (주)한빛에서 근무했습니다.\n\n감사합니다! ";
        assert_eq!(tokenize(text).concat(), text);
        assert!(tokenize(text).iter().all(|token| !token.is_empty()));
    }

    #[test]
    fn test_with_snapshots() {
        assert_debug_snapshot!(tokenize("Dear team: I'm keen."), @r#"
        [
            "Dear",
            " ",
            "team",
            ":",
            " ",
            "I'm",
            " ",
            "keen",
            ".",
        ]
        "#);
    }
}

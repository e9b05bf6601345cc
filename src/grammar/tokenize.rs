use super::Symbol;

peg::parser! {

    grammar alternative_lexer() for str {

        rule identifier() -> Symbol =
            s:$(['a'..='z'|'A'..='Z'|'_']['a'..='z'|'A'..='Z'|'0'..='9'|'_']* ) {
                s.to_string()
            }

        rule punctuation() -> Symbol =
            s:$(['(' | ')' | '{' | '}' | '+' | '-' | '=' | ';' | '|']) {
                s.to_string()
            }

        // anything else, whitespace included, is skipped
        rule token() -> Option<Symbol> =
            i:identifier() {
                Some(i)
            }/
            p:punctuation() {
                Some(p)
            }/
            [_] {
                None
            }

        pub rule symbols() -> Vec<Symbol> =
            tokens:token()* {
                tokens.into_iter().flatten().collect()
            }
    }
}

/// Best-effort lexical scan of one alternative. Unrecognized characters are
/// dropped; an empty result denotes an epsilon production.
pub fn tokenize(alternative: &str) -> Vec<Symbol> {
    alternative_lexer::symbols(alternative).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(items: &[&str]) -> Vec<Symbol> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn identifiers_and_punctuation() {
        assert_eq!(
            tokenize("stmt ( expr_1 ) ; { x+y } = -"),
            symbols(&["stmt", "(", "expr_1", ")", ";", "{", "x", "+", "y", "}", "=", "-"])
        );
    }

    #[test]
    fn whitespace_only_separates() {
        assert_eq!(tokenize("  a\tS \n b "), symbols(&["a", "S", "b"]));
        assert_eq!(tokenize("ab"), symbols(&["ab"]));
    }

    #[test]
    fn unknown_characters_are_dropped() {
        assert_eq!(tokenize("a * b"), symbols(&["a", "b"]));
        assert_eq!(tokenize("\"quoted\""), symbols(&["quoted"]));
        assert_eq!(tokenize("x,y.z"), symbols(&["x", "y", "z"]));
    }

    #[test]
    fn leading_digits_are_not_identifiers() {
        assert_eq!(tokenize("42abc 7"), symbols(&["abc"]));
        assert_eq!(tokenize("a1 _b2"), symbols(&["a1", "_b2"]));
    }

    #[test]
    fn epsilon_spellings_reduce_to_nothing() {
        assert!(tokenize("ε").is_empty());
        assert!(tokenize("").is_empty());
        assert!(tokenize("  ").is_empty());
        assert!(tokenize("* ,").is_empty());
    }
}

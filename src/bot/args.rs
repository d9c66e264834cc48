//! Command argument splitting.
//!
//! Shell-like: arguments are whitespace-separated, and double quotes
//! group a multi-word argument (`!ssu "Site 19" @Host @everyone evening
//! shift`). An unterminated quote runs to the end of the input.

/// Split raw argument text into arguments.
pub fn split_args(input: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                if in_quotes {
                    // Closing quote ends the argument even if empty.
                    args.push(std::mem::take(&mut current));
                    in_quotes = false;
                } else {
                    in_quotes = true;
                }
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    args.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        args.push(current);
    }

    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_simple_split() {
        assert_eq!(split_args("a b c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_collapses_runs_of_whitespace() {
        assert_eq!(split_args("  a   b  "), vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_argument_keeps_spaces() {
        assert_eq!(
            split_args(r#""Site 19" @Host now"#),
            vec!["Site 19", "@Host", "now"]
        );
    }

    #[test]
    fn test_quoted_empty_argument() {
        assert_eq!(split_args(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(split_args(r#"a "b c"#), vec!["a", "b c"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_args("").is_empty());
        assert!(split_args("   ").is_empty());
    }

    #[test]
    fn test_adjacent_quote_and_text() {
        // The quoted run closes the argument; trailing glued text starts
        // a new one. Matches shell-splitter behavior closely enough for
        // chat commands.
        assert_eq!(split_args(r#""a b"c"#), vec!["a b", "c"]);
    }
}

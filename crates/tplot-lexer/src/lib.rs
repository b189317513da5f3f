//! Lexical analysis for tplot data files
//!
//! Tokenizes whitespace or comma separated tables using logos.

use logos::Logos;
use tplot_core::Span;

/// Data file tokens
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Numeric literal (integer, decimal or exponent form) - must beat Word
    #[regex(r"[+-]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?", priority = 3)]
    Number,

    /// A bare word: any run of characters that are not separators
    #[regex(r##"[^\s,"#]+"##, priority = 1)]
    Word,

    /// Double-quoted string with backslash escapes
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    String,

    /// Field separator (,)
    #[token(",")]
    Comma,

    /// Row separator
    #[token("\n")]
    Newline,

    /// Comment to end of line (ignored)
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,

    /// Whitespace (ignored)
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,

    /// End of input
    Eof,

    /// Lexer error
    Error,
}

/// Token with location information
#[derive(Debug, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// Lexer that produces tokens with spans
pub struct Lexer<'input> {
    lexer: logos::Lexer<'input, Token>,
    input: &'input str,
}

impl<'input> Lexer<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        Self {
            lexer: Token::lexer(input),
            input,
        }
    }

    /// Get the next token with span information
    pub fn next_token(&mut self) -> SpannedToken {
        match self.lexer.next() {
            Some(Ok(token)) => {
                let span = self.lexer.span();
                let text = self.input[span.clone()].to_string();
                SpannedToken {
                    token,
                    span: Span::new(span.start, span.end),
                    text,
                }
            }
            Some(Err(())) => {
                let span = self.lexer.span();
                let text = self.input[span.clone()].to_string();
                SpannedToken {
                    token: Token::Error,
                    span: Span::new(span.start, span.end),
                    text,
                }
            }
            None => SpannedToken {
                token: Token::Eof,
                span: Span::new(self.input.len(), self.input.len()),
                text: String::new(),
            },
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Vec<SpannedToken> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.token == Token::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_whitespace_separated_numbers() {
        let mut lexer = Lexer::new("1 2.5\t-3");
        let tokens = lexer.tokenize();

        assert_eq!(tokens.len(), 4); // 1, 2.5, -3, EOF
        assert!(tokens[..3].iter().all(|t| t.token == Token::Number));
        assert_eq!(tokens[1].text, "2.5");
        assert_eq!(tokens[2].text, "-3");
        assert_eq!(tokens[2].span, Span::new(6, 8));
    }

    #[test]
    fn test_number_forms() {
        for input in ["0", "42", "-7", "+1.5", ".5", "3.", "1e3", "2.5E-4", "-6e+02"] {
            let tokens = Lexer::new(input).tokenize();
            assert_eq!(tokens.len(), 2, "input {input}");
            assert_eq!(tokens[0].token, Token::Number, "input {input}");
            assert_eq!(tokens[0].text, input);
        }
    }

    #[test]
    fn test_words_take_longest_match() {
        let tokens = Lexer::new("12abc apples x_1 -").tokenize();
        assert_eq!(tokens[0].token, Token::Word);
        assert_eq!(tokens[0].text, "12abc");
        assert_eq!(tokens[1].token, Token::Word);
        assert_eq!(tokens[2].token, Token::Word);
        assert_eq!(tokens[3].token, Token::Word);
        assert_eq!(tokens[3].text, "-");
    }

    #[test]
    fn test_commas_and_newlines() {
        assert_eq!(
            kinds("x,y\n1, 2\n"),
            vec![
                Token::Word,
                Token::Comma,
                Token::Word,
                Token::Newline,
                Token::Number,
                Token::Comma,
                Token::Number,
                Token::Newline,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_strings() {
        let tokens = Lexer::new(r#""New York" "say \"hi\"""#).tokenize();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].token, Token::String);
        assert_eq!(tokens[0].text, r#""New York""#);
        assert_eq!(tokens[1].token, Token::String);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("# header comment\n1 2 # trailing\n"),
            vec![
                Token::Newline,
                Token::Number,
                Token::Number,
                Token::Newline,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let tokens = Lexer::new("1 \"open").tokenize();
        assert!(tokens.iter().any(|t| t.token == Token::Error));
    }

    #[test]
    fn test_empty_input() {
        let tokens = Lexer::new("").tokenize();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token, Token::Eof);
        assert_eq!(tokens[0].span, Span::new(0, 0));
    }
}

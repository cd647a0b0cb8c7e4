//! SPARQL-DL 字句解析器

use logos::Logos;

/// SPARQL-DL トークン
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")] // whitespace
#[logos(skip r"#[^\n]*")] // comments
pub enum Token<'a> {
    #[token("PREFIX", ignore(ascii_case))]
    Prefix,

    #[token("SELECT", ignore(ascii_case))]
    Select,

    #[token("DISTINCT", ignore(ascii_case))]
    Distinct,

    #[token("ASK", ignore(ascii_case))]
    Ask,

    #[token("WHERE", ignore(ascii_case))]
    Where,

    #[token("OR", ignore(ascii_case))]
    Or,

    #[regex(r"[?$][A-Za-z_][A-Za-z0-9_]*", |lex| &lex.slice()[1..])]
    Variable(&'a str),

    #[regex(r"<[^<>\x22{}|^`\\\x00-\x20]*>", |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    Iri(&'a str),

    #[regex(r"([A-Za-z][A-Za-z0-9_\-]*)?:[A-Za-z0-9_\-]*")]
    PrefixedName(&'a str),

    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, |lex| { let s = lex.slice(); &s[1..s.len() - 1] })]
    StringLiteral(&'a str),

    #[regex(r"[+-]?[0-9]+")]
    Integer(&'a str),

    #[regex(r"@[A-Za-z]+(-[A-Za-z0-9]+)*", |lex| &lex.slice()[1..])]
    LangTag(&'a str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word(&'a str),

    #[token("^^")]
    DoubleCaret,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token("*")]
    Star,
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Prefix => write!(f, "PREFIX"),
            Token::Select => write!(f, "SELECT"),
            Token::Distinct => write!(f, "DISTINCT"),
            Token::Ask => write!(f, "ASK"),
            Token::Where => write!(f, "WHERE"),
            Token::Or => write!(f, "OR"),
            Token::Variable(name) => write!(f, "?{}", name),
            Token::Iri(iri) => write!(f, "<{}>", iri),
            Token::PrefixedName(name) => write!(f, "{}", name),
            Token::StringLiteral(value) => write!(f, "\"{}\"", value),
            Token::Integer(value) => write!(f, "{}", value),
            Token::LangTag(tag) => write!(f, "@{}", tag),
            Token::Word(word) => write!(f, "{}", word),
            Token::DoubleCaret => write!(f, "^^"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Star => write!(f, "*"),
        }
    }
}

/// Tokenize a query, reporting the byte offset of the first unrecognized input
pub fn tokenize(input: &str) -> Result<Vec<(Token<'_>, usize)>, usize> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.span().start)),
            Err(()) => return Err(lexer.span().start),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token<'_>> {
        tokenize(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_eq!(
            kinds("select Distinct ASK where Or prefix"),
            vec![Token::Select, Token::Distinct, Token::Ask, Token::Where, Token::Or, Token::Prefix]
        );
    }

    #[test]
    fn test_atom_tokens() {
        assert_eq!(
            kinds("Type(?x, ex:Person)"),
            vec![
                Token::Word("Type"),
                Token::LParen,
                Token::Variable("x"),
                Token::Comma,
                Token::PrefixedName("ex:Person"),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_words_are_not_keywords() {
        assert_eq!(kinds("Order Orange"), vec![Token::Word("Order"), Token::Word("Orange")]);
    }

    #[test]
    fn test_iris_literals_and_comments() {
        assert_eq!(
            kinds("<http://example.org/a> # comment\n \"42\"^^xsd:int 'hi'@en-GB $v -7 :local"),
            vec![
                Token::Iri("http://example.org/a"),
                Token::StringLiteral("42"),
                Token::DoubleCaret,
                Token::PrefixedName("xsd:int"),
                Token::StringLiteral("hi"),
                Token::LangTag("en-GB"),
                Token::Variable("v"),
                Token::Integer("-7"),
                Token::PrefixedName(":local"),
            ]
        );
    }

    #[test]
    fn test_unrecognized_input() {
        assert_eq!(tokenize("SELECT ?x WHERE { Type(?x, ex:A) ; }"), Err(33));
    }
}

//! The mirror's free-text query language.
//!
//! Syntax: bare terms match any field, `field:value` terms match one field,
//! values may be double-quoted to include spaces. `AND`, `OR` and `NOT` are
//! recognized case-insensitively; `AND` binds tighter than `OR`, and two
//! adjacent terms are OR-ed. An empty query matches every document.

use std::collections::BTreeMap;

use super::SearchError;

/// Flat document: field name -> textual value (includes an `id` field).
pub type Document = BTreeMap<String, String>;

/// Parsed query tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Matches every document (empty query).
    All,
    Term {
        field: Option<String>,
        value: String,
    },
    Not(Box<Query>),
    And(Box<Query>, Box<Query>),
    Or(Box<Query>, Box<Query>),
}

impl Query {
    /// Parse the query text; `Err` on dangling operators or unclosed quotes.
    pub fn parse(input: &str) -> Result<Self, SearchError> {
        let tokens = lex(input)?;
        if tokens.is_empty() {
            return Ok(Query::All);
        }
        let mut parser = Parser { tokens, pos: 0 };
        let query = parser.parse_or()?;
        if parser.pos != parser.tokens.len() {
            return Err(SearchError::InvalidQuery(format!(
                "unexpected token '{}'",
                parser.tokens[parser.pos].text
            )));
        }
        Ok(query)
    }

    /// Evaluate against one document.
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Query::All => true,
            Query::Term { field, value } => {
                let needle = value.to_lowercase();
                match field {
                    Some(field) => doc
                        .get(field)
                        .is_some_and(|v| v.to_lowercase().contains(&needle)),
                    None => doc.values().any(|v| v.to_lowercase().contains(&needle)),
                }
            }
            Query::Not(inner) => !inner.matches(doc),
            Query::And(left, right) => left.matches(doc) && right.matches(doc),
            Query::Or(left, right) => left.matches(doc) || right.matches(doc),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Token {
    text: String,
    /// Quoted tokens are always terms, never operators.
    quoted: bool,
}

impl Token {
    fn operator(&self) -> Option<Operator> {
        if self.quoted {
            return None;
        }
        match self.text.to_ascii_uppercase().as_str() {
            "AND" => Some(Operator::And),
            "OR" => Some(Operator::Or),
            "NOT" => Some(Operator::Not),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
    Not,
}

fn lex(input: &str) -> Result<Vec<Token>, SearchError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;

    for c in input.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        quoted,
                    });
                    quoted = false;
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(SearchError::InvalidQuery("unclosed quote".to_string()));
    }
    if !current.is_empty() || quoted {
        tokens.push(Token {
            text: current,
            quoted,
        });
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn parse_or(&mut self) -> Result<Query, SearchError> {
        let mut left = self.parse_and()?;
        loop {
            match self.peek().map(Token::operator) {
                Some(Some(Operator::Or)) => {
                    self.pos += 1;
                    let right = self.parse_and()?;
                    left = Query::Or(Box::new(left), Box::new(right));
                }
                // Adjacent terms (or a NOT) behave like an explicit OR.
                Some(Some(Operator::Not)) | Some(None) => {
                    let right = self.parse_and()?;
                    left = Query::Or(Box::new(left), Box::new(right));
                }
                Some(Some(Operator::And)) => {
                    return Err(SearchError::InvalidQuery(
                        "unexpected AND".to_string(),
                    ));
                }
                None => return Ok(left),
            }
        }
    }

    fn parse_and(&mut self) -> Result<Query, SearchError> {
        let mut left = self.parse_unary()?;
        while self.peek().map(Token::operator) == Some(Some(Operator::And)) {
            self.pos += 1;
            let right = self.parse_unary()?;
            left = Query::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Query, SearchError> {
        match self.peek() {
            None => Err(SearchError::InvalidQuery(
                "query ends with an operator".to_string(),
            )),
            Some(token) => match token.operator() {
                Some(Operator::Not) => {
                    self.pos += 1;
                    Ok(Query::Not(Box::new(self.parse_unary()?)))
                }
                Some(op) => Err(SearchError::InvalidQuery(format!(
                    "unexpected {op:?} operator"
                ))),
                None => {
                    let query = term(token);
                    self.pos += 1;
                    query
                }
            },
        }
    }
}

fn term(token: &Token) -> Result<Query, SearchError> {
    let (field, value) = match token.text.split_once(':') {
        Some((field, value)) if !field.is_empty() => (Some(field.to_lowercase()), value),
        _ => (None, token.text.as_str()),
    };
    if value.is_empty() {
        return Err(SearchError::InvalidQuery(format!(
            "term '{}' has no value",
            token.text
        )));
    }
    Ok(Query::Term {
        field,
        value: value.to_string(),
    })
}

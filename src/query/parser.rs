//! Recursive descent parser for the query language
//!
//! # Grammar
//!
//! ```text
//! expr   := term ('||' term)*
//! term   := factor (('&&' | juxtaposition) factor)*
//! factor := '!' factor | '(' expr ')' | WORD proximity? | PHRASE proximity?
//! proximity := '/' NUMBER
//! ```
//!
//! Juxtaposed operands are an implicit AND. Words are Porter-stemmed before
//! lookup; a quoted phrase runs through the full tokenizer pipeline and
//! becomes a sequence query — exact adjacency by default, widened to `/N`'s
//! window when a proximity suffix follows.
//!
//! The parser never fails. Recovery rules are fixed: a dangling binary
//! operator is a no-op, a missing `)` is supplied at end of input, an
//! unmatched `)` ends the current expression, and a `/` not followed by a
//! number is dropped.

use crate::tokenizer::{stem, tokenize};

use super::ast::QueryNode;
use super::lexer::{Lexer, Token};

/// Parser for one query line
pub struct QueryParser {
    lexer: Lexer,
    current: Token,
}

impl QueryParser {
    pub fn new(input: &str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parse the query into an evaluation tree. Tokens after a complete
    /// expression (e.g. behind an unmatched `)`) are ignored.
    pub fn parse(mut self) -> QueryNode {
        if self.current == Token::Eof {
            return QueryNode::Empty;
        }
        self.parse_expr()
    }

    /// expr := term ('||' term)*
    fn parse_expr(&mut self) -> QueryNode {
        let mut left = self.parse_term();
        while self.current == Token::Or {
            self.advance();
            let right = self.parse_term();
            left = QueryNode::or(left, right);
        }
        left
    }

    /// term := factor (('&&' | juxtaposition) factor)*
    fn parse_term(&mut self) -> QueryNode {
        let mut left = self.parse_factor();
        loop {
            match self.current {
                Token::And => {
                    self.advance();
                    let right = self.parse_factor();
                    left = QueryNode::and(left, right);
                }
                Token::Word(_) | Token::Phrase(_) | Token::Not | Token::LeftParen => {
                    let right = self.parse_factor();
                    left = QueryNode::and(left, right);
                }
                _ => return left,
            }
        }
    }

    /// factor := '!' factor | '(' expr ')' | WORD proximity? | PHRASE proximity?
    fn parse_factor(&mut self) -> QueryNode {
        match self.current.clone() {
            Token::Not => {
                self.advance();
                QueryNode::not(self.parse_factor())
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expr();
                if self.current == Token::RightParen {
                    self.advance();
                }
                expr
            }
            Token::Word(word) => {
                self.advance();
                match self.parse_proximity() {
                    Some(window) => QueryNode::Sequence {
                        terms: vec![stem(&word)],
                        window,
                    },
                    None => QueryNode::Term(stem(&word)),
                }
            }
            Token::Phrase(text) => {
                self.advance();
                let terms = tokenize(&text);
                let window = self.parse_proximity().unwrap_or(terms.len() as u32);
                QueryNode::Sequence { terms, window }
            }
            Token::Or | Token::And => {
                // Dangling binary operator: no-op, keep parsing
                self.advance();
                if self.current == Token::Eof {
                    QueryNode::Empty
                } else {
                    self.parse_factor()
                }
            }
            // RightParen, Slash or Eof: nothing to build here
            _ => QueryNode::Empty,
        }
    }

    /// Consume a trailing `/N` if present; a `/` without a number is dropped.
    fn parse_proximity(&mut self) -> Option<u32> {
        if self.current != Token::Slash {
            return None;
        }
        self.advance();
        let distance = match &self.current {
            Token::Word(word) => word.parse::<u32>().ok(),
            _ => None,
        };
        if distance.is_some() {
            self.advance();
        }
        distance
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }
}

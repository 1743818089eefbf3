//! Token recording for grammars whose actions run after the parse

use std::fmt::Display;
use std::io::{self, Write};

/// A rule match recorded during parsing.
///
/// Positions are byte offsets into the parsed buffer. They are stored as
/// `u32`, which limits inputs to `u32::MAX` bytes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Token<R> {
    pub rule: R,
    pub begin: u32,
    pub end: u32,
    /// Number of enclosing tokens
    pub depth: u32,
}

impl<R> Token<R> {
    pub fn span(&self) -> std::ops::Range<usize> {
        self.begin as usize..self.end as usize
    }
}

/// Pre-order list of the rule matches of one parse.
///
/// A rule reserves its slot with [`open`](TokenTree::open) before its
/// children are recorded, then either fills in its end with
/// [`close`](TokenTree::close) or backtracks with
/// [`rollback`](TokenTree::rollback).
#[derive(Clone, Debug)]
pub struct TokenTree<R> {
    tokens: Vec<Token<R>>,
    depth: u32,
}

impl<R: Copy> Default for TokenTree<R> {
    fn default() -> Self {
        TokenTree::new()
    }
}

impl<R: Copy> TokenTree<R> {
    pub fn new() -> Self {
        TokenTree {
            tokens: Vec::new(),
            depth: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TokenTree {
            tokens: Vec::with_capacity(capacity),
            depth: 0,
        }
    }

    /// Start recording `rule` at `begin`. Returns the slot index.
    #[inline]
    pub fn open(&mut self, rule: R, begin: usize) -> usize {
        let index = self.tokens.len();
        self.tokens.push(Token {
            rule,
            begin: begin as u32,
            end: begin as u32,
            depth: self.depth,
        });
        self.depth += 1;
        index
    }

    /// Finish the token at `index`, which matched up to `end`.
    #[inline]
    pub fn close(&mut self, index: usize, end: usize) {
        self.tokens[index].end = end as u32;
        self.depth -= 1;
    }

    /// Discard the token at `index` and everything recorded inside it.
    #[inline]
    pub fn rollback(&mut self, index: usize) {
        self.tokens.truncate(index);
        self.depth -= 1;
    }

    /// Record a zero-width token, such as an action marker.
    #[inline]
    pub fn mark(&mut self, rule: R, pos: usize) {
        let index = self.open(rule, pos);
        self.close(index, pos);
    }

    pub fn tokens(&self) -> &[Token<R>] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
        self.depth = 0;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.tokens.reserve(additional);
    }

    /// Rebuild the nested syntax tree from the recorded tokens.
    pub fn ast(&self) -> Vec<Node<R>> {
        let mut roots = Vec::new();
        let mut stack: Vec<Node<R>> = Vec::new();

        for token in &self.tokens {
            while stack.len() > token.depth as usize {
                if let Some(done) = stack.pop() {
                    attach(&mut stack, &mut roots, done);
                }
            }
            stack.push(Node {
                rule: token.rule,
                begin: token.begin as usize,
                end: token.end as usize,
                children: Vec::new(),
            });
        }

        while let Some(done) = stack.pop() {
            attach(&mut stack, &mut roots, done);
        }

        roots
    }
}

fn attach<R>(stack: &mut [Node<R>], roots: &mut Vec<Node<R>>, node: Node<R>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

impl<R: Copy + Display> TokenTree<R> {
    /// Write one line per token, indented by nesting depth, followed by the
    /// quoted text it matched in `buffer`.
    pub fn print_syntax_tree<W: Write>(&self, buffer: &str, mut out: W) -> io::Result<()> {
        for token in &self.tokens {
            writeln!(
                out,
                "{:indent$}{} {:?}",
                "",
                token.rule,
                &buffer[token.span()],
                indent = token.depth as usize
            )?;
        }
        Ok(())
    }
}

/// A node of the syntax tree built by [`TokenTree::ast`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Node<R> {
    pub rule: R,
    pub begin: usize,
    pub end: usize,
    pub children: Vec<Node<R>>,
}

impl<R> Node<R> {
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[self.begin..self.end]
    }
}

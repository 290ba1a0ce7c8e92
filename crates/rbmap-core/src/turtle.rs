//! # Turtle Parser
//!
//! A hand-written recursive-descent parser for the Turtle subset the RBMO
//! models use: prefix/base directives (both `@` and SPARQL spellings),
//! IRIs, prefixed names, the `a` keyword, `;`/`,` lists, labelled and
//! anonymous blank nodes, string/numeric/boolean literals, datatype and
//! language annotations, and `#` comments.
//!
//! Not supported: RDF collections `( ... )` and quoted-triple syntax.
//! Datatype and language annotations are parsed and discarded; only the
//! lexical form of a literal is kept (see [`crate::Term::Literal`]).
//!
//! Any malformed input is a fatal [`RbmapError::Parse`] carrying the line
//! number; nothing is emitted for a document that does not parse.

use crate::{RbmapError, Term, Triple, vocab};
use std::collections::BTreeMap;

/// Parse a Turtle document into triples.
///
/// `base` is used to resolve relative IRI references (`file://...` or
/// `stdin:` from the CLI; an external resource's own URI during
/// enrichment).
pub fn parse_turtle(input: &str, base: &str) -> Result<Vec<Triple>, RbmapError> {
    Parser::new(input, base).parse_document()
}

// =============================================================================
// PARSER STATE
// =============================================================================

struct Parser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    base: String,
    prefixes: BTreeMap<String, String>,
    blank_seq: u64,
    triples: Vec<Triple>,
}

impl Parser {
    fn new(input: &str, base: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            base: base.to_string(),
            prefixes: BTreeMap::new(),
            blank_seq: 0,
            triples: Vec::new(),
        }
    }

    fn parse_document(mut self) -> Result<Vec<Triple>, RbmapError> {
        loop {
            self.skip_trivia();
            if self.at_end() {
                break;
            }
            self.statement()?;
        }
        Ok(self.triples)
    }

    // =========================================================================
    // STATEMENTS
    // =========================================================================

    fn statement(&mut self) -> Result<(), RbmapError> {
        if self.peek() == Some('@') {
            return self.at_directive();
        }
        if self.at_keyword_ci("PREFIX") {
            self.consume_word("PREFIX");
            return self.prefix_binding(false);
        }
        if self.at_keyword_ci("BASE") {
            self.consume_word("BASE");
            return self.base_binding(false);
        }
        self.triples_statement()
    }

    fn at_directive(&mut self) -> Result<(), RbmapError> {
        self.bump(); // '@'
        let word = self.bare_word();
        match word.as_str() {
            "prefix" => self.prefix_binding(true),
            "base" => self.base_binding(true),
            other => Err(self.error(format!("unknown directive '@{other}'"))),
        }
    }

    fn prefix_binding(&mut self, dotted: bool) -> Result<(), RbmapError> {
        self.skip_trivia();
        let prefix = self.prefix_label()?;
        self.skip_trivia();
        let iri = self.iri_ref()?;
        self.prefixes.insert(prefix, iri);
        if dotted {
            self.expect('.')?;
        }
        Ok(())
    }

    fn base_binding(&mut self, dotted: bool) -> Result<(), RbmapError> {
        self.skip_trivia();
        let iri = self.iri_ref()?;
        self.base = iri;
        if dotted {
            self.expect('.')?;
        }
        Ok(())
    }

    fn triples_statement(&mut self) -> Result<(), RbmapError> {
        let (subject, anonymous) = self.subject()?;
        self.skip_trivia();
        // "[ p o ] ." is a complete statement on its own.
        if anonymous && self.peek() == Some('.') {
            self.bump();
            return Ok(());
        }
        self.predicate_object_list(&subject)?;
        self.expect('.')
    }

    fn subject(&mut self) -> Result<(Term, bool), RbmapError> {
        self.skip_trivia();
        match self.peek() {
            Some('<') => Ok((self.iri_term()?, false)),
            Some('_') => Ok((self.blank_label()?, false)),
            Some('[') => Ok((self.blank_property_list()?, true)),
            Some('(') => Err(self.error("collections are not supported")),
            Some(_) => Ok((self.prefixed_name()?, false)),
            None => Err(self.error("unexpected end of input")),
        }
    }

    fn predicate_object_list(&mut self, subject: &Term) -> Result<(), RbmapError> {
        loop {
            self.skip_trivia();
            let predicate = self.verb()?;
            self.object_list(subject, &predicate)?;
            self.skip_trivia();
            if self.peek() != Some(';') {
                break;
            }
            self.bump();
            self.skip_trivia();
            // A trailing ';' may close the list.
            if matches!(self.peek(), Some('.' | ']') | None) {
                break;
            }
        }
        Ok(())
    }

    fn verb(&mut self) -> Result<Term, RbmapError> {
        if self.at_keyword("a") {
            self.bump();
            return Ok(Term::iri(vocab::RDF_TYPE));
        }
        match self.peek() {
            Some('<') => self.iri_term(),
            Some(_) => self.prefixed_name(),
            None => Err(self.error("unexpected end of input, expected predicate")),
        }
    }

    fn object_list(&mut self, subject: &Term, predicate: &Term) -> Result<(), RbmapError> {
        loop {
            let object = self.object()?;
            self.triples
                .push(Triple::new(subject.clone(), predicate.clone(), object));
            self.skip_trivia();
            if self.peek() != Some(',') {
                break;
            }
            self.bump();
        }
        Ok(())
    }

    fn object(&mut self) -> Result<Term, RbmapError> {
        self.skip_trivia();
        match self.peek() {
            Some('<') => self.iri_term(),
            Some('_') => self.blank_label(),
            Some('[') => self.blank_property_list(),
            Some('(') => Err(self.error("collections are not supported")),
            Some('"') | Some('\'') => self.string_literal(),
            Some(c) if c.is_ascii_digit() || c == '+' || c == '-' => self.numeric_literal(),
            Some(_) => {
                if self.at_keyword("true") {
                    self.consume_word("true");
                    return Ok(Term::literal("true"));
                }
                if self.at_keyword("false") {
                    self.consume_word("false");
                    return Ok(Term::literal("false"));
                }
                self.prefixed_name()
            }
            None => Err(self.error("unexpected end of input, expected object")),
        }
    }

    // =========================================================================
    // TERMS
    // =========================================================================

    fn iri_term(&mut self) -> Result<Term, RbmapError> {
        let iri = self.iri_ref()?;
        Ok(Term::Iri(iri))
    }

    fn iri_ref(&mut self) -> Result<String, RbmapError> {
        if self.peek() != Some('<') {
            return Err(self.error("expected IRI"));
        }
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                Some('>') => break,
                Some('\n') | None => return Err(self.error("unterminated IRI")),
                Some(c) => out.push(c),
            }
        }
        Ok(self.resolve_reference(&out))
    }

    fn blank_label(&mut self) -> Result<Term, RbmapError> {
        self.bump(); // '_'
        if self.peek() != Some(':') {
            return Err(self.error("expected ':' after '_' in blank node label"));
        }
        self.bump();
        let label = self.local_name();
        if label.is_empty() {
            return Err(self.error("empty blank node label"));
        }
        Ok(Term::Blank(label))
    }

    fn blank_property_list(&mut self) -> Result<Term, RbmapError> {
        self.bump(); // '['
        let node = self.fresh_blank();
        self.skip_trivia();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(node);
        }
        self.predicate_object_list(&node)?;
        self.expect(']')?;
        Ok(node)
    }

    fn fresh_blank(&mut self) -> Term {
        let label = format!("genid{}", self.blank_seq);
        self.blank_seq += 1;
        Term::Blank(label)
    }

    fn prefixed_name(&mut self) -> Result<Term, RbmapError> {
        let prefix: String = {
            let mut out = String::new();
            while let Some(c) = self.peek() {
                if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                    out.push(c);
                    self.bump();
                } else {
                    break;
                }
            }
            out
        };
        if self.peek() != Some(':') {
            return Err(self.error(format!("expected ':' in prefixed name after '{prefix}'")));
        }
        self.bump();
        let local = self.local_name();
        match self.prefixes.get(&prefix) {
            Some(namespace) => Ok(Term::Iri(format!("{namespace}{local}"))),
            None => Err(self.error(format!("unknown prefix '{prefix}:'"))),
        }
    }

    /// Local part of a prefixed name. Dots are allowed inside but a
    /// trailing run of dots belongs to the statement terminator.
    fn local_name(&mut self) -> String {
        let mut out = self.name_chars();
        while out.ends_with('.') {
            out.pop();
            self.pos -= 1;
        }
        out
    }

    fn name_chars(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '%' | ':' | '.') {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    fn prefix_label(&mut self) -> Result<String, RbmapError> {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' || c == '.' {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        if self.peek() != Some(':') {
            return Err(self.error("expected ':' after prefix label"));
        }
        self.bump();
        Ok(out)
    }

    // =========================================================================
    // LITERALS
    // =========================================================================

    fn string_literal(&mut self) -> Result<Term, RbmapError> {
        let quote = match self.bump() {
            Some(c @ ('"' | '\'')) => c,
            _ => return Err(self.error("expected string literal")),
        };

        let long = self.peek() == Some(quote) && self.peek_at(1) == Some(quote);
        let text = if long {
            self.bump();
            self.bump();
            self.long_string_body(quote)?
        } else {
            self.short_string_body(quote)?
        };

        // Optional language tag or datatype annotation, discarded.
        if self.peek() == Some('@') {
            self.bump();
            while let Some(c) = self.peek() {
                if c.is_ascii_alphanumeric() || c == '-' {
                    self.bump();
                } else {
                    break;
                }
            }
        } else if self.peek() == Some('^') && self.peek_at(1) == Some('^') {
            self.bump();
            self.bump();
            self.skip_trivia();
            match self.peek() {
                Some('<') => {
                    self.iri_ref()?;
                }
                _ => {
                    self.prefixed_name()?;
                }
            }
        }

        Ok(Term::Literal(text))
    }

    fn short_string_body(&mut self, quote: char) -> Result<String, RbmapError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.escape_char()?),
                Some('\n') | None => return Err(self.error("unterminated string literal")),
                Some(c) => out.push(c),
            }
        }
    }

    fn long_string_body(&mut self, quote: char) -> Result<String, RbmapError> {
        let mut out = String::new();
        loop {
            if self.peek() == Some(quote)
                && self.peek_at(1) == Some(quote)
                && self.peek_at(2) == Some(quote)
            {
                self.bump();
                self.bump();
                self.bump();
                return Ok(out);
            }
            match self.bump() {
                Some('\\') => out.push(self.escape_char()?),
                Some(c) => out.push(c),
                None => return Err(self.error("unterminated long string literal")),
            }
        }
    }

    fn escape_char(&mut self) -> Result<char, RbmapError> {
        match self.bump() {
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('b') => Ok('\u{0008}'),
            Some('f') => Ok('\u{000C}'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('\\') => Ok('\\'),
            Some('u') => self.unicode_escape(4),
            Some('U') => self.unicode_escape(8),
            Some(c) => Err(self.error(format!("invalid escape '\\{c}'"))),
            None => Err(self.error("unterminated escape sequence")),
        }
    }

    fn unicode_escape(&mut self, digits: usize) -> Result<char, RbmapError> {
        let mut value: u32 = 0;
        for _ in 0..digits {
            let digit = match self.bump().and_then(|c| c.to_digit(16)) {
                Some(d) => d,
                None => return Err(self.error("invalid unicode escape")),
            };
            value = value * 16 + digit;
        }
        char::from_u32(value).ok_or_else(|| self.error("invalid unicode code point"))
    }

    fn numeric_literal(&mut self) -> Result<Term, RbmapError> {
        let mut out = String::new();
        if matches!(self.peek(), Some('+' | '-')) {
            out.push(self.bump().unwrap_or('+'));
        }
        let digits_before = self.digits(&mut out);
        // A decimal point only belongs to the number when a digit follows,
        // otherwise it terminates the statement.
        if self.peek() == Some('.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            out.push('.');
            self.bump();
            self.digits(&mut out);
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            out.push(self.bump().unwrap_or('e'));
            if matches!(self.peek(), Some('+' | '-')) {
                out.push(self.bump().unwrap_or('+'));
            }
            if self.digits(&mut out) == 0 {
                return Err(self.error("malformed exponent"));
            }
        }
        if digits_before == 0 && !out.contains('.') {
            return Err(self.error("malformed numeric literal"));
        }
        Ok(Term::Literal(out))
    }

    fn digits(&mut self, out: &mut String) -> usize {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                out.push(c);
                self.bump();
                count += 1;
            } else {
                break;
            }
        }
        count
    }

    // =========================================================================
    // IRI RESOLUTION
    // =========================================================================

    fn resolve_reference(&self, reference: &str) -> String {
        if is_absolute_iri(reference) {
            return reference.to_string();
        }
        if reference.starts_with('#') {
            let stem = self.base.split('#').next().unwrap_or(&self.base);
            return format!("{stem}{reference}");
        }
        match self.base.rfind('/') {
            Some(i) => format!("{}{}", &self.base[..=i], reference),
            None => format!("{}{}", self.base, reference),
        }
    }

    // =========================================================================
    // LOW-LEVEL CURSOR
    // =========================================================================

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if let Some(ch) = c {
            self.pos += 1;
            if ch == '\n' {
                self.line += 1;
            }
        }
        c
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                _ => break,
            }
        }
    }

    fn expect(&mut self, wanted: char) -> Result<(), RbmapError> {
        self.skip_trivia();
        if self.peek() == Some(wanted) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(format!("expected '{wanted}'")))
        }
    }

    /// Word of ASCII letters at the cursor, consumed.
    fn bare_word(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphabetic() {
                out.push(c);
                self.bump();
            } else {
                break;
            }
        }
        out
    }

    /// True when `word` sits at the cursor as a whole keyword (the next
    /// character is not a name character).
    fn at_keyword(&self, word: &str) -> bool {
        for (i, expected) in word.chars().enumerate() {
            if self.peek_at(i) != Some(expected) {
                return false;
            }
        }
        !self
            .peek_at(word.chars().count())
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '%' | ':' | '.'))
    }

    /// Case-insensitive variant for the SPARQL-style directives.
    fn at_keyword_ci(&self, word: &str) -> bool {
        for (i, expected) in word.chars().enumerate() {
            let found = match self.peek_at(i) {
                Some(c) => c.to_ascii_uppercase(),
                None => return false,
            };
            if found != expected.to_ascii_uppercase() {
                return false;
            }
        }
        self.peek_at(word.chars().count())
            .is_none_or(|c| c.is_whitespace())
    }

    fn consume_word(&mut self, word: &str) {
        for _ in word.chars() {
            self.bump();
        }
    }

    fn error(&self, message: impl Into<String>) -> RbmapError {
        RbmapError::Parse {
            line: self.line,
            message: message.into(),
        }
    }
}

fn is_absolute_iri(iri: &str) -> bool {
    let mut chars = iri.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        if c == ':' {
            return true;
        }
        if !(c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
            return false;
        }
    }
    false
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Vec<Triple> {
        parse_turtle(input, "test:").expect("parse")
    }

    #[test]
    fn prefixed_names_expand() {
        let triples = parse("@prefix ex: <http://example.org/> .\nex:s ex:p ex:o .");
        assert_eq!(
            triples,
            vec![Triple::new(
                Term::iri("http://example.org/s"),
                Term::iri("http://example.org/p"),
                Term::iri("http://example.org/o"),
            )]
        );
    }

    #[test]
    fn empty_prefix_and_a_keyword() {
        let triples = parse(
            "@prefix : <http://example.org/> .\n@prefix rbmo: <http://purl.org/rbm/rbmo#> .\n\
             :kaiC a rbmo:Agent .",
        );
        assert_eq!(triples.len(), 1);
        assert_eq!(triples[0].predicate, Term::iri(vocab::RDF_TYPE));
        assert_eq!(triples[0].object, Term::iri("http://purl.org/rbm/rbmo#Agent"));
    }

    #[test]
    fn sparql_style_directives() {
        let triples = parse("PREFIX ex: <http://example.org/>\nex:s ex:p ex:o .");
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn semicolon_and_comma_lists() {
        let triples = parse(
            "@prefix ex: <http://example.org/> .\n\
             ex:s ex:p ex:a , ex:b ; ex:q ex:c .",
        );
        assert_eq!(triples.len(), 3);
        let objects: Vec<_> = triples.iter().map(|t| t.object.slug().to_string()).collect();
        assert_eq!(objects, vec!["a", "b", "c"]);
    }

    #[test]
    fn anonymous_blank_nodes_share_identity() {
        let triples = parse(
            "@prefix ex: <http://example.org/> .\n\
             ex:s ex:p [ ex:q ex:o1 ; ex:r ex:o2 ] .",
        );
        // Inner triples are emitted while the bracket is open, so the
        // containing statement lands last.
        assert_eq!(triples.len(), 3);
        let node = &triples[0].subject;
        assert!(node.is_blank());
        assert_eq!(&triples[1].subject, node);
        assert_eq!(&triples[2].object, node);
    }

    #[test]
    fn labelled_blank_nodes_keep_their_label() {
        let triples = parse(
            "@prefix ex: <http://example.org/> .\n\
             ex:a ex:bond _:p .\nex:b ex:bond _:p .",
        );
        assert_eq!(triples[0].object, Term::blank("p"));
        assert_eq!(triples[0].object, triples[1].object);
    }

    #[test]
    fn string_literals_with_escapes_and_annotations() {
        let triples = parse(
            "@prefix ex: <http://example.org/> .\n\
             @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\
             ex:s ex:label \"Kai\\tC\" ; ex:title \"histidine kinase\"@en ; \
             ex:count \"42\"^^xsd:integer .",
        );
        assert_eq!(triples[0].object, Term::literal("Kai\tC"));
        assert_eq!(triples[1].object, Term::literal("histidine kinase"));
        assert_eq!(triples[2].object, Term::literal("42"));
    }

    #[test]
    fn numeric_and_boolean_literals() {
        let triples = parse(
            "@prefix ex: <http://example.org/> .\n\
             ex:s ex:n 42 ; ex:d 3.25 ; ex:e 1e4 ; ex:b true .",
        );
        let objects: Vec<_> = triples.iter().map(|t| t.object.as_str().to_string()).collect();
        assert_eq!(objects, vec!["42", "3.25", "1e4", "true"]);
    }

    #[test]
    fn comments_are_ignored() {
        let triples = parse(
            "# leading comment\n@prefix ex: <http://example.org/> . # inline\nex:s ex:p ex:o .",
        );
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn relative_iris_resolve_against_base() {
        let triples = parse_turtle(
            "@base <http://example.org/model> .\n<#r1> <#p> <other> .",
            "unused:",
        )
        .expect("parse");
        assert_eq!(triples[0].subject, Term::iri("http://example.org/model#r1"));
        assert_eq!(triples[0].object, Term::iri("http://example.org/other"));
    }

    #[test]
    fn unknown_prefix_is_an_error_with_line() {
        let err = parse_turtle("@prefix ex: <http://example.org/> .\nex:s nope:p ex:o .", "t:")
            .expect_err("should not parse");
        assert!(matches!(err, RbmapError::Parse { line: 2, .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = parse_turtle(
            "@prefix ex: <http://example.org/> .\nex:s ex:p \"broken .",
            "t:",
        );
        assert!(matches!(err, Err(RbmapError::Parse { .. })));
    }

    #[test]
    fn collections_are_rejected() {
        let err = parse_turtle("@prefix ex: <http://e/> .\nex:s ex:p ( ex:a ex:b ) .", "t:");
        assert!(matches!(err, Err(RbmapError::Parse { .. })));
    }

    #[test]
    fn rbmo_rule_shape_parses() {
        let triples = parse(
            "@prefix rbmo: <http://purl.org/rbm/rbmo#> .\n\
             @prefix : <http://example.org/model#> .\n\
             :r1 rbmo:lhs [ rbmo:agent :A ; rbmo:state [ rbmo:binding rbmo:Nothing ; rbmo:site :x ] ] ;\n\
                 rbmo:rhs [ rbmo:agent :A ; rbmo:state [ rbmo:binding _:p ; rbmo:site :x ] ] .",
        );
        // 2 lhs/rhs links + 2 agent + 2 state + 2 binding + 2 site
        assert_eq!(triples.len(), 10);
        assert!(
            triples
                .iter()
                .any(|t| t.predicate == Term::iri(vocab::RBMO_BINDING)
                    && t.object == Term::blank("p"))
        );
    }
}

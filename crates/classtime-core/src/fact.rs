//! Ground symbolic facts exchanged with the external solver.
//!
//! A [`Fact`] is a predicate name applied to string and integer terms,
//! rendered in the solver's input language as `name("a",1)`. Facts flow
//! in both directions: input entities lower themselves into facts, and
//! candidate solutions come back as flat fact collections that the
//! output layer reconstructs.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One term of a fact: a quoted string or an integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Term {
    Str(String),
    Num(i64),
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::Str(s.to_string())
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::Str(s)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Num(n)
    }
}

impl From<bool> for Term {
    fn from(b: bool) -> Self {
        Term::Num(i64::from(b))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Str(s) => write!(f, "\"{s}\""),
            Term::Num(n) => write!(f, "{n}"),
        }
    }
}

/// A ground fact: predicate name plus terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Fact {
    pub predicate: String,
    pub terms: Vec<Term>,
}

/// Malformed fact text encountered while reading solver output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed fact '{text}': {reason}")]
pub struct FactSyntaxError {
    pub text: String,
    pub reason: &'static str,
}

impl Fact {
    pub fn new<T: Into<Term>>(predicate: &str, terms: impl IntoIterator<Item = T>) -> Self {
        Self {
            predicate: predicate.to_string(),
            terms: terms.into_iter().map(Into::into).collect(),
        }
    }

    /// String value of the `i`-th term.
    ///
    /// # Panics
    ///
    /// Panics if the term is missing or not a string. Callers use this
    /// only on predicates whose shape is fixed by the rule base; a
    /// mismatch means the rules and the reconstruction code disagree.
    pub fn str_term(&self, i: usize) -> &str {
        match self.terms.get(i) {
            Some(Term::Str(s)) => s,
            other => panic!(
                "fact '{self}': expected string at term {i}, found {other:?}"
            ),
        }
    }

    /// Integer value of the `i`-th term.
    ///
    /// # Panics
    ///
    /// Panics under the same contract as [`Fact::str_term`].
    pub fn num_term(&self, i: usize) -> i64 {
        match self.terms.get(i) {
            Some(Term::Num(n)) => *n,
            other => panic!(
                "fact '{self}': expected number at term {i}, found {other:?}"
            ),
        }
    }

    /// Parses a fact from its textual form, e.g. `class("mac111","bcc",0,1)`.
    ///
    /// A trailing `.` is accepted and ignored. Terms are quoted strings
    /// (no embedded quotes) or signed integers.
    pub fn parse(text: &str) -> Result<Fact, FactSyntaxError> {
        let err = |reason| FactSyntaxError {
            text: text.to_string(),
            reason,
        };

        let body = text.trim().trim_end_matches('.').trim();
        if body.is_empty() {
            return Err(err("empty fact"));
        }

        let Some(open) = body.find('(') else {
            // Zero-arity atom.
            if body.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Ok(Fact::new::<Term>(body, []));
            }
            return Err(err("predicate is not an identifier"));
        };

        let (name, rest) = body.split_at(open);
        let name = name.trim();
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(err("predicate is not an identifier"));
        }
        let inner = rest
            .strip_prefix('(')
            .and_then(|r| r.strip_suffix(')'))
            .ok_or_else(|| err("unbalanced parentheses"))?;

        let mut terms = Vec::new();
        if !inner.trim().is_empty() {
            for raw in inner.split(',') {
                let raw = raw.trim();
                if let Some(quoted) = raw.strip_prefix('"') {
                    let s = quoted
                        .strip_suffix('"')
                        .ok_or_else(|| err("unterminated string term"))?;
                    terms.push(Term::Str(s.to_string()));
                } else {
                    let n = raw
                        .parse::<i64>()
                        .map_err(|_| err("term is neither a string nor an integer"))?;
                    terms.push(Term::Num(n));
                }
            }
        }

        Ok(Fact {
            predicate: name.to_string(),
            terms,
        })
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.predicate)?;
        if self.terms.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{term}")?;
        }
        f.write_str(")")
    }
}

/// Renders facts as solver program text, one statement per line.
pub fn facts_to_asp(facts: &[Fact]) -> String {
    let mut out = String::new();
    for fact in facts {
        out.push_str(&fact.to_string());
        out.push_str(".\n");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let fact = Fact::new("num_classes", [Term::from("mac111"), Term::from(3i64)]);
        assert_eq!(fact.to_string(), r#"num_classes("mac111",3)"#);
    }

    #[test]
    fn test_display_zero_arity() {
        let fact = Fact::new::<Term>("base_case", []);
        assert_eq!(fact.to_string(), "base_case");
    }

    #[test]
    fn test_parse_round_trip() {
        let original = Fact::new(
            "class",
            [
                Term::from("mac111"),
                Term::from("bcc"),
                Term::from(0i64),
                Term::from(1i64),
            ],
        );
        let reparsed = Fact::parse(&format!("{original}.")).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_parse_tolerates_spacing() {
        let fact = Fact::parse(r#" jointed( "a" , "b" , "bcc" ) "#).unwrap();
        assert_eq!(fact.predicate, "jointed");
        assert_eq!(fact.terms.len(), 3);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Fact::parse("").is_err());
        assert!(Fact::parse("class(\"a\"").is_err());
        assert!(Fact::parse("class(a b)").is_err());
    }

    #[test]
    #[should_panic(expected = "expected string at term 0")]
    fn test_term_accessor_contract() {
        let fact = Fact::new("class", [Term::from(1i64)]);
        fact.str_term(0);
    }

    #[test]
    fn test_facts_to_asp() {
        let facts = vec![
            Fact::new("is_double", [Term::from("mac111")]),
            Fact::new("num_classes", [Term::from("mac111"), Term::from(2i64)]),
        ];
        assert_eq!(
            facts_to_asp(&facts),
            "is_double(\"mac111\").\nnum_classes(\"mac111\",2).\n"
        );
    }
}

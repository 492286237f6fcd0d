//! Test factories and fluent assertions for parse outcomes

use crate::engine::{ParseOutcome, RejectReason, SyntaxError};
use crate::token::TokenRecord;

// ============================================================================
// Factories
// ============================================================================

/// Make token records from (terminal, lexeme) pairs
pub fn records(pairs: &[(&str, &str)]) -> Vec<TokenRecord> {
    pairs
        .iter()
        .map(|(terminal, lexeme)| TokenRecord::new(*terminal, *lexeme))
        .collect()
}

/// Make token records whose lexeme is the terminal itself, as for
/// punctuation-only inputs
pub fn terminals(names: &[&str]) -> Vec<TokenRecord> {
    names
        .iter()
        .map(|name| TokenRecord::new(*name, *name))
        .collect()
}

// ============================================================================
// Entry Point
// ============================================================================

/// Create an assertion builder for a parse outcome
pub fn assert_outcome(outcome: &ParseOutcome) -> OutcomeAssertion<'_> {
    OutcomeAssertion { outcome }
}

// ============================================================================
// Outcome Assertions
// ============================================================================

pub struct OutcomeAssertion<'a> {
    outcome: &'a ParseOutcome,
}

impl<'a> OutcomeAssertion<'a> {
    /// Assert the input was accepted
    pub fn accepted(self) -> Self {
        assert!(
            self.outcome.is_accepted(),
            "Expected acceptance, found {:?}",
            self.outcome
        );
        self
    }

    /// Assert the input was rejected, switching to rejection assertions
    pub fn rejected(self) -> RejectionAssertion<'a> {
        match self.outcome.error() {
            Some(error) => RejectionAssertion { error },
            None => panic!("Expected rejection, found acceptance"),
        }
    }
}

// ============================================================================
// Rejection Assertions
// ============================================================================

pub struct RejectionAssertion<'a> {
    error: &'a SyntaxError,
}

impl<'a> RejectionAssertion<'a> {
    /// Assert the engine stopped on a terminal mismatch expecting `terminal`
    pub fn expecting(self, terminal: &str) -> Self {
        match &self.error.reason {
            RejectReason::UnexpectedToken { expected } => assert_eq!(
                expected, terminal,
                "Expected a mismatch on '{}', found one on '{}'",
                terminal, expected
            ),
            other => panic!(
                "Expected a terminal mismatch on '{}', found {:?}",
                terminal, other
            ),
        }
        self
    }

    /// Assert the engine stopped on an empty table cell for `nonterminal`
    pub fn missing_production_for(self, name: &str) -> Self {
        match &self.error.reason {
            RejectReason::NoProduction { nonterminal } => assert_eq!(
                nonterminal, name,
                "Expected a missing production for '{}', found one for '{}'",
                name, nonterminal
            ),
            other => panic!(
                "Expected a missing production for '{}', found {:?}",
                name, other
            ),
        }
        self
    }

    /// Assert the lookahead terminal the engine stopped on
    pub fn with_lookahead(self, terminal: &str) -> Self {
        assert_eq!(
            self.error.lookahead, terminal,
            "Expected lookahead '{}', found '{}'",
            terminal, self.error.lookahead
        );
        self
    }

    /// Assert the token index the engine stopped at
    pub fn at_position(self, position: usize) -> Self {
        assert_eq!(
            self.error.position, position,
            "Expected rejection at token {}, found token {}",
            position, self.error.position
        );
        self
    }
}

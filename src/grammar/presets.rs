//! Built-in grammars.
//!
//!     The classic left-factored arithmetic expression grammar, the usual
//!     first exercise for a predictive parser. It pairs with the expression
//!     tokenizer in [`crate::lexing`], which folds identifiers and numbers
//!     into the `id` terminal.

use once_cell::sync::Lazy;

use crate::grammar::Grammar;

/// Source text of the left-factored expression grammar.
pub const EXPRESSION_GRAMMAR: &str = "\
E : T E'
E' : + T E'
E' : epsilon
T : F T'
T' : * F T'
T' : epsilon
F : ( E )
F : id
";

/// The expression grammar, loaded once.
pub static EXPRESSION: Lazy<Grammar> =
    Lazy::new(|| Grammar::load(EXPRESSION_GRAMMAR).unwrap());

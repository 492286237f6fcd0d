//! End-to-end scenarios driving grammar text through table build and parse
//!
//! Each test loads a small grammar, builds its table, and checks both the
//! final verdict and the event stream the engine reports.

use rstest::rstest;

use llone::events::{EventLog, ParseEvent};
use llone::grammar::presets::EXPRESSION;
use llone::grammar::Grammar;
use llone::lexing::token_records;
use llone::parse;
use llone::sets::SymbolSets;
use llone::table::{build_table, ParseTable};
use llone::testing::{assert_outcome, records, terminals};

fn sum_grammar() -> Grammar {
    Grammar::load("E : T E'\nE' : + T E'\nE' : epsilon\nT : id").expect("grammar should load")
}

#[test]
fn test_accepts_sum_with_full_event_trace() {
    let grammar = sum_grammar();
    let table = ParseTable::build(&grammar).table;
    let mut log = EventLog::new();

    let outcome = parse(&table, &terminals(&["id", "+", "id", "$"]), &mut log);

    assert_outcome(&outcome).accepted();

    let apply = |name: &str, index: usize| ParseEvent::RuleApplied {
        nonterminal: name.to_string(),
        production: grammar.productions_of(name)[index].clone(),
    };
    let matched = |terminal: &str, position: usize| ParseEvent::TerminalMatched {
        terminal: terminal.to_string(),
        lexeme: terminal.to_string(),
        position,
    };
    assert_eq!(
        log.into_events(),
        [
            apply("E", 0),
            apply("T", 0),
            matched("id", 0),
            apply("E'", 0),
            matched("+", 1),
            apply("T", 0),
            matched("id", 2),
            apply("E'", 1),
            matched("$", 3),
            ParseEvent::Accepted,
        ]
    );
}

#[test]
fn test_rejects_truncated_sum_at_end_marker() {
    let grammar = sum_grammar();
    let table = ParseTable::build(&grammar).table;
    let mut log = EventLog::new();

    let outcome = parse(&table, &terminals(&["id", "+", "$"]), &mut log);

    assert_outcome(&outcome)
        .rejected()
        .missing_production_for("T")
        .with_lookahead("$")
        .at_position(2);
    assert_eq!(table.expected_for("T"), ["id"]);
    assert_eq!(
        log.events().last(),
        Some(&ParseEvent::Rejected { position: 2 })
    );
}

#[test]
fn test_rejection_carries_the_offending_lexeme() {
    let table = ParseTable::build(&sum_grammar()).table;
    let tokens = records(&[("id", "price"), ("id", "qty"), ("$", "$")]);

    let outcome = table.parse(&tokens);

    assert_outcome(&outcome)
        .rejected()
        .missing_production_for("E'")
        .with_lookahead("id")
        .at_position(1);
    let error = outcome.error().expect("outcome should be rejected");
    assert_eq!(error.lexeme, "qty");
    assert_eq!(
        error.to_string(),
        "no rule for 'E'' on 'id' (lexeme 'qty') at token 1"
    );
}

#[test]
fn test_ambiguous_cell_keeps_last_production_and_warns() {
    // T : id and T : epsilon both land on lookahead id, since id is in
    // Follow(T). The empty production is processed last, so it owns the
    // cell.
    let grammar = Grammar::load("S : T id\nT : id\nT : epsilon").expect("grammar should load");
    let sets = SymbolSets::compute(&grammar);
    let mut log = EventLog::new();

    let build = build_table(&grammar, &sets, &mut log);

    assert_eq!(build.conflicts.len(), 1);
    let conflict = &build.conflicts[0];
    assert_eq!(conflict.nonterminal, "T");
    assert_eq!(conflict.lookahead, "id");
    assert_eq!(conflict.discarded.to_string(), "id");
    assert!(conflict.winner.is_empty());
    assert!(log.events().contains(&ParseEvent::TableConflict {
        nonterminal: "T".to_string(),
        lookahead: "id".to_string(),
    }));

    let cell = build
        .table
        .production_for("T", "id")
        .expect("cell should exist");
    assert!(cell.is_empty());
}

#[rstest]
#[case::sum_and_product("a + b * c", true)]
#[case::parenthesized("( a + b ) * c", true)]
#[case::single_identifier("a", true)]
#[case::numbers_fold_to_id("12 + 3.5", true)]
#[case::dangling_operator("a +", false)]
#[case::unclosed_paren("( a", false)]
#[case::adjacent_identifiers("a b", false)]
#[case::leading_operator("+ a", false)]
#[case::empty_input("", false)]
fn test_expression_verdicts(#[case] source: &str, #[case] accepted: bool) {
    let table = ParseTable::build(&EXPRESSION).table;
    let tokens = token_records(source).expect("input should tokenize");
    assert_eq!(
        table.parse(&tokens).is_accepted(),
        accepted,
        "wrong verdict for {:?}",
        source
    );
}

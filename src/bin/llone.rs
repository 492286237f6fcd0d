//! Command-line interface for llone
//! This binary drives the predictive parser: build tables from grammar
//! files, parse expression input against them, and inspect the token
//! streams the engine consumes.
//!
//! Usage:
//!   llone parse `<input>` [--grammar `<path>` | --table `<path>`]  - Parse expression input
//!   llone table `<grammar>` [--out `<path>`]                     - Show First/Follow sets and the parse table
//!   llone tokens `<input>` [--json]                            - Tokenize expression input
//!   llone scan `<input>`                                       - Scan color call input

use clap::{Arg, ArgAction, Command};

use llone::events::{EventSink, NullSink, ParseEvent};
use llone::grammar::{load_grammar, presets};
use llone::lexing::{token_records, tokenize, Token};
use llone::sets::SymbolSets;
use llone::table::{build_table, read_table, write_table, ParseTable};
use llone::{parse, RejectReason};

fn main() {
    let matches = Command::new("llone")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A grammar-driven LL(1) predictive parser")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parse expression input with a predictive table")
                .arg(
                    Arg::new("input")
                        .help("Path to the expression input file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("grammar")
                        .long("grammar")
                        .short('g')
                        .help("Grammar file to build the table from (defaults to the built-in expression grammar)"),
                )
                .arg(
                    Arg::new("table")
                        .long("table")
                        .short('t')
                        .conflicts_with("grammar")
                        .help("Saved table file to parse with instead of building one"),
                )
                .arg(
                    Arg::new("save-table")
                        .long("save-table")
                        .help("Write the table used for parsing to this path"),
                )
                .arg(
                    Arg::new("emit-tokens")
                        .long("emit-tokens")
                        .action(ArgAction::SetTrue)
                        .help("Print the token records before parsing"),
                )
                .arg(
                    Arg::new("trace")
                        .long("trace")
                        .action(ArgAction::SetTrue)
                        .help("Print every engine step while parsing"),
                ),
        )
        .subcommand(
            Command::new("table")
                .about("Build a parse table and show how it was derived")
                .arg(
                    Arg::new("grammar")
                        .help("Path to the grammar file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Write the table text to this path"),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Tokenize expression input")
                .arg(
                    Arg::new("input")
                        .help("Path to the expression input file")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print engine-ready token records as JSON"),
                ),
        )
        .subcommand(
            Command::new("scan")
                .about("Scan color call input")
                .arg(
                    Arg::new("input")
                        .help("Path to the color call input file")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    // Handle subcommands
    match matches.subcommand() {
        Some(("parse", parse_matches)) => {
            let input = parse_matches.get_one::<String>("input").unwrap();
            handle_parse_command(
                input,
                parse_matches.get_one::<String>("grammar"),
                parse_matches.get_one::<String>("table"),
                parse_matches.get_one::<String>("save-table"),
                parse_matches.get_flag("emit-tokens"),
                parse_matches.get_flag("trace"),
            );
        }
        Some(("table", table_matches)) => {
            let grammar = table_matches.get_one::<String>("grammar").unwrap();
            handle_table_command(grammar, table_matches.get_one::<String>("out"));
        }
        Some(("tokens", tokens_matches)) => {
            let input = tokens_matches.get_one::<String>("input").unwrap();
            handle_tokens_command(input, tokens_matches.get_flag("json"));
        }
        Some(("scan", scan_matches)) => {
            let input = scan_matches.get_one::<String>("input").unwrap();
            handle_scan_command(input);
        }
        _ => unreachable!(),
    }
}

/// Prints loader and table-fill collisions as warnings, swallowing the rest.
struct WarnSink;

impl EventSink for WarnSink {
    fn emit(&mut self, event: ParseEvent) {
        match event {
            ParseEvent::LineSkipped { .. } | ParseEvent::TableConflict { .. } => {
                eprintln!("Warning: {}", event)
            }
            _ => {}
        }
    }
}

/// Prints every engine step, for `--trace`.
struct TraceSink;

impl EventSink for TraceSink {
    fn emit(&mut self, event: ParseEvent) {
        eprintln!("{}", event);
    }
}

fn read_file(path: &str) -> String {
    std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    })
}

/// Handle the parse command
fn handle_parse_command(
    input: &str,
    grammar_path: Option<&String>,
    table_path: Option<&String>,
    save_table: Option<&String>,
    emit_tokens: bool,
    trace: bool,
) {
    let source = read_file(input);
    let tokens = token_records(&source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if emit_tokens {
        for record in &tokens {
            println!("{}\t{}", record.terminal, record.lexeme);
        }
    }

    let table = match table_path {
        Some(path) => {
            let text = read_file(path);
            read_table(&text, &mut WarnSink).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            })
        }
        None => build_from_grammar(grammar_path).table,
    };

    if let Some(path) = save_table {
        std::fs::write(path, write_table(&table)).unwrap_or_else(|e| {
            eprintln!("Error writing table: {}", e);
            std::process::exit(1);
        });
    }

    let outcome = if trace {
        parse(&table, &tokens, &mut TraceSink)
    } else {
        parse(&table, &tokens, &mut NullSink)
    };

    match outcome.error() {
        None => println!("input accepted"),
        Some(error) => {
            eprintln!("Error: {}", error);
            if let RejectReason::NoProduction { nonterminal } = &error.reason {
                let expected = table.expected_for(nonterminal);
                if !expected.is_empty() {
                    eprintln!("expected one of: {}", expected.join(", "));
                }
            }
            std::process::exit(1);
        }
    }
}

/// Build a table from a grammar file, or from the built-in expression
/// grammar when no path is given.
fn build_from_grammar(grammar_path: Option<&String>) -> llone::TableBuild {
    let source = match grammar_path {
        Some(path) => read_file(path),
        None => presets::EXPRESSION_GRAMMAR.to_string(),
    };
    let grammar = load_grammar(&source, &mut WarnSink).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let sets = SymbolSets::compute(&grammar);
    build_table(&grammar, &sets, &mut WarnSink)
}

/// Handle the table command
fn handle_table_command(grammar_path: &str, out: Option<&String>) {
    let source = read_file(grammar_path);
    let grammar = load_grammar(&source, &mut WarnSink).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let sets = SymbolSets::compute(&grammar);

    println!("First sets:");
    for (name, first) in sets.iter_first() {
        let mut names: Vec<&str> = first.terminals.iter().map(String::as_str).collect();
        if first.derives_empty {
            names.push("epsilon");
        }
        println!("  FIRST({}) = {{ {} }}", name, names.join(", "));
    }

    println!("Follow sets:");
    for (name, follow) in sets.iter_follow() {
        let names: Vec<&str> = follow.iter().map(String::as_str).collect();
        println!("  FOLLOW({}) = {{ {} }}", name, names.join(", "));
    }

    let build = build_table(&grammar, &sets, &mut WarnSink);

    println!("Parse table:");
    for (nonterminal, lookahead, production) in build.table.cells() {
        println!("  M[{}, {}] = {}", nonterminal, lookahead, production);
    }

    if !build.is_ll1() {
        eprintln!(
            "grammar is not LL(1): {} cell(s) were overwritten",
            build.conflicts.len()
        );
    }

    if let Some(path) = out {
        std::fs::write(path, write_table(&build.table)).unwrap_or_else(|e| {
            eprintln!("Error writing table: {}", e);
            std::process::exit(1);
        });
        println!("table written to {}", path);
    }
}

/// Handle the tokens command
fn handle_tokens_command(input: &str, json: bool) {
    let source = read_file(input);

    if json {
        let records = token_records(&source).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        let rendered = serde_json::to_string_pretty(&records).unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
        println!("{}", rendered);
        return;
    }

    let tokens = tokenize(&source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    for (token, _) in tokens {
        match token {
            Token::Datatype(_) | Token::Identifier(_) | Token::Number(_) => {
                println!("{} {}", token, token.lexeme())
            }
            other => println!("{}", other),
        }
    }
}

use llone::scan::scan;
/// Handle the scan command
fn handle_scan_command(input: &str) {
    let source = read_file(input);
    let report = scan(&source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    for record in &report.records {
        println!("{}", record);
    }

    println!();
    println!("Colors used:");
    for color in &report.colors_used {
        println!("{}", color);
    }
}

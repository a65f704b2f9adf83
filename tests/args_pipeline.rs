//! Tests for the tokenizer → collator → registry pipeline.

use cmdargs::args::{collate, OptionKind, OptionRegistry};
use cmdargs::{ParseError, ParserConfig};

fn registry() -> OptionRegistry {
    let mut registry = OptionRegistry::new();
    registry
        .register(OptionKind::MultiValue, &["input", "i"])
        .unwrap();
    registry
        .register(OptionKind::SingleValue, &["output", "o"])
        .unwrap();
    registry.register(OptionKind::Flag, &["verbose", "v"]).unwrap();
    registry
}

/// Feed every collated record into the registry, stopping at the first error.
fn run(registry: &mut OptionRegistry, args: &[&str]) -> Result<(), (ParseError, Vec<String>)> {
    let mut collator = collate(args.iter().copied(), &ParserConfig::default());
    while let Some(record) = collator.next() {
        let record = record.map_err(|e| (e, collator.take_remaining()))?;
        if let Err(e) = registry.add(&record.name, record.values) {
            let mut tail = record.raw;
            tail.extend(collator.take_remaining());
            return Err((e, tail));
        }
    }
    Ok(())
}

/// Test that values arriving in one call or as repeats accumulate identically.
#[test]
fn test_multi_value_accumulation_is_order_preserving() {
    let forms: [&[&str]; 4] = [
        &["--input", "a", "b", "c"],
        &["--input=a", "--input=b", "--input=c"],
        &["-i", "a", "--input", "b", "-ic"],
        &["-i=a", "--in", "b", "c"],
    ];

    for args in forms {
        let mut registry = registry();
        run(&mut registry, args).unwrap();
        assert_eq!(
            registry.option_values("input").unwrap(),
            ["a", "b", "c"],
            "args: {:?}",
            args
        );
    }
}

/// Test the full grammar of short and long options.
#[test]
fn test_mixed_command_line() {
    let mut registry = registry();
    run(&mut registry, &["-oout.txt", "--verb=Yes", "--input", "x.txt"]).unwrap();

    assert_eq!(registry.single_value("output").unwrap(), "out.txt");
    assert_eq!(registry.single_value("v").unwrap(), "true");
    assert!(registry.has_option_values("input"));
    assert!(registry.has_option_name("o"));
    assert!(!registry.has_option_name("out"));
}

/// Test that a value without an owning option fails with the tail preserved.
#[test]
fn test_leading_bare_value() {
    let mut registry = registry();
    let (err, remaining) = run(&mut registry, &["stray", "--verbose"]).unwrap_err();

    assert_eq!(err.to_string(), "illegal option: stray");
    assert_eq!(remaining, vec!["stray", "--verbose"]);
}

/// Test that greedy folding hands bare values to the preceding flag.
#[test]
fn test_bare_value_after_flag_is_folded_into_it() {
    let mut registry = registry();
    let (err, _) = run(&mut registry, &["--verbose", "file.txt"]).unwrap_err();
    assert!(matches!(err, ParseError::IllegalFlagValue { .. }));
}

/// Test that a malformed token stops the pipeline and keeps it for the tail.
#[test]
fn test_malformed_token_reports_untouched_tail() {
    let mut registry = registry();
    let (err, remaining) =
        run(&mut registry, &["--input", "a", "b", "--", "--output", "x"]).unwrap_err();

    assert_eq!(err.error_type(), "option_name");
    assert_eq!(remaining, vec!["--input", "a", "b", "--", "--output", "x"]);
    assert!(!registry.has_option_values("input"));
}

/// Test that the tail repeats arguments exactly as they were typed.
#[test]
fn test_failure_tail_is_verbatim() {
    let mut registry = registry();
    let (err, remaining) =
        run(&mut registry, &["-ofirst", "-o=second", "--v=yes", "-ix"]).unwrap_err();

    assert!(matches!(err, ParseError::TooManyValues { count: 2, .. }));
    assert_eq!(remaining, vec!["-ofirst", "-o=second", "--v=yes", "-ix"]);
}

/// Test that unknown and ambiguous names are distinguished.
#[test]
fn test_unknown_and_ambiguous_names() {
    let mut registry = OptionRegistry::new();
    registry
        .register(OptionKind::SingleValue, &["foobar"])
        .unwrap();
    registry
        .register(OptionKind::SingleValue, &["football"])
        .unwrap();

    let (err, _) = run(&mut registry, &["--foo", "x"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "option '--foo' is ambiguous, possible matches: --foobar, --football"
    );

    let (err, _) = run(&mut registry, &["--fobar", "x"]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unknown option '--fobar', did you mean '--foobar'?"
    );
}

//! Unit tests for the env_store module.
//! No filesystem, timing, or external dependencies.

#![allow(clippy::unwrap_used)]

use futures::{FutureExt, StreamExt};

use crate::env_store::{
    ChangeSource, EnvChange, EnvStore, EnvValue, UnsupportedValueType, ValueType, parse_str,
};

use super::diff::diff_maps;

#[test]
fn parse_skips_comments_blanks_and_malformed_lines() {
    let parsed = parse_str("HOST=localhost\n#comment\n\nBAD LINE\nPORT=80\n");

    assert_eq!(
        parsed,
        vec![
            ("HOST".to_string(), "localhost".to_string()),
            ("PORT".to_string(), "80".to_string()),
        ]
    );
}

#[test]
fn parse_splits_at_first_equals() {
    assert_eq!(
        parse_str("K==v"),
        vec![("K".to_string(), "=v".to_string())]
    );
    assert_eq!(
        parse_str("A=b=c"),
        vec![("A".to_string(), "b=c".to_string())]
    );
}

#[test]
fn parse_trims_surrounding_whitespace() {
    assert_eq!(
        parse_str("  K  =  v  \n"),
        vec![("K".to_string(), "v".to_string())]
    );
}

#[test]
fn parse_keeps_empty_values() {
    assert_eq!(parse_str("K=\n"), vec![("K".to_string(), String::new())]);
}

#[test]
fn parse_skips_empty_keys() {
    assert!(parse_str("=v\n").is_empty());
    assert!(parse_str("   =v\n").is_empty());
}

#[test]
fn parse_tolerates_crlf() {
    assert_eq!(
        parse_str("A=1\r\nB=2\r\n"),
        vec![
            ("A".to_string(), "1".to_string()),
            ("B".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn parse_skips_indented_comments() {
    assert!(parse_str("   # indented comment\n").is_empty());
}

#[test]
fn parse_keeps_hash_inside_values() {
    assert_eq!(
        parse_str("K=a#b\n"),
        vec![("K".to_string(), "a#b".to_string())]
    );
}

#[test]
fn parse_emits_duplicates_in_order() {
    assert_eq!(
        parse_str("K=1\nK=2\n"),
        vec![
            ("K".to_string(), "1".to_string()),
            ("K".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn bool_vocabulary_accepts_exactly_twelve_literals() {
    for raw in ["1", "t", "T", "TRUE", "true", "True"] {
        assert_eq!(
            EnvValue::parse_as(raw, ValueType::Bool),
            Some(EnvValue::Bool(true)),
            "expected '{raw}' to parse as true"
        );
    }

    for raw in ["0", "f", "F", "FALSE", "false", "False"] {
        assert_eq!(
            EnvValue::parse_as(raw, ValueType::Bool),
            Some(EnvValue::Bool(false)),
            "expected '{raw}' to parse as false"
        );
    }

    for raw in ["yes", "no", "Y", "tRue", "TRUE ", "2", ""] {
        assert_eq!(
            EnvValue::parse_as(raw, ValueType::Bool),
            None,
            "expected '{raw}' to be rejected"
        );
    }
}

#[test]
fn int_parsing_is_decimal_i64() {
    assert_eq!(
        EnvValue::parse_as("8080", ValueType::Int),
        Some(EnvValue::Int(8080))
    );
    assert_eq!(
        EnvValue::parse_as("-5", ValueType::Int),
        Some(EnvValue::Int(-5))
    );

    assert_eq!(EnvValue::parse_as("1.5", ValueType::Int), None);
    assert_eq!(EnvValue::parse_as("notanumber", ValueType::Int), None);
    // One past i64::MAX overflows, which is a coercion failure.
    assert_eq!(
        EnvValue::parse_as("9223372036854775808", ValueType::Int),
        None
    );
}

#[test]
fn float_parsing_accepts_exponents() {
    assert_eq!(
        EnvValue::parse_as("1.5", ValueType::Float),
        Some(EnvValue::Float(1.5))
    );
    assert_eq!(
        EnvValue::parse_as("2e3", ValueType::Float),
        Some(EnvValue::Float(2000.0))
    );
    assert_eq!(
        EnvValue::parse_as("-0.5", ValueType::Float),
        Some(EnvValue::Float(-0.5))
    );

    assert_eq!(EnvValue::parse_as("abc", ValueType::Float), None);
}

#[test]
fn string_parsing_keeps_raw_text_verbatim() {
    assert_eq!(
        EnvValue::parse_as(" spaced ", ValueType::String),
        Some(EnvValue::Str(" spaced ".to_string()))
    );
}

#[test]
fn coercion_table_matches_scalars_to_their_own_type_only() {
    assert_eq!(
        EnvValue::Int(5).coerce(ValueType::Int),
        Some(EnvValue::Int(5))
    );
    assert_eq!(
        EnvValue::Bool(true).coerce(ValueType::Bool),
        Some(EnvValue::Bool(true))
    );
    assert_eq!(
        EnvValue::Float(0.5).coerce(ValueType::Float),
        Some(EnvValue::Float(0.5))
    );

    // No formatting back to string, no cross-scalar conversion.
    assert_eq!(EnvValue::Int(5).coerce(ValueType::String), None);
    assert_eq!(EnvValue::Int(5).coerce(ValueType::Float), None);
    assert_eq!(EnvValue::Bool(true).coerce(ValueType::Int), None);
    assert_eq!(EnvValue::Float(0.5).coerce(ValueType::Int), None);
}

#[test]
fn str_coerces_toward_any_parseable_target() {
    let raw = EnvValue::Str("42".to_string());

    assert_eq!(
        raw.coerce(ValueType::String),
        Some(EnvValue::Str("42".to_string()))
    );
    assert_eq!(raw.coerce(ValueType::Int), Some(EnvValue::Int(42)));
    assert_eq!(raw.coerce(ValueType::Float), Some(EnvValue::Float(42.0)));
    assert_eq!(raw.coerce(ValueType::Bool), None);

    assert_eq!(
        EnvValue::Str("1.5".to_string()).coerce(ValueType::Int),
        None
    );
}

#[test]
fn value_type_reports_current_tag() {
    assert_eq!(
        EnvValue::Str(String::new()).value_type(),
        ValueType::String
    );
    assert_eq!(EnvValue::Int(0).value_type(), ValueType::Int);
    assert_eq!(EnvValue::Bool(false).value_type(), ValueType::Bool);
    assert_eq!(EnvValue::Float(0.0).value_type(), ValueType::Float);
}

#[test]
fn value_type_names_round_trip() {
    for (name, value_type) in [
        ("string", ValueType::String),
        ("int", ValueType::Int),
        ("bool", ValueType::Bool),
        ("float", ValueType::Float),
    ] {
        assert_eq!(name.parse::<ValueType>().unwrap(), value_type);
        assert_eq!(value_type.to_string(), name);
    }

    let err = "double".parse::<ValueType>().unwrap_err();
    assert_eq!(err, UnsupportedValueType("double".to_string()));
    assert_eq!(err.to_string(), "unsupported value type: double");
}

#[test]
fn env_change_new_stamps_current_time() {
    let change = EnvChange::new(
        "PORT".to_string(),
        Some(EnvValue::Str("8080".to_string())),
        Some(EnvValue::Str("9090".to_string())),
        ChangeSource::Reload,
    );

    assert_eq!(change.key, "PORT");
    assert_eq!(change.old_value, Some(EnvValue::Str("8080".to_string())));
    assert_eq!(change.new_value, Some(EnvValue::Str("9090".to_string())));
    assert_eq!(change.source, ChangeSource::Reload);
    assert!(change.timestamp.elapsed().as_secs() < 1);
}

#[test]
fn diff_reports_added_removed_and_changed_keys() {
    let old = [
        ("GONE".to_string(), EnvValue::Str("x".to_string())),
        ("KEPT".to_string(), EnvValue::Str("same".to_string())),
        ("EDITED".to_string(), EnvValue::Str("before".to_string())),
    ]
    .into_iter()
    .collect();

    let new = [
        ("KEPT".to_string(), EnvValue::Str("same".to_string())),
        ("EDITED".to_string(), EnvValue::Str("after".to_string())),
        ("ADDED".to_string(), EnvValue::Str("y".to_string())),
    ]
    .into_iter()
    .collect();

    let mut changes = diff_maps(&old, &new, ChangeSource::Reload);
    changes.sort_by(|a, b| a.key.cmp(&b.key));

    assert_eq!(changes.len(), 3);

    assert_eq!(changes[0].key, "ADDED");
    assert_eq!(changes[0].old_value, None);
    assert_eq!(changes[0].new_value, Some(EnvValue::Str("y".to_string())));

    assert_eq!(changes[1].key, "EDITED");
    assert_eq!(
        changes[1].old_value,
        Some(EnvValue::Str("before".to_string()))
    );
    assert_eq!(
        changes[1].new_value,
        Some(EnvValue::Str("after".to_string()))
    );

    assert_eq!(changes[2].key, "GONE");
    assert_eq!(changes[2].old_value, Some(EnvValue::Str("x".to_string())));
    assert_eq!(changes[2].new_value, None);

    for change in &changes {
        assert_eq!(change.source, ChangeSource::Reload);
    }
}

#[test]
fn diff_treats_reloaded_memoised_scalars_as_unchanged() {
    let old = [("PORT".to_string(), EnvValue::Int(8080))]
        .into_iter()
        .collect();
    let new = [("PORT".to_string(), EnvValue::Str("8080".to_string()))]
        .into_iter()
        .collect();

    assert!(diff_maps(&old, &new, ChangeSource::Reload).is_empty());
}

#[test]
fn diff_still_reports_memoised_scalars_whose_raw_text_changed() {
    let old = [("PORT".to_string(), EnvValue::Int(8080))]
        .into_iter()
        .collect();
    let new = [("PORT".to_string(), EnvValue::Str("9090".to_string()))]
        .into_iter()
        .collect();

    let changes = diff_maps(&old, &new, ChangeSource::Reload);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].old_value, Some(EnvValue::Int(8080)));
    assert_eq!(
        changes[0].new_value,
        Some(EnvValue::Str("9090".to_string()))
    );
}

#[test]
fn empty_path_defaults_to_dot_env() {
    let store = EnvStore::new("");
    assert_eq!(store.path(), std::path::Path::new(".env"));

    let explicit = EnvStore::new("/tmp/custom.env");
    assert_eq!(explicit.path(), std::path::Path::new("/tmp/custom.env"));
}

#[test]
fn fresh_store_is_empty() {
    let store = EnvStore::new("/tmp/unused.env");

    assert_eq!(store.get("ANY"), None);
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn subscription_starts_quiet() {
    let store = EnvStore::new("/tmp/unused.env");

    let mut all = Box::pin(store.subscribe_to_key("*"));
    assert!(all.next().now_or_never().is_none());
}

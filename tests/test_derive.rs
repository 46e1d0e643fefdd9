//! Unit tests for derived-variable construction

use scfa::pipeline::{derive_all, schema, AnalysisError};

#[path = "common/mod.rs"]
mod common;

#[test]
fn black_nonlatino_requires_both_codes() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    assert_eq!(
        common::indicator_values(&derived, schema::BLACK_NONLATINO),
        vec![1, 0, 0, 0],
        "only race 2 AND ethnicity 5 should set the indicator"
    );
}

#[test]
fn rejected_matches_both_decision_codes() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    assert_eq!(
        common::indicator_values(&derived, schema::REJECTED),
        vec![1, 0, 1, 0],
        "decision codes 1 and 3 are rejections; 2 and missing are not"
    );
}

#[test]
fn delinquency_indicators_use_the_yes_sentinel() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    assert_eq!(
        common::indicator_values(&derived, schema::BANKRUPTCY_FLAG),
        vec![1, 0, 0, 0]
    );
    assert_eq!(
        common::indicator_values(&derived, schema::FORECLOSURE_FLAG),
        vec![0, 1, 0, 0]
    );
    assert_eq!(
        common::indicator_values(&derived, schema::ONTIME_FLAG),
        vec![1, 0, 1, 1]
    );
}

#[test]
fn aggregate_sums_cover_all_source_columns() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();

    let totalincome = common::float_values(&derived, schema::TOTAL_INCOME);
    assert_eq!(
        totalincome,
        vec![Some(1200.0), Some(2400.0), Some(0.0), Some(600.0)]
    );

    let roughassets = common::float_values(&derived, schema::ROUGH_ASSETS);
    assert_eq!(
        roughassets,
        vec![Some(24000.0), Some(0.0), Some(12000.0), Some(6000.0)]
    );

    let roughdebts = common::float_values(&derived, schema::ROUGH_DEBTS);
    assert_eq!(
        roughdebts,
        vec![Some(1100.0), Some(0.0), Some(11000.0), Some(0.0)]
    );
}

#[test]
fn net_worth_is_assets_minus_debts_exactly() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    let assets = common::float_values(&derived, schema::ROUGH_ASSETS);
    let debts = common::float_values(&derived, schema::ROUGH_DEBTS);
    let net_worth = common::float_values(&derived, schema::ROUGH_NW);

    for row in 0..derived.height() {
        assert_eq!(
            net_worth[row],
            Some(assets[row].unwrap() - debts[row].unwrap()),
            "roughNW must equal roughassets - roughdebts exactly at row {row}"
        );
    }
}

#[test]
fn log_of_positive_income_is_exact() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    let lnincome = common::float_values(&derived, schema::LN_INCOME);

    let expected = 50_000.0f64.ln();
    assert!(
        (lnincome[0].unwrap() - expected).abs() < 1e-12,
        "lnincome should equal ln(income) for positive income"
    );
    assert!(
        (lnincome[3].unwrap() - 120_000.0f64.ln()).abs() < 1e-12
    );
}

#[test]
fn log_of_non_positive_income_is_non_finite() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    let lnincome = common::float_values(&derived, schema::LN_INCOME);

    // Row 1 has income 0, row 2 has income -5. Both must be non-finite
    // sentinels so the model filter can drop them, never a panic.
    assert!(
        !lnincome[1].unwrap().is_finite(),
        "ln(0) should be non-finite"
    );
    assert!(
        !lnincome[2].unwrap().is_finite(),
        "ln of a negative value should be non-finite"
    );
}

#[test]
fn log_net_worth_follows_net_worth() {
    let derived = derive_all(&common::create_survey_dataframe()).unwrap();
    let ln_nw = common::float_values(&derived, schema::LN_ROUGH_NW);

    assert!((ln_nw[0].unwrap() - 22_900.0f64.ln()).abs() < 1e-12);
    assert!(!ln_nw[1].unwrap().is_finite(), "roughNW of 0 has no finite log");
}

#[test]
fn derivation_is_idempotent() {
    let raw = common::create_survey_dataframe();
    let first = derive_all(&raw).unwrap();
    let second = derive_all(&raw).unwrap();

    assert_eq!(
        common::indicator_values(&first, schema::REJECTED),
        common::indicator_values(&second, schema::REJECTED)
    );
    assert_eq!(
        common::float_values(&first, schema::ROUGH_NW),
        common::float_values(&second, schema::ROUGH_NW)
    );
}

#[test]
fn raw_columns_are_left_untouched() {
    let raw = common::create_survey_dataframe();
    let derived = derive_all(&raw).unwrap();

    assert_eq!(derived.height(), raw.height());
    assert_eq!(
        common::float_values(&derived, schema::INCOME),
        common::float_values(&raw, schema::INCOME),
        "derivation must not mutate raw columns"
    );
}

#[test]
fn missing_raw_column_is_a_value_error() {
    let raw = common::create_survey_dataframe();
    let truncated = raw.drop(schema::RACE).unwrap();

    let err = derive_all(&truncated).unwrap_err();
    match err {
        AnalysisError::Value { column, stage } => {
            assert_eq!(column, schema::RACE);
            assert_eq!(stage, "derive");
        }
        other => panic!("expected a Value error, got: {other}"),
    }
}

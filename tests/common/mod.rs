//! Shared test utilities and fixture generators
#![allow(dead_code)]

use polars::prelude::*;
use scfa::pipeline::schema;

/// Create a four-respondent survey frame with known raw codes.
///
/// Expected derivations:
/// - `blacknonlatino` = [1, 0, 0, 0] (only row 0 has race 2 AND ethnicity 5)
/// - `rejected`       = [1, 0, 1, 0] (decision codes 1, 2, 3, missing)
/// - `bankruptcy`     = [1, 0, 0, 0]
/// - `foreclosure`    = [0, 1, 0, 0]
/// - `ontimepayments` = [1, 0, 1, 1]
/// - `totalincome`    = [1200, 2400, 0, 600] (12 sources x per-row value)
/// - `roughassets`    = [24000, 0, 12000, 6000] (24 sources)
/// - `roughdebts`     = [1100, 0, 11000, 0] (11 sources)
/// - `roughNW`        = [22900, 0, 1000, 6000]
pub fn create_survey_dataframe() -> DataFrame {
    let mut columns: Vec<Column> = vec![
        Column::new(schema::RACE.into(), [2i64, 1, 2, 5]),
        Column::new(schema::ETHNICITY.into(), [5i64, 5, 1, 5]),
        Column::new(schema::INCOME.into(), [50_000.0f64, 0.0, -5.0, 120_000.0]),
        Column::new(schema::BANKRUPTCY.into(), [1i64, 2, 5, 2]),
        Column::new(schema::FORECLOSURE.into(), [2i64, 1, 5, 2]),
        Column::new(schema::ONTIME_PAYMENTS.into(), [1i64, 2, 1, 1]),
        Column::new(
            schema::LOAN_DECISION.into(),
            [Some(1i64), Some(2), Some(3), None],
        ),
    ];

    for name in schema::INCOME_SOURCES {
        columns.push(Column::new(name.into(), [100.0f64, 200.0, 0.0, 50.0]));
    }
    for name in schema::ASSET_SOURCES {
        columns.push(Column::new(name.into(), [1000.0f64, 0.0, 500.0, 250.0]));
    }
    for name in schema::DEBT_SOURCES {
        columns.push(Column::new(name.into(), [100.0f64, 0.0, 1000.0, 0.0]));
    }

    DataFrame::new(columns).unwrap()
}

/// Read a derived indicator column as i32 values.
pub fn indicator_values(df: &DataFrame, name: &str) -> Vec<i32> {
    df.column(name)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect()
}

/// Read a derived float column, keeping nulls as None.
pub fn float_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

/// Create a larger synthetic survey population with seeded randomness.
///
/// Respondents get plausible codes: race/ethnicity mixes, mostly positive
/// income sources with a few zero-income rows (whose log sentinels the model
/// stage must drop), and a rejection rate that differs by group.
pub fn create_survey_population(n: usize) -> DataFrame {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(2019);

    let mut race = Vec::with_capacity(n);
    let mut ethnicity = Vec::with_capacity(n);
    let mut income = Vec::with_capacity(n);
    let mut bankruptcy = Vec::with_capacity(n);
    let mut foreclosure = Vec::with_capacity(n);
    let mut ontime = Vec::with_capacity(n);
    let mut decision = Vec::with_capacity(n);
    let mut income_rows = Vec::with_capacity(n);
    let mut asset_rows = Vec::with_capacity(n);
    let mut debt_rows = Vec::with_capacity(n);

    for _ in 0..n {
        let is_black = rng.gen_bool(0.25);
        let is_nonlatino = rng.gen_bool(0.8);
        race.push(if is_black { 2i64 } else { 1 });
        ethnicity.push(if is_nonlatino { 5i64 } else { 1 });

        let zero_income = rng.gen_bool(0.05);
        let source = if zero_income {
            0.0
        } else {
            500.0 + rng.gen::<f64>() * 5000.0
        };
        income.push(source * 12.0);
        income_rows.push(source);
        asset_rows.push(rng.gen::<f64>() * 20_000.0);
        debt_rows.push(rng.gen::<f64>() * 5_000.0);

        bankruptcy.push(if rng.gen_bool(0.08) { 1i64 } else { 2 });
        foreclosure.push(if rng.gen_bool(0.04) { 1i64 } else { 2 });
        ontime.push(if rng.gen_bool(0.7) { 1i64 } else { 2 });

        let reject_rate = if is_black && is_nonlatino { 0.4 } else { 0.2 };
        decision.push(if rng.gen_bool(reject_rate) {
            if rng.gen_bool(0.5) {
                1i64
            } else {
                3
            }
        } else {
            2
        });
    }

    let mut columns: Vec<Column> = vec![
        Column::new(schema::RACE.into(), race),
        Column::new(schema::ETHNICITY.into(), ethnicity),
        Column::new(schema::INCOME.into(), income),
        Column::new(schema::BANKRUPTCY.into(), bankruptcy),
        Column::new(schema::FORECLOSURE.into(), foreclosure),
        Column::new(schema::ONTIME_PAYMENTS.into(), ontime),
        Column::new(schema::LOAN_DECISION.into(), decision),
    ];
    for name in schema::INCOME_SOURCES {
        columns.push(Column::new(name.into(), income_rows.clone()));
    }
    for name in schema::ASSET_SOURCES {
        columns.push(Column::new(name.into(), asset_rows.clone()));
    }
    for name in schema::DEBT_SOURCES {
        columns.push(Column::new(name.into(), debt_rows.clone()));
    }
    DataFrame::new(columns).unwrap()
}

/// Build a frame shaped like the model subset directly from value vectors.
/// Column order follows `schema::MODEL_COLUMNS`.
pub fn model_subset_from(values: &[(&str, Vec<f64>)]) -> DataFrame {
    let columns: Vec<Column> = values
        .iter()
        .map(|(name, data)| Column::new((*name).into(), data.clone()))
        .collect();
    DataFrame::new(columns).unwrap()
}

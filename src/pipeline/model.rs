//! Logistic regression of credit rejection on creditworthiness proxies.
//!
//! The model stage projects the derived frame onto the eight model columns,
//! drops every row with a missing or non-finite value, and fits a single
//! fixed-specification binomial regression by iteratively reweighted least
//! squares (IRLS) with the canonical logit link. Each IRLS step solves the
//! weighted normal equations XᵀWX β = XᵀWz with a Cholesky factorization.
//!
//! Non-convergence, a singular design, and perfect or quasi-perfect
//! separation all surface as `AnalysisError::Fit` rather than a silently
//! wrong coefficient table.

use faer::prelude::*;
use faer::{Mat, Side};
use polars::prelude::*;
use serde::Serialize;

use crate::pipeline::error::AnalysisError;
use crate::pipeline::schema;

/// IRLS iteration cap, matching the conventional GLM default.
const MAX_ITERATIONS: usize = 25;

/// Relative deviance-change convergence tolerance.
const DEVIANCE_TOLERANCE: f64 = 1e-8;

/// Clamp for fitted probabilities so the working weights stay positive.
const MU_FLOOR: f64 = 1e-10;

/// Separation guard on the logit scale. A coefficient past this magnitude
/// corresponds to an odds ratio beyond e^30; real survey effects never get
/// close, a diverging separation fit does.
const SEPARATION_LOGIT: f64 = 30.0;

/// Fitted probabilities this close to 0 or 1 across every observation mean
/// the outcome is perfectly classified, i.e. separated.
const SATURATION_EPS: f64 = 1e-4;

/// One row of the coefficient table.
#[derive(Debug, Clone, Serialize)]
pub struct CoefficientReport {
    pub term: String,
    pub estimate: f64,
    pub std_error: f64,
    pub z_value: f64,
    pub p_value: f64,
}

/// A converged logistic fit with Wald inference per term.
#[derive(Debug, Clone, Serialize)]
pub struct LogisticFit {
    /// Intercept first, then one entry per predictor in input order.
    pub terms: Vec<CoefficientReport>,
    pub n_obs: usize,
    pub iterations: usize,
    pub deviance: f64,
    pub log_likelihood: f64,
}

/// Project the derived frame onto the model columns and drop every row with
/// a missing or non-finite value among them. No imputation: the row-drop is
/// applied wholesale before fitting.
pub fn model_frame(df: &DataFrame) -> Result<DataFrame, AnalysisError> {
    let mut columns: Vec<Column> = Vec::with_capacity(schema::MODEL_COLUMNS.len());
    for &name in &schema::MODEL_COLUMNS {
        let column = df.column(name).map_err(|_| AnalysisError::Value {
            column: name.to_string(),
            stage: "model",
        })?;
        columns.push(column.cast(&DataType::Float64)?);
    }
    let projected = DataFrame::new(columns)?;

    let mut keep = vec![true; projected.height()];
    for column in projected.get_columns() {
        let values = column.f64()?;
        for (index, value) in values.iter().enumerate() {
            match value {
                Some(v) if v.is_finite() => {}
                _ => keep[index] = false,
            }
        }
    }

    let mask = BooleanChunked::from_slice("model_mask".into(), &keep);
    Ok(projected.filter(&mask)?)
}

/// Fit `outcome ~ predictors` as a Bernoulli GLM with a logit link.
///
/// The frame must already be filtered to finite values (`model_frame`);
/// residual nulls are rejected rather than skipped.
pub fn fit_logistic(
    frame: &DataFrame,
    outcome: &str,
    predictors: &[&str],
) -> Result<LogisticFit, AnalysisError> {
    let y = column_values(frame, outcome)?;
    let n = y.len();
    let p = predictors.len() + 1;

    if y.iter().any(|&v| v != 0.0 && v != 1.0) {
        return Err(AnalysisError::Fit {
            message: format!("outcome '{outcome}' is not binary 0/1"),
        });
    }
    if n <= p {
        return Err(AnalysisError::Fit {
            message: format!(
                "{n} usable rows is not enough to estimate {p} parameters"
            ),
        });
    }
    let events: usize = y.iter().filter(|&&v| v == 1.0).count();
    if events == 0 || events == n {
        return Err(AnalysisError::Fit {
            message: "outcome has no variation: every row has the same value".to_string(),
        });
    }

    // Design matrix with an intercept column of ones.
    let mut x = Mat::<f64>::zeros(n, p);
    for i in 0..n {
        x[(i, 0)] = 1.0;
    }
    for (j, &name) in predictors.iter().enumerate() {
        let values = column_values(frame, name)?;
        for i in 0..n {
            x[(i, j + 1)] = values[i];
        }
    }

    let mut beta = Mat::<f64>::zeros(p, 1);
    let mut deviance = f64::INFINITY;
    let mut converged_at = None;

    for iteration in 1..=MAX_ITERATIONS {
        let eta = &x * &beta;

        // Working weights w = μ(1-μ) and response z = η + (y-μ)/w.
        let mut weights = vec![0.0f64; n];
        let mut working = vec![0.0f64; n];
        for i in 0..n {
            let mu = sigmoid(eta[(i, 0)]).clamp(MU_FLOOR, 1.0 - MU_FLOOR);
            let w = mu * (1.0 - mu);
            weights[i] = w;
            working[i] = eta[(i, 0)] + (y[i] - mu) / w;
        }

        let mut weighted_x = Mat::<f64>::zeros(n, p);
        for i in 0..n {
            for j in 0..p {
                weighted_x[(i, j)] = weights[i] * x[(i, j)];
            }
        }
        let information = x.transpose() * &weighted_x;

        let mut moment = Mat::<f64>::zeros(p, 1);
        for j in 0..p {
            let mut acc = 0.0;
            for i in 0..n {
                acc += x[(i, j)] * weights[i] * working[i];
            }
            moment[(j, 0)] = acc;
        }

        let factor = information.as_ref().cholesky(Side::Lower).map_err(|_| AnalysisError::Fit {
            message:
                "singular weighted design matrix: check for collinearity among predictors"
                    .to_string(),
        })?;
        beta = factor.solve(&moment);

        let updated = deviance_at(&x, &beta, &y);
        let delta = (deviance - updated).abs() / (updated.abs() + 0.1);
        deviance = updated;
        if delta < DEVIANCE_TOLERANCE {
            converged_at = Some(iteration);
            break;
        }
    }

    let Some(iterations) = converged_at else {
        return Err(AnalysisError::Fit {
            message: format!(
                "logistic regression did not converge after {MAX_ITERATIONS} iterations: \
                 check for collinearity or separation among predictors"
            ),
        });
    };

    detect_separation(&x, &beta, p)?;

    // Wald inference from the inverse information matrix at the solution.
    let eta = &x * &beta;
    let mut weighted_x = Mat::<f64>::zeros(n, p);
    for i in 0..n {
        let mu = sigmoid(eta[(i, 0)]).clamp(MU_FLOOR, 1.0 - MU_FLOOR);
        let w = mu * (1.0 - mu);
        for j in 0..p {
            weighted_x[(i, j)] = w * x[(i, j)];
        }
    }
    let information = x.transpose() * &weighted_x;
    let factor = information.as_ref().cholesky(Side::Lower).map_err(|_| AnalysisError::Fit {
        message: "information matrix is singular at the solution".to_string(),
    })?;
    let identity = Mat::<f64>::from_fn(p, p, |i, j| if i == j { 1.0 } else { 0.0 });
    let covariance = factor.solve(&identity);

    let mut terms = Vec::with_capacity(p);
    let names: Vec<String> = std::iter::once("(intercept)".to_string())
        .chain(predictors.iter().map(|s| s.to_string()))
        .collect();
    for (j, term) in names.into_iter().enumerate() {
        let estimate = beta[(j, 0)];
        let std_error = covariance[(j, j)].sqrt();
        let z_value = estimate / std_error;
        let p_value = 2.0 * (1.0 - normal_cdf(z_value.abs()));
        terms.push(CoefficientReport {
            term,
            estimate,
            std_error,
            z_value,
            p_value,
        });
    }

    Ok(LogisticFit {
        terms,
        n_obs: n,
        iterations,
        deviance,
        log_likelihood: -deviance / 2.0,
    })
}

fn column_values(frame: &DataFrame, name: &str) -> Result<Vec<f64>, AnalysisError> {
    let column = frame.column(name).map_err(|_| AnalysisError::Value {
        column: name.to_string(),
        stage: "model",
    })?;
    let casted = column.cast(&DataType::Float64)?;
    let values = casted.f64()?;
    values
        .iter()
        .map(|value| {
            value.ok_or_else(|| AnalysisError::Fit {
                message: format!(
                    "column '{name}' still contains missing values: filter rows before fitting"
                ),
            })
        })
        .collect()
}

fn sigmoid(eta: f64) -> f64 {
    1.0 / (1.0 + (-eta).exp())
}

/// Binomial deviance -2 Σ [y ln μ + (1-y) ln(1-μ)] at the given coefficients.
fn deviance_at(x: &Mat<f64>, beta: &Mat<f64>, y: &[f64]) -> f64 {
    let eta = x * beta;
    let mut acc = 0.0;
    for (i, &yi) in y.iter().enumerate() {
        let mu = sigmoid(eta[(i, 0)]).clamp(MU_FLOOR, 1.0 - MU_FLOOR);
        acc += yi * mu.ln() + (1.0 - yi) * (1.0 - mu).ln();
    }
    -2.0 * acc
}

/// Refuse a fit where the outcome is perfectly classified.
///
/// Two symptoms, either is conclusive: a coefficient diverged on the logit
/// scale, or every fitted probability is numerically 0 or 1.
fn detect_separation(x: &Mat<f64>, beta: &Mat<f64>, p: usize) -> Result<(), AnalysisError> {
    let diverged = (0..p).any(|j| beta[(j, 0)].abs() > SEPARATION_LOGIT);

    let eta = x * beta;
    let all_saturated = (0..x.nrows()).all(|i| {
        let mu = sigmoid(eta[(i, 0)]);
        mu < SATURATION_EPS || mu > 1.0 - SATURATION_EPS
    });

    if diverged || all_saturated {
        return Err(AnalysisError::Fit {
            message: "perfect or quasi-perfect separation detected: \
                      a predictor fully determines the outcome"
                .to_string(),
        });
    }
    Ok(())
}

/// Standard normal CDF via the Abramowitz & Stegun 7.1.26 erf approximation
/// (absolute error < 1.5e-7, ample for reporting Wald p-values).
fn normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf(x / std::f64::consts::SQRT_2))
}

fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.327_591_1 * x);
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736
                + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    sign * (1.0 - poly * (-x * x).exp())
}

//! scfa: Survey of Consumer Finances credit-rejection analysis
//!
//! A library for running a batch analysis over the SCF full public extract:
//! derived financial variables, grouped descriptive statistics, and a
//! logistic regression of credit rejection on creditworthiness proxies.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

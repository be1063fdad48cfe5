//! Statistical building blocks for shelf-life analysis.
//!
//! This crate provides the small set of numeric tools the analysis layer is
//! built on:
//!
//! - **Descriptive statistics**: count, extrema, mean, population and sample dispersion
//! - **Line fitting**: ordinary least-squares fit of `y = intercept + slope · x` with R²
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`regression`]: OLS line fitting and inversion
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use shelfcast_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Fitting a line
//!
//! ```
//! use shelfcast_stats::regression::fit_line;
//!
//! let fit = fit_line(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]).unwrap();
//! assert_eq!(fit.slope, 2.0);
//! assert_eq!(fit.predict(3.0), 7.0);
//! ```

pub mod descriptive;
pub mod regression;

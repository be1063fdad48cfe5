//! Shelf-life projection and quality risk analysis
//!
//! This crate estimates, from sparse stability-test data, when a monitored
//! quality attribute will cross its failure threshold, and aggregates the
//! estimates into a risk summary for one product.
//!
//! # Overview
//!
//! Data flows one way through pure functions:
//!
//! 1. **Normalize Sample Times** ([`sample_time`]): `"02W"` → months
//! 2. **Average Replicates** ([`measurement`]): raw lab results → [`observation::Observation`]s
//! 3. **Group by Attribute** ([`observation::ObservationSet`]): one time-sorted series per attribute
//! 4. **Project Crossings** ([`projection`]): recent-window trend per attribute
//! 5. **Rate Changes** ([`change_rate`]): recent secant slope per attribute
//! 6. **Summarize** ([`summary::QaSummary`]): shelf life, critical attribute, status tier
//! 7. **Optional Extensions**: composite [`quality_index`] and full-history
//!    [`regression_report`], bundled by [`report::ProductReport`]
//!
//! Per-attribute problems (too few points, no spread in time, numeric
//! failure) become explicit variants such as
//! [`Projection::InsufficientData`](projection::Projection::InsufficientData),
//! so one bad attribute never prevents the summary from being produced.
//!
//! # Polarity
//!
//! A rising value is assumed to move towards the threshold. Attributes where
//! a lower value is worse are not supported.
//!
//! # Examples
//!
//! ```
//! use shelfcast_analysis::{
//!     measurement::{Measurement, average_replicates},
//!     observation::ObservationSet,
//!     report::{ProductReport, ReportOptions},
//!     summary::{ShelfLife, StatusTier},
//!     threshold::Threshold,
//! };
//!
//! let measurements = [
//!     ("Odor", "01M", 5.0),
//!     ("Odor", "02M", 5.4),
//!     ("Odor", "02M-B", 5.6),
//!     ("Odor", "03M", 6.0),
//!     ("Color", "01M", 4.0),
//!     ("Color", "03M", 4.1),
//! ]
//! .map(|(attribute, sample, value)| Measurement {
//!     attribute: attribute.to_owned(),
//!     sample: sample.to_owned(),
//!     value,
//! });
//!
//! let averaged = average_replicates(measurements);
//! let observations = ObservationSet::from_observations(averaged.observations);
//! let threshold = Threshold::new(6.5)?;
//! let report = ProductReport::build(&observations, threshold, ReportOptions::default());
//!
//! assert_eq!(report.summary.min_shelf_life, ShelfLife::Months(4.0));
//! assert_eq!(report.summary.status, StatusTier::Critical);
//! # Ok::<(), shelfcast_analysis::threshold::ThresholdError>(())
//! ```

pub mod change_rate;
pub mod measurement;
pub mod observation;
pub mod projection;
pub mod quality_index;
pub mod regression_report;
pub mod report;
pub mod sample_time;
pub mod summary;
pub mod threshold;

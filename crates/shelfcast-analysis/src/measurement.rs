//! Raw labelled measurements and replicate averaging
//!
//! Laboratories usually test several replicates per storage time. Each raw
//! [`Measurement`] carries a storage-duration label (see
//! [`sample_time`](crate::sample_time)); [`average_replicates`] converts the
//! labels to months and averages every `(attribute, months)` group into one
//! [`Observation`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{observation::Observation, sample_time};

/// One raw test result as recorded by the laboratory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Attribute identifier
    pub attribute: String,
    /// Storage-duration label, e.g. `"02W"` or `"06M-B"`
    pub sample: String,
    /// Measured value
    pub value: f64,
}

/// Output of [`average_replicates`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AveragedMeasurements {
    /// One observation per `(attribute, months)` group, in first-appearance order
    pub observations: Vec<Observation>,
    /// Measurements whose sample label could not be converted to months
    pub dropped: Vec<Measurement>,
}

/// Averages replicate measurements into observations.
///
/// Measurements whose label does not parse are returned in
/// [`AveragedMeasurements::dropped`] instead of aborting the whole batch.
///
/// # Examples
///
/// ```
/// use shelfcast_analysis::measurement::{Measurement, average_replicates};
///
/// let measurements = [("Odor", "01M", 5.0), ("Odor", "01M-B", 6.0), ("Odor", "??", 1.0)]
///     .map(|(attribute, sample, value)| Measurement {
///         attribute: attribute.to_owned(),
///         sample: sample.to_owned(),
///         value,
///     });
/// let averaged = average_replicates(measurements);
///
/// assert_eq!(averaged.observations.len(), 1);
/// assert_eq!(averaged.observations[0].value, 5.5);
/// assert_eq!(averaged.dropped.len(), 1);
/// ```
#[must_use]
pub fn average_replicates<I>(measurements: I) -> AveragedMeasurements
where
    I: IntoIterator<Item = Measurement>,
{
    let mut index = HashMap::<(String, u64), usize>::new();
    let mut groups = Vec::<(String, f64, f64, u32)>::new();
    let mut dropped = vec![];

    for measurement in measurements {
        let Some(months) = sample_time::months_from_label(&measurement.sample) else {
            tracing::debug!(
                attribute = %measurement.attribute,
                sample = %measurement.sample,
                "dropping measurement with unrecognized sample label"
            );
            dropped.push(measurement);
            continue;
        };
        let key = (measurement.attribute, months.to_bits());
        if let Some(&i) = index.get(&key) {
            let group = &mut groups[i];
            group.2 += measurement.value;
            group.3 += 1;
        } else {
            index.insert(key.clone(), groups.len());
            groups.push((key.0, months, measurement.value, 1));
        }
    }

    let observations = groups
        .into_iter()
        .map(|(attribute, time_months, sum, count)| Observation {
            attribute,
            time_months,
            value: sum / f64::from(count),
        })
        .collect();

    AveragedMeasurements {
        observations,
        dropped,
    }
}

//! Shelf-life analysis command
//!
//! Reads stability-test measurements of one product, projects when each
//! attribute reaches the failure threshold, and reports the resulting
//! shelf life as text tables or JSON.

mod export;
mod table;

use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::Args;
use shelfcast_analysis::{
    measurement::average_replicates,
    observation::ObservationSet,
    report::{ProductReport, ReportOptions},
    threshold::Threshold,
};

use crate::{
    schema::{config::AnalysisConfig, report::ReportDocument},
    util::{self, Destination, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Args)]
pub(crate) struct AnalyzeArg {
    /// Path to the measurements JSON file
    pub input: PathBuf,

    /// Failure threshold applied to every attribute [default: 6.5]
    #[arg(long)]
    pub threshold: Option<f64>,

    /// JSON config file with analysis defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Report format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to this path instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Skip the composite quality index
    #[arg(long)]
    pub no_quality_index: bool,

    /// Skip the full-history regression
    #[arg(long)]
    pub no_regression: bool,

    /// Save the quality index series as CSV to this path
    #[arg(long)]
    pub index_csv: Option<PathBuf>,
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AnalysisSettings {
    threshold: Threshold,
    options: ReportOptions,
}

impl AnalysisSettings {
    fn resolve(arg: &AnalyzeArg, config: &AnalysisConfig) -> anyhow::Result<Self> {
        let threshold = match arg.threshold.or(config.threshold) {
            Some(value) => Threshold::new(value).context("Invalid threshold")?,
            None => Threshold::default(),
        };
        let options = ReportOptions {
            quality_index: !arg.no_quality_index && config.quality_index.unwrap_or(true),
            regression: !arg.no_regression && config.regression.unwrap_or(true),
        };
        Ok(Self { threshold, options })
    }
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = match &arg.config {
        Some(path) => util::read_config_file(path)?,
        None => AnalysisConfig::default(),
    };
    let settings = AnalysisSettings::resolve(arg, &config)?;

    let input = util::read_measurement_file(&arg.input)?;
    let averaged = average_replicates(input.measurements);
    for measurement in &averaged.dropped {
        tracing::warn!(
            attribute = %measurement.attribute,
            sample = %measurement.sample,
            "Skipping measurement with unreadable sample label"
        );
    }

    let observations = ObservationSet::from_observations(averaged.observations);
    if observations.is_empty() {
        bail!("No usable measurements in {}", arg.input.display());
    }
    tracing::info!(
        attributes = observations.len(),
        threshold = settings.threshold.value(),
        "Analyzing stability data"
    );

    let report = ProductReport::build(&observations, settings.threshold, settings.options);

    if let Some(path) = &arg.index_csv {
        match &report.quality_index {
            Some(index) => export::save_quality_index_csv(path, index)?,
            None => tracing::warn!(
                path = %path.display(),
                "Quality index unavailable, CSV not written"
            ),
        }
    }

    let mut output = Output::create(Destination::from_output_path(arg.output.as_deref()))?;
    match arg.format {
        OutputFormat::Json => {
            let document = ReportDocument {
                product: input.product.as_deref(),
                generated_at: Utc::now(),
                skipped_samples: averaged
                    .dropped
                    .iter()
                    .map(|measurement| measurement.sample.as_str())
                    .collect(),
                report: &report,
            };
            output.write_json(&document)?;
        }
        OutputFormat::Text => {
            table::write_report(&mut output, input.product.as_deref(), &report)
                .with_context(|| format!("Failed to write report to {}", output.destination()))?;
            output.finish()?;
        }
    }

    if let Destination::File(path) = output.destination() {
        tracing::info!(path = %path.display(), "Report saved");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[clap(flatten)]
        arg: AnalyzeArg,
    }

    fn parse(args: &[&str]) -> AnalyzeArg {
        let argv = std::iter::once("shelfcast").chain(args.iter().copied());
        TestCli::parse_from(argv).arg
    }

    #[test]
    fn test_defaults_without_config() {
        let arg = parse(&["data.json"]);
        let settings = AnalysisSettings::resolve(&arg, &AnalysisConfig::default()).unwrap();
        assert_eq!(settings.threshold, Threshold::DEFAULT);
        assert_eq!(settings.options, ReportOptions::default());
        assert_eq!(arg.format, OutputFormat::Text);
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = AnalysisConfig {
            threshold: Some(7.0),
            quality_index: Some(true),
            regression: Some(true),
        };
        let arg = parse(&["data.json", "--threshold", "5.5", "--no-regression"]);
        let settings = AnalysisSettings::resolve(&arg, &config).unwrap();
        assert_eq!(settings.threshold.value(), 5.5);
        assert!(settings.options.quality_index);
        assert!(!settings.options.regression);
    }

    #[test]
    fn test_config_used_when_flag_absent() {
        let config = AnalysisConfig {
            threshold: Some(7.0),
            quality_index: Some(false),
            regression: None,
        };
        let arg = parse(&["data.json"]);
        let settings = AnalysisSettings::resolve(&arg, &config).unwrap();
        assert_eq!(settings.threshold.value(), 7.0);
        assert!(!settings.options.quality_index);
        assert!(settings.options.regression);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let arg = parse(&["data.json", "--threshold", "0"]);
        assert!(AnalysisSettings::resolve(&arg, &AnalysisConfig::default()).is_err());
    }

    #[test]
    fn test_json_format_parsed() {
        let arg = parse(&["data.json", "--format", "json"]);
        assert_eq!(arg.format, OutputFormat::Json);
    }
}

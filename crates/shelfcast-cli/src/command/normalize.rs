use std::io::Write as _;

use anyhow::Context;
use clap::Args;
use shelfcast_analysis::sample_time;

use crate::util::Output;

#[derive(Debug, Clone, Args)]
pub(crate) struct NormalizeArg {
    /// Sample labels to convert (e.g. 01M, 02W, 14D-A)
    #[arg(required = true)]
    pub labels: Vec<String>,
}

pub(crate) fn run(arg: &NormalizeArg) -> anyhow::Result<()> {
    let mut output = Output::stdout();
    for label in &arg.labels {
        let line = format_label(label);
        writeln!(output, "{line}").context("Failed to write to stdout")?;
    }
    output.finish()
}

fn format_label(label: &str) -> String {
    match sample_time::months_from_label(label) {
        Some(months) => format!("{label}\t{months}"),
        None => {
            tracing::debug!(label, "Unrecognized sample label");
            format!("{label}\tinvalid")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_label() {
        assert_eq!(format_label("01M"), "01M\t1");
        assert_eq!(format_label("15D-B"), "15D-B\t0.5");
        assert_eq!(format_label("Initial"), "Initial\tinvalid");
    }
}

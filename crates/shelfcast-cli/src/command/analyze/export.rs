use std::{fmt::Write as _, fs, path::Path};

use anyhow::Context;
use shelfcast_analysis::quality_index::QualityIndex;

/// Save the quality index series to a CSV file
///
/// # Arguments
/// * `path` - Destination file
/// * `index` - Quality index to export
pub(super) fn save_quality_index_csv(path: &Path, index: &QualityIndex) -> anyhow::Result<()> {
    let csv_content = quality_index_csv(index)?;
    fs::write(path, csv_content)
        .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;
    tracing::info!(path = %path.display(), "Quality index saved");
    Ok(())
}

fn quality_index_csv(index: &QualityIndex) -> anyhow::Result<String> {
    let mut csv_content = String::from("time_months,index,lower,upper,attributes\n");
    for point in &index.points {
        writeln!(
            &mut csv_content,
            "{},{},{},{},{}",
            point.time_months, point.index, point.lower, point.upper, point.attributes
        )
        .with_context(|| format!("Failed to write CSV row for month {}", point.time_months))?;
    }
    Ok(csv_content)
}

//! Text report display
//!
//! Renders a [`ProductReport`] as aligned plain-text tables.

use std::io::{self, Write};

use shelfcast_analysis::{
    change_rate::{ChangeRate, ChangeRateBreakdown},
    projection::Projection,
    quality_index::QualityIndex,
    regression_report::{FullHistoryRegression, RegressionProjection},
    report::ProductReport,
    summary::{AttributeAnalysis, QaSummary, ShelfLife, ShelfLifeAdvice},
    threshold::ThresholdDistance,
};

/// Write the full report.
pub(super) fn write_report<W>(
    w: &mut W,
    product: Option<&str>,
    report: &ProductReport,
) -> io::Result<()>
where
    W: Write,
{
    match product {
        Some(product) => writeln!(w, "Shelf-Life Analysis Report: {product}")?,
        None => writeln!(w, "Shelf-Life Analysis Report")?,
    }
    writeln!(w, "==========================================\n")?;

    write_summary(w, &report.summary)?;
    writeln!(w)?;

    write_attribute_table(w, &report.summary.attributes)?;
    writeln!(w)?;

    write_rate_breakdown(w, &report.summary.rate_breakdown)?;

    if let Some(index) = &report.quality_index {
        writeln!(w)?;
        write_quality_index(w, index)?;
    }

    if !report.regression.is_empty() {
        writeln!(w)?;
        write_regression_table(w, report.regression.iter())?;
    }
    Ok(())
}

fn write_summary<W>(w: &mut W, summary: &QaSummary) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Summary:")?;
    writeln!(w, "  {:<24} {:.2}", "Threshold", summary.threshold.value())?;
    writeln!(
        w,
        "  {:<24} {}",
        "Current month",
        format_months(summary.current_month)
    )?;
    writeln!(
        w,
        "  {:<24} {}",
        "Shelf life",
        format_shelf_life(summary.min_shelf_life)
    )?;
    writeln!(
        w,
        "  {:<24} {}",
        "Remaining",
        format_months(summary.remaining_months)
    )?;
    writeln!(w, "  {:<24} {}", "Status", summary.status)?;
    writeln!(w, "  {:<24} {}", "", summary.status.message())?;
    writeln!(
        w,
        "  {:<24} {}",
        "Recommendation",
        summary.status.recommendation()
    )?;
    writeln!(w, "  {:<24} {}", "Advice", format_advice(summary.advice))?;

    let critical = summary
        .critical_attribute
        .as_ref()
        .map_or_else(|| "-".to_string(), |critical| {
            format!(
                "{} (latest {:.2}, {:.2} below threshold)",
                critical.attribute, critical.latest_value, critical.distance
            )
        });
    writeln!(w, "  {:<24} {critical}", "Critical attribute")?;

    let fastest = summary
        .fastest_changing_attribute
        .as_ref()
        .map_or_else(|| "-".to_string(), |fastest| {
            format!(
                "{} ({})",
                fastest.attribute,
                format_rate(Some(&fastest.rate))
            )
        });
    writeln!(w, "  {:<24} {fastest}", "Fastest changing")?;
    Ok(())
}

fn write_attribute_table<W>(w: &mut W, attributes: &[AttributeAnalysis]) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Attributes:")?;
    writeln!(
        w,
        "  {:<20} {:>8} {:>8} {:>10} {:>18} {:<20}",
        "Attribute", "Month", "Latest", "Distance", "Rate/month", "Projection",
    )?;
    // attribute(20) + month(8) + latest(8) + distance(10) + rate(18) + projection(20) + spaces(5)
    writeln!(w, "  {}", "-".repeat(89))?;
    for attribute in attributes {
        writeln!(
            w,
            "  {:<20} {:>8.1} {:>8.2} {:>10} {:>18} {:<20}",
            attribute.attribute,
            attribute.latest_month,
            attribute.latest_value,
            format_distance(attribute.distance),
            format_rate(attribute.change_rate.as_ref()),
            format_projection(attribute.projection),
        )?;
    }
    Ok(())
}

fn write_rate_breakdown<W>(w: &mut W, breakdown: &ChangeRateBreakdown) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Change Rates:")?;
    let worsening = breakdown
        .worsening
        .iter()
        .map(|(attribute, rate)| format!("{attribute} ({rate:+.3})"))
        .collect::<Vec<_>>();
    let improving = breakdown
        .improving
        .iter()
        .map(|(attribute, rate)| format!("{attribute} ({rate:+.3})"))
        .collect::<Vec<_>>();
    writeln!(w, "  {:<24} {}", "Worsening", join_or_dash(&worsening))?;
    writeln!(w, "  {:<24} {}", "Improving", join_or_dash(&improving))?;
    writeln!(w, "  {:<24} {}", "Stable", join_or_dash(&breakdown.stable))?;
    writeln!(
        w,
        "  {:<24} {}",
        "Priority",
        breakdown.priority.as_deref().unwrap_or("-")
    )?;
    Ok(())
}

fn write_quality_index<W>(w: &mut W, index: &QualityIndex) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "Quality Index (100 = at threshold):")?;
    writeln!(
        w,
        "  {:>8} {:>10} {:>10} {:>10} {:>12}",
        "Month", "Index", "Lower", "Upper", "Attributes",
    )?;
    // month(8) + index(10) + lower(10) + upper(10) + attributes(12) + spaces(4)
    writeln!(w, "  {}", "-".repeat(54))?;
    for point in &index.points {
        writeln!(
            w,
            "  {:>8.1} {:>10.1} {:>10.1} {:>10.1} {:>12}",
            point.time_months, point.index, point.lower, point.upper, point.attributes,
        )?;
    }
    Ok(())
}

fn write_regression_table<'a, W, I>(w: &mut W, regressions: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a String, &'a FullHistoryRegression)>,
{
    writeln!(w, "Full-History Regression:")?;
    writeln!(
        w,
        "  {:<20} {:>10} {:>10} {:>8} {:>8} {:<20}",
        "Attribute", "Slope", "Intercept", "R²", "Points", "Crossing",
    )?;
    // attribute(20) + slope(10) + intercept(10) + r2(8) + points(8) + crossing(20) + spaces(5)
    writeln!(w, "  {}", "-".repeat(81))?;
    for (attribute, regression) in regressions {
        match regression {
            FullHistoryRegression::Fitted { fit, projection } => {
                let crossing = match projection {
                    RegressionProjection::CrossingMonth(month) => format!("month {month:.1}"),
                    RegressionProjection::Undetermined => "undetermined".to_string(),
                };
                writeln!(
                    w,
                    "  {:<20} {:>10.4} {:>10.3} {:>8.3} {:>8} {:<20}",
                    attribute, fit.slope, fit.intercept, fit.r_squared, fit.points, crossing,
                )?;
            }
            FullHistoryRegression::InsufficientData => {
                writeln!(w, "  {attribute:<20} insufficient data")?;
            }
            FullHistoryRegression::ComputationFailed => {
                writeln!(w, "  {attribute:<20} computation failed")?;
            }
        }
    }
    Ok(())
}

fn format_months(months: Option<f64>) -> String {
    months.map_or_else(|| "-".to_string(), |months| format!("{months:.1} months"))
}

fn format_shelf_life(shelf_life: ShelfLife) -> String {
    match shelf_life {
        ShelfLife::Months(months) => format!("{months:.1} months"),
        ShelfLife::Unknown => "unknown".to_string(),
    }
}

fn format_advice(advice: ShelfLifeAdvice) -> String {
    match advice {
        ShelfLifeAdvice::Reduce { months } => {
            format!("reduce declared shelf life to {months:.0} months")
        }
        ShelfLifeAdvice::Consider { months } => {
            format!("consider a shelf life of {months:.0} months")
        }
        ShelfLifeAdvice::Maintain => "maintain declared shelf life".to_string(),
        ShelfLifeAdvice::Insufficient => "insufficient data".to_string(),
    }
}

fn format_distance(distance: ThresholdDistance) -> String {
    match distance {
        ThresholdDistance::Below(margin) => format!("{margin:.2}"),
        ThresholdDistance::Exceeded => "exceeded".to_string(),
    }
}

fn format_rate(rate: Option<&ChangeRate>) -> String {
    rate.map_or_else(
        || "-".to_string(),
        |rate| format!("{:+.3} {}", rate.rate, rate.trend),
    )
}

fn format_projection(projection: Projection) -> String {
    match projection {
        Projection::InsufficientData => "insufficient data".to_string(),
        Projection::NoThresholdApproach => "no approach".to_string(),
        Projection::AlreadyExceeded => "already exceeded".to_string(),
        Projection::CrossingMonth(month) => format!("month {month:.1}"),
        Projection::ComputationFailed => "computation failed".to_string(),
    }
}

fn join_or_dash<S>(items: &[S]) -> String
where
    S: AsRef<str>,
{
    if items.is_empty() {
        "-".to_string()
    } else {
        items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use shelfcast_analysis::{
        observation::{Observation, ObservationSet},
        report::ReportOptions,
        threshold::Threshold,
    };

    use super::*;

    fn sample_report() -> ProductReport {
        let observations = [
            ("Odor", 1.0, 5.0),
            ("Odor", 2.0, 5.5),
            ("Odor", 3.0, 6.0),
            ("Color", 1.0, 4.0),
            ("Color", 2.0, 4.0),
            ("Color", 3.0, 4.0),
        ]
        .into_iter()
        .map(|(attribute, time_months, value)| Observation {
            attribute: attribute.to_owned(),
            time_months,
            value,
        })
        .collect::<ObservationSet>();
        ProductReport::build(&observations, Threshold::DEFAULT, ReportOptions::default())
    }

    #[test]
    fn test_write_report_sections() {
        let mut buf = Vec::new();
        write_report(&mut buf, Some("Fish sauce"), &sample_report()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("Shelf-Life Analysis Report: Fish sauce"));
        assert!(text.contains("4.0 months"));
        assert!(text.contains("month 4.0"));
        assert!(text.contains("no approach"));
        assert!(text.contains("Quality Index"));
        assert!(text.contains("Full-History Regression"));
    }

    #[test]
    fn test_format_projection() {
        assert_eq!(format_projection(Projection::CrossingMonth(4.3)), "month 4.3");
        assert_eq!(
            format_projection(Projection::AlreadyExceeded),
            "already exceeded"
        );
    }

    #[test]
    fn test_format_advice() {
        assert_eq!(
            format_advice(ShelfLifeAdvice::Reduce { months: 4.0 }),
            "reduce declared shelf life to 4 months"
        );
        assert_eq!(
            format_advice(ShelfLifeAdvice::Insufficient),
            "insufficient data"
        );
    }

    #[test]
    fn test_join_or_dash() {
        assert_eq!(join_or_dash::<String>(&[]), "-");
        assert_eq!(join_or_dash(&["Odor", "Color"]), "Odor, Color");
    }
}

//! Plain-text pipeline report.

use std::collections::{BTreeMap, BTreeSet};

use enc_model::{EncounterTable, QualityOutcome};

use crate::format::{format_amount, format_count};
use crate::writer::{ANALYTICS_FILE, CLEANED_FILE, FLAGGED_FILE};

const RULE_WIDTH: usize = 65;

/// Aggregate cost figures over every input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostSummary {
    pub total: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl CostSummary {
    /// `None` for an empty table.
    pub fn from_table(table: &EncounterTable) -> Option<Self> {
        let mut costs = table.iter().map(|record| record.total_cost);
        let first = costs.next()?;
        let (mut total, mut min, mut max) = (first, first, first);
        for cost in costs {
            total += cost;
            min = min.min(cost);
            max = max.max(cost);
        }
        Some(Self {
            total,
            mean: total / table.len() as f64,
            min,
            max,
        })
    }
}

/// Everything the text report shows, computed once from a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    pub total_rows: usize,
    pub unique_patients: usize,
    pub unique_facilities: usize,
    /// Distinct `year_month` values, ascending.
    pub months: Vec<String>,
    pub cost: Option<CostSummary>,
    pub cleaned_rows: usize,
    pub flagged_rows: usize,
    /// Flagged rows carrying each individual reason label, by label.
    pub breakdown: BTreeMap<String, usize>,
}

impl PipelineReport {
    pub fn build(analytics: &EncounterTable, outcome: &QualityOutcome) -> Self {
        let patients: BTreeSet<&str> = analytics.iter().map(|r| r.patient_id.as_str()).collect();
        let facilities: BTreeSet<&str> =
            analytics.iter().map(|r| r.facility_id.as_str()).collect();
        let months: BTreeSet<&str> = analytics.iter().map(|r| r.year_month.as_str()).collect();

        let mut breakdown = BTreeMap::new();
        for flagged in &outcome.flagged {
            for label in flagged.reason_labels() {
                *breakdown.entry(label).or_insert(0) += 1;
            }
        }

        Self {
            total_rows: analytics.len(),
            unique_patients: patients.len(),
            unique_facilities: facilities.len(),
            months: months.into_iter().map(str::to_string).collect(),
            cost: CostSummary::from_table(analytics),
            cleaned_rows: outcome.cleaned.len(),
            flagged_rows: outcome.flagged.len(),
            breakdown,
        }
    }

    pub fn render(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        let months = if self.months.is_empty() {
            "none".to_string()
        } else {
            self.months.join(", ")
        };
        let (total, mean, min, max) = match self.cost {
            Some(cost) => (
                format_amount(cost.total),
                format_amount(cost.mean),
                format_amount(cost.min),
                format_amount(cost.max),
            ),
            None => (
                format_amount(0.0),
                "n/a".to_string(),
                "n/a".to_string(),
                "n/a".to_string(),
            ),
        };

        let mut lines = vec![
            rule.clone(),
            "  HEALTHCARE ENCOUNTER ANALYTICS - PIPELINE REPORT".to_string(),
            "  Ministry of Health - Central Data Hub".to_string(),
            rule.clone(),
            String::new(),
            "DATA OVERVIEW".to_string(),
            format!(
                "  Total aggregated rows (patient x facility x month): {}",
                format_count(self.total_rows)
            ),
            format!("  Unique patients:    {}", self.unique_patients),
            format!("  Unique facilities:  {}", self.unique_facilities),
            format!("  Reporting months:   {months}"),
            String::new(),
            "COST SUMMARY".to_string(),
            format!("  Total cost (all records):     {total}"),
            format!("  Mean cost per row:            {mean}"),
            format!("  Min cost:                     {min}"),
            format!("  Max cost:                     {max}"),
            String::new(),
            "DATA QUALITY RESULTS".to_string(),
            format!(
                "  Records passing all checks:   {}",
                format_count(self.cleaned_rows)
            ),
            format!(
                "  Records flagged:              {}",
                format_count(self.flagged_rows)
            ),
        ];

        if !self.breakdown.is_empty() {
            lines.push(String::new());
            lines.push("  FLAG BREAKDOWN:".to_string());
            for (label, count) in &self.breakdown {
                lines.push(format!("    - {label}: {count} record(s)"));
            }
        }

        lines.extend([
            String::new(),
            "OUTPUT FILES".to_string(),
            format!(
                "  {ANALYTICS_FILE:<24}- Full analytics output ({} rows)",
                self.total_rows
            ),
            format!(
                "  {CLEANED_FILE:<24}- Quality-checked records ({} rows)",
                self.cleaned_rows
            ),
            format!(
                "  {FLAGGED_FILE:<24}- Flagged records ({} rows)",
                self.flagged_rows
            ),
            String::new(),
            rule,
        ]);

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_has_no_cost_summary() {
        let report = PipelineReport::build(&EncounterTable::default(), &QualityOutcome::default());
        assert_eq!(report.cost, None);
        let text = report.render();
        assert!(text.contains("  Mean cost per row:            n/a"));
        assert!(text.contains("  Reporting months:   none"));
        assert!(!text.contains("FLAG BREAKDOWN"));
    }
}

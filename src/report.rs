//! Rendering the handover report text.
//!
//! The line order is fixed: people downstream paste this text into other
//! tools that expect it.

use crate::domain::{BoardConfig, Document};
use serde::{Deserialize, Serialize};

const PLACEHOLDER: &str = "-";
const ROSTER_SEPARATOR: &str = " - ";
const UNIT_SEPARATOR: &str = ", ";

/// Fixed texts of the report template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLabels {
    pub ops_name: String,
    pub ops_deputy: String,
    pub leaders: String,
    pub officers: String,
    pub ncos: String,
    pub period_officer: String,
    pub distribution: String,
    pub notes: String,
    pub recv_time: String,
    pub handover_time: String,
    pub handover_to: String,
}

impl Default for ReportLabels {
    fn default() -> Self {
        Self {
            ops_name: "اسم العمليات".to_string(),
            ops_deputy: "نائب العمليات".to_string(),
            leaders: "قيادات".to_string(),
            officers: "ضباط".to_string(),
            ncos: "ضباط صف".to_string(),
            period_officer: "مسؤول الفتره".to_string(),
            distribution: "توزيع الوحدات :".to_string(),
            notes: "الملاحظات :".to_string(),
            recv_time: "وقت الاستلام".to_string(),
            handover_time: "وقت التسليم".to_string(),
            handover_to: "تم التسليم إلى".to_string(),
        }
    }
}

/// Trimmed value, or the placeholder dash when blank
fn single(value: &str) -> &str {
    match value.trim() {
        "" => PLACEHOLDER,
        trimmed => trimmed,
    }
}

/// Non-empty lines joined with " - ", or the placeholder dash
fn roster(value: &str) -> String {
    let names: Vec<&str> = value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if names.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        names.join(ROSTER_SEPARATOR)
    }
}

fn labelled(label: &str, value: &str) -> String {
    format!("{} : {}", label, value)
}

/// Renders the report for a document. Lanes follow the declaration order of
/// `layout`; lanes present in the document but not declared are not shown.
pub fn build_report(doc: &Document, layout: &BoardConfig, labels: &ReportLabels) -> String {
    let form = &doc.form;
    let mut lines: Vec<String> = Vec::new();

    lines.push(labelled(&labels.ops_name, single(&form.ops_name)));
    lines.push(labelled(&labels.ops_deputy, single(&form.ops_deputy)));
    lines.push(String::new());

    lines.push(labelled(&labels.leaders, &roster(&form.leaders)));
    lines.push(labelled(&labels.officers, &roster(&form.officers)));
    lines.push(labelled(&labels.ncos, &roster(&form.ncos)));
    lines.push(String::new());
    lines.push(labelled(&labels.period_officer, &roster(&form.period_officer)));
    lines.push(String::new());

    lines.push(labels.distribution.clone());
    lines.push(String::new());

    for lane in &layout.lanes {
        let codes: Vec<&str> = doc
            .lanes
            .units(&lane.id)
            .iter()
            .filter_map(|unit| unit.report_text())
            .collect();

        lines.push(format!("| {} |", lane.title));
        lines.push(if codes.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            codes.join(UNIT_SEPARATOR)
        });
        lines.push(String::new());
    }

    lines.push(labels.notes.clone());
    lines.push(single(&form.notes).to_string());
    lines.push(String::new());

    lines.push(labelled(&labels.recv_time, single(&form.recv_time)));
    lines.push(labelled(&labels.handover_time, single(&form.handover_time)));
    lines.push(labelled(&labels.handover_to, single(&form.handover_to)));

    lines.join("\n")
}

use crate::error::HandoverError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Free-text fields of the handover form
///
/// Every field is optional. Keys this build does not know about are kept in
/// `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Form {
    pub ops_name: String,
    pub ops_deputy: String,
    /// One name per line
    pub leaders: String,
    /// One name per line
    pub officers: String,
    /// One name per line
    pub ncos: String,
    /// One name per line
    pub period_officer: String,
    pub notes: String,
    pub recv_time: String,
    pub handover_time: String,
    pub handover_to: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Addressable form field, named as in the persisted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    OpsName,
    OpsDeputy,
    Leaders,
    Officers,
    Ncos,
    PeriodOfficer,
    Notes,
    RecvTime,
    HandoverTime,
    HandoverTo,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        Self::OpsName,
        Self::OpsDeputy,
        Self::Leaders,
        Self::Officers,
        Self::Ncos,
        Self::PeriodOfficer,
        Self::Notes,
        Self::RecvTime,
        Self::HandoverTime,
        Self::HandoverTo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::OpsName => "opsName",
            Self::OpsDeputy => "opsDeputy",
            Self::Leaders => "leaders",
            Self::Officers => "officers",
            Self::Ncos => "ncos",
            Self::PeriodOfficer => "periodOfficer",
            Self::Notes => "notes",
            Self::RecvTime => "recvTime",
            Self::HandoverTime => "handoverTime",
            Self::HandoverTo => "handoverTo",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = HandoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| HandoverError::UnknownFormField(s.to_string()))
    }
}

impl Form {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::OpsName => &self.ops_name,
            FormField::OpsDeputy => &self.ops_deputy,
            FormField::Leaders => &self.leaders,
            FormField::Officers => &self.officers,
            FormField::Ncos => &self.ncos,
            FormField::PeriodOfficer => &self.period_officer,
            FormField::Notes => &self.notes,
            FormField::RecvTime => &self.recv_time,
            FormField::HandoverTime => &self.handover_time,
            FormField::HandoverTo => &self.handover_to,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::OpsName => &mut self.ops_name,
            FormField::OpsDeputy => &mut self.ops_deputy,
            FormField::Leaders => &mut self.leaders,
            FormField::Officers => &mut self.officers,
            FormField::Ncos => &mut self.ncos,
            FormField::PeriodOfficer => &mut self.period_officer,
            FormField::Notes => &mut self.notes,
            FormField::RecvTime => &mut self.recv_time,
            FormField::HandoverTime => &mut self.handover_time,
            FormField::HandoverTo => &mut self.handover_to,
        };
        *slot = value.into();
    }
}

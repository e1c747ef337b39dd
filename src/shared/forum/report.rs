//! Report Data Structure
//!
//! Users report discussions or posts; admins resolve or dismiss them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Discussion,
    Post,
}

impl EntityType {
    pub fn as_i64(&self) -> i64 {
        match self {
            EntityType::Discussion => 0,
            EntityType::Post => 1,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(EntityType::Discussion),
            1 => Some(EntityType::Post),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    #[default]
    Open,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    pub fn as_i64(&self) -> i64 {
        match self {
            ReportStatus::Open => 0,
            ReportStatus::Resolved => 1,
            ReportStatus::Dismissed => 2,
        }
    }

    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(ReportStatus::Open),
            1 => Some(ReportStatus::Resolved),
            2 => Some(ReportStatus::Dismissed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Report {
    pub id: i64,
    pub created_at: i64,
    pub updated_at: i64,
    pub reporter_id: i64,
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub reason: String,
    pub status: ReportStatus,
}

impl Report {
    pub fn new(reporter_id: i64, entity_type: EntityType, entity_id: i64, reason: impl Into<String>) -> Self {
        Self {
            id: 0,
            created_at: 0,
            updated_at: 0,
            reporter_id,
            entity_type,
            entity_id,
            reason: reason.into(),
            status: ReportStatus::Open,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReportRequest {
    pub entity_type: EntityType,
    pub entity_id: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateReportRequest {
    pub status: ReportStatus,
}

// src/models/mod.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Type-specific request fields, stored verbatim next to the core fields.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Keys owned by the store; payloads never override them.
pub const RESERVED_KEYS: [&str; 4] = ["id", "type", "status", "date"];

// ───────────────────────────────────────
// Requests
// ───────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RequestType {
    Vacation,
    ShiftSwap,
    Dispute,
    /// A type written by a newer build; kept as-is.
    Other(String),
}

impl RequestType {
    pub fn as_str(&self) -> &str {
        match self {
            RequestType::Vacation => "Vacation",
            RequestType::ShiftSwap => "ShiftSwap",
            RequestType::Dispute => "Dispute",
            RequestType::Other(name) => name,
        }
    }
}

impl From<String> for RequestType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Vacation" => RequestType::Vacation,
            "ShiftSwap" => RequestType::ShiftSwap,
            "Dispute" => RequestType::Dispute,
            _ => RequestType::Other(s),
        }
    }
}

impl From<RequestType> for String {
    fn from(t: RequestType) -> Self {
        match t {
            RequestType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: RequestType,
    #[serde(default)]
    pub status: RequestStatus,
    /// Always set on submit; records written without one still load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub payload: Payload,
}

// ───────────────────────────────────────
// Reference data: schedule, KPIs, user
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    Active,
    Upcoming,
    Off,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub id: i64,
    pub date: String,     // label ("Mon 12") or ISO date
    pub shift: String,    // "08:00 - 16:00" | "Off"
    pub activity: String,
    pub status: DayStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kpi {
    pub label: String,
    pub value: String,
    pub target: String,
    pub status: KpiStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub role: String,
    pub avatar_ref: String,
}

// ───────────────────────────────────────
// Pages & notifications
// ───────────────────────────────────────
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    #[default]
    Home,
    Schedule,
    DayTimeline,
    Performance,
    Activities,
    Coaching,
    Requests,
    Rewards,
    Evaluations,
    Disputes,
    Events,
    Logs,
}

impl Page {
    pub const ALL: [Page; 12] = [
        Page::Home,
        Page::Schedule,
        Page::DayTimeline,
        Page::Performance,
        Page::Activities,
        Page::Coaching,
        Page::Requests,
        Page::Rewards,
        Page::Evaluations,
        Page::Disputes,
        Page::Events,
        Page::Logs,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Schedule => "schedule",
            Page::DayTimeline => "dayTimeline",
            Page::Performance => "performance",
            Page::Activities => "activities",
            Page::Coaching => "coaching",
            Page::Requests => "requests",
            Page::Rewards => "rewards",
            Page::Evaluations => "evaluations",
            Page::Disputes => "disputes",
            Page::Events => "events",
            Page::Logs => "logs",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a notification click lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NotificationTarget {
    OpenPage { page: Page },
    OpenRequestsTab { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub target: NotificationTarget,
}

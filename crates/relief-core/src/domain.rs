use crate::error::{ErrorCode, ReliefError, ReliefResult};
use crate::ids::ReportId;
use crate::time::EpochMillis;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Disaster categories offered by the intake form, in display order.
/// Free-form types outside this list are still accepted.
pub const DISASTER_TYPES: [&str; 9] = [
    "淹水",
    "火災",
    "地震損壞",
    "土石流",
    "停電",
    "缺水",
    "醫療緊急",
    "受困",
    "其他",
];

/// Wait-time label used when no urgency has been assessed.
pub const UNASSESSED_WAIT_TIME: &str = "待評估";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Critical,
    High,
    Medium,
    Low,
}

impl Urgency {
    pub const ALL: [Urgency; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    /// Triage rank, higher is more urgent.
    pub fn rank(self) -> u8 {
        match self {
            Self::Critical => 4,
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn estimated_wait_time(self) -> &'static str {
        match self {
            Self::Critical => "10-15分鐘",
            Self::High => "30-45分鐘",
            Self::Medium => "1-2小時",
            Self::Low => "2-4小時",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Label shown when choosing an urgency on the intake form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "緊急 - 生命危險",
            Self::High => "高度 - 嚴重傷害",
            Self::Medium => "中度 - 需要協助",
            Self::Low => "低度 - 一般求助",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Self::Critical => "緊急",
            Self::High => "高度",
            Self::Medium => "中度",
            Self::Low => "低度",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = ReliefError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(ReliefError::new(
                ErrorCode::InvalidInput,
                format!("unknown urgency '{other}'"),
            )),
        }
    }
}

pub fn estimate_wait_time(urgency: Option<Urgency>) -> &'static str {
    urgency
        .map(Urgency::estimated_wait_time)
        .unwrap_or(UNASSESSED_WAIT_TIME)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Ordering rank for the status sort, open work first.
    pub fn rank(self) -> u8 {
        match self {
            Self::Pending => 3,
            Self::InProgress => 2,
            Self::Completed => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "待救援",
            Self::InProgress => "救援中",
            Self::Completed => "已完成",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ReliefError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ReliefError::new(
                ErrorCode::InvalidInput,
                format!("unknown status '{other}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportField {
    Name,
    Phone,
    Address,
    Urgency,
    Type,
}

impl ReportField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::Urgency => "urgency",
            Self::Type => "type",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "姓名",
            Self::Phone => "電話",
            Self::Address => "地址",
            Self::Urgency => "緊急程度",
            Self::Type => "災情類型",
        }
    }
}

/// Reads a head count sent either as free text ("2", "3-4 人") or as a JSON
/// number, and stores it as text. `null` reads as empty.
pub fn deserialize_people_count<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PeopleCount {
        Text(String),
        Count(u64),
    }

    Ok(match Option::<PeopleCount>::deserialize(deserializer)? {
        Some(PeopleCount::Text(text)) => text,
        Some(PeopleCount::Count(count)) => count.to_string(),
        None => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisasterReport {
    pub id: ReportId,
    pub name: String,
    pub phone: String,
    pub address: String,
    pub urgency: Urgency,
    #[serde(rename = "type")]
    pub disaster_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_people_count")]
    pub people_count: String,
    pub timestamp: EpochMillis,
    pub status: ReportStatus,
    pub estimated_wait_time: String,
}

/// Intake form input. Urgency is optional so an unselected value can be
/// reported back as a missing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[serde(rename = "type", default)]
    pub disaster_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_people_count")]
    pub people_count: String,
}

impl NewReport {
    pub fn missing_fields(&self) -> Vec<ReportField> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push(ReportField::Name);
        }
        if self.phone.trim().is_empty() {
            missing.push(ReportField::Phone);
        }
        if self.address.trim().is_empty() {
            missing.push(ReportField::Address);
        }
        if self.urgency.is_none() {
            missing.push(ReportField::Urgency);
        }
        if self.disaster_type.trim().is_empty() {
            missing.push(ReportField::Type);
        }
        missing
    }

    /// Returns the assessed urgency, or a validation error listing every
    /// missing required field.
    pub fn validate(&self) -> ReliefResult<Urgency> {
        let missing = self.missing_fields();
        match self.urgency {
            Some(urgency) if missing.is_empty() => Ok(urgency),
            _ => Err(ReliefError::validation(missing)),
        }
    }

    /// Builds the stored report. Callers must have validated the input first.
    pub fn into_report(
        self,
        id: ReportId,
        urgency: Urgency,
        timestamp: EpochMillis,
    ) -> DisasterReport {
        DisasterReport {
            id,
            name: self.name,
            phone: self.phone,
            address: self.address,
            urgency,
            disaster_type: self.disaster_type,
            description: self.description,
            people_count: self.people_count,
            timestamp,
            status: ReportStatus::Pending,
            estimated_wait_time: urgency.estimated_wait_time().to_string(),
        }
    }
}

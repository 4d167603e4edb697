use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Closed set of job categories a posting can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Computer Science & IT")]
    ComputerScience,
    #[serde(rename = "Web Design & Graphic Design")]
    WebDesign,
    #[serde(rename = "Digital Marketing & Social Media")]
    DigitalMarketing,
    #[serde(rename = "Content Creation & Writing")]
    ContentCreation,
    #[serde(rename = "Photography & Visual Arts")]
    Photography,
    #[serde(rename = "Virtual Assistant & Administrative Support")]
    VirtualAssistant,
    #[serde(rename = "Transcription & Translation")]
    Transcription,
    #[serde(rename = "Consulting & Business Strategy")]
    Consulting,
    #[serde(rename = "Sales & Marketing")]
    Sales,
    #[serde(rename = "Voiceovers & Audio Production")]
    Voiceovers,
    #[serde(rename = "Accounting & Financial Services")]
    Accounting,
    #[serde(rename = "Legal & Intellectual Property Services")]
    Legal,
    #[serde(rename = "Event Planning & Coordination")]
    EventPlanning,
    #[serde(rename = "Health, Fitness & Wellness")]
    Health,
    #[serde(rename = "Education & Tutoring")]
    Education,
}

impl JobType {
    pub const ALL: [JobType; 15] = [
        JobType::ComputerScience,
        JobType::WebDesign,
        JobType::DigitalMarketing,
        JobType::ContentCreation,
        JobType::Photography,
        JobType::VirtualAssistant,
        JobType::Transcription,
        JobType::Consulting,
        JobType::Sales,
        JobType::Voiceovers,
        JobType::Accounting,
        JobType::Legal,
        JobType::EventPlanning,
        JobType::Health,
        JobType::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::ComputerScience => "Computer Science & IT",
            JobType::WebDesign => "Web Design & Graphic Design",
            JobType::DigitalMarketing => "Digital Marketing & Social Media",
            JobType::ContentCreation => "Content Creation & Writing",
            JobType::Photography => "Photography & Visual Arts",
            JobType::VirtualAssistant => "Virtual Assistant & Administrative Support",
            JobType::Transcription => "Transcription & Translation",
            JobType::Consulting => "Consulting & Business Strategy",
            JobType::Sales => "Sales & Marketing",
            JobType::Voiceovers => "Voiceovers & Audio Production",
            JobType::Accounting => "Accounting & Financial Services",
            JobType::Legal => "Legal & Intellectual Property Services",
            JobType::EventPlanning => "Event Planning & Coordination",
            JobType::Health => "Health, Fitness & Wellness",
            JobType::Education => "Education & Tutoring",
        }
    }

    /// All labels joined for error messages.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(JobType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a label is not one of the known categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJobType(pub String);

impl FromStr for JobType {
    type Err = UnknownJobType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownJobType(s.to_string()))
    }
}

/// Persisted job posting. Immutable once saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub skills_required: Vec<String>,
    pub deadline: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_applicants: Option<u32>,
    #[serde(rename = "type")]
    pub job_type: JobType,
    pub posted_by: String,
    pub created_at: Timestamp,
}

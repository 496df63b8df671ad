//! Roadmap data model
//!
//! These records are shared by the static fixture and the progress document.
//! Field names serialize in camelCase so exported progress keeps the same shape
//! as the browser storage slot it replaces.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;

use crate::error::{Result, TrackerError};

/// One day of the roadmap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    /// Position in the roadmap (1-indexed, unique)
    pub day_number: u32,
    /// Display title
    pub title: String,
    /// Short summary of the day
    #[serde(default)]
    pub description: String,
    /// Topics studied on this day
    #[serde(default)]
    pub topics: Vec<Topic>,
    /// Practice problems for this day
    #[serde(default)]
    pub dsa_problems: Vec<DsaProblem>,
    /// Things to produce by the end of the day
    #[serde(default)]
    pub deliverables: Vec<String>,
}

impl Day {
    /// Create an empty day
    pub fn new(day_number: u32, title: impl Into<String>) -> Self {
        Self {
            day_number,
            title: title.into(),
            description: String::new(),
            topics: Vec::new(),
            dsa_problems: Vec::new(),
            deliverables: Vec::new(),
        }
    }

    /// Find a topic by ID
    pub fn topic(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    /// Find a topic by ID for modification
    pub fn topic_mut(&mut self, topic_id: &str) -> Option<&mut Topic> {
        self.topics.iter_mut().find(|t| t.id == topic_id)
    }

    /// Find a DSA problem by ID for modification
    pub fn problem_mut(&mut self, problem_id: &str) -> Option<&mut DsaProblem> {
        self.dsa_problems.iter_mut().find(|p| p.id == problem_id)
    }

    /// Copy of this day with every completion flag and note cleared
    pub fn cleared(&self) -> Self {
        Self {
            topics: self.topics.iter().map(Topic::cleared).collect(),
            dsa_problems: self
                .dsa_problems
                .iter()
                .map(|p| DsaProblem { completed: false, ..p.clone() })
                .collect(),
            ..self.clone()
        }
    }
}

/// A learning subject tracked across three phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Identifier, unique within its day
    pub id: String,
    /// Display name
    pub name: String,
    /// Importance (0 = must know ... 6 = extra)
    #[serde(default)]
    pub priority: u8,
    /// Theory phase
    #[serde(default)]
    pub theory: TheoryPhase,
    /// Interview question phase
    #[serde(default, deserialize_with = "deserialize_questions")]
    pub interview_questions: Vec<InterviewQuestion>,
    /// Hands-on project phase
    #[serde(default)]
    pub handson: HandsonPhase,
}

impl Topic {
    /// Create a topic with empty phases
    pub fn new(id: impl Into<String>, name: impl Into<String>, priority: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            priority,
            theory: TheoryPhase::default(),
            interview_questions: Vec::new(),
            handson: HandsonPhase::default(),
        }
    }

    /// The interview phase counts as done once there is at least one question
    /// and every question is answered
    pub fn interview_phase_complete(&self) -> bool {
        !self.interview_questions.is_empty() && self.interview_questions.iter().all(|q| q.completed)
    }

    /// Number of phases done (0-3)
    pub fn completed_phases(&self) -> usize {
        [self.theory.completed, self.interview_phase_complete(), self.handson.completed]
            .into_iter()
            .filter(|done| *done)
            .count()
    }

    /// Find an interview question by ID
    pub fn question(&self, question_id: &QuestionId) -> Option<&InterviewQuestion> {
        self.interview_questions.iter().find(|q| &q.id == question_id)
    }

    /// Find an interview question by ID for modification
    pub fn question_mut(&mut self, question_id: &QuestionId) -> Option<&mut InterviewQuestion> {
        self.interview_questions.iter_mut().find(|q| &q.id == question_id)
    }

    fn cleared(&self) -> Self {
        Self {
            theory: TheoryPhase::default(),
            interview_questions: self
                .interview_questions
                .iter()
                .map(|q| InterviewQuestion { completed: false, ..q.clone() })
                .collect(),
            handson: HandsonPhase::default(),
            ..self.clone()
        }
    }
}

/// Theory phase of a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TheoryPhase {
    pub completed: bool,
    pub notes: String,
    pub resource_links: Vec<String>,
}

/// Hands-on phase of a topic
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HandsonPhase {
    pub completed: bool,
    pub project_name: String,
    pub github_link: String,
    pub notes: String,
}

/// Older storage slots kept a per-topic summary instead of a question list.
/// The summary carries nothing worth keeping, so it reads as an empty list.
#[derive(Deserialize)]
struct LegacyInterviewSummary {}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionsRepr {
    List(Vec<InterviewQuestion>),
    Legacy(LegacyInterviewSummary),
}

fn deserialize_questions<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<InterviewQuestion>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match QuestionsRepr::deserialize(deserializer)? {
        QuestionsRepr::List(questions) => questions,
        QuestionsRepr::Legacy(_) => Vec::new(),
    })
}

/// Identifier of an interview question
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Generate a new unique ID
    pub fn generate() -> Self {
        Self(format!("iq-{}", Ulid::new().to_string().to_lowercase()))
    }

    /// The ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for QuestionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Subject area of an interview question
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuestionCategory {
    #[default]
    SystemDesign,
    Database,
    Security,
    Api,
    DevOps,
    Performance,
    Caching,
    Messaging,
    Cloud,
    Other,
}

impl QuestionCategory {
    /// Every category in display order
    pub const ALL: [QuestionCategory; 10] = [
        QuestionCategory::SystemDesign,
        QuestionCategory::Database,
        QuestionCategory::Security,
        QuestionCategory::Api,
        QuestionCategory::DevOps,
        QuestionCategory::Performance,
        QuestionCategory::Caching,
        QuestionCategory::Messaging,
        QuestionCategory::Cloud,
        QuestionCategory::Other,
    ];

    /// Display name, also used as the stored value
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCategory::SystemDesign => "System Design",
            QuestionCategory::Database => "Database",
            QuestionCategory::Security => "Security",
            QuestionCategory::Api => "API",
            QuestionCategory::DevOps => "DevOps",
            QuestionCategory::Performance => "Performance",
            QuestionCategory::Caching => "Caching",
            QuestionCategory::Messaging => "Messaging",
            QuestionCategory::Cloud => "Cloud",
            QuestionCategory::Other => "Other",
        }
    }

    /// Look up a category by name, ignoring case, spaces and dashes
    pub fn parse(name: &str) -> Option<Self> {
        let wanted = normalize_category(name);
        Self::ALL.into_iter().find(|c| normalize_category(c.as_str()) == wanted)
    }
}

fn normalize_category(name: &str) -> String {
    name.chars().filter(|c| c.is_alphanumeric()).flat_map(char::to_lowercase).collect()
}

impl From<String> for QuestionCategory {
    fn from(name: String) -> Self {
        Self::parse(&name).unwrap_or(QuestionCategory::Other)
    }
}

impl From<QuestionCategory> for String {
    fn from(category: QuestionCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user-authored interview question attached to a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    pub id: QuestionId,
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub category: QuestionCategory,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Name of the owning topic at creation time
    #[serde(default)]
    pub topic_name: String,
}

impl InterviewQuestion {
    /// Build a question from user input. Fails if the question text is blank.
    pub fn from_draft(
        id: QuestionId,
        draft: &QuestionDraft,
        topic_name: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        let question = required_text(&draft.question)?;
        Ok(Self {
            id,
            question,
            answer: draft.answer.clone(),
            category: draft.category,
            completed: false,
            created_at,
            tags: clean_tags(&draft.tags),
            topic_name: topic_name.to_string(),
        })
    }
}

/// User input for a new interview question
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    pub question: String,
    pub answer: String,
    pub category: QuestionCategory,
    pub tags: Vec<String>,
}

impl QuestionDraft {
    /// Create a draft with the default category and no tags
    pub fn new(question: impl Into<String>) -> Self {
        Self { question: question.into(), ..Default::default() }
    }

    /// Set the category
    pub fn with_category(mut self, category: QuestionCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set an initial answer
    pub fn with_answer(mut self, answer: impl Into<String>) -> Self {
        self.answer = answer.into();
        self
    }
}

/// Partial update for an existing interview question.
///
/// The ID and owning topic are not part of the update and never change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionUpdate {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<QuestionCategory>,
    pub tags: Option<Vec<String>>,
    pub completed: Option<bool>,
}

impl QuestionUpdate {
    /// Update that only replaces the answer text
    pub fn answer(answer: impl Into<String>) -> Self {
        Self { answer: Some(answer.into()), ..Default::default() }
    }

    /// True when no field would change
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge this update into a question
    pub fn apply_to(&self, target: &mut InterviewQuestion) -> Result<()> {
        if let Some(question) = &self.question {
            target.question = required_text(question)?;
        }
        if let Some(answer) = &self.answer {
            target.answer = answer.clone();
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(tags) = &self.tags {
            target.tags = clean_tags(tags);
        }
        if let Some(completed) = self.completed {
            target.completed = completed;
        }
        Ok(())
    }
}

fn required_text(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::Validation("question text must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

fn clean_tags(tags: &[String]) -> BTreeSet<String> {
    tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).map(str::to_string).collect()
}

/// Problem difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        })
    }
}

/// A practice problem attached to a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DsaProblem {
    /// Identifier, unique within its day
    pub id: String,
    pub name: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub completed: bool,
}

//! Cross-day topic lookups and question filters

use std::fmt;
use std::str::FromStr;

use super::model::{Day, InterviewQuestion, QuestionCategory, Topic};

/// A topic together with the day it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicRef<'a> {
    pub day_number: u32,
    pub day_title: &'a str,
    pub topic: &'a Topic,
}

impl<'a> TopicRef<'a> {
    fn new(day: &'a Day, topic: &'a Topic) -> Self {
        Self { day_number: day.day_number, day_title: &day.title, topic }
    }
}

fn all_topics(days: &[Day]) -> impl Iterator<Item = TopicRef<'_>> {
    days.iter().flat_map(|day| day.topics.iter().map(move |topic| TopicRef::new(day, topic)))
}

/// Topics whose name contains the keyword (case-insensitive).
/// An empty keyword matches nothing.
pub fn search_topics<'a>(days: &'a [Day], keyword: &str) -> Vec<TopicRef<'a>> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return Vec::new();
    }
    all_topics(days).filter(|r| r.topic.name.to_lowercase().contains(&keyword)).collect()
}

/// Topics of one priority level across every day
pub fn topics_with_priority(days: &[Day], priority: u8) -> Vec<TopicRef<'_>> {
    all_topics(days).filter(|r| r.topic.priority == priority).collect()
}

/// The first topic, in roadmap order, that is not fully complete
pub fn suggested_next_topic(days: &[Day]) -> Option<TopicRef<'_>> {
    all_topics(days).find(|r| r.topic.completed_phases() < 3)
}

/// Which questions to keep by answer state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestionStatus {
    #[default]
    All,
    Completed,
    Pending,
}

impl QuestionStatus {
    pub fn matches(self, completed: bool) -> bool {
        match self {
            QuestionStatus::All => true,
            QuestionStatus::Completed => completed,
            QuestionStatus::Pending => !completed,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionStatus::All => "all",
            QuestionStatus::Completed => "completed",
            QuestionStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(QuestionStatus::All),
            "completed" => Ok(QuestionStatus::Completed),
            "pending" => Ok(QuestionStatus::Pending),
            other => Err(format!("unknown status {:?}, expected all, completed or pending", other)),
        }
    }
}

/// Questions passing every filter, in list order.
///
/// `keyword` matches the question, the answer or any tag, ignoring case. An
/// empty keyword and a `None` category match everything.
pub fn filter_questions<'a>(
    questions: &'a [InterviewQuestion],
    keyword: &str,
    category: Option<QuestionCategory>,
    status: QuestionStatus,
) -> Vec<&'a InterviewQuestion> {
    let keyword = keyword.trim().to_lowercase();
    questions
        .iter()
        .filter(|q| keyword.is_empty() || question_mentions(q, &keyword))
        .filter(|q| category.is_none_or(|c| q.category == c))
        .filter(|q| status.matches(q.completed))
        .collect()
}

fn question_mentions(question: &InterviewQuestion, keyword: &str) -> bool {
    question.question.to_lowercase().contains(keyword)
        || question.answer.to_lowercase().contains(keyword)
        || question.tags.iter().any(|tag| tag.to_lowercase().contains(keyword))
}

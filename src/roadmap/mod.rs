//! Roadmap content: days, topics, questions and problems

pub mod fixture;
pub mod model;
pub mod query;

pub use fixture::{Roadmap, RoadmapSummary};
pub use model::{
    Day, Difficulty, DsaProblem, HandsonPhase, InterviewQuestion, QuestionCategory, QuestionDraft,
    QuestionId, QuestionUpdate, TheoryPhase, Topic,
};
pub use query::{
    QuestionStatus, TopicRef, filter_questions, search_topics, suggested_next_topic,
    topics_with_priority,
};

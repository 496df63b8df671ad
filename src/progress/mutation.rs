//! Progress mutations
//!
//! Every change to a progress document is a [`Mutation`]. [`reduce`] applies
//! one to a document and returns the next document; the previous one is never
//! touched, so a failed or rejected change leaves nothing half-applied.

use chrono::{DateTime, Utc};

use super::document::ProgressDocument;
use crate::error::{Result, TrackerError};
use crate::roadmap::{InterviewQuestion, QuestionDraft, QuestionId, QuestionUpdate, Roadmap, Topic};

/// A single change to a progress document
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Flip the theory phase of a topic
    ToggleTheory { day: u32, topic_id: String },
    /// Flip the hands-on phase of a topic
    ToggleHandson { day: u32, topic_id: String },
    /// Replace theory notes and/or resource links
    UpdateTheory {
        day: u32,
        topic_id: String,
        notes: Option<String>,
        resource_links: Option<Vec<String>>,
    },
    /// Replace hands-on project details
    UpdateHandson {
        day: u32,
        topic_id: String,
        project_name: Option<String>,
        github_link: Option<String>,
        notes: Option<String>,
    },
    /// Append a question built from a draft under the given ID
    AddQuestion { day: u32, topic_id: String, id: QuestionId, draft: QuestionDraft },
    /// Flip the completed flag of a question
    ToggleQuestion { day: u32, topic_id: String, question_id: QuestionId },
    /// Merge fields into a question
    EditQuestion { day: u32, topic_id: String, question_id: QuestionId, update: QuestionUpdate },
    /// Remove a question
    DeleteQuestion { day: u32, topic_id: String, question_id: QuestionId },
    /// Flip the completed flag of a DSA problem
    ToggleDsaProblem { day: u32, problem_id: String },
    /// Move the current-day pointer (clamped to the document's days)
    SetCurrentDay(u32),
    /// Start over from the roadmap
    Reset,
    /// Replace the whole document, e.g. with an import
    Replace(ProgressDocument),
}

impl Mutation {
    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::ToggleTheory { .. } => "toggle-theory",
            Mutation::ToggleHandson { .. } => "toggle-handson",
            Mutation::UpdateTheory { .. } => "update-theory",
            Mutation::UpdateHandson { .. } => "update-handson",
            Mutation::AddQuestion { .. } => "add-question",
            Mutation::ToggleQuestion { .. } => "toggle-question",
            Mutation::EditQuestion { .. } => "edit-question",
            Mutation::DeleteQuestion { .. } => "delete-question",
            Mutation::ToggleDsaProblem { .. } => "toggle-dsa-problem",
            Mutation::SetCurrentDay(_) => "set-current-day",
            Mutation::Reset => "reset",
            Mutation::Replace(_) => "replace",
        }
    }
}

/// Apply a mutation and return the resulting document.
///
/// Fails with [`TrackerError::NotFound`] when the targeted day, topic,
/// question or problem does not exist, and with [`TrackerError::Validation`]
/// when question text is blank. `lastUpdated` is set to `now` on success.
pub fn reduce(
    previous: &ProgressDocument,
    mutation: &Mutation,
    roadmap: &Roadmap,
    now: DateTime<Utc>,
) -> Result<ProgressDocument> {
    let mut next = match mutation {
        Mutation::Reset => ProgressDocument::fresh(roadmap, now),
        Mutation::Replace(document) => document.clone(),
        _ => previous.clone(),
    };

    match mutation {
        Mutation::ToggleTheory { day, topic_id } => {
            let topic = topic_mut(&mut next, *day, topic_id)?;
            topic.theory.completed = !topic.theory.completed;
        }
        Mutation::ToggleHandson { day, topic_id } => {
            let topic = topic_mut(&mut next, *day, topic_id)?;
            topic.handson.completed = !topic.handson.completed;
        }
        Mutation::UpdateTheory { day, topic_id, notes, resource_links } => {
            let topic = topic_mut(&mut next, *day, topic_id)?;
            if let Some(notes) = notes {
                topic.theory.notes = notes.clone();
            }
            if let Some(links) = resource_links {
                topic.theory.resource_links = links.clone();
            }
        }
        Mutation::UpdateHandson { day, topic_id, project_name, github_link, notes } => {
            let topic = topic_mut(&mut next, *day, topic_id)?;
            if let Some(project_name) = project_name {
                topic.handson.project_name = project_name.clone();
            }
            if let Some(github_link) = github_link {
                topic.handson.github_link = github_link.clone();
            }
            if let Some(notes) = notes {
                topic.handson.notes = notes.clone();
            }
        }
        Mutation::AddQuestion { day, topic_id, id, draft } => {
            let topic = topic_mut(&mut next, *day, topic_id)?;
            if topic.question(id).is_some() {
                return Err(TrackerError::Validation(format!("question {} already exists", id)));
            }
            let question = InterviewQuestion::from_draft(id.clone(), draft, &topic.name, now)?;
            topic.interview_questions.push(question);
        }
        Mutation::ToggleQuestion { day, topic_id, question_id } => {
            let question = topic_mut(&mut next, *day, topic_id)?
                .question_mut(question_id)
                .ok_or_else(|| question_not_found(question_id))?;
            question.completed = !question.completed;
        }
        Mutation::EditQuestion { day, topic_id, question_id, update } => {
            let question = topic_mut(&mut next, *day, topic_id)?
                .question_mut(question_id)
                .ok_or_else(|| question_not_found(question_id))?;
            update.apply_to(question)?;
        }
        Mutation::DeleteQuestion { day, topic_id, question_id } => {
            let topic = topic_mut(&mut next, *day, topic_id)?;
            let before = topic.interview_questions.len();
            topic.interview_questions.retain(|q| &q.id != question_id);
            if topic.interview_questions.len() == before {
                return Err(question_not_found(question_id));
            }
        }
        Mutation::ToggleDsaProblem { day, problem_id } => {
            let problem = next
                .day_mut(*day)
                .ok_or_else(|| day_not_found(*day))?
                .problem_mut(problem_id)
                .ok_or_else(|| {
                    TrackerError::NotFound(format!("problem {} on day {}", problem_id, day))
                })?;
            problem.completed = !problem.completed;
        }
        Mutation::SetCurrentDay(day) => {
            next.current_day = next.clamp_day(*day);
        }
        Mutation::Reset => {}
        Mutation::Replace(_) => {
            next.validate()?;
        }
    }

    next.last_updated = now;
    Ok(next)
}

fn topic_mut<'a>(
    document: &'a mut ProgressDocument,
    day: u32,
    topic_id: &str,
) -> Result<&'a mut Topic> {
    document
        .day_mut(day)
        .ok_or_else(|| day_not_found(day))?
        .topic_mut(topic_id)
        .ok_or_else(|| TrackerError::NotFound(format!("topic {} on day {}", topic_id, day)))
}

fn day_not_found(day: u32) -> TrackerError {
    TrackerError::NotFound(format!("day {}", day))
}

fn question_not_found(question_id: &QuestionId) -> TrackerError {
    TrackerError::NotFound(format!("question {}", question_id))
}

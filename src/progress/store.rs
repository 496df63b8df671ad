//! The progress store
//!
//! [`ProgressStore`] owns the current document, applies mutations through
//! [`reduce`], writes every applied change to its backend and then notifies
//! subscribers. A change the backend refuses is not applied.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::backend::ProgressBackend;
use super::document::ProgressDocument;
use super::mutation::{Mutation, reduce};
use super::transfer::{export_progress, import_progress};
use crate::error::{Result, TrackerError};
use crate::roadmap::{Day, InterviewQuestion, QuestionDraft, QuestionId, QuestionUpdate, Roadmap};
use crate::stats::{self, Completion, OverallStats};

/// How a stored document is combined with the roadmap on startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadPolicy {
    /// Use the stored document as it is
    SeedOnce,
    /// Merge the stored document into the current roadmap
    #[default]
    Reconcile,
}

/// Handle returned by [`ProgressStore::on_change`]
pub type ListenerId = u64;

type Listener = Box<dyn Fn(&ProgressDocument)>;

/// Owner of the progress document
pub struct ProgressStore<B: ProgressBackend> {
    backend: B,
    roadmap: Roadmap,
    document: ProgressDocument,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: ListenerId,
}

impl<B: ProgressBackend> ProgressStore<B> {
    /// Open the store, reading the backend once.
    ///
    /// With nothing stored, the document is seeded from the roadmap and saved.
    /// A stored document that cannot be parsed or breaks an invariant is
    /// replaced in memory by a seeded one; the slot is left alone until the
    /// next change. I/O errors are returned.
    pub fn open(mut backend: B, roadmap: Roadmap, policy: LoadPolicy) -> Result<Self> {
        let now = Utc::now();

        let document = match backend.load() {
            Ok(Some(stored)) if stored.days.is_empty() && !roadmap.days.is_empty() => {
                warn!("Stored progress has no days, starting from the roadmap");
                ProgressDocument::seed(&roadmap, now)
            }
            Ok(Some(stored)) => match policy {
                LoadPolicy::SeedOnce => stored,
                LoadPolicy::Reconcile => {
                    let merged = stored.clone().reconcile(&roadmap);
                    if merged != stored {
                        info!("Merged roadmap changes into stored progress");
                        backend.save(&merged)?;
                    }
                    merged
                }
            },
            Ok(None) => {
                info!("No stored progress, seeding {} days from the roadmap", roadmap.days.len());
                let seeded = ProgressDocument::seed(&roadmap, now);
                backend.save(&seeded)?;
                seeded
            }
            Err(err) if err.is_data_error() => {
                warn!("Stored progress is unreadable, starting from the roadmap: {}", err);
                ProgressDocument::seed(&roadmap, now)
            }
            Err(err) => return Err(err),
        };

        Ok(Self { backend, roadmap, document, listeners: Vec::new(), next_listener_id: 0 })
    }

    /// The current document
    pub fn document(&self) -> &ProgressDocument {
        &self.document
    }

    /// The roadmap the store was opened with
    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    /// The persistence backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Call `listener` with the new document after every applied change
    pub fn on_change<F>(&mut self, listener: F) -> ListenerId
    where
        F: Fn(&ProgressDocument) + 'static,
    {
        let id = self.next_listener_id;
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() < before
    }

    fn emit(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.document);
        }
    }

    /// Apply a mutation. Returns `Ok(false)` when its target does not exist.
    pub fn apply(&mut self, mutation: Mutation) -> Result<bool> {
        let next = match reduce(&self.document, &mutation, &self.roadmap, Utc::now()) {
            Ok(next) => next,
            Err(TrackerError::NotFound(what)) => {
                debug!("Ignoring {}: {} not found", mutation.name(), what);
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        self.backend.save(&next)?;
        self.document = next;
        debug!("Applied {}", mutation.name());
        self.emit();
        Ok(true)
    }

    // === Mutations ===

    /// Flip the theory phase of a topic
    pub fn toggle_theory_phase(&mut self, day: u32, topic_id: &str) -> Result<bool> {
        self.apply(Mutation::ToggleTheory { day, topic_id: topic_id.to_string() })
    }

    /// Flip the hands-on phase of a topic
    pub fn toggle_handson_phase(&mut self, day: u32, topic_id: &str) -> Result<bool> {
        self.apply(Mutation::ToggleHandson { day, topic_id: topic_id.to_string() })
    }

    /// Replace theory notes and/or resource links
    pub fn update_theory_phase(
        &mut self,
        day: u32,
        topic_id: &str,
        notes: Option<String>,
        resource_links: Option<Vec<String>>,
    ) -> Result<bool> {
        self.apply(Mutation::UpdateTheory {
            day,
            topic_id: topic_id.to_string(),
            notes,
            resource_links,
        })
    }

    /// Replace hands-on project details
    pub fn update_handson_phase(
        &mut self,
        day: u32,
        topic_id: &str,
        project_name: Option<String>,
        github_link: Option<String>,
        notes: Option<String>,
    ) -> Result<bool> {
        self.apply(Mutation::UpdateHandson {
            day,
            topic_id: topic_id.to_string(),
            project_name,
            github_link,
            notes,
        })
    }

    /// Add an interview question. Returns its ID, or `None` when the topic
    /// does not exist. Blank question text is a validation error.
    pub fn add_interview_question(
        &mut self,
        day: u32,
        topic_id: &str,
        draft: QuestionDraft,
    ) -> Result<Option<QuestionId>> {
        let id = QuestionId::generate();
        let added = self.apply(Mutation::AddQuestion {
            day,
            topic_id: topic_id.to_string(),
            id: id.clone(),
            draft,
        })?;
        Ok(added.then_some(id))
    }

    /// Flip the completed flag of a question
    pub fn toggle_interview_question(
        &mut self,
        day: u32,
        topic_id: &str,
        question_id: &QuestionId,
    ) -> Result<bool> {
        self.apply(Mutation::ToggleQuestion {
            day,
            topic_id: topic_id.to_string(),
            question_id: question_id.clone(),
        })
    }

    /// Merge fields into a question
    pub fn edit_interview_question(
        &mut self,
        day: u32,
        topic_id: &str,
        question_id: &QuestionId,
        update: QuestionUpdate,
    ) -> Result<bool> {
        self.apply(Mutation::EditQuestion {
            day,
            topic_id: topic_id.to_string(),
            question_id: question_id.clone(),
            update,
        })
    }

    /// Remove a question
    pub fn delete_interview_question(
        &mut self,
        day: u32,
        topic_id: &str,
        question_id: &QuestionId,
    ) -> Result<bool> {
        self.apply(Mutation::DeleteQuestion {
            day,
            topic_id: topic_id.to_string(),
            question_id: question_id.clone(),
        })
    }

    /// Flip the completed flag of a DSA problem
    pub fn toggle_dsa_problem(&mut self, day: u32, problem_id: &str) -> Result<bool> {
        self.apply(Mutation::ToggleDsaProblem { day, problem_id: problem_id.to_string() })
    }

    /// Move the current-day pointer. Returns the clamped day actually set.
    pub fn set_current_day(&mut self, day: u32) -> Result<u32> {
        self.apply(Mutation::SetCurrentDay(day))?;
        Ok(self.document.current_day)
    }

    /// Discard all progress and start again from the roadmap
    pub fn reset_progress(&mut self) -> Result<()> {
        self.apply(Mutation::Reset)?;
        info!("Progress reset");
        Ok(())
    }

    /// Replace the document with an exported backup. Rejected text leaves the
    /// current document untouched.
    pub fn import_document(&mut self, text: &str) -> Result<()> {
        let imported = import_progress(text)?;
        let days = imported.days.len();
        self.apply(Mutation::Replace(imported))?;
        info!("Imported progress for {} days", days);
        Ok(())
    }

    // === Reads ===

    /// Serialize the current document for backup
    pub fn export_document(&self) -> Result<String> {
        export_progress(&self.document)
    }

    /// Get a day by number
    pub fn get_day(&self, day: u32) -> Option<&Day> {
        self.document.day(day)
    }

    /// Phase completion for a day; zeros when the day does not exist
    pub fn get_day_progress(&self, day: u32) -> Completion {
        self.get_day(day).map(stats::day_progress).unwrap_or_default()
    }

    /// Questions of a topic; empty when the day or topic does not exist
    pub fn get_interview_questions(&self, day: u32, topic_id: &str) -> &[InterviewQuestion] {
        self.get_day(day)
            .and_then(|d| d.topic(topic_id))
            .map(|t| t.interview_questions.as_slice())
            .unwrap_or(&[])
    }

    /// Day number before the given one
    pub fn previous_day(&self, day: u32) -> Option<u32> {
        self.document.previous_day(day)
    }

    /// Day number after the given one
    pub fn next_day(&self, day: u32) -> Option<u32> {
        self.document.next_day(day)
    }

    /// Aggregate statistics for the current document
    pub fn stats(&self) -> OverallStats {
        stats::overall_stats(&self.document)
    }
}

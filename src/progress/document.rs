//! The persisted progress document

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TrackerError};
use crate::roadmap::{Day, DsaProblem, Roadmap, Topic};

fn default_current_day() -> u32 {
    1
}

/// Everything the tracker persists for one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressDocument {
    /// Time of the last applied change
    #[serde(default = "Utc::now")]
    pub last_updated: DateTime<Utc>,
    /// Day the user is working on
    #[serde(default = "default_current_day")]
    pub current_day: u32,
    /// Per-day progress, in roadmap order
    pub days: Vec<Day>,
}

impl ProgressDocument {
    /// First-run document: a copy of the roadmap as shipped
    pub fn seed(roadmap: &Roadmap, now: DateTime<Utc>) -> Self {
        let mut document = Self { last_updated: now, current_day: 1, days: roadmap.days.clone() };
        document.current_day = document.clamp_day(1);
        document
    }

    /// Document with every completion, note and project field cleared
    pub fn fresh(roadmap: &Roadmap, now: DateTime<Utc>) -> Self {
        let mut document = Self::seed(roadmap, now);
        document.days = roadmap.days.iter().map(Day::cleared).collect();
        document
    }

    /// Get a day by number
    pub fn day(&self, day_number: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    /// Get a day by number for modification
    pub fn day_mut(&mut self, day_number: u32) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.day_number == day_number)
    }

    /// Lowest and highest day number, if there are any days
    pub fn day_range(&self) -> Option<(u32, u32)> {
        let first = self.days.iter().map(|d| d.day_number).min()?;
        let last = self.days.iter().map(|d| d.day_number).max()?;
        Some((first, last))
    }

    /// Clamp a day number into the range the document covers
    pub fn clamp_day(&self, day_number: u32) -> u32 {
        match self.day_range() {
            Some((first, last)) => day_number.clamp(first, last),
            None => 1,
        }
    }

    /// The closest day number before the given one
    pub fn previous_day(&self, day_number: u32) -> Option<u32> {
        self.days.iter().map(|d| d.day_number).filter(|n| *n < day_number).max()
    }

    /// The closest day number after the given one
    pub fn next_day(&self, day_number: u32) -> Option<u32> {
        self.days.iter().map(|d| d.day_number).filter(|n| *n > day_number).min()
    }

    /// Check the identity invariants: unique day numbers, and unique topic,
    /// problem and question IDs within their parents
    pub fn validate(&self) -> Result<()> {
        let mut day_numbers = HashSet::new();
        for day in &self.days {
            if !day_numbers.insert(day.day_number) {
                return Err(invalid(format!("day {} appears more than once", day.day_number)));
            }

            let mut topic_ids = HashSet::new();
            for topic in &day.topics {
                if !topic_ids.insert(topic.id.as_str()) {
                    return Err(invalid(format!(
                        "topic {} appears more than once on day {}",
                        topic.id, day.day_number
                    )));
                }

                let mut question_ids = HashSet::new();
                for question in &topic.interview_questions {
                    if !question_ids.insert(&question.id) {
                        return Err(invalid(format!(
                            "question {} appears more than once in topic {}",
                            question.id, topic.id
                        )));
                    }
                }
            }

            let mut problem_ids = HashSet::new();
            for problem in &day.dsa_problems {
                if !problem_ids.insert(problem.id.as_str()) {
                    return Err(invalid(format!(
                        "problem {} appears more than once on day {}",
                        problem.id, day.day_number
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate a stored document
    pub fn from_json(text: &str) -> Result<Self> {
        Self::from_slice(text.as_bytes())
    }

    /// Parse and validate raw slot bytes. Bytes that are not UTF-8 are a
    /// parse error.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: Self = serde_json::from_slice(bytes)?;
        document.validate()?;
        Ok(document)
    }

    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Merge this document into the structure of the given roadmap.
    ///
    /// Roadmap days, topics and problems come first, in roadmap order, with
    /// their current titles, names and priorities. Completions, notes and
    /// questions recorded here carry over by ID. Entries the roadmap no longer
    /// has are kept after the roadmap ones.
    pub fn reconcile(self, roadmap: &Roadmap) -> Self {
        if roadmap.days.is_empty() {
            return self;
        }

        let Self { last_updated, current_day, days: mut saved_days } = self;
        let mut days: Vec<Day> = roadmap
            .days
            .iter()
            .map(|fixture| {
                match take_first(&mut saved_days, |d| d.day_number == fixture.day_number) {
                    Some(saved) => merge_day(fixture, saved),
                    None => fixture.clone(),
                }
            })
            .collect();
        days.append(&mut saved_days);

        let mut document = Self { last_updated, current_day, days };
        document.current_day = document.clamp_day(current_day);
        document
    }
}

fn invalid(reason: String) -> TrackerError {
    TrackerError::InvalidDocument(reason)
}

fn take_first<T>(items: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> Option<T> {
    let index = items.iter().position(predicate)?;
    Some(items.remove(index))
}

fn merge_day(fixture: &Day, saved: Day) -> Day {
    let mut saved_topics = saved.topics;
    let mut topics: Vec<Topic> = fixture
        .topics
        .iter()
        .map(|topic| match take_first(&mut saved_topics, |t| t.id == topic.id) {
            Some(progress) => Topic {
                id: topic.id.clone(),
                name: topic.name.clone(),
                priority: topic.priority,
                ..progress
            },
            None => topic.clone(),
        })
        .collect();
    topics.append(&mut saved_topics);

    let mut saved_problems = saved.dsa_problems;
    let mut dsa_problems: Vec<DsaProblem> = fixture
        .dsa_problems
        .iter()
        .map(|problem| {
            let completed = take_first(&mut saved_problems, |p| p.id == problem.id)
                .is_some_and(|p| p.completed);
            DsaProblem { completed, ..problem.clone() }
        })
        .collect();
    dsa_problems.append(&mut saved_problems);

    Day {
        day_number: fixture.day_number,
        title: fixture.title.clone(),
        description: fixture.description.clone(),
        topics,
        dsa_problems,
        deliverables: fixture.deliverables.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::{Difficulty, InterviewQuestion, QuestionDraft, QuestionId};
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T09:30:00Z").unwrap().with_timezone(&Utc)
    }

    fn problem(id: &str, name: &str) -> DsaProblem {
        DsaProblem {
            id: id.into(),
            name: name.into(),
            difficulty: Difficulty::Medium,
            link: String::new(),
            completed: false,
        }
    }

    fn roadmap() -> Roadmap {
        let mut first = Day::new(1, "Networking");
        first.topics.push(Topic::new("d1-t1", "DNS", 0));
        first.topics.push(Topic::new("d1-t2", "HTTP", 1));
        first.dsa_problems.push(problem("d1-p1", "Two Sum"));
        let mut second = Day::new(2, "APIs");
        second.topics.push(Topic::new("d2-t1", "REST", 0));
        Roadmap { title: "Test".into(), days: vec![first, second] }
    }

    #[test]
    fn seed_copies_roadmap() {
        let document = ProgressDocument::seed(&roadmap(), now());
        assert_eq!(document.days, roadmap().days);
        assert_eq!(document.current_day, 1);
        assert_eq!(document.last_updated, now());
    }

    #[test]
    fn seed_of_empty_roadmap_points_at_day_one() {
        let document = ProgressDocument::seed(&Roadmap::default(), now());
        assert!(document.days.is_empty());
        assert_eq!(document.current_day, 1);
    }

    #[test]
    fn clamp_and_neighbours_follow_day_numbers() {
        let document = ProgressDocument::seed(&roadmap(), now());
        assert_eq!(document.clamp_day(0), 1);
        assert_eq!(document.clamp_day(99), 2);
        assert_eq!(document.previous_day(1), None);
        assert_eq!(document.next_day(1), Some(2));
        assert_eq!(document.previous_day(2), Some(1));
        assert_eq!(document.next_day(2), None);
    }

    #[test]
    fn validate_rejects_duplicate_topic_ids() {
        let mut document = ProgressDocument::seed(&roadmap(), now());
        document.days[0].topics.push(Topic::new("d1-t1", "Copy", 0));
        let err = document.validate().unwrap_err();
        assert!(err.to_string().contains("topic d1-t1"));
    }

    #[test]
    fn validate_rejects_duplicate_question_ids() {
        let mut document = ProgressDocument::seed(&roadmap(), now());
        let draft = QuestionDraft::new("Q");
        let question =
            InterviewQuestion::from_draft(QuestionId::from("iq-1"), &draft, "DNS", now()).unwrap();
        let topic = &mut document.days[0].topics[0];
        topic.interview_questions.push(question.clone());
        topic.interview_questions.push(question);
        assert!(document.validate().is_err());
    }

    #[test]
    fn from_json_accepts_web_export_shape() {
        let json = r#"{
            "lastUpdated": "2024-03-01T09:30:00.000Z",
            "currentDay": 2,
            "days": [{
                "dayNumber": 1,
                "title": "Networking",
                "description": "",
                "topics": [{
                    "id": "d1-t1",
                    "name": "DNS",
                    "priority": 0,
                    "theory": {"completed": true, "notes": "", "resourceLinks": []},
                    "interviewQuestions": {"completed": false, "questionsAnswered": 0, "totalQuestions": 5, "notes": ""},
                    "handson": {"completed": false, "projectName": "", "githubLink": "", "notes": ""}
                }],
                "dsaProblems": [],
                "deliverables": []
            }]
        }"#;
        let document = ProgressDocument::from_json(json).unwrap();
        assert_eq!(document.current_day, 2);
        assert!(document.days[0].topics[0].theory.completed);
        assert!(document.days[0].topics[0].interview_questions.is_empty());
    }

    #[test]
    fn reconcile_keeps_completions_and_takes_new_names() {
        let mut saved = ProgressDocument::seed(&roadmap(), now());
        saved.days[0].topics[0].theory.completed = true;
        saved.days[0].topics[0].name = "Old name".into();
        saved.days[0].dsa_problems[0].completed = true;

        let mut updated = roadmap();
        updated.days[0].topics[0].name = "DNS and resolvers".into();
        updated.days[0].topics.push(Topic::new("d1-t3", "TLS", 2));

        let merged = saved.reconcile(&updated);
        let day = merged.day(1).unwrap();
        assert_eq!(day.topics.len(), 3);
        assert_eq!(day.topics[0].name, "DNS and resolvers");
        assert!(day.topics[0].theory.completed);
        assert_eq!(day.topics[2].id, "d1-t3");
        assert!(day.dsa_problems[0].completed);
    }

    #[test]
    fn reconcile_keeps_entries_missing_from_roadmap() {
        let mut saved = ProgressDocument::seed(&roadmap(), now());
        saved.days[0].topics.push(Topic::new("custom", "My extra topic", 6));
        let mut extra_day = Day::new(61, "Bonus");
        extra_day.topics.push(Topic::new("d61-t1", "Bonus topic", 6));
        saved.days.push(extra_day);
        saved.current_day = 61;

        let merged = saved.reconcile(&roadmap());
        assert_eq!(merged.day(1).unwrap().topics.last().unwrap().id, "custom");
        assert_eq!(merged.days.last().unwrap().day_number, 61);
        assert_eq!(merged.current_day, 61);
    }

    #[test]
    fn reconcile_adds_new_days() {
        let mut short = roadmap();
        short.days.truncate(1);
        let saved = ProgressDocument::seed(&short, now());

        let merged = saved.reconcile(&roadmap());
        assert_eq!(merged.days.len(), 2);
        assert_eq!(merged.days[1].title, "APIs");
    }

    #[test]
    fn reconcile_with_empty_roadmap_is_identity() {
        let saved = ProgressDocument::seed(&roadmap(), now());
        assert_eq!(saved.clone().reconcile(&Roadmap::default()), saved);
    }
}

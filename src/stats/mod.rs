//! Statistics over progress documents
//!
//! Pure functions only. Nothing here changes a document.

mod priority;

pub use priority::{
    PRIORITY_LEVELS, ProgressTier, priority_color_token, priority_label, progress_color_token,
    progress_tier,
};

use serde::Serialize;

use crate::progress::ProgressDocument;
use crate::roadmap::{Day, Topic};

/// Phases every topic has: theory, interview questions and hands-on
pub const PHASES_PER_TOPIC: usize = 3;

/// Completed out of total, with a rounded percentage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// `round(100 * completed / total)`, 0 when total is 0
    pub percentage: u8,
    pub completed: usize,
    pub total: usize,
}

impl Completion {
    pub fn new(completed: usize, total: usize) -> Self {
        Self { percentage: percentage(completed, total), completed, total }
    }

    /// Phase completion, where only a finished total shows 100
    pub fn phases(completed: usize, total: usize) -> Self {
        Self { percentage: phase_percentage(completed, total), completed, total }
    }

    /// Check if there is something to complete and all of it is done
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// `round(100 * completed / total)`, halves rounding up
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    (completed as f64 / total as f64 * 100.0).round() as u8
}

/// [`percentage`] held at 99 until every phase is done
fn phase_percentage(completed: usize, total: usize) -> u8 {
    let rounded = percentage(completed, total);
    if completed < total { rounded.min(99) } else { rounded }
}

/// Phase completion of one topic, out of 3
pub fn topic_progress(topic: &Topic) -> Completion {
    Completion::phases(topic.completed_phases(), PHASES_PER_TOPIC)
}

/// Check if all three phases of a topic are done
pub fn is_topic_complete(topic: &Topic) -> bool {
    topic.completed_phases() == PHASES_PER_TOPIC
}

/// Phase completion over every topic of a day
pub fn day_progress(day: &Day) -> Completion {
    phase_progress(&day.topics)
}

/// DSA problem completion for a day
pub fn dsa_progress(day: &Day) -> Completion {
    let completed = day.dsa_problems.iter().filter(|p| p.completed).count();
    Completion::new(completed, day.dsa_problems.len())
}

/// Phase completion over every topic of every day
pub fn overall_phase_progress(days: &[Day]) -> Completion {
    let (completed, total) = days.iter().fold((0, 0), |(completed, total), day| {
        let progress = day_progress(day);
        (completed + progress.completed, total + progress.total)
    });
    Completion::phases(completed, total)
}

fn phase_progress(topics: &[Topic]) -> Completion {
    let completed = topics.iter().map(Topic::completed_phases).sum();
    Completion::phases(completed, topics.len() * PHASES_PER_TOPIC)
}

/// Aggregate counts for a whole document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallStats {
    pub total_days: usize,
    pub total_topics: usize,
    /// Topics whose theory phase is done
    pub topics_completed: usize,
    pub theory_completed: usize,
    /// Topics with a non-empty, fully completed question list
    pub interviews_completed: usize,
    pub interview_questions_answered: usize,
    pub total_interview_questions: usize,
    pub handson_completed: usize,
    pub total_dsa_problems: usize,
    pub dsa_completed: usize,
    /// Headline figure: `topics_completed` as a percentage of `total_topics`
    pub overall_progress: u8,
}

/// Fold a document into [`OverallStats`].
///
/// `topics_completed` and `overall_progress` count the theory phase only.
pub fn overall_stats(document: &ProgressDocument) -> OverallStats {
    let mut stats = OverallStats { total_days: document.days.len(), ..Default::default() };

    for day in &document.days {
        for topic in &day.topics {
            stats.total_topics += 1;
            if topic.theory.completed {
                stats.theory_completed += 1;
            }
            if topic.interview_phase_complete() {
                stats.interviews_completed += 1;
            }
            if topic.handson.completed {
                stats.handson_completed += 1;
            }
            stats.total_interview_questions += topic.interview_questions.len();
            stats.interview_questions_answered +=
                topic.interview_questions.iter().filter(|q| q.completed).count();
        }

        stats.total_dsa_problems += day.dsa_problems.len();
        stats.dsa_completed += day.dsa_problems.iter().filter(|p| p.completed).count();
    }

    stats.topics_completed = stats.theory_completed;
    stats.overall_progress = percentage(stats.topics_completed, stats.total_topics);
    stats
}

/// Where a day stands, judged by its phase completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DayStatus {
    Completed,
    InProgress,
    NotStarted,
}

impl DayStatus {
    pub fn of(day: &Day) -> Self {
        match day_progress(day).percentage {
            100 => DayStatus::Completed,
            0 => DayStatus::NotStarted,
            _ => DayStatus::InProgress,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DayStatus::Completed => "Completed",
            DayStatus::InProgress => "In progress",
            DayStatus::NotStarted => "Not started",
        }
    }
}

/// Days split by [`DayStatus`], each group in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayGroups<'a> {
    pub completed: Vec<&'a Day>,
    pub in_progress: Vec<&'a Day>,
    pub not_started: Vec<&'a Day>,
}

pub fn group_days_by_status(days: &[Day]) -> DayGroups<'_> {
    let mut groups = DayGroups::default();
    for day in days {
        match DayStatus::of(day) {
            DayStatus::Completed => groups.completed.push(day),
            DayStatus::InProgress => groups.in_progress.push(day),
            DayStatus::NotStarted => groups.not_started.push(day),
        }
    }
    groups
}

/// All topics when `priority` is `None`, otherwise those with that priority
pub fn topics_by_priority(topics: &[Topic], priority: Option<u8>) -> Vec<&Topic> {
    topics.iter().filter(|t| priority.is_none_or(|p| t.priority == p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::{Difficulty, DsaProblem, InterviewQuestion, QuestionDraft, Roadmap};
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn question(id: &str, completed: bool) -> InterviewQuestion {
        let mut question =
            InterviewQuestion::from_draft(id.into(), &QuestionDraft::new("Q"), "T", Utc::now())
                .unwrap();
        question.completed = completed;
        question
    }

    fn topic(id: &str, theory: bool, handson: bool, questions: &[bool]) -> Topic {
        let mut topic = Topic::new(id, id.to_uppercase(), 0);
        topic.theory.completed = theory;
        topic.handson.completed = handson;
        topic.interview_questions = questions
            .iter()
            .enumerate()
            .map(|(i, done)| question(&format!("iq-{}", i), *done))
            .collect();
        topic
    }

    fn day(number: u32, topics: Vec<Topic>) -> Day {
        let mut day = Day::new(number, format!("Day {}", number));
        day.topics = topics;
        day
    }

    #[test]
    fn empty_day_is_zero() {
        assert_eq!(day_progress(&Day::new(1, "Empty")), Completion::default());
        assert_eq!(dsa_progress(&Day::new(1, "Empty")), Completion::default());
    }

    #[test]
    fn untouched_day_with_two_topics() {
        let d = day(1, vec![topic("a", false, false, &[]), topic("b", false, false, &[])]);
        assert_eq!(day_progress(&d), Completion { percentage: 0, completed: 0, total: 6 });
    }

    #[test]
    fn one_of_two_topics_complete_is_half() {
        let d = day(1, vec![topic("a", true, true, &[true]), topic("b", false, false, &[])]);
        assert_eq!(day_progress(&d), Completion { percentage: 50, completed: 3, total: 6 });
    }

    #[test]
    fn interview_phase_needs_every_question() {
        let partial = topic("a", false, false, &[true, false]);
        let empty = topic("b", false, false, &[]);
        let done = topic("c", false, false, &[true, true]);

        assert_eq!(topic_progress(&partial).completed, 0);
        assert_eq!(topic_progress(&empty).completed, 0);
        assert_eq!(topic_progress(&done).completed, 1);
    }

    #[test]
    fn percentages_round_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(199, 200), 100);
    }

    #[test]
    fn unfinished_phases_stay_below_100() {
        assert_eq!(Completion::phases(199, 200).percentage, 99);
        assert_eq!(Completion::phases(200, 200).percentage, 100);
        assert_eq!(Completion::phases(1, 3).percentage, 33);

        let mut topics = vec![topic("last", true, true, &[])];
        for i in 0..70 {
            topics.push(topic(&format!("t{}", i), true, true, &[true]));
        }
        let nearly = day(1, topics);
        assert_eq!(day_progress(&nearly).percentage, 99);
        assert!(!day_progress(&nearly).is_complete());
    }

    #[test]
    fn headline_and_dsa_use_plain_rounding() {
        let mut topics = vec![topic("last", false, false, &[])];
        let mut problems = Day::new(1, "DSA");
        for i in 0..199 {
            topics.push(topic(&format!("t{}", i), true, false, &[]));
            problems.dsa_problems.push(DsaProblem {
                id: format!("p{}", i),
                name: "Problem".into(),
                difficulty: Difficulty::Easy,
                link: String::new(),
                completed: true,
            });
        }
        problems.dsa_problems.push(DsaProblem {
            id: "p-last".into(),
            name: "Problem".into(),
            difficulty: Difficulty::Hard,
            link: String::new(),
            completed: false,
        });
        let document = ProgressDocument {
            last_updated: Utc::now(),
            current_day: 1,
            days: vec![day(1, topics)],
        };

        assert_eq!(overall_stats(&document).overall_progress, 100);
        assert_eq!(dsa_progress(&problems).percentage, 100);
    }

    #[test]
    fn dsa_progress_counts_problems() {
        let mut d = Day::new(1, "DSA");
        for (i, completed) in [true, false, false].into_iter().enumerate() {
            d.dsa_problems.push(DsaProblem {
                id: format!("p{}", i),
                name: "Problem".into(),
                difficulty: Difficulty::Medium,
                link: String::new(),
                completed,
            });
        }
        assert_eq!(dsa_progress(&d), Completion { percentage: 33, completed: 1, total: 3 });
    }

    #[test]
    fn overall_progress_counts_theory_only() {
        let document = ProgressDocument {
            last_updated: Utc::now(),
            current_day: 1,
            days: vec![
                day(1, vec![topic("a", true, false, &[]), topic("b", false, true, &[true, false])]),
                day(2, vec![topic("c", false, false, &[true]), topic("d", true, true, &[])]),
            ],
        };

        let stats = overall_stats(&document);
        assert_eq!(
            stats,
            OverallStats {
                total_days: 2,
                total_topics: 4,
                topics_completed: 2,
                theory_completed: 2,
                interviews_completed: 1,
                interview_questions_answered: 2,
                total_interview_questions: 3,
                handson_completed: 2,
                total_dsa_problems: 0,
                dsa_completed: 0,
                overall_progress: 50,
            }
        );
    }

    #[test]
    fn embedded_roadmap_starts_at_zero() {
        let document = ProgressDocument::seed(Roadmap::embedded(), Utc::now());
        let stats = overall_stats(&document);
        assert_eq!(stats.total_days, 60);
        assert_eq!(stats.overall_progress, 0);
        assert_eq!(overall_phase_progress(&document.days).completed, 0);
        assert!(stats.total_dsa_problems > 0);
    }

    #[test]
    fn groups_preserve_order() {
        let days = vec![
            day(1, vec![topic("a", true, true, &[true])]),
            day(2, vec![topic("a", true, true, &[]), topic("b", false, false, &[])]),
            day(3, vec![topic("a", false, false, &[])]),
            day(4, vec![topic("a", true, false, &[])]),
        ];
        assert_eq!(day_progress(&days[1]).percentage, 33);

        let groups = group_days_by_status(&days);
        let numbers = |group: &[&Day]| group.iter().map(|d| d.day_number).collect::<Vec<_>>();
        assert_eq!(numbers(&groups.completed), vec![1]);
        assert_eq!(numbers(&groups.in_progress), vec![2, 4]);
        assert_eq!(numbers(&groups.not_started), vec![3]);
    }

    #[test]
    fn day_without_topics_is_not_started() {
        assert_eq!(DayStatus::of(&Day::new(7, "Rest")), DayStatus::NotStarted);
    }

    #[test]
    fn priority_filter() {
        let mut topics = vec![topic("a", false, false, &[]), topic("b", false, false, &[])];
        topics[1].priority = 3;

        let all = topics_by_priority(&topics, None);
        assert_eq!(all.len(), 2);
        assert!(std::ptr::eq(all[0], &topics[0]));
        assert!(std::ptr::eq(all[1], &topics[1]));

        let zero = topics_by_priority(&topics, Some(0));
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].id, "a");
        assert!(topics_by_priority(&topics, Some(6)).is_empty());
    }

    fn arb_topic() -> impl Strategy<Value = Topic> {
        (any::<bool>(), any::<bool>(), prop::collection::vec(any::<bool>(), 0..4))
            .prop_map(|(theory, handson, questions)| topic("t", theory, handson, &questions))
    }

    proptest! {
        #[test]
        fn day_progress_is_bounded(topics in prop::collection::vec(arb_topic(), 0..8)) {
            let d = day(1, topics);
            let progress = day_progress(&d);
            prop_assert!(progress.percentage <= 100);
            prop_assert!(progress.completed <= progress.total);

            let all_complete = !d.topics.is_empty() && d.topics.iter().all(is_topic_complete);
            prop_assert_eq!(progress.percentage == 100, all_complete);
        }
    }
}

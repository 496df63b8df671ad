//! Whole-roadmap views: status report and roadmap summary

use super::{Painter, progress_bar};
use crate::progress::ProgressDocument;
use crate::roadmap::{RoadmapSummary, suggested_next_topic};
use crate::stats::{
    self, Completion, DayStatus, PRIORITY_LEVELS, group_days_by_status, overall_stats,
    priority_label,
};

const BAR_WIDTH: usize = 30;

/// The status report: headline progress, counts, day groups and what to do next
pub fn render_status(painter: &Painter, title: &str, document: &ProgressDocument) -> String {
    let mut out = String::new();
    let stats = overall_stats(document);

    if !title.is_empty() {
        out.push_str(&format!("{}\n", painter.heading(title)));
    }
    let headline = Completion {
        percentage: stats.overall_progress,
        completed: stats.topics_completed,
        total: stats.total_topics,
    };
    out.push_str(&format!("Overall  {}\n", progress_bar::render(painter, &headline, BAR_WIDTH)));
    let phases = stats::overall_phase_progress(&document.days);
    out.push_str(&format!("Phases   {}\n", progress_bar::render(painter, &phases, BAR_WIDTH)));
    out.push('\n');

    let counts = [
        ("Current day", document.current_day.to_string()),
        ("Theory", format!("{}/{}", stats.theory_completed, stats.total_topics)),
        ("Interviews", format!("{}/{}", stats.interviews_completed, stats.total_topics)),
        (
            "Questions",
            format!(
                "{}/{} answered",
                stats.interview_questions_answered, stats.total_interview_questions
            ),
        ),
        ("Hands-on", format!("{}/{}", stats.handson_completed, stats.total_topics)),
        ("DSA problems", format!("{}/{}", stats.dsa_completed, stats.total_dsa_problems)),
    ];
    for (label, value) in counts {
        out.push_str(&format!("{:<16}{}\n", label, value));
    }
    out.push('\n');

    let groups = group_days_by_status(&document.days);
    for (status, days) in [
        (DayStatus::Completed, &groups.completed),
        (DayStatus::InProgress, &groups.in_progress),
        (DayStatus::NotStarted, &groups.not_started),
    ] {
        let numbers: Vec<String> = days.iter().map(|d| d.day_number.to_string()).collect();
        let listed = if numbers.is_empty() { "-".to_string() } else { numbers.join(", ") };
        out.push_str(&format!("{:<15} {}\n", status.label(), painter.muted(&listed)));
    }

    if let Some(next) = suggested_next_topic(&document.days) {
        out.push('\n');
        out.push_str(&format!(
            "Next up: {} {}\n",
            painter.bold(next.topic.name.as_str()),
            painter.muted(&format!("(day {}, {})", next.day_number, next.day_title)),
        ));
    } else if !document.days.is_empty() {
        out.push('\n');
        let done = painter.paint("Every topic is complete", painter.theme().success);
        out.push_str(&format!("{}\n", done));
    }

    out
}

/// Static facts about the roadmap content
pub fn render_summary(painter: &Painter, title: &str, summary: &RoadmapSummary) -> String {
    let mut out = String::new();

    if !title.is_empty() {
        out.push_str(&format!("{}\n", painter.heading(title)));
    }
    out.push_str(&format!("Days            {}\n", summary.total_days));
    out.push_str(&format!("Topics          {}\n", summary.total_topics));
    out.push_str(&format!("DSA problems    {}\n", summary.total_dsa_problems));
    out.push('\n');
    out.push_str(&format!("{}\n", painter.bold("Topics by priority")));

    for level in PRIORITY_LEVELS {
        let count = summary.priority_breakdown.get(&level).copied().unwrap_or(0);
        let label = painter.paint(priority_label(level), painter.theme().priority_color(level));
        out.push_str(&format!("  {} {:<15} {}\n", level, label, count));
    }
    let other: usize = summary
        .priority_breakdown
        .iter()
        .filter(|(level, _)| !PRIORITY_LEVELS.contains(*level))
        .map(|(_, count)| count)
        .sum();
    if other > 0 {
        out.push_str(&format!("  ? {:<15} {}\n", priority_label(u8::MAX), other));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::{Day, Roadmap, Topic};
    use chrono::Utc;

    fn document() -> ProgressDocument {
        let mut first = Day::new(1, "Networking");
        let mut dns = Topic::new("d1-t1", "DNS", 0);
        dns.theory.completed = true;
        first.topics.push(dns);
        let mut second = Day::new(2, "APIs");
        second.topics.push(Topic::new("d2-t1", "REST", 1));
        let roadmap = Roadmap { title: String::new(), days: vec![first, second] };
        ProgressDocument::seed(&roadmap, Utc::now())
    }

    #[test]
    fn status_shows_headline_and_groups() {
        let text = render_status(&Painter::plain(), "Roadmap", &document());
        assert!(text.starts_with("Roadmap\n"));
        assert!(text.contains("50% (1/2)"));
        assert!(text.contains("Theory          1/2"));
        assert!(text.contains("In progress     1"));
        assert!(text.contains("Not started     2"));
        assert!(text.contains("Completed       -"));
        assert!(text.contains("Next up: DNS (day 1, Networking)"));
    }

    #[test]
    fn status_of_empty_document() {
        let empty = ProgressDocument::seed(&Roadmap::default(), Utc::now());
        let text = render_status(&Painter::plain(), "", &empty);
        assert!(text.starts_with("Overall"));
        assert!(!text.contains("Next up"));
    }

    #[test]
    fn summary_lists_every_priority() {
        let text = render_summary(&Painter::plain(), "", &Roadmap::embedded().summary());
        assert!(text.starts_with("Days            60\n"));
        for level in PRIORITY_LEVELS {
            assert!(text.contains(priority_label(level)));
        }
        assert!(!text.contains("UNKNOWN"));
    }
}

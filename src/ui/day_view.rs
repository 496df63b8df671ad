//! Day detail and interview question listings

use super::{Painter, TEXT_WIDTH, progress_bar};
use crate::roadmap::{Day, Difficulty, InterviewQuestion, Topic, TopicRef};
use crate::stats::{self, priority_label};

const BAR_WIDTH: usize = 20;

/// Full view of one day: topics with their phases, problems and deliverables
pub fn render_day(painter: &Painter, day: &Day, is_current: bool) -> String {
    let mut out = String::new();
    let theme = painter.theme();

    let heading = painter.heading(&format!("Day {}: {}", day.day_number, day.title));
    let marker = if is_current {
        painter.paint(" (current)", theme.accent_secondary)
    } else {
        String::new()
    };
    out.push_str(&format!("{}{}\n", heading, marker));
    for line in textwrap::wrap(&day.description, TEXT_WIDTH) {
        out.push_str(&format!("{}\n", painter.paint(&line, theme.fg_secondary)));
    }
    out.push('\n');

    let topics = progress_bar::render(painter, &stats::day_progress(day), BAR_WIDTH);
    out.push_str(&format!("Topics  {}\n", topics));
    if !day.dsa_problems.is_empty() {
        let dsa = progress_bar::render(painter, &stats::dsa_progress(day), BAR_WIDTH);
        out.push_str(&format!("DSA     {}\n", dsa));
    }

    for topic in &day.topics {
        out.push('\n');
        out.push_str(&render_topic(painter, topic));
    }

    if !day.dsa_problems.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", painter.bold("DSA problems")));
        for problem in &day.dsa_problems {
            let difficulty = format!("[{}]", problem.difficulty);
            out.push_str(&format!(
                "  {} {} {} {}\n",
                painter.check(problem.completed),
                problem.name,
                painter.paint(&difficulty, difficulty_color(painter, problem.difficulty)),
                painter.muted(&format!("({})", problem.id)),
            ));
            if !problem.link.is_empty() {
                out.push_str(&format!("      {}\n", painter.muted(&problem.link)));
            }
        }
    }

    if !day.deliverables.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", painter.bold("Deliverables")));
        for deliverable in &day.deliverables {
            out.push_str(&format!("  - {}\n", deliverable));
        }
    }

    out
}

/// A topic with its priority and three phases
pub fn render_topic(painter: &Painter, topic: &Topic) -> String {
    let mut out = String::new();
    let theme = painter.theme();
    let done = stats::topic_progress(topic);

    out.push_str(&format!(
        "{} {} {} {}\n",
        painter.bold(&topic.name),
        painter.paint(priority_label(topic.priority), theme.priority_color(topic.priority)),
        painter.muted(&format!("({})", topic.id)),
        painter.muted(&format!("{}/{}", done.completed, done.total)),
    ));

    let answered = topic.interview_questions.iter().filter(|q| q.completed).count();
    out.push_str(&format!("  {} Theory\n", painter.check(topic.theory.completed)));
    out.push_str(&format!(
        "  {} Interview questions ({}/{})\n",
        painter.check(topic.interview_phase_complete()),
        answered,
        topic.interview_questions.len()
    ));
    out.push_str(&format!("  {} Hands-on\n", painter.check(topic.handson.completed)));

    if !topic.handson.project_name.is_empty() {
        out.push_str(&format!("      Project: {}\n", topic.handson.project_name));
    }
    if !topic.handson.github_link.is_empty() {
        out.push_str(&format!("      {}\n", painter.muted(&topic.handson.github_link)));
    }
    for link in &topic.theory.resource_links {
        out.push_str(&format!("      {}\n", painter.muted(link)));
    }

    out
}

/// Answered count for a topic's questions, then the `shown` subset of them.
/// Questions keep their position in the full list as their number.
pub fn render_questions(
    painter: &Painter,
    topic: &Topic,
    shown: &[&InterviewQuestion],
) -> String {
    let questions = &topic.interview_questions;
    if questions.is_empty() {
        return format!("No interview questions for {} yet\n", topic.name);
    }

    let answered = questions.iter().filter(|q| q.completed).count();
    let badge = if answered == questions.len() {
        painter.paint("complete", painter.theme().success)
    } else {
        painter.muted(&format!("{}% done", stats::percentage(answered, questions.len())))
    };
    let mut out = format!(
        "{}: {} of {} answered, {}\n",
        painter.bold(&topic.name),
        answered,
        questions.len(),
        badge
    );

    if shown.is_empty() {
        out.push_str("No questions match the filters\n");
        return out;
    }
    for question in shown {
        let number = questions.iter().position(|q| q.id == question.id).map_or(0, |i| i + 1);
        out.push_str(&render_question(painter, number, question));
    }
    out
}

fn render_question(painter: &Painter, number: usize, question: &InterviewQuestion) -> String {
    let mut out = String::new();
    let theme = painter.theme();

    out.push_str(&format!(
        "{:>2}. {} {} {}\n",
        number,
        painter.check(question.completed),
        question.question,
        painter.muted(&format!("[{}] {}", question.category, question.id)),
    ));
    if !question.tags.is_empty() {
        let tags: Vec<_> = question.tags.iter().map(|t| format!("#{}", t)).collect();
        out.push_str(&format!("      {}\n", painter.paint(&tags.join(" "), theme.info)));
    }
    for line in textwrap::wrap(&question.answer, TEXT_WIDTH - 6) {
        out.push_str(&format!("      {}\n", line));
    }
    out
}

/// One line per topic, with the day it belongs to
pub fn render_topic_refs(painter: &Painter, refs: &[TopicRef<'_>]) -> String {
    let mut out = String::new();
    for r in refs {
        let done = stats::topic_progress(r.topic);
        out.push_str(&format!(
            "Day {:>2}  {} {} {}\n",
            r.day_number,
            painter.check(done.is_complete()),
            r.topic.name,
            painter.muted(&format!("({}, {})", r.topic.id, priority_label(r.topic.priority))),
        ));
    }
    out
}

fn difficulty_color(painter: &Painter, difficulty: Difficulty) -> crossterm::style::Color {
    let theme = painter.theme();
    match difficulty {
        Difficulty::Easy => theme.success,
        Difficulty::Medium => theme.warning,
        Difficulty::Hard => theme.error,
    }
}

//! The static roadmap dataset
//!
//! The 60-day roadmap ships inside the binary. A different roadmap file can be
//! loaded from disk with the same `{ "roadmap": { "days": [...] } }` shape.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::model::Day;
use crate::error::{Result, TrackerError};

const EMBEDDED_ROADMAP: &str = include_str!("../../data/roadmap-60-days.json");

static EMBEDDED: Lazy<Roadmap> = Lazy::new(|| match Roadmap::parse(EMBEDDED_ROADMAP) {
    Ok(roadmap) => roadmap,
    Err(err) => {
        tracing::error!("Embedded roadmap is unreadable, starting empty: {}", err);
        Roadmap::default()
    }
});

#[derive(Debug, Deserialize)]
struct RoadmapFile {
    roadmap: Roadmap,
}

/// A read-only roadmap: the ordered list of days
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roadmap {
    /// Roadmap title
    #[serde(default)]
    pub title: String,
    /// Days in order
    pub days: Vec<Day>,
}

/// Counts describing a roadmap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadmapSummary {
    pub total_days: usize,
    pub total_topics: usize,
    pub total_dsa_problems: usize,
    /// Topic count per priority level
    pub priority_breakdown: BTreeMap<u8, usize>,
}

impl Roadmap {
    /// The roadmap compiled into the binary
    pub fn embedded() -> &'static Roadmap {
        &EMBEDDED
    }

    /// Parse a roadmap document
    pub fn parse(text: &str) -> Result<Self> {
        let file: RoadmapFile = serde_json::from_str(text)?;
        file.roadmap.validate()?;
        Ok(file.roadmap)
    }

    /// Load a roadmap document from disk
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Check that every day has a positive, unique number and a title
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for day in &self.days {
            if day.day_number == 0 {
                return Err(TrackerError::InvalidDocument(format!(
                    "day \"{}\" has no day number",
                    day.title
                )));
            }
            if day.title.trim().is_empty() {
                return Err(TrackerError::InvalidDocument(format!(
                    "day {} has no title",
                    day.day_number
                )));
            }
            if !seen.insert(day.day_number) {
                return Err(TrackerError::InvalidDocument(format!(
                    "day {} appears more than once",
                    day.day_number
                )));
            }
        }
        Ok(())
    }

    /// Get a day by number
    pub fn day(&self, day_number: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.day_number == day_number)
    }

    /// Totals across the roadmap
    pub fn summary(&self) -> RoadmapSummary {
        let mut summary = RoadmapSummary {
            total_days: self.days.len(),
            priority_breakdown: (0..=6).map(|p| (p, 0)).collect(),
            ..Default::default()
        };

        for day in &self.days {
            summary.total_topics += day.topics.len();
            summary.total_dsa_problems += day.dsa_problems.len();
            for topic in &day.topics {
                *summary.priority_breakdown.entry(topic.priority).or_default() += 1;
            }
        }

        summary
    }
}

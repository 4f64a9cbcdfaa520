// Domain models for vertical reading study tables

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Sentinel aspect name for a table-wide comparison request
pub const FULL_COMPARISON: &str = "full_comparison";

/// Maximum number of conditions a study table compares side by side
pub const MAX_CONDITIONS: usize = 3;

/// Minimum number of conditions needed for a meaningful comparison
pub const MIN_CONDITIONS: usize = 2;

/// One of the four fixed comparison dimensions of a study table.
///
/// The set and order are fixed: they form the rows of every table and are
/// never user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aspect {
    Epidemiology,
    TimeCourse,
    SymptomsAndSigns,
    MechanismsOfDisease,
}

impl Aspect {
    /// All aspects in fixed table row order
    pub const ALL: [Aspect; 4] = [
        Aspect::Epidemiology,
        Aspect::TimeCourse,
        Aspect::SymptomsAndSigns,
        Aspect::MechanismsOfDisease,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Epidemiology => "Epidemiology",
            Aspect::TimeCourse => "Time Course",
            Aspect::SymptomsAndSigns => "Symptoms and Signs",
            Aspect::MechanismsOfDisease => "Mechanisms of Disease",
        }
    }
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Aspect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Aspect::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid aspect: '{}'. Expected one of 'Epidemiology', 'Time Course', \
                     'Symptoms and Signs', or 'Mechanisms of Disease'",
                    s
                )
            })
    }
}

/// What a research request asks about: a single aspect row, or the whole table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearchTopic {
    PerAspect(Aspect),
    FullComparison,
}

impl ResearchTopic {
    /// Human-readable label for fragment headings and logs
    pub fn label(&self) -> &'static str {
        match self {
            ResearchTopic::PerAspect(aspect) => aspect.as_str(),
            ResearchTopic::FullComparison => "Full Comparison",
        }
    }
}

impl std::str::FromStr for ResearchTopic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == FULL_COMPARISON {
            return Ok(ResearchTopic::FullComparison);
        }
        s.parse::<Aspect>().map(ResearchTopic::PerAspect)
    }
}

/// Validation failures when building a study from user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    /// Empty syndrome, or fewer than 2 usable conditions
    #[error("insufficient input")]
    InsufficientInput,
}

/// An in-memory study table: a syndrome, 2-3 ordered candidate conditions,
/// and free-text notes per (condition, aspect) cell.
///
/// The cell map is sparse: a cell that was never written reads as "".
#[derive(Debug, Clone, PartialEq)]
pub struct Study {
    syndrome: String,
    conditions: Vec<String>,
    cells: HashMap<(usize, Aspect), String>,
}

impl Study {
    /// Build a study from raw form input.
    ///
    /// Blank condition entries are dropped and at most [`MAX_CONDITIONS`]
    /// are kept, preserving input order. Fails with
    /// [`StudyError::InsufficientInput`] when the syndrome is blank or
    /// fewer than [`MIN_CONDITIONS`] conditions remain.
    pub fn new(syndrome: &str, raw_conditions: &[String]) -> Result<Self, StudyError> {
        let syndrome = syndrome.trim();
        let conditions: Vec<String> = raw_conditions
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .take(MAX_CONDITIONS)
            .map(|c| c.to_string())
            .collect();

        if syndrome.is_empty() || conditions.len() < MIN_CONDITIONS {
            return Err(StudyError::InsufficientInput);
        }

        Ok(Self {
            syndrome: syndrome.to_string(),
            conditions,
            cells: HashMap::new(),
        })
    }

    pub fn syndrome(&self) -> &str {
        &self.syndrome
    }

    /// Condition columns in table order
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Aspect rows in fixed table order
    pub fn aspects(&self) -> &'static [Aspect] {
        &Aspect::ALL
    }

    /// Read a cell; absent cells read as the empty string
    pub fn cell(&self, condition: usize, aspect: Aspect) -> &str {
        self.cells
            .get(&(condition, aspect))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Write a cell. Out-of-range condition indexes are ignored; writing an
    /// empty string clears the cell so the map stays sparse.
    pub fn set_cell(&mut self, condition: usize, aspect: Aspect, text: impl Into<String>) {
        if condition >= self.conditions.len() {
            return;
        }
        let text = text.into();
        if text.is_empty() {
            self.cells.remove(&(condition, aspect));
        } else {
            self.cells.insert((condition, aspect), text);
        }
    }
}

/// A single research action: what to ask the AI capability about
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchRequest {
    #[serde(default)]
    pub syndrome: String,
    #[serde(default)]
    pub conditions: Vec<String>,
    /// One of the four aspect names, or [`FULL_COMPARISON`]
    #[serde(default)]
    pub aspect: String,
}

/// Outcome of one AI query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchResult {
    /// Extracted result text (markdown)
    Success(String),
    /// Why the query failed; never a raw error propagated to callers
    Failure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditions(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_study_with_three_conditions() {
        let study = Study::new(
            "Pharyngitis",
            &conditions(&["Strep throat", "Mono", "Viral pharyngitis"]),
        )
        .unwrap();

        assert_eq!(study.syndrome(), "Pharyngitis");
        assert_eq!(
            study.conditions(),
            &["Strep throat", "Mono", "Viral pharyngitis"]
        );
        assert_eq!(study.aspects().len(), 4);
    }

    #[test]
    fn test_create_study_with_two_conditions() {
        let study = Study::new("Dyspnea", &conditions(&["Asthma", "COPD"])).unwrap();
        assert_eq!(study.conditions().len(), 2);
    }

    #[test]
    fn test_blank_conditions_are_dropped() {
        let study = Study::new("Dyspnea", &conditions(&["Asthma", "", "  ", "COPD"])).unwrap();
        assert_eq!(study.conditions(), &["Asthma", "COPD"]);
    }

    #[test]
    fn test_extra_conditions_are_discarded() {
        let study = Study::new("Fever", &conditions(&["A", "B", "C", "D"])).unwrap();
        assert_eq!(study.conditions(), &["A", "B", "C"]);
    }

    #[test]
    fn test_insufficient_conditions() {
        let err = Study::new("Fever", &conditions(&["Influenza"])).unwrap_err();
        assert_eq!(err, StudyError::InsufficientInput);
    }

    #[test]
    fn test_empty_syndrome() {
        let err = Study::new("  ", &conditions(&["A", "B"])).unwrap_err();
        assert_eq!(err, StudyError::InsufficientInput);
    }

    #[test]
    fn test_cells_default_empty_and_round_trip() {
        let mut study = Study::new("Fever", &conditions(&["A", "B"])).unwrap();
        assert_eq!(study.cell(0, Aspect::Epidemiology), "");

        study.set_cell(0, Aspect::Epidemiology, "common in children");
        assert_eq!(study.cell(0, Aspect::Epidemiology), "common in children");

        study.set_cell(0, Aspect::Epidemiology, "");
        assert_eq!(study.cell(0, Aspect::Epidemiology), "");
    }

    #[test]
    fn test_out_of_range_cell_write_is_ignored() {
        let mut study = Study::new("Fever", &conditions(&["A", "B"])).unwrap();
        study.set_cell(5, Aspect::TimeCourse, "nope");
        assert_eq!(study.cell(5, Aspect::TimeCourse), "");
    }

    #[test]
    fn test_aspect_parse_round_trip() {
        for aspect in Aspect::ALL {
            assert_eq!(aspect.as_str().parse::<Aspect>().unwrap(), aspect);
        }
        assert!("Prognosis".parse::<Aspect>().is_err());
    }

    #[test]
    fn test_research_topic_parse() {
        assert_eq!(
            "full_comparison".parse::<ResearchTopic>().unwrap(),
            ResearchTopic::FullComparison
        );
        assert_eq!(
            "Time Course".parse::<ResearchTopic>().unwrap(),
            ResearchTopic::PerAspect(Aspect::TimeCourse)
        );
        assert!("Treatment".parse::<ResearchTopic>().is_err());
    }
}

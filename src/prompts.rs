// Prompt templates for AI research requests

use crate::models::{Aspect, ResearchTopic};

/// Prompt for the Epidemiology row
pub const EPIDEMIOLOGY_TEMPLATE: &str = r#"You are helping a medical student study the differential diagnosis of {{syndrome}} using vertical reading.

Give a concise, factual summary of the epidemiology of each of the following conditions, in the context of {{syndrome}}:

{{conditions}}

For every condition cover who typically gets it (age group, demographics), how common it is, and the main risk factors. Keep each summary to 2-3 sentences and address the conditions in the order listed."#;

/// Prompt for the Time Course row
pub const TIME_COURSE_TEMPLATE: &str = r#"You are helping a medical student study the differential diagnosis of {{syndrome}} using vertical reading.

Give a concise, factual summary of the time course of each of the following conditions, in the context of {{syndrome}}:

{{conditions}}

For every condition describe the onset (sudden vs. gradual), typical duration, and how symptoms evolve over time. Keep each summary to 2-3 sentences and address the conditions in the order listed."#;

/// Prompt for the Symptoms and Signs row.
///
/// The `{{partitions}}` placeholder is filled with the three-way feature
/// partition instructions; that partition is the pedagogical point of
/// vertical reading, so it is demanded explicitly.
pub const SYMPTOMS_TEMPLATE: &str = r#"You are helping a medical student study the differential diagnosis of {{syndrome}} using vertical reading.

Give a concise, factual summary of the symptoms and signs of each of the following conditions, in the context of {{syndrome}}:

{{conditions}}

After the per-condition summaries, organize the clinical features into exactly these three groups:
{{partitions}}

Address the conditions in the order listed."#;

/// Prompt for the Mechanisms of Disease row
pub const MECHANISMS_TEMPLATE: &str = r#"You are helping a medical student study the differential diagnosis of {{syndrome}} using vertical reading.

Give a concise, factual summary of the mechanism of disease of each of the following conditions, in the context of {{syndrome}}:

{{conditions}}

For every condition explain the underlying pathophysiology: what causes it and how that produces the clinical picture. Keep each summary to 2-3 sentences and address the conditions in the order listed."#;

/// Prompt for a table-wide comparison across all four aspects
pub const FULL_COMPARISON_TEMPLATE: &str = r#"You are helping a medical student study the differential diagnosis of {{syndrome}} using vertical reading.

Produce a structured comparison of the following conditions, in the context of {{syndrome}}:

{{conditions}}

Compare the conditions across these four aspects: Epidemiology, Time Course, Symptoms and Signs, Mechanisms of Disease.

Then organize the clinical features into exactly these three groups:
{{partitions}}

Format the comparison as a markdown table with one row per aspect and one column per condition. Be concise and factual."#;

/// One bucket of the three-way feature partition demanded of the AI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionKind {
    /// Features present in all compared conditions
    SharedByAll,
    /// Features shared by exactly two conditions (which must be named)
    SharedByTwo,
    /// Features unique to exactly one condition (which must be named)
    UniqueToOne,
}

impl PartitionKind {
    pub const ALL: [PartitionKind; 3] = [
        PartitionKind::SharedByAll,
        PartitionKind::SharedByTwo,
        PartitionKind::UniqueToOne,
    ];

    pub fn instruction(&self) -> &'static str {
        match self {
            PartitionKind::SharedByAll => "- Features common to ALL of the conditions",
            PartitionKind::SharedByTwo => {
                "- Features shared by EXACTLY TWO of the conditions, naming the two conditions for each feature"
            }
            PartitionKind::UniqueToOne => {
                "- Features unique to EXACTLY ONE condition, naming that condition for each feature"
            }
        }
    }
}

/// The three partition instruction lines, in fixed order
fn partition_instructions() -> String {
    PartitionKind::ALL
        .iter()
        .map(|kind| kind.instruction())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the ordered condition list as a numbered list for the prompt
fn format_conditions(conditions: &[String]) -> String {
    conditions
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compose the research prompt for a topic.
///
/// Pure string building: identical inputs yield byte-identical prompts.
pub fn compose(syndrome: &str, conditions: &[String], topic: ResearchTopic) -> String {
    let template = match topic {
        ResearchTopic::PerAspect(Aspect::Epidemiology) => EPIDEMIOLOGY_TEMPLATE,
        ResearchTopic::PerAspect(Aspect::TimeCourse) => TIME_COURSE_TEMPLATE,
        ResearchTopic::PerAspect(Aspect::SymptomsAndSigns) => SYMPTOMS_TEMPLATE,
        ResearchTopic::PerAspect(Aspect::MechanismsOfDisease) => MECHANISMS_TEMPLATE,
        ResearchTopic::FullComparison => FULL_COMPARISON_TEMPLATE,
    };

    template
        .replace("{{syndrome}}", syndrome)
        .replace("{{conditions}}", &format_conditions(conditions))
        .replace("{{partitions}}", &partition_instructions())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pharyngitis_conditions() -> Vec<String> {
        vec![
            "Strep throat".to_string(),
            "Mono".to_string(),
            "Viral pharyngitis".to_string(),
        ]
    }

    #[test]
    fn test_epidemiology_prompt_mentions_everything() {
        let prompt = compose(
            "Pharyngitis",
            &pharyngitis_conditions(),
            ResearchTopic::PerAspect(Aspect::Epidemiology),
        );

        assert!(prompt.contains("Pharyngitis"));
        assert!(prompt.contains("Strep throat"));
        assert!(prompt.contains("Mono"));
        assert!(prompt.contains("Viral pharyngitis"));
        assert!(prompt.contains("epidemiology"));
    }

    #[test]
    fn test_conditions_keep_input_order() {
        let prompt = compose(
            "Pharyngitis",
            &pharyngitis_conditions(),
            ResearchTopic::PerAspect(Aspect::TimeCourse),
        );

        let strep = prompt.find("1. Strep throat").unwrap();
        let mono = prompt.find("2. Mono").unwrap();
        let viral = prompt.find("3. Viral pharyngitis").unwrap();
        assert!(strep < mono && mono < viral);
    }

    #[test]
    fn test_symptoms_prompt_demands_three_way_partition() {
        let prompt = compose(
            "Pharyngitis",
            &pharyngitis_conditions(),
            ResearchTopic::PerAspect(Aspect::SymptomsAndSigns),
        );

        assert!(prompt.contains("common to ALL of the conditions"));
        assert!(prompt.contains("EXACTLY TWO of the conditions"));
        assert!(prompt.contains("EXACTLY ONE condition"));
        assert!(prompt.contains("naming the two conditions"));
    }

    #[test]
    fn test_full_comparison_prompt() {
        let prompt = compose(
            "Pharyngitis",
            &pharyngitis_conditions(),
            ResearchTopic::FullComparison,
        );

        assert!(prompt.contains("markdown table"));
        for aspect in Aspect::ALL {
            assert!(prompt.contains(aspect.as_str()));
        }
        assert!(prompt.contains("EXACTLY TWO of the conditions"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose(
            "Pharyngitis",
            &pharyngitis_conditions(),
            ResearchTopic::PerAspect(Aspect::MechanismsOfDisease),
        );
        let b = compose(
            "Pharyngitis",
            &pharyngitis_conditions(),
            ResearchTopic::PerAspect(Aspect::MechanismsOfDisease),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_placeholders_left_behind() {
        for topic in [
            ResearchTopic::PerAspect(Aspect::Epidemiology),
            ResearchTopic::PerAspect(Aspect::TimeCourse),
            ResearchTopic::PerAspect(Aspect::SymptomsAndSigns),
            ResearchTopic::PerAspect(Aspect::MechanismsOfDisease),
            ResearchTopic::FullComparison,
        ] {
            let prompt = compose("Pharyngitis", &pharyngitis_conditions(), topic);
            assert!(!prompt.contains("{{"), "unfilled placeholder in {:?}", topic);
        }
    }
}

use crate::dataset::{self, EarningsRecord};
use crate::error::RequestError;
use crate::generator::{GenerateRequest, ToolDescriptor};

const SUMMARY_HEADING: &str = "Sector Analysis";
const SUMMARY_SYSTEM: &str =
    "You are a management consultant. Analyze growth vs profitability. Professional tone. No bold.";

const STRATEGY_HEADING: &str = "2026 Growth Drivers & Projected Winners";
const STRATEGY_INTRO: &str = "You are a Senior Strategic Consultant (McKinsey/BCG style).";
const STRATEGY_GOAL: &str =
    "Your goal is to identify 2026 growth drivers and pick likely winners from the provided data.";
const STRATEGY_FOCUS: &[&str] = &[
    "Regulatory shifts (NIS2, SEC)",
    "Agentic AI Security",
    "Platform Consolidation",
];
const STRATEGY_RULES: &[&str] = &[
    "Format the output with clear headers for Drivers and a 'Projected Winners' table-like summary.",
    "Avoid all bold formatting (no asterisks).",
    "Use professional, data-driven language.",
];

const DEEP_DIVE_SYSTEM: &str = "Financial analyst SWOT summary. No bold formatting.";

/// The analyses the desk can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    /// Sector health across every record.
    MarketSummary,
    /// 2026 drivers and winners, grounded with search.
    GrowthStrategy,
    /// SWOT for one company (index into [`dataset::records`]).
    DeepDive(usize),
}

/// Heading plus the request to send for one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPrompt {
    pub heading: String,
    pub request: GenerateRequest,
}

impl Analysis {
    pub fn build(self) -> Result<AnalysisPrompt, RequestError> {
        match self {
            Analysis::MarketSummary => Ok(AnalysisPrompt {
                heading: SUMMARY_HEADING.to_string(),
                request: GenerateRequest::new(
                    format!(
                        "Summarize the sector health based on: {}.",
                        dataset::context_json()
                    ),
                    SUMMARY_SYSTEM,
                    vec![],
                )?,
            }),
            Analysis::GrowthStrategy => Ok(AnalysisPrompt {
                heading: STRATEGY_HEADING.to_string(),
                request: GenerateRequest::new(
                    format!(
                        "Based on the Q4 2025 performance data: {}, which 3 factors will drive the \
                         2026 cybersecurity cycle? Identify the top 2 'winners' and provide arguments \
                         for each based on their Rule of 40 performance and current strategy.",
                        dataset::context_json()
                    ),
                    build_strategy_system_prompt(),
                    vec![ToolDescriptor::google_search()],
                )?,
            }),
            Analysis::DeepDive(index) => {
                let record = dataset::records()
                    .get(index)
                    .ok_or(RequestError::UnknownCompany(index))?;
                Ok(AnalysisPrompt {
                    heading: format!("{} Strategic Deep-Dive", record.name),
                    request: GenerateRequest::new(
                        deep_dive_prompt(record),
                        DEEP_DIVE_SYSTEM,
                        vec![],
                    )?,
                })
            }
        }
    }
}

fn deep_dive_prompt(record: &EarningsRecord) -> String {
    format!("Analyze {} using: {}.", record.name, record.context_json())
}

pub fn build_strategy_system_prompt() -> String {
    let focus = STRATEGY_FOCUS
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{intro}\n{goal}\nFocus on: {focus}.\n{rules}",
        intro = STRATEGY_INTRO,
        goal = STRATEGY_GOAL,
        focus = focus,
        rules = STRATEGY_RULES.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_summary_embeds_every_company() {
        let prompt = Analysis::MarketSummary.build().unwrap();
        assert_eq!(prompt.heading, "Sector Analysis");
        for record in dataset::records() {
            assert!(prompt.request.prompt().contains(record.name));
        }
        assert!(prompt.request.tools().is_empty());
        assert!(prompt.request.system_instruction().contains("No bold"));
    }

    #[test]
    fn growth_strategy_attaches_search() {
        let prompt = Analysis::GrowthStrategy.build().unwrap();
        assert_eq!(prompt.heading, "2026 Growth Drivers & Projected Winners");
        assert_eq!(prompt.request.tools(), &[ToolDescriptor::google_search()]);
        assert!(prompt.request.prompt().contains("Rule of 40"));
    }

    #[test]
    fn strategy_system_prompt_lists_focus_areas() {
        let system = build_strategy_system_prompt();
        assert!(system.contains("1. Regulatory shifts (NIS2, SEC)"));
        assert!(system.contains("2. Agentic AI Security"));
        assert!(system.contains("3. Platform Consolidation"));
        assert!(system.contains("no asterisks"));
    }

    #[test]
    fn deep_dive_targets_one_company() {
        let prompt = Analysis::DeepDive(4).build().unwrap();
        assert_eq!(prompt.heading, "Akamai (AKAM) Strategic Deep-Dive");
        assert!(prompt.request.prompt().starts_with("Analyze Akamai (AKAM) using: {"));
        assert!(!prompt.request.prompt().contains("Okta"));
        assert!(prompt.request.system_instruction().contains("SWOT"));
    }

    #[test]
    fn deep_dive_out_of_range_is_rejected() {
        assert_eq!(
            Analysis::DeepDive(99).build().unwrap_err(),
            RequestError::UnknownCompany(99)
        );
    }
}

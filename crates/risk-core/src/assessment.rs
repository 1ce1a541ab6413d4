//! Risk assessment workflow
//!
//! A new risk moves through four stages:
//!
//! 1. **Input**: name, category, owner and description
//! 2. **Analysis**: likelihood, impact and control details
//! 3. **Submitting**: the submission is being analyzed
//! 4. **Result**: the scored and classified outcome
//!
//! Stages change only through [`AssessmentEvent`]s. An event that does not
//! apply to the current stage is rejected and leaves the workflow untouched.

use crate::error::{RiskError, RiskResult};
use crate::metrics::{metric_names, METRICS};
use crate::model::{Category, Rating, RiskLevel};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, info};

/// Stage one: what the risk is and who owns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskBasics {
    pub name: String,
    pub category: Category,
    pub owner: String,
    pub description: String,
}

/// Stage two: how likely and how severe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisDetails {
    pub likelihood: Rating,
    pub impact: Rating,
    pub current_controls: String,
    pub additional_context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentSubmission {
    pub basics: RiskBasics,
    pub details: AnalysisDetails,
}

/// Scored result of a completed assessment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentOutcome {
    pub name: String,
    pub category: Category,
    pub risk_score: u8,
    pub level: RiskLevel,
    pub summary: String,
}

impl AssessmentOutcome {
    pub fn evaluate(submission: &AssessmentSubmission) -> Self {
        let basics = &submission.basics;
        let risk_score = submission.details.likelihood.value() * submission.details.impact.value();
        let level = RiskLevel::from_score(u32::from(risk_score));
        let guidance = match level {
            RiskLevel::High => "It requires immediate mitigation and executive attention.",
            RiskLevel::Medium => {
                "While not critical, it requires attention and mitigation planning."
            }
            RiskLevel::Low => "It can be managed through routine monitoring.",
        };
        let summary = format!(
            "This {} risk has been classified as {} (Risk Score: {}/25) based on the likelihood and impact assessment. {}",
            basics.category.label().to_lowercase(),
            level,
            risk_score,
            guidance
        );

        Self {
            name: basics.name.clone(),
            category: basics.category,
            risk_score,
            level,
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentState {
    /// Collecting basics; keeps what was entered when stepping back
    Input { draft: Option<RiskBasics> },
    Analysis { basics: RiskBasics },
    Submitting { submission: AssessmentSubmission },
    Result { outcome: AssessmentOutcome },
}

impl AssessmentState {
    pub fn name(&self) -> &'static str {
        match self {
            AssessmentState::Input { .. } => "Input",
            AssessmentState::Analysis { .. } => "Analysis",
            AssessmentState::Submitting { .. } => "Submitting",
            AssessmentState::Result { .. } => "Result",
        }
    }

    /// 1-based position shown as "Step n of 4"
    pub fn step(&self) -> u8 {
        match self {
            AssessmentState::Input { .. } => 1,
            AssessmentState::Analysis { .. } => 2,
            AssessmentState::Submitting { .. } => 3,
            AssessmentState::Result { .. } => 4,
        }
    }
}

impl Default for AssessmentState {
    fn default() -> Self {
        AssessmentState::Input { draft: None }
    }
}

impl fmt::Display for AssessmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentEvent {
    Continue(RiskBasics),
    Back,
    Submit(AnalysisDetails),
    AnalysisComplete,
    Restart,
}

impl AssessmentEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AssessmentEvent::Continue(_) => "Continue",
            AssessmentEvent::Back => "Back",
            AssessmentEvent::Submit(_) => "Submit",
            AssessmentEvent::AnalysisComplete => "AnalysisComplete",
            AssessmentEvent::Restart => "Restart",
        }
    }
}

/// Drives one assessment through its stages
#[derive(Debug, Clone, Default)]
pub struct AssessmentWorkflow {
    state: AssessmentState,
}

impl AssessmentWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AssessmentState {
        &self.state
    }

    pub fn outcome(&self) -> Option<&AssessmentOutcome> {
        match &self.state {
            AssessmentState::Result { outcome } => Some(outcome),
            _ => None,
        }
    }

    /// Apply `event`; on error the current stage is kept
    pub fn fire(&mut self, event: AssessmentEvent) -> RiskResult<&AssessmentState> {
        let next = transition(&self.state, event)?;
        debug!("Assessment: {} -> {}", self.state, next);
        self.state = next;
        Ok(&self.state)
    }

    /// Run a complete submission from Input to Result
    pub fn run(
        &mut self,
        basics: RiskBasics,
        details: AnalysisDetails,
    ) -> RiskResult<&AssessmentOutcome> {
        self.fire(AssessmentEvent::Continue(basics))?;
        self.fire(AssessmentEvent::Submit(details))?;
        self.fire(AssessmentEvent::AnalysisComplete)?;
        self.outcome().ok_or_else(|| RiskError::InvalidTransition {
            from: self.state.name().to_string(),
            event: "AnalysisComplete".to_string(),
        })
    }
}

fn transition(state: &AssessmentState, event: AssessmentEvent) -> RiskResult<AssessmentState> {
    use AssessmentEvent as E;
    use AssessmentState as S;

    match (state, event) {
        (S::Input { .. }, E::Continue(basics)) => {
            validate_basics(&basics)?;
            Ok(S::Analysis { basics })
        }
        (S::Analysis { basics }, E::Back) => Ok(S::Input {
            draft: Some(basics.clone()),
        }),
        (S::Analysis { basics }, E::Submit(details)) => Ok(S::Submitting {
            submission: AssessmentSubmission {
                basics: basics.clone(),
                details,
            },
        }),
        (S::Submitting { submission }, E::AnalysisComplete) => {
            let outcome = AssessmentOutcome::evaluate(submission);
            METRICS.inc(metric_names::ASSESSMENTS_COMPLETED);
            info!(
                "Assessment complete: {} scored {} ({})",
                outcome.name, outcome.risk_score, outcome.level
            );
            Ok(S::Result { outcome })
        }
        (S::Submitting { .. }, event @ E::Restart) => Err(invalid(state, &event)),
        (_, E::Restart) => Ok(S::default()),
        (_, event) => Err(invalid(state, &event)),
    }
}

fn invalid(state: &AssessmentState, event: &AssessmentEvent) -> RiskError {
    RiskError::InvalidTransition {
        from: state.name().to_string(),
        event: event.name().to_string(),
    }
}

fn validate_basics(basics: &RiskBasics) -> RiskResult<()> {
    if basics.name.trim().is_empty() {
        return Err(RiskError::InvalidSubmission(
            "risk name is required".to_string(),
        ));
    }
    if basics.owner.trim().is_empty() {
        return Err(RiskError::InvalidSubmission(
            "risk owner is required".to_string(),
        ));
    }
    Ok(())
}

/// One answered question in a historical assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question: &'static str,
    pub answer: &'static str,
    #[serde(serialize_with = "lowercase_level")]
    pub risk_level: RiskLevel,
}

/// Questionnaire answers carry their level as `low`, `medium` or `high`
fn lowercase_level<S: Serializer>(level: &RiskLevel, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&level.label().to_ascii_lowercase())
}

/// A completed departmental questionnaire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub id: &'static str,
    pub date: &'static str,
    pub completed_by: &'static str,
    pub department: &'static str,
    pub responses: &'static [QuestionResponse],
}

const ASSESSMENT_RESPONSES: [AssessmentResponse; 2] = [
    AssessmentResponse {
        id: "ASSESS-2023-001",
        date: "2023-11-15",
        completed_by: "John Smith",
        department: "Finance",
        responses: &[
            QuestionResponse {
                question: "Has the organization implemented controls to prevent unauthorized financial transactions?",
                answer: "Yes, but they need improvement",
                risk_level: RiskLevel::Medium,
            },
            QuestionResponse {
                question: "Are financial records backed up regularly?",
                answer: "Yes, daily backups are in place",
                risk_level: RiskLevel::Low,
            },
            QuestionResponse {
                question: "Is there a process for monitoring unusual financial activities?",
                answer: "No formal process exists",
                risk_level: RiskLevel::High,
            },
        ],
    },
    AssessmentResponse {
        id: "ASSESS-2023-002",
        date: "2023-12-01",
        completed_by: "Sarah Johnson",
        department: "IT",
        responses: &[
            QuestionResponse {
                question: "Has the organization implemented multi-factor authentication?",
                answer: "Yes, for all critical systems",
                risk_level: RiskLevel::Low,
            },
            QuestionResponse {
                question: "Is there an incident response plan for cybersecurity breaches?",
                answer: "Yes, but it hasn't been tested in the last 12 months",
                risk_level: RiskLevel::Medium,
            },
            QuestionResponse {
                question: "Are all systems patched regularly?",
                answer: "Most systems are patched, but there's no formal schedule",
                risk_level: RiskLevel::Medium,
            },
        ],
    },
];

/// Historical questionnaire responses
pub fn assessment_responses() -> &'static [AssessmentResponse] {
    &ASSESSMENT_RESPONSES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basics() -> RiskBasics {
        RiskBasics {
            name: "Supply Chain Disruption".to_string(),
            category: Category::Operational,
            owner: "Operations".to_string(),
            description: "Single-source dependency for critical components".to_string(),
        }
    }

    fn details(likelihood: u8, impact: u8) -> AnalysisDetails {
        AnalysisDetails {
            likelihood: Rating::new(likelihood).unwrap(),
            impact: Rating::new(impact).unwrap(),
            current_controls: "Quarterly supplier review".to_string(),
            additional_context: String::new(),
        }
    }

    #[test]
    fn test_full_walkthrough() {
        let mut workflow = AssessmentWorkflow::new();
        assert_eq!(workflow.state().step(), 1);

        workflow.fire(AssessmentEvent::Continue(basics())).unwrap();
        assert_eq!(workflow.state().name(), "Analysis");

        workflow.fire(AssessmentEvent::Submit(details(3, 4))).unwrap();
        assert_eq!(workflow.state().step(), 3);

        workflow.fire(AssessmentEvent::AnalysisComplete).unwrap();
        let outcome = workflow.outcome().unwrap();
        assert_eq!(outcome.risk_score, 12);
        assert_eq!(outcome.level, RiskLevel::Medium);
        assert!(outcome
            .summary
            .starts_with("This operational risk has been classified as Medium (Risk Score: 12/25)"));

        workflow.fire(AssessmentEvent::Restart).unwrap();
        assert_eq!(workflow.state(), &AssessmentState::Input { draft: None });
    }

    #[test]
    fn test_back_keeps_draft() {
        let mut workflow = AssessmentWorkflow::new();
        workflow.fire(AssessmentEvent::Continue(basics())).unwrap();
        workflow.fire(AssessmentEvent::Back).unwrap();
        assert_eq!(
            workflow.state(),
            &AssessmentState::Input {
                draft: Some(basics())
            }
        );
    }

    #[test]
    fn test_invalid_transition_keeps_state() {
        let mut workflow = AssessmentWorkflow::new();
        let err = workflow
            .fire(AssessmentEvent::Submit(details(1, 1)))
            .unwrap_err();
        assert!(matches!(err, RiskError::InvalidTransition { .. }));
        assert_eq!(workflow.state().step(), 1);

        workflow.fire(AssessmentEvent::Continue(basics())).unwrap();
        workflow.fire(AssessmentEvent::Submit(details(1, 1))).unwrap();
        assert!(workflow.fire(AssessmentEvent::Restart).is_err());
        assert!(workflow.fire(AssessmentEvent::Back).is_err());
        assert_eq!(workflow.state().name(), "Submitting");
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut workflow = AssessmentWorkflow::new();
        let mut blank = basics();
        blank.name = "   ".to_string();
        let err = workflow.fire(AssessmentEvent::Continue(blank)).unwrap_err();
        assert!(matches!(err, RiskError::InvalidSubmission(_)));
        assert_eq!(workflow.state().step(), 1);
    }

    #[test]
    fn test_run_classifies_extremes() {
        let mut workflow = AssessmentWorkflow::new();
        let outcome = workflow.run(basics(), details(5, 4)).unwrap();
        assert_eq!(outcome.level, RiskLevel::High);

        let mut workflow = AssessmentWorkflow::new();
        let outcome = workflow.run(basics(), details(2, 4)).unwrap();
        assert_eq!(outcome.level, RiskLevel::Low);
    }

    #[test]
    fn test_historical_responses() {
        let responses = assessment_responses();
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[1].department, "IT");
        assert_eq!(responses[0].responses[2].risk_level, RiskLevel::High);
    }

    #[test]
    fn test_response_levels_serialize_lowercase() {
        let json = serde_json::to_value(assessment_responses()[0]).unwrap();
        assert_eq!(json["completedBy"], "John Smith");
        let levels: Vec<_> = json["responses"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["riskLevel"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(levels, vec!["medium", "low", "high"]);
    }
}

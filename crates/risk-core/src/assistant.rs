//! Canned risk assistant
//!
//! Answers come from a fixed keyword table; nothing is sent anywhere.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI Risk Assistant. How can I help you analyze or manage your organization's risks today?";

pub const SUGGESTED_PROMPTS: [&str; 5] = [
    "What are the top risks in my organization?",
    "How can I mitigate supply chain disruption risks?",
    "Explain the difference between inherent and residual risk",
    "Generate a risk assessment report for my financial department",
    "What risk metrics should I track for compliance?",
];

/// Every keyword must appear (case-insensitive) for the answer to apply
struct KeywordRule {
    keywords: &'static [&'static str],
    answer: &'static str,
}

const RULES: [KeywordRule; 5] = [
    KeywordRule {
        keywords: &["top risks"],
        answer: "Based on your risk data, the top risks currently are:\n\n1. Supply Chain Disruption (High Risk)\n2. Regulatory Change Impact (High Risk)\n3. Data Privacy Violation (Medium Risk)\n\nWould you like detailed information about any of these specific risks?",
    },
    KeywordRule {
        keywords: &["mitigate", "supply chain"],
        answer: "To mitigate supply chain disruption risks, consider:\n\n• Diversifying your supplier base across different geographical regions\n• Implementing early warning systems for potential disruptions\n• Maintaining buffer inventory for critical components\n• Developing contingency plans with alternative logistics routes\n• Creating strategic partnerships with key suppliers\n\nWould you like me to elaborate on any of these strategies?",
    },
    KeywordRule {
        keywords: &["inherent", "residual"],
        answer: "Inherent Risk vs. Residual Risk:\n\n**Inherent Risk** is the raw or untreated level of risk, before any controls or mitigations are applied. It represents the natural risk level if you do nothing.\n\n**Residual Risk** is the remaining level of risk after controls and mitigation strategies have been implemented.\n\nFor example, the inherent risk of a data breach might be high, but after implementing encryption, access controls, and regular security audits, the residual risk might be reduced to medium or low.",
    },
    KeywordRule {
        keywords: &["report", "financial"],
        answer: "I've analyzed your financial department risks and prepared this assessment:\n\n**Key Findings:**\n• Currency exchange fluctuations present a High risk (score: 16)\n• Liquidity management shows Medium risk (score: 12)\n• Internal controls are generally effective (Low risk)\n\n**Recommendations:**\n• Consider hedging strategies for foreign currency exposure\n• Increase frequency of cash flow forecasting\n• Maintain current internal control framework with quarterly reviews\n\nWould you like me to generate a more detailed report or focus on a specific area?",
    },
    KeywordRule {
        keywords: &["metrics", "compliance"],
        answer: "Key compliance risk metrics you should track:\n\n1. **Regulatory Incident Rate:** Number of compliance incidents per quarter\n2. **Resolution Time:** Average days to resolve compliance issues\n3. **Training Completion:** % of staff with up-to-date compliance training\n4. **Audit Findings:** Number of findings in internal/external audits\n5. **Policy Adherence:** % of processes following compliance requirements\n6. **Reporting Timeliness:** % of regulatory reports submitted on time\n\nTracking these metrics can help identify compliance weak spots before they become serious issues.",
    },
];

const QUICK_INSIGHTS: [&str; 5] = [
    "Based on your current risk data, I recommend focusing on operational risks which have increased 15% since last quarter.",
    "Looking at your supply chain risks, there are 3 critical vulnerabilities that need immediate attention.",
    "Your compliance risk score is within acceptable thresholds, but I noticed potential regulatory changes that might affect your operations soon.",
    "The financial risk indicators suggest implementing additional controls around forex exposures.",
    "From the data provided, I can see that your cybersecurity risks need immediate attention. Consider implementing multi-factor authentication and employee training.",
];

/// Highlighted dashboard insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub title: &'static str,
    pub description: &'static str,
}

pub const INSIGHTS: [Insight; 3] = [
    Insight {
        title: "Supply Chain Vulnerability",
        description: "Recent global events suggest increased vulnerability in your Asia-Pacific supply chain. Consider diversifying suppliers in affected regions.",
    },
    Insight {
        title: "Financial Risk Trend",
        description: "Currency fluctuations have increased by 12% this quarter, potentially affecting your international operations.",
    },
    Insight {
        title: "Quick Win",
        description: "Implementing multi-factor authentication could reduce your cybersecurity risk score by 23% with minimal investment.",
    },
];

/// Answer a question from the keyword table, falling back to a request
/// for more context
pub fn respond(input: &str) -> String {
    let lower = input.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().all(|k| lower.contains(k)))
        .map(|rule| rule.answer.to_string())
        .unwrap_or_else(|| {
            format!(
                "I understand you're asking about \"{}\". This is an area where I can help analyze potential risks and provide guidance. Could you provide a bit more context about your specific concerns so I can give you tailored insights?",
                input
            )
        })
}

/// One of the quick-chat insights, chosen uniformly
pub fn quick_insight<R: Rng>(rng: &mut R) -> &'static str {
    QUICK_INSIGHTS[rng.gen_range(0..QUICK_INSIGHTS.len())]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Chat log that always opens with the welcome message
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 0,
        };
        conversation.clear();
        conversation
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Post a user message and the assistant's reply. Blank input is ignored.
    pub fn send(&mut self, input: &str) -> Option<&Message> {
        if input.trim().is_empty() {
            return None;
        }
        let answer = respond(input);
        self.push(Role::User, input.to_string());
        self.push(Role::Assistant, answer);
        self.messages.last()
    }

    /// Drop everything but a fresh welcome message
    pub fn clear(&mut self) {
        self.messages.clear();
        self.messages.push(Message {
            id: "welcome".to_string(),
            role: Role::Assistant,
            content: WELCOME_MESSAGE.to_string(),
            timestamp: Utc::now(),
        });
    }

    fn push(&mut self, role: Role, content: String) {
        self.next_id += 1;
        let prefix = match role {
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        self.messages.push(Message {
            id: format!("{}-{}", prefix, self.next_id),
            role,
            content,
            timestamp: Utc::now(),
        });
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

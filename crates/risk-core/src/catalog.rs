//! Fixed reference pools the generator draws from

use crate::model::Category;

const FINANCIAL_RISKS: [&str; 5] = [
    "Currency Exchange Fluctuation",
    "Interest Rate Volatility",
    "Credit Default Risk",
    "Liquidity Shortage",
    "Capital Adequacy Risk",
];

const OPERATIONAL_RISKS: [&str; 5] = [
    "Supply Chain Disruption",
    "IT System Failure",
    "Process Inefficiency",
    "Equipment Breakdown",
    "Staff Shortage",
];

const COMPLIANCE_RISKS: [&str; 5] = [
    "Regulatory Change Impact",
    "Data Privacy Violation",
    "License Compliance Issue",
    "Environmental Compliance Gap",
    "Health & Safety Non-compliance",
];

const STRATEGIC_RISKS: [&str; 5] = [
    "New Competitor Entry",
    "Market Share Decline",
    "Failed Product Launch",
    "Merger Integration Challenge",
    "Customer Retention Issue",
];

/// Risk owners assigned to generated records
pub const OWNERS: [&str; 5] = [
    "John Smith",
    "Sarah Johnson",
    "Michael Brown",
    "Jennifer Davis",
    "Robert Wilson",
];

/// Name pool for a category
pub fn risk_names(category: Category) -> &'static [&'static str] {
    match category {
        Category::Financial => &FINANCIAL_RISKS,
        Category::Operational => &OPERATIONAL_RISKS,
        Category::Compliance => &COMPLIANCE_RISKS,
        Category::Strategic => &STRATEGIC_RISKS,
    }
}

/// Category whose pool contains `name`, if any
pub fn category_of(name: &str) -> Option<Category> {
    Category::ALL
        .into_iter()
        .find(|c| risk_names(*c).contains(&name))
}

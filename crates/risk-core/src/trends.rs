//! Fixed twelve-month category trend series

use crate::model::Category;
use serde::Serialize;

/// Category values for one month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub financial: u32,
    pub operational: u32,
    pub compliance: u32,
    pub strategic: u32,
}

impl TrendPoint {
    const fn new(
        month: &'static str,
        financial: u32,
        operational: u32,
        compliance: u32,
        strategic: u32,
    ) -> Self {
        Self {
            month,
            financial,
            operational,
            compliance,
            strategic,
        }
    }

    pub fn value(&self, category: Category) -> u32 {
        match category {
            Category::Financial => self.financial,
            Category::Operational => self.operational,
            Category::Compliance => self.compliance,
            Category::Strategic => self.strategic,
        }
    }
}

const RISK_TREND_DATA: [TrendPoint; 12] = [
    TrendPoint::new("Jan", 45, 30, 20, 25),
    TrendPoint::new("Feb", 50, 25, 35, 30),
    TrendPoint::new("Mar", 40, 45, 40, 35),
    TrendPoint::new("Apr", 55, 50, 30, 40),
    TrendPoint::new("May", 60, 55, 45, 45),
    TrendPoint::new("Jun", 50, 65, 55, 60),
    TrendPoint::new("Jul", 45, 70, 60, 65),
    TrendPoint::new("Aug", 40, 75, 55, 55),
    TrendPoint::new("Sep", 50, 78, 60, 70),
    TrendPoint::new("Oct", 55, 72, 65, 65),
    TrendPoint::new("Nov", 60, 68, 70, 60),
    TrendPoint::new("Dec", 65, 65, 60, 70),
];

/// The full series, January first
pub fn risk_trend_data() -> &'static [TrendPoint] {
    &RISK_TREND_DATA
}

/// Month-by-month values for one category
pub fn series(category: Category) -> Vec<(&'static str, u32)> {
    RISK_TREND_DATA
        .iter()
        .map(|p| (p.month, p.value(category)))
        .collect()
}

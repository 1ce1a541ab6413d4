//! Terminal UI Module
//!
//! Colour-coded text rendering of the dashboard views. Scores are painted
//! with their Low/Medium/High colour everywhere they appear.

use colored::*;
use risk_core::assessment::{AssessmentOutcome, AssessmentResponse};
use risk_core::assistant::Insight;
use risk_core::trends;
use risk_core::{
    classify, Category, Heatmap, Rating, Risk, RiskLevel, RiskMetric, RiskStatus, Trend,
    TrendPoint,
};
use std::collections::BTreeMap;

const RULE_WIDTH: usize = 70;
const BAR_WIDTH: usize = 30;

/// Terminal UI styling constants
pub struct Theme;

impl Theme {
    pub fn high() -> ColoredString {
        "[!]".bright_red().bold()
    }
    pub fn medium() -> ColoredString {
        "[~]".yellow()
    }
    pub fn low() -> ColoredString {
        "[.]".green()
    }
    pub fn warning() -> ColoredString {
        "[W]".yellow().bold()
    }
    pub fn success() -> ColoredString {
        "[V]".bright_green().bold()
    }
    pub fn failure() -> ColoredString {
        "[X]".bright_red().bold()
    }
    pub fn arrow() -> ColoredString {
        ">>".bright_cyan()
    }
    pub fn bullet() -> ColoredString {
        "*".bright_white()
    }

    pub fn level(level: RiskLevel) -> ColoredString {
        match level {
            RiskLevel::High => Self::high(),
            RiskLevel::Medium => Self::medium(),
            RiskLevel::Low => Self::low(),
        }
    }
}

/// Paint `text` in the colour of `level`
pub fn paint(text: &str, level: RiskLevel) -> ColoredString {
    text.color(level.color())
}

pub fn trend_arrow(trend: Trend) -> ColoredString {
    match trend {
        Trend::Increasing => "▲".bright_red(),
        Trend::Stable => "■".bright_black(),
        Trend::Decreasing => "▼".bright_green(),
    }
}

pub fn print_banner(seed: Option<u64>) {
    println!("\n  {}", format!("+{}+", "─".repeat(RULE_WIDTH)).bright_black());
    println!(
        "  |{:^70}|",
        "RISK REGISTER DASHBOARD".bright_white().bold()
    );
    if let Some(seed) = seed {
        println!(
            "  |{:^70}|",
            format!("session seed {}", seed).bright_black()
        );
    }
    println!("  {}", format!("+{}+", "─".repeat(RULE_WIDTH)).bright_black());
}

pub fn print_section_header(title: &str) {
    println!(
        "\n  {} {}",
        "╔══".bright_cyan(),
        title.bright_white().bold()
    );
}

pub fn print_section_footer() {
    println!("  ╚{}╝", "═".repeat(RULE_WIDTH - 1));
}

pub fn print_overall(score: u32, level: RiskLevel, total: usize) {
    println!(
        "\n  {} Overall risk score: {} ({})  across {} risks",
        Theme::level(level),
        paint(&score.to_string(), level).bold(),
        paint(level.label(), level),
        total
    );
}

pub fn print_metrics(metrics: &[RiskMetric]) {
    print_section_header("Category Scores");
    for metric in metrics {
        let level = metric.level();
        println!(
            "  ║ {:<12} {:>4}  {} {:>+4}  (was {:>2})  {}",
            metric.category.label(),
            paint(&metric.score.to_string(), level).bold(),
            trend_arrow(metric.trend),
            metric.change,
            metric.previous_score,
            metric.trend.label().bright_black()
        );
    }
    print_section_footer();
}

pub fn print_counts<K: std::fmt::Display>(title: &str, counts: &BTreeMap<K, usize>) {
    print_section_header(title);
    let total: usize = counts.values().sum();
    for (key, count) in counts {
        println!(
            "  ║ {:<12} {:>3}  {}",
            key.to_string(),
            count,
            bar(*count as u32, total as u32, BAR_WIDTH).bright_blue()
        );
    }
    print_section_footer();
}

pub fn print_status_counts(counts: &BTreeMap<RiskStatus, usize>) {
    print_counts("Risks by Status", counts);
}

pub fn print_level_counts(counts: &BTreeMap<RiskLevel, usize>) {
    print_section_header("Risk Levels");
    for (level, count) in counts {
        println!(
            "  ║ {} {:<8} {:>3}",
            Theme::level(*level),
            paint(level.label(), *level),
            count
        );
    }
    print_section_footer();
}

pub fn print_heatmap(map: &Heatmap) {
    print_section_header("Risk Heatmap (likelihood × impact)");
    for line in heatmap_lines(map) {
        println!("  ║ {}", line);
    }
    print_section_footer();
}

/// Heatmap grid with the highest likelihood on top. Each cell is tinted by
/// the level of its likelihood × impact score.
pub fn heatmap_lines(map: &Heatmap) -> Vec<String> {
    let mut lines = Vec::new();
    for (index, row) in map.rows().iter().enumerate().rev() {
        let likelihood = index as u32 + 1;
        let mut line = format!("{:>2} │", likelihood);
        for (column, count) in row.iter().enumerate() {
            let level = classify(likelihood * (column as u32 + 1));
            let cell = if *count == 0 {
                format!("{:^5}", "·")
            } else {
                format!("{:^5}", count)
            };
            line.push_str(&paint(&cell, level).to_string());
        }
        lines.push(line);
    }
    lines.push(format!("   └{}", "─".repeat(5 * usize::from(Rating::MAX))));
    let mut axis = String::from("    ");
    for impact in Rating::MIN..=Rating::MAX {
        axis.push_str(&format!("{:^5}", impact));
    }
    lines.push(axis);
    lines.push(format!("{:^34}", "impact →"));
    lines
}

pub fn print_recent(risks: &[Risk]) {
    print_section_header("Recent Risks");
    if risks.is_empty() {
        println!("  ║ {}", "No risks recorded.".bright_black());
    }
    for risk in risks {
        println!("  ║ {}", risk_line(risk));
    }
    print_section_footer();
}

/// One-line summary: id, name, category, score and identification date
pub fn risk_line(risk: &Risk) -> String {
    let level = risk.level();
    format!(
        "{} {} {:<32} {:<12} {} {}",
        Theme::level(level),
        risk.id().bright_cyan(),
        truncate(risk.name(), 32),
        risk.category().label(),
        paint(&format!("{:>2}", risk.risk_score()), level).bold(),
        risk.date_identified().to_string().bright_black()
    )
}

pub fn print_risk(risk: &Risk) {
    let level = risk.level();
    print_section_header(&format!("{}  {}", risk.id(), risk.name()));
    println!("  ║ Category:    {}", risk.category());
    println!("  ║ Status:      {}", risk.status());
    println!(
        "  ║ Score:       {} = {} × {}  ({})",
        paint(&risk.risk_score().to_string(), level).bold(),
        risk.likelihood(),
        risk.impact(),
        paint(level.label(), level)
    );
    println!("  ║ Trend:       {} {}", trend_arrow(risk.trend()), risk.trend());
    println!("  ║ Owner:       {}", risk.owner());
    println!("  ║ Identified:  {}", risk.date_identified());
    for (i, line) in wrap_text(risk.description(), 56).iter().enumerate() {
        let label = if i == 0 { "Description:" } else { "" };
        println!("  ║ {:<12} {}", label, line);
    }
    match risk.mitigation_plan() {
        Some(plan) => println!("  ║ Mitigation:  {}", plan.bright_green()),
        None => println!("  ║ Mitigation:  {}", "none".bright_black()),
    }
    print_section_footer();
}

pub fn print_trends(points: &[TrendPoint], focus: Option<Category>) {
    match focus {
        Some(category) => {
            print_section_header(&format!("{} Trend", category));
            for line in trend_lines(category) {
                println!("  ║ {}", line);
            }
        }
        None => {
            print_section_header("Risk Trends");
            let mut header = format!("  ║ {:<5}", "Month");
            for category in Category::ALL {
                header.push_str(&format!("{:>13}", category.label()));
            }
            println!("{}", header.bold());
            for point in points {
                let mut line = format!("  ║ {:<5}", point.month);
                for category in Category::ALL {
                    line.push_str(&format!("{:>13}", point.value(category)));
                }
                println!("{}", line);
            }
        }
    }
    print_section_footer();
}

/// Month, value and bar for one category's series
pub fn trend_lines(category: Category) -> Vec<String> {
    trends::series(category)
        .into_iter()
        .map(|(month, value)| {
            format!(
                "{:<4} {:>3} {}",
                month,
                value,
                bar(value, 100, BAR_WIDTH).bright_blue()
            )
        })
        .collect()
}

pub fn print_outcome(outcome: &AssessmentOutcome) {
    print_section_header("Assessment Result");
    println!("  ║ Risk:     {}", outcome.name.bright_white().bold());
    println!("  ║ Category: {}", outcome.category);
    println!(
        "  ║ Score:    {}/25  {} {}",
        paint(&outcome.risk_score.to_string(), outcome.level).bold(),
        Theme::level(outcome.level),
        paint(outcome.level.label(), outcome.level)
    );
    for line in wrap_text(&outcome.summary, 64) {
        println!("  ║ {}", line);
    }
    print_section_footer();
}

pub fn print_assessment_responses(responses: &[AssessmentResponse]) {
    for response in responses {
        print_section_header(&format!(
            "{}  {} ({}, {})",
            response.id, response.department, response.completed_by, response.date
        ));
        for answer in response.responses {
            println!("  ║ {} {}", Theme::level(answer.risk_level), answer.question);
            println!("  ║     {} {}", Theme::arrow(), answer.answer.bright_black());
        }
        print_section_footer();
    }
}

pub fn print_insights(insights: &[Insight], quick: &str) {
    print_section_header("AI Insights");
    for insight in insights {
        println!("  ║ {} {}", Theme::bullet(), insight.title.bright_white().bold());
        for line in wrap_text(insight.description, 64) {
            println!("  ║   {}", line.bright_black());
        }
    }
    println!("  ║");
    for line in wrap_text(quick, 66) {
        println!("  ║ {}", line.bright_cyan());
    }
    print_section_footer();
}

pub fn print_answer(question: &str, answer: &str) {
    println!("\n  {} {}", "You:".bright_white().bold(), question);
    println!("\n  {}", "Assistant:".bright_cyan().bold());
    for paragraph in answer.lines() {
        if paragraph.is_empty() {
            println!();
            continue;
        }
        for line in wrap_text(paragraph, 72) {
            println!("    {}", line);
        }
    }
}

pub fn print_suggestions(prompts: &[&str]) {
    println!("\n  {}", "Try asking:".bright_white().bold());
    for prompt in prompts {
        println!("    {} {}", Theme::arrow(), prompt);
    }
}

pub fn print_report_saved(path: &str) {
    println!(
        "\n  {} {} {}",
        Theme::success(),
        "Report written:".bright_green().bold(),
        path.bright_cyan()
    );
}

pub fn print_tips() {
    println!(
        "\n  {} Run with --seed <N> (or RISK_SEED) to reproduce this session.",
        "Tip:".bright_yellow().bold()
    );
}

/// Horizontal bar of `value / max` scaled to `width` cells
pub fn bar(value: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = ((u64::from(value.min(max)) * width as u64 + u64::from(max) / 2)
        / u64::from(max)) as usize;
    "█".repeat(filled)
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current_line = String::new();
    for word in text.split_whitespace() {
        if !current_line.is_empty() && current_line.len() + word.len() + 1 > max_width {
            lines.push(std::mem::take(&mut current_line));
        }
        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }
    if !current_line.is_empty() {
        lines.push(current_line);
    }
    lines
}

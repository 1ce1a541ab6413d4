use clap::{ColorChoice, Parser};
use colored::*;
use rand::thread_rng;
use risk_core::assistant::{self, INSIGHTS, SUGGESTED_PROMPTS};
use risk_core::{Category, DashboardReport, ReportFormat, ReportWriter, RiskDataService, METRICS};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use risk_dashboard::session::{self, AssessmentInput, Overrides};
use risk_dashboard::terminal_ui::{self, Theme};

const ABOUT: &str = r#"
Risk register dashboard

Builds a register of synthetic risks for this session and shows the
aggregated views: category scores, status counts, the likelihood × impact
heatmap, recent risks and twelve-month trends.

Examples:
  # Dashboard overview for a reproducible session
  risk-dashboard --seed 42 overview

  # Score a new risk
  risk-dashboard assess --name "Staff Shortage" --category operational \
      --owner "Robert Wilson" --likelihood 3 --impact 4

  # Write a Markdown report
  risk-dashboard report --format markdown --output reports/dashboard.md
"#;

#[derive(Parser)]
#[command(name = "risk-dashboard")]
#[command(about = "Risk register dashboard")]
#[command(long_about = ABOUT)]
#[command(version)]
#[command(color = ColorChoice::Auto)]
#[command(styles = get_styles())]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output mode
    #[arg(long, short, global = true, help_heading = "Global")]
    verbose: bool,

    /// Seed for the session's register
    #[arg(long, global = true, env = "RISK_SEED", value_name = "N", help_heading = "Global")]
    seed: Option<u64>,

    /// Number of risks in the register
    #[arg(long, global = true, value_name = "N", help_heading = "Global")]
    records: Option<usize>,

    /// TOML configuration file
    #[arg(
        long,
        global = true,
        env = "RISK_CONFIG",
        value_name = "FILE",
        help_heading = "Global"
    )]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Category scores, counts, overall score and insights
    Overview,

    /// Likelihood × impact heatmap
    Heatmap,

    /// Most recently identified risks
    Recent {
        /// Number of risks to list (defaults to the configured count)
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Full detail for one risk
    Show {
        /// Risk id, e.g. RISK-2026-001
        id: String,
    },

    /// Twelve-month category trend series
    Trends {
        /// Chart a single category
        #[arg(long, value_parser = session::parse_category)]
        category: Option<Category>,
    },

    /// Score a new risk through the assessment workflow
    Assess {
        #[arg(long)]
        name: String,

        #[arg(long, value_parser = session::parse_category)]
        category: Category,

        #[arg(long)]
        owner: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Likelihood rating (1-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        likelihood: u8,

        /// Impact rating (1-5)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        impact: u8,

        /// Controls already in place
        #[arg(long, default_value = "")]
        controls: String,

        #[arg(long, default_value = "")]
        context: String,
    },

    /// Completed departmental assessment questionnaires
    Responses,

    /// Ask the risk assistant a question
    Ask {
        /// Question text; omit to list suggested prompts
        question: Vec<String>,
    },

    /// Render a dashboard report
    Report {
        /// json or markdown (defaults to the configured format)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<ReportFormat>,

        /// Write to this file (or a dashboard.<ext> file in this directory)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Write the effective configuration as TOML
    Config {
        #[arg(long, value_name = "FILE")]
        write: PathBuf,
    },
}

/// Get styled help text
fn get_styles() -> clap::builder::Styles {
    use clap::builder::styling::*;

    Styles::styled()
        .header(AnsiColor::BrightCyan.on_default().bold())
        .usage(AnsiColor::BrightCyan.on_default().bold())
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightYellow.on_default())
        .valid(AnsiColor::BrightGreen.on_default())
        .invalid(AnsiColor::BrightRed.on_default())
        .error(AnsiColor::BrightRed.on_default().bold())
}

fn parse_format(value: &str) -> Result<ReportFormat, String> {
    ReportFormat::parse(value)
        .ok_or_else(|| format!("unknown report format '{}' (expected json or markdown)", value))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n  {} {:#}", Theme::failure(), e);
            ExitCode::from(1)
        }
    };

    debug!("Metrics: {}", METRICS.export_json());
    exit_code
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let overrides = Overrides {
        seed: cli.seed,
        records: cli.records,
    };
    let config = session::resolve_config(cli.config.as_deref(), &overrides)?;

    match &cli.command {
        Commands::Assess {
            name,
            category,
            owner,
            description,
            likelihood,
            impact,
            controls,
            context,
        } => {
            let outcome = session::run_assessment(AssessmentInput {
                name: name.clone(),
                category: *category,
                owner: owner.clone(),
                description: description.clone(),
                likelihood: *likelihood,
                impact: *impact,
                controls: controls.clone(),
                context: context.clone(),
            })?;
            terminal_ui::print_outcome(&outcome);
            return Ok(());
        }
        Commands::Ask { question } => {
            if question.is_empty() {
                terminal_ui::print_suggestions(&SUGGESTED_PROMPTS);
            } else {
                let question = question.join(" ");
                terminal_ui::print_answer(&question, &assistant::respond(&question));
            }
            return Ok(());
        }
        Commands::Config { write } => {
            config.save(write)?;
            terminal_ui::print_report_saved(&write.display().to_string());
            return Ok(());
        }
        _ => {}
    }

    let service = session::open_session(&config)?;

    match &cli.command {
        Commands::Overview => print_overview(&service),
        Commands::Heatmap => terminal_ui::print_heatmap(&service.heatmap()),
        Commands::Recent { count } => {
            terminal_ui::print_recent(&service.recent_risks(count.unwrap_or(config.recent_count)))
        }
        Commands::Show { id } => match service.risk_by_id(id) {
            Some(risk) => terminal_ui::print_risk(risk),
            None => anyhow::bail!("no risk with id '{}' in this session", id),
        },
        Commands::Trends { category } => {
            terminal_ui::print_trends(service.risk_trend_data(), *category)
        }
        Commands::Responses => {
            terminal_ui::print_assessment_responses(service.assessment_responses())
        }
        Commands::Report { format, output } => {
            let format = format.unwrap_or(config.report_format);
            let report = DashboardReport::build(&service, config.recent_count);
            match output {
                Some(path) => {
                    let written = ReportWriter::new(format).write(&report, path)?;
                    terminal_ui::print_report_saved(&written.display().to_string());
                }
                None => println!("{}", report.render(format)?),
            }
        }
        Commands::Assess { .. } | Commands::Ask { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_overview(service: &RiskDataService) {
    terminal_ui::print_banner(service.seed());
    terminal_ui::print_overall(
        service.overall_risk_score(),
        service.overall_risk_level(),
        service.risks().len(),
    );
    terminal_ui::print_metrics(service.risk_metrics());
    terminal_ui::print_counts("Risks by Category", &service.risks_by_category());
    terminal_ui::print_status_counts(&service.risks_by_status());
    terminal_ui::print_level_counts(&service.risks_by_level());
    terminal_ui::print_insights(&INSIGHTS, assistant::quick_insight(&mut thread_rng()));

    let high = service
        .risks_by_level()
        .get(&risk_core::RiskLevel::High)
        .copied()
        .unwrap_or(0);
    if high > 0 {
        println!(
            "\n  {} {} high risks need attention.",
            Theme::warning(),
            high.to_string().bright_red().bold()
        );
    }
    terminal_ui::print_tips();
}

use crate::infra::{build_suite, parse_assignment, parse_date, parse_kind, Assignment};
use chrono::{Local, NaiveDate};
use clap::Args;
use hr_impact::calculators::{
    format_currency, CalculatorKind, CalculatorSuite, DashboardInsights, DashboardSummary, ImpactReport,
    ReportFormat, ReportRecipient, RoiOutcome, RoiProgram, RoiProgramKind, SharedInputsPatch,
};
use hr_impact::config::AppConfig;
use hr_impact::error::AppError;
use std::path::PathBuf;

/// Scenario flags shared by every offline command.
#[derive(Args, Debug, Default)]
pub(crate) struct ScenarioArgs {
    /// Total headcount shared by every calculator
    #[arg(long)]
    pub(crate) employees: Option<u32>,
    /// Average annual salary shared by every calculator
    #[arg(long)]
    pub(crate) avg_salary: Option<f64>,
    /// Override one calculator input, e.g. `turnover.leavers=12` (repeatable)
    #[arg(long = "set", value_name = "KIND.FIELD=VALUE", value_parser = parse_assignment)]
    pub(crate) assignments: Vec<Assignment>,
    /// Report a calculator with its current inputs, as if opened (repeatable)
    #[arg(long = "open", value_name = "KIND", value_parser = parse_kind)]
    pub(crate) opened: Vec<CalculatorKind>,
}

impl ScenarioArgs {
    fn build_suite(&self) -> Result<CalculatorSuite, AppError> {
        let config = AppConfig::load()?;
        let patch = SharedInputsPatch {
            total_employees: self.employees,
            avg_salary: self.avg_salary,
        };
        build_suite(&config.calculators, patch, &self.assignments, &self.opened)
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    #[command(flatten)]
    pub(crate) scenario: ScenarioArgs,
    /// Fill calculators without figures from industry benchmarks
    #[arg(long)]
    pub(crate) benchmarks: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RoiArgs {
    #[command(flatten)]
    pub(crate) scenario: ScenarioArgs,
    /// Program to project (communication_training, engagement_program,
    /// retention_program, quality_program). Defaults to all four.
    #[arg(long, value_parser = parse_program)]
    pub(crate) program: Option<RoiProgramKind>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) scenario: ScenarioArgs,
    /// Company named on the plan and in the file name
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Contact name printed on the plan
    #[arg(long)]
    pub(crate) contact: Option<String>,
    /// Output format: json or csv
    #[arg(long, default_value = "json", value_parser = parse_format)]
    pub(crate) format: ReportFormat,
    /// Write to this path; `-` prints to stdout. Defaults to HR_Impact_Plan_<company>.<ext>
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

fn parse_program(raw: &str) -> Result<RoiProgramKind, String> {
    raw.parse().map_err(|err: hr_impact::calculators::RoiError| err.to_string())
}

fn parse_format(raw: &str) -> Result<ReportFormat, String> {
    raw.parse()
        .map_err(|err: hr_impact::calculators::ExportError| err.to_string())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let suite = args.scenario.build_suite()?;
    let records = suite.records();
    let summary = if args.benchmarks {
        DashboardSummary::with_benchmarks(&records)
    } else {
        DashboardSummary::from_records(&records)
    };
    let insights = summary.insights(&records);

    render_dashboard(&suite, &summary, &insights);
    Ok(())
}

pub(crate) fn run_roi(args: RoiArgs) -> Result<(), AppError> {
    let suite = args.scenario.build_suite()?;
    let programs = match args.program {
        Some(program) => vec![program],
        None => RoiProgramKind::ordered().to_vec(),
    };

    println!("Improvement program ROI");
    for kind in programs {
        let outcome = RoiProgram::from_store(kind, suite.store(), suite.registry()).evaluate();
        render_roi(&outcome);
    }
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let suite = args.scenario.build_suite()?;
    let recipient = if args.company.is_some() || args.contact.is_some() {
        Some(ReportRecipient {
            company: args.company,
            contact_name: args.contact,
            employees: Some(suite.shared_inputs().total_employees),
            ..ReportRecipient::default()
        })
    } else {
        None
    };

    let generated_on = args.date.unwrap_or_else(|| Local::now().date_naive());
    let report = ImpactReport::build(&suite, recipient, generated_on);
    let rendered = report.render(args.format)?;

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!("{}.{}", report.file_stem(), args.format.extension()))
    });
    if output.as_os_str() == "-" {
        println!("{rendered}");
    } else {
        std::fs::write(&output, rendered)?;
        println!("Impact plan written to {}", output.display());
    }
    Ok(())
}

fn render_dashboard(suite: &CalculatorSuite, summary: &DashboardSummary, insights: &DashboardInsights) {
    let shared = suite.shared_inputs();
    println!("HR impact dashboard");
    println!(
        "Workforce: {} employees, average salary {}",
        shared.total_employees,
        format_currency(shared.avg_salary)
    );
    println!(
        "\nTotal annual cost: {} ({} calculators reporting)",
        format_currency(summary.total_annual_cost),
        summary.calculators_reporting
    );

    println!("\nCost breakdown");
    for entry in &summary.cost_breakdown {
        println!(
            "- {}: {} ({:.1}% of total, {})",
            entry.label,
            format_currency(entry.annual_cost),
            entry.share_of_total_pct,
            entry.source.label()
        );
    }

    if let Some(profit) = summary.profit_per_employee {
        println!("\nProfit per employee: {}", format_currency(profit));
    }

    if let Some(highest) = &insights.highest_impact {
        println!("\n{highest}");
    }

    if !insights.observations.is_empty() {
        println!("\nObservations");
        for line in &insights.observations {
            println!("- {line}");
        }
    }

    if !insights.recommended_actions.is_empty() {
        println!("\nRecommended actions");
        for line in &insights.recommended_actions {
            println!("- {line}");
        }
    }
}

fn render_roi(outcome: &RoiOutcome) {
    println!("\n{}", outcome.program_label);
    println!("- Annual loss: {}", format_currency(outcome.annual_loss));
    println!("- Investment: {}", format_currency(outcome.total_investment));
    println!("- Annual savings: {}", format_currency(outcome.annual_savings));
    match outcome.roi_pct {
        Some(roi) => println!("- ROI: {roi:.0}%"),
        None => println!("- ROI: n/a"),
    }
    match outcome.payback_months {
        Some(months) => println!("- Payback: {months:.1} months"),
        None => println!("- Payback: n/a"),
    }
}

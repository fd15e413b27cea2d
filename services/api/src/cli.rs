use crate::commands::{run_dashboard, run_report, run_roi, DashboardArgs, ReportArgs, RoiArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use hr_impact::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "HR Impact Lab",
    about = "Run the HR impact calculators as a service or from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the cost dashboard for a scenario
    Dashboard(DashboardArgs),
    /// Project the return on one or every improvement program
    Roi(RoiArgs),
    /// Export the impact plan as JSON or CSV
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Dashboard(args) => run_dashboard(args),
        Command::Roi(args) => run_roi(args),
        Command::Report(args) => run_report(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_impact::calculators::CalculatorKind;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["hr-impact-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn dashboard_accepts_repeated_assignments() {
        let cli = Cli::try_parse_from([
            "hr-impact-api",
            "dashboard",
            "--employees",
            "250",
            "--set",
            "turnover.leavers=20",
            "--set",
            "absence.avg_absence_days=4.5",
            "--benchmarks",
        ])
        .expect("parses");

        let Some(Command::Dashboard(args)) = cli.command else {
            panic!("expected dashboard command");
        };
        assert_eq!(args.scenario.employees, Some(250));
        assert!(args.benchmarks);
        assert_eq!(args.scenario.assignments.len(), 2);
        assert_eq!(args.scenario.assignments[0].kind, CalculatorKind::Turnover);
        assert_eq!(args.scenario.assignments[1].value, "4.5");
    }

    #[test]
    fn report_accepts_opened_calculators() {
        let cli = Cli::try_parse_from([
            "hr-impact-api",
            "report",
            "--open",
            "service",
            "--open",
            "engagement",
        ])
        .expect("parses");

        let Some(Command::Report(args)) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(
            args.scenario.opened,
            vec![CalculatorKind::Service, CalculatorKind::Engagement]
        );
    }

    #[test]
    fn malformed_assignment_is_rejected() {
        let result = Cli::try_parse_from(["hr-impact-api", "dashboard", "--set", "turnover=20"]);
        assert!(result.is_err());
    }
}

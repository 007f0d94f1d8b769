use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::{fs::read_to_string, process::ExitCode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[clap(name = "blockrun", version)]
pub struct CLArgs {
    #[clap(subcommand)]
    pub routine: BlockrunCommand,
}

#[derive(Debug, Subcommand)]
pub enum BlockrunCommand {
    /// Run a program stored as JSON.
    Run {
        path: PathBuf,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: ReportFormat,
        /// Overrides the iteration ceiling from the program file.
        #[clap(long = "max-iterations", env = "BLOCKRUN_MAX_ITERATIONS")]
        max_iterations: Option<usize>,
    },
    /// Evaluate a single arithmetic expression.
    Evaluate {
        expression: String,
        #[clap(long = "format", value_enum, default_value = "basic")]
        format: ValueFormat,
    },
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ReportFormat {
    Debug,
    Basic,
    Pretty,
    Json,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ValueFormat {
    Debug,
    Basic,
    Pretty,
}

fn main() -> ExitCode {
    blockrun_main().expect("Encountered an error!")
}

fn blockrun_main() -> Result<ExitCode> {
    color_eyre::install().expect("Can't fail at first call!");
    install_tracing();
    let args = CLArgs::parse();
    match args.routine {
        BlockrunCommand::Run {
            path,
            format,
            max_iterations,
        } => {
            eprintln!("Running {:?}...", path);
            let src = read_to_string(&path)
                .wrap_err_with(|| format!("Failed to read program file {path:?}"))?;
            run(&src, &format, max_iterations)
        }
        BlockrunCommand::Evaluate { expression, format } => {
            Ok(evaluate_expression(&expression, &format))
        }
    }
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn run(src: &str, format: &ReportFormat, max_iterations: Option<usize>) -> Result<ExitCode> {
    use blockrun::interpreter::formatter::{
        BasicFormatter, DebugFormatter, JsonFormatter, PrettyFormatter, ReportFormatter,
    };
    use blockrun::interpreter::Interpreter;
    use blockrun::program::ProgramFile;

    let file = match ProgramFile::from_json(src) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("Malformed program: {error}");
            return Ok(ExitCode::from(65));
        }
    };
    let mut config = file.config.unwrap_or_default();
    if let Some(max_iterations) = max_iterations {
        config = config.with_max_iterations(max_iterations);
    }

    let formatter: Box<dyn ReportFormatter> = match format {
        ReportFormat::Debug => Box::new(DebugFormatter),
        ReportFormat::Basic => Box::new(BasicFormatter),
        ReportFormat::Pretty => Box::new(PrettyFormatter::new()),
        ReportFormat::Json => Box::new(JsonFormatter),
    };

    let report = Interpreter::new(config).run(&file.statements);
    if matches!(format, ReportFormat::Json) {
        println!("{}", formatter.render(&report));
    } else {
        let body = formatter.format(&report);
        if !body.is_empty() {
            println!("{body}");
        }
        if let Some(error) = &report.error {
            eprintln!("{}", formatter.format_error(error));
        }
    }

    match report.error {
        None => Ok(ExitCode::SUCCESS),
        Some(_) => Ok(ExitCode::from(70)),
    }
}

fn evaluate_expression(expression: &str, format: &ValueFormat) -> ExitCode {
    use blockrun::evaluator::evaluate;
    use blockrun::evaluator::formatter::{
        BasicFormatter, DebugFormatter, PrettyFormatter, ValueFormatter,
    };
    use blockrun::interpreter::context::ExecutionContext;

    let formatter: Box<dyn ValueFormatter> = match format {
        ValueFormat::Debug => Box::new(DebugFormatter),
        ValueFormat::Basic => Box::new(BasicFormatter),
        ValueFormat::Pretty => Box::new(PrettyFormatter::new("expression")),
    };

    let context = ExecutionContext::new();
    match evaluate(expression, &context) {
        Ok(value) => {
            println!("{}", formatter.format(value));
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("{}", formatter.format_error(&error));
            ExitCode::from(70)
        }
    }
}

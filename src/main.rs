mod debug_report;

use clap::{Args, Parser, Subcommand};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use wordforge::{DateRecord, GenerateError, GenerateRequest, Pools, Rule, expand_rule_with_metrics, generate_to_file};

const DEFAULT_RULES_PATH: &str = "rules/rules.txt";
const DEFAULT_OUTPUT_PATH: &str = "output/passwords.txt";

/// Rule-driven password wordlist generator for targeted credential audits.
#[derive(Debug, Parser)]
#[command(name = "wordforge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Expand every rule in a rule file and write the wordlist.
    Generate(GenerateArgs),
    /// Expand a single rule and print a report.
    Expand(ExpandArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Personal string (name, pet, place, ...). Repeatable.
    #[arg(short = 's', long = "string")]
    strings: Vec<String>,
    /// Number to substitute for `number` tokens. Repeatable.
    #[arg(short = 'n', long = "number")]
    numbers: Vec<String>,
    /// Date as day/month/year. Repeatable.
    #[arg(short = 'd', long = "date")]
    dates: Vec<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    #[command(flatten)]
    inputs: InputArgs,
    /// JSON request file; flags are added on top of it.
    #[arg(long)]
    request: Option<PathBuf>,
    /// Rule file, one rule per line.
    #[arg(long, default_value = DEFAULT_RULES_PATH)]
    rules: PathBuf,
    /// Wordlist destination.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
    /// Shortest accepted password (0 disables).
    #[arg(long)]
    min_length: Option<usize>,
    /// Longest accepted password (0 disables).
    #[arg(long)]
    max_length: Option<usize>,
    /// Maximum passwords written across all rules.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Debug, Args)]
struct ExpandArgs {
    /// Rule text, e.g. "string:u:1 + literal:_ + year".
    rule: String,
    #[command(flatten)]
    inputs: InputArgs,
    /// Join slots with a single space.
    #[arg(long)]
    space: bool,
    /// Passwords to list in the report.
    #[arg(long, default_value_t = 50)]
    show: usize,
    /// Force ANSI color output.
    #[arg(long, conflicts_with = "no_color")]
    color: bool,
    /// Disable ANSI color output.
    #[arg(long)]
    no_color: bool,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Expand(args) => {
            run_expand(args);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run_generate(args: GenerateArgs) -> Result<(), GenerateError> {
    let request = build_request(&args)?;
    let report = generate_to_file(&request, &args.rules, &args.output)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_request(args: &GenerateArgs) -> Result<GenerateRequest, GenerateError> {
    let mut request = match &args.request {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|source| GenerateError::Io { path: path.clone(), source })?;
            serde_json::from_str(&text)?
        }
        None => GenerateRequest::default(),
    };

    request.strings.extend(args.inputs.strings.iter().cloned().map(Some));
    request.numbers.extend(args.inputs.numbers.iter().cloned());
    request.dates.extend(args.inputs.dates.iter().cloned());
    if let Some(min) = args.min_length {
        request.min_length = min;
    }
    if let Some(max) = args.max_length {
        request.max_length = Some(max);
    }
    if let Some(limit) = args.limit {
        request.password_limit = limit;
    }

    request.validate()?;
    Ok(request)
}

fn run_expand(args: ExpandArgs) {
    let mut rule = Rule::parse(&args.rule);
    rule.join_with_space |= args.space;

    let dates: Vec<DateRecord> = args.inputs.dates.iter().map(|raw| DateRecord::parse(raw)).collect();
    let pools = Pools::new(&args.inputs.strings, &args.inputs.numbers, &dates);
    let run = expand_rule_with_metrics(&rule, &pools);

    let color = if args.no_color { false } else { args.color || io::stdout().is_terminal() };
    debug_report::print_run(&rule, &run, color, args.show);
}

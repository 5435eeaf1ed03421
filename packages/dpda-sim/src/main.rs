use anyhow::Context;
use clap::Parser;
use dpda_sim_lib::{
    automaton::dpda::Dpda,
    config::SimulatorConfig,
    logger::{LogLevel, Logger},
    serialization,
    simulator::{SerializableComputationResult, engine::DpdaSimulator},
    validation,
    visualization::{self, ExportFormat},
};

#[derive(Parser, Debug)]
#[command(name = "DPDA Simulator")]
#[command(version = "0.1")]
#[command(about = "Simulate deterministic pushdown automata", long_about = None)]
struct Args {
    /// Path to a DPDA definition in the versioned JSON format.
    file: String,

    /// The input word. Split on commas when present, per character otherwise.
    input: Option<String>,

    /// Override the configured step bound for this run.
    #[arg(short, long)]
    max_steps: Option<u64>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<String>,

    /// Skip the determinism validation before running.
    #[arg(long)]
    no_validate: bool,

    /// Export the state graph instead of running (dot or json).
    #[arg(short, long)]
    export: Option<ExportFormat>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = SimulatorConfig::from_optional_file(args.config)?;
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }

    let dpda: Dpda<String, String> = serialization::load_from_file(&args.file)?;
    tracing::debug!("loaded {} from {}", dpda, args.file);

    if let Some(format) = args.export {
        println!("{}", visualization::export(&dpda, format)?);
        return Ok(());
    }

    let logger = Logger::from_config(&config.logger, "Simulator".into());

    if !args.no_validate {
        let report = validation::validate(&dpda);
        if !report.is_valid() {
            for message in report.messages() {
                match &logger {
                    Some(logger) => logger.error(&message),
                    None => eprintln!("{}", message),
                }
            }
            anyhow::bail!(
                "definition is not a valid DPDA ({} violations)",
                report.violations().len()
            );
        }
    }

    let input = args
        .input
        .context("an input word is required unless --export is given")?;
    let symbols = split_input(&input);

    if symbols.len() > config.max_input_length {
        anyhow::bail!(
            "input length {} exceeds the configured maximum of {}",
            symbols.len(),
            config.max_input_length
        );
    }

    if let Some(logger) = &logger {
        logger.banner(LogLevel::Info, &format!("run \"{}\"", input));
    }

    let mut simulator = DpdaSimulator::new(&dpda, config);
    if let Some(logger) = &logger {
        simulator = simulator.with_logger(logger);
    }

    let result = simulator.run(&symbols);

    if let Some(logger) = &logger {
        logger.info(&result.to_string());
    }

    let json = serde_json::to_string_pretty(&SerializableComputationResult::from(result))?;
    println!("{}", json);

    Ok(())
}

/// Turns the raw input argument into a symbol sequence. A comma anywhere
/// makes it a comma-separated list of multi-character symbols.
fn split_input(input: &str) -> Vec<String> {
    if input.is_empty() {
        vec![]
    } else if input.contains(',') {
        input
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    } else {
        input.chars().map(|c| c.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_input() {
        assert_eq!(split_input("0011"), vec!["0", "0", "1", "1"]);
        assert_eq!(split_input("a1,b2"), vec!["a1", "b2"]);
        assert_eq!(split_input(""), Vec::<String>::new());
        assert_eq!(split_input("a,,b"), vec!["a", "b"]);
    }
}

use anyhow::Result;
use clap::Parser;
use solvebench::{cli::Cli, config::BenchConfig, harness, sampler::ProcessSampler};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; --debug forces TRACE, otherwise RUST_LOG (default warn)
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = BenchConfig::resolve(&args)?;
    tracing::debug!(?config, "resolved configuration");

    let mut sampler = ProcessSampler::new(config.invocation());
    let sets = harness::collect_samples(&mut sampler, &config.solvers, config.runs)?;

    // Render both documents before touching the filesystem
    let outputs = harness::render_outputs(&sets, config.runs)?;
    harness::write_outputs(&outputs, &config.csv_output, &config.json_output)?;

    eprintln!(
        "[solvebench: {} samples written to {}]",
        sets.total_samples(),
        config.csv_output.display()
    );
    eprintln!(
        "[solvebench: Summary written to {}]",
        config.json_output.display()
    );
    print!("{}", outputs.report.to_table());

    Ok(())
}

use std::io::Write;
use std::process::ExitCode;

use npu_bench::BenchmarkRunner;
use npu_bench::cli::{self, CliOptions};
use npu_bench::outcome;
use npu_runtime::RknnLite;

fn main() -> anyhow::Result<ExitCode> {
    let matches = cli::command().get_matches();
    let options = CliOptions::from_matches(&matches)?;

    let env = env_logger::Env::default().default_filter_or(options.log_filter());
    env_logger::Builder::from_env(env).init();

    let config = options.config;
    let format = config.format;
    let mut runtime = RknnLite::with_library(config.runtime_library.clone());
    let runner = BenchmarkRunner::new(config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = runner.run_with(&mut runtime, |report| {
        outcome::emit_report(&mut out, report, format)
    });
    let code = outcome::finish(result, &mut out)?;
    out.flush()?;
    Ok(ExitCode::from(code))
}

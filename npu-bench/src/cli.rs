//! 命令行解析

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

use crate::config::{BenchConfig, ReportFormat};
use crate::error::BenchError;

pub fn command() -> Command {
    Command::new("npu-bench")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Benchmark YOLOv5s inference on an RKNN NPU")
        .arg(
            Arg::new("model_path")
                .value_name("MODEL_PATH")
                .help("Path to the compiled .rknn model")
                .value_parser(value_parser!(PathBuf))
                .required(false),
        )
        .arg(
            Arg::new("num_runs")
                .value_name("NUM_RUNS")
                .help("Number of timed inference runs [default: 20]")
                .value_parser(value_parser!(u32).range(1..))
                .required(false),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("JSON configuration file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("runtime-lib")
                .long("runtime-lib")
                .value_name("PATH")
                .help("RKNN runtime library [default: librknnrt.so]")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Report format (text, json)"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for the synthetic input tensor")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("debugfs")
                .long("debugfs")
                .value_name("DIR")
                .help("rknpu debugfs directory used for the clock snapshot")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

/// 解析后的命令行选项
#[derive(Debug, Clone)]
pub struct CliOptions {
    pub config: BenchConfig,
    pub verbosity: u8,
}

impl CliOptions {
    /// 默认值 → 配置文件 → 命令行选项 → 位置参数
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, BenchError> {
        let mut config = match matches.get_one::<PathBuf>("config") {
            Some(path) => BenchConfig::from_file(path)?,
            None => BenchConfig::default(),
        };

        if let Some(lib) = matches.get_one::<PathBuf>("runtime-lib") {
            config.runtime_library = lib.clone();
        }
        if let Some(format) = matches.get_one::<String>("format") {
            config.format = format.parse::<ReportFormat>()?;
        }
        if let Some(seed) = matches.get_one::<u64>("seed") {
            config.seed = Some(*seed);
        }
        if let Some(root) = matches.get_one::<PathBuf>("debugfs") {
            config.debugfs_root = root.clone();
        }
        if let Some(model) = matches.get_one::<PathBuf>("model_path") {
            config.model_path = model.clone();
        }
        if let Some(runs) = matches.get_one::<u32>("num_runs") {
            config.num_runs = *runs;
        }

        config.validate()?;

        Ok(Self {
            config,
            verbosity: matches.get_count("verbose"),
        })
    }

    pub fn log_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MODEL;

    fn parse(args: &[&str]) -> Result<CliOptions, BenchError> {
        let matches = command()
            .try_get_matches_from(args)
            .expect("arguments should parse");
        CliOptions::from_matches(&matches)
    }

    #[test]
    fn test_no_arguments_uses_defaults() {
        let opts = parse(&["npu-bench"]).unwrap();
        assert_eq!(opts.config.num_runs, 20);
        assert_eq!(opts.config.model_path, PathBuf::from(DEFAULT_MODEL));
        assert_eq!(opts.log_filter(), "warn");
    }

    #[test]
    fn test_positional_arguments() {
        let opts = parse(&["npu-bench", "/tmp/model.rknn", "100"]).unwrap();
        assert_eq!(opts.config.model_path, PathBuf::from("/tmp/model.rknn"));
        assert_eq!(opts.config.num_runs, 100);
    }

    #[test]
    fn test_flags_override_defaults() {
        let opts = parse(&[
            "npu-bench",
            "--format",
            "json",
            "--seed",
            "9",
            "--runtime-lib",
            "/usr/lib/librknnrt.so",
            "-vv",
        ])
        .unwrap();
        assert_eq!(opts.config.format, ReportFormat::Json);
        assert_eq!(opts.config.seed, Some(9));
        assert_eq!(
            opts.config.runtime_library,
            PathBuf::from("/usr/lib/librknnrt.so")
        );
        assert_eq!(opts.log_filter(), "debug");
    }

    #[test]
    fn test_positional_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(&path, r#"{ "model_path": "/from/config.rknn", "num_runs": 5 }"#).unwrap();
        let path_str = path.to_str().unwrap();

        let opts = parse(&["npu-bench", "-c", path_str]).unwrap();
        assert_eq!(opts.config.model_path, PathBuf::from("/from/config.rknn"));
        assert_eq!(opts.config.num_runs, 5);

        let opts = parse(&["npu-bench", "-c", path_str, "/cli.rknn"]).unwrap();
        assert_eq!(opts.config.model_path, PathBuf::from("/cli.rknn"));
        assert_eq!(opts.config.num_runs, 5);
    }

    #[test]
    fn test_zero_runs_rejected() {
        assert!(
            command()
                .try_get_matches_from(["npu-bench", "m.rknn", "0"])
                .is_err()
        );
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(matches!(
            parse(&["npu-bench", "--format", "html"]),
            Err(BenchError::Config(_))
        ));
    }
}

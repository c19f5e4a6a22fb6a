//! NPU 推理基准测试
//!
//! 本模块提供 RKNN 模型的延迟测量，包括：
//! - 配置加载与命令行解析
//! - 预热与计时推理
//! - 延迟统计
//! - 报告生成

pub mod cli;
pub mod config;
pub mod error;
pub mod outcome;
pub mod report;
pub mod runner;
pub mod stats;

pub use config::{BenchConfig, ReportFormat};
pub use error::BenchError;
pub use report::BenchReport;
pub use runner::BenchmarkRunner;
pub use stats::LatencyStats;

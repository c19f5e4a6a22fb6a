//! 报告生成

use std::fmt::Write as _;
use std::path::PathBuf;

use npu_runtime::NpuClockInfo;
use serde::{Deserialize, Serialize};

use crate::config::{INPUT_SHAPE, ReportFormat};
use crate::stats::LatencyStats;

/// 报告标题中的模型名
pub const MODEL_LABEL: &str = "YOLOv5s";

/// 一次成功运行的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchReport {
    pub model_path: PathBuf,
    pub num_runs: u32,
    pub warmup_runs: u32,
    pub stats: LatencyStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npu_clock: Option<NpuClockInfo>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl BenchReport {
    /// 按格式渲染报告
    pub fn render(&self, format: ReportFormat) -> Result<String, serde_json::Error> {
        match format {
            ReportFormat::Text => Ok(self.render_text()),
            ReportFormat::Json => serde_json::to_string_pretty(self),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{} {}x{} ({} runs):",
            MODEL_LABEL, INPUT_SHAPE.width, INPUT_SHAPE.height, self.num_runs
        );
        let _ = writeln!(out, "  Min:  {:.1} ms", self.stats.min_ms);
        let _ = writeln!(out, "  Max:  {:.1} ms", self.stats.max_ms);
        let _ = writeln!(out, "  Avg:  {:.1} ms", self.stats.avg_ms);
        let _ = writeln!(out, "  FPS:  {:.1}", self.stats.fps);
        out
    }
}

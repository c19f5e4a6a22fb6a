//! 基准测试配置

use std::path::{Path, PathBuf};

use npu_runtime::TensorShape;
use npu_runtime::probe::DEFAULT_DEBUGFS_ROOT;
use npu_runtime::rknn::DEFAULT_RUNTIME_LIBRARY;
use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// rknn-toolkit2 自带的 YOLOv5s 示例模型
pub const DEFAULT_MODEL: &str = concat!(
    "/root/work/npu2/rknn-toolkit2-v2.4.0/",
    "rknn-toolkit2-v2.4.0-2026-01-17/rknpu2/",
    "examples/rknn_yolov5_demo/model/RK3566_RK3568/yolov5s-640-640.rknn"
);

pub const DEFAULT_NUM_RUNS: u32 = 20;

/// 预热次数，不计入统计
pub const WARMUP_RUNS: u32 = 5;

/// YOLOv5s 输入：NHWC (1, 640, 640, 3)
pub const INPUT_SHAPE: TensorShape = TensorShape::nhwc(1, 640, 640, 3);

/// 基准测试配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// 模型路径
    pub model_path: PathBuf,
    /// 计时推理次数
    pub num_runs: u32,
    /// 运行时动态库
    pub runtime_library: PathBuf,
    /// 报告格式
    pub format: ReportFormat,
    /// 输入张量的随机种子，未设置时使用系统熵
    pub seed: Option<u64>,
    /// rknpu debugfs 目录
    pub debugfs_root: PathBuf,
}

/// 报告格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// 文本格式
    #[default]
    Text,
    /// JSON格式
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(BenchError::Config(format!("unsupported report format: {other}"))),
        }
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL),
            num_runs: DEFAULT_NUM_RUNS,
            runtime_library: PathBuf::from(DEFAULT_RUNTIME_LIBRARY),
            format: ReportFormat::Text,
            seed: None,
            debugfs_root: PathBuf::from(DEFAULT_DEBUGFS_ROOT),
        }
    }
}

impl BenchConfig {
    /// 从 JSON 文件加载配置，缺省字段取默认值
    pub fn from_file(path: &Path) -> Result<Self, BenchError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| BenchError::Config(format!("{}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| BenchError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.num_runs == 0 {
            return Err(BenchError::Config("num_runs must be at least 1".to_string()));
        }
        if self.model_path.as_os_str().is_empty() {
            return Err(BenchError::Config("model_path must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.num_runs, 20);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL));
        assert!(config.model_path.ends_with("yolov5s-640-640.rknn"));
        assert_eq!(config.format, ReportFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(&path, r#"{ "num_runs": 50, "format": "json" }"#).unwrap();

        let config = BenchConfig::from_file(&path).unwrap();
        assert_eq!(config.num_runs, 50);
        assert_eq!(config.format, ReportFormat::Json);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL));
    }

    #[test]
    fn test_from_file_rejects_zero_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");
        std::fs::write(&path, r#"{ "num_runs": 0 }"#).unwrap();

        assert!(matches!(
            BenchConfig::from_file(&path),
            Err(BenchError::Config(_))
        ));
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!("html".parse::<ReportFormat>().is_err());
    }
}

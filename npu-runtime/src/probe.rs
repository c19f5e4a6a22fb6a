//! NPU 时钟与电压探测
//!
//! 读取 rknpu 驱动在 debugfs 下导出的控制文件：
//! - `freq_mhz`: 当前频率 (MHz)
//! - `voltage_mv`: 当前电压 (mV)
//! - `clock_source`: 时钟源描述
//!
//! 需要 root 权限且 debugfs 已挂载，否则返回 `None`。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// rknpu debugfs 的默认位置
pub const DEFAULT_DEBUGFS_ROOT: &str = "/sys/kernel/debug/rknpu";

/// NPU 时钟快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpuClockInfo {
    pub freq_mhz: Option<u64>,
    pub voltage_mv: Option<u64>,
    pub clock_source: Option<String>,
}

impl NpuClockInfo {
    /// 从默认 debugfs 目录读取
    pub fn detect() -> Option<Self> {
        Self::read_from(Path::new(DEFAULT_DEBUGFS_ROOT))
    }

    /// 从指定目录读取；目录不存在或没有任何可读文件时返回 `None`
    pub fn read_from(root: &Path) -> Option<Self> {
        if !root.is_dir() {
            log::debug!("NPU debugfs not found at {}", root.display());
            return None;
        }

        let info = Self {
            freq_mhz: read_u64(&root.join("freq_mhz")),
            voltage_mv: read_u64(&root.join("voltage_mv")),
            clock_source: fs::read_to_string(root.join("clock_source"))
                .ok()
                .map(|s| s.trim_end().to_string())
                .filter(|s| !s.is_empty()),
        };

        if info.freq_mhz.is_none() && info.voltage_mv.is_none() && info.clock_source.is_none() {
            return None;
        }
        Some(info)
    }

    pub fn log_summary(&self) {
        match (self.freq_mhz, self.voltage_mv) {
            (Some(freq), Some(mv)) => log::info!("NPU clock: {} MHz @ {} mV", freq, mv),
            (Some(freq), None) => log::info!("NPU clock: {} MHz", freq),
            (None, Some(mv)) => log::info!("NPU voltage: {} mV", mv),
            (None, None) => {}
        }
        if let Some(source) = &self.clock_source {
            for line in source.lines() {
                log::debug!("  {}", line);
            }
        }
    }
}

fn read_u64(path: &Path) -> Option<u64> {
    fs::read_to_string(path).ok()?.trim().parse().ok()
}

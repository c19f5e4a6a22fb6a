//! 延迟统计

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// 一组计时样本（毫秒）的汇总
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyStats {
    pub samples: usize,
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
    pub fps: f64,
    pub p50_ms: f64,
    pub p99_ms: f64,
    /// 样本标准差，单个样本时为 0
    pub std_dev_ms: f64,
}

impl LatencyStats {
    /// 空样本返回 `None`
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let min_ms = Statistics::min(samples.iter());
        let max_ms = Statistics::max(samples.iter());
        // Running mean; clamp guards against last-ulp drift outside [min, max].
        let avg_ms = Statistics::mean(samples.iter()).clamp(min_ms, max_ms);
        let std_dev_ms = if samples.len() > 1 {
            Statistics::std_dev(samples.iter())
        } else {
            0.0
        };

        let mut ordered = Data::new(samples.to_vec());
        let p50_ms = ordered.percentile(50);
        let p99_ms = ordered.percentile(99);

        Some(Self {
            samples: samples.len(),
            min_ms,
            max_ms,
            avg_ms,
            fps: 1000.0 / avg_ms,
            p50_ms,
            p99_ms,
            std_dev_ms,
        })
    }
}

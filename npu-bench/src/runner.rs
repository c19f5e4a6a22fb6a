//! 基准测试执行器

use std::time::Instant;

use npu_runtime::{InferenceRuntime, InputTensor, NpuClockInfo, RuntimeGuard};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{BenchConfig, INPUT_SHAPE, WARMUP_RUNS};
use crate::error::BenchError;
use crate::report::BenchReport;
use crate::stats::LatencyStats;

/// 基准测试执行器
///
/// 运行顺序：load → init → 生成输入 → 预热 → 计时推理 → 统计 → 输出报告 → 释放。
/// 运行时句柄由 `RuntimeGuard` 持有，返回前一定会被释放。
pub struct BenchmarkRunner {
    config: BenchConfig,
}

impl BenchmarkRunner {
    pub fn new(config: BenchConfig) -> Self {
        Self { config }
    }

    /// 执行完整的基准测试，不输出报告
    pub fn run<R: InferenceRuntime + ?Sized>(
        &self,
        runtime: &mut R,
    ) -> Result<BenchReport, BenchError> {
        self.run_with(runtime, |_| Ok(()))
    }

    /// 执行完整的基准测试
    ///
    /// `emit` 在句柄释放之前被调用；它返回错误时句柄同样会被释放。
    pub fn run_with<R, F>(&self, runtime: &mut R, emit: F) -> Result<BenchReport, BenchError>
    where
        R: InferenceRuntime + ?Sized,
        F: FnOnce(&BenchReport) -> Result<(), BenchError>,
    {
        self.config.validate()?;

        let npu_clock = NpuClockInfo::read_from(&self.config.debugfs_root);
        if let Some(clock) = &npu_clock {
            clock.log_summary();
        }

        let mut runtime = RuntimeGuard::new(runtime);

        log::info!("Loading model {}", self.config.model_path.display());
        runtime
            .load(&self.config.model_path)
            .map_err(BenchError::load)?;

        runtime.init().map_err(BenchError::init)?;

        let input = self.generate_input();
        log::debug!(
            "Generated input tensor {} ({} bytes)",
            input.shape(),
            input.byte_len()
        );

        log::info!("Running {} warmup inference(s)", WARMUP_RUNS);
        for _ in 0..WARMUP_RUNS {
            runtime.infer(&input).map_err(BenchError::Inference)?;
        }

        log::info!("Running {} timed inference(s)", self.config.num_runs);
        let samples = time_inferences(&mut *runtime, &input, self.config.num_runs)?;

        let stats = LatencyStats::from_samples(&samples)
            .ok_or_else(|| BenchError::Config("no timing samples collected".to_string()))?;

        let report = BenchReport {
            model_path: self.config.model_path.clone(),
            num_runs: self.config.num_runs,
            warmup_runs: WARMUP_RUNS,
            stats,
            npu_clock,
            timestamp: chrono::Utc::now(),
        };
        emit(&report)?;

        runtime.release();
        Ok(report)
    }

    fn generate_input(&self) -> InputTensor {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        InputTensor::random(INPUT_SHAPE, &mut rng)
    }
}

/// 计时执行 `runs` 次推理，返回每次的耗时（毫秒）
pub fn time_inferences<R: InferenceRuntime + ?Sized>(
    runtime: &mut R,
    input: &InputTensor,
    runs: u32,
) -> Result<Vec<f64>, BenchError> {
    let mut samples = Vec::with_capacity(runs as usize);
    for i in 0..runs {
        let start = Instant::now();
        runtime.infer(input).map_err(BenchError::Inference)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::debug!("run {}/{}: {:.3} ms", i + 1, runs, elapsed_ms);
        samples.push(elapsed_ms);
    }
    Ok(samples)
}

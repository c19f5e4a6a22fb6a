//! 运行结果到进程输出的映射
//!
//! 报告与 `ERROR:` 行都写入同一个输出流（二进制中为 stdout），日志另走 stderr。

use std::io::Write;

use crate::config::ReportFormat;
use crate::error::BenchError;
use crate::report::BenchReport;

/// 按格式写出报告
pub fn emit_report<W: Write>(
    out: &mut W,
    report: &BenchReport,
    format: ReportFormat,
) -> Result<(), BenchError> {
    let rendered = report.render(format).map_err(std::io::Error::from)?;
    out.write_all(rendered.as_bytes())?;
    out.flush()?;
    Ok(())
}

/// 将运行结果转换为退出码
///
/// 成功时报告已由 `emit_report` 写出，返回 0；load/init 失败以及配置错误写出
/// 一行 `ERROR: ...` 并返回 1；推理与输出错误原样返回给调用方。
pub fn finish<W: Write>(
    result: Result<BenchReport, BenchError>,
    out: &mut W,
) -> Result<u8, BenchError> {
    match result {
        Ok(_) => Ok(0),
        Err(err) if err.is_setup_failure() || matches!(err, BenchError::Config(_)) => {
            writeln!(out, "ERROR: {}", err)?;
            out.flush()?;
            Ok(err.exit_code())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use npu_runtime::RuntimeError;

    use super::*;
    use crate::stats::LatencyStats;

    fn report() -> BenchReport {
        BenchReport {
            model_path: PathBuf::from("model.rknn"),
            num_runs: 2,
            warmup_runs: 5,
            stats: LatencyStats::from_samples(&[10.0, 30.0]).unwrap(),
            npu_clock: None,
            timestamp: chrono::Utc::now(),
        }
    }

    fn written(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_load_failure_prints_error_line_and_exits_one() {
        let mut out = Vec::new();
        let err = BenchError::load(RuntimeError::status("load_rknn", -1));
        let code = finish(Err(err), &mut out).unwrap();

        assert_eq!(code, 1);
        assert_eq!(written(out), "ERROR: load_rknn failed: -1 (execution failed)\n");
    }

    #[test]
    fn test_init_failure_prints_error_line_and_exits_one() {
        let mut out = Vec::new();
        let err = BenchError::init(RuntimeError::status("rknn_init", -10));
        let code = finish(Err(err), &mut out).unwrap();

        assert_eq!(code, 1);
        assert_eq!(written(out), "ERROR: init_runtime failed: -10 (device mismatch)\n");
    }

    #[test]
    fn test_config_error_prints_error_line() {
        let mut out = Vec::new();
        let err = BenchError::Config("num_runs must be at least 1".to_string());
        assert_eq!(finish(Err(err), &mut out).unwrap(), 1);
        assert!(written(out).starts_with("ERROR: configuration error: "));
    }

    #[test]
    fn test_inference_failure_is_returned_without_output() {
        let mut out = Vec::new();
        let err = BenchError::Inference(RuntimeError::status("rknn_run", -2));
        let returned = finish(Err(err), &mut out).unwrap_err();

        assert!(matches!(returned, BenchError::Inference(_)));
        assert!(out.is_empty());
    }

    #[test]
    fn test_success_exits_zero_and_adds_nothing() {
        let mut out = Vec::new();
        assert_eq!(finish(Ok(report()), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_emit_report_writes_text_format() {
        let mut out = Vec::new();
        emit_report(&mut out, &report(), ReportFormat::Text).unwrap();
        let text = written(out);

        assert!(text.starts_with("YOLOv5s 640x640 (2 runs):\n"));
        assert!(text.contains("  Avg:  20.0 ms\n"));
        assert!(text.ends_with("  FPS:  50.0\n"));
    }

    #[test]
    fn test_emit_report_writes_json() {
        let mut out = Vec::new();
        emit_report(&mut out, &report(), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["num_runs"], 2);
    }
}

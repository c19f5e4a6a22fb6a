//! 基准测试错误类型

use npu_runtime::{RknnStatus, RuntimeError};

/// 括号内的失败原因；状态码已在前面给出，只保留其描述
fn cause(source: &RuntimeError) -> String {
    match source {
        RuntimeError::Status { status, .. } => status.description().to_string(),
        other => other.to_string(),
    }
}

/// 基准测试结果中的失败分类
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("load_rknn failed: {code} ({})", cause(.source))]
    Load {
        code: RknnStatus,
        #[source]
        source: RuntimeError,
    },

    #[error("init_runtime failed: {code} ({})", cause(.source))]
    Init {
        code: RknnStatus,
        #[source]
        source: RuntimeError,
    },

    #[error("inference failed: {0}")]
    Inference(#[source] RuntimeError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl BenchError {
    pub fn load(source: RuntimeError) -> Self {
        Self::Load {
            code: source.status_code(),
            source,
        }
    }

    pub fn init(source: RuntimeError) -> Self {
        Self::Init {
            code: source.status_code(),
            source,
        }
    }

    /// 可识别的初始化失败（load / init）
    pub fn is_setup_failure(&self) -> bool {
        matches!(self, Self::Load { .. } | Self::Init { .. })
    }

    /// 进程退出码
    pub fn exit_code(&self) -> u8 {
        1
    }
}

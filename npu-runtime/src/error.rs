//! 运行时错误类型

use std::path::PathBuf;

use crate::status::RknnStatus;

/// NPU 运行时错误
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("{op} returned status {status} ({})", .status.description())]
    Status {
        op: &'static str,
        status: RknnStatus,
    },

    #[error("Runtime library unavailable: {0}")]
    LibraryUnavailable(String),

    #[error("Symbol not found in runtime library: {0}")]
    SymbolNotFound(String),

    #[error("Failed to read model {path}: {source}")]
    ModelIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Model file is empty: {0}")]
    EmptyModel(PathBuf),

    #[error("Invalid runtime state: {0}")]
    InvalidState(&'static str),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl RuntimeError {
    pub fn status(op: &'static str, raw: i32) -> Self {
        Self::Status {
            op,
            status: RknnStatus(raw),
        }
    }

    /// 错误对应的 RKNN 状态码，非 API 返回的错误映射到最接近的厂商码
    pub fn status_code(&self) -> RknnStatus {
        match self {
            Self::Status { status, .. } => *status,
            Self::LibraryUnavailable(_) | Self::SymbolNotFound(_) => {
                RknnStatus::ERR_DEVICE_UNAVAILABLE
            }
            Self::ModelIo { .. } => RknnStatus::ERR_FAIL,
            Self::EmptyModel(_) => RknnStatus::ERR_MODEL_INVALID,
            Self::InvalidState(_) => RknnStatus::ERR_CTX_INVALID,
            Self::InvalidInput(_) => RknnStatus::ERR_INPUT_INVALID,
        }
    }
}

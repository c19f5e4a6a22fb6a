//! RKNN 运行时状态码

use std::fmt;

use serde::{Deserialize, Serialize};

/// RKNN C API 返回的状态码
///
/// 0 表示成功，负值为错误。未知的值原样保留。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RknnStatus(pub i32);

impl RknnStatus {
    pub const SUCC: Self = Self(0);
    pub const ERR_FAIL: Self = Self(-1);
    pub const ERR_TIMEOUT: Self = Self(-2);
    pub const ERR_DEVICE_UNAVAILABLE: Self = Self(-3);
    pub const ERR_MALLOC_FAIL: Self = Self(-4);
    pub const ERR_PARAM_INVALID: Self = Self(-5);
    pub const ERR_MODEL_INVALID: Self = Self(-6);
    pub const ERR_CTX_INVALID: Self = Self(-7);
    pub const ERR_INPUT_INVALID: Self = Self(-8);
    pub const ERR_OUTPUT_INVALID: Self = Self(-9);
    pub const ERR_DEVICE_UNMATCH: Self = Self(-10);
    pub const ERR_INCOMPATIBLE_PRE_COMPILE_MODEL: Self = Self(-11);
    pub const ERR_INCOMPATIBLE_OPTIMIZATION_LEVEL_VERSION: Self = Self(-12);
    pub const ERR_TARGET_PLATFORM_UNMATCH: Self = Self(-13);

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self.0 == 0
    }

    /// 将原始返回值转换为 `Result`
    pub fn check(raw: i32) -> Result<(), Self> {
        let status = Self(raw);
        if status.is_success() {
            Ok(())
        } else {
            Err(status)
        }
    }

    /// 状态码的可读描述
    pub fn description(self) -> &'static str {
        match self.0 {
            0 => "success",
            -1 => "execution failed",
            -2 => "execution timeout",
            -3 => "device unavailable",
            -4 => "memory allocation failed",
            -5 => "invalid parameter",
            -6 => "invalid model",
            -7 => "invalid context",
            -8 => "invalid input",
            -9 => "invalid output",
            -10 => "device mismatch",
            -11 => "incompatible pre-compiled model",
            -12 => "incompatible optimization level version",
            -13 => "target platform mismatch",
            _ => "unknown status",
        }
    }
}

impl fmt::Display for RknnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for RknnStatus {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_success_and_failure() {
        assert!(RknnStatus::check(0).is_ok());
        assert_eq!(RknnStatus::check(-6), Err(RknnStatus::ERR_MODEL_INVALID));
    }

    #[test]
    fn test_description_covers_unknown_codes() {
        assert_eq!(RknnStatus::ERR_TIMEOUT.description(), "execution timeout");
        assert_eq!(RknnStatus(-99).description(), "unknown status");
        assert_eq!(RknnStatus(7).to_string(), "7");
    }
}

//! NPU 推理运行时
//!
//! 为基准测试提供统一的运行时接口：
//! - `RknnLite`: 通过 `librknnrt.so` 驱动 Rockchip NPU
//! - `MockRuntime`: 无硬件环境下的替身
//! - `RuntimeGuard`: 保证句柄在任何退出路径上只释放一次

use std::path::Path;

pub mod error;
pub mod ffi;
pub mod guard;
pub mod mock;
pub mod probe;
pub mod rknn;
pub mod status;
pub mod tensor;

pub use error::RuntimeError;
pub use guard::RuntimeGuard;
pub use mock::{EventLog, MockRuntime};
pub use probe::NpuClockInfo;
pub use rknn::{DEFAULT_RUNTIME_LIBRARY, RknnLite, SdkVersion};
pub use status::RknnStatus;
pub use tensor::{InputTensor, TensorShape};

/// 推理运行时 trait
pub trait InferenceRuntime {
    /// 加载模型文件
    fn load(&mut self, model_path: &Path) -> Result<(), RuntimeError>;

    /// 初始化运行时，必须在 `load` 之后调用
    fn init(&mut self) -> Result<(), RuntimeError>;

    /// 执行一次推理，输出被丢弃
    fn infer(&mut self, input: &InputTensor) -> Result<(), RuntimeError>;

    /// 释放运行时句柄
    fn release(&mut self);
}

//! RKNN Lite 运行时
//!
//! 通过 `librknnrt.so` 在 Rockchip NPU 上执行 `.rknn` 模型。
//! 模型在 `load` 阶段读入内存，在 `init` 阶段交给运行时创建上下文。

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use crate::InferenceRuntime;
use crate::error::RuntimeError;
use crate::ffi::{self, RknnApi, RknnContext};
use crate::status::RknnStatus;
use crate::tensor::InputTensor;

/// 默认运行时库名，交给动态链接器按常规路径搜索
pub const DEFAULT_RUNTIME_LIBRARY: &str = "librknnrt.so";

/// 运行时版本信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkVersion {
    pub api_version: String,
    pub driver_version: String,
}

/// 已初始化的上下文
struct Context {
    api: RknnApi,
    handle: RknnContext,
    n_input: u32,
    n_output: u32,
}

pub struct RknnLite {
    library: PathBuf,
    model: Option<Vec<u8>>,
    context: Option<Context>,
    sdk_version: Option<SdkVersion>,
}

impl RknnLite {
    pub fn new() -> Self {
        Self::with_library(DEFAULT_RUNTIME_LIBRARY)
    }

    pub fn with_library(library: impl Into<PathBuf>) -> Self {
        Self {
            library: library.into(),
            model: None,
            context: None,
            sdk_version: None,
        }
    }

    /// `init` 成功后查询到的 SDK 与驱动版本
    pub fn sdk_version(&self) -> Option<&SdkVersion> {
        self.sdk_version.as_ref()
    }

    /// 模型的输入、输出数量
    pub fn io_num(&self) -> Option<(u32, u32)> {
        self.context.as_ref().map(|ctx| (ctx.n_input, ctx.n_output))
    }

    fn query_io_num(
        api: &RknnApi,
        handle: RknnContext,
    ) -> Result<ffi::RknnInputOutputNum, RuntimeError> {
        let mut io_num = ffi::RknnInputOutputNum::default();
        // SAFETY: handle is a live context; io_num is sized as the query expects.
        let ret = unsafe {
            (api.rknn_query)(
                handle,
                ffi::RKNN_QUERY_IN_OUT_NUM,
                (&mut io_num as *mut ffi::RknnInputOutputNum).cast::<c_void>(),
                std::mem::size_of::<ffi::RknnInputOutputNum>() as u32,
            )
        };
        RknnStatus::check(ret).map_err(|status| RuntimeError::Status {
            op: "rknn_query(IN_OUT_NUM)",
            status,
        })?;
        Ok(io_num)
    }

    fn query_sdk_version(api: &RknnApi, handle: RknnContext) -> Option<SdkVersion> {
        let mut version = ffi::RknnSdkVersion::default();
        // SAFETY: as above, the buffer matches rknn_sdk_version.
        let ret = unsafe {
            (api.rknn_query)(
                handle,
                ffi::RKNN_QUERY_SDK_VERSION,
                (&mut version as *mut ffi::RknnSdkVersion).cast::<c_void>(),
                std::mem::size_of::<ffi::RknnSdkVersion>() as u32,
            )
        };
        if ret != 0 {
            log::warn!("rknn_query(SDK_VERSION) returned {}", ret);
            return None;
        }
        Some(SdkVersion {
            api_version: ffi::fixed_c_str(&version.api_version),
            driver_version: ffi::fixed_c_str(&version.drv_version),
        })
    }
}

impl Default for RknnLite {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceRuntime for RknnLite {
    fn load(&mut self, model_path: &Path) -> Result<(), RuntimeError> {
        let data = std::fs::read(model_path).map_err(|source| RuntimeError::ModelIo {
            path: model_path.to_path_buf(),
            source,
        })?;
        if data.is_empty() {
            return Err(RuntimeError::EmptyModel(model_path.to_path_buf()));
        }
        log::info!("Loaded model {} ({} bytes)", model_path.display(), data.len());
        self.model = Some(data);
        Ok(())
    }

    fn init(&mut self) -> Result<(), RuntimeError> {
        if self.context.is_some() {
            return Err(RuntimeError::InvalidState("runtime already initialised"));
        }
        let model = self
            .model
            .as_mut()
            .ok_or(RuntimeError::InvalidState("init called before load"))?;
        let size = u32::try_from(model.len())
            .map_err(|_| RuntimeError::InvalidInput("model larger than 4 GiB".to_string()))?;

        let api = RknnApi::load(&self.library)?;

        let mut handle: RknnContext = 0;
        // SAFETY: model outlives the call; rknn_init copies what it needs.
        let ret = unsafe {
            (api.rknn_init)(
                &mut handle,
                model.as_mut_ptr().cast::<c_void>(),
                size,
                0,
                std::ptr::null_mut(),
            )
        };
        RknnStatus::check(ret).map_err(|status| RuntimeError::Status {
            op: "rknn_init",
            status,
        })?;

        let io_num = match Self::query_io_num(&api, handle) {
            Ok(io_num) => io_num,
            Err(e) => {
                // SAFETY: handle was created above and is not used again.
                unsafe { (api.rknn_destroy)(handle) };
                return Err(e);
            }
        };
        log::info!(
            "RKNN context created: {} input(s), {} output(s)",
            io_num.n_input,
            io_num.n_output
        );

        self.sdk_version = Self::query_sdk_version(&api, handle);
        if let Some(version) = &self.sdk_version {
            log::info!(
                "RKNN API version {}, driver version {}",
                version.api_version,
                version.driver_version
            );
        }

        self.context = Some(Context {
            api,
            handle,
            n_input: io_num.n_input,
            n_output: io_num.n_output,
        });
        Ok(())
    }

    fn infer(&mut self, input: &InputTensor) -> Result<(), RuntimeError> {
        let ctx = self
            .context
            .as_ref()
            .ok_or(RuntimeError::InvalidState("infer called before init"))?;
        let size = u32::try_from(input.byte_len())
            .map_err(|_| RuntimeError::InvalidInput("input larger than 4 GiB".to_string()))?;

        let mut inputs = [ffi::RknnInput {
            index: 0,
            // The runtime only reads the buffer when pass_through is 0.
            buf: input.as_bytes().as_ptr().cast_mut().cast::<c_void>(),
            size,
            pass_through: 0,
            tensor_type: ffi::RKNN_TENSOR_UINT8,
            fmt: ffi::RKNN_TENSOR_NHWC,
        }];

        // SAFETY: inputs point into `input`, which outlives the call.
        let ret = unsafe { (ctx.api.rknn_inputs_set)(ctx.handle, 1, inputs.as_mut_ptr()) };
        RknnStatus::check(ret).map_err(|status| RuntimeError::Status {
            op: "rknn_inputs_set",
            status,
        })?;

        // SAFETY: live context, null extend is permitted.
        let ret = unsafe { (ctx.api.rknn_run)(ctx.handle, std::ptr::null_mut()) };
        RknnStatus::check(ret).map_err(|status| RuntimeError::Status {
            op: "rknn_run",
            status,
        })?;

        let mut outputs: Vec<ffi::RknnOutput> = (0..ctx.n_output)
            .map(|index| ffi::RknnOutput {
                want_float: 1,
                is_prealloc: 0,
                index,
                buf: std::ptr::null_mut(),
                size: 0,
            })
            .collect();

        // SAFETY: outputs has exactly n_output entries.
        let ret = unsafe {
            (ctx.api.rknn_outputs_get)(
                ctx.handle,
                ctx.n_output,
                outputs.as_mut_ptr(),
                std::ptr::null_mut(),
            )
        };
        RknnStatus::check(ret).map_err(|status| RuntimeError::Status {
            op: "rknn_outputs_get",
            status,
        })?;

        // Output contents are discarded; hand the runtime-owned buffers back.
        // SAFETY: buffers were filled by rknn_outputs_get on this context.
        let ret = unsafe {
            (ctx.api.rknn_outputs_release)(ctx.handle, ctx.n_output, outputs.as_mut_ptr())
        };
        RknnStatus::check(ret).map_err(|status| RuntimeError::Status {
            op: "rknn_outputs_release",
            status,
        })
    }

    fn release(&mut self) {
        if let Some(ctx) = self.context.take() {
            // SAFETY: the context is removed from self before destruction.
            let ret = unsafe { (ctx.api.rknn_destroy)(ctx.handle) };
            if ret != 0 {
                log::warn!("rknn_destroy returned {}", ret);
            }
        }
        self.model = None;
    }
}

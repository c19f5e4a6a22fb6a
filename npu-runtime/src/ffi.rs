//! 通过 dlopen 在运行时加载 `librknnrt.so` 的函数指针
//!
//! 只绑定基准测试用到的 RKNN C API 子集，结构体布局与 rknpu2 的
//! `rknn_api.h` 保持一致。

use std::ffi::{c_char, c_int, c_void};
use std::path::Path;

use libloading::Library;

use crate::error::RuntimeError;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[cfg(all(target_arch = "arm", not(target_arch = "aarch64")))]
pub type RknnContext = u32;
#[cfg(not(all(target_arch = "arm", not(target_arch = "aarch64"))))]
pub type RknnContext = u64;

pub const RKNN_QUERY_IN_OUT_NUM: c_int = 0;
pub const RKNN_QUERY_SDK_VERSION: c_int = 5;

pub const RKNN_TENSOR_UINT8: c_int = 3;
pub const RKNN_TENSOR_NHWC: c_int = 1;

pub const RKNN_MAX_NAME_LEN: usize = 256;

#[repr(C)]
#[derive(Debug, Default, Clone, Copy)]
pub struct RknnInputOutputNum {
    pub n_input: u32,
    pub n_output: u32,
}

#[repr(C)]
pub struct RknnSdkVersion {
    pub api_version: [c_char; RKNN_MAX_NAME_LEN],
    pub drv_version: [c_char; RKNN_MAX_NAME_LEN],
}

impl Default for RknnSdkVersion {
    fn default() -> Self {
        Self {
            api_version: [0; RKNN_MAX_NAME_LEN],
            drv_version: [0; RKNN_MAX_NAME_LEN],
        }
    }
}

#[repr(C)]
pub struct RknnInput {
    pub index: u32,
    pub buf: *mut c_void,
    pub size: u32,
    pub pass_through: u8,
    pub tensor_type: c_int,
    pub fmt: c_int,
}

#[repr(C)]
pub struct RknnOutput {
    pub want_float: u8,
    pub is_prealloc: u8,
    pub index: u32,
    pub buf: *mut c_void,
    pub size: u32,
}

// ---------------------------------------------------------------------------
// Function signatures
// ---------------------------------------------------------------------------

type FnRknnInit = unsafe extern "C" fn(
    *mut RknnContext,
    *mut c_void, // model data
    u32,         // size
    u32,         // flag
    *mut c_void, // rknn_init_extend (null)
) -> c_int;
type FnRknnDestroy = unsafe extern "C" fn(RknnContext) -> c_int;
type FnRknnQuery = unsafe extern "C" fn(RknnContext, c_int, *mut c_void, u32) -> c_int;
type FnRknnInputsSet = unsafe extern "C" fn(RknnContext, u32, *mut RknnInput) -> c_int;
type FnRknnRun = unsafe extern "C" fn(RknnContext, *mut c_void) -> c_int;
type FnRknnOutputsGet = unsafe extern "C" fn(
    RknnContext,
    u32,
    *mut RknnOutput,
    *mut c_void, // rknn_output_extend (null)
) -> c_int;
type FnRknnOutputsRelease = unsafe extern "C" fn(RknnContext, u32, *mut RknnOutput) -> c_int;

/// 已加载的 RKNN API
pub struct RknnApi {
    _lib: Library,
    pub rknn_init: FnRknnInit,
    pub rknn_destroy: FnRknnDestroy,
    pub rknn_query: FnRknnQuery,
    pub rknn_inputs_set: FnRknnInputsSet,
    pub rknn_run: FnRknnRun,
    pub rknn_outputs_get: FnRknnOutputsGet,
    pub rknn_outputs_release: FnRknnOutputsRelease,
}

impl RknnApi {
    /// 打开运行时库并解析所需符号
    pub fn load(library: &Path) -> Result<Self, RuntimeError> {
        // SAFETY: librknnrt has no load-time initialisers with preconditions.
        // libloading's error text already names the path.
        let lib = unsafe { Library::new(library) }
            .map_err(|e| RuntimeError::LibraryUnavailable(e.to_string()))?;

        // SAFETY: every signature above matches the declaration in rknn_api.h.
        unsafe {
            let rknn_init = *symbol::<FnRknnInit>(&lib, b"rknn_init\0")?;
            let rknn_destroy = *symbol::<FnRknnDestroy>(&lib, b"rknn_destroy\0")?;
            let rknn_query = *symbol::<FnRknnQuery>(&lib, b"rknn_query\0")?;
            let rknn_inputs_set = *symbol::<FnRknnInputsSet>(&lib, b"rknn_inputs_set\0")?;
            let rknn_run = *symbol::<FnRknnRun>(&lib, b"rknn_run\0")?;
            let rknn_outputs_get = *symbol::<FnRknnOutputsGet>(&lib, b"rknn_outputs_get\0")?;
            let rknn_outputs_release =
                *symbol::<FnRknnOutputsRelease>(&lib, b"rknn_outputs_release\0")?;

            Ok(Self {
                _lib: lib,
                rknn_init,
                rknn_destroy,
                rknn_query,
                rknn_inputs_set,
                rknn_run,
                rknn_outputs_get,
                rknn_outputs_release,
            })
        }
    }
}

unsafe fn symbol<'lib, T>(
    lib: &'lib Library,
    name: &[u8],
) -> Result<libloading::Symbol<'lib, T>, RuntimeError> {
    // SAFETY: caller guarantees `T` matches the exported symbol's type.
    unsafe { lib.get::<T>(name) }.map_err(|_| {
        let printable = String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name));
        RuntimeError::SymbolNotFound(printable.into_owned())
    })
}

/// 将以 NUL 结尾的定长字符数组转换为字符串
pub fn fixed_c_str(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

//! Mock 运行时
//!
//! 不依赖 NPU 硬件，按配置返回状态码并记录每个调用的次数。

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crate::InferenceRuntime;
use crate::error::RuntimeError;
use crate::tensor::InputTensor;

/// 调用方与 mock 共享的事件序列
pub type EventLog = Rc<RefCell<Vec<&'static str>>>;

#[derive(Debug, Default)]
pub struct MockRuntime {
    load_status: i32,
    init_status: i32,
    infer_status: i32,
    latency: Option<Duration>,

    loaded_model: Option<PathBuf>,
    initialised: bool,
    load_calls: usize,
    init_calls: usize,
    infer_calls: usize,
    release_calls: usize,
    last_input_len: Option<usize>,
    events: Option<EventLog>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_load_status(mut self, status: i32) -> Self {
        self.load_status = status;
        self
    }

    pub fn with_init_status(mut self, status: i32) -> Self {
        self.init_status = status;
        self
    }

    /// 从第一次推理起返回的状态码
    pub fn with_infer_status(mut self, status: i32) -> Self {
        self.infer_status = status;
        self
    }

    /// 每次推理模拟的耗时
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// 把 load/init/infer/release 依次记入 `log`
    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.events = Some(log);
        self
    }

    fn record(&self, event: &'static str) {
        if let Some(events) = &self.events {
            events.borrow_mut().push(event);
        }
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls
    }

    pub fn init_calls(&self) -> usize {
        self.init_calls
    }

    pub fn infer_calls(&self) -> usize {
        self.infer_calls
    }

    pub fn release_calls(&self) -> usize {
        self.release_calls
    }

    pub fn loaded_model(&self) -> Option<&Path> {
        self.loaded_model.as_deref()
    }

    pub fn last_input_len(&self) -> Option<usize> {
        self.last_input_len
    }
}

impl InferenceRuntime for MockRuntime {
    fn load(&mut self, model_path: &Path) -> Result<(), RuntimeError> {
        self.load_calls += 1;
        self.record("load");
        if self.load_status != 0 {
            return Err(RuntimeError::status("load_rknn", self.load_status));
        }
        self.loaded_model = Some(model_path.to_path_buf());
        Ok(())
    }

    fn init(&mut self) -> Result<(), RuntimeError> {
        self.init_calls += 1;
        self.record("init");
        if self.loaded_model.is_none() {
            return Err(RuntimeError::InvalidState("init called before load"));
        }
        if self.init_status != 0 {
            return Err(RuntimeError::status("init_runtime", self.init_status));
        }
        self.initialised = true;
        Ok(())
    }

    fn infer(&mut self, input: &InputTensor) -> Result<(), RuntimeError> {
        self.infer_calls += 1;
        self.record("infer");
        if !self.initialised {
            return Err(RuntimeError::InvalidState("infer called before init"));
        }
        if self.infer_status != 0 {
            return Err(RuntimeError::status("inference", self.infer_status));
        }
        self.last_input_len = Some(input.byte_len());
        if let Some(latency) = self.latency {
            std::thread::sleep(latency);
        }
        Ok(())
    }

    fn release(&mut self) {
        self.release_calls += 1;
        self.record("release");
        self.initialised = false;
        self.loaded_model = None;
    }
}

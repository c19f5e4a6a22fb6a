//! 运行时句柄的作用域释放

use std::ops::{Deref, DerefMut};

use crate::InferenceRuntime;

/// 持有运行时的可变借用，在离开作用域时调用一次 `release`
///
/// 一旦句柄存在，不论后续的 init 或推理在哪一步失败，释放都会执行。
pub struct RuntimeGuard<'a, R: InferenceRuntime + ?Sized> {
    runtime: &'a mut R,
    released: bool,
}

impl<'a, R: InferenceRuntime + ?Sized> RuntimeGuard<'a, R> {
    pub fn new(runtime: &'a mut R) -> Self {
        Self {
            runtime,
            released: false,
        }
    }

    /// 提前释放；drop 时不会再次调用
    pub fn release(mut self) {
        self.release_once();
    }

    fn release_once(&mut self) {
        if !self.released {
            self.released = true;
            self.runtime.release();
            log::debug!("Runtime handle released");
        }
    }
}

impl<R: InferenceRuntime + ?Sized> Deref for RuntimeGuard<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.runtime
    }
}

impl<R: InferenceRuntime + ?Sized> DerefMut for RuntimeGuard<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.runtime
    }
}

impl<R: InferenceRuntime + ?Sized> Drop for RuntimeGuard<'_, R> {
    fn drop(&mut self) {
        self.release_once();
    }
}

//! 推理输入张量

use rand::Rng;
use rand::distributions::Uniform;
use serde::{Deserialize, Serialize};

use crate::error::RuntimeError;

/// NHWC 张量形状
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorShape {
    pub batch: usize,
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl TensorShape {
    pub const fn nhwc(batch: usize, height: usize, width: usize, channels: usize) -> Self {
        Self {
            batch,
            height,
            width,
            channels,
        }
    }

    /// 元素总数
    pub fn len(&self) -> usize {
        self.batch * self.height * self.width * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dims(&self) -> [usize; 4] {
        [self.batch, self.height, self.width, self.channels]
    }
}

impl std::fmt::Display for TensorShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.batch, self.height, self.width, self.channels
        )
    }
}

/// u8 输入张量，整个基准测试期间复用同一份数据
#[derive(Debug, Clone)]
pub struct InputTensor {
    shape: TensorShape,
    data: Vec<u8>,
}

impl InputTensor {
    /// 用 [0, 255) 均匀分布的随机值填充
    pub fn random<R: Rng + ?Sized>(shape: TensorShape, rng: &mut R) -> Self {
        let dist = Uniform::new(0u8, 255);
        let data = (0..shape.len()).map(|_| rng.sample(dist)).collect();
        Self { shape, data }
    }

    pub fn from_vec(shape: TensorShape, data: Vec<u8>) -> Result<Self, RuntimeError> {
        if data.len() != shape.len() {
            return Err(RuntimeError::InvalidInput(format!(
                "shape {} needs {} bytes, got {}",
                shape,
                shape.len(),
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    pub fn shape(&self) -> TensorShape {
        self.shape
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn byte_len(&self) -> usize {
        self.data.len()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_random_tensor_shape_and_range() {
        let shape = TensorShape::nhwc(1, 64, 64, 3);
        let mut rng = StdRng::seed_from_u64(7);
        let tensor = InputTensor::random(shape, &mut rng);

        assert_eq!(tensor.byte_len(), 64 * 64 * 3);
        assert_eq!(tensor.shape().dims(), [1, 64, 64, 3]);
        assert!(tensor.as_bytes().iter().all(|&v| v < 255));
    }

    #[test]
    fn test_random_tensor_is_reproducible_with_seed() {
        let shape = TensorShape::nhwc(1, 8, 8, 3);
        let a = InputTensor::random(shape, &mut StdRng::seed_from_u64(42));
        let b = InputTensor::random(shape, &mut StdRng::seed_from_u64(42));
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let shape = TensorShape::nhwc(1, 2, 2, 3);
        assert!(InputTensor::from_vec(shape, vec![0; 12]).is_ok());
        let err = InputTensor::from_vec(shape, vec![0; 5]).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidInput(_)));
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(TensorShape::nhwc(1, 640, 640, 3).to_string(), "(1, 640, 640, 3)");
    }
}

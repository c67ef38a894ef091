//! Stem
//!
//! The initial convolution, normalisation and optional max-pool applied to raw images.
use crate::config::Validate;
use crate::constants::STEM_CHANNELS;
use crate::errors::CalibError;
use burn::module::Module;
use burn::nn::conv::{Conv2d, Conv2dConfig};
use burn::nn::pool::{MaxPool2d, MaxPool2dConfig};
use burn::nn::{BatchNorm, BatchNormConfig, Initializer, PaddingConfig2d, Relu};
use burn::tensor::{backend::Backend, Tensor};
use serde::{Deserialize, Serialize};

/// Kaiming-normal, fan-out mode, ReLU gain.
pub(crate) fn conv_initializer() -> Initializer {
    Initializer::KaimingNormal {
        gain: std::f64::consts::SQRT_2,
        fan_out_only: true,
    }
}

/// Shape of the stem.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct StemConfig {
    /// Square kernel of the first convolution.
    pub kernel_size: usize,
    /// Stride of the first convolution.
    pub stride: usize,
    /// Zero padding on every side of the first convolution.
    pub padding: usize,
    /// Whether a 3x3 stride-2 max-pool follows; `false` makes that stage a pass-through.
    pub max_pool: bool,
}

impl StemConfig {
    /// 3x3 stride 1 convolution, no max-pool. Keeps the full resolution of 32x32 inputs.
    pub fn cifar() -> Self {
        StemConfig {
            kernel_size: 3,
            stride: 1,
            padding: 1,
            max_pool: false,
        }
    }

    /// The standard large-image stem: 7x7 stride 2 convolution then max-pool.
    pub fn imagenet() -> Self {
        StemConfig {
            kernel_size: 7,
            stride: 2,
            padding: 3,
            max_pool: true,
        }
    }

    /// Spatial size of the stem output for a square input of side `size`.
    ///
    /// `None` when the kernel does not fit the padded input, or the stride is zero.
    pub fn output_size(&self, size: usize) -> Option<usize> {
        let conv = (size + 2 * self.padding)
            .checked_sub(self.kernel_size)?
            .checked_div(self.stride)?
            + 1;
        if self.max_pool {
            Some((conv - 1) / 2 + 1)
        } else {
            Some(conv)
        }
    }

    /// Smallest input side the first convolution accepts.
    pub fn min_input_size(&self) -> usize {
        self.kernel_size.saturating_sub(2 * self.padding)
    }

    pub fn init<B: Backend>(&self, in_channels: usize, device: &B::Device) -> Stem<B> {
        let conv = Conv2dConfig::new([in_channels, STEM_CHANNELS], [self.kernel_size, self.kernel_size])
            .with_stride([self.stride, self.stride])
            .with_padding(PaddingConfig2d::Explicit(self.padding, self.padding))
            .with_bias(false)
            .with_initializer(conv_initializer())
            .init(device);
        let pool = self.max_pool.then(|| {
            MaxPool2dConfig::new([3, 3])
                .with_strides([2, 2])
                .with_padding(PaddingConfig2d::Explicit(1, 1))
                .init()
        });
        Stem {
            conv,
            norm: BatchNormConfig::new(STEM_CHANNELS).init(device),
            activation: Relu::new(),
            pool,
        }
    }
}

impl Validate for StemConfig {
    fn validate(&self) -> Result<(), CalibError> {
        if self.kernel_size == 0 || self.stride == 0 {
            return Err(CalibError::InvalidParameter(
                "stem".to_string(),
                "positive kernel_size and stride".to_string(),
                format!("kernel_size={}, stride={}", self.kernel_size, self.stride),
            ));
        }
        Ok(())
    }
}

#[derive(Module, Debug)]
pub struct Stem<B: Backend> {
    conv: Conv2d<B>,
    norm: BatchNorm<B, 2>,
    activation: Relu,
    pool: Option<MaxPool2d>,
}

impl<B: Backend> Stem<B> {
    pub fn forward(&self, input: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(input);
        let x = self.norm.forward(x);
        let x = self.activation.forward(x);
        match &self.pool {
            Some(pool) => pool.forward(x),
            None => x,
        }
    }

    pub fn conv(&self) -> &Conv2d<B> {
        &self.conv
    }

    pub fn has_pool(&self) -> bool {
        self.pool.is_some()
    }
}

//! ResNet
//!
//! Residual classifier backbones and the CIFAR-style factory functions.
//!
//! The factories swap the standard 7x7 stride-2 stem for a 3x3 stride-1 convolution and turn
//! the stem max-pool into a pass-through, so 32x32 inputs reach the first residual stage at
//! full resolution. Weights are randomly initialised.
use crate::constants::{STAGE_CHANNELS, STEM_CHANNELS};
use crate::models::block::{make_stage, BasicBlock};
use crate::models::config::{BackboneConfig, ResNetVariant};
use crate::models::stem::Stem;
use burn::module::Module;
use burn::nn::conv::Conv2d;
use burn::nn::pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig};
use burn::nn::{Linear, LinearConfig};
use burn::tensor::{backend::Backend, Tensor};
use log::debug;

#[derive(Module, Debug)]
pub struct ResNet<B: Backend> {
    stem: Stem<B>,
    layer1: Vec<BasicBlock<B>>,
    layer2: Vec<BasicBlock<B>>,
    layer3: Vec<BasicBlock<B>>,
    layer4: Vec<BasicBlock<B>>,
    avgpool: AdaptiveAvgPool2d,
    fc: Linear<B>,
}

impl<B: Backend> ResNet<B> {
    pub fn new(config: &BackboneConfig, device: &B::Device) -> Self {
        let [b1, b2, b3, b4] = config.variant.blocks();
        let [c1, c2, c3, c4] = STAGE_CHANNELS;
        let model = ResNet {
            stem: config.stem.init(config.in_channels, device),
            layer1: make_stage(STEM_CHANNELS, c1, b1, 1, device),
            layer2: make_stage(c1, c2, b2, 2, device),
            layer3: make_stage(c2, c3, b3, 2, device),
            layer4: make_stage(c3, c4, b4, 2, device),
            avgpool: AdaptiveAvgPool2dConfig::new([1, 1]).init(),
            fc: LinearConfig::new(c4, config.num_classes).init(device),
        };
        debug!(
            "Built {:?} ResNet-{} with {} classes and {} parameters.",
            config.variant,
            config.variant.depth(),
            config.num_classes,
            model.num_params()
        );
        model
    }

    /// Images `[batch, channels, height, width]` to logits `[batch, num_classes]`.
    pub fn forward(&self, images: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.forward_features(images);
        let x = self.avgpool.forward(x);
        self.fc.forward(x.flatten::<2>(1, 3))
    }

    /// Feature map after the last residual stage.
    pub fn forward_features(&self, images: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.forward_stem(images);
        [&self.layer1, &self.layer2, &self.layer3, &self.layer4]
            .into_iter()
            .flatten()
            .fold(x, |x, block| block.forward(x))
    }

    pub fn forward_stem(&self, images: Tensor<B, 4>) -> Tensor<B, 4> {
        self.stem.forward(images)
    }

    pub fn first_conv(&self) -> &Conv2d<B> {
        self.stem.conv()
    }

    /// `false` when the stem downsampling stage is a pass-through.
    pub fn has_stem_pool(&self) -> bool {
        self.stem.has_pool()
    }

    pub fn num_classes(&self) -> usize {
        self.fc.weight.val().dims()[1]
    }

    /// Basic blocks per stage.
    pub fn stage_blocks(&self) -> [usize; 4] {
        [self.layer1.len(), self.layer2.len(), self.layer3.len(), self.layer4.len()]
    }
}

/// CIFAR-style ResNet-18. The usual class count is [`crate::constants::DEFAULT_NUM_CLASSES`].
pub fn build_shallow_classifier<B: Backend>(num_classes: usize, device: &B::Device) -> ResNet<B> {
    BackboneConfig::new(ResNetVariant::Shallow)
        .set_num_classes(num_classes)
        .init(device)
}

/// CIFAR-style ResNet-34. The usual class count is [`crate::constants::DEFAULT_NUM_CLASSES`].
pub fn build_deep_classifier<B: Backend>(num_classes: usize, device: &B::Device) -> ResNet<B> {
    BackboneConfig::new(ResNetVariant::Deep)
        .set_num_classes(num_classes)
        .init(device)
}

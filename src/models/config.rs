//! Backbone Configuration
//!
//! Variant selection and the serializable description of a classifier backbone.
use crate::config::{ConfigIO, Validate};
use crate::constants::{DEEP_BLOCKS, DEFAULT_IN_CHANNELS, DEFAULT_NUM_CLASSES, SHALLOW_BLOCKS, STAGE_CHANNELS};
use crate::errors::CalibError;
use crate::models::resnet::ResNet;
use crate::models::stem::StemConfig;
use crate::utils::items_to_strings;
use burn::tensor::backend::Backend;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Residual network depth.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ResNetVariant {
    /// 18 layers, two basic blocks per stage.
    #[default]
    Shallow,
    /// 34 layers, `[3, 4, 6, 3]` basic blocks per stage.
    Deep,
}

impl ResNetVariant {
    /// Number of basic blocks in each of the four stages.
    pub fn blocks(&self) -> [usize; 4] {
        match self {
            ResNetVariant::Shallow => SHALLOW_BLOCKS,
            ResNetVariant::Deep => DEEP_BLOCKS,
        }
    }

    /// Total weighted layers: two convs per block, plus the stem and the head.
    pub fn depth(&self) -> usize {
        self.blocks().iter().sum::<usize>() * 2 + 2
    }
}

impl FromStr for ResNetVariant {
    type Err = CalibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shallow" | "resnet18" => Ok(ResNetVariant::Shallow),
            "deep" | "resnet34" => Ok(ResNetVariant::Deep),
            _ => Err(CalibError::ParseString(
                s.to_string(),
                "ResNetVariant".to_string(),
                items_to_strings(&["shallow", "resnet18", "deep", "resnet34"]),
            )),
        }
    }
}

fn default_num_classes() -> usize {
    DEFAULT_NUM_CLASSES
}
fn default_in_channels() -> usize {
    DEFAULT_IN_CHANNELS
}

/// Configuration for a [`ResNet`] classifier.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
pub struct BackboneConfig {
    /// Network depth.
    #[serde(default)]
    pub variant: ResNetVariant,
    /// Number of outputs of the classification head.
    #[serde(default = "default_num_classes")]
    pub num_classes: usize,
    /// Channels of the input images.
    #[serde(default = "default_in_channels")]
    pub in_channels: usize,
    /// Initial layers applied before the residual stages.
    #[serde(default = "StemConfig::cifar")]
    pub stem: StemConfig,
}

impl Default for BackboneConfig {
    fn default() -> Self {
        BackboneConfig::new(ResNetVariant::Shallow)
    }
}

impl BackboneConfig {
    /// CIFAR-style backbone with the default class count.
    pub fn new(variant: ResNetVariant) -> Self {
        BackboneConfig {
            variant,
            num_classes: DEFAULT_NUM_CLASSES,
            in_channels: DEFAULT_IN_CHANNELS,
            stem: StemConfig::cifar(),
        }
    }

    /// Set the number of classes.
    /// * `num_classes` - Outputs of the final linear layer.
    pub fn set_num_classes(mut self, num_classes: usize) -> Self {
        self.num_classes = num_classes;
        self
    }

    /// Set the number of input channels.
    pub fn set_in_channels(mut self, in_channels: usize) -> Self {
        self.in_channels = in_channels;
        self
    }

    /// Set the stem.
    pub fn set_stem(mut self, stem: StemConfig) -> Self {
        self.stem = stem;
        self
    }

    /// Side of the final feature map for square images of side `image_size`.
    ///
    /// The stem is applied first, then every stage after the first halves the resolution.
    pub fn feature_size(&self, image_size: usize) -> Result<usize, CalibError> {
        let stem_size = self.stem.output_size(image_size).ok_or_else(|| {
            CalibError::InvalidParameter(
                "image_size".to_string(),
                format!("an integer greater or equal to {}", self.stem.min_input_size().max(1)),
                image_size.to_string(),
            )
        })?;
        Ok((1..STAGE_CHANNELS.len()).fold(stem_size, |size, _| (size - 1) / 2 + 1))
    }

    /// Allocate a randomly initialised model on `device`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> ResNet<B> {
        ResNet::new(self, device)
    }
}

impl Validate for BackboneConfig {
    fn validate(&self) -> Result<(), CalibError> {
        if self.num_classes == 0 {
            return Err(CalibError::InvalidParameter(
                "num_classes".to_string(),
                "a positive integer".to_string(),
                self.num_classes.to_string(),
            ));
        }
        if self.in_channels == 0 {
            return Err(CalibError::InvalidParameter(
                "in_channels".to_string(),
                "a positive integer".to_string(),
                self.in_channels.to_string(),
            ));
        }
        self.stem.validate()
    }
}

impl ConfigIO for BackboneConfig {}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_variant_blocks() {
        assert_eq!(ResNetVariant::Shallow.blocks(), [2, 2, 2, 2]);
        assert_eq!(ResNetVariant::Deep.blocks(), [3, 4, 6, 3]);
        assert_eq!(ResNetVariant::Shallow.depth(), 18);
        assert_eq!(ResNetVariant::Deep.depth(), 34);
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("shallow".parse::<ResNetVariant>().unwrap(), ResNetVariant::Shallow);
        assert_eq!("ResNet34".parse::<ResNetVariant>().unwrap(), ResNetVariant::Deep);
        let err = "resnet50".parse::<ResNetVariant>().unwrap_err();
        assert!(err.to_string().contains("resnet50"));
    }

    #[test]
    fn test_backbone_config_default() {
        let config = BackboneConfig::default();
        assert_eq!(config.variant, ResNetVariant::Shallow);
        assert_eq!(config.num_classes, 100);
        assert_eq!(config.in_channels, 3);
        assert_eq!(config.stem, StemConfig::cifar());
    }

    #[test]
    fn test_feature_size() {
        let config = BackboneConfig::default();
        assert_eq!(config.feature_size(32).unwrap(), 4);
        assert_eq!(config.feature_size(1).unwrap(), 1);
        let imagenet = config.set_stem(StemConfig::imagenet());
        assert_eq!(imagenet.feature_size(224).unwrap(), 7);
        assert_eq!(imagenet.feature_size(32).unwrap(), 1);
    }

    #[test]
    fn test_feature_size_rejects_small_images() {
        let config = BackboneConfig::default().set_stem(StemConfig {
            kernel_size: 5,
            stride: 1,
            padding: 0,
            max_pool: false,
        });
        let err = config.feature_size(3).unwrap_err();
        assert!(matches!(err, CalibError::InvalidParameter(..)));
        assert!(err.to_string().contains("5"));
        assert_eq!(config.feature_size(5).unwrap(), 1);
    }

    #[test]
    fn test_backbone_config_io() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("backbone.json");
        let config = BackboneConfig::new(ResNetVariant::Deep).set_num_classes(10);
        config.save_config(&file_path).unwrap();
        let config2 = BackboneConfig::load_config(&file_path).unwrap();
        assert_eq!(config, config2);
    }

    #[test]
    fn test_backbone_config_partial_json() {
        let config = BackboneConfig::from_json(r#"{"variant": "Deep"}"#).unwrap();
        assert_eq!(config.variant, ResNetVariant::Deep);
        assert_eq!(config.num_classes, 100);
        assert_eq!(config.stem, StemConfig::cifar());
    }

    #[test]
    fn test_backbone_config_rejects_zero_classes() {
        assert!(matches!(
            BackboneConfig::from_json(r#"{"num_classes": 0}"#),
            Err(CalibError::InvalidParameter(..))
        ));
    }
}

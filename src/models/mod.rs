//! Models
//!
//! CIFAR-style residual classifiers built with `burn`, generic over the tensor backend.
//!
//! * `config`: variant selection and the serializable backbone description.
//! * `stem`: the initial convolution and the optional max-pool.
//! * `block`: residual basic blocks and stage construction.
//! * `resnet`: the full classifier and the `build_*_classifier` factories.
pub mod block;
pub mod config;
pub mod resnet;
pub mod stem;

pub use config::{BackboneConfig, ResNetVariant};
pub use resnet::{build_deep_classifier, build_shallow_classifier, ResNet};
pub use stem::StemConfig;

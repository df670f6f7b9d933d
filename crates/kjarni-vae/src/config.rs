//! Declarative encoder configuration.
//!
//! Encoders are selected by a `"type"` discriminator, mirroring how a host
//! model names its components in a JSON or TOML experiment file:
//!
//! ```json
//! {
//!   "type": "seq2seq",
//!   "architecture": { "type": "pass_through", "input_dim": 16 },
//!   "aggregations": "meanpool,maxpool"
//! }
//! ```
//!
//! A config without `"type"` is a `feedforward` encoder.

use std::path::Path;

use ndarray_rand::rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activations::Activation;
use crate::encoder::{
    EncoderType, FeedForwardEncoder, Seq2SeqEncoder, Seq2VecEncoder, VaeEncoder,
};
use crate::error::{EncoderError, EncoderResult};
use crate::feedforward::FeedForward;
use crate::seq2seq::{FeedForwardSeq2Seq, PassThroughEncoder};
use crate::seq2vec::BagOfEmbeddingsEncoder;

/// A value given either once for every layer or once per layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T: Clone> OneOrMany<T> {
    /// Expands to exactly `n` values.
    pub fn expand(&self, n: usize, field: &str) -> EncoderResult<Vec<T>> {
        match self {
            OneOrMany::One(value) => Ok(vec![value.clone(); n]),
            OneOrMany::Many(values) if values.len() == n => Ok(values.clone()),
            OneOrMany::Many(values) => Err(EncoderError::InvalidConfig(format!(
                "{} has {} entries but num_layers is {}",
                field,
                values.len(),
                n
            ))),
        }
    }
}

/// Shape of a [`FeedForward`] network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedForwardConfig {
    pub input_dim: usize,
    pub num_layers: usize,
    pub hidden_dims: OneOrMany<usize>,
    pub activations: OneOrMany<Activation>,
}

impl FeedForwardConfig {
    fn check_sizes(&self) -> EncoderResult<()> {
        if self.input_dim == 0 {
            return Err(EncoderError::InvalidConfig(
                "feedforward input_dim must be non-zero".to_string(),
            ));
        }
        if self.num_layers == 0 {
            return Err(EncoderError::InvalidConfig(
                "feedforward num_layers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn hidden_dims(&self) -> EncoderResult<Vec<usize>> {
        self.check_sizes()?;
        let dims = self.hidden_dims.expand(self.num_layers, "hidden_dims")?;
        if dims.contains(&0) {
            return Err(EncoderError::InvalidConfig(
                "feedforward hidden_dims must be non-zero".to_string(),
            ));
        }
        Ok(dims)
    }

    pub fn activations(&self) -> EncoderResult<Vec<Activation>> {
        self.check_sizes()?;
        self.activations.expand(self.num_layers, "activations")
    }

    /// Checks sizes and per-layer list lengths.
    pub fn validate(&self) -> EncoderResult<()> {
        self.hidden_dims()?;
        self.activations()?;
        Ok(())
    }

    pub fn output_dim(&self) -> EncoderResult<usize> {
        let dims = self.hidden_dims()?;
        Ok(dims[dims.len() - 1])
    }
}

/// Sequence-to-vector architectures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Seq2VecConfig {
    #[serde(alias = "bag_of_embeddings")]
    Boe {
        embedding_dim: usize,
        #[serde(default)]
        averaged: bool,
    },
}

impl Seq2VecConfig {
    pub fn output_dim(&self) -> usize {
        match self {
            Seq2VecConfig::Boe { embedding_dim, .. } => *embedding_dim,
        }
    }
}

/// Sequence-to-sequence architectures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Seq2SeqConfig {
    PassThrough { input_dim: usize },
    Feedforward { feedforward: FeedForwardConfig },
}

impl Seq2SeqConfig {
    pub fn output_dim(&self) -> EncoderResult<usize> {
        match self {
            Seq2SeqConfig::PassThrough { input_dim } => Ok(*input_dim),
            Seq2SeqConfig::Feedforward { feedforward } => feedforward.output_dim(),
        }
    }
}

/// Configuration of one encoder variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EncoderConfig {
    FeedForward {
        architecture: FeedForwardConfig,
    },
    Seq2Vec {
        architecture: Seq2VecConfig,
    },
    Seq2Seq {
        architecture: Seq2SeqConfig,
        aggregations: String,
    },
}

impl EncoderConfig {
    pub fn encoder_type(&self) -> EncoderType {
        match self {
            EncoderConfig::FeedForward { .. } => EncoderType::FeedForward,
            EncoderConfig::Seq2Vec { .. } => EncoderType::Seq2Vec,
            EncoderConfig::Seq2Seq { .. } => EncoderType::Seq2Seq,
        }
    }

    /// Parses a config value, defaulting a missing `"type"` to `feedforward`.
    pub fn from_value(mut value: serde_json::Value) -> EncoderResult<Self> {
        let object = value.as_object_mut().ok_or_else(|| {
            EncoderError::ConfigParse("encoder configuration must be an object".to_string())
        })?;

        let type_name = match object.get("type") {
            None => EncoderType::default(),
            Some(serde_json::Value::String(name)) => EncoderType::resolve(name)?,
            Some(other) => {
                return Err(EncoderError::ConfigParse(format!(
                    "encoder type must be a string, got {}",
                    other
                )));
            }
        };
        object.insert(
            "type".to_string(),
            serde_json::Value::String(type_name.name().to_string()),
        );

        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(json: &str) -> EncoderResult<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    pub fn from_toml_str(text: &str) -> EncoderResult<Self> {
        let table: toml::Table = toml::from_str(text)?;
        Self::from_value(serde_json::to_value(table)?)
    }

    /// Loads a `.json` or `.toml` config file.
    pub fn load(path: impl AsRef<Path>) -> EncoderResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| EncoderError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&contents)?,
            Some("json") => Self::from_json_str(&contents)?,
            other => {
                return Err(EncoderError::ConfigParse(format!(
                    "unsupported config extension {:?} for {}",
                    other,
                    path.display()
                )));
            }
        };
        log::info!(
            "Loaded {} encoder config from {}",
            config.encoder_type(),
            path.display()
        );
        Ok(config)
    }

    /// Output dimension of the encoder this config builds.
    pub fn output_dim(&self) -> EncoderResult<usize> {
        match self {
            EncoderConfig::FeedForward { architecture } => architecture.output_dim(),
            EncoderConfig::Seq2Vec { architecture } => Ok(architecture.output_dim()),
            EncoderConfig::Seq2Seq {
                architecture,
                aggregations,
            } => Ok(architecture.output_dim()? * aggregations.split(',').count()),
        }
    }

    /// Builds the encoder with randomly initialised weights.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> EncoderResult<VaeEncoder> {
        let encoder = match self {
            EncoderConfig::FeedForward { architecture } => {
                architecture.validate()?;
                let network = FeedForward::from_config(architecture, rng)?;
                VaeEncoder::FeedForward(FeedForwardEncoder::new(Box::new(network)))
            }
            EncoderConfig::Seq2Vec { architecture } => {
                let network = match architecture {
                    Seq2VecConfig::Boe {
                        embedding_dim,
                        averaged,
                    } => BagOfEmbeddingsEncoder::new(*embedding_dim, *averaged)?,
                };
                VaeEncoder::Seq2Vec(Seq2VecEncoder::new(Box::new(network)))
            }
            EncoderConfig::Seq2Seq {
                architecture,
                aggregations,
            } => {
                let encoder = match architecture {
                    Seq2SeqConfig::PassThrough { input_dim } => {
                        Seq2SeqEncoder::new(Box::new(PassThroughEncoder::new(*input_dim)?), aggregations)
                    }
                    Seq2SeqConfig::Feedforward { feedforward } => {
                        feedforward.validate()?;
                        let network = FeedForward::from_config(feedforward, rng)?;
                        Seq2SeqEncoder::new(Box::new(FeedForwardSeq2Seq::new(network)), aggregations)
                    }
                };
                VaeEncoder::Seq2Seq(encoder)
            }
        };
        Ok(encoder)
    }
}

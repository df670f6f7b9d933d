//! Config -> build -> forward, the way a host model wires an encoder.

use std::io::Write;

use anyhow::Result;
use ndarray::{Array2, Array3, array};
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand::rngs::StdRng;

use crate::config::EncoderConfig;
use crate::encoder::{Encoder, EncoderInput, EncoderType};
use crate::error::EncoderError;
use crate::utils::masks::{
    create_full_mask, lengths_from_mask, mask_from_lengths, padding_mask_from_token_ids,
};

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn test_feedforward_from_default_type() -> Result<()> {
    let config = EncoderConfig::from_json_str(
        r#"{"architecture": {"input_dim": 6, "num_layers": 2, "hidden_dims": [5, 3], "activations": ["relu", "tanh"]}}"#,
    )?;
    let encoder = config.build(&mut rng())?;

    assert_eq!(encoder.encoder_type(), EncoderType::FeedForward);
    assert_eq!(encoder.output_dim(), config.output_dim()?);

    let bag_of_words = Array2::from_elem((4, 6), 0.5);
    let output = encoder.forward(EncoderInput::Flat(&bag_of_words))?;
    assert_eq!(output.shape(), &[4, 3]);
    assert!(output.iter().all(|x| x.abs() <= 1.0));
    Ok(())
}

#[test]
fn test_seq2vec_boe_from_config() -> Result<()> {
    let config = EncoderConfig::from_json_str(
        r#"{"type": "seq2vec", "architecture": {"type": "boe", "embedding_dim": 2, "averaged": true}}"#,
    )?;
    let encoder = config.build(&mut rng())?;

    let token_ids = array![[4u32, 9, 0], [3, 0, 0]];
    let mask = padding_mask_from_token_ids(&token_ids, 0);
    let embedded = array![
        [[1.0, 1.0], [3.0, 5.0], [9.0, 9.0]],
        [[2.0, 4.0], [9.0, 9.0], [9.0, 9.0]]
    ];

    let output = encoder.forward(EncoderInput::Sequence {
        embedded: &embedded,
        mask: &mask,
    })?;
    assert_eq!(output, array![[2.0, 3.0], [2.0, 4.0]]);
    assert_eq!(lengths_from_mask(&mask).to_vec(), vec![2, 1]);
    Ok(())
}

#[test]
fn test_seq2seq_full_mask_matches_plain_pooling() -> Result<()> {
    let config = EncoderConfig::from_json_str(
        r#"{"type": "seq2seq", "architecture": {"type": "pass_through", "input_dim": 2}, "aggregations": "meanpool,maxpool"}"#,
    )?;
    let encoder = config.build(&mut rng())?;

    let embedded = array![[[1.0, 6.0], [3.0, 2.0]], [[-1.0, 0.0], [-5.0, 4.0]]];
    let mask = create_full_mask(2, 2);
    assert_eq!(lengths_from_mask(&mask).to_vec(), vec![2, 2]);

    let output = encoder.forward(EncoderInput::Sequence {
        embedded: &embedded,
        mask: &mask,
    })?;
    assert_eq!(output, array![[2.0, 4.0, 3.0, 6.0], [-3.0, 2.0, -1.0, 4.0]]);
    Ok(())
}

#[test]
fn test_seq2seq_pass_through_from_config() -> Result<()> {
    let config = EncoderConfig::from_json_str(
        r#"{
            "type": "seq2seq",
            "architecture": {"type": "pass_through", "input_dim": 2},
            "aggregations": "meanpool,maxpool,final_state"
        }"#,
    )?;
    let encoder = config.build(&mut rng())?;
    assert_eq!(encoder.output_dim(), 6);

    let embedded = array![[[1.0, -1.0], [3.0, -3.0], [7.0, 7.0]]];
    let mask = mask_from_lengths(&[2], 3);
    let output = encoder.forward(EncoderInput::Sequence {
        embedded: &embedded,
        mask: &mask,
    })?;

    assert_eq!(output, array![[2.0, -2.0, 3.0, -1.0, 3.0, -3.0]]);
    Ok(())
}

#[test]
fn test_seq2seq_feedforward_from_toml() -> Result<()> {
    let config = EncoderConfig::from_toml_str(
        r#"
        type = "seq2seq"
        aggregations = "maxpool,meanpool"

        [architecture]
        type = "feedforward"

        [architecture.feedforward]
        input_dim = 4
        num_layers = 1
        hidden_dims = 8
        activations = "gelu"
        "#,
    )?;
    let encoder = config.build(&mut rng())?;
    assert_eq!(encoder.output_dim(), 16);

    let embedded = Array3::from_elem((3, 5, 4), 0.25);
    let mask = mask_from_lengths(&[5, 2, 1], 5);
    let output = encoder.forward(EncoderInput::Sequence {
        embedded: &embedded,
        mask: &mask,
    })?;
    assert_eq!(output.shape(), &[3, 16]);

    // Every valid position holds the same vector, so max and mean agree.
    for row in output.outer_iter() {
        for j in 0..8 {
            assert!((row[j] - row[j + 8]).abs() < 1e-5);
        }
    }
    Ok(())
}

#[test]
fn test_unknown_aggregation_only_fails_on_forward() -> Result<()> {
    let config = EncoderConfig::from_json_str(
        r#"{"type": "seq2seq", "architecture": {"type": "pass_through", "input_dim": 2}, "aggregations": "sumpool"}"#,
    )?;
    let encoder = config.build(&mut rng())?;
    assert_eq!(encoder.output_dim(), 2);

    let embedded = Array3::zeros((1, 2, 2));
    let mask = Array2::ones((1, 2));
    let err = encoder
        .forward(EncoderInput::Sequence {
            embedded: &embedded,
            mask: &mask,
        })
        .unwrap_err();
    assert!(matches!(err, EncoderError::UnsupportedAggregation(_)));
    Ok(())
}

#[test]
fn test_build_rejects_inconsistent_feedforward() -> Result<()> {
    let config = EncoderConfig::from_json_str(
        r#"{"type": "feedforward", "architecture": {"input_dim": 4, "num_layers": 2, "hidden_dims": [3], "activations": "relu"}}"#,
    )?;
    let err = config.build(&mut rng()).unwrap_err();
    assert!(matches!(err, EncoderError::InvalidConfig(_)));
    Ok(())
}

#[test]
fn test_load_from_files() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let json_path = dir.path().join("encoder.json");
    let mut file = std::fs::File::create(&json_path)?;
    write!(
        file,
        r#"{{"type": "seq2vec", "architecture": {{"type": "boe", "embedding_dim": 7}}}}"#
    )?;
    let config = EncoderConfig::load(&json_path)?;
    assert_eq!(config.encoder_type(), EncoderType::Seq2Vec);
    assert_eq!(config.output_dim()?, 7);

    let toml_path = dir.path().join("encoder.toml");
    std::fs::write(
        &toml_path,
        "type = \"seq2seq\"\naggregations = \"final_state\"\n[architecture]\ntype = \"pass_through\"\ninput_dim = 3\n",
    )?;
    let config = EncoderConfig::load(&toml_path)?;
    assert_eq!(config.build(&mut rng())?.output_dim(), 3);

    let yaml_path = dir.path().join("encoder.yaml");
    std::fs::write(&yaml_path, "type: seq2seq")?;
    assert!(matches!(
        EncoderConfig::load(&yaml_path),
        Err(EncoderError::ConfigParse(_))
    ));

    assert!(matches!(
        EncoderConfig::load(dir.path().join("missing.json")),
        Err(EncoderError::ConfigIo { .. })
    ));
    Ok(())
}

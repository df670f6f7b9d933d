//! Builds each encoder variant from config and encodes the same batch.
//!
//! Run with: RUST_LOG=debug cargo run -p kjarni-vae --example swap_encoders

use kjarni_vae::prelude::*;
use kjarni_vae::utils::masks::padding_mask_from_token_ids;
use ndarray::{Array2, Array3, array};
use ndarray_rand::rand::{SeedableRng, rngs::StdRng};

const CONFIGS: &[&str] = &[
    r#"{"architecture": {"input_dim": 8, "num_layers": 2, "hidden_dims": [16, 4], "activations": ["relu", "linear"]}}"#,
    r#"{"type": "seq2vec", "architecture": {"type": "boe", "embedding_dim": 8, "averaged": true}}"#,
    r#"{"type": "seq2seq", "architecture": {"type": "pass_through", "input_dim": 8}, "aggregations": "meanpool,maxpool,final_state"}"#,
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let mut rng = StdRng::seed_from_u64(7);

    let token_ids = array![[12u32, 7, 3, 0], [5, 9, 0, 0]];
    let mask = padding_mask_from_token_ids(&token_ids, 0);
    let embedded = Array3::from_shape_fn((2, 4, 8), |(b, t, h)| (b + t) as f32 * 0.1 + h as f32 * 0.01);
    let bag_of_words: Array2<f32> = embedded.sum_axis(ndarray::Axis(1));

    for json in CONFIGS {
        let config = EncoderConfig::from_json_str(json)?;
        let encoder = config.build(&mut rng)?;

        let input = match encoder.encoder_type() {
            EncoderType::FeedForward => EncoderInput::Flat(&bag_of_words),
            EncoderType::Seq2Vec | EncoderType::Seq2Seq => EncoderInput::Sequence {
                embedded: &embedded,
                mask: &mask,
            },
        };
        let vectors = encoder.forward(input)?;

        println!(
            "{:<12} output_dim={:<3} shape={:?}",
            encoder.encoder_type().name(),
            encoder.output_dim(),
            vectors.shape()
        );
    }
    Ok(())
}

// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Rebuilds the network on the inference backend, restores the
// requested checkpoint, and adapts it to the EvalModel seam the
// evaluation loop consumes.

use anyhow::Result;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::prelude::*;
use burn::tensor::activation::log_softmax;

use crate::domain::prediction::{TagLabels, TagScores, PAD_LABEL};
use crate::domain::traits::{CheckpointStore, EvalModel};
use crate::infra::checkpoint::CheckpointManager;
use crate::infra::params::Params;
use crate::ml::model::{TagNet, TagNetConfig};

pub type EvalBackend = burn::backend::Wgpu;

pub struct TagInferencer {
    net:        TagNet<EvalBackend>,
    pad_tag_id: usize,
    device:     burn::backend::wgpu::WgpuDevice,
    eval_mode:  bool,
}

impl TagInferencer {
    /// Build the network from the hyperparameters, then restore the
    /// named checkpoint into it. Dropout is constructed at 0.0 —
    /// the inference backend has no autodiff, so stochastic layers
    /// stay inert regardless.
    pub fn from_checkpoint(
        ckpt_manager: &CheckpointManager,
        params:       &Params,
        vocab_size:   usize,
        num_tags:     usize,
        pad_tag_id:   usize,
        restore:      &str,
    ) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        let model_cfg = TagNetConfig::new(
            vocab_size, params.max_seq_len, params.d_model,
            params.num_heads, params.num_layers, params.d_ff, 0.0,
            num_tags,
        );
        let net: TagNet<EvalBackend> = model_cfg.init(&device);
        let net = ckpt_manager.load(restore, net)?;
        tracing::info!("Model restored from checkpoint '{}'", restore);
        Ok(Self { net, pad_tag_id, device, eval_mode: false })
    }

    pub fn device(&self) -> &burn::backend::wgpu::WgpuDevice {
        &self.device
    }
}

impl EvalModel for TagInferencer {
    type Input  = Tensor<EvalBackend, 2, Int>;
    type Labels = Tensor<EvalBackend, 2, Int>;
    type Output = Tensor<EvalBackend, 3>;

    fn set_eval_mode(&mut self) {
        // The Wgpu backend carries no autodiff, so dropout is already
        // inert; the flag records that the switch happened.
        self.eval_mode = true;
    }

    fn forward(&self, input: Self::Input) -> Self::Output {
        self.net.forward(input)
    }

    /// Cross-entropy over every token position, padding masked out
    fn loss(&self, output: &Self::Output, labels: &Self::Labels) -> f64 {
        let [batch_size, seq_len, num_tags] = output.dims();
        let logits  = output.clone().reshape([batch_size * seq_len, num_tags]);
        let targets = labels.clone().reshape([batch_size * seq_len]);

        let ce = CrossEntropyLossConfig::new()
            .with_pad_tokens(Some(vec![self.pad_tag_id]))
            .init(&logits.device());

        ce.forward(logits, targets).into_scalar().elem::<f64>()
    }

    /// Flatten to [tokens, classes] log-probs and plain label ids,
    /// re-encoding pad positions as the host-side sentinel.
    fn to_host(&self, output: Self::Output, labels: Self::Labels) -> (TagScores, TagLabels) {
        let [batch_size, seq_len, num_tags] = output.dims();

        let log_probs = log_softmax(output, 2)
            .reshape([batch_size * seq_len, num_tags]);
        let values: Vec<f32> = log_probs
            .into_data()
            .to_vec::<f32>()
            .unwrap_or_default();

        let ids: Vec<i64> = labels
            .reshape([batch_size * seq_len])
            .into_data()
            .to_vec::<i32>()
            .unwrap_or_default()
            .into_iter()
            .map(|id| {
                if id as usize == self.pad_tag_id { PAD_LABEL } else { id as i64 }
            })
            .collect();

        (TagScores::new(num_tags, values), TagLabels::new(ids))
    }
}

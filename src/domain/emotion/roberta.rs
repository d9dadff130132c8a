//! candle 기반 RoBERTa 감정 분류 모델
//!
//! HuggingFace Hub에서 config.json, tokenizer.json, model.safetensors를 내려받아
//! 7개 클래스 시퀀스 분류 모델을 CPU에서 실행합니다.

use std::path::PathBuf;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use tokenizers::{Tokenizer, TruncationParams};

use super::classifier::{ClassifierError, EmotionModel};
use super::label::EmotionLabel;

/// 모델 최대 입력 길이 (토큰)
const MAX_SEQUENCE_LENGTH: usize = 512;

/// Hub에서 내려받은 모델 파일 경로
pub struct ModelFiles {
    pub config_path: PathBuf,
    pub tokenizer_path: PathBuf,
    pub weights_path: PathBuf,
}

/// 모델 파일 다운로드 (로컬 캐시 `~/.cache/huggingface/hub/` 사용)
///
/// 동기 I/O이므로 `spawn_blocking` 안에서 호출해야 합니다.
pub fn download_model(repo_id: &str) -> Result<ModelFiles, ClassifierError> {
    let api = hf_hub::api::sync::Api::new()
        .map_err(|e| ClassifierError::ModelLoad(format!("hf-hub init: {e}")))?;
    let repo = api.model(repo_id.to_string());

    let fetch = |name: &str| {
        repo.get(name)
            .map_err(|e| ClassifierError::ModelLoad(format!("{name}: {e}")))
    };

    Ok(ModelFiles {
        config_path: fetch("config.json")?,
        tokenizer_path: fetch("tokenizer.json")?,
        weights_path: fetch("model.safetensors")?,
    })
}

pub struct RobertaEmotionModel {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
}

impl RobertaEmotionModel {
    pub fn load(files: &ModelFiles) -> Result<Self, ClassifierError> {
        let device = Device::Cpu;

        let config_str = std::fs::read_to_string(&files.config_path)
            .map_err(|e| ClassifierError::ModelLoad(format!("read config: {e}")))?;
        let config: RobertaConfig = serde_json::from_str(&config_str)
            .map_err(|e| ClassifierError::ModelLoad(format!("parse config: {e}")))?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer_path)
            .map_err(|e| ClassifierError::ModelLoad(format!("load tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: MAX_SEQUENCE_LENGTH,
                ..Default::default()
            }))
            .map_err(|e| ClassifierError::ModelLoad(format!("configure truncation: {e}")))?;

        // SAFETY: mmap된 safetensors 파일은 모델 사용 중 수정되지 않아야 합니다.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&files.weights_path], DType::F32, &device)
                .map_err(|e| ClassifierError::ModelLoad(format!("load weights: {e}")))?
        };
        let model = XLMRobertaForSequenceClassification::new(
            EmotionLabel::MODEL_CLASSES.len(),
            &config,
            vb,
        )
        .map_err(|e| ClassifierError::ModelLoad(format!("build model: {e}")))?;

        Ok(Self {
            model,
            tokenizer,
            device,
        })
    }

    fn forward(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ClassifierError::Tokenization(e.to_string()))?;

        let ids = encoding.get_ids().to_vec();
        let mask = encoding.get_attention_mask().to_vec();
        let seq_len = ids.len();

        let inference = |e: candle_core::Error| ClassifierError::Inference(e.to_string());

        let input_ids = Tensor::from_vec(ids, (1, seq_len), &self.device).map_err(inference)?;
        let attention_mask = Tensor::from_vec(mask, (1, seq_len), &self.device).map_err(inference)?;
        // RoBERTa는 token_type_ids를 사용하지 않음
        let token_type_ids = input_ids.zeros_like().map_err(inference)?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .map_err(inference)?;

        let rows = logits.to_vec2::<f32>().map_err(inference)?;
        rows.into_iter().next().ok_or(ClassifierError::EmptyLogits)
    }
}

impl EmotionModel for RobertaEmotionModel {
    fn logits(&self, text: &str) -> Result<Vec<f32>, ClassifierError> {
        self.forward(text)
    }
}

/// 모델을 내려받아 로드합니다. 실패 사유는 호출자가 로깅합니다.
pub fn load_from_hub(repo_id: &str) -> Result<RobertaEmotionModel, ClassifierError> {
    let files = download_model(repo_id)?;
    let model = RobertaEmotionModel::load(&files)?;
    tracing::info!(repo_id, "Emotion classifier loaded (candle, CPU)");
    Ok(model)
}

use serde::Serialize;

/// Reference clip used to steer synthesis toward a target voice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceAudio {
    #[serde(rename = "refer_wav_path")]
    pub wav_path: String,
    pub prompt_text: String,
    pub prompt_language: String,
}

/// Body of `POST <server>?` on the GPT-SoVITS inference server
#[derive(Debug, Serialize)]
pub struct InferenceRequest<'a> {
    pub text: [&'a str; 1],
    #[serde(flatten)]
    pub reference: Option<&'a ReferenceAudio>,
    pub text_language: &'a str,
    pub top_k: u32,
    pub top_p: f32,
    pub temperature: f32,
    pub speed: f32,
}

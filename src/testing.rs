//! Test Doubles - 测试替身
//!
//! 各端口的脚本化实现，只在测试中编译

use async_trait::async_trait;
use axum::body::Body;
use axum::Router;
use dashmap::DashMap;
use http::header::CONTENT_TYPE;
use http::{Method, Request, StatusCode};
use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower::util::ServiceExt;

use crate::application::ports::{
    CardImage, JobTransportPort, NarrationPort, NarrationRequest, Sleeper, SpeechRequest,
    SpeechSynthesisPort, StoreError, TextGenerationPort, TextPrompt, TransportError,
    VisionModelPort, VoiceCloneRequest, VoiceCloneStorePort,
};
use crate::domain::card::ModelVariant;
use crate::domain::job::JobError;
use crate::domain::random::RandomSource;
use crate::domain::voice::VoiceCloneRecord;
use crate::infrastructure::http::{create_routes, AppState};

// ============================================================================
// RandomSource
// ============================================================================

/// 循环返回固定序列
pub struct FixedRandom {
    values: Vec<f64>,
    cursor: AtomicUsize,
}

impl FixedRandom {
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl RandomSource for FixedRandom {
    fn next(&self) -> f64 {
        let i = self.cursor.fetch_add(1, Ordering::SeqCst);
        if self.values.is_empty() {
            0.0
        } else {
            self.values[i % self.values.len()]
        }
    }
}

// ============================================================================
// Transport
// ============================================================================

/// 按顺序返回预设响应（POST 和 GET 共用一个队列）
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<Value, TransportError>>>,
    posts: Mutex<Vec<(String, Value)>>,
    gets: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new<I: IntoIterator<Item = Result<Value, TransportError>>>(responses: I) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            posts: Mutex::new(Vec::new()),
            gets: Mutex::new(Vec::new()),
        }
    }

    pub fn post_calls(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.lock().unwrap().len()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.lock().unwrap().clone()
    }

    fn next_response(&self) -> Result<Value, TransportError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("script exhausted".to_string())))
    }
}

#[async_trait]
impl JobTransportPort for ScriptedTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, TransportError> {
        self.posts
            .lock()
            .unwrap()
            .push((url.to_string(), body.clone()));
        self.next_response()
    }

    async fn get_json(&self, url: &str) -> Result<Value, TransportError> {
        self.gets.lock().unwrap().push(url.to_string());
        self.next_response()
    }
}

// ============================================================================
// Sleeper
// ============================================================================

/// 记录每次挂起时长，不真正等待
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// 第 `n` 次挂起时取消 `token`
    pub fn cancelling_after(n: usize, token: CancellationToken) -> Self {
        Self {
            sleeps: Mutex::new(Vec::new()),
            cancel_after: Some((n, token)),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        let count = {
            let mut sleeps = self.sleeps.lock().unwrap();
            sleeps.push(duration);
            sleeps.len()
        };
        if let Some((n, token)) = &self.cancel_after {
            if count >= *n {
                token.cancel();
            }
        }
    }
}

// ============================================================================
// Vision
// ============================================================================

/// 按顺序返回预设回答，记录被调用的模型
pub struct ScriptedVision {
    answers: Mutex<VecDeque<Result<String, JobError>>>,
    models: Mutex<Vec<String>>,
}

impl ScriptedVision {
    pub fn new<I: IntoIterator<Item = Result<String, JobError>>>(answers: I) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
            models: Mutex::new(Vec::new()),
        }
    }

    pub fn answering(answers: &[&str]) -> Self {
        Self::new(answers.iter().map(|a| Ok(a.to_string())))
    }

    pub fn models(&self) -> Vec<String> {
        self.models.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModelPort for ScriptedVision {
    async fn read_card(&self, variant: &ModelVariant, _image: &CardImage) -> Result<String, JobError> {
        self.models.lock().unwrap().push(variant.model.clone());
        self.answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(JobError::transport("script exhausted")))
    }
}

// ============================================================================
// Speech / Narration / Text
// ============================================================================

/// 默认全部成功；可按音色或文本片段指定失败
#[derive(Default)]
pub struct FakeSpeech {
    failing_voices: HashSet<String>,
    failing_texts: Vec<String>,
    clone_failure: Option<JobError>,
    unconfigured: bool,
    requests: Mutex<Vec<SpeechRequest>>,
    clones: Mutex<Vec<String>>,
}

impl FakeSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_voice(mut self, voice_id: &str) -> Self {
        self.failing_voices.insert(voice_id.to_string());
        self
    }

    pub fn failing_text(mut self, fragment: &str) -> Self {
        self.failing_texts.push(fragment.to_string());
        self
    }

    pub fn failing_clone(mut self, error: JobError) -> Self {
        self.clone_failure = Some(error);
        self
    }

    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clone_calls(&self) -> Vec<String> {
        self.clones.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesisPort for FakeSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<String, JobError> {
        let n = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };
        if self.failing_voices.contains(&request.voice_id)
            || self.failing_texts.iter().any(|f| request.text.contains(f))
        {
            return Err(JobError::transport("HTTP 503: unavailable"));
        }
        Ok(format!("https://audio.test/{}/{}.mp3", request.voice_id, n))
    }

    async fn clone_voice(&self, request: &VoiceCloneRequest) -> Result<Option<String>, JobError> {
        self.clones
            .lock()
            .unwrap()
            .push(request.custom_voice_id.clone());
        match &self.clone_failure {
            Some(error) => Err(error.clone()),
            None => Ok(Some(format!(
                "https://audio.test/preview/{}.mp3",
                request.custom_voice_id
            ))),
        }
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }
}

#[derive(Default)]
pub struct FakeNarration {
    failing_texts: Vec<String>,
    unconfigured: bool,
    calls: AtomicUsize,
}

impl FakeNarration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_text(mut self, fragment: &str) -> Self {
        self.failing_texts.push(fragment.to_string());
        self
    }

    pub fn unconfigured(mut self) -> Self {
        self.unconfigured = true;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarrationPort for FakeNarration {
    async fn narrate(&self, request: &NarrationRequest) -> Result<String, JobError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.failing_texts.iter().any(|f| request.text.contains(f)) {
            return Err(JobError::TimedOut);
        }
        Ok(format!("https://narration.test/{}.mp3", n))
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }
}

/// 回答 = 固定前缀 + 角色 system prompt 的第一行
pub struct FakeTextGeneration {
    failure: Option<JobError>,
    unconfigured: bool,
    prompts: Mutex<Vec<TextPrompt>>,
}

impl FakeTextGeneration {
    pub fn new() -> Self {
        Self {
            failure: None,
            unconfigured: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: JobError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            unconfigured: true,
            ..Self::new()
        }
    }

    pub fn prompts(&self) -> Vec<TextPrompt> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationPort for FakeTextGeneration {
    async fn generate(&self, prompt: &TextPrompt) -> Result<String, JobError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        let persona = prompt.system.lines().next().unwrap_or_default();
        Ok(format!("Antwort von: {}", persona))
    }

    fn is_configured(&self) -> bool {
        !self.unconfigured
    }
}

// ============================================================================
// Store
// ============================================================================

#[derive(Default)]
pub struct MemoryVoiceCloneStore {
    records: DashMap<String, VoiceCloneRecord>,
    persists: AtomicUsize,
}

impl MemoryVoiceCloneStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persists(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VoiceCloneStorePort for MemoryVoiceCloneStore {
    fn get(&self, user_id: &str) -> Option<VoiceCloneRecord> {
        self.records.get(user_id).map(|r| r.value().clone())
    }

    fn set(&self, user_id: &str, record: VoiceCloneRecord) {
        self.records.insert(user_id.to_string(), record);
    }

    fn delete(&self, user_id: &str) -> Option<VoiceCloneRecord> {
        self.records.remove(user_id).map(|(_, r)| r)
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    async fn persist(&self) -> Result<(), StoreError> {
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// 由测试替身组装的应用，测试结束后可检查各替身
pub struct TestApp {
    pub vision: Arc<ScriptedVision>,
    pub text: Arc<FakeTextGeneration>,
    pub speech: Arc<FakeSpeech>,
    pub narration: Arc<FakeNarration>,
    pub store: Arc<MemoryVoiceCloneStore>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            vision: Arc::new(ScriptedVision::answering(&["THE SUN"])),
            text: Arc::new(FakeTextGeneration::new()),
            speech: Arc::new(FakeSpeech::new()),
            narration: Arc::new(FakeNarration::new()),
            store: Arc::new(MemoryVoiceCloneStore::new()),
        }
    }

    pub fn with_vision(mut self, vision: ScriptedVision) -> Self {
        self.vision = Arc::new(vision);
        self
    }

    pub fn with_speech(mut self, speech: FakeSpeech) -> Self {
        self.speech = Arc::new(speech);
        self
    }

    pub fn with_narration(mut self, narration: FakeNarration) -> Self {
        self.narration = Arc::new(narration);
        self
    }

    pub fn state(&self) -> AppState {
        AppState::new(
            self.vision.clone(),
            vec![ModelVariant::new("haiku", 100), ModelVariant::new("sonnet", 100)],
            self.text.clone(),
            self.speech.clone(),
            self.narration.clone(),
            self.store.clone(),
            Arc::new(FixedRandom::new([0.0])),
        )
    }

    pub fn router(&self) -> Router {
        create_routes().with_state(Arc::new(self.state()))
    }
}

/// 发送请求并把响应体解析为 JSON
pub async fn send_json(
    router: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    let request = match body {
        Some(body) => request.body(Body::from(body.to_string())).unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn post_json(router: Router, uri: &str, body: Value) -> Value {
    let (status, json) = send_json(router, Method::POST, uri, Some(body)).await;
    assert_eq!(status, StatusCode::OK, "POST {} returned {}", uri, status);
    json
}

pub async fn get_json(router: Router, uri: &str) -> Value {
    let (status, json) = send_json(router, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK, "GET {} returned {}", uri, status);
    json
}

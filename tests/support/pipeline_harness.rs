#![allow(dead_code, clippy::needless_lifetimes)]

use std::collections::VecDeque;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tempfile::TempDir;

use stark_assistant::agent::{
    ActionRequest, Classification, Classifier, CommandPipeline, DetailLevel, Summarizer,
};
use stark_assistant::memory::{ConversationState, MemoryStore};
use stark_assistant::tools::{Intent, SafeExecutor};

/// Classifier double that replays queued classifications in order and
/// records the context hint it saw on every call.
#[derive(Default)]
pub struct ScriptedClassifier {
    script: Mutex<VecDeque<Classification>>,
    hints: Mutex<Vec<Option<String>>>,
}

impl ScriptedClassifier {
    pub fn push(&self, classification: Classification) {
        self.script.lock().unwrap().push_back(classification);
    }

    pub fn calls(&self) -> usize {
        self.hints.lock().unwrap().len()
    }

    pub fn hints(&self) -> Vec<Option<String>> {
        self.hints.lock().unwrap().clone()
    }
}

impl Classifier for ScriptedClassifier {
    fn classify<'a>(
        &'a self,
        _command: &'a str,
        context_hint: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Classification> + Send + 'a>> {
        self.hints
            .lock()
            .unwrap()
            .push(context_hint.map(ToOwned::to_owned));
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(Classification::not_understood);
        Box::pin(async move { next })
    }
}

/// Summarizer double that records its inputs.
#[derive(Default)]
pub struct RecordingSummarizer {
    calls: Mutex<Vec<(String, DetailLevel)>>,
}

impl RecordingSummarizer {
    pub fn calls(&self) -> Vec<(String, DetailLevel)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Summarizer for RecordingSummarizer {
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        detail: DetailLevel,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        self.calls.lock().unwrap().push((text.to_string(), detail));
        Box::pin(async move { format!("SUMMARY[{detail}] of {} chars", text.len()) })
    }
}

pub struct Harness {
    pub tmp: TempDir,
    pub classifier: Arc<ScriptedClassifier>,
    pub summarizer: Arc<RecordingSummarizer>,
    pub pipeline: CommandPipeline,
}

impl Harness {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("work")).unwrap();
        let classifier = Arc::new(ScriptedClassifier::default());
        let summarizer = Arc::new(RecordingSummarizer::default());
        let pipeline = Self::pipeline_for(&tmp, classifier.clone(), summarizer.clone());
        Self {
            tmp,
            classifier,
            summarizer,
            pipeline,
        }
    }

    /// A second pipeline over the same directories, sharing nothing in memory.
    pub fn restart(&self) -> CommandPipeline {
        Self::pipeline_for(&self.tmp, self.classifier.clone(), self.summarizer.clone())
    }

    fn pipeline_for(
        tmp: &TempDir,
        classifier: Arc<ScriptedClassifier>,
        summarizer: Arc<RecordingSummarizer>,
    ) -> CommandPipeline {
        CommandPipeline::new(
            MemoryStore::new(tmp.path().join("state").join("memory.json")),
            SafeExecutor::new(tmp.path().join("work")),
            classifier,
            summarizer,
            tmp.path().join("work").join("default.txt"),
        )
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.tmp.path().join("work").join(name)
    }

    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) {
        std::fs::write(self.path(name), content).unwrap();
    }

    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).unwrap()
    }

    pub fn script(&self, classification: Classification) {
        self.classifier.push(classification);
    }

    pub async fn run(&self, command: &str) -> String {
        self.pipeline.process(command).await
    }

    pub async fn state(&self) -> ConversationState {
        self.pipeline.memory().load().await
    }

    pub async fn seed_state(&self, state: &ConversationState) {
        self.pipeline.memory().save(state).await.unwrap();
    }

    pub fn memory_file(&self) -> PathBuf {
        self.pipeline.memory().path().to_path_buf()
    }
}

pub fn action(intent: Intent) -> ActionRequest {
    ActionRequest::new(intent)
}

pub fn on_file(intent: Intent, filename: &str) -> Classification {
    Classification::Action(ActionRequest::new(intent).with_filename(filename))
}

pub fn write_to(filename: &str, content: &str) -> Classification {
    Classification::Action(
        ActionRequest::new(Intent::Write)
            .with_filename(filename)
            .with_content(content),
    )
}

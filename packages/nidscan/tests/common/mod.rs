//! Fake recognizer shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use nidscan::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// What every recognizer handed out by a [`FakeFactory`] does.
#[derive(Clone)]
pub enum Behaviour {
    Text(String),
    Fail(String),
    Sleep(Duration, String),
}

#[derive(Default)]
pub struct Counters {
    pub acquired: AtomicUsize,
    pub terminated: AtomicUsize,
}

impl Counters {
    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    pub fn terminated(&self) -> usize {
        self.terminated.load(Ordering::SeqCst)
    }

    /// Workers still alive.
    pub fn outstanding(&self) -> usize {
        self.acquired() - self.terminated()
    }
}

pub struct FakeFactory {
    behaviour: Behaviour,
    pub counters: Arc<Counters>,
}

impl FakeFactory {
    pub fn new(behaviour: Behaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            counters: Arc::new(Counters::default()),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(Behaviour::Text(text.to_string()))
    }

    pub fn failing(msg: &str) -> Arc<Self> {
        Self::new(Behaviour::Fail(msg.to_string()))
    }
}

struct FakeRecognizer {
    behaviour: Behaviour,
    counters: Arc<Counters>,
}

#[async_trait]
impl RecognizerFactory for FakeFactory {
    async fn acquire(&self, _languages: &LanguageSet) -> Result<Box<dyn TextRecognizer>, OcrError> {
        self.counters.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeRecognizer {
            behaviour: self.behaviour.clone(),
            counters: self.counters.clone(),
        }))
    }
}

#[async_trait]
impl TextRecognizer for FakeRecognizer {
    async fn recognize(&mut self, _input: &OcrInput) -> Result<OcrOutput, OcrError> {
        match &self.behaviour {
            Behaviour::Text(text) => Ok(OcrOutput::from_text(text.clone())),
            Behaviour::Fail(msg) => Err(OcrError::EngineError(msg.clone())),
            Behaviour::Sleep(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(OcrOutput::from_text(text.clone()))
            }
        }
    }

    async fn terminate(self: Box<Self>) {
        self.counters.terminated.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn verifier(factory: Arc<FakeFactory>) -> Verifier {
    Verifier::new(factory, VerifierOptions::default())
}

pub fn verifier_with_timeout(factory: Arc<FakeFactory>, timeout: Duration) -> Verifier {
    Verifier::new(factory, VerifierOptions::default().with_timeout(timeout))
}

pub fn jpeg() -> OcrInput {
    OcrInput::Bytes(vec![0xff, 0xd8, 0xff, 0xe0])
}

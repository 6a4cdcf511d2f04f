//! BDD test world for the homework bot

use std::collections::VecDeque;
use std::sync::Mutex;

use cucumber::World;
use homework_bot::notifier::Notifier;
use homework_bot::poller::IterationOutcome;
use homework_bot::state::PollState;
use homework_bot::status_client::StatusClient;
use homework_bot::validator::WorkItemRecord;
use homework_bot::{BotError, ErrorKind};
use serde_json::Value;

#[derive(Debug, Default, World)]
pub struct HomeworkBotWorld {
    // Validation and translation
    pub payload: Option<Value>,
    pub check_result: Option<homework_bot::Result<WorkItemRecord>>,
    pub homework: Option<WorkItemRecord>,
    pub translation: Option<homework_bot::Result<String>>,

    // Poll loop
    pub script: Vec<homework_bot::Result<Value>>,
    pub notifier_fails: bool,
    pub max_report_failures: Option<u32>,
    pub fetch_count: usize,
    pub attempts: Vec<String>,
    pub outcomes: Vec<IterationOutcome>,
    pub final_state: Option<PollState>,
}

/// A status client replaying a fixed script, then reporting an outage
#[derive(Debug)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<homework_bot::Result<Value>>>,
    fetches: Mutex<usize>,
}

impl ScriptedClient {
    pub fn new(script: Vec<homework_bot::Result<Value>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fetches: Mutex::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait::async_trait]
impl StatusClient for ScriptedClient {
    async fn fetch(&self, _cursor: i64) -> homework_bot::Result<Value> {
        *self.fetches.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(BotError::ApiUnavailable("script exhausted".to_string())))
    }
}

/// A notifier recording every attempt, optionally rejecting all of them
#[derive(Debug)]
pub struct RecordingNotifier {
    fail: bool,
    attempts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn send(&self, text: &str) -> homework_bot::Result<()> {
        self.attempts.lock().unwrap().push(text.to_string());
        if self.fail {
            Err(BotError::Delivery("channel rejected message".to_string()))
        } else {
            Ok(())
        }
    }
}

pub fn kind_named(name: &str) -> ErrorKind {
    match name {
        "NetworkFailure" => ErrorKind::NetworkFailure,
        "ApiUnavailable" => ErrorKind::ApiUnavailable,
        "MalformedPayload" => ErrorKind::MalformedPayload,
        "InvalidShape" => ErrorKind::InvalidShape,
        "EmptyResult" => ErrorKind::EmptyResult,
        "MissingFields" => ErrorKind::MissingFields,
        "UnknownStatus" => ErrorKind::UnknownStatus,
        "DeliveryFailure" => ErrorKind::DeliveryFailure,
        other => panic!("Unknown error kind: {}", other),
    }
}

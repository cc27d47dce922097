//! Scripted collaborator fakes shared by this crate's tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::auth::{AuthClient, AuthSnapshot};
use crate::error::DialogError;
use crate::extract::{FieldInput, FieldSource};
use crate::fields::{FieldValue, ValueMap};
use crate::file_picker::{FileSurface, PickerProps, SurfaceHost};
use crate::view::{DialogCloser, DialogConfig, DialogResult, DialogView, ViewFactory};

/// What a scripted view does on its first render.
#[derive(Clone)]
pub enum Reply {
    /// Close immediately with this payload (`None` = cancel).
    Close(Option<DialogResult>),
    /// Present these live input states, run the config's selector against
    /// them, and close affirmatively with the selector's result.
    AffirmWith(ValueMap),
}

/// A live input scripted from a [`FieldValue`].
struct ScriptedInput(FieldValue);

impl FieldInput for ScriptedInput {
    fn text(&self) -> String {
        self.0.as_str().unwrap_or_default().to_string()
    }

    fn checked(&self) -> bool {
        self.0.as_bool().unwrap_or(false)
    }
}

struct ScriptedView {
    reply: Option<Reply>,
    config: DialogConfig,
    closer: DialogCloser,
    inputs: HashMap<String, ScriptedInput>,
}

impl FieldSource for ScriptedView {
    fn input(&self, key: &str) -> Option<&dyn FieldInput> {
        self.inputs.get(key).map(|i| i as &dyn FieldInput)
    }
}

impl DialogView for ScriptedView {
    fn update(&mut self) {
        match self.reply.take() {
            Some(Reply::Close(payload)) => self.closer.close(payload),
            Some(Reply::AffirmWith(script)) => {
                self.inputs = script
                    .into_iter()
                    .map(|(k, v)| (k, ScriptedInput(v)))
                    .collect();
                let selector = self
                    .config
                    .selector
                    .as_ref()
                    .expect("fields dialog without a selector");
                // Mirror a real view: resolve the selector at affirmative
                // close, against the live inputs.
                let result = {
                    let inputs = &self.inputs;
                    let source = InputsSource { inputs };
                    selector.resolve(&source).expect("selector failed")
                };
                self.closer.close(Some(result));
            }
            // No reply scripted: stay open forever.
            None => {}
        }
    }
}

struct InputsSource<'a> {
    inputs: &'a HashMap<String, ScriptedInput>,
}

impl FieldSource for InputsSource<'_> {
    fn input(&self, key: &str) -> Option<&dyn FieldInput> {
        self.inputs.get(key).map(|i| i as &dyn FieldInput)
    }
}

/// View factory that records every config it sees and answers each open
/// with the next scripted [`Reply`].
pub struct RecordingFactory {
    script: Mutex<Vec<Reply>>,
    configs: Mutex<Vec<DialogConfig>>,
}

impl RecordingFactory {
    pub fn new(script: Vec<Reply>) -> Self {
        Self {
            script: Mutex::new(script),
            configs: Mutex::new(Vec::new()),
        }
    }

    /// Configs of every dialog opened so far, in order.
    pub fn configs(&self) -> Vec<DialogConfig> {
        self.configs.lock().unwrap().clone()
    }
}

impl ViewFactory for RecordingFactory {
    fn build(&self, config: DialogConfig, closer: DialogCloser) -> Box<dyn DialogView> {
        self.configs.lock().unwrap().push(config.clone());
        let mut script = self.script.lock().unwrap();
        let reply = if script.is_empty() {
            None
        } else {
            Some(script.remove(0))
        };
        Box::new(ScriptedView {
            reply,
            config,
            closer,
            inputs: HashMap::new(),
        })
    }
}

/// Surface host for tests that must never touch the file picker.
pub struct NullHost;

impl SurfaceHost for NullHost {
    fn mount(&self, _props: PickerProps) -> Box<dyn FileSurface> {
        panic!("no file surface expected in this test");
    }
}

/// Surface host answering each mount with the next scripted path
/// (`None` = empty change, i.e. nothing selected).
pub struct ScriptedHost {
    answers: Mutex<Vec<Option<String>>>,
    props_seen: Mutex<Vec<PickerProps>>,
}

impl ScriptedHost {
    pub fn new(answers: Vec<Option<&str>>) -> Self {
        Self {
            answers: Mutex::new(
                answers
                    .into_iter()
                    .map(|a| a.map(|p| p.to_string()))
                    .collect(),
            ),
            props_seen: Mutex::new(Vec::new()),
        }
    }

    pub fn props_seen(&self) -> Vec<PickerProps> {
        self.props_seen.lock().unwrap().clone()
    }
}

struct ScriptedSurface {
    answer: Option<String>,
}

#[async_trait]
impl FileSurface for ScriptedSurface {
    fn trigger(&mut self) {}

    async fn changed(&mut self) -> String {
        self.answer.take().unwrap_or_default()
    }

    fn remove(&mut self) {}
}

impl SurfaceHost for ScriptedHost {
    fn mount(&self, props: PickerProps) -> Box<dyn FileSurface> {
        self.props_seen.lock().unwrap().push(props);
        let mut answers = self.answers.lock().unwrap();
        let answer = if answers.is_empty() {
            None
        } else {
            answers.remove(0)
        };
        Box::new(ScriptedSurface { answer })
    }
}

/// Auth client scripted to accept or reject every login.
pub struct FakeAuth {
    accept: bool,
    token: String,
    snapshot: Mutex<Option<AuthSnapshot>>,
    logins: Mutex<Vec<(String, String)>>,
}

impl FakeAuth {
    pub fn accepting() -> Self {
        Self {
            accept: true,
            token: "issued-token".to_string(),
            snapshot: Mutex::new(None),
            logins: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            accept: false,
            token: String::new(),
            snapshot: Mutex::new(None),
            logins: Mutex::new(Vec::new()),
        }
    }

    /// Every `(username, password)` pair passed to `login`, in order.
    pub fn logins(&self) -> Vec<(String, String)> {
        self.logins.lock().unwrap().clone()
    }
}

#[async_trait]
impl AuthClient for FakeAuth {
    async fn login(&self, username: &str, password: &str) -> Result<(), DialogError> {
        self.logins
            .lock()
            .unwrap()
            .push((username.to_string(), password.to_string()));
        if self.accept {
            *self.snapshot.lock().unwrap() = Some(AuthSnapshot {
                username: username.to_string(),
                token: self.token.clone(),
            });
            Ok(())
        } else {
            Err(DialogError::Auth("invalid credentials".to_string()))
        }
    }

    fn snapshot(&self) -> Option<AuthSnapshot> {
        self.snapshot.lock().unwrap().clone()
    }
}

/// Convenience: a `ValueMap` from `(key, value)` pairs.
pub fn value_map<const N: usize>(pairs: [(&str, FieldValue); N]) -> ValueMap {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

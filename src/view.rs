//! The dialog view collaborator contract.
//!
//! Rendering and input handling are owned entirely by the embedding shell;
//! this crate only defines the capability set a view must provide: be built
//! from a [`DialogConfig`], refresh itself on demand, and signal its close
//! exactly once through the [`DialogCloser`] it was handed at construction.

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;

use crate::error::DialogError;
use crate::extract::FieldSource;
use crate::fields::{FieldSchema, ValueMap};

/// Which dialog variant a configuration targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Fields,
    Prompt,
    Select,
    Confirm,
    Alert,
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogKind::Fields => "fields",
            DialogKind::Prompt => "prompt",
            DialogKind::Select => "select",
            DialogKind::Confirm => "confirm",
            DialogKind::Alert => "alert",
        };
        f.write_str(name)
    }
}

/// The terminal payload a dialog view closes with.
#[derive(Clone, Debug, PartialEq)]
pub enum DialogResult {
    /// Extracted form values (fields dialogs).
    Values(ValueMap),
    /// A single scalar answer (prompt/select dialogs).
    Text(String),
    /// Acknowledgment (confirm/alert dialogs).
    Ack(bool),
}

/// Extraction strategy signature run against a view's live inputs.
pub type SelectorFn = dyn Fn(&dyn FieldSource) -> Result<DialogResult, DialogError> + Send + Sync;

/// Late-bound choice of how a closing dialog turns its live state into a
/// [`DialogResult`].
#[derive(Clone)]
pub enum ValueSelector {
    /// A strategy the view implementation knows by name (e.g. `"prompt"`).
    Named(String),
    /// A closure the view runs against its live inputs at affirmative close.
    Custom(Arc<SelectorFn>),
}

impl ValueSelector {
    pub fn named(id: impl Into<String>) -> Self {
        ValueSelector::Named(id.into())
    }

    pub fn custom(
        f: impl Fn(&dyn FieldSource) -> Result<DialogResult, DialogError> + Send + Sync + 'static,
    ) -> Self {
        ValueSelector::Custom(Arc::new(f))
    }

    /// Run the selector against a view's live inputs. Named strategies are
    /// the view's job; asking the core to run one is a configuration defect.
    pub fn resolve(&self, source: &dyn FieldSource) -> Result<DialogResult, DialogError> {
        match self {
            ValueSelector::Custom(f) => f(source),
            ValueSelector::Named(id) => Err(DialogError::Config(format!(
                "named selector '{}' must be resolved by the view implementation",
                id
            ))),
        }
    }
}

impl fmt::Debug for ValueSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSelector::Named(id) => f.debug_tuple("Named").field(id).finish(),
            ValueSelector::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One dialog invocation's full configuration.
///
/// Built fresh for every call and handed to the view once; never mutated or
/// reused after the dialog opens.
#[derive(Clone, Debug)]
pub struct DialogConfig {
    pub kind: DialogKind,
    pub title: Option<String>,
    pub message: Option<String>,
    pub fields: FieldSchema,
    /// Initial values pre-filling the rendered form.
    pub values: ValueMap,
    /// Pre-filled answer for prompt/select dialogs.
    pub default: Option<String>,
    /// Enumerated answers for select dialogs; the view constrains its input
    /// to this set.
    pub choices: Vec<String>,
    pub auto_focus: bool,
    pub selector: Option<ValueSelector>,
}

impl DialogConfig {
    pub fn new(kind: DialogKind) -> Self {
        Self {
            kind,
            title: None,
            message: None,
            fields: FieldSchema::new(),
            values: ValueMap::new(),
            default: None,
            choices: Vec::new(),
            auto_focus: false,
            selector: None,
        }
    }
}

/// One-shot close signal handed to a view at construction.
///
/// The first call to [`close`](Self::close) decides the dialog's outcome;
/// any later call is a no-op. Dropping the closer without calling it rejects
/// the dialog as abandoned.
pub struct DialogCloser {
    tx: Option<oneshot::Sender<Option<DialogResult>>>,
}

impl DialogCloser {
    pub(crate) fn new(tx: oneshot::Sender<Option<DialogResult>>) -> Self {
        Self { tx: Some(tx) }
    }

    /// Signal the close. `Some` is an affirmative result, `None` is a
    /// cancellation.
    pub fn close(&mut self, result: Option<DialogResult>) {
        if let Some(tx) = self.tx.take() {
            // The receiver may already be gone if the opener was dropped.
            let _ = tx.send(result);
        } else {
            tracing::warn!("dialog close signalled more than once; ignoring");
        }
    }

    /// Shorthand for a cancellation close.
    pub fn cancel(&mut self) {
        self.close(None);
    }

    /// Whether the close signal has already been spent.
    pub fn is_spent(&self) -> bool {
        self.tx.is_none()
    }
}

impl fmt::Debug for DialogCloser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogCloser")
            .field("spent", &self.is_spent())
            .finish()
    }
}

/// A live dialog view: the transient handle exposed between construction
/// and close. Lifecycle ownership stays with the opener.
pub trait DialogView: FieldSource + Send {
    /// Render or refresh the dialog's presentation.
    fn update(&mut self);
}

/// Builds concrete views for dialog configurations. The factory decides the
/// variant from [`DialogConfig::kind`]; all variants share one contract.
pub trait ViewFactory: Send + Sync {
    fn build(&self, config: DialogConfig, closer: DialogCloser) -> Box<dyn DialogView>;
}

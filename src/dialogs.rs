//! Typed dialog builders over the lifecycle controller.
//!
//! Each builder only assembles a [`DialogConfig`] and hands it to
//! [`dialog_manager::open`]; extraction lives in [`crate::extract`] and
//! persistence in the collaborators. [`Dialogs`] carries those
//! collaborators explicitly — there is no ambient singleton.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::auth::AuthClient;
use crate::dialog_manager;
use crate::error::DialogError;
use crate::extract::collect_values;
use crate::fields::{FieldSchema, ValueMap};
use crate::file_picker::{self, PickerProps, SurfaceHost, SurfaceSlot};
use crate::settings::SettingsStore;
use crate::view::{DialogConfig, DialogKind, DialogResult, ValueSelector, ViewFactory};

/// Entry point for opening dialogs and running dialog-driven workflows.
pub struct Dialogs {
    views: Arc<dyn ViewFactory>,
    surfaces: Arc<dyn SurfaceHost>,
    pub(crate) settings: Arc<dyn SettingsStore>,
    pub(crate) auth: Arc<dyn AuthClient>,
    picker_slot: SurfaceSlot,
}

impl Dialogs {
    pub fn new(
        views: Arc<dyn ViewFactory>,
        surfaces: Arc<dyn SurfaceHost>,
        settings: Arc<dyn SettingsStore>,
        auth: Arc<dyn AuthClient>,
    ) -> Self {
        Self {
            views,
            surfaces,
            settings,
            auth,
            picker_slot: SurfaceSlot::new(),
        }
    }

    /// Open a dialog through an explicit view factory instead of the
    /// default one. Escape hatch for custom dialog implementations.
    pub async fn open_with(
        &self,
        views: &dyn ViewFactory,
        config: DialogConfig,
    ) -> Result<DialogResult, DialogError> {
        dialog_manager::open(views, config).await
    }

    /// Open a form dialog and extract its values on affirmative close.
    ///
    /// The extraction plan is the schema itself: the selector walks it in
    /// declaration order against the view's live inputs.
    pub async fn fields(
        &self,
        title: &str,
        schema: FieldSchema,
        initial: ValueMap,
    ) -> Result<ValueMap, DialogError> {
        let plan = schema.clone();
        let mut config = DialogConfig::new(DialogKind::Fields);
        config.title = Some(title.to_string());
        config.fields = schema;
        config.values = initial;
        config.auto_focus = true;
        config.selector = Some(ValueSelector::custom(move |source| {
            collect_values(&plan, source).map(DialogResult::Values)
        }));

        match dialog_manager::open(self.views.as_ref(), config).await? {
            DialogResult::Values(values) => Ok(values),
            _ => Err(DialogError::UnexpectedResult { expected: "values" }),
        }
    }

    /// Open a single-line prompt with a pre-filled default answer.
    pub async fn prompt(
        &self,
        title: &str,
        message: &str,
        default: &str,
    ) -> Result<String, DialogError> {
        let mut config = DialogConfig::new(DialogKind::Prompt);
        config.title = Some(title.to_string());
        config.message = Some(message.to_string());
        config.default = Some(default.to_string());
        config.auto_focus = true;
        config.selector = Some(ValueSelector::named("prompt"));

        match dialog_manager::open(self.views.as_ref(), config).await? {
            DialogResult::Text(answer) => Ok(answer),
            _ => Err(DialogError::UnexpectedResult { expected: "text" }),
        }
    }

    /// Open a choice prompt constrained to the given options.
    pub async fn select(
        &self,
        title: &str,
        message: &str,
        choices: &[String],
        default: &str,
    ) -> Result<String, DialogError> {
        let mut config = DialogConfig::new(DialogKind::Select);
        config.title = Some(title.to_string());
        config.message = Some(message.to_string());
        config.choices = choices.to_vec();
        config.default = Some(default.to_string());
        config.auto_focus = true;
        config.selector = Some(ValueSelector::named("prompt"));

        match dialog_manager::open(self.views.as_ref(), config).await? {
            DialogResult::Text(answer) => Ok(answer),
            _ => Err(DialogError::UnexpectedResult { expected: "text" }),
        }
    }

    /// Ask for confirmation with a message only (no title).
    pub async fn confirm(&self, message: &str) -> Result<bool, DialogError> {
        self.confirm_config(None, message).await
    }

    /// Ask for confirmation with both a title and a message.
    pub async fn confirm_titled(&self, title: &str, message: &str) -> Result<bool, DialogError> {
        self.confirm_config(Some(title), message).await
    }

    async fn confirm_config(
        &self,
        title: Option<&str>,
        message: &str,
    ) -> Result<bool, DialogError> {
        let mut config = DialogConfig::new(DialogKind::Confirm);
        config.title = title.map(str::to_string);
        config.message = Some(message.to_string());

        match dialog_manager::open(self.views.as_ref(), config).await? {
            DialogResult::Ack(answer) => Ok(answer),
            _ => Err(DialogError::UnexpectedResult { expected: "ack" }),
        }
    }

    /// Show an acknowledgment-only dialog.
    pub async fn alert(&self, title: &str, message: &str) -> Result<(), DialogError> {
        let mut config = DialogConfig::new(DialogKind::Alert);
        config.title = Some(title.to_string());
        config.message = Some(message.to_string());

        match dialog_manager::open(self.views.as_ref(), config).await? {
            DialogResult::Ack(_) => Ok(()),
            _ => Err(DialogError::UnexpectedResult { expected: "ack" }),
        }
    }

    /// Drive the native file picker directly; no dialog view is involved.
    pub async fn file(&self, props: PickerProps) -> Result<PathBuf, DialogError> {
        file_picker::pick(self.surfaces.as_ref(), &self.picker_slot, props).await
    }

    /// File selection pre-configured as a save target.
    pub async fn save_as(
        &self,
        path: impl Into<String>,
        base_path: impl Into<PathBuf>,
    ) -> Result<PathBuf, DialogError> {
        self.file(PickerProps::save_target(path, base_path)).await
    }

    /// Directory selection.
    pub async fn folder(&self) -> Result<PathBuf, DialogError> {
        self.file(PickerProps::folder()).await
    }

    /// Surface a failure to the user, then hand the same error back so the
    /// caller can re-raise it. Pass-through, not a recovery path.
    pub async fn error(&self, err: DialogError) -> DialogError {
        warn!(%err, "surfacing failure to user");
        // The alert's own outcome is irrelevant; the original failure is
        // what propagates.
        let _ = self.alert("Error:", &err.to_string()).await;
        err
    }
}

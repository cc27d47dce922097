//! Dialog lifecycle management: run one dialog instance to completion and
//! expose that completion as a single awaitable outcome.
//!
//! The contract with the view collaborator is small: the view is built from
//! a config together with a [`DialogCloser`], renders itself however the
//! shell likes, and calls the closer exactly once. Everything here is about
//! turning that close signal into exactly one resolution or rejection.

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::DialogError;
use crate::view::{DialogCloser, DialogConfig, DialogResult, DialogView, ViewFactory};

/// Open a dialog and await its single terminal outcome.
///
/// A non-null close payload resolves `Ok` — including falsy-but-present
/// payloads like `Ack(false)` or an empty `Text`, which are genuine results,
/// not cancellations. A `None` payload rejects with
/// [`DialogError::Cancelled`], and a view that drops its closer without
/// signalling rejects with [`DialogError::Abandoned`].
///
/// The view instance lives exactly as long as this call: it is built here,
/// dropped when the outcome is known, and never reused.
pub async fn open(
    views: &dyn ViewFactory,
    config: DialogConfig,
) -> Result<DialogResult, DialogError> {
    open_observed(views, config, |_| {}).await
}

/// [`open`], additionally exposing the live dialog handle to `on_ready`.
///
/// The observer runs after construction and before the initial render, so a
/// caller can position the dialog or wire custom behavior without racing its
/// first paint. Within one dialog the order is fixed: construct, expose,
/// render, close.
pub async fn open_observed(
    views: &dyn ViewFactory,
    config: DialogConfig,
    on_ready: impl FnOnce(&mut dyn DialogView),
) -> Result<DialogResult, DialogError> {
    let kind = config.kind;
    debug!(%kind, "opening dialog");

    let (tx, rx) = oneshot::channel();
    let mut view = views.build(config, DialogCloser::new(tx));
    on_ready(view.as_mut());
    view.update();

    let outcome = rx.await.map_err(|_| DialogError::Abandoned)?;
    // The view is dropped on return; its presentation state goes with it.
    match outcome {
        Some(result) => {
            debug!(%kind, "dialog resolved");
            Ok(result)
        }
        None => {
            debug!(%kind, "dialog cancelled");
            Err(DialogError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{FieldInput, FieldSource};
    use crate::view::DialogKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// What a scripted view should do when it first renders.
    #[derive(Clone)]
    enum Script {
        Close(Option<DialogResult>),
        /// Drop the closer without ever signalling.
        Abandon,
    }

    struct ScriptedView {
        script: Script,
        closer: DialogCloser,
        updates: Arc<AtomicUsize>,
    }

    impl FieldSource for ScriptedView {
        fn input(&self, _key: &str) -> Option<&dyn FieldInput> {
            None
        }
    }

    impl DialogView for ScriptedView {
        fn update(&mut self) {
            self.updates.fetch_add(1, Ordering::SeqCst);
            match self.script.clone() {
                Script::Close(result) => self.closer.close(result),
                Script::Abandon => self.closer = DialogCloser::new(oneshot::channel().0),
            }
        }
    }

    struct ScriptedFactory {
        script: Script,
        updates: Arc<AtomicUsize>,
    }

    impl ScriptedFactory {
        fn new(script: Script) -> Self {
            Self {
                script,
                updates: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl ViewFactory for ScriptedFactory {
        fn build(&self, _config: DialogConfig, closer: DialogCloser) -> Box<dyn DialogView> {
            Box::new(ScriptedView {
                script: self.script.clone(),
                closer,
                updates: Arc::clone(&self.updates),
            })
        }
    }

    #[tokio::test]
    async fn test_open_resolves_with_close_payload() {
        let factory = ScriptedFactory::new(Script::Close(Some(DialogResult::Text("yes".into()))));
        let got = open(&factory, DialogConfig::new(DialogKind::Prompt))
            .await
            .unwrap();
        assert_eq!(got, DialogResult::Text("yes".into()));
        assert_eq!(factory.updates.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_open_preserves_falsy_payloads() {
        for payload in [
            DialogResult::Ack(false),
            DialogResult::Text(String::new()),
            DialogResult::Text("0".into()),
        ] {
            let factory = ScriptedFactory::new(Script::Close(Some(payload.clone())));
            let got = open(&factory, DialogConfig::new(DialogKind::Confirm))
                .await
                .unwrap();
            assert_eq!(got, payload);
        }
    }

    #[tokio::test]
    async fn test_open_rejects_on_null_close() {
        let factory = ScriptedFactory::new(Script::Close(None));
        let err = open(&factory, DialogConfig::new(DialogKind::Confirm))
            .await
            .unwrap_err();
        assert!(matches!(err, DialogError::Cancelled));
    }

    #[tokio::test]
    async fn test_open_rejects_when_view_abandons_closer() {
        let factory = ScriptedFactory::new(Script::Abandon);
        let err = open(&factory, DialogConfig::new(DialogKind::Alert))
            .await
            .unwrap_err();
        assert!(matches!(err, DialogError::Abandoned));
    }

    #[tokio::test]
    async fn test_observer_runs_between_construction_and_render() {
        let factory = ScriptedFactory::new(Script::Close(Some(DialogResult::Ack(true))));
        let updates = Arc::clone(&factory.updates);

        let mut seen_before_render = None;
        let _ = open_observed(&factory, DialogConfig::new(DialogKind::Alert), |_handle| {
            seen_before_render = Some(updates.load(Ordering::SeqCst));
        })
        .await
        .unwrap();

        // The handle was exposed before the first update() call.
        assert_eq!(seen_before_render, Some(0));
        assert_eq!(factory.updates.load(Ordering::SeqCst), 1);
    }
}

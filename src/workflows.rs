//! Dialog-driven workflows: chained sequences that turn a fields dialog's
//! outcome into settings persistence or a remote account connection.
//!
//! Cancelling the initial dialog of either workflow is expected user
//! behavior: the cancellation propagates to the caller untouched and no
//! side effect runs. Every failure after that first stage is routed through
//! [`Dialogs::error`], so it is both shown to the user and re-raised.

use tracing::{debug, info};

use crate::dialogs::Dialogs;
use crate::error::DialogError;
use crate::fields::{FieldDescriptor, FieldSchema, FieldValue, ValueMap};

impl Dialogs {
    /// Open the advanced settings form pre-populated from the store; on
    /// affirmative close, write the new values back and persist them, in
    /// that order.
    pub async fn settings(&self) -> Result<(), DialogError> {
        let schema = FieldSchema::new()
            .with("autoFileManagement", FieldDescriptor::checkbox("Auto file management"))
            .with("username", FieldDescriptor::text("Username"))
            .with("token", FieldDescriptor::text("Token"))
            .with("host", FieldDescriptor::text("Host"));

        let current = self.settings.all();
        let values = self.fields("Advanced Settings", schema, current).await?;

        self.settings.set_all(&values);
        if let Err(err) = self.settings.persist() {
            return Err(self.error(err.into()).await);
        }
        debug!("settings updated and persisted");
        Ok(())
    }

    /// Ask for account credentials, authenticate, store the resulting
    /// identity, and confirm with an acknowledgment alert.
    ///
    /// The stages after the credentials dialog run strictly in sequence and
    /// fail as a whole at the first failing stage.
    pub async fn connect_account(&self) -> Result<(), DialogError> {
        let schema = FieldSchema::new()
            .with("username", FieldDescriptor::text("Username or Email"))
            .with("password", FieldDescriptor::password("Password"));

        let credentials = self
            .fields("Connect your account", schema, ValueMap::new())
            .await?;

        let username = text_value(&credentials, "username");
        let password = text_value(&credentials, "password");

        if let Err(err) = self.authenticate_and_store(&username, &password).await {
            return Err(self.error(err).await);
        }

        info!(username = %username, "account connected");
        // The connection is complete at this point; dismissing the
        // acknowledgment must not turn it into a failure.
        let _ = self
            .alert(
                "Account connected",
                "Your account is now connected to this computer.",
            )
            .await;
        Ok(())
    }

    async fn authenticate_and_store(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(), DialogError> {
        self.auth.login(username, password).await?;

        let identity = self.auth.snapshot().ok_or_else(|| {
            DialogError::Config("auth client holds no identity after login".to_string())
        })?;
        self.settings
            .set("username", FieldValue::Text(identity.username));
        self.settings.set("token", FieldValue::Text(identity.token));
        self.settings.persist()?;
        Ok(())
    }
}

fn text_value(values: &ValueMap, key: &str) -> String {
    values
        .get(key)
        .and_then(FieldValue::as_str)
        .unwrap_or_default()
        .to_string()
}

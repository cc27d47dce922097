//! Modal dialog orchestration for the Quill editor shell.
//!
//! The core is the dialog lifecycle engine (`dialog_manager`) and the
//! per-field-type value extraction (`extract`); dialog builders and the
//! settings/account workflows sit on top. Rendering, the native OS file
//! picker, the remote account service, and the settings file are all
//! collaborators behind traits.

pub mod auth;
pub mod dialog_manager;
pub mod dialogs;
pub mod error;
pub mod extract;
pub mod fields;
pub mod file_picker;
pub mod settings;
pub mod view;
pub mod workflows;

#[cfg(test)]
pub mod testkit;

//! lintrelay library - Relay an external analyzer's findings into editors
//!
//! This library exposes the run pipeline of lintrelay for testing and
//! embedding purposes: editor plugins construct an [`Engine`], fire
//! [`Engine::request_run`] on a save or a keybinding, and read results
//! back through an [`EditorBridge`].

pub mod analyzer;
pub mod bridge;
pub mod config;
pub mod engine;
pub mod files;
pub mod filters;
pub mod heartbeat;
pub mod sink;
pub mod store;

pub use bridge::EditorBridge;
pub use config::EngineConfig;
pub use engine::{Engine, EngineState, Invalidation};

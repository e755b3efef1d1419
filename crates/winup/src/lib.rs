//! Update orchestration engine plus the settings, repository, and event
//! plumbing shared by any frontend.
//!
//! The engine never draws anything: a frontend hands it a [`Reporter`] and
//! consumes the matching receiver. The bundled binary is a minimal console
//! frontend doing exactly that.

pub mod engine;
pub mod events;
pub mod gate;
pub mod logging;
pub mod repo;
pub mod settings;

pub use engine::Engine;
pub use events::{LogLevel, Reporter, StatusIcon, StatusTone, UiEvent};
pub use gate::WorkflowGate;
pub use repo::LocalRepository;
pub use settings::{
    JsonSettingsStore, Settings, SettingsStore, UpdateCategories, UpdateCategory,
};

pub mod animator;
pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod contact;
pub mod core;
pub mod error;
pub mod headless;
pub mod renderer;
pub mod scene;
pub mod traits;
pub mod types;
pub mod window;

pub use animator::{Animator, AnimatorState, TickOutcome};
pub use config::AnimatorConfig;
pub use contact::{ContactError, ContactForm, SuccessNotice};
pub use error::{SceneError, SceneResult};

//! Client core for the PersonalLearn web app.
//!
//! Everything here is platform-neutral so it runs both inside the browser
//! (wasm32) and under native `cargo test`. Browser specifics (localStorage,
//! Blob downloads, console logging) live in the frontend crate.

pub mod api;
pub mod config;
pub mod content;
pub mod error;
pub mod flow;
pub mod model;
pub mod nav;
pub mod session;

pub use api::{ApiClient, LearningApi, QuestionSet};
pub use config::AppConfig;
pub use error::{ApiError, FlowError, StoreError};
pub use model::{Course, CourseRequest, GeneratedCourse, PdfUpload, Profile, QuizQuestion, Unit};
pub use nav::{Step, Theme};
pub use session::{CourseHandoff, MemoryStore, QuizHandoff, SessionStore};

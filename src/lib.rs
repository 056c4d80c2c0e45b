//! # Aura Gym
//!
//! Asynchronous workout timer engine and local data store for the Aura Gym
//! app, built on top of Tokio.
//!
//! The heart of the crate is a timer manager owning one independent
//! countdown per workout, driven by a single heartbeat and controlled
//! through a cheap cloneable handle. Around it sit the read-only workout
//! catalog, the diet-plan viewer state and a flat JSON-file store for the
//! onboarding questionnaire and contact messages.
//!
//! ## Features
//!
//! - **Asynchronous**: Built on Tokio for cooperative, non-blocking timers
//! - **Independent Countdowns**: One timer per catalog workout, started and
//!   stopped idempotently
//! - **Pluggable Surfaces**: Displays and completion notifications go
//!   through traits, so any frontend can sink them
//! - **Graceful Shutdown**: Cancellation-token support tears every
//!   countdown down with the manager
//! - **Local Persistence**: Questionnaire and contact records in a single
//!   JSON blob, browser-local-storage style
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use aura_gym::{
//!     CancellationToken, Duration, LogDisplay, LogNotifier, StartOutcome,
//!     TimerManager, WorkoutCatalog,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cancel_token = CancellationToken::new();
//!
//!     let (manager, handle) = TimerManager::new(
//!         "aura".to_string(),
//!         Arc::new(WorkoutCatalog::default()),
//!         Box::new(LogDisplay),
//!         Box::new(LogNotifier),
//!         Duration::from_secs(1), // tick period
//!         100,                    // command buffer size
//!         cancel_token.clone(),
//!     );
//!
//!     // Spawn the manager task
//!     tokio::spawn(manager.run());
//!
//!     // Start the "Chest & Triceps" countdown, then cancel it
//!     assert_eq!(handle.start(0).await?, StartOutcome::Started);
//!     handle.stop(0).await?;
//!
//!     // Shutdown gracefully
//!     handle.shutdown().await?;
//!     Ok(())
//! }
//! ```

mod catalog;
mod diet;
mod error;
mod store;
mod surface;
mod timer;

pub use catalog::{Workout, WorkoutCatalog, WorkoutId};
pub use diet::{plan, DayPlan, DietView, PlanKind};
pub use error::{StoreError, TimerError};
pub use store::{ContactMessage, LocalStore, QuizRecord, MESSAGES_KEY, QUIZ_KEY};
pub use surface::{DisplaySurface, LogDisplay, LogNotifier, Notifier};
pub use timer::{format_time, StartOutcome, StopOutcome, TimerCommand, TimerHandle, TimerManager};

// Re-export commonly used types for convenience
pub use std::time::Duration;
pub use tokio_util::sync::CancellationToken;

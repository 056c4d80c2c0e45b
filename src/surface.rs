use async_trait::async_trait;

use crate::catalog::WorkoutId;

/// Output sink rendering the current `"MM:SS"` string for a workout.
///
/// Displays are write-only: the manager never reads timer configuration or
/// state back out of a display.
#[async_trait]
pub trait DisplaySurface: Send {
    async fn set_text(&mut self, id: WorkoutId, text: &str);
}

/// Notification surface for one-shot completion messages
#[async_trait]
pub trait Notifier: Send {
    async fn notify(&mut self, message: &str);
}

/// Display surface that writes through the `log` crate
#[derive(Debug, Default)]
pub struct LogDisplay;

#[async_trait]
impl DisplaySurface for LogDisplay {
    async fn set_text(&mut self, id: WorkoutId, text: &str) {
        log::info!("display[{}] = {}", id, text);
    }
}

/// Notifier that writes through the `log` crate
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&mut self, message: &str) {
        log::info!("notify: {}", message);
    }
}

//! Workout session example: two countdowns, one cancellation, one finish.
//!
//! Uses a shortened tick period so a "minute" passes in three seconds.

use std::sync::Arc;

use async_trait::async_trait;
use aura_gym::{
    CancellationToken, DisplaySurface, Duration, Notifier, TimerManager, Workout, WorkoutCatalog,
    WorkoutId,
};

/// Prints each display update the way the workout cards would render it
struct ConsoleDisplay;

#[async_trait]
impl DisplaySurface for ConsoleDisplay {
    async fn set_text(&mut self, id: WorkoutId, text: &str) {
        println!("  workout {} -> {}", id, text);
    }
}

/// Prints completion messages in place of the flash-message overlay
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&mut self, message: &str) {
        println!("*** {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let catalog = Arc::new(WorkoutCatalog::new(vec![
        Workout::new("Quick Core", 1, &["Plank 2x45s", "Crunches - 2x15"]),
        Workout::new("Mobility", 2, &["Hip Circles - 2x10", "Cat-Cow - 2x10"]),
    ]));

    let cancel_token = CancellationToken::new();
    let (manager, handle) = TimerManager::new(
        "demo".to_string(),
        Arc::clone(&catalog),
        Box::new(ConsoleDisplay),
        Box::new(ConsoleNotifier),
        Duration::from_millis(50), // one "second" per 50ms
        100,                       // command buffer size
        cancel_token.clone(),
    );

    // Spawn the manager task
    tokio::spawn(manager.run());

    println!("Starting both workout countdowns...");
    handle.start(0).await?;
    handle.start(1).await?;

    // A second start for a running countdown is a no-op.
    println!("Redundant start outcome: {:?}", handle.start(0).await?);

    // Let the short workout run to completion while the long one ticks.
    tokio::time::sleep(Duration::from_millis(3200)).await;

    println!("Cancelling the remaining countdown...");
    handle.stop(1).await?;

    // Shutdown gracefully
    handle.shutdown().await?;
    println!("Session over.");
    Ok(())
}

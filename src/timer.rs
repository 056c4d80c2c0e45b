use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::catalog::{WorkoutCatalog, WorkoutId};
use crate::error::TimerError;
use crate::surface::{DisplaySurface, Notifier};

/// Format a second count as zero-padded `"MM:SS"`.
///
/// Minutes are deliberately not capped at 59, so long sessions render as
/// e.g. `"90:00"` rather than rolling over into hours.
///
/// ```
/// assert_eq!(aura_gym::format_time(0), "00:00");
/// assert_eq!(aura_gym::format_time(59), "00:59");
/// assert_eq!(aura_gym::format_time(3600), "60:00");
/// ```
pub fn format_time(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Countdown state for one workout.
///
/// The entry with `running == true` is the only "tick handle" a workout can
/// own: all countdowns are driven by the manager's single heartbeat, so at
/// most one schedule exists per identifier by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TimerState {
    running: bool,
    seconds_remaining: u64,
}

impl TimerState {
    fn armed(total_seconds: u64) -> Self {
        TimerState {
            running: true,
            seconds_remaining: total_seconds,
        }
    }

    /// Advance the countdown by one second
    fn tick(&mut self) -> Tick {
        if !self.running {
            return Tick::Idle;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.running = false;
            Tick::Finished
        } else {
            Tick::Running(self.seconds_remaining)
        }
    }
}

/// What one heartbeat did to a single countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Idle,
    Running(u64),
    Finished,
}

/// Result of a start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// A fresh countdown was armed
    Started,
    /// A countdown was already running for this identifier; nothing changed
    AlreadyRunning,
}

/// Result of a stop request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// A running countdown was cancelled and its display reset
    Stopped,
    /// No countdown was running for this identifier; nothing changed
    Idle,
}

/// Timer command enum
pub enum TimerCommand {
    Start {
        id: WorkoutId,
        reply: oneshot::Sender<Result<StartOutcome, TimerError>>,
    },
    Stop {
        id: WorkoutId,
        reply: oneshot::Sender<StopOutcome>,
    },
    StopAll {
        reply: oneshot::Sender<()>,
    },
    Shutdown,
}

/// Manager for independent per-workout countdown timers.
///
/// Owns the countdown registry and a single one-second heartbeat; commands
/// arrive over a bounded channel from [`TimerHandle`]. Ticks and commands
/// are serialized on the manager task, so once a stop reply is received no
/// further tick for that identifier can fire.
pub struct TimerManager {
    /// Instance name for logging
    name: String,

    /// Channel for receiving timer commands
    command_rx: mpsc::Receiver<TimerCommand>,

    /// Read-only workout catalog; the sole source of durations
    catalog: Arc<WorkoutCatalog>,

    /// Output sink for `"MM:SS"` strings
    display: Box<dyn DisplaySurface>,

    /// Output sink for one-shot completion messages
    notifier: Box<dyn Notifier>,

    /// Countdown registry, keyed by workout identifier
    timers: HashMap<WorkoutId, TimerState>,

    /// Heartbeat period; one second in production, shorter in tests
    tick_period: Duration,

    /// Cancellation token for graceful shutdown
    cancel_token: CancellationToken,
}

/// Handle for controlling the timer manager
#[derive(Clone)]
pub struct TimerHandle {
    command_tx: mpsc::Sender<TimerCommand>,
}

impl TimerManager {
    /// Create a new TimerManager with a bounded command channel
    ///
    /// # Arguments
    /// * `name` - Timer manager instance name
    /// * `catalog` - Workout catalog the identifiers resolve against
    /// * `display` - Display surface receiving formatted remaining times
    /// * `notifier` - Notification surface receiving completion messages
    /// * `tick_period` - Interval between countdown decrements
    /// * `command_buffer_size` - Size of command channel buffer
    /// * `cancel_token` - Token for graceful shutdown
    ///
    /// Returns (TimerManager, TimerHandle)
    pub fn new(
        name: String,
        catalog: Arc<WorkoutCatalog>,
        display: Box<dyn DisplaySurface>,
        notifier: Box<dyn Notifier>,
        tick_period: Duration,
        command_buffer_size: usize,
        cancel_token: CancellationToken,
    ) -> (Self, TimerHandle) {
        let (command_tx, command_rx) = mpsc::channel(command_buffer_size);

        let manager = TimerManager {
            name,
            command_rx,
            catalog,
            display,
            notifier,
            timers: HashMap::new(),
            tick_period,
            cancel_token,
        };

        let handle = TimerHandle { command_tx };

        (manager, handle)
    }

    /// Run the timer manager
    pub async fn run(mut self) {
        // First tick lands one full period after startup, not immediately.
        let mut heartbeat = interval_at(Instant::now() + self.tick_period, self.tick_period);
        heartbeat.set_missed_tick_behavior(MissedTickBehavior::Skip);

        log::info!("Timer manager '{}' started", self.name);

        loop {
            tokio::select! {
                // Handle incoming commands
                Some(command) = self.command_rx.recv() => {
                    let shutdown = self.handle_command(command).await;
                    if shutdown {
                        break;
                    }
                },

                // Advance every running countdown
                _ = heartbeat.tick() => {
                    self.advance_timers().await;
                },

                // Handle cancellation token
                _ = self.cancel_token.cancelled() => {
                    log::info!("Timer manager '{}' cancelled via token", self.name);
                    break;
                },

                // All senders dropped
                else => {
                    log::info!("Timer manager '{}' shutting down - all senders dropped", self.name);
                    break;
                }
            }
        }

        // Teardown: every countdown is cancelled with the manager.
        self.timers.clear();
        log::info!("Timer manager '{}' stopped", self.name);
    }

    /// Handle timer commands
    async fn handle_command(&mut self, command: TimerCommand) -> bool {
        let mut shutdown = false;
        match command {
            TimerCommand::Start { id, reply } => {
                let outcome = self.start_timer(id).await;
                let _ = reply.send(outcome);
            }
            TimerCommand::Stop { id, reply } => {
                let outcome = self.stop_timer(id).await;
                let _ = reply.send(outcome);
            }
            TimerCommand::StopAll { reply } => {
                let ids: Vec<WorkoutId> = self.timers.keys().copied().collect();
                for id in ids {
                    self.stop_timer(id).await;
                }
                let _ = reply.send(());
            }
            TimerCommand::Shutdown => {
                shutdown = true;
            }
        }
        shutdown
    }

    /// Arm a countdown for `id`, unless one is already running
    async fn start_timer(&mut self, id: WorkoutId) -> Result<StartOutcome, TimerError> {
        if self.timers.get(&id).is_some_and(|t| t.running) {
            return Ok(StartOutcome::AlreadyRunning);
        }

        let workout = self
            .catalog
            .get(id)
            .ok_or(TimerError::InvalidIdentifier(id))?;
        let seconds = workout.duration_secs();

        // Replaces any stale stopped state for this identifier.
        self.timers.insert(id, TimerState::armed(seconds));
        self.display.set_text(id, &format_time(seconds)).await;

        log::debug!(
            "Timer {} armed for {}s in manager '{}'",
            id,
            seconds,
            self.name
        );
        Ok(StartOutcome::Started)
    }

    /// Cancel a running countdown; a safe no-op for any other identifier
    async fn stop_timer(&mut self, id: WorkoutId) -> StopOutcome {
        let was_running = match self.timers.get_mut(&id) {
            Some(state) if state.running => {
                state.running = false;
                state.seconds_remaining = 0;
                true
            }
            _ => false,
        };

        if was_running {
            self.display.set_text(id, &format_time(0)).await;
            log::debug!("Timer {} stopped in manager '{}'", id, self.name);
            StopOutcome::Stopped
        } else {
            StopOutcome::Idle
        }
    }

    /// Decrement every running countdown and fire completions
    async fn advance_timers(&mut self) {
        let mut updates = Vec::new();
        let mut finished = Vec::new();

        for (id, state) in self.timers.iter_mut() {
            match state.tick() {
                Tick::Idle => {}
                Tick::Running(seconds) => updates.push((*id, seconds)),
                Tick::Finished => finished.push(*id),
            }
        }

        for (id, seconds) in updates {
            self.display.set_text(id, &format_time(seconds)).await;
        }

        for id in finished {
            self.display.set_text(id, &format_time(0)).await;
            if let Some(workout) = self.catalog.get(id) {
                log::debug!("Timer {} finished in manager '{}'", id, self.name);
                self.notifier
                    .notify(&format!("{} complete! Great job.", workout.name))
                    .await;
            }
        }
    }
}

impl TimerHandle {
    /// Start the countdown for a workout.
    ///
    /// A no-op returning [`StartOutcome::AlreadyRunning`] while a countdown
    /// for the same identifier is active; fails with
    /// [`TimerError::InvalidIdentifier`] when the identifier does not
    /// resolve to a catalog entry.
    pub async fn start(&self, id: WorkoutId) -> Result<StartOutcome, TimerError> {
        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(TimerCommand::Start { id, reply })
            .await
            .map_err(|_| TimerError::Closed)?;
        response.await.map_err(|_| TimerError::Closed)?
    }

    /// Stop the countdown for a workout.
    ///
    /// Idempotent: identifiers with no running countdown (including unknown
    /// ones) report [`StopOutcome::Idle`]. Once this returns, no further
    /// tick for the identifier will fire.
    pub async fn stop(&self, id: WorkoutId) -> Result<StopOutcome, TimerError> {
        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(TimerCommand::Stop { id, reply })
            .await
            .map_err(|_| TimerError::Closed)?;
        response.await.map_err(|_| TimerError::Closed)
    }

    /// Cancel every running countdown and reset its display
    pub async fn stop_all(&self) -> Result<(), TimerError> {
        let (reply, response) = oneshot::channel();
        self.command_tx
            .send(TimerCommand::StopAll { reply })
            .await
            .map_err(|_| TimerError::Closed)?;
        response.await.map_err(|_| TimerError::Closed)
    }

    /// Shutdown the timer manager
    pub async fn shutdown(&self) -> Result<(), TimerError> {
        self.command_tx
            .send(TimerCommand::Shutdown)
            .await
            .map_err(|_| TimerError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Workout;
    use async_trait::async_trait;
    use tokio::time::sleep;

    struct ChannelDisplay(mpsc::UnboundedSender<(WorkoutId, String)>);

    #[async_trait]
    impl DisplaySurface for ChannelDisplay {
        async fn set_text(&mut self, id: WorkoutId, text: &str) {
            let _ = self.0.send((id, text.to_string()));
        }
    }

    struct ChannelNotifier(mpsc::UnboundedSender<String>);

    #[async_trait]
    impl Notifier for ChannelNotifier {
        async fn notify(&mut self, message: &str) {
            let _ = self.0.send(message.to_string());
        }
    }

    const TICK: Duration = Duration::from_millis(10);

    fn short_catalog() -> Arc<WorkoutCatalog> {
        Arc::new(WorkoutCatalog::new(vec![
            Workout::new("Warm-Up", 1, &["Jumping Jacks - 2x20"]),
            Workout::new("Stretch", 2, &["Hamstring Stretch - 2x30s"]),
        ]))
    }

    fn spawn_manager(
        catalog: Arc<WorkoutCatalog>,
        cancel_token: CancellationToken,
    ) -> (
        TimerHandle,
        mpsc::UnboundedReceiver<(WorkoutId, String)>,
        mpsc::UnboundedReceiver<String>,
        tokio::task::JoinHandle<()>,
    ) {
        let (display_tx, display_rx) = mpsc::unbounded_channel();
        let (notify_tx, notify_rx) = mpsc::unbounded_channel();
        let (manager, handle) = TimerManager::new(
            "test".to_string(),
            catalog,
            Box::new(ChannelDisplay(display_tx)),
            Box::new(ChannelNotifier(notify_tx)),
            TICK,
            16,
            cancel_token,
        );
        let task = tokio::spawn(manager.run());
        (handle, display_rx, notify_rx, task)
    }

    fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(item) = rx.try_recv() {
            out.push(item);
        }
        out
    }

    #[test]
    fn format_time_pads_and_never_caps_minutes() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(5405), "90:05");
    }

    #[test]
    fn state_runs_down_to_a_single_finish() {
        let mut state = TimerState::armed(3);
        assert_eq!(state.tick(), Tick::Running(2));
        assert_eq!(state.tick(), Tick::Running(1));
        assert_eq!(state.tick(), Tick::Finished);
        assert!(!state.running);
        // Further ticks stay idle; no second finish.
        assert_eq!(state.tick(), Tick::Idle);
        assert_eq!(state.seconds_remaining, 0);
    }

    #[test]
    fn state_takes_exactly_duration_ticks() {
        let mut state = TimerState::armed(2 * 60);
        for _ in 0..119 {
            assert!(matches!(state.tick(), Tick::Running(_)));
        }
        assert_eq!(state.tick(), Tick::Finished);
    }

    #[tokio::test(start_paused = true)]
    async fn start_then_stop_resets_display() {
        let token = CancellationToken::new();
        let (handle, mut display, mut notes, _task) = spawn_manager(short_catalog(), token);

        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::Started);
        assert_eq!(handle.stop(0).await.unwrap(), StopOutcome::Stopped);

        // Let several would-be ticks elapse; the cancelled countdown must
        // stay silent.
        sleep(TICK * 5).await;

        let writes = drain(&mut display);
        assert_eq!(
            writes,
            vec![(0, "01:00".to_string()), (0, "00:00".to_string())]
        );
        assert!(drain(&mut notes).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent_while_running() {
        let token = CancellationToken::new();
        let (handle, mut display, _notes, _task) = spawn_manager(short_catalog(), token);

        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::Started);
        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::AlreadyRunning);

        // One tick period passes; only one countdown exists.
        sleep(TICK + TICK / 2).await;

        let writes = drain(&mut display);
        assert_eq!(
            writes,
            vec![(0, "01:00".to_string()), (0, "00:59".to_string())]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn completion_notifies_exactly_once() {
        let token = CancellationToken::new();
        let (handle, mut display, mut notes, _task) = spawn_manager(short_catalog(), token);

        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::Started);

        let message = notes.recv().await.unwrap();
        assert_eq!(message, "Warm-Up complete! Great job.");
        assert!(notes.try_recv().is_err());

        // 1 minute = initial write + 59 mid-run writes + final "00:00".
        let writes = drain(&mut display);
        assert_eq!(writes.len(), 61);
        assert_eq!(writes.first().unwrap().1, "01:00");
        assert_eq!(writes.get(1).unwrap().1, "00:59");
        assert_eq!(writes.last().unwrap().1, "00:00");

        // The countdown is back to not-running: a new start arms it fresh.
        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::Started);
    }

    #[tokio::test(start_paused = true)]
    async fn timers_tick_independently() {
        let token = CancellationToken::new();
        let (handle, mut display, mut notes, _task) = spawn_manager(short_catalog(), token);

        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::Started);
        assert_eq!(handle.start(1).await.unwrap(), StartOutcome::Started);

        // Two ticks, then cancel the first countdown only.
        sleep(TICK * 2 + TICK / 2).await;
        assert_eq!(handle.stop(0).await.unwrap(), StopOutcome::Stopped);
        sleep(TICK * 3).await;

        let writes = drain(&mut display);
        let first: Vec<&str> = writes
            .iter()
            .filter(|(id, _)| *id == 0)
            .map(|(_, text)| text.as_str())
            .collect();
        let second: Vec<&str> = writes
            .iter()
            .filter(|(id, _)| *id == 1)
            .map(|(_, text)| text.as_str())
            .collect();

        assert_eq!(first, vec!["01:00", "00:59", "00:58", "00:00"]);
        assert_eq!(
            second,
            vec!["02:00", "01:59", "01:58", "01:57", "01:56", "01:55"]
        );
        assert!(drain(&mut notes).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_identifiers_fail_start_but_not_stop() {
        let token = CancellationToken::new();
        let (handle, mut display, mut notes, _task) = spawn_manager(short_catalog(), token);

        assert_eq!(
            handle.start(99).await,
            Err(TimerError::InvalidIdentifier(99))
        );
        assert_eq!(handle.stop(99).await.unwrap(), StopOutcome::Idle);
        // Never-started but valid identifier is an equally safe no-op.
        assert_eq!(handle.stop(1).await.unwrap(), StopOutcome::Idle);

        assert!(drain(&mut display).is_empty());
        assert!(drain(&mut notes).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_all_cancels_every_countdown() {
        let token = CancellationToken::new();
        let (handle, mut display, _notes, _task) = spawn_manager(short_catalog(), token);

        handle.start(0).await.unwrap();
        handle.start(1).await.unwrap();
        handle.stop_all().await.unwrap();
        sleep(TICK * 3).await;

        let resets: Vec<WorkoutId> = drain(&mut display)
            .into_iter()
            .filter(|(_, text)| text == "00:00")
            .map(|(id, _)| id)
            .collect();
        let mut resets_sorted = resets.clone();
        resets_sorted.sort_unstable();
        assert_eq!(resets_sorted, vec![0, 1]);

        // Both countdowns are free to be re-armed.
        assert_eq!(handle.start(0).await.unwrap(), StartOutcome::Started);
        assert_eq!(handle.start(1).await.unwrap(), StartOutcome::Started);
    }

    #[tokio::test]
    async fn cancellation_token_stops_the_manager() {
        let token = CancellationToken::new();
        let (handle, _display, mut notes, task) = spawn_manager(short_catalog(), token.clone());

        handle.start(0).await.unwrap();
        token.cancel();
        let _ = task.await;

        // Operations after cancellation fail and no events arrive.
        assert_eq!(handle.start(1).await, Err(TimerError::Closed));
        assert!(notes.try_recv().is_err());
    }

    #[tokio::test]
    async fn shutdown_closes_the_handle() {
        let token = CancellationToken::new();
        let (handle, _display, _notes, task) = spawn_manager(short_catalog(), token);

        handle.shutdown().await.unwrap();
        let _ = task.await;

        assert_eq!(handle.start(0).await, Err(TimerError::Closed));
    }
}

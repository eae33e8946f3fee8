//! Animated spinner shown while a webhook call is in flight.

use crossterm::{
    cursor::{Hide, MoveToColumn, Show},
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use tokio::sync::watch;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner configuration.
#[derive(Clone)]
pub struct SpinnerConfig {
    /// Animation frames.
    pub frames: Vec<&'static str>,
    /// Frame duration in milliseconds.
    pub interval_ms: u64,
    /// Spinner color.
    pub color: Color,
    /// Whether to show elapsed seconds.
    pub show_elapsed: bool,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            frames: SPINNER_FRAMES.to_vec(),
            interval_ms: 80,
            color: Color::Cyan,
            show_elapsed: true,
        }
    }
}

/// A spinner handle for controlling the animation.
pub struct SpinnerHandle {
    stop_tx: watch::Sender<bool>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SpinnerHandle {
    /// Stop the spinner.
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
        // Clear the spinner line
        let mut stdout = stdout();
        let _ = stdout.execute(MoveToColumn(0));
        let _ = stdout.execute(Clear(ClearType::CurrentLine));
        let _ = stdout.execute(Show);
    }

    /// Stop the spinner synchronously (non-async).
    pub fn stop_sync(&mut self) {
        let _ = self.stop_tx.send(true);
        // Clear the spinner line
        let mut stdout = stdout();
        let _ = stdout.execute(MoveToColumn(0));
        let _ = stdout.execute(Clear(ClearType::CurrentLine));
        let _ = stdout.execute(Show);
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(true);
        // Ensure cursor is shown
        let mut stdout = stdout();
        let _ = stdout.execute(Show);
    }
}

/// Spinner for showing activity.
pub struct Spinner {
    config: SpinnerConfig,
}

impl Spinner {
    /// Create a new spinner with default config.
    pub fn new() -> Self {
        Self {
            config: SpinnerConfig::default(),
        }
    }

    /// Create with custom config.
    pub fn with_config(config: SpinnerConfig) -> Self {
        Self { config }
    }

    /// Start the spinner with a message.
    pub fn start(&self, message: impl Into<String>) -> SpinnerHandle {
        let config = self.config.clone();
        let message = message.into();
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let started = Instant::now();
            let mut frame_idx = 0;
            let mut stdout = stdout();

            // Hide cursor
            let _ = stdout.execute(Hide);

            loop {
                // Check for stop signal
                if *stop_rx.borrow() {
                    break;
                }

                let frame = config.frames[frame_idx % config.frames.len()];
                let suffix = elapsed_suffix(config.show_elapsed, started.elapsed().as_secs());

                // Render
                let _ = stdout.execute(MoveToColumn(0));
                let _ = stdout.execute(Clear(ClearType::CurrentLine));
                let _ = stdout.execute(SetForegroundColor(config.color));
                let _ = stdout.execute(Print(format!("{} {}{}", frame, message, suffix)));
                let _ = stdout.execute(ResetColor);
                let _ = stdout.flush();

                frame_idx += 1;

                tokio::select! {
                    _ = tokio::time::sleep(Duration::from_millis(config.interval_ms)) => {}
                    _ = stop_rx.changed() => { break; }
                }
            }

            // Show cursor
            let _ = stdout.execute(Show);
        });

        SpinnerHandle {
            stop_tx,
            task: Some(task),
        }
    }
}

impl Default for Spinner {
    fn default() -> Self {
        Self::new()
    }
}

/// Elapsed-seconds suffix for the status line, empty when disabled or
/// less than a second has passed.
fn elapsed_suffix(show: bool, secs: u64) -> String {
    if show && secs > 0 {
        format!(" ({}s)", secs)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_suffix() {
        assert_eq!(elapsed_suffix(true, 0), "");
        assert_eq!(elapsed_suffix(true, 1), " (1s)");
        assert_eq!(elapsed_suffix(true, 42), " (42s)");
        assert_eq!(elapsed_suffix(false, 42), "");
    }

    #[test]
    fn test_spinner_config_default() {
        let config = SpinnerConfig::default();
        assert_eq!(config.interval_ms, 80);
        assert!(config.show_elapsed);
        assert_eq!(config.color, Color::Cyan);
        assert_eq!(config.frames, SPINNER_FRAMES.to_vec());
    }

    #[test]
    fn test_spinner_with_config() {
        let config = SpinnerConfig {
            frames: vec!["-", "\\", "|", "/"],
            interval_ms: 50,
            color: Color::Yellow,
            show_elapsed: false,
        };
        let spinner = Spinner::with_config(config);
        assert_eq!(spinner.config.frames.len(), 4);
        assert_eq!(spinner.config.interval_ms, 50);
        assert!(!spinner.config.show_elapsed);
    }

    #[tokio::test]
    async fn test_spinner_lifecycle() {
        let spinner = Spinner::new();
        let handle = spinner.start("Gerando...");

        // Let it spin briefly
        tokio::time::sleep(Duration::from_millis(100)).await;

        handle.stop().await;
    }

    #[tokio::test]
    async fn test_spinner_stop_sync() {
        let spinner = Spinner::new();
        let mut handle = spinner.start("Gerando...");

        tokio::time::sleep(Duration::from_millis(50)).await;

        handle.stop_sync();
    }

    #[tokio::test]
    async fn test_spinner_handle_drop() {
        let spinner = Spinner::new();
        {
            let handle = spinner.start("Gerando...");
            tokio::time::sleep(Duration::from_millis(50)).await;
            // Drop sends the stop signal without awaiting the task
            drop(handle);
        }
    }
}

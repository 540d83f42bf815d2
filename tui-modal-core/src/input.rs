//! Terminal input: a background task reading crossterm events

use std::time::Duration;

use crossterm::event::{self, Event, MouseEventKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::event::EventKind;

/// Timing for the event poller
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    /// How long one `crossterm::event::poll` waits
    pub poll_timeout: Duration,
    /// Pause between batches
    pub interval: Duration,
    /// Most events read per batch
    pub max_batch: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_timeout: Duration::from_millis(10),
            interval: Duration::from_millis(16),
            max_batch: 20,
        }
    }
}

/// Convert a crossterm event; focus and paste events are dropped
///
/// Wheel motion becomes [`EventKind::Scroll`] so that it reaches the page's
/// scroll root the same way scroll keys do.
pub fn translate(event: Event) -> Option<EventKind> {
    let kind = match event {
        Event::Key(key) => EventKind::Key(key),
        Event::Mouse(mouse) => {
            let delta = match mouse.kind {
                MouseEventKind::ScrollDown => 1,
                MouseEventKind::ScrollUp => -1,
                _ => return Some(EventKind::Mouse(mouse)),
            };
            EventKind::Scroll {
                column: mouse.column,
                row: mouse.row,
                delta,
            }
        }
        Event::Resize(width, height) => EventKind::Resize(width, height),
        _ => return None,
    };
    Some(kind)
}

/// Read up to `max_batch` pending events into `tx`
///
/// Returns `false` once the receiver is gone.
fn forward_batch(tx: &mpsc::UnboundedSender<EventKind>, config: &PollerConfig) -> bool {
    for _ in 0..config.max_batch {
        if !event::poll(config.poll_timeout).unwrap_or(false) {
            break;
        }
        let Some(kind) = event::read().ok().and_then(translate) else {
            continue;
        };
        if tx.send(kind).is_err() {
            return false;
        }
    }
    true
}

/// Spawn the task feeding terminal events into `tx`
///
/// Runs until `cancel` fires or the receiver is dropped. On cancellation the
/// terminal's input buffer is drained so that keys typed during shutdown do
/// not leak into the shell.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<EventKind>,
    config: PollerConfig,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    tracing::debug!("Event poller stopped");
                    break;
                }
                _ = tokio::time::sleep(config.interval) => {
                    if !forward_batch(&tx, &config) {
                        tracing::debug!("Event receiver dropped, poller exiting");
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{key, mouse_down};
    use crossterm::event::{KeyModifiers, MouseEvent};

    fn wheel(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 20,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_keys_and_presses_pass_through() {
        let escape = translate(Event::Key(key("esc"))).unwrap();
        assert!(escape.key_press().is_some());

        let press = translate(Event::Mouse(mouse_down(3, 2))).unwrap();
        assert_eq!(press.left_press(), Some((3, 2)));
    }

    #[test]
    fn test_wheel_becomes_scroll() {
        assert!(matches!(
            translate(wheel(MouseEventKind::ScrollUp)),
            Some(EventKind::Scroll {
                column: 10,
                row: 20,
                delta: -1
            })
        ));
        assert!(matches!(
            translate(wheel(MouseEventKind::ScrollDown)),
            Some(EventKind::Scroll { delta: 1, .. })
        ));
    }

    #[test]
    fn test_resize_and_ignored_events() {
        assert!(matches!(
            translate(Event::Resize(80, 24)),
            Some(EventKind::Resize(80, 24))
        ));
        assert!(translate(Event::FocusGained).is_none());
    }
}

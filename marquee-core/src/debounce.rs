//! Debounced values.
//!
//! A debounced value only follows its input after the input has been quiet
//! for a fixed window. `settled_value` is the pure definition over a recorded
//! input timeline; `Debouncer` is the live version driven by `tokio::time`.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

/// Returns the debounced value observed at offset `now` for a timeline of
/// `(offset, value)` input events sorted by offset.
///
/// An event's value becomes the settled value once `window` elapses without
/// a newer event. Before any event settles, `initial` is observed.
pub fn settled_value<T: Clone>(
    initial: &T,
    events: &[(Duration, T)],
    window: Duration,
    now: Duration,
) -> T {
    let mut settled = initial;

    for (index, (at, value)) in events.iter().enumerate() {
        if *at > now {
            break;
        }
        let fires_at = *at + window;
        let interrupted = events
            .get(index + 1)
            .is_some_and(|(next, _)| *next < fires_at);

        if fires_at <= now && !interrupted {
            settled = value;
        }
    }

    settled.clone()
}

/// Live debouncer publishing settled values on a watch channel.
///
/// Inputs are fed with [`Debouncer::push`]. A background task restarts the
/// quiescence timer on each input and publishes the latest input once the
/// timer expires. Publishing skips values equal to the current settled value.
#[derive(Debug)]
pub struct Debouncer<T> {
    input: mpsc::UnboundedSender<T>,
    settled: watch::Receiver<T>,
}

impl<T> Debouncer<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Spawns the timer task. `initial` is the settled value until the first
    /// input settles.
    pub fn spawn(initial: T, window: Duration) -> Self {
        let (input, mut input_rx) = mpsc::unbounded_channel::<T>();
        let (settled_tx, settled) = watch::channel(initial);

        tokio::spawn(async move {
            while let Some(mut latest) = input_rx.recv().await {
                let mut deadline = Instant::now() + window;
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => break,
                        next = input_rx.recv() => match next {
                            Some(value) => {
                                latest = value;
                                deadline = Instant::now() + window;
                            }
                            None => return,
                        },
                    }
                }

                settled_tx.send_if_modified(|current| {
                    if *current == latest {
                        false
                    } else {
                        *current = latest;
                        true
                    }
                });
            }
        });

        Self { input, settled }
    }

    /// Records a new input value and restarts the quiescence window.
    pub fn push(&self, value: T) {
        // The timer task only exits once every sender is gone.
        let _ = self.input.send(value);
    }

    /// Current settled value.
    pub fn current(&self) -> T {
        self.settled.borrow().clone()
    }

    /// Subscribes to settled-value changes.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.settled.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_initial_value_until_first_input_settles() {
        let events = vec![(ms(0), "m".to_string())];
        let initial = String::new();

        assert_eq!(settled_value(&initial, &events, WINDOW, ms(499)), "");
        assert_eq!(settled_value(&initial, &events, WINDOW, ms(500)), "m");
    }

    #[test]
    fn test_rapid_typing_only_settles_last_value() {
        let events: Vec<(Duration, String)> = ["m", "ma", "mat", "matrix"]
            .iter()
            .enumerate()
            .map(|(i, text)| (ms(i as u64 * 100), text.to_string()))
            .collect();
        let initial = String::new();

        assert_eq!(settled_value(&initial, &events, WINDOW, ms(700)), "");
        assert_eq!(settled_value(&initial, &events, WINDOW, ms(800)), "matrix");
    }

    #[test]
    fn test_pause_between_words_settles_intermediate_value() {
        let events = vec![
            (ms(0), "star".to_string()),
            (ms(900), "star wars".to_string()),
        ];
        let initial = String::new();

        assert_eq!(settled_value(&initial, &events, WINDOW, ms(899)), "star");
        assert_eq!(settled_value(&initial, &events, WINDOW, ms(1200)), "star");
        assert_eq!(
            settled_value(&initial, &events, WINDOW, ms(1400)),
            "star wars"
        );
    }

    #[test]
    fn test_zero_window_follows_input() {
        let events = vec![(ms(0), 1), (ms(1), 2)];
        assert_eq!(settled_value(&0, &events, Duration::ZERO, ms(1)), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_publishes_after_quiet_window() {
        let debouncer = Debouncer::spawn(String::new(), WINDOW);
        let mut settled = debouncer.subscribe();

        debouncer.push("ma".to_string());
        tokio::time::sleep(ms(200)).await;
        debouncer.push("matrix".to_string());
        tokio::time::sleep(ms(400)).await;
        assert_eq!(debouncer.current(), "");

        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow(), "matrix");
    }

    #[tokio::test(start_paused = true)]
    async fn test_debouncer_skips_unchanged_value() {
        let debouncer = Debouncer::spawn("heat".to_string(), WINDOW);
        let mut settled = debouncer.subscribe();

        debouncer.push("heat".to_string());
        tokio::time::sleep(ms(600)).await;
        assert!(!settled.has_changed().unwrap());

        debouncer.push("heat 2".to_string());
        settled.changed().await.unwrap();
        assert_eq!(*settled.borrow(), "heat 2");
    }
}

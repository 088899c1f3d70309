//! Live countdown to an event's start.

use std::fmt;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::debug;

use culture_events::Clock;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until a target instant, broken into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Countdown {
    /// Returns the remaining time, or `None` once `target` is not in the future.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Self> {
        let remaining = (target - now).num_milliseconds();
        if remaining <= 0 {
            return None;
        }

        Some(Self {
            days: remaining / MS_PER_DAY,
            hours: ((remaining % MS_PER_DAY) / MS_PER_HOUR) as u32,
            minutes: ((remaining % MS_PER_HOUR) / MS_PER_MINUTE) as u32,
            seconds: ((remaining % MS_PER_MINUTE) / MS_PER_SECOND) as u32,
        })
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Recomputes a [`Countdown`] once per period on a background task.
///
/// The task stops by itself when the target is reached and is aborted when
/// the timer is dropped.
pub struct CountdownTimer {
    current: watch::Receiver<Option<Countdown>>,
    handle: JoinHandle<()>,
}

impl CountdownTimer {
    /// Starts a timer ticking every second. Must be called inside a Tokio runtime.
    pub fn start(target: DateTime<Utc>, clock: Arc<dyn Clock>) -> Self {
        Self::with_period(target, clock, StdDuration::from_secs(1))
    }

    /// Starts a timer ticking every `period`.
    pub fn with_period(target: DateTime<Utc>, clock: Arc<dyn Clock>, period: StdDuration) -> Self {
        let initial = Countdown::until(target, clock.now());
        let (tx, current) = watch::channel(initial);

        let handle = tokio::spawn(async move {
            if initial.is_none() {
                debug!(starts_at = %target, "countdown target already passed");
                return;
            }

            let mut ticker = interval(period);
            // The first tick completes immediately.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let remaining = Countdown::until(target, clock.now());
                if tx.send(remaining).is_err() || remaining.is_none() {
                    break;
                }
            }

            debug!(starts_at = %target, "countdown stopped");
        });

        Self { current, handle }
    }

    /// The latest computed value. `None` means the event has started.
    pub fn current(&self) -> Option<Countdown> {
        *self.current.borrow()
    }

    /// Receives every recomputed value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Countdown>> {
        self.current.clone()
    }

    /// Returns true once the background task has ended.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops ticking.
    pub fn stop(self) {}
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownTimer")
            .field("current", &self.current())
            .field("finished", &self.is_finished())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use culture_events::{FixedClock, SteppingClock};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_until_splits_units() {
        let target = start()
            + Duration::days(1)
            + Duration::hours(2)
            + Duration::minutes(3)
            + Duration::seconds(4)
            + Duration::milliseconds(500);

        let countdown = Countdown::until(target, start()).unwrap();
        assert_eq!(
            countdown,
            Countdown {
                days: 1,
                hours: 2,
                minutes: 3,
                seconds: 4
            }
        );
        assert_eq!(countdown.to_string(), "1d 02h 03m 04s");
    }

    #[test]
    fn test_until_past_or_now_is_none() {
        assert!(Countdown::until(start(), start()).is_none());
        assert!(Countdown::until(start() - Duration::seconds(1), start()).is_none());
    }

    #[test]
    fn test_until_sub_second_remaining() {
        let countdown = Countdown::until(start() + Duration::milliseconds(400), start()).unwrap();
        assert_eq!(countdown.seconds, 0);
        assert_eq!(countdown.days, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_counts_down_and_stops() {
        let clock = Arc::new(SteppingClock::new(start(), Duration::seconds(1)));
        let timer = CountdownTimer::with_period(
            start() + Duration::seconds(3),
            clock,
            StdDuration::from_secs(1),
        );
        let mut rx = timer.subscribe();
        assert_eq!(rx.borrow_and_update().map(|c| c.seconds), Some(3));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().map(|c| c.seconds), Some(2));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().map(|c| c.seconds), Some(1));
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());

        // Sender is gone once the task ends.
        assert!(rx.changed().await.is_err());
        assert!(timer.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_for_past_target_never_ticks() {
        let timer = CountdownTimer::start(start() - Duration::hours(1), Arc::new(FixedClock(start())));
        assert!(timer.current().is_none());

        let mut rx = timer.subscribe();
        assert!(rx.changed().await.is_err());
        assert!(timer.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_timer_stops_task() {
        let timer = CountdownTimer::start(start() + Duration::days(30), Arc::new(FixedClock(start())));
        let mut rx = timer.subscribe();
        assert_eq!(timer.current().map(|c| c.days), Some(30));

        timer.stop();
        assert!(rx.changed().await.is_err());
    }
}

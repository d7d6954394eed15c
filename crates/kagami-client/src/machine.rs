use std::time::Duration;

use kagami_types::ConnectionStatus;

/// Delay before the first reconnect attempt, in milliseconds.
const RECONNECT_BASE_MS: u64 = 5_000;
/// Extra delay added per accumulated retry.
const RECONNECT_STEP_MS: u64 = 10_000;

/// Lifecycle state of the single event-stream connection. The async
/// driver feeds it named transport events and asks it for reconnect
/// delays; keeping it synchronous makes the backoff behavior testable
/// without a socket.
#[derive(Debug)]
pub struct Connection {
    status: ConnectionStatus,
    retry_count: u32,
    reconnect_pending: bool,
}

impl Connection {
    pub fn new() -> Self {
        Self {
            status: ConnectionStatus::Disconnected,
            retry_count: 0,
            reconnect_pending: false,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    /// A connection attempt is starting.
    pub fn begin_connect(&mut self) {
        self.status = ConnectionStatus::Connecting;
    }

    /// The stream opened. Consecutive-failure accounting starts over,
    /// so the next outage backs off from the base delay again.
    pub fn record_open(&mut self) {
        self.status = ConnectionStatus::Connected;
        self.retry_count = 0;
    }

    /// The transport failed, either a refused connect or a mid-stream
    /// error.
    pub fn record_error(&mut self) {
        self.status = ConnectionStatus::Error;
        self.retry_count += 1;
    }

    /// The transport closed. Follows every error and every server-side
    /// close.
    pub fn record_close(&mut self) {
        self.status = ConnectionStatus::Disconnected;
    }

    /// Ask for a reconnect timer. Returns the delay to sleep before the
    /// next attempt, or `None` when a timer is already pending; the
    /// no-op case leaves the status untouched.
    pub fn schedule_reconnect(&mut self) -> Option<Duration> {
        if self.reconnect_pending {
            return None;
        }

        self.reconnect_pending = true;
        self.status = ConnectionStatus::WaitingToReconnect;
        let millis = RECONNECT_BASE_MS + u64::from(self.retry_count) * RECONNECT_STEP_MS;
        Some(Duration::from_millis(millis))
    }

    /// The pending timer fired; the driver connects next.
    pub fn timer_fired(&mut self) {
        self.reconnect_pending = false;
    }
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_linearly_over_consecutive_failures() {
        let mut conn = Connection::new();
        let mut delays = Vec::new();

        for _ in 0..3 {
            conn.begin_connect();
            conn.record_error();
            match conn.schedule_reconnect() {
                Some(delay) => delays.push(delay.as_millis()),
                None => panic!("a timer should have been scheduled"),
            }
            conn.record_close();
            conn.timer_fired();
        }

        assert_eq!(delays, vec![15_000, 25_000, 35_000]);
    }

    #[test]
    fn test_successful_open_resets_backoff() {
        let mut conn = Connection::new();

        for _ in 0..2 {
            conn.begin_connect();
            conn.record_error();
            conn.schedule_reconnect();
            conn.record_close();
            conn.timer_fired();
        }
        assert_eq!(conn.retry_count(), 2);

        conn.begin_connect();
        conn.record_open();
        assert_eq!(conn.retry_count(), 0);

        conn.record_close();
        match conn.schedule_reconnect() {
            Some(delay) => assert_eq!(delay, Duration::from_millis(5_000)),
            None => panic!("a timer should have been scheduled"),
        }
    }

    #[test]
    fn test_only_one_timer_pends_at_a_time() {
        let mut conn = Connection::new();

        conn.record_error();
        assert!(conn.schedule_reconnect().is_some());
        assert_eq!(conn.schedule_reconnect(), None);

        conn.timer_fired();
        assert!(conn.schedule_reconnect().is_some());
    }

    #[test]
    fn test_status_texts_across_an_error_close_cycle() {
        let mut conn = Connection::new();
        assert_eq!(conn.status().to_string(), "Disconnected");

        conn.begin_connect();
        assert_eq!(conn.status().to_string(), "Connecting...");

        conn.record_open();
        assert_eq!(conn.status().to_string(), "Connected");

        conn.record_error();
        assert_eq!(conn.status().to_string(), "Connection error");

        assert!(conn.schedule_reconnect().is_some());
        assert_eq!(conn.status().to_string(), "Waiting for reconnect...");

        // The close lands after the timer was scheduled; the repeat
        // schedule is a no-op and the closed status stays visible.
        conn.record_close();
        assert_eq!(conn.status().to_string(), "Disconnected");
        assert_eq!(conn.schedule_reconnect(), None);
        assert_eq!(conn.status().to_string(), "Disconnected");
    }
}

//! Daily reservation window
//!
//! Reservations are accepted from the opening minute (inclusive) up to the
//! closing minute (exclusive), local time.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

const DEFAULT_OPENS: u32 = 8 * 60 + 45;
const DEFAULT_CLOSES: u32 = 16 * 60 + 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WindowStatus {
    NotYetOpen,
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WindowError {
    #[error("Invalid time of day: {0} (expected HH:MM)")]
    InvalidTime(String),
    #[error("Reservation window must open before it closes")]
    Inverted,
}

/// Opening and closing time, stored as minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWindow {
    opens: u32,
    closes: u32,
}

impl Default for ReservationWindow {
    fn default() -> Self {
        Self {
            opens: DEFAULT_OPENS,
            closes: DEFAULT_CLOSES,
        }
    }
}

impl ReservationWindow {
    /// Parse a window from two `HH:MM` strings.
    pub fn parse(opens: &str, closes: &str) -> Result<Self, WindowError> {
        let opens = parse_minutes(opens)?;
        let closes = parse_minutes(closes)?;
        if opens >= closes {
            return Err(WindowError::Inverted);
        }
        Ok(Self { opens, closes })
    }

    pub fn status_at(&self, time: NaiveTime) -> WindowStatus {
        let minute = time.hour() * 60 + time.minute();
        if minute < self.opens {
            WindowStatus::NotYetOpen
        } else if minute < self.closes {
            WindowStatus::Open
        } else {
            WindowStatus::Closed
        }
    }

    pub fn is_open_at(&self, time: NaiveTime) -> bool {
        self.status_at(time) == WindowStatus::Open
    }

    /// Banner text shown to users, e.g. `OPENS AT 08:45 AM`.
    pub fn message(&self, status: WindowStatus) -> String {
        match status {
            WindowStatus::NotYetOpen => format!("OPENS AT {}", clock_12h(self.opens)),
            WindowStatus::Open => "RESERVATIONS OPEN".to_string(),
            WindowStatus::Closed => "CLOSED FOR TODAY".to_string(),
        }
    }

    pub fn message_at(&self, time: NaiveTime) -> String {
        self.message(self.status_at(time))
    }
}

fn parse_minutes(value: &str) -> Result<u32, WindowError> {
    let time = NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| WindowError::InvalidTime(value.to_string()))?;
    Ok(time.hour() * 60 + time.minute())
}

fn clock_12h(minutes: u32) -> String {
    let (hour, minute) = (minutes / 60, minutes % 60);
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}:{minute:02} {suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn boundaries_are_half_open() {
        let window = ReservationWindow::default();
        assert_eq!(window.status_at(at(8, 44)), WindowStatus::NotYetOpen);
        assert_eq!(window.status_at(at(8, 45)), WindowStatus::Open);
        assert_eq!(window.status_at(at(16, 29)), WindowStatus::Open);
        assert_eq!(window.status_at(at(16, 30)), WindowStatus::Closed);
        assert_eq!(window.status_at(at(23, 59)), WindowStatus::Closed);
    }

    #[test]
    fn seconds_do_not_move_the_boundary() {
        let window = ReservationWindow::default();
        let late = NaiveTime::from_hms_opt(16, 29, 59).unwrap();
        assert!(window.is_open_at(late));
    }

    #[test]
    fn messages_match_board_banner() {
        let window = ReservationWindow::default();
        assert_eq!(window.message_at(at(7, 0)), "OPENS AT 08:45 AM");
        assert_eq!(window.message_at(at(12, 0)), "RESERVATIONS OPEN");
        assert_eq!(window.message_at(at(17, 0)), "CLOSED FOR TODAY");
    }

    #[test]
    fn parse_rejects_inverted_and_garbage() {
        assert_eq!(
            ReservationWindow::parse("09:00", "17:00").unwrap().message(WindowStatus::NotYetOpen),
            "OPENS AT 09:00 AM"
        );
        assert_eq!(
            ReservationWindow::parse("17:00", "09:00"),
            Err(WindowError::Inverted)
        );
        assert!(matches!(
            ReservationWindow::parse("nine", "17:00"),
            Err(WindowError::InvalidTime(_))
        ));
    }

    #[test]
    fn afternoon_opening_uses_pm() {
        let window = ReservationWindow::parse("13:05", "18:00").unwrap();
        assert_eq!(window.message(WindowStatus::NotYetOpen), "OPENS AT 01:05 PM");
    }
}

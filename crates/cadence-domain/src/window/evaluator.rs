use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

use super::value_objects::{CheckInWindow, WindowAnchorConfig, WindowState};

/// Resolves a weekly [`CheckInWindow`] into concrete instants relative to a
/// due date and answers "may the client submit right now?".
///
/// Pure: all wall-clock time is passed in by the caller.
#[derive(Debug, Clone, Default)]
pub struct WindowEvaluator {
    anchor: WindowAnchorConfig,
}

impl WindowEvaluator {
    pub fn new(anchor: WindowAnchorConfig) -> Self {
        Self { anchor }
    }

    pub fn anchor(&self) -> &WindowAnchorConfig {
        &self.anchor
    }

    /// Evaluate whether `now` falls inside the submission window for an
    /// assignment due at `due_date`.
    pub fn evaluate(
        &self,
        window: &CheckInWindow,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> WindowState {
        if !window.enabled {
            return WindowState::open("Check-in is open");
        }

        let (start, end) = self.bounds(window, due_date);

        if now < start {
            WindowState::closed(format!(
                "Check-in opens {}",
                start.format("%A at %H:%M")
            ))
        } else if now > end {
            WindowState::closed(format!(
                "Check-in window closed {}",
                end.format("%A at %H:%M")
            ))
        } else {
            WindowState::open(format!(
                "Check-in window is open until {}",
                end.format("%A at %H:%M")
            ))
        }
    }

    /// Concrete `[start, end]` instants for the window around `due_date`.
    ///
    /// The anchor week is the week containing the due date. A start that
    /// would land after the due date belongs to the week before (the
    /// "Friday before the Monday due date" rule); an end numerically
    /// before the start wraps into the following week.
    pub fn bounds(
        &self,
        window: &CheckInWindow,
        due_date: DateTime<Utc>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let anchor = week_start_of(due_date.date_naive(), self.anchor.week_start);

        let start_date = anchor
            + Duration::days(days_from(self.anchor.week_start, window.start_day))
            + Duration::weeks(self.anchor.start_week_offset);
        let mut start = start_date.and_time(window.start_time).and_utc();
        if start > due_date {
            start -= Duration::weeks(1);
        }

        let end_date = anchor
            + Duration::days(days_from(self.anchor.week_start, window.end_day))
            + Duration::weeks(self.anchor.end_week_offset);
        let mut end = end_date.and_time(window.end_time).and_utc();
        if end < start {
            end += Duration::weeks(1);
        }

        (start, end)
    }

    /// Derived overdue predicate: the due date has passed and the window has
    /// closed without a submission. A disabled or absent window never closes,
    /// so overdue reduces to the due date having passed.
    pub fn is_overdue(
        &self,
        window: Option<&CheckInWindow>,
        due_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> bool {
        if due_date >= now {
            return false;
        }
        match window {
            Some(w) if w.enabled => {
                let (_, end) = self.bounds(w, due_date);
                now > end
            }
            _ => true,
        }
    }
}

/// First day of the week containing `date`, for the configured week start
fn week_start_of(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let offset = days_from(week_start, date.weekday());
    date - Duration::days(offset)
}

/// Days from `from` to `to` walking forward through the week (0..=6)
fn days_from(from: Weekday, to: Weekday) -> i64 {
    let from = from.num_days_from_monday() as i64;
    let to = to.num_days_from_monday() as i64;
    (to - from).rem_euclid(7)
}

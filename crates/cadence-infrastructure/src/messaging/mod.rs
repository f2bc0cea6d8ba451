mod coach_inbox;

pub use coach_inbox::SqliteCoachInbox;

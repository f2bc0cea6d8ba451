mod message;
mod sender;

pub use message::CoachMessage;
pub use sender::MessageSender;

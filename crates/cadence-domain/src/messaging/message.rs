use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{AssignmentId, ClientId, CoachId, MessageId};

/// Outbound message to a coach. The delivery channel (in-app inbox, email
/// relay) lives in infrastructure behind [`super::MessageSender`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachMessage {
    id: MessageId,
    coach_id: CoachId,
    client_id: ClientId,
    assignment_id: AssignmentId,
    body: String,
    created_at: DateTime<Utc>,
}

impl CoachMessage {
    /// The message sent when a client asks for a missed/overdue check-in to
    /// be reopened.
    pub fn reopen_request(
        coach_id: CoachId,
        client_id: ClientId,
        client_name: &str,
        assignment_id: AssignmentId,
        form_title: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: MessageId::new(),
            coach_id,
            client_id,
            assignment_id,
            body: format!(
                "{} has asked to reopen the \"{}\" check-in. Open it for check-in to let them submit.",
                client_name, form_title
            ),
            created_at: now,
        }
    }

    /// Reconstruct from persistence
    pub fn restore(
        id: MessageId,
        coach_id: CoachId,
        client_id: ClientId,
        assignment_id: AssignmentId,
        body: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            coach_id,
            client_id,
            assignment_id,
            body,
            created_at,
        }
    }

    pub fn id(&self) -> &MessageId {
        &self.id
    }

    pub fn coach_id(&self) -> &CoachId {
        &self.coach_id
    }

    pub fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    pub fn assignment_id(&self) -> &AssignmentId {
        &self.assignment_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reopen_request_body_names_client_and_form() {
        let message = CoachMessage::reopen_request(
            CoachId::from_string("coach-1"),
            ClientId::from_string("client-1"),
            "Avery",
            AssignmentId::from_string("assignment-1"),
            "Weekly Reflection",
            Utc::now(),
        );

        assert!(message.body().contains("Avery"));
        assert!(message.body().contains("Weekly Reflection"));
        assert_eq!(message.coach_id().as_str(), "coach-1");
    }
}

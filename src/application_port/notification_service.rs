use crate::application_port::RelationError;
use crate::domain_model::Email;

#[async_trait::async_trait]
pub trait NotificationService: Send + Sync {
    /// Everyone who should receive an update from `sender`: friends,
    /// subscribers, and registered addresses mentioned in `text`, minus
    /// anyone who blocks the sender. Sorted and deduplicated.
    async fn resolve_recipients(
        &self,
        sender: &Email,
        text: &str,
    ) -> Result<Vec<Email>, RelationError>;
}

use crate::application_port::RelationError;
use crate::domain_model::Email;

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Register a new user. The address has already passed syntax
    /// validation at the boundary.
    async fn register(&self, email: &Email) -> Result<(), RelationError>;
}

//! User directory trait
//!
//! The directory service owns user records. This crate only consumes it;
//! role information is trusted exclusively when it comes from here.

use async_trait::async_trait;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Read access to the authoritative user records
#[async_trait]
pub trait UserDirectory: Send + Sync + std::fmt::Debug {
    /// Get a user by ID
    async fn get_user(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// List all users
    async fn list_users(&self) -> Result<Vec<User>, DomainError>;

    /// Verify login credentials, returning the user on success
    async fn authenticate(
        &self,
        name: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError>;
}


#[cfg(test)]
mod tests {
    use super::mock::{test_user, MockUserDirectory};
    use super::*;
    use crate::domain::user::Role;

    #[tokio::test]
    async fn test_mock_get_user() {
        let dir = MockUserDirectory::with_users(vec![test_user("ana", Role::Player)]);

        let id = UserId::new("ana").unwrap();
        let user = dir.get_user(&id).await.unwrap();
        assert!(user.is_some());
        assert_eq!(user.unwrap().role(), Role::Player);

        let missing = UserId::new("nobody").unwrap();
        assert!(dir.get_user(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_list_users_sorted() {
        let dir = MockUserDirectory::with_users(vec![
            test_user("zoe", Role::Player),
            test_user("ana", Role::Admin),
        ]);

        let users = dir.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name(), "ana");
    }

    #[tokio::test]
    async fn test_mock_authenticate() {
        let dir = MockUserDirectory::with_users(vec![test_user("ana", Role::Player)]);

        let user = dir.authenticate("ana", "secret").await.unwrap();
        assert!(user.is_some());

        let bad_password = dir.authenticate("ana", "wrong").await.unwrap();
        assert!(bad_password.is_none());

        let unknown = dir.authenticate("nobody", "secret").await.unwrap();
        assert!(unknown.is_none());
    }
}

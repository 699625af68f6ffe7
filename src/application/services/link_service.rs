//! Link creation, redirect, and owner-scoped management.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Link, NewLink, User};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::target_url::validate_target_url;

/// Service orchestrating the code generator and the link store.
///
/// Every management operation receives the authenticated [`User`] explicitly;
/// ownership is checked against `Link::user_id`.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_length: usize,
    max_attempts: usize,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// # Arguments
    ///
    /// - `link_repository` - backing store
    /// - `code_length` - characters per generated short code
    /// - `max_attempts` - how many generated codes may collide before giving up
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        code_length: usize,
        max_attempts: usize,
    ) -> Self {
        Self {
            link_repository,
            code_length,
            max_attempts,
        }
    }

    /// Shortens `original_url` on behalf of `owner`.
    ///
    /// # Code Generation
    ///
    /// Generates random codes until one is not present in the store, for at
    /// most `max_attempts` tries. The existence check is only an optimization;
    /// the store's unique constraint decides.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL is not an absolute http(s) URL
    /// - [`AppError::Capacity`] if every generated code was already taken
    /// - [`AppError::Conflict`] if the insert lost a race for the same code
    pub async fn create_link(&self, original_url: &str, owner: &User) -> Result<Link, AppError> {
        let original_url = validate_target_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let short_url = self.generate_unique_code().await?;

        let new_link = NewLink {
            original_url,
            short_url,
            user_id: owner.id,
        };

        match self.link_repository.create(new_link).await {
            Ok(link) => {
                info!(code = %link.short_url, user_id = owner.id, "Short link created");
                Ok(link)
            }
            Err(AppError::Conflict { details, .. }) => {
                warn!(user_id = owner.id, "Short code taken between check and insert");
                Err(AppError::conflict("Error creating URL", details))
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves `code` to its target and counts the click.
    ///
    /// The counter is incremented in the store before this returns, so a
    /// successful result means the click is already persisted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link has this code.
    pub async fn resolve_and_count(&self, code: &str) -> Result<String, AppError> {
        match self.link_repository.record_click(code).await? {
            Some(original_url) => {
                debug!(code = %code, "Click recorded");
                Ok(original_url)
            }
            None => Err(AppError::not_found("URL not found", json!({ "code": code }))),
        }
    }

    /// Returns the link if `requester` owns it.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown
    /// - [`AppError::Forbidden`] if another user owns it
    pub async fn get_stats(&self, code: &str, requester: &User) -> Result<Link, AppError> {
        let link = self.find_existing(code).await?;

        if !link.is_owned_by(requester.id) {
            warn!(code = %code, user_id = requester.id, "Stats requested by non-owner");
            return Err(AppError::forbidden(
                "Not authorized to view these stats",
                json!({ "code": code }),
            ));
        }

        Ok(link)
    }

    /// Lists links owned by `requester`, in insertion order.
    pub async fn list_links(
        &self,
        requester: &User,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Link>, AppError> {
        self.link_repository
            .list_by_owner(requester.id, skip, limit)
            .await
    }

    /// Permanently deletes a link owned by `requester`.
    ///
    /// Deleting the same code twice yields [`AppError::NotFound`] the second time.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the code is unknown
    /// - [`AppError::Forbidden`] if another user owns it
    pub async fn delete_link(&self, code: &str, requester: &User) -> Result<(), AppError> {
        let link = self.find_existing(code).await?;

        if !link.is_owned_by(requester.id) {
            warn!(code = %code, user_id = requester.id, "Delete requested by non-owner");
            return Err(AppError::forbidden(
                "Not authorized to delete this URL",
                json!({ "code": code }),
            ));
        }

        if !self
            .link_repository
            .delete_owned(code, requester.id)
            .await?
        {
            return Err(AppError::not_found("URL not found", json!({ "code": code })));
        }

        info!(code = %code, user_id = requester.id, "Short link deleted");
        Ok(())
    }

    /// Total number of stored links.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.link_repository.count().await
    }

    async fn find_existing(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }

    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = generate_code(self.code_length);

            if !self.link_repository.code_exists(&code).await? {
                return Ok(code);
            }

            debug!(attempt, "Generated short code already exists");
        }

        error!(
            attempts = self.max_attempts,
            code_length = self.code_length,
            "Could not find a free short code"
        );
        Err(AppError::capacity(
            "Failed to generate a unique short code",
            json!({ "attempts": self.max_attempts }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn test_user(id: i64) -> User {
        User {
            id,
            email: format!("user{id}@example.com"),
            hashed_password: "$argon2id$stub".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn test_link(id: i64, code: &str, url: &str, user_id: i64) -> Link {
        Link::new(
            id,
            url.to_string(),
            code.to_string(),
            Utc::now(),
            0,
            user_id,
            true,
        )
    }

    fn service(repo: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(repo), 6, 5)
    }

    #[tokio::test]
    async fn test_create_link_success() {
        let mut repo = MockLinkRepository::new();

        repo.expect_code_exists().times(1).returning(|_| Ok(false));
        repo.expect_create()
            .withf(|new_link| {
                new_link.original_url == "https://example.com"
                    && new_link.user_id == 1
                    && new_link.short_url.len() == 6
                    && new_link.short_url.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|new_link| {
                Ok(test_link(
                    10,
                    &new_link.short_url,
                    &new_link.original_url,
                    new_link.user_id,
                ))
            });

        let link = service(repo)
            .create_link("https://example.com", &test_user(1))
            .await
            .unwrap();

        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.clicks, 0);
        assert_eq!(link.short_url.len(), 6);
    }

    #[tokio::test]
    async fn test_create_link_uses_configured_length() {
        let mut repo = MockLinkRepository::new();

        repo.expect_code_exists()
            .withf(|code| code.len() == 10)
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_create().times(1).returning(|new_link| {
            Ok(test_link(1, &new_link.short_url, &new_link.original_url, 1))
        });

        let service = LinkService::new(Arc::new(repo), 10, 5);
        let link = service
            .create_link("https://example.com", &test_user(1))
            .await
            .unwrap();

        assert_eq!(link.short_url.len(), 10);
    }

    #[tokio::test]
    async fn test_create_link_retries_on_collision() {
        let mut repo = MockLinkRepository::new();
        let mut seq = mockall::Sequence::new();

        repo.expect_code_exists()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        repo.expect_code_exists()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        repo.expect_create().times(1).returning(|new_link| {
            Ok(test_link(1, &new_link.short_url, &new_link.original_url, 1))
        });

        let result = service(repo)
            .create_link("https://example.com", &test_user(1))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_link_capacity_exhausted() {
        let mut repo = MockLinkRepository::new();

        repo.expect_code_exists().times(5).returning(|_| Ok(true));
        repo.expect_create().times(0);

        let result = service(repo)
            .create_link("https://example.com", &test_user(1))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Capacity { .. }));
    }

    #[tokio::test]
    async fn test_create_link_insert_race_is_conflict() {
        let mut repo = MockLinkRepository::new();

        repo.expect_code_exists().times(1).returning(|_| Ok(false));
        repo.expect_create().times(1).returning(|_| {
            Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_short_url_key" }),
            ))
        });

        let result = service(repo)
            .create_link("https://example.com", &test_user(1))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_invalid_url() {
        let mut repo = MockLinkRepository::new();
        repo.expect_code_exists().times(0);
        repo.expect_create().times(0);

        let result = service(repo).create_link("not-a-url", &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_resolve_and_count_found() {
        let mut repo = MockLinkRepository::new();

        repo.expect_record_click()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let url = service(repo).resolve_and_count("abc123").await.unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_resolve_and_count_unknown_code() {
        let mut repo = MockLinkRepository::new();

        repo.expect_record_click().times(1).returning(|_| Ok(None));

        let result = service(repo).resolve_and_count("nope00").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_stats_owner() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code()
            .with(eq("abc123"))
            .times(1)
            .returning(|_| Ok(Some(test_link(1, "abc123", "https://example.com", 1))));

        let link = service(repo)
            .get_stats("abc123", &test_user(1))
            .await
            .unwrap();

        assert_eq!(link.short_url, "abc123");
    }

    #[tokio::test]
    async fn test_get_stats_non_owner_forbidden() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(test_link(1, "abc123", "https://example.com", 1))));

        let result = service(repo).get_stats("abc123", &test_user(2)).await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_get_stats_unknown_code() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code().times(1).returning(|_| Ok(None));

        let result = service(repo).get_stats("abc123", &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_links_scoped_to_owner() {
        let mut repo = MockLinkRepository::new();

        repo.expect_list_by_owner()
            .with(eq(3), eq(10), eq(20))
            .times(1)
            .returning(|user_id, _, _| {
                Ok(vec![
                    test_link(1, "aaaaaa", "https://a.example", user_id),
                    test_link(2, "bbbbbb", "https://b.example", user_id),
                ])
            });

        let links = service(repo)
            .list_links(&test_user(3), 10, 20)
            .await
            .unwrap();

        assert_eq!(links.len(), 2);
        assert!(links.iter().all(|l| l.user_id == 3));
    }

    #[tokio::test]
    async fn test_delete_link_owner() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(test_link(1, "abc123", "https://example.com", 1))));
        repo.expect_delete_owned()
            .with(eq("abc123"), eq(1))
            .times(1)
            .returning(|_, _| Ok(true));

        let result = service(repo).delete_link("abc123", &test_user(1)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_non_owner_forbidden() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(test_link(1, "abc123", "https://example.com", 1))));
        repo.expect_delete_owned().times(0);

        let result = service(repo).delete_link("abc123", &test_user(2)).await;

        assert!(matches!(result.unwrap_err(), AppError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_unknown_code() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_delete_owned().times(0);

        let result = service(repo).delete_link("abc123", &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_vanished_before_delete() {
        let mut repo = MockLinkRepository::new();

        repo.expect_find_by_code()
            .times(1)
            .returning(|_| Ok(Some(test_link(1, "abc123", "https://example.com", 1))));
        repo.expect_delete_owned().times(1).returning(|_, _| Ok(false));

        let result = service(repo).delete_link("abc123", &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}

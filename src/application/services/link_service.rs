//! Link creation and resolution service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, SequenceRepository, URL_SEQUENCE};
use crate::error::AppError;
use crate::utils::code_generator::{base62_encode, compose_id, validate_custom_alias};
use crate::utils::url_normalizer::normalize_url;
use serde_json::json;
use tracing::warn;

/// Attempts at drawing a generated code before giving up.
const MAX_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Generated codes come from a storage-backed sequence combined with this
/// instance's machine id, so several instances can share one database.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    sequence_repository: Arc<dyn SequenceRepository>,
    machine_id: u32,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        sequence_repository: Arc<dyn SequenceRepository>,
        machine_id: u32,
    ) -> Self {
        Self {
            link_repository,
            sequence_repository,
            machine_id,
        }
    }

    /// Creates a short link.
    ///
    /// With a `custom_alias` the alias becomes the code as-is; otherwise a
    /// code is generated. Generated codes that collide with an existing alias
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or alias is invalid.
    /// Returns [`AppError::Conflict`] if the alias is already taken.
    /// Returns [`AppError::Internal`] on storage errors or when no free code
    /// was found within the attempt limit.
    pub async fn create_short_link(
        &self,
        long_url: &str,
        custom_alias: Option<String>,
    ) -> Result<Link, AppError> {
        let long_url = normalize_url(long_url)?;

        if let Some(alias) = custom_alias {
            validate_custom_alias(&alias)?;

            return self
                .link_repository
                .create(NewLink {
                    code: alias,
                    long_url,
                })
                .await;
        }

        for _ in 0..MAX_ATTEMPTS {
            let code = self.next_generated_code().await?;

            match self
                .link_repository
                .create(NewLink {
                    code: code.clone(),
                    long_url: long_url.clone(),
                })
                .await
            {
                Err(AppError::Conflict { .. }) => {
                    warn!("Generated code {} is already taken, drawing another", code);
                }
                result => return result,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a short code to its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "code": code })))
    }

    /// Checks that link storage is reachable.
    pub async fn storage_ready(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    async fn next_generated_code(&self) -> Result<String, AppError> {
        let value = self.sequence_repository.next_value(URL_SEQUENCE).await?;
        let sequence = u64::try_from(value).map_err(|_| {
            AppError::internal("Sequence returned a negative value", json!({ "value": value }))
        })?;

        Ok(base62_encode(compose_id(self.machine_id, sequence)))
    }
}

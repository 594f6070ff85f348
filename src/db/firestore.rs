// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper implementing [`DocumentStore`].
//!
//! User documents live in the `users` collection, keyed by the URL-encoded
//! email. Reads use field masks so only the requested log travels over the
//! wire. Appends read the log and write it back extended inside one
//! transaction, so concurrent appenders are serialized by Firestore and a
//! document deleted mid-append is never recreated.

use async_trait::async_trait;
use firestore::errors::{BackoffError, FirestoreError};
use firestore::FirestoreWritePrecondition;
use serde::{Deserialize, Serialize};

use crate::db::{collections, document_id, DocumentStore, FieldPath, LogEntries};
use crate::error::{ProgressError, Result};
use crate::models::{Platform, UserProgress};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        // The emulator accepts any token; skip local credential lookup.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            ProgressError::StoreUnavailable(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            ProgressError::StoreUnavailable(format!(
                "Failed to connect to Firestore Emulator: {}",
                e
            ))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create an offline Firestore client for testing.
    ///
    /// Every operation fails with `StoreUnavailable`.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb> {
        self.client.as_ref().ok_or_else(|| {
            ProgressError::StoreUnavailable("Database not connected (offline mode)".to_string())
        })
    }

    // ─── Seeding (registration is handled elsewhere) ─────────────

    /// Create or replace a user document.
    pub async fn upsert_user(&self, user: &UserProgress) -> Result<()> {
        self.put_document(&user.email, user).await
    }

    /// Create or replace the document for `email` with any serializable shape.
    ///
    /// Used to seed documents written by older clients or by hand.
    pub async fn put_document<T>(&self, email: &str, document: &T) -> Result<()>
    where
        T: Serialize + for<'de> Deserialize<'de> + Send + Sync,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(document_id(email))
            .object(document)
            .execute()
            .await?;
        Ok(())
    }

    /// Delete a user document.
    pub async fn delete_user(&self, email: &str) -> Result<()> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(document_id(email))
            .execute()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FirestoreDb {
    async fn find_projected(
        &self,
        email: &str,
        fields: &[FieldPath],
    ) -> Result<Option<UserProgress>> {
        let mask: Vec<String> = fields.iter().flat_map(FieldPath::paths).collect();

        let user = self
            .get_client()?
            .fluent()
            .select()
            .fields(mask)
            .by_id_in(collections::USERS)
            .obj::<UserProgress>()
            .one(&document_id(email))
            .await?;

        Ok(user)
    }

    async fn find_full(&self, email: &str) -> Result<Option<UserProgress>> {
        let user = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj::<UserProgress>()
            .one(&document_id(email))
            .await?;

        Ok(user)
    }

    async fn push_each(
        &self,
        email: &str,
        platform: Platform,
        entries: LogEntries,
    ) -> Result<bool> {
        let client = self.get_client()?;
        let id = document_id(email);
        let field = FieldPath::Log(platform, entries.kind());
        let mask = field.paths();
        let count = entries.len();

        // The read registers the document with the transaction, so a
        // concurrent append or delete makes Firestore retry this one.
        let appended = client
            .run_transaction(|db, transaction| {
                let id = id.clone();
                let mask = mask.clone();
                let entries = entries.clone();

                Box::pin(async move {
                    let Some(mut user) = db
                        .fluent()
                        .select()
                        .fields(mask.clone())
                        .by_id_in(collections::USERS)
                        .obj::<UserProgress>()
                        .one(&id)
                        .await?
                    else {
                        return Ok(false);
                    };

                    entries.append_to(user.platform_data.get_mut(platform));

                    db.fluent()
                        .update()
                        .fields(mask)
                        .in_col(collections::USERS)
                        .precondition(FirestoreWritePrecondition::Exists(true))
                        .document_id(&id)
                        .object(&user)
                        .add_to_transaction(transaction)?;

                    Ok::<_, BackoffError<FirestoreError>>(true)
                })
            })
            .await;

        match appended {
            Ok(true) => {
                tracing::debug!(email, %platform, %field, count, "Appended entries");
                Ok(true)
            }
            Ok(false) => Ok(false),
            // Deleted between the read and the commit.
            Err(FirestoreError::DataNotFoundError(_)) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

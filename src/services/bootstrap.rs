use uuid::Uuid;

use crate::database::models::{CreateCollectionInput, CreateDocumentInput};
use crate::database::repositories::{CollectionRepository, DocumentRepository};
use crate::error::AppError;
use crate::services::templates::TemplateStore;

pub const WELCOME_COLLECTION_NAME: &str = "Welcome";

const WELCOME_COLLECTION_DESCRIPTION: &str =
    "A quick tour of how documents and collections work in your new workspace.";

/// Titles of the onboarding documents, in the order they are created. Each
/// maps to a template in the onboarding template directory.
pub const ONBOARDING_DOCUMENT_TITLES: [&str; 4] = [
    "Getting Started",
    "Writing Documents",
    "Working With Collections",
    "Integrations",
];

/// Seeds a brand-new team's first collaborative content.
#[derive(Clone)]
pub struct TeamBootstrapper {
    collections: CollectionRepository,
    documents: DocumentRepository,
    templates: TemplateStore,
}

impl TeamBootstrapper {
    pub fn new(
        collections: CollectionRepository,
        documents: DocumentRepository,
        templates: TemplateStore,
    ) -> Self {
        Self {
            collections,
            documents,
            templates,
        }
    }

    /// Creates the "Welcome" collection and one published onboarding document
    /// per title in [`ONBOARDING_DOCUMENT_TITLES`], all attributed to the
    /// initiating user.
    ///
    /// Not idempotent: the caller runs this exactly once per team, right
    /// after team creation. A failure aborts the remaining steps and leaves
    /// already-created content in place.
    pub async fn provision_first_collection(
        &self,
        team_id: Uuid,
        initiating_user_id: Uuid,
    ) -> Result<(), AppError> {
        let collection = self
            .collections
            .create(&CreateCollectionInput {
                team_id,
                name: WELCOME_COLLECTION_NAME.to_string(),
                description: Some(WELCOME_COLLECTION_DESCRIPTION.to_string()),
                created_by_id: initiating_user_id,
            })
            .await?;

        for title in ONBOARDING_DOCUMENT_TITLES {
            let text = self.templates.read(title)?;

            let document = self
                .documents
                .create(&CreateDocumentInput {
                    team_id,
                    collection_id: collection.id,
                    parent_document_id: None,
                    title: title.to_string(),
                    text,
                    is_welcome: true,
                    created_by_id: initiating_user_id,
                })
                .await?;

            self.documents
                .publish(document.id, initiating_user_id)
                .await?
                .ok_or_else(|| {
                    AppError::internal_server_error_message(format!(
                        "Onboarding document {} vanished before publish",
                        document.id
                    ))
                })?;
        }

        log::info!(
            "Bootstrapped welcome content for team {} ({} documents)",
            team_id,
            ONBOARDING_DOCUMENT_TITLES.len()
        );
        Ok(())
    }
}

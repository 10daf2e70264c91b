//! Mutation Coordinator - wraps every create/update/delete call.
//!
//! A successful write notifies the user, closes the form that produced it and
//! refreshes every collection `invalidated_by` names for the written kind. A
//! failed write notifies the user once and changes nothing else: the store
//! keeps its snapshot, the form stays open with its values, and no refresh is
//! issued.
//!
//! Each call issues exactly one remote mutation. Calls are not deduplicated.

use crate::config::ManagerConfig;
use crate::error::{CatalogError, ServiceError};
use crate::form::{AuthorFields, BookFields, EditForm, GenreFields};
use crate::invalidation::invalidated_by;
use crate::notify::{Notification, Notifier};
use crate::record::EntityKind;
use crate::service::{RecordMutationService, RecordQueryService};
use crate::store::EntityStore;

/// What a successful mutation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub kind: EntityKind,
    /// Id of the written or deleted record.
    pub id: String,
    /// Collections refreshed successfully afterwards, in refresh order.
    pub refreshed: Vec<EntityKind>,
    /// Refreshes that failed; those collections kept their previous snapshot.
    pub refresh_failures: Vec<CatalogError>,
}

pub struct MutationCoordinator<S, N> {
    service: S,
    notifier: N,
    config: ManagerConfig,
}

impl<S, N> MutationCoordinator<S, N>
where
    S: RecordQueryService + RecordMutationService,
    N: Notifier,
{
    pub fn new(service: S, notifier: N, config: ManagerConfig) -> Self {
        Self {
            service,
            notifier,
            config,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Fetch one collection and replace it in the store. On failure the
    /// store keeps its previous snapshot.
    pub fn refresh(
        &self,
        store: &mut EntityStore,
        kind: EntityKind,
    ) -> Result<(), CatalogError> {
        let fetched = match kind {
            EntityKind::Author => self
                .service
                .list_authors()
                .map(|authors| store.set_authors(authors)),
            EntityKind::Genre => self
                .service
                .list_genres()
                .map(|genres| store.set_genres(genres)),
            EntityKind::Book => self
                .service
                .list_books()
                .map(|books| store.set_books(books)),
        };

        match fetched {
            Ok(()) => {
                log::debug!(
                    "refreshed {} (generation {})",
                    kind.collection(),
                    store.generation(kind)
                );
                Ok(())
            }
            Err(source) => {
                log::warn!(
                    "refresh of {} failed, keeping snapshot: {}",
                    kind.collection(),
                    source
                );
                Err(CatalogError::Fetch { kind, source })
            }
        }
    }

    /// Refresh everything a write to `kind` made stale.
    fn invalidate(
        &self,
        store: &mut EntityStore,
        kind: EntityKind,
        id: String,
    ) -> MutationOutcome {
        let mut outcome = MutationOutcome {
            kind,
            id,
            refreshed: Vec::new(),
            refresh_failures: Vec::new(),
        };
        for stale in invalidated_by(kind) {
            match self.refresh(store, *stale) {
                Ok(()) => outcome.refreshed.push(*stale),
                Err(err) => outcome.refresh_failures.push(err),
            }
        }
        outcome
    }

    /// Run one remote call and report its result to the user.
    fn commit<T>(
        &self,
        kind: EntityKind,
        call: Result<T, ServiceError>,
        success: Notification,
    ) -> Result<T, CatalogError> {
        match call {
            Ok(value) => {
                log::info!("{} mutation succeeded: {}", kind, success.message);
                self.notifier.notify(success);
                Ok(value)
            }
            Err(source) => {
                let message = source.user_message(&self.config.generic_error_message);
                log::warn!("{} mutation failed: {}", kind, source);
                self.notifier.notify(Notification::error(message));
                Err(CatalogError::Mutation { kind, source })
            }
        }
    }

    pub fn save_author(
        &self,
        store: &mut EntityStore,
        form: &mut EditForm<AuthorFields>,
    ) -> Result<MutationOutcome, CatalogError> {
        let call = self.service.upsert_author(form.fields());
        let id = self.commit(
            EntityKind::Author,
            call,
            Notification::success("Success", "Author saved"),
        )?;
        form.close();
        Ok(self.invalidate(store, EntityKind::Author, id))
    }

    pub fn save_genre(
        &self,
        store: &mut EntityStore,
        form: &mut EditForm<GenreFields>,
    ) -> Result<MutationOutcome, CatalogError> {
        let call = self.service.upsert_genre(form.fields());
        let id = self.commit(
            EntityKind::Genre,
            call,
            Notification::success("Success", "Genre saved"),
        )?;
        form.close();
        Ok(self.invalidate(store, EntityKind::Genre, id))
    }

    pub fn save_book(
        &self,
        store: &mut EntityStore,
        form: &mut EditForm<BookFields>,
    ) -> Result<MutationOutcome, CatalogError> {
        let (record, genre_ids) = form.fields().to_input();
        let call = self.service.upsert_book(&record, &genre_ids);
        let id = self.commit(
            EntityKind::Book,
            call,
            Notification::success("Success", "Book saved"),
        )?;
        form.close();
        Ok(self.invalidate(store, EntityKind::Book, id))
    }

    pub fn delete_author(
        &self,
        store: &mut EntityStore,
        id: &str,
    ) -> Result<MutationOutcome, CatalogError> {
        let call = self.service.delete_author(id);
        self.commit(
            EntityKind::Author,
            call,
            Notification::success("Deleted", "Author deleted"),
        )?;
        Ok(self.invalidate(store, EntityKind::Author, id.to_string()))
    }

    pub fn delete_genre(
        &self,
        store: &mut EntityStore,
        id: &str,
    ) -> Result<MutationOutcome, CatalogError> {
        let call = self.service.delete_genre(id);
        self.commit(
            EntityKind::Genre,
            call,
            Notification::success("Deleted", "Genre deleted"),
        )?;
        Ok(self.invalidate(store, EntityKind::Genre, id.to_string()))
    }

    pub fn delete_book(
        &self,
        store: &mut EntityStore,
        id: &str,
    ) -> Result<MutationOutcome, CatalogError> {
        let name = store
            .book_row(id)
            .map(|row| row.name.clone())
            .unwrap_or_else(|| id.to_string());
        let call = self.service.delete_book(id);
        self.commit(
            EntityKind::Book,
            call,
            Notification::success("Deleted", format!("Book \"{}\" deleted", name)),
        )?;
        Ok(self.invalidate(store, EntityKind::Book, id.to_string()))
    }
}

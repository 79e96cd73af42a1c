use crate::application_service::workflow_service::command::{
    CreatePageCommand, DeleteMediaCommand, DeletePageCommand, PublishPageCommand,
    UpdatePageCommand, UploadMediaCommand,
};
use crate::application_service::workflow_service::port::{
    MediaStorage, MediaStorageError, NotificationSink,
};
use crate::domain::media::{MediaAsset, MediaIdGenerator};
use crate::domain::page::{Page, PageError};
use crate::domain::page_id::PageIdGenerator;
use folio_notify::Notification;
use folio_store::{KeyValueStore, StoreError};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};

const PAGES_KEY: &str = "published-pages";
const DRAFTS_KEY: &str = "drafts";
const MEDIA_KEY: &str = "media-assets";

/// The three collections the engine owns. A page's status is its
/// membership: drafts hold Draft pages, pages holds Published ones,
/// and an id lives in at most one of the two. Insertion order is
/// preserved; nothing sorts.
#[derive(Default)]
struct Collections {
    pages: Vec<Page>,
    drafts: Vec<Page>,
    media: Vec<MediaAsset>,
}

/// Content workflow engine.
///
/// Owns the published-page, draft and media collections exclusively
/// and mirrors each to its storage key after every mutation. A single
/// mutex serializes all six mutating operations, so the collection
/// invariants hold at every observable instant.
///
/// Each operation stages its change on a copy of the affected
/// collection(s), persists, and only then commits to memory: when a
/// save fails, in-memory state still matches the last durable state
/// and the error is returned to the caller.
pub struct WorkflowService<G, M, S, L, N> {
    page_id_generator: G,
    media_id_generator: M,
    store: S,
    media_storage: L,
    notifier: N,
    state: Mutex<Collections>,
}

impl<G, M, S, L, N> WorkflowService<G, M, S, L, N>
where
    G: PageIdGenerator,
    M: MediaIdGenerator,
    S: KeyValueStore,
    L: MediaStorage,
    N: NotificationSink,
{
    /// Restore the engine from storage. Absent keys start as empty
    /// collections.
    pub fn load(
        page_id_generator: G,
        media_id_generator: M,
        store: S,
        media_storage: L,
        notifier: N,
    ) -> Result<Self, WorkflowError> {
        let pages = read_collection(&store, PAGES_KEY)?;
        let drafts = read_collection(&store, DRAFTS_KEY)?;
        let media = read_collection(&store, MEDIA_KEY)?;

        Ok(Self {
            page_id_generator,
            media_id_generator,
            store,
            media_storage,
            notifier,
            state: Mutex::new(Collections {
                pages,
                drafts,
                media,
            }),
        })
    }

    /// Create a new draft from an author-supplied payload.
    pub fn create_page(&self, cmd: CreatePageCommand) -> Result<Page, WorkflowError> {
        let actor = require_actor(&cmd.acting_user_id)?;
        let mut state = self.lock_state()?;

        let page = Page::create(self.page_id_generator.generate(), cmd.payload, actor);

        let mut drafts = state.drafts.clone();
        drafts.push(page.clone());
        self.save(DRAFTS_KEY, &drafts)?;
        state.drafts = drafts;
        drop(state);

        tracing::info!(page_id = %page.id(), "draft created");
        self.notify("Draft Created", "Your page has been saved as a draft.");
        Ok(page)
    }

    /// Shallow-merge `updates` into the first page matching the id,
    /// searching published pages before drafts. The page stays in
    /// whichever collection held it. Returns whether a page was found;
    /// a miss is a no-op, not an error.
    pub fn update_page(&self, cmd: UpdatePageCommand) -> Result<bool, WorkflowError> {
        require_actor(&cmd.acting_user_id)?;
        let mut state = self.lock_state()?;

        if let Some(pos) = state.pages.iter().position(|p| p.id() == &cmd.page_id) {
            let mut pages = state.pages.clone();
            let merged = pages[pos].merge_payload(cmd.updates);
            pages[pos] = merged;
            self.save(PAGES_KEY, &pages)?;
            state.pages = pages;
            drop(state);

            self.notify("Page Updated", "Changes have been saved successfully.");
            return Ok(true);
        }

        if let Some(pos) = state.drafts.iter().position(|d| d.id() == &cmd.page_id) {
            let mut drafts = state.drafts.clone();
            let merged = drafts[pos].merge_payload(cmd.updates);
            drafts[pos] = merged;
            self.save(DRAFTS_KEY, &drafts)?;
            state.drafts = drafts;
            drop(state);

            self.notify("Draft Updated", "Your draft has been updated.");
            return Ok(true);
        }

        Ok(false)
    }

    /// Remove the first page matching the id from published pages,
    /// else from drafts. Returns whether a removal occurred.
    pub fn delete_page(&self, cmd: DeletePageCommand) -> Result<bool, WorkflowError> {
        require_actor(&cmd.acting_user_id)?;
        let mut state = self.lock_state()?;

        if let Some(pos) = state.pages.iter().position(|p| p.id() == &cmd.page_id) {
            let mut pages = state.pages.clone();
            pages.remove(pos);
            self.save(PAGES_KEY, &pages)?;
            state.pages = pages;
            drop(state);

            self.notify("Page Deleted", "The page has been removed.");
            return Ok(true);
        }

        if let Some(pos) = state.drafts.iter().position(|d| d.id() == &cmd.page_id) {
            let mut drafts = state.drafts.clone();
            drafts.remove(pos);
            self.save(DRAFTS_KEY, &drafts)?;
            state.drafts = drafts;
            drop(state);

            self.notify("Page Deleted", "The page has been removed.");
            return Ok(true);
        }

        Ok(false)
    }

    /// Move a draft to the published collection, stamping publisher
    /// and time. The id is looked up in drafts only: publishing an
    /// unknown or already-published id is a silent no-op, so repeated
    /// calls are safe for the caller. Both collection keys are written
    /// through one `set_many` batch.
    pub fn publish_page(&self, cmd: PublishPageCommand) -> Result<Option<Page>, WorkflowError> {
        let actor = require_actor(&cmd.acting_user_id)?;
        let mut state = self.lock_state()?;

        let Some(pos) = state.drafts.iter().position(|d| d.id() == &cmd.page_id) else {
            return Ok(None);
        };

        let mut drafts = state.drafts.clone();
        let draft = drafts.remove(pos);
        let published = draft.publish(actor).map_err(WorkflowError::Domain)?;

        let mut pages = state.pages.clone();
        pages.push(published.clone());

        let entries = [(PAGES_KEY, encode(&pages)?), (DRAFTS_KEY, encode(&drafts)?)];
        self.store
            .set_many(&entries)
            .map_err(WorkflowError::Storage)?;

        state.pages = pages;
        state.drafts = drafts;
        drop(state);

        tracing::info!(page_id = %published.id(), "page published");
        self.notify("Page Published", "Your page is now live.");
        Ok(Some(published))
    }

    /// Store uploaded binary content and register the asset.
    pub fn upload_media(&self, cmd: UploadMediaCommand) -> Result<MediaAsset, WorkflowError> {
        let actor = require_actor(&cmd.acting_user_id)?;
        let mut state = self.lock_state()?;

        let locator = self
            .media_storage
            .store(&cmd.name, &cmd.content)
            .map_err(WorkflowError::MediaStorage)?;
        let asset = MediaAsset::new(
            self.media_id_generator.generate(),
            cmd.name,
            cmd.mime_type,
            locator,
            actor,
        );

        let mut media = state.media.clone();
        media.push(asset.clone());
        self.save(MEDIA_KEY, &media)?;
        state.media = media;
        drop(state);

        tracing::info!(media_id = %asset.id(), "media uploaded");
        self.notify("Media Uploaded", "Your file has been uploaded successfully.");
        Ok(asset)
    }

    /// Remove an asset from the registry. Stored binaries are not
    /// reclaimed. Returns whether a removal occurred.
    pub fn delete_media(&self, cmd: DeleteMediaCommand) -> Result<bool, WorkflowError> {
        require_actor(&cmd.acting_user_id)?;
        let mut state = self.lock_state()?;

        let Some(pos) = state.media.iter().position(|m| m.id() == &cmd.media_id) else {
            return Ok(false);
        };

        let mut media = state.media.clone();
        media.remove(pos);
        self.save(MEDIA_KEY, &media)?;
        state.media = media;
        drop(state);

        self.notify("Media Deleted", "The file has been removed.");
        Ok(true)
    }

    /// Snapshot of the published pages, in insertion order.
    pub fn pages(&self) -> Result<Vec<Page>, WorkflowError> {
        Ok(self.lock_state()?.pages.clone())
    }

    /// Snapshot of the drafts, in insertion order.
    pub fn drafts(&self) -> Result<Vec<Page>, WorkflowError> {
        Ok(self.lock_state()?.drafts.clone())
    }

    /// Snapshot of the media registry, in insertion order.
    pub fn media(&self) -> Result<Vec<MediaAsset>, WorkflowError> {
        Ok(self.lock_state()?.media.clone())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, Collections>, WorkflowError> {
        self.state
            .lock()
            .map_err(|e| WorkflowError::LockPoisoned(e.to_string()))
    }

    fn save<T: serde::Serialize>(&self, key: &str, collection: &[T]) -> Result<(), WorkflowError> {
        let value = encode(&collection)?;
        self.store.set(key, &value).map_err(WorkflowError::Storage)
    }

    fn notify(&self, title: &str, description: &str) {
        if let Err(e) = self.notifier.deliver(Notification::new(title, description)) {
            tracing::warn!("notification delivery failed: {e}");
        }
    }
}

fn require_actor(acting_user_id: &Option<String>) -> Result<String, WorkflowError> {
    acting_user_id
        .clone()
        .ok_or(WorkflowError::Unauthenticated)
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Value, WorkflowError> {
    serde_json::to_value(value)
        .map_err(|e| WorkflowError::Storage(StoreError::Serialization(e.to_string())))
}

fn read_collection<S, T>(store: &S, key: &str) -> Result<Vec<T>, WorkflowError>
where
    S: KeyValueStore,
    T: serde::de::DeserializeOwned,
{
    match store.get(key).map_err(WorkflowError::Storage)? {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| WorkflowError::Storage(StoreError::Serialization(e.to_string()))),
        None => Ok(Vec::new()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no acting user for a mutating operation")]
    Unauthenticated,
    #[error("domain error: {0:?}")]
    Domain(PageError),
    #[error("storage error: {0}")]
    Storage(StoreError),
    #[error("media storage error: {0}")]
    MediaStorage(MediaStorageError),
    #[error("state lock poisoned: {0}")]
    LockPoisoned(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_service::workflow_service::port::NotificationSinkError;
    use crate::domain::media::{MediaId, MediaLocator};
    use crate::domain::page::PageStatus;
    use crate::domain::page_id::PageId;
    use folio_store::InMemoryKeyValueStore;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex as StdMutex};

    /// Deterministic page id generator: page-1, page-2, ...
    #[derive(Default)]
    struct TestPageIds(AtomicUsize);

    impl PageIdGenerator for TestPageIds {
        fn generate(&self) -> PageId {
            PageId::new(format!("page-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1))
        }
    }

    /// Deterministic media id generator: media-1, media-2, ...
    #[derive(Default)]
    struct TestMediaIds(AtomicUsize);

    impl MediaIdGenerator for TestMediaIds {
        fn generate(&self) -> MediaId {
            MediaId::new(format!("media-{}", self.0.fetch_add(1, Ordering::SeqCst) + 1))
        }
    }

    /// Store wrapper whose writes can be made to fail mid-test.
    #[derive(Clone, Default)]
    struct TestStore {
        inner: InMemoryKeyValueStore,
        fail_on_set: Arc<AtomicBool>,
    }

    impl TestStore {
        fn fail_writes(&self, fail: bool) {
            self.fail_on_set.store(fail, Ordering::SeqCst);
        }
    }

    impl KeyValueStore for TestStore {
        fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &Value) -> Result<(), StoreError> {
            if self.fail_on_set.load(Ordering::SeqCst) {
                return Err(StoreError::Storage("save failed (test)".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    /// Sink that records delivered notifications.
    #[derive(Clone, Default)]
    struct RecordingSink {
        delivered: Arc<StdMutex<Vec<Notification>>>,
        fail: bool,
    }

    impl RecordingSink {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn titles(&self) -> Vec<String> {
            self.delivered
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.title.clone())
                .collect()
        }
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, notification: Notification) -> Result<(), NotificationSinkError> {
            if self.fail {
                return Err(NotificationSinkError::Delivery(
                    "delivery failed (test)".to_string(),
                ));
            }
            self.delivered.lock().unwrap().push(notification);
            Ok(())
        }
    }

    /// Media storage handing out in-memory locators.
    #[derive(Clone, Default)]
    struct TestMediaStorage {
        fail: bool,
    }

    impl MediaStorage for TestMediaStorage {
        fn store(&self, name: &str, _bytes: &[u8]) -> Result<MediaLocator, MediaStorageError> {
            if self.fail {
                return Err(MediaStorageError::Storage("store failed (test)".to_string()));
            }
            Ok(MediaLocator::new(format!("mem://{name}")))
        }
    }

    type TestService =
        WorkflowService<TestPageIds, TestMediaIds, TestStore, TestMediaStorage, RecordingSink>;

    fn build_service(store: TestStore, sink: RecordingSink) -> TestService {
        WorkflowService::load(
            TestPageIds::default(),
            TestMediaIds::default(),
            store,
            TestMediaStorage::default(),
            sink,
        )
        .unwrap()
    }

    fn default_service() -> (TestService, TestStore, RecordingSink) {
        let store = TestStore::default();
        let sink = RecordingSink::default();
        (build_service(store.clone(), sink.clone()), store, sink)
    }

    fn payload(pairs: &[(&str, Value)]) -> serde_json::Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn actor() -> Option<String> {
        Some("u1".to_string())
    }

    fn create(service: &TestService, title: &str) -> Page {
        service
            .create_page(CreatePageCommand {
                payload: payload(&[("title", json!(title))]),
                acting_user_id: actor(),
            })
            .unwrap()
    }

    fn upload(service: &TestService, name: &str) -> MediaAsset {
        service
            .upload_media(UploadMediaCommand {
                name: name.to_string(),
                mime_type: "image/png".to_string(),
                content: vec![1, 2, 3],
                acting_user_id: actor(),
            })
            .unwrap()
    }

    #[test]
    fn create_page_appends_draft_and_notifies() {
        let (service, store, sink) = default_service();

        let page = create(&service, "A");

        assert_eq!(page.status(), PageStatus::Draft);
        assert_eq!(page.created_by(), "u1");
        assert_eq!(service.drafts().unwrap(), vec![page]);
        assert!(service.pages().unwrap().is_empty());
        assert_eq!(sink.titles(), vec!["Draft Created"]);

        let stored = store.get("drafts").unwrap().unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 1);
    }

    #[test]
    fn all_mutations_require_an_acting_user() {
        let (service, _, sink) = default_service();
        let existing = create(&service, "A");

        let create_err = service.create_page(CreatePageCommand {
            payload: payload(&[]),
            acting_user_id: None,
        });
        assert!(matches!(create_err, Err(WorkflowError::Unauthenticated)));

        let update_err = service.update_page(UpdatePageCommand {
            page_id: existing.id().clone(),
            updates: payload(&[("title", json!("B"))]),
            acting_user_id: None,
        });
        assert!(matches!(update_err, Err(WorkflowError::Unauthenticated)));

        let delete_err = service.delete_page(DeletePageCommand {
            page_id: existing.id().clone(),
            acting_user_id: None,
        });
        assert!(matches!(delete_err, Err(WorkflowError::Unauthenticated)));

        let publish_err = service.publish_page(PublishPageCommand {
            page_id: existing.id().clone(),
            acting_user_id: None,
        });
        assert!(matches!(publish_err, Err(WorkflowError::Unauthenticated)));

        let upload_err = service.upload_media(UploadMediaCommand {
            name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            content: vec![],
            acting_user_id: None,
        });
        assert!(matches!(upload_err, Err(WorkflowError::Unauthenticated)));

        let delete_media_err = service.delete_media(DeleteMediaCommand {
            media_id: MediaId::new("media-1".to_string()),
            acting_user_id: None,
        });
        assert!(matches!(
            delete_media_err,
            Err(WorkflowError::Unauthenticated)
        ));

        // nothing changed, and only the setup notification fired
        assert_eq!(service.drafts().unwrap().len(), 1);
        assert!(service.pages().unwrap().is_empty());
        assert!(service.media().unwrap().is_empty());
        assert_eq!(sink.titles(), vec!["Draft Created"]);
    }

    #[test]
    fn update_merges_payload_in_place() {
        let (service, _, sink) = default_service();
        let page = create(&service, "A");

        let found = service
            .update_page(UpdatePageCommand {
                page_id: page.id().clone(),
                updates: payload(&[("title", json!("B")), ("body", json!("text"))]),
                acting_user_id: actor(),
            })
            .unwrap();

        assert!(found);
        let drafts = service.drafts().unwrap();
        assert_eq!(drafts[0].field("title"), Some(&json!("B")));
        assert_eq!(drafts[0].field("body"), Some(&json!("text")));
        assert_eq!(sink.titles(), vec!["Draft Created", "Draft Updated"]);
    }

    #[test]
    fn update_never_moves_a_page_between_collections() {
        let (service, _, sink) = default_service();
        let draft = create(&service, "A");
        let published = create(&service, "B");
        service
            .publish_page(PublishPageCommand {
                page_id: published.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();

        service
            .update_page(UpdatePageCommand {
                page_id: draft.id().clone(),
                updates: payload(&[("title", json!("A2"))]),
                acting_user_id: actor(),
            })
            .unwrap();
        service
            .update_page(UpdatePageCommand {
                page_id: published.id().clone(),
                updates: payload(&[("title", json!("B2"))]),
                acting_user_id: actor(),
            })
            .unwrap();

        let drafts = service.drafts().unwrap();
        let pages = service.pages().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(pages.len(), 1);
        assert_eq!(drafts[0].id(), draft.id());
        assert_eq!(drafts[0].status(), PageStatus::Draft);
        assert_eq!(pages[0].id(), published.id());
        assert_eq!(pages[0].status(), PageStatus::Published);
        // the published page got the published-flavored notification
        assert!(sink.titles().contains(&"Page Updated".to_string()));
        assert!(sink.titles().contains(&"Draft Updated".to_string()));
    }

    #[test]
    fn update_cannot_change_status_through_the_generic_merge() {
        let (service, _, _) = default_service();
        let page = create(&service, "A");

        service
            .update_page(UpdatePageCommand {
                page_id: page.id().clone(),
                updates: payload(&[
                    ("status", json!("published")),
                    ("publishedBy", json!("intruder")),
                ]),
                acting_user_id: actor(),
            })
            .unwrap();

        let drafts = service.drafts().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].status(), PageStatus::Draft);
        assert!(drafts[0].published_by().is_none());
        assert!(service.pages().unwrap().is_empty());
    }

    #[test]
    fn update_missing_page_is_a_silent_no_op() {
        let (service, _, sink) = default_service();

        let found = service
            .update_page(UpdatePageCommand {
                page_id: PageId::new("missing".to_string()),
                updates: payload(&[("title", json!("B"))]),
                acting_user_id: actor(),
            })
            .unwrap();

        assert!(!found);
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn delete_removes_the_page_from_either_collection() {
        let (service, _, sink) = default_service();
        let draft = create(&service, "A");
        let published = create(&service, "B");
        service
            .publish_page(PublishPageCommand {
                page_id: published.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();

        assert!(service
            .delete_page(DeletePageCommand {
                page_id: draft.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap());
        assert!(service
            .delete_page(DeletePageCommand {
                page_id: published.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap());

        assert!(service.drafts().unwrap().is_empty());
        assert!(service.pages().unwrap().is_empty());
        assert_eq!(
            sink.titles()
                .iter()
                .filter(|t| *t == "Page Deleted")
                .count(),
            2
        );
    }

    #[test]
    fn delete_missing_page_returns_false_without_notification() {
        let (service, _, sink) = default_service();

        let deleted = service
            .delete_page(DeletePageCommand {
                page_id: PageId::new("missing".to_string()),
                acting_user_id: actor(),
            })
            .unwrap();

        assert!(!deleted);
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn publish_moves_the_draft_and_stamps_it() {
        let (service, store, sink) = default_service();
        let draft = create(&service, "A");

        let published = service
            .publish_page(PublishPageCommand {
                page_id: draft.id().clone(),
                acting_user_id: Some("u2".to_string()),
            })
            .unwrap()
            .expect("draft should publish");

        assert_eq!(published.status(), PageStatus::Published);
        assert_eq!(published.published_by(), Some("u2"));
        assert!(published.published_at().is_some());
        assert_eq!(published.created_by(), "u1");

        assert!(service.drafts().unwrap().is_empty());
        assert_eq!(service.pages().unwrap(), vec![published]);
        assert_eq!(sink.titles(), vec!["Draft Created", "Page Published"]);

        // both keys were written
        let stored_pages = store.get("published-pages").unwrap().unwrap();
        let stored_drafts = store.get("drafts").unwrap().unwrap();
        assert_eq!(stored_pages.as_array().unwrap().len(), 1);
        assert_eq!(stored_drafts.as_array().unwrap().len(), 0);
    }

    #[test]
    fn publish_twice_is_a_no_op_the_second_time() {
        let (service, _, sink) = default_service();
        let draft = create(&service, "A");

        let first = service
            .publish_page(PublishPageCommand {
                page_id: draft.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();
        let second = service
            .publish_page(PublishPageCommand {
                page_id: draft.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(service.pages().unwrap().len(), 1);
        assert!(service.drafts().unwrap().is_empty());
        assert_eq!(
            sink.titles()
                .iter()
                .filter(|t| *t == "Page Published")
                .count(),
            1
        );
    }

    #[test]
    fn publish_missing_page_returns_none() {
        let (service, _, sink) = default_service();

        let result = service
            .publish_page(PublishPageCommand {
                page_id: PageId::new("missing".to_string()),
                acting_user_id: actor(),
            })
            .unwrap();

        assert!(result.is_none());
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn publish_appends_in_publish_order_not_creation_order() {
        let (service, _, _) = default_service();
        let first = create(&service, "A");
        let second = create(&service, "B");

        service
            .publish_page(PublishPageCommand {
                page_id: second.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();
        service
            .publish_page(PublishPageCommand {
                page_id: first.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();

        let pages = service.pages().unwrap();
        assert_eq!(pages[0].id(), second.id());
        assert_eq!(pages[1].id(), first.id());
    }

    #[test]
    fn ids_stay_unique_and_collections_stay_disjoint() {
        let (service, _, _) = default_service();

        let a = create(&service, "A");
        let b = create(&service, "B");
        let c = create(&service, "C");
        service
            .publish_page(PublishPageCommand {
                page_id: b.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();
        service
            .update_page(UpdatePageCommand {
                page_id: a.id().clone(),
                updates: payload(&[("title", json!("A2"))]),
                acting_user_id: actor(),
            })
            .unwrap();
        service
            .delete_page(DeletePageCommand {
                page_id: c.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();

        let drafts = service.drafts().unwrap();
        let pages = service.pages().unwrap();

        let draft_ids: HashSet<&str> = drafts.iter().map(|p| p.id().as_str()).collect();
        let page_ids: HashSet<&str> = pages.iter().map(|p| p.id().as_str()).collect();
        assert_eq!(draft_ids.len(), drafts.len());
        assert_eq!(page_ids.len(), pages.len());
        assert!(draft_ids.is_disjoint(&page_ids));
    }

    #[test]
    fn page_lifecycle_end_to_end() {
        let (service, _, _) = default_service();

        let page = create(&service, "A");
        assert_eq!(service.drafts().unwrap().len(), 1);
        assert!(service.pages().unwrap().is_empty());
        assert_eq!(page.created_by(), "u1");

        let published = service
            .publish_page(PublishPageCommand {
                page_id: page.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap()
            .unwrap();
        assert!(service.drafts().unwrap().is_empty());
        assert_eq!(service.pages().unwrap().len(), 1);
        assert_eq!(published.published_by(), Some("u1"));

        service
            .delete_page(DeletePageCommand {
                page_id: page.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();
        assert!(service.drafts().unwrap().is_empty());
        assert!(service.pages().unwrap().is_empty());
    }

    #[test]
    fn media_lifecycle_end_to_end() {
        let (service, _, sink) = default_service();

        let asset = upload(&service, "a.png");
        assert_eq!(asset.uploaded_by(), "u1");
        assert_eq!(asset.locator().as_str(), "mem://a.png");
        assert_eq!(service.media().unwrap().len(), 1);

        let deleted = service
            .delete_media(DeleteMediaCommand {
                media_id: asset.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();
        assert!(deleted);
        assert!(service.media().unwrap().is_empty());

        let deleted_again = service
            .delete_media(DeleteMediaCommand {
                media_id: asset.id().clone(),
                acting_user_id: actor(),
            })
            .unwrap();
        assert!(!deleted_again);
        assert!(service.media().unwrap().is_empty());

        assert_eq!(sink.titles(), vec!["Media Uploaded", "Media Deleted"]);
    }

    #[test]
    fn failed_save_rolls_back_create() {
        let (service, store, sink) = default_service();
        store.fail_writes(true);

        let result = service.create_page(CreatePageCommand {
            payload: payload(&[("title", json!("A"))]),
            acting_user_id: actor(),
        });

        assert!(matches!(result, Err(WorkflowError::Storage(_))));
        assert!(service.drafts().unwrap().is_empty());
        assert!(store.get("drafts").unwrap().is_none());
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn failed_save_rolls_back_publish() {
        let (service, store, sink) = default_service();
        let draft = create(&service, "A");
        store.fail_writes(true);

        let result = service.publish_page(PublishPageCommand {
            page_id: draft.id().clone(),
            acting_user_id: actor(),
        });

        assert!(matches!(result, Err(WorkflowError::Storage(_))));
        // memory still matches the last durable state: the page is a draft
        assert_eq!(service.drafts().unwrap().len(), 1);
        assert!(service.pages().unwrap().is_empty());
        assert_eq!(sink.titles(), vec!["Draft Created"]);
    }

    #[test]
    fn media_storage_failure_leaves_registry_untouched() {
        let store = TestStore::default();
        let sink = RecordingSink::default();
        let service = WorkflowService::load(
            TestPageIds::default(),
            TestMediaIds::default(),
            store.clone(),
            TestMediaStorage { fail: true },
            sink.clone(),
        )
        .unwrap();

        let result = service.upload_media(UploadMediaCommand {
            name: "a.png".to_string(),
            mime_type: "image/png".to_string(),
            content: vec![1],
            acting_user_id: actor(),
        });

        assert!(matches!(result, Err(WorkflowError::MediaStorage(_))));
        assert!(service.media().unwrap().is_empty());
        assert!(store.get("media-assets").unwrap().is_none());
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn notification_failure_does_not_fail_the_mutation() {
        let store = TestStore::default();
        let service = build_service(store.clone(), RecordingSink::failing());

        let page = service
            .create_page(CreatePageCommand {
                payload: payload(&[("title", json!("A"))]),
                acting_user_id: actor(),
            })
            .unwrap();

        assert_eq!(service.drafts().unwrap(), vec![page]);
        assert!(store.get("drafts").unwrap().is_some());
    }

    #[test]
    fn collections_are_restored_after_restart() {
        let store = TestStore::default();

        let (draft_id, published_id, media_id) = {
            let service = build_service(store.clone(), RecordingSink::default());
            let draft = create(&service, "A");
            let published = create(&service, "B");
            service
                .publish_page(PublishPageCommand {
                    page_id: published.id().clone(),
                    acting_user_id: actor(),
                })
                .unwrap();
            let asset = upload(&service, "a.png");
            (
                draft.id().clone(),
                published.id().clone(),
                asset.id().clone(),
            )
        };

        let restarted = build_service(store, RecordingSink::default());

        let drafts = restarted.drafts().unwrap();
        let pages = restarted.pages().unwrap();
        let media = restarted.media().unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id(), &draft_id);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].id(), &published_id);
        assert_eq!(pages[0].status(), PageStatus::Published);
        assert!(pages[0].published_at().is_some());
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].id(), &media_id);
    }
}

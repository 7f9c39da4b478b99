// ── Generic resource store ──
//
// One engine shared by every entity store: a repository, a reactive
// collection cache, a request status, and an entity-specific extension
// slot `X`. Operations light up according to the capability traits the
// repository implements.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use cantina_api::Pagination;
use tokio::sync::watch;
use tracing::debug;

use super::collection::{CollectionSnapshot, InsertAt, ResourceCache};
use super::status::{RequestStatus, StatusTracker};
use super::stream::StoreStream;
use crate::error::CoreError;
use crate::model::ResourceId;
use crate::repository::{
    CreateRepository, DeleteRepository, FetchRepository, ListRepository, Repository,
    UpdateRepository,
};

/// What happens when an older `load` resolves after a newer one was issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StaleResponsePolicy {
    /// Every response writes the cache when it arrives; the last to
    /// resolve wins regardless of issue order.
    #[default]
    LastResolvedWins,
    /// Responses to superseded loads are returned to their caller but do
    /// not touch the cache.
    LastIssuedWins,
}

/// Per-entity cache patching rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    pub insert_at: InsertAt,
    /// Keep `pagination.total` in step with local creates and deletes.
    pub track_total: bool,
    pub stale: StaleResponsePolicy,
}

impl CachePolicy {
    pub fn append() -> Self {
        Self {
            insert_at: InsertAt::Back,
            ..Self::default()
        }
    }

    pub fn tracking_total(mut self) -> Self {
        self.track_total = true;
        self
    }

    pub fn with_stale(mut self, stale: StaleResponsePolicy) -> Self {
        self.stale = stale;
        self
    }
}

/// Message recorded when a failure carries no server message and the
/// store names no fallback for the operation.
const UNEXPECTED: &str = "Erro inesperado";

/// Fallback error messages for the generic operations. Used when a failure
/// carries no server message. Only `load` is required; the others are
/// named by the stores whose repository supports the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreMessages {
    /// Entity name used in log lines.
    pub entity: &'static str,
    pub load: &'static str,
    pub load_one: Option<&'static str>,
    pub create: Option<&'static str>,
    pub update: Option<&'static str>,
    pub delete: Option<&'static str>,
}

impl StoreMessages {
    pub const fn new(entity: &'static str, load: &'static str) -> Self {
        Self {
            entity,
            load,
            load_one: None,
            create: None,
            update: None,
            delete: None,
        }
    }

    pub const fn with_load_one(mut self, message: &'static str) -> Self {
        self.load_one = Some(message);
        self
    }

    pub const fn with_create(mut self, message: &'static str) -> Self {
        self.create = Some(message);
        self
    }

    pub const fn with_update(mut self, message: &'static str) -> Self {
        self.update = Some(message);
        self
    }

    pub const fn with_delete(mut self, message: &'static str) -> Self {
        self.delete = Some(message);
        self
    }
}

fn fallback(message: Option<&'static str>) -> &'static str {
    message.unwrap_or(UNEXPECTED)
}

/// Reactive, repository-backed cache of one entity type.
pub struct ResourceStore<R: Repository, X = ()> {
    repo: R,
    cache: ResourceCache<R::Item>,
    status: StatusTracker,
    policy: CachePolicy,
    messages: StoreMessages,
    latest_page: AtomicU64,
    extra: X,
}

// ── Construction & state access ─────────────────────────────────────

impl<R: Repository, X> ResourceStore<R, X> {
    pub fn with_extra(repo: R, policy: CachePolicy, messages: StoreMessages, extra: X) -> Self {
        Self {
            repo,
            cache: ResourceCache::new(),
            status: StatusTracker::new(),
            policy,
            messages,
            latest_page: AtomicU64::new(0),
            extra,
        }
    }

    /// Choose how responses to superseded page loads are treated.
    pub fn with_stale(mut self, stale: StaleResponsePolicy) -> Self {
        self.policy.stale = stale;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    pub fn messages(&self) -> &StoreMessages {
        &self.messages
    }

    pub fn extra(&self) -> &X {
        &self.extra
    }

    pub(crate) fn cache(&self) -> &ResourceCache<R::Item> {
        &self.cache
    }

    pub(crate) fn tracker(&self) -> &StatusTracker {
        &self.status
    }

    pub fn snapshot(&self) -> CollectionSnapshot<R::Item> {
        self.cache.snapshot()
    }

    pub fn items(&self) -> Arc<Vec<Arc<R::Item>>> {
        self.cache.snapshot().items
    }

    pub fn current(&self) -> Option<Arc<R::Item>> {
        self.cache.snapshot().current
    }

    pub fn pagination(&self) -> Pagination {
        self.cache.snapshot().pagination
    }

    pub fn status(&self) -> RequestStatus {
        self.status.current()
    }

    pub fn is_loading(&self) -> bool {
        self.status.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.status.error()
    }

    pub fn subscribe(&self) -> watch::Receiver<CollectionSnapshot<R::Item>> {
        self.cache.subscribe()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<RequestStatus> {
        self.status.subscribe()
    }

    pub fn stream(&self) -> StoreStream<R::Item> {
        StoreStream::new(self.cache.subscribe())
    }

    /// Cached resource with identity `id`, searching the page only.
    pub fn find(&self, id: &ResourceId) -> Option<Arc<R::Item>> {
        self.cache.snapshot().find(id)
    }

    pub fn clear_error(&self) {
        self.status.clear_error();
    }

    /// Claim the next page-replacement ticket. Every operation that
    /// replaces the cached page takes one before its request goes out.
    pub(crate) fn issue_page_ticket(&self) -> u64 {
        self.latest_page.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the cached page unless the stale policy says a later ticket
    /// supersedes `ticket`. Returns whether the cache was written.
    pub(crate) fn replace_page_if_current(
        &self,
        ticket: u64,
        items: Arc<Vec<Arc<R::Item>>>,
        pagination: Pagination,
    ) -> bool {
        if self.policy.stale == StaleResponsePolicy::LastIssuedWins
            && self.latest_page.load(Ordering::SeqCst) != ticket
        {
            debug!(
                entity = self.messages.entity,
                ticket, "discarding superseded page"
            );
            return false;
        }
        self.cache.replace_page(items, pagination);
        true
    }

    pub fn clear_current(&self) {
        self.cache.clear_current();
    }

    /// Back to the initial state: empty page, no current item, default
    /// pagination, idle status. Extension state is left to the entity
    /// store's own reset.
    pub fn reset_collection(&self) {
        self.cache.reset();
        self.status.reset();
    }
}

impl<R: Repository, X: Default> ResourceStore<R, X> {
    pub fn with_policy(repo: R, policy: CachePolicy, messages: StoreMessages) -> Self {
        Self::with_extra(repo, policy, messages, X::default())
    }
}

// ── Generic operations ──────────────────────────────────────────────

impl<R: ListRepository, X: Send + Sync> ResourceStore<R, X> {
    /// Fetch a page and replace the cached items and pagination.
    ///
    /// On failure the cache is left untouched. Under
    /// [`StaleResponsePolicy::LastIssuedWins`] a response to a superseded
    /// call is returned but not cached.
    pub async fn load(&self, query: &R::Query) -> Result<Arc<Vec<Arc<R::Item>>>, CoreError> {
        let ticket = self.issue_page_ticket();
        debug!(entity = self.messages.entity, ticket, "loading page");

        let page = self
            .status
            .track(self.messages.load, self.repo.list(query))
            .await?;
        let items: Arc<Vec<Arc<R::Item>>> =
            Arc::new(page.items.into_iter().map(Arc::new).collect());
        self.replace_page_if_current(ticket, Arc::clone(&items), page.pagination);
        Ok(items)
    }
}

impl<R: FetchRepository, X: Send + Sync> ResourceStore<R, X> {
    /// Fetch one resource into the current-item slot. The page is not
    /// touched.
    pub async fn load_by_id(&self, id: &ResourceId) -> Result<Arc<R::Item>, CoreError> {
        debug!(entity = self.messages.entity, %id, "loading one");
        let item = self
            .status
            .track(fallback(self.messages.load_one), self.repo.get(id))
            .await?;
        let item = Arc::new(item);
        self.cache.set_current(Arc::clone(&item));
        Ok(item)
    }
}

impl<R: CreateRepository, X: Send + Sync> ResourceStore<R, X> {
    pub async fn create(&self, request: &R::Create) -> Result<Arc<R::Item>, CoreError> {
        debug!(entity = self.messages.entity, "creating");
        let item = self
            .status
            .track(fallback(self.messages.create), self.repo.create(request))
            .await?;
        let item = Arc::new(item);
        self.cache
            .insert(Arc::clone(&item), self.policy.insert_at, self.policy.track_total);
        Ok(item)
    }
}

impl<R: UpdateRepository, X: Send + Sync> ResourceStore<R, X> {
    /// Update on the server, then patch the cached copy if the page holds
    /// it. An uncached id is not an error.
    pub async fn update(
        &self,
        id: &ResourceId,
        request: &R::Update,
    ) -> Result<Arc<R::Item>, CoreError> {
        debug!(entity = self.messages.entity, %id, "updating");
        let item = self
            .status
            .track(fallback(self.messages.update), self.repo.update(id, request))
            .await?;
        let item = Arc::new(item);
        self.cache.replace(id, &item);
        Ok(item)
    }
}

impl<R: DeleteRepository, X: Send + Sync> ResourceStore<R, X> {
    /// Delete on the server, then drop the cached copy. Presence in the
    /// cache is not checked beforehand.
    pub async fn delete(&self, id: &ResourceId) -> Result<(), CoreError> {
        debug!(entity = self.messages.entity, %id, "deleting");
        self.status
            .track(fallback(self.messages.delete), self.repo.delete(id))
            .await?;
        self.cache.remove(id, self.policy.track_total);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cantina_api::{Error as ApiError, Page};
    use tokio::sync::{mpsc, oneshot};

    use super::*;
    use crate::store::collection::tests::{Widget, widget};

    const MESSAGES: StoreMessages = StoreMessages::new("widget", "Erro ao buscar widgets")
        .with_create("Erro ao criar widget")
        .with_update("Erro ao atualizar widget")
        .with_delete("Erro ao deletar widget");

    type Reply<T> = oneshot::Sender<Result<T, CoreError>>;

    /// Repository whose calls block until the test answers them, so tests
    /// control resolution order.
    struct ScriptedRepo {
        lists: mpsc::UnboundedSender<(u32, Reply<Page<Widget>>)>,
        writes: mpsc::UnboundedSender<(String, Reply<Option<Widget>>)>,
    }

    struct Harness {
        lists: mpsc::UnboundedReceiver<(u32, Reply<Page<Widget>>)>,
        writes: mpsc::UnboundedReceiver<(String, Reply<Option<Widget>>)>,
    }

    fn scripted() -> (ScriptedRepo, Harness) {
        let (lists_tx, lists) = mpsc::unbounded_channel();
        let (writes_tx, writes) = mpsc::unbounded_channel();
        (
            ScriptedRepo {
                lists: lists_tx,
                writes: writes_tx,
            },
            Harness { lists, writes },
        )
    }

    impl ScriptedRepo {
        async fn write(&self, op: String) -> Result<Option<Widget>, CoreError> {
            let (tx, rx) = oneshot::channel();
            self.writes.send((op, tx)).unwrap();
            rx.await.unwrap()
        }
    }

    impl Repository for ScriptedRepo {
        type Item = Widget;
    }

    impl ListRepository for ScriptedRepo {
        type Query = u32;

        async fn list(&self, query: &u32) -> Result<Page<Widget>, CoreError> {
            let (tx, rx) = oneshot::channel();
            self.lists.send((*query, tx)).unwrap();
            rx.await.unwrap()
        }
    }

    impl CreateRepository for ScriptedRepo {
        type Create = String;

        async fn create(&self, name: &String) -> Result<Widget, CoreError> {
            self.write(format!("create:{name}"))
                .await
                .map(Option::unwrap)
        }
    }

    impl UpdateRepository for ScriptedRepo {
        type Update = String;

        async fn update(&self, id: &ResourceId, name: &String) -> Result<Widget, CoreError> {
            self.write(format!("update:{id}:{name}"))
                .await
                .map(Option::unwrap)
        }
    }

    impl DeleteRepository for ScriptedRepo {
        async fn delete(&self, id: &ResourceId) -> Result<(), CoreError> {
            self.write(format!("delete:{id}")).await.map(|_| ())
        }
    }

    fn page_of(ids: &[&str], total: u64) -> Page<Widget> {
        Page {
            items: ids.iter().map(|id| widget(id, &id.to_uppercase())).collect(),
            pagination: Pagination::new(1, 10, total, 1),
        }
    }

    fn cached_ids<X>(store: &ResourceStore<ScriptedRepo, X>) -> Vec<String> {
        store.items().iter().map(|w| w.id.to_string()).collect()
    }

    fn store(policy: CachePolicy) -> (Arc<ResourceStore<ScriptedRepo>>, Harness) {
        let (repo, harness) = scripted();
        (
            Arc::new(ResourceStore::with_policy(repo, policy, MESSAGES)),
            harness,
        )
    }

    #[tokio::test]
    async fn load_replaces_page_and_pagination() {
        let (store, mut h) = store(CachePolicy::default());
        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&1).await }
        });

        let (_, reply) = h.lists.recv().await.unwrap();
        assert!(store.is_loading());
        reply.send(Ok(page_of(&["a", "b", "c"], 3))).unwrap();
        task.await.unwrap().unwrap();

        assert_eq!(cached_ids(&store), ["a", "b", "c"]);
        assert_eq!(store.pagination(), Pagination::new(1, 10, 3, 1));
        assert!(!store.is_loading());
        assert_eq!(store.error(), None);
    }

    #[tokio::test]
    async fn failed_load_keeps_cache_and_records_fallback() {
        let (store, mut h) = store(CachePolicy::default());
        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&1).await }
        });
        h.lists
            .recv()
            .await
            .unwrap()
            .1
            .send(Ok(page_of(&["a"], 1)))
            .unwrap();
        task.await.unwrap().unwrap();

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&2).await }
        });
        h.lists
            .recv()
            .await
            .unwrap()
            .1
            .send(Err(ApiError::Timeout { timeout_secs: 30 }.into()))
            .unwrap();
        assert!(task.await.unwrap().is_err());

        assert_eq!(cached_ids(&store), ["a"]);
        let status = store.status();
        assert!(!status.loading);
        assert_eq!(status.error.as_deref(), Some("Erro ao buscar widgets"));
    }

    #[tokio::test]
    async fn last_resolved_wins_by_default() {
        let (store, mut h) = store(CachePolicy::default());
        let first = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&1).await }
        });
        let (_, first_reply) = h.lists.recv().await.unwrap();
        let second = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&2).await }
        });
        let (_, second_reply) = h.lists.recv().await.unwrap();

        second_reply.send(Ok(page_of(&["new"], 1))).unwrap();
        second.await.unwrap().unwrap();
        first_reply.send(Ok(page_of(&["old"], 1))).unwrap();
        first.await.unwrap().unwrap();

        assert_eq!(cached_ids(&store), ["old"]);
    }

    #[tokio::test]
    async fn last_issued_wins_discards_superseded_page() {
        let policy = CachePolicy::default().with_stale(StaleResponsePolicy::LastIssuedWins);
        let (store, mut h) = store(policy);
        let first = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&1).await }
        });
        let (_, first_reply) = h.lists.recv().await.unwrap();
        let second = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&2).await }
        });
        let (_, second_reply) = h.lists.recv().await.unwrap();

        second_reply.send(Ok(page_of(&["new"], 1))).unwrap();
        second.await.unwrap().unwrap();
        first_reply.send(Ok(page_of(&["old"], 1))).unwrap();
        let stale = first.await.unwrap().unwrap();

        assert_eq!(stale[0].id.as_str(), "old");
        assert_eq!(cached_ids(&store), ["new"]);
    }

    #[tokio::test]
    async fn create_prepends_or_appends_per_policy() {
        for (policy, expected) in [
            (CachePolicy::default(), ["n", "a"]),
            (CachePolicy::append(), ["a", "n"]),
        ] {
            let (store, mut h) = store(policy);
            store.cache().replace_page(
                Arc::new(vec![Arc::new(widget("a", "A"))]),
                Pagination::new(1, 10, 1, 1),
            );

            let task = tokio::spawn({
                let store = Arc::clone(&store);
                async move { store.create(&"N".to_owned()).await }
            });
            let (op, reply) = h.writes.recv().await.unwrap();
            assert_eq!(op, "create:N");
            reply.send(Ok(Some(widget("n", "N")))).unwrap();
            let created = task.await.unwrap().unwrap();

            assert_eq!(created.id.as_str(), "n");
            assert_eq!(cached_ids(&store), expected);
            assert_eq!(store.pagination().total, 1, "total untouched without tracking");
        }
    }

    #[tokio::test]
    async fn tracked_total_follows_create_and_delete() {
        let (store, mut h) = store(CachePolicy::default().tracking_total());
        store.cache().replace_page(
            Arc::new(vec![Arc::new(widget("a", "A"))]),
            Pagination::new(1, 10, 1, 1),
        );

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.create(&"B".to_owned()).await }
        });
        h.writes
            .recv()
            .await
            .unwrap()
            .1
            .send(Ok(Some(widget("b", "B"))))
            .unwrap();
        task.await.unwrap().unwrap();
        assert_eq!(store.pagination().total, 2);

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.delete(&"a".into()).await }
        });
        h.writes.recv().await.unwrap().1.send(Ok(None)).unwrap();
        task.await.unwrap().unwrap();
        assert_eq!(store.pagination().total, 1);
        assert_eq!(cached_ids(&store), ["b"]);
    }

    #[tokio::test]
    async fn update_of_uncached_id_leaves_page_alone() {
        let (store, mut h) = store(CachePolicy::default());
        store.cache().replace_page(
            Arc::new(vec![Arc::new(widget("a", "A")), Arc::new(widget("b", "B"))]),
            Pagination::new(1, 10, 2, 1),
        );

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.update(&"id-5".into(), &"X".to_owned()).await }
        });
        h.writes
            .recv()
            .await
            .unwrap()
            .1
            .send(Ok(Some(widget("id-5", "X"))))
            .unwrap();
        let updated = task.await.unwrap().unwrap();

        assert_eq!(updated.name, "X");
        assert_eq!(cached_ids(&store), ["a", "b"]);
        assert_eq!(store.items()[0].name, "A");
    }

    #[tokio::test]
    async fn failed_delete_keeps_item_and_uses_server_message() {
        let (store, mut h) = store(CachePolicy::default());
        store.cache().replace_page(
            Arc::new(vec![Arc::new(widget("a", "A"))]),
            Pagination::new(1, 10, 1, 1),
        );

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.delete(&"a".into()).await }
        });
        h.writes
            .recv()
            .await
            .unwrap()
            .1
            .send(Err(ApiError::NotFound {
                message: Some("Widget não encontrado".into()),
            }
            .into()))
            .unwrap();
        let err = task.await.unwrap().unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(cached_ids(&store), ["a"]);
        assert_eq!(store.error().as_deref(), Some("Widget não encontrado"));
    }

    #[tokio::test]
    async fn unnamed_operation_falls_back_to_generic_message() {
        let (repo, mut h) = scripted();
        let store = Arc::new(ResourceStore::<_, ()>::with_policy(
            repo,
            CachePolicy::default(),
            StoreMessages::new("widget", "Erro ao buscar widgets"),
        ));

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.delete(&"a".into()).await }
        });
        h.writes
            .recv()
            .await
            .unwrap()
            .1
            .send(Err(ApiError::Timeout { timeout_secs: 30 }.into()))
            .unwrap();
        assert!(task.await.unwrap().is_err());

        assert_eq!(store.error().as_deref(), Some("Erro inesperado"));
    }

    #[tokio::test]
    async fn page_ticket_is_shared_with_load() {
        let policy = CachePolicy::default().with_stale(StaleResponsePolicy::LastIssuedWins);
        let (store, mut h) = store(policy);
        let earlier = store.issue_page_ticket();

        let task = tokio::spawn({
            let store = Arc::clone(&store);
            async move { store.load(&1).await }
        });
        h.lists
            .recv()
            .await
            .unwrap()
            .1
            .send(Ok(page_of(&["loaded"], 1)))
            .unwrap();
        task.await.unwrap().unwrap();

        let written = store.replace_page_if_current(
            earlier,
            Arc::new(vec![Arc::new(widget("old", "OLD"))]),
            Pagination::new(1, 10, 1, 1),
        );
        assert!(!written);
        assert_eq!(cached_ids(&store), ["loaded"]);

        let latest = store.issue_page_ticket();
        assert!(store.replace_page_if_current(
            latest,
            Arc::new(vec![Arc::new(widget("new", "NEW"))]),
            Pagination::new(1, 10, 1, 1),
        ));
        assert_eq!(cached_ids(&store), ["new"]);
    }

    #[tokio::test]
    async fn reset_collection_restores_initial_state() {
        let (store, _h) = store(CachePolicy::default());
        store.cache().replace_page(
            Arc::new(vec![Arc::new(widget("a", "A"))]),
            Pagination::new(2, 5, 9, 2),
        );
        store.cache().set_current(Arc::new(widget("a", "A")));
        store.tracker().fail("boom");

        store.reset_collection();

        let snap = store.snapshot();
        assert!(snap.is_empty());
        assert!(snap.current.is_none());
        assert_eq!(snap.pagination, Pagination::default());
        assert_eq!(store.status(), RequestStatus::default());
    }

    #[tokio::test]
    async fn subscribers_see_mutations() {
        let (store, _h) = store(CachePolicy::default());
        let mut stream = store.stream();
        assert!(stream.current().is_empty());

        store
            .cache()
            .insert(Arc::new(widget("z", "Z")), InsertAt::Front, false);
        let snap = stream.changed().await.unwrap();

        assert_eq!(snap.len(), 1);
        assert_eq!(stream.latest().items[0].id.as_str(), "z");
    }
}

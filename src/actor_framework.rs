use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;

use thiserror::Error;
use tokio::sync::{broadcast, mpsc, oneshot};
use tracing::{debug, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION (Documents with Hooks, Params, Patches and Actions)
// =============================================================================

/// Trait that any document type must implement to be held by a ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreateParams: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Get the ID of the document
    fn id(&self) -> &Self::Id;

    /// Documents keyed by a natural id (a cart keyed by its owner) return it here.
    /// `None` lets the actor's id generator pick one.
    fn assigned_id(_params: &Self::CreateParams) -> Option<Self::Id> {
        None
    }

    /// Construct the full document from the ID and creation params
    fn from_create_params(id: Self::Id, params: Self::CreateParams) -> Result<Self, Self::Error>;

    /// Composite key that must stay unique across every document in the store.
    fn unique_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler ---

    /// Handle a custom domain-specific action
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failures reported by the store itself, wrapping whatever the document hooks reject with.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError<E> {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Unique key {key} already held by {existing}")]
    Conflict { key: String, existing: String },
    #[error("{0}")]
    Rejected(E),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Live change notification published after every successful write.
#[derive(Debug, Clone)]
pub enum Change<T: Entity> {
    Created(T),
    Updated(T),
    Deleted(T),
}

impl<T: Entity> Change<T> {
    pub fn document(&self) -> &T {
        match self {
            Change::Created(doc) | Change::Updated(doc) | Change::Deleted(doc) => doc,
        }
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type StoreResult<T, R> = Result<R, StoreError<<T as Entity>::Error>>;
pub type Response<T, R> = oneshot::Sender<StoreResult<T, R>>;
pub type Filter<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
pub type BatchFn<T> = Box<dyn FnMut(&mut T) -> bool + Send>;

pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T, T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T, Option<T>>,
    },
    List {
        filter: Filter<T>,
        respond_to: Response<T, Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<T, T>,
    },
    DeleteWhere {
        filter: Filter<T>,
        respond_to: Response<T, Vec<T::Id>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T, T::ActionResult>,
    },
    BatchUpdate {
        apply: BatchFn<T>,
        respond_to: Response<T, Vec<T::Id>>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    changes: broadcast::Sender<Change<T>>,
    store: HashMap<T::Id, T>,
    unique: HashMap<String, T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(buffer_size);
        let actor = Self {
            receiver,
            changes: changes.clone(),
            store: HashMap::new(),
            unique: HashMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender, changes);
        (actor, client)
    }

    /// Serves requests one at a time until every client handle is dropped.
    #[instrument(name = "resource_actor", skip(self), fields(entity = std::any::type_name::<T>()))]
    pub async fn run(mut self) {
        debug!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    let _ = respond_to.send(self.handle_create(params));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self.store.values().filter(|item| filter(*item)).cloned().collect();
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update { id, patch, respond_to } => {
                    let _ = respond_to.send(self.handle_update(id, patch));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(self.handle_delete(id));
                }
                ResourceRequest::DeleteWhere { filter, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_delete_where(filter)));
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    let _ = respond_to.send(self.handle_action(id, action));
                }
                ResourceRequest::BatchUpdate { apply, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_batch_update(apply)));
                }
            }
        }

        debug!("ResourceActor stopped");
    }

    fn handle_create(&mut self, params: T::CreateParams) -> StoreResult<T, T::Id> {
        let id = T::assigned_id(&params).unwrap_or_else(|| (self.next_id_fn)());
        if self.store.contains_key(&id) {
            return Err(StoreError::Conflict {
                key: id.to_string(),
                existing: id.to_string(),
            });
        }

        let mut item = T::from_create_params(id.clone(), params).map_err(StoreError::Rejected)?;
        item.on_create().map_err(StoreError::Rejected)?;

        if let Some(key) = item.unique_key() {
            if let Some(existing) = self.unique.get(&key) {
                debug!(key = %key, existing = %existing, "Unique key already taken");
                return Err(StoreError::Conflict {
                    key,
                    existing: existing.to_string(),
                });
            }
            self.unique.insert(key, id.clone());
        }

        self.store.insert(id.clone(), item.clone());
        self.publish(Change::Created(item));
        debug!(id = %id, "Document created");
        Ok(id)
    }

    fn handle_update(&mut self, id: T::Id, patch: T::Patch) -> StoreResult<T, T> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let before = item.clone();
        if let Err(e) = item.on_update(patch) {
            *item = before;
            return Err(StoreError::Rejected(e));
        }
        let updated = item.clone();
        self.commit_rewrite(id, before, updated)
    }

    fn handle_action(&mut self, id: T::Id, action: T::Action) -> StoreResult<T, T::ActionResult> {
        let item = self
            .store
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let before = item.clone();
        let result = match item.handle_action(action) {
            Ok(result) => result,
            Err(e) => {
                *item = before;
                return Err(StoreError::Rejected(e));
            }
        };
        let updated = item.clone();
        self.commit_rewrite(id, before, updated)?;
        Ok(result)
    }

    /// Re-checks the unique index after an in-place rewrite; restores `before` on conflict.
    fn commit_rewrite(&mut self, id: T::Id, before: T, updated: T) -> StoreResult<T, T> {
        let old_key = before.unique_key();
        let new_key = updated.unique_key();
        if old_key != new_key {
            if let Some(key) = &new_key {
                if let Some(existing) = self.unique.get(key) {
                    if *existing != id {
                        let existing = existing.to_string();
                        self.store.insert(id, before);
                        return Err(StoreError::Conflict {
                            key: key.clone(),
                            existing,
                        });
                    }
                }
            }
            if let Some(key) = old_key {
                self.unique.remove(&key);
            }
            if let Some(key) = new_key {
                self.unique.insert(key, id.clone());
            }
        }

        self.publish(Change::Updated(updated.clone()));
        debug!(id = %id, "Document updated");
        Ok(updated)
    }

    fn handle_delete(&mut self, id: T::Id) -> StoreResult<T, T> {
        match self.store.get(&id) {
            Some(item) => item.on_delete().map_err(StoreError::Rejected)?,
            None => return Err(StoreError::NotFound(id.to_string())),
        }
        self.remove_document(&id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn handle_delete_where(&mut self, filter: Filter<T>) -> Vec<T::Id> {
        let matching: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, item)| filter(*item))
            .map(|(id, _)| id.clone())
            .collect();

        let mut removed = Vec::with_capacity(matching.len());
        for id in matching {
            if let Some(Err(e)) = self.store.get(&id).map(|item| item.on_delete()) {
                warn!(id = %id, error = %e, "Delete hook refused document, keeping it");
                continue;
            }
            if self.remove_document(&id).is_some() {
                removed.push(id);
            }
        }
        debug!(removed = removed.len(), "Batch delete applied");
        removed
    }

    /// Applies `apply` to every document inside this one message. The closure must not
    /// touch fields that feed `unique_key`.
    fn handle_batch_update(&mut self, mut apply: BatchFn<T>) -> Vec<T::Id> {
        let mut changed = Vec::new();
        for (id, item) in self.store.iter_mut() {
            if apply(item) {
                changed.push(id.clone());
            }
        }
        for id in &changed {
            if let Some(item) = self.store.get(id).cloned() {
                self.publish(Change::Updated(item));
            }
        }
        debug!(changed = changed.len(), "Batch update applied");
        changed
    }

    fn remove_document(&mut self, id: &T::Id) -> Option<T> {
        let item = self.store.remove(id)?;
        if let Some(key) = item.unique_key() {
            self.unique.remove(&key);
        }
        self.publish(Change::Deleted(item.clone()));
        debug!(id = %id, "Document deleted");
        Some(item)
    }

    fn publish(&self, change: Change<T>) {
        // No live subscribers is not an error.
        let _ = self.changes.send(change);
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    changes: broadcast::Sender<Change<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>, changes: broadcast::Sender<Change<T>>) -> Self {
        Self { sender, changes }
    }

    async fn call<R>(
        &self,
        request: impl FnOnce(Response<T, R>) -> ResourceRequest<T>,
    ) -> StoreResult<T, R> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(request(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    pub async fn create(&self, params: T::CreateParams) -> StoreResult<T, T::Id> {
        self.call(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> StoreResult<T, Option<T>> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> StoreResult<T, Vec<T>> {
        self.call(|respond_to| ResourceRequest::List {
            filter: Box::new(filter),
            respond_to,
        })
        .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> StoreResult<T, T> {
        self.call(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> StoreResult<T, T> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn delete_where(
        &self,
        filter: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> StoreResult<T, Vec<T::Id>> {
        self.call(|respond_to| ResourceRequest::DeleteWhere {
            filter: Box::new(filter),
            respond_to,
        })
        .await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> StoreResult<T, T::ActionResult> {
        self.call(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    pub async fn batch_update(
        &self,
        apply: impl FnMut(&mut T) -> bool + Send + 'static,
    ) -> StoreResult<T, Vec<T::Id>> {
        self.call(|respond_to| ResourceRequest::BatchUpdate {
            apply: Box::new(apply),
            respond_to,
        })
        .await
    }

    /// Live listener over documents matching `filter`. Only writes made after this call are seen.
    pub fn subscribe(&self, filter: impl Fn(&T) -> bool + Send + Sync + 'static) -> Subscription<T> {
        Subscription {
            receiver: self.changes.subscribe(),
            filter: Box::new(filter),
        }
    }
}

pub struct Subscription<T: Entity> {
    receiver: broadcast::Receiver<Change<T>>,
    filter: Filter<T>,
}

impl<T: Entity> Subscription<T> {
    /// Next matching change, or `None` once the store is gone.
    pub async fn next(&mut self) -> Option<Change<T>> {
        loop {
            match self.receiver.recv().await {
                Ok(change) if (self.filter)(change.document()) => return Some(change),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Subscriber fell behind, changes dropped");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

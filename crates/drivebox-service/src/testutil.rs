//! In-memory collaborator fakes and fixtures for service tests.
//!
//! The metadata fakes emulate the PostgreSQL schema's behavior that the
//! engine depends on, notably the cascade delete of a folder subtree
//! taking its file rows with it, and support injected read/insert
//! failures. The namespace fake wraps the real in-memory provider and
//! adds per-object failure injection. Together they let tests exercise
//! every partial-failure policy from either side of the two-store
//! ordering.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use drivebox_core::traits::{NamespaceObject, NamespaceStore, UploadedObject};
use drivebox_core::{DriveError, DriveResult};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::folder::{CreateFolder, Folder, ROOT_FOLDER_NAME};
use drivebox_entity::share::{CreateShareLink, ShareLink};
use drivebox_entity::store::{FileStore, FolderStore, LinkStore};
use drivebox_storage::MemoryNamespaceStore;

use crate::context::RequestContext;
use crate::sync::NamespaceSyncEngine;

#[derive(Default)]
struct MetaState {
    folders: HashMap<Uuid, Folder>,
    files: HashMap<Uuid, File>,
}

/// In-memory folder store with injectable failures.
pub struct MemoryFolderStore {
    state: Arc<Mutex<MetaState>>,
    fail_next_create: AtomicBool,
    failing_reads: Mutex<HashSet<Uuid>>,
}

/// In-memory file store with injectable failures.
pub struct MemoryFileStore {
    state: Arc<Mutex<MetaState>>,
    fail_next_create: AtomicBool,
}

/// Folder and file stores over one shared state, so subtree deletes
/// cascade across both like the real schema does.
pub fn shared_stores() -> (Arc<MemoryFolderStore>, Arc<MemoryFileStore>) {
    let state = Arc::new(Mutex::new(MetaState::default()));
    (
        Arc::new(MemoryFolderStore::with_state(state.clone())),
        Arc::new(MemoryFileStore::with_state(state)),
    )
}

impl MemoryFolderStore {
    fn with_state(state: Arc<Mutex<MetaState>>) -> Self {
        Self {
            state,
            fail_next_create: AtomicBool::new(false),
            failing_reads: Mutex::new(HashSet::new()),
        }
    }

    pub fn new() -> Self {
        Self::with_state(Arc::new(Mutex::new(MetaState::default())))
    }

    /// Make the next `create` call fail with a database error.
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// Make every `find_by_id` of the given folder fail with a database
    /// error, simulating a transient store outage for that row.
    pub fn fail_reads_of(&self, id: Uuid) {
        self.failing_reads.lock().unwrap().insert(id);
    }

    /// Insert a root folder directly, bypassing the engine.
    pub fn insert_root(&self, owner_id: Uuid, name: &str) -> Folder {
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id,
            parent_id: None,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.insert_raw(folder.clone());
        folder
    }

    /// Insert a child folder directly, bypassing the engine.
    pub fn insert_child(&self, owner_id: Uuid, parent_id: Uuid, name: &str) -> Folder {
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id,
            parent_id: Some(parent_id),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.insert_raw(folder.clone());
        folder
    }

    /// Insert an arbitrary folder row, corrupt chains included.
    pub fn insert_raw(&self, folder: Folder) {
        self.state.lock().unwrap().folders.insert(folder.id, folder);
    }

    pub fn count(&self) -> usize {
        self.state.lock().unwrap().folders.len()
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<Folder>> {
        if self.failing_reads.lock().unwrap().contains(&id) {
            return Err(DriveError::database(format!(
                "injected read failure for folder {id}"
            )));
        }
        Ok(self.state.lock().unwrap().folders.get(&id).cloned())
    }

    async fn find_root(&self, owner_id: Uuid) -> DriveResult<Option<Folder>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .folders
            .values()
            .find(|f| f.owner_id == owner_id && f.parent_id.is_none())
            .cloned())
    }

    async fn find_by_parent_and_name(
        &self,
        parent_id: Uuid,
        name: &str,
    ) -> DriveResult<Option<Folder>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .folders
            .values()
            .find(|f| f.parent_id == Some(parent_id) && f.name == name)
            .cloned())
    }

    async fn list_children(&self, parent_id: Uuid) -> DriveResult<Vec<Folder>> {
        let mut children: Vec<Folder> = self
            .state
            .lock()
            .unwrap()
            .folders
            .values()
            .filter(|f| f.parent_id == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }

    async fn list_descendants(&self, folder_id: Uuid) -> DriveResult<Vec<Folder>> {
        let state = self.state.lock().unwrap();
        let mut result = Vec::new();
        let mut frontier = vec![folder_id];
        while let Some(current) = frontier.pop() {
            let mut children: Vec<Folder> = state
                .folders
                .values()
                .filter(|f| f.parent_id == Some(current))
                .cloned()
                .collect();
            children.sort_by(|a, b| a.name.cmp(&b.name));
            for child in children {
                frontier.push(child.id);
                result.push(child);
            }
        }
        Ok(result)
    }

    async fn create(&self, data: &CreateFolder) -> DriveResult<Folder> {
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(DriveError::database("injected folder insert failure"));
        }
        let folder = Folder {
            id: Uuid::new_v4(),
            owner_id: data.owner_id,
            parent_id: data.parent_id,
            name: data.name.clone(),
            created_at: Utc::now(),
        };
        self.insert_raw(folder.clone());
        Ok(folder)
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> DriveResult<Folder> {
        let mut state = self.state.lock().unwrap();
        let folder = state
            .folders
            .get_mut(&id)
            .ok_or_else(|| DriveError::not_found(format!("folder {id}")))?;
        folder.name = new_name.to_string();
        Ok(folder.clone())
    }

    async fn reparent(&self, id: Uuid, new_parent_id: Uuid) -> DriveResult<Folder> {
        let mut state = self.state.lock().unwrap();
        let folder = state
            .folders
            .get_mut(&id)
            .ok_or_else(|| DriveError::not_found(format!("folder {id}")))?;
        folder.parent_id = Some(new_parent_id);
        Ok(folder.clone())
    }

    async fn delete_subtree(&self, id: Uuid) -> DriveResult<bool> {
        let mut state = self.state.lock().unwrap();
        if !state.folders.contains_key(&id) {
            return Ok(false);
        }
        let mut doomed = HashSet::from([id]);
        loop {
            let more: Vec<Uuid> = state
                .folders
                .values()
                .filter(|f| {
                    f.parent_id.is_some_and(|p| doomed.contains(&p)) && !doomed.contains(&f.id)
                })
                .map(|f| f.id)
                .collect();
            if more.is_empty() {
                break;
            }
            doomed.extend(more);
        }
        state.folders.retain(|fid, _| !doomed.contains(fid));
        state.files.retain(|_, file| !doomed.contains(&file.folder_id));
        Ok(true)
    }
}

impl MemoryFileStore {
    fn with_state(state: Arc<Mutex<MetaState>>) -> Self {
        Self {
            state,
            fail_next_create: AtomicBool::new(false),
        }
    }

    pub fn new() -> Self {
        Self::with_state(Arc::new(Mutex::new(MetaState::default())))
    }

    /// Make the next `create` call fail with a database error.
    pub fn fail_next_create(&self) {
        self.fail_next_create.store(true, Ordering::SeqCst);
    }

    /// Insert a file row directly, bypassing the engine.
    pub fn insert(&self, folder_id: Uuid, name: &str, mime_type: &str) -> File {
        let file = File {
            id: Uuid::new_v4(),
            folder_id,
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes: 0,
            url: String::new(),
            public_id: String::new(),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .files
            .insert(file.id, file.clone());
        file
    }

    pub fn count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<File>> {
        Ok(self.state.lock().unwrap().files.get(&id).cloned())
    }

    async fn find_by_folder_and_name(
        &self,
        folder_id: Uuid,
        name: &str,
    ) -> DriveResult<Option<File>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .files
            .values()
            .find(|f| f.folder_id == folder_id && f.name == name)
            .cloned())
    }

    async fn list_by_folder(&self, folder_id: Uuid) -> DriveResult<Vec<File>> {
        let mut files: Vec<File> = self
            .state
            .lock()
            .unwrap()
            .files
            .values()
            .filter(|f| f.folder_id == folder_id)
            .cloned()
            .collect();
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }

    async fn create(&self, data: &CreateFile) -> DriveResult<File> {
        if self.fail_next_create.swap(false, Ordering::SeqCst) {
            return Err(DriveError::database("injected file insert failure"));
        }
        let file = File {
            id: Uuid::new_v4(),
            folder_id: data.folder_id,
            name: data.name.clone(),
            mime_type: data.mime_type.clone(),
            size_bytes: data.size_bytes,
            url: data.url.clone(),
            public_id: data.public_id.clone(),
            created_at: Utc::now(),
        };
        self.state
            .lock()
            .unwrap()
            .files
            .insert(file.id, file.clone());
        Ok(file)
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> DriveResult<File> {
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| DriveError::not_found(format!("file {id}")))?;
        file.name = new_name.to_string();
        Ok(file.clone())
    }

    async fn relocate(
        &self,
        id: Uuid,
        new_folder_id: Uuid,
        new_url: &str,
        new_public_id: &str,
    ) -> DriveResult<File> {
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| DriveError::not_found(format!("file {id}")))?;
        file.folder_id = new_folder_id;
        file.url = new_url.to_string();
        file.public_id = new_public_id.to_string();
        Ok(file.clone())
    }

    async fn update_location(
        &self,
        id: Uuid,
        new_url: &str,
        new_public_id: &str,
    ) -> DriveResult<File> {
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get_mut(&id)
            .ok_or_else(|| DriveError::not_found(format!("file {id}")))?;
        file.url = new_url.to_string();
        file.public_id = new_public_id.to_string();
        Ok(file.clone())
    }

    async fn delete(&self, id: Uuid) -> DriveResult<bool> {
        Ok(self.state.lock().unwrap().files.remove(&id).is_some())
    }
}

/// In-memory share-link store.
#[derive(Default)]
pub struct MemoryLinkStore {
    links: Mutex<HashMap<Uuid, ShareLink>>,
}

impl MemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.links.lock().unwrap().len()
    }
}

#[async_trait]
impl LinkStore for MemoryLinkStore {
    async fn find_by_id(&self, id: Uuid) -> DriveResult<Option<ShareLink>> {
        Ok(self.links.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_creator(&self, user_id: Uuid) -> DriveResult<Vec<ShareLink>> {
        let mut links: Vec<ShareLink> = self
            .links
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.created_by == user_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn create(&self, data: &CreateShareLink) -> DriveResult<ShareLink> {
        let link = ShareLink {
            id: Uuid::new_v4(),
            target_kind: data.target_kind,
            target_id: data.target_id,
            created_by: data.created_by,
            expires_at: data.expires_at,
            created_at: Utc::now(),
        };
        self.links.lock().unwrap().insert(link.id, link.clone());
        Ok(link)
    }

    async fn delete(&self, id: Uuid) -> DriveResult<bool> {
        Ok(self.links.lock().unwrap().remove(&id).is_some())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> DriveResult<u64> {
        let mut links = self.links.lock().unwrap();
        let before = links.len();
        links.retain(|_, l| l.expires_at > now);
        Ok((before - links.len()) as u64)
    }
}

/// Namespace store with per-object failure injection, delegating to the
/// real in-memory provider otherwise.
#[derive(Debug, Default)]
pub struct FlakyNamespaceStore {
    inner: MemoryNamespaceStore,
    fail_renames: Mutex<HashSet<String>>,
    fail_deletes: Mutex<HashSet<String>>,
}

impl FlakyNamespaceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryNamespaceStore {
        &self.inner
    }

    /// Make `rename_object` fail for the given public id.
    pub fn fail_rename_of(&self, public_id: &str) {
        self.fail_renames
            .lock()
            .unwrap()
            .insert(public_id.to_string());
    }

    /// Make `delete_object` fail for the given public id.
    pub fn fail_delete_of(&self, public_id: &str) {
        self.fail_deletes
            .lock()
            .unwrap()
            .insert(public_id.to_string());
    }
}

#[async_trait]
impl NamespaceStore for FlakyNamespaceStore {
    fn provider_type(&self) -> &str {
        "flaky-memory"
    }

    async fn health_check(&self) -> DriveResult<bool> {
        self.inner.health_check().await
    }

    async fn create_folder(&self, path: &str) -> DriveResult<()> {
        self.inner.create_folder(path).await
    }

    async fn delete_folder(&self, path: &str) -> DriveResult<()> {
        self.inner.delete_folder(path).await
    }

    async fn rename_folder(&self, old_path: &str, new_path: &str) -> DriveResult<()> {
        self.inner.rename_folder(old_path, new_path).await
    }

    async fn list_by_prefix(&self, prefix: &str) -> DriveResult<Vec<NamespaceObject>> {
        self.inner.list_by_prefix(prefix).await
    }

    async fn upload(&self, path: &str, mime_type: &str, data: Bytes) -> DriveResult<UploadedObject> {
        self.inner.upload(path, mime_type, data).await
    }

    async fn delete_object(&self, public_id: &str) -> DriveResult<()> {
        if self.fail_deletes.lock().unwrap().contains(public_id) {
            return Err(DriveError::external(format!(
                "injected delete failure for '{public_id}'"
            )));
        }
        self.inner.delete_object(public_id).await
    }

    async fn rename_object(&self, public_id: &str, new_path: &str) -> DriveResult<UploadedObject> {
        if self.fail_renames.lock().unwrap().contains(public_id) {
            return Err(DriveError::external(format!(
                "injected rename failure for '{public_id}'"
            )));
        }
        self.inner.rename_object(public_id, new_path).await
    }
}

/// A provisioned single-owner drive with in-memory collaborators.
pub struct Fixture {
    pub folders: Arc<MemoryFolderStore>,
    pub files: Arc<MemoryFileStore>,
    pub namespace: Arc<FlakyNamespaceStore>,
    pub engine: NamespaceSyncEngine,
    pub ctx: RequestContext,
    pub owner: Uuid,
    pub root: Folder,
}

/// Build an engine over fresh in-memory stores and provision the owner's
/// root folder in both stores.
pub async fn fixture() -> Fixture {
    let (folders, files) = shared_stores();
    let namespace = Arc::new(FlakyNamespaceStore::new());
    let engine = NamespaceSyncEngine::new(
        folders.clone() as Arc<dyn FolderStore>,
        files.clone() as Arc<dyn FileStore>,
        namespace.clone() as Arc<dyn NamespaceStore>,
    );

    let owner = Uuid::new_v4();
    let root = engine.provision_root(owner).await.unwrap();
    assert_eq!(root.name, ROOT_FOLDER_NAME);

    Fixture {
        folders,
        files,
        namespace,
        engine,
        ctx: RequestContext::new(owner),
        owner,
        root,
    }
}

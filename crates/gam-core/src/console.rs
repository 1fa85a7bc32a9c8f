// ── Console ──
//
// Process-wide composition root: the API client, the query cache and
// the session store, wired so reads flow through the cache and writes
// flow through the mutation set. Constructed once and passed by
// reference; no ambient singletons.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use gam_api::types::{
    AlarmCounts, BandwidthCreate, BandwidthUpdate, DeviceCreate, DeviceUpdate, FirmwareUpload,
    FirmwareUploadResult, ListQuery, Paged, SubscriberCreate, SubscriberUpdate, UserCreate,
    UserUpdate,
};
use gam_api::{ApiClient, ExportResource};

use crate::error::CoreError;
use crate::model::{
    Alarm, BandwidthProfile, ConfigBackup, Device, Endpoint, FirmwareImage, Port, Subscriber, User,
};
use crate::mutation::{Action, MutationHandle, Navigation};
use crate::query::{InvalidationScope, ListController, QueryCache, QueryKey, Resource};
use crate::session::SessionStore;

/// One fetched page of a listing, alongside the server-reported total.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total: u64,
}

pub struct Console {
    api: ApiClient,
    cache: QueryCache,
    session: SessionStore,
    mutations: MutationHandle,
}

impl Console {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
            session: SessionStore::new(),
            mutations: MutationHandle::new(),
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    // ── Authentication ──

    pub async fn login(&self, username: &str, password: &SecretString) -> Result<User, CoreError> {
        let response = self.api.login(username, password).await?;
        let user: User = response.user.into();
        self.session
            .establish(SecretString::from(response.session_id), user.clone());
        Ok(user)
    }

    /// Revalidate a persisted session id against the server. Clears
    /// local state when the server no longer recognizes it.
    pub async fn restore(
        &self,
        session_id: SecretString,
        username: String,
    ) -> Result<User, CoreError> {
        self.api.resume_session(session_id.clone());
        self.session.resume(session_id, username);
        match self.api.current_user().await {
            Ok(dto) => {
                let user: User = dto.into();
                self.session.confirm(user.clone());
                Ok(user)
            }
            Err(err) => {
                // Only an auth failure proves the session is dead; a
                // transient transport error says nothing about it.
                if err.is_auth_expired() {
                    self.api.clear_session();
                    self.session.clear();
                }
                Err(err.into())
            }
        }
    }

    pub async fn logout(&self) -> Result<(), CoreError> {
        let result = self.api.logout().await;
        self.session.clear();
        self.cache.invalidate_all();
        result.map_err(CoreError::from)
    }

    // ── Cached reads ──

    async fn fetch_through<T, Fut>(
        &self,
        key: QueryKey,
        fetch: impl FnOnce() -> Fut,
    ) -> Result<Arc<T>, CoreError>
    where
        T: Send + Sync + 'static,
        Fut: Future<Output = Result<T, gam_api::Error>>,
    {
        if let Some(cached) = self.cache.get::<T>(&key) {
            debug!(%key, "query served from cache");
            return Ok(cached);
        }
        let value = fetch().await?;
        Ok(self.cache.put(key, value))
    }

    async fn list_page<W, D, Fut>(
        &self,
        list: &ListController,
        fetch: impl FnOnce(ListQuery) -> Fut,
    ) -> Result<Arc<Page<D>>, CoreError>
    where
        D: From<W> + Send + Sync + 'static,
        Fut: Future<Output = Result<Paged<W>, gam_api::Error>>,
    {
        let key = list.query_key();
        if let Some(cached) = self.cache.get::<Page<D>>(&key) {
            debug!(%key, "list served from cache");
            return Ok(cached);
        }
        let paged = fetch(list.query()).await?;
        let page = Page {
            total: paged.total,
            rows: paged.items.into_iter().map(D::from).collect(),
        };
        Ok(self.cache.put(key, page))
    }

    pub async fn list_devices(&self, list: &ListController) -> Result<Arc<Page<Device>>, CoreError> {
        self.list_page(list, |q| async move { self.api.list_devices(&q).await })
            .await
    }

    pub async fn device(&self, id: i64) -> Result<Arc<Device>, CoreError> {
        self.fetch_through(QueryKey::entity(Resource::Devices, id), || async move {
            self.api.get_device(id).await.map(Device::from)
        })
        .await
        .map_err(|err| err.for_entity("device", id))
    }

    pub async fn device_ports(&self, device_id: i64) -> Result<Arc<Vec<Port>>, CoreError> {
        self.fetch_through(
            QueryKey::device_scoped(Resource::Ports, device_id),
            || async move {
                let dtos = self.api.list_device_ports(device_id).await?;
                Ok(dtos.into_iter().map(Port::from).collect())
            },
        )
        .await
    }

    pub async fn device_endpoints(&self, device_id: i64) -> Result<Arc<Vec<Endpoint>>, CoreError> {
        self.fetch_through(
            QueryKey::device_scoped(Resource::Endpoints, device_id),
            || async move {
                let dtos = self.api.list_device_endpoints(device_id).await?;
                Ok(dtos.into_iter().map(Endpoint::from).collect())
            },
        )
        .await
    }

    pub async fn list_subscribers(
        &self,
        list: &ListController,
    ) -> Result<Arc<Page<Subscriber>>, CoreError> {
        self.list_page(list, |q| async move { self.api.list_subscribers(&q).await })
            .await
    }

    pub async fn subscriber(&self, id: i64) -> Result<Arc<Subscriber>, CoreError> {
        self.fetch_through(QueryKey::entity(Resource::Subscribers, id), || async move {
            self.api.get_subscriber(id).await.map(Subscriber::from)
        })
        .await
        .map_err(|err| err.for_entity("subscriber", id))
    }

    pub async fn list_bandwidths(
        &self,
        list: &ListController,
    ) -> Result<Arc<Page<BandwidthProfile>>, CoreError> {
        self.list_page(list, |q| async move { self.api.list_bandwidths(&q).await })
            .await
    }

    pub async fn bandwidth(&self, id: i64) -> Result<Arc<BandwidthProfile>, CoreError> {
        self.fetch_through(QueryKey::entity(Resource::Bandwidths, id), || async move {
            self.api.get_bandwidth(id).await.map(BandwidthProfile::from)
        })
        .await
        .map_err(|err| err.for_entity("bandwidth profile", id))
    }

    pub async fn list_alarms(&self, list: &ListController) -> Result<Arc<Page<Alarm>>, CoreError> {
        self.list_page(list, |q| async move { self.api.list_alarms(&q).await })
            .await
    }

    pub async fn alarm_counts(&self) -> Result<Arc<AlarmCounts>, CoreError> {
        self.fetch_through(QueryKey::new(Resource::AlarmCounts), || async move {
            self.api.alarm_counts().await
        })
        .await
    }

    pub async fn list_users(&self, list: &ListController) -> Result<Arc<Page<User>>, CoreError> {
        self.list_page(list, |q| async move { self.api.list_users(&q).await })
            .await
    }

    pub async fn user(&self, id: i64) -> Result<Arc<User>, CoreError> {
        self.fetch_through(QueryKey::entity(Resource::Users, id), || async move {
            self.api.get_user(id).await.map(User::from)
        })
        .await
        .map_err(|err| err.for_entity("user", id))
    }

    pub async fn list_firmware(
        &self,
        list: &ListController,
    ) -> Result<Arc<Page<FirmwareImage>>, CoreError> {
        self.list_page(list, |q| async move { self.api.list_firmware(&q).await })
            .await
    }

    pub async fn firmware(&self, id: i64) -> Result<Arc<FirmwareImage>, CoreError> {
        self.fetch_through(QueryKey::entity(Resource::Firmware, id), || async move {
            self.api.get_firmware(id).await.map(FirmwareImage::from)
        })
        .await
        .map_err(|err| err.for_entity("firmware image", id))
    }

    pub async fn device_backups(
        &self,
        device_id: i64,
    ) -> Result<Arc<Vec<ConfigBackup>>, CoreError> {
        self.fetch_through(
            QueryKey::device_scoped(Resource::Backups, device_id),
            || async move {
                let dtos = self.api.list_device_backups(device_id).await?;
                Ok(dtos.into_iter().map(ConfigBackup::from).collect())
            },
        )
        .await
    }

    pub async fn backup(&self, id: i64) -> Result<Arc<ConfigBackup>, CoreError> {
        self.fetch_through(QueryKey::entity(Resource::Backups, id), || async move {
            self.api.get_backup(id).await.map(ConfigBackup::from)
        })
        .await
        .map_err(|err| err.for_entity("backup", id))
    }

    /// Backup content bytes, uncached (fetched on demand only).
    pub async fn backup_content(&self, id: i64) -> Result<Vec<u8>, CoreError> {
        Ok(self.api.get_backup_content(id).await?)
    }

    /// Server-side CSV export for the current list view, uncached.
    pub async fn export_csv(
        &self,
        resource: ExportResource,
        list: &ListController,
    ) -> Result<Vec<u8>, CoreError> {
        Ok(self.api.export_csv(resource, &list.query()).await?)
    }

    // ── Mutations ──

    async fn run<T, Fut>(
        &self,
        action: Action,
        op: impl FnOnce() -> Fut,
    ) -> Result<(T, Navigation), CoreError>
    where
        Fut: Future<Output = Result<T, gam_api::Error>>,
    {
        let _guard = self.mutations.begin(&action)?;
        let value = op().await.map_err(CoreError::from)?;
        for scope in action.invalidations() {
            self.cache.invalidate(scope);
        }
        Ok((value, action.navigation()))
    }

    pub async fn create_device(&self, create: &DeviceCreate) -> Result<Device, CoreError> {
        let (dto, _) = self
            .run(Action::CreateDevice, || self.api.create_device(create))
            .await?;
        Ok(dto.into())
    }

    pub async fn update_device(&self, id: i64, update: &DeviceUpdate) -> Result<Device, CoreError> {
        let (dto, _) = self
            .run(Action::UpdateDevice(id), || self.api.update_device(id, update))
            .await?;
        Ok(dto.into())
    }

    pub async fn delete_device(&self, id: i64) -> Result<Navigation, CoreError> {
        let (_, nav) = self
            .run(Action::DeleteDevice(id), || self.api.delete_device(id))
            .await?;
        Ok(nav)
    }

    /// Reject config-changing operations up front when the device
    /// cannot accept them. The server enforces the same gate; failing
    /// here saves a round trip and gives a cleaner message.
    async fn ensure_config_ops(&self, device_id: i64) -> Result<(), CoreError> {
        let device = self.device(device_id).await?;
        if !device.allows_config_ops() {
            let reason = if device.online { "read-only" } else { "offline" };
            return Err(CoreError::Rejected {
                message: format!(
                    "device {} is {reason}; configuration operations are disabled",
                    device.display_name()
                ),
            });
        }
        Ok(())
    }

    pub async fn sync_device(&self, id: i64) -> Result<(), CoreError> {
        self.ensure_config_ops(id).await?;
        self.run(Action::SyncDevice(id), || self.api.sync_device(id))
            .await?;
        Ok(())
    }

    pub async fn reboot_device(&self, id: i64) -> Result<(), CoreError> {
        self.run(Action::RebootDevice(id), || self.api.reboot_device(id))
            .await?;
        Ok(())
    }

    /// Provision every unprovisioned endpoint currently visible on the
    /// device.
    pub async fn provision_endpoints(&self, device_id: i64) -> Result<(), CoreError> {
        self.ensure_config_ops(device_id).await?;
        self.run(Action::ProvisionEndpoints(device_id), || {
            self.api.provision_device(device_id)
        })
        .await?;
        Ok(())
    }

    pub async fn backup_device(&self, id: i64) -> Result<(), CoreError> {
        self.run(Action::BackupDevice(id), || self.api.backup_device(id))
            .await?;
        Ok(())
    }

    pub async fn create_subscriber(
        &self,
        create: &SubscriberCreate,
    ) -> Result<Subscriber, CoreError> {
        let device_id = create.device_id;
        let (dto, _) = self
            .run(Action::CreateSubscriber { device_id }, || {
                self.api.create_subscriber(create)
            })
            .await?;
        Ok(dto.into())
    }

    pub async fn update_subscriber(
        &self,
        id: i64,
        device_id: i64,
        update: &SubscriberUpdate,
    ) -> Result<Subscriber, CoreError> {
        let (dto, _) = self
            .run(Action::UpdateSubscriber { id, device_id }, || {
                self.api.update_subscriber(id, update)
            })
            .await?;
        Ok(dto.into())
    }

    pub async fn delete_subscriber(
        &self,
        id: i64,
        device_id: i64,
    ) -> Result<Navigation, CoreError> {
        let (_, nav) = self
            .run(Action::DeleteSubscriber { id, device_id }, || {
                self.api.delete_subscriber(id)
            })
            .await?;
        Ok(nav)
    }

    /// Create a bandwidth profile. A missing device scope defaults to
    /// the first available device.
    pub async fn create_bandwidth(
        &self,
        mut create: BandwidthCreate,
    ) -> Result<BandwidthProfile, CoreError> {
        let device_id = match create.device_id {
            Some(id) => id,
            None => {
                let id = self.first_device_id().await?;
                create.device_id = Some(id);
                id
            }
        };
        let (dto, _) = self
            .run(Action::CreateBandwidth { device_id }, || {
                self.api.create_bandwidth(&create)
            })
            .await?;
        Ok(dto.into())
    }

    async fn first_device_id(&self) -> Result<i64, CoreError> {
        let paged = self.api.list_devices(&ListQuery::new(1, 1)).await?;
        paged
            .items
            .first()
            .map(|d| d.id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "device".to_owned(),
                identifier: "any".to_owned(),
            })
    }

    pub async fn update_bandwidth(
        &self,
        id: i64,
        device_id: i64,
        update: &BandwidthUpdate,
    ) -> Result<BandwidthProfile, CoreError> {
        let (dto, _) = self
            .run(Action::UpdateBandwidth { id, device_id }, || {
                self.api.update_bandwidth(id, update)
            })
            .await?;
        Ok(dto.into())
    }

    pub async fn delete_bandwidth(
        &self,
        id: i64,
        device_id: i64,
    ) -> Result<Navigation, CoreError> {
        let (_, nav) = self
            .run(Action::DeleteBandwidth { id, device_id }, || {
                self.api.delete_bandwidth(id)
            })
            .await?;
        Ok(nav)
    }

    /// Push the profile's current rates down to its device.
    pub async fn push_bandwidth(&self, id: i64, device_id: i64) -> Result<(), CoreError> {
        self.run(Action::PushBandwidth { id, device_id }, || {
            self.api.push_bandwidth(id)
        })
        .await?;
        Ok(())
    }

    pub async fn acknowledge_alarm(&self, id: i64) -> Result<Alarm, CoreError> {
        let (dto, _) = self
            .run(Action::AcknowledgeAlarm(id), || self.api.acknowledge_alarm(id))
            .await?;
        Ok(dto.into())
    }

    pub async fn close_alarm(&self, id: i64) -> Result<Alarm, CoreError> {
        let (dto, _) = self
            .run(Action::CloseAlarm(id), || self.api.close_alarm(id))
            .await?;
        Ok(dto.into())
    }

    pub async fn create_user(&self, create: &UserCreate) -> Result<User, CoreError> {
        let (dto, _) = self
            .run(Action::CreateUser, || self.api.create_user(create))
            .await?;
        Ok(dto.into())
    }

    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User, CoreError> {
        let (dto, _) = self
            .run(Action::UpdateUser(id), || self.api.update_user(id, update))
            .await?;
        Ok(dto.into())
    }

    pub async fn delete_user(&self, id: i64) -> Result<Navigation, CoreError> {
        let (_, nav) = self
            .run(Action::DeleteUser(id), || self.api.delete_user(id))
            .await?;
        Ok(nav)
    }

    /// Upload a firmware image set. The server reads version, revision
    /// and technology from the manifest and echoes them back.
    pub async fn upload_firmware(
        &self,
        upload: FirmwareUpload,
    ) -> Result<FirmwareUploadResult, CoreError> {
        let (result, _) = self
            .run(Action::UploadFirmware, || self.api.upload_firmware(upload))
            .await?;
        Ok(result)
    }

    pub async fn set_firmware_baseline(&self, id: i64) -> Result<(), CoreError> {
        self.run(Action::SetFirmwareBaseline(id), || {
            self.api.set_firmware_baseline(id)
        })
        .await?;
        Ok(())
    }

    pub async fn delete_firmware(&self, id: i64) -> Result<Navigation, CoreError> {
        let (_, nav) = self
            .run(Action::DeleteFirmware(id), || self.api.delete_firmware(id))
            .await?;
        Ok(nav)
    }

    pub async fn restore_backup(&self, id: i64, device_id: i64) -> Result<(), CoreError> {
        self.run(Action::RestoreBackup { id, device_id }, || {
            self.api.restore_backup(id)
        })
        .await?;
        Ok(())
    }

    pub async fn delete_backup(&self, id: i64, device_id: i64) -> Result<(), CoreError> {
        self.run(Action::DeleteBackup { id, device_id }, || {
            self.api.delete_backup(id)
        })
        .await?;
        Ok(())
    }

    /// Explicitly drop a scope from the cache, forcing the next read
    /// to hit the server.
    pub fn invalidate(&self, scope: InvalidationScope) {
        self.cache.invalidate(scope);
    }
}

// ── Alarm polling ──

/// Background alarm-count refresher, the console's only periodic task.
pub struct AlarmPoller {
    counts: watch::Receiver<AlarmCounts>,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl AlarmPoller {
    /// Spawn a task that refreshes alarm counts every `interval`. The
    /// cache entry is invalidated first so the read goes to the server.
    pub fn spawn(console: Arc<Console>, interval: Duration) -> Self {
        let (tx, counts) = watch::channel(AlarmCounts::default());
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    biased;
                    () = token.cancelled() => break,
                    _ = ticker.tick() => {
                        console.invalidate(InvalidationScope::Resource(Resource::AlarmCounts));
                        match console.alarm_counts().await {
                            Ok(fresh) => {
                                let _ = tx.send(*fresh);
                            }
                            Err(err) => warn!(%err, "alarm count refresh failed"),
                        }
                    }
                }
            }
        });
        Self {
            counts,
            cancel,
            handle,
        }
    }

    pub fn counts(&self) -> watch::Receiver<AlarmCounts> {
        self.counts.clone()
    }

    pub async fn shutdown(self) {
        self.cancel.cancel();
        let _ = self.handle.await;
    }
}

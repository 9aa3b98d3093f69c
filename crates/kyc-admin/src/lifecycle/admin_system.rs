use crate::clients::KycClients;
use crate::config::AdminConfig;
use resource_framework::{
    resolve, EditController, EntityId, EventManager, FileLoader, FormModel, FrameworkError,
    HttpTransport, ListController, ListSubscription, Navigator, ResourceClient, RestEntity,
    RouteBus, RouteQuery, Sortable, Transport,
};
use std::sync::Arc;
use tracing::info;

/// The shared services of one admin session.
///
/// Cloning the clients is cheap; every controller handed out by the system holds
/// its own clone and the shared navigator.
pub struct AdminSystem {
    pub config: AdminConfig,
    pub clients: KycClients,
    /// Source of truth for list state.
    pub routes: Arc<RouteBus>,
    pub events: EventManager,
    pub files: FileLoader,
    transport: Arc<dyn Transport>,
}

impl AdminSystem {
    /// Connects to `config.api_url` over HTTP.
    pub fn new(config: AdminConfig) -> Result<Self, FrameworkError> {
        let transport = HttpTransport::new(&config.api_url, config.request_timeout())?;
        info!(api_url = %config.api_url, "Admin system ready");
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    pub fn with_transport(config: AdminConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            clients: KycClients::new(transport.clone()),
            routes: Arc::new(RouteBus::new(RouteQuery::new())),
            events: EventManager::default(),
            files: FileLoader::new(config.max_upload_bytes),
            config,
            transport,
        }
    }

    pub fn navigator(&self) -> Arc<dyn Navigator> {
        self.routes.clone()
    }

    pub fn resource_client<T: RestEntity>(&self) -> ResourceClient<T> {
        ResourceClient::new(self.transport.clone())
    }

    /// Unpaginated list of `T`, sorted by `id,asc` until the route says otherwise.
    pub fn list<T: RestEntity + Sortable>(&self) -> ListController<T> {
        ListController::new(self.resource_client(), self.navigator())
    }

    /// Paginated list of `T` with the configured page size.
    pub fn paged_list<T: RestEntity + Sortable>(&self) -> ListController<T> {
        self.list().paginated(self.config.items_per_page)
    }

    /// Starts a list that reloads on every route change until the handle is dropped.
    pub fn watch<T: RestEntity + Sortable>(&self, list: ListController<T>) -> ListSubscription<T> {
        list.subscribe(self.routes.subscribe())
    }

    /// Opens the editor of `F`: blank for `None`, otherwise for the resolved record.
    ///
    /// An unknown id redirects to the not-found route and fails with
    /// [`FrameworkError::NotFound`].
    pub async fn edit<F>(&self, id: Option<EntityId>) -> Result<EditController<F>, FrameworkError>
    where
        F: FormModel<Context = KycClients>,
    {
        let client = self.resource_client::<F::Entity>();
        let navigator = self.navigator();
        let entity = resolve(&client, id, navigator.as_ref()).await?;
        EditController::activate(client, navigator, entity.as_ref(), &self.clients).await
    }
}

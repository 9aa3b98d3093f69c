//! # List Controller
//!
//! Route-driven loading of one entity collection.
//!
//! The controller never reloads in response to its own sort or page changes. It
//! pushes a new [`RouteQuery`] through the [`Navigator`]; the route observer
//! ([`ListSubscription`]) sees the change and calls [`ListController::on_route_change`].
//! Deletion is the one exception: a `Deleted` dialog outcome reloads directly.

use crate::client::ResourceClient;
use crate::dialog::{DeleteDialog, DialogOutcome};
use crate::entity::RestEntity;
use crate::error::FrameworkError;
use crate::query::RequestOptions;
use crate::route::{Navigator, RouteQuery, PAGE_PARAM, SIZE_PARAM, SORT_PARAM};
use crate::sort::{apply_sort, build_sort_param, parse_sort_param, SortOrder, SortState, Sortable};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How a list fetches its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pagination {
    /// Whole collection in one request, sorted client side.
    None,
    /// Backend pages of `items_per_page`; sorting is left to the backend.
    Paged { items_per_page: u32 },
}

/// What a view renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
    pub sort: SortState,
    /// 1-based; always 1 for unpaginated lists.
    pub page: u32,
    pub total_items: Option<u64>,
}

impl<T> Default for ListSnapshot<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
            sort: SortState::default(),
            page: 1,
            total_items: None,
        }
    }
}

pub struct ListController<T: RestEntity + Sortable> {
    client: ResourceClient<T>,
    navigator: Arc<dyn Navigator>,
    pagination: Pagination,
    default_sort: SortState,
    base_options: RequestOptions,
    items: Vec<T>,
    is_loading: bool,
    sort: SortState,
    page: u32,
    size: Option<u32>,
    total_items: Option<u64>,
    snapshots: watch::Sender<ListSnapshot<T>>,
}

impl<T: RestEntity + Sortable> ListController<T> {
    /// Unpaginated list with the default `id,asc` ordering.
    pub fn new(client: ResourceClient<T>, navigator: Arc<dyn Navigator>) -> Self {
        let default_sort = SortState::new("id", SortOrder::Asc);
        let (snapshots, _) = watch::channel(ListSnapshot {
            sort: default_sort.clone(),
            ..ListSnapshot::default()
        });
        Self {
            client,
            navigator,
            pagination: Pagination::None,
            default_sort: default_sort.clone(),
            base_options: RequestOptions::new(),
            items: Vec::new(),
            is_loading: false,
            sort: default_sort,
            page: 1,
            size: None,
            total_items: None,
            snapshots,
        }
    }

    pub fn paginated(mut self, items_per_page: u32) -> Self {
        self.pagination = Pagination::Paged { items_per_page };
        self
    }

    /// Ordering used until a route is applied, and whenever the route carries no
    /// sort token.
    pub fn with_default_sort(mut self, sort: SortState) -> Self {
        self.sort = sort.clone();
        self.default_sort = sort;
        self.publish();
        self
    }

    /// Criteria sent with every query, before paging and sort.
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.base_options = options;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn sort_state(&self) -> &SortState {
        &self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_items(&self) -> Option<u64> {
        self.total_items
    }

    /// Receiver for rendered state; updated after every state transition.
    pub fn snapshots(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.snapshots.subscribe()
    }

    fn publish(&self) {
        self.snapshots.send_replace(ListSnapshot {
            items: self.items.clone(),
            is_loading: self.is_loading,
            sort: self.sort.clone(),
            page: self.page,
            total_items: self.total_items,
        });
    }

    fn items_per_page(&self) -> Option<u32> {
        match self.pagination {
            Pagination::None => None,
            Pagination::Paged { items_per_page } => Some(self.size.unwrap_or(items_per_page)),
        }
    }

    /// Reads sort, page and size from the route. Absent or malformed values fall back
    /// to the defaults.
    pub fn fill_from_route(&mut self, query: &RouteQuery) {
        let sort = parse_sort_param(query.get(SORT_PARAM));
        self.sort = if sort.is_active() {
            sort
        } else {
            self.default_sort.clone()
        };
        if let Pagination::Paged { .. } = self.pagination {
            self.page = query.get_u32(PAGE_PARAM).filter(|p| *p > 0).unwrap_or(1);
            self.size = query.get_u32(SIZE_PARAM).filter(|s| *s > 0);
        }
    }

    /// Queries the backend and replaces the collection.
    ///
    /// On failure the previous collection is kept and the error is returned.
    #[tracing::instrument(skip(self), fields(entity_type = T::NAME))]
    pub async fn load(&mut self) -> Result<(), FrameworkError> {
        self.is_loading = true;
        self.publish();

        let mut options = self.base_options.clone();
        if let Some(size) = self.items_per_page() {
            options = options.page(self.page - 1).size(size);
        }
        options = options.sort(&self.sort);

        let result = self.client.query(&options).await;
        self.is_loading = false;
        match result {
            Ok(page) => {
                self.items = page.items;
                match self.pagination {
                    Pagination::None => {
                        apply_sort(&mut self.items, &self.sort);
                    }
                    Pagination::Paged { .. } => self.total_items = page.total_count,
                }
                debug!(count = self.items.len(), total = ?self.total_items, "Loaded");
                self.publish();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                self.publish();
                Err(e)
            }
        }
    }

    /// Handles a route (query parameter) change.
    ///
    /// An unpaginated list that already holds items only re-sorts; everything else
    /// reloads.
    pub async fn on_route_change(&mut self, query: &RouteQuery) -> Result<(), FrameworkError> {
        self.fill_from_route(query);
        if self.pagination == Pagination::None && !self.items.is_empty() {
            apply_sort(&mut self.items, &self.sort);
            debug!(entity_type = T::NAME, sort = ?build_sort_param(&self.sort), "Re-sorted");
            self.publish();
            return Ok(());
        }
        self.load().await
    }

    fn route_query(&self, sort: &SortState, page: u32) -> RouteQuery {
        let mut query = RouteQuery::new().with_opt(SORT_PARAM, build_sort_param(sort));
        if let Some(size) = self.items_per_page() {
            query = query
                .with(PAGE_PARAM, page.to_string())
                .with(SIZE_PARAM, size.to_string());
        }
        query
    }

    /// Requests `sort` through the router. Paginated lists go back to the first page.
    pub fn navigate_to_sort(&self, sort: SortState) {
        let page = match self.pagination {
            Pagination::None => self.page,
            Pagination::Paged { .. } => 1,
        };
        self.navigator.navigate(self.route_query(&sort, page));
    }

    /// Sorts by `field`, flipping the direction when it is already the active field.
    pub fn toggle_sort(&self, field: &str) {
        let order = match (&self.sort.predicate, self.sort.order) {
            (Some(current), Some(order)) if current == field => order.toggle(),
            _ => SortOrder::Asc,
        };
        self.navigate_to_sort(SortState::new(field, order));
    }

    /// Requests `page` (1-based) through the router.
    pub fn navigate_to_page(&self, page: u32) {
        self.navigator
            .navigate(self.route_query(&self.sort, page.max(1)));
    }

    pub fn open_delete_dialog(&self, entity: T) -> DeleteDialog<T> {
        DeleteDialog::new(entity, self.client.clone())
    }

    /// Reloads once when the dialog closed with `Deleted`.
    pub async fn on_dialog_closed(&mut self, outcome: DialogOutcome) -> Result<(), FrameworkError> {
        match outcome {
            DialogOutcome::Deleted => {
                info!(entity_type = T::NAME, "Reloading after delete");
                self.load().await
            }
            DialogOutcome::Dismissed => Ok(()),
        }
    }

    /// Runs the controller against `routes` until the subscription is dropped.
    ///
    /// The current route is applied immediately, then every change is handled in
    /// order. Load failures are logged and leave the subscription running.
    pub fn subscribe(mut self, mut routes: watch::Receiver<RouteQuery>) -> ListSubscription<T> {
        let snapshots = self.snapshots();
        let handle = tokio::spawn(async move {
            loop {
                let query = routes.borrow_and_update().clone();
                // Errors are already logged by `load`.
                let _ = self.on_route_change(&query).await;
                if routes.changed().await.is_err() {
                    debug!(entity_type = T::NAME, "Route channel closed");
                    break;
                }
            }
        });
        ListSubscription { snapshots, handle }
    }
}

/// A list controller running against a route channel. Dropping it stops the task.
pub struct ListSubscription<T> {
    snapshots: watch::Receiver<ListSnapshot<T>>,
    handle: JoinHandle<()>,
}

impl<T> ListSubscription<T> {
    pub fn snapshots(&self) -> watch::Receiver<ListSnapshot<T>> {
        self.snapshots.clone()
    }

    /// Stops the route task. Dropping the subscription has the same effect.
    pub fn cancel(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> Drop for ListSubscription<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info, instrument};

use crate::actor_framework::ResourceActor;
use crate::app_system::{AuthState, PortalConfig, PortalError, Result};
use crate::bulletins::BulletinScraper;
use crate::clients::{
    AnnouncementClient, CartClient, ProductClient, ProgramClient, QueryClient, RegistrationClient,
    StorefrontClient,
};
use crate::domain::{Announcement, Cart, FarmerQuery, Product, Registration, TrainingProgram};

/// Id generator producing `prefix_1`, `prefix_2`, ...
fn id_sequence(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
}

/// The composition root: starts every store, wires the clients together and owns
/// the session holder.
pub struct PortalSystem {
    pub auth: AuthState,
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub storefront: StorefrontClient,
    pub program_client: ProgramClient,
    pub registration_client: RegistrationClient,
    pub announcement_client: AnnouncementClient,
    pub query_client: QueryClient,
    pub bulletins: BulletinScraper,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PortalSystem {
    /// Must be called inside a tokio runtime.
    ///
    /// **Startup Order:**
    /// 1. Stores nothing else depends on (carts, registrations, announcements, queries)
    /// 2. Products, wired to carts for fan-out
    /// 3. Programs, wired to registrations for cascade delete
    #[instrument(name = "portal_system", skip(config))]
    pub fn new(config: &PortalConfig) -> Result<Self> {
        let capacity = config.mailbox_capacity;
        let mut handles = Vec::new();

        info!("Starting portal system");

        let (cart_actor, cart_resource_client) = ResourceActor::<Cart>::new(capacity, id_sequence("cart"));
        handles.push(tokio::spawn(cart_actor.run()));
        let cart_client = CartClient::new(cart_resource_client);

        let (registration_actor, registration_resource_client) =
            ResourceActor::<Registration>::new(capacity, id_sequence("registration"));
        handles.push(tokio::spawn(registration_actor.run()));

        let (announcement_actor, announcement_resource_client) =
            ResourceActor::<Announcement>::new(capacity, id_sequence("announcement"));
        handles.push(tokio::spawn(announcement_actor.run()));
        let announcement_client = AnnouncementClient::new(announcement_resource_client);

        let (query_actor, query_resource_client) =
            ResourceActor::<FarmerQuery>::new(capacity, id_sequence("query"));
        handles.push(tokio::spawn(query_actor.run()));
        let query_client = QueryClient::new(query_resource_client);

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(capacity, id_sequence("product"));
        handles.push(tokio::spawn(product_actor.run()));
        let product_client = ProductClient::new(product_resource_client, cart_client.clone());
        let storefront = StorefrontClient::new(cart_client.clone(), product_client.clone());

        let (program_actor, program_resource_client) =
            ResourceActor::<TrainingProgram>::new(capacity, id_sequence("program"));
        handles.push(tokio::spawn(program_actor.run()));
        let program_client = ProgramClient::new(program_resource_client, registration_resource_client.clone());
        let registration_client = RegistrationClient::new(registration_resource_client, program_client.clone());

        let bulletins = BulletinScraper::new(config.bulletin_url.as_deref(), config.http_timeout)?;
        let auth = AuthState::new(
            config.officer_access_code.clone(),
            config.supplier_access_code.clone(),
        );

        info!(stores = handles.len(), "Portal system started");

        Ok(Self {
            auth,
            product_client,
            cart_client,
            storefront,
            program_client,
            registration_client,
            announcement_client,
            query_client,
            bulletins,
            handles,
        })
    }

    /// Logs out, closes every store by dropping the clients, and waits for the actors to stop.
    /// Clones of the clients held elsewhere keep their store alive until they are dropped too.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<()> {
        info!("Shutting down portal system");

        self.auth.logout();
        drop(self.storefront);
        drop(self.registration_client);
        drop(self.program_client);
        drop(self.product_client);
        drop(self.cart_client);
        drop(self.announcement_client);
        drop(self.query_client);

        let mut failures = Vec::new();
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Store shutdown error");
                failures.push(e.to_string());
            }
        }

        if !failures.is_empty() {
            return Err(PortalError::Shutdown(failures.join("; ")));
        }
        info!("Portal system shutdown complete");
        Ok(())
    }
}

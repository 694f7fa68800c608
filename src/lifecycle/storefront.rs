use crate::clients::{CartStoreClient, CatalogStoreClient};
use crate::config::Config;
use crate::pages::{CartPage, HomePage, LoginPage, ProductsPage};
use crate::services::{CartService, ProductService, UserService};
use crate::session::Session;
use crate::transport::{ApiClient, ApiError};
use crate::{cart_store, catalog_store};
use tracing::{error, info};

/// The composed client: one HTTP client, three services and the two entity stores.
///
/// Pages are handed the user from a [`Session`] when they are built; a page built before a
/// login keeps showing the old identity until it is built again.
///
/// # Example
///
/// ```rust,no_run
/// use golflow_storefront::config::Config;
/// use golflow_storefront::lifecycle::Storefront;
/// use golflow_storefront::session::{MemoryIdentityStore, Session};
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let storefront = Storefront::new(&Config::new("http://localhost:8080/")?)?;
///
///     let session = Session::restore(Arc::new(MemoryIdentityStore::new()))?;
///
///     let mut products = storefront.products_page(&session);
///     products.mount().await;
///     println!("{} products", products.products().len());
///     drop(products);
///
///     storefront.shutdown().await?;
///     Ok(())
/// }
/// ```
pub struct Storefront {
    pub users: UserService,
    pub products: ProductService,
    pub carts: CartService,

    /// Client for the cart store
    pub cart_client: CartStoreClient,

    /// Client for the catalog store
    pub catalog_client: CatalogStoreClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl Storefront {
    /// Builds the services and spawns both stores. Must be called inside a Tokio runtime.
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let api = ApiClient::new(config)?;
        let users = UserService::new(api.clone());
        let products = ProductService::new(api.clone());
        let carts = CartService::new(api);

        let (cart_store, cart_client) = cart_store::new(config.store_buffer);
        let (catalog_store, catalog_client) = catalog_store::new(config.store_buffer);

        let cart_handle = tokio::spawn(cart_store.run(carts.clone()));
        let catalog_handle = tokio::spawn(catalog_store.run(products.clone()));

        info!(backend = %config.backend_url, "Storefront started");
        Ok(Self {
            users,
            products,
            carts,
            cart_client,
            catalog_client,
            handles: vec![cart_handle, catalog_handle],
        })
    }

    pub fn login_page(&self) -> LoginPage {
        LoginPage::new(self.users.clone())
    }

    pub fn home_page(&self, session: &Session) -> HomePage {
        HomePage::new(
            self.catalog_client.clone(),
            self.cart_client.clone(),
            session.user().cloned(),
        )
    }

    pub fn products_page(&self, session: &Session) -> ProductsPage {
        ProductsPage::new(
            self.catalog_client.clone(),
            self.cart_client.clone(),
            session.user().cloned(),
        )
    }

    pub fn cart_page(&self, session: &Session) -> CartPage {
        CartPage::new(self.cart_client.clone(), session.user().cloned())
    }

    /// Closes both stores and waits for their tasks.
    ///
    /// The stores only stop once every client clone is gone, so pages built from this
    /// storefront must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down storefront...");

        drop(self.cart_client);
        drop(self.catalog_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Storefront shutdown complete.");
        Ok(())
    }
}

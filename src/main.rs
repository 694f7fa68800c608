use golflow_storefront::config::Config;
use golflow_storefront::lifecycle::{setup_tracing, Storefront};
use golflow_storefront::pages::CartView;
use golflow_storefront::session::{FileIdentityStore, Session};
use std::sync::Arc;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| e.to_string())?;
    info!(backend = %config.backend_url, "Starting storefront");

    let storefront = Storefront::new(&config).map_err(|e| e.to_string())?;
    let identity = Arc::new(FileIdentityStore::new(&config.identity_file));
    let mut session = Session::restore(identity).map_err(|e| e.to_string())?;

    if !session.is_signed_in() {
        if let Ok(username) = std::env::var("GOLFLOW_USERNAME") {
            let span = tracing::info_span!("login");
            async {
                let mut login = storefront.login_page();
                login.set_username(username);
                if login.submit_login(&mut session).await.is_none() {
                    warn!(error = ?login.error(), "Login failed");
                }
            }
            .instrument(span)
            .await;
        }
    }

    {
        let mut home = storefront.home_page(&session);
        home.mount().instrument(tracing::info_span!("home")).await;
        for product in home.featured() {
            info!(id = %product.id, name = %product.name, price = product.price, "Featured");
        }
        if let Some(items) = home.header().badge() {
            info!(items, "Cart badge");
        }
    }

    {
        let mut cart = storefront.cart_page(&session);
        cart.mount().instrument(tracing::info_span!("cart")).await;
        match cart.view() {
            CartView::Ready(cart) => {
                for line in &cart.items {
                    info!(
                        product = %line.product_name,
                        quantity = line.quantity,
                        total = line.line_total,
                        "Cart line"
                    );
                }
                info!(items = cart.total_items, total = cart.total_price, "Cart total");
            }
            CartView::Empty => info!("Cart is empty"),
            CartView::SignedOut => info!("Not signed in; set GOLFLOW_USERNAME to log in"),
            CartView::Loading => {}
        }
    }

    storefront.shutdown().await?;

    info!("Storefront stopped");
    Ok(())
}

use super::{Header, Notice};
use crate::cart_store::CartError;
use crate::clients::CartStoreClient;
use crate::model::{Cart, ProductId, Username};
use crate::session::{Session, SessionError};
use thiserror::Error;
use tracing::{info, warn};

pub const CART_UPDATE_FAILED: &str = "Could not update the cart";
pub const CART_LOAD_FAILED: &str = "Could not load the cart";
pub const CART_NOT_RELOADED: &str = "Cart updated, but it could not be reloaded";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("Checkout is not available yet")]
    CheckoutUnavailable,
}

/// What the cart page is showing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CartView {
    #[default]
    Loading,
    Ready(Cart),
    Empty,
    /// Nobody is signed in, so there is no cart to show.
    SignedOut,
}

impl CartView {
    fn for_cart(cart: Cart) -> Self {
        if cart.is_empty() {
            CartView::Empty
        } else {
            CartView::Ready(cart)
        }
    }
}

pub struct CartPage {
    carts: CartStoreClient,
    header: Header,
    view: CartView,
    notice: Option<Notice>,
}

impl CartPage {
    pub fn new(carts: CartStoreClient, user: Option<Username>) -> Self {
        let view = if user.is_some() {
            CartView::Loading
        } else {
            CartView::SignedOut
        };
        Self {
            carts,
            header: Header::new(user),
            view,
            notice: None,
        }
    }

    pub async fn mount(&mut self) {
        let Some(user) = self.header.user().cloned() else {
            self.view = CartView::SignedOut;
            return;
        };
        self.view = CartView::Loading;
        match self.carts.load(&user).await {
            Ok(cart) => self.show(cart),
            Err(e) => {
                // Nothing to fall back to yet.
                warn!(%user, error = %e, "Could not load cart");
                self.view = CartView::Empty;
                self.notice = Some(Notice::Failure(CART_LOAD_FAILED.to_string()));
            }
        }
    }

    pub fn view(&self) -> &CartView {
        &self.view
    }

    pub fn cart(&self) -> Option<&Cart> {
        match &self.view {
            CartView::Ready(cart) => Some(cart),
            _ => None,
        }
    }

    /// One more unit at the line's unit price.
    pub async fn increase(&mut self, product_id: ProductId) {
        let Some(price) = self
            .cart()
            .and_then(|cart| cart.line(product_id))
            .map(|line| line.unit_price)
        else {
            return;
        };
        let Some(user) = self.header.user().cloned() else {
            return;
        };
        let result = self.carts.add_item(&user, product_id, price, 1).await;
        self.settle(&user, result);
    }

    pub async fn decrease(&mut self, product_id: ProductId) {
        let Some(user) = self.header.user().cloned() else {
            return;
        };
        let result = self.carts.remove_one(&user, product_id).await;
        self.settle(&user, result);
    }

    pub async fn remove(&mut self, product_id: ProductId) {
        let Some(user) = self.header.user().cloned() else {
            return;
        };
        let result = self.carts.remove_item(&user, product_id).await;
        self.settle(&user, result);
    }

    pub async fn clear(&mut self) {
        let Some(user) = self.header.user().cloned() else {
            return;
        };
        let result = self.carts.clear(&user).await;
        self.settle(&user, result);
    }

    /// Payment is not implemented; the cart is left as it is.
    pub fn checkout(&mut self) -> Result<(), CheckoutError> {
        info!(user = ?self.header.user(), "Checkout requested");
        let err = CheckoutError::CheckoutUnavailable;
        self.notice = Some(Notice::Failure(err.to_string()));
        Err(err)
    }

    fn settle(&mut self, user: &Username, result: Result<Cart, CartError>) {
        match result {
            Ok(cart) => self.show(cart),
            // Applied on the backend; the lines on screen are out of date until the next load.
            Err(CartError::Stale(error)) => {
                warn!(%user, %error, "Cart changed but not reloaded");
                self.notice = Some(Notice::Partial(CART_NOT_RELOADED.to_string()));
            }
            Err(e) => {
                warn!(%user, error = %e, "Cart update failed");
                self.notice = Some(Notice::Failure(CART_UPDATE_FAILED.to_string()));
            }
        }
    }

    fn show(&mut self, cart: Cart) {
        self.header.set_cart(&cart);
        self.view = CartView::for_cart(cart);
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub async fn logout(&mut self, session: &mut Session) -> Result<(), SessionError> {
        self.header.logout(session, &self.carts).await?;
        self.view = CartView::SignedOut;
        Ok(())
    }
}

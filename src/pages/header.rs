use crate::clients::CartStoreClient;
use crate::model::{Cart, Username};
use crate::session::{Session, SessionError};
use tracing::warn;

/// Navigation header: who is signed in, the cart badge and the logout menu.
///
/// Pages feed it the cart; it never fetches anything itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    user: Option<Username>,
    cart_items: u32,
    menu_open: bool,
}

impl Header {
    pub fn new(user: Option<Username>) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn user(&self) -> Option<&Username> {
        self.user.as_ref()
    }

    /// Item count for the badge; `None` hides it.
    pub fn badge(&self) -> Option<u32> {
        (self.cart_items > 0).then_some(self.cart_items)
    }

    pub fn set_cart(&mut self, cart: &Cart) {
        self.cart_items = cart.total_items;
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = self.user.is_some() && !self.menu_open;
    }

    /// Clicking anywhere outside the menu.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Signs out, forgets the user's cached cart and resets the header.
    pub async fn logout(
        &mut self,
        session: &mut Session,
        carts: &CartStoreClient,
    ) -> Result<(), SessionError> {
        let previous = session.sign_out()?;
        if let Some(user) = previous.as_ref().or(self.user.as_ref()) {
            if let Err(e) = carts.forget(user).await {
                warn!(%user, error = %e, "Could not drop cached cart");
            }
        }
        *self = Header::default();
        Ok(())
    }
}

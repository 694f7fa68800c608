use super::{load_badge, Header, ListState, Notice, ProductForm};
use crate::catalog_store::{Catalog, CatalogActionResult, CatalogError, CatalogFilter, Saved};
use crate::clients::{CartStoreClient, CatalogStoreClient};
use crate::model::{Category, Product, Username};
use crate::session::{Session, SessionError};
use tracing::{info, warn};

pub const ADDED_TO_CART: &str = "Added to cart";
pub const ADD_TO_CART_FAILED: &str = "Could not add to cart";
pub const SIGN_IN_TO_BUY: &str = "Sign in to add products to your cart";
pub const PRODUCT_CREATED: &str = "Product created";
pub const PRODUCT_UPDATED: &str = "Product updated";
pub const PRODUCT_DELETED: &str = "Product deleted";
pub const SAVE_FAILED: &str = "Could not save product";
pub const DELETE_FAILED: &str = "Could not delete product";
pub const LISTING_NOT_RELOADED: &str = "The product list could not be reloaded";

/// The product detail modal. Only one of these can be showing, so closing or switching
/// discards the options menu and any edit buffer along with it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProductModal {
    #[default]
    Closed,
    Viewing(Product),
    /// Viewing, with the edit/delete menu open.
    MenuOpen(Product),
    Editing {
        product: Product,
        form: ProductForm,
    },
}

impl ProductModal {
    pub fn product(&self) -> Option<&Product> {
        match self {
            ProductModal::Closed => None,
            ProductModal::Viewing(product)
            | ProductModal::MenuOpen(product)
            | ProductModal::Editing { product, .. } => Some(product),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ProductModal::Closed)
    }
}

/// Product listing with category filter, detail modal, add-to-cart and product CRUD.
///
/// Every mutation goes through the catalog store, which hands back the current filter's
/// listing as re-fetched after the change. The page never edits its list in place, and the
/// listing is back in `Initial` while a mutation is in flight.
///
/// A change the backend accepted but whose listing could not be re-fetched closes the form,
/// raises a partial notice and leaves the listing in `Error`, so a retry cannot repeat it.
pub struct ProductsPage {
    catalog: CatalogStoreClient,
    carts: CartStoreClient,
    header: Header,
    filter: CatalogFilter,
    products: Vec<Product>,
    state: ListState,
    modal: ProductModal,
    create_form: Option<ProductForm>,
    notice: Option<Notice>,
}

impl ProductsPage {
    pub fn new(catalog: CatalogStoreClient, carts: CartStoreClient, user: Option<Username>) -> Self {
        Self {
            catalog,
            carts,
            header: Header::new(user),
            filter: CatalogFilter::All,
            products: Vec::new(),
            state: ListState::Initial,
            modal: ProductModal::Closed,
            create_form: None,
            notice: None,
        }
    }

    pub async fn mount(&mut self) {
        load_badge(&mut self.header, &self.carts).await;
        self.reload().await;
    }

    // --- Listing ---

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.filter.category()
    }

    /// `None` shows every product.
    pub async fn select_category(&mut self, category: Option<Category>) {
        self.filter = CatalogFilter::from(category);
        self.reload().await;
    }

    /// Re-enters `Initial` and loads the current filter.
    pub async fn reload(&mut self) {
        self.state = ListState::Initial;
        match self.catalog.load(self.filter).await {
            Ok(catalog) => self.show(catalog),
            Err(e) => {
                warn!(filter = %self.filter, error = %e, "Could not load products");
                self.state = ListState::Error;
            }
        }
    }

    /// The change is on the backend but the listing on screen predates it.
    fn mark_stale(&mut self, result: &CatalogActionResult, success: &str) {
        let done = match result {
            CatalogActionResult::Saved(saved) => saved_notice(saved, success).message().to_string(),
            CatalogActionResult::Deleted(_) => success.to_string(),
        };
        self.notice = Some(Notice::Partial(format!("{done}. {LISTING_NOT_RELOADED}")));
        self.state = ListState::Error;
    }

    fn show(&mut self, catalog: Catalog) {
        // A late answer for a filter the user already left is dropped.
        if catalog.filter != self.filter {
            return;
        }
        self.state = ListState::for_items(&catalog.products);
        self.products = catalog.products;
    }

    // --- Detail modal ---

    pub fn modal(&self) -> &ProductModal {
        &self.modal
    }

    pub fn open_product(&mut self, product: &Product) {
        self.modal = ProductModal::Viewing(product.clone());
    }

    pub fn close_modal(&mut self) {
        self.modal = ProductModal::Closed;
    }

    pub fn toggle_menu(&mut self) {
        self.modal = match std::mem::take(&mut self.modal) {
            ProductModal::Viewing(product) => ProductModal::MenuOpen(product),
            ProductModal::MenuOpen(product) => ProductModal::Viewing(product),
            other => other,
        };
    }

    /// Opens the edit form pre-filled from the selected product and closes the menu.
    pub fn start_edit(&mut self) {
        self.modal = match std::mem::take(&mut self.modal) {
            ProductModal::Viewing(product) | ProductModal::MenuOpen(product) => {
                let form = ProductForm::for_product(&product);
                ProductModal::Editing { product, form }
            }
            other => other,
        };
    }

    /// Back to the detail view; the edit buffer is discarded.
    pub fn cancel_edit(&mut self) {
        self.modal = match std::mem::take(&mut self.modal) {
            ProductModal::Editing { product, .. } => ProductModal::Viewing(product),
            other => other,
        };
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut ProductForm> {
        match &mut self.modal {
            ProductModal::Editing { form, .. } => Some(form),
            _ => None,
        }
    }

    pub async fn submit_edit(&mut self) {
        let (id, draft, image) = match &mut self.modal {
            ProductModal::Editing { product, form } => match form.begin_submit() {
                Some((draft, image)) => (product.id, draft, image),
                None => return,
            },
            _ => return,
        };

        let previous = std::mem::replace(&mut self.state, ListState::Initial);
        match self
            .catalog
            .update_product(self.filter, id, draft, image)
            .await
        {
            Ok((saved, catalog)) => {
                info!(product_id = %id, "Product updated");
                self.modal = ProductModal::Closed;
                self.notice = Some(saved_notice(&saved, PRODUCT_UPDATED));
                self.show(catalog);
            }
            Err(CatalogError::Stale { result, error }) => {
                warn!(product_id = %id, %error, "Product updated but listing not reloaded");
                self.modal = ProductModal::Closed;
                self.mark_stale(&result, PRODUCT_UPDATED);
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Update failed");
                self.state = previous;
                if let Some(form) = self.edit_form_mut() {
                    form.fail_submit(SAVE_FAILED);
                }
            }
        }
    }

    pub async fn delete_selected(&mut self) {
        let Some(id) = self.modal.product().map(|p| p.id) else {
            return;
        };
        let previous = std::mem::replace(&mut self.state, ListState::Initial);
        match self.catalog.delete_product(self.filter, id).await {
            Ok(catalog) => {
                info!(product_id = %id, "Product deleted");
                self.modal = ProductModal::Closed;
                self.notice = Some(Notice::Success(PRODUCT_DELETED.to_string()));
                self.show(catalog);
            }
            Err(CatalogError::Stale { result, error }) => {
                warn!(product_id = %id, %error, "Product deleted but listing not reloaded");
                self.modal = ProductModal::Closed;
                self.mark_stale(&result, PRODUCT_DELETED);
            }
            Err(e) => {
                warn!(product_id = %id, error = %e, "Delete failed");
                self.state = previous;
                self.notice = Some(Notice::Failure(DELETE_FAILED.to_string()));
            }
        }
    }

    /// Adds one unit of the selected product at its listed price.
    pub async fn add_to_cart(&mut self) {
        let Some(product) = self.modal.product() else {
            return;
        };
        let Some(user) = self.header.user().cloned() else {
            self.notice = Some(Notice::Failure(SIGN_IN_TO_BUY.to_string()));
            return;
        };
        let (id, price) = (product.id, product.price);

        match self.carts.add_item(&user, id, price, 1).await {
            Ok(cart) => {
                self.header.set_cart(&cart);
                self.modal = ProductModal::Closed;
                self.notice = Some(Notice::Success(ADDED_TO_CART.to_string()));
            }
            Err(e) => {
                warn!(%user, product_id = %id, error = %e, "Add to cart failed");
                self.notice = Some(Notice::Failure(ADD_TO_CART_FAILED.to_string()));
            }
        }
    }

    // --- Create form ---

    pub fn create_form(&self) -> Option<&ProductForm> {
        self.create_form.as_ref()
    }

    pub fn create_form_mut(&mut self) -> Option<&mut ProductForm> {
        self.create_form.as_mut()
    }

    pub fn open_create_form(&mut self) {
        self.create_form.get_or_insert_with(ProductForm::default);
    }

    pub fn close_create_form(&mut self) {
        self.create_form = None;
    }

    pub async fn submit_create(&mut self) {
        let Some((draft, image)) = self.create_form.as_mut().and_then(ProductForm::begin_submit)
        else {
            return;
        };
        let name = draft.name.clone();

        let previous = std::mem::replace(&mut self.state, ListState::Initial);
        match self.catalog.create_product(self.filter, draft, image).await {
            Ok((saved, catalog)) => {
                info!(product_id = %saved.product.id, %name, "Product created");
                self.create_form = None;
                self.notice = Some(saved_notice(&saved, PRODUCT_CREATED));
                self.show(catalog);
            }
            Err(CatalogError::Stale { result, error }) => {
                warn!(%name, %error, "Product created but listing not reloaded");
                self.create_form = None;
                self.mark_stale(&result, PRODUCT_CREATED);
            }
            Err(e) => {
                warn!(%name, error = %e, "Create failed");
                self.state = previous;
                if let Some(form) = self.create_form.as_mut() {
                    form.fail_submit(SAVE_FAILED);
                }
            }
        }
    }

    // --- Header & feedback ---

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
        self.header.logout(session, &self.carts).await
    }
}

fn saved_notice(saved: &Saved, success: &str) -> Notice {
    match &saved.image_error {
        None => Notice::Success(success.to_string()),
        Some(error) => Notice::Partial(format!("{success}, but the image was not uploaded: {error}")),
    }
}

use super::{load_badge, Header, ListState};
use crate::catalog_store::CatalogFilter;
use crate::clients::{CartStoreClient, CatalogStoreClient};
use crate::model::{Product, Username};
use crate::session::{Session, SessionError};
use rand::seq::SliceRandom;
use tracing::warn;

/// How many products the landing page features.
pub const FEATURED_COUNT: usize = 3;

/// Landing page: a few products picked at random from the full listing.
pub struct HomePage {
    catalog: CatalogStoreClient,
    carts: CartStoreClient,
    header: Header,
    featured: Vec<Product>,
    state: ListState,
}

impl HomePage {
    pub fn new(catalog: CatalogStoreClient, carts: CartStoreClient, user: Option<Username>) -> Self {
        Self {
            catalog,
            carts,
            header: Header::new(user),
            featured: Vec::new(),
            state: ListState::Initial,
        }
    }

    pub async fn mount(&mut self) {
        load_badge(&mut self.header, &self.carts).await;
        self.state = ListState::Initial;
        match self.catalog.load(CatalogFilter::All).await {
            Ok(catalog) => {
                self.featured = pick_featured(catalog.products);
                self.state = ListState::for_items(&self.featured);
            }
            Err(e) => {
                warn!(error = %e, "Could not load products");
                self.state = ListState::Error;
            }
        }
    }

    pub fn featured(&self) -> &[Product] {
        &self.featured
    }

    pub fn state(&self) -> ListState {
        self.state
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    pub async fn logout(&mut self, session: &mut Session) -> Result<(), SessionError> {
        self.header.logout(session, &self.carts).await
    }
}

fn pick_featured(mut products: Vec<Product>) -> Vec<Product> {
    products.shuffle(&mut rand::rng());
    products.truncate(FEATURED_COUNT);
    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::Catalog;
    use crate::framework::mock::MockStore;
    use crate::framework::FrameworkError;
    use crate::model::{Cart, Category};
    use crate::pages::fixtures;

    fn products(n: u64) -> Vec<Product> {
        (1..=n)
            .map(|id| fixtures::product(id, &format!("P{id}"), 10.0, Category::Other))
            .collect()
    }

    #[test]
    fn featured_is_a_random_subset() {
        let all = products(6);
        let featured = pick_featured(all.clone());
        assert_eq!(featured.len(), FEATURED_COUNT);
        assert!(featured.iter().all(|p| all.contains(p)));

        let mut ids: Vec<_> = featured.iter().map(|p| p.id.0).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), FEATURED_COUNT);
    }

    #[test]
    fn short_listings_are_shown_whole() {
        assert_eq!(pick_featured(products(2)).len(), 2);
    }

    #[tokio::test]
    async fn mount_loads_badge_and_featured_products() {
        let alice = Username::from("alice");
        let mut carts = MockStore::<Cart>::new();
        carts
            .expect_refresh(alice.clone())
            .return_ok(fixtures::cart("alice", &[(1, "P1", 10.0, 4)]));
        let mut catalog = MockStore::<Catalog>::new();
        catalog
            .expect_refresh(CatalogFilter::All)
            .return_ok(fixtures::catalog(CatalogFilter::All, products(5)));

        let mut page = HomePage::new(
            CatalogStoreClient::new(catalog.client()),
            CartStoreClient::new(carts.client()),
            Some(alice),
        );
        page.mount().await;

        assert_eq!(page.state(), ListState::Loaded);
        assert_eq!(page.featured().len(), FEATURED_COUNT);
        assert_eq!(page.header().badge(), Some(4));
        carts.verify();
        catalog.verify();

        page.header_mut().toggle_menu();
        assert!(page.header().is_menu_open());
    }

    #[tokio::test]
    async fn failed_listing_is_an_error_state() {
        let mut catalog = MockStore::<Catalog>::new();
        catalog
            .expect_refresh(CatalogFilter::All)
            .return_err(FrameworkError::ActorClosed);
        let carts = MockStore::<Cart>::new();

        let mut page = HomePage::new(
            CatalogStoreClient::new(catalog.client()),
            CartStoreClient::new(carts.client()),
            None,
        );
        page.mount().await;

        assert_eq!(page.state(), ListState::Error);
        assert!(page.featured().is_empty());
        assert_eq!(page.header().badge(), None);
        catalog.verify();
        carts.verify();
    }
}

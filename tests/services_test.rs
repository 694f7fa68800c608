mod support;

use golflow_storefront::model::{
    CartItemRequest, Category, ProductDraft, ProductId, StagedImage, Username,
};
use golflow_storefront::services::{CartService, ProductService, UserService};
use golflow_storefront::transport::{ApiClient, ApiError};
use support::FakeBackend;

struct Services {
    users: UserService,
    products: ProductService,
    carts: CartService,
}

async fn services() -> (FakeBackend, Services) {
    let backend = FakeBackend::start().await;
    let api = ApiClient::new(&backend.config()).expect("Failed to build client");
    let services = Services {
        users: UserService::new(api.clone()),
        products: ProductService::new(api.clone()),
        carts: CartService::new(api),
    };
    (backend, services)
}

/// Create a product, then walk one user's cart through add, remove-one and remove.
#[tokio::test]
async fn test_jersey_cart_walkthrough() {
    let (_backend, s) = services().await;
    let alice = Username::from("alice");

    let draft = ProductDraft::new("Jersey", "", 20.0, Category::Shirts);
    let jersey = s.products.create_product(&draft).await.expect("Failed to create product");
    let listing = s.products.list_products().await.expect("Failed to list products");
    assert!(listing.iter().any(|p| p.id == jersey.id && draft.matches(p)));

    let cart = s
        .carts
        .add_item(&alice, &CartItemRequest::new(jersey.id, 20.0, 2))
        .await
        .expect("Failed to add item");
    assert_eq!(cart.total_items, 2);
    assert_eq!(cart.total_price, 40.0);

    s.carts.remove_one(&alice, jersey.id).await.expect("Failed to remove one");
    let cart = s.carts.get_cart(&alice).await.expect("Failed to get cart");
    assert_eq!(cart.line(jersey.id).map(|l| l.quantity), Some(1));
    assert_eq!(cart.total_price, 20.0);

    s.carts.remove_item(&alice, jersey.id).await.expect("Failed to remove item");
    let cart = s.carts.get_cart(&alice).await.expect("Failed to get cart");
    assert!(cart.is_empty());
    assert_eq!(cart.total_price, 0.0);
}

#[tokio::test]
async fn test_repeated_adds_merge_into_one_line() {
    let (backend, s) = services().await;
    let alice = Username::from("alice");
    let ball = ProductId(backend.add_product("Ball", 15.0, "mas"));
    let boots = ProductId(backend.add_product("Boots", 80.0, "calzado"));

    for quantity in [1, 2, 3] {
        s.carts
            .add_item(&alice, &CartItemRequest::new(ball, 15.0, quantity))
            .await
            .expect("Failed to add item");
    }
    let cart = s
        .carts
        .add_item(&alice, &CartItemRequest::new(boots, 80.0, 2))
        .await
        .expect("Failed to add item");

    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.line(ball).map(|l| l.quantity), Some(6));
    let expected: f64 = cart
        .items
        .iter()
        .map(|l| l.unit_price * f64::from(l.quantity))
        .sum();
    assert_eq!(cart.total_price, expected);

    s.carts.remove_one(&alice, boots).await.expect("Failed to remove one");
    let cart = s.carts.get_cart(&alice).await.expect("Failed to get cart");
    assert_eq!(cart.line(boots).map(|l| l.quantity), Some(1));
    assert_eq!(cart.line(ball).map(|l| l.quantity), Some(6));

    // At quantity 1, remove-one drops the line itself.
    s.carts.remove_one(&alice, boots).await.expect("Failed to remove one");
    let cart = s.carts.get_cart(&alice).await.expect("Failed to get cart");
    assert!(cart.line(boots).is_none());
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.total_items, 6);

    s.carts.clear(&alice).await.expect("Failed to clear");
    assert!(s.carts.get_cart(&alice).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_category_is_not_found_on_the_wire() {
    let (backend, s) = services().await;
    backend.add_product("Jersey", 20.0, "camisetas");

    let err = s
        .products
        .list_products_by_category(Category::Pants)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let shirts = s
        .products
        .list_products_by_category(Category::Shirts)
        .await
        .expect("Failed to list category");
    assert_eq!(shirts.len(), 1);
    assert_eq!(shirts[0].category, Category::Shirts);
}

#[tokio::test]
async fn test_login_and_duplicate_user() {
    let (_backend, s) = services().await;
    let bob = Username::from("bob");

    let err = s.users.login(&bob).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let created = s.users.create_user(&bob).await.expect("Failed to create user");
    assert_eq!(created.username, bob);
    assert_eq!(s.users.login(&bob).await.unwrap().username, bob);

    let err = s.users.create_user(&bob).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn test_update_replaces_every_field_and_delete_is_not_idempotent() {
    let (backend, s) = services().await;
    let id = ProductId(backend.add_product("Jersey", 20.0, "camisetas"));

    let draft = ProductDraft::new("Away Jersey", "Blue", 22.5, Category::Other);
    let updated = s.products.update_product(id, &draft).await.expect("Failed to update");
    assert!(draft.matches(&updated));
    assert_eq!(updated.id, id);

    s.products.delete_product(id).await.expect("Failed to delete");
    let err = s.products.delete_product(id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_image_upload_is_multipart_file_field() {
    let (backend, s) = services().await;
    let id = ProductId(backend.add_product("Cap", 9.0, "mas"));

    let image = StagedImage::new("cap.png", "image/png", vec![137, 80, 78, 71]);
    let product = s
        .products
        .upload_product_image(id, &image)
        .await
        .expect("Failed to upload");
    assert_eq!(product.id, id);

    let stored = backend.product(id.0).and_then(|p| p.image).expect("No image stored");
    assert_eq!(stored, ("cap.png".to_string(), image.bytes.clone()));

    let bytes = s.products.product_image(id).await.expect("Failed to fetch image");
    assert_eq!(bytes, image.bytes);
}

#[tokio::test]
async fn test_server_errors_pass_through() {
    let (backend, s) = services().await;
    backend.reject_uploads();
    let id = ProductId(backend.add_product("Cap", 9.0, "mas"));

    let err = s
        .products
        .upload_product_image(id, &StagedImage::new("cap.png", "image/png", vec![1]))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 413, .. }));
}

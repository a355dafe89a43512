pub mod message;
pub mod page;
pub mod user;
pub mod category;
pub mod product;
pub mod customer;
pub mod order;
pub use message::Message;
pub use page::{page_links, page_offset, PageQuery, PAGE_SIZE};
pub use user::*;
pub use category::*;
pub use product::*;
pub use customer::*;
pub use order::*;

use crate::models::{OrderStatus, Role};
use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            Message,
            Profile,
            LoginInfo,
            RegisterInfo,
            TokenResponse,
            Role,
            NewCategory,
            UpdateCategory,
            CategoryResponse,
            CategoryPage,
            NewProduct,
            UpdateProduct,
            ProductResponse,
            ProductPage,
            AvailabilityResponse,
            NewCustomer,
            UpdateCustomer,
            CustomerResponse,
            CustomerPage,
            OrderStatus,
            NewOrder,
            UpdateOrder,
            OrderResponse,
            OrderPage,
        ),
    ),
    modifiers(&SecurityAddon)
)]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;

pub struct SecurityAddon;
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components: &mut utoipa::openapi::Components = openapi.components.as_mut().unwrap(); // we can unwrap safely since there already is components registered.
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
    }
}

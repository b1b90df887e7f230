#[macro_use]
mod macros;

mod announcement_client;
mod cart_client;
mod product_client;
mod program_client;
mod query_client;
mod registration_client;
mod storefront_client;

pub use announcement_client::AnnouncementClient;
pub use cart_client::CartClient;
pub use product_client::ProductClient;
pub use program_client::ProgramClient;
pub use query_client::QueryClient;
pub use registration_client::RegistrationClient;
pub use storefront_client::StorefrontClient;

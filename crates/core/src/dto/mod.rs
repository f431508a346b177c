//! Data transfer objects exchanged with the REST API.
//!
//! Field names follow the server's JSON (camelCase for business and stamp
//! records, snake_case for the user profile). Unknown fields are ignored.

pub mod auth;
pub mod business;
pub mod product;
pub mod stamp;
pub mod user;

pub use auth::{AuthResponse, LoginRequest};
pub use business::{Business, BusinessItem};
pub use product::{CreateProduct, Product, UpdateProduct};
pub use stamp::{
    Activation, CreateActivation, CreateDestruction, CreateGeneration, CreateRetailOrder,
    CreateStampTemplate, Destruction, RetailOrder, StampGeneration, StampTemplate,
};
pub use user::CurrentUser;

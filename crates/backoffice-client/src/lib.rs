pub mod client;
pub mod error;
pub mod screen;
pub mod token;
pub mod types;

pub use client::AdminClient;
pub use error::{AuthFailure, ClientError};
pub use screen::VariantListScreen;
pub use token::{SessionToken, StaticToken, TokenProvider};
pub use types::{ActiveState, CreatedProduct, LoginResponse, ProductVariantsResponse, VariantPage};

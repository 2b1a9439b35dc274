//! Web demo that sends a person photo and a clothing photo to the Vertex AI
//! virtual try-on model and shows the generated images.
//!
//! | Method | Path | Description |
//! |---|---|---|
//! | GET | `/` | Browser page |
//! | POST | `/try-on`, `/api/try-on` | Run a try-on ([`models::TryOnRequest`] → [`models::TryOnResponse`]) |
//! | GET | `/api/images/person` | Sample person photos |
//! | GET | `/api/images/clothes` | Sample clothing photos by category |
//! | GET | `/*` | Static files under the public directory |

pub mod auth;
pub mod config;
pub mod error;
pub mod gallery;
pub mod models;
pub mod routes;
pub mod ui;
pub mod vertex;

pub use config::Config;
pub use error::{AuthError, TryOnError};
pub use models::{TryOnRequest, TryOnResponse};
pub use routes::{build_router, handle_try_on, AppState};
pub use vertex::{normalize_image, TryOnService, VertexTryOn};

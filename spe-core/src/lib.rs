//! Smart Pricing Engine core.
//!
//! Holds the wire types of the pricing API, the selection [`controller`]
//! that keeps the dashboard's source, product, day and recommendation
//! consistent, and the [`PricingApi`](api::PricingApi) seam it talks
//! through. Enable the `api` feature for the native `reqwest` client.

pub mod api;
#[cfg(feature = "api")]
pub mod client;
pub mod controller;
pub mod data_source;
pub mod error;
pub mod product;
pub mod recommendation;
pub mod region;
pub mod runtime;

pub use api::PricingApi;
pub use controller::{Controller, DayAdjust, Effect, Message, SourceState};
pub use data_source::{DataSource, DataStatus, UploadReceipt};
pub use error::{Error, Result};
pub use product::{ExpiryBand, Product};
pub use recommendation::Recommendation;
pub use region::{Region, StateStats};

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Blocking HTTP transport for the Payrail gateway client.
//!
//! Implements [`payrail::transport::Transport`] over `reqwest`'s blocking
//! client: XML bodies, basic auth from the merchant's API key pair, and the
//! gateway's fixed HTTP status contract.
//!
//! ```no_run
//! use payrail::Gateway;
//! use payrail::config::{Configuration, Environment};
//! use payrail_http::HttpTransport;
//!
//! # fn main() -> Result<(), payrail::GatewayError> {
//! let config = Configuration::new(Environment::Sandbox, "merchant_id", "public", "private");
//! let gateway = Gateway::new(HttpTransport::new(&config)?);
//! let subscription = gateway.subscriptions().find("my_subscription_id")?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod headers;

pub use client::HttpTransport;

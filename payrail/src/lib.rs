#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Payrail payment gateway client.
//!
//! This crate provides the marshalling pipeline and typed resources used to
//! talk to the gateway's XML API. The HTTP transport itself lives in the
//! companion `payrail-http` crate; this crate only defines the seam
//! ([`transport::Transport`]) it plugs into.
//!
//! # Overview
//!
//! A gateway call flows through five stages: the caller builds a parameter
//! map, [`signature`] checks it against the operation's allow-list, [`xml`]
//! renders it to the wire format, the transport performs the round trip and
//! hands the parsed response back as a [`value::Value`] tree, and [`result`]
//! classifies the response as a success entity or a validation failure.
//!
//! # Modules
//!
//! - [`config`] - Gateway environments and merchant credentials
//! - [`error`] - Error taxonomy shared across the crate
//! - [`resource`] - Typed resource entities (subscriptions, transactions)
//! - [`result`] - Success/failure envelope for mutating operations
//! - [`signature`] - Parameter key allow-lists checked before any I/O
//! - [`transport`] - The transport seam implemented by `payrail-http`
//! - [`value`] - The native value tree exchanged with the marshalling layer
//! - [`xml`] - The gateway's XML wire codec

pub mod config;
pub mod error;
pub mod gateway;
pub mod resource;
pub mod result;
pub mod signature;
pub mod transport;
pub mod value;
pub mod xml;

pub use error::GatewayError;
pub use gateway::Gateway;
pub use result::ApiResult;
pub use value::{Map, Value};

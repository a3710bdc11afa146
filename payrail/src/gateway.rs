//! The client entry point, handing out per-resource gateways.

use crate::resource::subscription::SubscriptionGateway;
use crate::transport::Transport;

/// A gateway client bound to one transport.
///
/// Owns the transport and lends it to per-resource gateways:
///
/// ```no_run
/// # fn demo(transport: impl payrail::transport::Transport) -> Result<(), payrail::GatewayError> {
/// let gateway = payrail::Gateway::new(transport);
/// let subscription = gateway.subscriptions().find("my_subscription_id")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Gateway<T> {
    transport: T,
}

impl<T: Transport> Gateway<T> {
    /// Creates a gateway over the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Subscription operations.
    #[must_use]
    pub fn subscriptions(&self) -> SubscriptionGateway<'_> {
        SubscriptionGateway::new(&self.transport)
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

//! Subscriptions and their gateway operations.

use rust_decimal::Decimal;

use crate::error::{GatewayError, TransportError};
use crate::resource::transaction::Transaction;
use crate::resource::{Resource, take_bool, take_decimal, take_int, take_string};
use crate::result::ApiResult;
use crate::signature::{Signature, verify_keys};
use crate::transport::Transport;
use crate::value::{Map, Value};

/// Lifecycle state of a subscription, as the gateway reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    /// Billing normally.
    Active,
    /// Canceled by the merchant or customer.
    Canceled,
    /// A scheduled charge failed.
    PastDue,
    /// A status this client version does not know.
    Other(String),
}

impl SubscriptionStatus {
    fn parse(wire: String) -> Self {
        match wire.as_str() {
            "Active" => Self::Active,
            "Canceled" => Self::Canceled,
            "Past Due" => Self::PastDue,
            _ => Self::Other(wire),
        }
    }
}

/// Unit for the trial duration of a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialDurationUnit {
    /// Trial measured in days.
    Day,
    /// Trial measured in months.
    Month,
    /// A unit this client version does not know.
    Other(String),
}

impl TrialDurationUnit {
    /// The wire form sent in request parameters.
    #[must_use]
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Other(s) => s,
        }
    }

    fn parse(wire: String) -> Self {
        match wire.as_str() {
            "day" => Self::Day,
            "month" => Self::Month,
            _ => Self::Other(wire),
        }
    }
}

/// A recurring billing agreement against a stored payment method.
#[derive(Debug, Clone, Default)]
pub struct Subscription {
    /// Gateway-assigned (or merchant-chosen) identifier.
    pub id: Option<String>,
    /// Merchant account the charges settle to.
    pub merchant_account_id: Option<String>,
    /// Token of the payment method being billed.
    pub payment_method_token: Option<String>,
    /// Plan the subscription was created from.
    pub plan_id: Option<String>,
    /// Recurring price. Transmitted as a decimal string, never a float.
    pub price: Option<Decimal>,
    /// Current lifecycle state.
    pub status: Option<SubscriptionStatus>,
    /// Length of the trial, in `trial_duration_unit`s.
    pub trial_duration: Option<i64>,
    /// Unit for `trial_duration`.
    pub trial_duration_unit: Option<TrialDurationUnit>,
    /// Whether the subscription starts with a trial.
    pub trial_period: Option<bool>,
    /// Whether the subscription bills until canceled.
    pub never_expires: Option<bool>,
    /// Transactions charged so far, newest first.
    pub transactions: Vec<Transaction>,
    /// Response fields the typed view does not model.
    pub extra: Map,
}

impl Subscription {
    /// Keys accepted by [`SubscriptionGateway::create`].
    #[must_use]
    pub fn create_signature() -> Signature {
        Signature::new()
            .key("id")
            .key("merchant_account_id")
            .key("payment_method_token")
            .key("plan_id")
            .key("price")
            .key("trial_duration")
            .key("trial_duration_unit")
            .key("trial_period")
    }

    /// Keys accepted by [`SubscriptionGateway::update`].
    #[must_use]
    pub fn update_signature() -> Signature {
        Signature::new()
            .key("id")
            .key("merchant_account_id")
            .key("plan_id")
            .key("price")
    }
}

impl Resource for Subscription {
    const KIND: &'static str = "subscription";

    fn from_map(mut map: Map) -> Result<Self, GatewayError> {
        let transactions = match map.remove("transactions") {
            None | Some(Value::Nil) => Vec::new(),
            Some(Value::List(items)) => items
                .into_iter()
                .map(|item| {
                    item.into_map()
                        .ok_or(GatewayError::Coercion {
                            field: "transactions",
                            reason: "transaction entries must be mappings".to_owned(),
                        })
                        .and_then(Transaction::from_map)
                })
                .collect::<Result<_, _>>()?,
            Some(_) => {
                return Err(GatewayError::Coercion {
                    field: "transactions",
                    reason: "expected a list".to_owned(),
                });
            }
        };

        Ok(Self {
            id: take_string(&mut map, "id")?,
            merchant_account_id: take_string(&mut map, "merchant_account_id")?,
            payment_method_token: take_string(&mut map, "payment_method_token")?,
            plan_id: take_string(&mut map, "plan_id")?,
            price: take_decimal(&mut map, "price")?,
            status: take_string(&mut map, "status")?.map(SubscriptionStatus::parse),
            trial_duration: take_int(&mut map, "trial_duration")?,
            trial_duration_unit: take_string(&mut map, "trial_duration_unit")?
                .map(TrialDurationUnit::parse),
            trial_period: take_bool(&mut map, "trial_period")?,
            never_expires: take_bool(&mut map, "never_expires")?,
            transactions,
            extra: map,
        })
    }
}

/// Subscription operations against one authenticated merchant.
pub struct SubscriptionGateway<'a> {
    transport: &'a dyn Transport,
}

impl std::fmt::Debug for SubscriptionGateway<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriptionGateway").finish_non_exhaustive()
    }
}

impl<'a> SubscriptionGateway<'a> {
    /// Creates a subscription gateway over the given transport.
    #[must_use]
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Creates a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidKeys`] before any I/O if `params`
    /// contains keys outside [`Subscription::create_signature`], or a
    /// transport error. Validation rejections come back as
    /// [`ApiResult::Failure`], not as errors.
    pub fn create(&self, params: Map) -> Result<ApiResult<Subscription>, GatewayError> {
        verify_keys(&params, &Subscription::create_signature())?;
        let response = self.transport.post("/subscriptions", &wrap(params))?;
        ApiResult::from_response(response)
    }

    /// Fetches a subscription by id.
    ///
    /// # Errors
    ///
    /// Unlike the mutating operations this returns the entity directly:
    /// an unknown id is [`GatewayError::NotFound`] naming the id.
    pub fn find(&self, id: &str) -> Result<Subscription, GatewayError> {
        let mut response = match self.transport.get(&format!("/subscriptions/{id}")) {
            Ok(response) => response,
            Err(TransportError::NotFound { .. }) => {
                return Err(GatewayError::NotFound(format!(
                    "subscription with id {id} not found"
                )));
            }
            Err(other) => return Err(other.into()),
        };

        let payload = response
            .remove(Subscription::KIND)
            .and_then(Value::into_map)
            .ok_or(GatewayError::UnexpectedResponse {
                expected: Subscription::KIND,
                found: response.keys().cloned().collect::<Vec<_>>().join(", "),
            })?;
        Subscription::from_map(payload)
    }

    /// Updates a subscription.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidKeys`] before any I/O if `params`
    /// contains keys outside [`Subscription::update_signature`], or a
    /// transport error.
    pub fn update(&self, id: &str, params: Map) -> Result<ApiResult<Subscription>, GatewayError> {
        verify_keys(&params, &Subscription::update_signature())?;
        let response = self
            .transport
            .put(&format!("/subscriptions/{id}"), Some(&wrap(params)))?;
        ApiResult::from_response(response)
    }

    /// Cancels a subscription. No body, no signature check.
    ///
    /// # Errors
    ///
    /// Returns a transport error if the call fails. A cancellation the
    /// gateway refuses (e.g. already canceled) is an [`ApiResult::Failure`].
    pub fn cancel(&self, id: &str) -> Result<ApiResult<Subscription>, GatewayError> {
        let response = self
            .transport
            .put(&format!("/subscriptions/{id}/cancel"), None)?;
        ApiResult::from_response(response)
    }
}

/// Wraps request parameters under the resource's envelope key.
fn wrap(params: Map) -> Map {
    let mut body = Map::new();
    body.insert(Subscription::KIND.to_owned(), Value::Map(params));
    body
}

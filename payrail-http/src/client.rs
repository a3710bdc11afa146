//! The blocking HTTP implementation of the transport seam.

use payrail::config::Configuration;
use payrail::error::TransportError;
use payrail::transport::Transport;
use payrail::value::{Map, Value};
use payrail::xml::{XmlError, from_xml, to_xml};
use reqwest::blocking::{Client, RequestBuilder};
use url::Url;

use crate::headers::{API_VERSION, CONTENT_TYPE, USER_AGENT, basic_auth};

/// A blocking HTTP transport bound to one merchant account.
///
/// Paths handed to the [`Transport`] methods are relative to the merchant,
/// e.g. `/subscriptions/{id}`; the transport prefixes the environment's base
/// URL and the merchant path.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: Url,
    merchant_path: String,
    authorization: String,
}

impl HttpTransport {
    /// Builds a transport for the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the environment's base URL does
    /// not parse or the HTTP client cannot be constructed.
    pub fn new(config: &Configuration) -> Result<Self, TransportError> {
        let base = Url::parse(config.environment.base_url())
            .map_err(|e| TransportError::Http(format!("invalid base URL: {e}")))?;
        let client = Client::builder()
            .build()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base,
            merchant_path: config.base_merchant_path(),
            authorization: basic_auth(&config.public_key, &config.private_key),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}{path}", self.base.as_str().trim_end_matches('/'), self.merchant_path)
    }

    fn prepare(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", &self.authorization)
            .header("Accept", CONTENT_TYPE)
            .header("Content-Type", CONTENT_TYPE)
            .header("X-ApiVersion", API_VERSION)
            .header("User-Agent", USER_AGENT)
    }

    /// Sends one request and maps the status per the API contract:
    /// 200/201/422 carry a parseable body, everything else is a failure.
    fn round_trip(
        &self,
        method: reqwest::Method,
        path: &str,
        body: Option<&Map>,
    ) -> Result<Map, TransportError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "gateway request");

        let mut builder = self.prepare(self.client.request(method, &url));
        if let Some(body) = body {
            builder = builder.body(to_xml(&Value::Map(body.clone()))?);
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        match status {
            200 | 201 | 422 => {
                let bytes = response
                    .bytes()
                    .map_err(|e| TransportError::Http(e.to_string()))?;
                match from_xml(&bytes)? {
                    Value::Map(map) => Ok(map),
                    _ => Err(TransportError::Xml(XmlError::Malformed(
                        "response root is not a mapping".to_owned(),
                    ))),
                }
            }
            401 => Err(TransportError::Authentication),
            403 => Err(TransportError::Authorization),
            404 => Err(TransportError::NotFound {
                path: path.to_owned(),
            }),
            426 => Err(TransportError::UpgradeRequired),
            500 => Err(TransportError::Server),
            503 => Err(TransportError::Maintenance),
            other => {
                tracing::warn!(status = other, %url, "unexpected gateway status");
                Err(TransportError::UnexpectedStatus { status: other })
            }
        }
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: &str) -> Result<Map, TransportError> {
        self.round_trip(reqwest::Method::GET, path, None)
    }

    fn post(&self, path: &str, body: &Map) -> Result<Map, TransportError> {
        self.round_trip(reqwest::Method::POST, path, Some(body))
    }

    fn put(&self, path: &str, body: Option<&Map>) -> Result<Map, TransportError> {
        self.round_trip(reqwest::Method::PUT, path, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrail::Gateway;
    use payrail::GatewayError;
    use payrail::config::Environment;
    use payrail::resource::subscription::SubscriptionStatus;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SUBSCRIPTION_XML: &str = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
        "<subscription>",
        "<id>s1</id>",
        "<plan-id>gold</plan-id>",
        "<price type=\"bigdecimal\">29.95</price>",
        "<status>Active</status>",
        "</subscription>",
    );

    const API_ERROR_XML: &str = concat!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
        "<api-error-response>",
        "<message>Price is invalid.</message>",
        "<errors>",
        "<subscription>",
        "<errors type=\"array\">",
        "<error>",
        "<attribute>price</attribute>",
        "<code>81904</code>",
        "<message>Price is invalid.</message>",
        "</error>",
        "</errors>",
        "</subscription>",
        "</errors>",
        "</api-error-response>",
    );

    // Blocking requests must stay off the async runtime: the runtime only
    // hosts the mock server, the client runs on the test thread.
    fn server(rt: &Runtime, mock: Mock) -> MockServer {
        let server = rt.block_on(MockServer::start());
        rt.block_on(mock.mount(&server));
        server
    }

    fn transport_for(server: &MockServer) -> HttpTransport {
        let config = Configuration::new(
            Environment::Custom {
                base_url: server.uri(),
            },
            "m1",
            "pub_key",
            "priv_key",
        );
        HttpTransport::new(&config).unwrap()
    }

    #[test]
    fn test_create_round_trip() {
        let rt = Runtime::new().unwrap();
        let server = server(
            &rt,
            Mock::given(method("POST"))
                .and(path("/merchants/m1/subscriptions"))
                .and(header("Authorization", basic_auth("pub_key", "priv_key")))
                .and(header("Content-Type", "application/xml"))
                .and(header("X-ApiVersion", "3"))
                .and(body_string_contains("<plan-id>gold</plan-id>"))
                .respond_with(
                    ResponseTemplate::new(201).set_body_raw(SUBSCRIPTION_XML, "application/xml"),
                ),
        );

        let transport = transport_for(&server);
        let gateway = Gateway::new(transport);

        let mut params = Map::new();
        params.insert("plan_id".to_owned(), Value::from("gold"));
        params.insert("price".to_owned(), Value::from("29.95"));

        let result = gateway.subscriptions().create(params).unwrap();
        let entity = result.entity().unwrap();
        assert_eq!(entity.id.as_deref(), Some("s1"));
        assert_eq!(entity.plan_id.as_deref(), Some("gold"));
        assert_eq!(entity.price, Some(Decimal::from_str("29.95").unwrap()));
    }

    #[test]
    fn test_create_validation_failure_is_a_result_not_an_error() {
        let rt = Runtime::new().unwrap();
        let server = server(
            &rt,
            Mock::given(method("POST"))
                .and(path("/merchants/m1/subscriptions"))
                .respond_with(
                    ResponseTemplate::new(422).set_body_raw(API_ERROR_XML, "application/xml"),
                ),
        );

        let gateway = Gateway::new(transport_for(&server));
        let result = gateway.subscriptions().create(Map::new()).unwrap();

        let errors = result.errors().unwrap();
        assert_eq!(errors.message(), Some("Price is invalid."));
        let on_price = errors.for_object("subscription").unwrap().on("price");
        assert_eq!(on_price[0].code, "81904");
    }

    #[test]
    fn test_find_round_trip() {
        let rt = Runtime::new().unwrap();
        let server = server(
            &rt,
            Mock::given(method("GET"))
                .and(path("/merchants/m1/subscriptions/s1"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_raw(SUBSCRIPTION_XML, "application/xml"),
                ),
        );

        let gateway = Gateway::new(transport_for(&server));
        let sub = gateway.subscriptions().find("s1").unwrap();
        assert_eq!(sub.status, Some(SubscriptionStatus::Active));
    }

    #[test]
    fn test_find_missing_id_raises_not_found() {
        let rt = Runtime::new().unwrap();
        let server = server(
            &rt,
            Mock::given(method("GET"))
                .and(path("/merchants/m1/subscriptions/nope"))
                .respond_with(ResponseTemplate::new(404)),
        );

        let gateway = Gateway::new(transport_for(&server));
        let err = gateway.subscriptions().find("nope").unwrap_err();
        match err {
            GatewayError::NotFound(message) => {
                assert_eq!(message, "subscription with id nope not found");
            }
            other => panic!("wrong error: {other}"),
        }
    }

    #[test]
    fn test_update_round_trip() {
        let rt = Runtime::new().unwrap();
        let updated = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            "<subscription>",
            "<id>s1</id>",
            "<price type=\"bigdecimal\">9.99</price>",
            "<status>Active</status>",
            "</subscription>",
        );
        let server = server(
            &rt,
            Mock::given(method("PUT"))
                .and(path("/merchants/m1/subscriptions/s1"))
                .and(header("Authorization", basic_auth("pub_key", "priv_key")))
                .and(body_string_contains(
                    "<price type=\"bigdecimal\">9.99</price>",
                ))
                .respond_with(ResponseTemplate::new(200).set_body_raw(updated, "application/xml")),
        );

        let gateway = Gateway::new(transport_for(&server));
        let mut params = Map::new();
        params.insert(
            "price".to_owned(),
            Value::Decimal(Decimal::from_str("9.99").unwrap()),
        );

        let result = gateway.subscriptions().update("s1", params).unwrap();
        let entity = result.entity().unwrap();
        assert_eq!(entity.id.as_deref(), Some("s1"));
        assert_eq!(entity.price, Some(Decimal::from_str("9.99").unwrap()));
    }

    #[test]
    fn test_cancel_puts_without_body() {
        let rt = Runtime::new().unwrap();
        let server = server(
            &rt,
            Mock::given(method("PUT"))
                .and(path("/merchants/m1/subscriptions/s1/cancel"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_raw(SUBSCRIPTION_XML, "application/xml"),
                ),
        );

        let gateway = Gateway::new(transport_for(&server));
        assert!(gateway.subscriptions().cancel("s1").unwrap().is_success());
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (401, "authentication"),
            (403, "authorization"),
            (426, "upgraded"),
            (500, "internal error"),
            (503, "maintenance"),
        ];
        for (status, needle) in cases {
            let rt = Runtime::new().unwrap();
            let server = server(
                &rt,
                Mock::given(method("GET"))
                    .and(path("/merchants/m1/subscriptions/s1"))
                    .respond_with(ResponseTemplate::new(status)),
            );

            let transport = transport_for(&server);
            let err = transport.get("/subscriptions/s1").unwrap_err();
            assert!(
                err.to_string().contains(needle),
                "status {status}: {err} should mention {needle}"
            );
        }
    }

    #[test]
    fn test_unexpected_status_is_reported_verbatim() {
        let rt = Runtime::new().unwrap();
        let server = server(
            &rt,
            Mock::given(method("GET"))
                .and(path("/merchants/m1/subscriptions/s1"))
                .respond_with(ResponseTemplate::new(418)),
        );

        let transport = transport_for(&server);
        let err = transport.get("/subscriptions/s1").unwrap_err();
        assert!(matches!(err, TransportError::UnexpectedStatus { status: 418 }));
    }
}

//! Submission gate for custom profile field updates.

use crate::{
    Error, Map, SharedString,
    field::CustomProfileField,
    indicator::{IndicatorGuard, LoadingIndicator},
    transport::{PROFILE_DATA_ENDPOINT, Transport},
};
use futures::future;
use profile_fields_core::{
    extension::{JsonObjectExt, TomlTableExt},
    json,
    validation::{DateValidator, Validator},
};
use toml::Table;

/// Default prefix of a field's status element.
const STATUS_ELEMENT_PREFIX: &str = "#custom-field-status-";

/// A request to update one profile field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDataRequest {
    /// ID of the field.
    field_id: i64,
    /// Target URL.
    url: SharedString,
    /// JSON array with exactly one `{id, value}` object.
    data: String,
}

impl ProfileDataRequest {
    /// Creates a batch-of-one request for the field.
    pub fn new(url: impl Into<SharedString>, field: &CustomProfileField) -> Self {
        let data = json!([{ "id": field.id(), "value": field.value() }]).to_string();
        Self {
            field_id: field.id(),
            url: url.into(),
            data,
        }
    }

    /// Returns the field ID.
    #[inline]
    pub fn field_id(&self) -> i64 {
        self.field_id
    }

    /// Returns the target URL.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the serialized `data` entry.
    #[inline]
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Returns the request body.
    pub fn body(&self) -> Map {
        let mut body = Map::new();
        body.upsert("data", self.data.as_str());
        body
    }
}

/// Whether a field update is forwarded to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The request is sent.
    Send(ProfileDataRequest),
    /// No request is issued.
    Suppress,
}

impl Decision {
    /// Returns `true` if the decision is to send.
    #[inline]
    pub fn is_send(&self) -> bool {
        matches!(self, Self::Send(_))
    }
}

/// Decides per field whether an edit reaches the backend, and sends it.
///
/// Date fields must hold a `YYYY-MM-DD` value; other fields always pass.
#[derive(Debug, Clone)]
pub struct FieldUpdateGatekeeper<T, L> {
    /// Transport collaborator.
    transport: T,
    /// Loading indicator collaborator.
    indicator: L,
    /// Profile data endpoint.
    endpoint: SharedString,
    /// Prefix of the status element of a field.
    status_prefix: SharedString,
}

impl<T: Transport, L: LoadingIndicator> FieldUpdateGatekeeper<T, L> {
    /// Creates a new instance targeting the default endpoint.
    #[inline]
    pub fn new(transport: T, indicator: L) -> Self {
        Self {
            transport,
            indicator,
            endpoint: PROFILE_DATA_ENDPOINT.into(),
            status_prefix: STATUS_ELEMENT_PREFIX.into(),
        }
    }

    /// Creates a new instance with the `[profile-fields]` table of the config.
    pub fn with_config(config: &Table, transport: T, indicator: L) -> Self {
        let mut gatekeeper = Self::new(transport, indicator);
        if let Some(config) = config.get_table("profile-fields") {
            if let Some(endpoint) = config.get_str("endpoint") {
                gatekeeper.endpoint = endpoint.to_owned().into();
            }
            if let Some(prefix) = config.get_str("status-element-prefix") {
                gatekeeper.status_prefix = prefix.to_owned().into();
            }
        }
        gatekeeper
    }

    /// Returns the profile data endpoint.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the status element of the field.
    #[inline]
    pub fn status_element(&self, field_id: i64) -> String {
        format!("{}{field_id}", self.status_prefix)
    }

    /// Decides whether the field is sent, without sending it.
    pub fn decide(&self, field: &CustomProfileField) -> Decision {
        if field.kind().is_date() {
            if let Err(err) = DateValidator.validate(field.value()) {
                tracing::debug!(field_id = field.id(), "suppress the update: {err}");
                return Decision::Suppress;
            }
        }
        Decision::Send(ProfileDataRequest::new(self.endpoint.clone(), field))
    }

    /// Submits the field if it passes the gate.
    ///
    /// The loading indicator is shown only while a request is in flight.
    /// Transport errors are returned after the indicator has been released.
    pub async fn submit_field(&self, field: &CustomProfileField) -> Result<Decision, Error> {
        let decision = self.decide(field);
        if let Decision::Send(request) = &decision {
            let field_id = request.field_id();
            let _guard = IndicatorGuard::acquire(&self.indicator, self.status_element(field_id));
            self.transport
                .post(request.url(), &request.body())
                .await
                .map_err(|err| {
                    tracing::error!(field_id, "fail to update the profile field: {err}");
                    err.wrap(format!("fail to update the profile field `{field_id}`"))
                })?;
            tracing::info!(field_id, "profile field updated");
        }
        Ok(decision)
    }

    /// Submits each field independently.
    pub async fn submit_fields(
        &self,
        fields: &[CustomProfileField],
    ) -> Vec<Result<Decision, Error>> {
        future::join_all(fields.iter().map(|field| self.submit_field(field))).await
    }

    /// Removes the value of the field.
    pub async fn remove_field(&self, field_id: i64) -> Result<(), Error> {
        let mut body = Map::new();
        body.upsert("data", json!([field_id]).to_string());

        let _guard = IndicatorGuard::acquire(&self.indicator, self.status_element(field_id));
        self.transport
            .delete(&self.endpoint, &body)
            .await
            .map_err(|err| {
                tracing::error!(field_id, "fail to remove the profile field: {err}");
                err.wrap(format!("fail to remove the profile field `{field_id}`"))
            })?;
        tracing::info!(field_id, "profile field removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Decision, FieldUpdateGatekeeper};
    use crate::{
        field::{CustomProfileField, FieldKind},
        indicator::tests::RecordingIndicator,
        transport::tests::RecordingTransport,
    };
    use profile_fields_core::{JsonValue, extension::JsonObjectExt, json};
    use toml::Table;

    fn sent_data(transport: &RecordingTransport) -> JsonValue {
        let request = transport.last_request().unwrap();
        serde_json::from_str(request.body.get_str("data").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn it_sends_valid_date_as_batch_of_one() {
        let transport = RecordingTransport::default();
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::new(&transport, &indicator);
        let field = CustomProfileField::new(5, FieldKind::Date, "2024-03-25");

        let decision = gatekeeper.submit_field(&field).await.unwrap();
        assert!(decision.is_send());
        assert_eq!(transport.requests.borrow().len(), 1);

        let request = transport.last_request().unwrap();
        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "/json/users/me/profile_data");
        assert_eq!(request.body.len(), 1);
        assert_eq!(sent_data(&transport), json!([{ "id": 5, "value": "2024-03-25" }]));
        assert_eq!(
            *indicator.calls.borrow(),
            ["make:#custom-field-status-5", "destroy:#custom-field-status-5"]
        );
    }

    #[tokio::test]
    async fn it_suppresses_unparseable_dates() {
        let transport = RecordingTransport::default();
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::new(&transport, &indicator);

        for value in ["March 25, 2024", "", "2024-3-25", "2024-02-30", "bananas"] {
            let field = CustomProfileField::new(5, FieldKind::Date, value);
            let decision = gatekeeper.submit_field(&field).await.unwrap();
            assert_eq!(decision, Decision::Suppress);
        }
        assert!(transport.requests.borrow().is_empty());
        assert!(indicator.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn it_always_sends_other_fields() {
        let transport = RecordingTransport::default();
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::new(&transport, &indicator);

        for value in ["Some value", "March 25, 2024", ""] {
            let field = CustomProfileField::new(6, FieldKind::ShortText, value);
            assert!(gatekeeper.submit_field(&field).await.unwrap().is_send());
            assert_eq!(sent_data(&transport), json!([{ "id": 6, "value": value }]));
        }
        assert_eq!(transport.requests.borrow().len(), 3);
    }

    #[tokio::test]
    async fn it_releases_indicator_on_transport_error() {
        let transport = RecordingTransport::failing("connection reset");
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::new(&transport, &indicator);
        let field = CustomProfileField::new(5, FieldKind::Date, "2024-03-25");

        let err = gatekeeper.submit_field(&field).await.unwrap_err();
        assert_eq!(err.message(), "fail to update the profile field `5`");
        assert_eq!(err.root_source().map(|err| err.message()), Some("connection reset"));
        assert_eq!(
            *indicator.calls.borrow(),
            ["make:#custom-field-status-5", "destroy:#custom-field-status-5"]
        );
    }

    #[tokio::test]
    async fn it_submits_fields_independently() {
        let transport = RecordingTransport::default();
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::new(&transport, &indicator);
        let fields = [
            CustomProfileField::new(5, FieldKind::Date, "2024-03-25"),
            CustomProfileField::new(5, FieldKind::Date, "March 25, 2024"),
            CustomProfileField::new(6, FieldKind::ShortText, "Some value"),
        ];

        let decisions = gatekeeper.submit_fields(&fields).await;
        let sent = decisions
            .iter()
            .map(|decision| decision.as_ref().map(Decision::is_send).unwrap_or(false))
            .collect::<Vec<_>>();
        assert_eq!(sent, [true, false, true]);
        assert_eq!(transport.requests.borrow().len(), 2);
    }

    #[tokio::test]
    async fn it_removes_field_values() {
        let transport = RecordingTransport::default();
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::new(&transport, &indicator);

        gatekeeper.remove_field(5).await.unwrap();
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, "DELETE");
        assert_eq!(sent_data(&transport), json!([5]));
        assert_eq!(indicator.calls.borrow().len(), 2);
    }

    #[test]
    fn it_reads_gatekeeper_config() {
        let config: Table = r##"
            [profile-fields]
            endpoint = "/api/v1/users/me/profile_data"
            status-element-prefix = "#field-status-"
        "##
        .parse()
        .unwrap();
        let transport = RecordingTransport::default();
        let indicator = RecordingIndicator::default();
        let gatekeeper = FieldUpdateGatekeeper::with_config(&config, &transport, &indicator);
        assert_eq!(gatekeeper.endpoint(), "/api/v1/users/me/profile_data");
        assert_eq!(gatekeeper.status_element(7), "#field-status-7");

        let field = CustomProfileField::new(7, FieldKind::Url, "https://example.com");
        match gatekeeper.decide(&field) {
            Decision::Send(request) => {
                assert_eq!(request.url(), "/api/v1/users/me/profile_data");
                assert_eq!(request.data(), r#"[{"id":7,"value":"https://example.com"}]"#);
            }
            Decision::Suppress => panic!("a URL field should be sent"),
        }
    }
}

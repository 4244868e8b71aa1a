use async_trait::async_trait;
use convert_case::{Case, Casing};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::{DataApi, DataError};
use crate::config::DataApiConfig;
use crate::identity::AuthSession;
use crate::models::{ModelDefinition, Record, RecordKey};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Client for the hosted data API.
///
/// Routes: `GET /{Entity}` lists every record of a type; single records live at
/// `/{PartitionType}/{PartitionId}/{Entity}[/{SortId}]`, the sort id being
/// omitted for records keyed by their partition.
pub struct HttpDataApi {
    client: Client,
    base_url: String,
}

impl HttpDataApi {
    pub fn new(config: &DataApiConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn collection_url(&self, definition: &ModelDefinition) -> String {
        format!("{}/{}", self.base_url, definition.keys.entity_type)
    }

    pub fn record_url(&self, definition: &ModelDefinition, key: &RecordKey) -> String {
        let keys = &definition.keys;
        let mut url = format!(
            "{}/{}/{}/{}",
            self.base_url, keys.partition_type, key.partition_id, keys.entity_type
        );
        if !keys.keyed_by_partition() {
            url.push('/');
            url.push_str(&key.sort_id);
        }
        url
    }

    fn request(&self, method: Method, url: String, session: &AuthSession) -> RequestBuilder {
        tracing::debug!("Data API {} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(&session.tokens.id_token)
    }

    async fn check(response: Response, what: &str) -> Result<Response, DataError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => status.to_string(),
        };

        Err(match status {
            StatusCode::NOT_FOUND => DataError::NotFound(what.to_string()),
            StatusCode::CONFLICT => DataError::Conflict(message),
            _ => DataError::Api { status: status.as_u16(), message },
        })
    }
}

/// The data service mixes `PascalCase` and `camelCase` field names
pub fn normalize_record(value: Value) -> Result<Record, DataError> {
    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(name, value)| (name.to_case(Case::Camel), value))
            .collect()),
        other => Err(DataError::Decode(format!("expected object, got {}", other))),
    }
}

#[async_trait]
impl DataApi for HttpDataApi {
    async fn list(&self, session: &AuthSession, definition: &ModelDefinition) -> Result<Vec<Record>, DataError> {
        let response = self
            .request(Method::GET, self.collection_url(definition), session)
            .send()
            .await?;
        let response = Self::check(response, definition.key).await?;

        match response.json::<Value>().await? {
            Value::Array(items) => items.into_iter().map(normalize_record).collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(DataError::Decode(format!("expected array, got {}", other))),
        }
    }

    async fn get(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
    ) -> Result<Record, DataError> {
        let response = self
            .request(Method::GET, self.record_url(definition, key), session)
            .send()
            .await?;
        let response = Self::check(response, &key.sort_id).await?;
        normalize_record(response.json().await?)
    }

    async fn put(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
        record: Record,
    ) -> Result<(), DataError> {
        let response = self
            .request(Method::PUT, self.record_url(definition, key), session)
            .json(&record)
            .send()
            .await?;
        Self::check(response, &key.sort_id).await?;
        Ok(())
    }

    async fn delete(
        &self,
        session: &AuthSession,
        definition: &ModelDefinition,
        key: &RecordKey,
    ) -> Result<(), DataError> {
        let response = self
            .request(Method::DELETE, self.record_url(definition, key), session)
            .send()
            .await?;
        Self::check(response, &key.sort_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataApiMode;
    use crate::models::{log, person_metadata};
    use serde_json::json;

    fn api() -> HttpDataApi {
        HttpDataApi::new(&DataApiConfig {
            mode: DataApiMode::Http,
            base_url: "https://api.example.com/".into(),
            request_timeout_secs: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_urls() {
        let api = api();
        let key = RecordKey::new("p-1", "p-1");
        assert_eq!(api.collection_url(&person_metadata::definition()), "https://api.example.com/PersonMetadata");
        assert_eq!(
            api.record_url(&person_metadata::definition(), &key),
            "https://api.example.com/Person/p-1/PersonMetadata"
        );

        let key = RecordKey::new("job-1", "log-1");
        assert_eq!(api.record_url(&log::definition(), &key), "https://api.example.com/Job/job-1/Log/log-1");
    }

    #[test]
    fn test_normalize_record() {
        let record = normalize_record(json!({
            "GivenName": "Ada",
            "PersonId": "p-1",
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(record["givenName"], json!("Ada"));
        assert_eq!(record["personId"], json!("p-1"));
        assert_eq!(record["createdAt"], json!("2024-01-01T00:00:00Z"));
        assert!(normalize_record(json!("nope")).is_err());
    }
}

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// A relay answer: status plus decoded body.
///
/// `body` is `Value::Null` for empty responses (e.g. the bare 404).
#[derive(Debug, Clone)]
pub struct RelayReply {
    pub status: u16,
    pub body: Value,
}

impl RelayReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `error` message of a failed lookup.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Colorado search: exactly one of the two fields should be set.
#[derive(Debug, Clone, Default)]
pub struct ColoradoSearch {
    pub name: Option<String>,
    pub license_number: Option<String>,
}

/// California search body as accepted on `/cali-api`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaliforniaSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_numbers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    pub fn new(relay_url: &str) -> Self {
        Self {
            client: Client::new(),
            relay_url: relay_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn illinois(&self, q: &str) -> Result<RelayReply, reqwest::Error> {
        let resp = self
            .client
            .get(format!("{}/ill-api", self.relay_url))
            .query(&[("q", q)])
            .send()
            .await?;
        into_reply(resp).await
    }

    pub async fn colorado(&self, search: &ColoradoSearch) -> Result<RelayReply, reqwest::Error> {
        let mut params = Vec::new();
        if let Some(name) = &search.name {
            params.push(("name", name.as_str()));
        }
        if let Some(number) = &search.license_number {
            params.push(("licensenumber", number.as_str()));
        }
        let resp = self
            .client
            .get(format!("{}/colorado-api", self.relay_url))
            .query(&params)
            .send()
            .await?;
        into_reply(resp).await
    }

    pub async fn california(&self, search: &CaliforniaSearch) -> Result<RelayReply, reqwest::Error> {
        let resp = self
            .client
            .post(format!("{}/cali-api", self.relay_url))
            .json(search)
            .send()
            .await?;
        into_reply(resp).await
    }

    /// Issue an arbitrary request against the relay.
    pub async fn raw(&self, method: reqwest::Method, path: &str) -> Result<RelayReply, reqwest::Error> {
        let resp = self
            .client
            .request(method, format!("{}{}", self.relay_url, path))
            .send()
            .await?;
        into_reply(resp).await
    }
}

async fn into_reply(resp: reqwest::Response) -> Result<RelayReply, reqwest::Error> {
    let status = resp.status().as_u16();
    let text = resp.text().await?;
    let body = if text.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };
    Ok(RelayReply { status, body })
}

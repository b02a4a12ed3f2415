use super::{Query, StoreTrait};
use crate::{
    config::Config,
    error::{self, Result},
};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};

const PREFER: &str = "prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Store reached over a PostgREST compatible HTTP interface.
#[derive(Clone, Debug)]
pub struct RestStore {
    client: Client,
    config: Config,
}

impl RestStore {
    pub fn new(config: &Config) -> Result<Self> {
        info!("Creating store client for {}", config.store_url);

        let mut headers = HeaderMap::new();

        let mut apikey = HeaderValue::from_str(&config.service_key)
            .map_err(|_| error::INVALID_SERVICE_KEY)?;
        apikey.set_sensitive(true);

        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|_| error::INVALID_SERVICE_KEY)?;
        bearer.set_sensitive(true);

        headers.insert("apikey", apikey);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(PREFER, HeaderValue::from_static(RETURN_REPRESENTATION));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn send<R>(&self, table: &str, request: RequestBuilder) -> Result<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let res = request.send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        if !status.is_success() {
            error!(
                table,
                %status,
                body = %String::from_utf8_lossy(&body),
                "store rejected request"
            );
            return Err(error::STORE_RESPONSE.with_status(status));
        }

        if body.is_empty() {
            return Ok(Vec::new());
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl StoreTrait for RestStore {
    async fn select<T>(&self, table: &str, query: &Query) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        debug!(table, ?query, "select");

        let request = self
            .client
            .get(self.config.endpoint(table))
            .query(&query.to_pairs());

        self.send(table, request).await
    }

    async fn insert<T, R>(&self, table: &str, rows: &[T]) -> Result<Vec<R>>
    where
        T: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        debug!(table, rows = rows.len(), "insert");

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let request = self.client.post(self.config.endpoint(table)).json(rows);

        self.send(table, request).await
    }

    async fn patch<P, R>(&self, table: &str, query: &Query, patch: &P) -> Result<Vec<R>>
    where
        P: Serialize + Sync,
        R: DeserializeOwned + Send,
    {
        debug!(table, ?query, "patch");

        let request = self
            .client
            .patch(self.config.endpoint(table))
            .query(&query.to_pairs())
            .json(patch);

        self.send(table, request).await
    }
}

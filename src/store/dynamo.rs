//! DynamoDB-backed [`OrderStore`].

use crate::store::{AttributeValue, Item, OrderStore, StoreError};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue as DynamoValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use tracing::debug;

/// Issues one `PutItem` per write. Retries and timeouts are whatever the SDK
/// client was configured with.
#[derive(Clone)]
pub struct DynamoStore {
    client: Client,
}

impl DynamoStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from the ambient AWS configuration (environment,
    /// profile, or instance role).
    pub async fn from_env() -> Self {
        let config = aws_config::load_from_env().await;
        Self::new(Client::new(&config))
    }
}

fn to_dynamo(item: Item) -> HashMap<String, DynamoValue> {
    item.into_attributes()
        .into_iter()
        .map(|(name, value)| {
            let value = match value {
                AttributeValue::S(s) => DynamoValue::S(s),
                AttributeValue::N(n) => DynamoValue::N(n),
            };
            (name, value)
        })
        .collect()
}

#[async_trait]
impl OrderStore for DynamoStore {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        debug!(%table, attributes = item.len(), "PutItem");
        self.client
            .put_item()
            .table_name(table)
            .set_item(Some(to_dynamo(item)))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(e).to_string().into()))?;
        Ok(())
    }
}

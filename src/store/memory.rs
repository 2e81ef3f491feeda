//! # In-Process Table Store
//!
//! A key-value store that lives in its own Tokio task. It follows the actor
//! pattern: [`TableActor`] owns every table and processes requests one at a
//! time, and [`TableClient`] is the cheap, cloneable handle that sends them.
//!
//! Because the actor is the only owner of its tables, no `Mutex` is needed and
//! writes are applied in the order they arrive.
//!
//! ```rust
//! use order_ingest::store::{AttributeValue, Item, OrderStore, TableActor};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TableActor::new(8, "orderId");
//!     let handle = tokio::spawn(actor.run());
//!
//!     let item = Item::new().with("orderId", AttributeValue::S("o1".into()));
//!     client.put_item("Orders", item).await.unwrap();
//!     assert_eq!(client.len("Orders").await.unwrap(), 1);
//!
//!     drop(client);
//!     handle.await.unwrap();
//! }
//! ```

use crate::store::{Item, OrderStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// Type alias for the one-shot response channel used by the table actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by [`TableActor`].
#[derive(Debug)]
pub enum TableRequest {
    Put {
        table: String,
        item: Item,
        respond_to: Response<()>,
    },
    Get {
        table: String,
        key: String,
        respond_to: Response<Option<Item>>,
    },
    Len {
        table: String,
        respond_to: Response<usize>,
    },
}

/// The server half of the in-process store.
///
/// Tables are created lazily on first write. Every item is keyed by the string
/// value of `key_attribute`; a put without it is rejected.
pub struct TableActor {
    receiver: mpsc::Receiver<TableRequest>,
    key_attribute: String,
    tables: HashMap<String, HashMap<String, Item>>,
}

impl TableActor {
    /// Creates a new `TableActor` and its associated [`TableClient`].
    ///
    /// * `buffer_size` - capacity of the request channel. When it is full,
    ///   client calls wait until there is space.
    /// * `key_attribute` - name of the `S` attribute that keys every item.
    pub fn new(buffer_size: usize, key_attribute: impl Into<String>) -> (Self, TableClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            key_attribute: key_attribute.into(),
            tables: HashMap::new(),
        };
        (actor, TableClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        info!(key = %self.key_attribute, "Table store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Put {
                    table,
                    item,
                    respond_to,
                } => {
                    let Some(key) = item.get_s(&self.key_attribute).map(str::to_owned) else {
                        warn!(%table, key = %self.key_attribute, "Put without key attribute");
                        let _ = respond_to
                            .send(Err(StoreError::MissingKey(self.key_attribute.clone())));
                        continue;
                    };
                    let rows = self.tables.entry(table.clone()).or_default();
                    let replaced = rows.insert(key.clone(), item).is_some();
                    debug!(%table, %key, replaced, size = rows.len(), "Put");
                    let _ = respond_to.send(Ok(()));
                }
                TableRequest::Get {
                    table,
                    key,
                    respond_to,
                } => {
                    let item = self
                        .tables
                        .get(&table)
                        .and_then(|rows| rows.get(&key))
                        .cloned();
                    debug!(%table, %key, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                TableRequest::Len { table, respond_to } => {
                    let len = self.tables.get(&table).map_or(0, HashMap::len);
                    let _ = respond_to.send(Ok(len));
                }
            }
        }

        let items: usize = self.tables.values().map(HashMap::len).sum();
        info!(tables = self.tables.len(), items, "Table store shutdown");
    }
}

/// Cloneable handle to a running [`TableActor`].
#[derive(Clone)]
pub struct TableClient {
    sender: mpsc::Sender<TableRequest>,
}

impl TableClient {
    pub fn new(sender: mpsc::Sender<TableRequest>) -> Self {
        Self { sender }
    }

    /// Fetches the item stored under `key`, if any.
    pub async fn get_item(&self, table: &str, key: &str) -> Result<Option<Item>, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TableRequest::Get {
                table: table.to_owned(),
                key: key.to_owned(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    /// Number of items currently held in `table`.
    pub async fn len(&self, table: &str) -> Result<usize, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TableRequest::Len {
                table: table.to_owned(),
                respond_to,
            })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}

#[async_trait]
impl OrderStore for TableClient {
    async fn put_item(&self, table: &str, item: Item) -> Result<(), StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(TableRequest::Put {
                table: table.to_owned(),
                item,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}

use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ReturnDocument, ServerApi, ServerApiVersion},
    Client, Collection,
};
use serde::{Deserialize, Serialize};

use crate::{config::Config, errors::AppResult};

/// One row of the `counters` collection. Every entity keeps integer ids, so
/// each collection gets its own monotonically increasing sequence here.
#[derive(Debug, Serialize, Deserialize)]
struct Counter {
    #[serde(rename = "_id")]
    sequence: String,
    value: i32,
}

#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        let server_api = ServerApi::builder().version(ServerApiVersion::V1).build();
        client_options.server_api = Some(server_api);
        client_options.max_pool_size = Some(10);
        client_options.min_pool_size = Some(2);
        client_options.connect_timeout = Some(Duration::from_secs(5));
        client_options.server_selection_timeout = Some(Duration::from_secs(5));

        let client = Client::with_options(client_options)?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        log::info!("Successfully connected to MongoDB");

        Ok(Self {
            client,
            db_name: config.mongo_db_name.clone(),
        })
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    /// Allocates the next id in a named sequence. Ids are handed out before
    /// any insert, so an aborted write leaves a gap rather than a collision.
    pub async fn next_id(&self, sequence: &str) -> AppResult<i32> {
        let counters: Collection<Counter> = self.get_collection("counters");

        let counter = counters
            .find_one_and_update(
                doc! { "_id": sequence },
                doc! { "$inc": { "value": 1 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| {
                crate::errors::AppError::DatabaseError(format!(
                    "Counter sequence '{}' could not be allocated",
                    sequence
                ))
            })?;

        Ok(counter.value)
    }

    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn db_name(&self) -> &str {
        &self.db_name
    }
}

use mongodb::{
    bson::{self, doc, Bson, DateTime},
    options::UpdateOptions,
    Collection, Database,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, thiserror::Error)]
pub enum MongoStoreError {
    #[error("mongodb error: {0:#}")]
    MongoDb(#[from] mongodb::error::Error),

    #[error("couldn't serialize value: {0}")]
    Serialize(#[from] bson::ser::Error),

    #[error("couldn't deserialize value: {0}")]
    Deserialize(#[from] bson::de::Error),
}

/// Keys and values stored as documents in one collection.
#[derive(Debug, Clone)]
pub struct MongoStore {
    records: Collection<Record>,
}

impl MongoStore {
    const COLLECTION_NAME: &'static str = "wordle";

    pub fn from_database(db: &Database) -> Self {
        Self {
            records: db.collection(Self::COLLECTION_NAME),
        }
    }
}

impl<'a> From<&'a Database> for MongoStore {
    fn from(value: &'a Database) -> Self {
        Self::from_database(value)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Record {
    key: String,
    value: Bson,
    updated: DateTime,
}

impl super::KvStore for MongoStore {
    type Error = MongoStoreError;

    async fn get<T>(&self, key: &str) -> Result<Option<T>, Self::Error>
    where
        T: DeserializeOwned,
    {
        let record = self.records.find_one(doc! { "key": key }, None).await?;

        trace!(key, found = record.is_some());

        Ok(record
            .map(|record| bson::from_bson(record.value))
            .transpose()?)
    }

    async fn set<T>(&self, key: &str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + Sync,
    {
        let value = bson::to_bson(value)?;

        self.records
            .update_one(
                doc! { "key": key },
                doc! { "$set": { "value": value, "updated": DateTime::now() } },
                UpdateOptions::builder().upsert(true).build(),
            )
            .await?;

        trace!(key, "upserted value");

        Ok(())
    }
}

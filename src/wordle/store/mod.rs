use serde::{de::DeserializeOwned, Serialize};

mod memory;
pub use memory::MemoryStore;

mod mongodb;
pub use self::mongodb::MongoStore;

/// A string-keyed store of serializable values.
pub trait KvStore {
    type Error: std::error::Error;

    async fn get<T>(&self, key: &str) -> Result<Option<T>, Self::Error>
    where
        T: DeserializeOwned;

    async fn set<T>(&self, key: &str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + Sync;
}

impl<S: KvStore> KvStore for &S {
    type Error = S::Error;

    async fn get<T>(&self, key: &str) -> Result<Option<T>, Self::Error>
    where
        T: DeserializeOwned,
    {
        (**self).get(key).await
    }

    async fn set<T>(&self, key: &str, value: &T) -> Result<(), Self::Error>
    where
        T: Serialize + Sync,
    {
        (**self).set(key, value).await
    }
}

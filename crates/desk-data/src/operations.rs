use anyhow::Result;
use async_trait::async_trait;

/// Record access seam between the collaborator and its store.
/// Every record type in this system is keyed by a numeric id
/// the store assigns on insert, so lookups take a plain `u32`.
#[async_trait]
pub trait Query<T> {
    type Filter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<T>>;
}

#[async_trait]
pub trait Retrieve<T> {
    async fn retrieve(&self, id: u32) -> Result<T>;
}

/// Insert a record and return it as stored, with the assigned
/// id and any store-side defaults filled in.
#[async_trait]
pub trait Insert<T> {
    async fn insert(&self, record: T) -> Result<T>;
}

#[async_trait]
pub trait Update<T> {
    async fn update(&self, record: T) -> Result<T>;
}

/// Removes the stored record with the same id. Only the id is
/// read, the record itself stays with the caller.
#[async_trait]
pub trait Delete<T> {
    async fn delete(&self, record: &T) -> Result<()>;
}

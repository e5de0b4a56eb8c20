use topic_query_converters_core::StoreError;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("failed to update the presence flag: {0}")]
    Store(#[from] StoreError),
}

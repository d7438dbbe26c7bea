mod csv_store;
mod store_error;

pub use csv_store::CsvStore;
pub use store_error::StoreError;

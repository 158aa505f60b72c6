mod fetch;
mod row;

pub use fetch::{
    Records, fetch_all_as_records, fetch_many_as_records, fetch_one_as_record, row_to_record,
};
pub use row::Record;

mod contract;
mod delete;
mod insert;
mod query;

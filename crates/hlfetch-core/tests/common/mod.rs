pub mod query_server;

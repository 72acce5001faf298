mod ingest;
mod query;

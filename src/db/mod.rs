/// Core database connection.
///
/// Provides the `Db` struct that opens the SQLite file in the data directory.
pub mod db;

/// Command inbox shared between CLI invocations and the running watcher.
///
/// Commands issued while a watcher is running are queued here and drained
/// by the watcher, which owns the in-memory state they act on.
pub mod inbox;

/// Key-value settings table.
///
/// The SQLite implementation of the `KeyValueStore` persistence boundary.
pub mod kv;

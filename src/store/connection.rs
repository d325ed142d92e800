// OddBench - GPL-3.0-or-later
// This file is part of OddBench.
//
// Copyright (C) 2026 The OddBench Authors
//
// OddBench is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// OddBench is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with OddBench.  If not, see <https://www.gnu.org/licenses/>.

//! Connection handle for the embedded store.
//!
//! There is deliberately no process-wide connection: the handle is
//! created by [`connect`], threaded by value through every stage, and
//! released either explicitly via [`Connection::close`] or on drop.

use crate::error::StoreError;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::net::IpAddr;

/// One stored table: a timestamp column plus N feature columns.
#[derive(Debug, Clone)]
pub struct Table {
    pub time_column: String,
    pub timestamps: Vec<NaiveDateTime>,
    pub rows: Vec<Vec<f64>>,
}

/// An open handle to the store. Owns all table data for its lifetime.
#[derive(Debug)]
pub struct Connection {
    host: String,
    user: String,
    tables: HashMap<(String, String), Table>,
}

/// Open a connection, validating host syntax and credentials.
///
/// The embedded store accepts any IP literal or `localhost` as host
/// and requires non-empty credentials; anything else fails with
/// [`StoreError::Connection`], mirroring how a remote engine would
/// reject the handshake.
pub fn connect(host: &str, user: &str, password: &str) -> Result<Connection, StoreError> {
    if host != "localhost" && host.parse::<IpAddr>().is_err() {
        return Err(StoreError::Connection {
            host: host.to_string(),
            reason: "host is not an IP literal or 'localhost'".to_string(),
        });
    }
    if user.is_empty() || password.is_empty() {
        return Err(StoreError::Connection {
            host: host.to_string(),
            reason: "missing credentials".to_string(),
        });
    }
    log::info!("connected to store at {host} as {user}");
    Ok(Connection {
        host: host.to_string(),
        user: user.to_string(),
        tables: HashMap::new(),
    })
}

impl Connection {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Create or replace a table under `db.table`.
    pub fn put_table(&mut self, db: &str, table: &str, data: Table) {
        log::debug!(
            "storing table {db}.{table}: {} rows, {} features",
            data.rows.len(),
            data.rows.first().map_or(0, Vec::len)
        );
        self.tables
            .insert((db.to_string(), table.to_string()), data);
    }

    pub(crate) fn table(&self, db: &str, table: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(&(db.to_string(), table.to_string()))
            .ok_or_else(|| StoreError::MissingTable {
                db: db.to_string(),
                table: table.to_string(),
            })
    }

    /// Release the connection. Dropping the handle has the same
    /// effect; this form just makes the release point explicit.
    pub fn close(self) {
        log::info!("closing store connection to {}", self.host);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_accepts_ip_and_localhost() {
        assert!(connect("127.0.0.1", "root", "root").is_ok());
        assert!(connect("localhost", "user", "secret").is_ok());
        assert!(connect("::1", "user", "secret").is_ok());
    }

    #[test]
    fn test_connect_rejects_bad_host() {
        let err = connect("not-a-host!", "root", "root").unwrap_err();
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    #[test]
    fn test_connect_rejects_empty_credentials() {
        assert!(matches!(
            connect("127.0.0.1", "", "root"),
            Err(StoreError::Connection { .. })
        ));
        assert!(matches!(
            connect("127.0.0.1", "root", ""),
            Err(StoreError::Connection { .. })
        ));
    }

    #[test]
    fn test_missing_table() {
        let conn = connect("127.0.0.1", "root", "root").unwrap();
        assert!(matches!(
            conn.table("db", "nope"),
            Err(StoreError::MissingTable { .. })
        ));
    }
}

//! Resolution store operations
//!
//! The Acl ("anti-corruption layer") is the only surface that touches the
//! mappings table. All operations take an explicit connection handle, so a
//! caller can run them inside its own transaction (rusqlite's Transaction
//! derefs to Connection).
//!
//! Uniqueness is enforced by the `(platform, digest)` unique index, not by
//! check-then-insert: `add` issues a single INSERT and maps the constraint
//! failure to `UniquenessViolation`.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use chrono::{TimeZone, Utc};
use rusqlite::{params, Connection};
use serde_json::Value as JsonValue;

use chanid_core::canonical;
use chanid_core::errors::{AclError, AclErrorKind};
use chanid_core::model::{Identity, Mapping, Platform};
use chanid_core::{log_op_end, log_op_error, log_op_start};

use crate::errors::{from_rusqlite, invariant_violation, Result};

/// Identity resolution store over the mappings table
pub struct Acl;

impl Acl {
    /// Register a mapping from `identity` to the canonical `mapped_id`.
    ///
    /// The same `mapped_id` may be registered any number of times with
    /// distinct identities; registering a structurally equal identity twice
    /// fails with `UniquenessViolation` and leaves the table unchanged.
    pub fn add(conn: &Connection, mapped_id: i64, identity: &Identity) -> Result<()> {
        let start = Instant::now();
        let mapping = Mapping::new(mapped_id, identity)?;
        log_op_start!(
            "acl_add",
            mapped_id,
            platform = mapping.platform.as_str(),
            digest = mapping.digest_hex().as_str()
        );

        let payload_text = serialize_payload(&mapping.payload)?;
        let insert = conn
            .execute(
                "INSERT INTO mappings (mapped_id, platform, payload, digest, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    mapping.mapped_id,
                    mapping.platform.as_str(),
                    payload_text,
                    mapping.digest,
                    mapping.created_at.timestamp_millis(),
                ],
            )
            .map_err(|e| {
                from_rusqlite(e)
                    .with_op("acl_add")
                    .with_platform(mapping.platform.as_str())
                    .with_mapped_id(mapped_id)
                    .with_digest(mapping.digest_hex())
            });

        match insert {
            Ok(_) => {
                log_op_end!(
                    "acl_add",
                    duration_ms = start.elapsed().as_millis() as u64,
                    mapped_id
                );
                Ok(())
            }
            Err(err) => {
                log_op_error!(
                    "acl_add",
                    err,
                    duration_ms = start.elapsed().as_millis() as u64,
                    mapped_id
                );
                Err(err)
            }
        }
    }

    /// Forward resolution: the canonical ID registered for `identity`.
    ///
    /// Absence is an ordinary outcome and returns `Ok(None)`. More than one
    /// matching row means the unique index was violated out of band and is
    /// reported as a fatal `InvariantViolation`.
    pub fn get_id(conn: &Connection, identity: &Identity) -> Result<Option<i64>> {
        let platform = identity.platform();
        let digest = canonical::digest(identity)?;

        let mut stmt = conn
            .prepare("SELECT mapped_id FROM mappings WHERE platform = ?1 AND digest = ?2")
            .map_err(from_rusqlite)?;
        let ids: Vec<i64> = stmt
            .query_map(params![platform.as_str(), digest], |row| row.get(0))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        match ids.as_slice() {
            [] => Ok(None),
            [id] => Ok(Some(*id)),
            _ => {
                let err = invariant_violation(platform.as_str(), &hex::encode(&digest), ids.len());
                tracing::error!(
                    platform = platform.as_str(),
                    row_count = ids.len(),
                    "unique index violated out of band"
                );
                Err(err)
            }
        }
    }

    /// Reverse resolution: all identities registered under `mapped_id`.
    ///
    /// Returns one entry per federated platform identity; an unknown
    /// `mapped_id` yields an empty vector.
    pub fn get_identity(conn: &Connection, mapped_id: i64) -> Result<Vec<Identity>> {
        let mut stmt = conn
            .prepare(
                "SELECT platform, payload FROM mappings WHERE mapped_id = ?1 ORDER BY row_id",
            )
            .map_err(from_rusqlite)?;
        let rows: Vec<(String, String)> = stmt
            .query_map([mapped_id], |row| Ok((row.get(0)?, row.get(1)?)))
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let mut identities = Vec::with_capacity(rows.len());
        for (tag, payload_text) in rows {
            let platform = Platform::parse(&tag)?;
            let payload = deserialize_payload(&payload_text)?;
            identities.push(Identity::from_parts(platform, &payload)?);
        }

        tracing::debug!(mapped_id, row_count = identities.len(), "resolved identities");
        Ok(identities)
    }

    /// Load the full mapping rows for `mapped_id`, including timestamps.
    pub fn get_mappings(conn: &Connection, mapped_id: i64) -> Result<Vec<Mapping>> {
        let mut stmt = conn
            .prepare(
                "SELECT platform, payload, digest, created_at
                 FROM mappings WHERE mapped_id = ?1 ORDER BY row_id",
            )
            .map_err(from_rusqlite)?;
        let rows: Vec<(String, String, Vec<u8>, i64)> = stmt
            .query_map([mapped_id], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        let mut mappings = Vec::with_capacity(rows.len());
        for (tag, payload_text, digest, created_at_ms) in rows {
            let platform = Platform::parse(&tag)?;
            let payload = deserialize_payload(&payload_text)?;
            let created_at = Utc
                .timestamp_millis_opt(created_at_ms)
                .single()
                .ok_or_else(|| {
                    AclError::new(AclErrorKind::Persistence)
                        .with_op("acl_get_mappings")
                        .with_mapped_id(mapped_id)
                        .with_message(format!("created_at out of range: {}", created_at_ms))
                })?;
            mappings.push(Mapping::from_row(
                mapped_id, platform, payload, digest, created_at,
            ));
        }

        Ok(mappings)
    }
}

fn serialize_payload(payload: &JsonValue) -> Result<String> {
    serde_json::to_string(payload).map_err(|e| {
        AclError::new(AclErrorKind::Serialization)
            .with_op("acl_add")
            .with_message(e.to_string())
    })
}

fn deserialize_payload(payload_text: &str) -> Result<JsonValue> {
    serde_json::from_str(payload_text).map_err(|e| {
        AclError::new(AclErrorKind::Serialization)
            .with_op("acl_read")
            .with_message(e.to_string())
    })
}

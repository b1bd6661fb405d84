// SPDX-FileCopyrightText: 2025 colmap-inject contributors
// SPDX-License-Identifier: MIT

//! Pose-prior storage layout resolution.
//!
//! COLMAP has stored per-image pose priors two ways over its release
//! history: as seven nullable columns directly on the `images` table, or in
//! a dedicated `pose_priors` table keyed by image id. Within the inline
//! layout the column spellings themselves changed. Given an unknown
//! database, the resolver classifies it into exactly one supported layout
//! from the table metadata alone, without mutating anything.

use std::collections::HashSet;

use tracing::debug;

use crate::connection::ColmapDb;
use crate::error::{Error, Result};

/// Ordered name candidates for the four orientation columns. Older
/// releases used the first spelling, newer ones the second; the first
/// spelling present in the table wins.
const Q_COLUMN_CANDIDATES: [[&str; 2]; 4] = [
    ["prior_qw", "qvec_prior_w"],
    ["prior_qx", "qvec_prior_x"],
    ["prior_qy", "qvec_prior_y"],
    ["prior_qz", "qvec_prior_z"],
];

/// Ordered name candidates for the three position columns.
const T_COLUMN_CANDIDATES: [[&str; 2]; 3] = [
    ["prior_tx", "tvec_prior_x"],
    ["prior_ty", "tvec_prior_y"],
    ["prior_tz", "tvec_prior_z"],
];

/// How a database stores per-image pose priors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosePriorStorage {
    /// Priors live directly on the images table. The fields carry the
    /// resolved column names in (qw, qx, qy, qz) and (tx, ty, tz) order;
    /// they are substituted positionally into the write statement.
    InlineColumns {
        q_columns: [&'static str; 4],
        t_columns: [&'static str; 3],
    },
    /// Priors live in the dedicated pose_priors table.
    SeparateTable,
}

impl ColmapDb {
    /// Resolve which pose-prior layout this database uses.
    ///
    /// The layout is probed on the first call and cached; later calls
    /// return the cached value without touching schema metadata again. A
    /// failed resolution caches nothing.
    pub fn prior_storage(&self) -> Result<&PosePriorStorage> {
        if let Some(storage) = self.prior_storage.get() {
            return Ok(storage);
        }
        let resolved = self.resolve_prior_storage()?;
        Ok(self.prior_storage.get_or_init(|| resolved))
    }

    fn resolve_prior_storage(&self) -> Result<PosePriorStorage> {
        let mut stmt = self.conn.prepare("PRAGMA table_info(images)")?;
        let mut columns = HashSet::new();
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            columns.insert(row.get::<_, String>(1)?);
        }

        let q_columns = select_candidates(&Q_COLUMN_CANDIDATES, &columns);
        let t_columns = select_candidates(&T_COLUMN_CANDIDATES, &columns);

        if let (Some(q_columns), Some(t_columns)) = (q_columns, t_columns) {
            debug!("Resolved inline prior columns: {q_columns:?} {t_columns:?}");
            return Ok(PosePriorStorage::InlineColumns {
                q_columns,
                t_columns,
            });
        }

        let pose_priors_exists: i32 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='pose_priors'",
            [],
            |row| row.get(0),
        )?;
        if pose_priors_exists > 0 {
            debug!("Resolved separate pose_priors table");
            return Ok(PosePriorStorage::SeparateTable);
        }

        let mut missing: Vec<String> = Q_COLUMN_CANDIDATES
            .iter()
            .flatten()
            .chain(T_COLUMN_CANDIDATES.iter().flatten())
            .copied()
            .filter(|candidate| !columns.contains(*candidate))
            .map(str::to_string)
            .collect();
        missing.sort();
        Err(Error::UnrecognizedImagesSchema { missing })
    }
}

/// Pick the first candidate present in the table for every role, or `None`
/// if any role has no candidate present.
fn select_candidates<const N: usize>(
    groups: &[[&'static str; 2]; N],
    columns: &HashSet<String>,
) -> Option<[&'static str; N]> {
    let mut selected = [""; N];
    for (slot, group) in selected.iter_mut().zip(groups) {
        *slot = *group.iter().find(|candidate| columns.contains(**candidate))?;
    }
    Some(selected)
}

//! # Vertex names
//!
//! Optional CSV mapping `id,name` (one vertex per line, 1-based ids) so vertices can be
//! addressed by a label. Names are matched case-insensitively after trimming and may
//! be shared by several ids.

use std::{
    io::{BufRead, ErrorKind},
    path::Path,
};

use fxhash::FxHashMap;

use super::*;
use crate::error::GraphError;

#[derive(Debug, Clone, Default)]
pub struct VertexNames {
    id_to_name: FxHashMap<u64, String>,
    name_to_ids: FxHashMap<String, Vec<u64>>,
}

impl VertexNames {
    /// Parses the mapping from a reader.
    ///
    /// # Errors
    /// `InvalidData` for lines without a comma, empty fields, ids that are not positive
    /// integers, duplicate ids, or if the input contains no mapping at all.
    pub fn try_read<R: BufRead>(reader: R) -> Result<Self> {
        let mut names = Self::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let context = format!("line {}", index + 1);
            if line.trim().is_empty() {
                continue;
            }

            let Some((id, name)) = line.split_once(',') else {
                return Err(io_error!(
                    ErrorKind::InvalidData,
                    format!("{context}: expected 'id,name'")
                ));
            };
            let (id, name) = (id.trim(), name.trim());
            raise_error_unless!(
                !id.is_empty() && !name.is_empty(),
                ErrorKind::InvalidData,
                format!("{context}: incomplete entry")
            );

            let id: i64 = id.parse().map_err(|_| {
                io_error!(
                    ErrorKind::InvalidData,
                    format!("{context}: invalid id '{id}'")
                )
            })?;
            raise_error_unless!(
                id > 0,
                ErrorKind::InvalidData,
                format!("{context}: ids must be positive")
            );
            let id = id as u64;

            raise_error_unless!(
                !names.id_to_name.contains_key(&id),
                ErrorKind::InvalidData,
                format!("{context}: duplicate id {id}")
            );
            names.id_to_name.insert(id, name.to_string());
            names
                .name_to_ids
                .entry(Self::normalize(name))
                .or_default()
                .push(id);
        }

        raise_error_unless!(
            !names.id_to_name.is_empty(),
            ErrorKind::InvalidData,
            "vertex name mapping is empty"
        );
        Ok(names)
    }

    /// Parses the mapping from a file
    pub fn try_read_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::try_read(BufReader::new(File::open(path)?))
    }

    /// Trimmed, lower-cased lookup key
    pub fn normalize(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    pub fn contains_id(&self, id: u64) -> bool {
        self.id_to_name.contains_key(&id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_ids.contains_key(&Self::normalize(name))
    }

    /// Name of a 1-based id as written in the file
    pub fn name_of(&self, id: u64) -> Option<&str> {
        self.id_to_name.get(&id).map(String::as_str)
    }

    /// All ids carrying this name in file order; empty if the name is unknown
    pub fn ids_of(&self, name: &str) -> &[u64] {
        self.name_to_ids
            .get(&Self::normalize(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The single id carrying this name.
    ///
    /// # Errors
    /// [`GraphError::Parse`] if the name is unknown or ambiguous.
    pub fn id_of(&self, name: &str) -> crate::error::Result<u64> {
        match self.ids_of(name) {
            [] => Err(GraphError::Parse(format!("unknown vertex name '{name}'"))),
            [id] => Ok(*id),
            ids => Err(GraphError::Parse(format!(
                "vertex name '{name}' refers to {} ids",
                ids.len()
            ))),
        }
    }

    /// Checks that the mapping names exactly the vertices `1..=n`
    pub fn validate(&self, n: NumNodes) -> Result<()> {
        raise_error_unless!(
            self.len() == n as usize,
            ErrorKind::InvalidData,
            format!(
                "vertex name mapping has {} entries but the graph has {n} vertices",
                self.len()
            )
        );

        if let Some(id) = self.id_to_name.keys().find(|&&id| id > n as u64) {
            return Err(io_error!(
                ErrorKind::InvalidData,
                format!("vertex name mapping refers to id {id} outside of [1, {n}]")
            ));
        }
        Ok(())
    }
}

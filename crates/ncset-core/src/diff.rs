//! Byte-level comparison of two dumps of the same length.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::blob::ByteBlob;
use crate::blob::layout::{footer, section};
use crate::error::{Error, Result};
use crate::section::{ConfigModel, Mode};

/// Where a changed byte lives, as far as the model knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Location {
    Footer,
    /// `byte` is 0 for the item ID and 1-3 for padding
    Slot { mode: Mode, slot: usize, byte: usize },
    ModeId { mode: Mode },
    FilePrefix { mode: Mode },
    Section { mode: Mode, relative: usize },
    Outside,
}

impl Location {
    pub fn mode(&self) -> Option<Mode> {
        match *self {
            Self::Slot { mode, .. }
            | Self::ModeId { mode }
            | Self::FilePrefix { mode }
            | Self::Section { mode, .. } => Some(mode),
            Self::Footer | Self::Outside => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteChange {
    pub offset: usize,
    pub before: u8,
    pub after: u8,
    pub location: Location,
}

/// Every differing byte, in offset order.
///
/// Without a model only the footer is recognized; everything else is
/// `Outside`.
pub fn diff(a: &ByteBlob, b: &ByteBlob, model: Option<&ConfigModel>) -> Result<Vec<ByteChange>> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    Ok(a.as_bytes()
        .iter()
        .zip(b.as_bytes())
        .enumerate()
        .filter(|(_, (before, after))| before != after)
        .map(|(offset, (&before, &after))| ByteChange {
            offset,
            before,
            after,
            location: locate(offset, a.len(), model),
        })
        .collect())
}

pub fn locate(offset: usize, blob_len: usize, model: Option<&ConfigModel>) -> Location {
    if blob_len >= footer::LEN && offset >= blob_len - footer::LEN {
        return Location::Footer;
    }
    let Some(model) = model else {
        return Location::Outside;
    };

    for found in model.sections() {
        let Some(relative) = offset.checked_sub(found.offset) else {
            continue;
        };
        if relative >= section::SIZE {
            continue;
        }
        let mode = found.mode;
        return match relative {
            r if (section::IMENU..section::IMENU_END).contains(&r) => Location::Slot {
                mode,
                slot: (r - section::IMENU) / section::WORD,
                byte: (r - section::IMENU) % section::WORD,
            },
            section::MODE_ID => Location::ModeId { mode },
            r if (section::FILE_PREFIX..section::FILE_PREFIX + section::FILE_PREFIX_LEN)
                .contains(&r) =>
            {
                Location::FilePrefix { mode }
            }
            r => Location::Section { mode, relative: r },
        };
    }
    Location::Outside
}

pub fn changed_modes(changes: &[ByteChange]) -> BTreeSet<Mode> {
    changes.iter().filter_map(|c| c.location.mode()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::fixture::{DumpBuilder, Z5_LEN, typical_slots};
    use crate::offset::builtin_generation;
    use crate::section::detect;

    #[test]
    fn test_length_mismatch() {
        let a = ByteBlob::new(vec![0; 10]);
        let b = ByteBlob::new(vec![0; 11]);
        assert!(matches!(
            diff(&a, &b, None),
            Err(Error::LengthMismatch { left: 10, right: 11 })
        ));
    }

    #[test]
    fn test_identical_blobs() {
        let a = ByteBlob::new(vec![7; 64]);
        assert!(diff(&a, &a.clone(), None).unwrap().is_empty());
    }

    #[test]
    fn test_without_model() {
        let a = ByteBlob::new(vec![0; 8]);
        let b = ByteBlob::new(vec![0, 1, 0, 0, 0, 0, 0, 9]);
        let changes = diff(&a, &b, None).unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].location, Location::Outside);
        assert_eq!(changes[1].location, Location::Footer);
    }

    #[test]
    fn test_edits_are_annotated() {
        let original = DumpBuilder::new(Z5_LEN)
            .section(169824, Mode::Manual.code(), typical_slots())
            .build();
        let mut model = detect(
            original.clone(),
            &builtin_generation(),
            &DetectionConfig::default(),
        );
        model.set_slot(Mode::Manual, 3, 70).unwrap();
        model.set_file_prefix(Mode::Manual, "ZZZ").unwrap();
        let edited = ByteBlob::new(model.encode_sealed().unwrap());

        let changes = diff(&original, &edited, Some(&model)).unwrap();
        assert!(changes.iter().any(|c| c.location
            == Location::Slot {
                mode: Mode::Manual,
                slot: 3,
                byte: 0
            }
            && c.before == 69
            && c.after == 70));
        assert!(
            changes
                .iter()
                .any(|c| c.location == Location::FilePrefix { mode: Mode::Manual })
        );
        assert_eq!(
            changed_modes(&changes).into_iter().collect::<Vec<_>>(),
            vec![Mode::Manual]
        );
    }

    #[test]
    fn test_locate_mode_byte_and_body() {
        let blob = DumpBuilder::new(Z5_LEN)
            .section(169824, Mode::Manual.code(), typical_slots())
            .build();
        let model = detect(blob, &builtin_generation(), &DetectionConfig::default());

        assert_eq!(
            locate(169824 + section::MODE_ID, Z5_LEN, Some(&model)),
            Location::ModeId { mode: Mode::Manual }
        );
        assert_eq!(
            locate(169824 + 10, Z5_LEN, Some(&model)),
            Location::Section {
                mode: Mode::Manual,
                relative: 10
            }
        );
        assert_eq!(locate(100, Z5_LEN, Some(&model)), Location::Outside);
    }
}

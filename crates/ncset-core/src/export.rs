//! JSON export of a detected model.

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::imenu::{EMPTY_SLOT, ItemCatalog};
use crate::section::{AbsenceReason, ConfigModel, ConfigSection, Confidence, DetectionPhase, Mode};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotExport {
    /// 1-based, as shown on the camera
    pub slot: usize,
    pub item_id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionExport {
    pub mode: Mode,
    pub mode_name: &'static str,
    pub mode_id: u8,
    pub offset: usize,
    pub score: f64,
    pub phase: DetectionPhase,
    pub confidence: Confidence,
    pub file_prefix: Option<String>,
    pub slots: Vec<SlotExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnresolvedExport {
    pub mode: Mode,
    #[serde(flatten)]
    pub reason: AbsenceReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigExport {
    pub generation: String,
    pub sections: Vec<SectionExport>,
    pub unresolved: Vec<UnresolvedExport>,
}

impl SectionExport {
    pub fn new(model: &ConfigModel, section: &ConfigSection, catalog: &ItemCatalog) -> Self {
        let slots = section
            .slots
            .iter()
            .enumerate()
            .map(|(index, &item_id)| SlotExport {
                slot: index + 1,
                item_id,
                name: u8::try_from(item_id)
                    .ok()
                    .filter(|&id| id != EMPTY_SLOT)
                    .and_then(|id| catalog.name(id))
                    .map(str::to_string),
            })
            .collect();

        Self {
            mode: section.mode,
            mode_name: section.mode.expand_name(),
            mode_id: section.mode_id,
            offset: section.offset,
            score: section.score,
            phase: section.phase,
            confidence: section.confidence,
            file_prefix: model.file_prefix(section.mode).ok(),
            slots,
        }
    }
}

impl ConfigExport {
    pub fn from_model(model: &ConfigModel, catalog: &ItemCatalog) -> Self {
        Self {
            generation: model.generation().to_string(),
            sections: model
                .sections()
                .map(|section| SectionExport::new(model, section, catalog))
                .collect(),
            unresolved: model
                .unresolved()
                .map(|(mode, reason)| UnresolvedExport {
                    mode,
                    reason: *reason,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DetectionConfig;
    use crate::fixture::{DumpBuilder, Z5_LEN, typical_slots};
    use crate::offset::builtin_generation;
    use crate::section::detect;
    use tempfile::NamedTempFile;

    fn model() -> ConfigModel {
        let blob = DumpBuilder::new(Z5_LEN)
            .section(183080, Mode::User1.code(), typical_slots())
            .build();
        detect(blob, &builtin_generation(), &DetectionConfig::default())
    }

    #[test]
    fn test_export_names_known_slots_only() {
        let profile = builtin_generation();
        let export = ConfigExport::from_model(&model(), &profile.items);

        assert_eq!(export.generation, "Z5");
        assert_eq!(export.sections.len(), 1);
        let user1 = &export.sections[0];
        assert_eq!(user1.mode, Mode::User1);
        assert_eq!(user1.slots[0].name.as_deref(), Some("Image Quality"));
        assert_eq!(user1.slots[2].name, None);
        assert_eq!(user1.slots[3].item_id, 69);
        assert_eq!(user1.slots[3].name, None);
        assert_eq!(export.unresolved.len(), 7);
    }

    #[test]
    fn test_export_json_shape() {
        let profile = builtin_generation();
        let json = ConfigExport::from_model(&model(), &profile.items)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["sections"][0]["mode"], "User1");
        assert_eq!(value["sections"][0]["slots"][0]["slot"], 1);
        assert_eq!(value["unresolved"][0]["mode"], "Manual");
        assert_eq!(value["unresolved"][0]["reason"], "no_candidate");
    }

    #[test]
    fn test_save() {
        let profile = builtin_generation();
        let temp_file = NamedTempFile::new().unwrap();
        ConfigExport::from_model(&model(), &profile.items)
            .save(temp_file.path())
            .unwrap();
        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("\"generation\": \"Z5\""));
    }
}

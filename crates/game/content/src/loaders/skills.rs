//! Skill catalog loader.

use std::collections::BTreeSet;
use std::path::Path;

use jabs_core::{JabsConfig, ProcTrigger, SkillData, SkillTable};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillData>,
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill catalog from a RON file into a [`SkillTable`].
    pub fn load(path: &Path) -> LoadResult<SkillTable> {
        let content = read_file(path)?;
        let table = Self::parse(&content)?;

        tracing::debug!(path = %path.display(), skills = table.len(), "loaded skill catalog");
        Ok(table)
    }

    /// Parse and validate a skill catalog from RON text.
    ///
    /// Rejects the zero id, duplicate ids, proc chances above 100, and proc
    /// keys that are not a known trigger. A combo link to a skill missing from
    /// the catalog is only warned about, since hosts may serve it elsewhere.
    pub fn parse(content: &str) -> LoadResult<SkillTable> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut seen = BTreeSet::new();
        for skill in &catalog.skills {
            anyhow::ensure!(skill.id.is_some(), "skill `{}` uses reserved id 0", skill.name);
            anyhow::ensure!(seen.insert(skill.id), "duplicate skill id {}", skill.id.0);

            for effect in &skill.procs {
                anyhow::ensure!(
                    effect.chance() <= JabsConfig::MAX_CHANCE,
                    "proc {} on skill {} has chance {} above {}",
                    effect.skill_id().0,
                    skill.id.0,
                    effect.chance(),
                    JabsConfig::MAX_CHANCE
                );
                anyhow::ensure!(
                    effect.key().parse::<ProcTrigger>().is_ok(),
                    "proc {} on skill {} has unknown trigger `{}`",
                    effect.skill_id().0,
                    skill.id.0,
                    effect.key()
                );
            }
        }

        let table: SkillTable = catalog.skills.into_iter().collect();

        for skill in table.iter() {
            if let Some(link) = skill.combo
                && link.next.is_some()
                && !seen.contains(&link.next)
            {
                tracing::warn!(
                    skill = skill.id.0,
                    next = link.next.0,
                    "combo follow-up is not in the catalog"
                );
            }
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use jabs_core::{ComboLink, SkillId, SkillOracle, SkillRole};

    use super::*;

    const CATALOG: &str = r#"(
        skills: [
            (
                id: 1,
                name: "Slash",
                cooldown_frames: 30,
                combo: Some((next: 2, delay_frames: 12)),
            ),
            (
                id: 2,
                name: "Rising Slash",
                cooldown_frames: 45,
                procs: [(skill_id: 40, chance: 25, key: "onHit")],
            ),
            (id: 3, name: "Roll", role: Dodge),
            (id: 4, name: "Mend", cooldown_frames: 120, role: Heal),
        ],
    )"#;

    #[test]
    fn parses_catalog_with_defaults() {
        let table = SkillLoader::parse(CATALOG).unwrap();
        assert_eq!(table.len(), 4);

        let slash = table.skill(SkillId(1)).unwrap();
        assert_eq!(slash.combo, Some(ComboLink::new(SkillId(2), 12)));
        assert_eq!(slash.role, SkillRole::Attack);
        assert!(slash.procs.is_empty());

        let rising = table.skill(SkillId(2)).unwrap();
        assert_eq!(rising.procs_for(ProcTrigger::OnHit).count(), 1);
        assert!(table.skill(SkillId(3)).is_some_and(SkillData::is_dodge));
        assert_eq!(table.skill(SkillId(4)).map(|s| s.role), Some(SkillRole::Heal));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = SkillLoader::parse(
            r#"(skills: [(id: 5, name: "A"), (id: 5, name: "B")])"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate skill id 5"));
    }

    #[test]
    fn rejects_reserved_id() {
        assert!(SkillLoader::parse(r#"(skills: [(id: 0, name: "Nothing")])"#).is_err());
    }

    #[test]
    fn rejects_bad_procs() {
        let too_likely = r#"(skills: [(id: 1, name: "A",
            procs: [(skill_id: 9, chance: 150, key: "onHit")])])"#;
        assert!(SkillLoader::parse(too_likely).is_err());

        let unknown_key = r#"(skills: [(id: 1, name: "A",
            procs: [(skill_id: 9, chance: 15, key: "onSneeze")])])"#;
        assert!(SkillLoader::parse(unknown_key).is_err());
    }

    #[test]
    fn dangling_combo_link_still_loads() {
        let table = SkillLoader::parse(
            r#"(skills: [(id: 1, name: "A", combo: Some((next: 77, delay_frames: 0)))])"#,
        )
        .unwrap();
        assert_eq!(table.len(), 1);
    }
}

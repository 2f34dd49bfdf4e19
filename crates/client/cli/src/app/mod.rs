//! Skirmish driver: content loading, the frame loop, and hit resolution.
mod battler;
mod damage;
mod engine;

use battler::SimBattler;
use damage::SimDamage;
use engine::{PendingHit, SimEngine};

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use jabs_content::{BattlerSpec, ConfigLoader, ContentFactory, RosterLoader, SkillLoader};
use jabs_core::{
    Battler, BattlerId, DamageOracle, JabsConfig, PcgRng, ProcTrigger, RngOracle, SkillData,
    SkillOracle, SkillRole, SkillTable,
};
use jabs_runtime::{JabsRuntime, RuntimeConfig};

use crate::config::SimConfig;

/// Outcome of a skirmish run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub frames: u64,
    pub actions: usize,
    pub cancelled: usize,
    pub enemy_actions: usize,
    pub hits: usize,
    pub crits: usize,
    pub procs: usize,
    pub buzzers: u32,
    pub defeated: Vec<String>,
    /// Name, HP and max HP of everyone still standing.
    pub survivors: Vec<(String, u32, u32)>,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "frames:    {}", self.frames)?;
        writeln!(
            f,
            "actions:   {} ally, {} enemy, {} cancelled",
            self.actions, self.enemy_actions, self.cancelled
        )?;
        writeln!(
            f,
            "hits:      {} ({} critical, {} from procs)",
            self.hits, self.crits, self.procs
        )?;
        writeln!(f, "buzzers:   {}", self.buzzers)?;
        writeln!(f, "defeated:  {}", self.defeated.join(", "))?;
        write!(f, "survivors:")?;
        for (name, hp, max_hp) in &self.survivors {
            write!(f, " {name} {hp}/{max_hp};")?;
        }
        Ok(())
    }
}

pub struct Skirmish {
    runtime: JabsRuntime<SimBattler>,
    engine: SimEngine,
    skills: SkillTable,
    damage: SimDamage,
    crit_rng: PcgRng,
    summary: Summary,
}

impl Skirmish {
    pub const CRIT_CHANCE: u32 = 10;
    pub const ALERT_FRAMES: u32 = 90;
    /// Allies this close to a victim are alerted along with it.
    pub const ALERT_RADIUS: u32 = 3;

    /// Loads content per `config` and restores saved ally loadouts.
    pub fn load(config: &SimConfig) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);

        let jabs = match &config.config_path {
            Some(path) => ConfigLoader::load(path)?,
            None => factory.load_config()?,
        };
        let skills = match &config.skills_path {
            Some(path) => SkillLoader::load(path)?,
            None => factory.load_skills()?,
        };
        let roster = match &config.roster_path {
            Some(path) => RosterLoader::load(path)?,
            None => factory.load_roster()?,
        };

        let mut skirmish = Self::new(jabs, skills, &roster, config.seed)?;
        if let Some(dir) = &config.save_dir {
            skirmish.restore_loadouts(dir)?;
        }
        Ok(skirmish)
    }

    pub fn new(
        jabs: JabsConfig,
        skills: SkillTable,
        roster: &[BattlerSpec],
        seed: Option<u64>,
    ) -> Result<Self> {
        let seed = seed.unwrap_or_else(rand::random);

        let mut builder = JabsRuntime::builder()
            .config(RuntimeConfig {
                jabs,
                seed: Some(seed),
            })
            .skills(skills.clone())
            .damage(SimDamage);

        let (mut allies, mut enemies) = (0, 0);
        for spec in roster {
            let x = if spec.kind.is_enemy() {
                enemies += 1;
                4 + enemies
            } else {
                allies += 1;
                -4 - allies
            };
            builder = builder.battler(SimBattler::from_spec(spec, x)?);
        }

        tracing::info!(allies, enemies, skills = skills.len(), "skirmish ready");

        Ok(Self {
            runtime: builder.build()?,
            engine: SimEngine::new(skills.clone()),
            skills,
            damage: SimDamage,
            crit_rng: PcgRng::new(seed.rotate_left(32)),
            summary: Summary::default(),
        })
    }

    pub fn runtime(&self) -> &JabsRuntime<SimBattler> {
        &self.runtime
    }

    /// Runs up to `frames` frames, stopping early once one side is wiped out.
    pub fn run(&mut self, frames: u64) -> Summary {
        self.retarget();

        for _ in 0..frames {
            self.step();
            if self.is_decided() {
                tracing::info!(frame = self.runtime.frame(), "skirmish decided");
                break;
            }
        }

        self.summary.frames = self.runtime.frame();
        self.summary.buzzers = self.engine.buzzers;
        self.summary.enemy_actions = self.engine.enemy_actions;
        self.summary.survivors = self
            .runtime
            .registry()
            .iter()
            .map(|b| (b.name.clone(), b.hp, b.max_hp))
            .collect();
        self.summary.clone()
    }

    /// One frame: movement and alerts, the combat sweep, then hits.
    pub fn step(&mut self) {
        for id in self.ids() {
            if let Some(battler) = self.runtime.battler_mut(id) {
                battler.alert.update();
                battler.character.step();
            }
        }

        self.engine.observe(self.runtime.registry().iter());
        let report = self.runtime.tick(&mut self.engine);
        self.summary.actions += report.actions;
        self.summary.cancelled += report.cancelled;

        for hit in self.engine.take_hits() {
            self.resolve_hit(hit);
        }

        self.remove_defeated();
        self.retarget();
    }

    // ========================================================================
    // Hit resolution
    // ========================================================================

    fn resolve_hit(&mut self, hit: PendingHit) {
        let Some(data) = self.skills.skill(hit.skill).cloned() else {
            tracing::warn!(user = %hit.user, skill = %hit.skill, "hit with unknown skill");
            return;
        };

        match data.role {
            SkillRole::Heal => self.resolve_heal(hit, &data),
            SkillRole::Guard => {
                self.queue_procs(hit, ProcTrigger::OnGuard, None);
            }
            SkillRole::Attack => self.resolve_attack(hit, &data),
            SkillRole::Dodge | SkillRole::Support => {}
        }
    }

    fn resolve_attack(&mut self, hit: PendingHit, data: &SkillData) {
        let Some(target_id) = hit.target else {
            return;
        };
        let critical = self.crit_rng.roll_percent(Self::CRIT_CHANCE);

        let (value, user_x) = {
            let (Some(user), Some(target)) =
                (self.runtime.battler(hit.user), self.runtime.battler(target_id))
            else {
                return;
            };
            if !user.is_alive() || !target.is_alive() {
                return;
            }
            (
                self.damage.make_damage_value(user, target, data, critical),
                user.character.x,
            )
        };
        if value <= 0 {
            return;
        }

        let Some(target) = self.runtime.battler_mut(target_id) else {
            return;
        };
        target.take_damage(value);
        let defeated = !target.is_alive();
        let target_x = target.character.x;
        let target_is_enemy = target.kind.is_enemy();

        self.summary.hits += 1;
        if critical {
            self.summary.crits += 1;
        }
        if hit.trigger.is_some() {
            self.summary.procs += 1;
        }
        tracing::debug!(
            user = %hit.user,
            target = %target_id,
            skill = %hit.skill,
            value,
            critical,
            user_x,
            "hit landed"
        );

        self.alert_around(target_id, target_x, target_is_enemy, hit.user);

        if hit.trigger.is_none() {
            self.queue_procs(hit, ProcTrigger::OnHit, Some(target_id));
        }
        if defeated {
            tracing::info!(user = %hit.user, target = %target_id, "battler defeated");
            self.queue_procs(hit, ProcTrigger::OnDefeat, None);
        }
    }

    /// Heals land on the most hurt battler of the user's side.
    fn resolve_heal(&mut self, hit: PendingHit, data: &SkillData) {
        let Some(user) = self.runtime.battler(hit.user) else {
            return;
        };
        let Some(patient) = self
            .runtime
            .registry()
            .iter()
            .filter(|b| b.is_alive() && !b.is_hostile_to(user))
            .min_by_key(|b| b.hp_rate())
        else {
            return;
        };

        let value = self.damage.make_damage_value(user, patient, data, false);
        let patient_id = patient.id;
        if let Some(patient) = self.runtime.battler_mut(patient_id) {
            patient.take_damage(value);
            tracing::debug!(user = %hit.user, patient = %patient_id, healed = -value, "heal landed");
        }
    }

    fn queue_procs(&mut self, hit: PendingHit, trigger: ProcTrigger, target: Option<BattlerId>) {
        let procs = match self.runtime.resolve_procs(hit.user, hit.skill, trigger) {
            Ok(procs) => procs,
            Err(err) => {
                tracing::debug!(user = %hit.user, %err, "no procs for departed battler");
                return;
            }
        };
        for skill in procs {
            self.engine.queue_proc(hit.user, target.or(hit.target), trigger, skill);
        }
    }

    /// Alerts the victim and its allies nearby, pointing them at `alerter`.
    fn alert_around(&mut self, victim: BattlerId, x: i32, victim_is_enemy: bool, alerter: BattlerId) {
        for id in self.ids() {
            let Some(battler) = self.runtime.battler_mut(id) else {
                continue;
            };
            let nearby = battler.kind.is_enemy() == victim_is_enemy
                && battler.character.distance_to(x) <= Self::ALERT_RADIUS;
            if id == victim || nearby {
                battler.alert.alert(Self::ALERT_FRAMES);
                battler.alerter = Some(alerter);
            }
        }
    }

    // ========================================================================
    // Bookkeeping
    // ========================================================================

    fn ids(&self) -> Vec<BattlerId> {
        self.runtime.registry().iter().map(|b| b.id).collect()
    }

    fn remove_defeated(&mut self) {
        let fallen: Vec<BattlerId> = self
            .runtime
            .registry()
            .iter()
            .filter(|b| !b.is_alive())
            .map(|b| b.id)
            .collect();

        for id in fallen {
            if let Some(battler) = self.runtime.remove(id) {
                self.summary.defeated.push(battler.name);
            }
        }
    }

    /// Enemies always hunt the nearest ally. Allies pick a new target only
    /// after losing the one they had; otherwise they wait to be alerted.
    fn retarget(&mut self) {
        let living: Vec<(BattlerId, bool, i32)> = self
            .runtime
            .registry()
            .iter()
            .filter(|b| b.is_alive())
            .map(|b| (b.id, b.kind.is_enemy(), b.character.x))
            .collect();

        for id in self.ids() {
            let Some(battler) = self.runtime.battler_mut(id) else {
                continue;
            };
            let needs_target = match battler.target {
                Some(target) => !living.iter().any(|(other, _, _)| *other == target),
                None => battler.kind.is_enemy(),
            };
            if !needs_target {
                continue;
            }

            let is_enemy = battler.kind.is_enemy();
            let x = battler.character.x;
            battler.target = living
                .iter()
                .filter(|(_, other_is_enemy, _)| *other_is_enemy != is_enemy)
                .min_by_key(|(_, _, other_x)| x.abs_diff(*other_x))
                .map(|(other, _, _)| *other);
        }
    }

    fn is_decided(&self) -> bool {
        let registry = self.runtime.registry();
        let allies = registry.iter().any(|b| !b.kind.is_enemy());
        let enemies = registry.iter().any(|b| b.kind.is_enemy());
        !(allies && enemies)
    }

    // ========================================================================
    // Loadouts
    // ========================================================================

    fn loadout_path(dir: &Path, id: BattlerId) -> PathBuf {
        dir.join(format!("battler-{}.loadout", id.0))
    }

    fn restore_loadouts(&mut self, dir: &Path) -> Result<()> {
        for id in self.ids() {
            let path = Self::loadout_path(dir, id);
            if path.exists() {
                self.runtime.restore_loadout_from(id, &path)?;
                tracing::info!(battler = %id, path = %path.display(), "restored loadout");
            }
        }
        Ok(())
    }

    /// Saves every surviving ally's loadout into `dir`.
    pub fn save_loadouts(&self, dir: Option<&Path>) -> Result<()> {
        let Some(dir) = dir else {
            return Ok(());
        };
        std::fs::create_dir_all(dir)?;

        for battler in self.runtime.registry().iter().filter(|b| b.kind.is_ally()) {
            let path = Self::loadout_path(dir, battler.id);
            self.runtime.save_loadout_to(battler.id, &path)?;
            tracing::info!(battler = %battler.id, path = %path.display(), "saved loadout");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> (JabsConfig, SkillTable, Vec<BattlerSpec>) {
        (
            ConfigLoader::parse(include_str!("../../data/config.toml")).unwrap(),
            SkillLoader::parse(include_str!("../../data/skills.ron")).unwrap(),
            RosterLoader::parse(include_str!("../../data/roster.ron")).unwrap(),
        )
    }

    fn skirmish(seed: u64) -> Skirmish {
        let (jabs, skills, roster) = content();
        Skirmish::new(jabs, skills, &roster, Some(seed)).unwrap()
    }

    #[test]
    fn same_seed_same_outcome() {
        let first = skirmish(7).run(400);
        let second = skirmish(7).run(400);
        assert_eq!(first, second);
        assert!(first.actions + first.enemy_actions > 0);
        assert!(first.hits > 0);
    }

    #[test]
    fn enemies_close_in_and_fight() {
        let mut skirmish = skirmish(11);
        let summary = skirmish.run(SimConfig::DEFAULT_FRAMES);

        assert!(summary.frames <= SimConfig::DEFAULT_FRAMES);
        assert!(summary.enemy_actions > 0);
        let standing = summary.survivors.len() + summary.defeated.len();
        assert_eq!(standing, content().2.len());
    }

    #[test]
    fn loadouts_round_trip_through_save_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut first = skirmish(3);
        first.run(60);
        first.save_loadouts(Some(dir.path())).unwrap();

        let saved: Vec<BattlerId> = first
            .runtime()
            .registry()
            .iter()
            .filter(|b| b.kind.is_ally())
            .map(|b| b.id)
            .collect();
        assert!(!saved.is_empty());

        let mut second = skirmish(3);
        second.restore_loadouts(dir.path()).unwrap();
        for id in saved {
            assert!(Skirmish::loadout_path(dir.path(), id).exists());
            let before = first.runtime().battler(id).unwrap().slots.all_slots().to_vec();
            let after = second.runtime().battler(id).unwrap().slots.all_slots().to_vec();
            assert_eq!(before, after);
        }
    }
}

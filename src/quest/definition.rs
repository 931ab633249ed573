//! Quest Definition Structures
//!
//! A [`QuestDefinition`] is assembled once through [`QuestBuilder`] and is
//! immutable afterwards. The builder enforces setup order: zones before the
//! conditions that test them, items and conditions before the steps and
//! branches that use them, steps before the stages and panels that list
//! them. Referencing anything that is not defined yet is a load error.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::error::{QuestError, QuestResult};
use crate::player::PlayerState;
use crate::skills::Skill;
use crate::world::{WorldPoint, Zone};

use super::item::ItemRequirement;
use super::panel::Panel;
use super::requirement::Requirement;
use super::reward::{ExperienceReward, QuestPointReward, Rewards, UnlockReward};
use super::step::{Branch, ConditionalStep, QuestStep, StepId, StepKind, StepTree};

/// A fully resolved quest definition
#[derive(Debug, Clone)]
pub struct QuestDefinition {
    pub id: String,
    pub name: String,
    steps: StepTree,
    stages: BTreeMap<u32, StepId>,
    required_items: Vec<ItemRequirement>,
    recommended_items: Vec<ItemRequirement>,
    general_requirements: Vec<Requirement>,
    combat_requirements: Vec<String>,
    rewards: Rewards,
    panels: Vec<Panel>,
}

impl QuestDefinition {
    /// Step (or conditional step) registered for a stage
    pub fn step(&self, stage: u32) -> Option<&QuestStep> {
        self.stages.get(&stage).map(|id| self.steps.get(*id))
    }

    /// Concrete step the player should see at `stage`
    pub fn resolve(&self, stage: u32, player: &dyn PlayerState) -> Option<&QuestStep> {
        let start = *self.stages.get(&stage)?;
        Some(self.steps.get(self.steps.resolve(start, player)))
    }

    pub fn step_by_key(&self, key: &str) -> Option<&QuestStep> {
        self.steps.id_of(key).map(|id| self.steps.get(id))
    }

    pub fn steps(&self) -> &StepTree {
        &self.steps
    }

    /// Stage numbers in ascending order
    pub fn stages(&self) -> impl Iterator<Item = u32> + '_ {
        self.stages.keys().copied()
    }

    pub(crate) fn stage_root(&self, stage: u32) -> Option<StepId> {
        self.stages.get(&stage).copied()
    }

    pub fn item_requirements(&self) -> &[ItemRequirement] {
        &self.required_items
    }

    pub fn recommended_items(&self) -> &[ItemRequirement] {
        &self.recommended_items
    }

    /// Skill, quest and combat prerequisites for starting the quest
    pub fn general_requirements(&self) -> &[Requirement] {
        &self.general_requirements
    }

    /// Enemies the player must defeat, as display strings
    pub fn combat_requirements(&self) -> &[String] {
        &self.combat_requirements
    }

    pub fn rewards(&self) -> &Rewards {
        &self.rewards
    }

    pub fn quest_point_reward(&self) -> Option<QuestPointReward> {
        self.rewards.quest_points
    }

    pub fn experience_rewards(&self) -> &[ExperienceReward] {
        &self.rewards.experience
    }

    pub fn unlock_rewards(&self) -> &[UnlockReward] {
        &self.rewards.unlocks
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Whether the player meets every general requirement
    pub fn can_start(&self, player: &dyn PlayerState) -> bool {
        self.general_requirements.iter().all(|r| r.is_satisfied(player))
    }
}

/// Assembles a [`QuestDefinition`] in setup order.
pub struct QuestBuilder {
    id: String,
    name: String,
    zones: HashMap<String, Zone>,
    items: HashMap<String, ItemRequirement>,
    conditions: HashMap<String, Requirement>,
    steps: StepTree,
    stages: BTreeMap<u32, StepId>,
    required_items: Vec<ItemRequirement>,
    recommended_items: Vec<ItemRequirement>,
    general_requirements: Vec<Requirement>,
    combat_requirements: Vec<String>,
    rewards: Rewards,
    panels: Vec<Panel>,
}

impl QuestBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            zones: HashMap::new(),
            items: HashMap::new(),
            conditions: HashMap::new(),
            steps: StepTree::default(),
            stages: BTreeMap::new(),
            required_items: Vec::new(),
            recommended_items: Vec::new(),
            general_requirements: Vec::new(),
            combat_requirements: Vec::new(),
            rewards: Rewards::default(),
            panels: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    fn duplicate(&self, kind: &'static str, key: &str) -> QuestError {
        QuestError::DuplicateKey {
            quest: self.id.clone(),
            kind,
            key: key.to_string(),
        }
    }

    fn item_ref(&self, key: &str) -> QuestResult<&ItemRequirement> {
        self.items.get(key).ok_or_else(|| QuestError::UnknownItem {
            quest: self.id.clone(),
            item: key.to_string(),
        })
    }

    fn step_ref(&self, key: &str) -> QuestResult<StepId> {
        self.steps.id_of(key).ok_or_else(|| QuestError::UnknownStep {
            quest: self.id.clone(),
            step: key.to_string(),
        })
    }

    // ---- zones ----

    pub fn zone(&mut self, key: &str, a: WorldPoint, b: WorldPoint) -> QuestResult<&mut Self> {
        if self.zones.contains_key(key) {
            return Err(self.duplicate("zone", key));
        }
        self.zones.insert(key.to_string(), Zone::new(a, b)?);
        Ok(self)
    }

    // ---- items ----

    pub fn item(&mut self, key: &str, item: ItemRequirement) -> QuestResult<&mut Self> {
        if self.items.contains_key(key) {
            return Err(self.duplicate("item", key));
        }
        self.items.insert(key.to_string(), item);
        Ok(self)
    }

    pub fn required_item(&mut self, key: &str) -> QuestResult<&mut Self> {
        let item = self.item_ref(key)?.clone();
        self.required_items.push(item);
        Ok(self)
    }

    pub fn recommended_item(&mut self, key: &str) -> QuestResult<&mut Self> {
        let item = self.item_ref(key)?.clone();
        self.recommended_items.push(item);
        Ok(self)
    }

    // ---- conditions ----

    pub fn condition(&mut self, key: &str, requirement: Requirement) -> QuestResult<&mut Self> {
        if self.conditions.contains_key(key) {
            return Err(self.duplicate("condition", key));
        }
        self.conditions.insert(key.to_string(), requirement);
        Ok(self)
    }

    /// Requirement for standing in a previously defined zone
    pub fn zone_requirement(&self, zone: &str) -> QuestResult<Requirement> {
        self.zones
            .get(zone)
            .map(|z| Requirement::Zone(*z))
            .ok_or_else(|| QuestError::UnknownZone {
                quest: self.id.clone(),
                zone: zone.to_string(),
            })
    }

    pub fn zone_condition(&mut self, key: &str, zone: &str) -> QuestResult<&mut Self> {
        let requirement = self.zone_requirement(zone)?;
        self.condition(key, requirement)
    }

    pub fn general_requirement(&mut self, requirement: Requirement) -> &mut Self {
        self.general_requirements.push(requirement);
        self
    }

    pub fn combat_requirement(&mut self, description: &str) -> &mut Self {
        self.combat_requirements.push(description.to_string());
        self
    }

    // ---- steps ----

    /// Register a concrete step under its own key
    pub fn step(&mut self, step: QuestStep) -> QuestResult<&mut Self> {
        if step.is_conditional() {
            return Err(QuestError::UnexpectedRouter {
                quest: self.id.clone(),
                step: step.key,
            });
        }
        if self.steps.id_of(&step.key).is_some() {
            return Err(self.duplicate("step", &step.key));
        }
        debug!("quest '{}': step '{}'", self.id, step.key);
        self.steps.insert(step);
        Ok(self)
    }

    /// Create a conditional step that falls back to `default`
    pub fn router(&mut self, key: &str, default: &str) -> QuestResult<&mut Self> {
        if self.steps.id_of(key).is_some() {
            return Err(self.duplicate("step", key));
        }
        let default = self.step_ref(default)?;
        self.steps.insert(QuestStep {
            key: key.to_string(),
            text: String::new(),
            dialogue: Vec::new(),
            extra_text: Vec::new(),
            kind: StepKind::Conditional(ConditionalStep::new(default)),
        });
        Ok(self)
    }

    /// Attach a note shown while this step (or anything below it) is active
    pub fn step_text(&mut self, key: &str, text: &str) -> QuestResult<&mut Self> {
        let id = self.step_ref(key)?;
        self.steps.get_mut(id).extra_text.push(text.to_string());
        Ok(self)
    }

    /// Append a branch; earlier branches take priority.
    pub fn branch(&mut self, router: &str, condition: &str, target: &str) -> QuestResult<&mut Self> {
        let router_id = self.step_ref(router)?;
        let target_id = self.step_ref(target)?;
        let requirement = self
            .conditions
            .get(condition)
            .cloned()
            .ok_or_else(|| QuestError::UnknownCondition {
                quest: self.id.clone(),
                condition: condition.to_string(),
            })?;

        if self.steps.reaches(target_id, router_id) {
            return Err(QuestError::CyclicRoute {
                quest: self.id.clone(),
                router: router.to_string(),
                target: target.to_string(),
            });
        }

        match &mut self.steps.get_mut(router_id).kind {
            StepKind::Conditional(conditional) => conditional.branches.push(Branch {
                condition: condition.to_string(),
                requirement,
                target: target_id,
            }),
            _ => {
                return Err(QuestError::NotARouter {
                    quest: self.id.clone(),
                    router: router.to_string(),
                });
            }
        }
        Ok(self)
    }

    // ---- stages, panels, rewards ----

    pub fn stage(&mut self, stage: u32, step: &str) -> QuestResult<&mut Self> {
        if self.stages.contains_key(&stage) {
            return Err(QuestError::DuplicateStage {
                quest: self.id.clone(),
                stage,
            });
        }
        let id = self.step_ref(step)?;
        self.stages.insert(stage, id);
        Ok(self)
    }

    pub fn panel(&mut self, header: &str, steps: &[&str], items: &[&str]) -> QuestResult<&mut Self> {
        let steps = steps
            .iter()
            .map(|key| self.step_ref(key))
            .collect::<QuestResult<Vec<_>>>()?;
        let items = items
            .iter()
            .map(|key| self.item_ref(key).cloned())
            .collect::<QuestResult<Vec<_>>>()?;

        self.panels.push(Panel {
            header: header.to_string(),
            steps,
            items,
        });
        Ok(self)
    }

    pub fn quest_points(&mut self, count: u32) -> &mut Self {
        self.rewards.quest_points = Some(QuestPointReward { count });
        self
    }

    pub fn experience(&mut self, skill: Skill, amount: u32) -> &mut Self {
        self.rewards.experience.push(ExperienceReward::new(skill, amount));
        self
    }

    pub fn unlock(&mut self, description: &str) -> &mut Self {
        self.rewards.unlocks.push(UnlockReward::new(description));
        self
    }

    pub fn build(self) -> QuestResult<QuestDefinition> {
        if self.stages.is_empty() {
            return Err(QuestError::MissingField {
                quest: self.id.clone(),
                entry: self.id,
                field: "stages",
            });
        }

        debug!(
            "quest '{}': {} steps over {} stages, {} panels",
            self.id,
            self.steps.len(),
            self.stages.len(),
            self.panels.len()
        );

        Ok(QuestDefinition {
            id: self.id,
            name: self.name,
            steps: self.steps,
            stages: self.stages,
            required_items: self.required_items,
            recommended_items: self.recommended_items,
            general_requirements: self.general_requirements,
            combat_requirements: self.combat_requirements,
            rewards: self.rewards,
            panels: self.panels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{NpcId, item};
    use crate::player::PlayerSnapshot;

    fn p(x: i32, y: i32) -> WorldPoint {
        WorldPoint::new(x, y, 0)
    }

    #[test]
    fn test_condition_before_zone_fails() {
        let mut b = QuestBuilder::new("q", "Q");
        let err = b.zone_condition("in_town", "town").err();
        assert!(matches!(err, Some(QuestError::UnknownZone { ref zone, .. }) if zone == "town"));
    }

    #[test]
    fn test_branch_to_undefined_step_fails() {
        let mut b = QuestBuilder::new("q", "Q");
        b.zone("town", p(0, 0), p(10, 10)).unwrap();
        b.zone_condition("in_town", "town").unwrap();
        b.step(QuestStep::tile("walk", p(1, 1), "Walk")).unwrap();
        b.router("route", "walk").unwrap();

        let err = b.branch("route", "in_town", "talk").err();
        assert!(matches!(err, Some(QuestError::UnknownStep { ref step, .. }) if step == "talk"));

        let err = b.branch("route", "in_castle", "walk").err();
        assert!(matches!(err, Some(QuestError::UnknownCondition { .. })));
    }

    #[test]
    fn test_router_without_default_fails() {
        let mut b = QuestBuilder::new("q", "Q");
        assert!(matches!(b.router("route", "missing"), Err(QuestError::UnknownStep { .. })));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let mut b = QuestBuilder::new("q", "Q");
        b.step(QuestStep::tile("walk", p(1, 1), "Walk")).unwrap();
        assert!(matches!(
            b.step(QuestStep::tile("walk", p(2, 2), "Again")),
            Err(QuestError::DuplicateKey { kind: "step", .. })
        ));

        b.stage(0, "walk").unwrap();
        assert!(matches!(b.stage(0, "walk"), Err(QuestError::DuplicateStage { stage: 0, .. })));

        b.item("coins", ItemRequirement::single("Coins", item::COINS)).unwrap();
        assert!(matches!(
            b.item("coins", ItemRequirement::single("Coins", item::COINS)),
            Err(QuestError::DuplicateKey { kind: "item", .. })
        ));
    }

    #[test]
    fn test_cyclic_branch_rejected() {
        let mut b = QuestBuilder::new("q", "Q");
        b.zone("z", p(0, 0), p(5, 5)).unwrap();
        b.zone_condition("in_z", "z").unwrap();
        b.step(QuestStep::tile("walk", p(1, 1), "Walk")).unwrap();
        b.router("outer", "walk").unwrap();
        b.router("inner", "outer").unwrap();

        let err = b.branch("outer", "in_z", "inner").err();
        assert!(matches!(err, Some(QuestError::CyclicRoute { .. })));

        let err = b.branch("outer", "in_z", "outer").err();
        assert!(matches!(err, Some(QuestError::CyclicRoute { .. })));
    }

    #[test]
    fn test_branch_on_leaf_rejected() {
        let mut b = QuestBuilder::new("q", "Q");
        b.zone("z", p(0, 0), p(5, 5)).unwrap();
        b.zone_condition("in_z", "z").unwrap();
        b.step(QuestStep::tile("walk", p(1, 1), "Walk")).unwrap();
        b.step(QuestStep::tile("run", p(2, 2), "Run")).unwrap();

        assert!(matches!(b.branch("walk", "in_z", "run"), Err(QuestError::NotARouter { .. })));
    }

    #[test]
    fn test_build_requires_stages() {
        let b = QuestBuilder::new("q", "Q");
        assert!(matches!(b.build(), Err(QuestError::MissingField { field: "stages", .. })));
    }

    #[test]
    fn test_resolve_through_stage() {
        let mut b = QuestBuilder::new("q", "Q");
        b.zone("hut", p(0, 0), p(3, 3)).unwrap();
        b.zone_condition("in_hut", "hut").unwrap();
        b.step(QuestStep::tile("walk", p(1, 1), "Walk to the hut")).unwrap();
        b.step(QuestStep::npc("talk", NpcId(1), "Talk to the hermit")).unwrap();
        b.router("visit", "walk").unwrap();
        b.branch("visit", "in_hut", "talk").unwrap();
        b.stage(3, "visit").unwrap();
        let quest = b.build().unwrap();

        let inside = PlayerSnapshot::at(p(2, 2));
        let outside = PlayerSnapshot::at(p(20, 20));
        assert_eq!(quest.resolve(3, &inside).map(|s| s.key.as_str()), Some("talk"));
        assert_eq!(quest.resolve(3, &outside).map(|s| s.key.as_str()), Some("walk"));
        assert!(quest.resolve(4, &inside).is_none());
        assert!(quest.step(3).is_some_and(|s| s.is_conditional()));
    }

    #[test]
    fn test_can_start() {
        let mut b = QuestBuilder::new("q", "Q");
        b.step(QuestStep::tile("walk", p(1, 1), "Walk")).unwrap();
        b.stage(0, "walk").unwrap();
        b.general_requirement(Requirement::skill(Skill::Agility, 38, false));
        b.general_requirement(Requirement::CombatLevel(65));
        let quest = b.build().unwrap();

        let mut player = PlayerSnapshot::default().with_skill(Skill::Agility, 40);
        assert!(!quest.can_start(&player));
        player.combat_level = Some(70);
        assert!(quest.can_start(&player));
    }
}

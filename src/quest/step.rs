//! Quest Steps
//!
//! Concrete instructions (talk to an NPC, use an object, walk to a tile) and
//! conditional steps that pick one of them based on player state. All steps
//! of a quest live in a [`StepTree`] arena and refer to each other by
//! [`StepId`], so nested conditional steps never form ownership cycles.

use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

use crate::ids::{NpcId, ObjectId};
use crate::player::PlayerState;
use crate::world::WorldPoint;

use super::requirement::Requirement;

/// Index of a step inside its quest's [`StepTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StepId(pub(crate) usize);

/// What the player is being asked to interact with.
#[derive(Debug, Clone, PartialEq)]
pub enum StepKind {
    Npc {
        npc: NpcId,
        location: Option<WorldPoint>,
    },
    Object {
        object: ObjectId,
        location: WorldPoint,
    },
    Tile {
        location: WorldPoint,
    },
    Conditional(ConditionalStep),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// Key of the condition, kept for logs and debugging
    pub condition: String,
    pub requirement: Requirement,
    pub target: StepId,
}

/// Ordered branches plus a fallback. The first satisfied branch wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalStep {
    pub default: StepId,
    pub branches: Vec<Branch>,
}

impl ConditionalStep {
    pub fn new(default: StepId) -> Self {
        Self {
            default,
            branches: Vec::new(),
        }
    }

    /// Pick the next step. Branches are evaluated lazily in declared order.
    pub fn select(&self, player: &dyn PlayerState) -> StepId {
        self.branches
            .iter()
            .find(|branch| branch.requirement.is_satisfied(player))
            .map(|branch| {
                trace!("condition '{}' matched", branch.condition);
                branch.target
            })
            .unwrap_or(self.default)
    }

    /// Direct children: every branch target, then the default.
    pub fn children(&self) -> impl Iterator<Item = StepId> + '_ {
        self.branches
            .iter()
            .map(|b| b.target)
            .chain(std::iter::once(self.default))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestStep {
    pub key: String,
    pub text: String,
    /// Dialogue options to pick, in order
    pub dialogue: Vec<String>,
    /// Additional notes shown under the main text
    pub extra_text: Vec<String>,
    pub kind: StepKind,
}

impl QuestStep {
    fn leaf(key: &str, text: &str, kind: StepKind) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
            dialogue: Vec::new(),
            extra_text: Vec::new(),
            kind,
        }
    }

    pub fn npc(key: &str, npc: NpcId, text: &str) -> Self {
        Self::leaf(key, text, StepKind::Npc { npc, location: None })
    }

    pub fn npc_at(key: &str, npc: NpcId, location: WorldPoint, text: &str) -> Self {
        Self::leaf(
            key,
            text,
            StepKind::Npc {
                npc,
                location: Some(location),
            },
        )
    }

    pub fn object(key: &str, object: ObjectId, location: WorldPoint, text: &str) -> Self {
        Self::leaf(key, text, StepKind::Object { object, location })
    }

    pub fn tile(key: &str, location: WorldPoint, text: &str) -> Self {
        Self::leaf(key, text, StepKind::Tile { location })
    }

    pub fn with_dialogue<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.dialogue.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.extra_text.push(text.to_string());
        self
    }

    pub fn is_conditional(&self) -> bool {
        matches!(self.kind, StepKind::Conditional(_))
    }

    pub fn location(&self) -> Option<WorldPoint> {
        match &self.kind {
            StepKind::Npc { location, .. } => *location,
            StepKind::Object { location, .. } | StepKind::Tile { location } => Some(*location),
            StepKind::Conditional(_) => None,
        }
    }
}

/// Arena holding every step of a quest.
///
/// Only [`super::QuestBuilder`] inserts into it, and it only accepts
/// references to steps that already exist, so the graph is acyclic.
#[derive(Debug, Clone, Default)]
pub struct StepTree {
    nodes: Vec<QuestStep>,
    by_key: HashMap<String, StepId>,
}

impl StepTree {
    pub(crate) fn insert(&mut self, step: QuestStep) -> StepId {
        let id = StepId(self.nodes.len());
        self.by_key.insert(step.key.clone(), id);
        self.nodes.push(step);
        id
    }

    pub(crate) fn get_mut(&mut self, id: StepId) -> &mut QuestStep {
        &mut self.nodes[id.0]
    }

    pub fn get(&self, id: StepId) -> &QuestStep {
        &self.nodes[id.0]
    }

    pub fn id_of(&self, key: &str) -> Option<StepId> {
        self.by_key.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StepId, &QuestStep)> {
        self.nodes.iter().enumerate().map(|(i, step)| (StepId(i), step))
    }

    /// Follow conditional steps from `start` down to a concrete step.
    pub fn resolve(&self, start: StepId, player: &dyn PlayerState) -> StepId {
        let mut current = start;
        while let StepKind::Conditional(router) = &self.get(current).kind {
            current = router.select(player);
        }
        current
    }

    /// Like [`StepTree::resolve`], but returns every step visited with the
    /// concrete step last.
    pub fn resolve_path(&self, start: StepId, player: &dyn PlayerState) -> Vec<StepId> {
        let mut path = vec![start];
        let mut current = start;
        while let StepKind::Conditional(router) = &self.get(current).kind {
            current = router.select(player);
            path.push(current);
        }
        path
    }

    /// Whether `to` is reachable from `from` by following branches.
    pub fn reaches(&self, from: StepId, to: StepId) -> bool {
        let mut pending = vec![from];
        let mut seen = vec![false; self.nodes.len()];
        while let Some(id) = pending.pop() {
            if id == to {
                return true;
            }
            if std::mem::replace(&mut seen[id.0], true) {
                continue;
            }
            if let StepKind::Conditional(router) = &self.get(id).kind {
                pending.extend(router.children());
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerSnapshot;
    use crate::world::Zone;

    fn zone(a: (i32, i32), b: (i32, i32)) -> Requirement {
        Requirement::Zone(
            Zone::new(WorldPoint::new(a.0, a.1, 0), WorldPoint::new(b.0, b.1, 0)).unwrap(),
        )
    }

    fn router_over(tree: &mut StepTree, default: StepId, branches: Vec<(&str, Requirement, StepId)>) -> StepId {
        let mut router = ConditionalStep::new(default);
        router.branches = branches
            .into_iter()
            .map(|(condition, requirement, target)| Branch {
                condition: condition.to_string(),
                requirement,
                target,
            })
            .collect();
        tree.insert(QuestStep {
            key: format!("router_{}", tree.len()),
            text: String::new(),
            dialogue: Vec::new(),
            extra_text: Vec::new(),
            kind: StepKind::Conditional(router),
        })
    }

    #[test]
    fn test_first_matching_branch_wins() {
        let mut tree = StepTree::default();
        let fallback = tree.insert(QuestStep::tile("fallback", WorldPoint::new(0, 0, 0), "Walk"));
        let first = tree.insert(QuestStep::tile("first", WorldPoint::new(1, 1, 0), "First"));
        let second = tree.insert(QuestStep::tile("second", WorldPoint::new(2, 2, 0), "Second"));
        let router = router_over(
            &mut tree,
            fallback,
            vec![
                ("wide", zone((0, 0), (100, 100)), first),
                ("narrow", zone((40, 40), (60, 60)), second),
            ],
        );

        let overlap = PlayerSnapshot::at(WorldPoint::new(50, 50, 0));
        assert_eq!(tree.resolve(router, &overlap), first);

        let outside = PlayerSnapshot::at(WorldPoint::new(500, 500, 0));
        assert_eq!(tree.resolve(router, &outside), fallback);
    }

    #[test]
    fn test_nested_routers_resolve_to_leaf() {
        let mut tree = StepTree::default();
        let outer_default = tree.insert(QuestStep::tile("outer", WorldPoint::new(0, 0, 0), "Outer"));
        let inner_default = tree.insert(QuestStep::tile("inner", WorldPoint::new(0, 0, 0), "Inner"));
        let deep = tree.insert(QuestStep::tile("deep", WorldPoint::new(0, 0, 0), "Deep"));
        let inner = router_over(&mut tree, inner_default, vec![("small", zone((0, 0), (5, 5)), deep)]);
        let outer = router_over(&mut tree, outer_default, vec![("big", zone((0, 0), (50, 50)), inner)]);

        let player = PlayerSnapshot::at(WorldPoint::new(3, 3, 0));
        assert_eq!(tree.resolve(outer, &player), deep);
        assert_eq!(tree.resolve_path(outer, &player), vec![outer, inner, deep]);

        let player = PlayerSnapshot::at(WorldPoint::new(30, 30, 0));
        assert_eq!(tree.resolve(outer, &player), inner_default);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut tree = StepTree::default();
        let fallback = tree.insert(QuestStep::tile("fallback", WorldPoint::new(0, 0, 0), "Walk"));
        let target = tree.insert(QuestStep::tile("target", WorldPoint::new(0, 0, 0), "Go"));
        let router = router_over(&mut tree, fallback, vec![("zone", zone((0, 0), (9, 9)), target)]);

        let player = PlayerSnapshot::at(WorldPoint::new(1, 1, 0));
        let first = tree.resolve(router, &player);
        let second = tree.resolve(router, &player);
        assert_eq!(first, second);
        assert!(std::ptr::eq(tree.get(first), tree.get(second)));
    }

    #[test]
    fn test_reaches() {
        let mut tree = StepTree::default();
        let leaf = tree.insert(QuestStep::tile("leaf", WorldPoint::new(0, 0, 0), "Leaf"));
        let other = tree.insert(QuestStep::tile("other", WorldPoint::new(0, 0, 0), "Other"));
        let router = router_over(&mut tree, leaf, vec![]);

        assert!(tree.reaches(router, leaf));
        assert!(!tree.reaches(router, other));
        assert!(!tree.reaches(leaf, router));
    }
}

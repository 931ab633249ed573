//! Land of the Goblins
//!
//! Grubfoot has been having strange dreams. Escort him through Dorgesh-Kaan
//! to Zanik, then sneak into the goblin temple below the Fishing Guild.

use crate::error::QuestResult;
use crate::ids::{collections, item, npc, object};
use crate::quest::{ItemRequirement, QuestBuilder, QuestDefinition, QuestStep, Requirement};
use crate::skills::Skill;
use crate::world::WorldPoint;

pub const QUEST_ID: &str = "land_of_the_goblins";

pub fn build() -> QuestResult<QuestDefinition> {
    let mut quest = QuestBuilder::new(QUEST_ID, "Land of the Goblins");

    load_zones(&mut quest)?;
    setup_items(&mut quest)?;
    setup_conditions(&mut quest)?;
    setup_steps(&mut quest)?;

    quest.stage(0, "talk_to_grubfoot")?;

    quest
        .router("grubs_dream", "enter_the_city")?
        .branch("grubs_dream", "in_dorgeshuun", "talk_to_zanik")?;
    quest.stage(1, "grubs_dream")?;

    quest.router("imposter_goblin", "head_to_the_temple")?.step_text(
        "imposter_goblin",
        "Make sure you have enough inventory space to unequip all of your items.",
    )?;
    // The guard branch is attached to the stage 1 router, after the Zanik
    // branch, so it only wins below the Fishing Guild.
    quest.branch("grubs_dream", "in_below_fishing_guild", "talk_to_the_guard")?;
    quest.stage(2, "imposter_goblin")?;

    setup_requirements(&mut quest);
    setup_rewards(&mut quest);
    setup_panels(&mut quest)?;

    quest.build()
}

fn load_zones(quest: &mut QuestBuilder) -> QuestResult<()> {
    quest
        .zone(
            "dorgeshaan",
            WorldPoint::new(2749, 5374, 0),
            WorldPoint::new(2688, 5281, 0),
        )?
        .zone(
            "below_fishing_guild",
            WorldPoint::new(2623, 9791, 0),
            WorldPoint::new(2560, 9854, 0),
        )?;
    Ok(())
}

fn setup_items(quest: &mut QuestBuilder) -> QuestResult<()> {
    quest
        .item(
            "light_source",
            ItemRequirement::new("A light source", collections::light_sources()),
        )?
        .item(
            "toadflax_potion_unf",
            ItemRequirement::single("Toadflax potion (unf)", item::TOADFLAX_POTION_UNF),
        )?
        .item(
            "goblin_mail",
            ItemRequirement::single("Goblin Mail", item::GOBLIN_MAIL).obtainable_during_quest(),
        )?
        .item("yellow_dye", ItemRequirement::single("Yellow dye", item::YELLOW_DYE))?
        .item("blue_dye", ItemRequirement::single("Blue dye", item::BLUE_DYE))?
        .item("orange_dye", ItemRequirement::single("Orange dye", item::ORANGE_DYE))?
        .item("purple_dye", ItemRequirement::single("Purple dye", item::PURPLE_DYE))?
        .item(
            "black_dye",
            ItemRequirement::single("Black dye", item::BLACK_DYE).with_tooltip(
                "An empty vial and a pestle and mortar if making the black dye during the quest",
            ),
        )?
        .item("fishing_rod", ItemRequirement::single("Fishing rod", item::FISHING_ROD))?
        .item("raw_slimy_eel", ItemRequirement::single("Raw slimy eel", item::RAW_SLIMY_EEL))?
        .item(
            "coins",
            ItemRequirement::single("Coins", item::COINS).with_quantity(5)?,
        )?
        .item(
            "combat_gear",
            ItemRequirement::display_only("Combat gear and food").with_display_icon(item::ARMOUR_ICON),
        )?;

    quest
        .item(
            "tinderbox",
            ItemRequirement::single("Tinderbox", item::TINDERBOX)
                .with_tooltip("Only if not using a non-extinguishable light source"),
        )?
        .item(
            "dorgeshkaan_spheres",
            ItemRequirement::single("Dorgesh-kaan Spheres", item::DORGESHKAAN_SPHERE)
                .with_quantity(2)?
                .obtainable_during_quest(),
        )?
        .item(
            "fairy_ring_items",
            ItemRequirement::new("Dramen or lunar staff", collections::fairy_staff()),
        )?
        .item(
            "skills_necklace",
            ItemRequirement::new("Skills Necklace", collections::skills_necklaces()),
        )?
        .item(
            "combat_necklace",
            ItemRequirement::new("Combat Necklace", collections::combat_bracelets()),
        )?
        .item(
            "tele_lumbridge",
            ItemRequirement::single("Teleports to Lumbridge.", item::LUMBRIDGE_TELEPORT),
        )?
        .item(
            "tele_draynor",
            ItemRequirement::new("Teleports to Draynor Village", collections::amulets_of_glory()),
        )?
        .item(
            "explorers_ring",
            ItemRequirement::single("Explorers Ring (3) or above.", item::EXPLORERS_RING_3)
                .with_alternates([item::EXPLORERS_RING_4]),
        )?
        .item(
            "salve_amulet",
            ItemRequirement::single(
                "Salve Amulet(e) or normal Salve Amulet will also work.",
                item::SALVE_AMULET_E,
            )
            .with_alternates([item::SALVE_AMULET]),
        )?;

    for key in [
        "light_source",
        "toadflax_potion_unf",
        "goblin_mail",
        "yellow_dye",
        "blue_dye",
        "orange_dye",
        "purple_dye",
        "black_dye",
        "fishing_rod",
        "raw_slimy_eel",
        "coins",
        "combat_gear",
    ] {
        quest.required_item(key)?;
    }

    for key in [
        "tinderbox",
        "dorgeshkaan_spheres",
        "fairy_ring_items",
        "skills_necklace",
        "combat_necklace",
        "tele_lumbridge",
        "tele_draynor",
        "explorers_ring",
        "salve_amulet",
    ] {
        quest.recommended_item(key)?;
    }

    Ok(())
}

fn setup_conditions(quest: &mut QuestBuilder) -> QuestResult<()> {
    quest
        .zone_condition("in_dorgeshuun", "dorgeshaan")?
        .zone_condition("in_below_fishing_guild", "below_fishing_guild")?;
    Ok(())
}

fn setup_steps(quest: &mut QuestBuilder) -> QuestResult<()> {
    quest.step(
        QuestStep::npc(
            "talk_to_grubfoot",
            npc::GRUBFOOT_11255,
            "Talk to Grubfoot in Dorgeshuun Mines to start the quest.",
        )
        .with_dialogue(["Yes."]),
    )?;

    quest.step(QuestStep::object(
        "enter_the_city",
        object::DOOR_6919,
        WorldPoint::new(3317, 9601, 0),
        "Enter the city of Dorgeshuun.",
    ))?;

    quest.step(
        QuestStep::npc_at(
            "talk_to_zanik",
            npc::ZANIK_11260,
            WorldPoint::new(2705, 5363, 0),
            "Take Grubfoot to Zanik, who can be found in Oldak's workshop in the north-west corner of the city.",
        )
        .with_dialogue([
            "SO why have you come to talk to Zanik?",
            "What was this new dream?",
            "It's just a dream. It doesnt mean anything.",
            "I'm ready.",
        ]),
    )?;

    quest.step(
        QuestStep::tile(
            "head_to_the_temple",
            WorldPoint::new(2581, 9849, 0),
            "Head northwest to the temple entrance stairs blocked by two goblin guards.",
        )
        .with_text("Pick a black mushroom if you don't already have black dye."),
    )?;

    quest.step(QuestStep::npc(
        "talk_to_the_guard",
        npc::GOBLIN_GUARD_11314,
        "Talk to the guards for Zanik to pass.",
    ))?;

    Ok(())
}

fn setup_requirements(quest: &mut QuestBuilder) {
    quest
        .general_requirement(Requirement::skill(Skill::Agility, 38, false))
        .general_requirement(Requirement::skill(Skill::Fishing, 40, false))
        .general_requirement(Requirement::skill(Skill::Thieving, 45, false))
        .general_requirement(Requirement::skill(Skill::Herblore, 48, false))
        .general_requirement(Requirement::quest_finished("another_slice_of_ham", "Another Slice of H.A.M."))
        .general_requirement(Requirement::quest_finished("death_to_the_dorgeshuun", "Death to the Dorgeshuun"))
        .general_requirement(Requirement::quest_finished("the_lost_tribe", "The Lost Tribe"))
        .general_requirement(Requirement::quest_finished("goblin_diplomacy", "Goblin Diplomacy"))
        .general_requirement(Requirement::quest_finished("rune_mysteries", "Rune Mysteries"))
        .general_requirement(Requirement::quest_finished("the_giant_dwarf", "The Giant Dwarf"))
        .general_requirement(Requirement::quest_finished("the_dig_site", "The Dig Site"))
        .general_requirement(Requirement::quest_finished("fishing_contest", "Fishing Contest"))
        .general_requirement(Requirement::CombatLevel(65));

    quest
        .combat_requirement("Snothead (level 32)")
        .combat_requirement("Snailfeet (level 56)")
        .combat_requirement("Snailfeet (level 56)")
        .combat_requirement("Redeyes (level 121)")
        .combat_requirement("Strongbones (level 184)");
}

fn setup_rewards(quest: &mut QuestBuilder) {
    quest
        .quest_points(2)
        .experience(Skill::Agility, 8000)
        .experience(Skill::Fishing, 8000)
        .experience(Skill::Thieving, 8000)
        .experience(Skill::Herblore, 8000)
        .unlock("Access to the Goblin Temple (with an altar to recharge prayer points)")
        .unlock("Access to Yu'biusk, using fairy ring code blq")
        .unlock("Ability to purchase Plain of mud spheres that transports you to the Goblin Cave")
        .unlock("Ability to make goblin potions.");
}

fn setup_panels(quest: &mut QuestBuilder) -> QuestResult<()> {
    quest
        .panel("Starting off", &["talk_to_grubfoot"], &[])?
        .panel("Grubfoot's dream", &["enter_the_city", "talk_to_zanik"], &[])?
        .panel(
            "Impostor Among Goblins",
            &["head_to_the_temple"],
            &["toadflax_potion_unf", "skills_necklace"],
        )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{PlayerSnapshot, QuestState};

    fn quest() -> QuestDefinition {
        build().unwrap()
    }

    fn resolved_key(quest: &QuestDefinition, stage: u32, player: &PlayerSnapshot) -> String {
        quest.resolve(stage, player).unwrap().key.clone()
    }

    #[test]
    fn test_stage_zero_is_grubfoot() {
        let quest = quest();
        let player = PlayerSnapshot::at(WorldPoint::new(0, 0, 0));
        assert_eq!(resolved_key(&quest, 0, &player), "talk_to_grubfoot");
        assert_eq!(quest.step(0).unwrap().dialogue, vec!["Yes."]);
    }

    #[test]
    fn test_inside_dorgeshaan_talks_to_zanik() {
        let quest = quest();
        let player = PlayerSnapshot::at(WorldPoint::new(2700, 5350, 0));
        assert_eq!(resolved_key(&quest, 1, &player), "talk_to_zanik");
    }

    #[test]
    fn test_outside_all_zones_enters_city() {
        let quest = quest();
        let player = PlayerSnapshot::at(WorldPoint::new(0, 0, 0));
        assert_eq!(resolved_key(&quest, 1, &player), "enter_the_city");

        // Unknown location behaves like being outside every zone
        assert_eq!(resolved_key(&quest, 1, &PlayerSnapshot::default()), "enter_the_city");
    }

    #[test]
    fn test_zone_corners_are_inclusive() {
        let quest = quest();
        for corner in [WorldPoint::new(2749, 5374, 0), WorldPoint::new(2688, 5281, 0)] {
            assert_eq!(resolved_key(&quest, 1, &PlayerSnapshot::at(corner)), "talk_to_zanik");
        }
        let upstairs = PlayerSnapshot::at(WorldPoint::new(2700, 5350, 1));
        assert_eq!(resolved_key(&quest, 1, &upstairs), "enter_the_city");
    }

    #[test]
    fn test_guard_branch_lives_on_stage_one() {
        let quest = quest();
        let below_guild = PlayerSnapshot::at(WorldPoint::new(2600, 9800, 0));
        assert_eq!(resolved_key(&quest, 1, &below_guild), "talk_to_the_guard");
        assert_eq!(resolved_key(&quest, 2, &below_guild), "head_to_the_temple");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let quest = quest();
        let player = PlayerSnapshot::at(WorldPoint::new(2700, 5350, 0));
        let first = quest.resolve(1, &player).unwrap();
        let second = quest.resolve(1, &player).unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_explorers_ring_accepts_either_ring() {
        let quest = quest();
        let ring = quest
            .recommended_items()
            .iter()
            .find(|i| i.name.starts_with("Explorers Ring (3)"))
            .unwrap();

        assert!(ring.is_satisfied(&PlayerSnapshot::default().with_item(item::EXPLORERS_RING_3, 1)));
        assert!(ring.is_satisfied(&PlayerSnapshot::default().with_item(item::EXPLORERS_RING_4, 1)));
        assert!(!ring.is_satisfied(&PlayerSnapshot::default()));
    }

    #[test]
    fn test_experience_rewards() {
        let quest = quest();
        let rewards: Vec<(Skill, u32)> = quest
            .experience_rewards()
            .iter()
            .map(|r| (r.skill, r.amount))
            .collect();
        assert_eq!(
            rewards,
            vec![
                (Skill::Agility, 8000),
                (Skill::Fishing, 8000),
                (Skill::Thieving, 8000),
                (Skill::Herblore, 8000),
            ]
        );
        assert_eq!(quest.quest_point_reward().map(|r| r.count), Some(2));
        assert_eq!(quest.unlock_rewards().len(), 4);
    }

    #[test]
    fn test_item_lists_keep_authoring_order() {
        let quest = quest();
        let required: Vec<&str> = quest.item_requirements().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(required.len(), 12);
        assert_eq!(required[0], "A light source");
        assert_eq!(required[11], "Combat gear and food");
        assert_eq!(quest.recommended_items().len(), 9);
        assert_eq!(quest.combat_requirements().len(), 5);
    }

    #[test]
    fn test_panels() {
        let quest = quest();
        let headers: Vec<&str> = quest.panels().iter().map(|p| p.header.as_str()).collect();
        assert_eq!(headers, vec!["Starting off", "Grubfoot's dream", "Impostor Among Goblins"]);

        let impostor = &quest.panels()[2];
        assert_eq!(impostor.items.len(), 2);
        assert_eq!(impostor.items[0].name, "Toadflax potion (unf)");
    }

    #[test]
    fn test_can_start() {
        let quest = quest();
        let mut player = PlayerSnapshot::default()
            .with_skill(Skill::Agility, 38)
            .with_skill(Skill::Fishing, 40)
            .with_skill(Skill::Thieving, 45)
            .with_skill(Skill::Herblore, 48);
        player.combat_level = Some(65);
        for quest_id in [
            "another_slice_of_ham",
            "death_to_the_dorgeshuun",
            "the_lost_tribe",
            "goblin_diplomacy",
            "rune_mysteries",
            "the_giant_dwarf",
            "the_dig_site",
        ] {
            player = player.with_quest(quest_id, QuestState::Finished);
        }
        assert!(!quest.can_start(&player));

        player = player.with_quest("fishing_contest", QuestState::Finished);
        assert!(quest.can_start(&player));
    }

    #[test]
    fn test_guidance_marks_active_step() {
        let quest = quest();
        let player = PlayerSnapshot::at(WorldPoint::new(2700, 5350, 0)).with_item(item::COINS, 5);
        let guidance = quest.guidance(1, &player);

        let active = guidance.active_step.as_ref().unwrap();
        assert_eq!(active.key, "talk_to_zanik");
        assert_eq!(active.dialogue.len(), 4);

        let dream = &guidance.panels[1];
        assert!(!dream.steps[0].active);
        assert!(dream.steps[1].active);

        let coins = guidance.required_items.iter().find(|i| i.name == "Coins").unwrap();
        assert!(coins.satisfied);

        let text = guidance.to_string();
        assert!(text.contains("> Take Grubfoot to Zanik"));
        assert!(text.contains("[x] Coins x5"));
    }

    #[test]
    fn test_guidance_collects_router_notes() {
        let quest = quest();
        let guidance = quest.guidance(2, &PlayerSnapshot::default());
        let active = guidance.active_step.unwrap();

        assert_eq!(active.key, "head_to_the_temple");
        assert_eq!(
            active.notes,
            vec![
                "Make sure you have enough inventory space to unequip all of your items.",
                "Pick a black mushroom if you don't already have black dye.",
            ]
        );
    }

    #[test]
    fn test_guidance_unknown_stage() {
        let quest = quest();
        let guidance = quest.guidance(99, &PlayerSnapshot::default());
        assert!(guidance.active_step.is_none());
        assert_eq!(guidance.panels.len(), 3);
        assert!(guidance.panels.iter().all(|p| p.steps.iter().all(|s| !s.active)));
    }

    #[test]
    fn test_data_file_matches_builtin() {
        let from_file = crate::quest::parse_quest(
            include_str!("../../data/quests/land_of_the_goblins.toml"),
            std::path::Path::new("land_of_the_goblins.toml"),
        )
        .unwrap();
        let builtin = quest();

        assert_eq!(from_file.id, builtin.id);
        assert_eq!(from_file.name, builtin.name);
        assert_eq!(from_file.stages().collect::<Vec<_>>(), builtin.stages().collect::<Vec<_>>());
        assert_eq!(from_file.steps().len(), builtin.steps().len());
        for ((_, a), (_, b)) in from_file.steps().iter().zip(builtin.steps().iter()) {
            assert_eq!(a, b);
        }
        assert_eq!(from_file.item_requirements(), builtin.item_requirements());
        assert_eq!(from_file.recommended_items(), builtin.recommended_items());
        assert_eq!(from_file.general_requirements(), builtin.general_requirements());
        assert_eq!(from_file.combat_requirements(), builtin.combat_requirements());
        assert_eq!(from_file.rewards(), builtin.rewards());
        assert_eq!(from_file.panels(), builtin.panels());
    }

    #[test]
    fn test_guidance_serializes_to_json() {
        let quest = quest();
        let guidance = quest.guidance(0, &PlayerSnapshot::default());
        let json = serde_json::to_value(&guidance).unwrap();

        assert_eq!(json["quest_id"], QUEST_ID);
        assert_eq!(json["active_step"]["target"]["type"], "npc");
        assert_eq!(json["active_step"]["target"]["npc"], 11255);
    }

    #[test]
    fn test_guidance_item_icons() {
        let quest = quest();
        let guidance = quest.guidance(0, &PlayerSnapshot::default());

        let gear = guidance
            .required_items
            .iter()
            .find(|i| i.name == "Combat gear and food")
            .unwrap();
        assert_eq!(gear.icon, Some(item::ARMOUR_ICON));
        assert!(gear.ids.is_empty());

        let ring = guidance
            .recommended_items
            .iter()
            .find(|i| i.name == "Explorers Ring (3) or above.")
            .unwrap();
        assert_eq!(ring.icon, Some(item::EXPLORERS_RING_3));
        assert_eq!(ring.ids, vec![item::EXPLORERS_RING_3, item::EXPLORERS_RING_4]);

        let json = serde_json::to_value(&guidance).unwrap();
        assert_eq!(json["required_items"][11]["icon"], 1127);
    }
}

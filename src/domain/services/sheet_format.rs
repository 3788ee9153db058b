//! Character sheet summary shown by `/character show`

use crate::domain::entities::Investigator;
use crate::domain::services::roll_format::capitalize;

/// Skills listed on the summary, in display order, when present on the sheet
const KEY_SKILLS: &[&str] = &[
    "spot hidden",
    "listen",
    "psychology",
    "library use",
    "first aid",
    "dodge",
    "fighting (brawl)",
    "firearms (handgun)",
];

/// Equipment items listed before the rest are elided
const EQUIPMENT_PREVIEW: usize = 3;

pub fn format_character_sheet(investigator: &Investigator) -> String {
    let c = &investigator.characteristics;
    let mut output = format!(
        "📜 **{}** ({}, Age {})\n\n",
        investigator.name, investigator.occupation, investigator.age
    );

    output.push_str("**Characteristics:**\n");
    output.push_str(&format!(
        "STR: {} | DEX: {} | INT: {} | CON: {}\n",
        c.strength, c.dexterity, c.intelligence, c.constitution
    ));
    output.push_str(&format!(
        "APP: {} | POW: {} | SIZ: {} | EDU: {}\n\n",
        c.appearance, c.power, c.size, c.education
    ));

    output.push_str("**Attributes:**\n");
    output.push_str(&format!(
        "❤️ HP: {}/{} | 🧠 Sanity: {}/{} | 🍀 Luck: {} | ✨ MP: {}/{}\n",
        investigator.hit_points.current,
        investigator.hit_points.maximum,
        investigator.sanity.current,
        investigator.sanity.maximum,
        investigator.luck.current,
        investigator.magic_points.current,
        investigator.magic_points.maximum
    ));
    output.push_str(&format!(
        "🏃 MOV: {} | ⚔️ DB: {} | 💪 Build: {}\n\n",
        investigator.movement_rate, investigator.damage_bonus, investigator.build
    ));

    let key_skills: Vec<String> = KEY_SKILLS
        .iter()
        .filter_map(|&skill| {
            investigator
                .skills
                .get(skill)
                .map(|value| format!("{}: {}%", capitalize(skill), value))
        })
        .collect();
    output.push_str("**Key Skills:**\n");
    output.push_str(&key_skills.join(" | "));
    output.push('\n');

    if !investigator.languages.is_empty() {
        let languages: Vec<String> = investigator
            .languages
            .iter()
            .map(|(language, value)| format!("{}: {}%", language, value))
            .collect();
        output.push_str(&format!("\n**Languages:** {}", languages.join(" | ")));
    }

    if !investigator.weapons.is_empty() {
        let weapons: Vec<&str> = investigator.weapons.iter().map(|w| w.name.as_str()).collect();
        output.push_str(&format!("\n**Weapons:** {}", weapons.join(", ")));
    }
    if !investigator.equipment.is_empty() {
        let shown: Vec<&str> = investigator
            .equipment
            .iter()
            .take(EQUIPMENT_PREVIEW)
            .map(String::as_str)
            .collect();
        output.push_str(&format!("\n**Equipment:** {}", shown.join(", ")));
        if investigator.equipment.len() > EQUIPMENT_PREVIEW {
            output.push_str("...");
        }
    }
    if !investigator.armor.trim().is_empty() {
        output.push_str(&format!("\n**Armor:** {}", investigator.armor));
    }

    let backstory = &investigator.backstory;
    let completed: Vec<&str> = [
        ("Description", &backstory.personal_description),
        ("Beliefs", &backstory.ideology_beliefs),
        ("People", &backstory.significant_people),
        ("Locations", &backstory.meaningful_locations),
        ("Possessions", &backstory.treasured_possessions),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, _)| label)
    .collect();
    if completed.is_empty() {
        output.push_str("\n\n*Use `/character backstory` to add personality details*");
    } else {
        output.push_str("\n\n**Backstory:** Use `/character backstory` to edit");
        output.push_str(&format!("\n*Completed: {}*", completed.join(", ")));
    }

    if !investigator.conditions.is_empty() {
        output.push_str(&format!("\n**Conditions:** {}", investigator.conditions.join(", ")));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Weapon;
    use crate::domain::value_objects::{Characteristics, UserId};

    fn harvey() -> Investigator {
        Investigator::new(
            UserId::new("u1"),
            "Harvey Walters",
            "Journalist",
            42,
            Characteristics::point_buy(),
        )
    }

    #[test]
    fn test_fresh_sheet() {
        assert_eq!(
            format_character_sheet(&harvey()),
            "📜 **Harvey Walters** (Journalist, Age 42)\n\n\
             **Characteristics:**\n\
             STR: 50 | DEX: 50 | INT: 50 | CON: 50\n\
             APP: 50 | POW: 50 | SIZ: 50 | EDU: 70\n\n\
             **Attributes:**\n\
             ❤️ HP: 10/10 | 🧠 Sanity: 50/99 | 🍀 Luck: 50 | ✨ MP: 10/10\n\
             🏃 MOV: 8 | ⚔️ DB: 0 | 💪 Build: 0\n\n\
             **Key Skills:**\n\
             Spot hidden: 25% | Listen: 20% | Psychology: 10% | Library use: 20% | \
             First aid: 30% | Dodge: 25% | Fighting (brawl): 25% | Firearms (handgun): 20%\n\
             \n**Languages:** English: 70%\
             \n\n*Use `/character backstory` to add personality details*"
        );
    }

    #[test]
    fn test_gear_backstory_and_conditions() {
        let mut investigator = harvey();
        investigator.weapons = vec![
            Weapon::new(".38 Revolver", "firearms (handgun)", "1d10"),
            Weapon::new("Pocket Knife", "fighting (brawl)", "1d4+db"),
        ];
        investigator.equipment = ["Notebook", "Camera", "Flashlight", "Press pass"]
            .map(String::from)
            .to_vec();
        investigator.armor = "Heavy overcoat".to_string();
        investigator.backstory.personal_description = "Rumpled tweed".to_string();
        investigator.backstory.treasured_possessions = "Grandfather's watch".to_string();
        investigator.backstory.ideology_beliefs = "   ".to_string();
        investigator.add_condition("Shaken");

        let sheet = format_character_sheet(&investigator);
        assert!(sheet.ends_with(
            "\n**Weapons:** .38 Revolver, Pocket Knife\
             \n**Equipment:** Notebook, Camera, Flashlight...\
             \n**Armor:** Heavy overcoat\
             \n\n**Backstory:** Use `/character backstory` to edit\
             \n*Completed: Description, Possessions*\
             \n**Conditions:** Shaken"
        ));
    }

    #[test]
    fn test_missing_key_skills_are_skipped() {
        let mut investigator = harvey();
        investigator.skills.retain(|name, _| name == "dodge" || name == "listen");
        let sheet = format_character_sheet(&investigator);
        assert!(sheet.contains("**Key Skills:**\nListen: 20% | Dodge: 25%\n"));
    }
}

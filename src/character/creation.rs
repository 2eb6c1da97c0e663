use super::model::Character;
use super::types::{CharClass, Skill, Weapon};
use crate::constants::MAX_NAME_LENGTH;
use crate::dice::{pick, Dice};

/// Builds a fresh level-1 player for `char_class` with a randomly issued weapon.
pub fn create_player(name: &str, char_class: CharClass, dice: &mut impl Dice) -> Character {
    let (max_hp, attack, defense) = char_class.base_stats();
    let weapon = *pick(dice, &Weapon::all());

    let mut player = Character::new(name.trim(), 1, max_hp, attack, defense)
        .with_class(char_class)
        .with_weapon(weapon)
        .with_sprite(char_class.sprite());

    match char_class {
        CharClass::Soldier => {
            player = player.with_skill(
                "Military Strike",
                Skill::Damage {
                    power: 8,
                    mult: 1.5,
                },
            );
        }
        CharClass::Police => {
            player = player.with_skill(
                "Arrest",
                Skill::Damage {
                    power: 6,
                    mult: 1.3,
                },
            );
        }
        CharClass::Citizen => {}
    }

    player
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        ));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_create_citizen() {
        let mut dice = ScriptedDice::new().with_picks(&[2]);
        let player = create_player("  Ada ", CharClass::Citizen, &mut dice);

        assert_eq!(player.name, "Ada");
        assert_eq!(player.level, 1);
        assert_eq!((player.max_hp, player.attack, player.defense), (100, 5, 2));
        assert_eq!(player.hp, 100);
        assert_eq!(player.weapon, Weapon::Gun);
        assert_eq!(player.xp_to_next, 50);
        assert!(player.skills.is_empty());
        assert_eq!(player.sprite.as_deref(), Some("hero.png"));
    }

    #[test]
    fn test_create_soldier_has_strike() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let player = create_player("Sarge", CharClass::Soldier, &mut rng);

        assert_eq!((player.max_hp, player.attack, player.defense), (120, 7, 3));
        assert!(player.skills.contains_key("Military Strike"));
        assert_ne!(player.weapon, Weapon::Improvised);
    }

    #[test]
    fn test_create_police_has_arrest() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let player = create_player("Inspector", CharClass::Police, &mut rng);

        assert_eq!((player.max_hp, player.attack, player.defense), (110, 6, 4));
        assert_eq!(
            player.skills.get("Arrest"),
            Some(&Skill::Damage {
                power: 6,
                mult: 1.3
            })
        );
    }

    #[test]
    fn test_weapon_issue_covers_all_three() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(create_player("Roll", CharClass::Citizen, &mut rng).weapon);
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_validate_name_valid() {
        assert!(validate_name("Hero").is_ok());
        assert!(validate_name("Chidi 123").is_ok());
        assert!(validate_name("Area-Boy_2").is_ok());
    }

    #[test]
    fn test_validate_name_empty() {
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_validate_name_too_long() {
        assert!(validate_name("123456789012345").is_ok());
        assert!(validate_name("1234567890123456").is_err());
    }

    #[test]
    fn test_validate_name_invalid_chars() {
        assert!(validate_name("oga@lagos").is_err());
        assert!(validate_name("hello!").is_err());
    }
}

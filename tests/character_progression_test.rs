use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use streets::character::{basic_attack_damage, create_player, CharClass, Character, Skill, SkillOutcomeKind, Weapon};
use streets::dice::ScriptedDice;

#[test]
fn test_gun_minimum_roll_against_no_defense() {
    let mut player = Character::new("Ada", 1, 100, 5, 2).with_weapon(Weapon::Gun);
    let mut target = Character::new("Dummy", 1, 100, 0, 0);
    let damage = player.basic_attack(&mut target, &mut ScriptedDice::new().with_rolls(&[1]));
    assert_eq!(damage, 11);
    assert_eq!(target.hp, 89);
    assert_eq!(player.damage_dealt, 11);
}

#[test]
fn test_basic_attack_never_below_one() {
    for roll in 1..=6 {
        assert_eq!(basic_attack_damage(2, roll, 500), 1);
    }
    assert_eq!(basic_attack_damage(2, 6, 2), 6);
}

#[test]
fn test_two_level_ups_from_130_xp() {
    let mut player = Character::new("Ada", 1, 100, 5, 2);
    assert!(player.gain_xp(130));
    assert_eq!(player.level, 3);
    assert_eq!(player.xp, 15);
    assert_eq!(player.xp_to_next, 84);
    assert_eq!(player.max_hp, 110);
    assert_eq!(player.attack, 7);
    assert_eq!(player.defense, 4);
    assert_eq!(player.hp, player.max_hp);
}

#[test]
fn test_zero_xp_changes_nothing() {
    let mut player = Character::new("Ada", 1, 100, 5, 2);
    let before = player.clone();
    assert!(!player.gain_xp(0));
    assert_eq!(player, before);
}

#[test]
fn test_xp_is_additive() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for _ in 0..200 {
        let a = rng.gen_range(0..400);
        let b = rng.gen_range(0..400);
        let mut split = Character::new("Ada", 1, 100, 5, 2);
        split.gain_xp(a);
        split.gain_xp(b);
        let mut once = Character::new("Ada", 1, 100, 5, 2);
        once.gain_xp(a + b);
        assert_eq!((split.level, split.xp, split.xp_to_next), (once.level, once.xp, once.xp_to_next));
        assert!(split.xp < split.xp_to_next);
    }
}

#[test]
fn test_hp_stays_in_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut c = Character::new("Ada", 1, 100, 5, 2);
    for _ in 0..2000 {
        if rng.gen_bool(0.5) {
            c.take_damage(rng.gen_range(0..60));
        } else {
            c.heal(rng.gen_range(0..60));
        }
        assert!(c.hp <= c.max_hp);
        assert_eq!(c.is_alive(), c.hp > 0);
    }
}

#[test]
fn test_class_stats_and_skills() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let soldier = create_player("Sade", CharClass::Soldier, &mut rng);
    assert_eq!((soldier.max_hp, soldier.attack, soldier.defense), (120, 7, 3));
    assert!(soldier.skills.contains_key("Military Strike"));
    assert!(Weapon::all().contains(&soldier.weapon));

    let police = create_player("Tunde", CharClass::Police, &mut rng);
    assert_eq!((police.max_hp, police.attack, police.defense), (110, 6, 4));
    assert!(police.skills.contains_key("Arrest"));

    let citizen = create_player("Ada", CharClass::Citizen, &mut rng);
    assert_eq!((citizen.max_hp, citizen.attack, citizen.defense), (100, 5, 2));
    assert!(citizen.skills.is_empty());
}

#[test]
fn test_skill_outcomes() {
    let mut soldier = Character::new("Sade", 1, 120, 7, 3)
        .with_skill("Military Strike", Skill::Damage { power: 8, mult: 1.5 })
        .with_skill("Bandage", Skill::Heal { power: 10, scale: 2.0 });
    let mut enemy = Character::new("Bandit", 1, 100, 4, 2);

    let strike = soldier.use_skill("Military Strike", &mut enemy);
    assert_eq!(strike.kind, SkillOutcomeKind::Damage);
    // floor(7 * 1.5 + 8) - 2
    assert_eq!(strike.effect, 16);
    assert_eq!(enemy.hp, 84);

    soldier.take_damage(30);
    let heal = soldier.use_skill("Bandage", &mut enemy);
    assert_eq!(heal.kind, SkillOutcomeKind::Heal);
    assert_eq!(heal.effect, 12);
    assert_eq!(soldier.hp, 102);

    let unknown = soldier.use_skill("Fireball", &mut enemy);
    assert_eq!(unknown.kind, SkillOutcomeKind::Unknown);
    assert_eq!(unknown.effect, 0);
    assert_eq!(enemy.hp, 84);
}

#[test]
fn test_unknown_weapon_falls_back() {
    let json = r#"{"name":"Odd","level":1,"hp":50,"max_hp":50,"attack":5,"defense":2,"weapon":"Slingshot"}"#;
    let c: Character = serde_json::from_str(json).unwrap();
    assert_eq!(c.weapon, Weapon::Improvised);
    assert_eq!(c.weapon_damage(), 2);
    assert_eq!(c.special_threshold(), 30);
    assert_eq!(c.special_ability_names(), &["BASIC STRIKE"]);
    assert_eq!(c.xp_to_next, 50);
}

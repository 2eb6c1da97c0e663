use super::enemies::create_enemy;
use super::stage::Stage;
use crate::character::Character;
use crate::combat::Combat;
use crate::constants::*;
use crate::dice::Dice;
use crate::persistence::{
    AudioPort, CombatRecord, CombatResult, LeaderboardEntry, PersistencePort, Settings, SoundCue,
    StoreResult,
};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    InProgress,
    Won,
    Lost,
    Fled,
    Quit,
}

impl RunStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, RunStatus::InProgress)
    }
}

/// What happened as a result of one call into the run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Narrated(String),
    /// A player action arrived while the enemy still owes its turn.
    NotYourTurn,
    /// The run already ended; nothing was done.
    RunOver,
    SpecialUnavailable {
        damage_needed: u32,
    },
    SpecialCapReached,
    EnemyDefeated {
        enemy_name: String,
        xp_gained: u32,
        leveled_up: bool,
    },
    StageAdvanced {
        stage: Stage,
        enemy_name: String,
    },
    RunCompleted(LeaderboardEntry),
    PlayerDefeated {
        enemy_name: String,
    },
    Fled,
    FleeFailed,
    Saved,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CombatantView {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub sprite: Option<String>,
}

impl CombatantView {
    fn of(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            level: character.level,
            hp: character.hp,
            max_hp: character.max_hp,
            sprite: character.sprite.clone(),
        }
    }

    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }
}

/// Snapshot of everything the battle screen draws.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleView {
    pub player: CombatantView,
    pub enemy: CombatantView,
    pub stage: Stage,
    pub messages: Vec<String>,
    pub special_available: bool,
    pub special_progress: u32,
    pub special_threshold: u32,
    pub specials_used: u32,
    pub enemies_defeated: u32,
    pub total_damage: u64,
    pub elapsed_seconds: f64,
    pub status: RunStatus,
    pub enemy_turn_pending: bool,
    pub screen_effects: bool,
}

/// One attempt at the three stages.
///
/// After every player action that does not end the encounter, the enemy owes
/// exactly one turn. Player actions are refused until `enemy_turn` runs.
/// Persistence and audio calls are best-effort: failures are logged and the
/// run carries on.
pub struct Run<P, A> {
    store: P,
    audio: A,
    settings: Settings,
    stage: Stage,
    combat: Combat,
    weapon_damage_since_special: u32,
    specials_used_this_stage: u32,
    total_damage: u64,
    enemies_defeated: u32,
    started_at: DateTime<Utc>,
    finished_after: Option<f64>,
    status: RunStatus,
    enemy_turn_pending: bool,
    messages: Vec<String>,
}

impl<P: PersistencePort, A: AudioPort> Run<P, A> {
    /// Starts a run at `stage`. A player saved at 0 HP is healed first.
    pub fn new(
        mut player: Character,
        stage: Stage,
        store: P,
        audio: A,
        dice: &mut impl Dice,
    ) -> Self {
        let settings = store.load_settings().unwrap_or_else(|e| {
            warn!(error = %e, "could not load settings, using defaults");
            Settings::default()
        });

        if !player.is_alive() {
            player.restore_full_hp();
        }

        let enemy = create_enemy(stage, settings.difficulty, dice);
        info!(
            player = %player.name,
            stage = stage.number(),
            enemy = %enemy.name,
            difficulty = %settings.difficulty,
            "run started"
        );

        let intro = stage.intro(&enemy.name);
        let mut run = Self {
            store,
            audio,
            settings,
            stage,
            combat: Combat::new(player, enemy),
            weapon_damage_since_special: 0,
            specials_used_this_stage: 0,
            total_damage: 0,
            enemies_defeated: 0,
            started_at: Utc::now(),
            finished_after: None,
            status: RunStatus::InProgress,
            enemy_turn_pending: false,
            messages: vec![intro],
        };
        run.start_stage_music();
        run
    }

    /// Continues a saved character from its saved stage. `Ok(None)` if no save exists.
    pub fn resume(
        name: &str,
        store: P,
        audio: A,
        dice: &mut impl Dice,
    ) -> StoreResult<Option<Self>> {
        let saved = match store.load_character(name)? {
            Some(saved) => saved,
            None => return Ok(None),
        };
        let stage = Stage::from_number(saved.stage);
        Ok(Some(Self::new(saved.character, stage, store, audio, dice)))
    }

    pub fn player(&self) -> &Character {
        self.combat.player()
    }

    pub fn enemy(&self) -> &Character {
        self.combat.enemy()
    }

    pub fn combat(&self) -> &Combat {
        &self.combat
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn enemy_turn_pending(&self) -> bool {
        self.enemy_turn_pending
    }

    pub fn weapon_damage_since_special(&self) -> u32 {
        self.weapon_damage_since_special
    }

    pub fn specials_used_this_stage(&self) -> u32 {
        self.specials_used_this_stage
    }

    pub fn total_damage(&self) -> u64 {
        self.total_damage
    }

    pub fn enemies_defeated(&self) -> u32 {
        self.enemies_defeated
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn into_store(self) -> P {
        self.store
    }

    pub fn elapsed_seconds(&self) -> f64 {
        match self.finished_after {
            Some(seconds) => seconds,
            None => {
                let ms = (Utc::now() - self.started_at).num_milliseconds().max(0);
                ms as f64 / 1000.0
            }
        }
    }

    pub fn special_available(&self) -> bool {
        self.weapon_damage_since_special >= self.player().special_threshold()
            && self.specials_used_this_stage < SPECIAL_USES_PER_STAGE
    }

    pub fn attack(&mut self, dice: &mut impl Dice) -> Vec<RunEvent> {
        if let Some(refused) = self.refuse_player_action() {
            return refused;
        }

        let outcome = self.combat.player_attack(dice);
        let dealt = outcome.damage_to_enemy();
        self.weapon_damage_since_special += dealt;
        self.total_damage += dealt as u64;
        self.cue(SoundCue::Attack);

        let mut events = Vec::new();
        self.narrate(&mut events, outcome.message);
        self.after_player_action(dice, &mut events);
        events
    }

    pub fn defend(&mut self, dice: &mut impl Dice) -> Vec<RunEvent> {
        if let Some(refused) = self.refuse_player_action() {
            return refused;
        }

        let outcome = self.combat.player_defend(dice);
        let mut events = Vec::new();
        self.narrate(&mut events, outcome.message);
        self.after_player_action(dice, &mut events);
        events
    }

    /// Rejections do not use up the player's turn.
    pub fn special(&mut self, dice: &mut impl Dice) -> Vec<RunEvent> {
        if let Some(refused) = self.refuse_player_action() {
            return refused;
        }

        let mut events = Vec::new();
        let threshold = self.player().special_threshold();

        if self.weapon_damage_since_special < threshold {
            let damage_needed = threshold - self.weapon_damage_since_special;
            events.push(RunEvent::SpecialUnavailable { damage_needed });
            self.narrate(
                &mut events,
                format!("⚠️ Need {} more damage to use special!", damage_needed),
            );
            return events;
        }

        if self.specials_used_this_stage >= SPECIAL_USES_PER_STAGE {
            // the use counter starts over once the cap is hit
            self.specials_used_this_stage = 0;
            events.push(RunEvent::SpecialCapReached);
            self.narrate(
                &mut events,
                "⚠️ Too much of everything is not good my friend!".to_string(),
            );
            return events;
        }

        let outcome = self.combat.player_special_attack(dice);
        self.weapon_damage_since_special = 0;
        self.specials_used_this_stage += 1;
        self.total_damage += outcome.amount as u64;
        self.cue(SoundCue::Attack);

        self.narrate(&mut events, outcome.message);
        self.after_player_action(dice, &mut events);
        events
    }

    pub fn flee(&mut self, dice: &mut impl Dice) -> Vec<RunEvent> {
        if let Some(refused) = self.refuse_player_action() {
            return refused;
        }

        let mut events = Vec::new();
        if dice.chance(FLEE_SUCCESS_CHANCE) {
            info!(player = %self.player().name, stage = self.stage.number(), "player fled");
            self.save_progress(self.stage.number());
            self.audio_stop_music();
            self.end(RunStatus::Fled);
            events.push(RunEvent::Fled);
            self.narrate(&mut events, "🏃 You fled! Game Over.".to_string());
        } else {
            self.enemy_turn_pending = true;
            events.push(RunEvent::FleeFailed);
            self.narrate(&mut events, "Couldn't escape!".to_string());
        }
        events
    }

    /// Saves and ends the run. Allowed even while an enemy turn is owed.
    pub fn quit(&mut self) -> Vec<RunEvent> {
        if self.status.is_over() {
            return vec![RunEvent::RunOver];
        }
        let mut events = Vec::new();
        if self.save_progress(self.stage.number()) {
            events.push(RunEvent::Saved);
        }
        self.audio_stop_music();
        self.end(RunStatus::Quit);
        info!(player = %self.player().name, "run quit");
        self.narrate(&mut events, "💾 Progress saved. See you on the streets.".to_string());
        events
    }

    /// Periodic save of the player at the current stage.
    pub fn autosave(&mut self) -> bool {
        if self.status.is_over() {
            return false;
        }
        let saved = self.save_progress(self.stage.number());
        if saved {
            debug!(stage = self.stage.number(), "autosaved");
        }
        saved
    }

    /// The owed enemy counter-attack. Does nothing when no turn is owed.
    pub fn enemy_turn(&mut self, dice: &mut impl Dice) -> Vec<RunEvent> {
        if self.status.is_over() {
            return vec![RunEvent::RunOver];
        }
        if !self.enemy_turn_pending {
            return Vec::new();
        }

        self.enemy_turn_pending = false;
        let outcome = self.combat.enemy_turn(dice);
        self.cue(SoundCue::Attack);

        let mut events = Vec::new();
        self.narrate(&mut events, outcome.message);
        if !self.player().is_alive() {
            self.handle_defeat(&mut events);
        }
        events
    }

    pub fn view(&self) -> BattleView {
        let lines: Vec<&str> = self.messages.iter().flat_map(|m| m.lines()).collect();
        let tail_start = lines.len().saturating_sub(MESSAGE_TAIL_LINES);

        BattleView {
            player: CombatantView::of(self.player()),
            enemy: CombatantView::of(self.enemy()),
            stage: self.stage,
            messages: lines[tail_start..].iter().map(|l| l.to_string()).collect(),
            special_available: self.special_available(),
            special_progress: self.weapon_damage_since_special,
            special_threshold: self.player().special_threshold(),
            specials_used: self.specials_used_this_stage,
            enemies_defeated: self.enemies_defeated,
            total_damage: self.total_damage,
            elapsed_seconds: self.elapsed_seconds(),
            status: self.status,
            enemy_turn_pending: self.enemy_turn_pending,
            screen_effects: self.settings.screen_effects,
        }
    }

    fn refuse_player_action(&self) -> Option<Vec<RunEvent>> {
        if self.status.is_over() {
            Some(vec![RunEvent::RunOver])
        } else if self.enemy_turn_pending {
            Some(vec![RunEvent::NotYourTurn])
        } else {
            None
        }
    }

    fn after_player_action(&mut self, dice: &mut impl Dice, events: &mut Vec<RunEvent>) {
        let (over, _) = self.combat.is_over();
        if !over {
            self.enemy_turn_pending = true;
        } else if self.player().is_alive() {
            self.handle_victory(dice, events);
        } else {
            self.handle_defeat(events);
        }
    }

    fn handle_victory(&mut self, dice: &mut impl Dice, events: &mut Vec<RunEvent>) {
        let enemy_name = self.enemy().name.clone();
        let stage_number = self.stage.number();

        self.enemies_defeated += 1;
        let xp = self.combat.reward_xp_for_enemy(dice);
        let player = self.combat.player_mut();
        player.restore_full_hp();
        let leveled_up = player.gain_xp(xp);
        let level = player.level;

        self.record_result(&enemy_name, CombatResult::Victory);
        self.cue(SoundCue::Victory);
        info!(enemy = %enemy_name, xp, leveled_up, stage = stage_number, "enemy defeated");

        events.push(RunEvent::EnemyDefeated {
            enemy_name,
            xp_gained: xp,
            leveled_up,
        });
        let mut message = format!("🎉 Victory! Gained {} XP", xp);
        if leveled_up {
            message.push_str(&format!("\n⬆️ Level up! You are now level {}", level));
        }
        self.narrate(events, message);

        match self.stage.next() {
            Some(next) => self.advance_to(next, dice, events),
            None => self.complete_run(events),
        }
    }

    fn advance_to(&mut self, next: Stage, dice: &mut impl Dice, events: &mut Vec<RunEvent>) {
        self.stage = next;
        self.weapon_damage_since_special = 0;
        self.specials_used_this_stage = 0;
        self.enemy_turn_pending = false;

        let enemy = create_enemy(next, self.settings.difficulty, dice);
        let enemy_name = enemy.name.clone();
        let player = self.combat.player().clone();
        self.combat = Combat::new(player, enemy);
        self.save_progress(next.number());

        self.audio_stop_music();
        self.start_stage_music();
        info!(stage = next.number(), enemy = %enemy_name, "stage advanced");

        events.push(RunEvent::StageAdvanced {
            stage: next,
            enemy_name: enemy_name.clone(),
        });
        self.narrate(events, next.intro(&enemy_name));
    }

    fn complete_run(&mut self, events: &mut Vec<RunEvent>) {
        let seconds = self.elapsed_seconds();
        let entry = LeaderboardEntry {
            run_id: Uuid::new_v4().to_string(),
            player_name: self.player().name.clone(),
            completion_seconds: seconds,
            total_damage: self.total_damage,
            enemies_defeated: self.enemies_defeated,
            difficulty: self.settings.difficulty,
            run_date: Utc::now().timestamp(),
        };

        if let Err(e) = self.store.record_leaderboard_entry(&entry) {
            warn!(error = %e, "could not record leaderboard entry");
        }
        self.save_progress(Stage::Forest.number());
        self.audio_stop_music();
        self.finished_after = Some(seconds);
        self.end(RunStatus::Won);
        info!(
            player = %entry.player_name,
            seconds,
            damage = entry.total_damage,
            "run completed"
        );

        let whole = seconds as u64;
        let message = format!(
            "🎉 GAME FINISHED! You escaped!\nTime: {}m {}s",
            whole / 60,
            whole % 60
        );
        events.push(RunEvent::RunCompleted(entry));
        self.narrate(events, message);
    }

    fn handle_defeat(&mut self, events: &mut Vec<RunEvent>) {
        let enemy_name = self.enemy().name.clone();
        self.cue(SoundCue::Defeat);
        self.record_result(&enemy_name, CombatResult::Defeat);
        self.save_progress(self.stage.number());
        self.audio_stop_music();
        self.end(RunStatus::Lost);
        info!(enemy = %enemy_name, stage = self.stage.number(), "player defeated");

        events.push(RunEvent::PlayerDefeated { enemy_name });
        self.narrate(events, "☠️ You were defeated...".to_string());
    }

    fn end(&mut self, status: RunStatus) {
        self.status = status;
        self.enemy_turn_pending = false;
        if self.finished_after.is_none() {
            self.finished_after = Some(self.elapsed_seconds());
        }
    }

    fn narrate(&mut self, events: &mut Vec<RunEvent>, message: String) {
        self.messages.push(message.clone());
        events.push(RunEvent::Narrated(message));
    }

    fn save_progress(&mut self, stage: u32) -> bool {
        match self.store.save_character(self.combat.player(), stage) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, stage, "could not save character");
                false
            }
        }
    }

    fn record_result(&mut self, enemy_name: &str, result: CombatResult) {
        let record = CombatRecord {
            player_name: self.combat.player().name.clone(),
            enemy_name: enemy_name.to_string(),
            stage: self.stage.number(),
            result,
            timestamp: Utc::now().timestamp(),
        };
        if let Err(e) = self.store.record_combat_result(&record) {
            warn!(error = %e, "could not record combat result");
        }
    }

    fn cue(&mut self, cue: SoundCue) {
        if self.settings.sound_enabled {
            self.audio.play(cue);
        }
    }

    fn start_stage_music(&mut self) {
        if self.settings.music_enabled {
            self.audio.play_stage_music(self.stage.number());
        }
    }

    fn audio_stop_music(&mut self) {
        if self.settings.music_enabled {
            self.audio.stop_music();
        }
    }
}

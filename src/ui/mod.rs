mod battle_scene;

pub use battle_scene::draw_battle_scene;

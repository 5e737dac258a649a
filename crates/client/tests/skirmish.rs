use std::io::Write;

use dungeon_client::{SkirmishConfig, run};

#[test]
fn builtin_arena_runs_to_completion_or_limit() {
    let config = SkirmishConfig {
        max_steps: 300,
        ..SkirmishConfig::default()
    };
    let summary = run(&config).unwrap();

    assert!(summary.steps <= 300);
    assert!(summary.events > 0);
    assert!(summary.outcome.is_some() || summary.steps == 300);
}

#[test]
fn runs_are_reproducible_per_seed() {
    let config = SkirmishConfig {
        seed: 9,
        max_steps: 200,
        ..SkirmishConfig::default()
    };
    let a = serde_json::to_value(run(&config).unwrap()).unwrap();
    let b = serde_json::to_value(run(&config).unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn custom_layout_and_config_are_loaded() {
    let mut layout = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    write!(layout, "#####\n#@.b#\n#####\n").unwrap();

    let mut game = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(game, "[player]\nhealth = 9\nweight = 1\nspells = [\"zap\"]\n").unwrap();

    let config = SkirmishConfig {
        max_steps: 50,
        layout_path: Some(layout.path().to_path_buf()),
        config_path: Some(game.path().to_path_buf()),
        ..SkirmishConfig::default()
    };
    let summary = run(&config).unwrap();

    assert_eq!(summary.outcome, Some(runtime::Outcome::Victory));
    assert_eq!(summary.kills, 1);
    assert!(summary.player_health > 0 && summary.player_health <= 9);
}

use super::*;

#[test]
fn test_orb_state_presets() {
    let water = WaterState::new();
    assert_eq!(water.wave_speed(), 1.0);

    water.apply_orb_state(OrbState::Listening);
    assert_eq!(water.wave_speed(), 1.3);
    assert_eq!(water.wave_intensity(), 1.3);

    water.apply_orb_state(OrbState::Score);
    assert_eq!(water.wave_speed(), 0.6);
    assert_eq!(water.wave_intensity(), 1.5);
}

#[test]
fn test_colors_follow_language() {
    let water = WaterState::new();
    let english = water.colors();

    water.set_colors_for_language(Language::Pt);
    let portuguese = water.colors();
    assert_ne!(english, portuguese);
    assert_eq!(portuguese, colors_for_language(Language::Pt));
}

#[test]
fn test_level_rises_toward_analyser_and_decays_without_audio() {
    let water = WaterState::new();
    let analyser = Arc::new(AudioAnalyser::with_bin_count(2));
    analyser.push_frame(vec![255, 255]);
    water.set_analyser(Some(analyser));

    let mut previous = 0.0;
    for _ in 0..20 {
        let level = water.update_audio_level();
        assert!(level >= previous);
        previous = level;
    }
    assert!(previous > 0.5);

    // Detached: level decays back toward zero
    water.set_analyser(None);
    for _ in 0..60 {
        previous = water.update_audio_level();
    }
    assert!(previous < 0.05);
}

#[test]
fn test_direct_level_overrides_analyser() {
    let water = WaterState::new();
    let analyser = Arc::new(AudioAnalyser::with_bin_count(2));
    analyser.push_frame(vec![0, 0]);
    water.set_analyser(Some(analyser));

    water.set_direct_level(Some(1.0));
    let mut level = 0.0;
    for _ in 0..30 {
        level = water.update_audio_level();
    }
    assert!(level > 0.9);
}

#[test]
fn test_reset_restores_idle_parameters() {
    let water = WaterState::new();
    water.apply_orb_state(OrbState::Processing);
    water.set_analyser(Some(Arc::new(AudioAnalyser::new())));
    water.set_direct_level(Some(0.8));
    water.update_audio_level();

    water.reset();
    assert_eq!(water.wave_speed(), 1.0);
    assert_eq!(water.wave_intensity(), 1.0);
    assert!(!water.has_analyser());
    assert_eq!(water.update_audio_level(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn test_playback_pulse_drives_and_clears_direct_level() {
    let water = Arc::new(WaterState::new());

    let pulse = water.clone().begin_playback_pulse();
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Pulse is driving the level above zero
    let mut level = 0.0;
    for _ in 0..10 {
        level = water.update_audio_level();
    }
    assert!(level > 0.05);

    drop(pulse);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Override cleared: with no analyser the level decays again
    let decayed = (0..60).map(|_| water.update_audio_level()).last().unwrap();
    assert!(decayed < 0.05);
}

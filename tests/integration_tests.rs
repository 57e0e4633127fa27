//! Integration tests for the tabkit engine
//!
//! Tests full pipelines from notation text to rendered SVG, playback plans,
//! and persisted editor sessions.

use pretty_assertions::assert_eq;
use tempfile::tempdir;

use tabkit::{
    parse, plan_to_json, render_to_svg, sequence_to_json, ClickOutcome, EditorConfig, FileStore,
    ManualClock, PitchStep, PlaybackPhase, PlaybackPlan, PlaybackScheduler, Point, StaffLayout,
    StaveGeometry, SvgRenderTarget, TabEditor, TabError, Tempo, TickOutcome,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Host-side tick delivery: take the outstanding request, then tick.
fn deliver(scheduler: &mut PlaybackScheduler, clock: &mut ManualClock) -> TickOutcome {
    clock
        .take_pending()
        .expect("scheduler should have requested a tick");
    scheduler.tick(clock)
}

#[test]
fn test_parse_render_pipeline() {
    init_logs();
    let svg = render_to_svg("4:5,4:7,3:7,2:5", &StaffLayout::default());
    assert!(svg.is_ok(), "Should render the default phrase");
    let svg = svg.unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(">5</text>"));
    assert!(svg.contains(">7</text>"));
    assert!(svg.contains(">T</text>"), "clef letters should be drawn");
}

#[test]
fn test_render_rejects_bad_notation() {
    let result = render_to_svg("4:5,bad", &StaffLayout::default());
    assert_eq!(
        result,
        Err(TabError::InvalidToken {
            token: "bad".to_string()
        })
    );
}

#[test]
fn test_parse_to_playback_plan() {
    // 4 quarter notes at 60 bpm: one second each
    let seq = parse("4:5,4:7,3:7,2:5").unwrap();
    let plan = PlaybackPlan::from_sequence(&seq, Tempo::new(60.0));

    let starts: Vec<f64> = plan.notes.iter().map(|n| n.start_secs).collect();
    assert_eq!(starts, vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(plan.total_secs(), 4.0);
}

#[test]
fn test_full_playback_session() {
    init_logs();
    // 2 quarter notes at the default 120 bpm: 0.5 s each
    let seq = parse("4:5,4:7").unwrap();
    let plan = PlaybackPlan::from_sequence(&seq, Tempo::default());

    let mut clock = ManualClock::new();
    let mut scheduler = PlaybackScheduler::new(plan);

    assert!(scheduler.start(&mut clock));
    assert_eq!(
        deliver(&mut scheduler, &mut clock),
        TickOutcome::Progress {
            note_index: 0,
            progress: 0.0
        }
    );

    clock.advance(0.25);
    assert_eq!(
        deliver(&mut scheduler, &mut clock),
        TickOutcome::Progress {
            note_index: 0,
            progress: 0.5
        }
    );

    clock.advance(0.25);
    assert_eq!(
        deliver(&mut scheduler, &mut clock),
        TickOutcome::Progress {
            note_index: 1,
            progress: 0.0
        }
    );

    clock.advance(0.5);
    assert_eq!(deliver(&mut scheduler, &mut clock), TickOutcome::Finished);
    assert_eq!(scheduler.phase(), PlaybackPhase::Idle);
    assert!(!clock.has_pending(), "no tick may outlive the playback");

    // the scheduler is reusable after finishing
    assert!(scheduler.start(&mut clock));
}

#[test]
fn test_editor_session_survives_restart() {
    init_logs();
    let dir = tempdir().unwrap();

    {
        let mut editor = TabEditor::new(
            Box::new(FileStore::new(dir.path())),
            Box::new(ManualClock::new()),
            EditorConfig::default(),
        );
        editor.attach_render(Box::new(SvgRenderTarget::new(StaffLayout::default())));
        editor.set_direct_edit(true);

        // bottom line of the default layout is y=95, string 6
        let outcome = editor.click_at(Point::new(300.0, 95.0), "3");
        assert!(matches!(outcome, ClickOutcome::Inserted { .. }));
        assert_eq!(editor.text(), "4:5,4:7,3:7,2:5,6:3");
    }

    // the click went through the file store
    let saved = std::fs::read_to_string(dir.path().join("tab_input_v1")).unwrap();
    assert_eq!(saved, "4:5,4:7,3:7,2:5,6:3");

    // a fresh session over the same directory restores it
    let editor = TabEditor::new(
        Box::new(FileStore::new(dir.path())),
        Box::new(ManualClock::new()),
        EditorConfig::default(),
    );
    assert_eq!(editor.text(), "4:5,4:7,3:7,2:5,6:3");
    assert_eq!(editor.sequence().len(), 5);
}

#[test]
fn test_editor_clicks_map_through_real_svg_geometry() {
    let dir = tempdir().unwrap();
    let mut editor = TabEditor::new(
        Box::new(FileStore::new(dir.path())),
        Box::new(ManualClock::new()),
        EditorConfig::default(),
    );
    editor.attach_render(Box::new(SvgRenderTarget::new(StaffLayout::default())));
    editor.set_direct_edit(true);

    // default layout lines sit at 30, 43, .. 95
    let near_top = editor.click_at(Point::new(100.0, 36.0), "0");
    let past_midpoint = editor.click_at(Point::new(100.0, 37.0), "0");
    let tie = editor.click_at(Point::new(100.0, 36.5), "0");

    let string_of = |outcome: &ClickOutcome| match outcome {
        ClickOutcome::Inserted { string, .. } => string.number(),
        other => panic!("expected Inserted, got {:?}", other),
    };
    assert_eq!(string_of(&near_top), 1);
    assert_eq!(string_of(&past_midpoint), 2);
    assert_eq!(string_of(&tie), 1, "equidistant clicks snap to the lower string");
}

#[test]
fn test_config_from_yaml() {
    let yaml = r#"
tempo-bpm: 90
default-notation: "6:0,5:2"
storage-key: riffs/main
direct-edit: true
"#;
    let config = EditorConfig::from_yaml(yaml).unwrap();
    assert_eq!(config.tempo_bpm, 90.0);
    assert_eq!(config.default_notation, "6:0,5:2");
    assert_eq!(config.storage_key, "riffs/main");
    assert!(config.direct_edit);
    assert_eq!(config.tempo().seconds_per_beat(), 60.0 / 90.0);

    // the configured default phrase must itself parse
    assert_eq!(parse(&config.default_notation).unwrap().len(), 2);
}

#[test]
fn test_sequence_json_for_embedding_hosts() {
    let seq = parse("4:5+3:7").unwrap();
    let json = sequence_to_json(&seq);

    assert!(json.contains("\"positions\""));
    assert!(json.contains("\"string\":4"));
    assert!(json.contains("\"fret\":\"5\""));
    assert!(json.contains("\"duration\":\"quarter\""));
}

#[test]
fn test_plan_json_uses_camel_case_keys() {
    let seq = parse("4:5,4:7").unwrap();
    let plan = PlaybackPlan::from_sequence(&seq, Tempo::default());
    let json = plan_to_json(&plan);

    assert!(json.contains("\"noteIndex\""));
    assert!(json.contains("\"startSecs\""));
    assert!(json.contains("\"durationSecs\""));
}

#[test]
fn test_pitch_estimate_for_display() {
    let stave = StaveGeometry {
        top_y: 20.0,
        line_spacing: 10.0,
    };

    // the bottom staff line (top 20 + 4 * 10) anchors middle C
    let c4 = stave.pitch_at(60.0);
    assert_eq!((c4.step, c4.octave), (PitchStep::C, 4));

    let f4 = stave.pitch_at(25.0);
    assert_eq!((f4.step, f4.octave), (PitchStep::F, 4));

    let c5 = stave.pitch_at(-10.0);
    assert_eq!((c5.step, c5.octave), (PitchStep::C, 5));
}

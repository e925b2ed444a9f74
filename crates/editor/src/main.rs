use fpv_editor_lib::harness::EditorHarness;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fpv_editor=info".into()),
        )
        .init();

    let mut harness = EditorHarness::new();

    if let Some(json) = read_track_arg() {
        match harness.load_track_json(&json) {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("failed to load track: {e}");
                std::process::exit(1);
            }
        }
    } else if let Some(query) = arg_value("--share") {
        if !harness.startup_with_query(&query) {
            tracing::warn!("share query carried no loadable track");
        }
    }

    tracing::info!(
        gates = harness.gate_count(),
        waypoints = harness.waypoint_count(),
        length_m = harness.path_length(),
        "track summary"
    );

    // Dry-run a second of playback when the path is flyable
    if harness.toggle_animation().is_ok() {
        for _ in 0..60 {
            if let Some(pose) = harness.frame(1.0 / 60.0) {
                tracing::debug!(
                    x = pose.position.x,
                    y = pose.position.y,
                    z = pose.position.z,
                    roll = pose.roll,
                    "drone pose"
                );
            }
        }
        tracing::info!(
            progress = harness.editor.animation.progress(),
            "playback dry run complete"
        );
    }
}

/// Value of `--track <path>`, read from disk
fn read_track_arg() -> Option<String> {
    let path = arg_value("--track")?;
    match std::fs::read_to_string(&path) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("failed to read track file {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn arg_value(flag: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

//! Option resolution across defaults, environment, and flags.

use lorenz_core::{Colormap, SimulationConfig};
use lorenz_demo::app::AppConfig;
use lorenz_demo::cli::{Command, Opts};
use lorenz_render::canvas::Mode;
use proptest::prelude::*;

fn resolve(args: &[String], env: &[(&str, String)]) -> Opts {
    let lookup = |key: &str| {
        env.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.clone())
    };
    match Opts::parse_from(args, lookup) {
        Ok(Command::Run(opts)) => opts,
        other => panic!("unexpected parse result: {other:?}"),
    }
}

#[test]
fn empty_command_line_is_the_classic_run() {
    let opts = resolve(&[], &[]);
    let app = AppConfig::from_opts(&opts);
    assert_eq!(app.simulation, SimulationConfig::default());
    assert_eq!(app.glyphs, Mode::Braille);
    assert!(app.simulation.validate().is_ok());
}

#[test]
fn every_env_var_is_read() {
    let env = [
        ("LORENZ_SIGMA", "11".to_string()),
        ("LORENZ_RHO", "29".to_string()),
        ("LORENZ_BETA", "3".to_string()),
        ("LORENZ_DT", "0.005".to_string()),
        ("LORENZ_STEPS_PER_FRAME", "4".to_string()),
        ("LORENZ_FADE_LENGTH", "200".to_string()),
        ("LORENZ_HUE_STEP", "0.01".to_string()),
        ("LORENZ_COLORMAP", "hsv".to_string()),
        ("LORENZ_FRAMES", "10".to_string()),
        ("LORENZ_REPEAT", "false".to_string()),
        ("LORENZ_ELEVATION", "45".to_string()),
        ("LORENZ_AZIMUTH_RATE", "1".to_string()),
        ("LORENZ_FPS", "30".to_string()),
        ("LORENZ_GLYPHS", "half".to_string()),
        ("LORENZ_THICK", "1".to_string()),
        ("LORENZ_HUD", "no".to_string()),
        ("LORENZ_RECORD", "run.cast".to_string()),
        ("LORENZ_LOG_FILE", "run.log".to_string()),
        ("LORENZ_EXIT_AFTER_MS", "100".to_string()),
    ];
    let o = resolve(&[], &env);
    assert_eq!((o.sigma, o.rho, o.beta, o.dt), (11.0, 29.0, 3.0, 0.005));
    assert_eq!((o.steps_per_frame, o.fade_length, o.frames), (4, 200, 10));
    assert_eq!(o.hue_step, 0.01);
    assert_eq!(o.colormap, Colormap::Hsv);
    assert!(!o.repeat && o.thick && !o.hud);
    assert_eq!((o.elevation, o.azimuth_rate, o.fps), (45.0, 1.0, 30));
    assert_eq!(o.glyphs, Mode::HalfBlock);
    assert_eq!(o.record.as_deref(), Some(std::path::Path::new("run.cast")));
    assert_eq!(o.log_file.as_deref(), Some(std::path::Path::new("run.log")));
    assert_eq!(o.exit_after_ms, 100);
}

proptest! {
    #[test]
    fn flag_beats_env_beats_default(
        env_len in proptest::option::of(1usize..5000),
        flag_len in proptest::option::of(1usize..5000),
    ) {
        let env: Vec<(&str, String)> = env_len
            .map(|n| ("LORENZ_FADE_LENGTH", n.to_string()))
            .into_iter()
            .collect();
        let args: Vec<String> = flag_len
            .map(|n| format!("--fade-length={n}"))
            .into_iter()
            .collect();
        let o = resolve(&args, &env);
        let expected = flag_len.or(env_len).unwrap_or(400);
        prop_assert_eq!(o.fade_length, expected);
    }

    #[test]
    fn unknown_flags_are_rejected(name in "[a-z]{3,12}") {
        prop_assume!(![
            "sigma", "rho", "beta", "dt", "frames", "fps", "thick", "colormap",
            "glyphs", "record", "elevation",
        ]
        .contains(&name.as_str()));
        let arg = format!("--{name}=1");
        prop_assert!(Opts::parse_from([arg.as_str()], |_| None).is_err());
    }
}

use anyhow::Context;
use slicetune::config::ConfigManager;
use slicetune::engine::{evaluate, LogProgress, Parameter, Tuner, TunerConfig};
use slicetune::profile::{read_initial_parameters, write_parameters};
use std::path::Path;

const APP_CONFIG_PATH: &str = "slicetune.toml";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let manager = ConfigManager::new();
    if Path::new(APP_CONFIG_PATH).exists() {
        manager
            .load_from_file(APP_CONFIG_PATH)
            .with_context(|| format!("loading {}", APP_CONFIG_PATH))?;
    }
    let app_config = manager.get();

    // Profile path may be overridden as the single positional argument
    let profile_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| app_config.profile.path.clone());

    let initial = read_initial_parameters(&profile_path)
        .with_context(|| format!("reading slicer profile {}", profile_path))?;

    println!("Initial Parameters:");
    for param in Parameter::ALL {
        println!("{} = {}", param.key(), initial.get(param));
    }

    let baseline = evaluate(&initial);
    println!("Baseline fitness: {:.4}", baseline);

    let tuner_config = TunerConfig::from(&app_config.search);
    let mut tuner = Tuner::new(tuner_config)?;
    let outcome = tuner.run(baseline, &mut LogProgress);

    println!("Best Parameters (fitness {:.4}):", outcome.fitness);
    for param in Parameter::ALL {
        println!("{} = {}", param.key(), outcome.candidate.get(param));
    }

    if !outcome.improved {
        log::warn!(
            "Could not improve on baseline {:.4} after {} attempts; keeping profile unchanged",
            baseline,
            outcome.attempts
        );
        return Ok(());
    }

    write_parameters(&profile_path, &outcome.candidate)
        .with_context(|| format!("writing slicer profile {}", profile_path))?;

    // Re-read and score what actually landed in the file; one repair run if
    // the round trip somehow lost fitness
    let written = read_initial_parameters(&profile_path)?;
    let verified = evaluate(&written);
    if verified < baseline {
        log::warn!(
            "Re-read profile scores {:.4}, below baseline {:.4}; re-running the search once",
            verified,
            baseline
        );
        let retry = tuner.run(baseline, &mut LogProgress);
        if retry.improved {
            write_parameters(&profile_path, &retry.candidate)
                .with_context(|| format!("writing slicer profile {}", profile_path))?;
            println!("Profile updated on retry, fitness {:.4}", retry.fitness);
        } else {
            log::warn!("Retry could not improve on baseline; keeping profile as written");
        }
    } else {
        println!("Profile updated, verified fitness {:.4}", verified);
    }

    Ok(())
}

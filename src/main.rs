//! Track Racer headless runner
//!
//! Drives episodes of the step/reset environment with a built-in policy and
//! prints one JSON summary per episode on stdout.
//!
//! Usage: `track-racer [CONFIG.json] [--policy random|greedy] [--episodes N] [--seed S]`

use std::process::ExitCode;
use std::str::FromStr;

use serde::Serialize;

use track_racer::GameConfig;
use track_racer::policy::{GreedyRayPolicy, Policy, RandomPolicy};
use track_racer::sim::DrivingEnv;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PolicyKind {
    Random,
    Greedy,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(PolicyKind::Random),
            "greedy" => Ok(PolicyKind::Greedy),
            _ => Err(format!("unknown policy `{s}`")),
        }
    }
}

#[derive(Debug)]
struct Args {
    config: Option<String>,
    policy: PolicyKind,
    episodes: u32,
    seed: u64,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        config: None,
        policy: PolicyKind::Greedy,
        episodes: 5,
        seed: 1,
    };

    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--policy" => {
                args.policy = value("--policy")?.parse()?;
            }
            "--episodes" => {
                let v = value("--episodes")?;
                args.episodes = v.parse().map_err(|_| format!("bad episode count `{v}`"))?;
            }
            "--seed" => {
                let v = value("--seed")?;
                args.seed = v.parse().map_err(|_| format!("bad seed `{v}`"))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            path => args.config = Some(path.to_string()),
        }
    }
    Ok(args)
}

/// One line of output per finished episode
#[derive(Debug, Serialize)]
struct RunSummary {
    run: u32,
    reward: f32,
    steps: u32,
    laptime: f32,
    distance: f32,
    crashed: bool,
}

fn run_episode(env: &mut DrivingEnv, policy: &mut dyn Policy, run: u32) -> RunSummary {
    policy.reset();
    let mut obs = env.reset();
    let mut reward = 0.0;
    loop {
        let input = policy.act(&obs);
        let out = env.step_input(input);
        reward += out.reward;
        if out.done() {
            let stats = env.stats();
            return RunSummary {
                run,
                reward,
                steps: env.step_count(),
                laptime: stats.elapsed,
                distance: stats.travelled_distance,
                crashed: out.terminated,
            };
        }
        obs = out.observation;
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("usage: track-racer [CONFIG.json] [--policy random|greedy] [--episodes N] [--seed S]");
            return ExitCode::from(2);
        }
    };

    let config = match &args.config {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Rejected config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut env = match DrivingEnv::new(&config) {
        Ok(env) => env,
        Err(e) => {
            log::warn!("Rejected config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut policy: Box<dyn Policy> = match args.policy {
        PolicyKind::Random => Box::new(RandomPolicy::new(args.seed)),
        PolicyKind::Greedy => Box::new(GreedyRayPolicy {
            remapped: config.env.remap_rays,
            ..Default::default()
        }),
    };

    log::info!(
        "Track Racer starting: {:?} policy, {} episodes, obs dim {}",
        args.policy,
        args.episodes,
        env.observation_dim()
    );

    for run in 1..=args.episodes {
        let summary = run_episode(&mut env, policy.as_mut(), run);
        log::info!(
            "Run {}: reward={:.2}, laptime={:.2}s, distance={:.1}px",
            summary.run,
            summary.reward,
            summary.laptime,
            summary.distance
        );
        match serde_json::to_string(&summary) {
            Ok(line) => println!("{line}"),
            Err(e) => log::warn!("Could not encode run summary: {e}"),
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert_eq!("Greedy".parse::<PolicyKind>(), Ok(PolicyKind::Greedy));
        assert_eq!(
            "dqn".parse::<PolicyKind>(),
            Err("unknown policy `dqn`".to_string())
        );
    }
}

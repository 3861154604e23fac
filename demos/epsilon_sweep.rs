use std::error::Error;

use rl_harness::{
    algo::tabular::{SampleAverageAgent, SampleAverageAgentConfig},
    gym::KArmedBandit,
    hpo::{HyperFitter, SearchSpace},
    AgentLoop, LoopConfig,
};

const NUM_EPISODES: usize = 2000;
const SEED: u64 = 42;

fn main() -> Result<(), Box<dyn Error>> {
    let env = KArmedBandit::new(10, Some(SEED));
    println!("arm means: {:.2?}", env.means());

    let config = SampleAverageAgentConfig {
        seed: Some(SEED),
        ..Default::default()
    };
    let agent = SampleAverageAgent::new(&env, config)?;
    let mut agent_loop = AgentLoop::new(
        env,
        agent,
        LoopConfig {
            nb_episodes: NUM_EPISODES,
            render: false,
        },
    )?;

    let space = SearchSpace::new()
        .with("epsilon", [0.0, 0.01, 0.1, 0.5])
        .with("action_value_initial", [0.0, 5.0]);
    let result = HyperFitter::new(&mut agent_loop, space).fit()?;

    for trial in &result.trials {
        println!(
            "{:<45} average reward {:.3}",
            trial.params.to_string(),
            trial.score / NUM_EPISODES as f64
        );
    }
    println!("best: {} ({:.1})", result.params, result.score);

    Ok(())
}

use std::error::Error;

use rl_harness::{
    algo::tabular::{SarsaAgent, SarsaAgentConfig},
    gym::WindyGridworld,
    AgentLoop, LoopConfig,
};

const NUM_EPISODES: u16 = 500;

fn main() -> Result<(), Box<dyn Error>> {
    let env = WindyGridworld::new();
    let config = SarsaAgentConfig {
        epsilon: 0.1,
        alpha: 0.5,
        gamma: 1.0,
        seed: Some(0),
        ..Default::default()
    };
    let agent = SarsaAgent::new(&env, config)?;
    let mut agent_loop = AgentLoop::new(env, agent, LoopConfig::default())?;

    println!("episode,steps");
    for i in 0..NUM_EPISODES {
        let reward = agent_loop.play_one_episode()?;
        println!("{},{}", i, -reward);
    }

    println!("{}", agent_loop.env());
    Ok(())
}

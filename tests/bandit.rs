use rl_harness::{
    algo::tabular::{SampleAverageAgent, SampleAverageAgentConfig},
    env::{EnvError, Environment, Step},
    exploration::EpsilonGreedy,
    gym::KArmedBandit,
    hpo::{HyperFitter, ParamValue, SearchSpace},
    AgentLoop, Error, LoopConfig,
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

const SEED: u64 = 2024;

fn make_agent(
    means: &[f64],
    nb_episodes: usize,
    epsilon: f64,
) -> AgentLoop<KArmedBandit, SampleAverageAgent> {
    let env = KArmedBandit::with_means(means, Some(SEED));
    let config = SampleAverageAgentConfig {
        epsilon,
        seed: Some(SEED),
        ..Default::default()
    };
    let agent = SampleAverageAgent::new(&env, config).unwrap();
    let config = LoopConfig {
        nb_episodes,
        render: false,
    };
    AgentLoop::new(env, agent, config).unwrap()
}

/// One action, one step per episode, always the same reward
struct ConstantEnv {
    reward: f64,
}

impl Environment for ConstantEnv {
    type State = ();
    type Info = ();

    fn action_space_size(&self) -> usize {
        1
    }

    fn reset(&mut self) -> Result<(), EnvError> {
        Ok(())
    }

    fn step(&mut self, _action: usize) -> Result<Step<(), ()>, EnvError> {
        Ok(Step {
            next_state: (),
            reward: self.reward,
            done: true,
            info: (),
        })
    }
}

fn approx(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * b.abs()
}

#[test]
fn constant_reward_converges() {
    let env = ConstantEnv { reward: 2.5 };
    let agent = SampleAverageAgent::new(&env, Default::default()).unwrap();
    let config = LoopConfig {
        nb_episodes: 300,
        render: false,
    };
    let mut agent_loop = AgentLoop::new(env, agent, config).unwrap();

    let score = agent_loop.score().unwrap();
    assert!((score - 750.0).abs() < 1e-9, "score is n * r");
    assert!((agent_loop.agent().value(0).unwrap() - 2.5).abs() < 1e-12, "value is r");
    assert_eq!(agent_loop.agent().table().counts(), [300], "one selection per episode");
}

#[test]
fn bandit_agent_simple() {
    let means = [3.0];
    let nb_episodes = 1000;
    let mut agent = make_agent(&means, nb_episodes, 0.1);
    let score = agent.score().unwrap();

    assert!(approx(score, means[0] * nb_episodes as f64, 0.1), "score {score}");
    assert!(approx(agent.agent().value(0).unwrap(), means[0], 0.1), "estimate near mean");
    assert_eq!(agent.agent().table().counts(), [nb_episodes as u64]);
    assert_eq!(agent.global_step(), 0, "single-step episodes never advance");
}

#[test]
fn bandit_agent_multiple() {
    let means = [3.0, 100.0];
    let mut agent = make_agent(&means, 2000, 0.1);
    agent.score().unwrap();

    let table = agent.agent().table();
    for (action, mean) in means.iter().enumerate() {
        let value = table.value(action).unwrap();
        assert!((value - mean).abs() < 0.5, "action {action} estimated at {value}");
    }
    let counts = table.counts();
    assert!(counts[0] < counts[1], "better arm chosen more often: {counts:?}");
}

#[test]
fn fit_epsilon() {
    let mut agent = make_agent(&[3.0, 4.0, 5.0, 100.0], 2000, 0.1);
    let space = SearchSpace::new().with("epsilon", [0.0, 0.1, 0.9]);
    let result = HyperFitter::new(&mut agent, space).fit().unwrap();

    assert_eq!(result.params.get("epsilon"), Some(&ParamValue::Float(0.1)));
    assert_eq!(result.trials.len(), 3);
    assert_eq!(agent.agent().config().epsilon, 0.1, "agent left on best params");
    assert_eq!(agent.total_reward(), 0.0, "agent left freshly reset");
}

#[test]
fn fit_optimistic_initial_values() {
    let mut agent = make_agent(&[3.0, 4.0, 5.0, 100.0], 2000, 0.1);
    let space = SearchSpace::new()
        .with("epsilon", [0.0])
        .with("action_value_initial", [0.0, 1000.0]);
    let result = HyperFitter::new(&mut agent, space).fit().unwrap();

    assert_eq!(result.params.get("epsilon"), Some(&ParamValue::Float(0.0)));
    assert_eq!(
        result.params.get("action_value_initial"),
        Some(&ParamValue::Float(1000.0))
    );
    assert!(result.trials[1].score > result.trials[0].score);
}

#[test]
fn fit_tie_break_is_stable() {
    for _ in 0..3 {
        let env = ConstantEnv { reward: 1.0 };
        let config = SampleAverageAgentConfig {
            seed: Some(SEED),
            ..Default::default()
        };
        let agent = SampleAverageAgent::new(&env, config).unwrap();
        let loop_config = LoopConfig {
            nb_episodes: 10,
            render: false,
        };
        let mut agent_loop = AgentLoop::new(env, agent, loop_config).unwrap();

        let space = SearchSpace::new()
            .with("epsilon", [0.5, 0.0, 1.0])
            .with("action_value_initial", [0.0, 5.0]);
        let result = HyperFitter::new(&mut agent_loop, space).fit().unwrap();

        assert!(result.trials.iter().all(|t| t.score == 10.0), "all tied");
        assert_eq!(result.params.get("epsilon"), Some(&ParamValue::Float(0.5)));
        assert_eq!(
            result.params.get("action_value_initial"),
            Some(&ParamValue::Float(0.0)),
            "first combination in grid order"
        );
    }
}

#[test]
fn fit_rejects_empty_dimension() {
    let mut agent = make_agent(&[1.0, 2.0], 10, 0.1);
    let space = SearchSpace::new()
        .with("epsilon", [0.1])
        .with("action_value_initial", Vec::<f64>::new());
    let result = HyperFitter::new(&mut agent, space).fit();
    assert!(matches!(result, Err(Error::EmptySearchSpace(name)) if name == "action_value_initial"));
}

#[test]
fn fit_rejects_unknown_parameter() {
    let mut agent = make_agent(&[1.0, 2.0], 10, 0.1);
    let space = SearchSpace::new().with("temperature", [1.0]);
    let result = HyperFitter::new(&mut agent, space).fit();
    assert!(matches!(result, Err(Error::UnknownParameter(_))));
}

#[test]
fn pure_exploration_is_uniform() {
    let mut policy = EpsilonGreedy::from_seed(1.0, Some(SEED)).unwrap();
    let values = [100.0, 0.0, 0.0, 0.0];
    let n = 40_000;
    let mut freq = [0usize; 4];
    for _ in 0..n {
        freq[policy.select(&values)] += 1;
    }

    let expected = n as f64 / values.len() as f64;
    let chi2: f64 = freq
        .iter()
        .map(|&o| (o as f64 - expected).powi(2) / expected)
        .sum();
    let critical = ChiSquared::new((values.len() - 1) as f64)
        .unwrap()
        .inverse_cdf(0.999);
    assert!(chi2 < critical, "frequencies {freq:?} not uniform");
}

#[test]
fn pure_exploitation_never_strays() {
    let mut policy = EpsilonGreedy::from_seed(0.0, Some(SEED)).unwrap();
    let values = [1.0, 4.0, -2.0, 3.9];
    assert!((0..10_000).all(|_| policy.select(&values) == 1));
}

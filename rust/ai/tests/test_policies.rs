use std::fs;

use fivedraw_ai::model::{Features, features};
use fivedraw_ai::{
    InferenceBackend, LinearModel, ModelPolicy, PolicyError, TablePolicy, create_policy,
};
use fivedraw_engine::config::EngineConfig;
use fivedraw_engine::engine::Engine;
use fivedraw_engine::game::Phase;
use fivedraw_engine::hand::{Hand, evaluate};
use fivedraw_engine::player::{Action, Seat};
use fivedraw_engine::policy::{DecisionPolicy, PolicyAction, PotContext};

fn ctx() -> PotContext {
    PotContext {
        pot: 20,
        to_call: 0,
        money: 90,
        opponent_bet: 0,
        round: 1,
    }
}

fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

#[test]
fn table_lookup_takes_argmax() {
    let pair = hand("9s Kd 9h 4c 2s");
    let key = evaluate(&pair).info_set_key();
    let json = format!(r#"{{"{key}": [0.2, 0.2, 0.6]}}"#);
    let mut policy = TablePolicy::from_json_str(&json, Some(1)).unwrap();
    let d = policy.decide(&pair, &ctx());
    assert_eq!(d.action, PolicyAction::Bet);
    assert!((d.strength - 0.6).abs() < 1e-6);
    assert_eq!(policy.misses(), 0);
}

#[test]
fn table_ties_go_to_the_earlier_action() {
    let pair = hand("9s Kd 9h 4c 2s");
    let key = evaluate(&pair).info_set_key();
    let json = format!(r#"{{"{key}": [0.0, 0.5, 0.5]}}"#);
    let mut policy = TablePolicy::from_json_str(&json, None).unwrap();
    assert_eq!(policy.decide(&pair, &ctx()).action, PolicyAction::Call);
}

#[test]
fn unknown_info_set_falls_back_to_random_full_strength() {
    let mut policy = TablePolicy::from_json_str("{}", Some(3)).unwrap();
    assert!(policy.is_empty());
    let d = policy.decide(&hand("As Kd 9h 4c 2s"), &ctx());
    assert!((d.strength - 1.0).abs() < f32::EPSILON);
    assert!(PolicyAction::ALL.contains(&d.action));
    assert_eq!(policy.misses(), 1);
}

#[test]
fn table_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strategy.json");
    fs::write(&path, r#"{"1-12-9-5-3-0": [0.9, 0.1, 0.0], "5-3-2-1-0-12": [0, 0, 1]}"#).unwrap();
    let policy = TablePolicy::load(&path, None).unwrap();
    assert_eq!(policy.len(), 2);
    assert_eq!(policy.lookup("5-3-2-1-0-12"), Some([0.0, 0.0, 1.0]));

    assert!(matches!(
        TablePolicy::load(dir.path().join("missing.json"), None),
        Err(PolicyError::Io(_))
    ));
}

struct Broken;

impl InferenceBackend for Broken {
    fn infer(&mut self, _features: &Features) -> Result<[f32; 3], PolicyError> {
        Err(PolicyError::Inference("backend offline".into()))
    }
}

struct Fixed([f32; 3]);

impl InferenceBackend for Fixed {
    fn infer(&mut self, features: &Features) -> Result<[f32; 3], PolicyError> {
        assert_eq!(features.len(), 7);
        Ok(self.0)
    }
}

#[test]
fn model_policy_uses_backend_output() {
    let mut policy = ModelPolicy::new(Fixed([0.1, 0.8, 0.1]), Some(1));
    let d = policy.decide(&hand("As Kd 9h 4c 2s"), &ctx());
    assert_eq!(d.action, PolicyAction::Call);
    assert_eq!(policy.failures(), 0);
}

#[test]
fn model_failure_degrades_to_random() {
    let mut policy = ModelPolicy::new(Broken, Some(5));
    let d = policy.decide(&hand("As Kd 9h 4c 2s"), &ctx());
    assert!((d.strength - 1.0).abs() < f32::EPSILON);
    assert_eq!(policy.failures(), 1);

    let mut nan = ModelPolicy::new(Fixed([f32::NAN, 0.2, 0.1]), Some(5));
    nan.decide(&hand("As Kd 9h 4c 2s"), &ctx());
    assert_eq!(nan.failures(), 1);
}

#[test]
fn features_carry_category_pot_and_tiebreak() {
    let f = features(&hand("9s Kd 9h 4c 2s"), 35);
    assert_eq!(f, [2.0, 35.0, 7.0, 11.0, 2.0, 0.0, 0.0]);
}

#[test]
fn factory_builds_each_kind() {
    let dir = tempfile::tempdir().unwrap();
    let table = dir.path().join("table.json");
    fs::write(&table, "{}").unwrap();
    let model = dir.path().join("model.json");
    let weights = LinearModel {
        weights: [[0.0; 7]; 3],
        bias: [0.0, 1.0, 0.0],
    };
    fs::write(&model, serde_json::to_string(&weights).unwrap()).unwrap();

    assert_eq!(create_policy("baseline", None, None).unwrap().name(), "BaselinePolicy");
    assert_eq!(create_policy("table", Some(table.as_path()), Some(1)).unwrap().name(), "TablePolicy");
    assert_eq!(create_policy("Model", Some(model.as_path()), Some(1)).unwrap().name(), "ModelPolicy");
    assert!(matches!(
        create_policy("model", None, None),
        Err(PolicyError::MissingSource(_))
    ));
}

#[test]
fn engine_plays_a_round_against_each_policy() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("model.json");
    fs::write(
        &model,
        r#"{"weights": [[0,0,0,0,0,0,0],[0,0,0,0,0,0,0],[0,0,0,0,0,0,0]], "bias": [0, 1, 0]}"#,
    )
    .unwrap();

    for (kind, source) in [("baseline", None), ("table", None), ("model", Some(model.as_path()))] {
        let policy: Box<dyn DecisionPolicy> = match kind {
            "table" => Box::new(TablePolicy::from_json_str("{}", Some(2)).unwrap()),
            _ => create_policy(kind, source, Some(2)).unwrap(),
        };
        let config = EngineConfig {
            seed: Some(17),
            ..EngineConfig::default()
        };
        let mut e = Engine::new(config, policy).unwrap();
        for _ in 0..200 {
            match e.phase() {
                Phase::NextRound | Phase::GameOver => break,
                Phase::Betting if e.to_act() == Some(Seat::Player) => {
                    e.apply_action(Seat::Player, Action::Call).unwrap();
                }
                Phase::Discard => {
                    e.apply_action(Seat::Player, Action::StandPat).unwrap();
                }
                _ => {
                    e.advance().unwrap();
                }
            }
        }
        assert_eq!(e.phase(), Phase::NextRound, "{kind}");
        assert!(e.outcome().is_some());
    }
}

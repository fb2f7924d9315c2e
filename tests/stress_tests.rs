//! Seeded random instances comparing both strategies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use u_roster::assigner::{compare_strategies, Assigner, ExhaustiveAssigner, GreedyAssigner};
use u_roster::config::{EngineConfig, HierarchyConfig, SearchBudget};
use u_roster::graph::CompetencyGraph;
use u_roster::models::{Deployment, Need, Responder};

const COMPETENCIES: [&str; 4] = ["PSE1", "PSE2", "TeamLead", "Driver"];

fn random_instance(rng: &mut StdRng) -> (Vec<Responder>, Vec<Deployment>) {
    let responders = (0..rng.random_range(1..8))
        .map(|i| {
            COMPETENCIES
                .iter()
                .filter(|_| rng.random_bool(0.35))
                .fold(Responder::new(format!("R{i}")).unwrap(), |r, c| {
                    r.with_competency(*c)
                })
        })
        .collect();

    let deployments = (0..rng.random_range(1..4))
        .map(|i| {
            (0..rng.random_range(1..3)).fold(Deployment::new(format!("D{i}")).unwrap(), |d, _| {
                let c = COMPETENCIES[rng.random_range(0..COMPETENCIES.len())];
                d.with_need(Need::new(c, rng.random_range(1..3)).unwrap())
            })
        })
        .collect();

    (responders, deployments)
}

#[test]
fn test_random_instances() {
    let graph = CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap();
    let config = EngineConfig::default().with_budget(SearchBudget::unlimited());
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..100 {
        let (responders, deployments) = random_instance(&mut rng);
        let cmp = compare_strategies(&graph, &responders, &deployments, &config);

        assert!(cmp.exhaustive.is_optimal());
        assert!(cmp.gap() >= 0, "greedy beat exhaustive: {cmp:?}");
        assert!(cmp.greedy.is_exclusive());
        assert!(cmp.exhaustive.assignment.is_exclusive());
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let graph = CompetencyGraph::from_hierarchy(&HierarchyConfig::default_tiers()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let (responders, deployments) = random_instance(&mut rng);
        let exhaustive = ExhaustiveAssigner::new();
        assert_eq!(
            exhaustive.assign(&graph, &responders, &deployments),
            exhaustive.assign(&graph, &responders, &deployments)
        );
        assert_eq!(
            GreedyAssigner::new().assign(&graph, &responders, &deployments),
            GreedyAssigner::new().assign(&graph, &responders, &deployments)
        );
    }
}

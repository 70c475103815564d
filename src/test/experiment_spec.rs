use crate::experiment::{BuiltTopology, ExperimentSpec, TopologyExport, TopologySpec};
use crate::graph::NodeKind;
use serde_json::Value;

#[test]
fn experiment_spec_parses_fat_tree_with_defaults() {
    let raw = r#"{ "topology": { "kind": "fat_tree", "k": 4 } }"#;
    let spec: ExperimentSpec = serde_json::from_str(raw).expect("parse spec");
    assert!(matches!(spec.topology, TopologySpec::FatTree { k: 4 }));
    assert_eq!(spec.k_paths, 8);
    assert_eq!(spec.parallelism, 4);
    assert_eq!(spec.traffic_seed, 0);
}

#[test]
fn experiment_spec_parses_jellyfish() {
    let raw = r#"
    {
        "topology": {
            "kind": "jellyfish",
            "num_servers": 80,
            "num_switches": 21,
            "num_ports": 8,
            "seed": 45
        },
        "k_paths": 3,
        "parallelism": 2,
        "traffic_seed": 7
    }
    "#;
    let spec: ExperimentSpec = serde_json::from_str(raw).expect("parse spec");
    match spec.topology {
        TopologySpec::Jellyfish {
            num_servers,
            num_switches,
            num_ports,
            seed,
            max_attempts,
        } => {
            assert_eq!((num_servers, num_switches, num_ports), (80, 21, 8));
            assert_eq!(seed, 45);
            assert_eq!(max_attempts, None);
        }
        _ => panic!("expected jellyfish topology"),
    }
    assert_eq!(spec.k_paths, 3);
    assert_eq!(spec.parallelism, 2);
    assert_eq!(spec.traffic_seed, 7);
}

#[test]
fn experiment_spec_rejects_unknown_kind() {
    let raw = r#"{ "topology": { "kind": "dumbbell" } }"#;
    assert!(serde_json::from_str::<ExperimentSpec>(raw).is_err());
}

#[test]
fn topology_spec_builds_both_kinds() {
    let ft = TopologySpec::FatTree { k: 4 }.build().unwrap();
    assert!(matches!(ft, BuiltTopology::FatTree(_)));
    assert_eq!(ft.servers().len(), 16);
    assert_eq!(ft.servers()[0], "sv1");

    let jf = TopologySpec::Jellyfish {
        num_servers: 20,
        num_switches: 10,
        num_ports: 6,
        seed: 1,
        max_attempts: None,
    }
    .build()
    .unwrap();
    assert_eq!(jf.server_ids().len(), 20);
    assert_eq!(jf.servers()[19], "sv19");
    assert_eq!(jf.topology().nodes().len(), 30);

    let too_many = TopologySpec::Jellyfish {
        num_servers: 21,
        num_switches: 10,
        num_ports: 6,
        seed: 1,
        max_attempts: None,
    };
    // 10 台 6 口交换机各留 2 个口给服务器
    assert!(too_many.build().is_err());
}

#[test]
fn topology_export_lists_nodes_and_links() {
    let built = TopologySpec::FatTree { k: 4 }.build().unwrap();
    let export = TopologyExport::from(built.topology());
    assert_eq!(export.nodes.len(), 36);
    assert_eq!(export.edges.len(), 48);
    assert_eq!(
        export.nodes.iter().filter(|n| n.kind == NodeKind::Server).count(),
        16
    );

    let v: Value = serde_json::to_value(&export).unwrap();
    assert_eq!(v["nodes"][0]["name"], "sw11");
    assert_eq!(v["nodes"][0]["kind"], "core");
    assert_eq!(v["nodes"][0]["ip"], "10.4.1.1");
    let first_edge = &v["edges"][0];
    assert_eq!(first_edge["left"], "sw11");
    assert!((first_edge["bandwidth"].as_f64().unwrap() - 0.2).abs() < 1e-12);
}

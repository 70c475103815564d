use crate::error::NetError;
use crate::topo::{RegularEdges, RegularGraphGenerator};

fn assert_regular(edges: &RegularEdges, degree: usize, n: usize) {
    assert_eq!(edges.len(), n * degree / 2, "edge count");
    let mut deg = vec![0usize; n];
    for &(u, v) in edges {
        assert!(u < v, "edges are normalised and loop-free: ({u}, {v})");
        assert!(v < n);
        deg[u] += 1;
        deg[v] += 1;
    }
    assert!(deg.iter().all(|&d| d == degree), "degrees: {deg:?}");
}

#[test]
fn generates_simple_regular_graphs() {
    let generator = RegularGraphGenerator::new();
    for (degree, n) in [(2, 5), (3, 4), (3, 10), (4, 21), (6, 30), (8, 245)] {
        for seed in 0..5 {
            let edges = generator.generate_seeded(degree, n, seed).expect("valid parameters");
            assert_regular(&edges, degree, n);
        }
    }
}

#[test]
fn three_regular_on_four_nodes_is_complete() {
    let edges = RegularGraphGenerator::new().generate_seeded(3, 4, 7).unwrap();
    let expected: RegularEdges = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)].into();
    assert_eq!(edges, expected);
}

#[test]
fn same_seed_gives_same_edges() {
    let generator = RegularGraphGenerator::new();
    let a = generator.generate_seeded(4, 40, 45).unwrap();
    let b = generator.generate_seeded(4, 40, 45).unwrap();
    assert_eq!(a, b);
}

#[test]
fn odd_total_degree_is_rejected() {
    let err = RegularGraphGenerator::new().generate_seeded(1, 3, 0).unwrap_err();
    assert!(matches!(err, NetError::InvalidGraphParameters { .. }), "{err:?}");
}

#[test]
fn degree_out_of_range_is_rejected() {
    let generator = RegularGraphGenerator::new();
    for (degree, n) in [(4, 4), (6, 2), (2, 0)] {
        let err = generator.generate_seeded(degree, n, 0).unwrap_err();
        assert!(
            matches!(err, NetError::InvalidGraphParameters { .. }),
            "d={degree} n={n}: {err:?}"
        );
    }
}

#[test]
fn zero_degree_gives_empty_graph() {
    let edges = RegularGraphGenerator::new().generate_seeded(0, 5, 0).unwrap();
    assert!(edges.is_empty());
}

#[test]
fn attempt_cap_still_allows_success() {
    let generator = RegularGraphGenerator::with_max_attempts(1_000);
    let edges = generator.generate_seeded(4, 21, 3).expect("should succeed well within the cap");
    assert_regular(&edges, 4, 21);
}

#[test]
fn attempt_cap_reports_generation_failure() {
    let capped = RegularGraphGenerator::with_max_attempts(1);
    let unbounded = RegularGraphGenerator::new();

    // 4 个节点上的 2-正则图：一次配对经常剩下自环或重边，只能重来
    let failing_seed = (0..200u64)
        .find(|&seed| capped.generate_seeded(2, 4, seed).is_err())
        .expect("some seed needs more than one attempt");
    assert_eq!(
        capped.generate_seeded(2, 4, failing_seed),
        Err(NetError::GenerationFailed { attempts: 1 })
    );

    let edges = unbounded
        .generate_seeded(2, 4, failing_seed)
        .expect("unbounded retries eventually succeed");
    assert_regular(&edges, 2, 4);
}

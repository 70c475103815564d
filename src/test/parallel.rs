use crate::error::NetError;
use crate::graph::{Adjacency, LinkKey, Path};
use crate::path::{
    ParallelPathComputer, PathSet, chunk_pairs, k_shortest_paths, link_usage_histogram,
};
use crate::topo::{FatTreeOpts, JellyfishOpts, build_fat_tree, build_jellyfish};

fn pairs(n: usize) -> Vec<(String, String)> {
    (0..n).map(|i| (format!("s{i}"), format!("d{i}"))).collect()
}

fn server_pairs(servers: &[String]) -> Vec<(String, String)> {
    let n = servers.len();
    (0..n)
        .map(|i| (servers[i].clone(), servers[(i + 1) % n].clone()))
        .collect()
}

#[test]
fn chunks_are_contiguous_and_near_equal() {
    let sizes = |n, p| chunk_pairs(&pairs(n), p).iter().map(|c| c.len()).collect::<Vec<_>>();
    assert_eq!(sizes(10, 4), vec![3, 3, 2, 2]);
    assert_eq!(sizes(9, 4), vec![3, 2, 2, 2]);
    assert_eq!(sizes(8, 4), vec![2, 2, 2, 2]);
    assert_eq!(sizes(5, 4), vec![2, 1, 1, 1]);
    assert_eq!(sizes(3, 8), vec![1, 1, 1]);
    assert_eq!(sizes(5, 0), vec![5]);
    assert!(sizes(0, 4).is_empty());

    // 每个 worker 都分到一块
    for (n, p) in [(6, 4), (9, 4), (7, 7), (100, 16)] {
        assert_eq!(sizes(n, p).len(), p, "n={n} p={p}");
        let s = sizes(n, p);
        assert!(s.windows(2).all(|w| w[0] >= w[1] && w[0] - w[1] <= 1), "n={n} p={p}: {s:?}");
        assert_eq!(s.iter().sum::<usize>(), n);
    }

    let input = pairs(11);
    let flat: Vec<_> = chunk_pairs(&input, 3).into_iter().flatten().collect();
    assert_eq!(flat, input, "order is preserved");
}

#[test]
fn parallel_matches_sequential_on_fat_tree() {
    let ft = build_fat_tree(&FatTreeOpts::with_k(4)).unwrap();
    let adj = ft.topology.adjacency();
    let servers: Vec<String> = ft.servers.iter().map(|id| ft.name(*id).to_string()).collect();
    let work = server_pairs(&servers);

    let parallel = ParallelPathComputer::new(4, 3).compute_all(&adj, &work).unwrap();
    assert_eq!(parallel.len(), work.len());

    let mut local = adj.clone();
    for (src, dst) in &work {
        let expected = k_shortest_paths(4, &mut local, src, dst).unwrap();
        assert_eq!(parallel[&(src.clone(), dst.clone())], expected, "{src}->{dst}");
    }
}

#[test]
fn parallel_on_jellyfish_with_more_workers_than_pairs() {
    let jf = build_jellyfish(&JellyfishOpts::default()).unwrap();
    let adj = jf.topology.adjacency();
    let servers: Vec<String> = jf
        .servers
        .iter()
        .map(|id| jf.topology.node(*id).name().to_string())
        .collect();
    let work = server_pairs(&servers[..5]);

    let all = ParallelPathComputer::new(3, 16).compute_all(&adj, &work).unwrap();
    assert_eq!(all.len(), 5);
    for paths in all.values() {
        assert!(!paths.is_empty() && paths.len() <= 3);
        assert!(paths.windows(2).all(|w| w[0].hop_count() <= w[1].hop_count()));
    }
}

#[test]
fn parallel_surfaces_worker_errors() {
    let adj = Adjacency::from_links([("a", "b"), ("c", "d")]);
    let work = vec![
        ("a".to_string(), "b".to_string()),
        ("a".to_string(), "d".to_string()),
    ];
    let err = ParallelPathComputer::new(2, 2).compute_all(&adj, &work).unwrap_err();
    assert!(matches!(err, NetError::Unreachable { .. }), "{err:?}");
}

#[test]
fn parallel_with_no_pairs_is_empty() {
    let adj = Adjacency::from_links([("a", "b")]);
    let all = ParallelPathComputer::new(2, 4).compute_all(&adj, &[]).unwrap();
    assert!(all.is_empty());
}

#[test]
fn histogram_counts_every_traversal_and_sorts() {
    let adj = Adjacency::from_links([("a", "b"), ("b", "c"), ("c", "d"), ("a", "d")]);
    let path = |nodes: &[&str]| Path::new(nodes.iter().map(|s| s.to_string()).collect());

    let mut set = PathSet::new();
    set.insert(
        ("a".into(), "c".into()),
        vec![path(&["a", "b", "c"]), path(&["a", "d", "c"])],
    );
    set.insert(("b".into(), "c".into()), vec![path(&["b", "c"])]);

    let hist = link_usage_histogram(&set, &adj.links()).unwrap();
    let flat: Vec<(String, u64)> = hist.iter().map(|u| (u.link.to_string(), u.count)).collect();
    assert_eq!(
        flat,
        vec![
            ("a<->b".to_string(), 1),
            ("a<->d".to_string(), 1),
            ("c<->d".to_string(), 1),
            ("b<->c".to_string(), 2),
        ]
    );
}

#[test]
fn histogram_keeps_unused_links_and_rejects_unknown_ones() {
    let adj = Adjacency::from_links([("a", "b"), ("b", "c")]);
    let hist = link_usage_histogram(&PathSet::new(), &adj.links()).unwrap();
    assert_eq!(hist.len(), 2);
    assert!(hist.iter().all(|u| u.count == 0));

    let mut set = PathSet::new();
    set.insert(
        ("a".into(), "c".into()),
        vec![Path::new(vec!["a".into(), "c".into()])],
    );
    assert_eq!(
        link_usage_histogram(&set, &adj.links()),
        Err(NetError::UnknownLink {
            from: "a".to_string(),
            to: "c".to_string(),
        })
    );
}

#[test]
fn histogram_total_equals_total_hops() {
    let ft = build_fat_tree(&FatTreeOpts::with_k(4)).unwrap();
    let adj = ft.topology.adjacency();
    let servers: Vec<String> = ft.servers.iter().map(|id| ft.name(*id).to_string()).collect();
    let all = ParallelPathComputer::new(2, 2)
        .compute_all(&adj, &server_pairs(&servers))
        .unwrap();

    let links: Vec<LinkKey> = adj.links();
    let hist = link_usage_histogram(&all, &links).unwrap();
    assert_eq!(hist.len(), ft.topology.edges().count());
    let total: u64 = hist.iter().map(|u| u.count).sum();
    let hops: usize = all.values().flatten().map(|p| p.hop_count()).sum();
    assert_eq!(total, hops as u64);
    assert!(hist.windows(2).all(|w| (w[0].count, &w[0].link) <= (w[1].count, &w[1].link)));
}

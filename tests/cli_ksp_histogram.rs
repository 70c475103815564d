use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "dcnet-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

fn link_counts(report: &Value) -> Vec<u64> {
    report["links"]
        .as_array()
        .expect("links array")
        .iter()
        .map(|l| l["count"].as_u64().expect("count"))
        .collect()
}

#[test]
fn ksp_histogram_on_small_jellyfish_writes_sorted_report() {
    let dir = unique_temp_dir("ksp-jellyfish");
    let out_json = dir.join("hist.json");

    let output = Command::new(env!("CARGO_BIN_EXE_ksp_histogram"))
        .args([
            "--servers",
            "20",
            "--switches",
            "10",
            "--ports",
            "6",
            "--seed",
            "1",
            "--k-paths",
            "3",
            "--parallelism",
            "2",
            "--out",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run ksp_histogram");
    assert!(
        output.status.success(),
        "ksp_histogram failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    // 20 条服务器链路 + 10 * 4 / 2 条交换机链路
    let ranks = stdout.lines().filter(|l| l.starts_with("link_rank ")).count();
    assert_eq!(ranks, 40);

    let raw = fs::read_to_string(&out_json).expect("read hist.json");
    let v: Value = serde_json::from_str(&raw).expect("parse hist.json");
    assert_eq!(v["k_paths"], 3);
    assert_eq!(v["pairs"], 20);
    let counts = link_counts(&v);
    assert_eq!(counts.len(), 40);
    assert!(counts.windows(2).all(|w| w[0] <= w[1]), "{counts:?}");
    assert!(counts.iter().sum::<u64>() > 0);
}

#[test]
fn ksp_histogram_reads_fat_tree_spec() {
    let dir = unique_temp_dir("ksp-fat-tree");
    let spec = write_file(
        &dir,
        "spec.json",
        r#"
{
    "topology": { "kind": "fat_tree", "k": 4 },
    "k_paths": 4,
    "parallelism": 3,
    "traffic_seed": 11
}
        "#,
    );
    let out_json = dir.join("hist.json");

    let output = Command::new(env!("CARGO_BIN_EXE_ksp_histogram"))
        .args([
            "--spec",
            spec.to_str().unwrap(),
            "--out",
            out_json.to_str().unwrap(),
        ])
        .output()
        .expect("run ksp_histogram");
    assert!(
        output.status.success(),
        "ksp_histogram failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: Value =
        serde_json::from_str(&fs::read_to_string(&out_json).expect("read hist.json")).unwrap();
    assert_eq!(v["pairs"], 16);
    let counts = link_counts(&v);
    assert_eq!(counts.len(), 48);
    // 每台服务器恰好发送一次，每对至少有一条不短于 2 跳的路径
    assert!(counts.iter().sum::<u64>() >= 16 * 2);
}

#[test]
fn ksp_histogram_fails_when_servers_exceed_ports() {
    let output = Command::new(env!("CARGO_BIN_EXE_ksp_histogram"))
        .args([
            "--servers",
            "21",
            "--switches",
            "10",
            "--ports",
            "6",
            "--k-paths",
            "1",
        ])
        .output()
        .expect("run ksp_histogram");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ksp-histogram:"), "stderr={stderr}");
}

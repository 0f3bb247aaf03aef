use std::fs;
use std::path::{Path, PathBuf};

// The submitter owns the order state machine (attempt/terminal audit
// entries, mock short-circuit). Anything else calling the exchange client
// directly would bypass the audit trail.
const ALLOWED_CREATE_ORDER_CALLERS: &[&str] = &[
    "src/submit.rs",
    "src/adapters/sim.rs", // its own unit tests exercise the synthetic fill
];

fn collect_rust_files(root: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(root) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rust_files(&path, out);
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) == Some("rs") {
            out.push(path);
        }
    }
}

#[test]
fn direct_create_order_calls_are_limited_to_the_submitter() {
    let repo_root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let src_root = repo_root.join("src");
    let mut files = Vec::new();
    collect_rust_files(&src_root, &mut files);

    let mut offenders = Vec::new();
    for file in files {
        let rel = file
            .strip_prefix(repo_root)
            .unwrap_or(&file)
            .to_string_lossy()
            .replace('\\', "/");
        let content = fs::read_to_string(&file).unwrap_or_default();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if !trimmed.contains(".create_order(") {
                continue;
            }
            if ALLOWED_CREATE_ORDER_CALLERS
                .iter()
                .any(|allowed| *allowed == rel)
            {
                continue;
            }
            offenders.push(format!("{rel}:{}: {}", idx + 1, trimmed));
        }
    }

    assert!(
        offenders.is_empty(),
        "direct exchange call outside the submitter:\n{}",
        offenders.join("\n")
    );
}

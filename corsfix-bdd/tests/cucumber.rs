use anyhow::Context;
use assert_cmd::Command;
use camino::Utf8PathBuf;
use corsfix_bdd::HandlerShape;
use cucumber::{World, given, then, when};
use fs_err as fs;
use tempfile::TempDir;

#[derive(Debug, Default, World)]
pub struct CorsfixWorld {
    temp: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    originals: Vec<(String, String)>,
    last_status: Option<i32>,
    last_stdout: String,
}

fn root(world: &CorsfixWorld) -> &Utf8PathBuf {
    world.root.as_ref().expect("root set")
}

fn handler_path(world: &CorsfixWorld, name: &str) -> Utf8PathBuf {
    root(world)
        .join("supabase")
        .join("functions")
        .join(name)
        .join("index.ts")
}

fn read_handler(world: &CorsfixWorld, name: &str) -> String {
    let path = handler_path(world, name);
    fs::read_to_string(&path)
        .with_context(|| format!("read handler {}", name))
        .unwrap()
}

fn run_corsfix(world: &mut CorsfixWorld, extra: &[&str], handlers: &[&str]) {
    let root = root(world).clone();
    let mut cmd = Command::cargo_bin("corsfix").expect("corsfix binary");
    cmd.current_dir(root.as_str()).args(extra);
    for name in handlers {
        cmd.args(["--handler", name]);
    }
    let output = cmd.output().expect("run corsfix");
    world.last_status = output.status.code();
    world.last_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
}

#[given(expr = "a project with a {string} handler named {string}")]
async fn project_with_handler(world: &mut CorsfixWorld, shape: String, name: String) {
    if world.root.is_none() {
        let td = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();
        world.temp = Some(td);
        world.root = Some(root);
    }

    let shape = HandlerShape::parse(&shape).expect("known handler shape");
    let path = handler_path(world, &name);
    fs::create_dir_all(path.parent().expect("handler dir")).unwrap();
    fs::write(&path, shape.source()).unwrap();
    world.originals.push((name, shape.source().to_string()));
}

#[when(expr = "I run corsfix for {string}")]
async fn run_for_one(world: &mut CorsfixWorld, name: String) {
    run_corsfix(world, &[], &[&name]);
}

#[when(expr = "I run corsfix for {string} again")]
async fn run_again(world: &mut CorsfixWorld, name: String) {
    run_corsfix(world, &[], &[&name]);
}

#[when(expr = "I run corsfix for {string} and {string}")]
async fn run_for_two(world: &mut CorsfixWorld, first: String, second: String) {
    run_corsfix(world, &[], &[&first, &second]);
}

#[when(expr = "I run corsfix in dry-run mode for {string}")]
async fn run_dry(world: &mut CorsfixWorld, name: String) {
    run_corsfix(world, &["--dry-run"], &[&name]);
}

#[when(expr = "I run corsfix with JSON output for {string}, {string} and {string}")]
async fn run_json(world: &mut CorsfixWorld, a: String, b: String, c: String) {
    run_corsfix(world, &["--format", "json"], &[&a, &b, &c]);
}

#[then("the run succeeds")]
async fn run_succeeds(world: &mut CorsfixWorld) {
    assert_eq!(
        world.last_status,
        Some(0),
        "corsfix failed; stdout:\n{}",
        world.last_stdout
    );
}

#[then(expr = "the output reports {string}")]
async fn output_reports(world: &mut CorsfixWorld, text: String) {
    assert!(
        world.last_stdout.contains(&text),
        "expected {:?} in output:\n{}",
        text,
        world.last_stdout
    );
}

#[then(expr = "the {string} handler imports the security helper")]
async fn imports_helper(world: &mut CorsfixWorld, name: String) {
    let text = read_handler(world, &name);
    assert!(text.contains(
        "import { getCorsHeaders, handleCorsPrelight } from '../_shared/security.ts';\n"
    ));
    assert_eq!(text.matches("_shared/security.ts").count(), 1);
}

#[then(expr = "the {string} handler no longer contains a wildcard origin")]
async fn no_wildcard(world: &mut CorsfixWorld, name: String) {
    let text = read_handler(world, &name);
    assert!(!text.contains("'Access-Control-Allow-Origin': '*'"));
    assert!(text.contains("const corsHeaders = getCorsHeaders(req);"));
}

#[then(expr = "the {string} handler still contains a wildcard origin")]
async fn still_wildcard(world: &mut CorsfixWorld, name: String) {
    let text = read_handler(world, &name);
    assert!(text.contains("'Access-Control-Allow-Origin': '*'"));
}

#[then(expr = "the {string} handler answers preflight with the helper")]
async fn preflight_helper(world: &mut CorsfixWorld, name: String) {
    let text = read_handler(world, &name);
    assert!(text.contains("return handleCorsPrelight(req);"));
    assert!(!text.contains("new Response(null"));
}

#[then(expr = "the {string} backup holds the original text")]
async fn backup_holds_original(world: &mut CorsfixWorld, name: String) {
    let backup = Utf8PathBuf::from(format!("{}.bak", handler_path(world, &name)));
    let original = world
        .originals
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| text.clone())
        .expect("original recorded");
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);
}

#[then(expr = "no backup exists for {string}")]
async fn no_backup(world: &mut CorsfixWorld, name: String) {
    let backup = Utf8PathBuf::from(format!("{}.bak", handler_path(world, &name)));
    assert!(!backup.exists(), "unexpected backup {}", backup);
}

#[then(expr = "the JSON summary reports {int} fixed, {int} skipped and {int} not found")]
async fn json_counts(world: &mut CorsfixWorld, fixed: u64, skipped: u64, not_found: u64) {
    let v: serde_json::Value = serde_json::from_str(&world.last_stdout).expect("json stdout");
    assert_eq!(v["schema"], corsfix_types::schema::CORSFIX_SUMMARY_V1);
    assert_eq!(v["fixed"].as_u64(), Some(fixed));
    assert_eq!(v["skipped"].as_u64(), Some(skipped));
    assert_eq!(v["not_found"].as_u64(), Some(not_found));
    assert_eq!(v["errors"].as_u64(), Some(0));
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    CorsfixWorld::cucumber().run(features_path).await;
}

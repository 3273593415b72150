use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_refindex")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read_json(path: &Path) -> serde_json::Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    serde_json::from_str(&text).unwrap()
}

/// Config with the Deno, Node and a broken package pointing at fixtures.
fn write_reference_config(dir: &Path) -> String {
    let config = format!(
        r#"
[reference]
url_root = "/api"

[[reference.packages]]
name = "Deno"
files = ['{types}/deno.json']
category_docs = '{categories}/deno-categories.json'

[[reference.packages]]
name = "Node"
files = ['{types}/node__*.json']

[[reference.packages]]
name = "Broken"
files = ['{types}/broken.json', '{types}/missing.json']
"#,
        types = fixture_path("types"),
        categories = fixture_path("categories"),
    );
    let path = dir.join("refindex.toml");
    std::fs::write(&path, config).unwrap();
    path.to_string_lossy().to_string()
}

fn titles(index: &serde_json::Value) -> Vec<String> {
    index["documents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["title"].as_str().unwrap().to_string())
        .collect()
}

// -- index --

#[test]
fn index_writes_full_and_minimal() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["index", "--root", &fixture_path("docs")])
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["--base-url", "https://docs.example.com"])
        .assert()
        .success();

    let full = read_json(&dir.path().join("orama-index.json"));
    assert_eq!(
        titles(&full),
        vec!["Testing in Deno", "Getting Started", "deno serve", "Build a Fresh App"]
    );
    assert_eq!(full["metadata"]["version"], "1.0.0");
    assert_eq!(full["metadata"]["baseUrl"], "https://docs.example.com");
    assert_eq!(full["metadata"]["totalDocuments"], 4);
    assert_eq!(full["metadata"]["stats"]["categoryCounts"]["runtime"], 3);
    assert_eq!(full["metadata"]["stats"]["documentsWithTags"], 1);

    let testing = &full["documents"][0];
    assert_eq!(testing["id"], "runtime-fundamentals-testing");
    assert_eq!(testing["url"], "https://docs.example.com/runtime/fundamentals/testing");
    assert_eq!(
        testing["headings"],
        serde_json::json!(["Testing", "Writing tests", "Running tests"])
    );
    assert_eq!(testing["tags"], serde_json::json!(["testing", "cli"]));
    assert!(!testing["content"].as_str().unwrap().contains("Deno.test(\"add\""));

    let started = &full["documents"][1];
    assert_eq!(started["url"], "https://docs.example.com/runtime/getting_started/");
    assert!(started.get("description").is_none());

    let serve = &full["documents"][2];
    assert_eq!(serve["kind"], "cli");
    assert_eq!(serve["command"], "serve");

    assert_eq!(full["documents"][3]["url"], "https://docs.example.com/examples/fresh_tutorial");

    let minimal = read_json(&dir.path().join("orama-index-minimal.json"));
    assert_eq!(minimal["documents"].as_array().unwrap().len(), 4);
    assert!(minimal["documents"][0].get("content").is_none());
    assert!(minimal["documents"][0]["contentPreview"].is_string());
}

#[test]
fn index_skips_excluded_files() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["index", "--root", &fixture_path("docs"), "-o", dir.path().to_str().unwrap()])
        .assert()
        .success();

    let full = read_json(&dir.path().join("orama-index.json"));
    let found = titles(&full);
    assert!(!found.iter().any(|t| t == "Draft"));
    assert!(!found.iter().any(|t| t == "Runtime docs"));
    assert!(!found.iter().any(|t| t == "Tiny"));
}

#[test]
fn index_minimal_only() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["index", "--root", &fixture_path("docs"), "-o", dir.path().to_str().unwrap()])
        .args(["--format", "minimal"])
        .assert()
        .success();

    assert!(dir.path().join("orama-index-minimal.json").is_file());
    assert!(!dir.path().join("orama-index.json").exists());
}

#[test]
fn index_missing_output_dir_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("static");

    cmd()
        .current_dir(dir.path())
        .args(["index", "--root", &fixture_path("docs"), "-o", missing.to_str().unwrap()])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));

    assert!(!missing.exists());
}

#[test]
fn index_unknown_format_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["index", "--root", &fixture_path("docs"), "-o", dir.path().to_str().unwrap()])
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn index_skips_unreadable_inputs_and_continues() {
    let dir = TempDir::new().unwrap();
    let runtime = dir.path().join("runtime");
    std::fs::create_dir(&runtime).unwrap();
    std::fs::write(
        runtime.join("good.md"),
        "---\ntitle: Good Page\n---\nThis page has plenty of readable text to pass the length gate.\n",
    )
    .unwrap();
    std::fs::write(runtime.join("bad_bytes.md"), b"# Bad\n\n\xff\xfe\xfd not utf-8 \xc3\x28").unwrap();
    std::fs::write(dir.path().join("web.json"), "this is not json").unwrap();

    let config = dir.path().join("index.toml");
    std::fs::write(
        &config,
        r#"
[index]
include_dirs = ["runtime"]

[[index.reference_files]]
path = "web.json"
package = "Web"
base_url = "/api/web"
"#,
    )
    .unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-c", config.to_str().unwrap(), "index", "--root", "."])
        .args(["-o", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("bad_bytes.md"))
        .stderr(predicate::str::contains("web.json"));

    let full = read_json(&dir.path().join("orama-index.json"));
    assert_eq!(titles(&full), vec!["Good Page"]);
    assert_eq!(full["metadata"]["stats"]["apiDocuments"], 0);
}

// -- reference --

#[test]
fn reference_writes_artifact_per_package() {
    let dir = TempDir::new().unwrap();
    let config = write_reference_config(dir.path());
    let out = dir.path().join("gen");

    cmd()
        .current_dir(dir.path())
        .args(["-c", &config, "reference", "-o", out.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("broken.json"));

    let deno = read_json(&out.join("deno.json"));
    assert_eq!(deno["package"], "Deno");
    assert_eq!(deno["totalSymbols"], 5);

    let category_titles: Vec<_> = deno["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(category_titles, vec!["File System", "HTTP Server", "All Symbols"]);
    assert_eq!(deno["categories"][0]["description"], "Read and write files and directories.");
    assert_eq!(deno["categories"][0]["url"], "/api/deno/file_system");
    assert_eq!(deno["categories"][1]["description"], "");
    assert_eq!(
        deno["namespaces"]["Deno"],
        serde_json::json!(["Deno.FsFile", "Deno.readFile", "Deno.serve", "Deno.pid"])
    );

    let fs_file = deno["symbols"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["identifier"] == "Deno.FsFile")
        .unwrap();
    assert_eq!(fs_file["kind"], "class");
    assert_eq!(fs_file["page"], "class");
    assert_eq!(fs_file["url"], "/api/deno/Deno.FsFile");
    assert_eq!(
        fs_file["data"]["jsDoc"]["doc"],
        "The Deno abstraction for reading and writing files.\n\nDisposable handle to an open file."
    );
    // Interface members are not folded into the class definition
    assert_eq!(fs_file["data"]["classDef"]["methods"].as_array().unwrap().len(), 2);
    assert_eq!(fs_file["data"]["location"]["line"], 10);

    let node = read_json(&out.join("node.json"));
    assert_eq!(node["categories"][0]["title"], "fs/promises");
    assert_eq!(node["categories"][0]["urlStub"], "fspromises");
    assert_eq!(node["categories"][0]["fromNode"], true);

    assert!(!out.join("broken.json").exists());
}

#[test]
fn reference_package_filter() {
    let dir = TempDir::new().unwrap();
    let config = write_reference_config(dir.path());
    let out = dir.path().join("gen");

    cmd()
        .current_dir(dir.path())
        .args(["-c", &config, "reference", "-o", out.to_str().unwrap(), "node"])
        .assert()
        .success();

    assert!(out.join("node.json").is_file());
    assert!(!out.join("deno.json").exists());
}

#[test]
fn reference_then_index_api_symbols() {
    let dir = TempDir::new().unwrap();
    let config = write_reference_config(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["-c", &config, "reference", "-o", "gen", "deno"])
        .assert()
        .success();

    let index_config = dir.path().join("index.toml");
    std::fs::write(
        &index_config,
        r#"
base_url = "https://docs.deno.com"

[index]
include_dirs = []

[[index.reference_files]]
path = "gen/deno.json"
package = "Deno"
base_url = "/api/deno"
"#,
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-c", index_config.to_str().unwrap(), "index", "--root", "."])
        .assert()
        .success();

    let full = read_json(&dir.path().join("static/orama-index.json"));
    assert_eq!(titles(&full), vec!["Deno.FsFile", "Deno.readFile", "Deno.serve"]);
    assert_eq!(full["metadata"]["stats"]["apiDocuments"], 3);
    let read_file = &full["documents"][1];
    assert_eq!(read_file["url"], "https://docs.deno.com/api/deno/Deno.readFile");
    assert_eq!(read_file["apiInfo"]["symbolType"], "function");
    assert_eq!(read_file["apiInfo"]["packageName"], "Deno");
    assert_eq!(read_file["tags"], serde_json::json!(["File System"]));
}

// -- analyze --

#[test]
fn analyze_prints_summary() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["index", "--root", &fixture_path("docs"), "-o", dir.path().to_str().unwrap()])
        .assert()
        .success();

    cmd()
        .current_dir(dir.path())
        .arg("analyze")
        .arg(dir.path().join("orama-index.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Documents: 4"))
        .stdout(predicate::str::contains("runtime: 3 documents"));
}

#[test]
fn analyze_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["analyze", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.json"));
}

// -- configuration --

#[test]
fn invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.toml");
    std::fs::write(&config, "base_url = [").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["-c", config.to_str().unwrap(), "analyze"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn config_file_in_working_directory_is_used() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("refindex.toml"),
        format!("[index]\nroot = '{}'\ninclude_dirs = [\"examples\"]\n", fixture_path("docs")),
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("static")).unwrap();

    cmd().current_dir(dir.path()).arg("index").assert().success();

    let full = read_json(&dir.path().join("static/orama-index.json"));
    assert_eq!(titles(&full), vec!["Build a Fresh App"]);
}

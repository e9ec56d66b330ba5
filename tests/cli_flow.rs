mod harness;

use harness::TestContext;
use harness::templates::ACME_ENGAGEMENT;
use predicates::prelude::*;

#[test]
fn init_config_writes_sample_and_refuses_to_overwrite() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote sample settings"));
    assert!(ctx.settings_path().is_file());

    ctx.cli()
        .arg("init-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn plan_lists_tasks_without_writing() {
    let ctx = TestContext::new();
    ctx.write_settings("");
    ctx.write_engagement(ACME_ENGAGEMENT);

    ctx.cli()
        .args(["plan", "engagement.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Plan for"))
        .stdout(predicate::str::contains("Cluster prod (slurm scheduler"))
        .stdout(predicate::str::contains("prodDesktop.conf"))
        .stdout(predicate::str::contains("mpiLibConf.m"))
        .stdout(predicate::str::contains("Missing template sources").not());

    assert!(!ctx.organization_dir("acme").exists());
}

#[test]
fn plan_warns_about_missing_plugin() {
    let ctx = TestContext::new();
    ctx.write_settings("");
    ctx.write_engagement(ACME_ENGAGEMENT);
    std::fs::remove_dir_all(ctx.scripts().join("matlab-parallel-slurm-plugin-main")).unwrap();

    ctx.cli()
        .args(["p", "engagement.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Missing template sources"))
        .stdout(predicate::str::contains("matlab-parallel-slurm-plugin-main"));
}

#[test]
fn scaffold_local_only_reports_generated_tree() {
    let ctx = TestContext::new();
    ctx.write_settings("");
    ctx.write_engagement(ACME_ENGAGEMENT);

    ctx.cli()
        .args(["scaffold", "engagement.toml", "--local-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Generated integration scripts for 1 cluster(s)"))
        .stdout(predicate::str::contains("✅ Repository: initialized"));

    assert!(ctx.contact_dir("acme", "jane-doe").join("README.md").is_file());
}

#[test]
fn scaffold_with_explicit_config_path() {
    let ctx = TestContext::new();
    let settings = ctx.write_settings("[scaffold]\nrelease = \"R2023b\"\n");
    std::fs::rename(&settings, ctx.root().join("custom.toml")).unwrap();
    ctx.write_engagement(ACME_ENGAGEMENT);

    ctx.cli()
        .args(["s", "engagement.toml", "--local-only", "--config"])
        .arg(ctx.root().join("custom.toml"))
        .assert()
        .success();

    assert!(ctx.contact_dir("acme", "jane-doe").join("scripts/slurm/R2023b/matlab").is_dir());
}

#[test]
fn missing_engagement_file_fails() {
    let ctx = TestContext::new();
    ctx.write_settings("");

    ctx.cli()
        .args(["scaffold", "absent.toml", "--local-only"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Engagement file not found"));
}

#[test]
fn unknown_settings_keys_are_listed() {
    let ctx = TestContext::new();
    ctx.write_settings("downloadScriptsOnLaunch = true\n");
    ctx.write_engagement(ACME_ENGAGEMENT);

    ctx.cli()
        .args(["plan", "engagement.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized settings: paths.downloadScriptsOnLaunch"));
}

#[test]
fn new_refuses_existing_output() {
    let ctx = TestContext::new();
    ctx.write_engagement(ACME_ENGAGEMENT);

    ctx.cli()
        .args(["new", "engagement.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn verbose_and_quiet_conflict() {
    let ctx = TestContext::new();

    ctx.cli().args(["-v", "-q", "init-config"]).assert().failure();
}

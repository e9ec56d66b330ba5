//! Writes a minimal template tree: `Utilities/` fragments and extracted plugins.

use std::fs;
use std::path::Path;

pub(crate) const SCHEDULERS: [&str; 7] =
    ["slurm", "pbs", "lsf", "gridengine", "htcondor", "awsbatch", "kubernetes"];
pub(crate) const PLUGIN_ONLY: [&str; 3] = ["htcondor", "awsbatch", "kubernetes"];

pub(crate) const CONF_TEMPLATE: &str = concat!(
    "# Cluster profile generated for cluster_name\n",
    "Name = profile_name\n",
    "NumWorkers = 100000\n",
    "ClusterMatlabRoot = \n",
    "ClusterHost =\n",
    "QueueName = \n",
    "Partition = \n",
    "HasSharedFilesystem = true\n",
    "JobStorageLocation = /home/cluster_name\n",
);

/// Acme with one slurm cluster that submits from both desktop and cluster.
pub(crate) const ACME_ENGAGEMENT: &str = r#"
organization = "Acme"
abbreviation = "ACM"
contact = "Jane Doe"

[[clusters]]
name = "Prod"
scheduler = "slurm"
submission = "both"
workers = 5000
matlab_root = "/opt/matlab/R2024a"
hostname = "login.acme.com"
"#;

const CONF_FILES: [&str; 4] =
    ["hpcDesktop.conf", "hpcCluster.conf", "hpcRemoteDesktop.conf", "hpcRemoteCluster.conf"];
const MATLAB_FILES: [&str; 5] =
    ["mdcs.rc", "licenseCheck.m", "parseGenericTemplateFile.m", "mpiLibConf.m", "ClusterInfo.m"];
const PCT_DEBUG_FILES: [&str; 4] =
    ["ClientJavaLogging.p", "ClientJavaMessageHandler.p", "Finalize.p", "Init.p"];

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Populate `<repository>/Utilities` and `<scripts>/matlab-parallel-<s>-plugin-main`.
pub(crate) fn write_template_tree(repository: &Path, scripts: &Path, schedulers: &[&str]) {
    let utilities = repository.join("Utilities");
    write(
        &utilities.join("doc/Getting_Started_With_Serial_And_Parallel_MATLAB.docx"),
        "getting started",
    );
    write(&utilities.join("doc/README.txt"), "docs");
    write(&utilities.join("pub/index.html"), "<html></html>");
    for file in PCT_DEBUG_FILES {
        write(&utilities.join("+pctDebug").join(file), "p-code");
    }
    write(&utilities.join("helper-fcn/common/configCluster.m"), "function configCluster\n");
    for file in CONF_FILES {
        write(&utilities.join("conf-files").join(file), CONF_TEMPLATE);
    }
    for file in MATLAB_FILES {
        write(&utilities.join("matlab-files").join(file), "% shipped\n");
    }

    for scheduler in schedulers {
        if !PLUGIN_ONLY.contains(scheduler) {
            write(
                &utilities.join("config-scripts").join(scheduler).join("bin/submit.sh"),
                "#!/bin/sh\n",
            );
            write(&utilities.join("helper-fcn").join(scheduler).join("discover"), "#!/bin/sh\n");
        }
        let plugin = scripts.join(format!("matlab-parallel-{}-plugin-main", scheduler));
        write(&plugin.join("independentSubmitFcn.m"), "function independentSubmitFcn\n");
        write(&plugin.join("communicatingSubmitFcn.m"), "function communicatingSubmitFcn\n");
        write(&plugin.join("discover"), "#!/bin/sh\n");
    }
}

/// Every file path under `root`, relative and with `/` separators.
pub(crate) fn list_files(root: &Path) -> Vec<String> {
    let mut files = Vec::new();
    collect(root, root, &mut files);
    files.sort();
    files
}

fn collect(root: &Path, dir: &Path, files: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.file_name().is_some_and(|name| name == ".git") {
            continue;
        }
        if path.is_dir() {
            collect(root, &path, files);
        } else {
            let relative = path.strip_prefix(root).unwrap();
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}

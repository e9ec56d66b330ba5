//! Flat token substitution for generated config files.
//!
//! A [`TemplateTokenMap`] is an ordered list of literal `token -> replacement`
//! rules. Rewriting is a single left-to-right pass per line: at each position
//! the earliest matching token wins (ties go to the rule inserted first), its
//! replacement is emitted, and scanning resumes after the matched token.
//! Replacement text is never rescanned, so a replacement that contains
//! another token cannot trigger a second substitution.

use crate::domain::{ClusterSpec, ConfigVariant, Scheduler, Slug};

/// Lines starting with this marker are passed through untouched.
pub const COMMENT_MARKER: &str = "#";

/// Where a rule must not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenException {
    Variant(ConfigVariant),
    Scheduler(Scheduler),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRule {
    pub token: String,
    pub replacement: String,
    exceptions: Vec<TokenException>,
}

impl TokenRule {
    fn applies_to(&self, variant: ConfigVariant, scheduler: Scheduler) -> bool {
        !self.exceptions.iter().any(|exception| match exception {
            TokenException::Variant(v) => *v == variant,
            TokenException::Scheduler(s) => *s == scheduler,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateTokenMap {
    rules: Vec<TokenRule>,
}

impl TemplateTokenMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or update a rule. Updating keeps the rule's original position.
    pub fn insert(&mut self, token: impl Into<String>, replacement: impl Into<String>) -> &mut Self {
        self.insert_except(token, replacement, &[])
    }

    pub fn insert_except(
        &mut self,
        token: impl Into<String>,
        replacement: impl Into<String>,
        exceptions: &[TokenException],
    ) -> &mut Self {
        let token = token.into();
        if token.is_empty() {
            return self;
        }
        let replacement = replacement.into();
        let exceptions = exceptions.to_vec();
        match self.rules.iter_mut().find(|rule| rule.token == token) {
            Some(rule) => {
                rule.replacement = replacement;
                rule.exceptions = exceptions;
            }
            None => self.rules.push(TokenRule { token, replacement, exceptions }),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &TokenRule> {
        self.rules.iter()
    }

    /// Standard substitutions for a cluster's profile config files.
    pub fn for_cluster(spec: &ClusterSpec) -> Self {
        let no_queue_name: Vec<TokenException> = Scheduler::ALL
            .into_iter()
            .filter(|s| !s.uses_queue_name())
            .map(TokenException::Scheduler)
            .collect();
        let no_partition: Vec<TokenException> = Scheduler::ALL
            .into_iter()
            .filter(|s| !s.uses_partition())
            .map(TokenException::Scheduler)
            .collect();

        let mut map = Self::new();
        map.insert("NumWorkers = 100000", format!("NumWorkers = {}", spec.workers))
            .insert_except(
                "ClusterMatlabRoot = ",
                format!("ClusterMatlabRoot = {}", spec.matlab_root.as_deref().unwrap_or_default()),
                &[
                    TokenException::Variant(ConfigVariant::Cluster),
                    TokenException::Variant(ConfigVariant::RemoteCluster),
                ],
            )
            .insert_except(
                "ClusterHost =",
                format!("ClusterHost = {}", spec.hostname.as_deref().unwrap_or_default()),
                &[TokenException::Variant(ConfigVariant::Cluster)],
            )
            .insert("cluster_name", spec.name.as_str())
            .insert("profile_name", spec.profile_name.as_str())
            .insert_except("QueueName = ", "", &no_queue_name)
            .insert_except("Partition = ", "", &no_partition);
        if !spec.shared_filesystem {
            map.insert("HasSharedFilesystem = true", "HasSharedFilesystem = false");
        }
        map
    }

    /// Rules applicable to one file of one scheduler, exceptions dropped.
    pub fn resolve(&self, variant: ConfigVariant, scheduler: Scheduler) -> Self {
        let rules = self
            .rules
            .iter()
            .filter(|rule| rule.applies_to(variant, scheduler))
            .map(|rule| TokenRule { exceptions: Vec::new(), ..rule.clone() })
            .collect();
        Self { rules }
    }

    pub fn rewrite_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        let mut rest = line;
        loop {
            let earliest = self
                .rules
                .iter()
                .filter_map(|rule| rest.find(rule.token.as_str()).map(|pos| (pos, rule)))
                .min_by_key(|(pos, _)| *pos);
            match earliest {
                Some((pos, rule)) => {
                    out.push_str(&rest[..pos]);
                    out.push_str(&rule.replacement);
                    rest = &rest[pos + rule.token.len()..];
                }
                None => {
                    out.push_str(rest);
                    return out;
                }
            }
        }
    }

    /// Rewrite every non-comment line; drop lines the rewrite emptied.
    pub fn rewrite(&self, content: &str) -> String {
        let mut out = String::with_capacity(content.len());
        for line in content.lines() {
            if line.starts_with(COMMENT_MARKER) {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            let rewritten = self.rewrite_line(line);
            if rewritten.is_empty() && !line.is_empty() {
                continue;
            }
            out.push_str(&rewritten);
            out.push('\n');
        }
        out
    }
}

/// Replace a leading `placeholder` in a file name with the cluster slug.
pub fn rename_placeholder(file_name: &str, placeholder: &str, slug: &Slug) -> Option<String> {
    file_name.strip_prefix(placeholder).map(|rest| format!("{}{}", slug, rest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubmissionType;
    use proptest::prelude::*;

    fn spec(scheduler: Scheduler) -> ClusterSpec {
        ClusterSpec {
            name: Slug::new("Prod"),
            profile_name: "Prod".into(),
            scheduler,
            submission: SubmissionType::Both,
            workers: 5000,
            shared_filesystem: true,
            matlab_root: Some("/opt/matlab".into()),
            hostname: Some("login.acme.com".into()),
            custom_mpi: false,
            include_remote_config: false,
        }
    }

    const DESKTOP_CONF: &str = concat!(
        "# cluster_name profile for NumWorkers = 100000\n",
        "Name = profile_name\n",
        "NumWorkers = 100000\n",
        "ClusterMatlabRoot = \n",
        "ClusterHost =\n",
        "QueueName = \n",
        "Partition = \n",
        "\n",
        "JobStorageLocation = /home/cluster_name\n",
    );

    #[test]
    fn desktop_conf_for_slurm() {
        let tokens = TemplateTokenMap::for_cluster(&spec(Scheduler::Slurm))
            .resolve(ConfigVariant::Desktop, Scheduler::Slurm);
        let expected = concat!(
            "# cluster_name profile for NumWorkers = 100000\n",
            "Name = Prod\n",
            "NumWorkers = 5000\n",
            "ClusterMatlabRoot = /opt/matlab\n",
            "ClusterHost = login.acme.com\n",
            "Partition = \n",
            "\n",
            "JobStorageLocation = /home/prod\n",
        );
        assert_eq!(tokens.rewrite(DESKTOP_CONF), expected);
    }

    #[test]
    fn cluster_conf_skips_desktop_only_tokens() {
        let tokens = TemplateTokenMap::for_cluster(&spec(Scheduler::Pbs))
            .resolve(ConfigVariant::Cluster, Scheduler::Pbs);
        let rewritten = tokens.rewrite(DESKTOP_CONF);
        assert!(rewritten.contains("ClusterMatlabRoot = \n"));
        assert!(rewritten.contains("ClusterHost =\n"));
        assert!(rewritten.contains("QueueName = \n"), "pbs keeps QueueName");
        assert!(!rewritten.contains("Partition"), "pbs drops Partition");
    }

    #[test]
    fn remote_cluster_keeps_host_but_not_root() {
        let tokens = TemplateTokenMap::for_cluster(&spec(Scheduler::Lsf))
            .resolve(ConfigVariant::RemoteCluster, Scheduler::Lsf);
        let rewritten = tokens.rewrite(DESKTOP_CONF);
        assert!(rewritten.contains("ClusterMatlabRoot = \n"));
        assert!(rewritten.contains("ClusterHost = login.acme.com\n"));
    }

    #[test]
    fn shared_filesystem_flag_is_only_rewritten_when_false() {
        let mut unshared = spec(Scheduler::Slurm);
        unshared.shared_filesystem = false;
        let tokens = TemplateTokenMap::for_cluster(&unshared)
            .resolve(ConfigVariant::Desktop, Scheduler::Slurm);
        assert_eq!(tokens.rewrite("HasSharedFilesystem = true\n"), "HasSharedFilesystem = false\n");

        let tokens = TemplateTokenMap::for_cluster(&spec(Scheduler::Slurm));
        assert!(tokens.rules().all(|rule| !rule.token.starts_with("HasShared")));
    }

    #[test]
    fn replacement_text_is_not_rescanned() {
        let mut tokens = TemplateTokenMap::new();
        tokens.insert("a", "b").insert("b", "c");
        assert_eq!(tokens.rewrite_line("ab"), "bc");

        let mut tokens = TemplateTokenMap::new();
        tokens.insert("cluster_name", "cluster_name_prod");
        assert_eq!(tokens.rewrite_line("cluster_name"), "cluster_name_prod");
    }

    #[test]
    fn earliest_match_wins_then_insertion_order() {
        let mut tokens = TemplateTokenMap::new();
        tokens.insert("Host =", "X").insert("ClusterHost =", "Y");
        assert_eq!(tokens.rewrite_line("ClusterHost = a"), "Y a");

        let mut tokens = TemplateTokenMap::new();
        tokens.insert("Name", "first").insert("Name = ", "second");
        assert_eq!(tokens.rewrite_line("Name = x"), "first = x");
    }

    #[test]
    fn insert_updates_in_place() {
        let mut tokens = TemplateTokenMap::new();
        tokens.insert("a", "1").insert("b", "2").insert("a", "3").insert("", "ignored");
        let pairs: Vec<_> =
            tokens.rules().map(|r| (r.token.as_str(), r.replacement.as_str())).collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn emptied_lines_are_dropped_but_blank_lines_kept() {
        let mut tokens = TemplateTokenMap::new();
        tokens.insert("DROP", "");
        assert_eq!(tokens.rewrite("one\nDROP\n\n#DROP\ntwo\n"), "one\n\n#DROP\ntwo\n");
    }

    #[test]
    fn placeholder_rename() {
        let slug = Slug::new("Prod");
        assert_eq!(
            rename_placeholder("hpcDesktop.conf", "hpc", &slug).as_deref(),
            Some("prodDesktop.conf")
        );
        assert_eq!(rename_placeholder("mpiLibConf.m", "hpc", &slug), None);
    }

    proptest! {
        #[test]
        fn empty_map_is_a_no_op_on_clean_files(lines in prop::collection::vec("[^\r\n]*", 0..20)) {
            let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
            let tokens = TemplateTokenMap::new();
            let once = tokens.rewrite(&content);
            prop_assert_eq!(&once, &content);
            prop_assert_eq!(tokens.rewrite(&once), content);
        }

        #[test]
        fn renamed_names_never_keep_the_placeholder(suffix in "[A-Za-z]{1,12}\\.conf") {
            let slug = Slug::new("prod");
            let renamed = rename_placeholder(&format!("hpc{suffix}"), "hpc", &slug).unwrap();
            prop_assert!(!renamed.starts_with("hpc"));
            prop_assert!(renamed.starts_with("prod"));
        }
    }
}

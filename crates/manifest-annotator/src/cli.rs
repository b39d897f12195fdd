use clap::{Arg, ArgAction, Command};

pub fn build_cli() -> Command {
    Command::new("manifest-annotator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Add/Update annotations in a yaml manifest file")
        .long_about(
            "Updates a yaml manifest file without changing the file's structure, \
             removing comments, etc. Supports files with multiple manifests.",
        )
        .override_usage("manifest-annotator FILENAME ANNOTATION VALUE [OPTIONS]")
        .arg(Arg::new("filename").value_name("FILENAME").index(1))
        .arg(Arg::new("annotation").value_name("ANNOTATION").index(2))
        .arg(Arg::new("value").value_name("VALUE").index(3))
        .arg(
            Arg::new("extra")
                .index(4)
                .num_args(1..)
                .action(ArgAction::Append)
                .hide(true),
        )
        .arg(
            Arg::new("kind")
                .long("kind")
                .value_name("KIND")
                .help("[optional] Only annotate manifests with this kind"),
        )
        .arg(
            Arg::new("group_version")
                .long("groupVersion")
                .visible_alias("group-version")
                .value_name("GROUP_VERSION")
                .help("[optional] Only annotate manifests with this group and version"),
        )
        .arg(
            Arg::new("name")
                .long("name")
                .value_name("NAME")
                .help("[optional] Only annotate manifests with this name"),
        )
        .arg(
            Arg::new("namespace")
                .long("namespace")
                .value_name("NAMESPACE")
                .help("[optional] Only annotate manifests with this namespace"),
        )
        .arg(
            Arg::new("skip_annotation")
                .long("skip-annotation")
                .value_name("KEY")
                .help("[optional] Leave manifests carrying this annotation untouched"),
        )
        .arg(
            Arg::new("on_conflict")
                .long("on-conflict")
                .value_name("POLICY")
                .value_parser(["keep", "overwrite"])
                .default_value("keep")
                .help("What to do when the annotation already exists"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Print the annotated file instead of writing it"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log each document decision to stderr"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_group_version_flag_is_camel_case() {
        let matches = build_cli()
            .try_get_matches_from([
                "manifest-annotator",
                "f.yaml",
                "a",
                "b",
                "--groupVersion",
                "apps/v1",
            ])
            .ok();
        let gv = matches
            .as_ref()
            .and_then(|m| m.get_one::<String>("group_version"))
            .map(String::as_str);
        assert_eq!(gv, Some("apps/v1"));
    }

    #[test]
    fn test_surplus_positionals_are_collected() {
        let matches = build_cli()
            .try_get_matches_from(["manifest-annotator", "f.yaml", "a", "b", "c", "d"])
            .ok();
        let extra: Vec<&str> = matches
            .as_ref()
            .and_then(|m| m.get_many::<String>("extra"))
            .map(|values| values.map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(extra, vec!["c", "d"]);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = build_cli().try_get_matches_from([
            "manifest-annotator",
            "f.yaml",
            "a",
            "b",
            "--on-conflict",
            "replace",
        ]);
        assert!(result.is_err());
    }
}

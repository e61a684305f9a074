//! Expansion of bundle configs into build tasks.

use super::options::BuildOptions;
use crate::bundler::{BundleConfig, Result};
use std::{collections::HashMap, path::PathBuf};

/// One esbuild invocation: a config plus, optionally, one of its type variants.
#[derive(Debug, Clone, Copy)]
pub struct BuildTask<'a> {
    pub config: &'a BundleConfig,
    /// The declared type this task builds, if the config has any.
    pub variant: Option<&'a str>,
    /// Position of `variant` in the config's `types` list.
    pub variant_index: usize,
}

impl<'a> BuildTask<'a> {
    /// File name suffix inserted before the extension.
    ///
    /// Empty for untyped configs and for the first declared type;
    /// `.<type>` for every later type.
    pub fn suffix(&self) -> String {
        match self.variant {
            Some(kind) if self.variant_index > 0 => format!(".{kind}"),
            _ => String::new(),
        }
    }

    /// Output path computed from the config, before overrides.
    pub fn output_path(&self) -> PathBuf {
        self.config.output_path(&self.suffix())
    }

    /// esbuild options for this task, overrides applied.
    pub fn options(&self) -> Result<BuildOptions> {
        BuildOptions::resolve(self.config, self.output_path())
    }
}

/// Expands configs into tasks.
///
/// Configs keep their order; a config with a non-empty `types` list yields one
/// task per type in declaration order, any other config yields exactly one task.
pub fn expand_tasks(configs: &[BundleConfig]) -> Vec<BuildTask<'_>> {
    configs
        .iter()
        .flat_map(|config| {
            let types = config.types();
            if types.is_empty() {
                vec![BuildTask {
                    config,
                    variant: None,
                    variant_index: 0,
                }]
            } else {
                types
                    .iter()
                    .enumerate()
                    .map(|(variant_index, kind)| BuildTask {
                        config,
                        variant: Some(kind.as_str()),
                        variant_index,
                    })
                    .collect()
            }
        })
        .collect()
}

/// Output paths claimed by more than one task, with the number of claims.
///
/// Such tasks race to write the same file; the build still runs.
pub fn duplicate_outputs(tasks: &[BuildTask<'_>]) -> Vec<(PathBuf, usize)> {
    let mut seen: HashMap<PathBuf, usize> = HashMap::new();
    let mut order = Vec::new();

    for task in tasks {
        let path = task.output_path();
        let count = seen.entry(path.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(path);
        }
    }

    order
        .into_iter()
        .map(|path| {
            let count = seen[&path];
            (path, count)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::BundleConfigBuilder;

    fn bundle(name: &str, source: &str) -> BundleConfigBuilder {
        BundleConfigBuilder::new(name, source).output_dir("/out")
    }

    fn outputs(configs: &[BundleConfig]) -> Vec<PathBuf> {
        expand_tasks(configs).iter().map(BuildTask::output_path).collect()
    }

    #[test]
    fn untyped_configs_yield_one_task_each() {
        let configs = vec![
            bundle("a", "a.js").build().unwrap(),
            bundle("b", "src/b.ts").build().unwrap(),
            bundle("c", "c.css").build().unwrap(),
        ];

        let tasks = expand_tasks(&configs);
        assert_eq!(tasks.len(), configs.len());
        assert!(tasks.iter().all(|t| t.suffix().is_empty()));
        assert_eq!(
            outputs(&configs),
            vec![
                PathBuf::from("/out/a.js"),
                PathBuf::from("/out/b.js"),
                PathBuf::from("/out/c.css"),
            ]
        );
    }

    #[test]
    fn first_type_has_no_suffix() {
        let configs = vec![bundle("lib", "lib.js").types(["cjs", "esm"]).build().unwrap()];

        let tasks = expand_tasks(&configs);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].variant, Some("cjs"));
        assert_eq!(tasks[1].suffix(), ".esm");
        assert_eq!(
            outputs(&configs),
            vec![PathBuf::from("/out/lib.js"), PathBuf::from("/out/lib.esm.js")]
        );
    }

    #[test]
    fn empty_types_list_behaves_like_no_types() {
        let mut config = bundle("a", "a.js").build().unwrap();
        config.types = Some(Vec::new());

        let configs = vec![config];
        let tasks = expand_tasks(&configs);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].variant, None);
        assert_eq!(tasks[0].output_path(), PathBuf::from("/out/a.js"));
    }

    #[test]
    fn css_extension_applies_to_every_type() {
        let configs = vec![bundle("theme", "theme.css").types(["light", "dark"]).build().unwrap()];

        assert_eq!(
            outputs(&configs),
            vec![
                PathBuf::from("/out/theme.css"),
                PathBuf::from("/out/theme.dark.css"),
            ]
        );
    }

    #[test]
    fn tasks_follow_config_then_type_order() {
        let configs = vec![
            bundle("one", "one.js").types(["iife", "esm"]).build().unwrap(),
            bundle("two", "two.js").build().unwrap(),
        ];

        let labels: Vec<_> = expand_tasks(&configs)
            .iter()
            .map(|t| format!("{}:{}", t.config.name, t.variant.unwrap_or("-")))
            .collect();
        assert_eq!(labels, ["one:iife", "one:esm", "two:-"]);
    }

    #[test]
    fn task_options_carry_overrides() {
        let configs = vec![
            bundle("lib", "lib.js")
                .types(["cjs", "esm"])
                .esbuild_option("format", "esm")
                .build()
                .unwrap(),
        ];

        let tasks = expand_tasks(&configs);
        let options = tasks[1].options().unwrap();
        assert_eq!(options.outfile, PathBuf::from("/out/lib.esm.js"));
        assert_eq!(options.extra["format"], "esm");
    }

    #[test]
    fn duplicate_outputs_are_reported() {
        let configs = vec![
            bundle("a", "a.js").build().unwrap(),
            bundle("a", "other/a.ts").build().unwrap(),
            bundle("b", "b.js").build().unwrap(),
            bundle("a", "third.js").build().unwrap(),
        ];

        let tasks = expand_tasks(&configs);
        assert_eq!(
            duplicate_outputs(&tasks),
            vec![(PathBuf::from("/out/a.js"), 3)]
        );
    }
}

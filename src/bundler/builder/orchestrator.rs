//! Main build orchestration.
//!
//! This module provides the [`Bundler`] orchestrator that fans bundle configs
//! out into esbuild invocations and reports the outcome.

use super::task::{BuildTask, duplicate_outputs, expand_tasks};
use crate::bundler::{
    BuildState, Notifier, Result,
    esbuild::{BuildResult, Esbuild},
};
use futures::future::try_join_all;
use std::{path::PathBuf, time::Instant};

/// Main build orchestrator.
///
/// Runs one esbuild invocation per task of the configured bundles and keeps
/// the [`BuildState`] statistics up to date.
///
/// # Examples
///
/// ```no_run
/// use esbundle::bundler::{BuildState, Bundler, BundleConfigBuilder, SilentNotifier};
/// use esbundle::bundler::esbuild::EsbuildProcess;
///
/// # async fn example() -> esbundle::bundler::Result<()> {
/// let config = BundleConfigBuilder::new("app", "src/app.js")
///     .types(["iife", "esm"])
///     .build()?;
/// let mut state = BuildState::new(vec![config]);
///
/// let bundler = Bundler::new(EsbuildProcess::new("node_modules/.bin/esbuild", "."), SilentNotifier);
/// let results = bundler.run_build(&mut state).await?;
///
/// println!("{} outputs in {:?}", state.files().len(), state.build_time());
/// for warning in results.iter().flat_map(|r| &r.warnings) {
///     println!("warning: {warning}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler<E, N> {
    esbuild: E,
    notifier: N,
}

impl<E: Esbuild, N: Notifier> Bundler<E, N> {
    pub fn new(esbuild: E, notifier: N) -> Self {
        Self { esbuild, notifier }
    }

    /// Runs a full build pass over `state.config()`.
    ///
    /// All tasks are started at once and joined; the returned results are in
    /// task order (configs in order, each config's types in order), not
    /// completion order.
    ///
    /// # Errors
    ///
    /// The first failing task fails the whole pass with that task's error.
    /// Tasks still in flight are dropped, `state` keeps the statistics of the
    /// previous pass, and neither [`Notifier::built`] nor
    /// [`Notifier::warnings`] is called.
    pub async fn run_build(&self, state: &mut BuildState) -> Result<Vec<BuildResult>> {
        self.notifier.building();
        let started = Instant::now();

        let outcomes = {
            let tasks = expand_tasks(state.config());
            for (path, count) in duplicate_outputs(&tasks) {
                log::warn!(
                    "{} tasks write to {}; the last one to finish wins",
                    count,
                    path.display()
                );
            }
            log::debug!("Starting {} build task(s)", tasks.len());

            try_join_all(tasks.iter().map(|task| self.run_single(task))).await?
        };

        state.reset_build();
        let mut results = Vec::with_capacity(outcomes.len());
        for (outfile, result) in outcomes {
            state.add_file(outfile);
            results.push(result);
        }
        state.finish_build(started.elapsed());

        log::debug!(
            "Build #{} finished in {:?} ({} outputs)",
            state.build_count(),
            state.build_time(),
            state.files().len()
        );

        self.notifier.built(state);
        self.notifier.warnings(&results);
        Ok(results)
    }

    /// Runs one esbuild invocation, returning the task's output path and
    /// its result.
    ///
    /// The recorded path is the one composed from the config, even when an
    /// `outfile` override sends esbuild elsewhere.
    async fn run_single(&self, task: &BuildTask<'_>) -> Result<(PathBuf, BuildResult)> {
        let output_path = task.output_path();
        let options = task.options()?;

        if options.outfile != output_path {
            log::debug!(
                "Building {} -> {} (outfile override of {})",
                task.config.source.display(),
                options.outfile.display(),
                output_path.display()
            );
        } else {
            log::debug!(
                "Building {} -> {}",
                task.config.source.display(),
                output_path.display()
            );
        }
        let result = self.esbuild.build(options).await?;

        Ok((output_path, result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{
        BuildOptions, BundleConfig, BundleConfigBuilder, Error, SilentNotifier,
        esbuild::Message,
    };
    use std::{sync::Mutex, time::Duration};

    /// Records every invocation and answers with a warning naming the outfile.
    #[derive(Default)]
    struct FakeEsbuild {
        calls: Mutex<Vec<BuildOptions>>,
        /// Sources whose build fails.
        failing: Vec<String>,
        /// Per-source delay, to make completion order differ from launch order.
        delays: Vec<(String, u64)>,
    }

    impl Esbuild for FakeEsbuild {
        async fn build(&self, options: BuildOptions) -> Result<BuildResult> {
            self.calls.lock().unwrap().push(options.clone());
            let source = options.entry_points[0].clone();

            if let Some((_, ms)) = self.delays.iter().find(|(s, _)| *s == source) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }

            if self.failing.contains(&source) {
                return Err(Error::BuildFailed {
                    outfile: options.outfile,
                    code: Some(1),
                    errors: vec![Message::new(format!("cannot build {source}"))],
                    stderr: String::new(),
                });
            }

            Ok(BuildResult::with_warnings(vec![Message::new(
                options.outfile.display().to_string(),
            )]))
        }
    }

    #[derive(Debug, PartialEq)]
    enum Event {
        Building,
        Built { count: u64, files: usize },
        Warnings(usize),
    }

    #[derive(Default)]
    struct RecordingNotifier {
        events: Mutex<Vec<Event>>,
    }

    impl RecordingNotifier {
        fn events(&self) -> Vec<Event> {
            std::mem::take(&mut *self.events.lock().unwrap())
        }
    }

    impl Notifier for RecordingNotifier {
        fn building(&self) {
            self.events.lock().unwrap().push(Event::Building);
        }

        fn built(&self, state: &BuildState) {
            self.events.lock().unwrap().push(Event::Built {
                count: state.build_count(),
                files: state.files().len(),
            });
        }

        fn warnings(&self, results: &[BuildResult]) {
            self.events.lock().unwrap().push(Event::Warnings(results.len()));
        }
    }

    fn bundle(name: &str, source: &str) -> BundleConfigBuilder {
        BundleConfigBuilder::new(name, source).output_dir("/out")
    }

    fn warning_texts(results: &[BuildResult]) -> Vec<String> {
        results.iter().map(|r| r.warnings[0].text.clone()).collect()
    }

    #[tokio::test]
    async fn single_untyped_config_builds_one_output() {
        let config = bundle("a", "a.js").types(Vec::<String>::new()).build().unwrap();
        let mut state = BuildState::new(vec![config]);
        let esbuild = FakeEsbuild::default();
        let notifier = RecordingNotifier::default();

        let results = Bundler::new(&esbuild, &notifier)
            .run_build(&mut state)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(state.files(), [PathBuf::from("/out/a.js")]);
        assert_eq!(state.build_count(), 1);
        assert_eq!(
            notifier.events(),
            [Event::Building, Event::Built { count: 1, files: 1 }, Event::Warnings(1)]
        );

        let calls = esbuild.calls.lock().unwrap();
        assert_eq!(calls[0].entry_points, ["a.js"]);
        assert!(calls[0].bundle);
        assert_eq!(calls[0].global_name, None);
    }

    #[tokio::test]
    async fn css_config_builds_css_output() {
        let mut state = BuildState::new(vec![bundle("b", "b.css").build().unwrap()]);

        Bundler::new(FakeEsbuild::default(), SilentNotifier)
            .run_build(&mut state)
            .await
            .unwrap();

        assert_eq!(state.files(), [PathBuf::from("/out/b.css")]);
    }

    #[tokio::test]
    async fn results_keep_task_order_regardless_of_completion() {
        let configs = vec![
            bundle("one", "one.js").types(["cjs", "esm"]).build().unwrap(),
            bundle("two", "two.js").build().unwrap(),
        ];
        let mut state = BuildState::new(configs);
        let esbuild = FakeEsbuild {
            delays: vec![("one.js".into(), 30)],
            ..Default::default()
        };

        let results = Bundler::new(&esbuild, SilentNotifier)
            .run_build(&mut state)
            .await
            .unwrap();

        let expected = ["/out/one.js", "/out/one.esm.js", "/out/two.js"];
        assert_eq!(warning_texts(&results), expected);
        assert_eq!(state.files(), expected.map(PathBuf::from));

        let launched: Vec<_> = esbuild
            .calls
            .lock()
            .unwrap()
            .iter()
            .map(|o| o.outfile.clone())
            .collect();
        assert_eq!(launched, expected.map(PathBuf::from));
    }

    #[tokio::test]
    async fn overrides_reach_the_bundler() {
        let config = bundle("lib", "lib.js")
            .global_name("")
            .esbuild_option("bundle", false)
            .esbuild_option("format", "esm")
            .build()
            .unwrap();
        let mut state = BuildState::new(vec![config]);
        let esbuild = FakeEsbuild::default();

        Bundler::new(&esbuild, SilentNotifier)
            .run_build(&mut state)
            .await
            .unwrap();

        let calls = esbuild.calls.lock().unwrap();
        assert!(!calls[0].bundle);
        assert_eq!(calls[0].extra["format"], "esm");
        let value = serde_json::to_value(&calls[0]).unwrap();
        assert!(value.get("globalName").is_none());
    }

    #[tokio::test]
    async fn outfile_override_does_not_change_recorded_path() {
        let configs = vec![
            bundle("a", "a.js")
                .esbuild_option("outfile", "/elsewhere/x.js")
                .build()
                .unwrap(),
            bundle("b", "b.js")
                .esbuild_option("outfile", "/elsewhere/x.js")
                .build()
                .unwrap(),
        ];
        let mut state = BuildState::new(configs);
        let esbuild = FakeEsbuild::default();

        Bundler::new(&esbuild, SilentNotifier)
            .run_build(&mut state)
            .await
            .unwrap();

        assert_eq!(
            state.files(),
            [PathBuf::from("/out/a.js"), PathBuf::from("/out/b.js")]
        );
        let calls = esbuild.calls.lock().unwrap();
        assert!(calls.iter().all(|c| c.outfile == PathBuf::from("/elsewhere/x.js")));
    }

    #[tokio::test]
    async fn failing_task_fails_the_pass_without_notifications() {
        let configs = vec![
            bundle("ok", "ok.js").build().unwrap(),
            bundle("broken", "broken.js").build().unwrap(),
        ];
        let mut state = BuildState::new(configs);
        let esbuild = FakeEsbuild {
            failing: vec!["broken.js".into()],
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let bundler = Bundler::new(&esbuild, &notifier);

        let err = bundler.run_build(&mut state).await.unwrap_err();

        match err {
            Error::BuildFailed { outfile, errors, .. } => {
                assert_eq!(outfile, PathBuf::from("/out/broken.js"));
                assert_eq!(errors[0].text, "cannot build broken.js");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(state.build_count(), 0);
        assert!(state.files().is_empty());
        assert_eq!(notifier.events(), [Event::Building]);
    }

    #[tokio::test]
    async fn failed_pass_keeps_previous_statistics() {
        let mut state = BuildState::new(vec![bundle("a", "a.js").build().unwrap()]);
        let esbuild = FakeEsbuild {
            failing: vec!["b.js".into()],
            ..Default::default()
        };
        let bundler = Bundler::new(&esbuild, SilentNotifier);

        bundler.run_build(&mut state).await.unwrap();
        let first_time = state.build_time();

        let mut configs: Vec<BundleConfig> = state.config().to_vec();
        configs.push(bundle("b", "b.js").build().unwrap());
        state.set_config(configs);

        assert!(bundler.run_build(&mut state).await.is_err());
        assert_eq!(state.build_count(), 1);
        assert_eq!(state.build_time(), first_time);
        assert_eq!(state.files(), [PathBuf::from("/out/a.js")]);
    }

    #[tokio::test]
    async fn repeated_passes_increment_counter_and_reset_files() {
        let mut state = BuildState::new(vec![bundle("a", "a.js").types(["x", "y"]).build().unwrap()]);
        let notifier = RecordingNotifier::default();
        let bundler = Bundler::new(FakeEsbuild::default(), &notifier);

        bundler.run_build(&mut state).await.unwrap();
        bundler.run_build(&mut state).await.unwrap();

        assert_eq!(state.build_count(), 2);
        assert_eq!(state.files().len(), 2);
        assert_eq!(
            notifier.events(),
            [
                Event::Building,
                Event::Built { count: 1, files: 2 },
                Event::Warnings(2),
                Event::Building,
                Event::Built { count: 2, files: 2 },
                Event::Warnings(2),
            ]
        );
    }

    #[tokio::test]
    async fn empty_config_list_still_reports() {
        let mut state = BuildState::new(Vec::new());
        let notifier = RecordingNotifier::default();

        let results = Bundler::new(FakeEsbuild::default(), &notifier)
            .run_build(&mut state)
            .await
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(
            notifier.events(),
            [Event::Building, Event::Built { count: 1, files: 0 }, Event::Warnings(0)]
        );
    }
}

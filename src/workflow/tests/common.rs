//! Common test utilities for workflow tests.
use crate::{
    chat::MockNotifier,
    config::Config,
    console::MockConsole,
    repo::traits::MockVcs,
    runner::MockScriptRunner,
    test_helpers::create_test_config,
    tracker::{traits::MockIssueTracker, types::Transition},
    wiki::traits::MockWiki,
    workflow::Workflow,
};

pub const BROWSE_BASE: &str = "https://jira.example.com/browse";

/// One mock per collaborator. Tests set expectations on the fields before
/// turning the set into a workflow.
#[derive(Default)]
pub struct Mocks {
    pub tracker: MockIssueTracker,
    pub vcs: MockVcs,
    pub wiki: MockWiki,
    pub notifier: MockNotifier,
    pub runner: MockScriptRunner,
    pub console: MockConsole,
}

impl Mocks {
    pub fn into_workflow(self) -> Workflow {
        self.into_workflow_with(create_test_config())
    }

    pub fn into_workflow_with(self, config: Config) -> Workflow {
        Workflow::builder()
            .config(config)
            .tracker(Box::new(self.tracker))
            .vcs(Box::new(self.vcs))
            .wiki(Box::new(self.wiki))
            .notifier(Box::new(self.notifier))
            .runner(Box::new(self.runner))
            .console(Box::new(self.console))
            .build()
            .unwrap()
    }
}

pub fn transition(id: &str, name: &str) -> Transition {
    Transition {
        id: id.into(),
        name: name.into(),
    }
}

/// Every transition named in the default config, as the tracker would
/// list them.
pub fn default_transitions() -> Vec<Transition> {
    vec![
        transition("11", "Start Progress"),
        transition("21", "Ready to Deploy"),
        transition("31", "Deployed"),
    ]
}

/// Answers `is_clean` with the given values in order.
pub fn clean_states(vcs: &mut MockVcs, states: &'static [bool]) {
    let mut call = 0;
    vcs.expect_is_clean()
        .times(states.len())
        .returning(move || {
            let state = states[call];
            call += 1;
            Ok(state)
        });
}

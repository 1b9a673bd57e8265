use mockall::predicate::eq;

use crate::{
    error::DevflowError,
    repo::types::LogEntry,
    tracker::types::Issue,
    wiki::types::{Page, PageBody, PageLinks, PageVersion, StorageBody},
    workflow::{
        AbortReason, Outcome,
        release::{release_note, render_release_title},
        tests::common::{BROWSE_BASE, Mocks, clean_states, default_transitions},
    },
};

fn entry(message: &str, tags: &[&str]) -> LogEntry {
    LogEntry {
        id: message.len().to_string(),
        message: message.into(),
        date: "2024-03-01 10:00:00 +0000".into(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
    }
}

fn master_log() -> Vec<LogEntry> {
    vec![
        entry("[HQ] [SE-2] Fix report export", &[]),
        entry("Bump dependencies", &[]),
        entry("Release v1.2.0", &["v1.2.0"]),
        entry("[SE-1] Add login page", &[]),
    ]
}

fn page(version: u64, body: &str) -> Page {
    Page {
        id: "65538".into(),
        title: "Release notes".into(),
        version: PageVersion { number: version },
        body: PageBody {
            storage: StorageBody {
                value: body.into(),
                representation: "storage".into(),
            },
        },
        links: PageLinks {
            webui: "/display/ENG/Release+notes".into(),
        },
    }
}

fn on_branch(mocks: &mut Mocks, branch: &'static str) {
    mocks
        .vcs
        .expect_current_branch()
        .returning(move || Ok(branch.to_string()));
}

#[test]
fn renders_release_title_template() {
    let title = render_release_title(
        "Release **{{ tag }}** ({{ date }}):",
        "v1.3.0",
        "2024-03-02 09:30",
    )
    .unwrap();

    assert_eq!(title, "Release **v1.3.0** (2024-03-02 09:30):");
    assert_eq!(
        release_note(&title, "Changes:\n\n- Fix"),
        "## Release **v1.3.0** (2024-03-02 09:30):\nChanges:\n\n- Fix"
    );
}

#[test]
fn invalid_release_title_is_a_template_error() {
    let result = render_release_title("{{ tag", "v1.3.0", "now");
    assert!(matches!(result, Err(DevflowError::TemplateError(_))));
}

#[tokio::test]
async fn deploy_publishes_reviewed_changelog() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "master");
    clean_states(&mut mocks.vcs, &[true]);
    mocks
        .vcs
        .expect_log()
        .with(eq("master"))
        .times(1)
        .returning(|_| Ok(master_log()));
    mocks
        .tracker
        .expect_browse_base()
        .return_const(BROWSE_BASE.to_string());
    mocks
        .tracker
        .expect_find_issue()
        .with(eq("SE-2"))
        .times(1)
        .returning(|key| Ok(Issue::new(key, "Fix report export", "bob")));
    mocks
        .console
        .expect_edit()
        .withf(|initial| {
            initial.contains(
                "- [[SE-2]](https://jira.example.com/browse/SE-2) Fix report export (@bob)",
            ) && initial.contains("- Bump dependencies")
                && !initial.contains("SE-1")
        })
        .times(1)
        .returning(|initial| Ok(format!("{initial}\n")));
    mocks.console.expect_show().return_const(());
    mocks.runner.expect_deploy().times(1).returning(|| Ok(()));
    mocks
        .vcs
        .expect_latest_tag()
        .returning(|| Ok(Some("v1.3.0".into())));
    mocks
        .tracker
        .expect_list_transitions()
        .with(eq("SE-2"))
        .returning(|_| Ok(default_transitions()));
    mocks
        .tracker
        .expect_transition_issue()
        .withf(|key, t| key == "SE-2" && t.name == "Deployed")
        .times(1)
        .returning(|_, _| Ok(()));
    mocks
        .tracker
        .expect_add_comment()
        .with(eq("SE-2"), eq("Done at v1.3.0."))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks
        .tracker
        .expect_assign_issue()
        .with(eq("SE-2"), eq("bob"))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks
        .wiki
        .expect_get_page()
        .with(eq("Release notes"))
        .times(1)
        .returning(|_| Ok(page(7, "<p>older</p>")));
    mocks
        .wiki
        .expect_update_page()
        .withf(|_, content| {
            content.starts_with("<h2 id=\"releasev130")
                && content.contains("<strong>v1.3.0</strong>")
                && content.ends_with("<p>older</p>")
        })
        .times(1)
        .returning(|_, content| Ok(page(8, content)));
    mocks
        .wiki
        .expect_page_url()
        .returning(|page| format!("https://wiki.example.com{}", page.links.webui));
    mocks
        .notifier
        .expect_send()
        .withf(|message| {
            message.text.starts_with(
                "<https://wiki.example.com/display/ENG/Release+notes|*Release `v1.3.0`",
            ) && message.text.contains("<https://jira.example.com/browse/SE-2|SE-2>")
        })
        .times(1)
        .returning(|_| Ok(()));

    let outcome = mocks.into_workflow().deploy().await.unwrap();

    assert_eq!(outcome, Outcome::Completed);
}

#[tokio::test]
async fn deploy_finishes_every_issue_before_failing() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "master");
    clean_states(&mut mocks.vcs, &[true]);
    mocks.vcs.expect_log().returning(|_| Ok(vec![]));
    mocks
        .tracker
        .expect_browse_base()
        .return_const(BROWSE_BASE.to_string());
    mocks.console.expect_edit().returning(|_| {
        Ok("- [SE-2] Fix report export (@bob)\n- [SE-3] Add login (@ann)"
            .into())
    });
    mocks.console.expect_show().return_const(());
    mocks.runner.expect_deploy().times(1).returning(|| Ok(()));
    mocks
        .vcs
        .expect_latest_tag()
        .returning(|| Ok(Some("v1.3.0".into())));
    mocks
        .tracker
        .expect_list_transitions()
        .returning(|_| Ok(default_transitions()));
    mocks
        .tracker
        .expect_transition_issue()
        .times(2)
        .returning(|_, _| Ok(()));
    mocks
        .tracker
        .expect_add_comment()
        .returning(|key, _| match key {
            "SE-2" => Err(DevflowError::tracker("comment rejected")),
            _ => Ok(()),
        });
    mocks
        .tracker
        .expect_assign_issue()
        .with(eq("SE-3"), eq("ann"))
        .times(1)
        .returning(|_, _| Ok(()));
    mocks.wiki.expect_get_page().never();
    mocks.notifier.expect_send().never();

    let result = mocks.into_workflow().deploy().await;

    assert!(matches!(
        result,
        Err(DevflowError::TrackerError(msg)) if msg == "comment rejected"
    ));
}

#[tokio::test]
async fn deploy_cancels_on_empty_changelog() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "master");
    clean_states(&mut mocks.vcs, &[true]);
    mocks.vcs.expect_log().returning(|_| Ok(vec![]));
    mocks
        .tracker
        .expect_browse_base()
        .return_const(BROWSE_BASE.to_string());
    mocks.console.expect_edit().returning(|_| Ok("  \n".into()));
    mocks.runner.expect_deploy().never();
    mocks.notifier.expect_send().never();

    let outcome = mocks.into_workflow().deploy().await.unwrap();

    assert_eq!(outcome, Outcome::Aborted(AbortReason::Cancelled));
}

#[tokio::test]
async fn deploy_refuses_feature_branch() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "SE-2/fix-report-export");
    mocks.vcs.expect_log().never();

    let outcome = mocks.into_workflow().deploy().await.unwrap();

    assert_eq!(outcome, Outcome::Aborted(AbortReason::NotOnMainBranch));
}

#[tokio::test]
async fn deploy_refuses_dirty_repository() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "master");
    clean_states(&mut mocks.vcs, &[false]);
    mocks.vcs.expect_log().never();

    let outcome = mocks.into_workflow().deploy().await.unwrap();

    assert_eq!(outcome, Outcome::Aborted(AbortReason::DirtyRepository));
}

#[tokio::test]
async fn deploy_fails_without_release_tag() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "master");
    clean_states(&mut mocks.vcs, &[true]);
    mocks
        .vcs
        .expect_log()
        .returning(|_| Ok(vec![entry("Bump dependencies", &[])]));
    mocks
        .tracker
        .expect_browse_base()
        .return_const(BROWSE_BASE.to_string());
    mocks
        .console
        .expect_edit()
        .returning(|initial| Ok(initial.to_string()));
    mocks.console.expect_show().return_const(());
    mocks.runner.expect_deploy().returning(|| Ok(()));
    mocks.vcs.expect_latest_tag().returning(|| Ok(None));
    mocks.wiki.expect_get_page().never();

    let result = mocks.into_workflow().deploy().await;

    assert!(matches!(result, Err(DevflowError::MissingReleaseTag)));
}

#[test]
fn rc_tags_next_candidate_of_branch_issue() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "SE-42/fix-login-page");
    mocks
        .vcs
        .expect_latest_tag()
        .returning(|| Ok(Some("v1.2.0".into())));
    mocks.vcs.expect_all_tags().returning(|| {
        Ok(vec![
            "v1.2.0".into(),
            "v1.2.0.SE-42.rc1".into(),
            "v1.2.0.SE-42.rc10".into(),
            "v1.2.0.SE-42.rc9".into(),
            "v1.2.0.SE-7.rc30".into(),
        ])
    });
    mocks
        .vcs
        .expect_add_tag()
        .with(eq("v1.2.0.SE-42.rc11"))
        .times(1)
        .returning(|_| Ok(()));
    mocks
        .vcs
        .expect_push_tags()
        .with(eq("origin"))
        .times(1)
        .returning(|_| Ok(()));

    let outcome = mocks.into_workflow().rc(None).unwrap();

    assert_eq!(outcome, Outcome::Completed);
}

#[test]
fn rc_uses_requested_version() {
    let mut mocks = Mocks::default();
    on_branch(&mut mocks, "SE-42/fix-login-page");
    mocks.vcs.expect_latest_tag().never();
    mocks.vcs.expect_all_tags().returning(|| Ok(vec![]));
    mocks
        .vcs
        .expect_add_tag()
        .with(eq("v2.0.0.SE-42.rc1"))
        .times(1)
        .returning(|_| Ok(()));
    mocks.vcs.expect_push_tags().returning(|_| Ok(()));

    let outcome = mocks.into_workflow().rc(Some("v2.0.0".into())).unwrap();

    assert_eq!(outcome, Outcome::Completed);
}

#[test]
fn rc_requires_a_release_tag() {
    let mut mocks = Mocks::default();
    mocks.vcs.expect_latest_tag().returning(|| Ok(None));
    mocks.vcs.expect_add_tag().never();

    let result = mocks.into_workflow().rc(None);

    assert!(matches!(result, Err(DevflowError::MissingReleaseTag)));
}

#[tokio::test]
async fn release_notes_prints_history() {
    let mut mocks = Mocks::default();
    mocks.vcs.expect_log().returning(|_| Ok(master_log()));
    mocks.tracker.expect_find_issue().returning(|key| match key {
        "SE-2" => Ok(Issue::new(key, "Fix report export", "bob")),
        _ => Err(DevflowError::tracker("gone")),
    });
    mocks
        .console
        .expect_show()
        .withf(|notes| {
            notes.starts_with("# Apps Release Notes\n\n## Release future (future):")
                && notes.contains("- [SE-2] Fix report export (@bob)")
                && notes.contains("## Release v1.2.0 (2024-03-01 10:00:00 +0000):")
                && notes.contains("- [SE-1] (Issue not found) (@error)")
        })
        .times(1)
        .return_const(());

    let outcome = mocks.into_workflow().release_notes().await.unwrap();

    assert_eq!(outcome, Outcome::Completed);
}

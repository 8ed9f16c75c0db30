use gitlab_analyzer::gitlab::{collect, rank_authors, report};
use gitlab_analyzer::model::{Commit, CommitStats, CommitStub, Repository};
use pretty_assertions::assert_eq;

fn commit(id: &str, title: &str, author: &str, email: &str, additions: i64, deletions: i64) -> Commit {
    Commit::new(
        CommitStub {
            id: id.to_string(),
            short_id: id.to_string(),
            title: title.to_string(),
            message: String::new(),
            author_name: author.to_string(),
            author_email: email.to_string(),
            authored_date: "2023-01-01T00:00:00Z".to_string(),
        },
        CommitStats::new(additions, deletions),
    )
}

fn by(author: &str, n: usize) -> Commit {
    commit(&format!("{author}{n}"), "work", author, "", 1, 0)
}

#[test]
fn merge_commits_are_kept_but_not_counted() {
    let mut repo = Repository::new(1, "r");
    collect(&mut repo, commit("a", "feat: thing", "Alice", "alice@x", 10, 2));
    collect(&mut repo, commit("m", " Merge branch 'foo' into 'main'", "Alice", "alice@x", 500, 400));
    collect(&mut repo, commit("n", "Merge branch 'bar' into 'main'", "Bob", "bob@x", 5, 5));

    assert_eq!(repo.commits.len(), 3);
    let filtered: Vec<_> = repo.filtered_commits().map(|c| c.info.id.as_str()).collect();
    assert_eq!(filtered, vec!["a"]);
    assert_eq!(repo.authors.len(), 1);
    let alice = &repo.authors["Alice"];
    assert_eq!(alice.count, 1);
    assert_eq!(alice.stats, CommitStats::new(10, 2));
}

#[test]
fn totals_are_recomputed_after_every_update() {
    let mut repo = Repository::new(1, "r");
    let commits = [(10, 2), (0, 30), (7, 7), (3, 0)];
    for (i, (add, del)) in commits.iter().enumerate() {
        collect(&mut repo, commit(&i.to_string(), "change", "Alice", "alice@x", *add, *del));
        let alice = &repo.authors["Alice"];
        assert_eq!(alice.stats.total, alice.stats.additions - alice.stats.deletions);
    }

    let alice = &repo.authors["Alice"];
    assert_eq!(alice.count, 4);
    assert_eq!(alice.stats.additions, 20);
    assert_eq!(alice.stats.deletions, 39);
    assert_eq!(alice.stats.total, -19);
}

#[test]
fn same_name_different_email_shares_one_accumulator() {
    let mut repo = Repository::new(1, "r");
    collect(&mut repo, commit("1", "a", "Sam", "sam@work", 1, 0));
    collect(&mut repo, commit("2", "b", "Sam", "sam@home", 2, 0));

    assert_eq!(repo.authors.len(), 1);
    let sam = &repo.authors["Sam"];
    assert_eq!(sam.count, 2);
    assert_eq!(sam.email, "sam@work");
}

#[test]
fn aggregating_the_same_commits_twice_double_counts() {
    let commits = vec![
        commit("1", "a", "Alice", "alice@x", 4, 1),
        commit("2", "b", "Bob", "bob@x", 2, 2),
    ];
    let mut repo = Repository::new(1, "r");
    for c in commits.iter().chain(commits.iter()) {
        collect(&mut repo, c.clone());
    }

    assert_eq!(repo.filtered_count(), 4);
    assert_eq!(repo.authors["Alice"].count, 2);
    assert_eq!(repo.authors["Alice"].stats, CommitStats::new(8, 2));
    assert_eq!(repo.authors["Bob"].stats, CommitStats::new(4, 4));
}

#[test]
fn ranking_is_stable_descending_by_count() {
    let mut repo = Repository::new(1, "r");
    // First-seen order A, B, C, D with counts 3, 5, 5, 1.
    let order = ["A", "B", "C", "D", "A", "B", "C", "A", "B", "C", "B", "C", "B", "C"];
    for (i, author) in order.iter().enumerate() {
        collect(&mut repo, by(author, i));
    }

    let ranked: Vec<_> = rank_authors(&repo)
        .into_iter()
        .map(|a| (a.name, a.count))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("B".to_string(), 5),
            ("C".to_string(), 5),
            ("A".to_string(), 3),
            ("D".to_string(), 1),
        ]
    );
}

#[test]
fn filtered_commits_are_an_ordered_subsequence() {
    let mut repo = Repository::new(1, "r");
    for i in 0..30 {
        let title = if i % 4 == 0 { " Merge branch 'x'" } else { "work" };
        let author = ["Ann", "Ben", "Cy"][i % 3];
        collect(&mut repo, commit(&i.to_string(), title, author, "", i as i64, 1));
    }

    let mut all = repo.commits.iter().map(|c| c.info.id.as_str());
    for id in repo.filtered_commits().map(|c| c.info.id.as_str()) {
        assert!(all.any(|x| x == id), "{id} out of order or missing");
    }

    let summed: i64 = repo.authors.values().map(|a| a.stats.additions).sum();
    let expected: i64 = repo.filtered_commits().map(|c| c.stats.additions).sum();
    assert_eq!(summed, expected);
}

#[test]
fn report_counts_filtered_commits() {
    let mut repo = Repository::new(1, "svc");
    collect(&mut repo, commit("1", "a", "Alice", "alice@x", 1, 0));
    collect(&mut repo, commit("2", "Merge branch 'f'", "Alice", "alice@x", 1, 0));

    let r = report(&repo);
    assert_eq!(r.name, "svc");
    assert_eq!(r.commits, 1);
    assert_eq!(r.authors.len(), 1);
}

use std::fs::File;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use repo_harvester::{
    make_iterator_from, ErrorKind, HostParser, IterError, IteratorOptions, RepoUrl, RowIterator,
};

enum Outcome {
    Repo(RepoUrl),
    Error(ErrorKind),
}

fn repo(owner: &str, name: &str, metadata: &[&str]) -> Outcome {
    Outcome::Repo(
        RepoUrl::new("github.com", owner, name)
            .with_metadata(metadata.iter().map(|m| m.to_string()).collect()),
    )
}

fn open(name: &str) -> File {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/testdata")
        .join(name);
    File::open(&path).unwrap_or_else(|e| panic!("failed to open {}: {e}", path.display()))
}

fn check<R: std::io::Read>(mut iter: RowIterator<R>, outcomes: Vec<Outcome>) {
    for (i, outcome) in outcomes.into_iter().enumerate() {
        assert!(iter.has_next(), "expected outcome #{i}, got end of input");
        match (outcome, iter.next_repo()) {
            (Outcome::Repo(expected), Ok(actual)) => assert_eq!(actual, expected),
            (Outcome::Error(kind), Err(err)) => {
                assert_eq!(err.kind(), kind, "outcome #{i}: {err}");
                assert!(!err.is_fatal());
            }
            (Outcome::Repo(expected), Err(err)) => {
                panic!("outcome #{i}: expected {expected}, got error {err}")
            }
            (Outcome::Error(kind), Ok(actual)) => {
                panic!("outcome #{i}: expected {kind:?}, got {actual}")
            }
        }
    }
    assert!(!iter.has_next(), "reader has more rows than expected");
    assert!(matches!(iter.next_repo(), Err(IterError::Exhausted)));
}

#[test]
fn test_basic() {
    let iter = make_iterator_from(open("basic.csv")).unwrap();
    check(
        iter,
        vec![
            repo("owner1", "repo1", &[]),
            repo("owner2", "repo2", &[]),
            repo("owner3", "repo3", &["meta"]),
        ],
    );
}

#[test]
fn test_comment() {
    let iter = make_iterator_from(open("comment.csv")).unwrap();
    check(
        iter,
        vec![
            repo("owner1", "repo1", &[]),
            repo("owner2", "repo2", &[]),
            repo("owner3", "repo3", &["meta"]),
        ],
    );
}

#[test]
fn test_failing_urls() {
    let iter = make_iterator_from(open("failing_urls.csv")).unwrap();
    check(
        iter,
        vec![
            Outcome::Error(ErrorKind::UnsupportedHost),
            Outcome::Error(ErrorKind::InvalidUrl),
            Outcome::Error(ErrorKind::InvalidUrl),
        ],
    );
}

#[test]
fn test_empty_rows() {
    let iter = make_iterator_from(open("empty_row.csv")).unwrap();
    check(
        iter,
        vec![
            repo("owner1", "repo1", &[]),
            repo("owner2", "repo2", &[]),
            repo("owner3", "repo3", &["meta"]),
        ],
    );
}

#[test]
fn test_extra_columns() {
    let iter = make_iterator_from(open("extra_column.csv")).unwrap();
    check(
        iter,
        vec![
            repo("owner1", "repo1", &[]),
            repo("owner2", "repo2", &["team-a", "tier-1"]),
            repo("owner3", "repo3", &["a", "b", "c", "quoted, with comma"]),
        ],
    );
}

#[test]
fn test_header_skipped_only_when_configured() {
    let options = IteratorOptions::default().with_headers(true);
    let iter = RowIterator::with_options(open("header.csv"), HostParser::default(), &options)
        .unwrap();
    check(iter, vec![repo("owner1", "repo1", &["meta"])]);

    // Without the option the header is just an invalid row.
    let iter = make_iterator_from(open("header.csv")).unwrap();
    check(
        iter,
        vec![
            Outcome::Error(ErrorKind::InvalidUrl),
            repo("owner1", "repo1", &["meta"]),
        ],
    );
}

#[test]
fn test_fixed_width_rejects_narrow_row() {
    let options = IteratorOptions::default().with_flexible(false);
    let iter = RowIterator::with_options(open("fixed_width.csv"), HostParser::default(), &options)
        .unwrap();
    check(
        iter,
        vec![
            repo("owner1", "repo1", &["meta"]),
            Outcome::Error(ErrorKind::MalformedRow),
            repo("owner3", "repo3", &["meta"]),
        ],
    );
}

#[test]
fn test_row_errors_report_row_numbers() {
    let input = "github.com/owner1/repo1\n\n# comment\nnot a url\n";
    let mut iter = make_iterator_from(input.as_bytes()).unwrap();

    assert!(iter.next_repo().is_ok());
    let err = iter.next_repo().unwrap_err();
    // Skipped lines do not count as rows.
    assert_eq!(err.row(), Some(2));
    assert_eq!(err.to_string(), "row 2: invalid repository URL: not a url");
}

#[test]
fn test_borrowed_reader_stays_with_caller() {
    let mut file = open("basic.csv");
    {
        let iter = make_iterator_from(&mut file).unwrap();
        let names: Vec<String> = iter.map(|r| r.unwrap().name).collect();
        assert_eq!(names, vec!["repo1", "repo2", "repo3"]);
    }
    // `file` is still usable by its owner here.
    assert!(file.metadata().is_ok());
}

#[test]
fn test_fail_fast_caller() {
    let input = "github.com/a/b\nbad\ngithub.com/c/d\n";
    let result: Result<Vec<RepoUrl>, IterError> =
        make_iterator_from(input.as_bytes()).unwrap().collect();
    assert_eq!(result.unwrap_err().kind(), ErrorKind::InvalidUrl);
}

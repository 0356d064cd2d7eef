#[cfg(test)]
mod log_parser_tests {
    use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
    use gitwrap::commit::render_log;
    use gitwrap::{parse_log, CommitRecord, GitwrapError, LogParser};
    use pretty_assertions::assert_eq;

    const TWO_COMMITS: &str = "commit f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06
Author: David Siñuela Pastor <siu.4coders@gmail.com>
Date:   Thu Jul 21 09:39:48 2011 +0200

    Don't commit in test_add_all integration test

commit 018825f04b0f58f3f9b852da3e21f9e84441d657
Author: David Siñuela Pastor <siu.4coders@gmail.com>
Date:   Thu Jul 20 09:39:48 2011 +0200

    Add README.md";

    const MULTILINE: &str = "commit f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06
Author: David Siñuela Pastor <siu.4coders@gmail.com>
Date:   Thu Jul 21 09:39:48 2011 +0200

    Don't commit in test_add_all integration test
    Not needed

commit 018825f04b0f58f3f9b852da3e21f9e84441d657
Author: David Siñuela Pastor <siu.4coders@gmail.com>
Date:   Thu Jul 20 09:39:48 2011 +0200

    Add README.md
    
    Installation instructions";

    fn plus_two() -> FixedOffset {
        FixedOffset::east_opt(2 * 3600).unwrap()
    }

    fn parse(text: &str) -> Vec<CommitRecord> {
        LogParser::new().parse_in(text, &plus_two()).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(hh, mm, ss))
            .unwrap()
    }

    fn local(rfc3339: &str) -> NaiveDateTime {
        DateTime::parse_from_rfc3339(rfc3339)
            .unwrap()
            .with_timezone(&Local)
            .naive_local()
    }

    #[test]
    fn test_simple_record() {
        let text = "commit f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06
Author: A. Dev <a@example.com>
Date:   Thu Jul 21 09:39:48 2011 +0200

    Fix bug in parser
";
        let records = parse_log(text).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06");
        assert_eq!(record.author, "A. Dev <a@example.com>");
        assert_eq!(record.date, local("2011-07-21T09:39:48+02:00"));
        assert_eq!(record.title, "Fix bug in parser");
        assert_eq!(record.message, "Fix bug in parser");
        assert_eq!(record.revision, None);
    }

    #[test]
    fn test_records_keep_input_order() {
        let records = parse(TWO_COMMITS);

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06",
                "018825f04b0f58f3f9b852da3e21f9e84441d657",
            ]
        );
        assert_eq!(records[0].date, at(2011, 7, 21, 9, 39, 48));
        assert_eq!(records[1].date, at(2011, 7, 20, 9, 39, 48));
        assert_eq!(records[1].title, "Add README.md");
        assert_eq!(records[1].message, "Add README.md");
    }

    #[test]
    fn test_multiline_messages() {
        let records = parse(MULTILINE);

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].message,
            "Don't commit in test_add_all integration test\nNot needed"
        );
        assert_eq!(records[1].title, "Add README.md");
        assert_eq!(
            records[1].message,
            "Add README.md\n\nInstallation instructions"
        );
    }

    #[test]
    fn test_message_starts_with_title() {
        for record in parse(MULTILINE).iter().chain(parse(TWO_COMMITS).iter()) {
            assert_eq!(record.message.lines().next(), Some(record.title.as_str()));
            assert!(!record.id.is_empty());
            assert!(!record.author.is_empty());
            assert!(!record.title.is_empty());
        }
    }

    #[test]
    fn test_revision_marker() {
        let text = "commit f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06
Author: A. Dev <a@example.com>
Date:   Thu Jul 21 09:39:48 2011 +0200

    Import vendor branch
    note: foo@1234 bar
";
        let records = LogParser::with_revision_marker("note")
            .parse_in(text, &Utc)
            .unwrap();

        assert_eq!(records[0].revision.as_deref(), Some("1234"));
        assert_eq!(records[0].message, "Import vendor branch");
        assert!(!records[0].message.contains("note:"));
    }

    #[test]
    fn test_record_count_skips_bodyless_blocks() {
        let text = format!(
            "commit 1111111111111111111111111111111111111111
Author: A. Dev <a@example.com>
Date:   Thu Jul 21 09:39:48 2011 +0200

{}",
            TWO_COMMITS
        );
        assert_eq!(parse(&text).len(), 2);
    }

    #[test]
    fn test_malformed_date() {
        let text = "commit f2d2cc3b4e84104b5ca4cae16a07f8b924d2bb06
Author: A. Dev <a@example.com>
Date:   the day before yesterday

    Title
";
        match parse_log(text) {
            Err(GitwrapError::MalformedDate { value }) => {
                assert_eq!(value, "the day before yesterday")
            }
            other => panic!("Expected MalformedDate, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_log("").unwrap(), vec![]);
    }

    #[test]
    fn test_parser_is_reusable_across_threads() {
        let parser = LogParser::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let parser = parser.clone();
                std::thread::spawn(move || parser.parse_in(MULTILINE, &Utc).unwrap().len())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }

    #[test]
    fn test_rendered_log() {
        let records = parse(MULTILINE);
        insta::assert_snapshot!(render_log(&records), @r"
f2d2cc3 2011-07-21 09:39:48 Don't commit in test_add_all integration test
018825f 2011-07-20 09:39:48 Add README.md
");
    }
}

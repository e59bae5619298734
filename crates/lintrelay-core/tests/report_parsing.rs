//! Parses a realistic clang-tidy transcript end to end.

use lintrelay_core::{ParseOptions, PathStyle, parse_report};
use std::path::PathBuf;

/// Trimmed from a real run against a small C++ target: banners, notes,
/// include stacks and the trailing summary all interleave with findings.
const TRANSCRIPT: &str = concat!(
    "Enabled checks:\r\n",
    "    clang-analyzer-core.NullDereference\r\n",
    "    modernize-use-nullptr\r\n",
    "    readability-braces-around-statements\r\n",
    "\r\n",
    "In file included from /home/dev/proj/src/app.cpp:3:\r\n",
    "/home/dev/proj/src/util.h:14:31: warning: use nullptr [modernize-use-nullptr]\r\n",
    "    Widget* lookup() { return 0; }\r\n",
    "/home/dev/proj/src/app.cpp:22:16: warning: statement should be inside braces [readability-braces-around-statements]\r\n",
    "    if (ready) launch();\r\n",
    "/home/dev/proj/src/app.cpp:31:9: warning: Dereference of null pointer [clang-analyzer-core.NullDereference]\r\n",
    "        w->spin();\r\n",
    "/home/dev/proj/src/app.cpp:31:9: note: Assuming pointer is null\r\n",
    "        w->spin();\r\n",
    "14302 warnings generated.\r\n",
    "Suppressed 14299 warnings (14296 in non-user code, 3 NOLINT).\r\n",
    "Use -header-filter=.* to display errors from all non-system headers.\r\n",
);

#[test]
fn test_realistic_transcript() {
    let options = ParseOptions {
        path_style: PathStyle::Forward,
    };
    let records = parse_report(TRANSCRIPT, &options);

    // Three warnings; the analyzer note has no bracketed check name and
    // reads as noise.
    assert_eq!(records.len(), 3);

    assert_eq!(records[0].file, PathBuf::from("/home/dev/proj/src/util.h"));
    assert_eq!(records[0].line, 13);
    assert_eq!(records[0].column, 30);
    assert_eq!(records[0].severity, "warning");
    assert_eq!(records[0].check_name, "modernize-use-nullptr");
    assert_eq!(records[0].code_line, "    Widget* lookup() { return 0; }");
    assert_eq!(records[0].highlight_token, "0");

    assert_eq!(records[1].file, PathBuf::from("/home/dev/proj/src/app.cpp"));
    assert_eq!(records[1].line, 21);
    assert_eq!(records[1].message, "statement should be inside braces");
    assert_eq!(records[1].highlight_token, "launch");

    assert_eq!(records[2].severity, "warning");
    assert_eq!(records[2].check_name, "clang-analyzer-core.NullDereference");
    assert_eq!(records[2].highlight_token, "w");
}

#[test]
fn test_transcript_without_findings() {
    let transcript = concat!(
        "Enabled checks:\r\n",
        "    modernize-use-nullptr\r\n",
        "\r\n",
        "595 warnings generated.\r\n",
        "Suppressed 595 warnings (595 in non-user code).\r\n",
    );

    let records = parse_report(transcript, &ParseOptions::default());
    assert!(records.is_empty());
}

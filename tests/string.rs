#[macro_use]
mod common;

run_ok!(string_literals_are_printed_unquoted, "print \"()\"; print \"a string\";", ["()", "a string"]);

run_ok!(single_and_double_quoted_strings_are_equivalent, "print 'also a string';", ["also a string"]);

run_ok!(
    a_string_literal_can_span_multiple_lines,
    "var s = \"line one
line two\";
     print s;",
    ["line one\nline two"]
);

run_static_err!(
    unterminated_string_is_a_scan_error,
    "var s = \"never closed;",
    "Unterminated string"
);

run_ok!(
    string_concatenation_builds_up_a_value,
    "var s = \"a\";
     s = s + \"b\";
     s = s + \"c\";
     print s;",
    ["abc"]
);

#[macro_use]
mod common;

run_ok!(trailing_line_comment_at_eof, "print \"ok\"; // trailing comment", ["ok"]);

run_ok!(comment_only_source_produces_nothing, "// just a comment", []);

run_ok!(comment_does_not_see_following_line, "// comment\nprint \"ok\";", ["ok"]);

run_ok!(comment_may_contain_unicode, "// héllo wörld 日本語\nprint \"ok\";", ["ok"]);

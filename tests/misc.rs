#[macro_use]
mod common;

run_ok!(empty_source_produces_no_output, "", []);

run_ok!(
    operator_precedence_matches_arithmetic_convention,
    "print 2 + 3 * 4;
     print (2 + 3) * 4;
     print 6 - 2 - 1;
     print !true == false;",
    ["14", "20", "3", "true"]
);

run_static_err!(unexpected_character_is_reported, "var a = 1;\nvar b = a | 2;", "Unexpected character '|'");

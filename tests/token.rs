use glint::source::Offset;
use glint::token::{keyword, Token, Type};

#[test]
fn construct_a_token_carries_its_kind_lexeme_and_offset() {
    let token = Token::new(Type::LeftParen, "(".to_string(), None, Offset::new(1, 2));

    assert_eq!(token.kind, Type::LeftParen);
    assert_eq!(token.lexeme, "(");
    assert_eq!(token.literal, None);
    assert_eq!(token.offset, Offset::new(1, 2));
}

#[test]
fn display_renders_kind_and_lexeme() {
    let token = Token::new(Type::LeftParen, "(".to_string(), None, Offset::new(1, 2));
    assert_eq!(format!("{token}"), "LeftParen '('");
}

#[test]
fn equal_tokens_compare_equal() {
    let a = Token::new(Type::Identifier, "init".to_string(), None, Offset::at(0));
    let b = Token::new(Type::Identifier, "init".to_string(), None, Offset::at(0));
    assert_eq!(a, b);
}

#[test]
fn tokens_with_different_lexemes_are_unequal() {
    let a = Token::new(Type::Identifier, "init".to_string(), None, Offset::at(0));
    let b = Token::new(Type::Identifier, "init2".to_string(), None, Offset::at(0));
    assert_ne!(a, b);
}

#[test]
fn tokens_with_different_offsets_are_unequal() {
    let a = Token::new(Type::Semicolon, ";".to_string(), None, Offset::new(2, 3));
    let b = Token::new(Type::Semicolon, ";".to_string(), None, Offset::new(1, 2));
    assert_ne!(a, b);
}

#[test]
fn keyword_recognizes_every_reserved_word() {
    assert_eq!(keyword("class"), Some(Type::Class));
    assert_eq!(keyword("public"), Some(Type::Public));
    assert_eq!(keyword("static"), Some(Type::Static));
    assert_eq!(keyword("new"), Some(Type::New));
    assert_eq!(keyword("nil"), Some(Type::Nil));
    assert_eq!(keyword("super"), Some(Type::Super));
}

#[test]
fn keyword_returns_none_for_an_ordinary_identifier() {
    assert_eq!(keyword("init"), None);
}

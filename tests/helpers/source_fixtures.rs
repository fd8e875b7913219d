//! Common schema fixtures for tests.

// Definitions
pub const PAIR_DEF: &str = r#"
type Pair<A,B> = {
    A left
    B right
}
"#;

pub const COLOR_ENUM: &str = r#"
enum Color = {
    RED = #FF0000
    GREEN = #00FF00
    BLUE = #0000FF
}
"#;

pub const PAGE_DEF: &str = r#"
type Page<T> = {
    num total = 0
    [2]T data
    meta = {
        str cursor = "abc"
        T last
    }
}
"#;

// Documents
pub const USER_API: &str = r#"
# user service
type User = {
    str name: display name = "bob"
    num age = 18
    bool admin = false
    Color favourite = GREEN
}

enum Color = {
    RED = #FF0000
    GREEN = #00FF00
}

GET /users = {
    Page<User> body
}

POST /user = {
    User body
    str note = none
}

type Page<T> = {
    num total = 0
    [2]T data
}
"#;

pub const MIXED_STATEMENTS: &str = r#"
str title = "Schemas"
num count = 3
# num hidden = 1
tags = [
    "a"
    "b"
]
summary = "multi
line
text"
bool done = true
"#;

pub const SELF_REFERENTIAL: &str = r#"
type Chain = {
    num value = 1
    Chain next
}

Chain head
"#;

pub const MISMATCHED_ARGS: &str = r#"
type Pair<A,B> = {
    A left
    B right
}

GET /pairs = {
    num count = 1
    Pair<str> broken
}
"#;
